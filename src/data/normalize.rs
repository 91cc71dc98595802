use super::model::{RawRow, RawValue, StudentDataset, StudentRecord};

// ---------------------------------------------------------------------------
// Header aliases, highest priority first
// ---------------------------------------------------------------------------

pub const NAME_ALIASES: &[&str] = &["Student Name", "Name"];
pub const BRANCH_ALIASES: &[&str] = &["Course Name", "Branch"];
pub const SEMESTER_ALIASES: &[&str] = &["Semester", "Semester No", "Sem"];
pub const GPA_ALIASES: &[&str] = &["CGPA", "GPA"];

/// Convert one raw row into a [`StudentRecord`]. Never fails: unresolved
/// text fields become empty strings and an unresolved GPA becomes `NaN`.
pub fn normalize_row(row: &RawRow) -> StudentRecord {
    let name = first_text(row, NAME_ALIASES).unwrap_or_default();
    let branch = first_text(row, BRANCH_ALIASES).unwrap_or_default();
    let semester = first_text(row, SEMESTER_ALIASES).unwrap_or_default();
    let gpa = first_present(row, GPA_ALIASES)
        .map(RawValue::as_f64)
        .unwrap_or(f64::NAN);

    StudentRecord::new(name.trim(), branch.trim(), semester.trim(), gpa)
}

/// Normalize every row; rows are never dropped.
pub fn normalize_rows(rows: &[RawRow]) -> StudentDataset {
    StudentDataset::from_records(rows.iter().map(normalize_row).collect())
}

/// First alias whose cell is present and not blank.
fn first_present<'a>(row: &'a RawRow, aliases: &[&str]) -> Option<&'a RawValue> {
    aliases
        .iter()
        .filter_map(|alias| row.get(alias))
        .find(|v| v.as_text().is_some())
}

fn first_text(row: &RawRow, aliases: &[&str]) -> Option<String> {
    first_present(row, aliases).and_then(RawValue::as_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[(&str, &str)]) -> RawRow {
        RawRow::new(
            cells
                .iter()
                .map(|(k, v)| (k.to_string(), RawValue::String(v.to_string())))
                .collect(),
        )
    }

    #[test]
    fn test_cgpa_alias_used_when_gpa_missing() {
        let r = normalize_row(&row(&[("Student Name", "Asha"), ("CGPA", "8.4")]));
        assert_eq!(r.gpa(), 8.4);
    }

    #[test]
    fn test_gpa_alias_fallback() {
        let r = normalize_row(&row(&[("Student Name", "Asha"), ("GPA", "6.5")]));
        assert_eq!(r.gpa(), 6.5);
    }

    #[test]
    fn test_cgpa_takes_priority_over_gpa() {
        let r = normalize_row(&row(&[("GPA", "6.5"), ("CGPA", "9.0")]));
        assert_eq!(r.gpa(), 9.0);
    }

    #[test]
    fn test_blank_cgpa_falls_through_to_gpa() {
        let r = normalize_row(&row(&[("CGPA", " "), ("GPA", "7.0")]));
        assert_eq!(r.gpa(), 7.0);
    }

    #[test]
    fn test_no_gpa_alias_is_nan() {
        let r = normalize_row(&row(&[("Student Name", "Asha"), ("Marks", "88")]));
        assert!(r.gpa().is_nan());
    }

    #[test]
    fn test_unparsable_gpa_is_nan() {
        let r = normalize_row(&row(&[("CGPA", "absent")]));
        assert!(r.gpa().is_nan());
    }

    #[test]
    fn test_semester_alias_order() {
        let r = normalize_row(&row(&[("Sem", "S2"), ("Semester No", "4")]));
        assert_eq!(r.semester(), "4");
        let r = normalize_row(&row(&[("Sem", "S2")]));
        assert_eq!(r.semester(), "S2");
        let r = normalize_row(&row(&[("Semester", "6"), ("Sem", "S2")]));
        assert_eq!(r.semester(), "6");
    }

    #[test]
    fn test_missing_fields_keep_row() {
        let ds = normalize_rows(&[row(&[]), row(&[("Course Name", "CSE")])]);
        assert_eq!(ds.len(), 2);
        let empty = &ds.records()[0];
        assert_eq!(empty.name(), "");
        assert_eq!(empty.branch(), "");
        assert_eq!(empty.semester(), "");
        assert!(empty.gpa().is_nan());
        assert_eq!(ds.records()[1].branch(), "CSE");
    }

    #[test]
    fn test_typed_cells() {
        let r = normalize_row(&RawRow::new(vec![
            ("Student Name".into(), RawValue::String("Kiran".into())),
            ("Semester".into(), RawValue::Integer(5)),
            ("CGPA".into(), RawValue::Float(7.75)),
        ]));
        assert_eq!(r.semester(), "5");
        assert_eq!(r.gpa(), 7.75);
    }
}
