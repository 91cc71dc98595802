use std::collections::HashSet;
use std::fmt;

// ---------------------------------------------------------------------------
// RawValue – a single untyped cell of a source row
// ---------------------------------------------------------------------------

/// A dynamically-typed cell as it arrives from a csv / json / parquet source.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::String(s) => write!(f, "{s}"),
            RawValue::Integer(i) => write!(f, "{i}"),
            RawValue::Float(v) => write!(f, "{v}"),
            RawValue::Bool(b) => write!(f, "{b}"),
            RawValue::Null => Ok(()),
        }
    }
}

impl RawValue {
    /// Text form of the cell, or `None` when the cell is null or blank.
    pub fn as_text(&self) -> Option<String> {
        match self {
            RawValue::Null => None,
            RawValue::String(s) if s.trim().is_empty() => None,
            other => Some(other.to_string()),
        }
    }

    /// Numeric form of the cell. Text is parsed after trimming; anything that
    /// does not yield a finite number is `NaN`.
    pub fn as_f64(&self) -> f64 {
        let v = match self {
            RawValue::Float(v) => *v,
            RawValue::Integer(i) => *i as f64,
            RawValue::String(s) => s.trim().parse::<f64>().unwrap_or(f64::NAN),
            RawValue::Bool(_) | RawValue::Null => f64::NAN,
        };
        if v.is_finite() { v } else { f64::NAN }
    }
}

// ---------------------------------------------------------------------------
// RawRow – one record of the source file, columns in file order
// ---------------------------------------------------------------------------

/// An untyped source row: `(header, cell)` pairs in column order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    pub cells: Vec<(String, RawValue)>,
}

impl RawRow {
    pub fn new(cells: Vec<(String, RawValue)>) -> Self {
        RawRow { cells }
    }

    /// Look up a cell by header, ignoring surrounding whitespace and ASCII case.
    pub fn get(&self, header: &str) -> Option<&RawValue> {
        self.cells
            .iter()
            .find(|(h, _)| h.trim().eq_ignore_ascii_case(header))
            .map(|(_, v)| v)
    }
}

// ---------------------------------------------------------------------------
// StudentRecord – the canonical entity
// ---------------------------------------------------------------------------

/// One normalized student row. Fields are private so a record cannot change
/// after normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentRecord {
    name: String,
    branch: String,
    semester: String,
    gpa: f64,
}

impl StudentRecord {
    pub fn new(
        name: impl Into<String>,
        branch: impl Into<String>,
        semester: impl Into<String>,
        gpa: f64,
    ) -> Self {
        StudentRecord {
            name: name.into(),
            branch: branch.into(),
            semester: semester.into(),
            gpa,
        }
    }

    /// Display name with its original casing.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn branch(&self) -> &str {
        &self.branch
    }

    pub fn semester(&self) -> &str {
        &self.semester
    }

    /// Grade-point average; `NaN` when the source value was unusable.
    pub fn gpa(&self) -> f64 {
        self.gpa
    }

    /// Known GPA, or `None` for `NaN`.
    pub fn known_gpa(&self) -> Option<f64> {
        if self.gpa.is_nan() { None } else { Some(self.gpa) }
    }

    /// Trimmed, lower-cased name used for every search and membership test.
    pub fn match_key(&self) -> String {
        fold_name(&self.name)
    }
}

/// Canonical match form of a name: trimmed and case-folded.
pub fn fold_name(name: &str) -> String {
    name.trim().to_lowercase()
}

// ---------------------------------------------------------------------------
// StudentDataset – the canonical dataset
// ---------------------------------------------------------------------------

/// The full normalized dataset with dropdown indices.
#[derive(Debug, Clone, Default)]
pub struct StudentDataset {
    /// All records in source order.
    records: Vec<StudentRecord>,
    /// Distinct branches, first-occurrence order. A blank branch is listed
    /// like any other value so it can be filtered on.
    pub branches: Vec<String>,
    /// Distinct semesters, first-occurrence order, blank included.
    pub semesters: Vec<String>,
}

impl StudentDataset {
    /// Build the categorical indices from normalized records.
    pub fn from_records(records: Vec<StudentRecord>) -> Self {
        let branches = distinct_in_order(records.iter().map(StudentRecord::branch));
        let semesters = distinct_in_order(records.iter().map(StudentRecord::semester));
        StudentDataset {
            records,
            branches,
            semesters,
        }
    }

    pub fn records(&self) -> &[StudentRecord] {
        &self.records
    }

    /// Resolve a view's indices into records. Out-of-range indices are skipped.
    pub fn view<'a>(&'a self, indices: &'a [usize]) -> impl Iterator<Item = &'a StudentRecord> + 'a {
        indices.iter().filter_map(|&i| self.records.get(i))
    }

    /// Indices of every record in source order.
    pub fn all_indices(&self) -> Vec<usize> {
        (0..self.records.len()).collect()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn distinct_in_order<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_value_text() {
        assert_eq!(RawValue::String("  ".into()).as_text(), None);
        assert_eq!(RawValue::Null.as_text(), None);
        assert_eq!(RawValue::Integer(3).as_text().as_deref(), Some("3"));
        assert_eq!(RawValue::Float(7.5).as_text().as_deref(), Some("7.5"));
        assert_eq!(RawValue::Float(4.0).as_text().as_deref(), Some("4"));
    }

    #[test]
    fn test_raw_value_numeric() {
        assert_eq!(RawValue::String(" 8.25 ".into()).as_f64(), 8.25);
        assert_eq!(RawValue::Integer(9).as_f64(), 9.0);
        assert!(RawValue::String("n/a".into()).as_f64().is_nan());
        assert!(RawValue::String("inf".into()).as_f64().is_nan());
        assert!(RawValue::Bool(true).as_f64().is_nan());
    }

    #[test]
    fn test_row_lookup_ignores_case_and_padding() {
        let row = RawRow::new(vec![
            (" student name ".into(), RawValue::String("Asha".into())),
            ("CGPA".into(), RawValue::Float(8.1)),
        ]);
        assert_eq!(row.get("Student Name"), Some(&RawValue::String("Asha".into())));
        assert_eq!(row.get("cgpa"), Some(&RawValue::Float(8.1)));
        assert_eq!(row.get("GPA"), None);
    }

    #[test]
    fn test_dataset_indices_first_occurrence() {
        let ds = StudentDataset::from_records(vec![
            StudentRecord::new("a", "EE", "3", 7.0),
            StudentRecord::new("b", "CS", "1", 8.0),
            StudentRecord::new("c", "EE", "", 6.0),
            StudentRecord::new("d", "", "1", 6.0),
        ]);
        assert_eq!(ds.branches, vec!["EE", "CS", ""]);
        assert_eq!(ds.semesters, vec!["3", "1", ""]);
        assert_eq!(ds.len(), 4);
    }

    #[test]
    fn test_match_key() {
        let r = StudentRecord::new("  Ravi Kumar ", "CS", "1", 7.0);
        assert_eq!(r.match_key(), "ravi kumar");
        assert_eq!(r.name(), "  Ravi Kumar ");
    }
}
