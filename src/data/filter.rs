use super::model::{StudentDataset, StudentRecord, fold_name};

// ---------------------------------------------------------------------------
// Categorical selection: "All" sentinel or one exact value
// ---------------------------------------------------------------------------

/// Dropdown state for a categorical column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    /// Match-all sentinel.
    #[default]
    All,
    /// Exact, case-sensitive match.
    Only(String),
}

impl Selection {
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(wanted) => wanted == value,
        }
    }

    /// Label shown in the dropdown.
    pub fn label<'a>(&'a self, all_label: &'a str) -> &'a str {
        match self {
            Selection::All => all_label,
            Selection::Only(v) => value_label(v),
        }
    }
}

/// Dropdown and legend text for a categorical value. Blank values are
/// selectable too, so they need a visible name.
pub fn value_label(value: &str) -> &str {
    if value.is_empty() { BLANK_LABEL } else { value }
}

pub const BLANK_LABEL: &str = "(blank)";

// ---------------------------------------------------------------------------
// Filter criteria
// ---------------------------------------------------------------------------

/// The independent, optional predicates of the dashboard. The default value
/// passes every record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    /// Case-insensitive substring of the name; blank means no predicate.
    pub name_query: String,
    pub branch: Selection,
    pub semester: Selection,
    pub gpa_min: Option<f64>,
    pub gpa_max: Option<f64>,
}

impl FilterCriteria {
    /// Whether a record satisfies every specified predicate.
    ///
    /// All predicates are evaluated; the result is their conjunction.
    pub fn matches(&self, record: &StudentRecord) -> bool {
        let query = fold_name(&self.name_query);
        let checks = [
            query.is_empty() || record.match_key().contains(&query),
            self.branch.matches(record.branch()),
            self.semester.matches(record.semester()),
            within_bound(record.gpa(), self.gpa_min, |gpa, min| gpa >= min),
            within_bound(record.gpa(), self.gpa_max, |gpa, max| gpa <= max),
        ];
        checks.iter().all(|&ok| ok)
    }

    pub fn is_empty(&self) -> bool {
        fold_name(&self.name_query).is_empty()
            && self.branch == Selection::All
            && self.semester == Selection::All
            && self.gpa_min.is_none()
            && self.gpa_max.is_none()
    }
}

/// `NaN` never satisfies a specified bound.
fn within_bound(gpa: f64, bound: Option<f64>, cmp: impl Fn(f64, f64) -> bool) -> bool {
    match bound {
        None => true,
        Some(_) if gpa.is_nan() => false,
        Some(b) => cmp(gpa, b),
    }
}

/// Parse a GPA bound text box. Blank or unparsable text means "no bound".
pub fn parse_bound(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    match text.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => {
            log::debug!("Ignoring unparsable GPA bound {text:?}");
            None
        }
    }
}

/// Return the subset of `candidates` (indices into `dataset`) that pass all
/// criteria, in their incoming order.
pub fn filtered_indices(
    dataset: &StudentDataset,
    candidates: &[usize],
    criteria: &FilterCriteria,
) -> Vec<usize> {
    candidates
        .iter()
        .copied()
        .filter(|&i| {
            dataset
                .records()
                .get(i)
                .is_some_and(|record| criteria.matches(record))
        })
        .collect()
}
