use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::model::StudentRecord;

/// How unparsable (`NaN`) GPAs enter the average.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GpaAveraging {
    /// Unknown GPAs add 0 to the sum but still count in the divisor.
    #[default]
    ZeroSubstitute,
    /// Unknown GPAs are left out of both the sum and the divisor.
    ExcludeUnknown,
}

/// Summary metrics of a non-empty view.
#[derive(Debug, Clone, PartialEq)]
pub struct StatisticsSummary {
    pub total_count: usize,
    /// `None` only when no record has a usable GPA under
    /// [`GpaAveraging::ExcludeUnknown`].
    pub average_gpa: Option<f64>,
    /// Records per branch, in order of first occurrence.
    pub branch_counts: Vec<(String, usize)>,
}

/// Result of the aggregator. An empty view is `NoData`, never a zeroed summary.
#[derive(Debug, Clone, PartialEq)]
pub enum Statistics {
    NoData,
    Summary(StatisticsSummary),
}

impl Statistics {
    pub fn summary(&self) -> Option<&StatisticsSummary> {
        match self {
            Statistics::NoData => None,
            Statistics::Summary(s) => Some(s),
        }
    }
}

/// Compute count, mean GPA and per-branch tallies.
pub fn compute<'a>(
    records: impl IntoIterator<Item = &'a StudentRecord>,
    averaging: GpaAveraging,
) -> Statistics {
    let mut total_count = 0usize;
    let mut gpa_sum = 0.0;
    let mut gpa_count = 0usize;
    let mut branches: Vec<&str> = Vec::new();

    for record in records {
        total_count += 1;
        branches.push(record.branch());
        match (record.known_gpa(), averaging) {
            (Some(gpa), _) => {
                gpa_sum += gpa;
                gpa_count += 1;
            }
            (None, GpaAveraging::ZeroSubstitute) => gpa_count += 1,
            (None, GpaAveraging::ExcludeUnknown) => {}
        }
    }

    if total_count == 0 {
        return Statistics::NoData;
    }

    let average_gpa = (gpa_count > 0).then(|| gpa_sum / gpa_count as f64);

    Statistics::Summary(StatisticsSummary {
        total_count,
        average_gpa,
        branch_counts: group_counts(branches),
    })
}

/// Tally values, keeping the order in which each value first appears.
pub fn group_counts<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<(String, usize)> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();
    for value in values {
        match slots.get(value) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                slots.insert(value, counts.len());
                counts.push((value.to_string(), 1));
            }
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(branch: &str, gpa: f64) -> StudentRecord {
        StudentRecord::new("s", branch, "1", gpa)
    }

    #[test]
    fn test_zero_substitution_average() {
        let data = vec![rec("CS", 8.0), rec("CS", 6.0), rec("EE", f64::NAN)];
        let stats = compute(&data, GpaAveraging::ZeroSubstitute);
        let summary = stats.summary().unwrap();
        assert_eq!(summary.total_count, 3);
        let avg = summary.average_gpa.unwrap();
        assert!((avg - 14.0 / 3.0).abs() < 1e-9);
        assert_eq!(format!("{avg:.2}"), "4.67");
    }

    #[test]
    fn test_exclude_unknown_average() {
        let data = vec![rec("CS", 8.0), rec("CS", 6.0), rec("EE", f64::NAN)];
        let summary = compute(&data, GpaAveraging::ExcludeUnknown)
            .summary()
            .cloned()
            .unwrap();
        assert_eq!(summary.total_count, 3);
        assert_eq!(summary.average_gpa, Some(7.0));
    }

    #[test]
    fn test_all_unknown_excluded_has_no_average() {
        let data = vec![rec("CS", f64::NAN)];
        let stats = compute(&data, GpaAveraging::ExcludeUnknown);
        assert_eq!(stats.summary().unwrap().average_gpa, None);
        let stats = compute(&data, GpaAveraging::ZeroSubstitute);
        assert_eq!(stats.summary().unwrap().average_gpa, Some(0.0));
    }

    #[test]
    fn test_grouped_counts_first_occurrence_order() {
        let data = vec![rec("CS", 1.0), rec("CS", 2.0), rec("EE", 3.0)];
        let stats = compute(&data, GpaAveraging::default());
        assert_eq!(
            stats.summary().unwrap().branch_counts,
            vec![("CS".to_string(), 2), ("EE".to_string(), 1)]
        );

        let counts = group_counts(["EE", "CS", "EE", ""]);
        assert_eq!(
            counts,
            vec![("EE".to_string(), 2), ("CS".to_string(), 1), (String::new(), 1)]
        );
    }

    #[test]
    fn test_empty_input_is_no_data() {
        let data: Vec<StudentRecord> = Vec::new();
        let stats = compute(&data, GpaAveraging::ZeroSubstitute);
        assert_eq!(stats, Statistics::NoData);
        assert!(stats.summary().is_none());
    }
}
