use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::filter::Selection;
use super::model::{StudentDataset, fold_name};
use super::normalize::NAME_ALIASES;

/// What a membership search returns when it has no candidate names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyCandidates {
    /// Nothing matches an empty list.
    ReturnEmpty,
    /// An empty list does not constrain the dataset.
    ReturnAll,
}

/// Extra headers a name-list file may start with.
const NAME_LIST_HEADERS: &[&str] = &["Names", "Student", "Students", "Full Name"];

// ---------------------------------------------------------------------------
// Candidate extraction
// ---------------------------------------------------------------------------

/// Folded (trimmed, lower-cased) candidate names. Duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateNames(Vec<String>);

impl CandidateNames {
    /// Split free text on commas and newlines.
    pub fn from_text(text: &str) -> Self {
        CandidateNames::from_iter(text.split([',', '\n', '\r']))
    }

    /// First column of an uploaded name-list file, one name per row.
    ///
    /// The first row is skipped when its first cell looks like a header
    /// (`Name`, `Student Name`, ...). This is a heuristic: a student actually
    /// called "Name" in the first row is dropped.
    pub fn from_rows<R: AsRef<[String]>>(rows: &[R]) -> Self {
        let firsts = rows
            .iter()
            .map(|row| row.as_ref().first().map(String::as_str).unwrap_or(""));
        let mut firsts = firsts.peekable();
        if firsts.peek().is_some_and(|first| is_name_header(first)) {
            firsts.next();
        }
        CandidateNames::from_iter(firsts)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }
}

impl<'a> FromIterator<&'a str> for CandidateNames {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        CandidateNames(
            iter.into_iter()
                .map(fold_name)
                .filter(|n| !n.is_empty())
                .collect(),
        )
    }
}

fn is_name_header(cell: &str) -> bool {
    let cell = fold_name(cell);
    NAME_ALIASES
        .iter()
        .chain(NAME_LIST_HEADERS)
        .any(|alias| fold_name(alias) == cell)
}

// ---------------------------------------------------------------------------
// Matching
// ---------------------------------------------------------------------------

/// Indices (in dataset order) of records whose folded name is one of the
/// candidates and whose semester passes `semester`.
pub fn matched_indices(
    dataset: &StudentDataset,
    candidates: &CandidateNames,
    on_empty: EmptyCandidates,
    semester: &Selection,
) -> Vec<usize> {
    if candidates.is_empty() && on_empty == EmptyCandidates::ReturnEmpty {
        return Vec::new();
    }
    let wanted: HashSet<&str> = candidates.names().iter().map(String::as_str).collect();

    dataset
        .records()
        .iter()
        .enumerate()
        .filter(|(_, record)| {
            let member = wanted.is_empty() || wanted.contains(record.match_key().as_str());
            member && semester.matches(record.semester())
        })
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::StudentRecord;

    fn dataset() -> StudentDataset {
        StudentDataset::from_records(vec![
            StudentRecord::new("Alice", "CS", "3", 8.0),
            StudentRecord::new("bob", "EE", "5", 7.0),
            StudentRecord::new("Alicia", "CS", "3", 6.0),
            StudentRecord::new("", "ME", "3", 6.0),
        ])
    }

    fn rows(cells: &[&str]) -> Vec<Vec<String>> {
        cells.iter().map(|c| vec![c.to_string(), "x".to_string()]).collect()
    }

    #[test]
    fn test_text_candidates_split_and_fold() {
        let c = CandidateNames::from_text(" ALICE, Bob\n\n,carol\r\n");
        assert_eq!(c.names(), ["alice", "bob", "carol"]);
    }

    #[test]
    fn test_bulk_match_ignores_case() {
        let ds = dataset();
        let c = CandidateNames::from_text("ALICE, Bob");
        let out = matched_indices(&ds, &c, EmptyCandidates::ReturnEmpty, &Selection::All);
        assert_eq!(out, vec![0, 1]);
    }

    #[test]
    fn test_match_is_exact_not_substring() {
        let ds = dataset();
        let c = CandidateNames::from_text("ali");
        let out = matched_indices(&ds, &c, EmptyCandidates::ReturnEmpty, &Selection::All);
        assert!(out.is_empty());
    }

    #[test]
    fn test_duplicates_are_harmless() {
        let ds = dataset();
        let c = CandidateNames::from_text("bob,BOB,bob");
        assert_eq!(c.len(), 3);
        let out = matched_indices(&ds, &c, EmptyCandidates::ReturnEmpty, &Selection::All);
        assert_eq!(out, vec![1]);
    }

    #[test]
    fn test_empty_candidates_policy() {
        let ds = dataset();
        let c = CandidateNames::from_text(" , \n ");
        assert!(c.is_empty());
        assert!(matched_indices(&ds, &c, EmptyCandidates::ReturnEmpty, &Selection::All).is_empty());
        assert_eq!(
            matched_indices(&ds, &c, EmptyCandidates::ReturnAll, &Selection::All),
            vec![0, 1, 2, 3]
        );
    }

    #[test]
    fn test_semester_anded_onto_membership() {
        let ds = dataset();
        let c = CandidateNames::from_text("alice\nbob\nalicia");
        let out = matched_indices(
            &ds,
            &c,
            EmptyCandidates::ReturnEmpty,
            &Selection::Only("3".into()),
        );
        assert_eq!(out, vec![0, 2]);
    }

    #[test]
    fn test_rows_skip_header_row() {
        let c = CandidateNames::from_rows(&rows(&["Student Name", "Alice", " ", "Bob"]));
        assert_eq!(c.names(), ["alice", "bob"]);
        let c = CandidateNames::from_rows(&rows(&["names", "Alice"]));
        assert_eq!(c.names(), ["alice"]);
    }

    #[test]
    fn test_rows_keep_first_name_when_not_header() {
        let c = CandidateNames::from_rows(&rows(&["Alice", "Bob"]));
        assert_eq!(c.names(), ["alice", "bob"]);
    }

    #[test]
    fn test_rows_handle_empty_records() {
        let data: Vec<Vec<String>> = vec![vec![], vec!["Bob".into()]];
        let c = CandidateNames::from_rows(&data);
        assert_eq!(c.names(), ["bob"]);
        assert!(CandidateNames::from_rows::<Vec<String>>(&[]).is_empty());
    }
}
