use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::model::{StudentDataset, StudentRecord};

// ---------------------------------------------------------------------------
// Sort options
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Gpa,
    Name,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// The dashboard sort dropdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    /// Keep the incoming order.
    #[serde(rename = "none")]
    None,
    #[serde(rename = "cgpa-asc")]
    GpaAsc,
    #[default]
    #[serde(rename = "cgpa-desc")]
    GpaDesc,
    #[serde(rename = "name-asc")]
    NameAsc,
    #[serde(rename = "name-desc")]
    NameDesc,
}

impl SortOrder {
    pub const ALL: [SortOrder; 5] = [
        SortOrder::None,
        SortOrder::GpaAsc,
        SortOrder::GpaDesc,
        SortOrder::NameAsc,
        SortOrder::NameDesc,
    ];

    /// Key and direction, or `None` for the no-op order.
    pub fn key(self) -> Option<(SortKey, SortDirection)> {
        use SortDirection::*;
        match self {
            SortOrder::None => None,
            SortOrder::GpaAsc => Some((SortKey::Gpa, Ascending)),
            SortOrder::GpaDesc => Some((SortKey::Gpa, Descending)),
            SortOrder::NameAsc => Some((SortKey::Name, Ascending)),
            SortOrder::NameDesc => Some((SortKey::Name, Descending)),
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            SortOrder::None => "none",
            SortOrder::GpaAsc => "cgpa-asc",
            SortOrder::GpaDesc => "cgpa-desc",
            SortOrder::NameAsc => "name-asc",
            SortOrder::NameDesc => "name-desc",
        }
    }

    /// Human-readable dropdown label.
    pub fn label(self) -> &'static str {
        match self {
            SortOrder::None => "None",
            SortOrder::GpaAsc => "CGPA ↑",
            SortOrder::GpaDesc => "CGPA ↓",
            SortOrder::NameAsc => "Name A–Z",
            SortOrder::NameDesc => "Name Z–A",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown sort order {0:?} (expected none, cgpa-asc, cgpa-desc, name-asc or name-desc)")]
pub struct ParseSortOrderError(String);

impl FromStr for SortOrder {
    type Err = ParseSortOrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortOrder::ALL
            .into_iter()
            .find(|o| o.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseSortOrderError(s.to_string()))
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

/// Return `indices` reordered by `order`. The sort is stable and `NaN` GPAs
/// go last in both directions. Indices outside the dataset are dropped.
/// [`SortOrder::None`] returns the input as is.
pub fn sorted_indices(dataset: &StudentDataset, indices: &[usize], order: SortOrder) -> Vec<usize> {
    let Some((key, direction)) = order.key() else {
        return indices.to_vec();
    };
    let mut keyed: Vec<(usize, &StudentRecord)> = indices
        .iter()
        .filter_map(|&i| dataset.records().get(i).map(|r| (i, r)))
        .collect();
    keyed.sort_by(|(_, a), (_, b)| compare_records(a, b, key, direction));
    keyed.into_iter().map(|(i, _)| i).collect()
}

fn compare_records(a: &StudentRecord, b: &StudentRecord, key: SortKey, direction: SortDirection) -> Ordering {
    match key {
        SortKey::Gpa => compare_gpa(a.gpa(), b.gpa(), direction),
        SortKey::Name => {
            let ord = collate(a.name(), b.name());
            match direction {
                SortDirection::Ascending => ord,
                SortDirection::Descending => ord.reverse(),
            }
        }
    }
}

fn compare_gpa(a: f64, b: f64, direction: SortDirection) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            let ord = a.partial_cmp(&b).unwrap_or(Ordering::Equal);
            match direction {
                SortDirection::Ascending => ord,
                SortDirection::Descending => ord.reverse(),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Collation
// ---------------------------------------------------------------------------

/// Locale-style string comparison.
///
/// Primary strength ignores case and common Latin diacritics, ranking
/// whitespace < punctuation < digits < letters. Ties fall back to accents,
/// then case (lowercase first), then raw code points.
pub fn collate(a: &str, b: &str) -> Ordering {
    let primary = |s: &str| -> Vec<(u8, char)> {
        s.chars()
            .flat_map(char::to_lowercase)
            .map(|c| {
                let base = strip_accent(c);
                (char_class(base), base)
            })
            .collect()
    };
    let secondary = |s: &str| -> Vec<char> { s.chars().flat_map(char::to_lowercase).collect() };
    let tertiary = |s: &str| -> Vec<bool> { s.chars().map(char::is_uppercase).collect() };

    primary(a)
        .cmp(&primary(b))
        .then_with(|| secondary(a).cmp(&secondary(b)))
        .then_with(|| tertiary(a).cmp(&tertiary(b)))
        .then_with(|| a.cmp(b))
}

fn char_class(c: char) -> u8 {
    if c.is_whitespace() {
        0
    } else if !c.is_alphanumeric() {
        1
    } else if c.is_numeric() {
        2
    } else {
        3
    }
}

/// Fold a lower-case Latin letter with a diacritic to its base letter.
fn strip_accent(c: char) -> char {
    match c {
        'à'..='å' | 'ā' | 'ă' | 'ą' => 'a',
        'ç' | 'ć' | 'ĉ' | 'ċ' | 'č' => 'c',
        'ď' | 'đ' => 'd',
        'è'..='ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => 'e',
        'ĝ' | 'ğ' | 'ġ' | 'ģ' => 'g',
        'ì'..='ï' | 'ĩ' | 'ī' | 'ĭ' | 'į' | 'ı' => 'i',
        'ñ' | 'ń' | 'ņ' | 'ň' => 'n',
        'ò'..='ö' | 'ø' | 'ō' | 'ŏ' | 'ő' => 'o',
        'ŕ' | 'ŗ' | 'ř' => 'r',
        'ś' | 'ŝ' | 'ş' | 'š' => 's',
        'ţ' | 'ť' => 't',
        'ù'..='ü' | 'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => 'u',
        'ý' | 'ÿ' => 'y',
        'ź' | 'ż' | 'ž' => 'z',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(records: Vec<StudentRecord>) -> StudentDataset {
        StudentDataset::from_records(records)
    }

    fn names(ds: &StudentDataset, idx: &[usize]) -> Vec<String> {
        ds.view(idx).map(|r| r.name().to_string()).collect()
    }

    #[test]
    fn test_gpa_desc_nan_last() {
        let ds = dataset(vec![
            StudentRecord::new("a", "", "", f64::NAN),
            StudentRecord::new("b", "", "", 6.0),
            StudentRecord::new("c", "", "", 9.0),
        ]);
        let out = sorted_indices(&ds, &ds.all_indices(), SortOrder::GpaDesc);
        assert_eq!(out, vec![2, 1, 0]);
    }

    #[test]
    fn test_gpa_asc_nan_last() {
        let ds = dataset(vec![
            StudentRecord::new("a", "", "", f64::NAN),
            StudentRecord::new("b", "", "", 9.0),
            StudentRecord::new("c", "", "", 6.0),
        ]);
        let out = sorted_indices(&ds, &ds.all_indices(), SortOrder::GpaAsc);
        assert_eq!(out, vec![2, 1, 0]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_gpa() {
        let ds = dataset(vec![
            StudentRecord::new("first", "", "", 7.0),
            StudentRecord::new("top", "", "", 9.0),
            StudentRecord::new("second", "", "", 7.0),
        ]);
        let desc = sorted_indices(&ds, &ds.all_indices(), SortOrder::GpaDesc);
        assert_eq!(names(&ds, &desc), vec!["top", "first", "second"]);
        let asc = sorted_indices(&ds, &ds.all_indices(), SortOrder::GpaAsc);
        assert_eq!(names(&ds, &asc), vec!["first", "second", "top"]);
    }

    #[test]
    fn test_sort_is_idempotent() {
        let ds = dataset(vec![
            StudentRecord::new("Zoë", "", "", 7.0),
            StudentRecord::new("adam", "", "", f64::NAN),
            StudentRecord::new("Émile", "", "", 8.0),
            StudentRecord::new("Bea", "", "", 7.0),
        ]);
        for order in SortOrder::ALL {
            let once = sorted_indices(&ds, &ds.all_indices(), order);
            let twice = sorted_indices(&ds, &once, order);
            assert_eq!(once, twice, "{order}");
        }
    }

    #[test]
    fn test_indices_outside_dataset_are_dropped() {
        let ds = dataset(vec![
            StudentRecord::new("a", "", "", 6.0),
            StudentRecord::new("b", "", "", f64::NAN),
            StudentRecord::new("c", "", "", 9.0),
        ]);
        let indices = [7, 0, 42, 1, 2, 99];
        assert_eq!(sorted_indices(&ds, &indices, SortOrder::GpaDesc), vec![2, 0, 1]);
        assert_eq!(sorted_indices(&ds, &indices, SortOrder::NameAsc), vec![0, 1, 2]);
    }

    #[test]
    fn test_none_keeps_input_order() {
        let ds = dataset(vec![
            StudentRecord::new("b", "", "", 1.0),
            StudentRecord::new("a", "", "", 2.0),
        ]);
        assert_eq!(sorted_indices(&ds, &[1, 0], SortOrder::None), vec![1, 0]);
    }

    #[test]
    fn test_name_sort_is_accent_and_case_aware() {
        let ds = dataset(vec![
            StudentRecord::new("zara", "", "", 1.0),
            StudentRecord::new("Émile", "", "", 1.0),
            StudentRecord::new("bob", "", "", 1.0),
            StudentRecord::new("Eve", "", "", 1.0),
        ]);
        let asc = sorted_indices(&ds, &ds.all_indices(), SortOrder::NameAsc);
        assert_eq!(names(&ds, &asc), vec!["bob", "Émile", "Eve", "zara"]);
        let desc = sorted_indices(&ds, &ds.all_indices(), SortOrder::NameDesc);
        assert_eq!(names(&ds, &desc), vec!["zara", "Eve", "Émile", "bob"]);
    }

    #[test]
    fn test_collate_ordering() {
        assert_eq!(collate("a", "B"), Ordering::Less);
        assert_eq!(collate("a", "A"), Ordering::Less);
        assert_eq!(collate("e", "é"), Ordering::Less);
        assert_eq!(collate("é", "f"), Ordering::Less);
        assert_eq!(collate("a b", "ab"), Ordering::Less);
        assert_eq!(collate("9", "a"), Ordering::Less);
        assert_eq!(collate("same", "same"), Ordering::Equal);
    }

    #[test]
    fn test_sort_order_parse_and_display() {
        assert_eq!("cgpa-desc".parse::<SortOrder>(), Ok(SortOrder::GpaDesc));
        assert_eq!(" Name-Asc ".parse::<SortOrder>(), Ok(SortOrder::NameAsc));
        assert!("gpa".parse::<SortOrder>().is_err());
        for order in SortOrder::ALL {
            assert_eq!(order.to_string().parse::<SortOrder>(), Ok(order));
        }
        assert_eq!(SortOrder::default(), SortOrder::GpaDesc);
        assert_eq!(SortOrder::None.key(), None);
    }

    #[test]
    fn test_sort_order_serde_labels() {
        let order: SortOrder = serde_json::from_str("\"name-desc\"").unwrap();
        assert_eq!(order, SortOrder::NameDesc);
        assert_eq!(serde_json::to_string(&SortOrder::None).unwrap(), "\"none\"");
    }
}
