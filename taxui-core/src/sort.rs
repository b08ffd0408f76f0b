//! Click-to-sort ordering for table rows.
//!
//! A sortable header names its key in `data-sort`; rows carry the comparable
//! value in a `data-{key}` entry. Keys listed in [`TEXTUAL_KEYS`] compare
//! lexicographically (names and ISO-style dates), every other key compares
//! numerically with unparseable values sorting as zero.
//!
//! Direction contract: the first click on an unsorted column sorts
//! ascending; each further click on the active column flips the direction.
//! Only one column is sorted at a time, so ties are left wherever the sort
//! algorithm puts them.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Keys compared as text. Dates on these pages are ISO-formatted, so
/// lexicographic order is chronological order.
pub const TEXTUAL_KEYS: &[&str] = &["name", "extension", "sent", "return"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// The CSS marker class the header carries.
    pub fn class(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

pub fn is_textual_key(key: &str) -> bool {
    TEXTUAL_KEYS.contains(&key)
}

fn numeric(value: &str) -> f64 {
    value.trim().parse::<f64>().unwrap_or(0.0)
}

/// Ascending comparison of two values under `key`'s comparator.
pub fn compare_values(key: &str, a: &str, b: &str) -> Ordering {
    if is_textual_key(key) {
        a.cmp(b)
    } else {
        numeric(a)
            .partial_cmp(&numeric(b))
            .unwrap_or(Ordering::Equal)
    }
}

/// Row ids of `rows` (id, value pairs) ordered by `key` and `direction`.
pub fn sorted_order(
    rows: &[(String, String)],
    key: &str,
    direction: SortDirection,
) -> Vec<String> {
    let mut sorted: Vec<&(String, String)> = rows.iter().collect();
    sorted.sort_by(|a, b| {
        let ord = compare_values(key, &a.1, &b.1);
        match direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
    sorted.into_iter().map(|(id, _)| id.clone()).collect()
}
