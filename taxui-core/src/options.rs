//! Option-list filtering for searchable selects.
//!
//! Two filtering disciplines exist on the pages:
//!
//! * the native augmenter repopulates the live select, always keeping the
//!   first (placeholder) option — [`filter_options`];
//! * the floating-list variant filters every option by label, placeholder
//!   included, and shows all of them for an empty term — [`matching_options`].
//!
//! Both are case-insensitive substring matches preserving original order.
//! No fuzzy ranking, no tokenization.

use crate::page::OptionEntry;

/// Subsequence of `original` whose labels contain `term`
/// case-insensitively. The first option is always retained.
pub fn filter_options(original: &[OptionEntry], term: &str) -> Vec<OptionEntry> {
    let needle = term.to_lowercase();
    original
        .iter()
        .enumerate()
        .filter(|(idx, opt)| *idx == 0 || opt.label.to_lowercase().contains(&needle))
        .map(|(_, opt)| opt.clone())
        .collect()
}

/// Every option of `original` whose label contains `term`, placeholder
/// included. An empty term matches everything.
pub fn matching_options(original: &[OptionEntry], term: &str) -> Vec<OptionEntry> {
    let needle = term.to_lowercase();
    original
        .iter()
        .filter(|opt| opt.label.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// The option to auto-select: exactly one non-placeholder survivor of a
/// non-empty term.
pub fn unique_match<'a>(filtered: &'a [OptionEntry], term: &str) -> Option<&'a OptionEntry> {
    if term.is_empty() || filtered.len() != 2 {
        return None;
    }
    filtered.get(1)
}
