//! Free-text search over the loaded entries.

use api_types::FinancialEntry;

/// Returns `true` when `entry` matches `term`.
///
/// The match is a case-insensitive substring test against the headline,
/// the amount, the date, the category and the status. Fields an entry does
/// not carry are skipped. An empty term matches every entry.
pub fn matches(entry: &FinancialEntry, term: &str) -> bool {
    let needle = term.to_lowercase();
    if needle.is_empty() {
        return true;
    }
    matches_lowercase(entry, &needle)
}

fn matches_lowercase(entry: &FinancialEntry, needle: &str) -> bool {
    let contains = |haystack: &str| haystack.to_lowercase().contains(needle);

    entry.headline().is_some_and(contains)
        || entry
            .amount
            .as_ref()
            .is_some_and(|amount| contains(&amount.search_text()))
        || entry.date.as_deref().is_some_and(contains)
        || entry
            .category
            .as_ref()
            .is_some_and(|category| contains(category.label()))
        || entry
            .status
            .as_ref()
            .is_some_and(|status| contains(status.label()))
}

/// Keeps the entries matching `term`, in their original order.
pub fn filter_entries<'a>(entries: &'a [FinancialEntry], term: &str) -> Vec<&'a FinancialEntry> {
    let needle = term.to_lowercase();
    if needle.is_empty() {
        return entries.iter().collect();
    }
    entries
        .iter()
        .filter(|entry| matches_lowercase(entry, &needle))
        .collect()
}
