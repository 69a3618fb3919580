//! Structured author/category filters shared by both search modes.

use crate::hymns::HymnRecord;
use crate::search::SearchOptions;

/// Case-insensitive substring test. A missing value never contains a
/// needle.
fn contains_ci(haystack: Option<&str>, needle: &str) -> bool {
    haystack.is_some_and(|value| value.to_lowercase().contains(&needle.to_lowercase()))
}

#[must_use]
pub fn passes_author(hymn: &HymnRecord, options: &SearchOptions) -> bool {
    options
        .author_filter()
        .is_none_or(|needle| contains_ci(hymn.author_name(), needle))
}

#[must_use]
pub fn passes_category(hymn: &HymnRecord, options: &SearchOptions) -> bool {
    options
        .category_filter()
        .is_none_or(|needle| contains_ci(hymn.category.as_deref(), needle))
}

/// Author filter, then category filter.
#[must_use]
pub fn passes_filters(hymn: &HymnRecord, options: &SearchOptions) -> bool {
    passes_author(hymn, options) && passes_category(hymn, options)
}
