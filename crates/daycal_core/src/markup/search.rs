//! Case- and accent-insensitive matching for note search.

use unicode_normalization::UnicodeNormalization;

/// Lowercases `value`, decomposes it (NFD) and drops combining marks
/// (U+0300..U+036F), so `Canción` becomes `cancion`.
///
/// Letters without a canonical decomposition, such as `ł` or `ø`, are kept.
pub fn normalize_for_search(value: &str) -> String {
    value
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

/// Whether `haystack` contains `query` after normalization.
///
/// An empty (or whitespace-only) query matches everything.
pub fn matches_query(haystack: &str, query: &str) -> bool {
    let query = normalize_for_search(query.trim());
    if query.is_empty() {
        return true;
    }
    normalize_for_search(haystack).contains(&query)
}

fn is_combining_mark(c: char) -> bool {
    ('\u{0300}'..='\u{036f}').contains(&c)
}
