/// Normalize a search query into a ticker symbol.
///
/// Trims surrounding whitespace and uppercases. Returns `None` for a blank
/// query, in which case the search does nothing.
#[must_use]
pub fn normalize_symbol(query: &str) -> Option<String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_uppercase())
    }
}
