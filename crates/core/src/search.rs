//! Pagination defaults and text-search helpers.

// ---------------------------------------------------------------------------
// Pagination defaults
// ---------------------------------------------------------------------------

/// Default page size for public and admin listings.
pub const DEFAULT_PAGE_LIMIT: i64 = 20;

/// Maximum page size for public and admin listings.
pub const MAX_PAGE_LIMIT: i64 = 100;

/// Clamp a user-provided limit to `[1, max]`, using `default` when absent.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

// ---------------------------------------------------------------------------
// Substring search
// ---------------------------------------------------------------------------

/// Turn free text into an `ILIKE` substring pattern.
///
/// Escapes `\`, `%` and `_` so user input never acts as a wildcard.
/// Returns `None` for empty or whitespace-only input.
///
/// # Examples
///
/// ```
/// use marquee_core::search::like_pattern;
/// assert_eq!(like_pattern("heat"), Some("%heat%".to_string()));
/// assert_eq!(like_pattern("100%"), Some("%100\\%%".to_string()));
/// assert_eq!(like_pattern("  "), None);
/// ```
pub fn like_pattern(query: &str) -> Option<String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return None;
    }
    let mut escaped = String::with_capacity(trimmed.len() + 2);
    escaped.push('%');
    for c in trimmed.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    Some(escaped)
}
