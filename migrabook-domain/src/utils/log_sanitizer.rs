//! Keeps resolver responses short in debug logs.
//!
//! A DoH answer for a domain with many TXT or NS records can run to several
//! kilobytes; only a prefix is useful when reading logs.

/// Byte budget for a logged response body.
const LOG_BODY_LIMIT: usize = 256;

/// Largest char boundary at or below `index` (`str::floor_char_boundary` needs 1.91).
fn char_boundary_before(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    (0..=index).rev().find(|&i| s.is_char_boundary(i)).unwrap_or(0)
}

/// Shorten `body` to [`LOG_BODY_LIMIT`] bytes, noting the original size.
pub fn truncate_for_log(body: &str) -> String {
    if body.len() <= LOG_BODY_LIMIT {
        return body.to_string();
    }
    let cut = char_boundary_before(body, LOG_BODY_LIMIT);
    format!("{}... [truncated, total {} bytes]", &body[..cut], body.len())
}
