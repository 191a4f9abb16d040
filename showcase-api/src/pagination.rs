//! Pagination utilities
//!
//! Feed pages hold a fixed 12 works; callers page by row offset.

/// Page size constant for all feed queries
pub const PAGE_SIZE: i64 = 12;

/// Total number of pages for a result set
///
/// # Examples
/// ```
/// use showcase_api::pagination::total_pages;
///
/// // 25 works = 3 pages (12 + 12 + 1)
/// assert_eq!(total_pages(25), 3);
/// assert_eq!(total_pages(0), 0);
/// ```
pub fn total_pages(total_results: u64) -> u64 {
    total_results.div_ceil(PAGE_SIZE as u64)
}

/// Parse a caller-supplied offset
///
/// Absent or non-numeric values become 0. Negative values pass through;
/// `feed::query_feed` clamps them.
pub fn parse_offset(raw: Option<&str>) -> i64 {
    raw.and_then(|s| s.trim().parse::<i64>().ok()).unwrap_or(0)
}
