//! Paging constants and clamping helpers.

/// Books per page for owner-scoped paginated listing.
pub const PAGE_SIZE: i64 = 10;

/// Number of books shown on the HTML index page.
pub const RECENT_LIMIT: i64 = 20;

/// Default `limit` for the filtered JSON listing.
pub const DEFAULT_LIST_LIMIT: i64 = 10;

/// Maximum `limit` for the filtered JSON listing.
pub const MAX_LIST_LIMIT: i64 = 100;

/// Row offset of a 1-based page. Pages below 1 are treated as page 1.
pub fn page_offset(page: i64) -> i64 {
    (page.max(1) - 1).saturating_mul(PAGE_SIZE)
}

/// Clamp a user-provided limit to valid bounds.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}
