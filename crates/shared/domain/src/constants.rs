//! Domain-level constants.

// =============================================================================
// Pagination
// =============================================================================

/// Default page index (pages are zero-based)
pub const DEFAULT_PAGE_NUMBER: u64 = 0;

/// Default number of users per page
pub const DEFAULT_PAGE_SIZE: u64 = 5;

/// Largest offset or limit the store accepts (a signed 64-bit bind).
pub const MAX_QUERY_BOUND: u64 = i64::MAX as u64;
