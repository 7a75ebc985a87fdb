//! Pagination types for user listings.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, MAX_QUERY_BOUND};
use crate::error::{DomainError, DomainResult};
use crate::user::User;

/// Zero-based page request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PageRequest {
    #[serde(default = "default_page_number")]
    pub page_number: u64,
    #[serde(default = "default_page_size")]
    pub page_size: u64,
}

fn default_page_number() -> u64 {
    DEFAULT_PAGE_NUMBER
}

fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

impl PageRequest {
    pub fn new(page_number: u64, page_size: u64) -> Self {
        Self {
            page_number,
            page_size,
        }
    }

    /// Number of records to skip.
    ///
    /// `None` when the offset lies beyond anything the store can hold, in
    /// which case the page is necessarily empty.
    pub fn offset(&self) -> Option<u64> {
        self.page_number
            .checked_mul(self.page_size)
            .filter(|offset| *offset <= MAX_QUERY_BOUND)
    }

    /// Number of pages needed for `total` records
    pub fn page_count(&self, total: u64) -> u64 {
        if self.page_size == 0 {
            return 0;
        }
        total.div_ceil(self.page_size)
    }

    /// Reject requests that cannot produce a page.
    pub fn validate(&self) -> DomainResult<()> {
        if self.page_size == 0 {
            return Err(DomainError::validation("Page size must be greater than zero"));
        }
        if self.page_size > MAX_QUERY_BOUND {
            return Err(DomainError::validation(format!(
                "Page size must not exceed {}",
                MAX_QUERY_BOUND
            )));
        }
        Ok(())
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page_number: DEFAULT_PAGE_NUMBER,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of users together with the total page count
#[derive(Debug, Serialize)]
pub struct UserPage {
    pub users: Vec<User>,
    pub page_count: u64,
}
