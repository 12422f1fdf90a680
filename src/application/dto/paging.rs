//! # Paging
//!
//! Page requests and the policy applied to them.

use serde::{Deserialize, Serialize};

/// A `limit`/`offset` window over a trade table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Maximum number of rows.
    pub limit: u32,
    /// Rows to skip.
    pub offset: u32,
}

impl PageRequest {
    /// Page size used when the caller gives none.
    pub const DEFAULT_LIMIT: u32 = 1000;

    /// Creates a page request.
    #[must_use]
    pub const fn new(limit: u32, offset: u32) -> Self {
        Self { limit, offset }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LIMIT, 0)
    }
}

/// Rules applied to every page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagingPolicy {
    /// Report an empty page as not found instead of `[]`.
    #[serde(default)]
    pub strict_empty_pages: bool,
    /// Upper bound on `limit`.
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u32,
}

impl PagingPolicy {
    /// Caps the request's limit at the maximum page size.
    #[must_use]
    pub fn clamp(&self, page: PageRequest) -> PageRequest {
        PageRequest {
            limit: page.limit.min(self.max_page_size),
            offset: page.offset,
        }
    }
}

impl Default for PagingPolicy {
    fn default() -> Self {
        Self {
            strict_empty_pages: false,
            max_page_size: default_max_page_size(),
        }
    }
}

fn default_max_page_size() -> u32 {
    5000
}
