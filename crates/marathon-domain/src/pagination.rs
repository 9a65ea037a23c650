//! Pagination parameters and the page summary returned with list results.

use serde::{Deserialize, Serialize};

/// Pagination parameters shared across list endpoints.
///
/// - `limit`: ≥ 1, default 10
/// - `page`: ≥ 1, default 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    10
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
        }
    }
}

impl PageRequest {
    /// Raise `limit` and `page` to at least 1. There is no upper bound on
    /// `limit`.
    ///
    /// Call after deserializing from query params to enforce bounds.
    pub fn clamped(self) -> Self {
        Self {
            page: self.page.max(1),
            limit: self.limit.max(1),
        }
    }

    /// Rows to skip: `(page - 1) * limit`.
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }
}

/// Whether a listing is paginated or an unpaginated export of every match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMode {
    Paged(PageRequest),
    Export,
}

/// Pagination block reported next to a result slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageSummary {
    pub total: u64,
    pub pages: u64,
    pub current: u32,
    pub limit: u64,
}

impl PageSummary {
    /// `pages = ceil(total / limit)` when paged. Export collapses to a single
    /// page whose limit is the total row count.
    pub fn new(total: u64, requested: PageRequest, mode: PageMode) -> Self {
        match mode {
            PageMode::Paged(page) => {
                let limit = u64::from(page.limit.max(1));
                Self {
                    total,
                    pages: total.div_ceil(limit),
                    current: page.page,
                    limit,
                }
            }
            PageMode::Export => Self {
                total,
                pages: 1,
                current: requested.page,
                limit: total,
            },
        }
    }
}
