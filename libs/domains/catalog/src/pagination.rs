//! Page arithmetic and the paginated response envelope.

use serde::{Deserialize, Serialize};

/// Offset/limit window for one page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSpec {
    /// 1-based page number, echoed back even when past the last page
    pub page: u64,
    pub limit: u64,
    /// `(page - 1) * limit`
    pub skip: u64,
}

impl PageSpec {
    /// `page` 0 is treated as page 1 for the offset; the skip saturates at `u64::MAX`.
    pub fn new(page: u64, limit: u64) -> Self {
        Self {
            page,
            limit,
            skip: page.saturating_sub(1).saturating_mul(limit),
        }
    }
}

/// `ceil(total / limit)`; 0 when there are no matches.
pub fn total_pages(total: u64, limit: u64) -> u64 {
    if limit == 0 {
        return 0;
    }
    total.div_ceil(limit)
}

/// One page of results plus pagination metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultEnvelope<T> {
    pub products: Vec<T>,
    /// Matching records ignoring pagination
    pub total: u64,
    pub current_page: u64,
    pub total_pages: u64,
    pub limit: u64,
}

impl<T> ResultEnvelope<T> {
    pub fn new(products: Vec<T>, total: u64, page: PageSpec) -> Self {
        Self {
            products,
            total,
            current_page: page.page,
            total_pages: total_pages(total, page.limit),
            limit: page.limit,
        }
    }
}
