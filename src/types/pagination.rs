//! Pagination types for list endpoints.

use serde::Serialize;

/// Pagination metadata attached to paged responses
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct PaginationMeta {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl PaginationMeta {
    /// Build metadata for a page
    pub fn new(page: u64, limit: u64, total: u64) -> Self {
        let total_pages = if limit > 0 { total.div_ceil(limit) } else { 0 };

        Self {
            page,
            limit,
            total,
            total_pages,
        }
    }
}
