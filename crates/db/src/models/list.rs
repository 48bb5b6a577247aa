//! Query parameters for admin list endpoints.

use catalog_core::types::DbId;
use serde::Deserialize;

/// Query parameters for the admin product list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductAdminListParams {
    /// Free-text search over the descriptor's `search_fields`.
    pub q: Option<String>,
    /// Exact category filter (`list_filter`).
    pub category: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Query parameters shared by the category and tag admin lists.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminListParams {
    pub q: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
