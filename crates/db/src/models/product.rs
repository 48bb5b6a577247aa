//! Product model, listing views and DTOs.

use catalog_core::price::format_price;
use catalog_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::tag::TagInfo;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `products` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Product {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub price_cents: i64,
    pub inventory: i64,
    pub is_active: bool,
    pub category_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A product row joined with its category name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProductListing {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub product: Product,
    pub category_name: String,
}

/// A product with its category name and tags, as shown on the search page
/// and returned by the JSON search and admin detail endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogProduct {
    #[serde(flatten)]
    pub product: Product,
    pub category_name: String,
    /// Decimal rendering of `price_cents`, e.g. `"49.99"`.
    pub price: String,
    pub tags: Vec<TagInfo>,
}

impl CatalogProduct {
    pub fn new(listing: ProductListing, tags: Vec<TagInfo>) -> Self {
        Self {
            price: format_price(listing.product.price_cents),
            product: listing.product,
            category_name: listing.category_name,
            tags,
        }
    }

    pub fn has_tag(&self, tag_id: DbId) -> bool {
        self.tags.iter().any(|t| t.id == tag_id)
    }
}

/// One row of the admin product list: exactly the `list_display` columns of
/// [`catalog_core::admin::PRODUCT_ADMIN`].
#[derive(Debug, Clone, Serialize)]
pub struct ProductAdminRow {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub price: String,
    pub category: String,
    pub inventory: i64,
    pub is_active: bool,
    pub display_tags: String,
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// DTO for creating a product. Prices are already converted to cents.
#[derive(Debug, Clone)]
pub struct CreateProduct {
    pub title: String,
    pub slug: String,
    pub description: String,
    pub price_cents: i64,
    pub inventory: i64,
    pub is_active: bool,
    pub category_id: DbId,
    pub tag_ids: Vec<DbId>,
}

/// DTO for updating a product. Only `Some` fields are applied; `tag_ids`
/// replaces the whole tag set when present.
#[derive(Debug, Clone, Default)]
pub struct UpdateProduct {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub price_cents: Option<i64>,
    pub inventory: Option<i64>,
    pub is_active: Option<bool>,
    pub category_id: Option<DbId>,
    pub tag_ids: Option<Vec<DbId>>,
}
