//! Declarative admin descriptors.
//!
//! Each [`ModelAdmin`] states how one model appears in the admin API: which
//! columns a list row carries, which fields `?q=` searches, which list filters
//! are accepted, and which fields are filled in from others when omitted.
//! The repository and handler layers read these instead of hard-coding the
//! same lists in several places.

use serde::Serialize;

/// Default page size for admin list endpoints.
pub const DEFAULT_LIST_LIMIT: i64 = 100;

/// Maximum page size for admin list endpoints.
pub const MAX_LIST_LIMIT: i64 = 500;

/// A field filled from another field when the client leaves it blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Prepopulated {
    pub field: &'static str,
    pub from: &'static str,
}

/// Admin presentation metadata for a single model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModelAdmin {
    /// Model name, also the path segment under `/api/v1/admin`.
    pub model: &'static str,
    /// Columns returned for each row of the list view, in order.
    pub list_display: &'static [&'static str],
    /// Fields matched (OR, case-insensitive substring) by `?q=`.
    pub search_fields: &'static [&'static str],
    /// Query parameters accepted as exact-match list filters.
    pub list_filter: &'static [&'static str],
    pub prepopulated_fields: &'static [Prepopulated],
    /// Related fields edited by id (select/autocomplete widgets).
    pub autocomplete_fields: &'static [&'static str],
    /// `ORDER BY` column for the list view.
    pub ordering: &'static str,
}

impl ModelAdmin {
    pub fn searches(&self, field: &str) -> bool {
        self.search_fields.contains(&field)
    }

    pub fn displays(&self, field: &str) -> bool {
        self.list_display.contains(&field)
    }

    pub fn filters_on(&self, field: &str) -> bool {
        self.list_filter.contains(&field)
    }
}

pub const CATEGORY_ADMIN: ModelAdmin = ModelAdmin {
    model: "categories",
    list_display: &["id", "name", "description", "slug", "created_at"],
    search_fields: &["name"],
    list_filter: &[],
    prepopulated_fields: &[Prepopulated {
        field: "slug",
        from: "name",
    }],
    autocomplete_fields: &[],
    ordering: "name",
};

pub const TAG_ADMIN: ModelAdmin = ModelAdmin {
    model: "tags",
    list_display: &["id", "name", "created_at"],
    search_fields: &["name"],
    list_filter: &[],
    prepopulated_fields: &[],
    autocomplete_fields: &[],
    ordering: "name",
};

pub const PRODUCT_ADMIN: ModelAdmin = ModelAdmin {
    model: "products",
    list_display: &[
        "id",
        "title",
        "description",
        "price",
        "category",
        "inventory",
        "is_active",
        "display_tags",
    ],
    search_fields: &["title", "description"],
    list_filter: &["category"],
    prepopulated_fields: &[Prepopulated {
        field: "slug",
        from: "title",
    }],
    autocomplete_fields: &["category", "tags"],
    ordering: "title",
};

/// Every registered model, in navigation order.
pub const REGISTERED_MODELS: &[ModelAdmin] = &[CATEGORY_ADMIN, TAG_ADMIN, PRODUCT_ADMIN];

/// Look up a descriptor by its model name.
pub fn find_model(model: &str) -> Option<&'static ModelAdmin> {
    REGISTERED_MODELS.iter().find(|m| m.model == model)
}

/// Clamp an optional `limit` into `1..=MAX_LIST_LIMIT`.
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_LIST_LIMIT).clamp(1, MAX_LIST_LIMIT)
}

/// Clamp an optional `offset` to be non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

/// Join the display names of related rows into one list cell.
pub fn display_list<'a, I>(names: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    names.into_iter().collect::<Vec<_>>().join(", ")
}
