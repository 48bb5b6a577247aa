//! Admin handlers for the `/admin/products` resource.
//!
//! Prices travel as decimal strings (`"99.99"`) and are stored as cents.
//! The category and every tag id must already exist; unknown ids are a 400.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use catalog_core::price::{parse_price, validate_inventory};
use catalog_core::slug::{resolve_slug, validate_name, validate_slug};
use catalog_core::types::DbId;
use catalog_db::models::list::ProductAdminListParams;
use catalog_db::models::product::{CreateProduct, UpdateProduct};
use catalog_db::repositories::{CategoryRepo, ProductRepo, TagRepo};
use catalog_db::DbPool;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireStaff};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /admin/products`.
#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub title: String,
    /// Derived from the title when omitted or blank.
    pub slug: Option<String>,
    #[serde(default)]
    pub description: String,
    pub price: String,
    #[serde(default)]
    pub inventory: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub category_id: DbId,
    #[serde(default)]
    pub tag_ids: Vec<DbId>,
}

/// Request body for `PUT /admin/products/{id}`. Absent fields are unchanged;
/// `tag_ids` replaces the whole tag set when present.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProductRequest {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub inventory: Option<i64>,
    pub is_active: Option<bool>,
    pub category_id: Option<DbId>,
    pub tag_ids: Option<Vec<DbId>>,
}

fn default_true() -> bool {
    true
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/products
///
/// Rows carry the `list_display` columns, `display_tags` included.
pub async fn list_products(
    _staff: RequireStaff,
    State(state): State<AppState>,
    Query(params): Query<ProductAdminListParams>,
) -> AppResult<impl IntoResponse> {
    let rows = ProductRepo::admin_list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/v1/admin/products/{id}
pub async fn get_product(
    _staff: RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let product = ProductRepo::find_catalog_product(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Product", id))?;
    Ok(Json(DataResponse { data: product }))
}

/// POST /api/v1/admin/products
pub async fn create_product(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateProductRequest>,
) -> AppResult<impl IntoResponse> {
    validate_name("title", &input.title)?;
    let slug = resolve_slug(input.slug.as_deref(), &input.title)?;
    let price_cents = parse_price(&input.price)?;
    validate_inventory(input.inventory)?;
    ensure_category_exists(&state.pool, input.category_id).await?;
    let tag_ids = ensure_tags_exist(&state.pool, &input.tag_ids).await?;

    let created = ProductRepo::create(
        &state.pool,
        &CreateProduct {
            title: input.title,
            slug,
            description: input.description,
            price_cents,
            inventory: input.inventory,
            is_active: input.is_active,
            category_id: input.category_id,
            tag_ids,
        },
    )
    .await?;

    let product = ProductRepo::find_catalog_product(&state.pool, created.id)
        .await?
        .ok_or(AppError::not_found("Product", created.id))?;

    tracing::info!(
        product_id = product.product.id,
        user_id = admin.user_id,
        "Product created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: product })))
}

/// PUT /api/v1/admin/products/{id}
pub async fn update_product(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProductRequest>,
) -> AppResult<impl IntoResponse> {
    if let Some(title) = &input.title {
        validate_name("title", title)?;
    }
    let slug = match input.slug.as_deref().map(str::trim) {
        Some("") => {
            let current = ProductRepo::find_by_id(&state.pool, id)
                .await?
                .ok_or(AppError::not_found("Product", id))?;
            let source = input.title.as_deref().unwrap_or(&current.title);
            Some(resolve_slug(None, source)?)
        }
        Some(slug) => {
            validate_slug(slug)?;
            Some(slug.to_string())
        }
        None => None,
    };
    let price_cents = input.price.as_deref().map(parse_price).transpose()?;
    if let Some(inventory) = input.inventory {
        validate_inventory(inventory)?;
    }
    if let Some(category_id) = input.category_id {
        ensure_category_exists(&state.pool, category_id).await?;
    }
    let tag_ids = match &input.tag_ids {
        Some(ids) => Some(ensure_tags_exist(&state.pool, ids).await?),
        None => None,
    };

    let update = UpdateProduct {
        title: input.title,
        slug,
        description: input.description,
        price_cents,
        inventory: input.inventory,
        is_active: input.is_active,
        category_id: input.category_id,
        tag_ids,
    };
    ProductRepo::update(&state.pool, id, &update)
        .await?
        .ok_or(AppError::not_found("Product", id))?;

    let product = ProductRepo::find_catalog_product(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Product", id))?;

    tracing::info!(product_id = id, user_id = admin.user_id, "Product updated");

    Ok(Json(DataResponse { data: product }))
}

/// DELETE /api/v1/admin/products/{id}
pub async fn delete_product(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !ProductRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Product", id));
    }

    tracing::info!(product_id = id, user_id = admin.user_id, "Product deleted");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn ensure_category_exists(pool: &DbPool, category_id: DbId) -> AppResult<()> {
    if CategoryRepo::find_by_id(pool, category_id).await?.is_none() {
        return Err(AppError::BadRequest(format!(
            "Category {category_id} does not exist"
        )));
    }
    Ok(())
}

/// Check every id names a tag and return the ids without duplicates.
async fn ensure_tags_exist(pool: &DbPool, tag_ids: &[DbId]) -> AppResult<Vec<DbId>> {
    let missing = TagRepo::find_missing(pool, tag_ids).await?;
    if !missing.is_empty() {
        let ids: Vec<String> = missing.iter().map(ToString::to_string).collect();
        return Err(AppError::BadRequest(format!(
            "Unknown tag id(s): {}",
            ids.join(", ")
        )));
    }

    let mut unique: Vec<DbId> = Vec::with_capacity(tag_ids.len());
    for id in tag_ids {
        if !unique.contains(id) {
            unique.push(*id);
        }
    }
    Ok(unique)
}
