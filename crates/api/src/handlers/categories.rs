//! Admin handlers for the `/admin/categories` resource.
//!
//! Reads require staff, writes require admin. Every write drops the cached
//! category list used by the search page.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use catalog_core::error::CoreError;
use catalog_core::slug::{resolve_slug, validate_name, validate_slug};
use catalog_core::types::DbId;
use catalog_db::models::category::{CreateCategory, UpdateCategory};
use catalog_db::models::list::AdminListParams;
use catalog_db::repositories::CategoryRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireStaff};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/categories
pub async fn list_categories(
    _staff: RequireStaff,
    State(state): State<AppState>,
    Query(params): Query<AdminListParams>,
) -> AppResult<impl IntoResponse> {
    let categories = CategoryRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: categories }))
}

/// GET /api/v1/admin/categories/{id}
pub async fn get_category(
    _staff: RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let category = CategoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Category", id))?;
    Ok(Json(DataResponse { data: category }))
}

/// POST /api/v1/admin/categories
///
/// The slug is derived from the name when omitted.
pub async fn create_category(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateCategory>,
) -> AppResult<impl IntoResponse> {
    validate_name("name", &input.name)?;
    let slug = resolve_slug(input.slug.as_deref(), &input.name)?;

    let category = CategoryRepo::create(&state.pool, &input, &slug).await?;
    state.lookups.invalidate_categories().await;

    tracing::info!(
        category_id = category.id,
        user_id = admin.user_id,
        "Category created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: category })))
}

/// PUT /api/v1/admin/categories/{id}
///
/// Only provided fields change. A blank `slug` is re-derived from the name.
pub async fn update_category(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateCategory>,
) -> AppResult<impl IntoResponse> {
    if let Some(name) = &input.name {
        validate_name("name", name)?;
    }
    input.slug = match input.slug.as_deref().map(str::trim) {
        Some("") => {
            let current = CategoryRepo::find_by_id(&state.pool, id)
                .await?
                .ok_or(AppError::not_found("Category", id))?;
            let source = input.name.as_deref().unwrap_or(&current.name);
            Some(resolve_slug(None, source)?)
        }
        Some(slug) => {
            validate_slug(slug)?;
            Some(slug.to_string())
        }
        None => None,
    };

    let category = CategoryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("Category", id))?;
    state.lookups.invalidate_categories().await;

    tracing::info!(category_id = id, user_id = admin.user_id, "Category updated");

    Ok(Json(DataResponse { data: category }))
}

/// DELETE /api/v1/admin/categories/{id}
///
/// Refused with 409 while products still belong to the category.
pub async fn delete_category(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let product_count = CategoryRepo::count_products(&state.pool, id).await?;
    if product_count > 0 {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Category {id} still has {product_count} product(s)"
        ))));
    }

    if !CategoryRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Category", id));
    }
    state.lookups.invalidate_categories().await;

    tracing::info!(category_id = id, user_id = admin.user_id, "Category deleted");

    Ok(StatusCode::NO_CONTENT)
}
