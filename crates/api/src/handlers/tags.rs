//! Admin handlers for the `/admin/tags` resource.
//!
//! Reads require staff, writes require admin. Every write drops the cached
//! tag list used by the search page.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use catalog_core::slug::validate_name;
use catalog_core::types::DbId;
use catalog_db::models::list::AdminListParams;
use catalog_db::models::tag::{CreateTag, UpdateTag};
use catalog_db::repositories::TagRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireStaff};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/tags
pub async fn list_tags(
    _staff: RequireStaff,
    State(state): State<AppState>,
    Query(params): Query<AdminListParams>,
) -> AppResult<impl IntoResponse> {
    let tags = TagRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: tags }))
}

/// GET /api/v1/admin/tags/{id}
pub async fn get_tag(
    _staff: RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let tag = TagRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Tag", id))?;
    Ok(Json(DataResponse { data: tag }))
}

/// POST /api/v1/admin/tags
pub async fn create_tag(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateTag>,
) -> AppResult<impl IntoResponse> {
    validate_name("name", &input.name)?;

    let tag = TagRepo::create(&state.pool, &input).await?;
    state.lookups.invalidate_tags().await;

    tracing::info!(tag_id = tag.id, user_id = admin.user_id, "Tag created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: tag })))
}

/// PUT /api/v1/admin/tags/{id}
pub async fn update_tag(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTag>,
) -> AppResult<impl IntoResponse> {
    if let Some(name) = &input.name {
        validate_name("name", name)?;
    }

    let tag = TagRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("Tag", id))?;
    state.lookups.invalidate_tags().await;

    tracing::info!(tag_id = id, user_id = admin.user_id, "Tag updated");

    Ok(Json(DataResponse { data: tag }))
}

/// DELETE /api/v1/admin/tags/{id}
///
/// Removes the tag from every product it was attached to.
pub async fn delete_tag(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !TagRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Tag", id));
    }
    state.lookups.invalidate_tags().await;

    tracing::info!(tag_id = id, user_id = admin.user_id, "Tag deleted");

    Ok(StatusCode::NO_CONTENT)
}
