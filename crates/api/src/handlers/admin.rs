//! Admin metadata handlers.

use axum::extract::Path;
use axum::response::IntoResponse;
use axum::Json;
use catalog_core::admin::{find_model, REGISTERED_MODELS};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;

/// GET /api/v1/admin/models
///
/// Every registered model descriptor, in navigation order.
pub async fn list_models(
    _staff: RequireStaff,
) -> AppResult<impl IntoResponse> {
    Ok(Json(DataResponse {
        data: REGISTERED_MODELS,
    }))
}

/// GET /api/v1/admin/models/{model}
pub async fn get_model(
    _staff: RequireStaff,
    Path(model): Path<String>,
) -> AppResult<impl IntoResponse> {
    let descriptor = find_model(&model)
        .ok_or_else(|| AppError::NotFound(format!("Unknown admin model '{model}'")))?;
    Ok(Json(DataResponse { data: descriptor }))
}
