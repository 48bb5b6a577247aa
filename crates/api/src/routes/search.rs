//! Public HTML routes, mounted at the root.

use axum::routing::get;
use axum::Router;

use crate::handlers::search;
use crate::state::AppState;

/// ```text
/// GET /             -> redirect to /products/
/// GET /products     -> search_page
/// GET /products/    -> search_page
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(search::index))
        .route("/products", get(search::search_page))
        .route("/products/", get(search::search_page))
}
