pub mod admin;
pub mod auth;
pub mod health;
pub mod search;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /products                                        catalog search (public, JSON)
///
/// /auth/login                                      login (public)
/// /auth/me                                         current user (requires auth)
///
/// /admin/models                                    admin descriptors (staff)
/// /admin/models/{model}                            one descriptor (staff)
/// /admin/categories                                list (staff), create (admin)
/// /admin/categories/{id}                           get (staff), update, delete (admin)
/// /admin/tags                                      list (staff), create (admin)
/// /admin/tags/{id}                                 get (staff), update, delete (admin)
/// /admin/products                                  list (staff), create (admin)
/// /admin/products/{id}                             get (staff), update, delete (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(handlers::search::search_products))
        .nest("/auth", auth::router())
        .nest("/admin", admin::router())
}
