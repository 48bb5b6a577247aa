//! Route definitions for the admin API.
//!
//! Role checks live in the handlers' extractors: reads take `RequireStaff`,
//! writes take `RequireAdmin`.

use axum::routing::get;
use axum::Router;

use crate::handlers::{admin, categories, products, tags};
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET                 /models             -> list_models
/// GET                 /models/{model}     -> get_model
/// GET, POST           /categories         -> list_categories, create_category
/// GET, PUT, DELETE    /categories/{id}    -> get_category, update_category, delete_category
/// GET, POST           /tags               -> list_tags, create_tag
/// GET, PUT, DELETE    /tags/{id}          -> get_tag, update_tag, delete_tag
/// GET, POST           /products           -> list_products, create_product
/// GET, PUT, DELETE    /products/{id}      -> get_product, update_product, delete_product
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/models", get(admin::list_models))
        .route("/models/{model}", get(admin::get_model))
        .route(
            "/categories",
            get(categories::list_categories).post(categories::create_category),
        )
        .route(
            "/categories/{id}",
            get(categories::get_category)
                .put(categories::update_category)
                .delete(categories::delete_category),
        )
        .route("/tags", get(tags::list_tags).post(tags::create_tag))
        .route(
            "/tags/{id}",
            get(tags::get_tag)
                .put(tags::update_tag)
                .delete(tags::delete_tag),
        )
        .route(
            "/products",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/products/{id}",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
}
