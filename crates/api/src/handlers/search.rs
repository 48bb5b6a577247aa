//! Public catalog search: the HTML page and its JSON twin.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect};
use axum::Json;
use catalog_core::search::SearchParams;
use catalog_db::models::category::Category;
use catalog_db::models::product::CatalogProduct;
use catalog_db::models::tag::Tag;
use catalog_db::repositories::ProductRepo;

use crate::error::AppResult;
use crate::pages::product_search::{SearchPage, SEARCH_PAGE_PATH, UNAVAILABLE_NOTICE};
use crate::query::SearchQuery;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /
pub async fn index() -> Redirect {
    Redirect::to(SEARCH_PAGE_PATH)
}

/// GET /products/
///
/// Accepts `search`, `category`, repeated `tags` and `tag_match`. Database
/// failures still produce the page, with empty lists, a notice and 503.
pub async fn search_page(
    State(state): State<AppState>,
    SearchQuery(params): SearchQuery,
) -> impl IntoResponse {
    match load_page_data(&state, &params).await {
        Ok((products, categories, tags)) => {
            let html = SearchPage {
                params: &params,
                products: &products,
                categories: &categories,
                tags: &tags,
                notice: None,
            }
            .render();
            (StatusCode::OK, Html(html))
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to load catalog for search page");
            let html = SearchPage {
                params: &params,
                products: &[],
                categories: &[],
                tags: &[],
                notice: Some(UNAVAILABLE_NOTICE),
            }
            .render();
            (StatusCode::SERVICE_UNAVAILABLE, Html(html))
        }
    }
}

/// GET /api/v1/products
///
/// Same parameters as the search page; returns the matching products.
pub async fn search_products(
    State(state): State<AppState>,
    SearchQuery(params): SearchQuery,
) -> AppResult<impl IntoResponse> {
    let products = ProductRepo::search(&state.pool, &params.to_filter()).await?;
    Ok(Json(DataResponse { data: products }))
}

type PageData = (Vec<CatalogProduct>, Arc<Vec<Category>>, Arc<Vec<Tag>>);

async fn load_page_data(state: &AppState, params: &SearchParams) -> Result<PageData, sqlx::Error> {
    let products = ProductRepo::search(&state.pool, &params.to_filter()).await?;
    let categories = state.lookups.categories(&state.pool).await?;
    let tags = state.lookups.tags(&state.pool).await?;
    Ok((products, categories, tags))
}
