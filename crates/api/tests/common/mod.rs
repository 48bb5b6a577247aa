#![allow(dead_code)]

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use tower::ServiceExt;

use catalog_api::auth::jwt::{generate_access_token, JwtConfig};
use catalog_api::auth::password::hash_password;
use catalog_api::config::{ServerConfig, DEFAULT_LOOKUP_CACHE_TTL_SECS};
use catalog_api::router::build_app_router;
use catalog_api::state::AppState;
use catalog_core::types::DbId;
use catalog_db::models::category::{Category, CreateCategory};
use catalog_db::models::product::{CreateProduct, Product};
use catalog_db::models::tag::{CreateTag, Tag};
use catalog_db::models::user::{CreateUser, User};
use catalog_db::repositories::{CategoryRepo, ProductRepo, TagRepo, UserRepo};

/// Password given to every user created by [`create_user`].
pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: "sqlite::memory:".to_string(),
        database_max_connections: 1,
        cors_origins: vec!["http://localhost:8000".to_string()],
        request_timeout_secs: 30,
        lookup_cache_ttl_secs: DEFAULT_LOOKUP_CACHE_TTL_SECS,
        seed_demo_data: false,
        admin_username: None,
        admin_password: None,
        jwt: JwtConfig {
            secret: "catalog-integration-test-secret".to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// Application state over the given pool, for tests that need to inspect
/// the lookup cache directly.
pub fn test_state(pool: SqlitePool) -> AppState {
    AppState::new(pool, test_config())
}

/// Build the full application router (same middleware stack as production).
pub fn build_test_app(pool: SqlitePool) -> Router {
    build_app_with_state(test_state(pool))
}

pub fn build_app_with_state(state: AppState) -> Router {
    let config = test_config();
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub async fn create_user(pool: &SqlitePool, username: &str, role: &str) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
            role: role.to_string(),
        },
    )
    .await
    .expect("user creation should succeed")
}

/// A bearer token for a fresh user with the given role.
pub async fn token_for_role(pool: &SqlitePool, role: &str) -> String {
    let user = create_user(pool, &format!("{role}-user"), role).await;
    generate_access_token(user.id, &user.role, &test_config().jwt)
        .expect("token generation should succeed")
}

pub async fn create_category(pool: &SqlitePool, name: &str) -> Category {
    CategoryRepo::create(
        pool,
        &CreateCategory {
            name: name.to_string(),
            slug: None,
            description: Some(format!("{name} items")),
        },
        &catalog_core::slug::generate_slug(name),
    )
    .await
    .expect("category creation should succeed")
}

pub async fn create_tag(pool: &SqlitePool, name: &str) -> Tag {
    TagRepo::create(
        pool,
        &CreateTag {
            name: name.to_string(),
        },
    )
    .await
    .expect("tag creation should succeed")
}

pub async fn create_product(
    pool: &SqlitePool,
    title: &str,
    description: &str,
    price_cents: i64,
    category_id: DbId,
    tag_ids: &[DbId],
) -> Product {
    ProductRepo::create(
        pool,
        &CreateProduct {
            title: title.to_string(),
            slug: catalog_core::slug::generate_slug(title),
            description: description.to_string(),
            price_cents,
            inventory: 10,
            is_active: true,
            category_id,
            tag_ids: tag_ids.to_vec(),
        },
    )
    .await
    .expect("product creation should succeed")
}

/// The two-product catalog used by most search tests.
pub struct SearchFixture {
    pub electronics: Category,
    pub eco_friendly: Tag,
    pub best_seller: Tag,
    pub earbuds: Product,
    pub speaker: Product,
}

/// Electronics holds Wireless Earbuds (Eco-Friendly, Best Seller) and
/// Bluetooth Speaker (Eco-Friendly).
pub async fn seed_search_fixture(pool: &SqlitePool) -> SearchFixture {
    let electronics = create_category(pool, "Electronics").await;
    let eco_friendly = create_tag(pool, "Eco-Friendly").await;
    let best_seller = create_tag(pool, "Best Seller").await;

    let earbuds = create_product(
        pool,
        "Wireless Earbuds",
        "High quality wireless earbuds with noise cancellation",
        9999,
        electronics.id,
        &[eco_friendly.id, best_seller.id],
    )
    .await;
    let speaker = create_product(
        pool,
        "Bluetooth Speaker",
        "Portable Bluetooth speaker with deep bass",
        4999,
        electronics.id,
        &[eco_friendly.id],
    )
    .await;

    SearchFixture {
        electronics,
        eco_friendly,
        best_seller,
        earbuds,
        speaker,
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("request should complete")
}

fn json_request(
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    builder.body(body).expect("request should build")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, json_request(Method::GET, uri, None, None)).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, json_request(Method::GET, uri, Some(token), None)).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request(Method::POST, uri, None, Some(body))).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, json_request(Method::POST, uri, Some(token), Some(body))).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, json_request(Method::PUT, uri, Some(token), Some(body))).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, json_request(Method::DELETE, uri, Some(token), None)).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).expect("body should be JSON")
}

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).expect("body should be UTF-8")
}

/// Titles of the products in a `{ "data": [...] }` search response.
pub fn titles(json: &serde_json::Value) -> Vec<String> {
    json["data"]
        .as_array()
        .expect("data should be an array")
        .iter()
        .map(|p| p["title"].as_str().unwrap_or_default().to_string())
        .collect()
}
