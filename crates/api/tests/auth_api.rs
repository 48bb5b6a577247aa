//! HTTP-level tests for login, the current-user endpoint and admin bootstrap.

mod common;

use assert_matches::assert_matches;
use axum::http::StatusCode;
use catalog_api::auth::password::verify_password;
use catalog_api::bootstrap::ensure_admin_user;
use catalog_api::error::AppError;
use catalog_core::error::CoreError;
use catalog_db::repositories::UserRepo;
use common::{body_json, create_user, delete_auth, get, get_auth, post_json, TEST_PASSWORD};
use serde_json::json;
use sqlx::SqlitePool;

async fn login(app: axum::Router, username: &str, password: &str) -> axum::response::Response {
    post_json(
        app,
        "/api/v1/auth/login",
        json!({ "username": username, "password": password }),
    )
    .await
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_success(pool: SqlitePool) {
    let user = create_user(&pool, "alice", "admin").await;
    let app = common::build_test_app(pool.clone());

    let response = login(app, "alice", TEST_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    assert!(json["access_token"].is_string());
    assert_eq!(json["expires_in"], 3600);
    assert_eq!(json["user"]["id"], user.id);
    assert_eq!(json["user"]["username"], "alice");
    assert_eq!(json["user"]["role"], "admin");
    assert!(json["user"].get("password_hash").is_none());

    let stored = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert!(stored.last_login_at.is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_wrong_password(pool: SqlitePool) {
    create_user(&pool, "bob", "staff").await;
    let app = common::build_test_app(pool);

    let response = login(app, "bob", "incorrect-password").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_unknown_user(pool: SqlitePool) {
    let app = common::build_test_app(pool);

    let response = login(app, "nobody", TEST_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deactivated_account_is_forbidden(pool: SqlitePool) {
    let user = create_user(&pool, "carol", "staff").await;
    UserRepo::set_active(&pool, user.id, false).await.unwrap();
    let app = common::build_test_app(pool);

    let response = login(app, "carol", TEST_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_token_grants_admin_access(pool: SqlitePool) {
    create_user(&pool, "dave", "staff").await;
    let app = common::build_test_app(pool);

    let json = body_json(login(app.clone(), "dave", TEST_PASSWORD).await).await;
    let token = json["access_token"].as_str().unwrap().to_string();

    let response = get_auth(app.clone(), "/api/v1/auth/me", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let me = body_json(response).await;
    assert_eq!(me["data"]["username"], "dave");
    assert_eq!(me["data"]["role"], "staff");

    let response = get_auth(app.clone(), "/api/v1/admin/products", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(app, "/api/v1/auth/me").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_token_stops_working_when_account_deactivated(pool: SqlitePool) {
    let user = create_user(&pool, "erin", "admin").await;
    let app = common::build_test_app(pool.clone());

    let json = body_json(login(app.clone(), "erin", TEST_PASSWORD).await).await;
    let token = json["access_token"].as_str().unwrap().to_string();

    let response = delete_auth(app.clone(), "/api/v1/admin/products/999", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    UserRepo::set_active(&pool, user.id, false).await.unwrap();

    let response = delete_auth(app.clone(), "/api/v1/admin/products/999", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let response = get_auth(app, "/api/v1/auth/me", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_token_follows_current_role(pool: SqlitePool) {
    let user = create_user(&pool, "frank", "admin").await;
    let app = common::build_test_app(pool.clone());

    let json = body_json(login(app.clone(), "frank", TEST_PASSWORD).await).await;
    let token = json["access_token"].as_str().unwrap().to_string();

    sqlx::query("UPDATE users SET role = 'staff' WHERE id = ?")
        .bind(user.id)
        .execute(&pool)
        .await
        .unwrap();

    let response = delete_auth(app.clone(), "/api/v1/admin/products/999", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let response = get_auth(app, "/api/v1/admin/products", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Bootstrap admin
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bootstrap_admin_created_once(pool: SqlitePool) {
    let mut config = common::test_config();
    config.admin_username = Some("root".into());
    config.admin_password = Some("a-long-admin-password".into());

    assert!(ensure_admin_user(&pool, &config).await.unwrap());
    assert!(!ensure_admin_user(&pool, &config).await.unwrap());

    let admin = UserRepo::find_by_username(&pool, "root").await.unwrap().unwrap();
    assert_eq!(admin.role, "admin");
    assert!(verify_password("a-long-admin-password", &admin.password_hash).unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bootstrap_skipped_without_credentials(pool: SqlitePool) {
    let config = common::test_config();
    assert!(!ensure_admin_user(&pool, &config).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bootstrap_rejects_short_password(pool: SqlitePool) {
    let mut config = common::test_config();
    config.admin_username = Some("root".into());
    config.admin_password = Some("short".into());

    let result = ensure_admin_user(&pool, &config).await;
    assert_matches!(result, Err(AppError::Core(CoreError::Validation(_))));
    assert!(UserRepo::find_by_username(&pool, "root").await.unwrap().is_none());
}
