//! Integration tests for user registration, token issuance and
//! self-management.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, patch_json, post_json, register_and_token};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn register_returns_201_without_password(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/users",
        None,
        serde_json::json!({"email": "cook@example.com", "password": "secret-pass", "name": "Cook"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["email"], "cook@example.com");
    assert_eq!(json["data"]["name"], "Cook");
    assert!(json["data"]["id"].is_number());
    // The hash must never appear in any response shape.
    assert!(json["data"].get("password").is_none());
    assert!(json["data"].get("password_hash").is_none());
}

#[sqlx::test(migrations = "../../migrations")]
async fn register_duplicate_email_returns_409(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let body =
        serde_json::json!({"email": "dup@example.com", "password": "secret-pass", "name": "A"});
    let response = post_json(app, "/api/v1/users", None, body.clone()).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/users", None, body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../migrations")]
async fn register_invalid_email_returns_400_with_field_detail(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/users",
        None,
        serde_json::json!({"email": "not-an-email", "password": "secret-pass"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["fields"]["email"].is_array());
}

#[sqlx::test(migrations = "../../migrations")]
async fn register_short_password_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/users",
        None,
        serde_json::json!({"email": "ok@example.com", "password": "abcd"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["fields"]["password"].is_array());
}

// ---------------------------------------------------------------------------
// Token issuance
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn token_issued_for_valid_credentials(pool: PgPool) {
    let token = register_and_token(&pool, "baker@example.com").await;
    assert!(!token.is_empty());
}

#[sqlx::test(migrations = "../../migrations")]
async fn token_rejected_for_wrong_password(pool: PgPool) {
    register_and_token(&pool, "chef@example.com").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/users/token",
        None,
        serde_json::json!({"email": "chef@example.com", "password": "wrong-pass"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../migrations")]
async fn token_rejected_for_unknown_email(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/users/token",
        None,
        serde_json::json!({"email": "ghost@example.com", "password": "whatever-pass"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Self-management
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn me_requires_authentication(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/users/me", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../migrations")]
async fn me_rejects_garbage_token(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/users/me", Some("not-a-jwt")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../migrations")]
async fn me_returns_own_profile(pool: PgPool) {
    let token = register_and_token(&pool, "me@example.com").await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/users/me", Some(&token)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["email"], "me@example.com");
}

#[sqlx::test(migrations = "../../migrations")]
async fn update_me_changes_name(pool: PgPool) {
    let token = register_and_token(&pool, "rename@example.com").await;

    let app = common::build_test_app(pool.clone());
    let response = patch_json(
        app,
        "/api/v1/users/me",
        Some(&token),
        serde_json::json!({"name": "New Name"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/users/me", Some(&token)).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "New Name");
    // Email untouched by the partial update.
    assert_eq!(json["data"]["email"], "rename@example.com");
}

#[sqlx::test(migrations = "../../migrations")]
async fn update_me_password_change_takes_effect(pool: PgPool) {
    let token = register_and_token(&pool, "pw@example.com").await;

    let app = common::build_test_app(pool.clone());
    let response = patch_json(
        app,
        "/api/v1/users/me",
        Some(&token),
        serde_json::json!({"password": "brand-new-pass"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Old password no longer works.
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/users/token",
        None,
        serde_json::json!({"email": "pw@example.com", "password": "test-password"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // New password does.
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/users/token",
        None,
        serde_json::json!({"email": "pw@example.com", "password": "brand-new-pass"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}
