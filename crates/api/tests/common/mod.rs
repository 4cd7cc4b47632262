//! Shared helpers for HTTP-level integration tests.
//!
//! Tests drive the real router via `tower::ServiceExt::oneshot`, so the
//! full middleware stack (CORS, request ID, timeout, panic recovery) is
//! exercised without a TCP listener. The router is cheap to build, so each
//! request constructs a fresh app from the shared pool.

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use ladle_api::auth::jwt::JwtConfig;
use ladle_api::config::ServerConfig;
use ladle_api::router::build_app_router;
use ladle_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults and the given media root.
pub fn test_config(media_root: PathBuf) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        media_root,
        jwt: JwtConfig {
            secret: "integration-test-secret-not-for-production".to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// Build the application router with all middleware, using the given pool
/// and a throwaway media root.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_media(pool, std::env::temp_dir().join("ladle-test-media"))
}

/// Build the application router with an explicit media root (for upload
/// tests that inspect the stored files).
pub fn build_test_app_with_media(pool: PgPool, media_root: PathBuf) -> Router {
    let config = test_config(media_root);
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Send a GET request, optionally authenticated.
pub async fn get(app: Router, path: &str, token: Option<&str>) -> Response {
    send(app, Method::GET, path, token, None).await
}

/// Send a DELETE request, optionally authenticated.
pub async fn delete(app: Router, path: &str, token: Option<&str>) -> Response {
    send(app, Method::DELETE, path, token, None).await
}

/// Send a POST request with a JSON body, optionally authenticated.
pub async fn post_json(
    app: Router,
    path: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response {
    send(app, Method::POST, path, token, Some(body)).await
}

/// Send a PUT request with a JSON body, optionally authenticated.
pub async fn put_json(
    app: Router,
    path: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response {
    send(app, Method::PUT, path, token, Some(body)).await
}

/// Send a PATCH request with a JSON body, optionally authenticated.
pub async fn patch_json(
    app: Router,
    path: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response {
    send(app, Method::PATCH, path, token, Some(body)).await
}

async fn send(
    app: Router,
    method: Method,
    path: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap_or_else(|e| {
        panic!(
            "response body is not JSON ({e}): {}",
            String::from_utf8_lossy(&bytes)
        )
    })
}

/// Register a user with the given email and return an access token.
///
/// Builds fresh apps from the pool internally, so the caller's app value is
/// untouched.
pub async fn register_and_token(pool: &PgPool, email: &str) -> String {
    let password = "test-password";

    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/users",
        None,
        serde_json::json!({"email": email, "password": password, "name": "Test User"}),
    )
    .await;
    assert_eq!(
        response.status(),
        axum::http::StatusCode::CREATED,
        "user registration failed"
    );

    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/users/token",
        None,
        serde_json::json!({"email": email, "password": password}),
    )
    .await;
    assert_eq!(
        response.status(),
        axum::http::StatusCode::OK,
        "token request failed"
    );

    let json = body_json(response).await;
    json["data"]["token"].as_str().unwrap().to_string()
}

/// Create a recipe via the API and return its id.
///
/// `tags` / `ingredients` are nested-by-name payloads, e.g. `["vegan"]`.
pub async fn create_recipe(
    pool: &PgPool,
    token: &str,
    title: &str,
    tags: &[&str],
    ingredients: &[&str],
) -> i64 {
    let body = serde_json::json!({
        "title": title,
        "time_minutes": 30,
        "price_cents": 1250,
        "tags": tags.iter().map(|n| serde_json::json!({"name": n})).collect::<Vec<_>>(),
        "ingredients": ingredients.iter().map(|n| serde_json::json!({"name": n})).collect::<Vec<_>>(),
    });

    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/recipes",
        Some(token),
        body,
    )
    .await;
    assert_eq!(
        response.status(),
        axum::http::StatusCode::CREATED,
        "recipe creation failed"
    );

    let json = body_json(response).await;
    json["data"]["id"].as_i64().unwrap()
}
