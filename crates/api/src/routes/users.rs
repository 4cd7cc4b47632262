//! Route definitions for the user resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// User routes mounted at `/users`.
///
/// ```text
/// POST /          -> register (public)
/// POST /token     -> create_token (public)
/// GET  /me        -> me
/// PUT  /me        -> update_me
/// PATCH /me       -> update_me
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(users::register))
        .route("/token", post(users::create_token))
        .route(
            "/me",
            get(users::me).put(users::update_me).patch(users::update_me),
        )
}
