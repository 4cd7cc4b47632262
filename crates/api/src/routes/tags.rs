//! Route definitions for the tag resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::tags;
use crate::state::AppState;

/// Tag routes mounted at `/tags`.
///
/// ```text
/// GET    /       -> list_tags
/// PUT    /{id}   -> update_tag
/// PATCH  /{id}   -> update_tag
/// DELETE /{id}   -> delete_tag
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(tags::list_tags)).route(
        "/{id}",
        put(tags::update_tag)
            .patch(tags::update_tag)
            .delete(tags::delete_tag),
    )
}
