//! Route definitions for the ingredient resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::ingredients;
use crate::state::AppState;

/// Ingredient routes mounted at `/ingredients`.
///
/// ```text
/// GET    /       -> list_ingredients
/// PUT    /{id}   -> update_ingredient
/// PATCH  /{id}   -> update_ingredient
/// DELETE /{id}   -> delete_ingredient
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(ingredients::list_ingredients))
        .route(
            "/{id}",
            put(ingredients::update_ingredient)
                .patch(ingredients::update_ingredient)
                .delete(ingredients::delete_ingredient),
        )
}
