//! Route definitions for the recipe resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::recipes;
use crate::state::AppState;

/// Recipe routes mounted at `/recipes`.
///
/// ```text
/// GET    /                    -> list_recipes
/// POST   /                    -> create_recipe
/// GET    /{id}                -> get_recipe
/// PUT    /{id}                -> update_recipe
/// PATCH  /{id}                -> update_recipe
/// DELETE /{id}                -> delete_recipe
/// POST   /{id}/upload_image   -> upload_image
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(recipes::list_recipes).post(recipes::create_recipe))
        .route(
            "/{id}",
            get(recipes::get_recipe)
                .put(recipes::update_recipe)
                .patch(recipes::update_recipe)
                .delete(recipes::delete_recipe),
        )
        .route("/{id}/upload_image", post(recipes::upload_image))
}
