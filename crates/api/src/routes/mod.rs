pub mod health;
pub mod ingredients;
pub mod recipes;
pub mod tags;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /users                       register (public)
/// /users/token                 obtain token (public)
/// /users/me                    retrieve/update self
///
/// /recipes                     list, create
/// /recipes/{id}                get, update, delete
/// /recipes/{id}/upload_image   upload image (POST)
///
/// /tags                        list
/// /tags/{id}                   update, delete
///
/// /ingredients                 list
/// /ingredients/{id}            update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/users", users::router())
        .nest("/recipes", recipes::router())
        .nest("/tags", tags::router())
        .nest("/ingredients", ingredients::router())
}
