//! Handlers for the `/ingredients` resource.
//!
//! Mirrors the tags handlers: list with the `assigned_only` flag, rename,
//! delete, all scoped to the authenticated user.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use ladle_core::error::CoreError;
use ladle_core::types::DbId;
use ladle_db::models::ingredient::Ingredient;
use ladle_db::repositories::IngredientRepo;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::{parse_assigned_only, AttrListParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `PUT/PATCH /ingredients/{id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateIngredientRequest {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: Option<String>,
}

/// GET /api/v1/ingredients
///
/// List the user's ingredients ordered by name. `assigned_only=1` restricts
/// to ingredients used by at least one recipe.
pub async fn list_ingredients(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<AttrListParams>,
) -> AppResult<Json<DataResponse<Vec<Ingredient>>>> {
    let assigned_only = parse_assigned_only(params.assigned_only.as_deref())?;

    let ingredients =
        IngredientRepo::list_for_user(&state.pool, auth.user_id, assigned_only).await?;

    Ok(Json(DataResponse { data: ingredients }))
}

/// PUT/PATCH /api/v1/ingredients/{id}
pub async fn update_ingredient(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateIngredientRequest>,
) -> AppResult<Json<DataResponse<Ingredient>>> {
    input.validate()?;

    let ingredient =
        IngredientRepo::rename_for_user(&state.pool, id, auth.user_id, input.name.as_deref())
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Ingredient",
                id,
            }))?;

    tracing::info!(ingredient_id = id, user_id = auth.user_id, "Ingredient updated");

    Ok(Json(DataResponse { data: ingredient }))
}

/// DELETE /api/v1/ingredients/{id}
pub async fn delete_ingredient(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = IngredientRepo::delete_for_user(&state.pool, id, auth.user_id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Ingredient",
            id,
        }));
    }

    tracing::info!(ingredient_id = id, user_id = auth.user_id, "Ingredient deleted");

    Ok(StatusCode::NO_CONTENT)
}
