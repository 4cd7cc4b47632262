//! Handlers for the `/tags` resource.
//!
//! Tags come into existence through recipe create/update; here they are
//! listed, renamed and deleted, always scoped to the authenticated user.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use ladle_core::error::CoreError;
use ladle_core::types::DbId;
use ladle_db::models::tag::Tag;
use ladle_db::repositories::TagRepo;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::{parse_assigned_only, AttrListParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `PUT/PATCH /tags/{id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTagRequest {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: Option<String>,
}

/// GET /api/v1/tags
///
/// List the user's tags ordered by name. `assigned_only=1` restricts to
/// tags attached to at least one recipe.
pub async fn list_tags(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<AttrListParams>,
) -> AppResult<Json<DataResponse<Vec<Tag>>>> {
    let assigned_only = parse_assigned_only(params.assigned_only.as_deref())?;

    let tags = TagRepo::list_for_user(&state.pool, auth.user_id, assigned_only).await?;

    Ok(Json(DataResponse { data: tags }))
}

/// PUT/PATCH /api/v1/tags/{id}
pub async fn update_tag(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTagRequest>,
) -> AppResult<Json<DataResponse<Tag>>> {
    input.validate()?;

    let tag = TagRepo::rename_for_user(&state.pool, id, auth.user_id, input.name.as_deref())
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Tag", id }))?;

    tracing::info!(tag_id = id, user_id = auth.user_id, "Tag updated");

    Ok(Json(DataResponse { data: tag }))
}

/// DELETE /api/v1/tags/{id}
pub async fn delete_tag(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = TagRepo::delete_for_user(&state.pool, id, auth.user_id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "Tag", id }));
    }

    tracing::info!(tag_id = id, user_id = auth.user_id, "Tag deleted");

    Ok(StatusCode::NO_CONTENT)
}
