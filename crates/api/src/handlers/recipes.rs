//! Handlers for the `/recipes` resource.
//!
//! Listing supports `tags` / `ingredients` comma-separated ID filters; all
//! operations are scoped to the authenticated user. Each operation returns
//! its own response shape: the list omits the long-form fields, the image
//! upload returns the image field alone.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use ladle_core::error::CoreError;
use ladle_core::types::DbId;
use ladle_db::models::ingredient::Ingredient;
use ladle_db::models::recipe::{CreateRecipe, Recipe, RecipeFilter, UpdateRecipe};
use ladle_db::models::tag::Tag;
use ladle_db::repositories::{IngredientRepo, RecipeRepo, TagRepo};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::{parse_id_list, RecipeListParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// Supported image file extensions for upload.
const SUPPORTED_IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// Subdirectory of the media root where recipe images land.
const IMAGE_DIR: &str = "recipe-images";

// ---------------------------------------------------------------------------
// Response shapes
// ---------------------------------------------------------------------------

/// Nested tag/ingredient representation inside a recipe detail.
#[derive(Debug, Serialize)]
pub struct AttrSummary {
    pub id: DbId,
    pub name: String,
}

impl From<Tag> for AttrSummary {
    fn from(tag: Tag) -> Self {
        Self {
            id: tag.id,
            name: tag.name,
        }
    }
}

impl From<Ingredient> for AttrSummary {
    fn from(ingredient: Ingredient) -> Self {
        Self {
            id: ingredient.id,
            name: ingredient.name,
        }
    }
}

/// List-operation shape: omits the long-form description.
#[derive(Debug, Serialize)]
pub struct RecipeSummary {
    pub id: DbId,
    pub title: String,
    pub time_minutes: i32,
    pub price_cents: i64,
    pub link: String,
    pub image_path: Option<String>,
}

impl From<Recipe> for RecipeSummary {
    fn from(recipe: Recipe) -> Self {
        Self {
            id: recipe.id,
            title: recipe.title,
            time_minutes: recipe.time_minutes,
            price_cents: recipe.price_cents,
            link: recipe.link,
            image_path: recipe.image_path,
        }
    }
}

/// Retrieve/create/update shape: all fields plus nested attributes.
#[derive(Debug, Serialize)]
pub struct RecipeDetail {
    pub id: DbId,
    pub title: String,
    pub time_minutes: i32,
    pub price_cents: i64,
    pub description: String,
    pub link: String,
    pub image_path: Option<String>,
    pub tags: Vec<AttrSummary>,
    pub ingredients: Vec<AttrSummary>,
}

/// Upload-operation shape: the image field alone.
#[derive(Debug, Serialize)]
pub struct RecipeImage {
    pub id: DbId,
    pub image_path: Option<String>,
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Nested attribute payload: `{"name": "vegan"}`.
#[derive(Debug, Deserialize)]
pub struct AttrInput {
    pub name: String,
}

/// Request body for `POST /recipes`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRecipeRequest {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,
    #[validate(range(min = 1, message = "time_minutes must be positive"))]
    pub time_minutes: i32,
    #[serde(default)]
    pub price_cents: i64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub tags: Vec<AttrInput>,
    #[serde(default)]
    pub ingredients: Vec<AttrInput>,
}

/// Request body for `PUT/PATCH /recipes/{id}`. All fields optional; a
/// present `tags` / `ingredients` list replaces the association set.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateRecipeRequest {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: Option<String>,
    #[validate(range(min = 1, message = "time_minutes must be positive"))]
    pub time_minutes: Option<i32>,
    pub price_cents: Option<i64>,
    pub description: Option<String>,
    pub link: Option<String>,
    pub tags: Option<Vec<AttrInput>>,
    pub ingredients: Option<Vec<AttrInput>>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/recipes
///
/// List the authenticated user's recipes, newest first, optionally filtered
/// by `tags` / `ingredients` comma-separated ID lists.
pub async fn list_recipes(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<RecipeListParams>,
) -> AppResult<Json<DataResponse<Vec<RecipeSummary>>>> {
    let filter = RecipeFilter {
        tag_ids: params.tags.as_deref().map(parse_id_list).transpose()?,
        ingredient_ids: params
            .ingredients
            .as_deref()
            .map(parse_id_list)
            .transpose()?,
    };

    let recipes = RecipeRepo::list_for_user(&state.pool, auth.user_id, &filter).await?;

    Ok(Json(DataResponse {
        data: recipes.into_iter().map(RecipeSummary::from).collect(),
    }))
}

/// POST /api/v1/recipes
///
/// Create a recipe for the authenticated user. Nested tags/ingredients are
/// get-or-created by name.
pub async fn create_recipe(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateRecipeRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<RecipeDetail>>)> {
    input.validate()?;

    let tag_names: Vec<String> = input.tags.into_iter().map(|t| t.name).collect();
    let ingredient_names: Vec<String> = input.ingredients.into_iter().map(|i| i.name).collect();

    let recipe = RecipeRepo::create_for_user(
        &state.pool,
        auth.user_id,
        &CreateRecipe {
            title: input.title,
            time_minutes: input.time_minutes,
            price_cents: input.price_cents,
            description: input.description,
            link: input.link,
        },
        &tag_names,
        &ingredient_names,
    )
    .await?;

    tracing::info!(recipe_id = recipe.id, user_id = auth.user_id, "Recipe created");

    let detail = load_detail(&state, recipe).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: detail })))
}

/// GET /api/v1/recipes/{id}
pub async fn get_recipe(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<RecipeDetail>>> {
    let recipe = RecipeRepo::find_for_user(&state.pool, id, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Recipe",
            id,
        }))?;

    let detail = load_detail(&state, recipe).await?;
    Ok(Json(DataResponse { data: detail }))
}

/// PUT/PATCH /api/v1/recipes/{id}
///
/// Update a recipe. Absent fields are left untouched; a present
/// `tags`/`ingredients` list replaces the association set wholesale.
pub async fn update_recipe(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateRecipeRequest>,
) -> AppResult<Json<DataResponse<RecipeDetail>>> {
    input.validate()?;

    let tag_names: Option<Vec<String>> = input
        .tags
        .map(|tags| tags.into_iter().map(|t| t.name).collect());
    let ingredient_names: Option<Vec<String>> = input
        .ingredients
        .map(|items| items.into_iter().map(|i| i.name).collect());

    let recipe = RecipeRepo::update_for_user(
        &state.pool,
        id,
        auth.user_id,
        &UpdateRecipe {
            title: input.title,
            time_minutes: input.time_minutes,
            price_cents: input.price_cents,
            description: input.description,
            link: input.link,
        },
        tag_names.as_deref(),
        ingredient_names.as_deref(),
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "Recipe",
        id,
    }))?;

    tracing::info!(recipe_id = recipe.id, user_id = auth.user_id, "Recipe updated");

    let detail = load_detail(&state, recipe).await?;
    Ok(Json(DataResponse { data: detail }))
}

/// DELETE /api/v1/recipes/{id}
pub async fn delete_recipe(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = RecipeRepo::delete_for_user(&state.pool, id, auth.user_id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Recipe",
            id,
        }));
    }

    tracing::info!(recipe_id = id, user_id = auth.user_id, "Recipe deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/recipes/{id}/upload_image
///
/// Accept a multipart payload with a single `image` field, validate its
/// format by sniffing the bytes, store it under the media root and record
/// the path on the recipe.
pub async fn upload_image(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<Json<DataResponse<RecipeImage>>> {
    // Resolve ownership before touching the payload.
    RecipeRepo::find_for_user(&state.pool, id, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Recipe",
            id,
        }))?;

    let mut image_data: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "image" => {
                let filename = field.file_name().unwrap_or("upload").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                image_data = Some((filename, data.to_vec()));
            }
            _ => {} // ignore unknown fields
        }
    }

    let (filename, data) =
        image_data.ok_or_else(|| AppError::BadRequest("Missing required 'image' field".into()))?;

    if data.is_empty() {
        return Err(AppError::BadRequest("'image' field is empty".into()));
    }

    let ext = filename.rsplit('.').next().unwrap_or("").to_lowercase();
    if !SUPPORTED_IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        return Err(AppError::BadRequest(format!(
            "Unsupported image extension '{ext}'. Must be one of: {}",
            SUPPORTED_IMAGE_EXTENSIONS.join(", ")
        )));
    }

    // Sniff the actual bytes; the extension alone proves nothing.
    image::guess_format(&data)
        .map_err(|_| AppError::BadRequest("'image' field is not a recognized image".into()))?;

    let dir = state.config.media_root.join(IMAGE_DIR);
    tokio::fs::create_dir_all(&dir)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to create media dir: {e}")))?;

    let stored_name = format!("{}.{ext}", Uuid::new_v4());
    tokio::fs::write(dir.join(&stored_name), &data)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to store image: {e}")))?;

    let image_path = format!("{IMAGE_DIR}/{stored_name}");
    let recipe = RecipeRepo::set_image_path(&state.pool, id, auth.user_id, &image_path)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Recipe",
            id,
        }))?;

    tracing::info!(recipe_id = id, user_id = auth.user_id, path = %image_path, "Recipe image stored");

    Ok(Json(DataResponse {
        data: RecipeImage {
            id: recipe.id,
            image_path: recipe.image_path,
        },
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Assemble the detail shape by loading the recipe's attribute lists.
async fn load_detail(state: &AppState, recipe: Recipe) -> AppResult<RecipeDetail> {
    let tags = TagRepo::list_for_recipe(&state.pool, recipe.id).await?;
    let ingredients = IngredientRepo::list_for_recipe(&state.pool, recipe.id).await?;

    Ok(RecipeDetail {
        id: recipe.id,
        title: recipe.title,
        time_minutes: recipe.time_minutes,
        price_cents: recipe.price_cents,
        description: recipe.description,
        link: recipe.link,
        image_path: recipe.image_path,
        tags: tags.into_iter().map(AttrSummary::from).collect(),
        ingredients: ingredients.into_iter().map(AttrSummary::from).collect(),
    })
}
