//! Recipe entity model, DTOs and list filter.

use ladle_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `recipes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Recipe {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub time_minutes: i32,
    pub price_cents: i64,
    pub description: String,
    pub link: String,
    /// Path of the uploaded image relative to the media root, if any.
    pub image_path: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a new recipe.
#[derive(Debug)]
pub struct CreateRecipe {
    pub title: String,
    pub time_minutes: i32,
    pub price_cents: i64,
    pub description: String,
    pub link: String,
}

/// DTO for updating a recipe. Only non-`None` fields are applied.
#[derive(Debug, Default)]
pub struct UpdateRecipe {
    pub title: Option<String>,
    pub time_minutes: Option<i32>,
    pub price_cents: Option<i64>,
    pub description: Option<String>,
    pub link: Option<String>,
}

/// Optional association filters for recipe listing.
///
/// `None` means "no filter on that axis". The api layer parses the raw
/// comma-separated query parameters; invalid input never reaches this type.
#[derive(Debug, Default)]
pub struct RecipeFilter {
    pub tag_ids: Option<Vec<DbId>>,
    pub ingredient_ids: Option<Vec<DbId>>,
}
