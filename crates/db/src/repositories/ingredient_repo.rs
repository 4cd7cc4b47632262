//! Repository for the `ingredients` table.

use ladle_core::types::DbId;
use sqlx::PgPool;

use crate::models::ingredient::Ingredient;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, name, created_at, updated_at";

/// Same columns qualified with the `i.` alias, for joined queries.
const I_COLUMNS: &str = "i.id, i.user_id, i.name, i.created_at, i.updated_at";

/// Provides operations for ingredients. Mirrors [`crate::repositories::TagRepo`]:
/// rows are created through recipe create/update and managed here.
pub struct IngredientRepo;

impl IngredientRepo {
    /// List the user's ingredients ordered by name.
    ///
    /// With `assigned_only`, restrict to ingredients used by at least one
    /// recipe (DISTINCT, since an ingredient can appear in many recipes).
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        assigned_only: bool,
    ) -> Result<Vec<Ingredient>, sqlx::Error> {
        let query = if assigned_only {
            format!(
                "SELECT DISTINCT {I_COLUMNS}
                 FROM ingredients i
                 JOIN recipe_ingredients ri ON ri.ingredient_id = i.id
                 WHERE i.user_id = $1
                 ORDER BY i.name ASC"
            )
        } else {
            format!("SELECT {COLUMNS} FROM ingredients WHERE user_id = $1 ORDER BY name ASC")
        };
        sqlx::query_as::<_, Ingredient>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// List the ingredients associated with a recipe, ordered by name.
    pub async fn list_for_recipe(
        pool: &PgPool,
        recipe_id: DbId,
    ) -> Result<Vec<Ingredient>, sqlx::Error> {
        let query = format!(
            "SELECT {I_COLUMNS}
             FROM ingredients i
             JOIN recipe_ingredients ri ON ri.ingredient_id = i.id
             WHERE ri.recipe_id = $1
             ORDER BY i.name ASC"
        );
        sqlx::query_as::<_, Ingredient>(&query)
            .bind(recipe_id)
            .fetch_all(pool)
            .await
    }

    /// Rename an ingredient, scoped to its owner.
    ///
    /// Returns `None` if the user owns no ingredient with the given `id`.
    pub async fn rename_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        name: Option<&str>,
    ) -> Result<Option<Ingredient>, sqlx::Error> {
        let query = format!(
            "UPDATE ingredients SET name = COALESCE($3, name), updated_at = NOW()
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Ingredient>(&query)
            .bind(id)
            .bind(user_id)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Delete an ingredient, scoped to its owner. Returns `true` if a row
    /// was removed.
    pub async fn delete_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM ingredients WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
