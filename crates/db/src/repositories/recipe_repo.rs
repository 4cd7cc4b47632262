//! Repository for the `recipes` table and its tag/ingredient associations.

use ladle_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::recipe::{CreateRecipe, Recipe, RecipeFilter, UpdateRecipe};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, user_id, title, time_minutes, price_cents, description, link, image_path, \
     created_at, updated_at";

/// Same columns qualified with the `r.` alias, for joined queries.
const R_COLUMNS: &str =
    "r.id, r.user_id, r.title, r.time_minutes, r.price_cents, r.description, r.link, \
     r.image_path, r.created_at, r.updated_at";

/// Provides CRUD operations for recipes.
pub struct RecipeRepo;

impl RecipeRepo {
    /// List the user's recipes, newest id first.
    ///
    /// Optional tag/ingredient ID filters in `filter` restrict the result to
    /// recipes with at least one association in the given set. The joins can
    /// multiply rows for recipes matching several IDs, so the select is
    /// DISTINCT.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        filter: &RecipeFilter,
    ) -> Result<Vec<Recipe>, sqlx::Error> {
        let query = format!(
            "SELECT DISTINCT {R_COLUMNS}
             FROM recipes r
             LEFT JOIN recipe_tags rt ON rt.recipe_id = r.id
             LEFT JOIN recipe_ingredients ri ON ri.recipe_id = r.id
             WHERE r.user_id = $1
               AND ($2::bigint[] IS NULL OR rt.tag_id = ANY($2))
               AND ($3::bigint[] IS NULL OR ri.ingredient_id = ANY($3))
             ORDER BY r.id DESC"
        );
        sqlx::query_as::<_, Recipe>(&query)
            .bind(user_id)
            .bind(&filter.tag_ids)
            .bind(&filter.ingredient_ids)
            .fetch_all(pool)
            .await
    }

    /// Find a recipe by ID, scoped to its owner.
    pub async fn find_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Recipe>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM recipes WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Recipe>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a recipe together with its tag/ingredient associations.
    ///
    /// Attribute rows are created on first use, scoped to the owner, and
    /// reused thereafter. The whole operation is one transaction.
    pub async fn create_for_user(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateRecipe,
        tag_names: &[String],
        ingredient_names: &[String],
    ) -> Result<Recipe, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO recipes (user_id, title, time_minutes, price_cents, description, link)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        let recipe = sqlx::query_as::<_, Recipe>(&query)
            .bind(user_id)
            .bind(&input.title)
            .bind(input.time_minutes)
            .bind(input.price_cents)
            .bind(&input.description)
            .bind(&input.link)
            .fetch_one(&mut *tx)
            .await?;

        attach_tags(&mut tx, recipe.id, user_id, tag_names).await?;
        attach_ingredients(&mut tx, recipe.id, user_id, ingredient_names).await?;

        tx.commit().await?;
        Ok(recipe)
    }

    /// Update a recipe, scoped to its owner. Only non-`None` fields in
    /// `input` are applied. When `tag_names` / `ingredient_names` is `Some`,
    /// the corresponding association set is replaced wholesale.
    ///
    /// Returns `None` if the user owns no recipe with the given `id`.
    pub async fn update_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        input: &UpdateRecipe,
        tag_names: Option<&[String]>,
        ingredient_names: Option<&[String]>,
    ) -> Result<Option<Recipe>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE recipes SET
                title = COALESCE($3, title),
                time_minutes = COALESCE($4, time_minutes),
                price_cents = COALESCE($5, price_cents),
                description = COALESCE($6, description),
                link = COALESCE($7, link),
                updated_at = NOW()
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        let recipe = sqlx::query_as::<_, Recipe>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.title)
            .bind(input.time_minutes)
            .bind(input.price_cents)
            .bind(&input.description)
            .bind(&input.link)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(recipe) = recipe else {
            return Ok(None);
        };

        if let Some(names) = tag_names {
            sqlx::query("DELETE FROM recipe_tags WHERE recipe_id = $1")
                .bind(recipe.id)
                .execute(&mut *tx)
                .await?;
            attach_tags(&mut tx, recipe.id, user_id, names).await?;
        }

        if let Some(names) = ingredient_names {
            sqlx::query("DELETE FROM recipe_ingredients WHERE recipe_id = $1")
                .bind(recipe.id)
                .execute(&mut *tx)
                .await?;
            attach_ingredients(&mut tx, recipe.id, user_id, names).await?;
        }

        tx.commit().await?;
        Ok(Some(recipe))
    }

    /// Delete a recipe, scoped to its owner. Returns `true` if a row was
    /// removed. Associations go with it via ON DELETE CASCADE.
    pub async fn delete_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Record the stored image path for a recipe, scoped to its owner.
    ///
    /// Returns `None` if the user owns no recipe with the given `id`.
    pub async fn set_image_path(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        image_path: &str,
    ) -> Result<Option<Recipe>, sqlx::Error> {
        let query = format!(
            "UPDATE recipes SET image_path = $3, updated_at = NOW()
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Recipe>(&query)
            .bind(id)
            .bind(user_id)
            .bind(image_path)
            .fetch_optional(pool)
            .await
    }
}

/// Get-or-create each named tag for the owner and associate it with the
/// recipe. Re-associating an already-linked tag is a no-op.
async fn attach_tags(
    conn: &mut PgConnection,
    recipe_id: DbId,
    user_id: DbId,
    names: &[String],
) -> Result<(), sqlx::Error> {
    for name in names {
        let tag_id: (DbId,) = sqlx::query_as(
            "INSERT INTO tags (user_id, name) VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_tags_user_name
             DO UPDATE SET name = EXCLUDED.name
             RETURNING id",
        )
        .bind(user_id)
        .bind(name)
        .fetch_one(&mut *conn)
        .await?;

        sqlx::query(
            "INSERT INTO recipe_tags (recipe_id, tag_id) VALUES ($1, $2)
             ON CONFLICT DO NOTHING",
        )
        .bind(recipe_id)
        .bind(tag_id.0)
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}

/// Get-or-create each named ingredient for the owner and associate it with
/// the recipe.
async fn attach_ingredients(
    conn: &mut PgConnection,
    recipe_id: DbId,
    user_id: DbId,
    names: &[String],
) -> Result<(), sqlx::Error> {
    for name in names {
        let ingredient_id: (DbId,) = sqlx::query_as(
            "INSERT INTO ingredients (user_id, name) VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_ingredients_user_name
             DO UPDATE SET name = EXCLUDED.name
             RETURNING id",
        )
        .bind(user_id)
        .bind(name)
        .fetch_one(&mut *conn)
        .await?;

        sqlx::query(
            "INSERT INTO recipe_ingredients (recipe_id, ingredient_id) VALUES ($1, $2)
             ON CONFLICT DO NOTHING",
        )
        .bind(recipe_id)
        .bind(ingredient_id.0)
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}
