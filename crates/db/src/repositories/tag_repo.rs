//! Repository for the `tags` table.

use ladle_core::types::DbId;
use sqlx::PgPool;

use crate::models::tag::Tag;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, name, created_at, updated_at";

/// Same columns qualified with the `t.` alias, for joined queries.
const T_COLUMNS: &str = "t.id, t.user_id, t.name, t.created_at, t.updated_at";

/// Provides operations for tags. Tag rows are created through recipe
/// create/update (get-or-create by name); this repo lists, renames and
/// deletes them.
pub struct TagRepo;

impl TagRepo {
    /// List the user's tags ordered by name.
    ///
    /// With `assigned_only`, restrict to tags attached to at least one
    /// recipe. The association join can multiply rows for tags used by
    /// several recipes, so that variant selects DISTINCT.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        assigned_only: bool,
    ) -> Result<Vec<Tag>, sqlx::Error> {
        let query = if assigned_only {
            format!(
                "SELECT DISTINCT {T_COLUMNS}
                 FROM tags t
                 JOIN recipe_tags rt ON rt.tag_id = t.id
                 WHERE t.user_id = $1
                 ORDER BY t.name ASC"
            )
        } else {
            format!("SELECT {COLUMNS} FROM tags WHERE user_id = $1 ORDER BY name ASC")
        };
        sqlx::query_as::<_, Tag>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// List the tags associated with a recipe, ordered by name.
    pub async fn list_for_recipe(
        pool: &PgPool,
        recipe_id: DbId,
    ) -> Result<Vec<Tag>, sqlx::Error> {
        let query = format!(
            "SELECT {T_COLUMNS}
             FROM tags t
             JOIN recipe_tags rt ON rt.tag_id = t.id
             WHERE rt.recipe_id = $1
             ORDER BY t.name ASC"
        );
        sqlx::query_as::<_, Tag>(&query)
            .bind(recipe_id)
            .fetch_all(pool)
            .await
    }

    /// Rename a tag, scoped to its owner.
    ///
    /// Returns `None` if the user owns no tag with the given `id`.
    pub async fn rename_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        name: Option<&str>,
    ) -> Result<Option<Tag>, sqlx::Error> {
        let query = format!(
            "UPDATE tags SET name = COALESCE($3, name), updated_at = NOW()
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tag>(&query)
            .bind(id)
            .bind(user_id)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Delete a tag, scoped to its owner. Returns `true` if a row was
    /// removed; recipe associations go with it via ON DELETE CASCADE.
    pub async fn delete_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tags WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
