//! Repository for the `categories` table.

use catalog_core::types::DbId;
use sqlx::PgPool;

use crate::models::category::{Category, CreateCategory, UpdateCategory};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, created_at, updated_at";

/// Provides CRUD operations for categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// Insert a new category.
    ///
    /// Returns `None` if a category with the same name already exists. The
    /// uniqueness check and the insert are one statement, so two concurrent
    /// creates for the same name cannot both succeed.
    pub async fn create(
        pool: &PgPool,
        input: &CreateCategory,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!(
            "INSERT INTO categories (name) VALUES ($1) \
             ON CONFLICT ON CONSTRAINT uq_categories_name DO NOTHING \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(&input.name)
            .fetch_optional(pool)
            .await
    }

    /// Find a category by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = $1");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a category by exact, case-sensitive name.
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE name = $1");
        sqlx::query_as::<_, Category>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Fetch every category whose ID is in `ids`. Missing IDs are skipped.
    pub async fn find_by_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = ANY($1) ORDER BY id");
        sqlx::query_as::<_, Category>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// List all categories ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories ORDER BY name, id");
        sqlx::query_as::<_, Category>(&query).fetch_all(pool).await
    }

    /// Rename a category.
    ///
    /// Returns `None` if no row with the given `id` exists. Renaming onto an
    /// existing name fails with a `uq_categories_name` violation.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCategory,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!(
            "UPDATE categories SET name = $2, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .bind(&input.name)
            .fetch_optional(pool)
            .await
    }

    /// Delete a category by ID. Returns `true` if a row was removed.
    ///
    /// Fails with a foreign key violation while products still reference it.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Return the category named `name`, creating it if it does not exist.
    ///
    /// A single upsert on `uq_categories_name`, so concurrent callers with the
    /// same unseen name all receive the same row. The no-op `DO UPDATE` is
    /// what makes `RETURNING` yield the existing row on conflict.
    pub(crate) async fn find_or_create(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        name: &str,
    ) -> Result<Category, sqlx::Error> {
        let query = format!(
            "INSERT INTO categories (name) VALUES ($1) \
             ON CONFLICT ON CONSTRAINT uq_categories_name DO UPDATE SET name = EXCLUDED.name \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(name)
            .fetch_one(&mut **tx)
            .await
    }
}
