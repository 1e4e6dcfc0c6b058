//! Repository for the `products` table.
//!
//! Writes that touch categories or images run in a transaction: adding and
//! updating resolve the category by name in the same unit of work, and
//! deleting removes the product's images together with the product row.

use catalog_core::types::DbId;
use sqlx::PgPool;

use crate::models::product::{CreateProduct, Product, UpdateProduct};
use crate::repositories::{CategoryRepo, ImageRepo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, name, brand, description, price, inventory, category_id, created_at, updated_at";

/// Column list qualified with the `p` alias, for queries joining `categories`.
const P_COLUMNS: &str = "p.id, p.name, p.brand, p.description, p.price, p.inventory, \
    p.category_id, p.created_at, p.updated_at";

/// Provides CRUD and lookup operations for products.
pub struct ProductRepo;

impl ProductRepo {
    /// Insert a new product, resolving its category by exact name.
    ///
    /// The category is reused if one with that name exists, otherwise it is
    /// created in the same transaction as the product.
    pub async fn create(pool: &PgPool, input: &CreateProduct) -> Result<Product, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let category = CategoryRepo::find_or_create(&mut tx, &input.category.name).await?;

        let query = format!(
            "INSERT INTO products (name, brand, description, price, inventory, category_id) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        let product = sqlx::query_as::<_, Product>(&query)
            .bind(&input.name)
            .bind(&input.brand)
            .bind(&input.description)
            .bind(input.price)
            .bind(input.inventory)
            .bind(category.id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::debug!(
            product_id = product.id,
            category_id = category.id,
            "Product inserted"
        );
        Ok(product)
    }

    /// Find a product by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE id = $1");
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all products in insertion order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products ORDER BY id");
        sqlx::query_as::<_, Product>(&query).fetch_all(pool).await
    }

    /// List products whose category has exactly this name.
    pub async fn list_by_category_name(
        pool: &PgPool,
        category_name: &str,
    ) -> Result<Vec<Product>, sqlx::Error> {
        let query = format!(
            "SELECT {P_COLUMNS} FROM products p \
             JOIN categories c ON c.id = p.category_id \
             WHERE c.name = $1 \
             ORDER BY p.id"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(category_name)
            .fetch_all(pool)
            .await
    }

    /// List products with exactly this brand.
    pub async fn list_by_brand(pool: &PgPool, brand: &str) -> Result<Vec<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE brand = $1 ORDER BY id");
        sqlx::query_as::<_, Product>(&query)
            .bind(brand)
            .fetch_all(pool)
            .await
    }

    /// List products with exactly this name.
    pub async fn list_by_name(pool: &PgPool, name: &str) -> Result<Vec<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE name = $1 ORDER BY id");
        sqlx::query_as::<_, Product>(&query)
            .bind(name)
            .fetch_all(pool)
            .await
    }

    /// List products matching both a category name and a brand.
    pub async fn list_by_category_and_brand(
        pool: &PgPool,
        category_name: &str,
        brand: &str,
    ) -> Result<Vec<Product>, sqlx::Error> {
        let query = format!(
            "SELECT {P_COLUMNS} FROM products p \
             JOIN categories c ON c.id = p.category_id \
             WHERE c.name = $1 AND p.brand = $2 \
             ORDER BY p.id"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(category_name)
            .bind(brand)
            .fetch_all(pool)
            .await
    }

    /// List products matching both a brand and a name.
    pub async fn list_by_brand_and_name(
        pool: &PgPool,
        brand: &str,
        name: &str,
    ) -> Result<Vec<Product>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM products WHERE brand = $1 AND name = $2 ORDER BY id"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(brand)
            .bind(name)
            .fetch_all(pool)
            .await
    }

    /// Count products matching both a brand and a name.
    pub async fn count_by_brand_and_name(
        pool: &PgPool,
        brand: &str,
        name: &str,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE brand = $1 AND name = $2")
            .bind(brand)
            .bind(name)
            .fetch_one(pool)
            .await
    }

    /// Replace a product's mutable fields and re-resolve its category by name.
    ///
    /// The row is locked before anything else is written. Returns `None`
    /// without touching categories if no product with `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProduct,
    ) -> Result<Option<Product>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if !Self::lock(&mut tx, id).await? {
            return Ok(None);
        }

        let category = CategoryRepo::find_or_create(&mut tx, &input.category.name).await?;

        let query = format!(
            "UPDATE products SET \
                name = $2, \
                brand = $3, \
                description = $4, \
                price = $5, \
                inventory = $6, \
                category_id = $7, \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let product = sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.brand)
            .bind(&input.description)
            .bind(input.price)
            .bind(input.inventory)
            .bind(category.id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(product))
    }

    /// Delete a product and all of its images in one transaction.
    ///
    /// The category association lives on the product row, so removing the
    /// row detaches it; the category itself is kept. Returns `false` if no
    /// product with `id` exists.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if !Self::lock(&mut tx, id).await? {
            return Ok(false);
        }

        let images = ImageRepo::delete_by_product(&mut tx, id).await?;

        sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::debug!(product_id = id, images, "Product deleted with images");
        Ok(true)
    }

    /// Delete every product and every image. Returns the number of products removed.
    pub async fn delete_all(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM images").execute(&mut *tx).await?;
        let result = sqlx::query("DELETE FROM products")
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected())
    }

    /// Take a row lock on a product. Returns `false` if it does not exist.
    async fn lock(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let locked: Option<DbId> =
            sqlx::query_scalar("SELECT id FROM products WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut **tx)
                .await?;
        Ok(locked.is_some())
    }
}
