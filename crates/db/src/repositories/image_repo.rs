//! Repository for the `images` table.

use catalog_core::catalog::image_download_url;
use catalog_core::types::DbId;
use sqlx::PgPool;

use crate::models::image::{Image, ImageInfo, NewImage};

/// Column list for full rows, payload included.
const COLUMNS: &str =
    "id, file_name, file_type, data, download_url, product_id, created_at, updated_at";

/// Column list for metadata-only projections.
const INFO_COLUMNS: &str = "id, file_name, file_type, download_url, product_id";

/// Provides CRUD operations for product images.
pub struct ImageRepo;

impl ImageRepo {
    /// Store a batch of images for one product in a single transaction.
    ///
    /// Each image's `download_url` is derived from its generated ID, so the
    /// row is inserted first and then stamped with the URL. Either every
    /// image is stored or none is.
    pub async fn create_many(
        pool: &PgPool,
        product_id: DbId,
        images: &[NewImage],
    ) -> Result<Vec<ImageInfo>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let mut saved = Vec::with_capacity(images.len());

        for image in images {
            let id: DbId = sqlx::query_scalar(
                "INSERT INTO images (file_name, file_type, data, product_id) \
                 VALUES ($1, $2, $3, $4) \
                 RETURNING id",
            )
            .bind(&image.file_name)
            .bind(&image.file_type)
            .bind(&image.data)
            .bind(product_id)
            .fetch_one(&mut *tx)
            .await?;

            let query = format!(
                "UPDATE images SET download_url = $2 WHERE id = $1 RETURNING {INFO_COLUMNS}"
            );
            let info = sqlx::query_as::<_, ImageInfo>(&query)
                .bind(id)
                .bind(image_download_url(id))
                .fetch_one(&mut *tx)
                .await?;
            saved.push(info);
        }

        tx.commit().await?;
        Ok(saved)
    }

    /// Find an image by ID, payload included.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Image>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM images WHERE id = $1");
        sqlx::query_as::<_, Image>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an image's metadata by ID without loading the payload.
    pub async fn find_info_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ImageInfo>, sqlx::Error> {
        let query = format!("SELECT {INFO_COLUMNS} FROM images WHERE id = $1");
        sqlx::query_as::<_, ImageInfo>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List image metadata for one product, oldest first.
    pub async fn list_by_product(
        pool: &PgPool,
        product_id: DbId,
    ) -> Result<Vec<ImageInfo>, sqlx::Error> {
        let query =
            format!("SELECT {INFO_COLUMNS} FROM images WHERE product_id = $1 ORDER BY id");
        sqlx::query_as::<_, ImageInfo>(&query)
            .bind(product_id)
            .fetch_all(pool)
            .await
    }

    /// List image metadata for several products at once, grouped by product.
    pub async fn list_by_products(
        pool: &PgPool,
        product_ids: &[DbId],
    ) -> Result<Vec<ImageInfo>, sqlx::Error> {
        let query = format!(
            "SELECT {INFO_COLUMNS} FROM images \
             WHERE product_id = ANY($1) \
             ORDER BY product_id, id"
        );
        sqlx::query_as::<_, ImageInfo>(&query)
            .bind(product_ids)
            .fetch_all(pool)
            .await
    }

    /// Replace an image's payload, file name and content type.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_data(
        pool: &PgPool,
        id: DbId,
        image: &NewImage,
    ) -> Result<Option<ImageInfo>, sqlx::Error> {
        let query = format!(
            "UPDATE images SET file_name = $2, file_type = $3, data = $4, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {INFO_COLUMNS}"
        );
        sqlx::query_as::<_, ImageInfo>(&query)
            .bind(id)
            .bind(&image.file_name)
            .bind(&image.file_type)
            .bind(&image.data)
            .fetch_optional(pool)
            .await
    }

    /// Delete an image by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM images WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete every image owned by a product inside an open transaction.
    pub(crate) async fn delete_by_product(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        product_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM images WHERE product_id = $1")
            .bind(product_id)
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected())
    }
}
