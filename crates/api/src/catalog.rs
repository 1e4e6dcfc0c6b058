//! Catalog service: product writes with category reconciliation, image
//! uploads and `ProductDto` assembly.
//!
//! Handlers call into here for anything that spans more than one store.
//! Single-table category and image lookups go straight to the repositories.

use std::collections::HashMap;

use catalog_core::catalog::validate_image_content_type;
use catalog_core::error::CoreError;
use catalog_core::types::DbId;
use catalog_db::models::category::Category;
use catalog_db::models::image::{ImageInfo, NewImage};
use catalog_db::models::product::{CreateProduct, Product, ProductDto, UpdateProduct};
use catalog_db::repositories::{CategoryRepo, ImageRepo, ProductRepo};
use sqlx::PgPool;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::query::ProductLookup;

/// Stateless orchestration over the category, image and product stores.
pub struct CatalogService;

impl CatalogService {
    /// Add a product, reusing the category with the requested name or
    /// creating it first if none exists.
    pub async fn add_product(pool: &PgPool, input: &CreateProduct) -> AppResult<ProductDto> {
        input.validate()?;

        let product = ProductRepo::create(pool, input).await?;
        tracing::info!(
            product_id = product.id,
            category = %input.category.name,
            "Product added"
        );
        Self::to_dto(pool, product).await
    }

    /// Fetch a single product as a DTO.
    pub async fn get_product(pool: &PgPool, id: DbId) -> AppResult<ProductDto> {
        let product = ProductRepo::find_by_id(pool, id)
            .await?
            .ok_or(product_not_found(id))?;
        Self::to_dto(pool, product).await
    }

    /// Run one of the supported product lookups and project the results.
    pub async fn find_products(
        pool: &PgPool,
        lookup: ProductLookup<'_>,
    ) -> AppResult<Vec<ProductDto>> {
        let products = match lookup {
            ProductLookup::All => ProductRepo::list(pool).await?,
            ProductLookup::Category(category) => {
                ProductRepo::list_by_category_name(pool, category).await?
            }
            ProductLookup::Brand(brand) => ProductRepo::list_by_brand(pool, brand).await?,
            ProductLookup::Name(name) => ProductRepo::list_by_name(pool, name).await?,
            ProductLookup::CategoryAndBrand { category, brand } => {
                ProductRepo::list_by_category_and_brand(pool, category, brand).await?
            }
            ProductLookup::BrandAndName { brand, name } => {
                ProductRepo::list_by_brand_and_name(pool, brand, name).await?
            }
        };
        Self::to_dtos(pool, products).await
    }

    /// Overwrite a product's fields and re-resolve its category by name.
    ///
    /// An unknown category name is created, the same as on add, so an
    /// updated product always keeps a category. Fails with `NotFound` and
    /// writes nothing if the product does not exist.
    pub async fn update_product(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProduct,
    ) -> AppResult<ProductDto> {
        input.validate()?;

        let product = ProductRepo::update(pool, id, input)
            .await?
            .ok_or(product_not_found(id))?;
        tracing::info!(product_id = id, "Product updated");
        Self::to_dto(pool, product).await
    }

    /// Delete a product together with its images.
    pub async fn delete_product(pool: &PgPool, id: DbId) -> AppResult<()> {
        if !ProductRepo::delete(pool, id).await? {
            return Err(product_not_found(id));
        }
        tracing::info!(product_id = id, "Product deleted");
        Ok(())
    }

    /// Delete every product and image.
    pub async fn delete_all_products(pool: &PgPool) -> AppResult<u64> {
        let deleted = ProductRepo::delete_all(pool).await?;
        tracing::info!(deleted, "All products deleted");
        Ok(deleted)
    }

    /// Store uploaded images for an existing product.
    ///
    /// Content types are stored in their canonical lowercase form.
    pub async fn upload_images(
        pool: &PgPool,
        product_id: DbId,
        mut files: Vec<NewImage>,
    ) -> AppResult<Vec<ImageInfo>> {
        if files.is_empty() {
            return Err(AppError::BadRequest(
                "At least one file is required".to_string(),
            ));
        }
        for file in &mut files {
            file.file_type = validate_image_content_type(&file.file_type)?.to_string();
        }

        ProductRepo::find_by_id(pool, product_id)
            .await?
            .ok_or(product_not_found(product_id))?;

        let saved = ImageRepo::create_many(pool, product_id, &files)
            .await
            .map_err(|err| owner_missing(err, product_id))?;
        tracing::info!(product_id, count = saved.len(), "Images uploaded");
        Ok(saved)
    }

    /// Replace the payload of a single stored image.
    pub async fn replace_image(
        pool: &PgPool,
        id: DbId,
        mut file: NewImage,
    ) -> AppResult<ImageInfo> {
        file.file_type = validate_image_content_type(&file.file_type)?.to_string();

        let info = ImageRepo::update_data(pool, id, &file)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound { entity: "Image", id }))?;
        tracing::info!(image_id = id, "Image replaced");
        Ok(info)
    }

    /// Project a product with its category and images.
    ///
    /// Products without images get an empty list.
    pub async fn to_dto(pool: &PgPool, product: Product) -> AppResult<ProductDto> {
        let category = CategoryRepo::find_by_id(pool, product.category_id)
            .await?
            .ok_or_else(|| missing_category(&product))?;
        let images = ImageRepo::list_by_product(pool, product.id).await?;
        Ok(ProductDto::from_parts(product, category, images))
    }

    /// Project many products, fetching categories and images in two
    /// queries instead of two per product.
    pub async fn to_dtos(pool: &PgPool, products: Vec<Product>) -> AppResult<Vec<ProductDto>> {
        if products.is_empty() {
            return Ok(Vec::new());
        }

        let product_ids: Vec<DbId> = products.iter().map(|p| p.id).collect();
        let mut category_ids: Vec<DbId> = products.iter().map(|p| p.category_id).collect();
        category_ids.sort_unstable();
        category_ids.dedup();

        let categories: HashMap<DbId, Category> = CategoryRepo::find_by_ids(pool, &category_ids)
            .await?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();
        let images = group_by_product(ImageRepo::list_by_products(pool, &product_ids).await?);

        assemble(products, &categories, images)
    }
}

/// Bucket image rows by owning product, preserving row order.
fn group_by_product(images: Vec<ImageInfo>) -> HashMap<DbId, Vec<ImageInfo>> {
    let mut grouped: HashMap<DbId, Vec<ImageInfo>> = HashMap::new();
    for image in images {
        grouped.entry(image.product_id).or_default().push(image);
    }
    grouped
}

/// Zip products with their looked-up category and image bucket.
fn assemble(
    products: Vec<Product>,
    categories: &HashMap<DbId, Category>,
    mut images: HashMap<DbId, Vec<ImageInfo>>,
) -> AppResult<Vec<ProductDto>> {
    products
        .into_iter()
        .map(|product| {
            let category = categories
                .get(&product.category_id)
                .cloned()
                .ok_or_else(|| missing_category(&product))?;
            let product_images = images.remove(&product.id).unwrap_or_default();
            Ok(ProductDto::from_parts(product, category, product_images))
        })
        .collect()
}

fn product_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Product",
        id,
    })
}

/// A product deleted after the existence check makes the image insert fail
/// on `fk_images_product_id`; report it like any other missing product.
fn owner_missing(err: sqlx::Error, product_id: DbId) -> AppError {
    match err {
        sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
            product_not_found(product_id)
        }
        other => other.into(),
    }
}

/// The foreign key makes this unreachable unless the schema is bypassed.
fn missing_category(product: &Product) -> AppError {
    AppError::Core(CoreError::Internal(format!(
        "product {} references missing category {}",
        product.id, product.category_id
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use rust_decimal::Decimal;

    fn product(id: DbId, category_id: DbId) -> Product {
        let now = fixed_time();
        Product {
            id,
            name: format!("Product {id}"),
            brand: "Acme".to_string(),
            description: None,
            price: Decimal::new(1000, 2),
            inventory: 1,
            category_id,
            created_at: now,
            updated_at: now,
        }
    }

    fn category(id: DbId, name: &str) -> Category {
        let now = fixed_time();
        Category {
            id,
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    fn image(id: DbId, product_id: DbId) -> ImageInfo {
        ImageInfo {
            id,
            file_name: format!("{id}.png"),
            file_type: "image/png".to_string(),
            download_url: format!("/api/v1/images/{id}/download"),
            product_id,
        }
    }

    fn fixed_time() -> catalog_core::types::Timestamp {
        "2025-01-01T00:00:00Z".parse().unwrap()
    }

    #[test]
    fn group_by_product_keeps_order_within_product() {
        let grouped = group_by_product(vec![image(1, 10), image(2, 20), image(3, 10)]);
        let ids: Vec<DbId> = grouped[&10].iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(grouped[&20].len(), 1);
    }

    #[test]
    fn assemble_attaches_images_and_defaults_to_empty() {
        let categories = HashMap::from([(1, category(1, "Shoes"))]);
        let images = group_by_product(vec![image(5, 10)]);

        let dtos = assemble(vec![product(10, 1), product(11, 1)], &categories, images).unwrap();

        assert_eq!(dtos.len(), 2);
        assert_eq!(dtos[0].id, 10);
        assert_eq!(dtos[0].images.len(), 1);
        assert_eq!(dtos[0].category.name, "Shoes");
        assert!(dtos[1].images.is_empty());
    }

    #[test]
    fn assemble_fails_on_missing_category() {
        let err = assemble(vec![product(10, 99)], &HashMap::new(), HashMap::new()).unwrap_err();
        assert_matches!(err, AppError::Core(CoreError::Internal(_)));
    }

    #[sqlx::test(migrations = "../../db/migrations")]
    async fn image_insert_for_vanished_product_is_not_found(pool: PgPool) {
        let file = NewImage {
            file_name: "front.png".to_string(),
            file_type: "image/png".to_string(),
            data: vec![1, 2, 3],
        };
        let err = ImageRepo::create_many(&pool, 404, &[file]).await.unwrap_err();

        assert_matches!(
            owner_missing(err, 404),
            AppError::Core(CoreError::NotFound { entity: "Product", id: 404 })
        );
    }

    #[test]
    fn owner_missing_passes_other_errors_through() {
        assert_matches!(
            owner_missing(sqlx::Error::RowNotFound, 1),
            AppError::Database(sqlx::Error::RowNotFound)
        );
    }
}
