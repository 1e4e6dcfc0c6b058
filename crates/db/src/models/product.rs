//! Product entity model, request DTOs and the `ProductDto` projection.

use catalog_core::catalog::{validate_not_blank, validate_price};
use catalog_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::category::{Category, CategoryRef};
use crate::models::image::ImageInfo;

/// A row from the `products` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Product {
    pub id: DbId,
    pub name: String,
    pub brand: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub inventory: i32,
    pub category_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for adding a product.
///
/// The category is given by name and resolved (or created) on insert.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProduct {
    #[validate(length(min = 1, max = 255), custom(function = "validate_not_blank"))]
    pub name: String,
    #[validate(length(min = 1, max = 255), custom(function = "validate_not_blank"))]
    pub brand: String,
    pub description: Option<String>,
    #[validate(custom(function = "validate_price"))]
    pub price: Decimal,
    #[validate(range(min = 0))]
    #[serde(default)]
    pub inventory: i32,
    #[validate(nested)]
    pub category: CategoryRef,
}

/// DTO for replacing a product's mutable fields.
///
/// Every field is overwritten; `description: null` clears the description.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProduct {
    #[validate(length(min = 1, max = 255), custom(function = "validate_not_blank"))]
    pub name: String,
    #[validate(length(min = 1, max = 255), custom(function = "validate_not_blank"))]
    pub brand: String,
    pub description: Option<String>,
    #[validate(custom(function = "validate_price"))]
    pub price: Decimal,
    #[validate(range(min = 0))]
    #[serde(default)]
    pub inventory: i32,
    #[validate(nested)]
    pub category: CategoryRef,
}

/// Read-only projection of a product with its category and images.
///
/// Assembled for responses only; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductDto {
    pub id: DbId,
    pub name: String,
    pub brand: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub inventory: i32,
    pub category: Category,
    pub images: Vec<ImageInfo>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ProductDto {
    /// Project a product row plus its resolved category and images.
    pub fn from_parts(product: Product, category: Category, images: Vec<ImageInfo>) -> Self {
        debug_assert_eq!(product.category_id, category.id);
        Self {
            id: product.id,
            name: product.name,
            brand: product.brand,
            description: product.description,
            price: product.price,
            inventory: product.inventory,
            category,
            images,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

/// Response body for count queries.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ProductCount {
    pub count: i64,
}
