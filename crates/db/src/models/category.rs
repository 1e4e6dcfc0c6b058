//! Category entity model and DTOs.

use catalog_core::catalog::validate_not_blank;
use catalog_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `categories` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new category.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCategory {
    #[validate(length(min = 1, max = 255), custom(function = "validate_not_blank"))]
    pub name: String,
}

/// DTO for renaming an existing category.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateCategory {
    #[validate(length(min = 1, max = 255), custom(function = "validate_not_blank"))]
    pub name: String,
}

/// Category reference embedded in product requests: `{"name": "Shoes"}`.
///
/// Resolved by exact name; any `id` sent by the client is ignored.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CategoryRef {
    #[validate(length(min = 1, max = 255), custom(function = "validate_not_blank"))]
    pub name: String,
}

impl CategoryRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
