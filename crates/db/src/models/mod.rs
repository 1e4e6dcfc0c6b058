//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO for replacements
//!
//! Read-only projections assembled from several rows (e.g. `ProductDto`)
//! live next to the entity they project.

pub mod category;
pub mod image;
pub mod product;
