//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Multi-table writes take
//! a transaction internally.

pub mod category_repo;
pub mod image_repo;
pub mod product_repo;

pub use category_repo::CategoryRepo;
pub use image_repo::ImageRepo;
pub use product_repo::ProductRepo;
