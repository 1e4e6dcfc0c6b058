//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Query parameters for `GET /products` (`?category=&brand=&name=`).
///
/// All matches are exact and case-sensitive.
#[derive(Debug, Default, Deserialize)]
pub struct ProductQuery {
    pub category: Option<String>,
    pub brand: Option<String>,
    pub name: Option<String>,
}

/// Which product lookup a [`ProductQuery`] asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductLookup<'a> {
    All,
    Category(&'a str),
    Brand(&'a str),
    Name(&'a str),
    CategoryAndBrand { category: &'a str, brand: &'a str },
    BrandAndName { brand: &'a str, name: &'a str },
}

impl ProductQuery {
    /// Resolve the supplied filters to a supported lookup.
    ///
    /// Returns `None` for combinations the store has no query for
    /// (category+name, or all three).
    pub fn lookup(&self) -> Option<ProductLookup<'_>> {
        match (
            self.category.as_deref(),
            self.brand.as_deref(),
            self.name.as_deref(),
        ) {
            (None, None, None) => Some(ProductLookup::All),
            (Some(category), None, None) => Some(ProductLookup::Category(category)),
            (None, Some(brand), None) => Some(ProductLookup::Brand(brand)),
            (None, None, Some(name)) => Some(ProductLookup::Name(name)),
            (Some(category), Some(brand), None) => {
                Some(ProductLookup::CategoryAndBrand { category, brand })
            }
            (None, Some(brand), Some(name)) => Some(ProductLookup::BrandAndName { brand, name }),
            _ => None,
        }
    }
}

/// Query parameters for `GET /products/count` (`?brand=&name=`).
#[derive(Debug, Deserialize)]
pub struct BrandNameParams {
    pub brand: String,
    pub name: String,
}
