pub mod category;
pub mod health;
pub mod image;
pub mod product;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /categories                                     list, create
/// /categories/{id}                                get, update, delete
/// /categories/by-name/{name}                      get by exact name
///
/// /products                                       list (filterable), add, delete all
/// /products/count                                 count by brand + name
/// /products/{id}                                  get, update, delete
/// /products/{id}/images                           list, upload (multipart)
///
/// /images/{id}                                    get, replace (multipart), delete
/// /images/{id}/download                           raw bytes
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/categories", category::router())
        .nest("/products", product::router())
        .nest("/images", image::router())
}
