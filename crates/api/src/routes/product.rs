//! Route definitions for the `/products` resource.
//!
//! Also nests image upload and listing under `/products/{id}/images`.

use axum::routing::get;
use axum::Router;

use crate::handlers::{image, product};
use crate::state::AppState;

/// Routes mounted at `/products`.
///
/// ```text
/// GET    /                          -> list (?category=&brand=&name=)
/// POST   /                          -> create
/// DELETE /                          -> delete_all
/// GET    /count                     -> count_by_brand_and_name (?brand=&name=)
/// GET    /{id}                      -> get_by_id
/// PUT    /{id}                      -> update
/// DELETE /{id}                      -> delete
///
/// GET    /{id}/images               -> list_by_product
/// POST   /{id}/images               -> upload
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(product::list)
                .post(product::create)
                .delete(product::delete_all),
        )
        .route("/count", get(product::count_by_brand_and_name))
        .route(
            "/{id}",
            get(product::get_by_id)
                .put(product::update)
                .delete(product::delete),
        )
        .route(
            "/{id}/images",
            get(image::list_by_product).post(image::upload),
        )
}
