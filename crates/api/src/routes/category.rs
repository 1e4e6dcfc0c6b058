//! Route definitions for the `/categories` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::category;
use crate::state::AppState;

/// Routes mounted at `/categories`.
///
/// ```text
/// GET    /                  -> list
/// POST   /                  -> create
/// GET    /by-name/{name}    -> get_by_name
/// GET    /{id}              -> get_by_id
/// PUT    /{id}              -> update
/// DELETE /{id}              -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(category::list).post(category::create))
        .route("/by-name/{name}", get(category::get_by_name))
        .route(
            "/{id}",
            get(category::get_by_id)
                .put(category::update)
                .delete(category::delete),
        )
}
