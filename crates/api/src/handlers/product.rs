//! Handlers for the `/products` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use catalog_core::types::DbId;
use catalog_db::models::product::{CreateProduct, ProductCount, ProductDto, UpdateProduct};
use catalog_db::repositories::ProductRepo;

use crate::catalog::CatalogService;
use crate::error::{AppError, AppResult};
use crate::query::{BrandNameParams, ProductQuery};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/products
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateProduct>,
) -> AppResult<(StatusCode, Json<DataResponse<ProductDto>>)> {
    let product = CatalogService::add_product(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: product })))
}

/// GET /api/v1/products?category=&brand=&name=
///
/// With no parameters lists every product. Supported filters: `category`,
/// `brand`, `name`, `category`+`brand`, `brand`+`name`.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ProductQuery>,
) -> AppResult<Json<DataResponse<Vec<ProductDto>>>> {
    let lookup = params.lookup().ok_or_else(|| {
        AppError::BadRequest(
            "Unsupported filter combination; use category, brand, name, \
             category+brand or brand+name"
                .to_string(),
        )
    })?;
    let products = CatalogService::find_products(&state.pool, lookup).await?;
    Ok(Json(DataResponse { data: products }))
}

/// GET /api/v1/products/count?brand=&name=
pub async fn count_by_brand_and_name(
    State(state): State<AppState>,
    Query(params): Query<BrandNameParams>,
) -> AppResult<Json<DataResponse<ProductCount>>> {
    let count = ProductRepo::count_by_brand_and_name(&state.pool, &params.brand, &params.name)
        .await?;
    Ok(Json(DataResponse {
        data: ProductCount { count },
    }))
}

/// GET /api/v1/products/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ProductDto>>> {
    let product = CatalogService::get_product(&state.pool, id).await?;
    Ok(Json(DataResponse { data: product }))
}

/// PUT /api/v1/products/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProduct>,
) -> AppResult<Json<DataResponse<ProductDto>>> {
    let product = CatalogService::update_product(&state.pool, id, &input).await?;
    Ok(Json(DataResponse { data: product }))
}

/// DELETE /api/v1/products/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    CatalogService::delete_product(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/products
pub async fn delete_all(State(state): State<AppState>) -> AppResult<StatusCode> {
    CatalogService::delete_all_products(&state.pool).await?;
    Ok(StatusCode::NO_CONTENT)
}
