//! Handlers for the `/categories` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use catalog_core::error::CoreError;
use catalog_core::types::DbId;
use catalog_db::models::category::{Category, CreateCategory, UpdateCategory};
use catalog_db::repositories::CategoryRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/categories
///
/// Fails with 409 if a category with the same name exists.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateCategory>,
) -> AppResult<(StatusCode, Json<DataResponse<Category>>)> {
    input.validate()?;
    let category = CategoryRepo::create(&state.pool, &input)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::AlreadyExists {
                entity: "Category",
                name: input.name.clone(),
            })
        })?;
    tracing::info!(category_id = category.id, name = %category.name, "Category created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: category })))
}

/// GET /api/v1/categories
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Category>>>> {
    let categories = CategoryRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: categories }))
}

/// GET /api/v1/categories/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Category>>> {
    let category = CategoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))?;
    Ok(Json(DataResponse { data: category }))
}

/// GET /api/v1/categories/by-name/{name}
pub async fn get_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<DataResponse<Category>>> {
    match CategoryRepo::find_by_name(&state.pool, &name).await? {
        Some(category) => Ok(Json(DataResponse { data: category })),
        None => Err(AppError::Core(CoreError::NameNotFound {
            entity: "Category",
            name,
        })),
    }
}

/// PUT /api/v1/categories/{id}
///
/// Renaming onto another category's name fails with 409.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCategory>,
) -> AppResult<Json<DataResponse<Category>>> {
    input.validate()?;
    let updated = match CategoryRepo::update(&state.pool, id, &input).await {
        Ok(updated) => updated,
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            return Err(AppError::Core(CoreError::AlreadyExists {
                entity: "Category",
                name: input.name.clone(),
            }));
        }
        Err(err) => return Err(err.into()),
    };

    let category = updated.ok_or(AppError::Core(CoreError::NotFound {
        entity: "Category",
        id,
    }))?;
    Ok(Json(DataResponse { data: category }))
}

/// DELETE /api/v1/categories/{id}
///
/// Categories still referenced by products cannot be deleted (409).
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let deleted = match CategoryRepo::delete(&state.pool, id).await {
        Ok(deleted) => deleted,
        Err(sqlx::Error::Database(db_err)) if db_err.is_foreign_key_violation() => {
            return Err(AppError::Core(CoreError::Conflict(format!(
                "Category {id} is still referenced by products"
            ))));
        }
        Err(err) => return Err(err.into()),
    };

    if deleted {
        tracing::info!(category_id = id, "Category deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))
    }
}
