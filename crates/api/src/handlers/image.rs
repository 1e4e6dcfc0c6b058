//! Handlers for product images.
//!
//! Uploads are nested under products: `/products/{id}/images`.
//! Individual images are addressed at `/images/{id}`.

use axum::extract::{Multipart, Path, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use catalog_core::catalog::content_type_from_file_name;
use catalog_core::error::CoreError;
use catalog_core::types::DbId;
use catalog_db::models::image::{ImageInfo, NewImage};
use catalog_db::repositories::ImageRepo;

use crate::catalog::CatalogService;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Content type recorded when neither the client nor the extension says.
const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// POST /api/v1/products/{id}/images
///
/// Multipart upload; every `files` (or `file`) field becomes one image.
pub async fn upload(
    State(state): State<AppState>,
    Path(product_id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<Vec<ImageInfo>>>)> {
    let files = read_files(multipart).await?;
    let saved = CatalogService::upload_images(&state.pool, product_id, files).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: saved })))
}

/// GET /api/v1/products/{id}/images
pub async fn list_by_product(
    State(state): State<AppState>,
    Path(product_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<ImageInfo>>>> {
    let images = ImageRepo::list_by_product(&state.pool, product_id).await?;
    Ok(Json(DataResponse { data: images }))
}

/// GET /api/v1/images/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ImageInfo>>> {
    let image = ImageRepo::find_info_by_id(&state.pool, id)
        .await?
        .ok_or(image_not_found(id))?;
    Ok(Json(DataResponse { data: image }))
}

/// GET /api/v1/images/{id}/download
///
/// Streams the stored bytes back with the original content type.
pub async fn download(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let image = ImageRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(image_not_found(id))?;

    let disposition = format!(
        "attachment; filename=\"{}\"",
        image.file_name.replace(['"', '\\', '\r', '\n'], "")
    );
    Ok((
        [(CONTENT_TYPE, image.file_type), (CONTENT_DISPOSITION, disposition)],
        image.data,
    ))
}

/// PUT /api/v1/images/{id}
///
/// Multipart with a single `file` field that replaces the stored payload.
pub async fn replace(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Json<DataResponse<ImageInfo>>> {
    let mut files = read_files(multipart).await?;
    if files.len() != 1 {
        return Err(AppError::BadRequest(format!(
            "Expected exactly one file, got {}",
            files.len()
        )));
    }
    let file = files.remove(0);
    let info = CatalogService::replace_image(&state.pool, id, file).await?;
    Ok(Json(DataResponse { data: info }))
}

/// DELETE /api/v1/images/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if ImageRepo::delete(&state.pool, id).await? {
        tracing::info!(image_id = id, "Image deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(image_not_found(id))
    }
}

/// Collect every `file`/`files` part of a multipart body.
///
/// Unknown fields are ignored. The content type comes from the part header,
/// falling back to the file extension.
async fn read_files(mut multipart: Multipart) -> AppResult<Vec<NewImage>> {
    let mut files = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        if name != "file" && name != "files" {
            continue;
        }

        let file_name = field.file_name().unwrap_or("upload").to_string();
        let file_type = field
            .content_type()
            .map(str::to_string)
            .or_else(|| content_type_from_file_name(&file_name).map(str::to_string))
            .unwrap_or_else(|| FALLBACK_CONTENT_TYPE.to_string());
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        if data.is_empty() {
            return Err(AppError::BadRequest(format!("File '{file_name}' is empty")));
        }

        files.push(NewImage {
            file_name,
            file_type,
            data: data.to_vec(),
        });
    }

    Ok(files)
}

fn image_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Image", id })
}
