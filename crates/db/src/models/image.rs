//! Image entity model and projections.

use catalog_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A full row from the `images` table, payload included.
///
/// The payload is never serialized; clients fetch it from `download_url`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Image {
    pub id: DbId,
    pub file_name: String,
    pub file_type: String,
    #[serde(skip_serializing)]
    pub data: Vec<u8>,
    pub download_url: String,
    pub product_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Image metadata without the payload. Returned from uploads and embedded
/// in product DTOs.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct ImageInfo {
    pub id: DbId,
    pub file_name: String,
    pub file_type: String,
    pub download_url: String,
    pub product_id: DbId,
}

/// An uploaded file ready to be stored.
///
/// Built by the HTTP layer from multipart fields, so it is not `Deserialize`.
#[derive(Debug, Clone)]
pub struct NewImage {
    pub file_name: String,
    pub file_type: String,
    pub data: Vec<u8>,
}
