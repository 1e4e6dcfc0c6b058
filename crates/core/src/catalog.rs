//! Catalog rules shared by the repository and HTTP layers.
//!
//! Field limits, accepted image content types and the download URL scheme
//! for stored images. Everything here is pure so it can be unit tested
//! without a database.

use rust_decimal::Decimal;
use validator::ValidationError;

use crate::error::CoreError;
use crate::types::DbId;

/// Content types accepted for product images.
pub const SUPPORTED_IMAGE_TYPES: &[&str] = &["image/png", "image/jpeg", "image/gif", "image/webp"];

/// Path prefix under which stored images are served.
pub const IMAGE_DOWNLOAD_PREFIX: &str = "/api/v1/images";

/// Largest price a `NUMERIC(12, 2)` column holds: 9,999,999,999.99.
pub const MAX_PRICE: Decimal = Decimal::from_parts(3_567_587_327, 232, 0, false, 2); // 999_999_999_999 * 10^-2

/// Number of decimal places a stored price keeps.
pub const PRICE_SCALE: u32 = 2;

/// Reject prices the `products.price` column would not store exactly.
/// Used as a `validator` custom check.
///
/// Trailing zeros are ignored, so `49.990` passes but `49.999` does not.
pub fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if *price < Decimal::ZERO {
        let mut err = ValidationError::new("negative_price");
        err.message = Some("price must not be negative".into());
        return Err(err);
    }
    if *price > MAX_PRICE {
        let mut err = ValidationError::new("price_too_large");
        err.message = Some(format!("price must not exceed {MAX_PRICE}").into());
        return Err(err);
    }
    if price.normalize().scale() > PRICE_SCALE {
        let mut err = ValidationError::new("price_precision");
        err.message = Some(format!("price must have at most {PRICE_SCALE} decimal places").into());
        return Err(err);
    }
    Ok(())
}

/// Reject names that are empty once surrounding whitespace is removed.
///
/// Length limits are enforced separately; this only catches `"   "`.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("must not be blank".into());
        return Err(err);
    }
    Ok(())
}

/// Ensure an uploaded file's content type is one we store.
///
/// Matching ignores case and surrounding whitespace. Returns the canonical
/// spelling, which is what gets stored and served back on download.
pub fn validate_image_content_type(content_type: &str) -> Result<&'static str, CoreError> {
    let normalized = content_type.trim().to_ascii_lowercase();
    SUPPORTED_IMAGE_TYPES
        .iter()
        .copied()
        .find(|supported| *supported == normalized)
        .ok_or_else(|| {
            CoreError::Validation(format!(
                "Unsupported image type '{content_type}'. Supported: {}",
                SUPPORTED_IMAGE_TYPES.join(", ")
            ))
        })
}

/// Infer a content type from a file name when the client did not send one.
///
/// Returns `None` for unknown extensions.
pub fn content_type_from_file_name(file_name: &str) -> Option<&'static str> {
    let (_, ext) = file_name.rsplit_once('.')?;
    match ext.to_ascii_lowercase().as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

/// Public download path for a stored image.
pub fn image_download_url(image_id: DbId) -> String {
    format!("{IMAGE_DOWNLOAD_PREFIX}/{image_id}/download")
}
