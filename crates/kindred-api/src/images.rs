use base64::Engine;
use base64::engine::general_purpose::STANDARD as B64;

use crate::error::ApiError;

/// Images travel inline as `data:<mime>;base64,<payload>` strings; there is
/// no separate blob storage. Accepts any mime type as long as the payload
/// decodes.
pub fn is_data_uri(value: &str) -> bool {
    let Some(rest) = value.strip_prefix("data:") else {
        return false;
    };
    let Some((mime, payload)) = rest.split_once(";base64,") else {
        return false;
    };
    !mime.is_empty() && B64.decode(payload).is_ok()
}

/// Reject an optional inline image unless it is a well-formed data URI.
/// An empty string is allowed and means "no image".
pub fn check_image(image: Option<&str>) -> Result<(), ApiError> {
    match image {
        Some(value) if !value.is_empty() && !is_data_uri(value) => Err(ApiError::BadRequest(
            "image must be a base64 data URI".into(),
        )),
        _ => Ok(()),
    }
}
