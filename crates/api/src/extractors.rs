//! Request extractors.

use axum::extract::FromRequest;
use lendbook_core::lending::LendingError;

use crate::error::ApiError;

/// JSON body extractor whose rejections use the API error shape.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Unwraps a request field that must be present.
///
/// # Errors
///
/// Returns `MissingField` naming the absent field.
pub fn required<T>(value: Option<T>, field: &'static str) -> Result<T, LendingError> {
    value.ok_or(LendingError::MissingField(field))
}
