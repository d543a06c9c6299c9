//! Request extractors shared by every handler.

use axum::extract::FromRequest;

use crate::errors::AppError;

/// `Json<T>` whose rejections (bad syntax, missing or misnamed fields, wrong
/// content type) come back as `AppError::Validation` in the error envelope.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ValidJson<T>(pub T);
