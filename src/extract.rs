//! Request extractors whose rejections go through [`AppError`].

use axum::extract::FromRequest;

use crate::error::AppError;

/// `Json` body extractor that answers with the `validation_error` envelope
/// instead of axum's plain-text 400/415/422 rejections.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
