use axum::extract::FromRequest;

use crate::error::AppError;

/// `Json` whose rejections render as `AppError`, so a malformed body gets
/// the same `{"error": ...}` shape as every other failure.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);
