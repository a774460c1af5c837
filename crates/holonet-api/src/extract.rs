//! Extractors whose rejections are reported as [`ApiError`] JSON bodies
//! instead of axum's plaintext defaults.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::ApiError;

/// `axum::Json` with a 400 `{"message": ...}` rejection.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// `axum::extract::Path` with a 400 `{"message": ...}` rejection.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

/// `axum::extract::Query` with a 400 `{"message": ...}` rejection.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

/// A required text field: absent and blank values both count as missing.
pub(crate) fn present(value: Option<String>) -> Option<String> {
  value.filter(|v| !v.trim().is_empty())
}
