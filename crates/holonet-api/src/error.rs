//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every failure leaves the handler as a JSON `{"message": ...}` body. Store
//! failures without a domain meaning become a bare 500; their detail goes to
//! the log, never to the client.

use axum::{
  Json,
  extract::rejection::{JsonRejection, PathRejection, QueryRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use holonet_core::favorite::FavoriteTarget;
use serde_json::json;
use thiserror::Error;

use crate::favorites::label;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  /// Missing, empty or unparseable input.
  #[error("validation failed: {0}")]
  Validation(String),

  #[error("not found: {0}")]
  NotFound(String),

  /// Duplicate handle or favorite. Reported as 400, like any other bad input.
  #[error("conflict: {0}")]
  Conflict(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// Convert any backend error, preserving its domain meaning if it has one.
  pub fn store<E: Into<holonet_core::Error>>(e: E) -> Self {
    let core: holonet_core::Error = e.into();
    core.into()
  }
}

impl From<holonet_core::Error> for ApiError {
  fn from(e: holonet_core::Error) -> Self {
    match e {
      holonet_core::Error::HandleTaken(_) => {
        ApiError::Conflict("Handle already exists".to_string())
      }
      holonet_core::Error::AlreadyFavorited(target, _) => {
        ApiError::Conflict(already_favorited(target))
      }
      other => ApiError::Store(Box::new(other)),
    }
  }
}

pub(crate) fn already_favorited(target: FavoriteTarget) -> String {
  format!("{} already favorited", label(target.kind()))
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self {
    ApiError::Validation(rejection.body_text())
  }
}

impl From<PathRejection> for ApiError {
  fn from(rejection: PathRejection) -> Self {
    ApiError::Validation(rejection.body_text())
  }
}

impl From<QueryRejection> for ApiError {
  fn from(rejection: QueryRejection) -> Self {
    ApiError::Validation(rejection.body_text())
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match self {
      ApiError::Validation(m) | ApiError::Conflict(m) => (StatusCode::BAD_REQUEST, m),
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m),
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store operation failed");
        (
          StatusCode::INTERNAL_SERVER_ERROR,
          "Internal server error".to_string(),
        )
      }
    };
    (status, Json(json!({ "message": message }))).into_response()
  }
}
