//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every error body has the shape `{"error": message, "kind": kind}`.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tipster_core::ErrorKind;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("missing or invalid X-User-Id header")]
  Unauthorized,

  #[error("forbidden: {0}")]
  Forbidden(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error(transparent)]
  Core(#[from] tipster_core::Error),
}

impl ApiError {
  fn status_and_kind(&self) -> (StatusCode, &'static str) {
    match self {
      ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized"),
      ApiError::Forbidden(_) => (StatusCode::FORBIDDEN, "forbidden"),
      ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "validation"),
      ApiError::Core(e) => match e.kind() {
        ErrorKind::Validation => (StatusCode::BAD_REQUEST, "validation"),
        ErrorKind::NotFound => (StatusCode::NOT_FOUND, "not_found"),
        ErrorKind::AssetStore => (StatusCode::BAD_GATEWAY, "asset_store"),
        ErrorKind::Store => (StatusCode::INTERNAL_SERVER_ERROR, "store"),
      },
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, kind) = self.status_and_kind();
    if status.is_server_error() {
      tracing::error!(error = %self, kind, "request failed");
    }
    (status, Json(json!({ "error": self.to_string(), "kind": kind }))).into_response()
  }
}
