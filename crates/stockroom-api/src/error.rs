//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! The core's error taxonomy is transport-agnostic; this is the one
//! place that maps kinds to HTTP status codes.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use stockroom_core::Error;

/// A core failure crossing the HTTP boundary.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
  fn from(e: Error) -> Self { Self(e) }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = match &self.0 {
      Error::InvalidInput(_) | Error::InvalidState(_) => StatusCode::BAD_REQUEST,
      Error::NotFound(_) => StatusCode::NOT_FOUND,
      Error::Conflict(_) => StatusCode::CONFLICT,
      Error::Transient(_) => StatusCode::SERVICE_UNAVAILABLE,
    };
    tracing::debug!(kind = self.0.kind(), "request failed: {}", self.0);
    (status, Json(json!({ "message": self.0.to_string() }))).into_response()
  }
}
