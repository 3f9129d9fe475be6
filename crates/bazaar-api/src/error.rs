//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every failure falls into one of three kinds: the caller's input was bad
//! (400), the thing asked for does not exist (404), or storage failed (500).

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by a catalog operation or API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  pub fn status(&self) -> StatusCode {
    match self {
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
      ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl From<bazaar_core::Error> for ApiError {
  fn from(e: bazaar_core::Error) -> Self { ApiError::BadRequest(e.to_string()) }
}

impl From<bazaar_images::Error> for ApiError {
  fn from(e: bazaar_images::Error) -> Self {
    if e.is_invalid_input() {
      ApiError::BadRequest(e.to_string())
    } else {
      ApiError::Store(Box::new(e))
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    let message = match &self {
      ApiError::NotFound(m) | ApiError::BadRequest(m) => {
        tracing::warn!(%status, "{m}");
        m.clone()
      }
      ApiError::Store(e) => {
        tracing::error!(error = %e, "storage failure");
        e.to_string()
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
