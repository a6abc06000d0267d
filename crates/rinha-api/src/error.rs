//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use rinha_core::{Classify, ErrorKind, ValidationError};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  /// Wrong shape or type in the request.
  #[error("malformed input: {0}")]
  MalformedInput(String),

  /// Well-formed request that breaks a business rule.
  #[error("unprocessable: {0}")]
  Unprocessable(String),

  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// Map any classified error onto the variant for its [`ErrorKind`].
  pub fn classify<E>(err: E) -> Self
  where
    E: std::error::Error + Classify + Send + Sync + 'static,
  {
    match err.kind() {
      ErrorKind::MalformedInput => Self::MalformedInput(err.to_string()),
      ErrorKind::ConstraintViolation => Self::Unprocessable(err.to_string()),
      ErrorKind::NotFound => Self::NotFound(err.to_string()),
      ErrorKind::InvalidRequest => Self::BadRequest(err.to_string()),
      ErrorKind::StorageFailure => Self::Store(Box::new(err)),
    }
  }

  pub fn status(&self) -> StatusCode {
    match self {
      Self::MalformedInput(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
      Self::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
      Self::NotFound(_) => StatusCode::NOT_FOUND,
      Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl From<rinha_core::Error> for ApiError {
  fn from(e: rinha_core::Error) -> Self { Self::classify(e) }
}

impl From<ValidationError> for ApiError {
  fn from(e: ValidationError) -> Self { Self::classify(e) }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    let message = match &self {
      ApiError::MalformedInput(m)
      | ApiError::Unprocessable(m)
      | ApiError::NotFound(m)
      | ApiError::BadRequest(m) => m.clone(),
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store failure");
        e.to_string()
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
