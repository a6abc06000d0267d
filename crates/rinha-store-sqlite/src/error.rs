//! Error type for `rinha-store-sqlite`.

use rinha_core::{Classify, ErrorKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date parse error: {0}")]
  DateParse(String),

  /// The UNIQUE constraint on `apelido` rejected the insert.
  #[error("handle already taken: {0:?}")]
  DuplicateHandle(String),

  /// Any other column constraint rejected the insert.
  #[error("constraint violated: {0}")]
  Constraint(String),
}

impl Classify for Error {
  fn kind(&self) -> ErrorKind {
    match self {
      Self::DuplicateHandle(_) | Self::Constraint(_) => {
        ErrorKind::ConstraintViolation
      }
      Self::Database(_) | Self::Json(_) | Self::Uuid(_) | Self::DateParse(_) => {
        ErrorKind::StorageFailure
      }
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
