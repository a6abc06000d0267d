//! Error types for `rinha-core`.

use thiserror::Error;

// ─── Taxonomy ────────────────────────────────────────────────────────────────

/// The stable classification every failure in the service maps onto.
///
/// Callers (the HTTP layer in particular) translate a kind into a response
/// status; the concrete error only contributes the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  /// The request has the wrong shape or type for a field.
  MalformedInput,
  /// The request is well-formed but breaks a length, presence, date or
  /// uniqueness rule.
  ConstraintViolation,
  /// No record exists for the given identifier.
  NotFound,
  /// An operation-level precondition was not met (e.g. empty search term).
  InvalidRequest,
  /// The backend is unavailable or failed unexpectedly.
  StorageFailure,
}

/// Implemented by every error type that can reach a caller.
pub trait Classify {
  fn kind(&self) -> ErrorKind;
}

// ─── Validation ──────────────────────────────────────────────────────────────

/// Why a create request was rejected before touching storage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
  #[error("request body is not a JSON object: {0}")]
  MalformedBody(String),

  /// The handle key is absent entirely; a shape problem, unlike the other
  /// required fields.
  #[error("apelido is required")]
  MissingHandle,

  #[error("{0} is required")]
  Missing(&'static str),

  #[error("{0} must not be null")]
  Null(&'static str),

  #[error("{field} must be a {expected}")]
  WrongType {
    field:    &'static str,
    expected: &'static str,
  },

  #[error("{field} must be between {min} and {max} characters, got {actual}")]
  Length {
    field:  &'static str,
    min:    usize,
    max:    usize,
    actual: usize,
  },

  #[error("nascimento must have the form YYYY-MM-DD, got {0:?}")]
  DatePattern(String),

  #[error("nascimento {0:?} is not a calendar date")]
  InvalidDate(String),

  #[error("stack[{0}] must not be null")]
  NullTag(usize),

  #[error("stack[{0}] must be a string")]
  TagType(usize),

  #[error("stack[{index}] must be between 1 and {max} characters, got {actual}")]
  TagLength {
    index:  usize,
    max:    usize,
    actual: usize,
  },
}

impl Classify for ValidationError {
  fn kind(&self) -> ErrorKind {
    match self {
      Self::MalformedBody(_)
      | Self::MissingHandle
      | Self::WrongType { .. }
      | Self::DatePattern(_)
      | Self::TagType(_) => ErrorKind::MalformedInput,
      Self::Missing(_)
      | Self::Null(_)
      | Self::Length { .. }
      | Self::InvalidDate(_)
      | Self::NullTag(_)
      | Self::TagLength { .. } => ErrorKind::ConstraintViolation,
    }
  }
}

// ─── Core error ──────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum Error {
  #[error("validation failed: {0}")]
  Validation(#[from] ValidationError),

  #[error("search term must not be empty")]
  EmptySearchTerm,
}

impl Classify for Error {
  fn kind(&self) -> ErrorKind {
    match self {
      Self::Validation(e) => e.kind(),
      Self::EmptySearchTerm => ErrorKind::InvalidRequest,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
