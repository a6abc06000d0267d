//! The `PersonStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g. `rinha-store-sqlite`).
//! The HTTP layer depends on this abstraction, not on any concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::{
  Classify, Error, Result,
  person::{NewPerson, Person},
};

/// Maximum number of records a single search returns.
pub const SEARCH_LIMIT: usize = 50;

// ─── Query type ──────────────────────────────────────────────────────────────

/// A non-empty free-text term for [`PersonStore::search`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm(String);

impl SearchTerm {
  pub fn new(term: impl Into<String>) -> Result<Self> {
    let term = term.into();
    if term.is_empty() {
      return Err(Error::EmptySearchTerm);
    }
    Ok(Self(term))
  }

  pub fn as_str(&self) -> &str { &self.0 }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a person store backend.
///
/// Persons are append-only: there is no update or delete. Uniqueness of the
/// handle and atomicity of each insert are the backend's responsibility.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait PersonStore: Send + Sync {
  type Error: std::error::Error + Classify + Send + Sync + 'static;

  /// Assign a fresh identifier and persist `person` in one atomic write.
  ///
  /// Fails with a constraint-violation error if the handle is taken.
  fn create(
    &self,
    person: NewPerson,
  ) -> impl Future<Output = Result<Person, Self::Error>> + Send + '_;

  /// Retrieve a person by id. Returns `None` if not found.
  fn get_person(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Person>, Self::Error>> + Send + '_;

  /// Up to [`SEARCH_LIMIT`] persons whose handle, name, or any single tag
  /// contains `term`, ignoring case. Order is the backend's natural order.
  fn search<'a>(
    &'a self,
    term: &'a SearchTerm,
  ) -> impl Future<Output = Result<Vec<Person>, Self::Error>> + Send + 'a;

  /// Total number of stored persons.
  fn count(&self) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;
}
