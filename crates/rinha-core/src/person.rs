//! Person types, the single entity of the registry.
//!
//! A create request arrives as a [`PersonCandidate`], whose fields remember
//! whether they were absent, explicitly `null`, or carried a value. The
//! validator turns a candidate into a [`NewPerson`]; the store assigns an id
//! and hands back a [`Person`].

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::ValidationError;

// ─── Field presence ──────────────────────────────────────────────────────────

/// A request field as it appeared on the wire.
///
/// Pair with `#[serde(default)]` so a missing key becomes [`Field::Absent`];
/// an explicit `null` becomes [`Field::Null`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field<T> {
  Absent,
  Null,
  Present(T),
}

impl<T> Default for Field<T> {
  fn default() -> Self { Self::Absent }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Field<T> {
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: Deserializer<'de>,
  {
    Ok(match Option::<T>::deserialize(deserializer)? {
      Some(value) => Self::Present(value),
      None => Self::Null,
    })
  }
}

// ─── Candidate ───────────────────────────────────────────────────────────────

/// An unvalidated create request.
///
/// Values are kept as raw JSON so that a wrong type is reported by the
/// validator as malformed input rather than failing the whole decode.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersonCandidate {
  #[serde(default, rename = "apelido")]
  pub handle:     Field<Value>,
  #[serde(default, rename = "nome")]
  pub name:       Field<Value>,
  #[serde(default, rename = "nascimento")]
  pub birth_date: Field<Value>,
  #[serde(default, rename = "stack")]
  pub tags:       Field<Value>,
}

impl PersonCandidate {
  /// Decode a request body. Anything other than a JSON object is malformed.
  pub fn from_slice(body: &[u8]) -> Result<Self, ValidationError> {
    serde_json::from_slice(body)
      .map_err(|e| ValidationError::MalformedBody(e.to_string()))
  }
}

// ─── NewPerson ───────────────────────────────────────────────────────────────

/// A validated, normalised person that has not been stored yet.
///
/// Only [`crate::validate`] can build one, so every value reaching a store
/// has passed all field-level rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPerson {
  handle:     String,
  name:       String,
  birth_date: NaiveDate,
  tags:       Vec<String>,
}

impl NewPerson {
  pub(crate) fn new(
    handle: String,
    name: String,
    birth_date: NaiveDate,
    tags: Vec<String>,
  ) -> Self {
    Self { handle, name, birth_date, tags }
  }

  /// The trimmed handle; unique across all persons.
  pub fn handle(&self) -> &str { &self.handle }

  pub fn name(&self) -> &str { &self.name }

  pub fn birth_date(&self) -> NaiveDate { self.birth_date }

  /// Tags in request order; empty when the request had none.
  pub fn tags(&self) -> &[String] { &self.tags }

  /// Attach the store-assigned identifier.
  pub fn into_person(self, id: Uuid) -> Person {
    Person {
      id,
      handle: self.handle,
      name: self.name,
      birth_date: self.birth_date,
      tags: self.tags,
    }
  }
}

// ─── Person ──────────────────────────────────────────────────────────────────

/// A stored person. The `id` is assigned once at creation and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
  pub id:         Uuid,
  #[serde(rename = "apelido")]
  pub handle:     String,
  #[serde(rename = "nome")]
  pub name:       String,
  /// Serialised as `YYYY-MM-DD`.
  #[serde(rename = "nascimento")]
  pub birth_date: NaiveDate,
  #[serde(rename = "stack")]
  pub tags:       Vec<String>,
}
