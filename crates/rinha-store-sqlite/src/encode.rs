//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Birth dates are stored as `YYYY-MM-DD`. Tags are stored as a compact JSON
//! array. UUIDs are stored as hyphenated lowercase strings.

use chrono::NaiveDate;
use rinha_core::person::Person;
use uuid::Uuid;

use crate::{Error, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── NaiveDate ────────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format(DATE_FORMAT).to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, DATE_FORMAT)
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Tags ────────────────────────────────────────────────────────────────────

/// Always yields a JSON array, `[]` for no tags.
pub fn encode_tags(tags: &[String]) -> Result<String> {
  Ok(serde_json::to_string(tags)?)
}

pub fn decode_tags(s: &str) -> Result<Vec<String>> {
  Ok(serde_json::from_str(s)?)
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column list matching the field order of [`RawPerson::from_row`].
pub const PERSON_COLUMNS: &str = "id, apelido, nome, nascimento, stack";

/// Raw strings read directly from a `people` row.
pub struct RawPerson {
  pub id:         String,
  pub apelido:    String,
  pub nome:       String,
  pub nascimento: String,
  pub stack:      String,
}

impl RawPerson {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      apelido:    row.get(1)?,
      nome:       row.get(2)?,
      nascimento: row.get(3)?,
      stack:      row.get(4)?,
    })
  }

  pub fn into_person(self) -> Result<Person> {
    Ok(Person {
      id:         decode_uuid(&self.id)?,
      handle:     self.apelido,
      name:       self.nome,
      birth_date: decode_date(&self.nascimento)?,
      tags:       decode_tags(&self.stack)?,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_tags_encode_as_array() {
    assert_eq!(encode_tags(&[]).unwrap(), "[]");
  }

  #[test]
  fn date_is_fixed_width() {
    let d = NaiveDate::from_ymd_opt(987, 1, 2).unwrap();
    assert_eq!(encode_date(d), "0987-01-02");
    assert_eq!(decode_date("0987-01-02").unwrap(), d);
  }

  #[test]
  fn malformed_stored_date_is_reported() {
    assert!(matches!(decode_date("1990-02-31"), Err(Error::DateParse(_))));
  }
}
