//! Field-level validation of create requests.
//!
//! Rules run in a fixed order (handle, name, birth date, tags) and the first
//! failure is reported. Handle uniqueness is not checked here; it surfaces
//! from the store at write time.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde_json::Value;

use crate::{
  ValidationError,
  person::{Field, NewPerson, PersonCandidate},
};

pub const HANDLE_MAX_CHARS: usize = 32;
pub const NAME_MAX_CHARS: usize = 100;
pub const TAG_MAX_CHARS: usize = 32;

const HANDLE: &str = "apelido";
const NAME: &str = "nome";
const BIRTH_DATE: &str = "nascimento";
const TAGS: &str = "stack";

static DATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("static date pattern")
});

/// Check `candidate` against every field rule and normalise it.
pub fn validate(candidate: PersonCandidate) -> Result<NewPerson, ValidationError> {
  let handle = match candidate.handle {
    Field::Absent => return Err(ValidationError::MissingHandle),
    Field::Null => return Err(ValidationError::Null(HANDLE)),
    Field::Present(v) => bounded_text(HANDLE, v, HANDLE_MAX_CHARS)?,
  };

  let name = match candidate.name {
    Field::Absent => return Err(ValidationError::Missing(NAME)),
    Field::Null => return Err(ValidationError::Null(NAME)),
    Field::Present(v) => bounded_text(NAME, v, NAME_MAX_CHARS)?,
  };

  let birth_date = match candidate.birth_date {
    Field::Absent => return Err(ValidationError::Missing(BIRTH_DATE)),
    Field::Null => return Err(ValidationError::Null(BIRTH_DATE)),
    Field::Present(v) => parse_birth_date(v)?,
  };

  let tags = match candidate.tags {
    Field::Absent | Field::Null => Vec::new(),
    Field::Present(v) => parse_tags(v)?,
  };

  Ok(NewPerson::new(handle, name, birth_date, tags))
}

/// Trim a string value and require 1..=`max` code points.
fn bounded_text(
  field: &'static str,
  value: Value,
  max: usize,
) -> Result<String, ValidationError> {
  let Value::String(raw) = value else {
    return Err(ValidationError::WrongType { field, expected: "string" });
  };

  let trimmed = raw.trim();
  let actual = trimmed.chars().count();
  if actual == 0 || actual > max {
    return Err(ValidationError::Length { field, min: 1, max, actual });
  }
  Ok(trimmed.to_owned())
}

fn parse_birth_date(value: Value) -> Result<NaiveDate, ValidationError> {
  let Value::String(raw) = value else {
    return Err(ValidationError::WrongType {
      field:    BIRTH_DATE,
      expected: "string",
    });
  };

  if !DATE_PATTERN.is_match(&raw) {
    return Err(ValidationError::DatePattern(raw));
  }

  NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
    .map_err(|_| ValidationError::InvalidDate(raw))
}

/// Tags are stored verbatim (no trimming); only their length is checked.
fn parse_tags(value: Value) -> Result<Vec<String>, ValidationError> {
  let Value::Array(items) = value else {
    return Err(ValidationError::WrongType { field: TAGS, expected: "array" });
  };

  items
    .into_iter()
    .enumerate()
    .map(|(index, item)| match item {
      Value::Null => Err(ValidationError::NullTag(index)),
      Value::String(tag) => {
        let actual = tag.chars().count();
        if actual == 0 || actual > TAG_MAX_CHARS {
          Err(ValidationError::TagLength { index, max: TAG_MAX_CHARS, actual })
        } else {
          Ok(tag)
        }
      }
      _ => Err(ValidationError::TagType(index)),
    })
    .collect()
}
