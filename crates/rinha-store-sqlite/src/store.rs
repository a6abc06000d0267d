//! [`SqliteStore`]: the SQLite implementation of [`PersonStore`].

use std::path::Path;

use rinha_core::{
  person::{NewPerson, Person},
  store::{PersonStore, SEARCH_LIMIT, SearchTerm},
};
use rusqlite::{OptionalExtension as _, functions::FunctionFlags};
use uuid::Uuid;

use crate::{
  Error, Result,
  encode::{PERSON_COLUMNS, RawPerson, encode_date, encode_tags, encode_uuid},
  schema::{FOLD_FN, SCHEMA},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A person store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    tracing::debug!(path = %path.as_ref().display(), "opening sqlite store");
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        register_functions(conn)?;
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

/// Register [`FOLD_FN`] on `conn`. Functions are per-connection, so this has
/// to run before any search.
fn register_functions(conn: &rusqlite::Connection) -> rusqlite::Result<()> {
  conn.create_scalar_function(
    FOLD_FN,
    1,
    FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
    |ctx| {
      let value: Option<String> = ctx.get(0)?;
      Ok(value.map(|s| s.to_lowercase()))
    },
  )
}

/// Turn a failed INSERT into a domain error. Constraint failures are the
/// caller's fault; anything else is a storage failure.
fn insert_error(err: tokio_rusqlite::Error, handle: &str) -> Error {
  if let tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(
    code,
    message,
  )) = &err
    && code.code == rusqlite::ErrorCode::ConstraintViolation
  {
    if code.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE {
      return Error::DuplicateHandle(handle.to_owned());
    }
    return Error::Constraint(
      message.clone().unwrap_or_else(|| code.to_string()),
    );
  }
  Error::Database(err)
}

// ─── PersonStore impl ────────────────────────────────────────────────────────

impl PersonStore for SqliteStore {
  type Error = Error;

  async fn create(&self, person: NewPerson) -> Result<Person> {
    let person = person.into_person(Uuid::new_v4());

    let id_str     = encode_uuid(person.id);
    let handle     = person.handle.clone();
    let name       = person.name.clone();
    let birth_str  = encode_date(person.birth_date);
    let tags_str   = encode_tags(&person.tags)?;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO people (id, apelido, nome, nascimento, stack)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![id_str, handle, name, birth_str, tags_str],
        )?;
        Ok(())
      })
      .await
      .map_err(|e| insert_error(e, &person.handle))?;

    tracing::debug!(id = %person.id, handle = %person.handle, "person created");
    Ok(person)
  }

  async fn get_person(&self, id: Uuid) -> Result<Option<Person>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawPerson> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {PERSON_COLUMNS} FROM people WHERE id = ?1"),
            rusqlite::params![id_str],
            RawPerson::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawPerson::into_person).transpose()
  }

  async fn search(&self, term: &SearchTerm) -> Result<Vec<Person>> {
    // Matched against fold(column), so fold the needle the same way.
    let needle = term.as_str().to_lowercase();
    let limit  = SEARCH_LIMIT as i64;

    let raws: Vec<RawPerson> = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "SELECT {PERSON_COLUMNS}
           FROM people p
           WHERE instr({FOLD_FN}(p.apelido), ?1) > 0
              OR instr({FOLD_FN}(p.nome), ?1) > 0
              OR EXISTS (
                SELECT 1 FROM json_each(p.stack) AS tag
                WHERE instr({FOLD_FN}(tag.value), ?1) > 0
              )
           LIMIT ?2"
        );

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params![needle, limit], RawPerson::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPerson::into_person).collect()
  }

  async fn count(&self) -> Result<u64> {
    let n: i64 = self
      .conn
      .call(|conn| {
        Ok(conn.query_row("SELECT COUNT(*) FROM people", [], |r| r.get(0))?)
      })
      .await?;
    Ok(n as u64)
  }
}
