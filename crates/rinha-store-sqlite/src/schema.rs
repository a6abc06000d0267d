//! SQL schema for the person store.
//!
//! Executed once at connection startup. The schema is versioned with
//! `PRAGMA user_version`; there is a single version so far.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Persons are append-only.
-- No UPDATE or DELETE is ever issued against this table.
-- Upper length bounds are enforced in code points by the validator;
-- SQLite's length() stops at the first NUL, so it cannot repeat them.
CREATE TABLE IF NOT EXISTS people (
    id          TEXT PRIMARY KEY,
    apelido     TEXT NOT NULL UNIQUE
                CHECK (apelido <> ''),
    nome        TEXT NOT NULL
                CHECK (nome <> ''),
    nascimento  TEXT NOT NULL      -- YYYY-MM-DD
                CHECK (length(nascimento) = 10),
    stack       TEXT NOT NULL DEFAULT '[]'   -- JSON array of strings
                CHECK (json_valid(stack) AND json_type(stack) = 'array')
);

PRAGMA user_version = 1;
";

/// Name of the SQL function registered on every connection that lowercases
/// its argument with full Unicode case mapping. SQLite's own `lower()` and
/// `LIKE` only fold ASCII.
pub const FOLD_FN: &str = "fold";
