//! SQL schema for the Mingle SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS users (
    user_id       TEXT PRIMARY KEY,
    first_name    TEXT NOT NULL,
    last_name     TEXT NOT NULL,
    email         TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    picture_path  TEXT NOT NULL DEFAULT '',
    location      TEXT,
    occupation    TEXT,
    friends       TEXT NOT NULL DEFAULT '[]',  -- JSON array of user ids, stored order
    created_at    TEXT NOT NULL,                -- ISO 8601 UTC
    updated_at    TEXT NOT NULL
);

PRAGMA user_version = 1;
";
