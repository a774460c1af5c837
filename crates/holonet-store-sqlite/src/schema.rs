//! SQL schema for the Holonet SQLite store.
//!
//! Executed once at connection startup. `PRAGMA user_version` records the
//! layout so a later change can be gated on it.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS users (
    id      INTEGER PRIMARY KEY AUTOINCREMENT,
    handle  TEXT    NOT NULL UNIQUE,
    secret  TEXT    NOT NULL,          -- stored as supplied
    active  INTEGER NOT NULL DEFAULT 1
);

CREATE TABLE IF NOT EXISTS photos (
    id      INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    url     TEXT    NOT NULL
);

CREATE TABLE IF NOT EXISTS collections (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT    NOT NULL,
    description TEXT,
    user_id     INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE
);

-- referenced_id points into people or planets depending on kind; there is
-- no foreign key, so catalog deletes clean up favorites explicitly.
CREATE TABLE IF NOT EXISTS favorites (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id       INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    kind          TEXT    NOT NULL CHECK (kind IN ('person', 'planet')),
    referenced_id INTEGER NOT NULL,
    UNIQUE (user_id, kind, referenced_id)
);

CREATE TABLE IF NOT EXISTS people (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    name       TEXT NOT NULL,
    height     TEXT NOT NULL,
    mass       TEXT NOT NULL,
    hair_color TEXT NOT NULL,
    skin_color TEXT NOT NULL,
    eye_color  TEXT NOT NULL,
    birth_year TEXT NOT NULL,
    gender     TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS planets (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    name       TEXT NOT NULL,
    diameter   TEXT NOT NULL,
    climate    TEXT NOT NULL,
    gravity    TEXT NOT NULL,
    terrain    TEXT NOT NULL,
    population TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS photos_user_idx      ON photos(user_id);
CREATE INDEX IF NOT EXISTS collections_user_idx ON collections(user_id);
CREATE INDEX IF NOT EXISTS favorites_target_idx ON favorites(kind, referenced_id);

PRAGMA user_version = 1;
";
