//! SQL schema for the Bazaar SQLite store.
//!
//! Executed once at connection startup. `user_version` records the layout
//! below so an existing database file can be told apart from a fresh one.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- One row per distinct name, compared byte for byte.
CREATE TABLE IF NOT EXISTS categories (
    id    INTEGER PRIMARY KEY AUTOINCREMENT,
    name  TEXT NOT NULL UNIQUE
);

-- Items are never updated or deleted.
CREATE TABLE IF NOT EXISTS items (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    name         TEXT NOT NULL,
    category_id  INTEGER NOT NULL REFERENCES categories(id),
    image_name   TEXT NOT NULL,   -- content digest file name under the image root
    UNIQUE (name, category_id)
);

CREATE INDEX IF NOT EXISTS items_category_idx ON items(category_id);

PRAGMA user_version = 1;
";
