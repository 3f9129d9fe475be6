//! Category resolution inside an open transaction.

use rusqlite::{Connection, OptionalExtension as _};

/// Return the id of the category called `name`, inserting it if absent.
///
/// Must be called on the transaction of the enclosing item insert so that a
/// failed insert also discards a freshly created category. `categories.name`
/// is `UNIQUE`; the `ON CONFLICT` clause turns a concurrent creation of the
/// same name into a plain lookup.
pub fn resolve_or_create(conn: &Connection, name: &str) -> rusqlite::Result<i64> {
  if let Some(id) = find(conn, name)? {
    return Ok(id);
  }

  conn.execute(
    "INSERT INTO categories (name) VALUES (?1) ON CONFLICT (name) DO NOTHING",
    rusqlite::params![name],
  )?;
  tracing::debug!(category = name, "created category");

  conn.query_row(
    "SELECT id FROM categories WHERE name = ?1",
    rusqlite::params![name],
    |row| row.get(0),
  )
}

fn find(conn: &Connection, name: &str) -> rusqlite::Result<Option<i64>> {
  conn
    .query_row(
      "SELECT id FROM categories WHERE name = ?1",
      rusqlite::params![name],
      |row| row.get(0),
    )
    .optional()
}
