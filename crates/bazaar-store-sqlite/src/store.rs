//! [`SqliteStore`]: the SQLite implementation of [`CatalogStore`].

use std::path::Path;

use rusqlite::{OptionalExtension as _, TransactionBehavior};

use bazaar_core::{
  category::Category,
  item::{Item, NewItem},
  store::{CatalogStore, Insertion},
};

use crate::{Result, category::resolve_or_create, schema::SCHEMA};

/// Item columns joined with the category name, in [`item_from_row`] order.
const ITEM_SELECT: &str = "
  SELECT items.id, items.name, categories.name, items.image_name
  FROM items
  JOIN categories ON categories.id = items.category_id";

fn item_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Item> {
  Ok(Item {
    item_id:    row.get(0)?,
    name:       row.get(1)?,
    category:   row.get(2)?,
    image_name: row.get(3)?,
  })
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Bazaar catalog backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted. Every
/// statement runs on the connection's own thread, so writes are serialized.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
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
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  #[cfg(test)]
  pub(crate) fn connection(&self) -> &tokio_rusqlite::Connection { &self.conn }
}

// ─── CatalogStore impl ───────────────────────────────────────────────────────

impl CatalogStore for SqliteStore {
  type Error = crate::Error;

  async fn insert(&self, item: NewItem) -> Result<Insertion> {
    let name       = item.name().to_owned();
    let category   = item.category().to_owned();
    let image_name = item.image_name().to_owned();

    let insertion = self
      .conn
      .call(move |conn| {
        // IMMEDIATE takes the write lock up front, so the duplicate check and
        // the inserts below see the same database state.
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let existing: Option<i64> = tx
          .query_row(
            "SELECT items.id
             FROM items
             JOIN categories ON categories.id = items.category_id
             WHERE items.name = ?1 AND categories.name = ?2",
            rusqlite::params![name, category],
            |row| row.get(0),
          )
          .optional()?;

        if let Some(item_id) = existing {
          tracing::info!(%name, %category, item_id, "item already exists");
          tx.rollback()?;
          return Ok(Insertion::Existing { item_id });
        }

        let category_id = resolve_or_create(&tx, &category)?;

        tx.execute(
          "INSERT INTO items (name, category_id, image_name) VALUES (?1, ?2, ?3)",
          rusqlite::params![name, category_id, image_name],
        )?;
        let item_id = tx.last_insert_rowid();

        tx.commit()?;
        Ok(Insertion::Created { item_id })
      })
      .await?;

    Ok(insertion)
  }

  async fn list_items(&self) -> Result<Vec<Item>> {
    let items = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!("{ITEM_SELECT} ORDER BY items.id"))?;
        let rows = stmt
          .query_map([], item_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(items)
  }

  async fn get_item(&self, item_id: i64) -> Result<Option<Item>> {
    let item = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("{ITEM_SELECT} WHERE items.id = ?1"),
            rusqlite::params![item_id],
            item_from_row,
          )
          .optional()?)
      })
      .await?;

    Ok(item)
  }

  async fn search(&self, keyword: &str) -> Result<Vec<Item>> {
    // `instr` is a case-sensitive substring test and, unlike LIKE, gives no
    // special meaning to `%` or `_` in the keyword. `?1` is bound once and
    // used by both sides of the OR.
    let keyword = keyword.to_owned();

    let items = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "{ITEM_SELECT}
           WHERE instr(items.name, ?1) > 0 OR instr(categories.name, ?1) > 0
           ORDER BY items.id"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![keyword], item_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(items)
  }

  async fn list_categories(&self) -> Result<Vec<Category>> {
    let categories = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare("SELECT id, name FROM categories ORDER BY id")?;
        let rows = stmt
          .query_map([], |row| {
            Ok(Category {
              category_id: row.get(0)?,
              name:        row.get(1)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(categories)
  }
}
