//! The `CatalogStore` trait and its write outcome.
//!
//! The trait is implemented by storage backends (e.g. `bazaar-store-sqlite`).
//! Higher layers (`bazaar-api`) depend on this abstraction, not on any
//! concrete backend.

use std::future::Future;

use crate::{
  category::Category,
  item::{Item, NewItem},
};

// ─── Insertion ───────────────────────────────────────────────────────────────

/// What [`CatalogStore::insert`] did with its input.
///
/// Both variants are successes; a duplicate `(name, category)` pair is not an
/// error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
  /// A new row was written.
  Created { item_id: i64 },
  /// An item with the same name already exists in that category; nothing was
  /// written.
  Existing { item_id: i64 },
}

impl Insertion {
  pub fn item_id(&self) -> i64 {
    match self {
      Self::Created { item_id } | Self::Existing { item_id } => *item_id,
    }
  }

  pub fn is_created(&self) -> bool { matches!(self, Self::Created { .. }) }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a Bazaar catalog backend.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait CatalogStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Insert an item, creating its category on first use.
  ///
  /// The duplicate check, category resolution and item insert share one
  /// transaction; on any error nothing is written.
  fn insert(
    &self,
    item: NewItem,
  ) -> impl Future<Output = Result<Insertion, Self::Error>> + Send + '_;

  /// Every item joined with its category name, ordered by id.
  fn list_items(
    &self,
  ) -> impl Future<Output = Result<Vec<Item>, Self::Error>> + Send + '_;

  /// Retrieve an item by id. Returns `None` if not found.
  fn get_item(
    &self,
    item_id: i64,
  ) -> impl Future<Output = Result<Option<Item>, Self::Error>> + Send + '_;

  /// Items whose name or category name contains `keyword` (case-sensitive).
  fn search<'a>(
    &'a self,
    keyword: &'a str,
  ) -> impl Future<Output = Result<Vec<Item>, Self::Error>> + Send + 'a;

  /// Every category, ordered by id.
  fn list_categories(
    &self,
  ) -> impl Future<Output = Result<Vec<Category>, Self::Error>> + Send + '_;
}
