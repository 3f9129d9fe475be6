//! Category: the normalised grouping every item belongs to.

/// A row in the `categories` table.
///
/// Names are unique and compared by exact string equality; `"Books"` and
/// `"books"` are two categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
  pub category_id: i64,
  pub name:        String,
}
