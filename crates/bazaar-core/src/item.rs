//! Item types: the listings that make up the catalog.
//!
//! Items are written once and never updated. The `(name, category)` pair is
//! unique; resubmitting a pair keeps the first row, including its image.

use crate::{Error, Result};

// ─── Item ────────────────────────────────────────────────────────────────────

/// A persisted item, joined with the name of its category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
  pub item_id:    i64,
  pub name:       String,
  /// The category *name*; the row itself only stores the category id.
  pub category:   String,
  /// File name of the stored photo, relative to the image root.
  pub image_name: String,
}

// ─── NewItem ─────────────────────────────────────────────────────────────────

/// Input to [`crate::store::CatalogStore::insert`].
///
/// Construct with [`NewItem::new`] so that empty names are rejected before
/// the store is ever touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
  name:       String,
  category:   String,
  image_name: String,
}

impl NewItem {
  pub fn new(
    name: impl Into<String>,
    category: impl Into<String>,
    image_name: impl Into<String>,
  ) -> Result<Self> {
    let name = name.into();
    let category = category.into();
    let image_name = image_name.into();

    if name.is_empty() {
      return Err(Error::MissingField("name"));
    }
    if category.is_empty() {
      return Err(Error::MissingField("category"));
    }
    if image_name.is_empty() {
      return Err(Error::MissingField("image_name"));
    }

    Ok(Self { name, category, image_name })
  }

  /// Replace the image name, e.g. once the uploaded photo has been stored.
  pub fn with_image_name(self, image_name: impl Into<String>) -> Result<Self> {
    Self::new(self.name, self.category, image_name)
  }

  pub fn name(&self) -> &str { &self.name }

  pub fn category(&self) -> &str { &self.category }

  pub fn image_name(&self) -> &str { &self.image_name }
}
