//! [`Catalog`]: the operations the HTTP layer exposes, independent of HTTP.
//!
//! Each operation returns its own response type so the wire shape can evolve
//! separately from [`Item`].

use std::sync::Arc;

use bazaar_core::{
  category::Category,
  item::{Item, NewItem},
  store::CatalogStore,
};
use bazaar_images::{ImageStore, PLACEHOLDER_NAME};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

// ─── Responses ────────────────────────────────────────────────────────────────

/// Body of `POST /items`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddItemResponse {
  pub message: String,
  pub id:      i64,
}

/// One row of `GET /items`, and the body of `GET /items/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemResponse {
  pub id:         i64,
  pub name:       String,
  pub category:   String,
  pub image_name: String,
}

impl From<Item> for ItemResponse {
  fn from(item: Item) -> Self {
    Self {
      id:         item.item_id,
      name:       item.name,
      category:   item.category,
      image_name: item.image_name,
    }
  }
}

/// Body of `GET /items`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemsResponse {
  pub items: Vec<ItemResponse>,
}

/// One element of the `GET /search` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
  pub name:       String,
  pub category:   String,
  pub image_name: String,
}

impl From<Item> for SearchHit {
  fn from(item: Item) -> Self {
    Self {
      name:       item.name,
      category:   item.category,
      image_name: item.image_name,
    }
  }
}

/// One element of `GET /categories`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryResponse {
  pub id:   i64,
  pub name: String,
}

impl From<Category> for CategoryResponse {
  fn from(category: Category) -> Self {
    Self { id: category.category_id, name: category.name }
  }
}

/// Body of `GET /categories`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoriesResponse {
  pub categories: Vec<CategoryResponse>,
}

// ─── Catalog ──────────────────────────────────────────────────────────────────

/// The catalog service: an item store plus the image store feeding it.
pub struct Catalog<S> {
  store:  Arc<S>,
  images: ImageStore,
}

impl<S> Catalog<S>
where
  S: CatalogStore,
{
  pub fn new(store: Arc<S>, images: ImageStore) -> Self { Self { store, images } }

  /// Store the photo (if any), then insert the item.
  ///
  /// Items without a photo point at the placeholder name. A duplicate
  /// `(name, category)` succeeds and keeps the existing row.
  pub async fn add_item(
    &self,
    name: &str,
    category: &str,
    image: Option<&[u8]>,
  ) -> Result<AddItemResponse, ApiError> {
    // Validate before touching the disk so a bad request leaves no image.
    let mut item = NewItem::new(name, category, PLACEHOLDER_NAME)?;

    if let Some(bytes) = image {
      let stored = self.images.store(bytes).await?;
      item = item.with_image_name(stored.file_name)?;
    }

    tracing::info!(name, category, image_name = item.image_name(), "item received");

    let insertion = self
      .store
      .insert(item)
      .await
      .map_err(|e| ApiError::Store(Box::new(e)))?;

    Ok(AddItemResponse {
      message: format!("item received: {name}"),
      id:      insertion.item_id(),
    })
  }

  pub async fn list_items(&self) -> Result<ItemsResponse, ApiError> {
    let items = self
      .store
      .list_items()
      .await
      .map_err(|e| ApiError::Store(Box::new(e)))?;

    Ok(ItemsResponse {
      items: items.into_iter().map(ItemResponse::from).collect(),
    })
  }

  /// Look up one item by its id as it appears in the URL.
  ///
  /// An id that is not a number cannot name a row, so it is a plain miss.
  pub async fn get_item(&self, id: &str) -> Result<ItemResponse, ApiError> {
    let Ok(item_id) = id.parse::<i64>() else {
      return Err(ApiError::NotFound(format!("item {id} not found")));
    };

    let item = self
      .store
      .get_item(item_id)
      .await
      .map_err(|e| ApiError::Store(Box::new(e)))?
      .ok_or_else(|| ApiError::NotFound(format!("item {item_id} not found")))?;

    Ok(ItemResponse::from(item))
  }

  pub async fn search_items(&self, keyword: &str) -> Result<Vec<SearchHit>, ApiError> {
    if keyword.is_empty() {
      return Err(ApiError::BadRequest("keyword is required".to_owned()));
    }

    let items = self
      .store
      .search(keyword)
      .await
      .map_err(|e| ApiError::Store(Box::new(e)))?;

    Ok(items.into_iter().map(SearchHit::from).collect())
  }

  /// Every category created so far, for the front-end's category picker.
  pub async fn list_categories(&self) -> Result<CategoriesResponse, ApiError> {
    let categories = self
      .store
      .list_categories()
      .await
      .map_err(|e| ApiError::Store(Box::new(e)))?;

    Ok(CategoriesResponse {
      categories: categories.into_iter().map(CategoryResponse::from).collect(),
    })
  }

  /// The bytes of a stored photo, or of the placeholder when it is missing.
  pub async fn serve_image(&self, file_name: &str) -> Result<Vec<u8>, ApiError> {
    Ok(self.images.read(file_name).await?)
  }
}

#[cfg(test)]
mod tests {
  use bazaar_images::file_name_for;
  use bazaar_store_sqlite::SqliteStore;
  use tempfile::TempDir;

  use super::*;

  async fn catalog() -> (Catalog<SqliteStore>, TempDir) {
    let dir = TempDir::new().unwrap();
    let store = SqliteStore::open_in_memory().await.unwrap();
    (Catalog::new(Arc::new(store), ImageStore::new(dir.path())), dir)
  }

  #[tokio::test]
  async fn add_then_list_round_trip() {
    let (c, _dir) = catalog().await;
    let photo = b"\xff\xd8\xff ring photo";

    c.add_item("ring", "jewelry", Some(photo.as_slice())).await.unwrap();

    let listed = c.list_items().await.unwrap();
    assert_eq!(listed.items.len(), 1);
    let entry = &listed.items[0];
    assert_eq!(entry.name, "ring");
    assert_eq!(entry.category, "jewelry");
    assert_eq!(entry.image_name, file_name_for(photo));
  }

  #[tokio::test]
  async fn item_without_photo_uses_placeholder_name() {
    let (c, _dir) = catalog().await;

    let added = c.add_item("hat", "headwear", None).await.unwrap();
    let item = c.get_item(&added.id.to_string()).await.unwrap();
    assert_eq!(item.image_name, PLACEHOLDER_NAME);
  }

  #[tokio::test]
  async fn repeated_add_keeps_one_item() {
    let (c, _dir) = catalog().await;

    let first = c.add_item("ring", "jewelry", Some(b"a".as_slice())).await.unwrap();
    let second = c.add_item("ring", "jewelry", Some(b"b".as_slice())).await.unwrap();

    assert_eq!(first.id, second.id);
    let listed = c.list_items().await.unwrap();
    assert_eq!(listed.items.len(), 1);
    assert_eq!(listed.items[0].image_name, file_name_for(b"a"));
  }

  #[tokio::test]
  async fn empty_name_is_a_validation_error_and_writes_nothing() {
    let (c, dir) = catalog().await;

    let err = c.add_item("", "jewelry", Some(b"photo".as_slice())).await.unwrap_err();
    assert!(matches!(err, ApiError::BadRequest(_)));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
  }

  #[tokio::test]
  async fn failed_image_write_creates_no_item() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("images");
    std::fs::write(&root, b"not a directory").unwrap();
    let store = SqliteStore::open_in_memory().await.unwrap();
    let c = Catalog::new(Arc::new(store), ImageStore::new(&root));

    let err = c.add_item("ring", "jewelry", Some(b"photo".as_slice())).await.unwrap_err();
    assert!(matches!(err, ApiError::Store(_)));
    assert!(c.list_items().await.unwrap().items.is_empty());
  }

  #[tokio::test]
  async fn get_missing_item_is_not_found() {
    let (c, _dir) = catalog().await;
    let err = c.get_item("9999").await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
  }

  #[tokio::test]
  async fn get_non_numeric_id_is_not_found() {
    let (c, _dir) = catalog().await;
    for id in ["abc", "1.5", ""] {
      let err = c.get_item(id).await.unwrap_err();
      assert!(matches!(err, ApiError::NotFound(_)), "{id:?}: {err}");
    }
  }

  #[tokio::test]
  async fn search_by_category_substring() {
    let (c, _dir) = catalog().await;
    c.add_item("shoes", "clothes", None).await.unwrap();
    c.add_item("hat", "headwear", None).await.unwrap();

    let hits = c.search_items("clo").await.unwrap();
    assert_eq!(
      hits,
      [SearchHit {
        name:       "shoes".into(),
        category:   "clothes".into(),
        image_name: PLACEHOLDER_NAME.into(),
      }]
    );
    assert!(c.search_items("zzz").await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn categories_are_listed_once_each() {
    let (c, _dir) = catalog().await;
    c.add_item("shoes", "clothes", None).await.unwrap();
    c.add_item("shirt", "clothes", None).await.unwrap();
    c.add_item("hat", "headwear", None).await.unwrap();

    let names: Vec<_> = c
      .list_categories()
      .await
      .unwrap()
      .categories
      .into_iter()
      .map(|category| category.name)
      .collect();
    assert_eq!(names, ["clothes", "headwear"]);
  }

  #[tokio::test]
  async fn serve_image_rejects_traversal() {
    let (c, _dir) = catalog().await;
    let err = c.serve_image("../../etc/passwd").await.unwrap_err();
    assert!(matches!(err, ApiError::BadRequest(_)));
  }

  #[tokio::test]
  async fn serve_image_soft_miss_returns_placeholder() {
    let (c, dir) = catalog().await;
    std::fs::write(dir.path().join(PLACEHOLDER_NAME), b"placeholder").unwrap();

    assert_eq!(c.serve_image("nonexistent.jpg").await.unwrap(), b"placeholder");
  }
}
