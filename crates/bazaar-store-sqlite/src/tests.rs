//! Integration tests for `SqliteStore` against an in-memory database.

use bazaar_core::{
  item::NewItem,
  store::{CatalogStore, Insertion},
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn new_item(name: &str, category: &str) -> NewItem {
  NewItem::new(name, category, format!("{name}.jpg")).unwrap()
}

// ─── Insert ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_and_get_item() {
  let s = store().await;

  let insertion = s.insert(new_item("shoes", "clothes")).await.unwrap();
  assert!(insertion.is_created());

  let item = s.get_item(insertion.item_id()).await.unwrap().unwrap();
  assert_eq!(item.name, "shoes");
  assert_eq!(item.category, "clothes");
  assert_eq!(item.image_name, "shoes.jpg");
}

#[tokio::test]
async fn duplicate_insert_is_a_no_op() {
  let s = store().await;

  let first = s.insert(new_item("shoes", "clothes")).await.unwrap();
  let second = s
    .insert(NewItem::new("shoes", "clothes", "other.jpg").unwrap())
    .await
    .unwrap();

  assert_eq!(second, Insertion::Existing { item_id: first.item_id() });

  let items = s.list_items().await.unwrap();
  assert_eq!(items.len(), 1);
  // The first image name is the one retained.
  assert_eq!(items[0].image_name, "shoes.jpg");
}

#[tokio::test]
async fn same_name_in_another_category_is_a_new_item() {
  let s = store().await;

  let a = s.insert(new_item("cap", "clothes")).await.unwrap();
  let b = s.insert(new_item("cap", "headwear")).await.unwrap();

  assert!(a.is_created());
  assert!(b.is_created());
  assert_ne!(a.item_id(), b.item_id());
  assert_eq!(s.list_items().await.unwrap().len(), 2);
}

#[tokio::test]
async fn items_share_a_single_category_row() {
  let s = store().await;

  s.insert(new_item("shoes", "clothes")).await.unwrap();
  s.insert(new_item("shirt", "clothes")).await.unwrap();

  let categories = s.list_categories().await.unwrap();
  assert_eq!(categories.len(), 1);
  assert_eq!(categories[0].name, "clothes");

  let items = s.list_items().await.unwrap();
  assert_eq!(items.len(), 2);
  assert!(items.iter().all(|i| i.category == "clothes"));
}

#[tokio::test]
async fn category_names_are_case_sensitive() {
  let s = store().await;

  s.insert(new_item("shoes", "Clothes")).await.unwrap();
  s.insert(new_item("shirt", "clothes")).await.unwrap();

  let names: Vec<String> = s
    .list_categories()
    .await
    .unwrap()
    .into_iter()
    .map(|c| c.name)
    .collect();
  assert_eq!(names, ["Clothes", "clothes"]);
}

#[tokio::test]
async fn concurrent_inserts_create_one_category() {
  let s = store().await;

  let handles: Vec<_> = (0..8)
    .map(|i| {
      let s = s.clone();
      tokio::spawn(async move { s.insert(new_item(&format!("item-{i}"), "new")).await })
    })
    .collect();

  for handle in handles {
    assert!(handle.await.unwrap().unwrap().is_created());
  }

  assert_eq!(s.list_categories().await.unwrap().len(), 1);
  assert_eq!(s.list_items().await.unwrap().len(), 8);
}

#[tokio::test]
async fn failed_insert_leaves_no_category_behind() {
  let s = store().await;

  s.connection()
    .call(|conn| {
      conn.execute_batch(
        "CREATE TRIGGER reject_items BEFORE INSERT ON items
         BEGIN SELECT RAISE(ABORT, 'rejected'); END;",
      )?;
      Ok(())
    })
    .await
    .unwrap();

  let err = s.insert(new_item("shoes", "clothes")).await.unwrap_err();
  assert!(matches!(err, crate::Error::Database(_)));

  assert!(s.list_categories().await.unwrap().is_empty());
  assert!(s.list_items().await.unwrap().is_empty());
}

// ─── Reads ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn empty_catalog_lists_nothing() {
  let s = store().await;
  assert!(s.list_items().await.unwrap().is_empty());
  assert!(s.list_categories().await.unwrap().is_empty());
}

#[tokio::test]
async fn list_items_is_ordered_by_id() {
  let s = store().await;

  for name in ["c", "a", "b"] {
    s.insert(new_item(name, "letters")).await.unwrap();
  }

  let names: Vec<String> =
    s.list_items().await.unwrap().into_iter().map(|i| i.name).collect();
  assert_eq!(names, ["c", "a", "b"]);
}

#[tokio::test]
async fn get_missing_item_returns_none() {
  let s = store().await;
  assert!(s.get_item(9999).await.unwrap().is_none());
}

// ─── Search ──────────────────────────────────────────────────────────────────

async fn seeded() -> SqliteStore {
  let s = store().await;
  s.insert(new_item("shoes", "clothes")).await.unwrap();
  s.insert(new_item("hat", "headwear")).await.unwrap();
  s
}

#[tokio::test]
async fn search_matches_category_substring() {
  let s = seeded().await;

  let hits = s.search("clo").await.unwrap();
  assert_eq!(hits.len(), 1);
  assert_eq!(hits[0].name, "shoes");
  assert_eq!(hits[0].category, "clothes");
}

#[tokio::test]
async fn search_matches_name_substring() {
  let s = seeded().await;

  let hits = s.search("ha").await.unwrap();
  assert_eq!(hits.len(), 1);
  assert_eq!(hits[0].name, "hat");
}

#[tokio::test]
async fn search_matches_either_side() {
  let s = seeded().await;

  // "s" is in "shoes" and "clothes", but neither "hat" nor "headwear".
  let hits = s.search("s").await.unwrap();
  assert_eq!(hits.len(), 1);

  // "h" hits "shoes" by name and "hat"/"headwear" by both.
  let hits = s.search("h").await.unwrap();
  assert_eq!(hits.len(), 2);
}

#[tokio::test]
async fn search_without_matches_is_empty() {
  let s = seeded().await;
  assert!(s.search("zzz").await.unwrap().is_empty());
}

#[tokio::test]
async fn search_is_case_sensitive() {
  let s = seeded().await;
  assert!(s.search("CLO").await.unwrap().is_empty());
  assert!(s.search("Hat").await.unwrap().is_empty());
}

#[tokio::test]
async fn search_treats_wildcards_literally() {
  let s = seeded().await;
  s.insert(new_item("100% wool", "knitwear")).await.unwrap();

  assert_eq!(s.search("%").await.unwrap().len(), 1);
  assert!(s.search("_").await.unwrap().is_empty());
}
