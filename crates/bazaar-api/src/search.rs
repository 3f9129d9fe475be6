//! Handler for `GET /search`.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State},
};
use bazaar_core::store::CatalogStore;
use serde::Deserialize;

use crate::{
  catalog::{Catalog, SearchHit},
  error::ApiError,
};

#[derive(Debug, Deserialize, Default)]
pub struct SearchParams {
  /// Substring matched against item and category names.
  pub keyword: Option<String>,
}

/// `GET /search?keyword=...`: always a JSON array, possibly empty.
pub async fn handler<S>(
  State(catalog): State<Arc<Catalog<S>>>,
  Query(params): Query<SearchParams>,
) -> Result<Json<Vec<SearchHit>>, ApiError>
where
  S: CatalogStore,
{
  let keyword = params.keyword.unwrap_or_default();
  Ok(Json(catalog.search_items(&keyword).await?))
}
