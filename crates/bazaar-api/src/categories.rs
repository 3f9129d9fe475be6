//! Handler for `GET /categories`.

use std::sync::Arc;

use axum::{Json, extract::State};
use bazaar_core::store::CatalogStore;

use crate::{
  catalog::{CategoriesResponse, Catalog},
  error::ApiError,
};

/// `GET /categories`
pub async fn list<S>(
  State(catalog): State<Arc<Catalog<S>>>,
) -> Result<Json<CategoriesResponse>, ApiError>
where
  S: CatalogStore,
{
  Ok(Json(catalog.list_categories().await?))
}
