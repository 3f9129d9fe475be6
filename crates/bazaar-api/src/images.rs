//! Handler for `GET /images/{file_name}`.
//!
//! Names that leave the image directory or are not `.jpg` get a 400; a valid
//! name with no file behind it gets the placeholder image.

use std::sync::Arc;

use axum::{
  extract::{Path, State},
  http::header,
  response::IntoResponse,
};
use bazaar_core::store::CatalogStore;

use crate::{catalog::Catalog, error::ApiError};

/// `GET /images/{file_name}`
pub async fn get_one<S>(
  State(catalog): State<Arc<Catalog<S>>>,
  Path(file_name): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CatalogStore,
{
  let bytes = catalog.serve_image(&file_name).await?;
  Ok(([(header::CONTENT_TYPE, "image/jpeg")], bytes))
}
