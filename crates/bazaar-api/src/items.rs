//! Handlers for `/items` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/items` | `{"items": [...]}` |
//! | `POST` | `/items` | multipart or urlencoded form: `name`, `category`, optional `image` |
//! | `GET`  | `/items/{id}` | 404 if not found |

use std::sync::Arc;

use axum::{
  Form, Json,
  extract::{FromRequest, Multipart, Path, Request, State},
  http::header,
};
use bazaar_core::store::CatalogStore;
use bytes::Bytes;
use serde::Deserialize;

use crate::{
  catalog::{AddItemResponse, Catalog, ItemResponse, ItemsResponse},
  error::ApiError,
};

// ─── Request ──────────────────────────────────────────────────────────────────

/// A parsed `POST /items` form. Fields are validated by the catalog.
#[derive(Debug, Default)]
pub struct AddItemForm {
  pub name:     String,
  pub category: String,
  pub image:    Option<Bytes>,
}

/// Urlencoded variant; it cannot carry a file.
#[derive(Debug, Deserialize)]
struct PlainForm {
  #[serde(default)]
  name:     String,
  #[serde(default)]
  category: String,
}

impl<St> FromRequest<St> for AddItemForm
where
  St: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request(req: Request, state: &St) -> Result<Self, Self::Rejection> {
    let is_multipart = req
      .headers()
      .get(header::CONTENT_TYPE)
      .and_then(|v| v.to_str().ok())
      .is_some_and(|ct| ct.starts_with("multipart/form-data"));

    if !is_multipart {
      let Form(plain) = Form::<PlainForm>::from_request(req, state)
        .await
        .map_err(|e| ApiError::BadRequest(format!("failed to parse form: {e}")))?;
      return Ok(Self { name: plain.name, category: plain.category, image: None });
    }

    let mut multipart = Multipart::from_request(req, state)
      .await
      .map_err(|e| ApiError::BadRequest(format!("failed to parse multipart form: {e}")))?;

    let mut form = Self::default();
    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
      let field_name = field.name().unwrap_or_default().to_owned();
      match field_name.as_str() {
        "name" => form.name = field.text().await.map_err(bad_multipart)?,
        "category" => form.category = field.text().await.map_err(bad_multipart)?,
        "image" => {
          let file_name = field
            .file_name()
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
          let data = field.bytes().await.map_err(bad_multipart)?;

          // Browsers send an empty, unnamed part when no file was chosen.
          if file_name.is_empty() && data.is_empty() {
            continue;
          }
          if !(file_name.ends_with(".jpg") || file_name.ends_with(".jpeg")) {
            return Err(ApiError::BadRequest(
              "only .jpg or .jpeg files are allowed".to_owned(),
            ));
          }
          if data.is_empty() {
            return Err(ApiError::BadRequest("image data is empty".to_owned()));
          }
          form.image = Some(data);
        }
        _ => {}
      }
    }

    Ok(form)
  }
}

fn bad_multipart(e: axum::extract::multipart::MultipartError) -> ApiError {
  ApiError::BadRequest(format!("failed to read multipart form: {e}"))
}

// ─── Handlers ─────────────────────────────────────────────────────────────────

/// `POST /items`
pub async fn create<S>(
  State(catalog): State<Arc<Catalog<S>>>,
  form: AddItemForm,
) -> Result<Json<AddItemResponse>, ApiError>
where
  S: CatalogStore,
{
  let response = catalog
    .add_item(&form.name, &form.category, form.image.as_deref())
    .await?;
  Ok(Json(response))
}

/// `GET /items`
pub async fn list<S>(
  State(catalog): State<Arc<Catalog<S>>>,
) -> Result<Json<ItemsResponse>, ApiError>
where
  S: CatalogStore,
{
  Ok(Json(catalog.list_items().await?))
}

/// `GET /items/{id}`
pub async fn get_one<S>(
  State(catalog): State<Arc<Catalog<S>>>,
  Path(id): Path<String>,
) -> Result<Json<ItemResponse>, ApiError>
where
  S: CatalogStore,
{
  Ok(Json(catalog.get_item(&id).await?))
}
