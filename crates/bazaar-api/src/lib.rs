//! JSON HTTP API for Bazaar.
//!
//! Exposes an axum [`Router`] backed by any [`CatalogStore`] and an
//! [`ImageStore`](bazaar_images::ImageStore). CORS is applied by the caller
//! (see [`cors`]) since the allowed origin is deployment configuration.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/` | Liveness greeting |
//! | `GET`, `POST` | `/items` | See [`items`] |
//! | `GET`  | `/items/{id}` | |
//! | `GET`  | `/images/{file_name}` | `image/jpeg`; placeholder on miss |
//! | `GET`  | `/search?keyword=` | |
//! | `GET`  | `/categories` | `{"categories": [...]}` |

pub mod catalog;
pub mod categories;
pub mod error;
pub mod images;
pub mod items;
pub mod search;

pub use catalog::Catalog;
pub use error::ApiError;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Json, Router,
  extract::DefaultBodyLimit,
  http::{HeaderValue, Method, header::InvalidHeaderValue},
  routing::get,
};
use bazaar_core::store::CatalogStore;
use serde::{Deserialize, Serialize};
use tower_http::{
  cors::{Any, CorsLayer},
  trace::TraceLayer,
};

/// Upper bound on request bodies, photos included.
pub const MAX_BODY_BYTES: usize = 32 * 1024 * 1024;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `BAZAAR_*` environment variables. Every field has a default.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
  pub host:              String,
  pub port:              u16,
  pub store_path:        PathBuf,
  pub image_dir:         PathBuf,
  /// Served for valid image names with no file; defaults to
  /// `image_dir/default.jpg`.
  pub placeholder_image: Option<PathBuf>,
  /// Origin allowed by CORS.
  pub front_url:         String,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:              "127.0.0.1".to_owned(),
      port:              9000,
      store_path:        PathBuf::from("db/mercari.sqlite3"),
      image_dir:         PathBuf::from("images"),
      placeholder_image: None,
      front_url:         "http://localhost:3000".to_owned(),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct HelloResponse {
  message: &'static str,
}

async fn hello() -> Json<HelloResponse> { Json(HelloResponse { message: "Hello, world!" }) }

/// Build the API router for `catalog`, with request tracing.
pub fn router<S>(catalog: Arc<Catalog<S>>) -> Router
where
  S: CatalogStore + 'static,
{
  Router::new()
    .route("/", get(hello))
    .route("/items", get(items::list::<S>).post(items::create::<S>))
    .route("/items/{id}", get(items::get_one::<S>))
    .route("/images/{file_name}", get(images::get_one::<S>))
    .route("/search", get(search::handler::<S>))
    .route("/categories", get(categories::list::<S>))
    .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
    .layer(TraceLayer::new_for_http())
    .with_state(catalog)
}

/// CORS for the front-end at `front_url`.
pub fn cors(front_url: &str) -> Result<CorsLayer, InvalidHeaderValue> {
  Ok(
    CorsLayer::new()
      .allow_origin(HeaderValue::from_str(front_url)?)
      .allow_methods([Method::GET, Method::HEAD, Method::POST, Method::OPTIONS])
      .allow_headers(Any),
  )
}

// ─── Integration tests ────────────────────────────────────────────────────────
