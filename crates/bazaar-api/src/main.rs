//! bazaar-server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`) and
//! `BAZAAR_*` environment variables, opens the SQLite store and the image
//! directory, and serves the catalog API over HTTP.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use bazaar_api::{Catalog, ServerConfig};
use bazaar_images::ImageStore;
use bazaar_store_sqlite::SqliteStore;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Bazaar catalog server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("BAZAAR"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  let store_path = expand_tilde(&server_cfg.store_path);
  let image_dir = expand_tilde(&server_cfg.image_dir);

  if let Some(parent) = store_path.parent().filter(|p| !p.as_os_str().is_empty()) {
    tokio::fs::create_dir_all(parent)
      .await
      .with_context(|| format!("failed to create {parent:?}"))?;
  }

  // Open SQLite store.
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  let mut images = ImageStore::new(&image_dir);
  if let Some(placeholder) = &server_cfg.placeholder_image {
    images = images.with_placeholder(expand_tilde(placeholder));
  }
  tracing::info!(
    store = %store_path.display(),
    images = %image_dir.display(),
    placeholder = %images.placeholder().display(),
    "catalog ready"
  );

  let catalog = Catalog::new(Arc::new(store), images);
  let cors = bazaar_api::cors(&server_cfg.front_url)
    .with_context(|| format!("invalid front_url {:?}", server_cfg.front_url))?;
  let app = bazaar_api::router(Arc::new(catalog)).layer(cors);
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
