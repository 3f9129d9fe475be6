//! [`ImageStore`]: write-once storage and guarded retrieval.

use std::{
  io::ErrorKind,
  path::{Path, PathBuf},
  sync::atomic::{AtomicU64, Ordering},
};

use crate::{Error, PLACEHOLDER_NAME, Result, digest::file_name_for, path::normalize};

/// Counter for temporary file names; unique within the process.
static TMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// Result of [`ImageStore::store`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
  /// Name relative to the image root.
  pub file_name: String,
  /// `false` when the content was already on disk and nothing was written.
  pub created:   bool,
}

/// Where a requested image name points after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedImage {
  Stored(PathBuf),
  /// The name was valid but no file exists for it.
  Placeholder(PathBuf),
}

impl ResolvedImage {
  pub fn path(&self) -> &Path {
    match self {
      Self::Stored(p) | Self::Placeholder(p) => p,
    }
  }

  pub fn is_placeholder(&self) -> bool { matches!(self, Self::Placeholder(_)) }
}

/// Photos on disk under a single root directory.
///
/// Cloning is cheap; the store holds only paths.
#[derive(Debug, Clone)]
pub struct ImageStore {
  root:        PathBuf,
  placeholder: PathBuf,
}

impl ImageStore {
  /// A store rooted at `root`, with the placeholder at
  /// `root/`[`PLACEHOLDER_NAME`].
  pub fn new(root: impl Into<PathBuf>) -> Self {
    let root = root.into();
    let placeholder = root.join(PLACEHOLDER_NAME);
    Self { root, placeholder }
  }

  /// Serve `path` on soft misses instead of the default placeholder.
  pub fn with_placeholder(mut self, path: impl Into<PathBuf>) -> Self {
    self.placeholder = path.into();
    self
  }

  pub fn placeholder(&self) -> &Path { &self.placeholder }

  // ── Write path ──────────────────────────────────────────────────────────

  /// Persist `bytes` under their content-derived name.
  ///
  /// If a file with that name already exists nothing is written. New content
  /// goes to a temporary file first and is renamed into place, so a reader
  /// never sees a half-written image; two racing writers of the same bytes
  /// both rename identical content onto the same name.
  pub async fn store(&self, bytes: &[u8]) -> Result<StoredImage> {
    if bytes.is_empty() {
      return Err(Error::Empty);
    }

    let file_name = file_name_for(bytes);
    let path = self.root.join(&file_name);

    let exists = tokio::fs::try_exists(&path)
      .await
      .map_err(|source| Error::Write { path: path.clone(), source })?;
    if exists {
      tracing::debug!(%file_name, "image already stored");
      return Ok(StoredImage { file_name, created: false });
    }

    tokio::fs::create_dir_all(&self.root)
      .await
      .map_err(|source| Error::Write { path: self.root.clone(), source })?;

    let seq = TMP_SEQ.fetch_add(1, Ordering::Relaxed);
    let tmp = self
      .root
      .join(format!(".{file_name}.{}.{seq}.tmp", std::process::id()));

    if let Err(source) = write_then_rename(&tmp, &path, bytes).await {
      // Best effort; the write error is what the caller needs.
      let _ = tokio::fs::remove_file(&tmp).await;
      return Err(Error::Write { path, source });
    }

    tracing::info!(%file_name, size = bytes.len(), "stored image");
    Ok(StoredImage { file_name, created: true })
  }

  // ── Read path ───────────────────────────────────────────────────────────

  /// Validate `file_name` and map it to a path on disk.
  ///
  /// Invalid names (empty, absolute, escaping the root, wrong extension) are
  /// errors. A valid name with no file behind it resolves to the placeholder.
  pub async fn resolve(&self, file_name: &str) -> Result<ResolvedImage> {
    let relative = normalize(file_name)?;
    let path = self.root.join(relative);

    let real = match tokio::fs::canonicalize(&path).await {
      Ok(real) => real,
      // A stored file used as a directory (`<digest>.jpg/x.jpg`) is a miss too.
      Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => {
        tracing::debug!(file_name, "image not found; using placeholder");
        return Ok(ResolvedImage::Placeholder(self.placeholder.clone()));
      }
      Err(source) => return Err(Error::Read { path, source }),
    };

    // The lexical check cannot see symlinks; compare the real locations.
    let root = tokio::fs::canonicalize(&self.root)
      .await
      .map_err(|source| Error::Read { path: self.root.clone(), source })?;
    if !real.starts_with(&root) {
      return Err(Error::invalid(file_name, "path escapes the image directory"));
    }

    Ok(ResolvedImage::Stored(real))
  }

  /// The bytes behind `file_name`, or the placeholder's bytes on a soft miss.
  pub async fn read(&self, file_name: &str) -> Result<Vec<u8>> {
    let resolved = self.resolve(file_name).await?;
    tracing::info!(path = %resolved.path().display(), "returned image");
    tokio::fs::read(resolved.path())
      .await
      .map_err(|source| Error::Read { path: resolved.path().to_path_buf(), source })
  }
}

async fn write_then_rename(tmp: &Path, dest: &Path, bytes: &[u8]) -> std::io::Result<()> {
  tokio::fs::write(tmp, bytes).await?;
  tokio::fs::rename(tmp, dest).await
}
