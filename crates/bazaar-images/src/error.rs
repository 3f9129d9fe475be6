//! Error type for `bazaar-images`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The requested name is not acceptable; never retried.
  #[error("invalid image name {name:?}: {reason}")]
  InvalidName { name: String, reason: &'static str },

  #[error("image is empty")]
  Empty,

  #[error("failed to write image {path:?}: {source}")]
  Write {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to read image {path:?}: {source}")]
  Read {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },
}

impl Error {
  /// `true` for errors caused by the caller's input rather than the disk.
  pub fn is_invalid_input(&self) -> bool {
    matches!(self, Self::InvalidName { .. } | Self::Empty)
  }

  pub(crate) fn invalid(name: &str, reason: &'static str) -> Self {
    Self::InvalidName { name: name.to_owned(), reason }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
