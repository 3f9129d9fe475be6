//! Error types for `bazaar-core`.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
  #[error("{0} is required")]
  MissingField(&'static str),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
