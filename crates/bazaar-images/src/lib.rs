//! Content-addressed photo storage for Bazaar.
//!
//! Photos are written under a single root directory, named by the SHA-256 of
//! their bytes. The write path deduplicates by that name; the read path
//! rejects names that leave the root and falls back to a placeholder image
//! when a valid name has no file behind it.

mod digest;
mod path;
mod store;

pub mod error;

pub use digest::file_name_for;
pub use error::{Error, Result};
pub use store::{ImageStore, ResolvedImage, StoredImage};

/// The only extension stored or served.
pub const IMAGE_EXTENSION: &str = "jpg";

/// File name of the placeholder, relative to the image root, used when no
/// other placeholder path is configured.
pub const PLACEHOLDER_NAME: &str = "default.jpg";
