//! Content digest → file name.

use sha2::{Digest, Sha256};

use crate::IMAGE_EXTENSION;

/// The file name `bytes` are stored under: lowercase hex SHA-256 plus the
/// image extension.
///
/// Pure: equal bytes always give the same name.
pub fn file_name_for(bytes: &[u8]) -> String {
  let mut hasher = Sha256::new();
  hasher.update(bytes);
  format!("{}.{IMAGE_EXTENSION}", hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn name_is_hex_digest_with_extension() {
    assert_eq!(
      file_name_for(b"abc"),
      "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad.jpg"
    );
  }

  #[test]
  fn different_bytes_give_different_names() {
    assert_ne!(file_name_for(b"photo one"), file_name_for(b"photo two"));
  }
}
