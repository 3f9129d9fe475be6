//! Lexical validation of requested image names.

use std::{
  ffi::OsStr,
  path::{Component, Path, PathBuf},
};

use crate::{Error, IMAGE_EXTENSION, Result};

/// Normalise `name` into a path relative to the image root.
///
/// `.` segments are dropped and `..` segments consume the previous segment.
/// A `..` with nothing left to consume, an absolute path, or any extension
/// other than [`IMAGE_EXTENSION`] is rejected.
pub fn normalize(name: &str) -> Result<PathBuf> {
  if name.is_empty() {
    return Err(Error::invalid(name, "file name is required"));
  }

  let mut relative = PathBuf::new();
  for component in Path::new(name).components() {
    match component {
      Component::Normal(part) => relative.push(part),
      Component::CurDir => {}
      Component::ParentDir => {
        if !relative.pop() {
          return Err(Error::invalid(name, "path escapes the image directory"));
        }
      }
      Component::RootDir | Component::Prefix(_) => {
        return Err(Error::invalid(name, "absolute paths are not allowed"));
      }
    }
  }

  if relative.extension().and_then(OsStr::to_str) != Some(IMAGE_EXTENSION) {
    return Err(Error::invalid(name, "image path does not end with .jpg"));
  }

  Ok(relative)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn plain_name_is_kept() {
    assert_eq!(normalize("abc.jpg").unwrap(), PathBuf::from("abc.jpg"));
  }

  #[test]
  fn inner_parent_segments_are_folded() {
    assert_eq!(normalize("a/./../b.jpg").unwrap(), PathBuf::from("b.jpg"));
  }

  #[test]
  fn traversal_is_rejected() {
    for name in ["../../etc/passwd", "../secret.jpg", "a/../../b.jpg", ".."] {
      let err = normalize(name).unwrap_err();
      assert!(err.is_invalid_input(), "{name}: {err}");
    }
  }

  #[test]
  fn absolute_path_is_rejected() {
    assert!(normalize("/etc/passwd.jpg").unwrap_err().is_invalid_input());
  }

  #[test]
  fn wrong_extension_is_rejected() {
    for name in ["photo.png", "photo", "photo.JPG", "photo.jpg.exe"] {
      assert!(normalize(name).unwrap_err().is_invalid_input(), "{name}");
    }
  }

  #[test]
  fn empty_name_is_rejected() {
    assert!(normalize("").unwrap_err().is_invalid_input());
  }
}
