use std::{
  fs,
  io::ErrorKind,
  path::{Path, PathBuf},
};

use log::debug;

use crate::error::{Error, Result};

/// Lists the report files in `dir`, which are the entries whose file name
/// starts with `prefix`. The order is whatever the filesystem returns.
///
/// # Errors
///
/// This will return an error if:
/// - `dir` does not exist ([`Error::NotFound`]).
/// - `dir` or one of its entries cannot be read.
pub fn discover(dir: &Path, prefix: &str) -> Result<Vec<PathBuf>> {
  let entries = fs::read_dir(dir).map_err(|error| match error.kind() {
    ErrorKind::NotFound => Error::NotFound { path: dir.to_path_buf() },
    _ => Error::Io {
      path: dir.to_path_buf(),
      error,
    },
  })?;

  let mut reports = Vec::new();
  for entry in entries {
    let entry = entry.map_err(|error| Error::Io {
      path: dir.to_path_buf(),
      error,
    })?;

    if entry.file_name().to_string_lossy().starts_with(prefix) {
      reports.push(entry.path());
    } else {
      debug!("ignoring {:?}", entry.path());
    }
  }

  Ok(reports)
}
