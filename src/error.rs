use std::path::PathBuf;

/// Failures while discovering, loading or rendering reports.
///
/// Only directory-level failures are fatal; everything else is scoped to a
/// single report file and is reported by [`crate::render::Renderer::run`]
/// before moving on to the next one.
#[derive(Debug, thiserror::Error)]
pub enum Error {
  #[error("report directory {path:?} does not exist")]
  NotFound { path: PathBuf },

  #[error("{path:?}: {error}")]
  Io { path: PathBuf, error: std::io::Error },

  #[error("{path:?}: malformed report: {reason}")]
  MalformedData { path: PathBuf, reason: String },

  #[error("{path:?}: event {event:?} has an empty {series} series")]
  EmptySeries {
    path: PathBuf,
    event: String,
    series: &'static str,
  },

  #[error("{path:?}: {events} event types do not fit a {rows}x{columns} grid")]
  GridOverflow {
    path: PathBuf,
    events: usize,
    rows: usize,
    columns: usize,
  },

  #[error("{path:?}: render: {reason}")]
  Render { path: PathBuf, reason: String },
}

impl Error {
  /// Whether the whole run must stop, rather than just the current report.
  pub fn is_fatal(&self) -> bool {
    matches!(self, Error::NotFound { .. })
  }

  pub fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
    Error::MalformedData {
      path: path.into(),
      reason: reason.into(),
    }
  }

  pub fn render(path: impl Into<PathBuf>, reason: impl std::fmt::Display) -> Self {
    Error::Render {
      path: path.into(),
      reason: reason.to_string(),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn only_missing_directory_is_fatal() {
    assert!(Error::NotFound { path: "target".into() }.is_fatal());
    assert!(!Error::malformed("a.json", "not an object").is_fatal());
    assert!(!Error::render("a.json", "no font").is_fatal());
  }

  #[test]
  fn messages_name_the_file() {
    let error = Error::EmptySeries {
      path: "target/protocol-ser-test-1".into(),
      event: "Handshake".into(),
      series: "read",
    };

    assert_eq!(
      error.to_string(),
      "\"target/protocol-ser-test-1\": event \"Handshake\" has an empty read series"
    );
  }
}
