use std::{
  fs,
  path::{Path, PathBuf},
};

use serde_json::Value;

use crate::{
  error::{Error, Result},
  ext::SamplesExt,
};

/// Latency samples in nanoseconds, one per benchmark run. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct LatencySeries(Vec<f64>);

impl LatencySeries {
  /// Returns `None` for an empty sample list.
  pub fn new(samples: Vec<f64>) -> Option<Self> {
    if samples.is_empty() {
      return None;
    }

    Some(Self(samples))
  }

  pub fn samples(&self) -> &[f64] {
    &self.0
  }
}

/// The read and write series of one event type.
#[derive(Debug, Clone, PartialEq)]
pub struct EventSeries {
  pub read: LatencySeries,
  pub write: LatencySeries,
}

/// The parsed content of one report file: event types in file order, each
/// with its read and write latencies.
#[derive(Debug, Clone)]
pub struct ReportDocument {
  path: PathBuf,
  events: Vec<(String, EventSeries)>,
}

impl ReportDocument {
  /// Builds a document from an already parsed JSON value. `path` is only used
  /// to name the source in errors.
  pub fn from_json(path: &Path, value: Value) -> Result<Self> {
    let map = match value {
      Value::Object(map) => map,
      other => {
        return Err(Error::malformed(
          path,
          format!("expected an object at the top level, found {}", kind(&other)),
        ))
      }
    };

    if map.is_empty() {
      return Err(Error::malformed(path, "no event types"));
    }

    let events = map
      .iter()
      .map(|(event, value)| -> Result<_> { Ok((event.clone(), event_series(path, event, value)?)) })
      .collect::<Result<Vec<_>>>()?;

    Ok(Self {
      path: path.to_path_buf(),
      events,
    })
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  /// Event types in the order they appear in the file.
  pub fn events(&self) -> impl Iterator<Item = (&str, &EventSeries)> {
    self.events.iter().map(|(name, series)| (name.as_str(), series))
  }

  pub fn event_count(&self) -> usize {
    self.events.len()
  }

  /// The largest single sample across every series of the document.
  pub fn peak(&self) -> f64 {
    self
      .events()
      .flat_map(|(_, series)| [series.read.samples().peak(), series.write.samples().peak()])
      .fold(f64::NEG_INFINITY, f64::max)
  }
}

/// Reads and parses the report at `path`.
///
/// # Errors
///
/// This will return an error if:
/// - the file cannot be read.
/// - the content is not an object of `"event": [[read...], [write...]]`
///   entries ([`Error::MalformedData`]).
/// - a read or write series has no samples ([`Error::EmptySeries`]).
pub fn load(path: &Path) -> Result<ReportDocument> {
  let text = fs::read_to_string(path).map_err(|error| Error::Io {
    path: path.to_path_buf(),
    error,
  })?;

  let value = serde_json::from_str(&text).map_err(|error| Error::malformed(path, error.to_string()))?;

  ReportDocument::from_json(path, value)
}

fn event_series(path: &Path, event: &str, value: &Value) -> Result<EventSeries> {
  let [read, write] = match value.as_array().map(Vec::as_slice) {
    Some([read, write]) => [read, write],
    Some(other) => {
      return Err(Error::malformed(
        path,
        format!("event {event:?}: expected a [read, write] pair, found an array of length {}", other.len()),
      ))
    }
    None => {
      return Err(Error::malformed(
        path,
        format!("event {event:?}: expected a [read, write] pair, found {}", kind(value)),
      ))
    }
  };

  let read = numbers(path, event, "read", read)?;
  let write = numbers(path, event, "write", write)?;

  Ok(EventSeries {
    read: series(path, event, "read", read)?,
    write: series(path, event, "write", write)?,
  })
}

fn numbers(path: &Path, event: &str, name: &'static str, value: &Value) -> Result<Vec<f64>> {
  let malformed = || Error::malformed(path, format!("event {event:?}: {name} series is not an array of numbers"));

  value
    .as_array()
    .ok_or_else(malformed)?
    .iter()
    .map(Value::as_f64)
    .collect::<Option<_>>()
    .ok_or_else(malformed)
}

fn series(path: &Path, event: &str, name: &'static str, samples: Vec<f64>) -> Result<LatencySeries> {
  LatencySeries::new(samples).ok_or_else(|| Error::EmptySeries {
    path: path.to_path_buf(),
    event: event.to_string(),
    series: name,
  })
}

fn kind(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "a boolean",
    Value::Number(_) => "a number",
    Value::String(_) => "a string",
    Value::Array(_) => "an array",
    Value::Object(_) => "an object",
  }
}

#[cfg(test)]
mod tests {
  use std::fs;

  use serde_json::json;
  use tempfile::TempDir;

  use super::*;

  fn write(dir: &TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("protocol-ser-test-1");
    fs::write(&path, contents).unwrap();

    path
  }

  #[test]
  fn loads_read_and_write_series() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, r#"{"evt": [[1,2,3],[4,5,6]]}"#);

    let document = load(&path).unwrap();
    let events: Vec<_> = document.events().collect();

    assert_eq!(document.path(), path);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].0, "evt");
    assert_eq!(events[0].1.read.samples(), &[1.0, 2.0, 3.0]);
    assert_eq!(events[0].1.write.samples(), &[4.0, 5.0, 6.0]);
  }

  #[test]
  fn keeps_file_order() {
    let value = json!({
      "SpawnPosition": [[1], [2]],
      "Handshake": [[3], [4]],
      "Disconnect": [[5], [6]],
    });

    let document = ReportDocument::from_json(Path::new("rw.json"), value).unwrap();
    let names: Vec<_> = document.events().map(|(name, _)| name).collect();

    assert_eq!(names, ["SpawnPosition", "Handshake", "Disconnect"]);
  }

  #[test]
  fn empty_series() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, r#"{"evt": [[],[1]]}"#);

    let error = load(&path).unwrap_err();

    assert!(matches!(error, Error::EmptySeries { ref event, series: "read", .. } if event == "evt"));
  }

  #[test]
  fn malformed_documents() {
    let dir = TempDir::new().unwrap();

    for contents in [
      "not json",
      "[[1], [2]]",
      "{}",
      r#"{"evt": [[1]]}"#,
      r#"{"evt": [[1], [2], [3]]}"#,
      r#"{"evt": [[1], "2"]}"#,
      r#"{"evt": [[1, "x"], [2]]}"#,
      r#"{"evt": 4}"#,
    ] {
      let path = write(&dir, contents);
      let error = load(&path).unwrap_err();

      assert!(matches!(error, Error::MalformedData { .. }), "{contents}: {error}");
    }
  }

  #[test]
  fn malformed_messages() {
    let message = |value| {
      ReportDocument::from_json(Path::new("rw.json"), value)
        .unwrap_err()
        .to_string()
    };

    assert_eq!(
      message(json!([1])),
      "\"rw.json\": malformed report: expected an object at the top level, found an array"
    );
    assert_eq!(
      message(json!({ "evt": [[1]] })),
      "\"rw.json\": malformed report: event \"evt\": expected a [read, write] pair, found an array of length 1"
    );
    assert_eq!(
      message(json!({ "evt": "fast" })),
      "\"rw.json\": malformed report: event \"evt\": expected a [read, write] pair, found a string"
    );
  }

  #[test]
  fn peak_spans_all_series() {
    let value = json!({
      "a": [[1, 20], [3]],
      "b": [[4], [5, 6.5]],
    });

    let document = ReportDocument::from_json(Path::new("rw.json"), value).unwrap();

    assert_eq!(document.peak(), 20.0);
  }

  #[test]
  fn rejects_empty_samples() {
    assert!(LatencySeries::new(Vec::new()).is_none());
    assert_eq!(LatencySeries::new(vec![1.0]).unwrap().samples(), &[1.0]);
  }
}
