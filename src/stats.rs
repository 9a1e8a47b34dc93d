use crate::{
  ext::SamplesExt,
  report::{LatencySeries, ReportDocument},
};

/// Mean latency of a series, in nanoseconds.
pub fn summarize(series: &LatencySeries) -> f64 {
  series.samples().mean()
}

/// Mean read and write latency for a single event type.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSummary {
  pub event: String,
  pub read_mean: f64,
  pub write_mean: f64,
}

/// Summaries for every event type of a document, in document order.
pub fn summarize_document(document: &ReportDocument) -> Vec<SeriesSummary> {
  document
    .events()
    .map(|(event, series)| SeriesSummary {
      event: event.to_string(),
      read_mean: summarize(&series.read),
      write_mean: summarize(&series.write),
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use std::path::Path;

  use serde_json::json;

  use super::*;

  fn series(samples: &[f64]) -> LatencySeries {
    LatencySeries::new(samples.to_vec()).unwrap()
  }

  #[test]
  fn mean_is_sum_over_count() {
    for samples in [
      vec![1.0],
      vec![1.0, 2.0, 3.0],
      vec![120.5, 98.25, 4000.0, 311.0, 7.75],
      (0..50_000).map(|i| (i % 977) as f64 + 0.1).collect(),
    ] {
      let expected = samples.iter().sum::<f64>() / samples.len() as f64;

      assert!((summarize(&series(&samples)) - expected).abs() < 1e-9);
    }
  }

  #[test]
  fn document_summaries() {
    let value = json!({
      "evt": [[1, 2, 3], [4, 5, 6]],
      "Handshake": [[10], [20, 40]],
    });
    let document = ReportDocument::from_json(Path::new("rw.json"), value).unwrap();

    assert_eq!(
      summarize_document(&document),
      vec![
        SeriesSummary {
          event: "evt".to_string(),
          read_mean: 2.0,
          write_mean: 5.0,
        },
        SeriesSummary {
          event: "Handshake".to_string(),
          read_mean: 10.0,
          write_mean: 30.0,
        },
      ]
    );
  }
}
