use std::io::Write;

use anyhow::Result;

use crate::stats::SeriesSummary;

fn format_summary(summary: &SeriesSummary) -> String {
  let SeriesSummary {
    event,
    read_mean,
    write_mean,
  } = summary;

  format!("[{event}] Average Read: {read_mean}\n[{event}] Average Write: {write_mean}")
}

/// Writes the read and write averages of every summary to `sink`, one line
/// each, in the given order.
pub fn write_summaries<W: Write>(sink: &mut W, summaries: &[SeriesSummary]) -> Result<()> {
  for summary in summaries {
    writeln!(sink, "{}", format_summary(summary))?;
  }

  sink.flush()?;

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn average_lines() {
    let summaries = [
      SeriesSummary {
        event: "evt".to_string(),
        read_mean: 2.0,
        write_mean: 5.5,
      },
      SeriesSummary {
        event: "Handshake".to_string(),
        read_mean: 312.25,
        write_mean: 140.0,
      },
    ];

    let mut sink = Vec::new();
    write_summaries(&mut sink, &summaries).unwrap();

    assert_eq!(
      String::from_utf8(sink).unwrap(),
      "[evt] Average Read: 2\n\
       [evt] Average Write: 5.5\n\
       [Handshake] Average Read: 312.25\n\
       [Handshake] Average Write: 140\n"
    );
  }
}
