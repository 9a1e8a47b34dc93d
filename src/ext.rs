use std::process::{Command, ExitStatus};

use anyhow::{Context, Result};

#[extend::ext(name = SamplesExt)]
pub impl [f64] {
  /// Arithmetic mean. NaN for an empty slice.
  fn mean(&self) -> f64 {
    self.iter().sum::<f64>() / self.len() as f64
  }

  /// Largest sample, or negative infinity for an empty slice.
  fn peak(&self) -> f64 {
    self.iter().copied().fold(f64::NEG_INFINITY, f64::max)
  }
}

#[extend::ext]
pub impl ExitStatus {
  fn check_success(&self) -> Result<()> {
    if !self.success() {
      anyhow::bail!("exited with {self}");
    }

    Ok(())
  }
}

#[extend::ext]
pub impl Command {
  /// Runs the command to completion, returning an error on non-zero exit.
  fn check_success(&mut self) -> Result<()> {
    let program = self.get_program().to_string_lossy().into_owned();

    self.status().with_context(|| format!("spawn {program}"))?.check_success()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn mean_and_peak() {
    let samples = [1.0, 2.0, 3.0, 10.0];

    assert_eq!(samples.mean(), 4.0);
    assert_eq!(samples.peak(), 10.0);
  }

  #[test]
  fn empty_samples() {
    let empty: [f64; 0] = [];

    assert!(empty.mean().is_nan());
    assert_eq!(empty.peak(), f64::NEG_INFINITY);
  }
}
