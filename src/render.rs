use std::{
  io::Write,
  path::{Path, PathBuf},
};

use log::{error, info, warn};

use crate::{
  discover::discover,
  error::{Error, Result},
  format,
  grid::{ChartGrid, Layout},
  report::{self, ReportDocument},
  stats,
  surface::Surface,
};

/// Where to look for reports and how to lay them out.
#[derive(Debug, Clone)]
pub struct Config {
  /// Directory scanned for report files.
  pub dir: PathBuf,
  /// File name prefix identifying a report.
  pub prefix: String,
  pub layout: Layout,
}

/// Outcome of a [`Renderer::run`].
#[derive(Debug, Default)]
pub struct RunSummary {
  pub rendered: Vec<PathBuf>,
  pub failed: Vec<(PathBuf, Error)>,
}

/// Renders every report of a directory: summary lines go to `sink`, chart
/// grids to `surface`.
pub struct Renderer<S, W> {
  config: Config,
  surface: S,
  sink: W,
}

impl<S: Surface, W: Write> Renderer<S, W> {
  pub fn new(config: Config, surface: S, sink: W) -> Self {
    Self { config, surface, sink }
  }

  /// Renders one document. Summary lines reach the sink only once the grid
  /// has been presented, so a document that fails anywhere produces no
  /// output at all.
  ///
  /// # Errors
  ///
  /// This will return an error if:
  /// - the event types do not fit the grid ([`Error::GridOverflow`]).
  /// - drawing the grid or writing the summaries fails.
  pub fn render(&mut self, document: &ReportDocument) -> Result<()> {
    let grid = ChartGrid::layout(document, self.config.layout)?;
    let summaries = stats::summarize_document(document);

    let mut lines = Vec::new();
    format::write_summaries(&mut lines, &summaries)
      .map_err(|error| Error::render(document.path(), format!("{error:#}")))?;

    self.surface.present(document.path(), &grid)?;

    self
      .sink
      .write_all(&lines)
      .and_then(|()| self.sink.flush())
      .map_err(|error| Error::render(document.path(), error))
  }

  fn load_and_render(&mut self, path: &Path) -> Result<()> {
    let document = report::load(path)?;
    info!("rendering {path:?} ({} event types)", document.event_count());

    self.render(&document)
  }

  /// Renders every report in the configured directory. A report that fails
  /// to load or render is logged and recorded in the returned summary, and
  /// the run moves on to the next one.
  ///
  /// # Errors
  ///
  /// This will return an error if:
  /// - the report directory cannot be listed.
  pub fn run(&mut self) -> Result<RunSummary> {
    let reports = discover(&self.config.dir, &self.config.prefix)?;
    if reports.is_empty() {
      warn!(
        "no {:?} reports found in {:?}",
        self.config.prefix, self.config.dir
      );
    }

    let mut summary = RunSummary::default();
    for path in reports {
      match self.load_and_render(&path) {
        Ok(()) => summary.rendered.push(path),
        Err(err) if err.is_fatal() => return Err(err),
        Err(err) => {
          error!("skipping {path:?}: {err}");
          summary.failed.push((path, err));
        }
      }
    }

    Ok(summary)
  }
}
