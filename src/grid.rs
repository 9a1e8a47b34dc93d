use crate::{
  error::{Error, Result},
  report::ReportDocument,
};

/// Lower bound of every chart's y axis, in nanoseconds.
pub const Y_FLOOR: f64 = 100.0;
/// Headroom added above the largest sample of a document, in nanoseconds.
pub const Y_PADDING: f64 = 2500.0;

/// How a grid is sized for a given number of event types.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Layout {
  /// `ceil(sqrt(n))` rows by `floor(sqrt(n))` columns. Reports that do not
  /// fit are rejected.
  #[default]
  Strict,
  /// `ceil(sqrt(n))` rows and as many columns as needed to fit every event.
  Fit,
}

impl Layout {
  /// Returns `(rows, columns)` for `events` event types.
  pub fn dimensions(self, events: usize) -> (usize, usize) {
    let root = (events as f64).sqrt();
    let rows = root.ceil() as usize;

    match self {
      Layout::Strict => (rows, root.floor() as usize),
      Layout::Fit => (rows, events.div_ceil(rows.max(1))),
    }
  }
}

/// The y axis shared by every cell of a grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YRange {
  pub low: f64,
  pub high: f64,
}

impl YRange {
  pub fn of(document: &ReportDocument) -> Self {
    Self {
      low: Y_FLOOR,
      high: document.peak() + Y_PADDING,
    }
  }
}

/// One chart: an event type and its two series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell<'a> {
  pub event: &'a str,
  pub read: &'a [f64],
  pub write: &'a [f64],
}

impl Cell<'_> {
  /// Number of runs on the x axis, the longer of the two series.
  pub fn runs(&self) -> usize {
    self.read.len().max(self.write.len())
  }
}

/// A `rows x columns` arrangement of charts for one document, filled in row
/// major order. Trailing cells are empty when the document has fewer event
/// types than the grid has cells.
#[derive(Debug, Clone)]
pub struct ChartGrid<'a> {
  cells: Vec<Vec<Option<Cell<'a>>>>,
  columns: usize,
  y_range: YRange,
}

impl<'a> ChartGrid<'a> {
  /// Lays out every event type of `document`.
  ///
  /// # Errors
  ///
  /// This will return an error if:
  /// - the layout has fewer cells than the document has event types
  ///   ([`Error::GridOverflow`]).
  pub fn layout(document: &'a ReportDocument, layout: Layout) -> Result<Self> {
    let events = document.event_count();
    let (rows, columns) = layout.dimensions(events);

    if events > rows * columns {
      return Err(Error::GridOverflow {
        path: document.path().to_path_buf(),
        events,
        rows,
        columns,
      });
    }

    let mut cells = vec![vec![None; columns]; rows];
    for (i, (event, series)) in document.events().enumerate() {
      cells[i / columns][i % columns] = Some(Cell {
        event,
        read: series.read.samples(),
        write: series.write.samples(),
      });
    }

    Ok(Self {
      cells,
      columns,
      y_range: YRange::of(document),
    })
  }

  pub fn rows(&self) -> usize {
    self.cells.len()
  }

  pub fn columns(&self) -> usize {
    self.columns
  }

  pub fn y_range(&self) -> YRange {
    self.y_range
  }

  /// Every slot of the grid in row major order, including empty ones.
  pub fn slots(&self) -> impl Iterator<Item = Option<&Cell<'a>>> {
    self.cells.iter().flatten().map(Option::as_ref)
  }
}
