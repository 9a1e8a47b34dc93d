use std::{path::Path, process::Command};

use log::{debug, info};
use plotters::{coord::Shift, drawing::DrawingAreaErrorKind, prelude::*};
use tempfile::TempDir;

use crate::{
  error::{Error, Result},
  ext::CommandExt,
  grid::{ChartGrid, YRange},
};

const READ_COLOUR: RGBColor = RGBColor(0x1f, 0x77, 0xb4);
const WRITE_COLOUR: RGBColor = RGBColor(0xff, 0x7f, 0x0e);

/// Where finished chart grids end up.
pub trait Surface {
  /// Draws every cell of `grid` and shows the result. `report` names the
  /// source file in errors. Nothing is shown when any cell fails to draw.
  fn present(&mut self, report: &Path, grid: &ChartGrid) -> Result<()>;
}

/// How a [`PlottersSurface`] shows a drawn grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Presentation {
  /// Hand the bitmap to an external viewer command.
  Viewer(String),
  /// Draw into memory and discard.
  Headless,
}

/// The platform's "open this file" command.
pub fn default_viewer() -> &'static str {
  if cfg!(target_os = "macos") {
    "open"
  } else if cfg!(windows) {
    "explorer"
  } else {
    "xdg-open"
  }
}

/// Draws grids with `plotters` into a bitmap of a fixed size.
pub struct PlottersSurface {
  size: (u32, u32),
  output: Output,
}

enum Output {
  /// Bitmaps live in `bitmaps` until the surface is dropped.
  Viewer {
    command: String,
    bitmaps: TempDir,
    drawn: usize,
  },
  Headless,
}

impl PlottersSurface {
  /// # Errors
  ///
  /// This will return an error if:
  /// - the temporary directory for viewer bitmaps cannot be created.
  pub fn new(size: (u32, u32), presentation: Presentation) -> Result<Self, std::io::Error> {
    let output = match presentation {
      Presentation::Viewer(command) => Output::Viewer {
        command,
        bitmaps: TempDir::with_prefix("latency-report-")?,
        drawn: 0,
      },
      Presentation::Headless => Output::Headless,
    };

    Ok(Self { size, output })
  }

  fn headless(size: (u32, u32), report: &Path, grid: &ChartGrid) -> Result<()> {
    let (width, height) = size;
    let mut buffer = vec![0u8; width as usize * height as usize * 3];

    let root = BitMapBackend::with_buffer(&mut buffer, size).into_drawing_area();
    draw_grid(&root, grid).map_err(|error| Error::render(report, error))?;

    debug!("drew {report:?} into memory");

    Ok(())
  }

  fn viewer(size: (u32, u32), command: &str, bitmap: &Path, report: &Path, grid: &ChartGrid) -> Result<()> {
    {
      let root = BitMapBackend::new(bitmap, size).into_drawing_area();
      draw_grid(&root, grid).map_err(|error| Error::render(report, error))?;
    }

    let mut args = command.split_whitespace();
    let program = args
      .next()
      .ok_or_else(|| Error::render(report, "empty viewer command"))?;

    info!("presenting {report:?} with {program}");

    Command::new(program)
      .args(args)
      .arg(bitmap)
      .check_success()
      .map_err(|error| Error::render(report, format!("{error:#}")))
  }
}

impl Surface for PlottersSurface {
  fn present(&mut self, report: &Path, grid: &ChartGrid) -> Result<()> {
    match &mut self.output {
      Output::Headless => Self::headless(self.size, report, grid),
      Output::Viewer {
        command,
        bitmaps,
        drawn,
      } => {
        *drawn += 1;
        let bitmap = bitmaps.path().join(format!("{drawn}.png"));

        Self::viewer(self.size, command, &bitmap, report, grid)
      }
    }
  }
}

/// Splits `root` into the grid's cells and draws a read/write chart in each
/// populated one, all on the grid's shared y axis.
fn draw_grid<DB: DrawingBackend>(
  root: &DrawingArea<DB, Shift>,
  grid: &ChartGrid,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
  root.fill(&WHITE)?;

  let YRange { low, high } = grid.y_range();
  let areas = root.split_evenly((grid.rows(), grid.columns()));

  for (area, cell) in areas.iter().zip(grid.slots()) {
    let Some(cell) = cell else {
      continue;
    };

    let last_run = cell.runs().max(2) - 1;

    let mut chart = ChartBuilder::on(area)
      .caption(cell.event, ("sans-serif", 20))
      .margin(10)
      .x_label_area_size(35)
      .y_label_area_size(60)
      .build_cartesian_2d(0..last_run, low..high)?;

    chart.configure_mesh().x_desc("Run").y_desc("ns").draw()?;

    for (label, samples, colour) in [("Read", cell.read, READ_COLOUR), ("Write", cell.write, WRITE_COLOUR)] {
      chart
        .draw_series(LineSeries::new(samples.iter().copied().enumerate(), colour))?
        .label(label)
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], colour));
    }

    chart
      .configure_series_labels()
      .background_style(WHITE.mix(0.8))
      .border_style(BLACK)
      .draw()?;
  }

  root.present()
}
