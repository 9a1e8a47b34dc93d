mod discover;
mod error;
mod ext;
mod format;
mod grid;
mod render;
mod report;
mod stats;
mod surface;

use std::{
  io::{self, IsTerminal},
  path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, LevelFilter};

use self::{
  grid::Layout,
  render::{Config, Renderer},
  surface::{PlottersSurface, Presentation},
};

/// Charts read and write latencies from protocol serialization benchmark
/// reports and prints their averages.
#[derive(Parser, Debug)]
struct Args {
  /// Directory containing the benchmark reports.
  #[arg(long, default_value = "./target")]
  dir: PathBuf,
  /// File name prefix of a benchmark report.
  #[arg(long, default_value = "protocol-ser-test-")]
  prefix: String,
  /// How to size the chart grid when the event count is not a square.
  #[arg(long, value_enum, default_value_t)]
  layout: Layout,
  /// Command used to show a rendered grid. Defaults to the platform opener.
  #[arg(long, conflicts_with = "headless")]
  viewer: Option<String>,
  /// Render without showing anything.
  #[arg(long)]
  headless: bool,
  /// Width of a rendered grid, in pixels.
  #[arg(long, default_value_t = 1600)]
  width: u32,
  /// Height of a rendered grid, in pixels.
  #[arg(long, default_value_t = 1200)]
  height: u32,
  /// Log debug output.
  #[arg(short, long)]
  verbose: bool,
}

fn main() -> Result<()> {
  let args = Args::parse();

  env_logger::Builder::new()
    .filter_level(if args.verbose {
      LevelFilter::Debug
    } else {
      LevelFilter::Info
    })
    .parse_default_env()
    .init();

  let viewing = !args.headless;
  let presentation = if args.headless {
    Presentation::Headless
  } else {
    Presentation::Viewer(args.viewer.unwrap_or_else(|| surface::default_viewer().to_string()))
  };

  let config = Config {
    dir: args.dir,
    prefix: args.prefix,
    layout: args.layout,
  };

  let surface = PlottersSurface::new((args.width, args.height), presentation).context("bitmap dir")?;
  let mut renderer = Renderer::new(config, surface, io::stdout().lock());
  let summary = renderer.run().context("run")?;

  info!(
    "rendered {} reports, {} failed",
    summary.rendered.len(),
    summary.failed.len()
  );

  // viewers may still be reading bitmaps, which are removed with the surface
  if viewing && !summary.rendered.is_empty() && io::stdin().is_terminal() {
    eprintln!("press enter to close");
    io::stdin().read_line(&mut String::new()).context("read stdin")?;
  }

  drop(renderer);

  Ok(())
}
