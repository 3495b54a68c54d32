//! Contour extraction command-line tool.
//!
//! Reads a JSON grid, extracts closed iso-level polygons and writes them as
//! JSON. Settings are layered: config file, then `CONTOUR_*` environment
//! variables, then command-line flags.

use std::fs;
use std::io::{self, BufWriter, Read, Write};

use anyhow::{Context, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use contour_engine::config::parse_levels;
use contour_engine::{ContourConfig, ContourExtractor, Grid, LevelContours};

#[derive(Parser, Debug)]
#[command(name = "contour-cli")]
#[command(about = "Extract iso-level contour polygons from a JSON grid")]
struct Args {
    /// Grid file (`{"rows": [[...], ...]}`), or `-` for stdin
    input: String,

    /// JSON configuration file
    #[arg(short, long, env = "CONTOUR_CONFIG")]
    config: Option<String>,

    /// Comma-separated contour levels
    #[arg(short, long)]
    levels: Option<String>,

    /// Generate levels at this interval over the data range
    #[arg(short, long)]
    interval: Option<f64>,

    /// Output coordinate space width
    #[arg(long)]
    width: Option<f64>,

    /// Output coordinate space height
    #[arg(long)]
    height: Option<f64>,

    /// Process levels one after another instead of in parallel
    #[arg(long)]
    sequential: bool,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<String>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,
}

/// Input grid. `null` samples mark missing data.
#[derive(Debug, Deserialize)]
struct GridFile {
    rows: Vec<Vec<Option<f64>>>,
}

impl GridFile {
    fn into_grid(self) -> contour_engine::Result<Grid> {
        let rows: Vec<Vec<f64>> = self
            .rows
            .into_iter()
            .map(|row| row.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect())
            .collect();
        Grid::from_rows(&rows)
    }
}

#[derive(Debug, Serialize)]
struct Output<'a> {
    width: f64,
    height: f64,
    contours: &'a [LevelContours],
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .json()
        .init();

    let config = load_config(&args)?;
    let grid = read_grid(&args.input)?;
    let levels = config.resolve_levels(&grid)?;

    info!(
        rows = grid.rows(),
        cols = grid.cols(),
        levels = ?levels,
        "Extracting contours"
    );

    let contours = ContourExtractor::new()
        .with_parallel(config.parallel)
        .extract(&grid, &levels, config.width, config.height)?;

    let output = Output {
        width: config.width,
        height: config.height,
        contours: &contours,
    };
    write_output(&output, args.output.as_deref(), args.pretty)?;

    info!(
        num_paths = contours.iter().map(|c| c.paths.len()).sum::<usize>(),
        "Contour extraction complete"
    );

    Ok(())
}

fn load_config(args: &Args) -> Result<ContourConfig> {
    let mut config = match &args.config {
        Some(path) => ContourConfig::from_file(path)
            .with_context(|| format!("failed to load config from {}", path))?,
        None => ContourConfig::default(),
    };
    config = config.merge_env()?;

    if let Some(levels) = &args.levels {
        config.levels = Some(parse_levels(levels)?);
    }
    if let Some(interval) = args.interval {
        config.interval = Some(interval);
        if args.levels.is_none() {
            config.levels = None;
        }
    }
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if args.sequential {
        config.parallel = false;
    }

    config.validate()?;
    Ok(config)
}

fn read_grid(input: &str) -> Result<Grid> {
    let content = if input == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read grid from stdin")?;
        buf
    } else {
        fs::read_to_string(input).with_context(|| format!("failed to read grid file {}", input))?
    };

    parse_grid(&content)
}

fn parse_grid(content: &str) -> Result<Grid> {
    let file: GridFile = serde_json::from_str(content).context("invalid grid JSON")?;
    Ok(file.into_grid()?)
}

fn write_output(output: &Output<'_>, path: Option<&str>, pretty: bool) -> Result<()> {
    let writer: Box<dyn Write> = match path {
        Some(path) => Box::new(
            fs::File::create(path).with_context(|| format!("failed to create {}", path))?,
        ),
        None => Box::new(io::stdout().lock()),
    };
    let mut writer = BufWriter::new(writer);

    if pretty {
        serde_json::to_writer_pretty(&mut writer, output)?;
    } else {
        serde_json::to_writer(&mut writer, output)?;
    }
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
