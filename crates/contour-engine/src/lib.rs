//! Iso-level contour extraction for gridded scalar data.
//!
//! Marching squares over a sentinel-padded grid, with saddle resolution by
//! centre average and cell-to-cell path stitching into closed polygons:
//! - `grid`: validated input grid and its padded view
//! - `cell`: case classification, edge interpolation and side lookup tables
//! - `trace`: path stitching
//! - `extract`: per-level orchestration and output scaling

pub mod cell;
pub mod config;
pub mod error;
pub mod extract;
pub mod grid;
pub mod levels;
pub mod path;
pub mod render;
pub mod trace;

pub use config::ContourConfig;
pub use error::{ContourError, Result};
pub use extract::{extract_contours, ContourExtractor, LevelContours};
pub use grid::{Grid, PaddedGrid};
pub use levels::generate_contour_levels;
pub use path::{Path, Point};
