//! Per-level orchestration: pad, classify, trace and scale.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::cell::classify;
use crate::error::{ContourError, Result};
use crate::grid::{Grid, PaddedGrid};
use crate::path::Path;
use crate::trace::{trace_paths, EPSILON};

/// Closed polygons extracted for one level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelContours {
    pub level: f64,
    pub paths: Vec<Path>,
}

impl LevelContours {
    /// Total number of points over all paths.
    pub fn point_count(&self) -> usize {
        self.paths.iter().map(Path::len).sum()
    }
}

/// Extracts iso-level polygons from a grid.
///
/// Output coordinates place raw sample (row r, col c) at
/// `((c + 0.5) * width / cols, (r + 0.5) * height / rows)`, so the grid's
/// samples tile the `width` x `height` output box. Contours around data that
/// reaches the grid edge close up to half a sample outside that box.
#[derive(Debug, Clone)]
pub struct ContourExtractor {
    parallel: bool,
}

impl Default for ContourExtractor {
    fn default() -> Self {
        Self { parallel: true }
    }
}

impl ContourExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process levels on the rayon pool (the default) or one after another.
    ///
    /// Both modes produce identical output.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Extract one polygon set per level, in the order the levels are given.
    pub fn extract(
        &self,
        grid: &Grid,
        levels: &[f64],
        width: f64,
        height: f64,
    ) -> Result<Vec<LevelContours>> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(ContourError::InvalidOutputSize { width, height });
        }
        if levels.is_empty() {
            return Ok(Vec::new());
        }

        let padded = PaddedGrid::for_levels(grid, levels)?;
        let scale = (width / grid.cols() as f64, height / grid.rows() as f64);

        tracing::debug!(
            rows = grid.rows(),
            cols = grid.cols(),
            num_levels = levels.len(),
            non_finite = padded.replaced(),
            border = padded.border(),
            parallel = self.parallel,
            "extract contours input"
        );

        let contours: Vec<LevelContours> = if self.parallel {
            levels
                .par_iter()
                .map(|&level| extract_level(&padded, level, scale))
                .collect::<Result<_>>()?
        } else {
            levels
                .iter()
                .map(|&level| extract_level(&padded, level, scale))
                .collect::<Result<_>>()?
        };

        tracing::debug!(
            num_paths = contours.iter().map(|c| c.paths.len()).sum::<usize>(),
            total_points = contours.iter().map(LevelContours::point_count).sum::<usize>(),
            "extracted contours"
        );

        Ok(contours)
    }
}

/// Classify, trace and scale a single level against a shared padded grid.
pub fn extract_level(padded: &PaddedGrid, level: f64, scale: (f64, f64)) -> Result<LevelContours> {
    let mut cells = classify(padded, level);
    let paths: Vec<Path> = trace_paths(&mut cells)?
        .iter()
        .filter_map(|path| to_output_space(path, scale))
        .collect();

    tracing::trace!(level, num_paths = paths.len(), "traced level");

    Ok(LevelContours { level, paths })
}

/// Padded-cell coordinates to output coordinates.
///
/// Padded sample (r + 1, c + 1) is raw sample (r, c), whose grid-space
/// position is (c + 0.5, r + 0.5). Scaling can pull distinct grid-space
/// points within [`EPSILON`] of each other, so the ring is rebuilt in
/// output space and dropped if it collapses.
fn to_output_space(path: &Path, (sx, sy): (f64, f64)) -> Option<Path> {
    let scaled = path.translated(-0.5, -0.5).scaled(sx, sy);
    Path::closed_ring(scaled.points, EPSILON)
}

/// Convenience wrapper: validate nested rows and extract with defaults.
pub fn extract_contours<R: AsRef<[f64]>>(
    rows: &[R],
    levels: &[f64],
    width: f64,
    height: f64,
) -> Result<Vec<LevelContours>> {
    let grid = Grid::from_rows(rows)?;
    ContourExtractor::new().extract(&grid, levels, width, height)
}
