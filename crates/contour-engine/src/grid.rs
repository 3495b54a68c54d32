//! Scalar grids and the sentinel-padded view the classifier works on.
//!
//! A [`Grid`] is the caller's data, validated once at construction. A
//! [`PaddedGrid`] surrounds it with a one-sample border set strictly below
//! every requested level, so every contour the tracer follows is closed.

use crate::error::{ContourError, Result};

/// Immutable rectangular grid of samples in row-major order.
///
/// Row `r`, column `c` lives at `data[r * cols + c]`. A `Grid` always has at
/// least 2 rows and 2 columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl Grid {
    /// Build a grid from nested rows, rejecting empty or ragged input.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let first = rows.first().ok_or(ContourError::EmptyGrid)?;
        let cols = first.as_ref().len();
        if cols == 0 {
            return Err(ContourError::EmptyGrid);
        }

        let mut data = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(ContourError::RaggedRows {
                    row: i,
                    expected: cols,
                    found: row.len(),
                });
            }
            data.extend_from_slice(row);
        }

        Self::checked(data, rows.len(), cols)
    }

    /// Build a grid from row-major data with explicit dimensions.
    pub fn from_flat(data: Vec<f64>, width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(ContourError::EmptyGrid);
        }
        let expected = width * height;
        if data.len() != expected {
            return Err(ContourError::DataLength {
                expected,
                found: data.len(),
            });
        }
        Self::checked(data, height, width)
    }

    fn checked(data: Vec<f64>, rows: usize, cols: usize) -> Result<Self> {
        if rows < 2 || cols < 2 {
            return Err(ContourError::TooSmall { rows, cols });
        }
        Ok(Self { data, rows, cols })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Sample at (row, col). Panics when out of range.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Minimum and maximum over the finite samples, if any.
    pub fn min_max(&self) -> Option<(f64, f64)> {
        self.data
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// Number of NaN or infinite samples.
    pub fn non_finite_count(&self) -> usize {
        self.data.iter().filter(|v| !v.is_finite()).count()
    }
}

/// A [`Grid`] surrounded by a one-sample border strictly below `min(levels)`.
///
/// The border is `min(levels) - 1`, stepped further down for levels large
/// enough that subtracting one rounds back to the level itself. Only
/// `f64::MIN` has no finite value below it; there the border equals the
/// level, which still classifies as below. Non-finite samples are replaced by the border value, which places them
/// below every requested level: no contour passes through NaN or infinite
/// data, and interpolation never sees a non-finite operand.
#[derive(Debug, Clone)]
pub struct PaddedGrid {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
    border: f64,
    replaced: usize,
}

impl PaddedGrid {
    /// Pad `grid` for the given set of levels.
    ///
    /// The levels must be non-empty and finite; they only decide the border
    /// value, so one padded grid serves every level of an extraction.
    pub fn for_levels(grid: &Grid, levels: &[f64]) -> Result<Self> {
        if levels.is_empty() {
            return Err(ContourError::NoLevels);
        }
        if let Some(&bad) = levels.iter().find(|l| !l.is_finite()) {
            return Err(ContourError::InvalidLevel(bad));
        }
        let min_level = levels.iter().copied().fold(f64::INFINITY, f64::min);
        Ok(Self::with_border(grid, border_below(min_level)))
    }

    /// Pad `grid` with an explicit border value.
    pub fn with_border(grid: &Grid, border: f64) -> Self {
        let rows = grid.rows() + 2;
        let cols = grid.cols() + 2;
        let mut data = vec![border; rows * cols];
        let mut replaced = 0;

        for r in 0..grid.rows() {
            let src = &grid.data()[r * grid.cols()..(r + 1) * grid.cols()];
            let dst = &mut data[(r + 1) * cols + 1..(r + 1) * cols + 1 + grid.cols()];
            for (d, &v) in dst.iter_mut().zip(src) {
                if v.is_finite() {
                    *d = v;
                } else {
                    replaced += 1;
                }
            }
        }

        Self {
            data,
            rows,
            cols,
            border,
            replaced,
        }
    }

    /// Padded row count (`grid.rows() + 2`).
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Padded column count (`grid.cols() + 2`).
    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn border(&self) -> f64 {
        self.border
    }

    /// How many non-finite samples were replaced by the border value.
    pub fn replaced(&self) -> usize {
        self.replaced
    }

    /// Sample at padded (row, col).
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }
}

/// A finite value strictly below `level` where one exists.
fn border_below(level: f64) -> f64 {
    let border = level - 1.0;
    if border < level {
        return border;
    }
    // |level| >= 2^53: one ulp is at most |level| * f64::EPSILON
    (level - level.abs() * f64::EPSILON).max(f64::MIN)
}
