//! Error types for contour extraction.

use thiserror::Error;

use crate::cell::Side;

/// Errors that can occur during contour extraction.
#[derive(Error, Debug)]
pub enum ContourError {
    /// The grid has no rows or no columns.
    #[error("grid is empty")]
    EmptyGrid,

    /// A row's length differs from the first row's length.
    #[error("ragged grid: row {row} has {found} columns, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Contouring needs at least one 2x2 window of samples.
    #[error("grid must be at least 2x2, got {rows}x{cols}")]
    TooSmall { rows: usize, cols: usize },

    /// Flat data length does not match the declared dimensions.
    #[error("grid data length {found} does not match dimensions (expected {expected})")]
    DataLength { expected: usize, found: usize },

    /// No contour levels were supplied where at least one is required.
    #[error("no contour levels requested")]
    NoLevels,

    /// A requested level is NaN or infinite.
    #[error("contour level must be finite, got {0}")]
    InvalidLevel(f64),

    /// Output width/height must be finite and positive.
    #[error("invalid output size {width}x{height}")]
    InvalidOutputSize { width: f64, height: f64 },

    /// The tracer reached a state the lookup tables cannot resolve.
    ///
    /// This is a defect in the traversal, not a property of the input.
    #[error("malformed contour at cell ({row}, {col}): case {case_index} has no exit for side {side:?}")]
    MalformedContour {
        row: usize,
        col: usize,
        case_index: u8,
        side: Side,
    },

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Failed to read a configuration or grid file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ContourError {
    /// Create a MalformedContour error.
    pub fn malformed(row: usize, col: usize, case_index: u8, side: Side) -> Self {
        Self::MalformedContour {
            row,
            col,
            case_index,
            side,
        }
    }

    /// Create a Config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// True for errors caused by the caller's input rather than a defect.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptyGrid
                | Self::RaggedRows { .. }
                | Self::TooSmall { .. }
                | Self::DataLength { .. }
                | Self::NoLevels
                | Self::InvalidLevel(_)
                | Self::InvalidOutputSize { .. }
        )
    }
}

/// Result type for contour operations.
pub type Result<T> = std::result::Result<T, ContourError>;
