//! Error types for grid construction.
//!
//! Algorithmic outcomes such as "no path" or out-of-bounds probes are values,
//! not errors. The only fallible operations in this crate build grids from
//! caller-supplied data.

use crate::state::{CellState, MapDimensions, Position};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// Width or height is zero.
    #[error("grid dimensions must be non-zero, got {0:?}")]
    EmptyDimensions(MapDimensions),

    /// Cell buffer length does not match `width * height`.
    #[error("expected {expected} cells for {dimensions:?}, got {actual}")]
    DimensionMismatch {
        dimensions: MapDimensions,
        expected: usize,
        actual: usize,
    },

    /// Text rows have differing lengths.
    #[error("row {row} has length {actual}, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// A ground-truth map may only contain Empty and Wall cells.
    #[error("invalid terrain {state:?} at {position:?}")]
    InvalidTerrain {
        position: Position,
        state: CellState,
    },

    /// Unknown glyph in a text map.
    #[error("unknown map glyph {glyph:?} at {position:?}")]
    UnknownGlyph { position: Position, glyph: char },

    /// Numeric cell code outside the known range.
    #[error("unknown cell code {0}")]
    UnknownCellCode(i8),
}
