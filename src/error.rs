//! Contract violations reported by the grid API.
//!
//! Running short of space is never an error: the solver degrades to a
//! best-effort layout instead. Everything here is a caller mistake.

use crate::geometry::Axis;

/// Errors from grid construction, structural edits and configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GridError {
    #[error("a grid needs at least one column and one row, got {ncols}x{nrows}")]
    ZeroSizeGrid { ncols: usize, nrows: usize },

    #[error("cell ({col}, {row}) is outside a {ncols}x{nrows} grid")]
    CellOutOfBounds {
        col: usize,
        row: usize,
        ncols: usize,
        nrows: usize,
    },

    #[error("{axis:?} line {index} is out of range (count {count})")]
    LineOutOfBounds { axis: Axis, index: usize, count: usize },

    #[error("cell ({col}, {row}) already holds content")]
    CellOccupied { col: usize, row: usize },

    #[error("cannot remove the last {axis:?} line of a grid")]
    LastLine { axis: Axis },

    #[error("cannot join grids along {axis:?}: expected {expected} cross lines, found {found}")]
    AxisMismatch {
        axis: Axis,
        expected: usize,
        found: usize,
    },

    #[error("unknown layout handle")]
    UnknownLayout,

    #[error("unknown widget handle")]
    UnknownWidget,

    #[error("layout is already nested inside another cell")]
    AlreadyNested,

    #[error("attaching a layout inside its own subtree would create a cycle")]
    CyclicNesting,

    #[error("size must be non-negative and finite, got {value}")]
    NegativeSize { value: f32 },

    #[error("resize weight must be non-negative and finite, got {value}")]
    InvalidWeight { value: f32 },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridError>;

/// Validate a user-supplied length.
pub(crate) fn check_size(value: f32) -> Result<f32> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(GridError::NegativeSize { value })
    }
}

/// Validate a user-supplied resize weight.
pub(crate) fn check_weight(value: f32) -> Result<f32> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(GridError::InvalidWeight { value })
    }
}
