//! # Errors
//!
//! Layout and registration problems surface as [`FocusError`]. They are all
//! configuration errors: raised synchronously to whoever built the grid or
//! registered a coordinate, and never produced by navigation itself. A move
//! that goes nowhere just leaves the state unchanged.

use thiserror::Error;

use super::geometry::Coord;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum FocusError {
    #[error("no active cell specified")]
    MissingActiveCell,

    #[error("grid has no rows")]
    EmptyGrid,

    #[error("cell name at ({x}, {y}) is empty")]
    EmptyCellName { x: usize, y: usize },

    #[error("row {row} has {found} columns, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("active cell `{0}` does not appear in the grid")]
    UnknownActiveCell(String),

    #[error("focusable element in cell `{cell}` has no focus index")]
    MissingFocusIndex { cell: String },

    #[error("focus index {coord} in cell `{cell}` is negative")]
    NegativeCoord { cell: String, coord: Coord },
}

impl FocusError {
    /// True for errors caused by a bad layout or registration (currently all of them).
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            FocusError::MissingActiveCell
                | FocusError::EmptyGrid
                | FocusError::EmptyCellName { .. }
                | FocusError::RaggedRow { .. }
                | FocusError::UnknownActiveCell(_)
                | FocusError::MissingFocusIndex { .. }
                | FocusError::NegativeCoord { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ragged_row_message() {
        let err = FocusError::RaggedRow {
            row: 1,
            expected: 3,
            found: 2,
        };
        assert_eq!(err.to_string(), "row 1 has 2 columns, expected 3");
    }

    #[test]
    fn test_negative_coord_message_uses_coord_display() {
        let err = FocusError::NegativeCoord {
            cell: "A".into(),
            coord: Coord::new(-1, 0),
        };
        assert_eq!(err.to_string(), "focus index (-1, 0) in cell `A` is negative");
        assert!(err.is_configuration());
    }
}
