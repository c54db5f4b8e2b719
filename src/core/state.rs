//! # Navigation State
//!
//! What the engine exposes to the outside world after every mutation.
//!
//! ```text
//! NavigationState
//! ├── focus: Coord          // internal coordinate inside the active cell
//! ├── active_cell: CellId   // which cell has focus
//! └── active_entry: Coord   // grid position the active cell was entered at
//! ```
//!
//! Only the engine writes it. Observers get a shared reference or a clone,
//! never a way to change it.

use serde::{Deserialize, Serialize};

use super::direction::Direction;
use super::geometry::{CellId, Coord};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationState {
    pub focus: Coord,
    pub active_cell: CellId,
    pub active_entry: Coord,
}

impl NavigationState {
    /// True when the element at `coord` inside `cell` currently holds focus.
    pub fn is_focused(&self, cell: &str, coord: Coord) -> bool {
        self.active_cell == cell && self.focus == coord
    }
}

/// Passed to index-change callbacks whenever focus settles on a new coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexChange {
    pub coord: Coord,
    pub direction: Direction,
}
