//! # Grid Builder
//!
//! Turns rows of cell names into a [`Grid`]. A name that repeats becomes one
//! spanned [`Cell`] covering every position where it appears:
//!
//! ```text
//! [["A", "A", "B"],        A occupies (0,0) (1,0)
//!  ["C", "C", "B"]]   →    B occupies (2,0) (2,1)
//!                          C occupies (0,1) (1,1)
//! ```

use log::debug;
use std::collections::BTreeMap;

use super::error::FocusError;
use super::geometry::{Cell, CellId, Coord};
use super::state::NavigationState;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<Vec<CellId>>,
    cells: BTreeMap<CellId, Cell>,
}

impl Grid {
    pub fn rows(&self) -> &[Vec<CellId>] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of grid columns.
    pub fn columns(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn cell(&self, name: &str) -> Option<&Cell> {
        self.cells.get(name)
    }

    pub fn cell_mut(&mut self, name: &str) -> Option<&mut Cell> {
        self.cells.get_mut(name)
    }

    /// All cells, ordered by name.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.values()
    }

    /// The cell occupying grid position `pos`, or `None` when `pos` is off the grid.
    pub fn cell_at(&self, pos: Coord) -> Option<&Cell> {
        if pos.is_negative() {
            return None;
        }
        let name = self.rows.get(pos.y as usize)?.get(pos.x as usize)?;
        self.cells.get(name)
    }
}

/// True when every row has the same, non-zero number of columns.
pub fn is_rectangular<S: AsRef<str>>(rows: &[Vec<S>]) -> bool {
    match rows.first() {
        Some(first) if !first.is_empty() => rows.iter().all(|row| row.len() == first.len()),
        _ => false,
    }
}

/// Builds the grid and the initial navigation state.
///
/// Nothing is returned unless the whole layout is valid, so a failed build
/// never leaves a half-constructed grid behind.
pub fn build_grid<S: AsRef<str>>(
    rows: &[Vec<S>],
    active_cell: &str,
    start: Option<Coord>,
) -> Result<(Grid, NavigationState), FocusError> {
    if active_cell.is_empty() {
        return Err(FocusError::MissingActiveCell);
    }
    if let Some(coord) = start.filter(Coord::is_negative) {
        return Err(FocusError::NegativeCoord {
            cell: active_cell.to_string(),
            coord,
        });
    }
    validate_shape(rows)?;

    let mut cells: BTreeMap<CellId, Cell> = BTreeMap::new();
    let mut names = Vec::with_capacity(rows.len());

    for (y, row) in rows.iter().enumerate() {
        let mut row_names = Vec::with_capacity(row.len());
        for (x, name) in row.iter().enumerate() {
            let name = name.as_ref();
            if name.is_empty() {
                return Err(FocusError::EmptyCellName { x, y });
            }
            let pos = Coord::new(x as i32, y as i32);
            match cells.get_mut(name) {
                Some(cell) => cell.add_grid_position(pos),
                None => {
                    cells.insert(name.to_string(), Cell::new(name, pos));
                }
            }
            row_names.push(name.to_string());
        }
        names.push(row_names);
    }

    let entry = cells
        .get(active_cell)
        .map(Cell::entry_position)
        .ok_or_else(|| FocusError::UnknownActiveCell(active_cell.to_string()))?;

    debug!(
        "Built {}x{} grid with {} cells, active cell {} entered at {}",
        names.first().map_or(0, Vec::len),
        names.len(),
        cells.len(),
        active_cell,
        entry
    );

    let state = NavigationState {
        focus: start.unwrap_or(Coord::ORIGIN),
        active_cell: active_cell.to_string(),
        active_entry: entry,
    };
    Ok((Grid { rows: names, cells }, state))
}

fn validate_shape<S: AsRef<str>>(rows: &[Vec<S>]) -> Result<(), FocusError> {
    if is_rectangular(rows) {
        return Ok(());
    }
    let expected = match rows.first() {
        Some(first) if !first.is_empty() => first.len(),
        _ => return Err(FocusError::EmptyGrid),
    };
    let (row, found) = rows
        .iter()
        .map(Vec::len)
        .enumerate()
        .find(|(_, len)| *len != expected)
        .ok_or(FocusError::EmptyGrid)?;
    Err(FocusError::RaggedRow {
        row,
        expected,
        found,
    })
}
