//! # Geometry
//!
//! A [`Cell`] is a named focus region. It knows two things:
//!
//! ```text
//! Cell "A"
//! ├── occupied positions   grid coordinates from the layout, e.g. (0,0) (1,0)
//! └── internal coords      focusable children registered later, e.g. (0,0) (1,0) (0,1)
//!      ├── x_maxes[y]      rightmost x registered on internal row y
//!      └── y_maxes[x]      largest y registered on internal column x
//! ```
//!
//! Grid positions decide which cell is the neighbour of which. Internal
//! coordinates decide where focus may move inside a cell. The two spaces
//! never mix.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::direction::Direction;

/// Name of a cell as written in the layout rows.
pub type CellId = String;

/// A logical coordinate. Serialized as `[x, y]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(from = "[i32; 2]", into = "[i32; 2]")]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const ORIGIN: Coord = Coord { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn is_negative(&self) -> bool {
        self.x < 0 || self.y < 0
    }
}

impl From<[i32; 2]> for Coord {
    fn from([x, y]: [i32; 2]) -> Self {
        Coord::new(x, y)
    }
}

impl From<Coord> for [i32; 2] {
    fn from(c: Coord) -> Self {
        [c.x, c.y]
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    name: CellId,
    /// Grid positions in insertion order. Never empty; the first is the entry position.
    occupied: Vec<Coord>,
    internal: Vec<Coord>,
    x_maxes: BTreeMap<i32, i32>,
    y_maxes: BTreeMap<i32, i32>,
    width: i32,
    height: i32,
}

impl Cell {
    pub fn new(name: impl Into<CellId>, grid_position: Coord) -> Self {
        Self {
            name: name.into(),
            occupied: vec![grid_position],
            internal: Vec::new(),
            x_maxes: BTreeMap::new(),
            y_maxes: BTreeMap::new(),
            width: 0,
            height: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rename(&mut self, name: impl Into<CellId>) {
        self.name = name.into();
    }

    /// Extends the cell's footprint. Callers must not add the same position twice.
    pub fn add_grid_position(&mut self, pos: Coord) {
        self.occupied.push(pos);
        self.recalculate_dimensions();
    }

    pub fn occupied_positions(&self) -> &[Coord] {
        &self.occupied
    }

    /// The grid position navigation treats as "where this cell is".
    pub fn entry_position(&self) -> Coord {
        self.occupied[0]
    }

    pub fn occupies(&self, pos: Coord) -> bool {
        self.occupied.contains(&pos)
    }

    /// Registers a focusable internal coordinate. Returns `false` if it was already known.
    pub fn register_internal_coord(&mut self, coord: Coord) -> bool {
        if self.internal.iter().any(|c| *c == coord) {
            return false;
        }
        self.internal.push(coord);
        raise_max(&mut self.x_maxes, coord.y, coord.x);
        raise_max(&mut self.y_maxes, coord.x, coord.y);
        self.recalculate_dimensions();
        true
    }

    pub fn internal_coords(&self) -> &[Coord] {
        &self.internal
    }

    /// Rightmost x registered on internal row `row`, if any.
    pub fn x_max(&self, row: i32) -> Option<i32> {
        self.x_maxes.get(&row).copied()
    }

    /// Largest y registered on internal column `col`, if any.
    pub fn y_max(&self, col: i32) -> Option<i32> {
        self.y_maxes.get(&col).copied()
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Where focus lands when navigation enters this cell travelling in `direction`.
    ///
    /// Entering leftwards lands on the rightmost registered column, at the
    /// y-bound recorded for that column. A cell whose rightmost column is 0
    /// is entered at the origin. Every other direction lands on the origin.
    pub fn reentry_coord(&self, direction: Direction) -> Coord {
        match direction {
            Direction::NegX => match self.x_maxes.values().max() {
                Some(&x) if x > 0 => Coord::new(x, self.y_max(x).unwrap_or(0)),
                _ => Coord::ORIGIN,
            },
            Direction::X | Direction::Y | Direction::NegY => Coord::ORIGIN,
        }
    }

    fn recalculate_dimensions(&mut self) {
        let first = self.entry_position();
        let count = self.occupied.len() as i32;
        let horizontal = self.occupied.iter().all(|p| p.y == first.y);
        let vertical = self.occupied.iter().all(|p| p.x == first.x);

        if horizontal {
            self.width = count;
            self.height = self.internal.iter().map(|c| c.x).max().unwrap_or(0);
        }
        if vertical {
            self.height = count;
            self.width = self.internal.iter().map(|c| c.y).max().unwrap_or(0);
        }
        if !horizontal && !vertical {
            // Block span: measure the footprint itself.
            self.width = distinct(self.occupied.iter().map(|p| p.x));
            self.height = distinct(self.occupied.iter().map(|p| p.y));
        }
    }
}

fn raise_max(maxes: &mut BTreeMap<i32, i32>, index: i32, value: i32) {
    maxes
        .entry(index)
        .and_modify(|current| *current = (*current).max(value))
        .or_insert(value);
}

fn distinct(values: impl Iterator<Item = i32>) -> i32 {
    let mut seen: Vec<i32> = values.collect();
    seen.sort_unstable();
    seen.dedup();
    seen.len() as i32
}
