//! # Move Rules
//!
//! The per-direction boundary table. Each handler looks only at the active
//! cell's bounds and decides what a move request means:
//!
//! | direction | accepted when            | otherwise                                   |
//! |-----------|--------------------------|---------------------------------------------|
//! | `x`       | `x_max(cy) >= nx`        | leave the cell rightwards                   |
//! | `-x`      | `nx >= 0`                | leave the cell leftwards                    |
//! | `y`       | `y_max(cx) >= ny`        | clamp into a narrower row, else leave down  |
//! | `-y`      | `ny >= 0` and no clamp   | clamp into a narrower row, or leave up      |
//!
//! A narrower row is one whose `x_max` is smaller than the current row's and
//! smaller than the current x. Focus snaps to that row's rightmost column.
//! An unset bound never satisfies a comparison.

use super::direction::{Direction, classify, step};
use super::geometry::{Cell, Coord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Move to the requested coordinate inside the cell.
    Accept(Coord),
    /// Stay inside the cell, but on a clamped coordinate.
    ClampWithin(Coord),
    /// The cell boundary was hit; look for a neighbour at `probe`.
    CrossCell { probe: Coord, direction: Direction },
    /// Nothing to do.
    Reject,
}

/// Evaluates a request to move from `current` to `target` inside `cell`.
///
/// `entry` is the grid position the cell was entered at; cross-cell probes
/// start from there.
pub fn evaluate(cell: &Cell, entry: Coord, current: Coord, target: Coord) -> MoveOutcome {
    let Some(direction) = classify(target, current) else {
        return MoveOutcome::Reject;
    };
    let leave = match step(entry, direction) {
        Some(probe) => MoveOutcome::CrossCell { probe, direction },
        None => MoveOutcome::Reject,
    };
    match direction {
        Direction::X => increasing_x(cell, current, target, leave),
        Direction::NegX => decreasing_x(target, leave),
        Direction::Y => increasing_y(cell, current, target, leave),
        Direction::NegY => decreasing_y(cell, current, target, leave),
    }
}

fn increasing_x(cell: &Cell, current: Coord, target: Coord, leave: MoveOutcome) -> MoveOutcome {
    if cell.x_max(current.y).is_some_and(|max| max >= target.x) {
        MoveOutcome::Accept(target)
    } else {
        leave
    }
}

fn decreasing_x(target: Coord, leave: MoveOutcome) -> MoveOutcome {
    if target.x >= 0 {
        MoveOutcome::Accept(target)
    } else {
        leave
    }
}

fn increasing_y(cell: &Cell, current: Coord, target: Coord, leave: MoveOutcome) -> MoveOutcome {
    if cell.y_max(current.x).is_some_and(|max| max >= target.y) {
        return MoveOutcome::Accept(target);
    }
    match narrow_row_clamp(cell, current, target) {
        Some(clamped) => MoveOutcome::ClampWithin(clamped),
        None => leave,
    }
}

fn decreasing_y(cell: &Cell, current: Coord, target: Coord, leave: MoveOutcome) -> MoveOutcome {
    if target.y < 0 {
        return leave;
    }
    match narrow_row_clamp(cell, current, target) {
        Some(clamped) => MoveOutcome::ClampWithin(clamped),
        None => MoveOutcome::Accept(target),
    }
}

/// The rightmost column of the target row, if that row is narrower than where we are.
fn narrow_row_clamp(cell: &Cell, current: Coord, target: Coord) -> Option<Coord> {
    let target_max = cell.x_max(target.y)?;
    let current_max = cell.x_max(current.y)?;
    (target_max < current_max && current.x > target_max).then(|| Coord::new(target_max, target.y))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Internal layout:
    /// ```text
    /// row 0:  (0,0) (1,0) (2,0)
    /// row 1:  (0,1)
    /// ```
    fn ragged_cell() -> Cell {
        let mut cell = Cell::new("A", Coord::new(4, 2));
        for c in [(0, 0), (1, 0), (2, 0), (0, 1)] {
            cell.register_internal_coord(Coord::new(c.0, c.1));
        }
        cell
    }

    fn eval(cell: &Cell, from: (i32, i32), to: (i32, i32)) -> MoveOutcome {
        evaluate(cell, cell.entry_position(), Coord::new(from.0, from.1), Coord::new(to.0, to.1))
    }

    #[test]
    fn test_right_within_row() {
        let cell = ragged_cell();
        assert_eq!(eval(&cell, (0, 0), (1, 0)), MoveOutcome::Accept(Coord::new(1, 0)));
    }

    #[test]
    fn test_right_past_row_end_leaves_cell() {
        let cell = ragged_cell();
        assert_eq!(
            eval(&cell, (2, 0), (3, 0)),
            MoveOutcome::CrossCell {
                probe: Coord::new(5, 2),
                direction: Direction::X
            }
        );
    }

    #[test]
    fn test_right_on_unregistered_row_leaves_cell() {
        let cell = Cell::new("A", Coord::ORIGIN);
        assert!(matches!(
            eval(&cell, (0, 0), (1, 0)),
            MoveOutcome::CrossCell { direction: Direction::X, .. }
        ));
    }

    #[test]
    fn test_left_stops_at_zero() {
        let cell = ragged_cell();
        assert_eq!(eval(&cell, (1, 0), (0, 0)), MoveOutcome::Accept(Coord::new(0, 0)));
        assert_eq!(
            eval(&cell, (0, 0), (-1, 0)),
            MoveOutcome::CrossCell {
                probe: Coord::new(3, 2),
                direction: Direction::NegX
            }
        );
    }

    #[test]
    fn test_down_within_column() {
        let cell = ragged_cell();
        assert_eq!(eval(&cell, (0, 0), (0, 1)), MoveOutcome::Accept(Coord::new(0, 1)));
    }

    #[test]
    fn test_down_into_narrower_row_clamps() {
        let cell = ragged_cell();
        assert_eq!(eval(&cell, (2, 0), (2, 1)), MoveOutcome::ClampWithin(Coord::new(0, 1)));
    }

    #[test]
    fn test_down_past_last_row_leaves_cell() {
        let cell = ragged_cell();
        assert_eq!(
            eval(&cell, (0, 1), (0, 2)),
            MoveOutcome::CrossCell {
                probe: Coord::new(4, 3),
                direction: Direction::Y
            }
        );
    }

    #[test]
    fn test_up_accepts_when_row_is_wide_enough() {
        let cell = ragged_cell();
        assert_eq!(eval(&cell, (0, 1), (0, 0)), MoveOutcome::Accept(Coord::new(0, 0)));
    }

    #[test]
    fn test_up_into_narrower_row_clamps() {
        let mut cell = Cell::new("A", Coord::ORIGIN);
        for c in [(0, 0), (0, 1), (1, 1), (2, 1)] {
            cell.register_internal_coord(Coord::new(c.0, c.1));
        }
        assert_eq!(eval(&cell, (2, 1), (2, 0)), MoveOutcome::ClampWithin(Coord::new(0, 0)));
    }

    #[test]
    fn test_up_past_first_row_leaves_cell() {
        let cell = ragged_cell();
        assert!(matches!(
            eval(&cell, (1, 0), (1, -1)),
            MoveOutcome::CrossCell { direction: Direction::NegY, .. }
        ));
    }

    #[test]
    fn test_no_movement_is_rejected() {
        let cell = ragged_cell();
        assert_eq!(eval(&cell, (1, 0), (1, 0)), MoveOutcome::Reject);
    }
}
