//! # Direction Math
//!
//! Pure helpers shared by the rule table and cross-cell resolution.
//! Directions are named after the axis they grow along, so `Y` is "down".

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::geometry::Coord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "x")]
    X,
    #[serde(rename = "-x")]
    NegX,
    #[serde(rename = "y")]
    Y,
    #[serde(rename = "-y")]
    NegY,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::X, Direction::NegX, Direction::Y, Direction::NegY];

    pub fn opposite(self) -> Direction {
        match self {
            Direction::X => Direction::NegX,
            Direction::NegX => Direction::X,
            Direction::Y => Direction::NegY,
            Direction::NegY => Direction::Y,
        }
    }

    /// The one-step delta for this direction.
    pub fn unit(self) -> Coord {
        match self {
            Direction::X => Coord::new(1, 0),
            Direction::NegX => Coord::new(-1, 0),
            Direction::Y => Coord::new(0, 1),
            Direction::NegY => Coord::new(0, -1),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::X => "x",
            Direction::NegX => "-x",
            Direction::Y => "y",
            Direction::NegY => "-y",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown direction `{0}` (expected x, -x, y or -y)")]
pub struct ParseDirectionError(pub String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x" => Ok(Direction::X),
            "-x" => Ok(Direction::NegX),
            "y" => Ok(Direction::Y),
            "-y" => Ok(Direction::NegY),
            other => Err(ParseDirectionError(other.to_string())),
        }
    }
}

/// Classifies the move from `current` to `target`.
///
/// A change in y wins over a change in x, so a diagonal target is always
/// treated as vertical. `None` means the target is the current coordinate.
pub fn classify(target: Coord, current: Coord) -> Option<Direction> {
    if target.y != current.y {
        return Some(if target.y > current.y {
            Direction::Y
        } else {
            Direction::NegY
        });
    }
    if target.x != current.x {
        return Some(if target.x > current.x {
            Direction::X
        } else {
            Direction::NegX
        });
    }
    None
}

/// The coordinate one unit further in `direction`, or `None` past the `i32` range.
pub fn step(from: Coord, direction: Direction) -> Option<Coord> {
    let d = direction.unit();
    Some(Coord::new(from.x.checked_add(d.x)?, from.y.checked_add(d.y)?))
}

/// The grid coordinate one whole cell span further in `direction`.
///
/// Horizontal directions travel `width`, vertical ones `height`. Used to
/// skip past the footprint of a spanned cell. `None` on overflow.
pub fn offset_by_span(from: Coord, direction: Direction, height: i32, width: i32) -> Option<Coord> {
    let coord = match direction {
        Direction::X => Coord::new(from.x.checked_add(width)?, from.y),
        Direction::NegX => Coord::new(from.x.checked_sub(width)?, from.y),
        Direction::Y => Coord::new(from.x, from.y.checked_add(height)?),
        Direction::NegY => Coord::new(from.x, from.y.checked_sub(height)?),
    };
    Some(coord)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_prefers_y_over_x() {
        let here = Coord::new(3, 3);
        assert_eq!(classify(Coord::new(4, 4), here), Some(Direction::Y));
        assert_eq!(classify(Coord::new(2, 2), here), Some(Direction::NegY));
    }

    #[test]
    fn test_classify_horizontal() {
        let here = Coord::new(1, 0);
        assert_eq!(classify(Coord::new(2, 0), here), Some(Direction::X));
        assert_eq!(classify(Coord::new(0, 0), here), Some(Direction::NegX));
    }

    #[test]
    fn test_classify_no_movement() {
        assert_eq!(classify(Coord::new(1, 1), Coord::new(1, 1)), None);
    }

    #[test]
    fn test_step_each_direction() {
        let from = Coord::new(2, 2);
        assert_eq!(step(from, Direction::X), Some(Coord::new(3, 2)));
        assert_eq!(step(from, Direction::NegX), Some(Coord::new(1, 2)));
        assert_eq!(step(from, Direction::Y), Some(Coord::new(2, 3)));
        assert_eq!(step(from, Direction::NegY), Some(Coord::new(2, 1)));
    }

    #[test]
    fn test_offset_uses_width_for_x_and_height_for_y() {
        let from = Coord::new(5, 5);
        assert_eq!(offset_by_span(from, Direction::X, 3, 2), Some(Coord::new(7, 5)));
        assert_eq!(offset_by_span(from, Direction::NegX, 3, 2), Some(Coord::new(3, 5)));
        assert_eq!(offset_by_span(from, Direction::Y, 3, 2), Some(Coord::new(5, 8)));
        assert_eq!(offset_by_span(from, Direction::NegY, 3, 2), Some(Coord::new(5, 2)));
    }

    #[test]
    fn test_step_and_offset_stop_at_i32_range() {
        let edge = Coord::new(i32::MAX, i32::MIN);
        assert_eq!(step(edge, Direction::X), None);
        assert_eq!(step(edge, Direction::NegY), None);
        assert_eq!(step(edge, Direction::NegX), Some(Coord::new(i32::MAX - 1, i32::MIN)));
        assert_eq!(offset_by_span(Coord::new(0, 1), Direction::Y, i32::MAX, 1), None);
    }

    #[test]
    fn test_opposite_is_involution() {
        for dir in Direction::ALL {
            assert_eq!(dir.opposite().opposite(), dir);
            assert_ne!(dir.opposite(), dir);
        }
    }

    #[test]
    fn test_parse_and_display() {
        for dir in Direction::ALL {
            assert_eq!(dir.to_string().parse::<Direction>(), Ok(dir));
        }
        assert!("up".parse::<Direction>().is_err());
    }
}
