//! Property-based invariant tests for grid construction and navigation.
//!
//! 1. Every grid position resolves to the cell named there.
//! 2. A cell occupies exactly the positions that carry its name.
//! 3. Direction classification prefers the y axis.
//! 4. Arbitrary move sequences never panic, never leave the grid and
//!    never produce a negative focus.
//! 5. A horizontal move inside a cell is undone by its opposite.

use gridfocus::core::direction::classify;
use gridfocus::core::{Action, Coord, Direction, FocusEngine, MoveResult};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn names() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["A", "B", "C", "D"]).prop_map(str::to_string)
}

fn rect_rows() -> impl Strategy<Value = Vec<Vec<String>>> {
    (1usize..=5, 1usize..=5).prop_flat_map(|(w, h)| {
        proptest::collection::vec(proptest::collection::vec(names(), w), h)
    })
}

fn coord() -> impl Strategy<Value = Coord> {
    (0i32..4, 0i32..4).prop_map(|(x, y)| Coord::new(x, y))
}

fn moves() -> impl Strategy<Value = Vec<Action>> {
    proptest::collection::vec(
        prop::sample::select(vec![
            Action::MoveUp,
            Action::MoveDown,
            Action::MoveLeft,
            Action::MoveRight,
            Action::Confirm,
        ]),
        0..40,
    )
}

fn engine_for(rows: &[Vec<String>], focusables: &[(usize, Coord)]) -> FocusEngine {
    let mut engine = FocusEngine::new();
    engine.build_grid(rows, &rows[0][0], None).unwrap();
    let cells: Vec<String> = engine.grid().cells().map(|c| c.name().to_string()).collect();
    for (i, coord) in focusables {
        let cell = &cells[i % cells.len()];
        engine.register_grid_position(cell, *coord).unwrap();
    }
    engine
}

// ═════════════════════════════════════════════════════════════════════════
// 1-2. Grid construction
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn every_position_resolves_to_its_named_cell(rows in rect_rows()) {
        let engine = engine_for(&rows, &[]);
        let grid = engine.grid();
        for (y, row) in rows.iter().enumerate() {
            for (x, name) in row.iter().enumerate() {
                let pos = Coord::new(x as i32, y as i32);
                let cell = grid.cell_at(pos).unwrap();
                prop_assert_eq!(cell.name(), name.as_str());
                prop_assert!(cell.occupies(pos));
            }
        }
    }

    #[test]
    fn cells_occupy_exactly_their_named_positions(rows in rect_rows()) {
        let engine = engine_for(&rows, &[]);
        for cell in engine.grid().cells() {
            let named = rows.iter().flatten().filter(|n| n.as_str() == cell.name()).count();
            prop_assert_eq!(cell.occupied_positions().len(), named);
        }
    }

    #[test]
    fn positions_off_the_grid_resolve_to_nothing(
        rows in rect_rows(),
        x in -3i32..10,
        y in -3i32..10,
    ) {
        let engine = engine_for(&rows, &[]);
        let on_grid = x >= 0 && y >= 0 && (y as usize) < rows.len() && (x as usize) < rows[0].len();
        prop_assert_eq!(engine.grid().cell_at(Coord::new(x, y)).is_some(), on_grid);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Direction classification
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn classify_prefers_y(
        (cx, cy) in (-5i32..5, -5i32..5),
        (tx, ty) in (-5i32..5, -5i32..5),
    ) {
        let current = Coord::new(cx, cy);
        let target = Coord::new(tx, ty);
        let expected = if ty > cy {
            Some(Direction::Y)
        } else if ty < cy {
            Some(Direction::NegY)
        } else if tx > cx {
            Some(Direction::X)
        } else if tx < cx {
            Some(Direction::NegX)
        } else {
            None
        };
        prop_assert_eq!(classify(target, current), expected);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4-5. Navigation
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn moves_keep_state_on_the_grid(
        rows in rect_rows(),
        focusables in proptest::collection::vec((0usize..4, coord()), 0..12),
        script in moves(),
    ) {
        let mut engine = engine_for(&rows, &focusables);
        for action in script {
            engine.dispatch(action);
            let state = engine.state();
            prop_assert!(!state.focus.is_negative());
            let cell = engine.grid().cell(&state.active_cell);
            prop_assert!(cell.is_some());
            prop_assert!(cell.unwrap().occupies(state.active_entry));
        }
    }

    #[test]
    fn horizontal_move_is_undone_by_its_opposite(
        rows in rect_rows(),
        focusables in proptest::collection::vec((0usize..4, coord()), 0..12),
        script in moves(),
    ) {
        let mut engine = engine_for(&rows, &focusables);
        for action in script {
            engine.dispatch(action);
        }
        let before = engine.snapshot();
        if let MoveResult::Moved(_) = engine.move_right() {
            prop_assert_eq!(engine.move_left(), MoveResult::Moved(before.focus));
            prop_assert_eq!(engine.snapshot(), before);
        }
    }
}
