//! # Actions
//!
//! Everything a caller can ask the engine to do becomes an `Action`.
//! Arrow key? That's `Action::MoveRight`. Enter? That's `Action::Confirm`.
//!
//! ```text
//! FocusEngine + Action  →  update()  →  Effect
//! ```
//!
//! Callbacks send `Action`s through [`FocusEngine::commands`] instead of
//! touching the engine directly; the engine applies them once the current
//! operation is done. Same enum, same `update()`, whether it came from a
//! key press or a callback.

use serde::{Deserialize, Serialize};

use super::direction::Direction;
use super::engine::{FocusEngine, MoveResult};
use super::geometry::{CellId, Coord};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    /// Move to an arbitrary internal coordinate. Direction comes from `classify`.
    MoveTo(Coord),
    /// Enter `cell` as if navigating in `direction`.
    SetActiveCell { cell: CellId, direction: Direction },
    Confirm,
}

/// What applying an [`Action`] did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Effect {
    Navigated(MoveResult),
    ActionInvoked,
    NoAction,
}

/// Applies one action. Does not drain queued commands; use
/// [`FocusEngine::dispatch`] from outside the engine.
pub(crate) fn update(engine: &mut FocusEngine, action: Action) -> Effect {
    match action {
        Action::MoveUp => Effect::Navigated(engine.step_focus(Direction::NegY)),
        Action::MoveDown => Effect::Navigated(engine.step_focus(Direction::Y)),
        Action::MoveLeft => Effect::Navigated(engine.step_focus(Direction::NegX)),
        Action::MoveRight => Effect::Navigated(engine.step_focus(Direction::X)),
        Action::MoveTo(target) => Effect::Navigated(engine.apply_move(target)),
        Action::SetActiveCell { cell, direction } => {
            Effect::Navigated(engine.switch_cell(&cell, direction))
        }
        Action::Confirm => {
            if engine.invoke_focused_action() {
                Effect::ActionInvoked
            } else {
                Effect::NoAction
            }
        }
    }
}
