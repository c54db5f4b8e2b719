//! # Focus Engine
//!
//! The navigation state machine. One engine per screen layout, owned by
//! whoever drives it; there is no global instance.
//!
//! ```text
//! request_move(target)
//!   │
//!   ├─ rules::evaluate ──► Accept / ClampWithin ──► commit focus, fire index-change
//!   │                 └──► CrossCell { probe }  ──► neighbour at probe?
//!   │                                                 ├─ same cell  → probe again one span further
//!   │                                                 ├─ other cell → blur, focus, re-enter
//!   │                                                 └─ none       → Blocked (state unchanged)
//!   └─ drain queued commands, one at a time
//! ```
//!
//! Callbacks run synchronously inside the call that triggered them. They
//! cannot borrow the engine; to change focus from a callback, send an
//! [`Action`] through [`FocusEngine::commands`]. Queued actions are applied
//! after the triggering operation has fully settled.

use log::{debug, info, warn};
use serde::Serialize;
use std::sync::mpsc::{self, Receiver, Sender};

use super::action::{Action, Effect, update};
use super::direction::{Direction, classify, offset_by_span, step};
use super::error::FocusError;
use super::geometry::{CellId, Coord};
use super::grid::{Grid, build_grid};
use super::registry::{
    ActionCallback, ActionKey, ActionRegistry, CallbackRegistry, CellCallback, IndexChangeCallback,
};
use super::rules::{self, MoveOutcome};
use super::state::{IndexChange, NavigationState};

/// Upper bound on queued actions applied after a single operation.
/// Stops two callbacks that keep re-triggering each other.
pub const MAX_CHAINED_COMMANDS: usize = 64;

pub type StateObserver = Box<dyn FnMut(&NavigationState)>;

/// What a navigation request ended up doing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum MoveResult {
    /// Focus moved inside the active cell.
    Moved(Coord),
    /// Focus snapped to the rightmost column of a narrower row.
    Clamped(Coord),
    /// Focus left `from` and entered `to`.
    Transitioned { from: CellId, to: CellId },
    /// Hit the cell boundary with no neighbour on the other side.
    Blocked,
    /// No movement requested, no grid, or an unknown cell.
    Ignored,
}

pub struct FocusEngine {
    grid: Grid,
    state: NavigationState,
    callbacks: CallbackRegistry,
    actions: ActionRegistry,
    observers: Vec<StateObserver>,
    command_tx: Sender<Action>,
    command_rx: Receiver<Action>,
}

impl Default for FocusEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl FocusEngine {
    /// Creates an engine with no grid. Moves are ignored until [`build_grid`](Self::build_grid).
    pub fn new() -> Self {
        let (command_tx, command_rx) = mpsc::channel();
        Self {
            grid: Grid::default(),
            state: NavigationState::default(),
            callbacks: CallbackRegistry::default(),
            actions: ActionRegistry::default(),
            observers: Vec::new(),
            command_tx,
            command_rx,
        }
    }

    // ── Layout ──────────────────────────────────────────────────────────────

    /// Replaces the grid and resets navigation state.
    ///
    /// On error the previous grid, state and actions are left untouched.
    /// On success, actions bound to the old grid are dropped.
    pub fn build_grid<S: AsRef<str>>(
        &mut self,
        rows: &[Vec<S>],
        active_cell: &str,
        start: Option<Coord>,
    ) -> Result<(), FocusError> {
        let (grid, state) = build_grid(rows, active_cell, start)?;
        self.grid = grid;
        self.state = state;
        self.actions.clear();
        info!(
            "Grid set: {} rows, active cell {} at {}",
            self.grid.rows().len(),
            self.state.active_cell,
            self.state.focus
        );
        self.publish();
        Ok(())
    }

    /// Registers a focusable internal coordinate for `cell`.
    ///
    /// Returns `Ok(false)` if the coordinate was already known or the cell
    /// does not exist in the current grid.
    pub fn register_grid_position(&mut self, cell: &str, coord: Coord) -> Result<bool, FocusError> {
        if coord.is_negative() {
            return Err(FocusError::NegativeCoord {
                cell: cell.to_string(),
                coord,
            });
        }
        match self.grid.cell_mut(cell) {
            Some(target) => Ok(target.register_internal_coord(coord)),
            None => {
                warn!("Ignoring focusable {} for unknown cell {}", coord, cell);
                Ok(false)
            }
        }
    }

    /// Registers the focus indices of every child element of `cell`.
    ///
    /// A child without an index is a configuration error. All indices are
    /// checked before any is registered. Returns how many were new.
    pub fn register_focusables<I>(&mut self, cell: &str, indices: I) -> Result<usize, FocusError>
    where
        I: IntoIterator<Item = Option<Coord>>,
    {
        let coords = indices
            .into_iter()
            .map(|index| {
                let coord = index.ok_or_else(|| FocusError::MissingFocusIndex {
                    cell: cell.to_string(),
                })?;
                if coord.is_negative() {
                    return Err(FocusError::NegativeCoord {
                        cell: cell.to_string(),
                        coord,
                    });
                }
                Ok(coord)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut added = 0;
        for coord in coords {
            if self.register_grid_position(cell, coord)? {
                added += 1;
            }
        }
        Ok(added)
    }

    // ── Observers and callbacks ─────────────────────────────────────────────

    pub fn register_focus_callback(&mut self, cell: impl Into<CellId>, callback: CellCallback) {
        self.callbacks.on_focus(cell, callback);
    }

    pub fn register_blur_callback(&mut self, cell: impl Into<CellId>, callback: CellCallback) {
        self.callbacks.on_blur(cell, callback);
    }

    pub fn register_index_change_callback(
        &mut self,
        cell: impl Into<CellId>,
        callback: IndexChangeCallback,
    ) {
        self.callbacks.on_index_change(cell, callback);
    }

    /// Binds `callback` to the element at `coord` inside `cell`, run by [`confirm`](Self::confirm).
    pub fn register_action(&mut self, coord: Coord, cell: impl Into<CellId>, callback: ActionCallback) {
        self.actions.register(ActionKey::new(cell, coord), callback);
    }

    /// Calls `observer` with the new state after every change.
    pub fn subscribe(&mut self, observer: StateObserver) {
        self.observers.push(observer);
    }

    /// A handle callbacks can use to queue follow-up actions.
    pub fn commands(&self) -> Sender<Action> {
        self.command_tx.clone()
    }

    // ── Reads ───────────────────────────────────────────────────────────────

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn snapshot(&self) -> NavigationState {
        self.state.clone()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn has_action(&self, cell: &str, coord: Coord) -> bool {
        self.actions.contains(&ActionKey::new(cell, coord))
    }

    // ── Navigation ──────────────────────────────────────────────────────────

    /// Applies `action`, then any actions callbacks queued while it ran.
    pub fn dispatch(&mut self, action: Action) -> Effect {
        let effect = update(self, action);
        self.drain_commands();
        effect
    }

    pub fn request_move(&mut self, target: Coord) -> MoveResult {
        self.navigate(Action::MoveTo(target))
    }

    pub fn move_up(&mut self) -> MoveResult {
        self.navigate(Action::MoveUp)
    }

    pub fn move_down(&mut self) -> MoveResult {
        self.navigate(Action::MoveDown)
    }

    pub fn move_left(&mut self) -> MoveResult {
        self.navigate(Action::MoveLeft)
    }

    pub fn move_right(&mut self) -> MoveResult {
        self.navigate(Action::MoveRight)
    }

    /// Forces focus into `cell` as if navigation had entered it travelling `direction`.
    pub fn set_active_cell(&mut self, cell: &str, direction: Direction) -> MoveResult {
        self.navigate(Action::SetActiveCell {
            cell: cell.to_string(),
            direction,
        })
    }

    /// Runs the action bound to the focused element. Returns whether one ran.
    pub fn confirm(&mut self) -> bool {
        matches!(self.dispatch(Action::Confirm), Effect::ActionInvoked)
    }

    fn navigate(&mut self, action: Action) -> MoveResult {
        match self.dispatch(action) {
            Effect::Navigated(result) => result,
            Effect::ActionInvoked | Effect::NoAction => MoveResult::Ignored,
        }
    }

    // ── Primitives used by `action::update` ─────────────────────────────────

    /// One step from the current focus in `direction`.
    pub(crate) fn step_focus(&mut self, direction: Direction) -> MoveResult {
        match step(self.state.focus, direction) {
            Some(target) => self.apply_move(target),
            // No coordinate past the i32 range can be inside the cell.
            None => match step(self.state.active_entry, direction) {
                Some(probe) => self.cross_cell(probe, direction),
                None => MoveResult::Blocked,
            },
        }
    }

    pub(crate) fn apply_move(&mut self, target: Coord) -> MoveResult {
        let Some(direction) = classify(target, self.state.focus) else {
            return MoveResult::Ignored;
        };
        let Some(cell) = self.grid.cell(&self.state.active_cell) else {
            debug!("Move ignored: no active cell in grid");
            return MoveResult::Ignored;
        };

        match rules::evaluate(cell, self.state.active_entry, self.state.focus, target) {
            MoveOutcome::Accept(coord) => {
                debug!("{} {}: {} -> {}", self.state.active_cell, direction, self.state.focus, coord);
                self.commit_focus(coord, direction);
                MoveResult::Moved(coord)
            }
            MoveOutcome::ClampWithin(coord) => {
                debug!(
                    "{} {}: clamped {} to narrower row at {}",
                    self.state.active_cell, direction, target, coord
                );
                self.commit_focus(coord, direction);
                MoveResult::Clamped(coord)
            }
            MoveOutcome::CrossCell { probe, direction } => self.cross_cell(probe, direction),
            MoveOutcome::Reject => MoveResult::Ignored,
        }
    }

    fn cross_cell(&mut self, probe: Coord, direction: Direction) -> MoveResult {
        match self.neighbour(probe, direction) {
            Some(next) => self.switch_cell(&next, direction),
            None => {
                debug!(
                    "{} {}: no neighbour beyond {}",
                    self.state.active_cell, direction, self.state.active_entry
                );
                MoveResult::Blocked
            }
        }
    }

    /// Leaves the active cell for `name`, landing on its re-entry coordinate.
    pub(crate) fn switch_cell(&mut self, name: &str, direction: Direction) -> MoveResult {
        let Some(cell) = self.grid.cell(name) else {
            warn!("Cannot activate unknown cell {}", name);
            return MoveResult::Ignored;
        };
        let entry = cell.entry_position();
        let landing = cell.reentry_coord(direction);

        let previous = std::mem::replace(&mut self.state.active_cell, name.to_string());
        self.callbacks.fire_blur(&previous);
        self.callbacks.fire_focus(name);

        self.state.active_entry = entry;
        self.state.focus = landing;
        debug!("{} {}: entered {} at {}", previous, direction, name, landing);
        self.publish();

        let change = IndexChange {
            coord: landing,
            direction,
        };
        self.callbacks.fire_index_change(name, &change);

        MoveResult::Transitioned {
            from: previous,
            to: name.to_string(),
        }
    }

    pub(crate) fn invoke_focused_action(&mut self) -> bool {
        let key = ActionKey::new(self.state.active_cell.clone(), self.state.focus);
        let ran = self.actions.invoke(&key);
        if !ran {
            debug!("No action bound at {} in {}", key.coord, key.cell);
        }
        ran
    }

    // ── Internals ───────────────────────────────────────────────────────────

    /// The first different cell beyond the active one, probing at `probe`
    /// and, if the active cell spans across it, one full span further.
    fn neighbour(&self, probe: Coord, direction: Direction) -> Option<CellId> {
        let active = self.state.active_cell.as_str();
        let found = self.grid.cell_at(probe)?;
        if found.name() != active {
            return Some(found.name().to_string());
        }

        let current = self.grid.cell(active)?;
        let beyond = offset_by_span(
            self.state.active_entry,
            direction,
            current.height(),
            current.width(),
        )?;
        self.grid
            .cell_at(beyond)
            .filter(|cell| cell.name() != active)
            .map(|cell| cell.name().to_string())
    }

    fn commit_focus(&mut self, coord: Coord, direction: Direction) {
        self.state.focus = coord;
        self.publish();
        let change = IndexChange { coord, direction };
        self.callbacks.fire_index_change(&self.state.active_cell, &change);
    }

    fn publish(&mut self) {
        for observer in &mut self.observers {
            observer(&self.state);
        }
    }

    fn drain_commands(&mut self) {
        let mut applied = 0;
        while let Ok(action) = self.command_rx.try_recv() {
            if applied == MAX_CHAINED_COMMANDS {
                let dropped = 1 + self.command_rx.try_iter().count();
                warn!("Dropped {} queued actions after {} chained actions", dropped, applied);
                return;
            }
            debug!("Applying queued {:?}", action);
            update(self, action);
            applied += 1;
        }
    }
}
