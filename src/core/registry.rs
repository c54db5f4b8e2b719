//! # Registries
//!
//! Callbacks the binding layer hands to the engine:
//!
//! - per cell: one focus, one blur and one index-change callback
//! - per (cell, coordinate): one confirm action
//!
//! Registering again for the same key replaces the previous callback.
//! Looking up a key nobody registered is not an error; nothing runs.

use log::debug;
use std::collections::HashMap;
use std::fmt;

use super::geometry::{CellId, Coord};
use super::state::IndexChange;

pub type CellCallback = Box<dyn FnMut()>;
pub type IndexChangeCallback = Box<dyn FnMut(&IndexChange)>;
pub type ActionCallback = Box<dyn FnMut()>;

/// Key for confirm actions. Structured so that cell `A1` at `(2, 3)` and
/// cell `A` at `(12, 3)` can never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActionKey {
    pub cell: CellId,
    pub coord: Coord,
}

impl ActionKey {
    pub fn new(cell: impl Into<CellId>, coord: Coord) -> Self {
        Self {
            cell: cell.into(),
            coord,
        }
    }
}

#[derive(Default)]
pub struct CallbackRegistry {
    focus: HashMap<CellId, CellCallback>,
    blur: HashMap<CellId, CellCallback>,
    index_change: HashMap<CellId, IndexChangeCallback>,
}

impl CallbackRegistry {
    pub fn on_focus(&mut self, cell: impl Into<CellId>, callback: CellCallback) {
        self.focus.insert(cell.into(), callback);
    }

    pub fn on_blur(&mut self, cell: impl Into<CellId>, callback: CellCallback) {
        self.blur.insert(cell.into(), callback);
    }

    pub fn on_index_change(&mut self, cell: impl Into<CellId>, callback: IndexChangeCallback) {
        self.index_change.insert(cell.into(), callback);
    }

    /// Runs the focus callback for `cell`. Returns whether one was registered.
    pub fn fire_focus(&mut self, cell: &str) -> bool {
        match self.focus.get_mut(cell) {
            Some(callback) => {
                callback();
                true
            }
            None => false,
        }
    }

    pub fn fire_blur(&mut self, cell: &str) -> bool {
        match self.blur.get_mut(cell) {
            Some(callback) => {
                callback();
                true
            }
            None => false,
        }
    }

    pub fn fire_index_change(&mut self, cell: &str, change: &IndexChange) -> bool {
        match self.index_change.get_mut(cell) {
            Some(callback) => {
                callback(change);
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackRegistry")
            .field("focus", &self.focus.len())
            .field("blur", &self.blur.len())
            .field("index_change", &self.index_change.len())
            .finish()
    }
}

#[derive(Default)]
pub struct ActionRegistry {
    actions: HashMap<ActionKey, ActionCallback>,
}

impl ActionRegistry {
    /// Binds `callback` to `key`. Returns `true` if it replaced an earlier binding.
    pub fn register(&mut self, key: ActionKey, callback: ActionCallback) -> bool {
        let replaced = self.actions.insert(key.clone(), callback).is_some();
        if replaced {
            debug!("Replaced action for {} at {}", key.cell, key.coord);
        }
        replaced
    }

    /// Runs the action bound to `key`. Returns whether one was registered.
    pub fn invoke(&mut self, key: &ActionKey) -> bool {
        match self.actions.get_mut(key) {
            Some(action) => {
                action();
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, key: &ActionKey) -> bool {
        self.actions.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn clear(&mut self) {
        self.actions.clear();
    }
}

impl fmt::Debug for ActionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionRegistry")
            .field("actions", &self.actions.len())
            .finish()
    }
}
