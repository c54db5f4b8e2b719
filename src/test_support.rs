//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::cell::RefCell;
use std::rc::Rc;

use crate::core::engine::{FocusEngine, StateObserver};
use crate::core::geometry::Coord;
use crate::core::registry::CellCallback;

/// Owned layout rows from string literals.
pub fn rows(layout: &[&[&str]]) -> Vec<Vec<String>> {
    layout
        .iter()
        .map(|row| row.iter().map(|name| name.to_string()).collect())
        .collect()
}

/// Builds an engine on `layout` and registers the given internal coordinates per cell.
pub fn engine_with(
    layout: &[&[&str]],
    active: &str,
    focusables: &[(&str, &[(i32, i32)])],
) -> FocusEngine {
    let mut engine = FocusEngine::new();
    engine.build_grid(&rows(layout), active, None).unwrap();
    for (cell, coords) in focusables {
        for &(x, y) in coords.iter() {
            engine.register_grid_position(cell, Coord::new(x, y)).unwrap();
        }
    }
    engine
}

/// Collects callback invocations as readable strings.
#[derive(Clone, Default)]
pub struct Recorder {
    events: Rc<RefCell<Vec<String>>>,
}

impl Recorder {
    /// Registers focus, blur and index-change recorders for every cell in `cells`.
    pub fn attach(engine: &mut FocusEngine, cells: &[&str]) -> Self {
        let recorder = Recorder::default();
        for &cell in cells {
            engine.register_focus_callback(cell, recorder.push_fn(&format!("focus {cell}")));
            engine.register_blur_callback(cell, recorder.push_fn(&format!("blur {cell}")));
            let events = recorder.events.clone();
            let name = cell.to_string();
            engine.register_index_change_callback(
                cell,
                Box::new(move |change| {
                    events
                        .borrow_mut()
                        .push(format!("index {} {} {}", name, change.coord, change.direction));
                }),
            );
        }
        recorder
    }

    pub fn push_fn(&self, label: &str) -> CellCallback {
        let events = self.events.clone();
        let label = label.to_string();
        Box::new(move || events.borrow_mut().push(label.clone()))
    }

    pub fn observer(&self) -> StateObserver {
        let events = self.events.clone();
        Box::new(move |state| {
            events
                .borrow_mut()
                .push(format!("state {} {}", state.active_cell, state.focus));
        })
    }

    pub fn events(&self) -> Vec<String> {
        self.events.borrow().clone()
    }
}
