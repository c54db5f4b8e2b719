//! # Core Navigation Logic
//!
//! This module contains gridfocus's navigation engine.
//! It knows nothing about terminals, widgets or files.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Grid + Cells         │
//!                    │  • Move rules           │
//!                    │  • FocusEngine          │
//!                    │  • Action (commands)    │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │   Replay   │      │ Interactive│      │  Widget    │
//!     │  (script)  │      │ (crossterm)│      │  bindings  │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`geometry`]: `Coord` and `Cell`, the footprint and bounds of one focus region
//! - [`grid`]: builds a `Grid` from rows of cell names
//! - [`direction`]: direction classification and grid stepping
//! - [`rules`]: the per-direction boundary table
//! - [`engine`]: `FocusEngine`, the navigation state machine
//! - [`action`]: the `Action` enum, everything that can be asked of the engine
//! - [`registry`]: focus/blur/index-change callbacks and confirm actions
//! - [`state`]: the read-only `NavigationState` snapshot
//! - [`config`]: config and layout files

pub mod action;
pub mod config;
pub mod direction;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod registry;
pub mod rules;
pub mod state;

pub use action::{Action, Effect};
pub use direction::Direction;
pub use engine::{FocusEngine, MoveResult};
pub use error::FocusError;
pub use geometry::{Cell, CellId, Coord};
pub use grid::Grid;
pub use state::{IndexChange, NavigationState};
