//! # Driver
//!
//! Runs a [`FocusEngine`] outside of any widget toolkit, either by replaying
//! a move script or by reading arrow keys from the terminal.
//!
//! Both paths go through [`Session::apply`], so a replayed script and the
//! same keys typed by hand produce identical reports.

pub mod event;
pub mod script;

use log::{debug, info};
use serde::Serialize;
use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;
use std::time::Duration;

use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use thiserror::Error;

use crate::core::config::{self, ConfigError, LayoutFile, ResolvedConfig};
use crate::core::{Action, Effect, FocusEngine, FocusError, NavigationState};
use event::{KeyInput, poll_input};
use script::{ScriptError, parse_script};

#[derive(Debug, Error)]
pub enum DriverError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("invalid layout: {0}")]
    Layout(#[from] FocusError),
    #[error(transparent)]
    Script(#[from] ScriptError),
    #[error("terminal I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("no layout given (use --layout, GRIDFOCUS_LAYOUT or general.default_layout)")]
    NoLayout,
}

/// An engine loaded from a layout file, recording which callbacks fire.
pub struct Session {
    engine: FocusEngine,
    fired: Rc<RefCell<Vec<String>>>,
}

/// Outcome of one applied action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepReport {
    pub action: Action,
    pub effect: Effect,
    pub state: NavigationState,
    /// Callbacks that ran, in order: `focus B`, `blur A`, `action open`.
    pub fired: Vec<String>,
}

impl StepReport {
    pub fn summary(&self) -> String {
        let mut line = format!(
            "{:?} -> {} at {}",
            self.action, self.state.active_cell, self.state.focus
        );
        if !self.fired.is_empty() {
            line.push_str(&format!(" [{}]", self.fired.join(", ")));
        }
        line
    }
}

impl Session {
    pub fn from_layout(layout: &LayoutFile) -> Result<Self, FocusError> {
        let mut engine = FocusEngine::new();
        layout.apply(&mut engine)?;

        let fired = Rc::new(RefCell::new(Vec::new()));
        let names: Vec<String> = engine.grid().cells().map(|c| c.name().to_string()).collect();
        for name in names {
            let log = fired.clone();
            let label = format!("focus {name}");
            engine.register_focus_callback(
                name.as_str(),
                Box::new(move || {
                    debug!("{}", label);
                    log.borrow_mut().push(label.clone());
                }),
            );
            let log = fired.clone();
            let label = format!("blur {name}");
            engine.register_blur_callback(
                name.as_str(),
                Box::new(move || {
                    debug!("{}", label);
                    log.borrow_mut().push(label.clone());
                }),
            );
        }

        for entry in &layout.actions {
            let log = fired.clone();
            let label = format!("action {}", entry.label);
            engine.register_action(
                entry.at,
                entry.cell.as_str(),
                Box::new(move || log.borrow_mut().push(label.clone())),
            );
        }

        info!(
            "Session ready: {} cells, {} actions",
            engine.grid().cells().count(),
            layout.actions.len()
        );
        Ok(Self { engine, fired })
    }

    pub fn apply(&mut self, action: Action) -> StepReport {
        self.fired.borrow_mut().clear();
        let effect = self.engine.dispatch(action.clone());
        StepReport {
            action,
            effect,
            state: self.engine.snapshot(),
            fired: self.fired.borrow_mut().drain(..).collect(),
        }
    }

    pub fn engine(&self) -> &FocusEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut FocusEngine {
        &mut self.engine
    }
}

/// Applies `actions` in order, writing one JSON report per line.
pub fn replay<W: Write>(session: &mut Session, actions: &[Action], out: &mut W) -> io::Result<()> {
    for action in actions {
        let report = session.apply(action.clone());
        debug!("{}", report.summary());
        serde_json::to_writer(&mut *out, &report)?;
        writeln!(out)?;
    }
    out.flush()
}

struct RawModeGuard;

impl RawModeGuard {
    fn new() -> io::Result<Self> {
        enable_raw_mode()?;
        info!("Raw mode enabled");
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

/// Reads keys until Esc/q, printing a summary after every step.
pub fn interactive(session: &mut Session) -> io::Result<()> {
    let _raw_mode_guard = RawModeGuard::new()?;
    let mut stdout = io::stdout();
    // Raw mode disables output post-processing, so lines end in "\r\n".
    write!(
        stdout,
        "arrows/hjkl move, enter confirms, esc quits\r\n{} at {}\r\n",
        session.engine().state().active_cell,
        session.engine().state().focus
    )?;
    stdout.flush()?;

    loop {
        match poll_input(Duration::from_millis(250))? {
            Some(KeyInput::Quit) => break,
            Some(KeyInput::Navigate(action)) => {
                let report = session.apply(action);
                write!(stdout, "{}\r\n", report.summary())?;
                stdout.flush()?;
            }
            None => {}
        }
    }
    info!("Interactive session ended");
    Ok(())
}

/// Loads the resolved layout and either replays `moves` or goes interactive.
pub fn run(resolved: &ResolvedConfig, moves: Option<&str>) -> Result<(), DriverError> {
    let path = resolved.layout_path.as_deref().ok_or(DriverError::NoLayout)?;
    let layout = config::load_layout(path)?;
    let mut session = Session::from_layout(&layout)?;

    match moves {
        Some(script) => {
            let actions = parse_script(script)?;
            info!("Replaying {} moves", actions.len());
            let stdout = io::stdout();
            replay(&mut session, &actions, &mut stdout.lock())?;
        }
        None => interactive(&mut session)?,
    }
    Ok(())
}
