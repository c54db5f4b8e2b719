//! # Configuration
//!
//! Two kinds of file:
//!
//! - `~/.gridfocus/config.toml`: tool settings, resolved with a clear override
//!   hierarchy: defaults → config file → env vars → CLI flags. If missing on
//!   first run, a commented-out default is generated.
//! - layout files: a grid of cell names plus the focusable coordinates and
//!   confirm actions of each cell.
//!
//! ```toml
//! active_cell = "A"
//! start = [0, 0]
//! rows = [["A", "A", "B"], ["C", "C", "B"]]
//!
//! [focusables]
//! A = [[0, 0], [1, 0]]
//!
//! [[actions]]
//! cell = "A"
//! at = [1, 0]
//! label = "open"
//! ```

use log::{LevelFilter, debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::engine::FocusEngine;
use super::error::FocusError;
use super::geometry::Coord;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GridfocusConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Layout used when none is given on the command line. Relative to `~/.gridfocus/`.
    pub default_layout: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub file: Option<String>,
}

// ============================================================================
// Layout File
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct LayoutFile {
    #[serde(default)]
    pub active_cell: String,
    pub start: Option<Coord>,
    pub rows: Vec<Vec<String>>,
    #[serde(default)]
    pub focusables: BTreeMap<String, Vec<Coord>>,
    #[serde(default)]
    pub actions: Vec<ActionEntry>,
}

/// A labelled confirm action bound to one focusable element.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ActionEntry {
    pub cell: String,
    pub at: Coord,
    pub label: String,
}

impl LayoutFile {
    /// Builds the grid and registers every focusable coordinate.
    ///
    /// The grid is only replaced once all focusables are known to be valid.
    pub fn apply(&self, engine: &mut FocusEngine) -> Result<(), FocusError> {
        for (cell, coords) in &self.focusables {
            if let Some(coord) = coords.iter().find(|c| c.is_negative()) {
                return Err(FocusError::NegativeCoord {
                    cell: cell.clone(),
                    coord: *coord,
                });
            }
        }
        engine.build_grid(&self.rows, &self.active_cell, self.start)?;
        for (cell, coords) in &self.focusables {
            engine.register_focusables(cell, coords.iter().copied().map(Some))?;
        }
        Ok(())
    }
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;
pub const DEFAULT_LOG_FILE: &str = "gridfocus.log";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub layout_path: Option<PathBuf>,
    pub log_level: LevelFilter,
    pub log_file: PathBuf,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("layout error: {0}")]
    Layout(#[from] FocusError),
}

// ============================================================================
// Loading
// ============================================================================

/// Returns `~/.gridfocus/`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".gridfocus"))
}

/// Returns the path to `~/.gridfocus/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load config from `~/.gridfocus/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `GridfocusConfig::default()`.
pub fn load_config() -> Result<GridfocusConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(GridfocusConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(GridfocusConfig::default());
    }

    load_config_from(&path)
}

/// Load config from an explicit path. Missing or malformed files are errors.
pub fn load_config_from(path: &Path) -> Result<GridfocusConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: GridfocusConfig = toml::from_str(&contents)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Reads `~/.gridfocus/config.toml` without generating it or logging.
///
/// For settings the logger itself needs; anything unreadable falls back to defaults.
pub fn peek_config() -> GridfocusConfig {
    config_path()
        .map(|path| peek_config_from(&path))
        .unwrap_or_default()
}

pub fn peek_config_from(path: &Path) -> GridfocusConfig {
    fs::read_to_string(path)
        .ok()
        .and_then(|contents| toml::from_str(&contents).ok())
        .unwrap_or_default()
}

/// Parses a layout file.
pub fn load_layout(path: &Path) -> Result<LayoutFile, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let layout: LayoutFile = toml::from_str(&contents)?;
    info!(
        "Loaded layout {} ({} rows, {} cells with focusables)",
        path.display(),
        layout.rows.len(),
        layout.focusables.len()
    );
    Ok(layout)
}

fn generate_default_config(path: &Path) {
    let default_content = r#"# gridfocus Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# default_layout = "layout.toml"     # Path relative to ~/.gridfocus/, or GRIDFOCUS_LAYOUT

# [logging]
# level = "debug"                    # "off", "error", "warn", "info", "debug", "trace"
# file = "gridfocus.log"
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(
    config: &GridfocusConfig,
    cli_layout: Option<&Path>,
    cli_log_level: Option<LevelFilter>,
) -> ResolvedConfig {
    // Layout: CLI → env → config (relative to ~/.gridfocus/)
    let layout_path = cli_layout
        .map(Path::to_path_buf)
        .or_else(|| std::env::var("GRIDFOCUS_LAYOUT").ok().map(PathBuf::from))
        .or_else(|| {
            config
                .general
                .default_layout
                .as_ref()
                .map(|file| match config_dir() {
                    Some(dir) => dir.join(file),
                    None => PathBuf::from(file),
                })
        });

    // Log level: CLI → env → config → default
    let log_level = cli_log_level
        .or_else(|| parse_level(std::env::var("GRIDFOCUS_LOG_LEVEL").ok().as_deref()))
        .or_else(|| parse_level(config.logging.level.as_deref()))
        .unwrap_or(DEFAULT_LOG_LEVEL);

    let log_file = config
        .logging
        .file
        .clone()
        .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string())
        .into();

    ResolvedConfig {
        layout_path,
        log_level,
        log_file,
    }
}

fn parse_level(value: Option<&str>) -> Option<LevelFilter> {
    let value = value?;
    match value.parse() {
        Ok(level) => Some(level),
        Err(_) => {
            warn!("Ignoring unknown log level {:?}", value);
            None
        }
    }
}
