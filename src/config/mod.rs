//! Configuration module for the signal viewer
//!
//! This module handles persisted application configuration:
//! - Application state (recent files, last directory, UI preferences)
//! - Plot settings shared by every new view
//!
//! # App Data Location
//!
//! Application data is stored in the platform-appropriate location:
//! - **Linux**: `~/.local/share/dev.signal-docview/`
//! - **macOS**: `~/Library/Application Support/dev.signal-docview/`
//! - **Windows**: `%APPDATA%\dev.signal-docview\`
//!
//! # Files
//!
//! - `app_state.json` - Recent files list and UI preferences
//! - `plot_settings.toml` - Plot scaling and zoom settings
//! - `logs/` - Daily rolling log files
//!
//! # Example
//!
//! ```ignore
//! use signal_docview::config::AppState;
//!
//! let mut state = AppState::load_or_default();
//! state.add_recent_file("/data/pressure.txt");
//! state.save()?;
//! ```

pub mod settings;

pub use settings::*;

use crate::error::{Result, SignalError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Application identifier for data directories
pub const APP_ID: &str = "dev.signal-docview";

/// App state filename
pub const APP_STATE_FILE: &str = "app_state.json";

/// Plot settings filename
pub const PLOT_SETTINGS_FILE: &str = "plot_settings.toml";

/// Log directory name inside the app data directory
pub const LOG_DIR: &str = "logs";

/// Extension offered by the file dialogs
pub const SIGNAL_FILE_EXTENSION: &str = "txt";

/// Maximum number of recent files to remember
pub const MAX_RECENT_FILES: usize = 10;

// ==================== App Data Directory ====================

/// Get the application data directory path
pub fn app_data_dir() -> Option<PathBuf> {
    dirs_next::data_dir().map(|p| p.join(APP_ID))
}

/// Ensure the app data directory exists
pub fn ensure_app_data_dir() -> Result<PathBuf> {
    let dir = app_data_dir().ok_or_else(|| {
        SignalError::Config("Could not determine app data directory".to_string())
    })?;

    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| {
            SignalError::Config(format!("Failed to create app data directory: {}", e))
        })?;
    }

    Ok(dir)
}

/// Get the path to the app state file
pub fn app_state_path() -> Option<PathBuf> {
    app_data_dir().map(|p| p.join(APP_STATE_FILE))
}

// ==================== Recent File Entry ====================

/// A recently opened or saved signal file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentFile {
    /// Path to the file
    pub path: PathBuf,

    /// Last used timestamp (Unix seconds)
    pub last_used: u64,
}

impl RecentFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            last_used: unix_now(),
        }
    }

    /// File name for menu display
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// Check if the file still exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

// ==================== App State ====================

/// Persistent application state
///
/// User preferences and history that persist across sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppState {
    /// Version for future migration support
    #[serde(default = "default_app_state_version")]
    pub version: u32,

    /// Recently opened or saved files, most recent first
    #[serde(default)]
    pub recent_files: Vec<RecentFile>,

    /// Directory the file dialogs start in
    #[serde(default)]
    pub last_directory: Option<PathBuf>,

    /// UI preferences
    #[serde(default)]
    pub ui_preferences: UiPreferences,
}

fn default_app_state_version() -> u32 {
    1
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            version: 1,
            recent_files: Vec::new(),
            last_directory: None,
            ui_preferences: UiPreferences::default(),
        }
    }
}

impl AppState {
    /// Load app state from the default location
    pub fn load() -> Result<Self> {
        let path = app_state_path().ok_or_else(|| {
            SignalError::Config("Could not determine app state path".to_string())
        })?;
        Self::load_from(&path)
    }

    /// Load app state from an explicit path; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| SignalError::Config(format!("Failed to read app state: {}", e)))?;

        serde_json::from_str(&content)
            .map_err(|e| SignalError::Config(format!("Failed to parse app state: {}", e)))
    }

    /// Load app state, returning defaults on any error
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!("Failed to load app state, using defaults: {}", e);
            Self::default()
        })
    }

    /// Save app state to the default location
    pub fn save(&self) -> Result<()> {
        let dir = ensure_app_data_dir()?;
        self.save_to(&dir.join(APP_STATE_FILE))
    }

    /// Save app state to an explicit path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| SignalError::Config(format!("Failed to serialize app state: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| SignalError::Config(format!("Failed to write app state: {}", e)))
    }

    /// Add or refresh a recent file and remember its directory
    pub fn add_recent_file(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref().to_path_buf();

        self.recent_files.retain(|f| f.path != path);
        self.recent_files.insert(0, RecentFile::new(path.clone()));
        self.recent_files.truncate(MAX_RECENT_FILES);

        self.last_directory = path.parent().map(Path::to_path_buf);
    }

    /// Remove a file from recents
    pub fn remove_recent_file(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        self.recent_files.retain(|f| f.path != path);
    }

    /// Drop recent files that no longer exist
    pub fn cleanup_missing_files(&mut self) {
        self.recent_files.retain(|f| f.exists());
    }
}

/// UI preferences that persist across sessions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiPreferences {
    /// Enable dark mode
    #[serde(default = "default_true")]
    pub dark_mode: bool,

    /// Font scale factor
    #[serde(default = "default_font_scale")]
    pub font_scale: f32,

    /// Show the status bar
    #[serde(default = "default_true")]
    pub show_status_bar: bool,
}

fn default_true() -> bool {
    true
}

fn default_font_scale() -> f32 {
    1.0
}

impl Default for UiPreferences {
    fn default() -> Self {
        Self {
            dark_mode: true,
            font_scale: 1.0,
            show_status_bar: true,
        }
    }
}

// ==================== Tests ====================
