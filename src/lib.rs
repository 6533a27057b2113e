//! # Signal DocView: documents with multiple live views
//!
//! A desktop signal plotter built around a document/view core. A document
//! holds a series of timestamped values; any number of plot views can show
//! the same document, each in its own dock tab, and every mutation of the
//! document refreshes all of them.
//!
//! ## Architecture
//!
//! - **Document**: Owns samples and the registry of attached views
//! - **Controller**: Owns documents, maps host containers to views, and
//!   handles every user command as an [`controller::AppEvent`]
//! - **Frontend**: eframe/egui window with an egui_dock workspace and
//!   egui_plot views
//!
//! ## Configuration
//!
//! Application state (recent files, preferences) and plot settings are stored
//! in the platform-appropriate data directory under `dev.signal-docview`:
//!
//! - **Linux**: `~/.local/share/dev.signal-docview/`
//! - **macOS**: `~/Library/Application Support/dev.signal-docview/`
//! - **Windows**: `%APPDATA%\dev.signal-docview\`
//!
//! ## Example
//!
//! ```ignore
//! use signal_docview::{
//!     config::{AppState, PlotSettings},
//!     frontend::SignalsApp,
//! };
//!
//! fn main() -> eframe::Result<()> {
//!     let app_state = AppState::load_or_default();
//!     let plot_settings = PlotSettings::load_or_default();
//!
//!     eframe::run_native(
//!         "Signal Views",
//!         eframe::NativeOptions::default(),
//!         Box::new(|cc| Ok(Box::new(SignalsApp::new(cc, app_state, plot_settings)))),
//!     )
//! }
//! ```

pub mod app;
pub mod config;
pub mod controller;
pub mod document;
pub mod error;
pub mod frontend;
pub mod types;

// Re-export commonly used types
pub use app::SignalsApp;
pub use config::{AppState, PlotSettings};
pub use controller::{AppEvent, Controller, HostUi, Prompts};
pub use document::{Document, DocumentKind, SignalDocument, View};
pub use error::{ErrorKind, Result, SignalError};
pub use types::{ContainerId, DocumentId, SignalValue, ViewId};
