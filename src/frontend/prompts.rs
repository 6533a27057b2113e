//! Native prompts backing the controller's user interaction
//!
//! File choosers and error boxes use `rfd`. The document name comes from the
//! in-window [`NewDocumentDialog`](super::dialogs::NewDocumentDialog): the
//! dialog stores the confirmed name here before posting the event, and the
//! controller takes it when it handles the event.

use std::path::PathBuf;

use crate::config::SIGNAL_FILE_EXTENSION;
use crate::controller::Prompts;

/// Prompt implementation for the desktop frontend
#[derive(Debug, Default)]
pub struct NativePrompts {
    pending_name: Option<String>,
    /// Directory the file choosers open in
    pub start_dir: Option<PathBuf>,
    last_error: Option<String>,
}

impl NativePrompts {
    /// Prompts whose file choosers open in `start_dir`
    pub fn with_start_dir(start_dir: Option<PathBuf>) -> Self {
        Self {
            start_dir,
            ..Self::default()
        }
    }

    /// Hand a confirmed document name to the next "new document" request
    pub fn set_pending_name(&mut self, name: impl Into<String>) {
        self.pending_name = Some(name.into());
    }

    /// Most recent error shown to the user
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    fn file_dialog(&self, title: &str) -> rfd::FileDialog {
        let dialog = rfd::FileDialog::new()
            .set_title(title)
            .add_filter("Signal files", &[SIGNAL_FILE_EXTENSION])
            .add_filter("All files", &["*"]);

        match &self.start_dir {
            Some(dir) => dialog.set_directory(dir),
            None => dialog,
        }
    }
}

impl Prompts for NativePrompts {
    fn document_name(&mut self) -> Option<String> {
        self.pending_name.take()
    }

    fn open_path(&mut self) -> Option<PathBuf> {
        self.file_dialog("Open Signal").pick_file()
    }

    fn save_path(&mut self, suggested_name: &str) -> Option<PathBuf> {
        self.file_dialog("Save Signal")
            .set_file_name(suggested_name)
            .save_file()
    }

    fn report_error(&mut self, title: &str, message: &str) {
        self.last_error = Some(format!("{}: {}", title, message));

        rfd::MessageDialog::new()
            .set_level(rfd::MessageLevel::Error)
            .set_title(title)
            .set_description(message)
            .set_buttons(rfd::MessageButtons::Ok)
            .show();
    }
}
