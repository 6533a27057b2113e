//! Collaborators the controller drives but does not own.

use std::path::PathBuf;

use crate::types::ContainerId;

/// Labeled containers (tabs) in the host window, one per view.
pub trait HostUi {
    /// Create a container with the given label and return its id.
    fn add_container(&mut self, label: &str) -> ContainerId;

    /// Make a container the selected one.
    fn select_container(&mut self, id: ContainerId);

    /// Remove a container. Returns false if it did not exist.
    fn remove_container(&mut self, id: ContainerId) -> bool;

    /// The currently selected container, if any.
    fn selected_container(&self) -> Option<ContainerId>;

    fn container_count(&self) -> usize;
}

/// User prompts. Each returns `None` when the user cancels.
pub trait Prompts {
    /// Ask for the name of a new document.
    fn document_name(&mut self) -> Option<String>;

    /// Ask for a file to open.
    fn open_path(&mut self) -> Option<PathBuf>;

    /// Ask where to save a document.
    fn save_path(&mut self, suggested_name: &str) -> Option<PathBuf>;

    /// Tell the user an operation failed.
    fn report_error(&mut self, title: &str, message: &str);
}
