//! Workspace module for the dock of document views
//!
//! [`DockHost`] implements the controller's [`HostUi`] on top of egui_dock:
//! every container is a dock tab keyed by [`ContainerId`], labeled with the
//! document name. Tabs can be rearranged and split via drag-and-drop.

pub mod tab_viewer;

use std::collections::HashMap;

use egui_dock::DockState;

use crate::controller::HostUi;
use crate::types::ContainerId;

/// Dock state plus tab labels and the current selection.
pub struct DockHost {
    pub dock_state: DockState<ContainerId>,
    pub labels: HashMap<ContainerId, String>,
    selected: Option<ContainerId>,
}

impl DockHost {
    pub fn new() -> Self {
        Self {
            dock_state: DockState::new(vec![]),
            labels: HashMap::new(),
            selected: None,
        }
    }

    pub fn label(&self, id: ContainerId) -> Option<&str> {
        self.labels.get(&id).map(String::as_str)
    }

    fn focused_tab(&mut self) -> Option<ContainerId> {
        self.dock_state.find_active_focused().map(|(_, tab)| *tab)
    }

    /// Pick up a selection made by the user in the dock. Returns true when it
    /// changed, so the caller can notify the controller.
    pub fn sync_selection(&mut self) -> bool {
        match self.focused_tab() {
            Some(focused) if self.selected != Some(focused) => {
                self.selected = Some(focused);
                true
            }
            _ => false,
        }
    }
}

impl Default for DockHost {
    fn default() -> Self {
        Self::new()
    }
}

impl HostUi for DockHost {
    fn add_container(&mut self, label: &str) -> ContainerId {
        let id = ContainerId::next();
        self.labels.insert(id, label.to_string());
        self.dock_state.push_to_first_leaf(id);
        id
    }

    fn select_container(&mut self, id: ContainerId) {
        if let Some(tab_location) = self.dock_state.find_tab(&id) {
            self.dock_state.set_active_tab(tab_location);
            self.selected = Some(id);
        }
    }

    fn remove_container(&mut self, id: ContainerId) -> bool {
        self.labels.remove(&id);
        let Some(tab_location) = self.dock_state.find_tab(&id) else {
            return false;
        };
        self.dock_state.remove_tab(tab_location);

        self.selected = self
            .focused_tab()
            .or_else(|| self.dock_state.iter_all_tabs().map(|(_, tab)| *tab).next());
        true
    }

    fn selected_container(&self) -> Option<ContainerId> {
        self.selected
    }

    fn container_count(&self) -> usize {
        self.labels.len()
    }
}
