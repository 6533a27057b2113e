//! TabViewer implementation for the workspace
//!
//! Draws each dock tab by asking the controller to render the view that
//! the tab's container hosts. Closing a tab posts an event instead of
//! removing it directly, so the controller stays the only owner of the
//! container-to-view mapping.

use std::collections::HashMap;

use egui::{Id, Ui, WidgetText};
use egui_dock::widgets::tab_viewer::OnCloseResponse;

use crate::controller::{AppEvent, Controller, EventSender};
use crate::types::ContainerId;

/// Tab viewer that bridges egui_dock with the controller.
pub struct WorkspaceTabViewer<'a> {
    pub controller: &'a mut Controller,
    pub labels: &'a HashMap<ContainerId, String>,
    pub events: &'a EventSender,
}

impl egui_dock::TabViewer for WorkspaceTabViewer<'_> {
    type Tab = ContainerId;

    fn title(&mut self, tab: &mut ContainerId) -> WidgetText {
        self.labels
            .get(tab)
            .map(|label| WidgetText::from(label.as_str()))
            .unwrap_or_else(|| WidgetText::from("Unknown"))
    }

    fn id(&mut self, tab: &mut ContainerId) -> Id {
        Id::new(("view_container", tab.0))
    }

    fn ui(&mut self, ui: &mut Ui, tab: &mut ContainerId) {
        if let Err(e) = self.controller.show_container(*tab, ui) {
            tracing::warn!("Cannot draw container {:?}: {}", tab, e);
            ui.label(e.to_string());
        }
    }

    fn on_close(&mut self, tab: &mut ContainerId) -> OnCloseResponse {
        match self.controller.container_entry(*tab) {
            Some(entry) => self.events.send(AppEvent::CloseView(entry.view)),
            None => tracing::warn!("Close requested for unknown container {:?}", tab),
        }
        OnCloseResponse::Ignore
    }

    fn closeable(&mut self, _tab: &mut ContainerId) -> bool {
        true
    }
}
