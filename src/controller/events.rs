//! UI events handled by the controller
//!
//! Menu items, keyboard shortcuts, dialogs and the dock tab viewer post
//! events while the frame is being drawn; the controller drains the queue
//! once per frame on the UI thread.

use std::path::PathBuf;

use crossbeam_channel::{unbounded, Receiver, Sender};

use crate::types::ViewId;

/// A user-triggered request for the controller
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// File → New: create a named document with one view
    NewDocument,
    /// File → Open: load a document from a chosen file
    OpenDocument,
    /// File → Open Recent: load a document from a known path
    OpenRecent(PathBuf),
    /// File → Save: write the active document to a chosen file
    SaveActiveDocument,
    /// File → Close: close the active view
    CloseActiveView,
    /// Close a specific view (tab close button)
    CloseView(ViewId),
    /// Window → New View: add a view to the active document
    NewViewForActiveDocument,
    /// The host UI selected a different container
    SelectionChanged,
}

/// Result of a handled event that the frontend may want to remember
#[derive(Debug, Clone, PartialEq)]
pub enum FileActivity {
    Opened(PathBuf),
    Saved(PathBuf),
}

/// Cloneable producer side of the event queue
#[derive(Debug, Clone)]
pub struct EventSender(Sender<AppEvent>);

impl EventSender {
    pub fn send(&self, event: AppEvent) {
        if let Err(e) = self.0.send(event) {
            tracing::warn!("Dropped UI event, controller queue is gone: {:?}", e.0);
        }
    }
}

/// Single-consumer event queue owned by the controller
#[derive(Debug)]
pub struct EventQueue {
    tx: Sender<AppEvent>,
    rx: Receiver<AppEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self { tx, rx }
    }

    pub fn sender(&self) -> EventSender {
        EventSender(self.tx.clone())
    }

    /// Take every pending event in arrival order
    pub fn drain(&self) -> Vec<AppEvent> {
        self.rx.try_iter().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}
