//! Application controller
//!
//! The controller owns every open document, keeps the mapping from host UI
//! containers to views, and tracks which view is active. All user commands
//! arrive as [`AppEvent`]s and are handled synchronously on the UI thread.
//!
//! # Lifecycle
//!
//! - A document is created by "new" or "open" together with its first view.
//! - Further views are attached with "new view"; each gets its own container.
//! - Closing a view detaches it and removes its container; closing the last
//!   view of a document drops the document.
//!
//! # Errors
//!
//! Operations return [`Result`]; [`Controller::process_events`] reports
//! failures through [`Prompts::report_error`] and leaves the document and
//! view registrations consistent.

mod events;
mod host;

pub use events::{AppEvent, EventQueue, EventSender, FileActivity};
pub use host::{HostUi, Prompts};

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use egui::Ui;

use crate::document::{Document, SignalDocument, View};
use crate::error::{Result, ResultExt, SignalError};
use crate::types::{ContainerId, DocumentId, ViewId};

/// Builds the view shown for a newly created view slot.
pub type ViewFactory = Box<dyn Fn(DocumentId) -> Box<dyn View>>;

/// Which view a host container shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerEntry {
    pub view: ViewId,
    pub document: DocumentId,
}

/// Owner of all documents and coordinator of every user command.
pub struct Controller {
    documents: Vec<Document>,
    active_view: Option<ViewId>,
    containers: HashMap<ContainerId, ContainerEntry>,
    view_factory: ViewFactory,
    seed_new_documents: bool,
    events: EventQueue,
}

impl Controller {
    /// Create a controller with no documents and no active view.
    pub fn new(view_factory: ViewFactory) -> Self {
        Self {
            documents: Vec::new(),
            active_view: None,
            containers: HashMap::new(),
            view_factory,
            seed_new_documents: false,
            events: EventQueue::new(),
        }
    }

    /// Seed newly created documents with demo samples.
    pub fn with_demo_seeding(mut self, enabled: bool) -> Self {
        self.seed_new_documents = enabled;
        self
    }

    /// Producer handle for posting events to this controller.
    pub fn events(&self) -> EventSender {
        self.events.sender()
    }

    pub fn has_pending_events(&self) -> bool {
        !self.events.is_empty()
    }

    // ==================== Queries ====================

    pub fn documents(&self) -> impl Iterator<Item = &Document> {
        self.documents.iter()
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    pub fn document(&self, id: DocumentId) -> Option<&Document> {
        self.documents.iter().find(|d| d.id() == id)
    }

    fn document_mut(&mut self, id: DocumentId) -> Option<&mut Document> {
        self.documents.iter_mut().find(|d| d.id() == id)
    }

    /// Data of an open signal document. Its mutations refresh every view;
    /// the view registry stays under the controller's control.
    pub fn signal_mut(&mut self, id: DocumentId) -> Option<&mut SignalDocument> {
        self.document_mut(id)?.as_signal_mut()
    }

    pub fn active_view(&self) -> Option<ViewId> {
        self.active_view
    }

    /// The document shown by the active view.
    pub fn active_document(&self) -> Option<&Document> {
        let id = self.active_document_id()?;
        self.document(id)
    }

    /// Data of the document shown by the active view.
    pub fn active_signal_mut(&mut self) -> Option<&mut SignalDocument> {
        let id = self.active_document_id()?;
        self.signal_mut(id)
    }

    fn active_document_id(&self) -> Option<DocumentId> {
        let view = self.active_view?;
        self.containers
            .values()
            .find(|entry| entry.view == view)
            .map(|entry| entry.document)
    }

    /// The document a view renders.
    pub fn document_for_view(&self, view: ViewId) -> Option<&Document> {
        self.document(self.entry_for_view(view)?.1.document)
    }

    pub fn container_entry(&self, container: ContainerId) -> Option<ContainerEntry> {
        self.containers.get(&container).copied()
    }

    /// Container hosting a view. A view without a container means the
    /// controller and host UI are out of sync.
    pub fn container_for_view(&self, view: ViewId) -> Result<ContainerId> {
        self.entry_for_view(view)
            .map(|(container, _)| container)
            .ok_or_else(|| SignalError::NotFound(format!("No container hosts {}", view)))
    }

    fn entry_for_view(&self, view: ViewId) -> Option<(ContainerId, ContainerEntry)> {
        self.containers
            .iter()
            .find(|(_, entry)| entry.view == view)
            .map(|(container, entry)| (*container, *entry))
    }

    // ==================== Operations ====================

    /// Ask for a name, then create an empty document with one active view.
    pub fn new_document(&mut self, host: &mut dyn HostUi, prompts: &mut dyn Prompts) -> Result<()> {
        let Some(name) = prompts.document_name() else {
            tracing::debug!("New document cancelled");
            return Ok(());
        };

        let document = if self.seed_new_documents {
            SignalDocument::with_demo_samples(name)
        } else {
            SignalDocument::new(name)
        };
        self.register_with_view(host, document.into())?;
        Ok(())
    }

    /// Ask for a file, then open it as a new document.
    pub fn open_document(
        &mut self,
        host: &mut dyn HostUi,
        prompts: &mut dyn Prompts,
    ) -> Result<Option<PathBuf>> {
        let Some(path) = prompts.open_path() else {
            tracing::debug!("Open document cancelled");
            return Ok(None);
        };
        self.open_path(host, &path)?;
        Ok(Some(path))
    }

    /// Open `path` as a new document named after the file.
    ///
    /// The document and its view are registered before loading, so a failed
    /// load leaves an empty document open and returns the error.
    pub fn open_path(&mut self, host: &mut dyn HostUi, path: &Path) -> Result<DocumentId> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let id = self.register_with_view(host, SignalDocument::new(name).into())?;

        let document = self
            .document_mut(id)
            .ok_or_else(|| SignalError::NotFound(format!("{} vanished while opening", id)))?;
        document
            .load(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        Ok(id)
    }

    /// Ask for a destination and save the active document there.
    pub fn save_active_document(&self, prompts: &mut dyn Prompts) -> Result<Option<PathBuf>> {
        let Some(document) = self.active_document() else {
            return Ok(None);
        };

        let Some(path) = prompts.save_path(document.name()) else {
            tracing::debug!("Save cancelled");
            return Ok(None);
        };

        document
            .save(&path)
            .with_context(|| format!("Failed to save {}", path.display()))?;
        Ok(Some(path))
    }

    /// Close the active view. Does nothing when no documents are open.
    pub fn close_active_view(&mut self, host: &mut dyn HostUi) -> Result<()> {
        if self.documents.is_empty() {
            return Ok(());
        }
        let Some(view) = self.active_view else {
            return Ok(());
        };
        self.close_view(host, view)
    }

    /// Close a view: detach it, remove its container, and drop its document
    /// if that was the document's last view. The active view is then
    /// re-derived from the host selection.
    pub fn close_view(&mut self, host: &mut dyn HostUi, view: ViewId) -> Result<()> {
        let container = self.container_for_view(view)?;
        let document_id = self.containers[&container].document;

        let index = self
            .documents
            .iter()
            .position(|d| d.id() == document_id)
            .ok_or_else(|| SignalError::NotFound(format!("{} is not open", document_id)))?;

        let document = &mut self.documents[index];
        document.detach_view(view)?;
        self.containers.remove(&container);
        if !host.remove_container(container) {
            tracing::warn!("Host had no container for {}", view);
        }
        tracing::info!("Closed {} of '{}'", view, document.name());

        if !document.has_any_view() {
            let closed = self.documents.remove(index);
            tracing::info!("Closed document '{}'", closed.name());
        }

        if self.active_view == Some(view) {
            self.active_view = None;
        }
        self.update_active_view(host);
        Ok(())
    }

    /// Add and activate another view of the active document.
    pub fn create_view_for_active_document(&mut self, host: &mut dyn HostUi) -> Result<()> {
        let Some(document) = self.active_document_id() else {
            return Ok(());
        };
        self.create_view(host, document, true)?;
        Ok(())
    }

    /// Re-derive the active view from the host's selected container.
    pub fn update_active_view(&mut self, host: &dyn HostUi) {
        if host.container_count() == 0 {
            self.active_view = None;
            return;
        }

        self.active_view = host.selected_container().and_then(|container| {
            let entry = self.containers.get(&container);
            if entry.is_none() {
                tracing::warn!("Selected container {:?} has no view", container);
            }
            entry.map(|e| e.view)
        });
    }

    /// Create a view for `document`, attach it, and give it a container
    /// labeled with the document name (plus `:n` for the n-th view).
    pub fn create_view(
        &mut self,
        host: &mut dyn HostUi,
        document: DocumentId,
        activate: bool,
    ) -> Result<ViewId> {
        let view = (self.view_factory)(document);
        let view_id = view.id();

        let doc = self
            .document_mut(document)
            .ok_or_else(|| SignalError::NotFound(format!("{} is not open", document)))?;
        let number = doc.attach_view(view)?;

        let label = if number > 1 {
            format!("{}:{}", doc.name(), number)
        } else {
            doc.name().to_string()
        };

        let container = host.add_container(&label);
        self.containers.insert(
            container,
            ContainerEntry {
                view: view_id,
                document,
            },
        );
        tracing::info!("Created {} as '{}'", view_id, label);

        if activate {
            host.select_container(container);
            self.active_view = Some(view_id);
        }
        Ok(view_id)
    }

    /// Draw the view hosted by `container`.
    pub fn show_container(&mut self, container: ContainerId, ui: &mut Ui) -> Result<()> {
        let entry = self
            .container_entry(container)
            .ok_or_else(|| SignalError::NotFound(format!("Container {:?} has no view", container)))?;
        let document = self
            .document_mut(entry.document)
            .ok_or_else(|| SignalError::NotFound(format!("{} is not open", entry.document)))?;
        document.show_view(entry.view, ui)
    }

    /// Register a document together with its first, active view. If the view
    /// cannot be created the document is dropped again, so no document is
    /// ever left open without a view.
    fn register_with_view(&mut self, host: &mut dyn HostUi, document: Document) -> Result<DocumentId> {
        let id = document.id();
        tracing::info!("Registered document '{}' ({})", document.name(), id);
        self.documents.push(document);

        if let Err(e) = self.create_view(host, id, true) {
            self.documents.retain(|d| d.id() != id);
            tracing::warn!("Dropped {} without a view: {}", id, e);
            return Err(e);
        }
        Ok(id)
    }

    // ==================== Event handling ====================

    /// Handle one event.
    pub fn handle_event(
        &mut self,
        event: AppEvent,
        host: &mut dyn HostUi,
        prompts: &mut dyn Prompts,
    ) -> Result<Option<FileActivity>> {
        match event {
            AppEvent::NewDocument => self.new_document(host, prompts).map(|_| None),
            AppEvent::OpenDocument => Ok(self
                .open_document(host, prompts)?
                .map(FileActivity::Opened)),
            AppEvent::OpenRecent(path) => {
                if !path.exists() {
                    return Err(SignalError::Io(std::io::Error::new(
                        std::io::ErrorKind::NotFound,
                        format!("{} no longer exists", path.display()),
                    )));
                }
                self.open_path(host, &path)?;
                Ok(Some(FileActivity::Opened(path)))
            }
            AppEvent::SaveActiveDocument => {
                Ok(self.save_active_document(prompts)?.map(FileActivity::Saved))
            }
            AppEvent::CloseActiveView => self.close_active_view(host).map(|_| None),
            AppEvent::CloseView(view) => self.close_view(host, view).map(|_| None),
            AppEvent::NewViewForActiveDocument => {
                self.create_view_for_active_document(host).map(|_| None)
            }
            AppEvent::SelectionChanged => {
                self.update_active_view(host);
                Ok(None)
            }
        }
    }

    /// Drain the event queue, handling events in order. Failures are logged
    /// and reported to the user; the remaining events still run.
    pub fn process_events(
        &mut self,
        host: &mut dyn HostUi,
        prompts: &mut dyn Prompts,
    ) -> Vec<FileActivity> {
        let mut activity = Vec::new();

        for event in self.events.drain() {
            let title = event_title(&event);
            match self.handle_event(event, host, prompts) {
                Ok(Some(done)) => activity.push(done),
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!("{}: {}", title, e);
                    prompts.report_error(title, &e.to_string());
                }
            }
        }

        activity
    }
}

fn event_title(event: &AppEvent) -> &'static str {
    match event {
        AppEvent::NewDocument => "New Document",
        AppEvent::OpenDocument | AppEvent::OpenRecent(_) => "Open Document",
        AppEvent::SaveActiveDocument => "Save Document",
        AppEvent::CloseActiveView | AppEvent::CloseView(_) => "Close View",
        AppEvent::NewViewForActiveDocument => "New View",
        AppEvent::SelectionChanged => "Select View",
    }
}
