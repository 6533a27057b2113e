//! Documents and their attached views
//!
//! A document owns one unit of data plus the views currently displaying it.
//! Every data-mutating operation on a document ends by refreshing all of its
//! attached views; the broadcast itself is private to this module tree, so
//! only document kinds can trigger it.
//!
//! # Main Types
//!
//! - [`DocumentCore`] - Name, identity and the attached-view registry shared by all kinds
//! - [`Document`] - Tagged variant over the concrete document kinds
//! - [`View`] - Capability a document notifies on change
//! - [`SignalDocument`] - Timestamped numeric samples, persisted as tab-separated text

pub mod format;
mod signal;
mod view;

pub use signal::SignalDocument;
pub use view::View;

use std::path::Path;

use egui::Ui;

use crate::error::{Result, SignalError};
use crate::types::{DocumentId, ViewId};

/// A view registered with a document, with the number it was given on attach.
struct AttachedView {
    number: u32,
    view: Box<dyn View>,
}

/// State and behavior common to every document kind.
pub struct DocumentCore {
    id: DocumentId,
    name: String,
    views: Vec<AttachedView>,
}

impl DocumentCore {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: DocumentId::next(),
            name: name.into(),
            views: Vec::new(),
        }
    }

    pub fn id(&self) -> DocumentId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Register a view and return the number assigned to it.
    ///
    /// The number is one more than the count of views attached before this
    /// call. Fails if the view renders another document or is already attached.
    pub(crate) fn attach_view(&mut self, view: Box<dyn View>) -> Result<u32> {
        if view.document_id() != self.id {
            return Err(SignalError::InvalidOperation(format!(
                "{} shows {}, cannot attach it to {}",
                view.id(),
                view.document_id(),
                self.id
            )));
        }

        let view_id = view.id();
        if self.views.iter().any(|v| v.view.id() == view_id) {
            return Err(SignalError::InvalidOperation(format!(
                "{} is already attached to '{}'",
                view_id, self.name
            )));
        }

        let number = self.views.len() as u32 + 1;
        self.views.push(AttachedView { number, view });
        tracing::debug!("Attached {} to '{}' as view {}", view_id, self.name, number);
        Ok(number)
    }

    /// Remove a view from the registry and hand it back to the caller.
    ///
    /// Remaining views keep their numbers.
    pub(crate) fn detach_view(&mut self, view_id: ViewId) -> Result<Box<dyn View>> {
        let index = self
            .views
            .iter()
            .position(|v| v.view.id() == view_id)
            .ok_or_else(|| {
                SignalError::NotFound(format!("{} is not attached to '{}'", view_id, self.name))
            })?;

        tracing::debug!("Detached {} from '{}'", view_id, self.name);
        Ok(self.views.remove(index).view)
    }

    pub fn has_any_view(&self) -> bool {
        !self.views.is_empty()
    }

    pub fn view_count(&self) -> usize {
        self.views.len()
    }

    /// Number assigned to an attached view, if it is attached.
    pub fn view_number(&self, view_id: ViewId) -> Option<u32> {
        self.views
            .iter()
            .find(|v| v.view.id() == view_id)
            .map(|v| v.number)
    }

    /// Ids of the attached views, in attachment order.
    pub fn view_ids(&self) -> impl Iterator<Item = ViewId> + '_ {
        self.views.iter().map(|v| v.view.id())
    }

    fn view_mut(&mut self, view_id: ViewId) -> Option<&mut Box<dyn View>> {
        self.views
            .iter_mut()
            .find(|v| v.view.id() == view_id)
            .map(|v| &mut v.view)
    }

    /// Ask every attached view to refresh. A no-op without views.
    fn update_all_views(&mut self) {
        for attached in &mut self.views {
            attached.view.refresh();
        }
    }
}

/// Behavior every concrete document kind provides on top of [`DocumentCore`].
pub trait DocumentKind {
    fn core(&self) -> &DocumentCore;
    fn core_mut(&mut self) -> &mut DocumentCore;

    /// Replace the document's data from `path`. On success the attached views
    /// have been refreshed; on failure the data is unchanged.
    fn load(&mut self, path: &Path) -> Result<()>;

    /// Write the document's data to `path` without changing it.
    fn save(&self, path: &Path) -> Result<()>;

    /// Draw one attached view from this document's data.
    fn show_view(&mut self, view_id: ViewId, ui: &mut Ui) -> Result<()>;
}

/// An open document of any supported kind.
pub enum Document {
    Signal(SignalDocument),
}

impl Document {
    fn kind(&self) -> &dyn DocumentKind {
        match self {
            Document::Signal(doc) => doc,
        }
    }

    fn kind_mut(&mut self) -> &mut dyn DocumentKind {
        match self {
            Document::Signal(doc) => doc,
        }
    }

    pub fn id(&self) -> DocumentId {
        self.kind().core().id()
    }

    pub fn name(&self) -> &str {
        self.kind().core().name()
    }

    pub(crate) fn attach_view(&mut self, view: Box<dyn View>) -> Result<u32> {
        self.kind_mut().core_mut().attach_view(view)
    }

    pub(crate) fn detach_view(&mut self, view_id: ViewId) -> Result<Box<dyn View>> {
        self.kind_mut().core_mut().detach_view(view_id)
    }

    pub fn has_any_view(&self) -> bool {
        self.kind().core().has_any_view()
    }

    pub fn view_count(&self) -> usize {
        self.kind().core().view_count()
    }

    pub fn view_number(&self, view_id: ViewId) -> Option<u32> {
        self.kind().core().view_number(view_id)
    }

    pub fn load(&mut self, path: &Path) -> Result<()> {
        self.kind_mut().load(path)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        self.kind().save(path)
    }

    pub fn show_view(&mut self, view_id: ViewId, ui: &mut Ui) -> Result<()> {
        self.kind_mut().show_view(view_id, ui)
    }

    pub fn as_signal(&self) -> Option<&SignalDocument> {
        match self {
            Document::Signal(doc) => Some(doc),
        }
    }

    pub fn as_signal_mut(&mut self) -> Option<&mut SignalDocument> {
        match self {
            Document::Signal(doc) => Some(doc),
        }
    }
}

impl From<SignalDocument> for Document {
    fn from(doc: SignalDocument) -> Self {
        Document::Signal(doc)
    }
}
