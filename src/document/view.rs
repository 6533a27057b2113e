//! View capability: what a document needs from anything displaying it.

use egui::Ui;

use crate::types::{DocumentId, SignalValue, ViewId};

/// Trait implemented by every presentation of a document.
///
/// A view holds a non-owning back-reference to its document (the
/// [`DocumentId`]) and is owned by that document while attached. The view
/// number assigned on attach lives in the document's registry, so only the
/// document ever writes it.
pub trait View {
    /// Identity of this view instance.
    fn id(&self) -> ViewId;

    /// The document this view renders.
    fn document_id(&self) -> DocumentId;

    /// Mark the view for redraw. Must not touch the document; the actual
    /// drawing happens on the next frame.
    fn refresh(&mut self);

    /// Draw the view from the document's current samples.
    fn show(&mut self, ui: &mut Ui, samples: &[SignalValue]);
}
