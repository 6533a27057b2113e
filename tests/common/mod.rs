//! Common test utilities and helpers

#![allow(dead_code)] // Test utilities may not all be used in every test file

use std::cell::{Cell, RefCell};
use std::path::PathBuf;
use std::rc::Rc;

use mockall::mock;
use signal_docview::controller::{Controller, HostUi, Prompts};
use signal_docview::document::View;
use signal_docview::types::{ContainerId, DocumentId, SignalValue, ViewId};

/// A view that only counts refreshes
pub struct RecordingView {
    id: ViewId,
    document: DocumentId,
    refreshes: Rc<Cell<usize>>,
}

impl RecordingView {
    pub fn new(document: DocumentId) -> (Self, Rc<Cell<usize>>) {
        let refreshes = Rc::new(Cell::new(0));
        let view = Self {
            id: ViewId::next(),
            document,
            refreshes: Rc::clone(&refreshes),
        };
        (view, refreshes)
    }
}

impl View for RecordingView {
    fn id(&self) -> ViewId {
        self.id
    }

    fn document_id(&self) -> DocumentId {
        self.document
    }

    fn refresh(&mut self) {
        self.refreshes.set(self.refreshes.get() + 1);
    }

    fn show(&mut self, _ui: &mut egui::Ui, _samples: &[SignalValue]) {}
}

/// Refresh counters of every view a test controller created, in creation order
pub type ViewLog = Rc<RefCell<Vec<(ViewId, Rc<Cell<usize>>)>>>;

/// Controller whose factory builds [`RecordingView`]s
pub fn recording_controller() -> (Controller, ViewLog) {
    let log: ViewLog = Rc::default();
    let factory_log = Rc::clone(&log);
    let controller = Controller::new(Box::new(move |document| {
        let (view, refreshes) = RecordingView::new(document);
        factory_log.borrow_mut().push((view.id(), refreshes));
        Box::new(view) as Box<dyn View>
    }));
    (controller, log)
}

pub fn refreshes_of(log: &ViewLog, view: ViewId) -> usize {
    log.borrow()
        .iter()
        .find(|(id, _)| *id == view)
        .map(|(_, count)| count.get())
        .unwrap_or_default()
}

/// In-memory host UI. Removing the selected container selects the last one
/// left, like a tab strip does.
#[derive(Debug, Default)]
pub struct FakeHost {
    pub containers: Vec<(ContainerId, String)>,
    pub selected: Option<ContainerId>,
}

impl FakeHost {
    pub fn labels(&self) -> Vec<&str> {
        self.containers.iter().map(|(_, l)| l.as_str()).collect()
    }
}

impl HostUi for FakeHost {
    fn add_container(&mut self, label: &str) -> ContainerId {
        let id = ContainerId::next();
        self.containers.push((id, label.to_string()));
        id
    }

    fn select_container(&mut self, id: ContainerId) {
        if self.containers.iter().any(|(c, _)| *c == id) {
            self.selected = Some(id);
        }
    }

    fn remove_container(&mut self, id: ContainerId) -> bool {
        let before = self.containers.len();
        self.containers.retain(|(c, _)| *c != id);
        if self.selected == Some(id) || self.containers.is_empty() {
            self.selected = self.containers.last().map(|(c, _)| *c);
        }
        before != self.containers.len()
    }

    fn selected_container(&self) -> Option<ContainerId> {
        self.selected
    }

    fn container_count(&self) -> usize {
        self.containers.len()
    }
}

/// Prompts with fixed answers that record reported errors
#[derive(Debug, Default)]
pub struct ScriptedPrompts {
    pub name: Option<String>,
    pub open: Option<PathBuf>,
    pub save: Option<PathBuf>,
    pub errors: Vec<(String, String)>,
}

impl ScriptedPrompts {
    pub fn named(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            ..Self::default()
        }
    }
}

impl Prompts for ScriptedPrompts {
    fn document_name(&mut self) -> Option<String> {
        self.name.clone()
    }

    fn open_path(&mut self) -> Option<PathBuf> {
        self.open.clone()
    }

    fn save_path(&mut self, _suggested_name: &str) -> Option<PathBuf> {
        self.save.clone()
    }

    fn report_error(&mut self, title: &str, message: &str) {
        self.errors.push((title.to_string(), message.to_string()));
    }
}

mock! {
    pub UserPrompts {}

    impl Prompts for UserPrompts {
        fn document_name(&mut self) -> Option<String>;
        fn open_path(&mut self) -> Option<PathBuf>;
        fn save_path(&mut self, suggested_name: &str) -> Option<PathBuf>;
        fn report_error(&mut self, title: &str, message: &str);
    }
}

/// The reference sample line
pub const REFERENCE_LINE: &str = "4\t2021-02-25T01:02:03.0230000+00:00";
