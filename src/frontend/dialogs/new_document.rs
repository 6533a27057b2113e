//! New document dialog
//!
//! Asks for the name of a new signal document.

use super::{Dialog, DialogAction, DialogState, DialogWindowConfig};
use egui::{Button, Key, Ui};

/// State for the new document dialog
#[derive(Debug, Default)]
pub struct NewDocumentState {
    /// Name being typed
    pub name: String,
    focus_requested: bool,
}

impl DialogState for NewDocumentState {
    fn is_valid(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

/// Action from the new document dialog
#[derive(Debug, Clone, PartialEq)]
pub enum NewDocumentAction {
    /// User confirmed the (trimmed) name
    Create(String),
}

/// The new document dialog
pub struct NewDocumentDialog;

impl Dialog for NewDocumentDialog {
    type State = NewDocumentState;
    type Action = NewDocumentAction;

    fn title(_state: &Self::State) -> &'static str {
        "New Document"
    }

    fn window_config() -> DialogWindowConfig {
        DialogWindowConfig::centered(300.0)
    }

    fn render(state: &mut Self::State, ui: &mut Ui) -> DialogAction<Self::Action> {
        ui.label("Document name:");
        let response = ui.text_edit_singleline(&mut state.name);
        if !state.focus_requested {
            response.request_focus();
            state.focus_requested = true;
        }

        let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));
        let cancelled = ui.input(|i| i.key_pressed(Key::Escape));

        ui.separator();

        let valid = state.is_valid();
        ui.horizontal(|ui| {
            let ok = ui.add_enabled(valid, Button::new("OK")).clicked();
            if valid && (ok || submitted) {
                return DialogAction::CloseWithAction(NewDocumentAction::Create(
                    state.name.trim().to_string(),
                ));
            }
            if ui.button("Cancel").clicked() || cancelled {
                return DialogAction::Close;
            }
            DialogAction::None
        })
        .inner
    }
}
