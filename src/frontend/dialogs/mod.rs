//! Dialog trait system for in-window dialogs
//!
//! Each dialog implements the `Dialog` trait, encapsulating its state,
//! actions, and rendering. Native file pickers live in `prompts` instead.

use egui::{Align2, Context, Ui};

pub mod new_document;

pub use new_document::{NewDocumentAction, NewDocumentDialog, NewDocumentState};

/// Actions that a dialog can return after rendering
#[derive(Debug, Clone, Default)]
pub enum DialogAction<A> {
    /// Keep the dialog open, no action needed
    #[default]
    None,
    /// Close the dialog without performing any action
    Close,
    /// Close the dialog and perform the specified action
    CloseWithAction(A),
}

impl<A> DialogAction<A> {
    /// Check if the action indicates the dialog should close
    pub fn should_close(&self) -> bool {
        matches!(self, DialogAction::Close | DialogAction::CloseWithAction(_))
    }

    /// Extract the action if present
    pub fn into_action(self) -> Option<A> {
        match self {
            DialogAction::CloseWithAction(a) => Some(a),
            _ => None,
        }
    }
}

/// Trait for dialog state management
///
/// Dialog state is reset when the dialog closes.
pub trait DialogState: Default {
    /// Reset the dialog state to its default values
    fn reset(&mut self) {
        *self = Self::default();
    }

    /// Check if the dialog has valid data to proceed with its action
    fn is_valid(&self) -> bool {
        true
    }
}

/// Configuration for dialog window appearance
#[derive(Debug, Clone)]
pub struct DialogWindowConfig {
    /// Default width of the dialog window
    pub default_width: f32,
    /// Whether the dialog can be resized
    pub resizable: bool,
    /// Optional anchor position (alignment and offset)
    pub anchor: Option<(Align2, [f32; 2])>,
}

impl Default for DialogWindowConfig {
    fn default() -> Self {
        Self {
            default_width: 400.0,
            resizable: true,
            anchor: None,
        }
    }
}

impl DialogWindowConfig {
    /// Create a centered fixed-size dialog configuration
    pub fn centered(width: f32) -> Self {
        Self {
            default_width: width,
            resizable: false,
            anchor: Some((Align2::CENTER_CENTER, [0.0, 0.0])),
        }
    }
}

/// Main dialog trait for implementing dialogs
pub trait Dialog {
    /// The state type for this dialog
    type State: DialogState;

    /// The action type this dialog can produce
    type Action;

    /// Get the window title for this dialog
    fn title(state: &Self::State) -> &'static str;

    /// Get the window configuration for this dialog
    fn window_config() -> DialogWindowConfig {
        DialogWindowConfig::default()
    }

    /// Render the dialog content and report what should happen next
    fn render(state: &mut Self::State, ui: &mut Ui) -> DialogAction<Self::Action>;
}

/// Show a dialog using the Dialog trait
///
/// Only renders while `is_open` is true. Closing resets the state.
/// Returns `Some(action)` if the dialog produced an action.
pub fn show_dialog<D: Dialog>(
    ctx: &Context,
    is_open: &mut bool,
    state: &mut D::State,
) -> Option<D::Action> {
    if !*is_open {
        return None;
    }

    let config = D::window_config();
    let mut outcome = DialogAction::None;

    let mut window = egui::Window::new(D::title(state))
        .collapsible(false)
        .resizable(config.resizable)
        .default_width(config.default_width);

    if let Some((align, offset)) = config.anchor {
        window = window.anchor(align, offset);
    }

    window.show(ctx, |ui| {
        outcome = D::render(state, ui);
    });

    if outcome.should_close() {
        *is_open = false;
        state.reset();
    }

    outcome.into_action()
}
