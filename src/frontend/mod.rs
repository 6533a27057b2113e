//! Frontend module for egui UI
//!
//! This module hosts the document/view controller inside an eframe window.
//!
//! # Architecture
//!
//! Every view is a tab in an egui_dock workspace. The menu bar, keyboard
//! shortcuts, dialogs and the tab viewer only post [`AppEvent`]s; after the
//! frame is drawn the controller drains them and updates documents, views
//! and dock tabs.
//!
//! # Main Types
//!
//! - [`SignalsApp`] - Main application state implementing [`eframe::App`]
//! - [`DockHost`] - Dock tabs acting as the controller's host UI
//! - [`PlotView`] - Line plot view with its own zoom
//! - [`NativePrompts`] - File choosers and error boxes
//!
//! # Submodules
//!
//! - `workspace` - Dock host and tab viewer
//! - `dialogs` - In-window dialogs (new document name)
//! - `plot_view` - Plot rendering with egui_plot
//! - `prompts` - Native dialogs via rfd

pub mod dialogs;
pub mod plot_view;
pub mod prompts;
pub mod workspace;

pub use plot_view::PlotView;
pub use prompts::NativePrompts;
pub use workspace::DockHost;

use dialogs::{show_dialog, NewDocumentAction, NewDocumentDialog, NewDocumentState};
use workspace::tab_viewer::WorkspaceTabViewer;

use crate::config::{AppState, PlotSettings};
use crate::controller::{AppEvent, Controller, EventSender, FileActivity, HostUi};
use crate::document::View;
use egui::{Key, KeyboardShortcut, Modifiers};

const NEW_VIEW: KeyboardShortcut =
    KeyboardShortcut::new(Modifiers::COMMAND.plus(Modifiers::SHIFT), Key::N);
const NEW_DOCUMENT: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::N);
const OPEN: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::O);
const SAVE: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::S);
const CLOSE: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::W);

/// Shortcuts pressed this frame
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Shortcuts {
    new_document: bool,
    new_view: bool,
    open: bool,
    save: bool,
    close: bool,
}

impl Shortcuts {
    /// Consume the app shortcuts from the input. Shortcut matching ignores
    /// extra Shift, so Cmd+Shift+N is taken before Cmd+N.
    fn consume(input: &mut egui::InputState) -> Self {
        let new_view = input.consume_shortcut(&NEW_VIEW);
        Self {
            new_document: input.consume_shortcut(&NEW_DOCUMENT),
            new_view,
            open: input.consume_shortcut(&OPEN),
            save: input.consume_shortcut(&SAVE),
            close: input.consume_shortcut(&CLOSE),
        }
    }
}

/// Main application state for the signal viewer
pub struct SignalsApp {
    controller: Controller,
    host: DockHost,
    prompts: NativePrompts,
    events: EventSender,
    app_state: AppState,

    new_document_open: bool,
    new_document_state: NewDocumentState,
}

impl SignalsApp {
    /// Create a new application instance
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        app_state: AppState,
        plot_settings: PlotSettings,
    ) -> Self {
        let mut style = (*cc.egui_ctx.style()).clone();
        style.text_styles.iter_mut().for_each(|(_, font_id)| {
            font_id.size *= app_state.ui_preferences.font_scale;
        });
        cc.egui_ctx.set_style(style);

        let seed = plot_settings.seed_new_documents;
        let controller = Controller::new(Box::new(move |document| {
            Box::new(PlotView::new(document, plot_settings.clone())) as Box<dyn View>
        }))
        .with_demo_seeding(seed);
        let events = controller.events();

        let prompts = NativePrompts::with_start_dir(app_state.last_directory.clone());

        Self {
            controller,
            host: DockHost::new(),
            prompts,
            events,
            app_state,
            new_document_open: false,
            new_document_state: NewDocumentState::default(),
        }
    }

    fn handle_keyboard_shortcuts(&mut self, ctx: &egui::Context) {
        let pressed = ctx.input_mut(Shortcuts::consume);

        if pressed.new_view {
            self.events.send(AppEvent::NewViewForActiveDocument);
        }
        if pressed.new_document {
            self.new_document_open = true;
        }
        if pressed.open {
            self.events.send(AppEvent::OpenDocument);
        }
        if pressed.save {
            self.events.send(AppEvent::SaveActiveDocument);
        }
        if pressed.close {
            self.events.send(AppEvent::CloseActiveView);
        }
    }

    fn render_menu_bar(&mut self, ctx: &egui::Context) {
        let has_documents = self.controller.document_count() > 0;
        let has_active = self.controller.active_document().is_some();
        let recent: Vec<_> = self
            .app_state
            .recent_files
            .iter()
            .map(|f| (f.path.clone(), f.display_name()))
            .collect();

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("New...").clicked() {
                        self.new_document_open = true;
                        ui.close();
                    }
                    if ui.button("Open...").clicked() {
                        self.events.send(AppEvent::OpenDocument);
                        ui.close();
                    }
                    ui.add_enabled_ui(!recent.is_empty(), |ui| {
                        ui.menu_button("Open Recent", |ui| {
                            for (path, name) in &recent {
                                if ui
                                    .button(name.as_str())
                                    .on_hover_text(path.display().to_string())
                                    .clicked()
                                {
                                    self.events.send(AppEvent::OpenRecent(path.clone()));
                                    ui.close();
                                }
                            }
                        });
                    });
                    ui.separator();
                    if ui.add_enabled(has_active, egui::Button::new("Save...")).clicked() {
                        self.events.send(AppEvent::SaveActiveDocument);
                        ui.close();
                    }
                    if ui.add_enabled(has_documents, egui::Button::new("Close")).clicked() {
                        self.events.send(AppEvent::CloseActiveView);
                        ui.close();
                    }
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("Window", |ui| {
                    if ui.add_enabled(has_active, egui::Button::new("New View")).clicked() {
                        self.events.send(AppEvent::NewViewForActiveDocument);
                        ui.close();
                    }
                    ui.separator();
                    let prefs = &mut self.app_state.ui_preferences;
                    if ui.checkbox(&mut prefs.dark_mode, "Dark Mode").changed() {
                        ctx.set_visuals(if prefs.dark_mode {
                            egui::Visuals::dark()
                        } else {
                            egui::Visuals::light()
                        });
                    }
                    ui.checkbox(&mut prefs.show_status_bar, "Status Bar");
                });
            });
        });
    }

    fn render_status_bar(&mut self, ctx: &egui::Context) {
        if !self.app_state.ui_preferences.show_status_bar {
            return;
        }

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(format!("Documents: {}", self.controller.document_count()));
                ui.separator();
                match self.controller.active_document() {
                    Some(doc) => {
                        let samples = doc.as_signal().map(|s| s.samples().len()).unwrap_or(0);
                        ui.label(format!(
                            "{} ({} views, {} samples)",
                            doc.name(),
                            doc.view_count(),
                            samples
                        ));
                    }
                    None => {
                        ui.label("No active view");
                    }
                }

                if let Some(error) = self.prompts.last_error().map(str::to_string) {
                    ui.separator();
                    ui.colored_label(egui::Color32::LIGHT_RED, error);
                    if ui.small_button("✕").clicked() {
                        self.prompts.clear_error();
                    }
                }
            });
        });
    }

    fn render_workspace(&mut self, ctx: &egui::Context) {
        if self.host.container_count() == 0 {
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.centered_and_justified(|ui| {
                    ui.label("Use File → New or File → Open to create a document");
                });
            });
            return;
        }

        let DockHost {
            dock_state, labels, ..
        } = &mut self.host;

        let mut viewer = WorkspaceTabViewer {
            controller: &mut self.controller,
            labels,
            events: &self.events,
        };

        egui_dock::DockArea::new(dock_state)
            .style(egui_dock::Style::from_egui(ctx.style().as_ref()))
            .show_close_buttons(true)
            .show(ctx, &mut viewer);

        if self.host.sync_selection() {
            self.events.send(AppEvent::SelectionChanged);
        }
    }

    fn render_dialogs(&mut self, ctx: &egui::Context) {
        if let Some(NewDocumentAction::Create(name)) = show_dialog::<NewDocumentDialog>(
            ctx,
            &mut self.new_document_open,
            &mut self.new_document_state,
        ) {
            self.prompts.set_pending_name(name);
            self.events.send(AppEvent::NewDocument);
        }
    }

    fn process_events(&mut self, ctx: &egui::Context) {
        let activity = self
            .controller
            .process_events(&mut self.host, &mut self.prompts);

        for done in activity {
            let (FileActivity::Opened(path) | FileActivity::Saved(path)) = done;
            self.app_state.add_recent_file(&path);
        }
        self.prompts.start_dir = self.app_state.last_directory.clone();

        ctx.request_repaint();
    }
}

impl eframe::App for SignalsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_keyboard_shortcuts(ctx);
        self.render_menu_bar(ctx);
        self.render_status_bar(ctx);
        self.render_workspace(ctx);
        self.render_dialogs(ctx);

        if self.controller.has_pending_events() {
            self.process_events(ctx);
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Err(e) = self.app_state.save() {
            tracing::warn!("Failed to save app state: {}", e);
        }
    }
}
