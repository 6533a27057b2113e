//! Signal DocView - Main Entry Point
//!
//! Desktop plotter for timestamped signal documents with any number of views
//! per document.

use anyhow::Context;
use signal_docview::{
    config::{self, AppState, PlotSettings},
    frontend::SignalsApp,
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber. The returned guard flushes the file log
/// and must live until the app exits.
fn init_logging() -> Option<WorkerGuard> {
    let file_log = config::ensure_app_data_dir()
        .ok()
        .map(|dir| dir.join(config::LOG_DIR))
        .filter(|dir| std::fs::create_dir_all(dir).is_ok())
        .map(|dir| {
            let appender = tracing_appender::rolling::daily(dir, "signal-docview.log");
            tracing_appender::non_blocking(appender)
        });

    let (file_layer, guard) = match file_log {
        Some((writer, guard)) => (
            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(writer),
            ),
            Some(guard),
        ),
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,signal_docview=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(file_layer)
        .init();

    guard
}

fn main() -> anyhow::Result<()> {
    let _log_guard = init_logging();

    tracing::info!("Starting Signal Views");

    // Load application state (recent files, preferences)
    let mut app_state = AppState::load_or_default();
    app_state.cleanup_missing_files();

    let plot_settings = PlotSettings::load_or_default();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1024.0, 768.0])
            .with_min_inner_size([640.0, 480.0])
            .with_title("Signal Views"),
        ..Default::default()
    };

    eframe::run_native(
        "Signal Views",
        native_options,
        Box::new(|cc| {
            if app_state.ui_preferences.dark_mode {
                cc.egui_ctx.set_visuals(egui::Visuals::dark());
            } else {
                cc.egui_ctx.set_visuals(egui::Visuals::light());
            }

            Ok(Box::new(SignalsApp::new(cc, app_state, plot_settings)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
    .context("Failed to run the application window")?;

    tracing::info!("Shutting down...");
    Ok(())
}
