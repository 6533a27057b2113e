//! Line plot view of a signal document
//!
//! Each view keeps its own zoom factor. A refresh only marks the cached
//! point list stale; points are rebuilt from the document the next time the
//! view is drawn.

use egui::{Color32, Ui};
use egui_plot::{Line, Plot, PlotBounds, PlotPoints, Points};

use crate::config::PlotSettings;
use crate::document::View;
use crate::types::{DocumentId, SignalValue, ViewId};

/// Map samples to plot coordinates.
///
/// Samples are placed in time order; x is elapsed time since the earliest
/// sample divided by `time_scale_seconds`, y is `value * value_scale`. Both
/// are multiplied by `zoom`.
pub fn project_samples(samples: &[SignalValue], zoom: f64, settings: &PlotSettings) -> Vec<[f64; 2]> {
    let mut ordered: Vec<&SignalValue> = samples.iter().collect();
    ordered.sort_by_key(|s| s.timestamp());

    let Some(origin) = ordered.first().map(|s| s.timestamp()) else {
        return Vec::new();
    };

    ordered
        .iter()
        .map(|s| {
            let elapsed = (s.timestamp() - origin).num_milliseconds() as f64 / 1000.0;
            [
                elapsed / settings.time_scale_seconds * zoom,
                s.value() * settings.value_scale * zoom,
            ]
        })
        .collect()
}

/// A plot of one document's samples
pub struct PlotView {
    id: ViewId,
    document: DocumentId,
    zoom: f64,
    settings: PlotSettings,
    needs_redraw: bool,
    points: Vec<[f64; 2]>,
}

impl PlotView {
    pub fn new(document: DocumentId, settings: PlotSettings) -> Self {
        Self {
            id: ViewId::next(),
            document,
            zoom: 1.0,
            settings,
            needs_redraw: true,
            points: Vec::new(),
        }
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn zoom_in(&mut self) {
        self.zoom *= self.settings.zoom_step;
        self.needs_redraw = true;
    }

    pub fn zoom_out(&mut self) {
        self.zoom /= self.settings.zoom_step;
        self.needs_redraw = true;
    }

    /// Whether the cached points are stale
    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    /// Rebuild the cached points if they are stale
    pub fn prepare(&mut self, samples: &[SignalValue]) -> &[[f64; 2]] {
        if self.needs_redraw {
            self.points = project_samples(samples, self.zoom, &self.settings);
            self.needs_redraw = false;
        }
        &self.points
    }

    fn render_toolbar(&mut self, ui: &mut Ui, sample_count: usize) {
        ui.horizontal(|ui| {
            if ui.button("−").on_hover_text("Zoom out").clicked() {
                self.zoom_out();
            }
            if ui.button("+").on_hover_text("Zoom in").clicked() {
                self.zoom_in();
            }
            ui.label(format!("Zoom: {:.2}x", self.zoom));
            ui.separator();
            ui.label(format!("{} samples", sample_count));
        });
    }
}

impl View for PlotView {
    fn id(&self) -> ViewId {
        self.id
    }

    fn document_id(&self) -> DocumentId {
        self.document
    }

    fn refresh(&mut self) {
        self.needs_redraw = true;
    }

    fn show(&mut self, ui: &mut Ui, samples: &[SignalValue]) {
        self.render_toolbar(ui, samples.len());
        self.prepare(samples);

        let size = ui.available_size();
        let width = f64::from(size.x).max(1.0);
        let half_height = (f64::from(size.y) / 2.0).max(1.0);

        let line_width = self.settings.line_width;
        let point_size = self.settings.point_size;
        let points = &self.points;

        Plot::new(("signal_view", self.id.0))
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .show_axes(self.settings.show_axes)
            .show(ui, |plot_ui| {
                plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                    [0.0, -half_height],
                    [width, half_height],
                ));

                if points.is_empty() {
                    return;
                }

                plot_ui.line(
                    Line::new("signal", PlotPoints::from(points.clone()))
                        .color(Color32::LIGHT_BLUE)
                        .width(line_width),
                );
                plot_ui.points(
                    Points::new("samples", PlotPoints::from(points.clone()))
                        .color(Color32::LIGHT_BLUE)
                        .radius(point_size),
                );
            });
    }
}
