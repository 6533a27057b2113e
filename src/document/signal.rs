//! Signal document: an ordered list of timestamped samples.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use chrono::{Local, NaiveDate, TimeZone};
use egui::Ui;

use super::{format, DocumentCore, DocumentKind};
use crate::error::{Result, ResultExt, SignalError};
use crate::types::{SignalValue, ViewId};

/// Fixed demo samples: (value, y, mo, d, h, mi, s, ms), in local time.
const DEMO_SAMPLES: [(f64, i32, u32, u32, u32, u32, u32, u32); 6] = [
    (4.0, 2021, 2, 25, 1, 2, 3, 23),
    (8.0, 2021, 2, 12, 4, 2, 35, 23),
    (2.0, 2022, 5, 2, 5, 2, 36, 54),
    (2.0, 2021, 3, 12, 5, 2, 2, 45),
    (0.0, 2023, 9, 4, 1, 3, 43, 16),
    (5.0, 2021, 11, 1, 1, 6, 3, 22),
];

/// A document holding signal samples in insertion order.
///
/// Samples are not sorted; ordering for display belongs to the views.
pub struct SignalDocument {
    core: DocumentCore,
    samples: Vec<SignalValue>,
}

impl SignalDocument {
    /// Create an empty document
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            core: DocumentCore::new(name),
            samples: Vec::new(),
        }
    }

    /// Create a document with initial samples
    pub fn with_samples(name: impl Into<String>, samples: Vec<SignalValue>) -> Self {
        Self {
            core: DocumentCore::new(name),
            samples,
        }
    }

    /// Create a document seeded with a small fixed data set
    pub fn with_demo_samples(name: impl Into<String>) -> Self {
        let samples = DEMO_SAMPLES
            .iter()
            .filter_map(|&(value, y, mo, d, h, mi, s, ms)| {
                let naive = NaiveDate::from_ymd_opt(y, mo, d)?.and_hms_milli_opt(h, mi, s, ms)?;
                let timestamp = Local.from_local_datetime(&naive).earliest()?;
                Some(SignalValue::new(value, timestamp))
            })
            .collect();
        Self::with_samples(name, samples)
    }

    pub fn samples(&self) -> &[SignalValue] {
        &self.samples
    }

    /// Replace every sample and refresh the attached views
    pub fn replace_samples(&mut self, samples: Vec<SignalValue>) {
        self.samples = samples;
        self.core.update_all_views();
    }

    /// Append a sample and refresh the attached views
    pub fn push_sample(&mut self, sample: SignalValue) {
        self.samples.push(sample);
        self.core.update_all_views();
    }

    /// Remove all samples and refresh the attached views
    pub fn clear(&mut self) {
        self.samples.clear();
        self.core.update_all_views();
    }

    fn trace_samples(&self) {
        for sample in &self.samples {
            tracing::trace!("{}: {}", self.core.name(), sample);
        }
    }
}

impl DocumentKind for SignalDocument {
    fn core(&self) -> &DocumentCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut DocumentCore {
        &mut self.core
    }

    fn load(&mut self, path: &Path) -> Result<()> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let samples = format::parse_samples(&text)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        tracing::info!(
            "Loaded {} samples into '{}' from {}",
            samples.len(),
            self.core.name(),
            path.display()
        );
        self.samples = samples;
        self.trace_samples();
        self.core.update_all_views();
        Ok(())
    }

    fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        format::write_samples(BufWriter::new(file), &self.samples)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        tracing::info!(
            "Saved {} samples from '{}' to {}",
            self.samples.len(),
            self.core.name(),
            path.display()
        );
        Ok(())
    }

    fn show_view(&mut self, view_id: ViewId, ui: &mut Ui) -> Result<()> {
        let samples = &self.samples;
        match self.core.view_mut(view_id) {
            Some(view) => {
                view.show(ui, samples);
                Ok(())
            }
            None => Err(SignalError::NotFound(format!(
                "{} is not attached to '{}'",
                view_id,
                self.core.name()
            ))),
        }
    }
}
