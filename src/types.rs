//! Core data types for the signal document/view application
//!
//! This module defines the value object held by signal documents and the
//! identifiers used to link documents, views and host UI containers.

use chrono::{DateTime, Local};
use std::sync::atomic::{AtomicU64, Ordering};

/// A single timestamped measurement.
///
/// Immutable once constructed; two samples are equal when both the value and
/// the instant are equal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalValue {
    value: f64,
    timestamp: DateTime<Local>,
}

impl SignalValue {
    /// Create a new sample
    pub fn new(value: f64, timestamp: DateTime<Local>) -> Self {
        Self { value, timestamp }
    }

    /// The measured value
    pub fn value(&self) -> f64 {
        self.value
    }

    /// When the value was measured, in local time
    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }
}

impl std::fmt::Display for SignalValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Value: {}, TimeStamp: {}", self.value, self.timestamp)
    }
}

static NEXT_DOCUMENT_ID: AtomicU64 = AtomicU64::new(1);
static NEXT_VIEW_ID: AtomicU64 = AtomicU64::new(1);
static NEXT_CONTAINER_ID: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for an open document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(pub u64);

impl DocumentId {
    pub fn next() -> Self {
        Self(NEXT_DOCUMENT_ID.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "document #{}", self.0)
    }
}

/// Unique identifier for a view instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(pub u64);

impl ViewId {
    pub fn next() -> Self {
        Self(NEXT_VIEW_ID.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for ViewId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "view #{}", self.0)
    }
}

/// Identifier of a labeled container (a dock tab) in the host UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContainerId(pub u64);

impl ContainerId {
    pub fn next() -> Self {
        Self(NEXT_CONTAINER_ID.fetch_add(1, Ordering::SeqCst))
    }
}
