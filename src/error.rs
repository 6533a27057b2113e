//! Error handling for the signal document/view application
//!
//! This module defines the error type shared by documents, views and the
//! controller, plus a Result alias for use throughout the crate.

use thiserror::Error;

/// Main error type for document and controller operations
#[derive(Error, Debug)]
pub enum SignalError {
    /// A call violated a precondition (e.g. attaching an already attached view)
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// A view or container lookup found nothing
    #[error("Not found: {0}")]
    NotFound(String),

    /// A persisted sample line could not be parsed
    #[error("Format error on line {line}: {message}")]
    Format { line: usize, message: String },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors related to configuration loading/saving
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<SignalError>,
    },
}

/// Coarse classification of [`SignalError`], used by callers that only care
/// about what went wrong and not where.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidOperation,
    NotFound,
    FormatError,
    IoFailure,
}

impl SignalError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        SignalError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Shorthand for a format error on a 1-based line number
    pub fn format(line: usize, message: impl Into<String>) -> Self {
        SignalError::Format {
            line,
            message: message.into(),
        }
    }

    /// The kind of this error, looking through any context layers
    pub fn kind(&self) -> ErrorKind {
        match self {
            SignalError::InvalidOperation(_) => ErrorKind::InvalidOperation,
            SignalError::NotFound(_) => ErrorKind::NotFound,
            SignalError::Format { .. } => ErrorKind::FormatError,
            SignalError::Io(_) | SignalError::Config(_) => ErrorKind::IoFailure,
            SignalError::WithContext { source, .. } => source.kind(),
        }
    }
}

/// Result type alias for signal document operations
pub type Result<T> = std::result::Result<T, SignalError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.with_context(f()))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| SignalError::Io(e).with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| SignalError::Io(e).with_context(f()))
    }
}
