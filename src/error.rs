//! Error handling for sunburst-rs
//!
//! This module defines the error taxonomy for loading, validating and
//! rendering a hierarchy, plus a Result alias used throughout the crate.

use thiserror::Error;

/// Main error type for sunburst-rs operations
#[derive(Error, Debug)]
pub enum SunburstError {
    /// Input is not a tree: a cycle, a node reached twice, or a dangling reference
    #[error("Malformed tree: {0}")]
    MalformedTree(String),

    /// A node carries a negative or non-finite value
    #[error("Invalid value {value} on node '{node}'")]
    InvalidValue { node: String, value: f64 },

    /// Root has neither children nor a value
    #[error("Empty tree: root '{0}' has no children and no value")]
    EmptyTree(String),

    /// Errors decoding a JSON data file
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Errors related to configuration loading/saving
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<SunburstError>,
    },
}

impl SunburstError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        SunburstError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// True for errors raised while validating input, before any layout work.
    pub fn is_validation(&self) -> bool {
        match self {
            SunburstError::MalformedTree(_)
            | SunburstError::InvalidValue { .. }
            | SunburstError::EmptyTree(_) => true,
            SunburstError::WithContext { source, .. } => source.is_validation(),
            _ => false,
        }
    }
}

/// Result type alias for sunburst-rs operations
pub type Result<T> = std::result::Result<T, SunburstError>;

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
