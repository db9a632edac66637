//! Error types for the strata library.
//!
//! This module provides the error hierarchy for every fallible operation in
//! the strata library, using `thiserror` for ergonomic error handling.
//! Conflict diagnostics are not errors; see [`crate::conflicts`].

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with a strata error.
///
/// # Examples
///
/// ```
/// use strata::{Error, Result};
///
/// fn example_operation() -> Result<usize> {
///     Ok(3)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the strata library.
#[derive(Debug, Error)]
pub enum Error {
    /// A layer pattern could not be compiled into a matcher.
    #[error("invalid pattern '{pattern}' in layer {layer}: {reason}")]
    InvalidPattern {
        /// Index of the offending layer in declaration order.
        layer: usize,
        /// The pattern as written.
        pattern: String,
        /// Why the pattern was rejected.
        reason: String,
    },

    /// A target or filesystem path was malformed.
    #[error("invalid path {}: {reason}", path.display())]
    InvalidPath {
        /// The invalid path.
        path: PathBuf,
        /// The reason the path is invalid.
        reason: String,
    },

    /// A severity value was not one of off/warn/error or 0/1/2.
    #[error("invalid severity '{value}': expected off, warn, error, 0, 1 or 2")]
    InvalidSeverity {
        /// The rejected value, rendered as text.
        value: String,
    },

    /// A rule directive had an unusable shape.
    #[error("invalid rule directive: {reason}")]
    InvalidDirective {
        /// Description of the problem.
        reason: String,
    },

    /// A YAML layer document could not be parsed.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// A JSON layer document could not be parsed or rendered.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// The requested resource was not found.
    #[error("not found: {resource}")]
    NotFound {
        /// The resource that was not found.
        resource: String,
    },
}

impl Error {
    /// Check if error was caused by a malformed pattern.
    ///
    /// # Examples
    ///
    /// ```
    /// use strata::Error;
    ///
    /// let err = Error::InvalidPattern {
    ///     layer: 0,
    ///     pattern: "src/[".to_string(),
    ///     reason: "unclosed character class".to_string(),
    /// };
    /// assert!(err.is_invalid_pattern());
    /// ```
    #[must_use]
    pub fn is_invalid_pattern(&self) -> bool {
        matches!(self, Self::InvalidPattern { .. })
    }

    /// Check if error was caused by a malformed path.
    ///
    /// # Examples
    ///
    /// ```
    /// use strata::Error;
    /// use std::path::PathBuf;
    ///
    /// let err = Error::InvalidPath { path: PathBuf::from("../x"), reason: "escapes".into() };
    /// assert!(err.is_invalid_path());
    /// ```
    #[must_use]
    pub fn is_invalid_path(&self) -> bool {
        matches!(self, Self::InvalidPath { .. })
    }
}
