//! Output formatting for resolution results.
//!
//! This module renders effective configurations, explanations and conflict
//! reports as human-readable text, JSON or YAML.

mod formatters;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::conflicts::ConflictReport;
use crate::layer::Layer;
use crate::resolver::{EffectiveConfig, Explanation};
use crate::Result;

pub use formatters::{HumanFormatter, JsonFormatter, YamlFormatter};

/// Trait for rendering resolution results.
pub trait OutputFormatter {
    /// Render one effective configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn format_config(&self, config: &EffectiveConfig) -> Result<String>;

    /// Render an explanation. `layers` supplies labels for layer indices.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn format_explanation(&self, explanation: &Explanation, layers: &[Layer]) -> Result<String>;

    /// Render conflict reports. `layers` supplies labels for layer indices.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn format_conflicts(&self, reports: &[ConflictReport], layers: &[Layer]) -> Result<String>;
}

/// Available output formats.
///
/// # Examples
///
/// ```
/// use strata::output::OutputFormat;
///
/// assert_eq!(OutputFormat::default(), OutputFormat::Human);
/// assert_eq!(OutputFormat::Json.to_string(), "json");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Human,
    /// Pretty-printed JSON.
    Json,
    /// YAML.
    Yaml,
}

impl OutputFormat {
    /// Create a formatter for this output format.
    #[must_use]
    pub fn create_formatter(self) -> Box<dyn OutputFormatter> {
        match self {
            Self::Human => Box::new(HumanFormatter),
            Self::Json => Box::new(JsonFormatter),
            Self::Yaml => Box::new(YamlFormatter),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Human => write!(f, "human"),
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
        }
    }
}
