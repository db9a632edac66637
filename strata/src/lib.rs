#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # strata
//!
//! A library for resolving layered lint rule configurations.
//!
//! A configuration is an ordered sequence of [`Layer`]s. Each layer scopes
//! itself to files with glob patterns and declares settings, language
//! options, rule directives and plugin namespaces. Resolving a file walks the layers in order and
//! overlays every layer that applies: later layers win, and a rule directive
//! is always replaced as a whole.
//!
//! ## Core Types
//!
//! - [`Layer`] and [`CompiledLayer`]: configuration layers and their matchers
//! - [`Severity`] and [`RuleDirective`]: what a layer says about a rule
//! - [`Resolver`], [`EffectiveConfig`] and [`Explanation`]: resolution
//! - [`ConflictReport`]: overlapping layers that disagree on a severity
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use strata::{diagnose_conflicts, resolve, Layer, RuleDirective, Severity};
//! use serde_json::json;
//!
//! let layers = vec![
//!     Layer::new()
//!         .with_plugin("import")
//!         .with_rule(
//!             "import/order",
//!             RuleDirective::new(Severity::Error, vec![json!({ "newlines-between": "always" })]),
//!         )
//!         .with_rule("no-unused-vars", Severity::Warn),
//!     Layer::new()
//!         .with_patterns(["**/*.test.js"])
//!         .with_rule("no-unused-vars", Severity::Off),
//! ];
//!
//! let config = resolve(&layers, "src/user.test.js").unwrap();
//! assert_eq!(config.severity_of("no-unused-vars"), Severity::Off);
//! assert_eq!(config.severity_of("import/order"), Severity::Error);
//!
//! let conflicts = diagnose_conflicts(&layers);
//! assert_eq!(conflicts.len(), 1);
//! assert_eq!(conflicts[0].rule, "no-unused-vars");
//! ```

pub mod config;
pub mod conflicts;
pub mod error;
pub mod layer;
pub mod logging;
pub mod output;
pub mod path;
pub mod resolver;
pub mod rule;

// Re-export key types at crate root for convenience
pub use config::{ConfigBuilder, LayerStack};
pub use conflicts::{diagnose_conflicts, ConflictReport};
pub use error::{Error, Result};
pub use layer::{CompiledLayer, Layer};
pub use logging::{init_logger, LogLevel, Logger};
pub use resolver::{resolve, EffectiveConfig, Explanation, Resolver};
pub use rule::{RuleDirective, Severity};
