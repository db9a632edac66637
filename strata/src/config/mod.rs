//! Layer configuration on disk.
//!
//! This module turns layer documents into a [`LayerStack`] with support for:
//! - YAML and JSON layer documents (user layers and project files)
//! - Environment variable overrides
//! - Programmatic layers and options via the builder pattern
//! - Load-time validation
//!
//! # Precedence
//!
//! Documents are concatenated from lowest to highest precedence, so the
//! layers of a higher-precedence document are declared later and win:
//!
//! 1. User layers (`~/.strata/layers.yaml`)
//! 2. Project layers (`strata.yaml`, `strata.yml` or `strata.json`)
//! 3. Private project layers (`strata.local.yaml`)
//! 4. Layers added via `ConfigBuilder::with_layers`
//!
//! Resolver options follow defaults < files < environment (`STRATA_*`) <
//! builder.
//!
//! # Examples
//!
//! Loading from a specific directory:
//!
//! ```no_run
//! use strata::config::ConfigBuilder;
//! use std::path::Path;
//!
//! let resolver = ConfigBuilder::new()
//!     .with_working_dir(Path::new("/path/to/project"))
//!     .build()
//!     .unwrap()
//!     .into_resolver()
//!     .unwrap();
//! let config = resolver.resolve("src/index.js").unwrap();
//! ```
//!
//! Parsing a document directly:
//!
//! ```
//! use strata::config::LayerDocument;
//!
//! let document: LayerDocument = serde_yaml::from_str(
//!     "- files: ['**/*.test.js']\n  rules:\n    no-undef: off\n",
//! )
//! .unwrap();
//! assert_eq!(document.layers.len(), 1);
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{ConfigLoader, LayerSource};
pub use merger::{ConfigMerger, LayerStack};
pub use schema::{LayerDocument, ResolverOptions};
pub use validator::ConfigValidator;
