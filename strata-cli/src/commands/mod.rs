//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `resolve`: Print the effective configuration for a file
//! - `explain`: Show which layers produced a file's configuration
//! - `conflicts`: Report severity overrides between overlapping layers
//! - `layers`: List the loaded layers
//! - `validate`: Validate a layer document
//! - `completions`: Generate shell completion scripts

pub mod completions;
pub mod conflicts;
pub mod explain;
pub mod layers;
pub mod resolve;
pub mod validate;

pub use completions::CompletionsCommand;
pub use conflicts::ConflictsCommand;
pub use explain::ExplainCommand;
pub use layers::LayersCommand;
pub use resolve::ResolveCommand;
pub use validate::ValidateCommand;
