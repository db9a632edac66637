//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands:
//! loading the layer stack from the global options and turning command-line
//! paths into target paths.

use crate::error::CliError;
use std::env;
use std::path::{Path, PathBuf};
use strata::config::{ConfigBuilder, LayerStack};
use strata::path::normalize::normalize;
use strata::path::{normalize_target, relativize};

/// Global CLI options shared across all commands.
///
/// Verbosity is applied once in `main` when the logger is installed.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Suppress non-essential output.
    pub quiet: bool,

    /// Explicit layer document.
    pub config: Option<PathBuf>,

    /// Override the directory holding user layers.
    pub data_dir: Option<PathBuf>,

    /// Do not load user layers.
    pub no_user_config: bool,

    /// Directory that target paths are relative to.
    pub base_dir: Option<PathBuf>,
}

/// Load the layer stack.
///
/// Sources are merged with precedence:
/// 1. Global options (highest priority)
/// 2. Environment variables
/// 3. Layer documents (local, project, user)
///
/// `--base-dir` replaces the base directory derived from the documents.
pub fn load_stack(global: &GlobalOptions) -> Result<LayerStack, CliError> {
    let mut builder = ConfigBuilder::new();
    if let Some(config) = &global.config {
        builder = builder.with_config_file(config);
    }
    if let Some(data_dir) = &global.data_dir {
        builder = builder.with_data_dir(data_dir);
    }
    if global.no_user_config {
        builder = builder.skip_user_config();
    }

    let mut stack = builder.build()?;
    if let Some(base_dir) = &global.base_dir {
        stack.base_dir = Some(normalize(base_dir)?);
    }

    log::debug!("loaded {} layer(s)", stack.len());
    Ok(stack)
}

/// Convert a command-line path into a target path.
///
/// Absolute paths are made relative to `base`. Relative paths are taken
/// relative to the current directory when it lies inside `base`, and as
/// target paths otherwise.
pub fn target_path(path: &Path, base: Option<&Path>) -> Result<String, CliError> {
    let text = path.to_str().ok_or_else(|| {
        CliError::InvalidArguments(format!("path is not valid UTF-8: {}", path.display()))
    })?;

    let Some(base) = base else {
        return Ok(normalize_target(text)?);
    };

    if path.is_absolute() {
        return Ok(relativize(path, base)?);
    }

    let cwd = env::current_dir()?;
    if normalize(&cwd)?.starts_with(normalize(base)?) {
        Ok(relativize(&cwd.join(path), base)?)
    } else {
        Ok(normalize_target(text)?)
    }
}

/// Base directory to resolve against: the stack's, or the current directory.
pub fn base_dir(stack: &LayerStack) -> Result<PathBuf, CliError> {
    match &stack.base_dir {
        Some(dir) => Ok(dir.clone()),
        None => Ok(env::current_dir()?),
    }
}
