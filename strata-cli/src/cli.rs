//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    CompletionsCommand, ConflictsCommand, ExplainCommand, LayersCommand, ResolveCommand,
    ValidateCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for inspecting layered lint rule configurations.
#[derive(Parser)]
#[command(name = "strata")]
#[command(
    version,
    about = "Resolve layered lint rule configurations",
    long_about = None
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Use this layer document instead of discovering project documents
    #[arg(long, value_name = "PATH", global = true, env = "STRATA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the directory holding user layers
    #[arg(long, value_name = "PATH", global = true, env = "STRATA_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Do not load user layers
    #[arg(long, global = true)]
    pub no_user_config: bool,

    /// Directory that target paths are relative to
    #[arg(long, value_name = "PATH", global = true)]
    pub base_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Print the effective configuration for a file
    Resolve(ResolveCommand),

    /// Show which layers produced a file's configuration
    Explain(ExplainCommand),

    /// Report rules whose severity is overridden between overlapping layers
    Conflicts(ConflictsCommand),

    /// List the loaded layers
    Layers(LayersCommand),

    /// Validate a layer document
    Validate(ValidateCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
