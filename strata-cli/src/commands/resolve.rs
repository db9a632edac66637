//! Resolve command implementation.
//!
//! This module implements the `resolve` command, which prints the effective
//! configuration for one file.

use crate::error::CliError;
use crate::utils::{base_dir, load_stack, target_path, GlobalOptions};
use clap::Args;
use std::path::PathBuf;
use strata::output::OutputFormat;

/// Print the effective configuration for a file.
#[derive(Args)]
pub struct ResolveCommand {
    /// File to resolve
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Output format
    #[arg(
        long,
        value_enum,
        default_value = "human",
        env = "STRATA_OUTPUT_FORMAT",
        ignore_case = true
    )]
    pub format: OutputFormat,

    /// Leave out rules that are turned off
    #[arg(long)]
    pub active_only: bool,
}

impl ResolveCommand {
    /// Execute the resolve command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let stack = load_stack(global)?;
        let base = base_dir(&stack)?;
        let target = target_path(&self.path, Some(&base))?;

        let resolver = stack.into_resolver()?;
        let mut config = resolver.resolve(&target)?;
        if self.active_only {
            config = config.without_disabled();
        }

        let output = self.format.create_formatter().format_config(&config)?;
        println!("{output}");
        Ok(())
    }
}
