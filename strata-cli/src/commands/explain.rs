//! Explain command implementation.

use crate::error::CliError;
use crate::utils::{base_dir, load_stack, target_path, GlobalOptions};
use clap::Args;
use std::path::PathBuf;
use strata::output::OutputFormat;

/// Show which layers produced a file's configuration.
#[derive(Args)]
pub struct ExplainCommand {
    /// File to explain
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
}

impl ExplainCommand {
    /// Execute the explain command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let stack = load_stack(global)?;
        let base = base_dir(&stack)?;
        let target = target_path(&self.path, Some(&base))?;

        let layers = stack.layers.clone();
        let explanation = stack.into_resolver()?.explain(&target)?;

        let output = self
            .format
            .create_formatter()
            .format_explanation(&explanation, &layers)?;
        println!("{output}");
        Ok(())
    }
}
