//! Conflicts command implementation.
//!
//! Without `--file`, layers are compared by their patterns and conflict when
//! some path could match both. Each `--file` path narrows the check to layers
//! that both apply to that file.

use crate::error::CliError;
use crate::utils::{base_dir, load_stack, target_path, GlobalOptions};
use clap::Args;
use std::path::PathBuf;
use strata::output::OutputFormat;

/// Report rules whose severity is overridden between overlapping layers.
#[derive(Args)]
pub struct ConflictsCommand {
    /// Only compare layers that both apply to this file (repeatable)
    #[arg(long, value_name = "PATH")]
    pub file: Vec<PathBuf>,

    /// Output format
    #[arg(
        long,
        value_enum,
        default_value = "human",
        env = "STRATA_OUTPUT_FORMAT",
        ignore_case = true
    )]
    pub format: OutputFormat,

    /// Exit with status 1 when any conflict is found
    #[arg(long)]
    pub strict: bool,
}

impl ConflictsCommand {
    /// Execute the conflicts command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let stack = load_stack(global)?;
        let base = base_dir(&stack)?;
        let files = self
            .file
            .iter()
            .map(|path| target_path(path, Some(&base)))
            .collect::<Result<Vec<_>, _>>()?;

        let layers = stack.layers.clone();
        let resolver = stack.into_resolver()?;
        let reports = if files.is_empty() {
            resolver.diagnose_conflicts()
        } else {
            resolver.diagnose_conflicts_for(&files)?
        };

        let output = self
            .format
            .create_formatter()
            .format_conflicts(&reports, &layers)?;
        println!("{output}");

        if self.strict && !reports.is_empty() {
            return Err(CliError::SemanticFailure(format!(
                "{} conflict(s) found",
                reports.len()
            )));
        }
        Ok(())
    }
}
