//! Command to validate a strata layer document.

use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::Args;
use std::path::PathBuf;
use strata::config::{ConfigLoader, ConfigValidator};

/// Validate a layer document.
#[derive(Args)]
pub struct ValidateCommand {
    /// Layer document to validate
    #[arg(value_name = "CONFIG_PATH")]
    pub config_path: PathBuf,
}

impl ValidateCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        if !self.config_path.exists() {
            return Err(CliError::InvalidArguments(format!(
                "File not found: {}",
                self.config_path.display()
            )));
        }

        let document = match ConfigLoader::load_file(&self.config_path) {
            Ok(document) => document,
            Err(e) => {
                eprintln!("Parse error: {e}");
                return Err(CliError::SemanticFailure(
                    "Layer document is invalid".to_string(),
                ));
            }
        };

        match ConfigValidator::validate_document(&document) {
            Ok(()) => {
                if !global.quiet {
                    println!(
                        "Layer document is valid ({} layer(s))",
                        document.layers.len()
                    );
                }
                Ok(())
            }
            Err(e) => {
                eprintln!("Validation error: {e}");
                Err(CliError::SemanticFailure(
                    "Layer document validation failed".to_string(),
                ))
            }
        }
    }
}
