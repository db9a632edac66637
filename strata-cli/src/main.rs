//! Main entry point for the strata CLI.
//!
//! This is the command-line interface for the strata layered configuration
//! resolver. It provides commands for inspecting a layer stack:
//! - `resolve`: Print the effective configuration for a file
//! - `explain`: Show which layers produced a file's configuration
//! - `conflicts`: Report severity overrides between overlapping layers
//! - `layers`: List the loaded layers
//! - `validate`: Validate a layer document

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Route library diagnostics to stderr based on verbosity
    strata::init_logger(cli.verbose, cli.quiet).install();

    // Convert CLI args to GlobalOptions
    let global = GlobalOptions {
        quiet: cli.quiet,
        config: cli.config,
        data_dir: cli.data_dir,
        no_user_config: cli.no_user_config,
        base_dir: cli.base_dir,
    };

    // Execute the command
    let result = match cli.command {
        cli::Command::Resolve(cmd) => cmd.execute(&global),
        cli::Command::Explain(cmd) => cmd.execute(&global),
        cli::Command::Conflicts(cmd) => cmd.execute(&global),
        cli::Command::Layers(cmd) => cmd.execute(&global),
        cli::Command::Validate(cmd) => cmd.execute(&global),
        cli::Command::Completions(cmd) => cmd.execute(&global),
    };

    // Handle errors and set exit code
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
