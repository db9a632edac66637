//! Layers command implementation.
//!
//! This module implements the `layers` command, which lists the loaded
//! layers in declaration order together with the document each came from.
//! Given a path, layers that apply to it are marked `*` and a global ignore
//! that excludes it is marked `-`.

use crate::error::CliError;
use crate::utils::{base_dir, load_stack, target_path, GlobalOptions};
use clap::Args;
use std::path::PathBuf;

/// List the loaded layers.
#[derive(Args)]
pub struct LayersCommand {
    /// Mark the layers that apply to this file
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,
}

impl LayersCommand {
    /// Execute the layers command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let stack = load_stack(global)?;

        if stack.is_empty() {
            if !global.quiet {
                eprintln!("No layers loaded");
            }
            return Ok(());
        }

        let explanation = match &self.path {
            Some(path) => {
                let target = target_path(path, Some(&base_dir(&stack)?))?;
                Some(stack.clone().into_resolver()?.explain(&target)?)
            }
            None => None,
        };

        for (index, layer) in stack.layers.iter().enumerate() {
            let origin = stack
                .origin(index)
                .map_or_else(|| "<builtin>".to_string(), |p| p.display().to_string());

            let scope = if layer.is_global_ignore() {
                format!("ignores {}", layer.ignores.join(", "))
            } else if layer.is_unscoped() {
                "all files".to_string()
            } else {
                layer.patterns.join(", ")
            };

            let line = format!("{}\t{}\t{}", layer.label(index), scope, origin);
            match &explanation {
                Some(e) if e.ignored_by == Some(index) => println!("- {line}"),
                Some(e) if e.matched_layers.contains(&index) => println!("* {line}"),
                Some(_) => println!("  {line}"),
                None => println!("{line}"),
            }
        }

        Ok(())
    }
}
