//! Build script for strata-cli.
//!
//! This script generates man pages at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// IMPORTANT: Keep this structure synchronized with src/cli.rs
/// When adding/removing/modifying commands, update both files.
fn build_cli() -> Command {
    Command::new("strata")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Resolve layered lint rule configurations")
        .long_about(
            "Command-line tool for resolving, explaining and checking layered lint rule configurations",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Use this layer document instead of discovering project documents")
                .value_name("PATH")
                .global(true)
                .env("STRATA_CONFIG"),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .help("Override the directory holding user layers")
                .value_name("PATH")
                .global(true)
                .env("STRATA_DATA_DIR"),
        )
        .arg(
            Arg::new("no-user-config")
                .long("no-user-config")
                .help("Do not load user layers")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("base-dir")
                .long("base-dir")
                .help("Directory that target paths are relative to")
                .value_name("PATH")
                .global(true),
        )
        .subcommands(vec![
            Command::new("resolve")
                .about("Print the effective configuration for a file")
                .long_about("Merge every layer that applies to a file and print the result"),
            Command::new("explain")
                .about("Show which layers produced a file's configuration")
                .long_about("List the matching layers and the layer each rule and setting came from"),
            Command::new("conflicts")
                .about("Report rules whose severity is overridden between overlapping layers")
                .long_about("Compare layers pairwise, or only on the given files"),
            Command::new("layers")
                .about("List the loaded layers")
                .long_about("List layers in declaration order with their scope and source document"),
            Command::new("validate")
                .about("Validate a layer document")
                .long_about("Parse a layer document and check patterns, rules and plugins"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() {
    // Generate man pages at build time
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    let app = build_cli();
    let man = Man::new(app);
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();

    fs::write(man_dir.join("strata.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
