//! CLI Argument Structures
//!
//! This module contains all CLI argument definitions, command structures,
//! and configuration enums used by the printmend binary.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Restore logging macro calls around orphaned string literals
#[derive(Parser)]
#[command(name = "printmend")]
#[command(version = VERSION)]
#[command(about = "printmend - restore logging macro calls around orphaned string literals")]
#[command(long_about = "
Scan a source tree for indented string-literal statements that lost their
logging macro wrapper and wrap them back, rewriting files in place.

Common Usage:

  # Fix every .rs file under the current directory
  printmend fix

  # Fix a specific tree and see what changed without writing
  printmend fix --dry-run src/backend/src

  # Fail in CI when something would be rewritten
  printmend fix --check

  # Use a different logging macro
  printmend fix --macro-name log::info! ./src

  # Write a starting configuration file
  printmend init-config
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rewrite orphaned string literals under a directory
    Fix(FixArgs),

    /// Print default configuration in YAML format
    #[command(name = "print-default-config")]
    PrintDefaultConfig,

    /// Initialize a configuration file with defaults
    #[command(name = "init-config")]
    InitConfig(InitConfigArgs),

    /// Validate a printmend configuration file
    #[command(name = "validate-config")]
    ValidateConfig(ValidateConfigArgs),
}

/// Arguments for the fix command
#[derive(Args, Default)]
pub struct FixArgs {
    /// Root directory to scan (defaults to the configured root, normally `.`)
    pub root: Option<PathBuf>,

    /// Configuration file path (defaults to ./.printmend.yml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Macro token to wrap literals in, e.g. `log::info!`
    #[arg(long, env = "PRINTMEND_MACRO")]
    pub macro_name: Option<String>,

    /// File extension to visit (repeatable, replaces the configured set)
    #[arg(long = "ext", value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Glob of paths to skip, relative to the root (repeatable, added to the configured set)
    #[arg(long = "exclude", value_name = "GLOB")]
    pub exclude_patterns: Vec<String>,

    /// Leave blocks with more continuation lines than this unchanged
    #[arg(long, value_name = "N")]
    pub max_continuation_lines: Option<usize>,

    /// Report what would change without writing any file
    #[arg(long)]
    pub dry_run: bool,

    /// Like --dry-run, but exit with status 1 when any file would change
    #[arg(long)]
    pub check: bool,

    /// Output format for the run summary
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for init-config command
#[derive(Args)]
pub struct InitConfigArgs {
    /// Output configuration file name
    #[arg(short, long, default_value = ".printmend.yml")]
    pub output: PathBuf,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for validate-config command
#[derive(Args)]
pub struct ValidateConfigArgs {
    /// Configuration file to validate
    #[arg(short, long)]
    pub config: PathBuf,

    /// Show every setting, not just the summary
    #[arg(long)]
    pub detailed: bool,
}

/// Output format options
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Console lines only
    #[default]
    Text,
    /// Console lines followed by a JSON run summary
    Json,
}
