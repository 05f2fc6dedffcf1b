//! Command Execution Logic
//!
//! Each subcommand is a plain function returning `anyhow::Result`. Only
//! `fix --check` and the config helpers exit with a non-zero status on
//! their own; per-file rewrite failures never change the exit status.

use anyhow::Context;
use owo_colors::OwoColorize;
use tracing::info;

use crate::cli::args::{FixArgs, InitConfigArgs, OutputFormat, ValidateConfigArgs};
use crate::cli::config_layer::{build_layered_config, load_config_file};
use crate::cli::output::{display_config_summary, print_json_summary, ConsoleReporter};
use printmend::{run, DiskStore, MendConfig, RunOptions};

/// Main fix command implementation
pub fn fix_command(args: FixArgs) -> anyhow::Result<()> {
    let config = build_layered_config(&args)?;
    let options = RunOptions {
        dry_run: args.dry_run || args.check,
    };

    info!(
        "Rewriting orphaned literals under {} with {}",
        config.discovery.root.display(),
        config.rewrite.macro_name
    );

    let mut reporter = ConsoleReporter::new(&config, options.dry_run);
    let summary = run(&config, options, &mut DiskStore, &mut reporter)
        .with_context(|| format!("Failed to scan {}", config.discovery.root.display()))?;

    if args.format == OutputFormat::Json {
        print_json_summary(&summary)?;
    }

    if args.check && summary.has_changes() {
        std::process::exit(1);
    }

    Ok(())
}

/// Print the default configuration
pub fn print_default_config() -> anyhow::Result<()> {
    println!("{}", "# Default printmend configuration".dimmed());
    println!("{}", "# Save this to .printmend.yml and customize as needed".dimmed());
    println!("{}", "# Usage: printmend fix --config your-config.yml".dimmed());
    println!();

    let yaml_output = MendConfig::default().to_yaml_string()?;
    println!("{yaml_output}");

    Ok(())
}

/// Initialize a configuration file with defaults
pub fn init_config(args: InitConfigArgs) -> anyhow::Result<()> {
    if args.output.exists() && !args.force {
        eprintln!(
            "{} {}",
            "Configuration file already exists:".red(),
            args.output.display()
        );
        eprintln!("   Use --force to overwrite or choose a different name with --output");
        std::process::exit(1);
    }

    MendConfig::default().to_yaml_file(&args.output)?;

    println!(
        "{} {}",
        "Configuration saved to".bright_green().bold(),
        args.output.display().to_string().cyan()
    );
    println!();
    println!("{}", "Next steps:".bright_blue().bold());
    println!("   1. Edit the configuration file to point `discovery.root` at your sources");
    println!(
        "   2. Preview with: {}",
        format!("printmend fix --config {} --dry-run", args.output.display()).cyan()
    );

    Ok(())
}

/// Validate a configuration file
pub fn validate_config(args: ValidateConfigArgs) -> anyhow::Result<()> {
    println!(
        "{} {}",
        "Validating configuration:".bright_blue().bold(),
        args.config.display().to_string().cyan()
    );
    println!();

    let config = match load_config_file(&args.config).and_then(|config| {
        config.validate()?;
        Ok(config)
    }) {
        Ok(config) => {
            println!("{}", "Configuration file is valid!".bright_green().bold());
            println!();
            config
        }
        Err(e) => {
            eprintln!("{} {}", "Configuration validation failed:".red(), e);
            println!();
            println!("{}", "Common issues:".bright_blue().bold());
            println!("   - Check YAML syntax (indentation, colons, quotes)");
            println!("   - macro_name must be a bare macro path such as log::info!");
            println!("   - max_continuation_lines must be positive when set");
            println!();
            println!(
                "{}",
                "Tip: Use 'printmend print-default-config' to see valid format".dimmed()
            );
            std::process::exit(1);
        }
    };

    display_config_summary(&config, args.detailed);

    Ok(())
}
