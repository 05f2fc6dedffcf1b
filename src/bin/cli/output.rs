//! Output Formatting and Display Functions
//!
//! Run progress goes to stdout as plain lines (`Fixed: <path>`,
//! `Error processing <path>: <message>`, `Fixed <n> files`) so it can be
//! grepped; configuration displays use colour and tables.

use std::path::Path;

use owo_colors::OwoColorize;
use tabled::{settings::Style as TableStyle, Table, Tabled};

use printmend::{FileReport, MendConfig, MendError, RunReporter, RunSummary};

/// Prints run progress to stdout as it happens.
pub struct ConsoleReporter {
    file_label: &'static str,
    dry_run: bool,
}

impl ConsoleReporter {
    pub fn new(config: &MendConfig, dry_run: bool) -> Self {
        let file_label = if config.discovery.is_rust_only() {
            "Rust"
        } else {
            "source"
        };
        Self {
            file_label,
            dry_run,
        }
    }
}

impl RunReporter for ConsoleReporter {
    fn discovered(&mut self, _root: &Path, count: usize) {
        println!("Found {count} {} files to process...", self.file_label);
    }

    fn fixed(&mut self, path: &Path, _report: &FileReport) {
        if self.dry_run {
            println!("Would fix: {}", path.display());
        } else {
            println!("Fixed: {}", path.display());
        }
    }

    fn failed(&mut self, path: &Path, error: &MendError) {
        println!("Error processing {}: {}", path.display(), error);
    }

    fn finished(&mut self, summary: &RunSummary) {
        if self.dry_run {
            println!("{} files would be fixed", summary.fixed_count());
        } else {
            println!("Fixed {} files", summary.fixed_count());
        }
    }
}

/// Print the run summary as pretty JSON.
pub fn print_json_summary(summary: &RunSummary) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(summary)?);
    Ok(())
}

#[derive(Tabled)]
struct SettingRow {
    setting: String,
    value: String,
}

fn setting(setting: &str, value: impl Into<String>) -> SettingRow {
    SettingRow {
        setting: setting.to_string(),
        value: value.into(),
    }
}

fn summary_rows(config: &MendConfig) -> Vec<SettingRow> {
    vec![
        setting("Root", config.discovery.root.display().to_string()),
        setting("Extensions", config.discovery.extensions.join(", ")),
        setting("Macro", config.rewrite.macro_name.clone()),
        setting(
            "Continuation Limit",
            config
                .rewrite
                .max_continuation_lines
                .map_or_else(|| "unbounded".to_string(), |n| n.to_string()),
        ),
    ]
}

fn detail_rows(config: &MendConfig) -> Vec<SettingRow> {
    let excludes = if config.discovery.exclude_patterns.is_empty() {
        "(none)".to_string()
    } else {
        config.discovery.exclude_patterns.join(", ")
    };
    let exclusions = config
        .rewrite
        .exclusions
        .iter()
        .map(|e| format!("{e:?}"))
        .collect::<Vec<_>>()
        .join(" ");

    vec![
        setting("Exclude Globs", excludes),
        setting("Exclusion Substrings", exclusions),
    ]
}

/// Display a table of the effective settings.
pub fn display_config_summary(config: &MendConfig, detailed: bool) {
    println!("{}", "Configuration Summary".bright_blue().bold());
    println!();

    let mut rows = summary_rows(config);
    if detailed {
        rows.extend(detail_rows(config));
    }

    let mut table = Table::new(rows);
    table.with(TableStyle::rounded());
    println!("{table}");
    println!();
}
