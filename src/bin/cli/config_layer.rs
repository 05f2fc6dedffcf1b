//! Configuration Layer Management
//!
//! Layers, lowest priority first: built-in defaults, the YAML configuration
//! file (explicit `--config` or an implicit `.printmend.yml`), then CLI
//! overrides. The merged result is validated before it is handed to the
//! runner.

use anyhow::anyhow;
use std::path::{Path, PathBuf};

use crate::cli::args::FixArgs;
use printmend::MendConfig;

/// File names picked up from the working directory when `--config` is absent.
pub const IMPLICIT_CONFIG_FILES: [&str; 2] = [".printmend.yml", ".printmend.yaml"];

/// Trait for merging configuration layers
pub trait ConfigMerge<T> {
    /// Merge another configuration into this one, with the other taking priority
    fn merge_with(&mut self, other: T);
}

/// Convert CLI arguments to partial configuration overrides
pub trait FromCliArgs<T> {
    /// Create a partial configuration from CLI arguments
    fn from_cli_args(args: &T) -> Self;
}

/// Settings the command line may override. `None`/empty means "keep".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    pub root: Option<PathBuf>,
    pub macro_name: Option<String>,
    pub extensions: Option<Vec<String>>,
    pub extra_excludes: Vec<String>,
    pub max_continuation_lines: Option<usize>,
}

impl FromCliArgs<FixArgs> for CliOverrides {
    fn from_cli_args(args: &FixArgs) -> Self {
        Self {
            root: args.root.clone(),
            macro_name: args.macro_name.clone(),
            extensions: (!args.extensions.is_empty()).then(|| args.extensions.clone()),
            extra_excludes: args.exclude_patterns.clone(),
            max_continuation_lines: args.max_continuation_lines,
        }
    }
}

impl ConfigMerge<CliOverrides> for MendConfig {
    fn merge_with(&mut self, other: CliOverrides) {
        if let Some(root) = other.root {
            self.discovery.root = root;
        }
        if let Some(extensions) = other.extensions {
            self.discovery.extensions = extensions;
        }
        for pattern in other.extra_excludes {
            if !self.discovery.exclude_patterns.contains(&pattern) {
                self.discovery.exclude_patterns.push(pattern);
            }
        }
        if let Some(macro_name) = other.macro_name {
            self.rewrite.macro_name = macro_name;
        }
        if other.max_continuation_lines.is_some() {
            self.rewrite.max_continuation_lines = other.max_continuation_lines;
        }
    }
}

/// Locate the configuration file for this run, if any.
pub fn resolve_config_path(explicit: Option<&Path>, working_dir: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    IMPLICIT_CONFIG_FILES
        .iter()
        .map(|name| working_dir.join(name))
        .find(|p| p.exists())
}

/// Load a configuration file with a user-facing error message.
pub fn load_config_file(path: &Path) -> anyhow::Result<MendConfig> {
    MendConfig::from_yaml_file(path).map_err(|e| {
        anyhow!(
            "Failed to load configuration from {}: {}",
            path.display(),
            e
        )
    })
}

/// Build the effective configuration for `printmend fix`.
pub fn build_layered_config(args: &FixArgs) -> anyhow::Result<MendConfig> {
    build_layered_config_in(args, Path::new("."))
}

/// [`build_layered_config`] with an explicit directory for implicit config lookup.
pub fn build_layered_config_in(args: &FixArgs, working_dir: &Path) -> anyhow::Result<MendConfig> {
    let mut config = match resolve_config_path(args.config.as_deref(), working_dir) {
        Some(path) => {
            tracing::debug!("Loading configuration from {}", path.display());
            load_config_file(&path)?
        }
        None => MendConfig::default(),
    };

    config.merge_with(CliOverrides::from_cli_args(args));

    config
        .validate()
        .map_err(|e| anyhow!("Configuration validation failed: {}", e))?;

    Ok(config)
}
