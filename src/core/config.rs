//! Configuration types for printmend.
//!
//! All knobs the rewrite depends on live in [`MendConfig`] and are passed
//! explicitly into the runner. The structure round-trips through YAML so the
//! CLI can load it from disk, print the defaults and validate user files.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::discovery::compile_globset;
use crate::core::errors::{MendError, Result};

/// Logging macro the rewrite wraps orphaned literals in by default.
pub const DEFAULT_MACRO_NAME: &str = "ic_cdk::println!";

/// Main configuration for a printmend run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MendConfig {
    /// Which files are visited
    #[serde(default)]
    pub discovery: DiscoveryConfig,

    /// How lines are classified and rebuilt
    #[serde(default)]
    pub rewrite: RewriteConfig,
}

impl MendConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            MendError::io(format!("Failed to read config file: {}", path.display()), e)
        })?;

        serde_yaml::from_str(&content).map_err(Into::into)
    }

    /// Save configuration to a YAML file
    pub fn to_yaml_file(&self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        let content = self.to_yaml_string()?;
        std::fs::write(&path, content).map_err(|e| {
            MendError::io(format!("Failed to write config file: {}", path.display()), e)
        })
    }

    /// Render the configuration as YAML
    pub fn to_yaml_string(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(Into::into)
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<()> {
        self.discovery.validate()?;
        self.rewrite.validate()?;
        Ok(())
    }
}

/// File discovery configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Directory tree to rewrite in place
    pub root: PathBuf,

    /// File extensions to visit, without the leading dot
    pub extensions: Vec<String>,

    /// Globs (relative to `root`) of paths that are never visited
    pub exclude_patterns: Vec<String>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            extensions: vec!["rs".to_string()],
            exclude_patterns: Vec::new(),
        }
    }
}

impl DiscoveryConfig {
    /// Validate discovery configuration
    pub fn validate(&self) -> Result<()> {
        if self.extensions.is_empty() {
            return Err(MendError::validation_field(
                "at least one file extension is required",
                "discovery.extensions",
            ));
        }

        if self
            .extensions
            .iter()
            .any(|ext| ext.trim_start_matches('.').trim().is_empty())
        {
            return Err(MendError::validation_field(
                "file extensions must not be empty",
                "discovery.extensions",
            ));
        }

        compile_globset(&self.exclude_patterns).map_err(|e| {
            MendError::config_field(e.to_string(), "discovery.exclude_patterns")
        })?;

        Ok(())
    }

    /// Extensions normalised for comparison: no leading dot, lowercase.
    pub fn normalized_extensions(&self) -> Vec<String> {
        self.extensions
            .iter()
            .map(|ext| ext.trim().trim_start_matches('.').to_ascii_lowercase())
            .collect()
    }

    /// Whether the configured extension set is exactly Rust sources.
    pub fn is_rust_only(&self) -> bool {
        self.normalized_extensions().iter().all(|ext| ext == "rs")
    }
}

/// Line classification and reconstruction configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewriteConfig {
    /// Macro token the orphaned literals are wrapped in, including the `!`
    pub macro_name: String,

    /// Substrings marking a quote-led line as an ordinary statement
    pub exclusions: Vec<String>,

    /// Longest continuation run a block may consume (`None` = unbounded)
    pub max_continuation_lines: Option<usize>,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            macro_name: DEFAULT_MACRO_NAME.to_string(),
            exclusions: default_exclusions(),
            max_continuation_lines: None,
        }
    }
}

impl RewriteConfig {
    /// Validate rewrite configuration
    pub fn validate(&self) -> Result<()> {
        let name = self.macro_name.trim();
        if name.is_empty() {
            return Err(MendError::validation_field(
                "macro_name must not be empty",
                "rewrite.macro_name",
            ));
        }
        if name.chars().any(char::is_whitespace) || name.contains('(') {
            return Err(MendError::validation_field(
                format!("macro_name must be a bare macro path, got '{}'", self.macro_name),
                "rewrite.macro_name",
            ));
        }

        if self.exclusions.iter().any(String::is_empty) {
            return Err(MendError::validation_field(
                "exclusion substrings must not be empty",
                "rewrite.exclusions",
            ));
        }

        if self.max_continuation_lines == Some(0) {
            return Err(MendError::validation_field(
                "max_continuation_lines must be greater than 0 when set",
                "rewrite.max_continuation_lines",
            ));
        }

        Ok(())
    }
}

/// Substrings that mark a quote-led line as already valid in context.
pub fn default_exclusions() -> Vec<String> {
    ["return ", "format!", "panic!", "assert!", "= \"", "let ", "const "]
        .iter()
        .map(|s| (*s).to_string())
        .collect()
}
