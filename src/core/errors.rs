//! Error types for the printmend library.
//!
//! Everything that can go wrong while discovering, reading, rewriting or
//! writing source files is expressed as a [`MendError`]. The runner decides
//! which of these are fatal (discovery) and which are isolated to a single
//! file (everything raised while processing that file).

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Main result type for printmend operations.
pub type Result<T> = std::result::Result<T, MendError>;

/// Error type for all printmend operations.
#[derive(Error, Debug)]
pub enum MendError {
    /// I/O related errors (reading or writing source files, config files)
    #[error("I/O error: {message}")]
    Io {
        /// Human-readable error message
        message: String,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config {
        /// Error description
        message: String,
        /// Configuration field that caused the error
        field: Option<String>,
    },

    /// Validation errors for configuration values
    #[error("Validation error: {message}")]
    Validation {
        /// Error description
        message: String,
        /// Field or input that failed validation
        field: Option<String>,
    },

    /// The directory walk could not complete
    #[error("Discovery failed under {}: {message}", .root.display())]
    Discovery {
        /// Root directory of the walk
        root: PathBuf,
        /// Error description
        message: String,
    },

    /// A single file could not be processed
    #[error("{message}")]
    Processing {
        /// File being processed
        path: PathBuf,
        /// Error description
        message: String,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error description
        message: String,
        /// Data type being serialized
        data_type: Option<String>,
        /// Underlying serialization error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl MendError {
    /// Create a new I/O error with context
    pub fn io(message: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            field: None,
        }
    }

    /// Create a new configuration error with field context
    pub fn config_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create a new validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: None,
        }
    }

    /// Create a new validation error naming the offending field
    pub fn validation_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create a new discovery error
    pub fn discovery(root: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Discovery {
            root: root.into(),
            message: message.into(),
        }
    }

    /// Create a new per-file processing error
    pub fn processing(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Processing {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl MendError {
    /// Message without path context, for reports that already name the file.
    pub fn detail(&self) -> String {
        match self {
            Self::Io { source, .. } => source.to_string(),
            Self::Processing { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

impl From<io::Error> for MendError {
    fn from(err: io::Error) -> Self {
        Self::io("I/O operation failed", err)
    }
}

impl From<serde_yaml::Error> for MendError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Serialization {
            message: format!("YAML serialization failed: {err}"),
            data_type: Some("YAML".to_string()),
            source: Some(Box::new(err)),
        }
    }
}

impl From<serde_json::Error> for MendError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: format!("JSON serialization failed: {err}"),
            data_type: Some("JSON".to_string()),
            source: Some(Box::new(err)),
        }
    }
}

/// Result extension trait for attaching a file path to I/O failures
pub trait ResultExt<T> {
    /// Wrap an I/O failure with a message naming `path`
    fn with_path(self, action: &str, path: &Path) -> Result<T>;
}

impl<T> ResultExt<T> for std::result::Result<T, io::Error> {
    fn with_path(self, action: &str, path: &Path) -> Result<T> {
        self.map_err(|err| MendError::io(format!("{action} {}: {err}", path.display()), err))
    }
}
