//! Errors raised while reading, checking or writing `config.toml`

use std::path::PathBuf;
use thiserror::Error;

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// `config.toml` exists but could not be read, or is blank
    #[error("Cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The staged temp file could not replace `config.toml`
    #[error("Cannot replace {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{path} is not valid TOML: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Cannot render config as TOML: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Refused to save; one message per offending field, joined with `; `
    #[error("Invalid config: {0}")]
    Invalid(String),

    #[error("Cannot create config directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    /// No home or app-data directory to derive the config location from
    #[error("No config directory: {reason}")]
    NoConfigDir { reason: String },

    #[error("Cannot keep a copy of the previous config at {path}: {source}")]
    Backup {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A `HAILCAST_*` variable held something unusable
    #[error("Invalid value '{value}' for {variable}")]
    EnvOverride { variable: String, value: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// One rejected field, addressed as `section.field`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    /// Offending value as written in the file
    pub value: Option<String>,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            value: None,
        }
    }

    pub fn with_value(
        field: impl Into<String>,
        message: impl Into<String>,
        value: impl ToString,
    ) -> Self {
        Self {
            value: Some(value.to_string()),
            ..Self::new(field, message)
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Field '{}': {}", self.field, self.message)?;
        match &self.value {
            Some(value) => write!(f, " (got: {})", value),
            None => Ok(()),
        }
    }
}

impl std::error::Error for ValidationError {}
