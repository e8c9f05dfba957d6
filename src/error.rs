//! Configuration errors.
//!
//! The typecast walk itself never fails; everything that can go wrong is
//! caught while the filter is being configured.

use std::fmt;
use std::path::PathBuf;

/// Error type for building a typecaster from configuration
#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(String),
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },
    Conflict(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "Failed to read config file {}: {}", path.display(), source)
            }
            ConfigError::Parse(msg) => write!(f, "Failed to parse config: {}", msg),
            ConfigError::InvalidPattern { pattern, source } => {
                write!(f, "Invalid ignore key pattern '{}': {}", pattern, source)
            }
            ConfigError::Conflict(msg) => write!(f, "Conflicting options: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::InvalidPattern { source, .. } => Some(source),
            ConfigError::Parse(_) | ConfigError::Conflict(_) => None,
        }
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}
