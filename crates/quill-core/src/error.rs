//! Error types for Quill

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using QuillError
pub type Result<T> = std::result::Result<T, QuillError>;

/// Main error type for Quill operations
#[derive(Debug, Error)]
pub enum QuillError {
    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Changelog-related errors
    #[error(transparent)]
    Changelog(#[from] ChangelogError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found at {0}")]
    NotFound(PathBuf),

    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {message}")]
    InvalidValue { field: String, message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// IO error
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
}

/// Changelog-related errors
#[derive(Debug, Error)]
pub enum ChangelogError {
    /// Failed to parse a raw commit
    #[error("Failed to parse commit: {0}")]
    ParseFailed(String),

    /// A configured pattern (issue prefix, mention) did not compile
    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// Template override file not found
    #[error("Template not found at {0}")]
    TemplateNotFound(PathBuf),

    /// Failed to write changelog
    #[error("Failed to write changelog: {0}")]
    WriteFailed(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_value_message() {
        let err: QuillError = ConfigError::InvalidValue {
            field: "changelog.issue_prefixes".to_string(),
            message: "must not be empty".to_string(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Invalid configuration: changelog.issue_prefixes - must not be empty"
        );
    }

    #[test]
    fn test_changelog_error_is_transparent() {
        let err: QuillError = ChangelogError::ParseFailed("empty header".to_string()).into();
        assert_eq!(err.to_string(), "Failed to parse commit: empty header");
    }
}
