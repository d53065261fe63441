//! Configuration validation

use tracing::debug;

use crate::error::{ConfigError, Result};

use super::types::Config;

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    validate_changelog(config)?;
    validate_types(config)?;
    validate_repository(config)?;
    debug!("configuration validation passed");
    Ok(())
}

fn validate_changelog(config: &Config) -> Result<()> {
    let changelog = &config.changelog;

    let valid_formats = ["markdown", "md", "json"];
    if !valid_formats.contains(&changelog.format.as_str()) {
        return Err(ConfigError::InvalidValue {
            field: "changelog.format".to_string(),
            message: format!("must be one of: {}", valid_formats.join(", ")),
        }
        .into());
    }

    let formats = [
        ("changelog.issue_url_format", &changelog.issue_url_format),
        ("changelog.commit_url_format", &changelog.commit_url_format),
        ("changelog.compare_url_format", &changelog.compare_url_format),
        ("changelog.user_url_format", &changelog.user_url_format),
    ];
    for (field, value) in formats {
        if value.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: field.to_string(),
                message: "URL format cannot be empty".to_string(),
            }
            .into());
        }
    }

    if changelog.issue_prefixes.is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "changelog.issue_prefixes".to_string(),
            message: "at least one issue prefix is required".to_string(),
        }
        .into());
    }

    for (i, prefix) in changelog.issue_prefixes.iter().enumerate() {
        if prefix.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: format!("changelog.issue_prefixes[{}]", i),
                message: "issue prefix cannot be empty".to_string(),
            }
            .into());
        }
    }

    Ok(())
}

fn validate_types(config: &Config) -> Result<()> {
    if !config.changelog.types.is_empty() {
        debug!(count = config.changelog.types.len(), "validating type entries");
    }
    for (i, entry) in config.changelog.types.iter().enumerate() {
        if entry.commit_type.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: format!("changelog.types[{}].type", i),
                message: "type cannot be empty".to_string(),
            }
            .into());
        }

        if entry.section.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: format!("changelog.types[{}].section", i),
                message: "section cannot be empty".to_string(),
            }
            .into());
        }
    }

    Ok(())
}

fn validate_repository(config: &Config) -> Result<()> {
    if config.repository.host.ends_with('/') {
        return Err(ConfigError::InvalidValue {
            field: "repository.host".to_string(),
            message: "host must not end with '/'".to_string(),
        }
        .into());
    }

    Ok(())
}
