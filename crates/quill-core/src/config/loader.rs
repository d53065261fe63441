//! Configuration loading

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{ConfigError, Result};

use super::defaults::config_file_names;
use super::types::Config;
use super::validation::validate_config;

/// Load configuration from a file
pub fn load_config(path: &Path) -> Result<Config> {
    let format = if path.extension().is_some_and(|e| e == "toml") {
        "TOML"
    } else {
        "YAML"
    };
    info!(path = %path.display(), format, "loading config");

    let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

    let config: Config = if format == "TOML" {
        toml::from_str(&content).map_err(ConfigError::TomlError)?
    } else {
        serde_yaml::from_str(&content).map_err(ConfigError::YamlError)?
    };

    validate_config(&config)?;
    debug!(
        path = %path.display(),
        types = config.changelog.types.len(),
        "config loaded and validated"
    );
    Ok(config)
}

/// Find configuration file in directory or parent directories.
///
/// At each directory level the search checks:
///   1. `<dir>/<name>`          (e.g. `quill.toml`)
///   2. `<dir>/.github/<name>`  (e.g. `.github/quill.toml`)
///
/// The first match wins. Parents are walked until the filesystem root.
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    debug!(start_dir = %start_dir.display(), "searching for config file");
    let mut current = start_dir.to_path_buf();

    loop {
        for name in config_file_names() {
            let config_path = current.join(name);
            if config_path.exists() {
                info!(path = %config_path.display(), "found config file");
                return Some(config_path);
            }

            let github_path = current.join(".github").join(name);
            if github_path.exists() {
                info!(path = %github_path.display(), "found config file in .github/");
                return Some(github_path);
            }
        }

        if !current.pop() {
            break;
        }
    }

    debug!("no config file found");
    None
}

/// Load configuration from directory (searching parent directories)
pub fn load_config_from_dir(dir: &Path) -> Result<(Config, PathBuf)> {
    let config_path = find_config(dir).ok_or_else(|| ConfigError::NotFound(dir.to_path_buf()))?;

    let config = load_config(&config_path)?;
    Ok((config, config_path))
}

/// Load configuration or use defaults
pub fn load_config_or_default(dir: &Path) -> (Config, Option<PathBuf>) {
    match load_config_from_dir(dir) {
        Ok((config, path)) => (config, Some(path)),
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "no usable config found, using defaults");
            (Config::default(), None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_toml() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("quill.toml");
        std::fs::write(&config_path, "[repository]\nowner = \"acme\"").unwrap();

        let found = find_config(temp.path());
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_prefers_yaml_over_toml() {
        let temp = TempDir::new().unwrap();
        let toml_path = temp.path().join("quill.toml");
        let yaml_path = temp.path().join("quill.yaml");
        std::fs::write(&toml_path, "[repository]\nowner = \"acme\"").unwrap();
        std::fs::write(&yaml_path, "repository:\n  owner: acme").unwrap();

        let found = find_config(temp.path()).unwrap();
        assert_eq!(found, yaml_path);
    }

    #[test]
    fn test_find_config_in_github_dir() {
        let temp = TempDir::new().unwrap();
        let github_dir = temp.path().join(".github");
        std::fs::create_dir_all(&github_dir).unwrap();
        let config_path = github_dir.join("quill.toml");
        std::fs::write(&config_path, "[repository]\nowner = \"acme\"").unwrap();

        let found = find_config(temp.path());
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_in_parent() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join(".quill.yaml");
        std::fs::write(&config_path, "repository:\n  owner: acme").unwrap();
        let nested = temp.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let found = find_config(&nested);
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_load_config_toml() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("quill.toml");
        std::fs::write(
            &config_path,
            "[repository]\nowner = \"acme\"\nrepository = \"rocket\"\n\n[changelog]\nissue_prefixes = [\"#\", \"GH-\"]\n\n[[changelog.types]]\ntype = \"feat\"\nsection = \"Features\"\n",
        )
        .unwrap();

        let config = load_config(&config_path).unwrap();
        assert_eq!(config.repository.owner.as_deref(), Some("acme"));
        assert_eq!(config.changelog.issue_prefixes, vec!["#", "GH-"]);
        assert_eq!(config.changelog.types.len(), 1);
    }

    #[test]
    fn test_load_config_yaml() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("quill.yaml");
        std::fs::write(
            &config_path,
            "repository:\n  host: https://gitlab.com\n  owner: acme\nchangelog:\n  types:\n    - type: fix\n      section: Fixes\n      scope: api\n",
        )
        .unwrap();

        let config = load_config(&config_path).unwrap();
        assert_eq!(config.repository.host, "https://gitlab.com");
        assert_eq!(config.changelog.types[0].scope.as_deref(), Some("api"));
    }

    #[test]
    fn test_load_config_rejects_invalid() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("quill.yaml");
        std::fs::write(&config_path, "changelog:\n  issue_prefixes: []\n").unwrap();

        assert!(load_config(&config_path).is_err());
    }

    #[test]
    fn test_load_config_or_default_without_file() {
        let temp = TempDir::new().unwrap();
        let (config, path) = load_config_or_default(temp.path());
        assert!(path.is_none());
        assert_eq!(config.changelog.issue_prefixes, vec!["#"]);
    }
}
