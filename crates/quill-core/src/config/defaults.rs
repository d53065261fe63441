//! Default configuration values

use super::types::Config;

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = "quill.yaml";

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = "quill.toml";

/// Alternative configuration file name
pub const ALT_CONFIG_FILE: &str = ".quill.yaml";

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_YAML,
        DEFAULT_CONFIG_TOML,
        ALT_CONFIG_FILE,
        ".quill.toml",
    ]
}

/// Generate default configuration TOML
pub fn default_config_toml() -> String {
    let config = Config::default();
    toml::to_string_pretty(&config).unwrap_or_else(|_| DEFAULT_CONFIG_TEMPLATE.to_string())
}

/// Default configuration template
pub const DEFAULT_CONFIG_TEMPLATE: &str = r##"# Quill Configuration

repository:
  host: https://github.com
  owner: my-org
  repository: my-repo

changelog:
  file: CHANGELOG.md
  format: markdown
  issue_url_format: "{{host}}/{{owner}}/{{repository}}/issues/{{id}}"
  commit_url_format: "{{host}}/{{owner}}/{{repository}}/commit/{{hash}}"
  compare_url_format: "{{host}}/{{owner}}/{{repository}}/compare/{{previousTag}}...{{currentTag}}"
  user_url_format: "{{host}}/{{user}}"
  issue_prefixes: ["#"]
  types:
    - { type: feat, section: Features }
    - { type: feature, section: Features }
    - { type: fix, section: Bug Fixes }
    - { type: perf, section: Performance Improvements }
    - { type: revert, section: Reverts }
    - { type: bump, section: New version }
    - { type: docs, section: Documentation, hidden: true }
    - { type: style, section: Styles, hidden: true }
    - { type: chore, section: Miscellaneous Chores, hidden: true }
    - { type: refactor, section: Code Refactoring, hidden: true }
    - { type: test, section: Tests, hidden: true }
    - { type: build, section: Build System, hidden: true }
    - { type: ci, section: Continuous Integration, hidden: true }
"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_parses_to_defaults() {
        let config: Config = serde_yaml::from_str(DEFAULT_CONFIG_TEMPLATE).unwrap();
        assert_eq!(config.changelog.types, Config::default().changelog.types);
        assert_eq!(config.repository.owner.as_deref(), Some("my-org"));
    }

    #[test]
    fn test_generated_toml_round_trips() {
        let config: Config = toml::from_str(&default_config_toml()).unwrap();
        assert_eq!(config.changelog.issue_prefixes, vec!["#"]);
        assert_eq!(config.changelog.types, Config::default().changelog.types);
    }
}
