//! Configuration types

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for Quill
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Version of the config schema
    #[serde(rename = "$schema", skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Project name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Changelog configuration
    pub changelog: ChangelogConfig,

    /// Repository identity used for link synthesis
    pub repository: RepositoryConfig,

    /// Template overrides
    pub templates: TemplatesConfig,
}

/// Changelog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangelogConfig {
    /// Changelog file path
    pub file: PathBuf,

    /// Changelog format (markdown, json)
    pub format: String,

    /// Ordered commit type registry. Order defines section importance.
    pub types: Vec<TypeEntry>,

    /// Issue link format
    #[serde(alias = "issueUrlFormat")]
    pub issue_url_format: String,

    /// Commit link format
    #[serde(alias = "commitUrlFormat")]
    pub commit_url_format: String,

    /// Compare link format
    #[serde(alias = "compareUrlFormat")]
    pub compare_url_format: String,

    /// User profile link format
    #[serde(alias = "userUrlFormat")]
    pub user_url_format: String,

    /// Prefixes that introduce an issue reference (e.g. `#`, `JIRA-`)
    #[serde(alias = "issuePrefixes")]
    pub issue_prefixes: Vec<String>,

    /// Text placed above the first release when writing a new file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("CHANGELOG.md"),
            format: "markdown".to_string(),
            types: default_types(),
            issue_url_format: "{{host}}/{{owner}}/{{repository}}/issues/{{id}}".to_string(),
            commit_url_format: "{{host}}/{{owner}}/{{repository}}/commit/{{hash}}".to_string(),
            compare_url_format:
                "{{host}}/{{owner}}/{{repository}}/compare/{{previousTag}}...{{currentTag}}"
                    .to_string(),
            user_url_format: "{{host}}/{{user}}".to_string(),
            issue_prefixes: vec!["#".to_string()],
            header: None,
        }
    }
}

impl ChangelogConfig {
    /// Section titles in order of first appearance.
    ///
    /// This is the commit-group importance ranking.
    pub fn section_order(&self) -> Vec<String> {
        let mut order: Vec<String> = Vec::new();
        for entry in &self.types {
            if !entry.section.is_empty() && !order.contains(&entry.section) {
                order.push(entry.section.clone());
            }
        }
        order
    }
}

/// A commit type registry entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeEntry {
    /// Commit type key (e.g. `feat`)
    #[serde(rename = "type")]
    pub commit_type: String,

    /// Section title in the changelog
    #[serde(default)]
    pub section: String,

    /// Whether commits of this type are hidden
    #[serde(default)]
    pub hidden: bool,

    /// Only match commits with exactly this scope
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

impl TypeEntry {
    /// Create a visible entry
    pub fn new(commit_type: impl Into<String>, section: impl Into<String>) -> Self {
        Self {
            commit_type: commit_type.into(),
            section: section.into(),
            hidden: false,
            scope: None,
        }
    }

    /// Mark the entry hidden
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Restrict the entry to a scope
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }
}

/// The built-in type registry
pub fn default_types() -> Vec<TypeEntry> {
    vec![
        TypeEntry::new("feat", "Features"),
        TypeEntry::new("feature", "Features"),
        TypeEntry::new("fix", "Bug Fixes"),
        TypeEntry::new("perf", "Performance Improvements"),
        TypeEntry::new("revert", "Reverts"),
        TypeEntry::new("bump", "New version"),
        TypeEntry::new("docs", "Documentation").hidden(),
        TypeEntry::new("style", "Styles").hidden(),
        TypeEntry::new("chore", "Miscellaneous Chores").hidden(),
        TypeEntry::new("refactor", "Code Refactoring").hidden(),
        TypeEntry::new("test", "Tests").hidden(),
        TypeEntry::new("build", "Build System").hidden(),
        TypeEntry::new("ci", "Continuous Integration").hidden(),
    ]
}

/// Repository identity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryConfig {
    /// Host URL (e.g. `https://github.com`)
    pub host: String,

    /// Repository owner or organization
    pub owner: Option<String>,

    /// Repository name
    pub repository: Option<String>,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            host: "https://github.com".to_string(),
            owner: None,
            repository: None,
        }
    }
}

/// Paths to template overrides. Unset entries use the built-in templates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplatesConfig {
    /// Main template
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main: Option<PathBuf>,

    /// Header partial
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<PathBuf>,

    /// Commit partial
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit: Option<PathBuf>,

    /// Footer partial
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_order_dedups() {
        let config = ChangelogConfig::default();
        let order = config.section_order();
        assert_eq!(order[0], "Features");
        assert_eq!(order[1], "Bug Fixes");
        assert_eq!(order.iter().filter(|s| *s == "Features").count(), 1);
    }

    #[test]
    fn test_type_entry_yaml() {
        let yaml = "- type: feat\n  section: Features\n- type: fix\n  section: Fixes\n  scope: api\n  hidden: true\n";
        let entries: Vec<TypeEntry> = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(entries[0], TypeEntry::new("feat", "Features"));
        assert_eq!(entries[1].scope.as_deref(), Some("api"));
        assert!(entries[1].hidden);
    }

    #[test]
    fn test_camel_case_aliases() {
        let json = r##"{"issueUrlFormat": "{{host}}/i/{{id}}", "issuePrefixes": ["#", "GH-"]}"##;
        let config: ChangelogConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.issue_url_format, "{{host}}/i/{{id}}");
        assert_eq!(config.issue_prefixes, vec!["#", "GH-"]);
        assert_eq!(config.types, default_types());
    }
}
