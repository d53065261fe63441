//! Parser input and configuration types

use serde::{Deserialize, Serialize};
use tracing::debug;

use quill_core::config::ChangelogConfig;

/// Separator between commits in raw `git log` output
pub const RAW_COMMIT_SEPARATOR: &str = "------------------------ >8 ------------------------";

/// A commit as read from history: hash plus full message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCommit {
    /// Full commit hash
    pub hash: String,
    /// Full commit message
    pub message: String,
}

impl RawCommit {
    /// Create a raw commit
    pub fn new(hash: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            hash: hash.into(),
            message: message.into(),
        }
    }

    /// First line of the message
    pub fn header(&self) -> &str {
        self.message.lines().next().unwrap_or_default().trim()
    }

    /// Split `git log --format=%H%n%B%n<separator>` output into commits.
    ///
    /// Each chunk's first non-empty line is the hash; the rest is the message.
    pub fn split_log(log: &str) -> Vec<RawCommit> {
        let commits: Vec<RawCommit> = log
            .split(RAW_COMMIT_SEPARATOR)
            .filter_map(|chunk| {
                let chunk = chunk.trim_start_matches(['\r', '\n']);
                let (hash, message) = chunk.split_once('\n')?;
                let hash = hash.trim();
                if hash.is_empty() {
                    return None;
                }
                Some(RawCommit::new(hash, message.trim()))
            })
            .collect();
        debug!(count = commits.len(), "split raw commit log");
        commits
    }
}

/// Configuration for the commit parser
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Prefixes that introduce an issue reference
    pub issue_prefixes: Vec<String>,
    /// Keywords that mark a reference as acted upon (e.g. `Closes`)
    pub reference_actions: Vec<String>,
    /// Footer tokens that introduce a breaking-change note
    pub note_keywords: Vec<String>,
    /// Whether to include merge commits
    pub include_merges: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            issue_prefixes: vec!["#".to_string()],
            reference_actions: [
                "close", "closes", "closed", "fix", "fixes", "fixed", "resolve", "resolves",
                "resolved",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            note_keywords: vec!["BREAKING CHANGE".to_string(), "BREAKING-CHANGE".to_string()],
            include_merges: false,
        }
    }
}

impl ParserConfig {
    /// Parser configuration matching a changelog configuration
    pub fn from_changelog(config: &ChangelogConfig) -> Self {
        Self {
            issue_prefixes: config.issue_prefixes.clone(),
            ..Default::default()
        }
    }

    /// Set whether to include merge commits
    pub fn with_merges(mut self, include: bool) -> Self {
        self.include_merges = include;
        self
    }

    /// Add an issue prefix
    pub fn issue_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.issue_prefixes.push(prefix.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_log() {
        let log = format!(
            "abc123\nfeat: one\n\nbody\n{sep}\ndef456\nfix: two\n{sep}\n",
            sep = RAW_COMMIT_SEPARATOR
        );
        let commits = RawCommit::split_log(&log);
        assert_eq!(commits.len(), 2);
        assert_eq!(commits[0].hash, "abc123");
        assert_eq!(commits[0].message, "feat: one\n\nbody");
        assert_eq!(commits[1].header(), "fix: two");
    }

    #[test]
    fn test_split_log_empty() {
        assert!(RawCommit::split_log("").is_empty());
        assert!(RawCommit::split_log("\n").is_empty());
    }
}
