//! Conventional Commits parser
//!
//! Parses commits following the Conventional Commits specification:
//! https://www.conventionalcommits.org/

use regex::Regex;
use std::sync::LazyLock;
use tracing::trace;

use quill_core::error::{ChangelogError, Result};

use super::{CommitParser, ParserConfig, RawCommit};
use crate::types::{CommitRecord, Note, Reference};

/// Regex for parsing conventional commit headers
static CONVENTIONAL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<type>[a-zA-Z]+)(?:\((?P<scope>[^)]+)\))?(?P<breaking>!)?: (?P<description>.+)$",
    )
    .expect("Invalid regex")
});

/// Regex for `git revert` headers
static REVERT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^(?:Revert|revert:)\s"?(?P<reverted>.+?)"?$"#).expect("Invalid regex")
});

/// Regex for footer lines (`Token: value` or `Token #value`)
static FOOTER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<token>[\w-]+|BREAKING CHANGE)(?P<sep>: | #)(?P<value>.*)$")
        .expect("Invalid regex")
});

/// Reference pattern for the default configuration
static DEFAULT_REFERENCE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    reference_regex(&ParserConfig::default()).expect("Invalid regex")
});

/// Parser for Conventional Commits format
pub struct ConventionalParser {
    config: ParserConfig,
    references: Regex,
}

impl ConventionalParser {
    /// Create a new parser with default configuration
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
            references: DEFAULT_REFERENCE_REGEX.clone(),
        }
    }

    /// Create a parser with custom configuration
    pub fn with_config(config: ParserConfig) -> Result<Self> {
        let references = reference_regex(&config)?;
        Ok(Self { config, references })
    }

    /// Split the text after the header into body, footer and notes
    fn parse_body(&self, text: &str) -> ParsedBody {
        let mut body_lines = Vec::new();
        let mut footer_lines = Vec::new();
        let mut notes: Vec<Note> = Vec::new();
        let mut in_footer = false;
        let mut in_note = false;

        for line in text.lines() {
            if let Some(caps) = FOOTER_REGEX.captures(line) {
                in_footer = true;
                footer_lines.push(line);

                let token = &caps["token"];
                in_note = self
                    .config
                    .note_keywords
                    .iter()
                    .any(|k| k.eq_ignore_ascii_case(token));
                if in_note {
                    notes.push(Note::new(token, caps["value"].trim()));
                }
            } else if in_footer {
                footer_lines.push(line);
                if in_note {
                    if let Some(note) = notes.last_mut() {
                        if !line.trim().is_empty() {
                            if !note.text.is_empty() {
                                note.text.push('\n');
                            }
                            note.text.push_str(line.trim());
                        }
                    }
                }
            } else {
                body_lines.push(line);
            }
        }

        ParsedBody {
            body: non_empty(body_lines.join("\n")),
            footer: non_empty(footer_lines.join("\n")),
            notes,
        }
    }

    /// Extract issue references from the given texts
    fn parse_references(&self, texts: &[Option<&str>]) -> Vec<Reference> {
        texts
            .iter()
            .flatten()
            .flat_map(|text| self.references.captures_iter(text))
            .map(|caps| Reference {
                action: caps.name("action").map(|m| m.as_str().to_string()),
                owner: caps.name("owner").map(|m| m.as_str().to_string()),
                repository: caps.name("repository").map(|m| m.as_str().to_string()),
                prefix: caps["prefix"].to_string(),
                issue: caps["issue"].to_string(),
                raw: caps.get(0).map(|m| m.as_str().to_string()),
            })
            .collect()
    }
}

impl Default for ConventionalParser {
    fn default() -> Self {
        Self::new()
    }
}

struct ParsedBody {
    body: Option<String>,
    footer: Option<String>,
    notes: Vec<Note>,
}

fn non_empty(text: String) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Build the reference pattern: optional action, optional `owner/repo`,
/// then one of the issue prefixes and the issue id
fn reference_regex(config: &ParserConfig) -> Result<Regex> {
    let prefixes: Vec<String> = config.issue_prefixes.iter().map(|p| regex::escape(p)).collect();
    let actions: Vec<String> = config
        .reference_actions
        .iter()
        .map(|a| regex::escape(a))
        .collect();

    let action = if actions.is_empty() {
        String::new()
    } else {
        format!(r"(?:\b(?i:(?P<action>{}))\s+)?", actions.join("|"))
    };
    let pattern = format!(
        r"{}(?:(?P<owner>[\w-]+)/(?P<repository>[\w.-]+))?(?P<prefix>{})(?P<issue>[\w-]*\d+)",
        action,
        prefixes.join("|")
    );

    Regex::new(&pattern).map_err(|e| {
        ChangelogError::InvalidPattern {
            pattern,
            reason: e.to_string(),
        }
        .into()
    })
}

impl CommitParser for ConventionalParser {
    fn parse(&self, commit: &RawCommit) -> Option<CommitRecord> {
        let header = commit.header();

        // Skip merge commits if configured
        if !self.config.include_merges && header.starts_with("Merge ") {
            trace!(hash = %commit.hash, "skipping merge commit");
            return None;
        }

        let rest = commit
            .message
            .trim_start()
            .split_once('\n')
            .map(|(_, rest)| rest)
            .unwrap_or_default();
        let parsed = self.parse_body(rest);

        let mut record = CommitRecord {
            header: Some(header.to_string()),
            hash: Some(commit.hash.clone()),
            body: parsed.body,
            footer: parsed.footer,
            notes: parsed.notes,
            ..Default::default()
        };

        if let Some(caps) = REVERT_REGEX.captures(header) {
            record.revert = true;
            record.commit_type = Some("revert".to_string());
            record.subject = Some(caps["reverted"].to_string());
        } else if let Some(caps) = CONVENTIONAL_REGEX.captures(header) {
            record.commit_type = Some(caps["type"].to_string());
            record.scope = caps.name("scope").map(|m| m.as_str().to_string());
            record.subject = Some(caps["description"].to_string());
        } else {
            trace!(hash = %commit.hash, header, "header is not conventional");
        }

        record.references = self.parse_references(&[
            Some(header),
            record.body.as_deref(),
            record.footer.as_deref(),
        ]);

        Some(record)
    }
}
