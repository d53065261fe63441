//! Per-commit transform
//!
//! Decides whether a commit appears in the changelog and, if it does,
//! resolves its display type and scope, shortens its hash, and turns issue
//! references and `@user` mentions in the subject into links.

use regex::{Captures, Regex};
use std::sync::LazyLock;
use tracing::{debug, trace};

use quill_core::config::{ChangelogConfig, TypeEntry};
use quill_core::error::{ChangelogError, Result};

use crate::matcher::find_type_entry;
use crate::notes::breaking_notes;
use crate::template::{RepoTokens, UrlFormat};
use crate::types::{
    ChangeCategory, CommitRecord, Context, Note, TransformedCommit, BREAKING_CHANGES_TITLE,
};

/// `Release-As:` directive, optionally naming a package
static RELEASE_AS_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)release-as:\s*\w*@?([0-9]+\.[0-9]+\.[0-9a-z]+(-[0-9a-z.]+)?)\s*")
        .expect("Invalid regex")
});

/// `@handle` not preceded by an ASCII word character
static USER_MENTION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?-u:\B)@([a-z0-9](?:-?[a-z0-9/]){0,38})").expect("Invalid regex")
});

/// Length of the abbreviated hash
const SHORT_HASH_LEN: usize = 7;

/// The commit transform, compiled from changelog configuration
#[derive(Debug, Clone)]
pub struct CommitTransform {
    types: Vec<TypeEntry>,
    issue_url: UrlFormat,
    user_url: UrlFormat,
    issue_pattern: Option<Regex>,
}

impl CommitTransform {
    /// Build the transform from configuration
    pub fn new(config: &ChangelogConfig) -> Result<Self> {
        Ok(Self {
            types: config.types.clone(),
            issue_url: UrlFormat::new(&config.issue_url_format),
            user_url: UrlFormat::new(&config.user_url_format),
            issue_pattern: issue_pattern(&config.issue_prefixes)?,
        })
    }

    /// Transform one commit. `None` means the commit is left out.
    pub fn apply(&self, commit: &CommitRecord, context: &Context) -> Option<TransformedCommit> {
        let mut discard = true;
        let entry = find_type_entry(&self.types, commit);

        let notes: Vec<Note> = breaking_notes(commit)
            .into_iter()
            .map(|note| {
                discard = false;
                Note {
                    title: BREAKING_CHANGES_TITLE.to_string(),
                    ..note
                }
            })
            .collect();

        if let Some(version) = release_as(commit) {
            debug!(hash = ?commit.hash, version = %version, "release marker keeps commit");
            discard = false;
        }

        if discard && entry.map_or(true, |e| e.hidden) {
            debug!(
                hash = ?commit.hash,
                commit_type = ?commit.commit_type,
                hidden = entry.is_some(),
                "commit discarded"
            );
            return None;
        }

        let commit_type = match entry {
            Some(entry) => entry.section.clone(),
            None => commit.commit_type.clone().unwrap_or_default(),
        };
        let category = ChangeCategory::from_section(&commit_type);

        let scope = match commit.scope.as_deref() {
            Some("*") => Some(String::new()),
            other => other.map(str::to_string),
        };

        let short_hash = match &commit.hash {
            Some(hash) => Some(hash.chars().take(SHORT_HASH_LEN).collect()),
            None => commit.short_hash.clone(),
        };

        let mut linked: Vec<(String, String)> = Vec::new();
        let subject = commit
            .subject
            .as_deref()
            .map(|subject| self.link_subject(subject, context, &mut linked));

        let references = commit
            .references
            .iter()
            .filter(|r| !linked.iter().any(|(prefix, issue)| r.is(prefix, issue)))
            .cloned()
            .collect();

        trace!(
            hash = ?commit.hash,
            commit_type = %commit_type,
            linked = linked.len(),
            "commit transformed"
        );

        Some(TransformedCommit {
            notes,
            commit_type,
            category,
            scope,
            hash: commit.hash.clone(),
            short_hash,
            subject,
            references,
            repo: None,
        })
    }

    /// Link issue references and user mentions, recording linked issues
    fn link_subject(
        &self,
        subject: &str,
        context: &Context,
        linked: &mut Vec<(String, String)>,
    ) -> String {
        let repo = RepoTokens {
            host: context.host.as_deref().unwrap_or_default(),
            owner: context.owner.as_deref().unwrap_or_default(),
            repository: context.repository.as_deref().unwrap_or_default(),
        };

        let subject = match &self.issue_pattern {
            Some(pattern) => {
                let issue_url = self.issue_url.resolve_repo(&repo);
                pattern
                    .replace_all(subject, |caps: &Captures<'_>| {
                        let prefix = &caps[1];
                        let issue = &caps[2];
                        linked.push((prefix.to_string(), issue.to_string()));
                        let url = issue_url.expand(&[("id", issue), ("prefix", prefix)]);
                        format!("[{}{}]({})", prefix, issue, url)
                    })
                    .into_owned()
            }
            None => subject.to_string(),
        };

        let user_url = self.user_url.resolve_repo(&repo);
        USER_MENTION_REGEX
            .replace_all(&subject, |caps: &Captures<'_>| {
                let user = &caps[1];
                // Slash handles read like paths (`@scope/pkg`), not users
                if user.contains('/') {
                    return format!("@{}", user);
                }
                let url = user_url.expand(&[("user", user)]);
                format!("[@{}]({})", user, url)
            })
            .into_owned()
    }
}

/// Compile the issue reference pattern. No prefixes means no issue linking.
fn issue_pattern(prefixes: &[String]) -> Result<Option<Regex>> {
    if prefixes.is_empty() {
        return Ok(None);
    }

    let alternatives: Vec<String> = prefixes.iter().map(|p| regex::escape(p)).collect();
    let pattern = format!("({})([a-z0-9]+)", alternatives.join("|"));
    let regex = Regex::new(&pattern).map_err(|e| ChangelogError::InvalidPattern {
        pattern: pattern.clone(),
        reason: e.to_string(),
    })?;
    Ok(Some(regex))
}

/// The version named by a `Release-As:` directive in the footer or body
pub fn release_as(commit: &CommitRecord) -> Option<String> {
    [commit.footer.as_deref(), commit.body.as_deref()]
        .into_iter()
        .flatten()
        .find_map(|text| RELEASE_AS_REGEX.captures(text))
        .map(|caps| caps[1].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Reference;
    use quill_core::config::RepositoryConfig;

    fn context() -> Context {
        Context::new(&RepositoryConfig {
            host: "https://github.com".to_string(),
            owner: Some("acme".to_string()),
            repository: Some("rocket".to_string()),
        })
    }

    fn transform() -> CommitTransform {
        CommitTransform::new(&ChangelogConfig::default()).unwrap()
    }

    #[test]
    fn test_visible_type_uses_section() {
        let commit = CommitRecord::new("feat", "add X");
        let out = transform().apply(&commit, &context()).unwrap();
        assert_eq!(out.commit_type, "Features");
        assert_eq!(out.category, Some(ChangeCategory::Features));
    }

    #[test]
    fn test_issue_linked_and_reference_removed() {
        let commit = CommitRecord::new("feat", "add X (#42)").with_reference(Reference::new("#", "42"));
        let out = transform().apply(&commit, &context()).unwrap();
        assert_eq!(
            out.subject.as_deref(),
            Some("add X ([#42](https://github.com/acme/rocket/issues/42))")
        );
        assert!(out.references.is_empty());
    }

    #[test]
    fn test_unlinked_references_kept() {
        let commit = CommitRecord::new("fix", "handle null (#7)")
            .with_reference(Reference::new("#", "7"))
            .with_reference(Reference::new("#", "8").with_action("Closes"));
        let out = transform().apply(&commit, &context()).unwrap();
        assert_eq!(out.references, vec![Reference::new("#", "8").with_action("Closes")]);
    }

    #[test]
    fn test_hidden_type_discarded() {
        let commit = CommitRecord::new("chore", "bump deps");
        assert!(transform().apply(&commit, &context()).is_none());
    }

    #[test]
    fn test_unknown_type_discarded() {
        let commit = CommitRecord::new("wip", "stuff");
        assert!(transform().apply(&commit, &context()).is_none());
    }

    #[test]
    fn test_release_marker_keeps_unknown_type() {
        let config = ChangelogConfig {
            types: vec![TypeEntry::new("feat", "Features")],
            ..Default::default()
        };
        let transform = CommitTransform::new(&config).unwrap();
        let commit = CommitRecord::new("chore", "release").with_footer("Release-As: 2.0.0");
        let out = transform.apply(&commit, &context()).unwrap();
        assert_eq!(out.commit_type, "chore");
        assert_eq!(out.category, None);
    }

    #[test]
    fn test_release_marker_in_body_case_insensitive() {
        let commit = CommitRecord::new("chore", "release").with_body("RELEASE-AS: pkg@1.2.3-rc.1");
        assert_eq!(release_as(&commit).as_deref(), Some("1.2.3-rc.1"));
        let out = transform().apply(&commit, &context()).unwrap();
        assert_eq!(out.commit_type, "Miscellaneous Chores");
    }

    #[test]
    fn test_breaking_note_keeps_hidden_type() {
        let commit = CommitRecord::new("refactor", "drop legacy api")
            .with_header("refactor!: drop legacy api");
        let out = transform().apply(&commit, &context()).unwrap();
        assert_eq!(out.commit_type, "Code Refactoring");
        assert_eq!(out.notes, vec![Note::new(BREAKING_CHANGES_TITLE, "drop legacy api")]);
    }

    #[test]
    fn test_explicit_notes_relabelled() {
        let commit = CommitRecord::new("feat", "x").with_note(Note::new("BREAKING CHANGE", "why"));
        let out = transform().apply(&commit, &context()).unwrap();
        assert_eq!(out.notes, vec![Note::new(BREAKING_CHANGES_TITLE, "why")]);
    }

    #[test]
    fn test_wildcard_scope_becomes_empty() {
        let commit = CommitRecord::new("fix", "x").with_scope("*");
        let out = transform().apply(&commit, &context()).unwrap();
        assert_eq!(out.scope.as_deref(), Some(""));

        let commit = CommitRecord::new("fix", "x");
        assert_eq!(transform().apply(&commit, &context()).unwrap().scope, None);
    }

    #[test]
    fn test_short_hash() {
        let commit = CommitRecord::new("fix", "x").with_hash("0123456789abcdef");
        let out = transform().apply(&commit, &context()).unwrap();
        assert_eq!(out.short_hash.as_deref(), Some("0123456"));

        let mut commit = CommitRecord::new("fix", "x");
        commit.short_hash = Some("abc".to_string());
        let out = transform().apply(&commit, &context()).unwrap();
        assert_eq!(out.short_hash.as_deref(), Some("abc"));
    }

    #[test]
    fn test_user_mention_linked() {
        let commit = CommitRecord::new("fix", "thanks @octo-cat");
        let out = transform().apply(&commit, &context()).unwrap();
        assert_eq!(
            out.subject.as_deref(),
            Some("thanks [@octo-cat](https://github.com/octo-cat)")
        );
    }

    #[test]
    fn test_slash_mention_left_alone() {
        let commit = CommitRecord::new("fix", "bump @types/node");
        let out = transform().apply(&commit, &context()).unwrap();
        assert_eq!(out.subject.as_deref(), Some("bump @types/node"));
    }

    #[test]
    fn test_email_not_treated_as_mention() {
        let commit = CommitRecord::new("fix", "mail dev@example.com");
        let out = transform().apply(&commit, &context()).unwrap();
        assert_eq!(out.subject.as_deref(), Some("mail dev@example.com"));
    }

    #[test]
    fn test_mention_after_non_ascii_letter_linked() {
        let commit = CommitRecord::new("fix", "café@octo");
        let out = transform().apply(&commit, &context()).unwrap();
        assert_eq!(
            out.subject.as_deref(),
            Some("café[@octo](https://github.com/octo)")
        );
    }

    #[test]
    fn test_custom_prefixes() {
        let config = ChangelogConfig {
            issue_prefixes: vec!["#".to_string(), "GH-".to_string()],
            issue_url_format: "{{host}}/{{owner}}/{{repository}}/issues/{{prefix}}{{id}}".to_string(),
            ..Default::default()
        };
        let transform = CommitTransform::new(&config).unwrap();
        let commit = CommitRecord::new("fix", "see GH-12")
            .with_reference(Reference::new("GH-", "12"));
        let out = transform.apply(&commit, &context()).unwrap();
        assert_eq!(
            out.subject.as_deref(),
            Some("see [GH-12](https://github.com/acme/rocket/issues/GH-12)")
        );
        assert!(out.references.is_empty());
    }

    #[test]
    fn test_revert_uses_revert_section() {
        let commit = CommitRecord::new("feat", "x").reverted();
        let out = transform().apply(&commit, &context()).unwrap();
        assert_eq!(out.category, Some(ChangeCategory::Revert));
    }

    #[test]
    fn test_missing_subject_stays_missing() {
        let mut commit = CommitRecord::new("feat", "x");
        commit.subject = None;
        let out = transform().apply(&commit, &context()).unwrap();
        assert!(out.subject.is_none());
    }
}
