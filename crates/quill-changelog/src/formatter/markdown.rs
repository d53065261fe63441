//! Markdown changelog formatter

use quill_core::config::ChangelogConfig;
use tracing::{debug, instrument};

use super::ChangelogFormatter;
use crate::template::{RepoTokens, UrlFormat};
use crate::types::{ChangeCategory, Context, NoteEntry, Reference, TransformedCommit};

/// Section title for commits whose type has no category
const OTHER_CHANGES: &str = "Other Changes";

/// Markdown changelog formatter
#[derive(Debug, Clone)]
pub struct MarkdownFormatter {
    commit_url: UrlFormat,
    issue_url: UrlFormat,
    compare_url: UrlFormat,
}

impl MarkdownFormatter {
    /// Create a formatter with the default link formats
    pub fn new() -> Self {
        Self::from_config(&ChangelogConfig::default())
    }

    /// Create a formatter using the configured link formats
    pub fn from_config(config: &ChangelogConfig) -> Self {
        Self {
            commit_url: UrlFormat::new(&config.commit_url_format),
            issue_url: UrlFormat::new(&config.issue_url_format),
            compare_url: UrlFormat::new(&config.compare_url_format),
        }
    }

    fn version_header(&self, context: &Context, repo: &RepoTokens<'_>) -> String {
        let version = context.version.as_deref().unwrap_or("Unreleased");
        let level = if context.is_patch { "###" } else { "##" };

        let mut header = match (&context.previous_tag, &context.current_tag) {
            (Some(previous), Some(current)) if context.link_compare => {
                let url = self
                    .compare_url
                    .resolve_repo(repo)
                    .expand(&[
                        ("previousTag", previous.as_str()),
                        ("currentTag", current.as_str()),
                    ]);
                format!("{} [{}]({})", level, version, url)
            }
            _ => format!("{} {}", level, version),
        };

        if let Some(title) = &context.title {
            header.push_str(&format!(" \"{}\"", title));
        }
        if let Some(date) = &context.date {
            header.push_str(&format!(" ({})", date));
        }
        header
    }

    fn note_line(&self, note: &NoteEntry) -> String {
        match note.commit.scope.as_deref().filter(|s| !s.is_empty()) {
            Some(scope) => format!("* **{}:** {}", scope, note.text),
            None => format!("* {}", note.text),
        }
    }

    fn commit_line(&self, commit: &TransformedCommit, repo: &RepoTokens<'_>) -> String {
        let mut line = String::from("* ");

        if let Some(scope) = commit.scope.as_deref().filter(|s| !s.is_empty()) {
            line.push_str(&format!("**{}:** ", scope));
        }
        line.push_str(commit.subject.as_deref().unwrap_or_default());

        if let (Some(hash), Some(short_hash)) = (&commit.hash, &commit.short_hash) {
            let url = self.commit_url.resolve_repo(repo).expand(&[("hash", hash.as_str())]);
            line.push_str(&format!(" ([{}]({}))", short_hash, url));
        }

        if !commit.references.is_empty() {
            let links: Vec<String> = commit
                .references
                .iter()
                .map(|r| self.reference_link(r, repo))
                .collect();
            line.push_str(&format!(", closes {}", links.join(", ")));
        }

        line
    }

    /// A reference to another repository links there and is labelled
    /// `owner/repository#id`
    fn reference_link(&self, reference: &Reference, repo: &RepoTokens<'_>) -> String {
        let tokens = RepoTokens {
            host: repo.host,
            owner: reference.owner.as_deref().unwrap_or(repo.owner),
            repository: reference.repository.as_deref().unwrap_or(repo.repository),
        };
        let url = self.issue_url.resolve_repo(&tokens).expand(&[
            ("id", reference.issue.as_str()),
            ("prefix", reference.prefix.as_str()),
        ]);

        let label = match (&reference.owner, &reference.repository) {
            (Some(owner), Some(repository)) => format!(
                "{}/{}{}{}",
                owner, repository, reference.prefix, reference.issue
            ),
            _ => format!("{}{}", reference.prefix, reference.issue),
        };
        format!("[{}]({})", label, url)
    }

    fn section(&self, output: &mut String, level: &str, title: &str, lines: Vec<String>) {
        if lines.is_empty() {
            return;
        }
        output.push_str(&format!("{} {}\n\n", level, title));
        for line in lines {
            output.push_str(&line);
            output.push('\n');
        }
        output.push('\n');
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangelogFormatter for MarkdownFormatter {
    #[instrument(skip(self, context), fields(version = ?context.version, group_count = context.commit_groups.len()))]
    fn format(&self, context: &Context) -> String {
        let repo = RepoTokens {
            host: context.host.as_deref().unwrap_or_default(),
            owner: context.owner.as_deref().unwrap_or_default(),
            repository: context.repository.as_deref().unwrap_or_default(),
        };

        let mut output = self.version_header(context, &repo);
        output.push_str("\n\n");

        // Breaking changes
        for group in &context.note_groups {
            let lines = group.notes.iter().map(|n| self.note_line(n)).collect();
            self.section(&mut output, "###", &format!("⚠ {}", group.title), lines);
        }

        for group in &context.commit_groups {
            let heading = group.title.as_deref().filter(|t| !t.is_empty());
            let level = match heading {
                Some(title) => {
                    output.push_str(&format!("### {}\n\n", title));
                    "####"
                }
                None => "###",
            };

            for category in ChangeCategory::ALL {
                let lines = group
                    .bucket(category)
                    .iter()
                    .map(|c| self.commit_line(c, &repo))
                    .collect();
                self.section(&mut output, level, category.section(), lines);
            }

            let others = group
                .commits
                .iter()
                .filter(|c| c.category.is_none())
                .map(|c| self.commit_line(c, &repo))
                .collect();
            self.section(&mut output, level, OTHER_CHANGES, others);
        }

        debug!(output_len = output.len(), "markdown changelog formatted");
        output
    }

    fn extension(&self) -> &'static str {
        "md"
    }
}
