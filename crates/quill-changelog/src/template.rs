//! Placeholder expansion for URL formats and template partials
//!
//! Formats use `{{name}}` tokens. Expansion happens in two stages with
//! disjoint token sets:
//!
//! 1. repository tokens (`host`, `owner`, `repository`), resolved once per
//!    run, either to concrete values or to template-engine expressions;
//! 2. per-commit tokens (`id`, `prefix`, `user`, `hash`, `previousTag`,
//!    `currentTag`), resolved while transforming or rendering.
//!
//! Tokens without a value are left in place for a later stage.

/// Expand `{{key}}` tokens in a single left-to-right pass.
///
/// Replacement values are inserted verbatim and never rescanned, so a value
/// containing `{{other}}` survives for a later stage. Unknown tokens are kept.
pub fn expand_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut expanded = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        expanded.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];

        let replacement = after_open.find("}}").and_then(|end| {
            let name = &after_open[..end];
            vars.iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, end))
        });

        match replacement {
            Some((value, end)) => {
                expanded.push_str(value);
                rest = &after_open[end + 2..];
            }
            None => {
                // Keep one brace and rescan; `{{{x}}}` still expands the inner token
                expanded.push('{');
                rest = &rest[start + 1..];
            }
        }
    }

    expanded.push_str(rest);
    expanded
}

/// Repository identity tokens (stage one)
#[derive(Debug, Clone, Copy)]
pub struct RepoTokens<'a> {
    /// Host URL
    pub host: &'a str,
    /// Owner
    pub owner: &'a str,
    /// Repository name
    pub repository: &'a str,
}

impl<'a> RepoTokens<'a> {
    /// Template-engine expressions used when the partials are prepared.
    ///
    /// A commit may carry its own `owner`/`repository`, which wins over the
    /// root context.
    pub const PARTIAL: RepoTokens<'static> = RepoTokens {
        host: "{{~@root.host}}",
        owner: "{{#if this.owner}}{{~this.owner}}{{else}}{{~@root.owner}}{{/if}}",
        repository:
            "{{#if this.repository}}{{~this.repository}}{{else}}{{~@root.repository}}{{/if}}",
    };

    /// Token/value pairs
    pub fn pairs(&self) -> [(&'a str, &'a str); 3] {
        [
            ("host", self.host),
            ("owner", self.owner),
            ("repository", self.repository),
        ]
    }
}

/// A URL format string that moves through the two expansion stages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlFormat(String);

impl UrlFormat {
    /// Wrap a raw format string
    pub fn new(format: impl Into<String>) -> Self {
        Self(format.into())
    }

    /// Resolve the repository tokens, leaving per-commit tokens in place
    pub fn resolve_repo(&self, repo: &RepoTokens<'_>) -> UrlFormat {
        UrlFormat(expand_template(&self.0, &repo.pairs()))
    }

    /// Resolve per-commit tokens
    pub fn expand(&self, vars: &[(&str, &str)]) -> String {
        expand_template(&self.0, vars)
    }

    /// The current format text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
