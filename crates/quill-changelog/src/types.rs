//! Changelog types

use std::collections::BTreeMap;

use quill_core::config::RepositoryConfig;
use serde::{Deserialize, Deserializer, Serialize};

/// Title every breaking-change note carries once transformed
pub const BREAKING_CHANGES_TITLE: &str = "BREAKING CHANGES";

/// A parsed commit as delivered by the commit parser
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CommitRecord {
    /// Commit type (feat, fix, etc.)
    #[serde(rename = "type")]
    pub commit_type: Option<String>,
    /// Scope, or `*` for all scopes
    pub scope: Option<String>,
    /// Commit subject
    pub subject: Option<String>,
    /// First line of the commit message
    pub header: Option<String>,
    /// Full commit hash
    pub hash: Option<String>,
    /// Pre-computed short hash
    pub short_hash: Option<String>,
    /// Commit body
    pub body: Option<String>,
    /// Commit footer
    pub footer: Option<String>,
    /// Issue references found in the message
    pub references: Vec<Reference>,
    /// Notes (breaking changes) found in the message
    pub notes: Vec<Note>,
    /// Whether this commit reverts another one
    #[serde(deserialize_with = "deserialize_revert")]
    pub revert: bool,
}

impl CommitRecord {
    /// Create a record with a type and subject
    pub fn new(commit_type: impl Into<String>, subject: impl Into<String>) -> Self {
        let commit_type = commit_type.into();
        let subject = subject.into();
        Self {
            header: Some(format!("{}: {}", commit_type, subject)),
            commit_type: Some(commit_type),
            subject: Some(subject),
            ..Default::default()
        }
    }

    /// Set the scope
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Set the full hash
    pub fn with_hash(mut self, hash: impl Into<String>) -> Self {
        self.hash = Some(hash.into());
        self
    }

    /// Set the header line
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    /// Set the body
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set the footer
    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    /// Add a reference
    pub fn with_reference(mut self, reference: Reference) -> Self {
        self.references.push(reference);
        self
    }

    /// Add a note
    pub fn with_note(mut self, note: Note) -> Self {
        self.notes.push(note);
        self
    }

    /// Mark as a revert
    pub fn reverted(mut self) -> Self {
        self.revert = true;
        self
    }
}

/// Parsers disagree on how a revert is reported: a flag, `null`, or an
/// object describing the reverted commit. Any non-null, non-false value
/// counts as a revert.
fn deserialize_revert<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RevertField {
        Flag(bool),
        Details(serde_json::Value),
    }

    Ok(match Option::<RevertField>::deserialize(deserializer)? {
        None => false,
        Some(RevertField::Flag(flag)) => flag,
        Some(RevertField::Details(value)) => !value.is_null(),
    })
}

/// A cross-reference to an issue or pull request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Reference {
    /// Action keyword (e.g. `Closes`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    /// Owner of a foreign repository
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    /// Foreign repository name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
    /// Issue prefix (e.g. `#`)
    pub prefix: String,
    /// Issue identifier without prefix
    pub issue: String,
    /// Text the reference was parsed from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

impl Reference {
    /// Create a reference
    pub fn new(prefix: impl Into<String>, issue: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            issue: issue.into(),
            ..Default::default()
        }
    }

    /// Set the action keyword
    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    /// Whether this reference is the same issue as `prefix` + `issue`
    pub fn is(&self, prefix: &str, issue: &str) -> bool {
        self.prefix == prefix && self.issue == issue
    }
}

/// A commit note (breaking change)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Note {
    /// Note title (e.g. `BREAKING CHANGE`)
    pub title: String,
    /// Note text
    pub text: String,
}

impl Note {
    /// Create a note
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
        }
    }
}

/// Canonical change categories used for bucketing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChangeCategory {
    /// Bug fixes
    BugFixes,
    /// New features
    Features,
    /// Version bumps
    Bump,
    /// Performance improvements
    Perf,
    /// Reverts
    Revert,
    /// Documentation
    Docs,
    /// Code style
    Style,
    /// Chores
    Chore,
    /// Refactoring
    Refactor,
    /// Tests
    Test,
    /// Build system
    Build,
    /// Continuous integration
    Ci,
}

impl ChangeCategory {
    /// Every category, in bucket order
    pub const ALL: [ChangeCategory; 12] = [
        Self::BugFixes,
        Self::Features,
        Self::Bump,
        Self::Perf,
        Self::Revert,
        Self::Docs,
        Self::Style,
        Self::Chore,
        Self::Refactor,
        Self::Test,
        Self::Build,
        Self::Ci,
    ];

    /// Resolve a display section title to its category
    pub fn from_section(section: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.section() == section)
    }

    /// The display section title this category is keyed on
    pub fn section(&self) -> &'static str {
        match self {
            Self::BugFixes => "Bug Fixes",
            Self::Features => "Features",
            Self::Bump => "New version",
            Self::Perf => "Performance Improvements",
            Self::Revert => "Reverts",
            Self::Docs => "Documentation",
            Self::Style => "Styles",
            Self::Chore => "Miscellaneous Chores",
            Self::Refactor => "Code Refactoring",
            Self::Test => "Tests",
            Self::Build => "Build System",
            Self::Ci => "Continuous Integration",
        }
    }

    /// Key of the bucket in a serialized commit group
    pub fn key(&self) -> &'static str {
        match self {
            Self::BugFixes => "bugFixes",
            Self::Features => "features",
            Self::Bump => "bump",
            Self::Perf => "perf",
            Self::Revert => "revert",
            Self::Docs => "docs",
            Self::Style => "style",
            Self::Chore => "chore",
            Self::Refactor => "refactor",
            Self::Test => "test",
            Self::Build => "build",
            Self::Ci => "ci",
        }
    }

    /// A map holding an empty bucket for every category
    pub fn empty_buckets() -> BTreeMap<ChangeCategory, Vec<TransformedCommit>> {
        Self::ALL.into_iter().map(|c| (c, Vec::new())).collect()
    }
}

/// A commit after the transform step
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformedCommit {
    /// Breaking-change notes, all titled [`BREAKING_CHANGES_TITLE`]
    pub notes: Vec<Note>,
    /// Display type (section title, or the raw type when unconfigured)
    #[serde(rename = "type")]
    pub commit_type: String,
    /// Category resolved from the display type
    pub category: Option<ChangeCategory>,
    /// Display scope (`*` becomes empty)
    pub scope: Option<String>,
    /// Full hash
    pub hash: Option<String>,
    /// Seven-character hash
    pub short_hash: Option<String>,
    /// Subject with issue and user links inlined
    pub subject: Option<String>,
    /// References not already linked in the subject
    pub references: Vec<Reference>,
    /// `host/owner/repository`, stamped by the finalizer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
}

/// Commits sharing a grouping key
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommitGroup {
    /// Grouping key value; `None` when the key was absent
    pub title: Option<String>,
    /// Commits in this group
    pub commits: Vec<TransformedCommit>,
    /// Per-category buckets, filled by the finalizer
    #[serde(flatten)]
    pub buckets: BTreeMap<ChangeCategory, Vec<TransformedCommit>>,
}

impl CommitGroup {
    /// Create an empty group
    pub fn new(title: Option<String>) -> Self {
        Self {
            title,
            commits: Vec::new(),
            buckets: BTreeMap::new(),
        }
    }

    /// Commits bucketed under `category`
    pub fn bucket(&self, category: ChangeCategory) -> &[TransformedCommit] {
        self.buckets
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Check if group is empty
    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }
}

/// The commit a note was collected from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteCommit {
    /// Full hash
    pub hash: Option<String>,
    /// Seven-character hash
    pub short_hash: Option<String>,
    /// Display scope
    pub scope: Option<String>,
    /// Linked subject
    pub subject: Option<String>,
}

impl From<&TransformedCommit> for NoteCommit {
    fn from(commit: &TransformedCommit) -> Self {
        Self {
            hash: commit.hash.clone(),
            short_hash: commit.short_hash.clone(),
            scope: commit.scope.clone(),
            subject: commit.subject.clone(),
        }
    }
}

/// A note with the commit it came from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NoteEntry {
    /// Note title
    pub title: String,
    /// Note text
    pub text: String,
    /// Originating commit
    pub commit: NoteCommit,
}

/// Notes sharing a title
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NoteGroup {
    /// Note title
    pub title: String,
    /// Notes in this group
    pub notes: Vec<NoteEntry>,
}

/// Rendering context for one release
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Context {
    /// Host URL
    pub host: Option<String>,
    /// Repository owner
    pub owner: Option<String>,
    /// Repository name
    pub repository: Option<String>,
    /// Version being released
    pub version: Option<String>,
    /// Optional release title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Release date (`YYYY-MM-DD`)
    pub date: Option<String>,
    /// Whether the release is a patch release
    pub is_patch: bool,
    /// Previous release tag
    pub previous_tag: Option<String>,
    /// Current release tag
    pub current_tag: Option<String>,
    /// Whether a compare link can be rendered
    pub link_compare: bool,
    /// Grouped commits
    pub commit_groups: Vec<CommitGroup>,
    /// Grouped breaking-change notes
    pub note_groups: Vec<NoteGroup>,
}

impl Context {
    /// Create a context for a repository
    pub fn new(repository: &RepositoryConfig) -> Self {
        Self {
            host: Some(repository.host.clone()),
            owner: repository.owner.clone(),
            repository: repository.repository.clone(),
            ..Default::default()
        }
    }

    /// Set the version
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Set the date
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// Set the compare tags
    pub fn with_tags(
        mut self,
        previous_tag: impl Into<String>,
        current_tag: impl Into<String>,
    ) -> Self {
        self.previous_tag = Some(previous_tag.into());
        self.current_tag = Some(current_tag.into());
        self
    }

    /// `host/owner/repository`, missing parts left empty
    pub fn repo_id(&self) -> String {
        format!(
            "{}/{}/{}",
            self.host.as_deref().unwrap_or_default(),
            self.owner.as_deref().unwrap_or_default(),
            self.repository.as_deref().unwrap_or_default()
        )
    }

    /// Check if context has any content
    pub fn is_empty(&self) -> bool {
        self.commit_groups.iter().all(CommitGroup::is_empty) && self.note_groups.is_empty()
    }
}
