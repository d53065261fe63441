//! Writer options and the changelog writing pipeline

use std::cmp::Ordering;

use quill_core::config::ChangelogConfig;
use quill_core::error::Result;
use tracing::{debug, info, instrument};

use crate::finalize::finalize_context;
use crate::grouping::{
    collect_note_groups, compare_commits, compare_groups, compare_note_groups, compare_notes,
    group_commits,
};
use crate::template::{expand_template, RepoTokens, UrlFormat};
use crate::templates::Templates;
use crate::transform::CommitTransform;
use crate::types::{
    CommitGroup, CommitRecord, Context, NoteEntry, NoteGroup, TransformedCommit,
};

pub use crate::grouping::CommitField;

/// Everything a renderer needs: prepared templates plus the behaviour of
/// each pipeline stage
#[derive(Debug, Clone)]
pub struct WriterOptions {
    /// Main template
    pub main_template: String,
    /// Header partial with the compare URL inlined
    pub header_partial: String,
    /// Commit partial with the commit and issue URLs inlined
    pub commit_partial: String,
    /// Footer partial
    pub footer_partial: String,
    /// Field commits are grouped by
    pub group_by: CommitField,
    /// Fields commits are ordered by
    pub commits_sort: Vec<CommitField>,
    transform: CommitTransform,
    group_order: Vec<String>,
}

impl WriterOptions {
    /// Prepare writer options from configuration and template sources
    pub fn new(config: &ChangelogConfig, templates: Templates) -> Result<Self> {
        let partial = RepoTokens::PARTIAL;

        let commit_url = UrlFormat::new(&config.commit_url_format).resolve_repo(&partial);
        let compare_url = UrlFormat::new(&config.compare_url_format).resolve_repo(&partial);
        let issue_url = UrlFormat::new(&config.issue_url_format)
            .resolve_repo(&partial)
            .expand(&[("id", "{{this.issue}}"), ("prefix", "{{this.prefix}}")]);

        let header_partial = expand_template(
            &templates.header,
            &[("compareUrlFormat", compare_url.as_str())],
        );
        let commit_partial = expand_template(
            &templates.commit,
            &[
                ("commitUrlFormat", commit_url.as_str()),
                ("issueUrlFormat", issue_url.as_str()),
            ],
        );

        Ok(Self {
            main_template: templates.main,
            header_partial,
            commit_partial,
            footer_partial: templates.footer,
            group_by: CommitField::Scope,
            commits_sort: vec![CommitField::Type, CommitField::Subject],
            transform: CommitTransform::new(config)?,
            group_order: config.section_order(),
        })
    }

    /// Group by a different field
    pub fn with_group_by(mut self, field: CommitField) -> Self {
        self.group_by = field;
        self
    }

    /// Transform one commit; `None` drops it
    pub fn transform(&self, commit: &CommitRecord, context: &Context) -> Option<TransformedCommit> {
        self.transform.apply(commit, context)
    }

    /// Group transformed commits
    pub fn group_commits(&self, commits: Vec<TransformedCommit>) -> Vec<CommitGroup> {
        group_commits(commits, self.group_by)
    }

    /// Order commit groups by importance
    pub fn commit_groups_sort(&self, a: &CommitGroup, b: &CommitGroup) -> Ordering {
        compare_groups(&self.group_order, a, b)
    }

    /// Order commits
    pub fn commits_sort(&self, a: &TransformedCommit, b: &TransformedCommit) -> Ordering {
        compare_commits(&self.commits_sort, a, b)
    }

    /// Order note groups
    pub fn note_groups_sort(&self, a: &NoteGroup, b: &NoteGroup) -> Ordering {
        compare_note_groups(a, b)
    }

    /// Order notes within a group
    pub fn notes_sort(&self, a: &NoteEntry, b: &NoteEntry) -> Ordering {
        compare_notes(a, b)
    }

    /// Bucket and stamp the grouped context
    pub fn finalize_context(&self, context: &mut Context) {
        finalize_context(context)
    }
}

/// Runs commits through transform, grouping, sorting and finalization
#[derive(Debug, Clone)]
pub struct ChangelogWriter {
    options: WriterOptions,
}

impl ChangelogWriter {
    /// Create a writer
    pub fn new(options: WriterOptions) -> Self {
        Self { options }
    }

    /// Create a writer with the built-in templates
    pub fn from_config(config: &ChangelogConfig) -> Result<Self> {
        Ok(Self::new(WriterOptions::new(config, Templates::builtin())?))
    }

    /// The options this writer runs with
    pub fn options(&self) -> &WriterOptions {
        &self.options
    }

    /// Build the finalized context for a set of commits
    #[instrument(skip(self, commits, context), fields(commit_count = commits.len()))]
    pub fn write(&self, commits: &[CommitRecord], mut context: Context) -> Context {
        info!(
            version = ?context.version,
            commit_count = commits.len(),
            "writing changelog context"
        );
        let options = &self.options;

        let transformed: Vec<TransformedCommit> = commits
            .iter()
            .filter_map(|commit| options.transform(commit, &context))
            .collect();
        debug!(
            kept = transformed.len(),
            discarded = commits.len() - transformed.len(),
            "commits transformed"
        );

        let mut note_groups = collect_note_groups(&transformed);
        note_groups.sort_by(|a, b| options.note_groups_sort(a, b));
        for group in &mut note_groups {
            group.notes.sort_by(|a, b| options.notes_sort(a, b));
        }

        let mut commit_groups = options.group_commits(transformed);
        for group in &mut commit_groups {
            group.commits.sort_by(|a, b| options.commits_sort(a, b));
        }
        commit_groups.sort_by(|a, b| options.commit_groups_sort(a, b));

        context.link_compare = context.previous_tag.is_some() && context.current_tag.is_some();
        context.commit_groups = commit_groups;
        context.note_groups = note_groups;

        options.finalize_context(&mut context);

        debug!(
            groups = context.commit_groups.len(),
            note_groups = context.note_groups.len(),
            "changelog context built"
        );
        context
    }
}
