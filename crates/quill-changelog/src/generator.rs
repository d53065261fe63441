//! Changelog generation: parse, write and render in one place

use std::path::Path;
use std::sync::Arc;

use chrono::Local;
use quill_core::config::{Config, RepositoryConfig};
use quill_core::error::{ChangelogError, ConfigError, Result};
use semver::Version;
use tracing::{debug, info, instrument};

use crate::formatter::{ChangelogFormatter, FormatterRegistry};
use crate::parser::{CommitParser, ConventionalParser, ParserConfig, RawCommit};
use crate::types::{CommitRecord, Context};
use crate::writer::ChangelogWriter;

/// Changelog generator
pub struct ChangelogGenerator {
    parser: Box<dyn CommitParser>,
    writer: ChangelogWriter,
    formatter: Arc<dyn ChangelogFormatter>,
    repository: RepositoryConfig,
}

impl ChangelogGenerator {
    /// Create a generator with the conventional parser, built-in templates
    /// and the configured output format
    pub fn new(config: &Config) -> Result<Self> {
        let changelog = &config.changelog;
        let formatter = FormatterRegistry::from_config(changelog)
            .for_format(&changelog.format)
            .ok_or_else(|| ConfigError::InvalidValue {
                field: "changelog.format".to_string(),
                message: format!("unsupported format '{}'", changelog.format),
            })?;

        Ok(Self {
            parser: Box::new(ConventionalParser::with_config(
                ParserConfig::from_changelog(changelog),
            )?),
            writer: ChangelogWriter::from_config(changelog)?,
            formatter,
            repository: config.repository.clone(),
        })
    }

    /// Use a custom parser
    pub fn with_parser<P: CommitParser + 'static>(mut self, parser: P) -> Self {
        self.parser = Box::new(parser);
        self
    }

    /// Use a custom writer
    pub fn with_writer(mut self, writer: ChangelogWriter) -> Self {
        self.writer = writer;
        self
    }

    /// Use a custom formatter
    pub fn with_formatter<F: ChangelogFormatter + 'static>(mut self, formatter: F) -> Self {
        self.formatter = Arc::new(formatter);
        self
    }

    /// The writer this generator runs
    pub fn writer(&self) -> &ChangelogWriter {
        &self.writer
    }

    /// A context for `version` dated today
    pub fn base_context(&self, version: &str) -> Context {
        let mut context = Context::new(&self.repository)
            .with_version(version)
            .with_date(Local::now().format("%Y-%m-%d").to_string());
        context.is_patch = is_patch_version(version);
        context
    }

    /// Parse raw commits, skipping the ones the parser rejects
    pub fn parse(&self, commits: &[RawCommit]) -> Vec<CommitRecord> {
        let records: Vec<CommitRecord> =
            commits.iter().filter_map(|c| self.parser.parse(c)).collect();
        debug!(raw = commits.len(), parsed = records.len(), "commits parsed");
        records
    }

    /// Build the finalized context from raw commits
    #[instrument(skip(self, context, commits), fields(commit_count = commits.len()))]
    pub fn generate(&self, context: Context, commits: &[RawCommit]) -> Context {
        info!(version = ?context.version, commit_count = commits.len(), "generating changelog");
        let records = self.parse(commits);
        self.writer.write(&records, context)
    }

    /// Build the finalized context from already-parsed commit records
    pub fn generate_from_records(&self, context: Context, records: &[CommitRecord]) -> Context {
        self.writer.write(records, context)
    }

    /// Render a finalized context
    pub fn format(&self, context: &Context) -> String {
        self.formatter.format(context)
    }

    /// Generate and format in one step
    #[instrument(skip(self, context, commits), fields(commit_count = commits.len()))]
    pub fn generate_formatted(&self, context: Context, commits: &[RawCommit]) -> String {
        let context = self.generate(context, commits);
        let output = self.format(&context);
        debug!(output_len = output.len(), "changelog formatted");
        output
    }
}

/// Whether `version` is a semantic version with a non-zero patch component
pub fn is_patch_version(version: &str) -> bool {
    Version::parse(version.trim_start_matches('v')).is_ok_and(|v| v.patch != 0)
}

/// Read commit records produced by an external parser (a JSON array)
pub fn parse_records_json(input: &str) -> Result<Vec<CommitRecord>> {
    serde_json::from_str(input)
        .map_err(|e| ChangelogError::ParseFailed(format!("invalid commit records: {}", e)).into())
}

/// Write a rendered release to `path`, newest first.
///
/// An existing file keeps its content below the new release; when it starts
/// with `header`, the header stays on top. A new file gets `header` first.
pub fn prepend_release(path: &Path, header: Option<&str>, release: &str) -> Result<()> {
    let existing = if path.exists() {
        std::fs::read_to_string(path).map_err(ChangelogError::Io)?
    } else {
        String::new()
    };

    let mut output = String::new();
    let rest = match header.map(str::trim_end) {
        Some(header) if !header.is_empty() => {
            output.push_str(header);
            output.push_str("\n\n");
            existing
                .strip_prefix(header)
                .unwrap_or(&existing)
                .trim_start()
        }
        _ => existing.as_str(),
    };

    output.push_str(release.trim_end());
    output.push('\n');
    if !rest.is_empty() {
        output.push('\n');
        output.push_str(rest);
    }

    std::fs::write(path, output).map_err(|e| {
        ChangelogError::WriteFailed(format!("{}: {}", path.display(), e)).into()
    })
}
