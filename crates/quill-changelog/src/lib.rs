//! Quill Changelog - Commit transform and changelog writing pipeline
//!
//! This crate turns parsed conventional-commit records into a grouped,
//! sorted and finalized [`Context`] ready for rendering, and ships a
//! conventional-commit parser and Markdown/JSON formatters around it.

pub mod finalize;
pub mod formatter;
pub mod generator;
pub mod grouping;
pub mod matcher;
pub mod notes;
pub mod parser;
pub mod template;
pub mod templates;
pub mod transform;
pub mod types;
pub mod writer;

pub use formatter::{ChangelogFormatter, FormatterRegistry, JsonFormatter, MarkdownFormatter};
pub use generator::ChangelogGenerator;
pub use parser::{CommitParser, ConventionalParser, ParserConfig, RawCommit};
pub use templates::Templates;
pub use transform::CommitTransform;
pub use types::{
    ChangeCategory, CommitGroup, CommitRecord, Context, Note, NoteEntry, NoteGroup, Reference,
    TransformedCommit,
};
pub use writer::{ChangelogWriter, CommitField, WriterOptions};
