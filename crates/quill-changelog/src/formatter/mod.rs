//! Changelog formatters

mod json;
mod markdown;
mod registry;

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use registry::FormatterRegistry;

use crate::types::Context;

/// Trait for changelog formatters
pub trait ChangelogFormatter: Send + Sync {
    /// Render a finalized context to string
    fn format(&self, context: &Context) -> String;

    /// Get the file extension for this format
    fn extension(&self) -> &'static str;
}
