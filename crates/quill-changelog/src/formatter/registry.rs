//! Formatter registry

use std::sync::Arc;

use quill_core::config::ChangelogConfig;

use super::{ChangelogFormatter, JsonFormatter, MarkdownFormatter};

/// Registry of available changelog formatters
pub struct FormatterRegistry {
    formatters: Vec<Arc<dyn ChangelogFormatter>>,
}

impl FormatterRegistry {
    /// Create a new registry with all built-in formatters
    pub fn new() -> Self {
        Self::from_config(&ChangelogConfig::default())
    }

    /// Built-in formatters using the configured link formats
    pub fn from_config(config: &ChangelogConfig) -> Self {
        Self {
            formatters: vec![
                Arc::new(MarkdownFormatter::from_config(config)),
                Arc::new(JsonFormatter::new()),
            ],
        }
    }

    /// Create an empty registry
    pub fn empty() -> Self {
        Self {
            formatters: Vec::new(),
        }
    }

    /// Register a formatter
    pub fn register<F: ChangelogFormatter + 'static>(&mut self, formatter: F) {
        self.formatters.push(Arc::new(formatter));
    }

    /// Get formatter by file extension
    pub fn get(&self, extension: &str) -> Option<Arc<dyn ChangelogFormatter>> {
        self.formatters
            .iter()
            .find(|f| f.extension() == extension)
            .cloned()
    }

    /// Get formatter by configured format name (`markdown`, `md`, `json`)
    pub fn for_format(&self, format: &str) -> Option<Arc<dyn ChangelogFormatter>> {
        match format.to_lowercase().as_str() {
            "markdown" | "md" => self.get("md"),
            other => self.get(other),
        }
    }

    /// Get all supported file extensions
    pub fn extensions(&self) -> Vec<&'static str> {
        self.formatters.iter().map(|f| f.extension()).collect()
    }
}

impl Default for FormatterRegistry {
    fn default() -> Self {
        Self::new()
    }
}
