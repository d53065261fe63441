//! JSON changelog formatter

use tracing::{debug, warn};

use super::ChangelogFormatter;
use crate::types::Context;

/// Dumps the finalized context as pretty-printed JSON
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new() -> Self {
        Self
    }
}

impl ChangelogFormatter for JsonFormatter {
    fn format(&self, context: &Context) -> String {
        match serde_json::to_string_pretty(context) {
            Ok(output) => {
                debug!(output_len = output.len(), "json changelog formatted");
                output
            }
            Err(e) => {
                warn!(error = %e, "failed to serialize changelog context");
                String::new()
            }
        }
    }

    fn extension(&self) -> &'static str {
        "json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ChangeCategory, CommitGroup};

    #[test]
    fn test_format_context() {
        let mut context = Context::default().with_version("1.0.0");
        let mut group = CommitGroup::new(Some("api".to_string()));
        group.buckets = ChangeCategory::empty_buckets();
        context.commit_groups.push(group);

        let output = JsonFormatter::new().format(&context);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["version"], "1.0.0");
        assert_eq!(value["commitGroups"][0]["title"], "api");
        assert!(value["commitGroups"][0]["features"].is_array());
        assert_eq!(value["linkCompare"], false);
    }
}
