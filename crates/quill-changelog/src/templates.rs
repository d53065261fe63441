//! Template sources handed to the renderer

use std::path::Path;

use quill_core::config::TemplatesConfig;
use quill_core::error::{ChangelogError, Result};
use tracing::debug;

const MAIN_TEMPLATE: &str = include_str!("../templates/template.hbs");
const HEADER_PARTIAL: &str = include_str!("../templates/header.hbs");
const COMMIT_PARTIAL: &str = include_str!("../templates/commit.hbs");
const FOOTER_PARTIAL: &str = include_str!("../templates/footer.hbs");

/// The main template and its three partials
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Templates {
    /// Main template
    pub main: String,
    /// Header partial
    pub header: String,
    /// Commit partial
    pub commit: String,
    /// Footer partial
    pub footer: String,
}

impl Templates {
    /// The built-in templates
    pub fn builtin() -> Self {
        Self {
            main: MAIN_TEMPLATE.to_string(),
            header: HEADER_PARTIAL.to_string(),
            commit: COMMIT_PARTIAL.to_string(),
            footer: FOOTER_PARTIAL.to_string(),
        }
    }

    /// Built-in templates with configured overrides read from disk.
    ///
    /// Relative override paths resolve against `base_dir`.
    pub fn load(config: &TemplatesConfig, base_dir: &Path) -> Result<Self> {
        let mut templates = Self::builtin();
        let overrides = [
            (&config.main, &mut templates.main),
            (&config.header, &mut templates.header),
            (&config.commit, &mut templates.commit),
            (&config.footer, &mut templates.footer),
        ];

        for (path, slot) in overrides {
            let Some(path) = path else { continue };
            let path = base_dir.join(path);
            if !path.exists() {
                return Err(ChangelogError::TemplateNotFound(path).into());
            }
            debug!(path = %path.display(), "loading template override");
            *slot = std::fs::read_to_string(&path).map_err(ChangelogError::Io)?;
        }

        Ok(templates)
    }
}

impl Default for Templates {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_builtin_partials_carry_url_tokens() {
        let templates = Templates::builtin();
        assert!(templates.header.contains("{{compareUrlFormat}}"));
        assert!(templates.commit.contains("{{commitUrlFormat}}"));
        assert!(templates.commit.contains("{{issueUrlFormat}}"));
    }

    #[test]
    fn test_load_override() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("footer.hbs"), "-- end --").unwrap();
        let config = TemplatesConfig {
            footer: Some("footer.hbs".into()),
            ..Default::default()
        };

        let templates = Templates::load(&config, temp.path()).unwrap();
        assert_eq!(templates.footer, "-- end --");
        assert_eq!(templates.main, Templates::builtin().main);
    }

    #[test]
    fn test_load_missing_override() {
        let temp = TempDir::new().unwrap();
        let config = TemplatesConfig {
            header: Some("missing.hbs".into()),
            ..Default::default()
        };
        assert!(Templates::load(&config, temp.path()).is_err());
    }
}
