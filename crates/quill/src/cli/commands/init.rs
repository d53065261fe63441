//! Init command

use std::path::{Path, PathBuf};

use clap::Args;
use tracing::info;

use quill_core::config::defaults::{
    default_config_toml, DEFAULT_CONFIG_TEMPLATE, DEFAULT_CONFIG_YAML,
};

use crate::cli::{output, Cli};

/// Initialize a new Quill configuration
#[derive(Debug, Args)]
pub struct InitCommand {
    /// Force overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,

    /// Output file path (a `.toml` extension writes TOML)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl InitCommand {
    /// Execute the init command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(force = self.force, output = ?self.output, "executing init command");
        let cwd = std::env::current_dir()?;
        let config_path = self
            .output
            .clone()
            .unwrap_or_else(|| cwd.join(DEFAULT_CONFIG_YAML));

        if config_path.exists() && !self.force {
            anyhow::bail!(
                "Configuration file already exists at {}. Use --force to overwrite.",
                config_path.display()
            );
        }

        std::fs::write(&config_path, config_content(&config_path))?;

        if !cli.quiet {
            output::success(&format!(
                "Created configuration at {}",
                output::path_style().apply_to(config_path.display())
            ));
            output::info("Set repository.owner and repository.repository for your project");
            output::info("Run `quill validate` to verify your setup");
        }

        Ok(())
    }
}

fn config_content(path: &Path) -> String {
    if path.extension().is_some_and(|e| e == "toml") {
        default_config_toml()
    } else {
        DEFAULT_CONFIG_TEMPLATE.to_string()
    }
}
