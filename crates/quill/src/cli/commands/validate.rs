//! Validate command

use std::path::Path;

use clap::Args;
use console::style;
use tracing::info;

use quill_changelog::{Templates, WriterOptions};
use quill_core::config::{load_config_from_dir, Config};

use crate::cli::{output, Cli, OutputFormat};
use crate::exit_codes;

/// Validate configuration
#[derive(Debug, Args)]
pub struct ValidateCommand {
    /// Strict mode - treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

impl ValidateCommand {
    /// Execute the validate command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(strict = self.strict, "executing validate command");
        let cwd = std::env::current_dir()?;

        let mut errors: Vec<String> = Vec::new();
        let mut warnings: Vec<String> = Vec::new();

        // Loading validates the configuration values
        let (config, config_path) = match load_config_from_dir(&cwd) {
            Ok((c, p)) => (Some(c), Some(p)),
            Err(e) => {
                errors.push(format!("Configuration: {}", e));
                (None, None)
            }
        };

        if let (Some(cfg), Some(path)) = (&config, &config_path) {
            let base_dir = path.parent().unwrap_or(&cwd);
            check_pipeline(cfg, base_dir, &mut errors, &mut warnings);
        }

        // If strict, promote warnings to errors
        if self.strict {
            errors.append(&mut warnings);
        }

        let passed = errors.is_empty();

        match cli.format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "valid": passed,
                    "config_path": config_path.map(|p| p.to_string_lossy().to_string()),
                    "errors": errors,
                    "warnings": warnings
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Text => {
                if !cli.quiet {
                    println!("{}", style("Validation Results").bold());
                    println!();

                    if let Some(path) = &config_path {
                        println!("Config: {}", output::path_style().apply_to(path.display()));
                        println!();
                    }

                    if !errors.is_empty() {
                        println!("{}", style("Errors:").red().bold());
                        for error in &errors {
                            println!("  {} {}", style("✗").red(), error);
                        }
                        println!();
                    }

                    if !warnings.is_empty() {
                        println!("{}", style("Warnings:").yellow().bold());
                        for warning in &warnings {
                            println!("  {} {}", style("!").yellow(), warning);
                        }
                        println!();
                    }

                    if passed {
                        output::success(&format!(
                            "Validation passed with {} warning(s)",
                            warnings.len()
                        ));
                    } else {
                        output::error(&format!(
                            "Validation failed with {} error(s)",
                            errors.len()
                        ));
                    }
                }
            }
        }

        if !passed {
            std::process::exit(exit_codes::VALIDATION_ERROR);
        }

        Ok(())
    }
}

/// Checks beyond value validation: templates resolve, patterns compile,
/// and the registry is usable
fn check_pipeline(
    config: &Config,
    base_dir: &Path,
    errors: &mut Vec<String>,
    warnings: &mut Vec<String>,
) {
    match Templates::load(&config.templates, base_dir) {
        Ok(templates) => {
            if let Err(e) = WriterOptions::new(&config.changelog, templates) {
                errors.push(format!("Writer: {}", e));
            }
        }
        Err(e) => errors.push(format!("Templates: {}", e)),
    }

    if config.changelog.types.iter().all(|t| t.hidden) {
        warnings.push(
            "Every commit type is hidden; only breaking changes will appear".to_string(),
        );
    }
    if config.repository.owner.is_none() || config.repository.repository.is_none() {
        warnings.push(
            "repository.owner or repository.repository is not set; links will be incomplete"
                .to_string(),
        );
    }
}
