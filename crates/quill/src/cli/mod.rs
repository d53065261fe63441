//! CLI definition and command handling

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

use commands::{ChangelogCommand, InitCommand, ValidateCommand};

/// Quill - Conventional-commit changelog writer
#[derive(Debug, Parser)]
#[command(name = "quill")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Working directory
    #[arg(short = 'C', long, global = true)]
    pub directory: Option<std::path::PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Initialize a new Quill configuration
    Init(InitCommand),

    /// Generate changelog
    Changelog(ChangelogCommand),

    /// Validate configuration
    Validate(ValidateCommand),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> anyhow::Result<()> {
        // Change to specified directory if provided
        if let Some(dir) = &self.directory {
            std::env::set_current_dir(dir)?;
        }

        match self.command {
            Commands::Init(ref cmd) => cmd.execute(&self),
            Commands::Changelog(ref cmd) => cmd.execute(&self),
            Commands::Validate(ref cmd) => cmd.execute(&self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_changelog_flags() {
        let cli = Cli::parse_from([
            "quill",
            "--format",
            "json",
            "changelog",
            "--for-version",
            "1.2.0",
            "--previous-tag",
            "v1.1.0",
            "--current-tag",
            "v1.2.0",
            "--json-input",
        ]);
        assert_eq!(cli.format, OutputFormat::Json);
        let Commands::Changelog(cmd) = cli.command else {
            panic!("expected changelog command");
        };
        assert_eq!(cmd.for_version.as_deref(), Some("1.2.0"));
        assert_eq!(cmd.previous_tag.as_deref(), Some("v1.1.0"));
        assert!(cmd.json_input);
        assert!(!cmd.write);
    }
}
