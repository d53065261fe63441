//! Changelog command

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::Args;
use tracing::{debug, info};

use quill_changelog::generator::{parse_records_json, prepend_release};
use quill_changelog::{
    ChangelogGenerator, ChangelogWriter, Context, RawCommit, Templates, WriterOptions,
};
use quill_core::config::{find_config, load_config, validate_config, Config};

use crate::cli::{output, Cli, OutputFormat};

/// Generate changelog
#[derive(Debug, Args)]
pub struct ChangelogCommand {
    /// Read commits from a file instead of stdin
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Input is a JSON array of parsed commit records instead of raw log text
    #[arg(long)]
    pub json_input: bool,

    /// Version to generate changelog for
    #[arg(long = "for-version", value_name = "VERSION")]
    pub for_version: Option<String>,

    /// Tag of the previous release
    #[arg(long, value_name = "TAG")]
    pub previous_tag: Option<String>,

    /// Tag of the release being written
    #[arg(long, value_name = "TAG")]
    pub current_tag: Option<String>,

    /// Write to file (default: print to stdout)
    #[arg(short, long)]
    pub write: bool,

    /// Output file (defaults to configured changelog file)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl ChangelogCommand {
    /// Execute the changelog command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(
            version = ?self.for_version,
            input = ?self.input,
            json_input = self.json_input,
            write = self.write,
            "executing changelog command"
        );
        let cwd = std::env::current_dir()?;
        let (config, base_dir) = load_or_default(&cwd)?;

        let templates = Templates::load(&config.templates, &base_dir)?;
        let options = WriterOptions::new(&config.changelog, templates)?;
        let generator =
            ChangelogGenerator::new(&config)?.with_writer(ChangelogWriter::new(options));

        let version = self.for_version.as_deref().unwrap_or("Unreleased");
        let mut context = generator.base_context(version);
        context.previous_tag = self.previous_tag.clone();
        context.current_tag = self.current_tag.clone();

        let input = self.read_input()?;
        let context = if self.json_input {
            let records = parse_records_json(&input)?;
            generator.generate_from_records(context, &records)
        } else {
            generator.generate(context, &RawCommit::split_log(&input))
        };

        if context.is_empty() {
            if !cli.quiet {
                output::warning("No changelog entries found in the given commits.");
            }
            return Ok(());
        }

        let changelog = generator.format(&context);

        if self.write {
            let output_path = self
                .output
                .clone()
                .unwrap_or_else(|| cwd.join(&config.changelog.file));
            prepend_release(&output_path, config.changelog.header.as_deref(), &changelog)?;

            if !cli.quiet {
                output::success(&format!(
                    "Changelog written to {}",
                    output::path_style().apply_to(output_path.display())
                ));
            }
            return Ok(());
        }

        match cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&json_output(&context, &generator))?);
            }
            OutputFormat::Text => {
                println!("{}", changelog);
            }
        }

        Ok(())
    }

    fn read_input(&self) -> anyhow::Result<String> {
        match &self.input {
            Some(path) => {
                debug!(path = %path.display(), "reading commits from file");
                Ok(std::fs::read_to_string(path)?)
            }
            None => {
                debug!("reading commits from stdin");
                let mut input = String::new();
                std::io::stdin().read_to_string(&mut input)?;
                Ok(input)
            }
        }
    }
}

/// The context plus the prepared templates, for rendering with an external
/// template engine
fn json_output(context: &Context, generator: &ChangelogGenerator) -> serde_json::Value {
    let options = generator.writer().options();
    serde_json::json!({
        "context": context,
        "templates": {
            "main": options.main_template,
            "header": options.header_partial,
            "commit": options.commit_partial,
            "footer": options.footer_partial,
        }
    })
}

/// Load the discovered config, or defaults when there is none.
///
/// Template overrides resolve against the directory holding the config.
fn load_or_default(cwd: &Path) -> anyhow::Result<(Config, PathBuf)> {
    match find_config(cwd) {
        Some(path) => {
            let config = load_config(&path)?;
            let base_dir = path.parent().unwrap_or(cwd).to_path_buf();
            Ok((config, base_dir))
        }
        None => {
            let config = Config::default();
            validate_config(&config)?;
            Ok((config, cwd.to_path_buf()))
        }
    }
}
