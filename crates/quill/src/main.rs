//! Quill - Conventional-commit changelog writer CLI

mod cli;
mod exit_codes;

use clap::Parser;
use quill_core::QuillError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use cli::{output, Cli};

fn main() {
    let cli = Cli::parse();
    let guard = init_tracing(console_level(&cli));

    if let Err(e) = cli.execute() {
        output::error(&format!("{:#}", e));
        // Flush the file log before exiting
        drop(guard);
        std::process::exit(exit_code(&e));
    }
}

/// Configuration problems get their own exit code
fn exit_code(error: &anyhow::Error) -> i32 {
    match error.downcast_ref::<QuillError>() {
        Some(QuillError::Config(_)) => exit_codes::CONFIG_ERROR,
        _ => exit_codes::ERROR,
    }
}

/// Console level when RUST_LOG is unset
fn console_level(cli: &Cli) -> &'static str {
    if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    }
}

/// Set up tracing with two layers:
/// - Console: controlled by RUST_LOG (default: warn, or per --verbose/--quiet)
/// - File: always debug-level JSON to ~/.quill/logs/
fn init_tracing(default_level: &str) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    if let Some(log_dir) = log_directory() {
        let file_appender = tracing_appender::rolling::daily(&log_dir, "quill.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .with_filter(console_filter),
            )
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(non_blocking)
                    .with_target(true)
                    .with_filter(EnvFilter::new("debug")),
            )
            .init();

        return Some(guard);
    }

    // Fallback: console only
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_filter(console_filter),
        )
        .init();

    None
}

/// Returns the log directory path, creating it if needed.
fn log_directory() -> Option<std::path::PathBuf> {
    let log_dir = dirs::home_dir()?.join(".quill").join("logs");
    std::fs::create_dir_all(&log_dir).ok()?;
    Some(log_dir)
}
