//! Quill Core - Shared foundations for the Quill changelog writer
//!
//! This crate provides the error types and the configuration model
//! (commit type registry, URL formats, repository identity) used by the
//! changelog pipeline and the CLI.

pub mod config;
pub mod error;

pub use config::{ChangelogConfig, Config, RepositoryConfig, TemplatesConfig, TypeEntry};
pub use error::{ChangelogError, ConfigError, QuillError, Result};
