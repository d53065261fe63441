//! Commit parsing

mod conventional;
mod types;

pub use conventional::ConventionalParser;
pub use types::*;

use crate::types::CommitRecord;

/// Trait for commit parsers
pub trait CommitParser: Send + Sync {
    /// Parse a raw commit into a record. `None` skips the commit.
    fn parse(&self, commit: &RawCommit) -> Option<CommitRecord>;
}
