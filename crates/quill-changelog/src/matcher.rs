//! Type registry lookup

use quill_core::config::TypeEntry;

use crate::types::CommitRecord;

/// Find the registry entry governing a commit.
///
/// Reverts are looked up under `revert` whatever their declared type. An
/// entry with a scope only matches commits with exactly that scope. The first
/// matching entry wins.
pub fn find_type_entry<'a>(types: &'a [TypeEntry], commit: &CommitRecord) -> Option<&'a TypeEntry> {
    let key = if commit.revert {
        "revert".to_string()
    } else {
        commit
            .commit_type
            .as_deref()
            .unwrap_or_default()
            .to_lowercase()
    };

    types.iter().find(|entry| {
        if entry.commit_type != key {
            return false;
        }
        match entry.scope.as_deref() {
            Some(scope) if !scope.is_empty() => commit.scope.as_deref() == Some(scope),
            _ => true,
        }
    })
}
