//! Breaking-change note extraction

use regex::Regex;
use std::sync::LazyLock;

use crate::types::{CommitRecord, Note, BREAKING_CHANGES_TITLE};

/// Header carrying the `!` breaking marker, e.g. `feat(api)!: drop v1`
static BREAKING_HEADER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\w*)(?:\((.*)\))?!: (.*)$").expect("Invalid regex"));

/// The commit's notes, plus one synthesized from a `!` header.
///
/// A note is only synthesized when the commit has no explicit notes, so a
/// `feat!:` commit with a `BREAKING CHANGE:` footer is reported once. The
/// synthesized note's text is the header description.
pub fn breaking_notes(commit: &CommitRecord) -> Vec<Note> {
    let mut notes = commit.notes.clone();

    if notes.is_empty() {
        if let Some(caps) = commit
            .header
            .as_deref()
            .and_then(|h| BREAKING_HEADER_REGEX.captures(h))
        {
            let text = caps.get(3).map(|m| m.as_str()).unwrap_or_default();
            notes.push(Note::new(BREAKING_CHANGES_TITLE, text));
        }
    }

    notes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bang_header_synthesizes_note() {
        let commit = CommitRecord::new("test", "hello world").with_header("test(system)!: hello world");
        let notes = breaking_notes(&commit);
        assert_eq!(notes, vec![Note::new(BREAKING_CHANGES_TITLE, "hello world")]);
    }

    #[test]
    fn test_bang_without_scope() {
        let commit = CommitRecord::new("feat", "drop node 14").with_header("feat!: drop node 14");
        assert_eq!(breaking_notes(&commit).len(), 1);
    }

    #[test]
    fn test_explicit_notes_suppress_synthesis() {
        let commit = CommitRecord::new("feat", "x")
            .with_header("feat!: x")
            .with_note(Note::new("BREAKING CHANGE", "the real explanation"));
        let notes = breaking_notes(&commit);
        assert_eq!(notes, vec![Note::new("BREAKING CHANGE", "the real explanation")]);
    }

    #[test]
    fn test_plain_header_has_no_notes() {
        let commit = CommitRecord::new("feat", "x");
        assert!(breaking_notes(&commit).is_empty());
        assert!(breaking_notes(&CommitRecord::default()).is_empty());
    }
}
