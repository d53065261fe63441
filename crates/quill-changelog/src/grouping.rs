//! Grouping and ordering of transformed commits and notes

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::types::{CommitGroup, NoteCommit, NoteEntry, NoteGroup, TransformedCommit};

/// A commit field usable as grouping or sort key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CommitField {
    /// Display type
    Type,
    /// Display scope
    Scope,
    /// Linked subject
    Subject,
    /// Short hash
    ShortHash,
}

impl CommitField {
    /// The field's value on a commit
    pub fn value<'a>(&self, commit: &'a TransformedCommit) -> Option<&'a str> {
        match self {
            Self::Type => Some(commit.commit_type.as_str()),
            Self::Scope => commit.scope.as_deref(),
            Self::Subject => commit.subject.as_deref(),
            Self::ShortHash => commit.short_hash.as_deref(),
        }
    }
}

/// Group commits by `key`, keeping groups in order of first appearance.
///
/// An absent key and an empty key are different groups.
pub fn group_commits(commits: Vec<TransformedCommit>, key: CommitField) -> Vec<CommitGroup> {
    let mut groups: Vec<CommitGroup> = Vec::new();

    for commit in commits {
        let title = key.value(&commit);
        match groups.iter_mut().find(|g| g.title.as_deref() == title) {
            Some(group) => group.commits.push(commit),
            None => {
                let mut group = CommitGroup::new(title.map(str::to_string));
                group.commits.push(commit);
                groups.push(group);
            }
        }
    }

    groups
}

/// Compare commits field by field
pub fn compare_commits(fields: &[CommitField], a: &TransformedCommit, b: &TransformedCommit) -> Ordering {
    fields
        .iter()
        .map(|field| field.value(a).cmp(&field.value(b)))
        .find(|ord| ord.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// Rank of a group title in the importance order, compared case-insensitively.
///
/// Titles not in the order (and absent titles) have no rank, which sorts
/// them ahead of every ranked group.
pub fn group_rank(order: &[String], title: Option<&str>) -> Option<usize> {
    let title = title?.to_uppercase();
    order.iter().position(|s| s.to_uppercase() == title)
}

/// Compare groups by importance rank
pub fn compare_groups(order: &[String], a: &CommitGroup, b: &CommitGroup) -> Ordering {
    group_rank(order, a.title.as_deref()).cmp(&group_rank(order, b.title.as_deref()))
}

/// Collect every commit's notes into groups by title, in order of first
/// appearance
pub fn collect_note_groups<'a, I>(commits: I) -> Vec<NoteGroup>
where
    I: IntoIterator<Item = &'a TransformedCommit>,
{
    let mut groups: Vec<NoteGroup> = Vec::new();

    for commit in commits {
        for note in &commit.notes {
            let entry = NoteEntry {
                title: note.title.clone(),
                text: note.text.clone(),
                commit: NoteCommit::from(commit),
            };
            match groups.iter_mut().find(|g| g.title == note.title) {
                Some(group) => group.notes.push(entry),
                None => groups.push(NoteGroup {
                    title: note.title.clone(),
                    notes: vec![entry],
                }),
            }
        }
    }

    groups
}

/// Compare note groups by title
pub fn compare_note_groups(a: &NoteGroup, b: &NoteGroup) -> Ordering {
    a.title.cmp(&b.title)
}

/// Compare notes by text
pub fn compare_notes(a: &NoteEntry, b: &NoteEntry) -> Ordering {
    a.text.cmp(&b.text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Note, BREAKING_CHANGES_TITLE};

    fn commit(commit_type: &str, scope: Option<&str>, subject: &str) -> TransformedCommit {
        TransformedCommit {
            commit_type: commit_type.to_string(),
            scope: scope.map(str::to_string),
            subject: Some(subject.to_string()),
            ..Default::default()
        }
    }

    fn order() -> Vec<String> {
        vec!["Features".to_string(), "Bug Fixes".to_string()]
    }

    #[test]
    fn test_group_by_scope_partitions() {
        let groups = group_commits(
            vec![
                commit("Features", Some("api"), "a"),
                commit("Features", Some("cli"), "b"),
                commit("Bug Fixes", Some("api"), "c"),
            ],
            CommitField::Scope,
        );
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].title.as_deref(), Some("api"));
        assert_eq!(groups[0].commits.len(), 2);
        assert_eq!(groups[1].title.as_deref(), Some("cli"));
        assert_eq!(groups[1].commits.len(), 1);
    }

    #[test]
    fn test_absent_and_empty_scope_are_distinct() {
        let groups = group_commits(
            vec![commit("Features", None, "a"), commit("Features", Some(""), "b")],
            CommitField::Scope,
        );
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].title, None);
        assert_eq!(groups[1].title.as_deref(), Some(""));
    }

    #[test]
    fn test_commit_order_type_then_subject() {
        let mut commits = vec![
            commit("Features", None, "b"),
            commit("Bug Fixes", None, "z"),
            commit("Features", None, "a"),
        ];
        let fields = [CommitField::Type, CommitField::Subject];
        commits.sort_by(|a, b| compare_commits(&fields, a, b));
        let subjects: Vec<_> = commits.iter().map(|c| c.subject.as_deref().unwrap()).collect();
        assert_eq!(subjects, vec!["z", "a", "b"]);
    }

    #[test]
    fn test_group_rank_case_insensitive() {
        assert_eq!(group_rank(&order(), Some("FEATURES")), Some(0));
        assert_eq!(group_rank(&order(), Some("bug fixes")), Some(1));
        assert_eq!(group_rank(&order(), Some("Chores")), None);
        assert_eq!(group_rank(&order(), None), None);
    }

    #[test]
    fn test_bug_fixes_after_features() {
        let mut groups = vec![
            CommitGroup::new(Some("BUG FIXES".to_string())),
            CommitGroup::new(Some("FEATURES".to_string())),
        ];
        groups.sort_by(|a, b| compare_groups(&order(), a, b));
        assert_eq!(groups[0].title.as_deref(), Some("FEATURES"));
        assert_eq!(groups[1].title.as_deref(), Some("BUG FIXES"));
    }

    #[test]
    fn test_unranked_groups_sort_first_and_keep_order() {
        let mut groups = vec![
            CommitGroup::new(Some("Bug Fixes".to_string())),
            CommitGroup::new(Some("api".to_string())),
            CommitGroup::new(Some("Features".to_string())),
            CommitGroup::new(None),
        ];
        groups.sort_by(|a, b| compare_groups(&order(), a, b));
        let titles: Vec<_> = groups.iter().map(|g| g.title.as_deref()).collect();
        assert_eq!(
            titles,
            vec![Some("api"), None, Some("Features"), Some("Bug Fixes")]
        );
    }

    #[test]
    fn test_collect_note_groups() {
        let mut a = commit("Features", Some("api"), "a");
        a.notes = vec![Note::new(BREAKING_CHANGES_TITLE, "second")];
        let mut b = commit("Bug Fixes", None, "b");
        b.notes = vec![Note::new(BREAKING_CHANGES_TITLE, "first")];
        let c = commit("Bug Fixes", None, "c");

        let mut groups = collect_note_groups([&a, &b, &c]);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].notes.len(), 2);
        assert_eq!(groups[0].notes[0].commit.scope.as_deref(), Some("api"));

        groups[0].notes.sort_by(compare_notes);
        assert_eq!(groups[0].notes[0].text, "first");
    }

    #[test]
    fn test_note_groups_by_title() {
        let mut groups = vec![
            NoteGroup {
                title: "DEPRECATIONS".to_string(),
                notes: vec![],
            },
            NoteGroup {
                title: "BREAKING CHANGES".to_string(),
                notes: vec![],
            },
        ];
        groups.sort_by(compare_note_groups);
        assert_eq!(groups[0].title, "BREAKING CHANGES");
    }
}
