//! Context finalization: per-category buckets and repository stamping

use tracing::{debug, warn};

use crate::types::{ChangeCategory, Context};

/// Split each group's commits into category buckets.
///
/// Every bucket exists after finalization, empty or not. Bucketed commits
/// are stamped with `host/owner/repository`, both in the bucket and in the
/// group's `commits`, which is otherwise left as is. Commits without a
/// category are reported and skipped.
pub fn finalize_context(context: &mut Context) {
    let repo = context.repo_id();
    let mut skipped = 0usize;

    for group in &mut context.commit_groups {
        let mut buckets = ChangeCategory::empty_buckets();

        for commit in &mut group.commits {
            let Some(category) = commit.category else {
                warn!(
                    commit_type = %commit.commit_type,
                    hash = ?commit.short_hash,
                    "Type {} not supported.",
                    commit.commit_type
                );
                skipped += 1;
                continue;
            };

            commit.repo = Some(repo.clone());
            buckets.entry(category).or_default().push(commit.clone());
        }

        group.buckets = buckets;
    }

    debug!(
        groups = context.commit_groups.len(),
        skipped,
        repo = %repo,
        "context finalized"
    );
}
