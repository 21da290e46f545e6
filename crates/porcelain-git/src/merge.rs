//! Branch merging.

use git2::build::CheckoutBuilder;
use git2::{BranchType, ErrorCode, MergeOptions, Oid, Repository};

use crate::branches::current_branch;
use crate::{Error, Result};

/// What [`merge`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    UpToDate,
    FastForward,
    /// A merge commit was created
    Merged(Oid),
}

/// Move the checked-out branch `refname` forward to `target`.
///
/// The working tree is checked out first, without overwriting local
/// modifications. The branch only moves once that checkout succeeded.
pub(crate) fn fast_forward(
    repo: &Repository,
    refname: &str,
    target: Oid,
    reflog: &str,
) -> Result<()> {
    let commit = repo.find_commit(target)?;
    repo.checkout_tree(commit.as_object(), Some(CheckoutBuilder::new().safe()))
        .map_err(|e| match e.code() {
            ErrorCode::Conflict => Error::LocalChangesOverwritten {
                message: e.message().to_string(),
            },
            _ => Error::Git(e),
        })?;

    repo.find_reference(refname)?.set_target(target, reflog)?;
    Ok(())
}

/// Merge a local branch into the current branch.
///
/// Fast-forwards when possible, otherwise creates a merge commit. A
/// fast-forward that would overwrite local modifications is refused with
/// [`Error::LocalChangesOverwritten`]. Conflicts abort the merge and leave
/// the working tree as libgit2 wrote it.
pub fn merge(repo: &Repository, source: &str) -> Result<MergeOutcome> {
    let source_branch = repo
        .find_branch(source, BranchType::Local)
        .map_err(|_| Error::BranchNotFound {
            name: source.to_string(),
        })?;

    let source_commit = source_branch.get().peel_to_commit()?;
    let annotated = repo.find_annotated_commit(source_commit.id())?;

    let (analysis, _) = repo.merge_analysis(&[&annotated])?;

    if analysis.is_up_to_date() {
        return Ok(MergeOutcome::UpToDate);
    }

    if analysis.is_fast_forward() {
        let current = current_branch(repo)?.ok_or_else(|| Error::BranchNotFound {
            name: "HEAD".to_string(),
        })?;
        fast_forward(
            repo,
            &format!("refs/heads/{current}"),
            source_commit.id(),
            &format!("merge {source}: fast-forward"),
        )?;
        tracing::debug!(source, "Fast-forwarded");
        return Ok(MergeOutcome::FastForward);
    }

    let mut merge_opts = MergeOptions::new();
    repo.merge(&[&annotated], Some(&mut merge_opts), None)?;

    let mut index = repo.index()?;
    if index.has_conflicts() {
        repo.cleanup_state()?;
        return Err(Error::MergeConflict {
            message: format!("Merge of '{source}' resulted in conflicts"),
        });
    }

    let signature = repo.signature()?;
    let tree_id = index.write_tree()?;
    let tree = repo.find_tree(tree_id)?;
    let head_commit = repo.head()?.peel_to_commit()?;

    let message = format!("Merge branch '{source}'");
    let oid = repo.commit(
        Some("HEAD"),
        &signature,
        &signature,
        &message,
        &tree,
        &[&head_commit, &source_commit],
    )?;

    repo.cleanup_state()?;
    tracing::debug!(source, commit = %oid, "Created merge commit");

    Ok(MergeOutcome::Merged(oid))
}
