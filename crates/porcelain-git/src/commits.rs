//! Index staging, committing and history.

use chrono::{DateTime, TimeZone, Utc};
use git2::{IndexAddOption, Oid, Repository, Status, StatusOptions};

use crate::{Error, Result};

/// Information about a single commit.
#[derive(Debug, Clone)]
pub struct CommitInfo {
    pub id: Oid,

    /// Short commit hash (7 characters)
    pub hash: String,

    /// First line of the commit message
    pub message: String,

    pub author: String,

    pub timestamp: DateTime<Utc>,
}

/// How [`commit`] treats HEAD.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommitOptions {
    /// Replace the HEAD commit instead of adding a child
    pub amend: bool,

    /// Record a commit even when the tree matches the parent's
    pub allow_empty: bool,
}

/// Stage files matching `pathspecs`, including modifications and deletions.
pub fn add<S: AsRef<str>>(repo: &Repository, pathspecs: &[S]) -> Result<()> {
    let specs: Vec<&str> = pathspecs.iter().map(|s| s.as_ref()).collect();
    let mut index = repo.index()?;
    index.add_all(specs.iter().copied(), IndexAddOption::DEFAULT, None)?;
    index.update_all(specs.iter().copied(), None)?;
    index.write()?;
    Ok(())
}

/// Remove paths matching `pathspecs` from the index, keeping them on disk.
pub fn remove<S: AsRef<str>>(repo: &Repository, pathspecs: &[S]) -> Result<()> {
    let specs: Vec<&str> = pathspecs.iter().map(|s| s.as_ref()).collect();
    let mut index = repo.index()?;
    index.remove_all(specs.iter().copied(), None)?;
    index.write()?;
    Ok(())
}

/// Commit the current index.
pub fn commit(repo: &Repository, message: &str, options: CommitOptions) -> Result<Oid> {
    let signature = repo.signature()?;
    let mut index = repo.index()?;
    let tree = repo.find_tree(index.write_tree()?)?;

    let head_commit = match repo.head() {
        Ok(head) => Some(head.peel_to_commit()?),
        Err(e) if e.code() == git2::ErrorCode::UnbornBranch => None,
        Err(e) => return Err(e.into()),
    };

    if options.amend {
        let head_commit = head_commit.ok_or_else(|| Error::BranchNotFound {
            name: "HEAD".to_string(),
        })?;
        let oid = head_commit.amend(
            Some("HEAD"),
            None,
            Some(&signature),
            None,
            Some(message),
            Some(&tree),
        )?;
        return Ok(oid);
    }

    if !options.allow_empty {
        let unchanged = match &head_commit {
            Some(parent) => parent.tree_id() == tree.id(),
            None => tree.is_empty(),
        };
        if unchanged {
            return Err(Error::NothingToCommit);
        }
    }

    let parents: Vec<&git2::Commit<'_>> = head_commit.iter().collect();
    let oid = repo.commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)?;
    tracing::debug!(commit = %oid, "Created commit");
    Ok(oid)
}

/// Extract the last `max_count` commits from `branch`, or from HEAD.
///
/// Returns commits in reverse-chronological order (most recent first).
pub fn log(repo: &Repository, branch: Option<&str>, max_count: usize) -> Result<Vec<CommitInfo>> {
    let commit = match branch {
        Some(branch) => {
            let reference = match repo.find_reference(&format!("refs/heads/{branch}")) {
                Ok(r) => r,
                Err(_) => repo.find_reference(branch).map_err(|_| Error::BranchNotFound {
                    name: branch.to_string(),
                })?,
            };
            reference.peel_to_commit()?
        }
        None => repo.head()?.peel_to_commit()?,
    };

    let mut revwalk = repo.revwalk()?;
    revwalk.push(commit.id())?;
    revwalk.set_sorting(git2::Sort::TIME)?;

    let mut commits = Vec::with_capacity(max_count);
    for oid_result in revwalk.take(max_count) {
        let oid = oid_result?;
        let commit = repo.find_commit(oid)?;

        let timestamp = Utc
            .timestamp_opt(commit.time().seconds(), 0)
            .single()
            .unwrap_or_default();

        let message = commit
            .message()
            .unwrap_or("")
            .lines()
            .next()
            .unwrap_or("")
            .to_string();

        commits.push(CommitInfo {
            id: oid,
            hash: format!("{oid:.7}"),
            message,
            author: commit.author().name().unwrap_or("Unknown").to_string(),
            timestamp,
        });
    }

    Ok(commits)
}

/// Kind of change reported by [`status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Modified,
    Deleted,
    Renamed,
    TypeChange,
    Untracked,
    Conflicted,
}

/// One changed path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    pub path: String,
    pub kind: ChangeKind,

    /// Whether the change is in the index (as opposed to only the worktree)
    pub staged: bool,
}

fn classify(status: Status) -> Option<(ChangeKind, bool)> {
    if status.is_conflicted() {
        return Some((ChangeKind::Conflicted, false));
    }
    let staged = [
        (Status::INDEX_NEW, ChangeKind::Added),
        (Status::INDEX_MODIFIED, ChangeKind::Modified),
        (Status::INDEX_DELETED, ChangeKind::Deleted),
        (Status::INDEX_RENAMED, ChangeKind::Renamed),
        (Status::INDEX_TYPECHANGE, ChangeKind::TypeChange),
    ];
    let unstaged = [
        (Status::WT_NEW, ChangeKind::Untracked),
        (Status::WT_MODIFIED, ChangeKind::Modified),
        (Status::WT_DELETED, ChangeKind::Deleted),
        (Status::WT_RENAMED, ChangeKind::Renamed),
        (Status::WT_TYPECHANGE, ChangeKind::TypeChange),
    ];
    staged
        .iter()
        .find(|(flag, _)| status.contains(*flag))
        .map(|(_, kind)| (*kind, true))
        .or_else(|| {
            unstaged
                .iter()
                .find(|(flag, _)| status.contains(*flag))
                .map(|(_, kind)| (*kind, false))
        })
}

/// Changed and untracked paths in the working tree, ignored files excluded.
pub fn status(repo: &Repository) -> Result<Vec<StatusEntry>> {
    let mut options = StatusOptions::new();
    options
        .include_untracked(true)
        .recurse_untracked_dirs(true)
        .include_ignored(false)
        .renames_head_to_index(true);

    let statuses = repo.statuses(Some(&mut options))?;
    Ok(statuses
        .iter()
        .filter_map(|entry| {
            let path = entry.path()?.to_string();
            let (kind, staged) = classify(entry.status())?;
            Some(StatusEntry { path, kind, staged })
        })
        .collect())
}
