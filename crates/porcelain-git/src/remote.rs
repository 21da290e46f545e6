//! Fetch, push and fast-forward pull.

use git2::{AnnotatedCommit, Repository};

use crate::branches::current_branch;
use crate::merge::fast_forward;
use crate::transport::TransportConfig;
use crate::{Error, Result};

const DEFAULT_REMOTE: &str = "origin";

fn find_remote<'r>(repo: &'r Repository, name: &str) -> Result<git2::Remote<'r>> {
    repo.find_remote(name).map_err(|_| Error::RemoteNotFound {
        name: name.to_string(),
    })
}

fn branch_or_current(repo: &Repository, branch: Option<&str>) -> Result<String> {
    match branch {
        Some(b) => Ok(b.to_string()),
        None => current_branch(repo)?.ok_or_else(|| Error::BranchNotFound {
            name: "HEAD".to_string(),
        }),
    }
}

/// Fetch the configured refspecs of `remote` (default `origin`).
pub fn fetch(repo: &Repository, remote: Option<&str>, transport: &TransportConfig) -> Result<()> {
    let remote_name = remote.unwrap_or(DEFAULT_REMOTE);
    let mut remote = find_remote(repo, remote_name)?;
    let url = remote.url().unwrap_or_default().to_string();

    tracing::debug!(remote = remote_name, url = %url, "Fetching");
    remote
        .fetch(&[] as &[&str], Some(&mut transport.fetch_options()), None)
        .map_err(|e| Error::Transport {
            url,
            message: e.message().to_string(),
        })?;
    Ok(())
}

/// Fetch every configured remote. Returns the remote names fetched.
pub fn fetch_all_remotes(repo: &Repository, transport: &TransportConfig) -> Result<Vec<String>> {
    let names: Vec<String> = repo.remotes()?.iter().flatten().map(str::to_string).collect();
    for name in &names {
        fetch(repo, Some(name), transport)?;
    }
    Ok(names)
}

/// Push a branch to a remote repository.
///
/// `remote` defaults to `origin`, `branch` to the current branch.
pub fn push(
    repo: &Repository,
    remote: Option<&str>,
    branch: Option<&str>,
    transport: &TransportConfig,
) -> Result<()> {
    let remote_name = remote.unwrap_or(DEFAULT_REMOTE);
    let branch_name = branch_or_current(repo, branch)?;
    let mut remote = find_remote(repo, remote_name)?;

    let refspec = format!("refs/heads/{branch_name}:refs/heads/{branch_name}");
    tracing::debug!(remote = remote_name, refspec = %refspec, "Pushing");

    remote
        .push(&[refspec.as_str()], Some(&mut transport.push_options()))
        .map_err(|e| Error::PushFailed {
            message: e.message().to_string(),
        })?;

    Ok(())
}

/// What a pull did to the local branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullOutcome {
    UpToDate,
    FastForward,
}

/// Pull changes using fetch + fast-forward.
///
/// The branch is compared against what was fetched on its own, so a branch
/// other than the checked-out one is only moved if it fast-forwards, and its
/// move leaves the working tree alone. Diverged histories are refused with
/// [`Error::CannotFastForward`].
pub fn pull(
    repo: &Repository,
    remote: Option<&str>,
    branch: Option<&str>,
    transport: &TransportConfig,
) -> Result<PullOutcome> {
    let remote_name = remote.unwrap_or(DEFAULT_REMOTE);
    let branch_name = branch_or_current(repo, branch)?;
    let refname = format!("refs/heads/{branch_name}");
    let mut local = repo
        .find_reference(&refname)
        .map_err(|_| Error::BranchNotFound {
            name: branch_name.clone(),
        })?;
    let mut remote = find_remote(repo, remote_name)?;

    remote
        .fetch(&[branch_name.as_str()], Some(&mut transport.fetch_options()), None)
        .map_err(|e| Error::PullFailed {
            message: format!("Fetch failed: {}", e.message()),
        })?;

    let fetch_head = repo
        .find_reference("FETCH_HEAD")
        .map_err(|e| Error::PullFailed {
            message: format!("Could not find FETCH_HEAD: {}", e.message()),
        })?;
    let fetch_commit: AnnotatedCommit<'_> = repo
        .reference_to_annotated_commit(&fetch_head)
        .map_err(|e| Error::PullFailed {
            message: format!("Could not resolve FETCH_HEAD: {}", e.message()),
        })?;

    let (analysis, _) = repo.merge_analysis_for_ref(&local, &[&fetch_commit])?;

    if analysis.is_up_to_date() {
        return Ok(PullOutcome::UpToDate);
    }

    if analysis.is_fast_forward() {
        let reflog = format!("pull: fast-forward to {}", fetch_commit.id());
        if current_branch(repo)?.as_deref() == Some(branch_name.as_str()) {
            fast_forward(repo, &refname, fetch_commit.id(), &reflog)?;
        } else {
            tracing::debug!(branch = %branch_name, "Fast-forwarding branch that is not checked out");
            local.set_target(fetch_commit.id(), &reflog)?;
        }
        return Ok(PullOutcome::FastForward);
    }

    let local_commit = local.peel_to_commit()?;
    Err(Error::CannotFastForward {
        message: format!(
            "Cannot fast-forward {} from {} to {}. Manual merge required.",
            branch_name,
            local_commit.id(),
            fetch_commit.id()
        ),
    })
}
