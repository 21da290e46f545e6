//! Stash management.
//!
//! libgit2's stash API needs `&mut Repository`, so these functions do too.

use git2::{ErrorCode, Oid, Repository, StashApplyOptions, StashFlags};

use crate::{Error, Result};

/// A saved stash entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StashEntry {
    /// Position in the stash list; 0 is the most recent
    pub index: usize,
    pub message: String,
    pub id: Oid,
}

/// Stash local changes. Untracked files are included on request.
pub fn stash_save(repo: &mut Repository, message: Option<&str>, include_untracked: bool) -> Result<Oid> {
    let signature = repo.signature()?;
    let mut flags = StashFlags::DEFAULT;
    if include_untracked {
        flags |= StashFlags::INCLUDE_UNTRACKED;
    }

    match repo.stash_save(&signature, message.unwrap_or("WIP"), Some(flags)) {
        Ok(oid) => Ok(oid),
        Err(e) if e.code() == ErrorCode::NotFound => Err(Error::NothingToStash),
        Err(e) => Err(e.into()),
    }
}

/// All stash entries, most recent first.
pub fn stash_list(repo: &mut Repository) -> Result<Vec<StashEntry>> {
    let mut entries = Vec::new();
    repo.stash_foreach(|index, message, id| {
        entries.push(StashEntry {
            index,
            message: message.to_string(),
            id: *id,
        });
        true
    })?;
    Ok(entries)
}

fn ensure_exists(repo: &mut Repository, index: usize) -> Result<()> {
    if index < stash_list(repo)?.len() {
        Ok(())
    } else {
        Err(Error::StashNotFound { index })
    }
}

/// Apply a stash entry and keep it in the list.
pub fn stash_apply(repo: &mut Repository, index: usize) -> Result<()> {
    ensure_exists(repo, index)?;
    let mut options = StashApplyOptions::new();
    repo.stash_apply(index, Some(&mut options))?;
    Ok(())
}

/// Apply a stash entry and drop it on success.
pub fn stash_pop(repo: &mut Repository, index: usize) -> Result<()> {
    ensure_exists(repo, index)?;
    let mut options = StashApplyOptions::new();
    repo.stash_pop(index, Some(&mut options))?;
    Ok(())
}

pub fn stash_drop(repo: &mut Repository, index: usize) -> Result<()> {
    ensure_exists(repo, index)?;
    repo.stash_drop(index)?;
    Ok(())
}

/// Drop every stash entry. Returns how many were dropped.
pub fn stash_clear(repo: &mut Repository) -> Result<usize> {
    let count = stash_list(repo)?.len();
    for _ in 0..count {
        repo.stash_drop(0)?;
    }
    Ok(count)
}
