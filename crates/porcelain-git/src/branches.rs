//! Local branch management.

use git2::{BranchType, Reference, Repository};

use crate::{Error, Result};

/// A local branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchInfo {
    pub name: String,

    /// Whether HEAD points at this branch
    pub is_head: bool,

    /// Upstream tracking branch, e.g. `origin/main`
    pub upstream: Option<String>,
}

/// Get the current branch name, or `None` if HEAD is detached.
pub fn current_branch(repo: &Repository) -> Result<Option<String>> {
    let head = repo.head()?;

    if head.is_branch() {
        Ok(Some(head.shorthand().unwrap_or("HEAD").to_string()))
    } else {
        Ok(None)
    }
}

fn validate_name(name: &str) -> Result<()> {
    if Reference::is_valid_name(&format!("refs/heads/{name}")) {
        Ok(())
    } else {
        Err(Error::InvalidBranchName {
            name: name.to_string(),
        })
    }
}

/// Create a branch at `base` (a local branch name) or at HEAD.
pub fn create_branch(repo: &Repository, name: &str, base: Option<&str>, force: bool) -> Result<()> {
    validate_name(name)?;

    let base_commit = match base {
        Some(base_name) => repo
            .find_branch(base_name, BranchType::Local)
            .map_err(|_| Error::BranchNotFound {
                name: base_name.to_string(),
            })?
            .get()
            .peel_to_commit()?,
        None => repo.head()?.peel_to_commit()?,
    };

    repo.branch(name, &base_commit, force)?;
    tracing::debug!(branch = name, base = ?base, "Created branch");
    Ok(())
}

/// List local branches in name order.
pub fn list_branches(repo: &Repository) -> Result<Vec<BranchInfo>> {
    let mut branches = Vec::new();
    for item in repo.branches(Some(BranchType::Local))? {
        let (branch, _) = item?;
        let Some(name) = branch.name()?.map(str::to_string) else {
            continue;
        };
        let upstream = branch
            .upstream()
            .ok()
            .and_then(|up| up.name().ok().flatten().map(str::to_string));
        branches.push(BranchInfo {
            name,
            is_head: branch.is_head(),
            upstream,
        });
    }
    branches.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(branches)
}

/// Delete a local branch. The checked-out branch cannot be deleted.
pub fn delete_branch(repo: &Repository, name: &str) -> Result<()> {
    let mut branch = repo
        .find_branch(name, BranchType::Local)
        .map_err(|_| Error::BranchNotFound {
            name: name.to_string(),
        })?;
    branch.delete()?;
    Ok(())
}

/// Switch the working tree to a local branch.
pub fn checkout(repo: &Repository, name: &str) -> Result<()> {
    let branch = repo
        .find_branch(name, BranchType::Local)
        .map_err(|_| Error::BranchNotFound {
            name: name.to_string(),
        })?;
    let refname = branch
        .get()
        .name()
        .map(str::to_string)
        .unwrap_or_else(|| format!("refs/heads/{name}"));
    let commit = branch.get().peel_to_commit()?;

    repo.checkout_tree(
        commit.as_object(),
        Some(git2::build::CheckoutBuilder::new().safe()),
    )?;
    repo.set_head(&refname)?;
    Ok(())
}
