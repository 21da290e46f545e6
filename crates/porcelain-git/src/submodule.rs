//! Submodule operations built on the depth-bounded walker.
//!
//! The `*_all` functions apply a single-repository operation to the
//! parent's own submodules and then to the submodules of every repository
//! [`walk`] returns. [`add`] only ever touches the parent.

use std::path::Path;

use git2::{Repository, Submodule, SubmoduleUpdateOptions};
use porcelain_fs::NormalizedPath;

use crate::engine::{SubmoduleEntry, SubmoduleSource};
use crate::transport::TransportConfig;
use crate::worktree::workdir;
use crate::{Error, Result, walker};

impl SubmoduleSource for Repository {
    fn submodule_entries(&self) -> Result<Vec<SubmoduleEntry>> {
        let submodules = self.submodules().map_err(|e| Error::RepositoryAccess {
            path: self.path().to_path_buf(),
            message: e.message().to_string(),
        })?;

        Ok(submodules
            .iter()
            .map(|sm| {
                let path = NormalizedPath::new(sm.path()).as_str().to_string();
                SubmoduleEntry {
                    name: sm.name().map(str::to_string).unwrap_or_else(|| path.clone()),
                    path,
                    url: sm.url().map(str::to_string),
                }
            })
            .collect())
    }

    fn open_submodule(&self, entry: &SubmoduleEntry) -> Option<Self> {
        let opened = self
            .find_submodule(&entry.name)
            .and_then(|sm| sm.open());
        match opened {
            Ok(repo) => Some(repo),
            Err(e) => {
                tracing::debug!(
                    submodule = %entry.path,
                    error = %e,
                    "Submodule has no repository on disk"
                );
                None
            }
        }
    }
}

/// Every checked-out submodule below `repo`, depth-first.
pub fn walk(repo: &Repository, max_depth: usize) -> Result<Vec<Repository>> {
    walker::walk(repo, max_depth)
}

/// Absolute working-tree path of a submodule inside `owner`.
fn submodule_workdir(owner: &Repository, sm: &Submodule<'_>) -> Result<NormalizedPath> {
    Ok(workdir(owner)?.join(&NormalizedPath::new(sm.path()).to_string()))
}

/// Run `op` on the parent's submodules, then on those of every walked repository.
fn for_each_submodule<F>(repo: &Repository, max_depth: usize, mut op: F) -> Result<Vec<NormalizedPath>>
where
    F: FnMut(&mut Submodule<'_>) -> Result<()>,
{
    let mut touched = Vec::new();
    let walked = walk(repo, max_depth)?;

    for owner in std::iter::once(repo).chain(walked.iter()) {
        for mut sm in owner.submodules()? {
            op(&mut sm)?;
            touched.push(submodule_workdir(owner, &sm)?);
        }
    }

    Ok(touched)
}

/// Register every submodule in `.git/config`, recursively.
pub fn init_all(repo: &Repository, max_depth: usize) -> Result<Vec<NormalizedPath>> {
    for_each_submodule(repo, max_depth, |sm| {
        tracing::debug!(submodule = %sm.path().display(), "Initializing submodule");
        sm.init(false)?;
        Ok(())
    })
}

/// Copy `.gitmodules` URLs into each repository's config, recursively.
pub fn sync_all(repo: &Repository, max_depth: usize) -> Result<Vec<NormalizedPath>> {
    for_each_submodule(repo, max_depth, |sm| {
        tracing::debug!(submodule = %sm.path().display(), "Syncing submodule URL");
        sm.sync()?;
        Ok(())
    })
}

fn update_one(sm: &mut Submodule<'_>, transport: &TransportConfig) -> Result<()> {
    tracing::debug!(submodule = %sm.path().display(), "Updating submodule");
    let mut options = SubmoduleUpdateOptions::new();
    options.fetch(transport.fetch_options());
    sm.update(true, Some(&mut options))?;
    Ok(())
}

/// Update every submodule of `owner`, recording paths not seen before.
fn update_owner(
    owner: &Repository,
    transport: &TransportConfig,
    touched: &mut Vec<NormalizedPath>,
) -> Result<()> {
    for mut sm in owner.submodules()? {
        update_one(&mut sm, transport)?;
        let path = submodule_workdir(owner, &sm)?;
        if !touched.contains(&path) {
            touched.push(path);
        }
    }
    Ok(())
}

/// Update the submodules of every repository walked below `root`.
///
/// Updating a submodule can check out further submodules, so the walk is
/// repeated until it stops growing.
fn update_walked(
    root: &Repository,
    max_depth: usize,
    transport: &TransportConfig,
    touched: &mut Vec<NormalizedPath>,
) -> Result<()> {
    let mut seen = 0usize;
    loop {
        let walked = walk(root, max_depth)?;
        if walked.len() == seen {
            return Ok(());
        }
        seen = walked.len();

        for owner in &walked {
            update_owner(owner, transport, touched)?;
        }
    }
}

/// Check out the recorded commit of every submodule, cloning as needed.
///
/// With `scope`, only the parent's submodule at that path is updated, along
/// with everything nested below it within `max_depth` levels of the parent.
/// Sibling submodules are left untouched.
pub fn update_all(
    repo: &Repository,
    scope: Option<&str>,
    max_depth: usize,
    transport: &TransportConfig,
) -> Result<Vec<NormalizedPath>> {
    let Some(scope) = scope else {
        let mut touched = Vec::new();
        update_owner(repo, transport, &mut touched)?;
        update_walked(repo, max_depth, transport, &mut touched)?;
        return Ok(touched);
    };

    let scope = scope.trim_end_matches('/');
    let mut matched = repo
        .submodules()?
        .into_iter()
        .filter(|sm| NormalizedPath::new(sm.path()).as_str() == scope)
        .peekable();
    if matched.peek().is_none() {
        return Err(Error::SubmoduleNotFound {
            name: scope.to_string(),
        });
    }

    let mut touched = Vec::new();
    for mut sm in matched {
        update_one(&mut sm, transport)?;
        touched.push(submodule_workdir(repo, &sm)?);

        // The matched submodule sits at level 1
        if max_depth > 0 {
            let child = sm.open()?;
            update_owner(&child, transport, &mut touched)?;
            update_walked(&child, max_depth - 1, transport, &mut touched)?;
        }
    }

    Ok(touched)
}

/// Fetch every remote of every checked-out submodule, recursively.
pub fn fetch_all(
    repo: &Repository,
    max_depth: usize,
    transport: &TransportConfig,
) -> Result<Vec<NormalizedPath>> {
    let mut fetched = Vec::new();
    for sub in walk(repo, max_depth)? {
        crate::remote::fetch_all_remotes(&sub, transport)?;
        fetched.push(workdir(&sub)?);
    }
    Ok(fetched)
}

/// Add `url` as a submodule of `repo` at `path` and clone it.
pub fn add(
    repo: &Repository,
    url: &str,
    path: &str,
    transport: &TransportConfig,
) -> Result<Repository> {
    tracing::info!(url, path, "Adding submodule");
    let mut sm = repo.submodule(url, Path::new(path), true)?;

    let mut options = SubmoduleUpdateOptions::new();
    options.fetch(transport.fetch_options());
    let sub_repo = sm.clone(Some(&mut options)).map_err(|e| Error::Transport {
        url: url.to_string(),
        message: e.message().to_string(),
    })?;
    sm.add_finalize()?;

    Ok(sub_repo)
}

/// One line of `submodule list` output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmoduleStatus {
    pub entry: SubmoduleEntry,

    /// Absolute path of the submodule's working tree
    pub workdir: NormalizedPath,

    /// Whether a repository exists at `workdir`
    pub checked_out: bool,
}

/// Describe the parent's submodules, checked out or not.
pub fn list(repo: &Repository) -> Result<Vec<SubmoduleStatus>> {
    let root = workdir(repo)?;
    repo.submodule_entries()?
        .into_iter()
        .map(|entry| {
            let checked_out = repo.open_submodule(&entry).is_some();
            Ok(SubmoduleStatus {
                workdir: root.join(&entry.path),
                checked_out,
                entry,
            })
        })
        .collect()
}
