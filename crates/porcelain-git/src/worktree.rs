//! `git2`-backed clean pass.
//!
//! libgit2 has no clean command, so candidates come from `statuses` and are
//! removed here. Untracked directories are emptied of everything the clean
//! is allowed to touch and then removed; a directory that still holds
//! ignored files or a nested repository stays behind and is reported as
//! [`Error::CouldNotDeleteFile`] for the executor to escalate.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use git2::{Repository, Status, StatusOptions};
use porcelain_fs::{NormalizedPath, RepoPath, io};

use crate::engine::CleanEngine;
use crate::{CleanOptions, Error, Result};

/// The working tree root of `repo`, or an error for bare repositories.
pub(crate) fn workdir(repo: &Repository) -> Result<NormalizedPath> {
    repo.workdir()
        .map(NormalizedPath::new)
        .ok_or_else(|| Error::BareRepository {
            path: repo.path().to_path_buf(),
        })
}

/// Untracked (and optionally ignored) paths eligible for removal.
///
/// Directories are reported once, with a trailing slash, and only when
/// `remove_untracked_dirs` is set.
pub fn clean_candidates(repo: &Repository, options: &CleanOptions) -> Result<Vec<String>> {
    let mut status_opts = StatusOptions::new();
    status_opts
        .include_untracked(true)
        .recurse_untracked_dirs(false)
        .include_ignored(!options.ignore_excluded)
        .recurse_ignored_dirs(false)
        .exclude_submodules(true);
    for path in &options.paths {
        status_opts.pathspec(path);
    }

    let wanted = if options.ignore_excluded {
        Status::WT_NEW
    } else {
        Status::WT_NEW | Status::IGNORED
    };

    let statuses = repo.statuses(Some(&mut status_opts))?;
    let candidates = statuses
        .iter()
        .filter(|entry| entry.status().intersects(wanted))
        .filter_map(|entry| entry.path().map(str::to_string))
        .filter(|path| options.remove_untracked_dirs || !path.ends_with('/'))
        .collect();

    Ok(candidates)
}

impl CleanEngine for Repository {
    fn clean_once(&self, options: &CleanOptions) -> Result<BTreeSet<String>> {
        let root = workdir(self)?;
        let candidates = clean_candidates(self, options)?;
        tracing::debug!(
            root = %root,
            candidates = candidates.len(),
            dry_run = options.dry_run,
            "Running clean pass"
        );

        if options.dry_run {
            return Ok(candidates.into_iter().collect());
        }

        let mut removed = BTreeSet::new();
        for candidate in candidates {
            let rel = NormalizedPath::new(&candidate);
            if rel.is_dir_entry() {
                let dir = rel.trim_trailing_slash();
                remove_untracked_dir(self, &root, dir.as_str(), options)?;
            } else {
                remove_untracked_file(&root, rel.as_str())?;
            }
            removed.insert(candidate);
        }

        Ok(removed)
    }

    fn force_delete(&self, path: &str) -> Result<()> {
        let target = workdir(self)?.join(path);
        io::force_remove(&target)?;
        Ok(())
    }
}

fn remove_untracked_file(root: &NormalizedPath, rel: &str) -> Result<()> {
    let native = root.join(rel).to_native();
    fs::remove_file(&native).map_err(|e| {
        tracing::debug!(path = %rel, error = %e, "Removing file failed");
        Error::CouldNotDeleteFile {
            path: rel.to_string(),
        }
    })
}

fn remove_untracked_dir(
    repo: &Repository,
    root: &NormalizedPath,
    rel: &str,
    options: &CleanOptions,
) -> Result<()> {
    let native = root.join(rel).to_native();
    if is_nested_repository(&native) {
        return Err(Error::CouldNotDeleteFile {
            path: rel.to_string(),
        });
    }

    empty_dir(repo, root, rel, options)?;

    fs::remove_dir(&native).map_err(|e| {
        tracing::debug!(path = %rel, error = %e, "Removing directory failed");
        Error::CouldNotDeleteFile {
            path: rel.to_string(),
        }
    })
}

/// Delete the removable contents of `rel`; kept entries are left in place.
fn empty_dir(
    repo: &Repository,
    root: &NormalizedPath,
    rel: &str,
    options: &CleanOptions,
) -> Result<()> {
    let native = root.join(rel).to_native();
    let entries = fs::read_dir(&native).map_err(|e| porcelain_fs::Error::io(&native, e))?;

    for entry in entries {
        let entry = entry.map_err(|e| porcelain_fs::Error::io(&native, e))?;
        let name = entry.file_name();
        let child_rel = format!("{rel}/{}", name.to_string_lossy());
        let child_native = entry.path();
        let file_type = entry
            .file_type()
            .map_err(|e| porcelain_fs::Error::io(&child_native, e))?;

        if options.ignore_excluded && repo.is_path_ignored(&child_rel)? {
            continue;
        }

        if file_type.is_dir() {
            if is_nested_repository(&child_native) {
                continue;
            }
            empty_dir(repo, root, &child_rel, options)?;
            // Left in place when it keeps content; the parent removal then fails
            if let Err(e) = fs::remove_dir(&child_native) {
                tracing::debug!(path = %child_rel, error = %e, "Removing subdirectory failed");
            }
        } else {
            remove_untracked_file(root, &child_rel)?;
        }
    }

    Ok(())
}

fn is_nested_repository(dir: &Path) -> bool {
    dir.join(RepoPath::GitDir.as_str()).exists()
}
