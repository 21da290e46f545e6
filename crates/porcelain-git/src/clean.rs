//! Working-tree cleanup with forced-removal recovery.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::engine::CleanEngine;
use crate::{Error, Result};

/// What a clean pass is allowed to remove.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanOptions {
    /// Remove untracked directories, not just untracked files.
    pub remove_untracked_dirs: bool,

    /// When a directory cannot be removed by the engine, delete it
    /// recursively from the filesystem and try again.
    pub force_non_empty_dirs: bool,

    /// Leave files matched by ignore rules alone.
    pub ignore_excluded: bool,

    /// Restrict cleaning to these pathspecs. Empty means the whole tree.
    pub paths: Vec<String>,

    /// Report what would be removed without touching the working tree.
    pub dry_run: bool,
}

impl Default for CleanOptions {
    fn default() -> Self {
        Self {
            remove_untracked_dirs: false,
            force_non_empty_dirs: false,
            ignore_excluded: true,
            paths: Vec::new(),
            dry_run: false,
        }
    }
}

impl CleanOptions {
    /// Options with files-only cleaning and ignored paths kept.
    pub fn new() -> Self {
        Self::default()
    }

    /// Also remove untracked directories.
    pub fn directories(mut self, enabled: bool) -> Self {
        self.remove_untracked_dirs = enabled;
        self
    }

    /// Force-delete directories the engine reports it could not delete.
    pub fn force(mut self, enabled: bool) -> Self {
        self.force_non_empty_dirs = enabled;
        self
    }

    /// Keep paths matched by ignore rules.
    pub fn ignore_excluded(mut self, enabled: bool) -> Self {
        self.ignore_excluded = enabled;
        self
    }

    /// Limit the clean to these repository-relative paths.
    pub fn paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.paths = paths.into_iter().map(Into::into).collect();
        self
    }

    /// Report what would be removed without touching anything.
    pub fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }
}

/// Clean the working tree, escalating to forced removal when allowed.
///
/// Each [`Error::CouldNotDeleteFile`] reported by the engine is handled at
/// most once per call: the path is force-deleted and the clean pass is run
/// again. If the engine reports the same path a second time the call fails
/// with [`Error::RepeatedDeletionFailure`]. Without
/// [`CleanOptions::force_non_empty_dirs`] the first failure is returned
/// as-is. Any other error is returned immediately.
///
/// On success the result is the removed set of the last, successful pass.
pub fn clean<E: CleanEngine + ?Sized>(engine: &E, options: &CleanOptions) -> Result<BTreeSet<String>> {
    let mut force_removed: BTreeSet<String> = BTreeSet::new();

    loop {
        match engine.clean_once(options) {
            Ok(removed) => return Ok(removed),
            Err(Error::CouldNotDeleteFile { path }) if options.force_non_empty_dirs => {
                if force_removed.contains(&path) {
                    return Err(Error::RepeatedDeletionFailure { path });
                }
                tracing::info!(path = %path, "Engine could not remove path, forcing removal");
                engine.force_delete(&path)?;
                force_removed.insert(path);
            }
            Err(e) => return Err(e),
        }
    }
}
