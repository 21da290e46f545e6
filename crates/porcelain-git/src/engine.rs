//! Capabilities the walker and the clean executor need from a repository.
//!
//! Both algorithms are written against these traits rather than against
//! `git2` directly. `git2::Repository` implements them in
//! [`crate::submodule`] and [`crate::worktree`]; tests drive them with
//! in-memory fakes.

use std::collections::BTreeSet;

use crate::{CleanOptions, Result};

/// A submodule as registered in a parent's index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmoduleEntry {
    /// Logical name from `.gitmodules`
    pub name: String,

    /// Path of the submodule relative to the parent's working tree
    pub path: String,

    /// Configured remote URL, if any
    pub url: Option<String>,
}

/// A repository that can enumerate and open its submodules.
pub trait SubmoduleSource: Sized {
    /// List submodule entries in index order.
    ///
    /// Fails with [`crate::Error::RepositoryAccess`] when the index cannot be
    /// read.
    fn submodule_entries(&self) -> Result<Vec<SubmoduleEntry>>;

    /// Open the repository behind `entry`.
    ///
    /// `None` means the submodule is registered but not checked out, which
    /// is a normal state and not an error.
    fn open_submodule(&self, entry: &SubmoduleEntry) -> Option<Self>;
}

/// A working tree that can be cleaned of untracked content.
pub trait CleanEngine {
    /// Run a single clean pass and return the removed paths, relative to the
    /// working tree root.
    ///
    /// A path the engine cannot remove is reported as
    /// [`crate::Error::CouldNotDeleteFile`].
    fn clean_once(&self, options: &CleanOptions) -> Result<BTreeSet<String>>;

    /// Recursively delete `path` (relative to the working tree root) without
    /// consulting the engine.
    fn force_delete(&self, path: &str) -> Result<()>;
}
