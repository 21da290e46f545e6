//! Error types for porcelain-git

use std::path::PathBuf;

/// Result type for porcelain-git operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in porcelain-git operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("Filesystem error: {0}")]
    Fs(#[from] porcelain_fs::Error),

    #[error("Cannot read submodules of {path}: {message}")]
    RepositoryAccess { path: PathBuf, message: String },

    #[error("Could not delete file {path}")]
    CouldNotDeleteFile { path: String },

    #[error("Could not delete {path} even after forced removal")]
    RepeatedDeletionFailure { path: String },

    #[error("No git repository found at {location}")]
    NotFound { location: PathBuf },

    #[error("Operation requires a working tree but {path} is bare")]
    BareRepository { path: PathBuf },

    #[error("Branch '{name}' not found")]
    BranchNotFound { name: String },

    #[error("Remote '{name}' not found")]
    RemoteNotFound { name: String },

    #[error("Submodule '{name}' not found")]
    SubmoduleNotFound { name: String },

    #[error("Invalid branch name: {name}")]
    InvalidBranchName { name: String },

    #[error("Push failed: {message}")]
    PushFailed { message: String },

    #[error("Pull failed: {message}")]
    PullFailed { message: String },

    #[error("{message}")]
    CannotFastForward { message: String },

    #[error("Merge conflict: {message}")]
    MergeConflict { message: String },

    #[error("Local changes would be overwritten: {message}")]
    LocalChangesOverwritten { message: String },

    #[error("Nothing to commit")]
    NothingToCommit,

    #[error("No local changes to stash")]
    NothingToStash,

    #[error("Stash entry stash@{{{index}}} not found")]
    StashNotFound { index: usize },

    #[error("Transport error for {url}: {message}")]
    Transport { url: String, message: String },
}
