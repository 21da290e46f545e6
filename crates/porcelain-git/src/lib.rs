//! Git porcelain over `git2`
//!
//! Everyday repository operations as plain functions, plus the two pieces
//! with real control flow: the depth-bounded submodule [`walker`] and the
//! retrying [`clean`] executor. Both run against the capability traits in
//! [`engine`], which `git2::Repository` implements.

pub mod branches;
pub mod clean;
pub mod commits;
pub mod config;
pub mod engine;
pub mod error;
pub mod merge;
pub mod remote;
pub mod repository;
pub mod stash;
pub mod submodule;
pub mod transport;
pub mod walker;
pub mod worktree;

pub use clean::{CleanOptions, clean};
pub use config::PorcelainConfig;
pub use engine::{CleanEngine, SubmoduleEntry, SubmoduleSource};
pub use error::{Error, Result};
pub use merge::MergeOutcome;
pub use repository::{CloneOptions, RepoLocation};
pub use transport::{SshIdentity, TransportConfig};
pub use walker::{DEFAULT_MAX_DEPTH, walk};
