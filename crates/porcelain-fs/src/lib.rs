//! Filesystem primitives for the git porcelain workspace
//!
//! Normalized paths, atomic writes, forced directory removal and a
//! format-agnostic configuration store.

pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod path;

pub use config::ConfigStore;
pub use constants::RepoPath;
pub use error::{Error, Result};
pub use path::NormalizedPath;
