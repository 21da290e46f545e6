//! Shared test fixtures for the git porcelain workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`git`] — repositories driven through the `git` CLI
//! - [`repo`] — [`repo::TestRepo`], a temp working tree with assertions

pub mod git;
pub mod repo;
