//! Command implementations for porcelain-cli

pub mod branch;
pub mod clean;
pub mod history;
pub mod remote;
pub mod stash;
pub mod submodule;

pub use branch::run_branch;
pub use clean::{CleanFlags, run_clean};
pub use history::{run_add, run_commit, run_log, run_merge, run_status};
pub use remote::{run_clone, run_fetch, run_pull, run_push};
pub use stash::run_stash;
pub use submodule::run_submodule;
