//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Porcelain - everyday git operations with recursive submodule support
#[derive(Parser, Debug)]
#[command(name = "porcelain")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file to use instead of the discovered one
    #[arg(long, global = true, env = "PORCELAIN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Run as if started in this directory
    #[arg(short = 'C', global = true, value_name = "DIR")]
    pub directory: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Remove untracked files from the working tree
    ///
    /// Flags override the `[clean]` section of the configuration.
    ///
    /// Examples:
    ///   porcelain clean -n           # Show what would be removed
    ///   porcelain clean -d -f        # Remove directories, forcing stubborn ones
    ///   porcelain clean -x build/    # Include ignored files under build/
    Clean {
        /// Remove untracked directories too
        #[arg(short = 'd')]
        directories: bool,

        /// Force-delete directories the clean cannot remove
        #[arg(short = 'f', long = "force-dirs")]
        force: bool,

        /// Also remove files matched by ignore rules
        #[arg(short = 'x')]
        include_ignored: bool,

        /// Only report what would be removed
        #[arg(short = 'n', long)]
        dry_run: bool,

        /// Limit the clean to these paths
        paths: Vec<String>,
    },

    /// Recursive submodule operations
    Submodule {
        #[command(subcommand)]
        action: SubmoduleAction,
    },

    /// Save and restore working tree changes
    Stash {
        #[command(subcommand)]
        action: StashAction,
    },

    /// Manage local branches
    Branch {
        #[command(subcommand)]
        action: BranchAction,
    },

    /// Stage files for the next commit
    Add {
        /// Paths or pathspecs to stage
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Record the staged changes
    Commit {
        /// Commit message
        #[arg(short, long)]
        message: String,

        /// Replace the last commit
        #[arg(long)]
        amend: bool,

        /// Allow a commit with no changes
        #[arg(long)]
        allow_empty: bool,
    },

    /// Show recent commits
    Log {
        /// Number of commits to show
        #[arg(short = 'n', long, default_value_t = 10)]
        max_count: usize,

        /// Branch to show instead of HEAD
        branch: Option<String>,
    },

    /// Show changed and untracked paths
    Status,

    /// Merge a local branch into the current branch
    Merge {
        /// Branch to merge
        branch: String,
    },

    /// Clone a repository
    Clone {
        /// Remote URL
        url: String,

        /// Destination directory
        dest: PathBuf,

        /// Branch to check out
        #[arg(short, long)]
        branch: Option<String>,

        /// Update submodules after cloning
        #[arg(long, alias = "recurse-submodules")]
        recursive: bool,
    },

    /// Fetch from a remote
    Fetch {
        /// Remote name (default: origin)
        remote: Option<String>,
    },

    /// Push a branch to a remote
    Push {
        /// Remote name (default: origin)
        remote: Option<String>,

        /// Branch to push (default: current branch)
        branch: Option<String>,
    },

    /// Fetch and fast-forward a branch
    Pull {
        /// Remote name (default: origin)
        remote: Option<String>,

        /// Branch to pull (default: current branch)
        branch: Option<String>,
    },
}

/// Submodule subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum SubmoduleAction {
    /// List the submodules of this repository
    List,

    /// Register all submodules, recursively
    Init {
        /// Override the configured nesting depth
        #[arg(long)]
        max_depth: Option<usize>,
    },

    /// Copy `.gitmodules` URLs into repository configs, recursively
    Sync {
        /// Override the configured nesting depth
        #[arg(long)]
        max_depth: Option<usize>,
    },

    /// Check out recorded submodule commits, cloning as needed
    Update {
        /// Only update this top-level submodule
        path: Option<String>,

        /// Override the configured nesting depth
        #[arg(long)]
        max_depth: Option<usize>,
    },

    /// Fetch every remote of every checked-out submodule
    Fetch {
        /// Override the configured nesting depth
        #[arg(long)]
        max_depth: Option<usize>,
    },

    /// Add a new submodule
    Add {
        /// Repository URL
        url: String,

        /// Path inside this repository
        path: String,
    },
}

/// Stash subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum StashAction {
    /// Stash local modifications
    Save {
        /// Stash message
        #[arg(short, long)]
        message: Option<String>,

        /// Include untracked files
        #[arg(short = 'u', long)]
        include_untracked: bool,
    },

    /// List stash entries
    List,

    /// Apply a stash entry, keeping it
    Apply {
        #[arg(default_value_t = 0)]
        index: usize,
    },

    /// Apply a stash entry and drop it
    Pop {
        #[arg(default_value_t = 0)]
        index: usize,
    },

    /// Drop a stash entry
    Drop {
        #[arg(default_value_t = 0)]
        index: usize,
    },

    /// Drop every stash entry
    Clear,
}

/// Branch subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum BranchAction {
    /// List local branches
    List,

    /// Create a new branch
    Create {
        /// Name of the branch
        name: String,

        /// Branch to start from (default: HEAD)
        #[arg(long)]
        base: Option<String>,

        /// Reset the branch if it already exists
        #[arg(long)]
        force: bool,
    },

    /// Delete a branch
    Delete {
        /// Name of the branch
        name: String,
    },

    /// Switch to a branch
    Checkout {
        /// Name of the branch
        name: String,
    },
}
