//! Well-known repository file names.

use std::path::Path;

/// Standard paths inside a git working copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoPath {
    /// The `.git` directory (or gitlink file inside a submodule)
    GitDir,
    /// The `.gitmodules` registry of submodules
    GitModules,
    /// The `.gitignore` exclusion file
    GitIgnore,
    /// The per-repository porcelain configuration file
    ConfigFile,
}

impl RepoPath {
    /// Get the string representation of the path.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GitDir => ".git",
            Self::GitModules => ".gitmodules",
            Self::GitIgnore => ".gitignore",
            Self::ConfigFile => ".porcelain.toml",
        }
    }
}

impl AsRef<Path> for RepoPath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for RepoPath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for RepoPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
