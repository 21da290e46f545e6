//! Repository and configuration lookup shared by all commands.

use std::path::Path;

use git2::Repository;
use porcelain_git::{PorcelainConfig, repository};

use crate::error::Result;

/// The repository a command runs against, with its resolved configuration.
pub struct Context {
    pub repo: Repository,
    pub config: PorcelainConfig,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("path", &self.repo.path())
            .field("config", &self.config)
            .finish()
    }
}

impl Context {
    /// Discover the repository containing `dir` and load its configuration.
    pub fn discover(dir: &Path, config_path: Option<&Path>) -> Result<Self> {
        let repo = repository::discover(dir)?;
        let config = PorcelainConfig::load(config_path, repo.workdir())?;
        tracing::debug!(repo = %repo.path().display(), "Resolved repository");
        Ok(Self { repo, config })
    }

    /// Configuration only, for commands that run outside a repository.
    pub fn config_only(config_path: Option<&Path>) -> Result<PorcelainConfig> {
        Ok(PorcelainConfig::load(config_path, None)?)
    }
}
