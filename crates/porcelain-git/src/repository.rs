//! Opening, creating and cloning repositories.

use std::path::{Path, PathBuf};

use git2::build::RepoBuilder;
use git2::{ErrorCode, Repository};
use porcelain_fs::NormalizedPath;

use crate::transport::TransportConfig;
use crate::{Error, Result, submodule, walker};

/// Where to find a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoLocation {
    /// The working tree root (or git dir of a bare repository)
    Workdir(PathBuf),
    /// Any path inside a working tree; parents are searched for `.git`
    Within(PathBuf),
}

impl RepoLocation {
    /// The location as a normalized path.
    pub fn path(&self) -> NormalizedPath {
        match self {
            Self::Workdir(path) | Self::Within(path) => NormalizedPath::new(path),
        }
    }
}

impl From<&Path> for RepoLocation {
    fn from(path: &Path) -> Self {
        Self::Workdir(path.to_path_buf())
    }
}

impl From<PathBuf> for RepoLocation {
    fn from(path: PathBuf) -> Self {
        Self::Workdir(path)
    }
}

impl From<&str> for RepoLocation {
    fn from(path: &str) -> Self {
        Self::Workdir(PathBuf::from(path))
    }
}

fn not_found(location: &NormalizedPath, e: git2::Error) -> Error {
    if e.code() == ErrorCode::NotFound {
        Error::NotFound {
            location: location.to_native(),
        }
    } else {
        Error::Git(e)
    }
}

/// Open a repository.
pub fn open(location: impl Into<RepoLocation>) -> Result<Repository> {
    let location = location.into();
    let path = location.path();
    let repo = match &location {
        RepoLocation::Workdir(_) => Repository::open(path.to_native()),
        RepoLocation::Within(_) => Repository::discover(path.to_native()),
    };
    repo.map_err(|e| not_found(&path, e))
}

/// Find the repository containing `path`.
pub fn discover(path: impl AsRef<Path>) -> Result<Repository> {
    open(RepoLocation::Within(path.as_ref().to_path_buf()))
}

/// Create a new repository at `path`.
pub fn init(path: impl AsRef<Path>, bare: bool) -> Result<Repository> {
    let path = path.as_ref();
    let repo = if bare {
        Repository::init_bare(path)?
    } else {
        Repository::init(path)?
    };
    tracing::debug!(path = %path.display(), bare, "Initialized repository");
    Ok(repo)
}

/// Settings for [`clone`].
#[derive(Debug, Clone, Default)]
pub struct CloneOptions {
    /// Branch to check out instead of the remote's HEAD
    pub branch: Option<String>,
    pub bare: bool,

    /// Initialize and update submodules after cloning
    pub recurse_submodules: bool,

    /// Nesting bound for the submodule update
    pub max_depth: Option<usize>,

    pub transport: TransportConfig,
}

/// Clone `url` into `dest`.
pub fn clone(url: &str, dest: impl AsRef<Path>, options: &CloneOptions) -> Result<Repository> {
    let dest = dest.as_ref();
    tracing::info!(url, dest = %dest.display(), "Cloning");

    let mut builder = RepoBuilder::new();
    builder
        .bare(options.bare)
        .fetch_options(options.transport.fetch_options());
    if let Some(branch) = &options.branch {
        builder.branch(branch);
    }

    let repo = builder.clone(url, dest).map_err(|e| Error::Transport {
        url: url.to_string(),
        message: e.message().to_string(),
    })?;

    if options.recurse_submodules && !options.bare {
        let max_depth = options.max_depth.unwrap_or(walker::DEFAULT_MAX_DEPTH);
        submodule::update_all(&repo, None, max_depth, &options.transport)?;
    }

    Ok(repo)
}
