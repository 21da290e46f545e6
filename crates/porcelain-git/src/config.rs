//! Porcelain configuration.
//!
//! Looked up in order: an explicit file, `.porcelain.toml` at the working
//! tree root, `porcelain/config.toml` in the user config directory. The
//! first file found wins; nothing is merged.

use std::path::{Path, PathBuf};

use porcelain_fs::{ConfigStore, NormalizedPath, RepoPath};
use serde::{Deserialize, Serialize};

use crate::walker::DEFAULT_MAX_DEPTH;
use crate::{CleanOptions, Result, TransportConfig};

/// Defaults applied to every `clean` unless overridden per call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanDefaults {
    pub remove_untracked_dirs: bool,
    pub force_non_empty_dirs: bool,
    pub ignore_excluded: bool,
}

impl Default for CleanDefaults {
    fn default() -> Self {
        let options = CleanOptions::default();
        Self {
            remove_untracked_dirs: options.remove_untracked_dirs,
            force_non_empty_dirs: options.force_non_empty_dirs,
            ignore_excluded: options.ignore_excluded,
        }
    }
}

impl CleanDefaults {
    pub fn to_options(&self) -> CleanOptions {
        CleanOptions::new()
            .directories(self.remove_untracked_dirs)
            .force(self.force_non_empty_dirs)
            .ignore_excluded(self.ignore_excluded)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmoduleSettings {
    /// Levels of nested submodules the walker descends into
    pub max_depth: usize,
}

impl Default for SubmoduleSettings {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PorcelainConfig {
    pub clean: CleanDefaults,
    pub submodules: SubmoduleSettings,
    pub transport: TransportConfig,
}

impl PorcelainConfig {
    /// The user-level config file, if the platform has a config directory.
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("porcelain").join("config.toml"))
    }

    /// Resolve configuration for a working tree.
    ///
    /// An explicit path must exist; the implicit locations are optional.
    pub fn load(explicit: Option<&Path>, workdir: Option<&Path>) -> Result<Self> {
        let store = ConfigStore::new();

        if let Some(path) = explicit {
            return Ok(store.load(&NormalizedPath::new(path))?);
        }

        let candidates = workdir
            .map(|dir| dir.join(RepoPath::ConfigFile.as_str()))
            .into_iter()
            .chain(Self::user_config_path());

        for candidate in candidates {
            let path = NormalizedPath::new(&candidate);
            if let Some(config) = store.load_optional(&path)? {
                tracing::debug!(path = %path, "Loaded configuration");
                return Ok(config);
            }
        }

        Ok(Self::default())
    }
}
