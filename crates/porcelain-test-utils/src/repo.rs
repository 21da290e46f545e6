//! [`TestRepo`] builder for working-tree scenarios.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use crate::git;

/// A temporary working tree with helpers for setup and assertions.
///
/// # Example
///
/// ```rust,no_run
/// use porcelain_test_utils::repo::TestRepo;
///
/// let repo = TestRepo::with_commit();
/// repo.write(".gitignore", "*.log\n");
/// repo.write("scratch/notes.txt", "todo");
/// repo.assert_file_exists("scratch/notes.txt");
/// ```
pub struct TestRepo {
    temp_dir: TempDir,
}

impl TestRepo {
    /// An initialised repository with one commit on `main`.
    pub fn with_commit() -> Self {
        let temp_dir = TempDir::new().unwrap();
        git::real_git_repo_with_commit(temp_dir.path());
        Self { temp_dir }
    }

    /// Return the root path of the working tree.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn open(&self) -> git2::Repository {
        git2::Repository::open(self.root()).unwrap()
    }

    /// Write `content` to `path` (relative to root), creating parents.
    pub fn write(&self, path: &str, content: &str) {
        let full_path = self.root().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full_path, content).unwrap();
    }

    /// Stage everything and commit.
    pub fn commit_all(&self, message: &str) {
        git::commit_all(self.root(), message);
    }

    /// Run `git` in the working tree and return stdout.
    pub fn git(&self, args: &[&str]) -> String {
        git::git(self.root(), args)
    }

    /// Assert that `path` (relative to the repo root) exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Assert that `path` (relative to the repo root) does **not** exist.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path exists.
    pub fn assert_file_not_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            !full_path.exists(),
            "Expected file NOT to exist: {}",
            full_path.display()
        );
    }
}
