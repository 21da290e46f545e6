//! Git repository fixtures.
//!
//! Fixtures shell out to the `git` CLI so the repositories under test are
//! produced by the reference implementation, not by the code being tested.

use std::fs;
use std::path::Path;
use std::process::Command;

/// Run `git` in `dir`, panicking with stderr on failure.
///
/// File-protocol submodules are allowed so fixtures can nest local repos.
///
/// # Panics
/// Panics if git cannot be spawned or exits unsuccessfully.
pub fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(["-c", "protocol.file.allow=always"])
        .args(args)
        .current_dir(dir)
        .output()
        .unwrap_or_else(|e| panic!("failed to run `git {args:?}`: {e}"));
    if !output.status.success() {
        panic!(
            "`git {args:?}` failed in {}:\n{}",
            dir.display(),
            String::from_utf8_lossy(&output.stderr)
        );
    }
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Initialises a real git repository using `git2` (no commit, no config).
///
/// # Panics
/// Panics if `git2::Repository::init` fails.
pub fn real_git_repo(path: &Path) -> git2::Repository {
    git2::Repository::init(path).unwrap_or_else(|e| {
        panic!(
            "real_git_repo: failed to init repository at {}: {e}",
            path.display()
        )
    })
}

/// Initialises a repository with identity config and one commit on `main`.
///
/// # Panics
/// Panics if any git operation fails.
pub fn real_git_repo_with_commit(path: &Path) {
    fs::create_dir_all(path)
        .unwrap_or_else(|e| panic!("failed to create {}: {e}", path.display()));
    git(path, &["init"]);
    git(path, &["config", "user.email", "test@test.com"]);
    git(path, &["config", "user.name", "Test User"]);
    git(path, &["config", "commit.gpgsign", "false"]);
    git(path, &["symbolic-ref", "HEAD", "refs/heads/main"]);

    fs::write(path.join("README.md"), "# Test")
        .unwrap_or_else(|e| panic!("failed to write README.md: {e}"));
    commit_all(path, "Initial commit");
}

/// Stage everything and commit.
pub fn commit_all(path: &Path, message: &str) {
    git(path, &["add", "-A"]);
    git(path, &["commit", "-m", message]);
}

/// Add the repository at `source` as a submodule of `parent` at `rel_path`
/// and commit the result.
pub fn add_submodule(parent: &Path, source: &Path, rel_path: &str) {
    let source = source.to_string_lossy();
    git(parent, &["submodule", "add", source.as_ref(), rel_path]);
    commit_all(parent, &format!("Add submodule {rel_path}"));
}

/// Build the tree `root -> [libA, libB -> [libC]]` under `base`.
///
/// Upstream repositories live in `base/upstream/`; the returned path is the
/// checked-out superproject in `base/root` with every submodule cloned.
pub fn nested_submodule_tree(base: &Path) -> std::path::PathBuf {
    let upstream = base.join("upstream");
    let lib_a = upstream.join("libA");
    let lib_b = upstream.join("libB");
    let lib_c = upstream.join("libC");
    let origin = upstream.join("root");
    for repo in [&lib_a, &lib_b, &lib_c, &origin] {
        real_git_repo_with_commit(repo);
    }

    add_submodule(&lib_b, &lib_c, "libC");
    add_submodule(&origin, &lib_a, "libA");
    add_submodule(&origin, &lib_b, "libB");

    let root = base.join("root");
    let root_str = root.to_string_lossy();
    let origin_str = origin.to_string_lossy();
    git(
        base,
        &["clone", "--recurse-submodules", origin_str.as_ref(), root_str.as_ref()],
    );
    root
}
