//! End-to-end flow across the workspace crates
//!
//! Configuration is loaded from disk, drives a recursive clone, and the
//! resulting tree is walked and cleaned the way the CLI would.

use std::fs;
use std::path::Path;

use git2::Repository;
use porcelain_fs::NormalizedPath;
use porcelain_git::repository::{self, CloneOptions};
use porcelain_git::{CleanOptions, PorcelainConfig, clean, submodule};
use porcelain_test_utils::git;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn names(repos: &[Repository]) -> Vec<String> {
    repos
        .iter()
        .map(|r| {
            NormalizedPath::new(r.workdir().unwrap())
                .file_name()
                .unwrap()
                .to_string()
        })
        .collect()
}

fn clone_with(config: &PorcelainConfig, base: &Path, dest: &str) -> Repository {
    let origin = base.join("upstream").join("root");
    let options = CloneOptions {
        recurse_submodules: true,
        max_depth: Some(config.submodules.max_depth),
        transport: config.transport.clone(),
        ..CloneOptions::default()
    };
    repository::clone(origin.to_str().unwrap(), base.join(dest), &options).unwrap()
}

#[test]
fn test_configured_depth_bounds_recursive_clone() {
    let temp = TempDir::new().unwrap();
    git::nested_submodule_tree(temp.path());

    let config_path = temp.path().join("porcelain.toml");
    fs::write(&config_path, "[submodules]\nmax_depth = 0\n").unwrap();
    let config = PorcelainConfig::load(Some(&config_path), None).unwrap();
    assert_eq!(config.submodules.max_depth, 0);

    let repo = clone_with(&config, temp.path(), "shallow");

    assert_eq!(names(&submodule::walk(&repo, 3).unwrap()), vec!["libA", "libB"]);
    assert!(!temp.path().join("shallow/libB/libC/README.md").exists());
}

#[test]
fn test_default_config_clones_every_level() {
    let temp = TempDir::new().unwrap();
    git::nested_submodule_tree(temp.path());

    let config = PorcelainConfig::default();
    let repo = clone_with(&config, temp.path(), "full");

    let walked = submodule::walk(&repo, config.submodules.max_depth).unwrap();
    assert_eq!(names(&walked), vec!["libA", "libB", "libC"]);
}

#[test]
fn test_clean_inside_walked_submodule() {
    let temp = TempDir::new().unwrap();
    let root = git::nested_submodule_tree(temp.path());
    let repo = Repository::open(&root).unwrap();

    let lib_c = root.join("libB").join("libC");
    fs::create_dir_all(lib_c.join("target/debug")).unwrap();
    fs::write(lib_c.join("target/debug/app"), "bin").unwrap();
    fs::write(lib_c.join("scratch.txt"), "x").unwrap();

    let walked = submodule::walk(&repo, 3).unwrap();
    let deepest = walked.last().unwrap();

    let removed = clean(deepest, &CleanOptions::new().directories(true)).unwrap();

    let expected: Vec<String> = vec!["scratch.txt".into(), "target/".into()];
    assert_eq!(removed.into_iter().collect::<Vec<_>>(), expected);
    assert!(!lib_c.join("target").exists());
    assert!(lib_c.join("README.md").exists());
}

#[test]
fn test_superproject_clean_leaves_submodules_alone() {
    let temp = TempDir::new().unwrap();
    let root = git::nested_submodule_tree(temp.path());
    let repo = Repository::open(&root).unwrap();
    fs::write(root.join("libA").join("local.txt"), "keep").unwrap();
    fs::write(root.join("top.txt"), "remove").unwrap();

    let removed = clean(&repo, &CleanOptions::new().directories(true).force(true)).unwrap();

    assert_eq!(removed.into_iter().collect::<Vec<_>>(), vec!["top.txt".to_string()]);
    assert!(root.join("libA").join("local.txt").exists());
}
