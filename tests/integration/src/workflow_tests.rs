//! Day-to-day workflows spanning several operations
//!
//! Each test plays a short developer session against real repositories:
//! branch, commit, merge, share through a bare remote, stash.

use std::fs;
use std::path::Path;

use git2::Repository;
use porcelain_git::commits::{self, ChangeKind, CommitOptions};
use porcelain_git::merge::{MergeOutcome, merge};
use porcelain_git::remote::{self, PullOutcome};
use porcelain_git::repository::{self, CloneOptions};
use porcelain_git::{TransportConfig, branches, stash};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn configure(repo: &Repository) {
    let mut config = repo.config().unwrap();
    config.set_str("user.name", "Workflow User").unwrap();
    config.set_str("user.email", "workflow@example.com").unwrap();
}

fn write_and_commit(repo: &Repository, file: &str, content: &str, message: &str) {
    let root = repo.workdir().unwrap();
    fs::write(root.join(file), content).unwrap();
    commits::add(repo, &[file]).unwrap();
    commits::commit(repo, message, CommitOptions::default()).unwrap();
}

/// A bare remote seeded with one commit on `main`, plus a path for clones.
fn seeded_remote(base: &Path) -> String {
    let seed_path = base.join("seed");
    let seed = repository::init(&seed_path, false).unwrap();
    configure(&seed);
    seed.set_head("refs/heads/main").unwrap();
    write_and_commit(&seed, "README.md", "# shared", "Initial commit");

    let remote_path = base.join("remote.git");
    repository::clone(
        seed_path.to_str().unwrap(),
        &remote_path,
        &CloneOptions {
            bare: true,
            ..CloneOptions::default()
        },
    )
    .unwrap();
    remote_path.to_str().unwrap().to_string()
}

fn clone_configured(url: &str, dest: &Path) -> Repository {
    let repo = repository::clone(url, dest, &CloneOptions::default()).unwrap();
    configure(&repo);
    repo
}

#[test]
fn test_feature_branch_merged_back() {
    let temp = TempDir::new().unwrap();
    let repo = repository::init(temp.path(), false).unwrap();
    configure(&repo);
    repo.set_head("refs/heads/main").unwrap();
    write_and_commit(&repo, "README.md", "# app", "Initial commit");

    branches::create_branch(&repo, "feature", None, false).unwrap();
    branches::checkout(&repo, "feature").unwrap();
    write_and_commit(&repo, "feature.txt", "feature", "Add feature");

    branches::checkout(&repo, "main").unwrap();
    assert!(!temp.path().join("feature.txt").exists());

    let outcome = merge(&repo, "feature").unwrap();

    assert_eq!(outcome, MergeOutcome::FastForward);
    assert!(temp.path().join("feature.txt").exists());
    let history = commits::log(&repo, None, 10).unwrap();
    assert_eq!(history[0].message, "Add feature");

    branches::delete_branch(&repo, "feature").unwrap();
    let remaining: Vec<String> = branches::list_branches(&repo)
        .unwrap()
        .into_iter()
        .map(|b| b.name)
        .collect();
    assert_eq!(remaining, vec!["main".to_string()]);
}

#[test]
fn test_two_clones_share_through_bare_remote() {
    let temp = TempDir::new().unwrap();
    let url = seeded_remote(temp.path());
    let transport = TransportConfig::default();

    let alice = clone_configured(&url, &temp.path().join("alice"));
    let bob = clone_configured(&url, &temp.path().join("bob"));

    write_and_commit(&alice, "notes.txt", "from alice", "Alice's notes");
    remote::push(&alice, None, None, &transport).unwrap();

    let outcome = remote::pull(&bob, None, None, &transport).unwrap();

    assert_eq!(outcome, PullOutcome::FastForward);
    assert_eq!(
        fs::read_to_string(temp.path().join("bob/notes.txt")).unwrap(),
        "from alice"
    );
    assert_eq!(commits::log(&bob, None, 1).unwrap()[0].message, "Alice's notes");
}

#[test]
fn test_stash_around_pull() {
    let temp = TempDir::new().unwrap();
    let url = seeded_remote(temp.path());
    let transport = TransportConfig::default();

    let upstream = clone_configured(&url, &temp.path().join("upstream"));
    let mut local = clone_configured(&url, &temp.path().join("local"));

    write_and_commit(&upstream, "upstream.txt", "new", "Upstream change");
    remote::push(&upstream, None, None, &transport).unwrap();

    fs::write(temp.path().join("local/README.md"), "# local edit").unwrap();
    stash::stash_save(&mut local, Some("local edit"), false).unwrap();
    assert!(commits::status(&local).unwrap().is_empty());

    remote::pull(&local, None, None, &transport).unwrap();
    stash::stash_pop(&mut local, 0).unwrap();

    let changes = commits::status(&local).unwrap();
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].path, "README.md");
    assert_eq!(changes[0].kind, ChangeKind::Modified);
    assert!(temp.path().join("local/upstream.txt").exists());
    assert!(stash::stash_list(&mut local).unwrap().is_empty());
}
