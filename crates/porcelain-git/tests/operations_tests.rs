//! Merge, remote and stash operations against real repositories.

use std::fs;

use git2::Repository;
use porcelain_git::merge::{MergeOutcome, merge};
use porcelain_git::remote::{self, PullOutcome};
use porcelain_git::{Error, TransportConfig, branches, stash};
use porcelain_test_utils::git;
use porcelain_test_utils::repo::TestRepo;

#[test]
fn test_push_without_remote() {
    let repo = TestRepo::with_commit();

    let result = remote::push(&repo.open(), None, None, &TransportConfig::default());

    let err = result.unwrap_err();
    assert!(
        matches!(err, Error::RemoteNotFound { ref name } if name == "origin"),
        "Expected 'Remote not found' error, got: {err}"
    );
}

#[test]
fn test_pull_named_remote_not_found() {
    let repo = TestRepo::with_commit();

    let result = remote::pull(&repo.open(), Some("upstream"), None, &TransportConfig::default());

    assert!(result.unwrap_err().to_string().contains("upstream"));
}

#[test]
fn test_pull_fast_forwards_from_origin() {
    let temp = tempfile::TempDir::new().unwrap();
    let origin = temp.path().join("origin");
    let local = temp.path().join("local");
    git::real_git_repo_with_commit(&origin);
    git::git(
        temp.path(),
        &["clone", origin.to_str().unwrap(), local.to_str().unwrap()],
    );

    fs::write(origin.join("new.txt"), "upstream change").unwrap();
    git::commit_all(&origin, "Upstream commit");

    let repo = Repository::open(&local).unwrap();
    let outcome = remote::pull(&repo, None, None, &TransportConfig::default()).unwrap();

    assert_eq!(outcome, PullOutcome::FastForward);
    assert!(local.join("new.txt").exists());

    let again = remote::pull(&repo, None, None, &TransportConfig::default()).unwrap();
    assert_eq!(again, PullOutcome::UpToDate);
}

/// An origin with a `topic` branch and a clone of it, both on `main`.
fn origin_and_clone(base: &std::path::Path) -> (std::path::PathBuf, std::path::PathBuf) {
    let origin = base.join("origin");
    let local = base.join("local");
    git::real_git_repo_with_commit(&origin);
    git::git(&origin, &["branch", "topic"]);
    git::git(base, &["clone", origin.to_str().unwrap(), local.to_str().unwrap()]);
    git::git(&local, &["branch", "topic", "origin/topic"]);
    git::git(&local, &["config", "user.email", "test@test.com"]);
    git::git(&local, &["config", "user.name", "Test User"]);
    git::git(&local, &["config", "commit.gpgsign", "false"]);
    (origin, local)
}

fn branch_tip(repo: &Repository, name: &str) -> git2::Oid {
    repo.find_reference(&format!("refs/heads/{name}"))
        .unwrap()
        .target()
        .unwrap()
}

#[test]
fn test_pull_keeps_unrelated_local_edits() {
    let temp = tempfile::TempDir::new().unwrap();
    let (origin, local) = origin_and_clone(temp.path());
    fs::write(origin.join("other.txt"), "upstream").unwrap();
    git::commit_all(&origin, "Upstream commit");
    fs::write(local.join("README.md"), "local edit").unwrap();

    let repo = Repository::open(&local).unwrap();
    let outcome = remote::pull(&repo, None, None, &TransportConfig::default()).unwrap();

    assert_eq!(outcome, PullOutcome::FastForward);
    assert!(local.join("other.txt").exists());
    assert_eq!(fs::read_to_string(local.join("README.md")).unwrap(), "local edit");
}

#[test]
fn test_pull_refuses_to_overwrite_local_edits() {
    let temp = tempfile::TempDir::new().unwrap();
    let (origin, local) = origin_and_clone(temp.path());
    fs::write(origin.join("README.md"), "upstream").unwrap();
    git::commit_all(&origin, "Upstream edit");
    fs::write(local.join("README.md"), "local edit").unwrap();

    let repo = Repository::open(&local).unwrap();
    let before = branch_tip(&repo, "main");
    let result = remote::pull(&repo, None, None, &TransportConfig::default());

    assert!(
        matches!(result, Err(Error::LocalChangesOverwritten { .. })),
        "Expected local changes error, got: {result:?}"
    );
    assert_eq!(fs::read_to_string(local.join("README.md")).unwrap(), "local edit");
    assert_eq!(branch_tip(&repo, "main"), before);
}

#[test]
fn test_pull_other_branch_refuses_divergence() {
    let temp = tempfile::TempDir::new().unwrap();
    let (origin, local) = origin_and_clone(temp.path());
    git::git(&origin, &["checkout", "topic"]);
    fs::write(origin.join("topic.txt"), "upstream").unwrap();
    git::commit_all(&origin, "Upstream topic commit");
    git::git(&origin, &["checkout", "main"]);
    git::git(&local, &["checkout", "topic"]);
    fs::write(local.join("local.txt"), "local").unwrap();
    git::commit_all(&local, "Local topic commit");
    git::git(&local, &["checkout", "main"]);

    let repo = Repository::open(&local).unwrap();
    let topic_before = branch_tip(&repo, "topic");
    let main_before = branch_tip(&repo, "main");
    let result = remote::pull(&repo, None, Some("topic"), &TransportConfig::default());

    assert!(
        matches!(result, Err(Error::CannotFastForward { .. })),
        "Expected fast-forward refusal, got: {result:?}"
    );
    assert_eq!(branch_tip(&repo, "topic"), topic_before);
    assert_eq!(branch_tip(&repo, "main"), main_before);
}

#[test]
fn test_pull_other_branch_leaves_worktree_alone() {
    let temp = tempfile::TempDir::new().unwrap();
    let (origin, local) = origin_and_clone(temp.path());
    git::git(&origin, &["checkout", "topic"]);
    fs::write(origin.join("topic.txt"), "upstream").unwrap();
    git::commit_all(&origin, "Upstream topic commit");
    git::git(&origin, &["checkout", "main"]);
    let upstream_tip = branch_tip(&Repository::open(&origin).unwrap(), "topic");

    let repo = Repository::open(&local).unwrap();
    let outcome = remote::pull(&repo, None, Some("topic"), &TransportConfig::default()).unwrap();

    assert_eq!(outcome, PullOutcome::FastForward);
    assert_eq!(branch_tip(&repo, "topic"), upstream_tip);
    assert_eq!(branches::current_branch(&repo).unwrap().as_deref(), Some("main"));
    assert!(!local.join("topic.txt").exists());
}

#[test]
fn test_push_to_bare_remote() {
    let temp = tempfile::TempDir::new().unwrap();
    let bare = temp.path().join("remote.git");
    git2::Repository::init_bare(&bare).unwrap();

    let repo = TestRepo::with_commit();
    repo.git(&["remote", "add", "origin", bare.to_str().unwrap()]);

    remote::push(&repo.open(), None, Some("main"), &TransportConfig::default()).unwrap();

    let remote_repo = Repository::open_bare(&bare).unwrap();
    assert!(remote_repo.find_reference("refs/heads/main").is_ok());
}

#[test]
fn test_merge_branch_not_found() {
    let repo = TestRepo::with_commit();

    let result = merge(&repo.open(), "nonexistent-branch");

    assert!(matches!(result, Err(Error::BranchNotFound { ref name }) if name == "nonexistent-branch"));
}

#[test]
fn test_merge_fast_forward() {
    let repo = TestRepo::with_commit();
    repo.git(&["checkout", "-b", "feature"]);
    repo.write("feature.txt", "Feature content");
    repo.commit_all("Feature commit");
    repo.git(&["checkout", "main"]);

    let outcome = merge(&repo.open(), "feature").unwrap();

    assert_eq!(outcome, MergeOutcome::FastForward);
    repo.assert_file_exists("feature.txt");
}

#[test]
fn test_merge_fast_forward_refuses_to_overwrite_local_edits() {
    let repo = TestRepo::with_commit();
    repo.git(&["checkout", "-b", "feature"]);
    repo.write("README.md", "feature side");
    repo.commit_all("Feature edit");
    repo.git(&["checkout", "main"]);
    repo.write("README.md", "uncommitted");

    let opened = repo.open();
    let before = opened.head().unwrap().target().unwrap();
    let result = merge(&opened, "feature");

    assert!(matches!(result, Err(Error::LocalChangesOverwritten { .. })));
    assert_eq!(fs::read_to_string(repo.root().join("README.md")).unwrap(), "uncommitted");
    assert_eq!(opened.head().unwrap().target().unwrap(), before);
}

#[test]
fn test_merge_already_up_to_date() {
    let repo = TestRepo::with_commit();
    repo.git(&["branch", "feature"]);

    assert_eq!(merge(&repo.open(), "feature").unwrap(), MergeOutcome::UpToDate);
}

#[test]
fn test_merge_creates_merge_commit_for_diverged_branches() {
    let repo = TestRepo::with_commit();
    repo.git(&["checkout", "-b", "feature"]);
    repo.write("feature.txt", "feature");
    repo.commit_all("Feature commit");
    repo.git(&["checkout", "main"]);
    repo.write("main.txt", "main");
    repo.commit_all("Main commit");

    let outcome = merge(&repo.open(), "feature").unwrap();

    assert!(matches!(outcome, MergeOutcome::Merged(_)));
    repo.assert_file_exists("feature.txt");
    repo.assert_file_exists("main.txt");
    let opened = repo.open();
    let head = opened.head().unwrap().peel_to_commit().unwrap();
    assert_eq!(head.parent_count(), 2);
}

#[test]
fn test_merge_conflict_is_reported() {
    let repo = TestRepo::with_commit();
    repo.git(&["checkout", "-b", "feature"]);
    repo.write("README.md", "feature side");
    repo.commit_all("Feature edit");
    repo.git(&["checkout", "main"]);
    repo.write("README.md", "main side");
    repo.commit_all("Main edit");

    let result = merge(&repo.open(), "feature");

    assert!(matches!(result, Err(Error::MergeConflict { .. })));
}

#[test]
fn test_stash_round_trip() {
    let repo = TestRepo::with_commit();
    repo.write("README.md", "dirty");
    let mut handle = repo.open();

    stash::stash_save(&mut handle, Some("wip readme"), false).unwrap();
    assert_eq!(fs::read_to_string(repo.root().join("README.md")).unwrap(), "# Test");

    let entries = stash::stash_list(&mut handle).unwrap();
    assert_eq!(entries.len(), 1);
    assert!(entries[0].message.contains("wip readme"));

    stash::stash_pop(&mut handle, 0).unwrap();
    assert_eq!(fs::read_to_string(repo.root().join("README.md")).unwrap(), "dirty");
    assert!(stash::stash_list(&mut handle).unwrap().is_empty());
}

#[test]
fn test_stash_untracked_only_when_requested() {
    let repo = TestRepo::with_commit();
    repo.write("new.txt", "untracked");
    let mut handle = repo.open();

    assert!(matches!(
        stash::stash_save(&mut handle, None, false),
        Err(Error::NothingToStash)
    ));

    stash::stash_save(&mut handle, None, true).unwrap();
    repo.assert_file_not_exists("new.txt");
}

#[test]
fn test_stash_unknown_index() {
    let repo = TestRepo::with_commit();
    let mut handle = repo.open();

    assert!(matches!(
        stash::stash_apply(&mut handle, 3),
        Err(Error::StashNotFound { index: 3 })
    ));
    assert!(matches!(
        stash::stash_drop(&mut handle, 0),
        Err(Error::StashNotFound { index: 0 })
    ));
}

#[test]
fn test_stash_clear_drops_everything() {
    let repo = TestRepo::with_commit();
    let mut handle = repo.open();
    for content in ["one", "two"] {
        repo.write("README.md", content);
        stash::stash_save(&mut handle, None, false).unwrap();
    }

    assert_eq!(stash::stash_clear(&mut handle).unwrap(), 2);
    assert!(stash::stash_list(&mut handle).unwrap().is_empty());
}

#[test]
fn test_branch_checkout_then_log_per_branch() {
    let repo = TestRepo::with_commit();
    let handle = repo.open();
    branches::create_branch(&handle, "topic", Some("main"), false).unwrap();
    branches::checkout(&handle, "topic").unwrap();
    repo.write("topic.txt", "t");
    repo.commit_all("Topic work");

    let topic = porcelain_git::commits::log(&handle, Some("topic"), 10).unwrap();
    let main = porcelain_git::commits::log(&handle, Some("main"), 10).unwrap();

    assert_eq!(topic.len(), 2);
    assert_eq!(main.len(), 1);
    assert!(matches!(
        branches::create_branch(&handle, "other", Some("missing"), false),
        Err(Error::BranchNotFound { .. })
    ));
}
