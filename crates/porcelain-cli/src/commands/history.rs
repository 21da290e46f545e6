//! Staging, committing, history and merge commands

use colored::Colorize;
use git2::Repository;
use porcelain_git::commits::{self, ChangeKind, CommitOptions};
use porcelain_git::{MergeOutcome, merge};

use crate::error::Result;

pub fn run_add(repo: &Repository, paths: &[String]) -> Result<()> {
    commits::add(repo, paths)?;
    println!("{} Staged {} pathspec(s).", "OK".green().bold(), paths.len());
    Ok(())
}

pub fn run_commit(repo: &Repository, message: &str, options: CommitOptions) -> Result<()> {
    let oid = commits::commit(repo, message, options)?;
    let summary = message.lines().next().unwrap_or("");
    println!(
        "{} [{}] {}",
        "OK".green().bold(),
        format!("{oid:.7}").yellow(),
        summary
    );
    Ok(())
}

pub fn run_log(repo: &Repository, branch: Option<&str>, max_count: usize) -> Result<()> {
    for commit in commits::log(repo, branch, max_count)? {
        println!(
            "{} {} {} {}",
            commit.hash.yellow(),
            commit.timestamp.format("%Y-%m-%d").to_string().dimmed(),
            commit.author.cyan(),
            commit.message
        );
    }
    Ok(())
}

fn kind_label(kind: ChangeKind) -> &'static str {
    match kind {
        ChangeKind::Added => "added",
        ChangeKind::Modified => "modified",
        ChangeKind::Deleted => "deleted",
        ChangeKind::Renamed => "renamed",
        ChangeKind::TypeChange => "typechange",
        ChangeKind::Untracked => "untracked",
        ChangeKind::Conflicted => "conflicted",
    }
}

pub fn run_status(repo: &Repository) -> Result<()> {
    if let Some(branch) = porcelain_git::branches::current_branch(repo).ok().flatten() {
        println!("On branch {}", branch.cyan());
    }

    let entries = commits::status(repo)?;
    if entries.is_empty() {
        println!("{} Working tree clean.", "OK".green().bold());
        return Ok(());
    }

    for entry in entries {
        let label = format!("{:>11}", kind_label(entry.kind));
        let label = if entry.staged {
            label.green()
        } else {
            label.red()
        };
        println!("{} {}", label, entry.path);
    }
    Ok(())
}

pub fn run_merge(repo: &Repository, branch: &str) -> Result<()> {
    println!("{} Merging {}...", "=>".blue().bold(), branch.cyan());
    match merge::merge(repo, branch)? {
        MergeOutcome::UpToDate => println!("{} Already up to date.", "OK".green().bold()),
        MergeOutcome::FastForward => println!("{} Fast-forwarded.", "OK".green().bold()),
        MergeOutcome::Merged(oid) => println!(
            "{} Created merge commit {}",
            "OK".green().bold(),
            format!("{oid:.7}").yellow()
        ),
    }
    Ok(())
}
