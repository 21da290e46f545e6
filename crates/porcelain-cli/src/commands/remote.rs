//! Network command implementations (clone, fetch, push, pull)

use std::path::Path;

use colored::Colorize;
use git2::Repository;
use porcelain_git::remote::{self, PullOutcome};
use porcelain_git::repository::{self, CloneOptions};
use porcelain_git::PorcelainConfig;

use crate::error::{CliError, Result};

const DEFAULT_REMOTE: &str = "origin";

pub fn run_clone(
    config: &PorcelainConfig,
    url: &str,
    dest: &Path,
    branch: Option<String>,
    recursive: bool,
) -> Result<()> {
    if dest.read_dir().is_ok_and(|mut entries| entries.next().is_some()) {
        return Err(CliError::user(format!(
            "destination {} already exists and is not empty",
            dest.display()
        )));
    }

    println!(
        "{} Cloning {} into {}...",
        "=>".blue().bold(),
        url.cyan(),
        dest.display().to_string().yellow()
    );

    let options = CloneOptions {
        branch,
        recurse_submodules: recursive,
        max_depth: Some(config.submodules.max_depth),
        transport: config.transport.clone(),
        ..CloneOptions::default()
    };
    repository::clone(url, dest, &options)?;

    println!("{} Cloned {}", "OK".green().bold(), url.cyan());
    Ok(())
}

pub fn run_fetch(repo: &Repository, config: &PorcelainConfig, remote: Option<&str>) -> Result<()> {
    let remote_name = remote.unwrap_or(DEFAULT_REMOTE);
    println!("{} Fetching {}...", "=>".blue().bold(), remote_name.yellow());
    remote::fetch(repo, remote, &config.transport)?;
    println!("{} Fetched {}", "OK".green().bold(), remote_name.yellow());
    Ok(())
}

pub fn run_push(
    repo: &Repository,
    config: &PorcelainConfig,
    remote: Option<&str>,
    branch: Option<&str>,
) -> Result<()> {
    let remote_name = remote.unwrap_or(DEFAULT_REMOTE);
    let branch_display = branch.unwrap_or("current branch");

    println!(
        "{} Pushing {} to {}...",
        "=>".blue().bold(),
        branch_display.cyan(),
        remote_name.yellow()
    );
    remote::push(repo, remote, branch, &config.transport)?;
    println!(
        "{} Successfully pushed to {}",
        "OK".green().bold(),
        remote_name.yellow()
    );
    Ok(())
}

pub fn run_pull(
    repo: &Repository,
    config: &PorcelainConfig,
    remote: Option<&str>,
    branch: Option<&str>,
) -> Result<()> {
    let remote_name = remote.unwrap_or(DEFAULT_REMOTE);
    let branch_display = branch.unwrap_or("current branch");

    println!(
        "{} Pulling {} from {}...",
        "=>".blue().bold(),
        branch_display.cyan(),
        remote_name.yellow()
    );
    match remote::pull(repo, remote, branch, &config.transport)? {
        PullOutcome::UpToDate => println!("{} Already up to date.", "OK".green().bold()),
        PullOutcome::FastForward => println!(
            "{} Fast-forwarded from {}",
            "OK".green().bold(),
            remote_name.yellow()
        ),
    }
    Ok(())
}
