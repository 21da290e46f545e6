//! Porcelain CLI
//!
//! Everyday git operations, with submodule commands that recurse through
//! nested submodules and a clean that can force stubborn directories.

mod cli;
mod commands;
mod context;
mod error;
mod logging;

use std::path::{Path, PathBuf};

use clap::Parser;
use colored::Colorize;
use porcelain_git::commits::CommitOptions;

use cli::{Cli, Commands};
use commands::CleanFlags;
use context::Context;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    tracing::debug!("Verbose mode enabled");

    let cwd = match &cli.directory {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()?,
    };

    match cli.command {
        Some(cmd) => execute_command(cmd, &cwd, cli.config.as_deref()),
        None => {
            println!("{} git porcelain", "porcelain".green().bold());
            println!();
            println!("Run {} for available commands.", "porcelain --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(cmd: Commands, cwd: &Path, config_path: Option<&Path>) -> Result<()> {
    let discover = || Context::discover(cwd, config_path);

    match cmd {
        Commands::Clean {
            directories,
            force,
            include_ignored,
            dry_run,
            paths,
        } => {
            let flags = CleanFlags {
                directories,
                force,
                include_ignored,
                dry_run,
                paths,
            };
            commands::run_clean(&discover()?, &flags)
        }
        Commands::Submodule { action } => commands::run_submodule(&discover()?, action),
        Commands::Stash { action } => commands::run_stash(&mut discover()?.repo, action),
        Commands::Branch { action } => commands::run_branch(&discover()?.repo, action),
        Commands::Add { paths } => commands::run_add(&discover()?.repo, &paths),
        Commands::Commit {
            message,
            amend,
            allow_empty,
        } => commands::run_commit(
            &discover()?.repo,
            &message,
            CommitOptions { amend, allow_empty },
        ),
        Commands::Log { max_count, branch } => {
            commands::run_log(&discover()?.repo, branch.as_deref(), max_count)
        }
        Commands::Status => commands::run_status(&discover()?.repo),
        Commands::Merge { branch } => commands::run_merge(&discover()?.repo, &branch),
        Commands::Clone {
            url,
            dest,
            branch,
            recursive,
        } => {
            // Runs outside any repository
            let config = Context::config_only(config_path)?;
            commands::run_clone(&config, &url, &resolve(cwd, dest), branch, recursive)
        }
        Commands::Fetch { remote } => {
            let ctx = discover()?;
            commands::run_fetch(&ctx.repo, &ctx.config, remote.as_deref())
        }
        Commands::Push { remote, branch } => {
            let ctx = discover()?;
            commands::run_push(&ctx.repo, &ctx.config, remote.as_deref(), branch.as_deref())
        }
        Commands::Pull { remote, branch } => {
            let ctx = discover()?;
            commands::run_pull(&ctx.repo, &ctx.config, remote.as_deref(), branch.as_deref())
        }
    }
}

fn resolve(cwd: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}
