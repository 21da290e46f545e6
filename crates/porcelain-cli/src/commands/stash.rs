//! Stash command implementations

use colored::Colorize;
use git2::Repository;
use porcelain_git::stash;

use crate::cli::StashAction;
use crate::error::Result;

pub fn run_stash(repo: &mut Repository, action: StashAction) -> Result<()> {
    match action {
        StashAction::Save {
            message,
            include_untracked,
        } => {
            let oid = stash::stash_save(repo, message.as_deref(), include_untracked)?;
            println!(
                "{} Saved working directory as {}",
                "OK".green().bold(),
                format!("{oid:.7}").yellow()
            );
        }
        StashAction::List => {
            for entry in stash::stash_list(repo)? {
                println!(
                    "{} {}",
                    format!("stash@{{{}}}:", entry.index).yellow(),
                    entry.message
                );
            }
        }
        StashAction::Apply { index } => {
            stash::stash_apply(repo, index)?;
            println!("{} Applied stash@{{{index}}}", "OK".green().bold());
        }
        StashAction::Pop { index } => {
            stash::stash_pop(repo, index)?;
            println!("{} Popped stash@{{{index}}}", "OK".green().bold());
        }
        StashAction::Drop { index } => {
            stash::stash_drop(repo, index)?;
            println!("{} Dropped stash@{{{index}}}", "OK".green().bold());
        }
        StashAction::Clear => {
            let dropped = stash::stash_clear(repo)?;
            println!("{} Dropped {} stash entries", "OK".green().bold(), dropped);
        }
    }
    Ok(())
}
