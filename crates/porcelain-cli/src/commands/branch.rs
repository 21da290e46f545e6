//! Branch command implementations

use colored::Colorize;
use git2::Repository;
use porcelain_git::branches;

use crate::cli::BranchAction;
use crate::error::Result;

pub fn run_branch(repo: &Repository, action: BranchAction) -> Result<()> {
    match action {
        BranchAction::List => {
            for branch in branches::list_branches(repo)? {
                let upstream = branch
                    .upstream
                    .map(|u| format!(" [{u}]").dimmed().to_string())
                    .unwrap_or_default();
                if branch.is_head {
                    println!("{} {}{}", "*".green().bold(), branch.name.green(), upstream);
                } else {
                    println!("  {}{}", branch.name, upstream);
                }
            }
        }
        BranchAction::Create { name, base, force } => {
            let base_display = base.as_deref().unwrap_or("HEAD");
            println!(
                "{} Creating branch {} (from {})...",
                "=>".blue().bold(),
                name.cyan(),
                base_display.yellow()
            );
            branches::create_branch(repo, &name, base.as_deref(), force)?;
            println!("{} Branch {} created.", "OK".green().bold(), name.cyan());
        }
        BranchAction::Delete { name } => {
            branches::delete_branch(repo, &name)?;
            println!("{} Branch {} deleted.", "OK".green().bold(), name.cyan());
        }
        BranchAction::Checkout { name } => {
            branches::checkout(repo, &name)?;
            println!("{} Switched to branch {}", "OK".green().bold(), name.cyan());
        }
    }
    Ok(())
}
