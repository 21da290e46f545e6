//! Submodule command implementations

use colored::Colorize;
use porcelain_fs::NormalizedPath;
use porcelain_git::submodule;

use crate::cli::SubmoduleAction;
use crate::context::Context;
use crate::error::Result;

pub fn run_submodule(ctx: &Context, action: SubmoduleAction) -> Result<()> {
    let configured_depth = ctx.config.submodules.max_depth;
    let transport = &ctx.config.transport;

    match action {
        SubmoduleAction::List => run_list(ctx),
        SubmoduleAction::Init { max_depth } => {
            println!("{} Initializing submodules...", "=>".blue().bold());
            let touched = submodule::init_all(&ctx.repo, max_depth.unwrap_or(configured_depth))?;
            report("Initialized", &touched);
            Ok(())
        }
        SubmoduleAction::Sync { max_depth } => {
            println!("{} Syncing submodule URLs...", "=>".blue().bold());
            let touched = submodule::sync_all(&ctx.repo, max_depth.unwrap_or(configured_depth))?;
            report("Synced", &touched);
            Ok(())
        }
        SubmoduleAction::Update { path, max_depth } => {
            let scope_display = path.as_deref().unwrap_or("all submodules");
            println!(
                "{} Updating {}...",
                "=>".blue().bold(),
                scope_display.cyan()
            );
            let touched = submodule::update_all(
                &ctx.repo,
                path.as_deref(),
                max_depth.unwrap_or(configured_depth),
                transport,
            )?;
            report("Updated", &touched);
            Ok(())
        }
        SubmoduleAction::Fetch { max_depth } => {
            println!("{} Fetching submodule remotes...", "=>".blue().bold());
            let fetched =
                submodule::fetch_all(&ctx.repo, max_depth.unwrap_or(configured_depth), transport)?;
            report("Fetched", &fetched);
            Ok(())
        }
        SubmoduleAction::Add { url, path } => {
            println!(
                "{} Adding submodule {} at {}...",
                "=>".blue().bold(),
                url.cyan(),
                path.yellow()
            );
            submodule::add(&ctx.repo, &url, &path, transport)?;
            println!("{} Submodule {} added.", "OK".green().bold(), path.cyan());
            Ok(())
        }
    }
}

fn run_list(ctx: &Context) -> Result<()> {
    let entries = submodule::list(&ctx.repo)?;
    if entries.is_empty() {
        println!("No submodules.");
        return Ok(());
    }

    for status in entries {
        let marker = if status.checked_out {
            "+".green()
        } else {
            "-".red()
        };
        let url = status.entry.url.as_deref().unwrap_or("(no url)");
        println!("{} {} {}", marker, status.entry.path.cyan(), url.dimmed());
    }
    Ok(())
}

fn report(verb: &str, paths: &[NormalizedPath]) {
    for path in paths {
        println!("  {} {}", verb, path.as_str().yellow());
    }
    println!(
        "{} {} {} submodule(s).",
        "OK".green().bold(),
        verb,
        paths.len()
    );
}
