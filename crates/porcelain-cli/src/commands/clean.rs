//! Clean command implementation

use colored::Colorize;
use porcelain_git::{CleanOptions, clean};

use crate::context::Context;
use crate::error::Result;

/// Command-line overrides for the configured clean defaults.
#[derive(Debug, Clone, Default)]
pub struct CleanFlags {
    pub directories: bool,
    pub force: bool,
    pub include_ignored: bool,
    pub dry_run: bool,
    pub paths: Vec<String>,
}

impl CleanFlags {
    /// Flags can only widen what the configuration allows.
    pub fn apply(&self, base: CleanOptions) -> CleanOptions {
        let directories = base.remove_untracked_dirs || self.directories;
        let force = base.force_non_empty_dirs || self.force;
        let ignore_excluded = base.ignore_excluded && !self.include_ignored;
        base.directories(directories)
            .force(force)
            .ignore_excluded(ignore_excluded)
            .dry_run(self.dry_run)
            .paths(self.paths.iter().cloned())
    }
}

pub fn run_clean(ctx: &Context, flags: &CleanFlags) -> Result<()> {
    let options = flags.apply(ctx.config.clean.to_options());

    if options.dry_run {
        println!("{} Dry run: nothing will be removed", "=>".blue().bold());
    }

    let removed = clean(&ctx.repo, &options)?;

    let verb = if options.dry_run { "Would remove" } else { "Removed" };
    for path in &removed {
        println!("  {} {}", verb, path.yellow());
    }

    if removed.is_empty() {
        println!("{} Nothing to clean.", "OK".green().bold());
    } else {
        println!(
            "{} {} {} path(s).",
            "OK".green().bold(),
            verb,
            removed.len()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_widen_config_defaults() {
        let flags = CleanFlags {
            directories: true,
            include_ignored: true,
            paths: vec!["build/".to_string()],
            ..CleanFlags::default()
        };

        let options = flags.apply(CleanOptions::new().force(true));

        assert!(options.remove_untracked_dirs);
        assert!(options.force_non_empty_dirs);
        assert!(!options.ignore_excluded);
        assert_eq!(options.paths, vec!["build/".to_string()]);
    }

    #[test]
    fn no_flags_keep_config() {
        let options = CleanFlags::default().apply(CleanOptions::new());
        assert_eq!(options, CleanOptions::new());
    }
}
