//! Depth-bounded submodule discovery.

use crate::Result;
use crate::engine::SubmoduleSource;

/// How many levels of nested submodules [`walk`] descends by default.
pub const DEFAULT_MAX_DEPTH: usize = 3;

/// Collect every checked-out submodule below `repo`, depth-first.
///
/// Level 0 is `repo` itself. Submodules found at level `n` are opened and
/// their own submodules are queried while `n < max_depth`, so the result
/// holds repositories from levels `1..=max_depth`. Entries that are not
/// checked out are skipped.
///
/// The depth bound is what terminates the walk on a cyclic `.gitmodules`;
/// no identity tracking is done, so a cycle yields the same repository
/// several times.
pub fn walk<R: SubmoduleSource>(repo: &R, max_depth: usize) -> Result<Vec<R>> {
    let mut found = Vec::new();
    walk_level(repo, 0, max_depth, &mut found)?;
    Ok(found)
}

fn walk_level<R: SubmoduleSource>(
    repo: &R,
    depth: usize,
    max_depth: usize,
    found: &mut Vec<R>,
) -> Result<()> {
    if depth >= max_depth {
        return Ok(());
    }

    let entries = repo.submodule_entries()?;
    tracing::debug!(depth, count = entries.len(), "Walking submodule level");

    for entry in &entries {
        let Some(child) = repo.open_submodule(entry) else {
            tracing::debug!(submodule = %entry.path, "Submodule not checked out, skipping");
            continue;
        };

        let mut nested = Vec::new();
        walk_level(&child, depth + 1, max_depth, &mut nested)?;
        found.push(child);
        found.extend(nested);
    }

    Ok(())
}
