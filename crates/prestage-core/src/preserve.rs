use crate::model::RepositoryDescriptor;
use crate::vcs::{RestoreOutcome, StashHandle, VersionControl};
use anyhow::Context;
use tracing::{info, warn};

/// Snapshots uncommitted changes before an update is attempted. Returns the
/// snapshot handle when something was set aside, `None` for a clean tree.
pub fn set_aside_if_dirty(
    vcs: &dyn VersionControl,
    descriptor: &RepositoryDescriptor,
) -> anyhow::Result<Option<StashHandle>> {
    let dirty = vcs
        .has_local_changes(&descriptor.local_path)
        .context("check for local changes")?;
    if !dirty {
        return Ok(None);
    }
    let label = format!("prestage:{}", descriptor.name);
    info!(repo = %descriptor.name, "setting aside uncommitted local changes");
    let handle = vcs
        .set_aside_changes(&descriptor.local_path, &label)
        .context("set aside local changes")?;
    Ok(Some(handle))
}

/// Reapplies a set-aside snapshot after the update attempt. A clean tree
/// (nothing was set aside) reports `Clean`. On conflict the snapshot stays
/// put and the caller must flag the repository for the operator.
pub fn restore_set_aside(
    vcs: &dyn VersionControl,
    descriptor: &RepositoryDescriptor,
    handle: Option<StashHandle>,
) -> RestoreOutcome {
    let Some(handle) = handle else {
        return RestoreOutcome::Clean;
    };
    let outcome = vcs.restore_changes(&descriptor.local_path, &handle);
    if outcome == RestoreOutcome::Conflict {
        warn!(
            repo = %descriptor.name,
            stash = %handle.label,
            "set-aside changes did not reapply cleanly; snapshot kept"
        );
    }
    outcome
}
