use crate::model::{RepositoryDescriptor, SyncMode, SyncOutcome, SyncResult};
use crate::preserve::{restore_set_aside, set_aside_if_dirty};
use crate::probe::{RepoState, probe_state};
use crate::report::{RunReport, finalize};
use crate::update::update_existing;
use crate::vcs::{RestoreOutcome, VcsUnavailable, VersionControl};
use tracing::{info, warn};

/// Processes every descriptor in declaration order and aggregates the
/// readiness report. Only a missing version-control subsystem aborts the
/// run; every other failure is folded into that descriptor's outcome and
/// the batch continues.
pub fn run_sync(
    vcs: &dyn VersionControl,
    descriptors: &[RepositoryDescriptor],
    mode: SyncMode,
) -> Result<RunReport, VcsUnavailable> {
    vcs.ensure_available()?;
    let mut results = Vec::with_capacity(descriptors.len());
    for descriptor in descriptors {
        let result = process_descriptor(vcs, descriptor, mode);
        info!(
            repo = %descriptor.name,
            outcome = %result.outcome,
            "descriptor processed"
        );
        results.push(result);
    }
    Ok(finalize(results))
}

fn process_descriptor(
    vcs: &dyn VersionControl,
    descriptor: &RepositoryDescriptor,
    mode: SyncMode,
) -> SyncResult {
    let state = probe_state(vcs, &descriptor.local_path);
    if !state.exists {
        return clone_missing(vcs, descriptor);
    }
    if !state.is_working_copy {
        return SyncResult::new(
            descriptor,
            SyncOutcome::SkippedNotVersionControlled,
            "directory exists but is not a version-controlled working copy; left untouched",
        );
    }
    if !mode.pull_existing {
        return SyncResult::new(
            descriptor,
            SyncOutcome::SkippedByMode,
            format!(
                "existing working copy on branch '{}' left untouched (clone-only mode)",
                state.branch
            ),
        );
    }
    update_with_preserved_changes(vcs, descriptor, &state)
}

fn clone_missing(vcs: &dyn VersionControl, descriptor: &RepositoryDescriptor) -> SyncResult {
    info!(
        repo = %descriptor.name,
        remote = %descriptor.remote,
        "cloning missing repository"
    );
    match vcs.clone_repo(&descriptor.remote, &descriptor.local_path) {
        Ok(()) => SyncResult::new(
            descriptor,
            SyncOutcome::Cloned,
            format!("cloned from {}", descriptor.remote),
        ),
        Err(err) => {
            warn!(repo = %descriptor.name, error = %err, "clone failed");
            SyncResult::new(
                descriptor,
                SyncOutcome::CloneFailed,
                format!(
                    "clone failed ({err:#}); check network connectivity and \
                     repository access credentials"
                ),
            )
        }
    }
}

fn update_with_preserved_changes(
    vcs: &dyn VersionControl,
    descriptor: &RepositoryDescriptor,
    state: &RepoState,
) -> SyncResult {
    let set_aside = match set_aside_if_dirty(vcs, descriptor) {
        Ok(handle) => handle,
        Err(err) => {
            warn!(repo = %descriptor.name, error = %err, "set-aside failed");
            return SyncResult::new(
                descriptor,
                SyncOutcome::ManualResolutionRequired,
                format!("could not set aside local changes ({err:#}); update not attempted"),
            );
        }
    };

    // The update outcome stands or falls on its own; the restore step runs
    // either way and a conflicted restore overrides whatever it produced.
    let (outcome, detail) = update_existing(vcs, &descriptor.local_path, &state.branch);
    match restore_set_aside(vcs, descriptor, set_aside) {
        RestoreOutcome::Clean => SyncResult::new(descriptor, outcome, detail),
        RestoreOutcome::Conflict => SyncResult::new(
            descriptor,
            SyncOutcome::ManualResolutionRequired,
            format!(
                "{detail}; restoring set-aside changes conflicted, \
                 snapshot kept for manual resolution"
            ),
        ),
    }
}
