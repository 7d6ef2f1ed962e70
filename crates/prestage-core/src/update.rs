use crate::model::SyncOutcome;
use crate::vcs::VersionControl;
use std::path::Path;
use tracing::{info, warn};

/// Brings an existing working copy current with a two-tier policy: strict
/// fast-forward first, rebase on divergence. Local changes must already be
/// set aside. Both tiers failing downgrades to a per-repository warning,
/// never a batch failure.
pub fn update_existing(
    vcs: &dyn VersionControl,
    path: &Path,
    branch: &str,
) -> (SyncOutcome, String) {
    let ff_err = match vcs.fast_forward(path) {
        Ok(()) => {
            return (
                SyncOutcome::UpdatedFastForward,
                format!("fast-forwarded '{branch}' to upstream"),
            );
        }
        Err(err) => err,
    };

    info!(path = %path.display(), "fast-forward refused; attempting rebase");
    match vcs.rebase(path) {
        Ok(()) => (
            SyncOutcome::UpdatedRebase,
            format!("rebased local commits on '{branch}' onto upstream"),
        ),
        Err(rebase_err) => {
            warn!(
                path = %path.display(),
                fast_forward_error = %ff_err,
                rebase_error = %rebase_err,
                "both integration tiers failed"
            );
            (
                SyncOutcome::ManualResolutionRequired,
                format!(
                    "needs operator attention (divergent history, unresolved conflicts, \
                     or network failure): fast-forward: {ff_err:#}; rebase: {rebase_err:#}"
                ),
            )
        }
    }
}
