use std::path::Path;
use thiserror::Error;

/// The version-control subsystem is missing from the host entirely. This is
/// the only condition that aborts a run before any descriptor is processed.
#[derive(Debug, Error)]
#[error("version control subsystem unavailable: {reason}")]
pub struct VcsUnavailable {
    pub reason: String,
}

/// Names one set-aside snapshot of uncommitted changes so it can be
/// reapplied after an update. The handle travels with the descriptor being
/// processed; it is never shared across descriptors.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StashHandle {
    pub label: String,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RestoreOutcome {
    /// Changes reapplied cleanly; the snapshot is consumed.
    Clean,
    /// Reapplication conflicted; the snapshot is retained and the working
    /// copy needs an operator.
    Conflict,
}

/// Narrow capability surface over the external version-control subsystem.
///
/// The orchestration logic depends only on these operations' success or
/// failure signaling, which is what makes it testable against a double.
pub trait VersionControl {
    /// Preflight: fails when the subsystem is absent from the host.
    fn ensure_available(&self) -> Result<(), VcsUnavailable>;

    /// Full copy of `remote` into `path`. Used only for absent paths.
    fn clone_repo(&self, remote: &str, path: &Path) -> anyhow::Result<()>;

    /// Whether `path` carries version-control metadata.
    fn is_working_copy(&self, path: &Path) -> bool;

    /// Current branch name, or `None` when detection fails (detached HEAD,
    /// unborn branch).
    fn current_branch(&self, path: &Path) -> Option<String>;

    /// Whether the working tree or index differs from the last commit.
    fn has_local_changes(&self, path: &Path) -> anyhow::Result<bool>;

    /// Snapshot uncommitted changes under `label` and clear the working tree.
    fn set_aside_changes(&self, path: &Path, label: &str) -> anyhow::Result<StashHandle>;

    /// Reapply a previously set-aside snapshot.
    fn restore_changes(&self, path: &Path, handle: &StashHandle) -> RestoreOutcome;

    /// Strict fast-forward to upstream; fails on any divergence.
    fn fast_forward(&self, path: &Path) -> anyhow::Result<()>;

    /// Replay local commits on top of upstream.
    fn rebase(&self, path: &Path) -> anyhow::Result<()>;
}
