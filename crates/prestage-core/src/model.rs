use std::fmt;
use std::path::PathBuf;

/// One externally-hosted repository and where it materializes locally.
///
/// Descriptors are declared once, up front; their declaration order is the
/// processing order and is part of the report contract.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RepositoryDescriptor {
    pub name: String,
    pub remote: String,
    pub local_path: PathBuf,
}

impl RepositoryDescriptor {
    pub fn new(
        name: impl Into<String>,
        remote: impl Into<String>,
        local_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            remote: remote.into(),
            local_path: local_path.into(),
        }
    }
}

/// Run-wide mode flag: clone missing and update existing, or clone only.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SyncMode {
    pub pull_existing: bool,
}

impl Default for SyncMode {
    fn default() -> Self {
        Self { pull_existing: true }
    }
}

/// Exactly one outcome is recorded per descriptor per run.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SyncOutcome {
    Cloned,
    UpdatedFastForward,
    UpdatedRebase,
    SkippedNotVersionControlled,
    SkippedByMode,
    ManualResolutionRequired,
    CloneFailed,
}

impl SyncOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncOutcome::Cloned => "cloned",
            SyncOutcome::UpdatedFastForward => "updated_fast_forward",
            SyncOutcome::UpdatedRebase => "updated_rebase",
            SyncOutcome::SkippedNotVersionControlled => "skipped_not_version_controlled",
            SyncOutcome::SkippedByMode => "skipped_by_mode",
            SyncOutcome::ManualResolutionRequired => "manual_resolution_required",
            SyncOutcome::CloneFailed => "clone_failed",
        }
    }

    /// True when the repository is left needing operator attention.
    pub fn needs_attention(&self) -> bool {
        matches!(
            self,
            SyncOutcome::ManualResolutionRequired | SyncOutcome::CloneFailed
        )
    }
}

impl fmt::Display for SyncOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-descriptor result, collected in processing order.
#[derive(Clone, Debug)]
pub struct SyncResult {
    pub descriptor: RepositoryDescriptor,
    pub outcome: SyncOutcome,
    pub detail: String,
}

impl SyncResult {
    pub fn new(
        descriptor: &RepositoryDescriptor,
        outcome: SyncOutcome,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            descriptor: descriptor.clone(),
            outcome,
            detail: detail.into(),
        }
    }
}
