use crate::vcs::VersionControl;
use std::path::Path;

/// Sentinel branch name when detection fails (detached HEAD, unborn branch).
pub const UNKNOWN_BRANCH: &str = "unknown";

/// Snapshot of a local path, derived fresh each run and never persisted.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RepoState {
    pub exists: bool,
    pub is_working_copy: bool,
    pub branch: String,
}

/// Inspects `path` without side effects. Probing never fails the run: an
/// absent path short-circuits, and a failed branch lookup degrades to the
/// `"unknown"` sentinel.
pub fn probe_state(vcs: &dyn VersionControl, path: &Path) -> RepoState {
    if !path.exists() {
        return RepoState {
            exists: false,
            is_working_copy: false,
            branch: UNKNOWN_BRANCH.to_string(),
        };
    }
    if !vcs.is_working_copy(path) {
        return RepoState {
            exists: true,
            is_working_copy: false,
            branch: UNKNOWN_BRANCH.to_string(),
        };
    }
    let branch = vcs
        .current_branch(path)
        .unwrap_or_else(|| UNKNOWN_BRANCH.to_string());
    RepoState {
        exists: true,
        is_working_copy: true,
        branch,
    }
}
