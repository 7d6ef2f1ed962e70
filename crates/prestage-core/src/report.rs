use crate::model::SyncResult;

/// Final readiness view over one run. `all_present` tracks existence only:
/// a repository flagged for manual resolution still counts as present.
#[derive(Clone, Debug)]
pub struct RunReport {
    pub results: Vec<SyncResult>,
    pub missing: Vec<String>,
    pub all_present: bool,
}

impl RunReport {
    pub fn ready(&self) -> impl Iterator<Item = &SyncResult> {
        self.results
            .iter()
            .filter(|result| !self.missing.contains(&result.descriptor.name))
    }
}

/// Aggregates the ordered result sequence into the final report. Presence
/// is re-probed against the filesystem rather than inferred from outcome
/// tags, which could be stale relative to on-disk state.
pub fn finalize(results: Vec<SyncResult>) -> RunReport {
    let missing: Vec<String> = results
        .iter()
        .filter(|result| !result.descriptor.local_path.exists())
        .map(|result| result.descriptor.name.clone())
        .collect();
    RunReport {
        all_present: missing.is_empty(),
        missing,
        results,
    }
}
