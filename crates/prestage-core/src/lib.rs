//! Core orchestration for pre-staging service repositories before a
//! deployment: probe, clone-or-update decisions, set-aside of local
//! changes, fast-forward/rebase escalation, and the final readiness report.

pub mod engine;
pub mod git;
pub mod model;
pub mod preserve;
pub mod probe;
pub mod report;
pub mod update;
pub mod vcs;
