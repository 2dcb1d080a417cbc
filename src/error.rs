//! Errors raised while loading a snapshot.
//!
//! Validation itself never fails: rejected placements are reported as
//! conflicts in a [`ValidationResult`](crate::models::ValidationResult).

use thiserror::Error;

use crate::integrity::IntegrityIssue;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Malformed snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Snapshot failed integrity check with {} issue(s)", .0.len())]
    Integrity(Vec<IntegrityIssue>),
}
