//! Assignment validation for print-shop production scheduling.
//!
//! Given a snapshot of the shop (stations, groups, providers, jobs, tasks
//! and current assignments) and a proposed placement of one task, decides
//! whether the placement is acceptable and reports every rule it breaks.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Station`, `StationGroup`, `OutsourcedProvider`,
//!   `Job`, `Task`, `TaskAssignment`, `ProposedAssignment`, `ScheduleConflict`
//! - **`time_range`**: Interval arithmetic and the concurrency sweep
//! - **`validation`**: The six placement rules and the orchestrator
//! - **`integrity`**: Dangling-reference checks for snapshots
//!
//! # Conventions
//!
//! Intervals are half-open `[start, end)`. Timestamps travel as ISO-8601
//! UTC with millisecond precision. Validation is pure: it never mutates
//! the snapshot and the same inputs always give the same result.

pub mod error;
pub mod integrity;
mod lookup;
pub mod models;
pub mod time_range;
pub mod validation;

pub use error::SnapshotError;
pub use integrity::{check_snapshot, IntegrityIssue, IntegrityIssueKind};
pub use models::{ProposedAssignment, Snapshot, ValidationResult};
pub use validation::{is_valid_assignment, validate_assignment, validate_assignments};
