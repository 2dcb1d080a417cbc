//! Print-shop scheduling domain models.
//!
//! The read-only state the validation engine inspects. Every type here
//! mirrors the JSON wire format shared with the scheduler UI (`camelCase`
//! field names, ISO-8601 timestamps with millisecond precision).
//!
//! # Domain Mappings
//!
//! | press-schedule | Shop floor | Wire name |
//! |----------------|------------|-----------|
//! | Station | Press, cutter, folder | `stations` |
//! | StationGroup | Capacity domain (e.g. offset presses) | `groups` |
//! | OutsourcedProvider | External finisher, binder | `providers` |
//! | Job | Customer order with BAT and plates gates | `jobs` |
//! | Task | One production step of a job | `tasks` |
//! | TaskAssignment | A placed task on the grid | `assignments` |

mod assignment;
mod calendar;
mod conflict;
mod job;
pub(crate) mod serde_time;
mod snapshot;
mod station;
mod task;

pub use assignment::{ProposedAssignment, TaskAssignment};
pub use calendar::{DaySchedule, OperatingSchedule, ScheduleException, TimeSlot};
pub use conflict::{ConflictType, ScheduleConflict, ValidationResult};
pub use job::{Job, PlatesStatus, ProofApproval, ProofSent};
pub use serde_time::{format_timestamp, parse_timestamp};
pub use snapshot::Snapshot;
pub use station::{OutsourcedProvider, Station, StationGroup, StationStatus};
pub use task::{InternalDuration, OutsourcedDuration, Task, TaskKind};
