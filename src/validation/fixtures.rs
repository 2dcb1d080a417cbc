//! Shared snapshot builders for rule tests.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::models::{
    InternalDuration, Job, OperatingSchedule, OutsourcedProvider, PlatesStatus, ProofApproval,
    Snapshot, Station, StationGroup, Task, TimeSlot,
};

/// An instant in January 2025 (the 15th is a Wednesday).
pub(crate) fn at(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, day, hour, minute, 0).unwrap()
}

pub(crate) fn jan(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, day).unwrap()
}

/// Offset press open Monday to Friday, 06:00-22:00.
pub(crate) fn press(id: &str) -> Station {
    Station::new(id, "offset")
        .with_name(id)
        .with_schedule(OperatingSchedule::weekdays(vec![TimeSlot::new(6 * 60, 22 * 60)]))
}

/// A job with both gates open.
pub(crate) fn ready_job(id: &str, exit_day: u32) -> Job {
    Job::new(id, jan(exit_day))
        .with_proof(ProofApproval::not_required())
        .with_plates(PlatesStatus::Done)
}

/// Two presses in a group of two, one provider, and two ready jobs:
///
/// - `j1`: `t1` (komori, 15+45 min) → `t2` (komori, 30+60 min) → `t3` (clement, 2 days)
/// - `j2`: `u1` (heidelberg, 60 min)
pub(crate) fn base_snapshot() -> Snapshot {
    Snapshot::new()
        .with_group(StationGroup::new("offset", 2).with_name("Offset"))
        .with_group(StationGroup::unlimited("outsourced").for_providers())
        .with_station(press("komori"))
        .with_station(press("heidelberg"))
        .with_provider(
            OutsourcedProvider::new("clement", "outsourced").with_action_type("Pelliculage"),
        )
        .with_job(ready_job("j1", 20).with_task("t1").with_task("t2").with_task("t3"))
        .with_job(ready_job("j2", 20).with_task("u1"))
        .with_task(Task::internal("t1", "j1", 0, "komori", InternalDuration::new(15, 45)))
        .with_task(Task::internal("t2", "j1", 1, "komori", InternalDuration::new(30, 60)))
        .with_task(Task::outsourced("t3", "j1", 2, "clement", "Pelliculage", 2))
        .with_task(Task::internal("u1", "j2", 0, "heidelberg", InternalDuration::new(0, 60)))
}
