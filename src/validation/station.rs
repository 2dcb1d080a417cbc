//! Station conflict rule: two internal tasks may not share a station at
//! the same time.

use crate::models::{format_timestamp, ConflictType, ProposedAssignment, ScheduleConflict, Snapshot};
use crate::time_range::{ranges_overlap, TimeRange};

/// Rejects a station placement overlapping another task on that station.
///
/// The task's own existing assignment is ignored, so re-validating a
/// placed task never conflicts with itself. Reports the first overlapping
/// assignment in snapshot order.
pub fn validate_station_conflict(
    proposed: &ProposedAssignment,
    snapshot: &Snapshot,
) -> Option<ScheduleConflict> {
    if proposed.is_outsourced {
        return None;
    }
    let task = snapshot.task(&proposed.task_id)?;
    let range = TimeRange::for_task(task, proposed.scheduled_start);

    let existing = snapshot
        .assignments_for_station(&proposed.target_id)
        .into_iter()
        .filter(|a| a.task_id != proposed.task_id)
        .find(|a| ranges_overlap(&range, &a.range()))?;

    let station_name = snapshot
        .station(&proposed.target_id)
        .map(|s| s.name.as_str())
        .filter(|name| !name.is_empty())
        .unwrap_or(&proposed.target_id);
    let existing_job = snapshot
        .task(&existing.task_id)
        .map(|t| t.job_id.clone());

    let mut conflict = ScheduleConflict::new(
        ConflictType::StationConflict,
        &proposed.task_id,
        format!(
            "Station {} is already occupied by task {} from {} to {}",
            station_name,
            existing.task_id,
            format_timestamp(&existing.scheduled_start),
            format_timestamp(&existing.scheduled_end),
        ),
    )
    .with_related_task(&existing.task_id)
    .with_target(&proposed.target_id)
    .with_detail("existingTaskId", existing.task_id.as_str())
    .with_detail("existingStart", format_timestamp(&existing.scheduled_start))
    .with_detail("existingEnd", format_timestamp(&existing.scheduled_end))
    .with_detail("proposedStart", format_timestamp(&range.start))
    .with_detail("proposedEnd", format_timestamp(&range.end));

    if let Some(job_id) = existing_job {
        conflict = conflict.with_detail("existingJobId", job_id);
    }
    Some(conflict)
}
