//! Deadline rule: a task must end by its job's workshop exit date.

use crate::models::{format_timestamp, ConflictType, ProposedAssignment, ScheduleConflict, Snapshot};
use crate::time_range::calculate_end_time;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Rejects a placement ending after the end of the job's exit date.
///
/// `delayDays` is the overrun in whole days, rounded up.
pub fn validate_deadline(
    proposed: &ProposedAssignment,
    snapshot: &Snapshot,
) -> Option<ScheduleConflict> {
    let task = snapshot.task(&proposed.task_id)?;
    let job = snapshot.job(&task.job_id)?;

    let end = calculate_end_time(task, proposed.scheduled_start);
    let deadline = job.deadline();
    if end <= deadline {
        return None;
    }

    let overrun_ms = (end - deadline).num_milliseconds();
    let delay_days = (overrun_ms + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY;

    Some(
        ScheduleConflict::new(
            ConflictType::DeadlineConflict,
            &task.id,
            format!(
                "Job {} would leave the workshop {} day(s) after {}",
                job.id, delay_days, job.workshop_exit_date
            ),
        )
        .with_target(&proposed.target_id)
        .with_detail("jobId", job.id.as_str())
        .with_detail("deadline", job.workshop_exit_date.to_string())
        .with_detail("proposedEnd", format_timestamp(&end))
        .with_detail("delayDays", delay_days),
    )
}
