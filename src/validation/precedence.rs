//! Precedence rule: a job's tasks run in `sequence_order`.
//!
//! Task *n* may not start before task *n-1* ends. The immediate
//! predecessor is the only one checked; earlier tasks are bounded
//! transitively through it.

use chrono::{DateTime, Utc};

use crate::models::{format_timestamp, ConflictType, ProposedAssignment, ScheduleConflict, Snapshot};

/// Rejects a placement starting before its predecessor ends, or whose
/// predecessor is not placed at all.
///
/// Skipped entirely when the proposal sets `bypass_precedence`.
pub fn validate_precedence(
    proposed: &ProposedAssignment,
    snapshot: &Snapshot,
) -> Option<ScheduleConflict> {
    if proposed.bypass_precedence {
        return None;
    }
    let task = snapshot.task(&proposed.task_id)?;
    let predecessor = snapshot.predecessor_task(task)?;

    let Some(pred_assignment) = snapshot.assignment_for_task(&predecessor.id) else {
        return Some(
            ScheduleConflict::new(
                ConflictType::PrecedenceConflict,
                &task.id,
                format!(
                    "Predecessor task {} is not scheduled yet",
                    predecessor.id
                ),
            )
            .with_related_task(&predecessor.id)
            .with_target(&proposed.target_id)
            .with_detail("reason", "unscheduled")
            .with_detail("predecessorTaskId", predecessor.id.as_str()),
        );
    };

    if proposed.scheduled_start >= pred_assignment.scheduled_end {
        return None;
    }

    let predecessor_end = format_timestamp(&pred_assignment.scheduled_end);
    Some(
        ScheduleConflict::new(
            ConflictType::PrecedenceConflict,
            &task.id,
            format!(
                "Task must start after predecessor {} ends at {}",
                predecessor.id, predecessor_end
            ),
        )
        .with_related_task(&predecessor.id)
        .with_target(&proposed.target_id)
        .with_detail("reason", "startsBeforePredecessorEnds")
        .with_detail("predecessorTaskId", predecessor.id.as_str())
        .with_detail("predecessorEnd", predecessor_end)
        .with_detail("proposedStart", format_timestamp(&proposed.scheduled_start)),
    )
}

/// Earliest start allowed by the predecessor: its scheduled end.
///
/// `None` when the task is unknown, first in its job, or its predecessor
/// is not placed.
pub fn get_suggested_start_for_precedence(
    proposed: &ProposedAssignment,
    snapshot: &Snapshot,
) -> Option<DateTime<Utc>> {
    let task = snapshot.task(&proposed.task_id)?;
    let predecessor = snapshot.predecessor_task(task)?;
    snapshot
        .assignment_for_task(&predecessor.id)
        .map(|a| a.scheduled_end)
}
