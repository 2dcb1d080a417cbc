//! Group capacity rule: a station group may not run more tasks at once
//! than its `max_concurrent` ceiling.

use crate::models::{ConflictType, ProposedAssignment, ScheduleConflict, Snapshot};
use crate::time_range::{get_max_concurrent, TimeRange};

/// Rejects a station placement that pushes its group past capacity.
///
/// Sweeps every non-outsourced assignment of the group (minus this
/// task's own) together with the proposed interval. Outsourced
/// placements and groups without a ceiling always pass.
pub fn validate_group_capacity(
    proposed: &ProposedAssignment,
    snapshot: &Snapshot,
) -> Option<ScheduleConflict> {
    if proposed.is_outsourced {
        return None;
    }
    let station = snapshot.station(&proposed.target_id)?;
    let group = snapshot.group(&station.group_id)?;
    let max_concurrent = group.max_concurrent?;
    let task = snapshot.task(&proposed.task_id)?;

    let mut ranges: Vec<TimeRange> = snapshot
        .assignments_for_group(&group.id)
        .into_iter()
        .filter(|a| a.task_id != proposed.task_id)
        .map(|a| a.range())
        .collect();
    ranges.push(TimeRange::for_task(task, proposed.scheduled_start));

    let usage = get_max_concurrent(&ranges);
    if usage <= max_concurrent as usize {
        return None;
    }

    let group_name = if group.name.is_empty() {
        &group.id
    } else {
        &group.name
    };
    Some(
        ScheduleConflict::new(
            ConflictType::GroupCapacityConflict,
            &proposed.task_id,
            format!(
                "Group {group_name} allows {max_concurrent} concurrent task(s), \
                 placement would need {usage}"
            ),
        )
        .with_target(&proposed.target_id)
        .with_detail("groupId", group.id.as_str())
        .with_detail("groupName", group.name.as_str())
        .with_detail("maxConcurrent", max_concurrent)
        .with_detail("currentUsage", usage),
    )
}
