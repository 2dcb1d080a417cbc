//! Availability rule: internal tasks run only while their station is open.

use crate::models::{format_timestamp, ConflictType, ProposedAssignment, ScheduleConflict, Snapshot};
use crate::time_range::TimeRange;

/// Rejects a station placement extending outside the station's open
/// slots.
///
/// Each day the interval touches uses its date exception if one exists,
/// otherwise the weekly pattern. Providers have no operating hours.
pub fn validate_availability(
    proposed: &ProposedAssignment,
    snapshot: &Snapshot,
) -> Option<ScheduleConflict> {
    if proposed.is_outsourced {
        return None;
    }
    let station = snapshot.station(&proposed.target_id)?;
    let task = snapshot.task(&proposed.task_id)?;
    let range = TimeRange::for_task(task, proposed.scheduled_start);

    let closed_at = station.first_closed_instant(&range)?;
    let day = closed_at.date_naive();
    let reason = if station.day_schedule(day).is_operating {
        "OutsideOperatingHours"
    } else {
        "NonOperatingDay"
    };
    let station_name = if station.name.is_empty() {
        &station.id
    } else {
        &station.name
    };

    Some(
        ScheduleConflict::new(
            ConflictType::AvailabilityConflict,
            &proposed.task_id,
            format!(
                "Station {} is closed at {}",
                station_name,
                format_timestamp(&closed_at)
            ),
        )
        .with_target(&station.id)
        .with_detail("reason", reason)
        .with_detail("date", day.to_string())
        .with_detail("unavailableFrom", format_timestamp(&closed_at))
        .with_detail("proposedStart", format_timestamp(&range.start))
        .with_detail("proposedEnd", format_timestamp(&range.end)),
    )
}
