//! Assignment validation.
//!
//! Decides whether a [`ProposedAssignment`] is consistent with a
//! [`Snapshot`]. Six independent rules each return a conflict or `None`:
//!
//! | Rule | Conflict | Outsourced |
//! |------|----------|------------|
//! | [`validate_station_conflict`] | `StationConflict` | exempt |
//! | [`validate_group_capacity`] | `GroupCapacityConflict` | exempt |
//! | [`validate_precedence`] | `PrecedenceConflict` | checked |
//! | [`validate_approval_gates`] | `ApprovalGateConflict` | checked |
//! | [`validate_availability`] | `AvailabilityConflict` | exempt |
//! | [`validate_deadline`] | `DeadlineConflict` | checked |
//!
//! A rule that cannot resolve the task, job or station it needs reports
//! no conflict. Use [`check_snapshot`](crate::integrity::check_snapshot)
//! to detect such dangling references up front.
//!
//! # Usage
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use press_schedule::models::{ProposedAssignment, Snapshot};
//! use press_schedule::validation::{is_valid_assignment, validate_assignment};
//!
//! let snapshot = Snapshot::new();
//! let start = Utc.with_ymd_and_hms(2025, 1, 15, 9, 0, 0).unwrap();
//! let proposed = ProposedAssignment::on_station("t1", "komori", start);
//!
//! let result = validate_assignment(&proposed, &snapshot);
//! assert!(result.valid);
//! assert!(is_valid_assignment(&proposed, &snapshot));
//! ```

mod approval;
mod availability;
mod deadline;
mod group;
mod precedence;
mod station;

#[cfg(test)]
pub(crate) mod fixtures;

pub use approval::validate_approval_gates;
pub use availability::validate_availability;
pub use deadline::validate_deadline;
pub use group::validate_group_capacity;
pub use precedence::{get_suggested_start_for_precedence, validate_precedence};
pub use station::validate_station_conflict;

use std::collections::BTreeMap;

use crate::models::{ConflictType, ProposedAssignment, ScheduleConflict, Snapshot, ValidationResult};

/// A validation rule: a pure function of the proposal and the snapshot.
pub type Rule = fn(&ProposedAssignment, &Snapshot) -> Option<ScheduleConflict>;

/// All rules, in reporting order.
pub const RULES: [Rule; 6] = [
    validate_station_conflict,
    validate_group_capacity,
    validate_precedence,
    validate_approval_gates,
    validate_availability,
    validate_deadline,
];

/// Runs every rule and reports all conflicts.
///
/// When precedence fails, `suggested_start` carries the predecessor's end
/// (if it is placed).
pub fn validate_assignment(proposed: &ProposedAssignment, snapshot: &Snapshot) -> ValidationResult {
    let conflicts: Vec<ScheduleConflict> = RULES
        .iter()
        .filter_map(|rule| rule(proposed, snapshot))
        .collect();

    let suggested_start = if conflicts
        .iter()
        .any(|c| c.conflict_type == ConflictType::PrecedenceConflict)
    {
        get_suggested_start_for_precedence(proposed, snapshot)
    } else {
        None
    };

    ValidationResult::new(conflicts, suggested_start)
}

/// Whether a placement passes every rule.
///
/// Stops at the first conflict. Meant for per-pointer-move drag feedback
/// where only the verdict matters.
pub fn is_valid_assignment(proposed: &ProposedAssignment, snapshot: &Snapshot) -> bool {
    RULES.iter().all(|rule| rule(proposed, snapshot).is_none())
}

/// Validates several proposals independently against the same snapshot.
///
/// Keyed by task id; when a task is proposed twice the later proposal's
/// result is kept.
pub fn validate_assignments(
    proposals: &[ProposedAssignment],
    snapshot: &Snapshot,
) -> BTreeMap<String, ValidationResult> {
    proposals
        .iter()
        .map(|p| (p.task_id.clone(), validate_assignment(p, snapshot)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PlatesStatus, ProofApproval, StationGroup, TaskAssignment};
    use fixtures::{at, base_snapshot};

    #[test]
    fn test_valid_placement() {
        let s = base_snapshot();
        let proposed = ProposedAssignment::on_station("t1", "komori", at(15, 9, 0));

        let result = validate_assignment(&proposed, &s);
        assert!(result.valid);
        assert!(result.conflicts.is_empty());
        assert!(result.suggested_start.is_none());
        assert!(is_valid_assignment(&proposed, &s));
    }

    #[test]
    fn test_collects_every_conflict_in_rule_order() {
        let mut s = base_snapshot().with_assignment(TaskAssignment::new(
            "a1",
            "u1",
            "komori",
            at(15, 21, 0),
            at(15, 22, 0),
        ));
        s.groups[0] = StationGroup::new("offset", 1);
        s.jobs[0].proof_approval = ProofApproval::not_sent();
        s.jobs[0].plates_status = PlatesStatus::Todo;

        // t2 (90 min) at 21:30: overlaps u1, exceeds group, t1 unplaced,
        // gates closed, runs past 22:00
        let proposed = ProposedAssignment::on_station("t2", "komori", at(15, 21, 30));
        let result = validate_assignment(&proposed, &s);

        let types: Vec<ConflictType> = result.conflicts.iter().map(|c| c.conflict_type).collect();
        assert_eq!(
            types,
            vec![
                ConflictType::StationConflict,
                ConflictType::GroupCapacityConflict,
                ConflictType::PrecedenceConflict,
                ConflictType::ApprovalGateConflict,
                ConflictType::AvailabilityConflict,
            ]
        );
        assert!(!result.valid);
        // predecessor not placed: nothing to suggest
        assert!(result.suggested_start.is_none());
        assert!(!is_valid_assignment(&proposed, &s));
    }

    #[test]
    fn test_suggested_start_for_precedence() {
        let s = base_snapshot().with_assignment(TaskAssignment::new(
            "a1",
            "t1",
            "komori",
            at(15, 9, 0),
            at(15, 10, 0),
        ));
        let proposed = ProposedAssignment::on_station("t2", "komori", at(15, 9, 30));

        let result = validate_assignment(&proposed, &s);
        assert!(result.has(ConflictType::PrecedenceConflict));
        assert_eq!(result.suggested_start, Some(at(15, 10, 0)));

        let bypassed = validate_assignment(&proposed.clone().bypassing_precedence(), &s);
        assert!(!bypassed.has(ConflictType::PrecedenceConflict));
        assert!(bypassed.suggested_start.is_none());
    }

    #[test]
    fn test_no_suggestion_without_precedence_conflict() {
        let s = base_snapshot().with_assignment(TaskAssignment::new(
            "a1",
            "t1",
            "komori",
            at(15, 9, 0),
            at(15, 10, 0),
        ));
        // Starts after t1 but on a Saturday
        let proposed = ProposedAssignment::on_station("t2", "komori", at(18, 9, 0));
        let result = validate_assignment(&proposed, &s);
        assert!(result.has(ConflictType::AvailabilityConflict));
        assert!(result.suggested_start.is_none());
    }

    #[test]
    fn test_fast_path_agrees_with_full() {
        let s = base_snapshot().with_assignment(TaskAssignment::new(
            "a1",
            "u1",
            "komori",
            at(15, 9, 0),
            at(15, 10, 0),
        ));
        for hour in 4..23 {
            let proposed = ProposedAssignment::on_station("t1", "komori", at(15, hour, 30));
            assert_eq!(
                is_valid_assignment(&proposed, &s),
                validate_assignment(&proposed, &s).valid,
                "disagreement at {hour}:30"
            );
        }
    }

    #[test]
    fn test_deterministic_output() {
        let s = base_snapshot();
        let proposed = ProposedAssignment::on_station("t2", "komori", at(18, 23, 0));
        let first = serde_json::to_string(&validate_assignment(&proposed, &s)).unwrap();
        let second = serde_json::to_string(&validate_assignment(&proposed, &s)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_validate_assignments_batch() {
        let s = base_snapshot();
        let proposals = vec![
            ProposedAssignment::on_station("t1", "komori", at(15, 9, 0)),
            ProposedAssignment::on_station("u1", "heidelberg", at(18, 9, 0)),
        ];
        let results = validate_assignments(&proposals, &s);

        assert_eq!(results.len(), 2);
        assert!(results["t1"].valid);
        assert!(results["u1"].has(ConflictType::AvailabilityConflict));
    }

    #[test]
    fn test_outsourced_placement() {
        let t1 = TaskAssignment::new("a1", "t1", "komori", at(15, 9, 0), at(15, 10, 0));
        let t2 = TaskAssignment::new("a2", "t2", "komori", at(15, 10, 0), at(15, 11, 30));
        let s = base_snapshot().with_assignment(t1).with_assignment(t2);
        // Saturday start is fine for a provider
        let proposed = ProposedAssignment::at_provider("t3", "clement", at(18, 9, 0));
        assert!(validate_assignment(&proposed, &s).valid);
    }
}
