//! Conflicts and validation results.
//!
//! A rejected placement is not an error: it is described by one
//! [`ScheduleConflict`] per violated rule. `details` is an ordered map so
//! that serialized results are byte-identical across runs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use super::serde_time::iso_millis_option;

/// Classification of schedule conflicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ConflictType {
    /// Overlaps another task on the same station.
    StationConflict,
    /// Pushes a station group past its concurrency ceiling.
    GroupCapacityConflict,
    /// Starts before the previous task of the job ends.
    PrecedenceConflict,
    /// Job's proof or plates gate is not satisfied.
    ApprovalGateConflict,
    /// Falls outside the station's operating hours.
    AvailabilityConflict,
    /// Ends after the job's workshop exit date.
    DeadlineConflict,
}

/// A violated scheduling rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleConflict {
    /// Which rule was violated.
    #[serde(rename = "type")]
    pub conflict_type: ConflictType,
    /// Human-readable description.
    pub message: String,
    /// Task whose placement conflicts.
    pub task_id: String,
    /// Other task involved (existing occupant, predecessor).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_task_id: Option<String>,
    /// Station or provider involved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_id: Option<String>,
    /// Rule-specific data.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub details: BTreeMap<String, Value>,
}

/// Outcome of validating one proposed assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// `true` iff `conflicts` is empty.
    pub valid: bool,
    /// Every violated rule, in rule order.
    pub conflicts: Vec<ScheduleConflict>,
    /// Earliest start satisfying precedence, when precedence failed.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "iso_millis_option"
    )]
    pub suggested_start: Option<DateTime<Utc>>,
}

impl ConflictType {
    /// Wire name of the conflict type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConflictType::StationConflict => "StationConflict",
            ConflictType::GroupCapacityConflict => "GroupCapacityConflict",
            ConflictType::PrecedenceConflict => "PrecedenceConflict",
            ConflictType::ApprovalGateConflict => "ApprovalGateConflict",
            ConflictType::AvailabilityConflict => "AvailabilityConflict",
            ConflictType::DeadlineConflict => "DeadlineConflict",
        }
    }
}

impl std::fmt::Display for ConflictType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ScheduleConflict {
    /// Creates a conflict for a task.
    pub fn new(
        conflict_type: ConflictType,
        task_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            conflict_type,
            message: message.into(),
            task_id: task_id.into(),
            related_task_id: None,
            target_id: None,
            details: BTreeMap::new(),
        }
    }

    /// Sets the related task.
    pub fn with_related_task(mut self, task_id: impl Into<String>) -> Self {
        self.related_task_id = Some(task_id.into());
        self
    }

    /// Sets the target station or provider.
    pub fn with_target(mut self, target_id: impl Into<String>) -> Self {
        self.target_id = Some(target_id.into());
        self
    }

    /// Adds a detail entry.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Looks up a detail entry.
    pub fn detail(&self, key: &str) -> Option<&Value> {
        self.details.get(key)
    }
}

impl ValidationResult {
    /// Builds a result; `valid` follows from `conflicts`.
    pub fn new(conflicts: Vec<ScheduleConflict>, suggested_start: Option<DateTime<Utc>>) -> Self {
        Self {
            valid: conflicts.is_empty(),
            conflicts,
            suggested_start,
        }
    }

    /// A result without conflicts.
    pub fn accepted() -> Self {
        Self::new(Vec::new(), None)
    }

    /// Whether a conflict of the given type was reported.
    pub fn has(&self, conflict_type: ConflictType) -> bool {
        self.conflict(conflict_type).is_some()
    }

    /// First conflict of the given type.
    pub fn conflict(&self, conflict_type: ConflictType) -> Option<&ScheduleConflict> {
        self.conflicts
            .iter()
            .find(|c| c.conflict_type == conflict_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_builder() {
        let c = ScheduleConflict::new(ConflictType::StationConflict, "t2", "Station busy")
            .with_related_task("t1")
            .with_target("komori")
            .with_detail("existingJobId", "j1");

        assert_eq!(c.related_task_id.as_deref(), Some("t1"));
        assert_eq!(c.target_id.as_deref(), Some("komori"));
        assert_eq!(c.detail("existingJobId"), Some(&Value::from("j1")));
    }

    #[test]
    fn test_result_validity() {
        assert!(ValidationResult::accepted().valid);

        let r = ValidationResult::new(
            vec![ScheduleConflict::new(ConflictType::DeadlineConflict, "t1", "Late")],
            None,
        );
        assert!(!r.valid);
        assert!(r.has(ConflictType::DeadlineConflict));
        assert!(!r.has(ConflictType::StationConflict));
    }

    #[test]
    fn test_conflict_wire_format() {
        let c = ScheduleConflict::new(ConflictType::GroupCapacityConflict, "t1", "Full")
            .with_detail("maxConcurrent", 1)
            .with_detail("currentUsage", 2);
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(
            json,
            concat!(
                r#"{"type":"GroupCapacityConflict","message":"Full","taskId":"t1","#,
                r#""details":{"currentUsage":2,"maxConcurrent":1}}"#
            )
        );
        assert_eq!(ConflictType::GroupCapacityConflict.to_string(), "GroupCapacityConflict");
    }
}
