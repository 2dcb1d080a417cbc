//! Schedule snapshot.
//!
//! The complete, read-only schedule state handed to every validation
//! call. Produced by the data layer; the engine never mutates it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::serde_time::iso_millis_option;
use super::{Job, OutsourcedProvider, Station, StationGroup, Task, TaskAssignment};
use crate::error::SnapshotError;
use crate::integrity::check_snapshot;

/// The complete schedule state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// When the data layer produced this snapshot.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "iso_millis_option"
    )]
    pub generated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub stations: Vec<Station>,
    #[serde(default)]
    pub groups: Vec<StationGroup>,
    #[serde(default)]
    pub providers: Vec<OutsourcedProvider>,
    #[serde(default)]
    pub jobs: Vec<Job>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub assignments: Vec<TaskAssignment>,
}

impl Snapshot {
    /// Creates an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a snapshot from its JSON wire format.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parses a snapshot and rejects it if its references do not resolve.
    pub fn from_json_checked(json: &str) -> Result<Self, SnapshotError> {
        let snapshot = Self::from_json(json)?;
        check_snapshot(&snapshot).map_err(SnapshotError::Integrity)?;
        Ok(snapshot)
    }

    /// Serializes to the JSON wire format.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Adds a station.
    pub fn with_station(mut self, station: Station) -> Self {
        self.stations.push(station);
        self
    }

    /// Adds a station group.
    pub fn with_group(mut self, group: StationGroup) -> Self {
        self.groups.push(group);
        self
    }

    /// Adds a provider.
    pub fn with_provider(mut self, provider: OutsourcedProvider) -> Self {
        self.providers.push(provider);
        self
    }

    /// Adds a job.
    pub fn with_job(mut self, job: Job) -> Self {
        self.jobs.push(job);
        self
    }

    /// Adds a task.
    pub fn with_task(mut self, task: Task) -> Self {
        self.tasks.push(task);
        self
    }

    /// Adds an existing assignment.
    pub fn with_assignment(mut self, assignment: TaskAssignment) -> Self {
        self.assignments.push(assignment);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{InternalDuration, StationGroup};
    use chrono::NaiveDate;

    #[test]
    fn test_from_json_empty_collections() {
        let snapshot = Snapshot::from_json("{}").unwrap();
        assert_eq!(snapshot, Snapshot::new());
    }

    #[test]
    fn test_from_json_malformed() {
        let err = Snapshot::from_json(r#"{ "stations": 3 }"#).unwrap_err();
        assert!(matches!(err, SnapshotError::Json(_)));
    }

    #[test]
    fn test_json_round_trip() {
        let snapshot = Snapshot::new()
            .with_group(StationGroup::new("offset", 1))
            .with_station(Station::new("komori", "offset"))
            .with_job(Job::new("j1", NaiveDate::from_ymd_opt(2025, 1, 20).unwrap()).with_task("t1"))
            .with_task(Task::internal("t1", "j1", 0, "komori", InternalDuration::new(15, 45)));

        let json = snapshot.to_json().unwrap();
        assert_eq!(Snapshot::from_json(&json).unwrap(), snapshot);
        assert!(Snapshot::from_json_checked(&json).is_ok());
    }

    #[test]
    fn test_from_json_checked_rejects_dangling() {
        let json = r#"{ "stations": [{ "id": "komori", "groupId": "missing" }] }"#;
        let err = Snapshot::from_json_checked(json).unwrap_err();
        match err {
            SnapshotError::Integrity(issues) => assert_eq!(issues.len(), 1),
            other => panic!("unexpected error: {other}"),
        }
    }
}
