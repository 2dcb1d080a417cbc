//! Existing and proposed placements of tasks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::serde_time::iso_millis;
use crate::time_range::TimeRange;

/// A task already placed on the schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskAssignment {
    /// Assignment identifier.
    #[serde(default)]
    pub id: String,
    /// Placed task.
    pub task_id: String,
    /// Station or provider the task runs on.
    pub target_id: String,
    /// Whether `target_id` is a provider.
    #[serde(default)]
    pub is_outsourced: bool,
    /// Scheduled start.
    #[serde(with = "iso_millis")]
    pub scheduled_start: DateTime<Utc>,
    /// Scheduled end (exclusive).
    #[serde(with = "iso_millis")]
    pub scheduled_end: DateTime<Utc>,
}

/// A candidate placement under evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposedAssignment {
    /// Task being placed.
    pub task_id: String,
    /// Station or provider it would run on.
    pub target_id: String,
    /// Whether `target_id` is a provider.
    #[serde(default)]
    pub is_outsourced: bool,
    /// Proposed start.
    #[serde(with = "iso_millis")]
    pub scheduled_start: DateTime<Utc>,
    /// Skip the precedence rule (explicit user override).
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub bypass_precedence: bool,
}

impl TaskAssignment {
    /// Creates a station assignment.
    pub fn new(
        id: impl Into<String>,
        task_id: impl Into<String>,
        target_id: impl Into<String>,
        scheduled_start: DateTime<Utc>,
        scheduled_end: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            task_id: task_id.into(),
            target_id: target_id.into(),
            is_outsourced: false,
            scheduled_start,
            scheduled_end,
        }
    }

    /// Marks the target as a provider.
    pub fn outsourced(mut self) -> Self {
        self.is_outsourced = true;
        self
    }

    /// Occupied interval `[start, end)`.
    #[inline]
    pub fn range(&self) -> TimeRange {
        TimeRange::new(self.scheduled_start, self.scheduled_end)
    }
}

impl ProposedAssignment {
    /// Proposes a task on a station.
    pub fn on_station(
        task_id: impl Into<String>,
        station_id: impl Into<String>,
        scheduled_start: DateTime<Utc>,
    ) -> Self {
        Self {
            task_id: task_id.into(),
            target_id: station_id.into(),
            is_outsourced: false,
            scheduled_start,
            bypass_precedence: false,
        }
    }

    /// Proposes a task at a provider.
    pub fn at_provider(
        task_id: impl Into<String>,
        provider_id: impl Into<String>,
        scheduled_start: DateTime<Utc>,
    ) -> Self {
        Self {
            is_outsourced: true,
            ..Self::on_station(task_id, provider_id, scheduled_start)
        }
    }

    /// Skips the precedence rule.
    pub fn bypassing_precedence(mut self) -> Self {
        self.bypass_precedence = true;
        self
    }
}
