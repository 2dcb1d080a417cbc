//! Task model.
//!
//! A task is one production step of a job. Tasks come in two kinds that
//! share their identity and ordering fields:
//!
//! - **Internal**: runs on a station for `setup + run` minutes.
//! - **Outsourced**: sent to a provider for a number of open days.
//!
//! Within a job, `sequence_order` defines a strict total order.

use chrono::Duration;
use serde::{Deserialize, Serialize};

/// A production task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique task identifier.
    pub id: String,
    /// Parent job identifier.
    pub job_id: String,
    /// Position within the job (lower runs first).
    pub sequence_order: i32,
    /// Kind-specific target and duration.
    #[serde(flatten)]
    pub kind: TaskKind,
}

/// Task variants, tagged by `type` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TaskKind {
    /// Runs on one of our stations.
    #[serde(rename_all = "camelCase")]
    Internal {
        station_id: String,
        duration: InternalDuration,
    },
    /// Sent to an external provider.
    #[serde(rename_all = "camelCase")]
    Outsourced {
        provider_id: String,
        action_type: String,
        duration: OutsourcedDuration,
    },
}

/// Time components of an internal task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalDuration {
    /// Make-ready time (plate change, ink, calibration).
    pub setup_minutes: u32,
    /// Production run time.
    pub run_minutes: u32,
}

/// Lead time of an outsourced task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutsourcedDuration {
    /// Provider lead time in open days.
    pub open_days: u32,
}

impl InternalDuration {
    /// Creates a duration from setup and run minutes.
    pub fn new(setup_minutes: u32, run_minutes: u32) -> Self {
        Self {
            setup_minutes,
            run_minutes,
        }
    }

    /// Setup + run, in minutes.
    #[inline]
    pub fn total_minutes(&self) -> i64 {
        i64::from(self.setup_minutes) + i64::from(self.run_minutes)
    }
}

impl Task {
    /// Creates an internal task.
    pub fn internal(
        id: impl Into<String>,
        job_id: impl Into<String>,
        sequence_order: i32,
        station_id: impl Into<String>,
        duration: InternalDuration,
    ) -> Self {
        Self {
            id: id.into(),
            job_id: job_id.into(),
            sequence_order,
            kind: TaskKind::Internal {
                station_id: station_id.into(),
                duration,
            },
        }
    }

    /// Creates an outsourced task.
    pub fn outsourced(
        id: impl Into<String>,
        job_id: impl Into<String>,
        sequence_order: i32,
        provider_id: impl Into<String>,
        action_type: impl Into<String>,
        open_days: u32,
    ) -> Self {
        Self {
            id: id.into(),
            job_id: job_id.into(),
            sequence_order,
            kind: TaskKind::Outsourced {
                provider_id: provider_id.into(),
                action_type: action_type.into(),
                duration: OutsourcedDuration { open_days },
            },
        }
    }

    /// Whether this task goes to a provider.
    #[inline]
    pub fn is_outsourced(&self) -> bool {
        matches!(self.kind, TaskKind::Outsourced { .. })
    }

    /// Station or provider this task is bound to.
    pub fn target_id(&self) -> &str {
        match &self.kind {
            TaskKind::Internal { station_id, .. } => station_id,
            TaskKind::Outsourced { provider_id, .. } => provider_id,
        }
    }

    /// Wall-clock length of the task.
    ///
    /// Outsourced open days are counted as calendar days; non-working
    /// days are not skipped.
    pub fn duration(&self) -> Duration {
        match &self.kind {
            TaskKind::Internal { duration, .. } => Duration::minutes(duration.total_minutes()),
            TaskKind::Outsourced { duration, .. } => Duration::days(i64::from(duration.open_days)),
        }
    }
}
