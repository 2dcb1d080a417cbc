//! Structural integrity checks for snapshots.
//!
//! The validation rules treat an unresolvable reference as "no conflict",
//! which keeps the drag loop from ever failing but lets a dangling id pass
//! as an unconstrained placement. This module finds those problems up
//! front. Detects:
//! - Duplicate IDs
//! - References to missing groups, jobs, tasks, stations or providers
//! - Two tasks of one job sharing a `sequence_order`
//! - Assignments ending before they start

use std::collections::{HashMap, HashSet};

use crate::models::{Snapshot, TaskKind};

/// An integrity problem.
#[derive(Debug, Clone, PartialEq)]
pub struct IntegrityIssue {
    /// Issue category.
    pub kind: IntegrityIssueKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of integrity issues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrityIssueKind {
    /// Two entities of the same collection share an ID.
    DuplicateId,
    /// A station or provider references a group that doesn't exist.
    UnknownGroup,
    /// A task references a job that doesn't exist.
    UnknownJob,
    /// A task or assignment references a station/provider that doesn't exist.
    UnknownTarget,
    /// An assignment or job references a task that doesn't exist.
    UnknownTask,
    /// Two tasks of one job have the same sequence order.
    DuplicateSequenceOrder,
    /// An assignment ends before it starts.
    InvertedRange,
}

impl IntegrityIssue {
    fn new(kind: IntegrityIssueKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for IntegrityIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Checks that every reference in a snapshot resolves.
///
/// Checks:
/// 1. No duplicate station, group, provider, job, task IDs
/// 2. Stations and providers reference existing groups
/// 3. Tasks reference existing jobs and targets of their kind
/// 4. Jobs list only existing tasks
/// 5. Assignments reference existing tasks and targets
/// 6. Sequence orders are unique within a job
/// 7. Assignments do not end before they start
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(issues)` with all detected issues.
pub fn check_snapshot(snapshot: &Snapshot) -> Result<(), Vec<IntegrityIssue>> {
    let mut issues = Vec::new();

    let station_ids = collect_ids(
        "station",
        snapshot.stations.iter().map(|s| s.id.as_str()),
        &mut issues,
    );
    let group_ids = collect_ids(
        "group",
        snapshot.groups.iter().map(|g| g.id.as_str()),
        &mut issues,
    );
    let provider_ids = collect_ids(
        "provider",
        snapshot.providers.iter().map(|p| p.id.as_str()),
        &mut issues,
    );
    let job_ids = collect_ids(
        "job",
        snapshot.jobs.iter().map(|j| j.id.as_str()),
        &mut issues,
    );
    let task_ids = collect_ids(
        "task",
        snapshot.tasks.iter().map(|t| t.id.as_str()),
        &mut issues,
    );

    // Group references
    for station in &snapshot.stations {
        if !group_ids.contains(station.group_id.as_str()) {
            issues.push(IntegrityIssue::new(
                IntegrityIssueKind::UnknownGroup,
                format!(
                    "Station '{}' references unknown group '{}'",
                    station.id, station.group_id
                ),
            ));
        }
    }
    for provider in &snapshot.providers {
        if !group_ids.contains(provider.group_id.as_str()) {
            issues.push(IntegrityIssue::new(
                IntegrityIssueKind::UnknownGroup,
                format!(
                    "Provider '{}' references unknown group '{}'",
                    provider.id, provider.group_id
                ),
            ));
        }
    }

    // Task references
    for task in &snapshot.tasks {
        if !job_ids.contains(task.job_id.as_str()) {
            issues.push(IntegrityIssue::new(
                IntegrityIssueKind::UnknownJob,
                format!("Task '{}' references unknown job '{}'", task.id, task.job_id),
            ));
        }
        let (known, what) = match &task.kind {
            TaskKind::Internal { station_id, .. } => {
                (station_ids.contains(station_id.as_str()), "station")
            }
            TaskKind::Outsourced { provider_id, .. } => {
                (provider_ids.contains(provider_id.as_str()), "provider")
            }
        };
        if !known {
            issues.push(IntegrityIssue::new(
                IntegrityIssueKind::UnknownTarget,
                format!(
                    "Task '{}' references unknown {} '{}'",
                    task.id,
                    what,
                    task.target_id()
                ),
            ));
        }
    }

    for job in &snapshot.jobs {
        for task_id in &job.task_ids {
            if !task_ids.contains(task_id.as_str()) {
                issues.push(IntegrityIssue::new(
                    IntegrityIssueKind::UnknownTask,
                    format!("Job '{}' lists unknown task '{}'", job.id, task_id),
                ));
            }
        }
    }

    // Assignment references
    for a in &snapshot.assignments {
        if !task_ids.contains(a.task_id.as_str()) {
            issues.push(IntegrityIssue::new(
                IntegrityIssueKind::UnknownTask,
                format!(
                    "Assignment '{}' references unknown task '{}'",
                    a.id, a.task_id
                ),
            ));
        }
        let (targets, what) = if a.is_outsourced {
            (&provider_ids, "provider")
        } else {
            (&station_ids, "station")
        };
        if !targets.contains(a.target_id.as_str()) {
            issues.push(IntegrityIssue::new(
                IntegrityIssueKind::UnknownTarget,
                format!(
                    "Assignment '{}' references unknown {} '{}'",
                    a.id, what, a.target_id
                ),
            ));
        }
        if a.scheduled_end < a.scheduled_start {
            issues.push(IntegrityIssue::new(
                IntegrityIssueKind::InvertedRange,
                format!("Assignment '{}' ends before it starts", a.id),
            ));
        }
    }

    // Sequence orders within each job
    let mut seen: HashMap<(&str, i32), &str> = HashMap::new();
    for task in &snapshot.tasks {
        let key = (task.job_id.as_str(), task.sequence_order);
        if let Some(other) = seen.insert(key, task.id.as_str()) {
            issues.push(IntegrityIssue::new(
                IntegrityIssueKind::DuplicateSequenceOrder,
                format!(
                    "Tasks '{}' and '{}' of job '{}' share sequence order {}",
                    other, task.id, task.job_id, task.sequence_order
                ),
            ));
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}

fn collect_ids<'a>(
    what: &str,
    ids: impl Iterator<Item = &'a str>,
    issues: &mut Vec<IntegrityIssue>,
) -> HashSet<&'a str> {
    let mut set = HashSet::new();
    for id in ids {
        if !set.insert(id) {
            issues.push(IntegrityIssue::new(
                IntegrityIssueKind::DuplicateId,
                format!("Duplicate {what} ID: {id}"),
            ));
        }
    }
    set
}
