//! Entity lookups over a [`Snapshot`].
//!
//! Linear scans over the snapshot's collections. Nothing is cached, so a
//! snapshot can be shared freely between concurrent validations. Every
//! list preserves snapshot order, which keeps rule output deterministic.

use crate::models::{
    Job, OutsourcedProvider, Snapshot, Station, StationGroup, Task, TaskAssignment,
};

impl Snapshot {
    /// Finds a station by id.
    pub fn station(&self, id: &str) -> Option<&Station> {
        self.stations.iter().find(|s| s.id == id)
    }

    /// Finds a provider by id.
    pub fn provider(&self, id: &str) -> Option<&OutsourcedProvider> {
        self.providers.iter().find(|p| p.id == id)
    }

    /// Finds a station group by id.
    pub fn group(&self, id: &str) -> Option<&StationGroup> {
        self.groups.iter().find(|g| g.id == id)
    }

    /// Finds a job by id.
    pub fn job(&self, id: &str) -> Option<&Job> {
        self.jobs.iter().find(|j| j.id == id)
    }

    /// Finds a task by id.
    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// The existing assignment of a task, if it is placed.
    pub fn assignment_for_task(&self, task_id: &str) -> Option<&TaskAssignment> {
        self.assignments.iter().find(|a| a.task_id == task_id)
    }

    /// All assignments on a station.
    pub fn assignments_for_station(&self, station_id: &str) -> Vec<&TaskAssignment> {
        self.assignments
            .iter()
            .filter(|a| !a.is_outsourced && a.target_id == station_id)
            .collect()
    }

    /// All assignments on any station of a group.
    pub fn assignments_for_group(&self, group_id: &str) -> Vec<&TaskAssignment> {
        let members: Vec<&str> = self
            .stations
            .iter()
            .filter(|s| s.group_id == group_id)
            .map(|s| s.id.as_str())
            .collect();

        self.assignments
            .iter()
            .filter(|a| !a.is_outsourced && members.contains(&a.target_id.as_str()))
            .collect()
    }

    /// A job's tasks in production order.
    pub fn tasks_for_job(&self, job_id: &str) -> Vec<&Task> {
        let mut tasks: Vec<&Task> = self.tasks.iter().filter(|t| t.job_id == job_id).collect();
        tasks.sort_by_key(|t| t.sequence_order);
        tasks
    }

    /// The task immediately before `task` in its job, or `None` if it is first.
    pub fn predecessor_task(&self, task: &Task) -> Option<&Task> {
        self.tasks
            .iter()
            .filter(|t| t.job_id == task.job_id && t.sequence_order < task.sequence_order)
            .max_by_key(|t| t.sequence_order)
    }
}
