//! Station, station group and outsourced provider models.
//!
//! Stations are the machines that run internal tasks. Each belongs to a
//! group, the capacity domain that bounds how many of its stations may
//! be busy at once. Providers are external companies that run
//! outsourced tasks with unlimited capacity.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use super::calendar::{first_uncovered, merge_windows};
use super::{DaySchedule, OperatingSchedule, ScheduleException};
use crate::time_range::TimeRange;

/// A physical machine or workstation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    /// Unique station identifier.
    pub id: String,
    /// Display name (e.g. "Komori G40").
    #[serde(default)]
    pub name: String,
    /// Current operating status.
    #[serde(default)]
    pub status: StationStatus,
    /// Station category (offset press, digital press, cutter, ...).
    #[serde(default)]
    pub category_id: String,
    /// Capacity group this station belongs to.
    pub group_id: String,
    /// Weekly opening pattern.
    #[serde(default)]
    pub operating_schedule: OperatingSchedule,
    /// Date-specific overrides of the weekly pattern.
    #[serde(default)]
    pub exceptions: Vec<ScheduleException>,
}

/// Operating status of a station.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StationStatus {
    #[default]
    Available,
    InUse,
    Maintenance,
    OutOfService,
}

/// A capacity domain spanning one or more stations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationGroup {
    /// Unique group identifier.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Ceiling on simultaneously active tasks across member stations.
    /// `None` = unlimited.
    pub max_concurrent: Option<u32>,
    /// Whether this is the catch-all group of outsourced providers.
    #[serde(default)]
    pub is_outsourced_provider_group: bool,
}

/// An external company performing outsourced work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutsourcedProvider {
    /// Unique provider identifier.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Action types this provider performs (e.g. "Pelliculage").
    #[serde(default)]
    pub supported_action_types: Vec<String>,
    /// Associated (always unlimited) group.
    pub group_id: String,
}

impl Station {
    /// Creates an available station with a closed schedule.
    pub fn new(id: impl Into<String>, group_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            status: StationStatus::Available,
            category_id: String::new(),
            group_id: group_id.into(),
            operating_schedule: OperatingSchedule::closed(),
            exceptions: Vec::new(),
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the category.
    pub fn with_category(mut self, category_id: impl Into<String>) -> Self {
        self.category_id = category_id.into();
        self
    }

    /// Sets the status.
    pub fn with_status(mut self, status: StationStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the weekly opening pattern.
    pub fn with_schedule(mut self, schedule: OperatingSchedule) -> Self {
        self.operating_schedule = schedule;
        self
    }

    /// Adds a date-specific exception.
    pub fn with_exception(mut self, exception: ScheduleException) -> Self {
        self.exceptions.push(exception);
        self
    }

    /// Effective pattern for a date: its exception if any, else the weekday's.
    pub fn day_schedule(&self, date: NaiveDate) -> &DaySchedule {
        self.exceptions
            .iter()
            .find(|e| e.date == date)
            .map(|e| &e.schedule)
            .unwrap_or_else(|| self.operating_schedule.for_weekday(date.weekday()))
    }

    /// Merged open windows relevant to `range`.
    ///
    /// Covers every date the range touches, plus the day before so that
    /// slots running past midnight into the range are included.
    pub fn open_windows(&self, range: &TimeRange) -> Vec<TimeRange> {
        let first = range.start.date_naive();
        let first = first.pred_opt().unwrap_or(first);
        let last = if range.is_empty() {
            range.start.date_naive()
        } else {
            (range.end - Duration::milliseconds(1)).date_naive()
        };

        let windows = first
            .iter_days()
            .take_while(|date| *date <= last)
            .flat_map(|date| self.day_schedule(date).windows_on(date))
            .collect();
        merge_windows(windows)
    }

    /// First instant of `range` at which the station is closed, if any.
    ///
    /// Walks the calendar one day at a time from the day before `range`
    /// starts and stops at the first gap, so the cost depends on where the
    /// gap lies rather than on the length of `range`.
    pub fn first_closed_instant(&self, range: &TimeRange) -> Option<DateTime<Utc>> {
        if range.is_empty() {
            return first_uncovered(&self.open_windows(range), range);
        }

        let first = range.start.date_naive();
        let first = first.pred_opt().unwrap_or(first);
        let mut cursor = range.start;
        for date in first.iter_days() {
            // Windows of this and later days open at or after midnight.
            if date.and_time(NaiveTime::MIN).and_utc() > cursor {
                return Some(cursor);
            }
            let mut windows = self.day_schedule(date).windows_on(date);
            windows.sort_by_key(|w| w.start);
            for w in windows {
                if w.is_empty() || w.end <= cursor {
                    continue;
                }
                if w.start > cursor {
                    return Some(cursor);
                }
                cursor = w.end;
                if cursor >= range.end {
                    return None;
                }
            }
        }
        Some(cursor)
    }

    /// Whether the station is open for the whole of `range`.
    pub fn is_open_during(&self, range: &TimeRange) -> bool {
        self.first_closed_instant(range).is_none()
    }
}

impl StationGroup {
    /// Creates a group with a concurrency ceiling.
    pub fn new(id: impl Into<String>, max_concurrent: u32) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            max_concurrent: Some(max_concurrent),
            is_outsourced_provider_group: false,
        }
    }

    /// Creates a group without a ceiling.
    pub fn unlimited(id: impl Into<String>) -> Self {
        Self {
            max_concurrent: None,
            ..Self::new(id, 0)
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Marks this as the outsourced provider group.
    pub fn for_providers(mut self) -> Self {
        self.is_outsourced_provider_group = true;
        self.max_concurrent = None;
        self
    }
}

impl OutsourcedProvider {
    /// Creates a provider.
    pub fn new(id: impl Into<String>, group_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            supported_action_types: Vec::new(),
            group_id: group_id.into(),
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds a supported action type.
    pub fn with_action_type(mut self, action_type: impl Into<String>) -> Self {
        self.supported_action_types.push(action_type.into());
        self
    }

    /// Whether this provider performs an action type.
    pub fn supports(&self, action_type: &str) -> bool {
        self.supported_action_types.iter().any(|a| a == action_type)
    }
}
