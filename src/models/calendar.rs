//! Station operating calendar.
//!
//! Defines when a station is open: a weekly pattern of open slots per
//! weekday, overridden by one-off exceptions for specific dates
//! (holidays, maintenance days, extra shifts).
//!
//! # Time Model
//! Slot times are wall-clock `"HH:MM"` values interpreted in UTC, the same
//! clock the assignment timestamps use.
//!
//! # Precedence
//! For a given date, an exception for that date replaces the weekly
//! pattern entirely. Otherwise the weekday's [`DaySchedule`] applies.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};

use super::serde_time::hhmm;
use crate::time_range::TimeRange;

/// An open period within a day, `[start, end)`.
///
/// A slot whose end is not after its start runs past midnight into the
/// next day (e.g. a night shift `22:00`-`06:00`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Opening time, minutes after midnight.
    #[serde(with = "hhmm")]
    pub start: u32,
    /// Closing time, minutes after midnight (1440 = `24:00`).
    #[serde(with = "hhmm")]
    pub end: u32,
}

impl TimeSlot {
    /// Creates a slot from minutes after midnight.
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Parses a slot from two `"HH:MM"` strings.
    pub fn parse(start: &str, end: &str) -> Option<Self> {
        Some(Self::new(hhmm::parse(start)?, hhmm::parse(end)?))
    }

    /// Whether this slot runs past midnight.
    #[inline]
    pub fn crosses_midnight(&self) -> bool {
        self.end <= self.start
    }

    /// Absolute window this slot opens on `date`.
    pub fn window_on(&self, date: NaiveDate) -> TimeRange {
        let midnight = date.and_time(NaiveTime::MIN).and_utc();
        let mut end_minutes = i64::from(self.end);
        if self.crosses_midnight() {
            end_minutes += i64::from(hhmm::MINUTES_PER_DAY);
        }
        let offset = |minutes: i64| {
            midnight
                .checked_add_signed(Duration::minutes(minutes))
                .unwrap_or(DateTime::<Utc>::MAX_UTC)
        };
        TimeRange::new(offset(i64::from(self.start)), offset(end_minutes))
    }
}

/// Opening pattern for one day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySchedule {
    /// Whether the station runs at all on this day.
    pub is_operating: bool,
    /// Open periods. Ignored when `is_operating` is false.
    #[serde(default)]
    pub slots: Vec<TimeSlot>,
}

impl DaySchedule {
    /// A closed day.
    pub fn closed() -> Self {
        Self::default()
    }

    /// An operating day with the given slots.
    pub fn open(slots: Vec<TimeSlot>) -> Self {
        Self {
            is_operating: true,
            slots,
        }
    }

    /// Absolute open windows this day contributes, starting on `date`.
    pub fn windows_on(&self, date: NaiveDate) -> Vec<TimeRange> {
        if !self.is_operating {
            return Vec::new();
        }
        self.slots.iter().map(|slot| slot.window_on(date)).collect()
    }
}

/// Weekly operating pattern.
///
/// Days missing from the wire format default to closed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OperatingSchedule {
    pub monday: DaySchedule,
    pub tuesday: DaySchedule,
    pub wednesday: DaySchedule,
    pub thursday: DaySchedule,
    pub friday: DaySchedule,
    pub saturday: DaySchedule,
    pub sunday: DaySchedule,
}

impl OperatingSchedule {
    /// A station that never runs.
    pub fn closed() -> Self {
        Self::default()
    }

    /// Open Monday to Friday with the same slots every day.
    pub fn weekdays(slots: Vec<TimeSlot>) -> Self {
        let day = DaySchedule::open(slots);
        Self {
            monday: day.clone(),
            tuesday: day.clone(),
            wednesday: day.clone(),
            thursday: day.clone(),
            friday: day,
            ..Self::default()
        }
    }

    /// Open every day of the week with the same slots.
    pub fn every_day(slots: Vec<TimeSlot>) -> Self {
        let weekdays = Self::weekdays(slots.clone());
        let day = DaySchedule::open(slots);
        Self {
            saturday: day.clone(),
            sunday: day,
            ..weekdays
        }
    }

    /// Replaces the pattern for one weekday.
    pub fn with_day(mut self, weekday: Weekday, day: DaySchedule) -> Self {
        *self.day_mut(weekday) = day;
        self
    }

    /// Pattern for a weekday.
    pub fn for_weekday(&self, weekday: Weekday) -> &DaySchedule {
        match weekday {
            Weekday::Mon => &self.monday,
            Weekday::Tue => &self.tuesday,
            Weekday::Wed => &self.wednesday,
            Weekday::Thu => &self.thursday,
            Weekday::Fri => &self.friday,
            Weekday::Sat => &self.saturday,
            Weekday::Sun => &self.sunday,
        }
    }

    fn day_mut(&mut self, weekday: Weekday) -> &mut DaySchedule {
        match weekday {
            Weekday::Mon => &mut self.monday,
            Weekday::Tue => &mut self.tuesday,
            Weekday::Wed => &mut self.wednesday,
            Weekday::Thu => &mut self.thursday,
            Weekday::Fri => &mut self.friday,
            Weekday::Sat => &mut self.saturday,
            Weekday::Sun => &mut self.sunday,
        }
    }
}

/// A date-specific override of the weekly pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleException {
    /// Date the override applies to.
    pub date: NaiveDate,
    /// Pattern used instead of the weekday's.
    pub schedule: DaySchedule,
    /// Free-form explanation (e.g. "Maintenance").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ScheduleException {
    /// Closes the station for a whole date.
    pub fn closed(date: NaiveDate) -> Self {
        Self {
            date,
            schedule: DaySchedule::closed(),
            reason: None,
        }
    }

    /// Replaces the slots for a date.
    pub fn open(date: NaiveDate, slots: Vec<TimeSlot>) -> Self {
        Self {
            date,
            schedule: DaySchedule::open(slots),
            reason: None,
        }
    }

    /// Sets the reason.
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

/// Sorts windows and merges those that overlap or touch.
pub(crate) fn merge_windows(mut windows: Vec<TimeRange>) -> Vec<TimeRange> {
    windows.retain(|w| !w.is_empty());
    windows.sort_by_key(|w| (w.start, w.end));

    let mut merged: Vec<TimeRange> = Vec::with_capacity(windows.len());
    for w in windows {
        match merged.last_mut() {
            Some(last) if w.start <= last.end => last.end = last.end.max(w.end),
            _ => merged.push(w),
        }
    }
    merged
}

/// First instant of `range` not covered by `windows`.
///
/// `windows` must be sorted and merged (see [`merge_windows`]). An empty
/// range is covered iff its start lies inside a window.
pub(crate) fn first_uncovered(windows: &[TimeRange], range: &TimeRange) -> Option<DateTime<Utc>> {
    if range.is_empty() {
        return (!windows.iter().any(|w| w.contains(range.start))).then_some(range.start);
    }

    let mut cursor = range.start;
    for w in windows {
        if w.end <= cursor {
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
    Some(cursor)
}
