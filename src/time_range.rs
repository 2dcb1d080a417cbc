//! Time-interval arithmetic shared by the validation rules.
//!
//! All ranges are half-open `[start, end)`: touching ranges
//! (`a.end == b.start`) neither overlap nor compete for capacity.
//!
//! # Reference
//! de Berg et al. (2008), "Computational Geometry", Ch. 2 (sweep-line)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::serde_time::iso_millis;
use crate::models::Task;

/// A time interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeRange {
    /// Interval start (inclusive).
    #[serde(with = "iso_millis")]
    pub start: DateTime<Utc>,
    /// Interval end (exclusive).
    #[serde(with = "iso_millis")]
    pub end: DateTime<Utc>,
}

impl TimeRange {
    /// Creates a new range.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Range a task would occupy starting at `start`.
    pub fn for_task(task: &Task, start: DateTime<Utc>) -> Self {
        Self::new(start, calculate_end_time(task, start))
    }

    /// Length of the range.
    #[inline]
    pub fn duration(&self) -> chrono::Duration {
        self.end - self.start
    }

    /// Whether the range contains no instant.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Whether an instant falls within this range.
    #[inline]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant < self.end
    }

    /// Whether two ranges overlap.
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        ranges_overlap(self, other)
    }
}

/// Whether two ranges share at least one instant.
#[inline]
pub fn ranges_overlap(a: &TimeRange, b: &TimeRange) -> bool {
    a.start < b.end && b.start < a.end
}

/// End of a task started at `start`.
///
/// Internal tasks take `setup + run` minutes. Outsourced tasks take
/// `open_days` calendar days; weekends and holidays are not skipped.
/// Saturates at the latest representable instant.
pub fn calculate_end_time(task: &Task, start: DateTime<Utc>) -> DateTime<Utc> {
    start
        .checked_add_signed(task.duration())
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Maximum number of ranges active at the same instant.
///
/// # Algorithm
/// Sweep line over `+1` (start) / `-1` (end) events sorted by time. At
/// equal timestamps end events come first, so an interval that ends frees
/// its slot before one that starts claims it. Empty and inverted ranges
/// contribute nothing.
///
/// # Complexity
/// O(n log n)
pub fn get_max_concurrent(ranges: &[TimeRange]) -> usize {
    let mut events: Vec<(DateTime<Utc>, i8)> = Vec::with_capacity(ranges.len() * 2);
    for r in ranges.iter().filter(|r| !r.is_empty()) {
        events.push((r.start, 1));
        events.push((r.end, -1));
    }
    events.sort_unstable();

    let mut current: usize = 0;
    let mut max: usize = 0;
    for (_, delta) in events {
        if delta > 0 {
            current += 1;
            max = max.max(current);
        } else {
            current -= 1;
        }
    }
    max
}

/// Intersection of two ranges, if they overlap.
pub fn get_overlap(a: &TimeRange, b: &TimeRange) -> Option<TimeRange> {
    let start = a.start.max(b.start);
    let end = a.end.min(b.end);
    (end > start).then(|| TimeRange::new(start, end))
}
