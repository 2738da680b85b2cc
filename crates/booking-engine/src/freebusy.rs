//! Compute a court's free time slots from its reservations.
//!
//! Sorts the court's active reservations by start time, merges overlapping or
//! adjacent ones, then reports the gaps between them within a window.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::reservation::ExistingReservation;
use crate::status::is_cancelled;
use crate::time_range::TimeRange;

/// A free time slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FreeSlot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration_minutes: i64,
}

impl FreeSlot {
    fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start,
            end,
            duration_minutes: (end - start).num_minutes(),
        }
    }

    pub fn range(&self) -> TimeRange {
        TimeRange::new(self.start, self.end)
    }
}

/// Merge the court's active reservations, clipped to `window`.
///
/// Returns a sorted, non-overlapping list of (start, end) intervals.
fn merge_busy_periods(
    court_id: &str,
    existing: &[ExistingReservation],
    window: &TimeRange,
) -> Vec<(DateTime<Utc>, DateTime<Utc>)> {
    let mut intervals: Vec<(DateTime<Utc>, DateTime<Utc>)> = existing
        .iter()
        .filter(|r| r.court_id == court_id && !is_cancelled(&r.status))
        .filter(|r| r.range.start < r.range.end)
        .filter(|r| r.range.start < window.end && r.range.end > window.start)
        .map(|r| (r.range.start.max(window.start), r.range.end.min(window.end)))
        .collect();

    intervals.sort_by_key(|&(start, end)| (start, end));

    let mut merged: Vec<(DateTime<Utc>, DateTime<Utc>)> = Vec::new();
    for (start, end) in intervals {
        if let Some(last) = merged.last_mut() {
            if start <= last.1 {
                last.1 = last.1.max(end);
                continue;
            }
        }
        merged.push((start, end));
    }

    merged
}

/// Free slots on `court_id` within `window`, sorted by start time.
///
/// Cancelled reservations and other courts are ignored. An inverted or empty
/// window has no free slots.
pub fn find_free_slots(
    court_id: &str,
    existing: &[ExistingReservation],
    window: &TimeRange,
) -> Vec<FreeSlot> {
    if window.start >= window.end {
        return Vec::new();
    }

    let mut free_slots = Vec::new();
    let mut cursor = window.start;

    for (busy_start, busy_end) in merge_busy_periods(court_id, existing, window) {
        if cursor < busy_start {
            free_slots.push(FreeSlot::new(cursor, busy_start));
        }
        cursor = cursor.max(busy_end);
    }

    if cursor < window.end {
        free_slots.push(FreeSlot::new(cursor, window.end));
    }

    free_slots
}

/// The first free slot on `court_id` of at least `min_duration_minutes`.
pub fn find_first_free_slot(
    court_id: &str,
    existing: &[ExistingReservation],
    window: &TimeRange,
    min_duration_minutes: i64,
) -> Option<FreeSlot> {
    find_free_slots(court_id, existing, window)
        .into_iter()
        .find(|slot| slot.duration_minutes >= min_duration_minutes)
}
