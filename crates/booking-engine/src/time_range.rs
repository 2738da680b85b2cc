//! Half-open time ranges and the instant parsing used at the input boundaries.
//!
//! A [`TimeRange`] is `[start, end)`: `start` is inclusive, `end` exclusive, so
//! back-to-back bookings share an instant without overlapping. The type does
//! not enforce `start < end`; form entry can produce inverted ranges and
//! [`crate::validator`] is where those are reported.

use crate::error::{BookingError, Result};
use chrono::{DateTime, Duration, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Naive formats accepted by [`parse_instant`], tried in order.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// A half-open `[start, end)` interval of absolute instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Range of `minutes` length beginning at `start`.
    pub fn starting_at(start: DateTime<Utc>, minutes: i64) -> Self {
        Self {
            start,
            end: start + Duration::minutes(minutes),
        }
    }

    /// Signed length of the range.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// `(end - start)` in fractional hours. Negative when `end < start`.
    pub fn duration_hours(&self) -> f64 {
        self.duration().num_milliseconds() as f64 / 3_600_000.0
    }

    /// `(end - start)` in whole minutes, truncated toward zero.
    pub fn duration_minutes(&self) -> i64 {
        self.duration().num_minutes()
    }

    /// Whether `start <= instant < end`.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }

    /// Whether this range shares any instant with `other`.
    ///
    /// Three cases count as overlap: this range starts inside `other`, ends
    /// inside `other`, or covers `other` entirely. Ranges that only touch at an
    /// endpoint do not overlap.
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        (self.start >= other.start && self.start < other.end)
            || (self.end > other.start && self.end <= other.end)
            || (self.start <= other.start && self.end >= other.end)
    }

    /// Minutes shared with `other`, or 0 when they do not intersect.
    pub fn overlap_minutes(&self, other: &TimeRange) -> i64 {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        if end > start {
            (end - start).num_minutes()
        } else {
            0
        }
    }
}

/// Parse a datetime string into `DateTime<Utc>`.
///
/// RFC 3339 input keeps its own offset. Naive input (`2026-06-10T14:00`,
/// optionally with seconds) is read as wall-clock time in the IANA `timezone`.
/// A wall-clock time skipped by a DST transition is rejected; one repeated by
/// a transition resolves to the earlier instant.
///
/// # Errors
/// Returns `BookingError::InvalidTimezone` if `timezone` is not a valid IANA
/// identifier and the input is naive, and `BookingError::InvalidDatetime` if
/// the string matches no accepted format or names a nonexistent local time.
pub fn parse_instant(input: &str, timezone: &str) -> Result<DateTime<Utc>> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }

    let tz: Tz = timezone
        .parse()
        .map_err(|_| BookingError::InvalidTimezone(timezone.to_string()))?;

    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .ok_or_else(|| BookingError::InvalidDatetime {
            input: input.to_string(),
            reason: "expected RFC 3339 or YYYY-MM-DDTHH:MM[:SS]".to_string(),
        })?;

    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| BookingError::InvalidDatetime {
            input: input.to_string(),
            reason: format!("local time does not exist in {}", timezone),
        })
}

