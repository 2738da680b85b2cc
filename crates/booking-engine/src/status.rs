//! Reservation status classification.
//!
//! Statuses are free-form strings supplied by the backend ("agendado",
//! "confirmado", "cancelado", "concluido", or their English equivalents).
//! Only the cancelled and completed families carry meaning here; every other
//! value is treated as an active booking.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::time_range::TimeRange;

/// Status values meaning the reservation no longer holds its slot.
pub const CANCELLED_STATUSES: &[&str] = &["cancelado", "cancelled"];

/// Status values meaning the reservation has been played out.
pub const COMPLETED_STATUSES: &[&str] = &["concluido", "completed"];

/// Display bucket for a reservation relative to `now`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusBucket {
    Cancelled,
    Completed,
    Upcoming,
    /// Started but not yet over: `start < now <= end`, neither cancelled nor
    /// marked completed. None of the three predicates below match this case.
    InProgress,
}

impl StatusBucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusBucket::Cancelled => "cancelled",
            StatusBucket::Completed => "completed",
            StatusBucket::Upcoming => "upcoming",
            StatusBucket::InProgress => "in_progress",
        }
    }
}

impl fmt::Display for StatusBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn matches_any(status: &str, family: &[&str]) -> bool {
    family.iter().any(|s| status.eq_ignore_ascii_case(s))
}

/// Case-insensitive match against [`CANCELLED_STATUSES`].
pub fn is_cancelled(status: &str) -> bool {
    matches_any(status, CANCELLED_STATUSES)
}

/// Marked completed, or already over (`range.end < now`).
pub fn is_completed(status: &str, range: &TimeRange, now: DateTime<Utc>) -> bool {
    matches_any(status, COMPLETED_STATUSES) || range.end < now
}

/// Not cancelled and not yet started (`range.start >= now`).
pub fn is_upcoming(status: &str, range: &TimeRange, now: DateTime<Utc>) -> bool {
    !is_cancelled(status) && range.start >= now
}

/// Assign exactly one [`StatusBucket`].
///
/// Precedence is cancelled, then completed, then upcoming. A reservation that
/// matches none of them is [`StatusBucket::InProgress`].
pub fn classify(status: &str, range: &TimeRange, now: DateTime<Utc>) -> StatusBucket {
    if is_cancelled(status) {
        StatusBucket::Cancelled
    } else if is_completed(status, range, now) {
        StatusBucket::Completed
    } else if is_upcoming(status, range, now) {
        StatusBucket::Upcoming
    } else {
        StatusBucket::InProgress
    }
}
