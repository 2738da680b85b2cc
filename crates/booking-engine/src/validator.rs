//! Field validation for reservation candidates.
//!
//! Every rule is evaluated on every call; a malformed candidate reports all of
//! its problems at once. Duration bounds are checked even when the range is
//! inverted, so `start > end` also yields the minimum-duration error.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::reservation::ReservationCandidate;
use crate::rules::BookingRules;

/// A single reason a candidate cannot be booked.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("start must precede end")]
    StartNotBeforeEnd,

    #[error("start cannot be in the past")]
    StartInPast,

    #[error("minimum duration is {}", describe_minutes(.min_minutes))]
    TooShort { min_minutes: i64 },

    #[error("maximum duration is {}", describe_minutes(.max_minutes))]
    TooLong { max_minutes: i64 },

    #[error("user is required")]
    MissingUser,

    #[error("court is required")]
    MissingCourt,
}

/// "30 minutes", "1 hour", "8 hours", "90 minutes".
fn describe_minutes(minutes: &i64) -> String {
    match *minutes {
        60 => "1 hour".to_string(),
        m if m % 60 == 0 => format!("{} hours", m / 60),
        1 => "1 minute".to_string(),
        m => format!("{} minutes", m),
    }
}

/// Validate `candidate` against the default [`BookingRules`].
pub fn validate(candidate: &ReservationCandidate, now: DateTime<Utc>) -> Vec<ValidationError> {
    validate_with(candidate, now, &BookingRules::default())
}

/// Validate `candidate` against `rules`. An empty result means valid.
///
/// Checks, in order: `start < end`; `start >= now` (starting exactly at `now`
/// is allowed); duration within `[min, max]` inclusive; user present; court
/// present. A blank id counts as missing.
pub fn validate_with(
    candidate: &ReservationCandidate,
    now: DateTime<Utc>,
    rules: &BookingRules,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let range = &candidate.range;

    if range.start >= range.end {
        errors.push(ValidationError::StartNotBeforeEnd);
    }

    if range.start < now {
        errors.push(ValidationError::StartInPast);
    }

    let duration = range.duration();
    if duration < rules.min_duration() {
        errors.push(ValidationError::TooShort {
            min_minutes: rules.min_duration_minutes,
        });
    }
    if duration > rules.max_duration() {
        errors.push(ValidationError::TooLong {
            max_minutes: rules.max_duration_minutes,
        });
    }

    if candidate.user().is_none() {
        errors.push(ValidationError::MissingUser);
    }
    if candidate.court().is_none() {
        errors.push(ValidationError::MissingCourt);
    }

    errors
}

/// Render validation errors as human-readable messages, in order.
pub fn to_messages(errors: &[ValidationError]) -> Vec<String> {
    errors.iter().map(ToString::to_string).collect()
}

/// [`validate_with`] rendered as human-readable messages.
pub fn validation_messages(
    candidate: &ReservationCandidate,
    now: DateTime<Utc>,
    rules: &BookingRules,
) -> Vec<String> {
    to_messages(&validate_with(candidate, now, rules))
}
