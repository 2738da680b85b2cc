//! Booking rules: the configurable bounds and policies.
//!
//! Every field has a default, so an empty JSON object (or no configuration at
//! all) yields the standard rules: 30 minutes to 8 hours, optimistic conflict
//! policy, UTC wall-clock input.

use chrono::Duration;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{BookingError, Result};

/// What to do when the existing reservations for a court cannot be fetched.
///
/// The overlap check itself never sees this case; it always runs on a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictPolicy {
    /// Proceed as if the court had no reservations. Risks double booking when
    /// the backend is unreachable.
    #[default]
    Optimistic,
    /// Refuse to book without a reservation list.
    Pessimistic,
}

/// Validation bounds and booking policies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BookingRules {
    /// Shortest allowed booking, inclusive.
    pub min_duration_minutes: i64,
    /// Longest allowed booking, inclusive.
    pub max_duration_minutes: i64,
    pub conflict_policy: ConflictPolicy,
    /// IANA timezone used to read naive wall-clock input.
    pub timezone: String,
}

impl Default for BookingRules {
    fn default() -> Self {
        Self {
            min_duration_minutes: 30,
            max_duration_minutes: 8 * 60,
            conflict_policy: ConflictPolicy::Optimistic,
            timezone: "UTC".to_string(),
        }
    }
}

impl BookingRules {
    /// Parse rules from JSON and check them with [`BookingRules::validate`].
    ///
    /// # Errors
    /// `BookingError::Decode` for malformed JSON or unknown fields, otherwise
    /// whatever `validate` reports.
    pub fn from_json(json: &str) -> Result<Self> {
        let rules: BookingRules = serde_json::from_str(json)?;
        rules.validate()?;
        Ok(rules)
    }

    /// Reject bounds that no booking could satisfy and unknown timezones.
    pub fn validate(&self) -> Result<()> {
        if self.min_duration_minutes <= 0 {
            return Err(BookingError::InvalidRules(format!(
                "min_duration_minutes must be positive, got {}",
                self.min_duration_minutes
            )));
        }
        if self.max_duration_minutes < self.min_duration_minutes {
            return Err(BookingError::InvalidRules(format!(
                "max_duration_minutes ({}) is below min_duration_minutes ({})",
                self.max_duration_minutes, self.min_duration_minutes
            )));
        }
        self.tz()?;
        Ok(())
    }

    pub fn min_duration(&self) -> Duration {
        Duration::minutes(self.min_duration_minutes)
    }

    pub fn max_duration(&self) -> Duration {
        Duration::minutes(self.max_duration_minutes)
    }

    pub fn tz(&self) -> Result<Tz> {
        self.timezone
            .parse()
            .map_err(|_| BookingError::InvalidTimezone(self.timezone.clone()))
    }
}
