//! Error types for booking-engine operations.
//!
//! Validation failures and scheduling conflicts are ordinary results and never
//! appear here; this enum covers malformed input at the boundaries and
//! failures of the booking flow itself.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Invalid datetime '{input}': {reason}")]
    InvalidDatetime { input: String, reason: String },

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid reservation payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid booking rules: {0}")]
    InvalidRules(String),

    #[error("User '{acting}' may not book on behalf of '{target}'")]
    Forbidden { acting: String, target: String },

    #[error("Existing reservations for court '{court_id}' are unavailable: {reason}")]
    ReservationsUnavailable { court_id: String, reason: String },

    #[error("Reservation gateway error: {0}")]
    Gateway(String),
}

pub type Result<T> = std::result::Result<T, BookingError>;
