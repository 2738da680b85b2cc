//! # booking-engine
//!
//! Reservation validation and scheduling conflict detection for sports courts.
//!
//! The engine answers two questions about a proposed booking: are its fields
//! acceptable, and does it collide with an active reservation on the same
//! court? Both answers are plain data. Nothing here performs I/O; fetching and
//! storing reservations goes through the [`booking::ReservationGateway`] trait
//! implemented by the caller.
//!
//! ## Modules
//!
//! - [`time_range`] — half-open `[start, end)` ranges, durations, instant parsing
//! - [`validator`] — field rules for a candidate booking
//! - [`conflict`] — overlap detection against a court's reservations
//! - [`status`] — cancelled / completed / upcoming / in-progress classification
//! - [`freebusy`] — free slots on a court within a window
//! - [`booking`] — the fetch → validate → check → submit flow
//! - [`reservation`] — reservation records and backend payload decoding
//! - [`rules`] — configurable bounds and policies
//! - [`session`] — explicit identity context
//! - [`error`] — Error types

pub mod booking;
pub mod conflict;
pub mod error;
pub mod freebusy;
pub mod reservation;
pub mod rules;
pub mod session;
pub mod status;
pub mod time_range;
pub mod validator;

pub use booking::{BookingDecision, BookingFlow, BookingOutcome, ReservationGateway};
pub use conflict::{find_conflicts, has_conflict, Conflict};
pub use error::BookingError;
pub use freebusy::{find_first_free_slot, find_free_slots, FreeSlot};
pub use reservation::{decode_reservations, ExistingReservation, ReservationCandidate};
pub use rules::{BookingRules, ConflictPolicy};
pub use session::{Role, Session};
pub use status::{classify, is_cancelled, is_completed, is_upcoming, StatusBucket};
pub use time_range::{parse_instant, TimeRange};
pub use validator::{validate, validate_with, ValidationError};
