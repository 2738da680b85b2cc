//! Detect scheduling conflicts between a candidate booking and a court's
//! existing reservations.
//!
//! Only reservations on the same court, not cancelled, and not the one being
//! edited can block a candidate. Back-to-back bookings (one ends exactly when
//! the other starts) are NOT conflicts.
//!
//! The check is advisory: nothing stops another booking from being stored
//! between a negative answer here and the caller's submit. Preventing double
//! booking outright is the persistence layer's job.

use serde::Serialize;

use crate::reservation::ExistingReservation;
use crate::status::is_cancelled;
use crate::time_range::TimeRange;

/// An existing reservation that overlaps the candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conflict {
    pub reservation: ExistingReservation,
    pub overlap_minutes: i64,
}

/// Reservations that can block a candidate on `court_id`.
fn blocking<'a>(
    court_id: &'a str,
    existing: &'a [ExistingReservation],
    exclude_id: Option<&'a str>,
) -> impl Iterator<Item = &'a ExistingReservation> + 'a {
    existing
        .iter()
        .filter(move |r| r.court_id == court_id)
        .filter(move |r| exclude_id != Some(r.id.as_str()))
        .filter(|r| !is_cancelled(&r.status))
}

/// Whether `candidate` overlaps any active reservation on `court_id`.
///
/// `exclude_id` names the reservation being edited so it does not conflict
/// with itself. Stops at the first overlap. An empty `existing` list always
/// yields `false`.
pub fn has_conflict(
    candidate: &TimeRange,
    court_id: &str,
    existing: &[ExistingReservation],
    exclude_id: Option<&str>,
) -> bool {
    match blocking(court_id, existing, exclude_id).find(|r| candidate.overlaps(&r.range)) {
        Some(hit) => {
            tracing::debug!(court_id, reservation_id = %hit.id, "candidate overlaps existing reservation");
            true
        }
        None => false,
    }
}

/// Every active reservation on `court_id` that overlaps `candidate`, in input
/// order, with the number of minutes shared.
pub fn find_conflicts(
    candidate: &TimeRange,
    court_id: &str,
    existing: &[ExistingReservation],
    exclude_id: Option<&str>,
) -> Vec<Conflict> {
    blocking(court_id, existing, exclude_id)
        .filter(|r| candidate.overlaps(&r.range))
        .map(|r| Conflict {
            reservation: r.clone(),
            overlap_minutes: candidate.overlap_minutes(&r.range),
        })
        .collect()
}
