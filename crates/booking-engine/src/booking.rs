//! The booking flow: fetch, validate, check for conflicts, submit.
//!
//! [`BookingFlow::evaluate`] is the pure decision over data already in hand.
//! [`BookingFlow::book`] drives a [`ReservationGateway`] through the whole
//! sequence and applies the configured [`ConflictPolicy`] when the gateway
//! cannot list a court's reservations.
//!
//! Between the conflict check and `submit` another client may claim the same
//! slot. The flow does not (and cannot) close that window.

use chrono::{DateTime, Utc};

use crate::conflict::{find_conflicts, Conflict};
use crate::error::{BookingError, Result};
use crate::reservation::{non_blank, ExistingReservation, ReservationCandidate};
use crate::rules::{BookingRules, ConflictPolicy};
use crate::session::Session;
use crate::validator::{validate_with, ValidationError};

/// External store of reservations, typically a REST backend.
pub trait ReservationGateway {
    type Error: std::fmt::Display;

    /// All reservations on `court_id`, in any status.
    fn reservations_for_court(
        &self,
        court_id: &str,
    ) -> std::result::Result<Vec<ExistingReservation>, Self::Error>;

    /// Persist a new reservation, or update the one named by
    /// `candidate.exclude_id`.
    fn submit(
        &mut self,
        candidate: &ReservationCandidate,
    ) -> std::result::Result<ExistingReservation, Self::Error>;
}

/// Outcome of checking a candidate without submitting it.
#[derive(Debug, Clone, PartialEq)]
pub enum BookingDecision {
    Accepted,
    Rejected(Vec<ValidationError>),
    Conflict(Vec<Conflict>),
}

impl BookingDecision {
    pub fn is_accepted(&self) -> bool {
        matches!(self, BookingDecision::Accepted)
    }
}

/// Outcome of a full booking attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum BookingOutcome {
    Booked(ExistingReservation),
    Rejected(Vec<ValidationError>),
    Conflict(Vec<Conflict>),
}

#[derive(Debug, Clone, Default)]
pub struct BookingFlow {
    rules: BookingRules,
}

impl BookingFlow {
    pub fn new(rules: BookingRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &BookingRules {
        &self.rules
    }

    /// Validate `candidate`, then check it against `existing`.
    ///
    /// Conflicts are only looked for once validation passes.
    pub fn evaluate(
        &self,
        candidate: &ReservationCandidate,
        existing: &[ExistingReservation],
        now: DateTime<Utc>,
    ) -> BookingDecision {
        let errors = validate_with(candidate, now, &self.rules);
        if !errors.is_empty() {
            tracing::debug!(errors = errors.len(), "candidate rejected by validation");
            return BookingDecision::Rejected(errors);
        }

        // Validation guarantees a court is present.
        let court_id = candidate.court().unwrap_or_default();
        let conflicts = find_conflicts(
            &candidate.range,
            court_id,
            existing,
            candidate.exclude_id.as_deref(),
        );
        if conflicts.is_empty() {
            BookingDecision::Accepted
        } else {
            tracing::debug!(court_id, conflicts = conflicts.len(), "candidate conflicts");
            BookingDecision::Conflict(conflicts)
        }
    }

    /// Run the full booking sequence for `session` through `gateway`.
    ///
    /// Ids are trimmed before anything else, so what is checked is what is
    /// submitted. A regular user booking without a `user_id` books for
    /// themselves.
    ///
    /// # Errors
    /// - `BookingError::Forbidden` when a regular user books for someone else.
    /// - `BookingError::ReservationsUnavailable` when the listing fails under
    ///   [`ConflictPolicy::Pessimistic`].
    /// - `BookingError::Gateway` when `submit` fails.
    pub fn book<G: ReservationGateway>(
        &self,
        session: &Session,
        gateway: &mut G,
        candidate: &ReservationCandidate,
        now: DateTime<Utc>,
    ) -> Result<BookingOutcome> {
        let mut candidate = candidate.clone();
        candidate.court_id = candidate.court().map(str::to_string);
        candidate.user_id = candidate.user().map(str::to_string);
        candidate.exclude_id = non_blank(candidate.exclude_id.as_deref()).map(str::to_string);

        match candidate.user().map(str::to_string) {
            Some(target) if !session.can_act_for(&target) => {
                return Err(BookingError::Forbidden {
                    acting: session.user_id.clone(),
                    target,
                });
            }
            Some(_) => {}
            None if !session.is_admin() => candidate.user_id = Some(session.user_id.clone()),
            None => {}
        }

        let existing = match candidate.court() {
            Some(court_id) => self.fetch_existing(gateway, court_id)?,
            None => Vec::new(),
        };

        match self.evaluate(&candidate, &existing, now) {
            BookingDecision::Accepted => {}
            BookingDecision::Rejected(errors) => return Ok(BookingOutcome::Rejected(errors)),
            BookingDecision::Conflict(conflicts) => return Ok(BookingOutcome::Conflict(conflicts)),
        }

        let stored = gateway
            .submit(&candidate)
            .map_err(|e| BookingError::Gateway(e.to_string()))?;
        tracing::info!(reservation_id = %stored.id, court_id = %stored.court_id, "reservation booked");
        Ok(BookingOutcome::Booked(stored))
    }

    fn fetch_existing<G: ReservationGateway>(
        &self,
        gateway: &G,
        court_id: &str,
    ) -> Result<Vec<ExistingReservation>> {
        match gateway.reservations_for_court(court_id) {
            Ok(existing) => Ok(existing),
            Err(e) => match self.rules.conflict_policy {
                ConflictPolicy::Optimistic => {
                    tracing::warn!(court_id, error = %e, "reservations unavailable, assuming no conflicts");
                    Ok(Vec::new())
                }
                ConflictPolicy::Pessimistic => Err(BookingError::ReservationsUnavailable {
                    court_id: court_id.to_string(),
                    reason: e.to_string(),
                }),
            },
        }
    }
}
