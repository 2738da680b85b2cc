//! WASM bindings for booking-engine.
//!
//! Exposes reservation validation, conflict detection, status classification
//! and free-slot search to the browser client via `wasm-bindgen`. Complex
//! values cross the boundary as JSON strings.
//!
//! Candidate times come straight from `datetime-local` inputs, so they may be
//! naive wall-clock strings; those are read in the `timezone` argument.
//! Existing reservations come from the backend and use RFC 3339.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p booking-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir web/src/wasm/ \
//!   target/wasm32-unknown-unknown/release/booking_engine_wasm.wasm
//! ```

use booking_engine::reservation::DEFAULT_STATUS;
use booking_engine::validator::validation_messages;
use booking_engine::{
    decode_reservations, BookingRules, ExistingReservation, ReservationCandidate, TimeRange,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

/// Candidate as the booking form submits it.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CandidateInput {
    court_id: Option<String>,
    user_id: Option<String>,
    start: String,
    end: String,
    status: Option<String>,
    exclude_id: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ConflictDto {
    id: String,
    court_id: String,
    start: String,
    end: String,
    status: String,
    overlap_minutes: i64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FreeSlotDto {
    start: String,
    end: String,
    duration_minutes: i64,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn parse_datetime(s: &str, timezone: &str) -> Result<DateTime<Utc>, JsValue> {
    booking_engine::parse_instant(s, timezone).map_err(js_err)
}

fn parse_candidate(json: &str, timezone: &str) -> Result<ReservationCandidate, JsValue> {
    let input: CandidateInput = serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid candidate JSON: {}", e)))?;

    let range = TimeRange::new(
        parse_datetime(&input.start, timezone)?,
        parse_datetime(&input.end, timezone)?,
    );
    Ok(ReservationCandidate {
        court_id: input.court_id,
        user_id: input.user_id,
        range,
        status: input.status.unwrap_or_else(|| DEFAULT_STATUS.to_string()),
        exclude_id: input.exclude_id,
    })
}

fn parse_existing(json: &str) -> Result<Vec<ExistingReservation>, JsValue> {
    decode_reservations(json).map_err(js_err)
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// The court and excluded id a conflict check runs with.
///
/// Explicit arguments win; otherwise the candidate's own `courtId` and
/// `excludeId` apply. Blank values count as absent.
fn conflict_target(
    candidate: &ReservationCandidate,
    court_id: Option<String>,
    exclude_id: Option<String>,
) -> Result<(String, Option<String>), JsValue> {
    let court = court_id
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .or_else(|| candidate.court())
        .map(str::to_string)
        .ok_or_else(|| JsValue::from_str("Missing court id"))?;
    let exclude = exclude_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .or_else(|| candidate.exclude_id.as_deref().map(str::trim).filter(|id| !id.is_empty()))
        .map(str::to_string);
    Ok((court, exclude))
}

fn rules_for(min_minutes: Option<i64>, max_minutes: Option<i64>) -> Result<BookingRules, JsValue> {
    let defaults = BookingRules::default();
    let rules = BookingRules {
        min_duration_minutes: min_minutes.unwrap_or(defaults.min_duration_minutes),
        max_duration_minutes: max_minutes.unwrap_or(defaults.max_duration_minutes),
        ..defaults
    };
    rules.validate().map_err(js_err)?;
    Ok(rules)
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Validate a candidate reservation.
///
/// Returns a JSON array of error messages; an empty array means valid.
///
/// # Arguments
/// - `candidate_json` -- `{courtId, userId, start, end, status?, excludeId?}`
/// - `now` -- current instant, ISO 8601
/// - `timezone` -- IANA timezone used for naive datetimes (e.g., "America/Sao_Paulo")
/// - `min_minutes` / `max_minutes` -- optional duration bounds (defaults 30 / 480)
#[wasm_bindgen(js_name = "validateReservation")]
pub fn validate_reservation(
    candidate_json: &str,
    now: &str,
    timezone: &str,
    min_minutes: Option<i64>,
    max_minutes: Option<i64>,
) -> Result<String, JsValue> {
    let candidate = parse_candidate(candidate_json, timezone)?;
    let now = parse_datetime(now, timezone)?;
    let rules = rules_for(min_minutes, max_minutes)?;

    to_json(&validation_messages(&candidate, now, &rules))
}

/// Whether the candidate overlaps an active reservation on its court.
///
/// `existing_json` is the backend payload (bare record, array, or wrapped in
/// `schedule`/`schedules`). `court_id` and `exclude_id` default to the
/// candidate's `courtId` and `excludeId` when omitted.
#[wasm_bindgen(js_name = "hasConflict")]
pub fn has_conflict(
    candidate_json: &str,
    court_id: Option<String>,
    existing_json: &str,
    exclude_id: Option<String>,
    timezone: &str,
) -> Result<bool, JsValue> {
    let candidate = parse_candidate(candidate_json, timezone)?;
    let existing = parse_existing(existing_json)?;
    let (court, exclude) = conflict_target(&candidate, court_id, exclude_id)?;

    Ok(booking_engine::has_conflict(
        &candidate.range,
        &court,
        &existing,
        exclude.as_deref(),
    ))
}

/// List every active reservation on the candidate's court that overlaps it.
///
/// Court and exclusion resolve as in [`has_conflict`]. Returns a JSON array of
/// `{id, courtId, start, end, status, overlapMinutes}`.
#[wasm_bindgen(js_name = "findConflicts")]
pub fn find_conflicts(
    candidate_json: &str,
    court_id: Option<String>,
    existing_json: &str,
    exclude_id: Option<String>,
    timezone: &str,
) -> Result<String, JsValue> {
    let candidate = parse_candidate(candidate_json, timezone)?;
    let existing = parse_existing(existing_json)?;
    let (court, exclude) = conflict_target(&candidate, court_id, exclude_id)?;

    let conflicts =
        booking_engine::find_conflicts(&candidate.range, &court, &existing, exclude.as_deref());

    let dtos: Vec<ConflictDto> = conflicts
        .into_iter()
        .map(|c| ConflictDto {
            start: c.reservation.range.start.to_rfc3339(),
            end: c.reservation.range.end.to_rfc3339(),
            id: c.reservation.id,
            court_id: c.reservation.court_id,
            status: c.reservation.status,
            overlap_minutes: c.overlap_minutes,
        })
        .collect();

    to_json(&dtos)
}

/// Classify a stored reservation relative to `now`.
///
/// `now` may be naive wall-clock time in `timezone`. Returns one of
/// `"cancelled"`, `"completed"`, `"upcoming"`, `"in_progress"`.
#[wasm_bindgen(js_name = "classifyReservation")]
pub fn classify_reservation(
    reservation_json: &str,
    now: &str,
    timezone: &str,
) -> Result<String, JsValue> {
    let records = parse_existing(reservation_json)?;
    let record = match records.as_slice() {
        [single] => single,
        _ => return Err(JsValue::from_str("Expected exactly one reservation")),
    };
    let now = parse_datetime(now, timezone)?;

    Ok(booking_engine::classify(&record.status, &record.range, now)
        .as_str()
        .to_string())
}

/// Free slots on `court_id` between `window_start` and `window_end`.
///
/// Returns a JSON array of `{start, end, durationMinutes}` objects.
#[wasm_bindgen(js_name = "findFreeSlots")]
pub fn find_free_slots(
    court_id: &str,
    existing_json: &str,
    window_start: &str,
    window_end: &str,
    timezone: &str,
) -> Result<String, JsValue> {
    let existing = parse_existing(existing_json)?;
    let window = TimeRange::new(
        parse_datetime(window_start, timezone)?,
        parse_datetime(window_end, timezone)?,
    );

    let dtos: Vec<FreeSlotDto> = booking_engine::find_free_slots(court_id, &existing, &window)
        .iter()
        .map(|s| FreeSlotDto {
            start: s.start.to_rfc3339(),
            end: s.end.to_rfc3339(),
            duration_minutes: s.duration_minutes,
        })
        .collect();

    to_json(&dtos)
}
