//! Reservation records and the decoding of backend payloads.
//!
//! The backend answers reservation queries in several shapes: a bare record, a
//! bare array, or either wrapped as `{"schedule": ...}` / `{"schedules": [...]}`.
//! [`decode_reservations`] resolves the shape once, at the boundary, so the
//! rest of the crate only ever sees `Vec<ExistingReservation>`.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Result;
use crate::time_range::TimeRange;

/// Status given to a candidate when the caller does not supply one.
pub const DEFAULT_STATUS: &str = "agendado";

fn default_status() -> String {
    DEFAULT_STATUS.to_string()
}

/// Identifiers arrive as strings or integers depending on the endpoint.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
        }
    }
}

fn deserialize_id<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    RawId::deserialize(deserializer).map(String::from)
}

fn deserialize_opt_id<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error> {
    Ok(Option::<RawId>::deserialize(deserializer)?.map(String::from))
}

/// A booking the user is trying to create or edit.
///
/// `court_id` and `user_id` are optional so that an incomplete form can still
/// be checked; [`crate::validator::validate`] reports them as missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationCandidate {
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub court_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub user_id: Option<String>,
    #[serde(flatten)]
    pub range: TimeRange,
    #[serde(default = "default_status")]
    pub status: String,
    /// Id of the reservation being edited, ignored by conflict checks.
    #[serde(
        default,
        deserialize_with = "deserialize_opt_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub exclude_id: Option<String>,
}

impl ReservationCandidate {
    pub fn new(court_id: impl Into<String>, user_id: impl Into<String>, range: TimeRange) -> Self {
        Self {
            court_id: Some(court_id.into()),
            user_id: Some(user_id.into()),
            range,
            status: default_status(),
            exclude_id: None,
        }
    }

    /// Mark this candidate as an edit of reservation `id`.
    pub fn editing(mut self, id: impl Into<String>) -> Self {
        self.exclude_id = Some(id.into());
        self
    }

    /// The court id, if present and not blank.
    pub fn court(&self) -> Option<&str> {
        non_blank(self.court_id.as_deref())
    }

    /// The user id, if present and not blank.
    pub fn user(&self) -> Option<&str> {
        non_blank(self.user_id.as_deref())
    }
}

pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// A stored reservation as returned by the backend. Read-only input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExistingReservation {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(deserialize_with = "deserialize_id")]
    pub court_id: String,
    #[serde(flatten)]
    pub range: TimeRange,
    pub status: String,
    #[serde(
        default,
        deserialize_with = "deserialize_opt_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub user_id: Option<String>,
}

impl ExistingReservation {
    pub fn new(
        id: impl Into<String>,
        court_id: impl Into<String>,
        range: TimeRange,
        status: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            court_id: court_id.into(),
            range,
            status: status.into(),
            user_id: None,
        }
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }
}

/// Every payload shape the backend is known to produce.
///
/// Variant order matters: wrapped forms are tried before the bare record so
/// that an object carrying `schedule`/`schedules` is never read as a record.
#[derive(Deserialize)]
#[serde(untagged)]
enum Envelope {
    List(Vec<ExistingReservation>),
    Many { schedules: Vec<ExistingReservation> },
    One { schedule: ExistingReservation },
    Bare(ExistingReservation),
}

impl From<Envelope> for Vec<ExistingReservation> {
    fn from(envelope: Envelope) -> Self {
        match envelope {
            Envelope::Many { schedules } => schedules,
            Envelope::One { schedule } => vec![schedule],
            Envelope::List(list) => list,
            Envelope::Bare(record) => vec![record],
        }
    }
}

/// Decode a backend reservation payload into a flat list.
///
/// Accepts a bare array, a bare object, `{"schedule": {...}}` or
/// `{"schedules": [...]}`. Timestamps must be RFC 3339.
///
/// # Errors
/// Returns `BookingError::Decode` for invalid JSON or any other shape.
pub fn decode_reservations(json: &str) -> Result<Vec<ExistingReservation>> {
    let envelope: Envelope = serde_json::from_str(json)?;
    Ok(envelope.into())
}
