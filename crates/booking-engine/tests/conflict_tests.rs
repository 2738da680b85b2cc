//! Tests for conflict detection against a court's existing reservations.

use booking_engine::{find_conflicts, has_conflict, ExistingReservation, TimeRange};
use chrono::{TimeZone, Utc};

/// Range on 2026-06-10 from `start_hour:start_min` to `end_hour:end_min` UTC.
fn range(start_hour: u32, start_min: u32, end_hour: u32, end_min: u32) -> TimeRange {
    TimeRange::new(
        Utc.with_ymd_and_hms(2026, 6, 10, start_hour, start_min, 0)
            .unwrap(),
        Utc.with_ymd_and_hms(2026, 6, 10, end_hour, end_min, 0)
            .unwrap(),
    )
}

fn booked(id: &str, court: &str, range: TimeRange) -> ExistingReservation {
    ExistingReservation::new(id, court, range, "confirmado")
}

// ── Empty and trivial inputs ────────────────────────────────────────────────

#[test]
fn empty_list_never_conflicts() {
    assert!(!has_conflict(&range(9, 0, 10, 0), "C1", &[], None));
    assert!(!has_conflict(&range(9, 0, 10, 0), "C1", &[], Some("r1")));
}

#[test]
fn reservation_does_not_conflict_with_itself_when_edited() {
    let r = booked("r1", "C1", range(9, 0, 10, 0));
    assert!(!has_conflict(&r.range, &r.court_id, &[r.clone()], Some("r1")));
    // Without the exclusion it does.
    assert!(has_conflict(&r.range, &r.court_id, &[r.clone()], None));
}

#[test]
fn cancelled_reservations_never_block() {
    for status in ["cancelado", "CANCELADO", "Cancelled", "cancelled"] {
        let r = ExistingReservation::new("r1", "C1", range(9, 0, 10, 0), status);
        assert!(
            !has_conflict(&r.range, &r.court_id, &[r.clone()], None),
            "status {status:?} should not block"
        );
    }
}

#[test]
fn other_courts_are_ignored() {
    let existing = vec![booked("r1", "C2", range(9, 0, 10, 0))];
    assert!(!has_conflict(&range(9, 0, 10, 0), "C1", &existing, None));
}

// ── Boundary policy ─────────────────────────────────────────────────────────

#[test]
fn back_to_back_bookings_do_not_conflict() {
    let existing = vec![booked("r1", "C1", range(9, 0, 10, 0))];
    assert!(!has_conflict(&range(10, 0, 11, 0), "C1", &existing, None));
    assert!(!has_conflict(&range(8, 0, 9, 0), "C1", &existing, None));
}

#[test]
fn overlapping_bookings_conflict() {
    let existing = vec![booked("r1", "C1", range(9, 0, 10, 0))];
    // Starts inside.
    assert!(has_conflict(&range(9, 30, 10, 30), "C1", &existing, None));
    // Ends inside.
    assert!(has_conflict(&range(8, 30, 9, 30), "C1", &existing, None));
    // Fully contains.
    assert!(has_conflict(&range(8, 0, 11, 0), "C1", &existing, None));
    // Fully contained.
    assert!(has_conflict(&range(9, 15, 9, 45), "C1", &existing, None));
    // Identical.
    assert!(has_conflict(&range(9, 0, 10, 0), "C1", &existing, None));
}

#[test]
fn non_cancelled_statuses_all_block() {
    for status in ["agendado", "confirmado", "concluido", "pending", ""] {
        let existing = vec![ExistingReservation::new("r1", "C1", range(9, 0, 10, 0), status)];
        assert!(
            has_conflict(&range(9, 30, 10, 30), "C1", &existing, None),
            "status {status:?} should block"
        );
    }
}

#[test]
fn exclusion_only_skips_the_named_reservation() {
    let existing = vec![
        booked("r1", "C1", range(9, 0, 10, 0)),
        booked("r2", "C1", range(10, 0, 11, 0)),
    ];
    // Moving r1 to 09:30-10:30 still collides with r2.
    assert!(has_conflict(&range(9, 30, 10, 30), "C1", &existing, Some("r1")));
}

// ── Enumeration ─────────────────────────────────────────────────────────────

#[test]
fn find_conflicts_lists_every_overlap_with_minutes() {
    let existing = vec![
        booked("r1", "C1", range(9, 0, 10, 0)),
        booked("r2", "C1", range(11, 0, 12, 0)),
        booked("r3", "C1", range(13, 0, 14, 0)),
        booked("r4", "C2", range(9, 0, 12, 0)),
    ];
    let conflicts = find_conflicts(&range(9, 30, 11, 15), "C1", &existing, None);

    assert_eq!(conflicts.len(), 2);
    assert_eq!(conflicts[0].reservation.id, "r1");
    assert_eq!(conflicts[0].overlap_minutes, 30);
    assert_eq!(conflicts[1].reservation.id, "r2");
    assert_eq!(conflicts[1].overlap_minutes, 15);
}

#[test]
fn find_conflicts_empty_when_clear() {
    let existing = vec![booked("r1", "C1", range(9, 0, 10, 0))];
    assert!(find_conflicts(&range(10, 0, 11, 0), "C1", &existing, None).is_empty());
}
