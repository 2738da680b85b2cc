//! Property-based tests for conflict detection and validation.
//!
//! These check invariants that hold for any reservation layout, not just the
//! hand-picked cases in `conflict_tests.rs` and `validator_tests.rs`.

use booking_engine::{
    find_conflicts, find_free_slots, has_conflict, validate, ExistingReservation, ReservationCandidate,
    TimeRange, ValidationError,
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 10, 0, 0, 0).unwrap()
}

/// A well-formed range on one day, on a 5-minute grid, 5 minutes to 8 hours long.
fn arb_range() -> impl Strategy<Value = TimeRange> {
    (0i64..288, 1i64..=96).prop_map(|(slot, len)| {
        TimeRange::starting_at(base() + Duration::minutes(slot * 5), len * 5)
    })
}

fn arb_status() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("agendado".to_string()),
        Just("confirmado".to_string()),
        Just("concluido".to_string()),
        Just("cancelado".to_string()),
        Just("CANCELLED".to_string()),
    ]
}

fn arb_court() -> impl Strategy<Value = String> {
    prop_oneof![Just("C1".to_string()), Just("C2".to_string())]
}

fn arb_existing() -> impl Strategy<Value = Vec<ExistingReservation>> {
    prop::collection::vec((arb_court(), arb_range(), arb_status()), 0..12).prop_map(|items| {
        items
            .into_iter()
            .enumerate()
            .map(|(i, (court, range, status))| {
                ExistingReservation::new(format!("r{}", i), court, range, status)
            })
            .collect()
    })
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn empty_list_never_conflicts(range in arb_range()) {
        prop_assert!(!has_conflict(&range, "C1", &[], None));
    }

    #[test]
    fn has_conflict_agrees_with_find_conflicts(
        range in arb_range(),
        existing in arb_existing(),
        exclude in prop::option::of(0usize..12),
    ) {
        let exclude_id = exclude.map(|i| format!("r{}", i));
        let any = has_conflict(&range, "C1", &existing, exclude_id.as_deref());
        let all = find_conflicts(&range, "C1", &existing, exclude_id.as_deref());
        prop_assert_eq!(any, !all.is_empty());
        for conflict in &all {
            prop_assert!(conflict.overlap_minutes > 0);
            prop_assert_eq!(conflict.reservation.court_id.as_str(), "C1");
        }
    }

    #[test]
    fn overlap_is_symmetric(a in arb_range(), b in arb_range()) {
        prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
    }

    #[test]
    fn reservation_never_conflicts_with_itself_when_excluded(range in arb_range(), status in arb_status()) {
        let r = ExistingReservation::new("x", "C1", range, status);
        prop_assert!(!has_conflict(&r.range, "C1", &[r.clone()], Some("x")));
    }

    #[test]
    fn following_range_never_conflicts(range in arb_range(), len in 1i64..=96) {
        let r = ExistingReservation::new("x", "C1", range, "confirmado");
        let after = TimeRange::starting_at(range.end, len * 5);
        let before = TimeRange::new(range.start - Duration::minutes(len * 5), range.start);
        prop_assert!(!has_conflict(&after, "C1", &[r.clone()], None));
        prop_assert!(!has_conflict(&before, "C1", &[r], None));
    }

    #[test]
    fn free_slots_never_intersect_active_reservations(existing in arb_existing()) {
        let window = TimeRange::new(base(), base() + Duration::days(1));
        for slot in find_free_slots("C1", &existing, &window) {
            let range = slot.range();
            prop_assert!(range.start >= window.start && range.end <= window.end);
            prop_assert!(range.start < range.end);
            prop_assert!(!has_conflict(&range, "C1", &existing, None));
        }
    }

    #[test]
    fn validation_duration_errors_match_bounds(start_offset in 0i64..1000, minutes in -600i64..1200) {
        let now = base();
        let candidate = ReservationCandidate::new(
            "C1",
            "U1",
            TimeRange::starting_at(now + Duration::minutes(start_offset), minutes),
        );
        let errors = validate(&candidate, now);
        prop_assert_eq!(errors.contains(&ValidationError::TooShort { min_minutes: 30 }), minutes < 30);
        prop_assert_eq!(errors.contains(&ValidationError::TooLong { max_minutes: 480 }), minutes > 480);
        prop_assert_eq!(errors.contains(&ValidationError::StartNotBeforeEnd), minutes <= 0);
        prop_assert!(!errors.contains(&ValidationError::StartInPast));
    }
}
