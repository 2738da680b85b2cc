//! Benchmarks for conflict checks against a busy court.

use booking_engine::{find_conflicts, find_free_slots, has_conflict, ExistingReservation, TimeRange};
use chrono::{Duration, TimeZone, Utc};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

/// A month of back-to-back one-hour bookings on two courts.
fn busy_month() -> Vec<ExistingReservation> {
    let start = Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap();
    (0..30 * 24)
        .flat_map(|h| {
            let range = TimeRange::starting_at(start + Duration::hours(h), 60);
            [
                ExistingReservation::new(format!("a{}", h), "C1", range, "confirmado"),
                ExistingReservation::new(format!("b{}", h), "C2", range, "agendado"),
            ]
        })
        .collect()
}

fn bench_conflicts(c: &mut Criterion) {
    let existing = busy_month();
    let late = TimeRange::new(
        Utc.with_ymd_and_hms(2026, 6, 30, 22, 30, 0).unwrap(),
        Utc.with_ymd_and_hms(2026, 6, 30, 23, 30, 0).unwrap(),
    );
    let outside = TimeRange::new(
        Utc.with_ymd_and_hms(2026, 7, 2, 9, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2026, 7, 2, 10, 0, 0).unwrap(),
    );

    c.bench_function("has_conflict/late_hit", |b| {
        b.iter(|| has_conflict(black_box(&late), "C1", black_box(&existing), None))
    });
    c.bench_function("has_conflict/miss", |b| {
        b.iter(|| has_conflict(black_box(&outside), "C1", black_box(&existing), None))
    });
    c.bench_function("find_conflicts/late_hit", |b| {
        b.iter(|| find_conflicts(black_box(&late), "C1", black_box(&existing), None))
    });

    let window = TimeRange::new(
        Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2026, 7, 1, 0, 0, 0).unwrap(),
    );
    c.bench_function("find_free_slots/month", |b| {
        b.iter(|| find_free_slots("C1", black_box(&existing), black_box(&window)))
    });
}

criterion_group!(benches, bench_conflicts);
criterion_main!(benches);
