//! `courtbook` CLI — check court reservations from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Can U2 book court C1 from 15:00 to 17:00? (exit status 1 if not)
//! courtbook check -r reservations.json --court C1 --user U2 \
//!     --start 2026-06-10T15:00 --end 2026-06-10T17:00
//!
//! # Move reservation r1 without it conflicting with itself
//! courtbook check -r reservations.json --court C1 --user U1 \
//!     --start 2026-06-10T15:00 --end 2026-06-10T17:00 --exclude r1
//!
//! # Bucket every reservation (cancelled / completed / upcoming / in_progress)
//! courtbook status -r reservations.json
//!
//! # Free slots on C1 during opening hours, at least an hour long
//! courtbook free -r reservations.json --court C1 \
//!     --from 2026-06-10T08:00 --to 2026-06-10T22:00 --min-minutes 60
//!
//! # Just the earliest such slot
//! courtbook free -r reservations.json --court C1 \
//!     --from 2026-06-10T08:00 --to 2026-06-10T22:00 --min-minutes 60 --first
//!
//! # Wall-clock input in São Paulo time, JSON output, custom rules
//! courtbook --timezone America/Sao_Paulo --format json --config rules.json check ...
//! ```
//!
//! Reservation files hold the backend's payload as-is: a bare record, an
//! array, or either wrapped in `schedule` / `schedules`. With `-r` omitted the
//! payload is read from stdin.

use anyhow::{Context, Result};
use booking_engine::validator::to_messages;
use booking_engine::{
    decode_reservations, BookingDecision, BookingFlow, BookingRules, Conflict, ExistingReservation,
    ReservationCandidate, TimeRange,
};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;
use std::io::{self, Read};
use std::process;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "courtbook",
    version,
    about = "Validate court reservations and detect scheduling conflicts"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON file with booking rules (durations, conflict policy, timezone)
    #[arg(long, global = true)]
    config: Option<String>,

    /// IANA timezone for datetimes without an offset (overrides the config file)
    #[arg(long, global = true)]
    timezone: Option<String>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Log decisions to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether a reservation can be booked
    Check {
        /// Existing reservations file (reads from stdin if omitted)
        #[arg(short, long)]
        reservations: Option<String>,
        /// Court to book
        #[arg(long)]
        court: Option<String>,
        /// User the reservation is for
        #[arg(long)]
        user: Option<String>,
        /// Start of the reservation
        #[arg(long)]
        start: String,
        /// End of the reservation
        #[arg(long)]
        end: String,
        /// Id of the reservation being edited
        #[arg(long)]
        exclude: Option<String>,
        /// Status of the new reservation
        #[arg(long, default_value = booking_engine::reservation::DEFAULT_STATUS)]
        status: String,
        /// Evaluate as of this instant instead of the current time
        #[arg(long)]
        now: Option<String>,
    },
    /// Classify each reservation relative to now
    Status {
        /// Reservations file (reads from stdin if omitted)
        #[arg(short, long)]
        reservations: Option<String>,
        /// Classify as of this instant instead of the current time
        #[arg(long)]
        now: Option<String>,
    },
    /// List free slots on a court within a window
    Free {
        /// Reservations file (reads from stdin if omitted)
        #[arg(short, long)]
        reservations: Option<String>,
        /// Court to inspect
        #[arg(long)]
        court: String,
        /// Window start
        #[arg(long)]
        from: String,
        /// Window end
        #[arg(long)]
        to: String,
        /// Only list slots at least this long
        #[arg(long, default_value_t = 0)]
        min_minutes: i64,
        /// Only show the earliest matching slot
        #[arg(long)]
        first: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let rules = load_rules(cli.config.as_deref(), cli.timezone.as_deref())?;
    tracing::debug!(?rules, "booking rules loaded");

    match cli.command {
        Commands::Check {
            reservations,
            court,
            user,
            start,
            end,
            exclude,
            status,
            now,
        } => {
            let existing = read_reservations(reservations.as_deref())?;
            let range = TimeRange::new(
                parse_time(&start, &rules).context("Invalid --start")?,
                parse_time(&end, &rules).context("Invalid --end")?,
            );
            let now = resolve_now(now.as_deref(), &rules)?;

            let candidate = ReservationCandidate {
                court_id: court,
                user_id: user,
                range,
                status,
                exclude_id: exclude,
            };

            let decision = BookingFlow::new(rules).evaluate(&candidate, &existing, now);
            print_decision(cli.format, &candidate, &decision)?;
            if !decision.is_accepted() {
                process::exit(1);
            }
        }
        Commands::Status { reservations, now } => {
            let existing = read_reservations(reservations.as_deref())?;
            let now = resolve_now(now.as_deref(), &rules)?;
            print_statuses(cli.format, &existing, now)?;
        }
        Commands::Free {
            reservations,
            court,
            from,
            to,
            min_minutes,
            first,
        } => {
            let existing = read_reservations(reservations.as_deref())?;
            let window = TimeRange::new(
                parse_time(&from, &rules).context("Invalid --from")?,
                parse_time(&to, &rules).context("Invalid --to")?,
            );
            if window.start >= window.end {
                anyhow::bail!("--from must be before --to");
            }

            let slots: Vec<_> = if first {
                booking_engine::find_first_free_slot(&court, &existing, &window, min_minutes)
                    .into_iter()
                    .collect()
            } else {
                booking_engine::find_free_slots(&court, &existing, &window)
                    .into_iter()
                    .filter(|s| s.duration_minutes >= min_minutes)
                    .collect()
            };

            match cli.format {
                Format::Json => println!("{}", serde_json::to_string_pretty(&slots)?),
                Format::Text if slots.is_empty() => println!("No free slots on {}", court),
                Format::Text => {
                    for slot in &slots {
                        println!(
                            "{}  {}  {} min",
                            slot.start.to_rfc3339(),
                            slot.end.to_rfc3339(),
                            slot.duration_minutes
                        );
                    }
                }
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_directive = if verbose {
        "courtbook=debug,booking_engine=debug"
    } else {
        "warn"
    };
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive)),
        )
        .with(fmt::layer().with_writer(io::stderr))
        .init();
}

/// Build the rules from an optional config file, then apply `--timezone`.
fn load_rules(config: Option<&str>, timezone: Option<&str>) -> Result<BookingRules> {
    let mut rules = match config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config: {}", path))?;
            BookingRules::from_json(&json).with_context(|| format!("Invalid config: {}", path))?
        }
        None => BookingRules::default(),
    };

    if let Some(tz) = timezone {
        rules.timezone = tz.to_string();
        rules.validate().context("Invalid --timezone")?;
    }

    Ok(rules)
}

fn parse_time(input: &str, rules: &BookingRules) -> Result<DateTime<Utc>> {
    Ok(booking_engine::parse_instant(input, &rules.timezone)?)
}

fn resolve_now(now: Option<&str>, rules: &BookingRules) -> Result<DateTime<Utc>> {
    match now {
        Some(s) => parse_time(s, rules).context("Invalid --now"),
        None => Ok(Utc::now()),
    }
}

fn read_reservations(path: Option<&str>) -> Result<Vec<ExistingReservation>> {
    let json = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            buf
        }
    };
    let reservations = decode_reservations(&json).context("Failed to decode reservations")?;
    tracing::debug!(count = reservations.len(), "reservations loaded");
    Ok(reservations)
}

fn conflict_json(c: &Conflict) -> serde_json::Value {
    json!({
        "id": c.reservation.id,
        "courtId": c.reservation.court_id,
        "start": c.reservation.range.start.to_rfc3339(),
        "end": c.reservation.range.end.to_rfc3339(),
        "status": c.reservation.status,
        "overlapMinutes": c.overlap_minutes,
    })
}

fn print_decision(
    format: Format,
    candidate: &ReservationCandidate,
    decision: &BookingDecision,
) -> Result<()> {
    if format == Format::Json {
        let value = match decision {
            BookingDecision::Accepted => json!({ "decision": "accepted" }),
            BookingDecision::Rejected(errors) => json!({
                "decision": "rejected",
                "errors": to_messages(errors),
            }),
            BookingDecision::Conflict(conflicts) => json!({
                "decision": "conflict",
                "conflicts": conflicts.iter().map(conflict_json).collect::<Vec<_>>(),
            }),
        };
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    match decision {
        BookingDecision::Accepted => println!(
            "OK: court {} is free from {} to {}",
            candidate.court().unwrap_or_default(),
            candidate.range.start.to_rfc3339(),
            candidate.range.end.to_rfc3339()
        ),
        BookingDecision::Rejected(errors) => {
            println!("Rejected:");
            for error in errors {
                println!("  - {}", error);
            }
        }
        BookingDecision::Conflict(conflicts) => {
            println!("Conflict: the court is already booked in this period");
            for c in conflicts {
                println!(
                    "  - {} {} to {} ({}, {} min overlap)",
                    c.reservation.id,
                    c.reservation.range.start.to_rfc3339(),
                    c.reservation.range.end.to_rfc3339(),
                    c.reservation.status,
                    c.overlap_minutes
                );
            }
        }
    }
    Ok(())
}

fn print_statuses(format: Format, reservations: &[ExistingReservation], now: DateTime<Utc>) -> Result<()> {
    let classified: Vec<_> = reservations
        .iter()
        .map(|r| (r, booking_engine::classify(&r.status, &r.range, now)))
        .collect();

    match format {
        Format::Json => {
            let rows: Vec<_> = classified
                .iter()
                .map(|(r, bucket)| {
                    json!({
                        "id": r.id,
                        "courtId": r.court_id,
                        "start": r.range.start.to_rfc3339(),
                        "end": r.range.end.to_rfc3339(),
                        "status": r.status,
                        "bucket": bucket,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        Format::Text => {
            for (r, bucket) in &classified {
                println!(
                    "{:<12} {:<8} {:<8} {}  {}",
                    bucket.as_str(),
                    r.id,
                    r.court_id,
                    r.range.start.to_rfc3339(),
                    r.range.end.to_rfc3339()
                );
            }
        }
    }
    Ok(())
}
