//! `roomsched` CLI -- drive the room-schedule conflict engine from JSON
//! snapshot files.
//!
//! ## Usage
//!
//! ```sh
//! # Batch-assign enrollments onto rooms and slots for one week
//! roomsched auto-assign --rooms rooms.json --lecturers lecturers.json \
//!     --enrollments enrollments.json --week-start 2026-03-02
//!
//! # Validate a proposed booking against existing bookings
//! roomsched check --rooms rooms.json --bookings bookings.json -i proposed.json
//!
//! # Validate a proposal piped on stdin
//! cat proposed.json | roomsched check --rooms rooms.json
//!
//! # Print the effective slot catalog
//! roomsched catalog
//! ```

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Read};

use booking_engine::{
    Booking, EngineConfig, Enrollment, InMemoryDirectory, InMemoryRepository, Lecturer, Room,
    ScheduleEngine, ScheduleError,
};
use chrono::NaiveDate;

#[derive(Parser)]
#[command(
    name = "roomsched",
    version,
    about = "Room-schedule conflict engine CLI"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Engine configuration file (slot catalog + generated-booking defaults)
    #[arg(long, global = true)]
    config: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Batch-assign enrollments onto rooms and slots for one week
    AutoAssign {
        /// Rooms snapshot (JSON array)
        #[arg(long)]
        rooms: String,
        /// Lecturers snapshot (JSON array)
        #[arg(long)]
        lecturers: String,
        /// Enrollments snapshot (JSON array)
        #[arg(long)]
        enrollments: String,
        /// Date anchoring the catalog's weekdays (YYYY-MM-DD)
        #[arg(long)]
        week_start: String,
        /// Output file for the outcome JSON (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Validate one proposed booking against existing bookings
    Check {
        /// Rooms snapshot (JSON array)
        #[arg(long)]
        rooms: String,
        /// Existing bookings to check against (none if omitted)
        #[arg(long)]
        bookings: Option<String>,
        /// Proposed booking (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Print the effective slot catalog
    Catalog,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match cli.config.as_deref() {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read file: {path}"))?;
            EngineConfig::from_json(&raw)
                .with_context(|| format!("Failed to parse config in {path}"))?
        }
        None => EngineConfig::default(),
    };

    match cli.command {
        Commands::AutoAssign {
            rooms,
            lecturers,
            enrollments,
            week_start,
            output,
        } => {
            let rooms: Vec<Room> = load_json(&rooms)?;
            let lecturers: Vec<Lecturer> = load_json(&lecturers)?;
            let enrollments: Vec<Enrollment> = load_json(&enrollments)?;
            let week_start = NaiveDate::parse_from_str(&week_start, "%Y-%m-%d")
                .with_context(|| format!("Invalid week start date: {week_start}"))?;

            let engine = ScheduleEngine::new(
                InMemoryRepository::new(),
                InMemoryDirectory::new(rooms, lecturers, enrollments),
            )
            .with_config(config);

            let outcome = engine.run_auto_assignment(week_start, None)?;
            let json = serde_json::to_string_pretty(&outcome)?;
            write_output(output.as_deref(), &json)?;
            eprintln!(
                "{} booking(s) created, {} enrollment(s) unscheduled",
                outcome.created.len(),
                outcome.unscheduled.len()
            );
        }
        Commands::Check {
            rooms,
            bookings,
            input,
        } => {
            let rooms: Vec<Room> = load_json(&rooms)?;
            let existing: Vec<Booking> = match bookings.as_deref() {
                Some(path) => load_json(path)?,
                None => Vec::new(),
            };
            let raw = read_input(input.as_deref())?;
            let proposed: Booking =
                serde_json::from_str(&raw).context("Failed to parse the proposed booking")?;

            let engine = ScheduleEngine::new(
                InMemoryRepository::with_bookings(existing),
                InMemoryDirectory::new(rooms, Vec::new(), Vec::new()),
            )
            .with_config(config);

            match engine.propose_booking(proposed) {
                Ok(accepted) => {
                    println!(
                        "Accepted: {} in {} on {} at {}",
                        accepted.event_name, accepted.room_name, accepted.date, accepted.start_time
                    );
                }
                Err(
                    err @ (ScheduleError::Conflict { .. }
                    | ScheduleError::RoomUnavailable { .. }
                    | ScheduleError::UnknownRoom { .. }),
                ) => {
                    bail!("Rejected: {err}");
                }
                Err(err) => return Err(err.into()),
            }
        }
        Commands::Catalog => {
            let json = serde_json::to_string_pretty(&config.slot_catalog)?;
            println!("{json}");
        }
    }

    Ok(())
}

fn load_json<T: serde::de::DeserializeOwned>(path: &str) -> Result<T> {
    let raw =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))?;
    serde_json::from_str(&raw).with_context(|| format!("Failed to parse JSON in {path}"))
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {path}"))?;
        }
        None => {
            println!("{content}");
        }
    }
    Ok(())
}
