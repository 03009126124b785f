//! Tests for the round-robin batch allocator.

use booking_engine::allocator::{date_for_weekday, SlotAllocator, UnscheduledReason};
use booking_engine::booking::{BookingStatus, PriorityLevel};
use booking_engine::error::ScheduleError;
use booking_engine::model::{Enrollment, Lecturer, Room, RoomCondition};
use booking_engine::slot::{Slot, SlotCatalog, SlotClaims};
use chrono::{NaiveDate, NaiveTime, Weekday};
use std::collections::HashSet;

fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

/// Monday 2026-03-02, the anchor week for every test.
fn week_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
}

fn enrollment(student: &str, code: &str, name: &str) -> Enrollment {
    Enrollment::new(student, code, name)
}

fn lecturer(name: &str) -> Lecturer {
    Lecturer::new(name, format!("{}@campus.edu", name.to_lowercase()))
}

/// Two Monday slots; with two rooms that makes four combinations.
fn two_by_two_catalog() -> SlotCatalog {
    SlotCatalog::new(vec![
        Slot::new(Weekday::Mon, time(9, 0)),
        Slot::new(Weekday::Mon, time(11, 0)),
    ])
}

#[test]
fn three_enrollments_two_rooms_two_slots_all_placed() {
    // 2 rooms x 2 slots = 4 combinations; 3 enrollments must all fit.
    let rooms = vec![Room::new("R1", 40), Room::new("R2", 40)];
    let lecturers = vec![lecturer("Silva")];
    let enrollments = vec![
        enrollment("s1", "CS101", "Algorithms"),
        enrollment("s2", "CS102", "Databases"),
        enrollment("s3", "CS103", "Networks"),
    ];

    let allocator = SlotAllocator::new(two_by_two_catalog());
    let mut claims = SlotClaims::new();
    let outcome = allocator
        .assign(&enrollments, &rooms, &lecturers, week_start(), &mut claims)
        .unwrap();

    assert_eq!(outcome.created.len(), 3);
    assert!(outcome.unscheduled.is_empty());

    // No two bookings share a (room, day, time) key.
    let keys: HashSet<_> = outcome
        .created
        .iter()
        .map(|b| (b.room_name.clone(), b.date, b.start_time))
        .collect();
    assert_eq!(keys.len(), 3);

    // The first two take the round-robin rotation; the third probes past
    // its claimed target into the remaining free combination.
    assert_eq!(outcome.created[0].room_name, "R1");
    assert_eq!(outcome.created[0].start_time, time(9, 0));
    assert_eq!(outcome.created[1].room_name, "R2");
    assert_eq!(outcome.created[1].start_time, time(11, 0));
    assert_eq!(outcome.created[2].room_name, "R1");
    assert_eq!(outcome.created[2].start_time, time(11, 0));
}

#[test]
fn accounting_law_created_plus_unscheduled_covers_all_attempts() {
    // 1 room x 1 slot: only one enrollment can land, the rest are recorded.
    let rooms = vec![Room::new("R1", 40)];
    let lecturers = vec![lecturer("Silva")];
    let enrollments = vec![
        enrollment("s1", "CS101", "Algorithms"),
        enrollment("s2", "CS102", "Databases"),
        enrollment("s3", "CS103", "Networks"),
    ];
    let catalog = SlotCatalog::new(vec![Slot::new(Weekday::Mon, time(9, 0))]);

    let allocator = SlotAllocator::new(catalog);
    let mut claims = SlotClaims::new();
    let outcome = allocator
        .assign(&enrollments, &rooms, &lecturers, week_start(), &mut claims)
        .unwrap();

    assert_eq!(outcome.created.len(), 1);
    assert_eq!(outcome.unscheduled.len(), 2);
    assert_eq!(outcome.created.len() + outcome.unscheduled.len(), 3);
    for entry in &outcome.unscheduled {
        assert_eq!(entry.reason, UnscheduledReason::NoSlotAvailable);
    }
}

#[test]
fn blank_course_names_are_skipped_silently() {
    // Blank names are a "no event" signal: neither created nor unscheduled.
    let rooms = vec![Room::new("R1", 40), Room::new("R2", 40)];
    let lecturers = vec![lecturer("Silva")];
    let enrollments = vec![
        enrollment("s1", "CS101", "Algorithms"),
        enrollment("s2", "CS000", "   "),
        enrollment("s3", "CS103", "Networks"),
    ];

    let allocator = SlotAllocator::new(two_by_two_catalog());
    let mut claims = SlotClaims::new();
    let outcome = allocator
        .assign(&enrollments, &rooms, &lecturers, week_start(), &mut claims)
        .unwrap();

    assert_eq!(outcome.created.len(), 2);
    assert!(outcome.unscheduled.is_empty());
}

#[test]
fn skipped_enrollments_do_not_consume_rotation_steps() {
    // The blank enrollment sits between two real ones; the second real one
    // must still take rotation index 1, not 2.
    let rooms = vec![Room::new("R1", 40), Room::new("R2", 40), Room::new("R3", 40)];
    let lecturers = vec![lecturer("Silva")];
    let enrollments = vec![
        enrollment("s1", "CS101", "Algorithms"),
        enrollment("s2", "CS000", ""),
        enrollment("s3", "CS103", "Networks"),
    ];

    let allocator = SlotAllocator::new(SlotCatalog::default());
    let mut claims = SlotClaims::new();
    let outcome = allocator
        .assign(&enrollments, &rooms, &lecturers, week_start(), &mut claims)
        .unwrap();

    assert_eq!(outcome.created.len(), 2);
    assert_eq!(outcome.created[0].room_name, "R1");
    assert_eq!(outcome.created[1].room_name, "R2");
}

#[test]
fn rooms_under_maintenance_are_never_assigned() {
    let rooms = vec![
        Room::new("R1", 40).with_condition(RoomCondition::NeedsRepair),
        Room::new("R2", 40),
    ];
    let lecturers = vec![lecturer("Silva")];
    let enrollments = vec![
        enrollment("s1", "CS101", "Algorithms"),
        enrollment("s2", "CS102", "Databases"),
    ];

    let allocator = SlotAllocator::new(two_by_two_catalog());
    let mut claims = SlotClaims::new();
    let outcome = allocator
        .assign(&enrollments, &rooms, &lecturers, week_start(), &mut claims)
        .unwrap();

    assert_eq!(outcome.created.len(), 2);
    for booking in &outcome.created {
        assert_eq!(booking.room_name, "R2");
    }
}

#[test]
fn all_rooms_under_maintenance_aborts_the_batch() {
    let rooms = vec![Room::new("R1", 40).with_condition(RoomCondition::NeedsRepair)];
    let lecturers = vec![lecturer("Silva")];
    let enrollments = vec![enrollment("s1", "CS101", "Algorithms")];

    let allocator = SlotAllocator::new(two_by_two_catalog());
    let mut claims = SlotClaims::new();
    let result = allocator.assign(&enrollments, &rooms, &lecturers, week_start(), &mut claims);

    assert!(matches!(result, Err(ScheduleError::NoAvailableRooms)));
}

#[test]
fn empty_lecturer_roster_aborts_the_batch() {
    let rooms = vec![Room::new("R1", 40)];
    let enrollments = vec![enrollment("s1", "CS101", "Algorithms")];

    let allocator = SlotAllocator::new(two_by_two_catalog());
    let mut claims = SlotClaims::new();
    let result = allocator.assign(&enrollments, &rooms, &[], week_start(), &mut claims);

    assert!(matches!(result, Err(ScheduleError::NoAvailableLecturers)));
}

#[test]
fn generated_bookings_carry_the_defaults_and_the_enrollment() {
    let rooms = vec![Room::new("R1", 40)];
    let lecturers = vec![Lecturer::new("Silva", "")];
    let enrollments = vec![enrollment("s1", "CS101", "  Algorithms  ")];

    let allocator = SlotAllocator::new(two_by_two_catalog());
    let mut claims = SlotClaims::new();
    let outcome = allocator
        .assign(&enrollments, &rooms, &lecturers, week_start(), &mut claims)
        .unwrap();

    let booking = &outcome.created[0];
    assert_eq!(booking.event_type, "Lecture");
    assert_eq!(booking.event_name, "algorithms");
    assert_eq!(booking.course_code.as_deref(), Some("CS101"));
    assert_eq!(booking.faculty, "Auto-Generated");
    assert_eq!(booking.department, "Default");
    assert_eq!(booking.duration_minutes, 120);
    assert_eq!(booking.priority_level, PriorityLevel::Medium);
    assert_eq!(booking.status, BookingStatus::Pending);
    assert_eq!(booking.created_by, "System");
    // Lecturer without an address gets the system fallback.
    assert_eq!(booking.lecturer_email, "noreply@system.com");
    assert!(booking.id.is_empty(), "ids are assigned at save time");
}

#[test]
fn weekday_slots_anchor_to_the_given_week() {
    let rooms = vec![Room::new("R1", 40)];
    let lecturers = vec![lecturer("Silva")];
    let enrollments = vec![
        enrollment("s1", "CS101", "Algorithms"),
        enrollment("s2", "CS102", "Databases"),
    ];
    let catalog = SlotCatalog::new(vec![
        Slot::new(Weekday::Mon, time(9, 0)),
        Slot::new(Weekday::Wed, time(9, 0)),
    ]);

    let allocator = SlotAllocator::new(catalog);
    let mut claims = SlotClaims::new();
    let outcome = allocator
        .assign(&enrollments, &rooms, &lecturers, week_start(), &mut claims)
        .unwrap();

    assert_eq!(outcome.created[0].date, week_start());
    assert_eq!(
        outcome.created[1].date,
        NaiveDate::from_ymd_opt(2026, 3, 4).unwrap()
    );
}

#[test]
fn lecturers_rotate_with_the_success_counter() {
    let rooms = vec![Room::new("R1", 40), Room::new("R2", 40)];
    let lecturers = vec![lecturer("Silva"), lecturer("Tanaka")];
    let enrollments = vec![
        enrollment("s1", "CS101", "Algorithms"),
        enrollment("s2", "CS102", "Databases"),
        enrollment("s3", "CS103", "Networks"),
    ];

    let allocator = SlotAllocator::new(SlotCatalog::default());
    let mut claims = SlotClaims::new();
    let outcome = allocator
        .assign(&enrollments, &rooms, &lecturers, week_start(), &mut claims)
        .unwrap();

    assert_eq!(outcome.created[0].lecturer_email, "silva@campus.edu");
    assert_eq!(outcome.created[1].lecturer_email, "tanaka@campus.edu");
    assert_eq!(outcome.created[2].lecturer_email, "silva@campus.edu");
}

#[test]
fn shared_claims_chain_batches_without_collisions() {
    let rooms = vec![Room::new("R1", 40)];
    let lecturers = vec![lecturer("Silva")];
    let allocator = SlotAllocator::new(two_by_two_catalog());

    let mut claims = SlotClaims::new();
    let first = allocator
        .assign(
            &[enrollment("s1", "CS101", "Algorithms")],
            &rooms,
            &lecturers,
            week_start(),
            &mut claims,
        )
        .unwrap();
    let second = allocator
        .assign(
            &[enrollment("s2", "CS102", "Databases")],
            &rooms,
            &lecturers,
            week_start(),
            &mut claims,
        )
        .unwrap();

    let first_key = (
        first.created[0].room_name.clone(),
        first.created[0].date,
        first.created[0].start_time,
    );
    let second_key = (
        second.created[0].room_name.clone(),
        second.created[0].date,
        second.created[0].start_time,
    );
    assert_ne!(first_key, second_key);
    assert_eq!(claims.len(), 2);
}

#[test]
fn fresh_claims_make_batches_independent() {
    // Two runs with separate claim sets produce identical assignments:
    // nothing leaks through process-wide state.
    let rooms = vec![Room::new("R1", 40)];
    let lecturers = vec![lecturer("Silva")];
    let enrollments = vec![enrollment("s1", "CS101", "Algorithms")];
    let allocator = SlotAllocator::new(two_by_two_catalog());

    let mut first_claims = SlotClaims::new();
    let first = allocator
        .assign(&enrollments, &rooms, &lecturers, week_start(), &mut first_claims)
        .unwrap();

    let mut second_claims = SlotClaims::new();
    let second = allocator
        .assign(&enrollments, &rooms, &lecturers, week_start(), &mut second_claims)
        .unwrap();

    assert_eq!(first, second);
}

#[test]
fn empty_catalog_leaves_every_enrollment_unscheduled() {
    let rooms = vec![Room::new("R1", 40)];
    let lecturers = vec![lecturer("Silva")];
    let enrollments = vec![
        enrollment("s1", "CS101", "Algorithms"),
        enrollment("s2", "CS102", "Databases"),
    ];

    let allocator = SlotAllocator::new(SlotCatalog::new(vec![]));
    let mut claims = SlotClaims::new();
    let outcome = allocator
        .assign(&enrollments, &rooms, &lecturers, week_start(), &mut claims)
        .unwrap();

    assert!(outcome.created.is_empty());
    assert_eq!(outcome.unscheduled.len(), 2);
}

#[test]
fn date_for_weekday_walks_forward_from_the_anchor() {
    let monday = week_start();
    assert_eq!(date_for_weekday(monday, Weekday::Mon), monday);
    assert_eq!(
        date_for_weekday(monday, Weekday::Fri),
        NaiveDate::from_ymd_opt(2026, 3, 6).unwrap()
    );

    // A mid-week anchor wraps earlier weekdays into the next week.
    let wednesday = NaiveDate::from_ymd_opt(2026, 3, 4).unwrap();
    assert_eq!(
        date_for_weekday(wednesday, Weekday::Mon),
        NaiveDate::from_ymd_opt(2026, 3, 9).unwrap()
    );
}
