//! Drop and promotion specs
//!
//! Dropping a seated student hands the seat to whoever queued first.
//! Dropping a queued student moves nobody. A freeze pauses promotion
//! without touching the queue.

use crate::prelude::*;

#[test]
fn freed_seat_goes_to_the_head_of_the_queue() {
    let campus = Campus::in_memory();
    let selector = campus.section("101", 1, 10);
    let students = campus.enroll_students(11);
    for id in &students {
        campus.enroll(id, &selector);
    }
    let queued = &students[10];
    assert_eq!(
        campus.allocator.waitlist_position(queued, &selector).unwrap(),
        1
    );

    campus.allocator.drop_enrollment(&students[0], &selector).unwrap();

    let seated = campus.allocator.roster_by_status(&selector, false).unwrap();
    assert_eq!(seated.len(), 10);
    assert!(seated.iter().any(|r| &r.student_id == queued));
    assert!(campus
        .allocator
        .roster_by_status(&selector, true)
        .unwrap()
        .is_empty());
    assert_eq!(campus.lookup(&selector).current_enrollment, 10);
}

#[test]
fn promotion_order_is_strictly_first_come_first_served() {
    let campus = Campus::in_memory();
    let selector = campus.section("101", 1, 1);
    let students = campus.enroll_students(4);
    for id in &students {
        campus.enroll(id, &selector);
    }

    // drain the seat three times; promotions follow queue order exactly
    for expected in &students[1..] {
        let seated = campus.allocator.roster_by_status(&selector, false).unwrap();
        campus
            .allocator
            .drop_enrollment(&seated[0].student_id, &selector)
            .unwrap();
        let seated = campus.allocator.roster_by_status(&selector, false).unwrap();
        assert_eq!(&seated[0].student_id, expected);
    }
}

#[test]
fn dropping_a_queued_student_promotes_nobody() {
    let campus = Campus::in_memory();
    let selector = campus.section("101", 1, 1);
    let students = campus.enroll_students(3);
    for id in &students {
        campus.enroll(id, &selector);
    }

    campus.allocator.drop_enrollment(&students[1], &selector).unwrap();

    let seated = campus.allocator.roster_by_status(&selector, false).unwrap();
    assert_eq!(seated[0].student_id, students[0]);
    assert_eq!(
        campus
            .allocator
            .waitlist_position(&students[2], &selector)
            .unwrap(),
        1
    );
    assert_eq!(campus.lookup(&selector).current_enrollment, 2);
}

#[test]
fn frozen_drop_leaves_the_queue_in_place() {
    let campus = Campus::in_memory();
    let selector = campus.section("101", 1, 1);
    let students = campus.enroll_students(2);
    for id in &students {
        campus.enroll(id, &selector);
    }
    campus.set_frozen(&selector, true);

    // the seat frees but the freeze blocks the reclassification
    campus.allocator.drop_enrollment(&students[0], &selector).unwrap();

    assert!(campus
        .allocator
        .roster_by_status(&selector, false)
        .unwrap()
        .is_empty());
    assert_eq!(
        campus
            .allocator
            .waitlist_position(&students[1], &selector)
            .unwrap(),
        1
    );
}

#[test]
fn dropped_records_stay_on_the_books() {
    let campus = Campus::in_memory();
    let selector = campus.section("101", 1, 10);
    let students = campus.enroll_students(1);
    campus.enroll(&students[0], &selector);
    campus.allocator.drop_enrollment(&students[0], &selector).unwrap();

    let dropped = campus.allocator.dropped_roster(&selector).unwrap();
    assert_eq!(dropped.len(), 1);
    assert_eq!(dropped[0].student_id, students[0]);
    assert_eq!(dropped[0].status(), EnrollmentStatus::Dropped);

    // and the student may come back on a fresh record
    assert_eq!(
        campus.enroll(&students[0], &selector).status(),
        EnrollmentStatus::Active
    );
}
