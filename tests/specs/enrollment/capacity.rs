//! Seat allocation specs
//!
//! A section seats students up to capacity, queues the next fifteen, and
//! rejects everyone after that. The section counter tracks every live
//! registration, seated or queued.

use crate::prelude::*;

#[test]
fn seats_fill_before_the_waitlist_starts() {
    let campus = Campus::in_memory();
    let selector = campus.section("101", 1, 3);
    let students = campus.enroll_students(5);

    for id in &students[..3] {
        assert_eq!(campus.enroll(id, &selector).status(), EnrollmentStatus::Active);
    }
    for id in &students[3..] {
        assert_eq!(
            campus.enroll(id, &selector).status(),
            EnrollmentStatus::Waitlisted
        );
    }
    assert_eq!(campus.lookup(&selector).current_enrollment, 5);
}

#[test]
fn waitlist_closes_fifteen_past_capacity() {
    let campus = Campus::in_memory();
    let selector = campus.section("101", 1, 2);
    let students = campus.enroll_students(18);

    for id in &students[..17] {
        campus.enroll(id, &selector);
    }
    campus.clock.advance(Duration::minutes(1));
    let err = campus.allocator.enroll(&students[17], &selector);
    assert!(matches!(err, Err(EngineError::WaitlistFull)));
    assert_eq!(campus.lookup(&selector).current_enrollment, 17);
}

#[test]
fn frozen_section_admits_nobody() {
    let campus = Campus::in_memory();
    let selector = campus.section("101", 1, 10);
    let students = campus.enroll_students(1);
    campus.set_frozen(&selector, true);

    let err = campus.allocator.enroll(&students[0], &selector);
    assert!(matches!(err, Err(EngineError::EnrollmentFrozen)));
    assert_eq!(campus.lookup(&selector).current_enrollment, 0);
}

#[test]
fn second_live_registration_for_one_class_conflicts() {
    let campus = Campus::in_memory();
    let selector = campus.section("101", 1, 10);
    let students = campus.enroll_students(1);

    campus.enroll(&students[0], &selector);
    campus.clock.advance(Duration::minutes(1));
    let err = campus.allocator.enroll(&students[0], &selector);
    assert!(matches!(err, Err(EngineError::Conflict(_))));

    // the rejected attempt left no trace
    assert_eq!(campus.lookup(&selector).current_enrollment, 1);
    let roster = campus.allocator.roster_by_status(&selector, false).unwrap();
    assert_eq!(roster.len(), 1);
}

#[test]
fn one_student_can_hold_seats_in_many_classes() {
    let campus = Campus::in_memory();
    let students = campus.enroll_students(1);
    for number in 1..=4 {
        let selector = campus.section("101", number, 10);
        assert_eq!(
            campus.enroll(&students[0], &selector).status(),
            EnrollmentStatus::Active
        );
    }
}
