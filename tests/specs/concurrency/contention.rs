//! Contention specs
//!
//! Units of work serialize on the shared store, so two racing requests
//! for the last seat resolve to exactly one seated student no matter the
//! interleaving.

use crate::prelude::*;
use std::thread;

#[test]
fn two_students_racing_for_one_seat_get_one_seat_and_one_queue_spot() {
    let campus = Campus::in_memory();
    let selector = campus.section("101", 1, 1);
    let students = campus.enroll_students(2);

    let outcomes: Vec<EnrollmentStatus> = thread::scope(|scope| {
        let handles: Vec<_> = students
            .iter()
            .map(|id| {
                let db = campus.db.clone();
                let clock = campus.clock.clone();
                let selector = selector.clone();
                scope.spawn(move || {
                    let allocator = Allocator::new(db, clock, SequentialIdGen::new(id.as_str()));
                    allocator.enroll(id, &selector).unwrap().status()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(
        outcomes
            .iter()
            .filter(|s| **s == EnrollmentStatus::Active)
            .count(),
        1
    );
    assert_eq!(
        outcomes
            .iter()
            .filter(|s| **s == EnrollmentStatus::Waitlisted)
            .count(),
        1
    );
    assert_eq!(campus.lookup(&selector).current_enrollment, 2);
}

#[test]
fn duplicate_requests_racing_resolve_to_one_registration() {
    let campus = Campus::in_memory();
    let selector = campus.section("101", 1, 1);
    let students = campus.enroll_students(1);
    let student = &students[0];

    let outcomes: Vec<Result<EnrollmentRecord, EngineError>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..2)
            .map(|n| {
                let db = campus.db.clone();
                let clock = campus.clock.clone();
                let selector = selector.clone();
                scope.spawn(move || {
                    let allocator =
                        Allocator::new(db, clock, SequentialIdGen::new(format!("e{n}")));
                    allocator.enroll(student, &selector)
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let ok = outcomes.iter().filter(|r| r.is_ok()).count();
    let conflicts = outcomes
        .iter()
        .filter(|r| matches!(r, Err(EngineError::Conflict(_))))
        .count();
    assert_eq!((ok, conflicts), (1, 1));
    assert_eq!(campus.lookup(&selector).current_enrollment, 1);
}
