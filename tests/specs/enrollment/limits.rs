//! Cross-section limit specs
//!
//! A student may sit on at most three waiting lists at once, campus-wide.
//! The cap counts only live queued records, so dropping off a waitlist or
//! being promoted frees headroom.

use crate::prelude::*;

fn full_section(campus: &Campus, code: &str, filler: &str) -> SectionSelector {
    let selector = campus.section(code, 1, 1);
    campus.enroll(filler, &selector);
    selector
}

#[test]
fn fourth_waitlist_is_refused_even_with_a_free_seat() {
    let campus = Campus::in_memory();
    let students = campus.enroll_students(2);
    let (capped, filler) = (&students[0], &students[1]);

    for code in ["101", "102", "103"] {
        let selector = full_section(&campus, code, filler);
        assert_eq!(
            campus.enroll(capped, &selector).status(),
            EnrollmentStatus::Waitlisted
        );
    }

    let open = campus.section("104", 1, 5);
    campus.clock.advance(Duration::minutes(1));
    let err = campus.allocator.enroll(capped, &open);
    assert!(matches!(err, Err(EngineError::TooManyWaitlists(3))));
}

#[test]
fn leaving_a_waitlist_frees_headroom() {
    let campus = Campus::in_memory();
    let students = campus.enroll_students(2);
    let (capped, filler) = (&students[0], &students[1]);

    let sections: Vec<SectionSelector> = ["101", "102", "103"]
        .iter()
        .map(|code| {
            let selector = full_section(&campus, code, filler);
            campus.enroll(capped, &selector);
            selector
        })
        .collect();

    campus.allocator.drop_enrollment(capped, &sections[0]).unwrap();

    let open = campus.section("104", 1, 1);
    campus.enroll(filler, &open);
    assert_eq!(
        campus.enroll(capped, &open).status(),
        EnrollmentStatus::Waitlisted
    );
}

#[test]
fn promotion_frees_headroom_too() {
    let campus = Campus::in_memory();
    let students = campus.enroll_students(2);
    let (capped, filler) = (&students[0], &students[1]);

    let sections: Vec<SectionSelector> = ["101", "102", "103"]
        .iter()
        .map(|code| {
            let selector = full_section(&campus, code, filler);
            campus.enroll(capped, &selector);
            selector
        })
        .collect();

    // filler drops their seat; capped is promoted off that waitlist
    campus.allocator.drop_enrollment(filler, &sections[0]).unwrap();

    let open = campus.section("104", 1, 1);
    campus.enroll(filler, &open);
    assert_eq!(
        campus.enroll(capped, &open).status(),
        EnrollmentStatus::Waitlisted
    );
}
