//! Shared fixture for the behavioral specs.
//!
//! A `Campus` wires the full stack — store, clock, services — the way a
//! deployment would, seeded with one instructor. Specs drive it through
//! the public engine API only.

use std::path::Path;

pub use chrono::Duration;
pub use rollcall_core::{
    ClassSection, EnrollmentRecord, EnrollmentStatus, FakeClock, Profile, SectionSelector,
    SequentialIdGen,
};
pub use rollcall_engine::{Administration, Allocator, EngineError, Profiles, SectionDraft};
pub use rollcall_storage::{schema, Database, ProfileStore, SectionStore};

pub struct Campus {
    pub db: Database,
    pub clock: FakeClock,
    pub allocator: Allocator<FakeClock, SequentialIdGen>,
    pub admin: Administration<SequentialIdGen>,
    pub students: Profiles<SequentialIdGen>,
    pub instructor_id: String,
}

impl Campus {
    /// Volatile campus with one instructor on staff
    pub fn in_memory() -> Self {
        let campus = Self::attach(Database::in_memory(schema::tables()));
        campus.seed_instructor();
        campus
    }

    /// Journal-backed campus; seeds only when the journal starts empty
    pub fn open(path: &Path) -> Self {
        let db = Database::open(path, schema::tables()).unwrap();
        Self::attach(db)
    }

    /// Wire services over an existing store without seeding anything
    pub fn attach(db: Database) -> Self {
        let clock = FakeClock::new();
        Self {
            allocator: Allocator::new(db.clone(), clock.clone(), SequentialIdGen::new("e")),
            admin: Administration::new(db.clone(), SequentialIdGen::new("c")),
            students: Profiles::students(db.clone(), SequentialIdGen::new("s")),
            instructor_id: "i-1".to_string(),
            db,
            clock,
        }
    }

    pub fn seed_instructor(&self) {
        let instructors = Profiles::instructors(self.db.clone(), SequentialIdGen::new("i"));
        instructors
            .add(&Profile::new("Grace", "Hopper", 45))
            .unwrap();
    }

    /// Register `count` students; ids continue the fixture's `s-` sequence
    pub fn enroll_students(&self, count: usize) -> Vec<String> {
        (0..count)
            .map(|n| {
                self.students
                    .add(&Profile::new(format!("Student{n}"), "Doe", 20))
                    .unwrap()
                    .id
                    .unwrap()
            })
            .collect()
    }

    pub fn section(&self, course_code: &str, number: i64, max: i64) -> SectionSelector {
        self.admin
            .add_section(&SectionDraft {
                instructor_id: self.instructor_id.clone(),
                department: "CS".to_string(),
                course_code: course_code.to_string(),
                section_number: number,
                class_name: format!("Course {course_code}"),
                max_enrollment: max,
                automatic_enrollment_frozen: false,
            })
            .unwrap();
        SectionSelector::new("CS", course_code, number)
    }

    /// Enroll with a fresh timestamp so queue order is unambiguous
    pub fn enroll(&self, student_id: &str, selector: &SectionSelector) -> EnrollmentRecord {
        self.clock.advance(Duration::minutes(1));
        self.allocator.enroll(student_id, selector).unwrap()
    }

    pub fn set_frozen(&self, selector: &SectionSelector, frozen: bool) {
        let mut txn = self.db.begin();
        let sections = SectionStore::new(SequentialIdGen::new("unused"));
        let section = sections.find_by_selector(&txn, selector).unwrap().unwrap();
        sections
            .save(
                &mut txn,
                &ClassSection {
                    automatic_enrollment_frozen: frozen,
                    ..section
                },
            )
            .unwrap();
        txn.commit().unwrap();
    }

    pub fn lookup(&self, selector: &SectionSelector) -> ClassSection {
        let txn = self.db.begin();
        let sections = SectionStore::new(SequentialIdGen::new("unused"));
        sections.find_by_selector(&txn, selector).unwrap().unwrap()
    }
}
