// SPDX-License-Identifier: MIT

//! Class section capacity state machine
//!
//! A section is one capacity-bounded unit of enrollment. Its
//! `current_enrollment` counter tracks *total live registrations* — seated
//! plus waitlisted — so it doubles as the admission-order cursor. Seats
//! occupied is `min(current_enrollment, max_enrollment)`; the waitlist
//! length is the overflow above `max_enrollment`.

use crate::fields;
use crate::limits::WAITLIST_OVERFLOW_BOUND;
use crate::query::Predicate;
use crate::value::{self, Record, RecordError, Value};
use serde::{Deserialize, Serialize};

/// Which kind of seat a new enrollment receives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatKind {
    /// Occupies a seat immediately
    Active,
    /// Queued beyond capacity, ordered by enrollment time
    Waitlisted,
}

/// Why a section refuses a new enrollment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdmitDenied {
    /// The automatic-enrollment-frozen flag is set
    Frozen,
    /// The waiting list reached the overflow bound
    WaitlistFull,
}

/// The (department, course code, section number) key identifying a section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSelector {
    pub department: String,
    pub course_code: String,
    pub section_number: i64,
}

impl SectionSelector {
    pub fn new(department: impl Into<String>, course_code: impl Into<String>, section_number: i64) -> Self {
        Self {
            department: department.into(),
            course_code: course_code.into(),
            section_number,
        }
    }

    /// Equality predicate locating this section
    pub fn predicate(&self) -> Predicate {
        Predicate::all()
            .eq(fields::DEPARTMENT, self.department.as_str())
            .eq(fields::COURSE_CODE, self.course_code.as_str())
            .eq(fields::SECTION_NUMBER, self.section_number)
    }
}

impl std::fmt::Display for SectionSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} section {}",
            self.department, self.course_code, self.section_number
        )
    }
}

/// One offered, capacity-bounded class section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassSection {
    pub id: Option<String>,
    pub instructor_id: String,
    pub department: String,
    pub course_code: String,
    pub section_number: i64,
    pub class_name: String,
    pub current_enrollment: i64,
    pub max_enrollment: i64,
    pub automatic_enrollment_frozen: bool,
}

impl ClassSection {
    pub fn selector(&self) -> SectionSelector {
        SectionSelector {
            department: self.department.clone(),
            course_code: self.course_code.clone(),
            section_number: self.section_number,
        }
    }

    /// Decide what a new enrollment receives, or why it is refused.
    ///
    /// The capacity test compares the live-registration counter against
    /// `max_enrollment`: the (N+1)-th registration is Active while
    /// N < max, Waitlisted from there up to the overflow bound.
    pub fn admission(&self) -> Result<SeatKind, AdmitDenied> {
        if self.automatic_enrollment_frozen {
            return Err(AdmitDenied::Frozen);
        }
        if self.current_enrollment - self.max_enrollment >= WAITLIST_OVERFLOW_BOUND {
            return Err(AdmitDenied::WaitlistFull);
        }
        if self.current_enrollment < self.max_enrollment {
            Ok(SeatKind::Active)
        } else {
            Ok(SeatKind::Waitlisted)
        }
    }

    /// True while at least one live registration is waitlisted.
    ///
    /// Actives are capped at `max_enrollment`, so any counter overflow is
    /// exactly the waitlist length.
    pub fn has_waitlisted(&self) -> bool {
        self.current_enrollment > self.max_enrollment
    }

    /// Whether a freed seat may be refilled from the waitlist
    pub fn accepts_automatic_promotion(&self) -> bool {
        !self.automatic_enrollment_frozen
    }

    /// Counter transition for a new registration
    pub fn with_enrollment_added(&self) -> ClassSection {
        ClassSection {
            current_enrollment: self.current_enrollment + 1,
            ..self.clone()
        }
    }

    /// Counter transition for a dropped registration
    pub fn with_enrollment_removed(&self) -> ClassSection {
        ClassSection {
            current_enrollment: self.current_enrollment - 1,
            ..self.clone()
        }
    }

    /// Flatten into the persisted field map
    pub fn to_record(&self) -> Record {
        let mut record = Record::new();
        if let Some(id) = &self.id {
            record.insert(fields::ID.to_string(), Value::from(id.as_str()));
        }
        record.insert(
            fields::INSTRUCTOR_ID.to_string(),
            Value::from(self.instructor_id.as_str()),
        );
        record.insert(
            fields::DEPARTMENT.to_string(),
            Value::from(self.department.as_str()),
        );
        record.insert(
            fields::COURSE_CODE.to_string(),
            Value::from(self.course_code.as_str()),
        );
        record.insert(
            fields::SECTION_NUMBER.to_string(),
            Value::from(self.section_number),
        );
        record.insert(
            fields::CLASS_NAME.to_string(),
            Value::from(self.class_name.as_str()),
        );
        record.insert(
            fields::CURRENT_ENROLLMENT.to_string(),
            Value::from(self.current_enrollment),
        );
        record.insert(
            fields::MAX_ENROLLMENT.to_string(),
            Value::from(self.max_enrollment),
        );
        record.insert(
            fields::AUTOMATIC_ENROLLMENT_FROZEN.to_string(),
            Value::from(self.automatic_enrollment_frozen),
        );
        record
    }

    /// Rebuild from the persisted field map
    pub fn from_record(record: &Record) -> Result<ClassSection, RecordError> {
        Ok(ClassSection {
            id: Some(value::get_text(record, fields::ID)?),
            instructor_id: value::get_text(record, fields::INSTRUCTOR_ID)?,
            department: value::get_text(record, fields::DEPARTMENT)?,
            course_code: value::get_text(record, fields::COURSE_CODE)?,
            section_number: value::get_int(record, fields::SECTION_NUMBER)?,
            class_name: value::get_text(record, fields::CLASS_NAME)?,
            current_enrollment: value::get_int(record, fields::CURRENT_ENROLLMENT)?,
            max_enrollment: value::get_int(record, fields::MAX_ENROLLMENT)?,
            automatic_enrollment_frozen: value::get_bool(
                record,
                fields::AUTOMATIC_ENROLLMENT_FROZEN,
            )?,
        })
    }
}

#[cfg(test)]
#[path = "section_tests.rs"]
mod tests;
