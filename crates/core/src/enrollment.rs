// SPDX-License-Identifier: MIT

//! Enrollment record state machine
//!
//! A record is created Active or Waitlisted and only ever moves
//! Waitlisted → Active (promotion) or to Dropped (terminal). Records are
//! never physically deleted; the dropped flag is a soft delete so history
//! stays queryable.
//!
//! Dropping clears the waiting-list flag before setting dropped, so
//! `waiting_list == true` always implies a live record. Counting a
//! student's waitlist memberships relies on that.

use crate::fields;
use crate::section::SeatKind;
use crate::value::{self, Record, RecordError, Value};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Derived state over the (dropped, waiting_list) flag pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrollmentStatus {
    /// Occupying a seat
    Active,
    /// Queued beyond capacity
    Waitlisted,
    /// Terminal
    Dropped,
}

/// One student's registration in one section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentRecord {
    pub id: Option<String>,
    pub student_id: String,
    pub class_id: String,
    pub enrolled_on: DateTime<Utc>,
    pub dropped: bool,
    pub waiting_list: bool,
}

impl EnrollmentRecord {
    /// Create a fresh registration with the seat kind the section decided
    pub fn new(
        student_id: impl Into<String>,
        class_id: impl Into<String>,
        enrolled_on: DateTime<Utc>,
        seat: SeatKind,
    ) -> Self {
        EnrollmentRecord {
            id: None,
            student_id: student_id.into(),
            class_id: class_id.into(),
            enrolled_on,
            dropped: false,
            waiting_list: seat == SeatKind::Waitlisted,
        }
    }

    pub fn status(&self) -> EnrollmentStatus {
        if self.dropped {
            EnrollmentStatus::Dropped
        } else if self.waiting_list {
            EnrollmentStatus::Waitlisted
        } else {
            EnrollmentStatus::Active
        }
    }

    pub fn is_live(&self) -> bool {
        !self.dropped
    }

    /// Terminal transition. Clears the waiting flag so a dropped record
    /// never counts toward waitlist membership.
    pub fn drop_enrollment(&self) -> EnrollmentRecord {
        EnrollmentRecord {
            dropped: true,
            waiting_list: false,
            ..self.clone()
        }
    }

    /// Waitlisted → Active. The freed seat is reassigned without touching
    /// the section counter; promotion is a pure reclassification.
    pub fn promote(&self) -> EnrollmentRecord {
        EnrollmentRecord {
            waiting_list: false,
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
            fields::STUDENT_ID.to_string(),
            Value::from(self.student_id.as_str()),
        );
        record.insert(
            fields::CLASS_ID.to_string(),
            Value::from(self.class_id.as_str()),
        );
        record.insert(fields::ENROLLED_ON.to_string(), Value::from(self.enrolled_on));
        record.insert(fields::DROPPED.to_string(), Value::from(self.dropped));
        record.insert(
            fields::WAITING_LIST.to_string(),
            Value::from(self.waiting_list),
        );
        record
    }

    /// Rebuild from the persisted field map
    pub fn from_record(record: &Record) -> Result<EnrollmentRecord, RecordError> {
        Ok(EnrollmentRecord {
            id: Some(value::get_text(record, fields::ID)?),
            student_id: value::get_text(record, fields::STUDENT_ID)?,
            class_id: value::get_text(record, fields::CLASS_ID)?,
            enrolled_on: value::get_time(record, fields::ENROLLED_ON)?,
            dropped: value::get_bool(record, fields::DROPPED)?,
            waiting_list: value::get_bool(record, fields::WAITING_LIST)?,
        })
    }
}

#[cfg(test)]
#[path = "enrollment_tests.rs"]
mod tests;
