// SPDX-License-Identifier: MIT

//! Student / instructor profile record

use crate::fields;
use crate::value::{self, Record, RecordError, Value};
use serde::{Deserialize, Serialize};

/// A person record; students and instructors share this shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub age: i64,
}

impl Profile {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>, age: i64) -> Self {
        Profile {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            age,
        }
    }

    pub fn to_record(&self) -> Record {
        let mut record = Record::new();
        if let Some(id) = &self.id {
            record.insert(fields::ID.to_string(), Value::from(id.as_str()));
        }
        record.insert(
            fields::FIRST_NAME.to_string(),
            Value::from(self.first_name.as_str()),
        );
        record.insert(
            fields::LAST_NAME.to_string(),
            Value::from(self.last_name.as_str()),
        );
        record.insert(fields::AGE.to_string(), Value::from(self.age));
        record
    }

    pub fn from_record(record: &Record) -> Result<Profile, RecordError> {
        Ok(Profile {
            id: Some(value::get_text(record, fields::ID)?),
            first_name: value::get_text(record, fields::FIRST_NAME)?,
            last_name: value::get_text(record, fields::LAST_NAME)?,
            age: value::get_int(record, fields::AGE)?,
        })
    }
}
