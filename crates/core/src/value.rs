// SPDX-License-Identifier: MIT

//! Scalar values and flat records.
//!
//! Every persisted row is a flat mapping from field name to a scalar
//! [`Value`]. Entities convert themselves to and from this shape; the
//! storage layer never sees the typed structs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// A single scalar field value.
///
/// Ordering is total: values of the same variant compare naturally, which
/// is what ORDER BY relies on. Cross-variant ordering follows variant
/// declaration order and has no domain meaning.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Text(String),
    Time(DateTime<Utc>),
}

impl Value {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_time(&self) -> Option<DateTime<Utc>> {
        match self {
            Value::Time(t) => Some(*t),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(t: DateTime<Utc>) -> Self {
        Value::Time(t)
    }
}

/// A flat persisted row: field name to scalar value
pub type Record = BTreeMap<String, Value>;

/// Errors raised when decoding a record into a typed entity
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("missing field: {0}")]
    MissingField(&'static str),
    #[error("wrong type for field: {0}")]
    WrongType(&'static str),
}

/// Fetch a required text field from a record
pub fn get_text(record: &Record, field: &'static str) -> Result<String, RecordError> {
    let value = record.get(field).ok_or(RecordError::MissingField(field))?;
    value
        .as_str()
        .map(String::from)
        .ok_or(RecordError::WrongType(field))
}

/// Fetch a required integer field from a record
pub fn get_int(record: &Record, field: &'static str) -> Result<i64, RecordError> {
    let value = record.get(field).ok_or(RecordError::MissingField(field))?;
    value.as_int().ok_or(RecordError::WrongType(field))
}

/// Fetch a required boolean field from a record
pub fn get_bool(record: &Record, field: &'static str) -> Result<bool, RecordError> {
    let value = record.get(field).ok_or(RecordError::MissingField(field))?;
    value.as_bool().ok_or(RecordError::WrongType(field))
}

/// Fetch a required timestamp field from a record
pub fn get_time(record: &Record, field: &'static str) -> Result<DateTime<Utc>, RecordError> {
    let value = record.get(field).ok_or(RecordError::MissingField(field))?;
    value.as_time().ok_or(RecordError::WrongType(field))
}

#[cfg(test)]
#[path = "value_tests.rs"]
mod tests;
