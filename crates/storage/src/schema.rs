// SPDX-License-Identifier: MIT

//! Table registry and integrity rules
//!
//! The store enforces three kinds of constraints: identity uniqueness,
//! declared unique rules (optionally conditional on a field value), and
//! referential integrity between tables. Violations surface as
//! [`StorageError::Integrity`](crate::StorageError) and are never retried.

use rollcall_core::{fields, Value};

/// A uniqueness rule over one or more fields.
///
/// When `when` is set, the rule only applies to rows matching that
/// field/value pair. The live-enrollment rule uses this: (student, class)
/// must be unique among rows where `dropped = false`, while dropped
/// history rows may repeat freely.
#[derive(Debug, Clone)]
pub struct UniqueRule {
    pub fields: Vec<&'static str>,
    pub when: Option<(&'static str, Value)>,
}

impl UniqueRule {
    pub fn over(fields: Vec<&'static str>) -> Self {
        Self { fields, when: None }
    }

    pub fn when(mut self, field: &'static str, value: impl Into<Value>) -> Self {
        self.when = Some((field, value.into()));
        self
    }
}

/// A referential constraint: `field` must hold the id of a row in
/// `references`, and the referenced row cannot be deleted while this row
/// exists.
#[derive(Debug, Clone)]
pub struct ForeignKey {
    pub field: &'static str,
    pub references: &'static str,
}

/// Declared shape of one table
#[derive(Debug, Clone)]
pub struct TableSpec {
    pub name: &'static str,
    pub uniques: Vec<UniqueRule>,
    pub foreign_keys: Vec<ForeignKey>,
}

impl TableSpec {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            uniques: Vec::new(),
            foreign_keys: Vec::new(),
        }
    }

    pub fn unique(mut self, rule: UniqueRule) -> Self {
        self.uniques.push(rule);
        self
    }

    pub fn references(mut self, field: &'static str, table: &'static str) -> Self {
        self.foreign_keys.push(ForeignKey {
            field,
            references: table,
        });
        self
    }
}

/// The registrar's four tables
pub fn tables() -> Vec<TableSpec> {
    vec![
        TableSpec::new(fields::TABLE_STUDENT),
        TableSpec::new(fields::TABLE_INSTRUCTOR),
        TableSpec::new(fields::TABLE_CLASS)
            .unique(UniqueRule::over(vec![
                fields::DEPARTMENT,
                fields::COURSE_CODE,
                fields::SECTION_NUMBER,
            ]))
            .references(fields::INSTRUCTOR_ID, fields::TABLE_INSTRUCTOR),
        TableSpec::new(fields::TABLE_ENROLLMENT)
            .unique(
                UniqueRule::over(vec![fields::STUDENT_ID, fields::CLASS_ID])
                    .when(fields::DROPPED, false),
            )
            .references(fields::CLASS_ID, fields::TABLE_CLASS)
            .references(fields::STUDENT_ID, fields::TABLE_STUDENT),
    ]
}
