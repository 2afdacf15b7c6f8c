// SPDX-License-Identifier: MIT

//! Tagged predicate builder.
//!
//! Queries are equality filters over trusted field names, combined with a
//! single AND/OR connective, plus an optional ordering/limit modifier.
//! Field names are `&'static str` internal identifiers; values are always
//! carried as data. That split is the injection-safety boundary: nothing
//! external ever becomes structural.

use crate::value::{Record, Value};

/// How a predicate's filters combine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Connective {
    #[default]
    And,
    Or,
}

/// One field = value equality filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub field: &'static str,
    pub value: Value,
}

/// A conjunctive or disjunctive equality predicate.
///
/// An empty predicate matches every record in the collection, which is how
/// whole-collection `count`/`exists` are expressed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Predicate {
    connective: Connective,
    filters: Vec<Filter>,
}

impl Predicate {
    /// Predicate requiring all filters to match (AND)
    pub fn all() -> Self {
        Self {
            connective: Connective::And,
            filters: Vec::new(),
        }
    }

    /// Predicate requiring any filter to match (OR)
    pub fn any() -> Self {
        Self {
            connective: Connective::Or,
            filters: Vec::new(),
        }
    }

    /// Add an equality filter
    pub fn eq(mut self, field: &'static str, value: impl Into<Value>) -> Self {
        self.filters.push(Filter {
            field,
            value: value.into(),
        });
        self
    }

    pub fn connective(&self) -> Connective {
        self.connective
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Evaluate this predicate against a record
    pub fn matches(&self, record: &Record) -> bool {
        if self.filters.is_empty() {
            return true;
        }
        let hit = |f: &Filter| record.get(f.field) == Some(&f.value);
        match self.connective {
            Connective::And => self.filters.iter().all(hit),
            Connective::Or => self.filters.iter().any(hit),
        }
    }
}

/// Sort direction for an ORDER BY modifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Asc,
    Desc,
}

/// Optional trailing modifier: ordering and/or row limit
#[derive(Debug, Clone, Default)]
pub struct Modifier {
    pub order_by: Option<(&'static str, Order)>,
    pub limit: Option<usize>,
}

impl Modifier {
    pub fn order_by(field: &'static str, order: Order) -> Self {
        Self {
            order_by: Some((field, order)),
            limit: None,
        }
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

#[cfg(test)]
#[path = "query_tests.rs"]
mod tests;
