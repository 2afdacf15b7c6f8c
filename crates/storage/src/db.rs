// SPDX-License-Identifier: MIT

//! Transactional database materialized from the commit journal
//!
//! Tables live in memory; the journal is the durable record. On open the
//! journal replays into the tables, after which every committed unit of
//! work appends one entry.
//!
//! A [`Txn`] is the unit-of-work boundary: it holds the database lock for
//! its whole lifetime, so the read-decide-write sequence of one operation
//! is serialized against every other operation on the store. Mutations
//! apply immediately (reads inside the transaction see them) while an undo
//! log keeps rollback exact: dropping an uncommitted transaction, or a
//! journal append failure at commit, restores the pre-transaction state.

use crate::journal::{Journal, JournalError, RowOp};
use crate::schema::TableSpec;
use rollcall_core::{fields, Modifier, Order, Predicate, Record, RecordError, Value};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

/// Errors that can occur in store operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("journal error: {0}")]
    Journal(#[from] JournalError),
    #[error("integrity violation: {0}")]
    Integrity(String),
    #[error("unknown table: {0}")]
    UnknownTable(String),
    #[error("record has no identity")]
    MissingIdentity,
    #[error("corrupt record: {0}")]
    Corrupt(#[from] RecordError),
}

struct DbInner {
    specs: Vec<TableSpec>,
    tables: HashMap<String, Vec<Record>>,
    journal: Option<Journal>,
}

/// Shared handle to one transactional store
#[derive(Clone)]
pub struct Database {
    inner: Arc<Mutex<DbInner>>,
}

fn record_id(record: &Record) -> Option<&str> {
    record.get(fields::ID).and_then(Value::as_str)
}

impl Database {
    /// Open a journal-backed database, replaying any existing commits
    pub fn open(path: &Path, specs: Vec<TableSpec>) -> Result<Self, StorageError> {
        let mut tables: HashMap<String, Vec<Record>> = specs
            .iter()
            .map(|spec| (spec.name.to_string(), Vec::new()))
            .collect();

        for op in Journal::replay(path)? {
            apply_op(&mut tables, op);
        }

        let journal = Journal::open(path)?;
        Ok(Self {
            inner: Arc::new(Mutex::new(DbInner {
                specs,
                tables,
                journal: Some(journal),
            })),
        })
    }

    /// Open a volatile database for tests
    pub fn in_memory(specs: Vec<TableSpec>) -> Self {
        let tables = specs
            .iter()
            .map(|spec| (spec.name.to_string(), Vec::new()))
            .collect();
        Self {
            inner: Arc::new(Mutex::new(DbInner {
                specs,
                tables,
                journal: None,
            })),
        }
    }

    /// Begin a unit of work. Holds the store lock until commit or drop.
    pub fn begin(&self) -> Txn<'_> {
        let guard = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        Txn {
            inner: guard,
            undo: Vec::new(),
            ops: Vec::new(),
            committed: false,
        }
    }
}

/// Replay application: no integrity checks, commits were validated when made
fn apply_op(tables: &mut HashMap<String, Vec<Record>>, op: RowOp) {
    match op {
        RowOp::Upsert { table, row } => {
            let Some(rows) = tables.get_mut(&table) else {
                return;
            };
            let id = record_id(&row).map(String::from);
            match rows
                .iter_mut()
                .find(|r| record_id(r).map(String::from) == id)
            {
                Some(existing) => *existing = row,
                None => rows.push(row),
            }
        }
        RowOp::Delete { table, id } => {
            if let Some(rows) = tables.get_mut(&table) {
                rows.retain(|r| record_id(r) != Some(id.as_str()));
            }
        }
    }
}

enum Undo {
    Inserted { table: String, id: String },
    Replaced { table: String, row: Record },
    Deleted { table: String, index: usize, row: Record },
}

/// One atomic unit of work against the store
pub struct Txn<'a> {
    inner: MutexGuard<'a, DbInner>,
    undo: Vec<Undo>,
    ops: Vec<RowOp>,
    committed: bool,
}

impl Txn<'_> {
    fn rows(&self, table: &str) -> Result<&Vec<Record>, StorageError> {
        self.inner
            .tables
            .get(table)
            .ok_or_else(|| StorageError::UnknownTable(table.to_string()))
    }

    fn spec(&self, table: &str) -> Result<&TableSpec, StorageError> {
        self.inner
            .specs
            .iter()
            .find(|spec| spec.name == table)
            .ok_or_else(|| StorageError::UnknownTable(table.to_string()))
    }

    /// Fetch a row by identity
    pub fn get(&self, table: &str, id: &str) -> Result<Option<Record>, StorageError> {
        Ok(self
            .rows(table)?
            .iter()
            .find(|r| record_id(r) == Some(id))
            .cloned())
    }

    /// Select rows matching the predicate, with optional ordering/limit.
    ///
    /// Base order is insertion order; the sort is stable, so equal keys
    /// keep their insertion order (FIFO ties resolve deterministically).
    pub fn select(
        &self,
        table: &str,
        predicate: &Predicate,
        modifier: Option<&Modifier>,
    ) -> Result<Vec<Record>, StorageError> {
        let mut rows: Vec<Record> = self
            .rows(table)?
            .iter()
            .filter(|r| predicate.matches(r))
            .cloned()
            .collect();

        if let Some(modifier) = modifier {
            if let Some((field, order)) = modifier.order_by {
                rows.sort_by(|a, b| {
                    let ordering = a.get(field).cmp(&b.get(field));
                    match order {
                        Order::Asc => ordering,
                        Order::Desc => ordering.reverse(),
                    }
                });
            }
            if let Some(limit) = modifier.limit {
                rows.truncate(limit);
            }
        }

        Ok(rows)
    }

    /// Count rows matching the predicate
    pub fn count(&self, table: &str, predicate: &Predicate) -> Result<usize, StorageError> {
        Ok(self.rows(table)?.iter().filter(|r| predicate.matches(r)).count())
    }

    /// Insert a full row. The record must already carry its identity.
    pub fn insert(&mut self, table: &str, record: Record) -> Result<(), StorageError> {
        let id = record_id(&record)
            .map(String::from)
            .ok_or(StorageError::MissingIdentity)?;

        if self.get(table, &id)?.is_some() {
            return Err(StorageError::Integrity(format!(
                "duplicate identity {id} in {table}"
            )));
        }
        self.check_uniques(table, &record, None)?;
        self.check_foreign_keys(table, &record)?;

        let Some(rows) = self.inner.tables.get_mut(table) else {
            return Err(StorageError::UnknownTable(table.to_string()));
        };
        rows.push(record.clone());
        self.undo.push(Undo::Inserted {
            table: table.to_string(),
            id,
        });
        self.ops.push(RowOp::Upsert {
            table: table.to_string(),
            row: record,
        });
        Ok(())
    }

    /// Field-wise update of an existing row: only the supplied fields
    /// change, everything else is preserved.
    pub fn update(&mut self, table: &str, id: &str, changes: Record) -> Result<(), StorageError> {
        let previous = self.get(table, id)?.ok_or_else(|| {
            StorageError::Integrity(format!("no row {id} in {table} to update"))
        })?;

        let mut merged = previous.clone();
        for (field, value) in changes {
            if field == fields::ID {
                continue;
            }
            merged.insert(field, value);
        }

        self.check_uniques(table, &merged, Some(id))?;
        self.check_foreign_keys(table, &merged)?;

        let Some(rows) = self.inner.tables.get_mut(table) else {
            return Err(StorageError::UnknownTable(table.to_string()));
        };
        if let Some(row) = rows.iter_mut().find(|r| record_id(r) == Some(id)) {
            *row = merged.clone();
        }
        self.undo.push(Undo::Replaced {
            table: table.to_string(),
            row: previous,
        });
        self.ops.push(RowOp::Upsert {
            table: table.to_string(),
            row: merged,
        });
        Ok(())
    }

    /// Delete every row matching the predicate. Referential constraints
    /// block deletion while dependent rows exist.
    pub fn delete_where(
        &mut self,
        table: &str,
        predicate: &Predicate,
    ) -> Result<usize, StorageError> {
        let victims: Vec<(usize, Record)> = self
            .rows(table)?
            .iter()
            .enumerate()
            .filter(|(_, r)| predicate.matches(r))
            .map(|(i, r)| (i, r.clone()))
            .collect();

        for (_, row) in &victims {
            if let Some(id) = record_id(row) {
                self.check_no_dependents(table, id)?;
            }
        }

        // Remove back-to-front so indices stay valid
        for (index, row) in victims.iter().rev() {
            let Some(rows) = self.inner.tables.get_mut(table) else {
                return Err(StorageError::UnknownTable(table.to_string()));
            };
            rows.remove(*index);
            self.undo.push(Undo::Deleted {
                table: table.to_string(),
                index: *index,
                row: row.clone(),
            });
            if let Some(id) = record_id(row) {
                self.ops.push(RowOp::Delete {
                    table: table.to_string(),
                    id: id.to_string(),
                });
            }
        }

        Ok(victims.len())
    }

    /// Commit the unit of work: append every staged row op to the journal
    /// as one entry. On journal failure the in-memory state rolls back and
    /// nothing is applied.
    pub fn commit(mut self) -> Result<(), StorageError> {
        let result = match self.inner.journal.as_mut() {
            Some(journal) if !self.ops.is_empty() => match journal.append(&self.ops) {
                Ok(_) => Ok(()),
                Err(e) => {
                    self.undo_all();
                    Err(StorageError::Journal(e))
                }
            },
            _ => Ok(()),
        };
        self.committed = true;
        result
    }

    fn undo_all(&mut self) {
        while let Some(entry) = self.undo.pop() {
            match entry {
                Undo::Inserted { table, id } => {
                    if let Some(rows) = self.inner.tables.get_mut(&table) {
                        rows.retain(|r| record_id(r) != Some(id.as_str()));
                    }
                }
                Undo::Replaced { table, row } => {
                    if let Some(rows) = self.inner.tables.get_mut(&table) {
                        let id = record_id(&row).map(String::from);
                        if let Some(existing) = rows
                            .iter_mut()
                            .find(|r| record_id(r).map(String::from) == id)
                        {
                            *existing = row;
                        }
                    }
                }
                Undo::Deleted { table, index, row } => {
                    if let Some(rows) = self.inner.tables.get_mut(&table) {
                        let index = index.min(rows.len());
                        rows.insert(index, row);
                    }
                }
            }
        }
    }

    fn check_uniques(
        &self,
        table: &str,
        candidate: &Record,
        exclude_id: Option<&str>,
    ) -> Result<(), StorageError> {
        let spec = self.spec(table)?;
        for rule in &spec.uniques {
            if let Some((field, value)) = &rule.when {
                if candidate.get(*field) != Some(value) {
                    continue;
                }
            }
            let Some(key) = rule
                .fields
                .iter()
                .map(|f| candidate.get(*f))
                .collect::<Option<Vec<&Value>>>()
            else {
                continue;
            };

            let clash = self.rows(table)?.iter().any(|row| {
                if record_id(row) == exclude_id && exclude_id.is_some() {
                    return false;
                }
                if let Some((field, value)) = &rule.when {
                    if row.get(*field) != Some(value) {
                        return false;
                    }
                }
                rule.fields
                    .iter()
                    .zip(&key)
                    .all(|(f, v)| row.get(*f) == Some(*v))
            });
            if clash {
                return Err(StorageError::Integrity(format!(
                    "unique constraint on {table} ({}) violated",
                    rule.fields.join(", ")
                )));
            }
        }
        Ok(())
    }

    fn check_foreign_keys(&self, table: &str, candidate: &Record) -> Result<(), StorageError> {
        let spec = self.spec(table)?;
        for fk in &spec.foreign_keys {
            let Some(value) = candidate.get(fk.field) else {
                continue;
            };
            let Some(parent_id) = value.as_str() else {
                return Err(StorageError::Integrity(format!(
                    "{table}.{} must reference {} by id",
                    fk.field, fk.references
                )));
            };
            if self.get(fk.references, parent_id)?.is_none() {
                return Err(StorageError::Integrity(format!(
                    "{table}.{} references missing {} {parent_id}",
                    fk.field, fk.references
                )));
            }
        }
        Ok(())
    }

    fn check_no_dependents(&self, table: &str, id: &str) -> Result<(), StorageError> {
        for spec in &self.inner.specs {
            for fk in &spec.foreign_keys {
                if fk.references != table {
                    continue;
                }
                let referenced = Value::from(id);
                if self
                    .rows(spec.name)?
                    .iter()
                    .any(|row| row.get(fk.field) == Some(&referenced))
                {
                    return Err(StorageError::Integrity(format!(
                        "{} {id} still referenced by {}.{}",
                        table, spec.name, fk.field
                    )));
                }
            }
        }
        Ok(())
    }
}

impl Drop for Txn<'_> {
    fn drop(&mut self) {
        if !self.committed {
            self.undo_all();
        }
    }
}

#[cfg(test)]
#[path = "db_tests.rs"]
mod tests;
