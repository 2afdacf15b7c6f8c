// SPDX-License-Identifier: MIT

//! Generic predicate repository
//!
//! One repository instance fronts one named table. All methods stage work
//! against the caller's transaction; nothing here commits. Field and table
//! names are trusted internal identifiers — predicate values are the only
//! externally influenced inputs, and they are carried as data throughout.

use crate::db::{StorageError, Txn};
use rollcall_core::{fields, IdGen, Modifier, Predicate, Record, Value};
use tracing::debug;

/// Predicate-based persistence over one table
#[derive(Clone)]
pub struct Repository<G: IdGen> {
    table: &'static str,
    id_gen: G,
}

impl<G: IdGen> Repository<G> {
    pub fn new(table: &'static str, id_gen: G) -> Self {
        Self { table, id_gen }
    }

    pub fn table(&self) -> &'static str {
        self.table
    }

    /// Save a record. A record whose identity already exists gets a
    /// field-wise update of exactly the supplied attributes; otherwise the
    /// record is inserted whole, generating a fresh identity if absent.
    /// Returns the record with its identity populated.
    pub fn save(&self, txn: &mut Txn<'_>, record: Record) -> Result<Record, StorageError> {
        let existing_id = record.get(fields::ID).and_then(Value::as_str).map(String::from);

        if let Some(id) = &existing_id {
            if txn.get(self.table, id)?.is_some() {
                debug!(table = self.table, id = %id, "updating record");
                txn.update(self.table, id, record.clone())?;
                return Ok(record);
            }
        }

        let mut record = record;
        let id = match existing_id {
            Some(id) => id,
            None => {
                let id = self.id_gen.next();
                record.insert(fields::ID.to_string(), Value::from(id.as_str()));
                id
            }
        };
        debug!(table = self.table, id = %id, "inserting record");
        txn.insert(self.table, record.clone())?;
        Ok(record)
    }

    /// First record matching the predicate, honoring an optional
    /// ordering/limit modifier
    pub fn find_one(
        &self,
        txn: &Txn<'_>,
        predicate: &Predicate,
        modifier: Option<&Modifier>,
    ) -> Result<Option<Record>, StorageError> {
        debug!(table = self.table, ?predicate, "select one");
        let mut rows = txn.select(self.table, predicate, modifier)?;
        if rows.is_empty() {
            Ok(None)
        } else {
            Ok(Some(rows.swap_remove(0)))
        }
    }

    /// Every record matching the predicate
    pub fn find_all(
        &self,
        txn: &Txn<'_>,
        predicate: &Predicate,
    ) -> Result<Vec<Record>, StorageError> {
        debug!(table = self.table, ?predicate, "select all");
        txn.select(self.table, predicate, None)
    }

    /// Number of matching records; an empty predicate counts the table
    pub fn count(&self, txn: &Txn<'_>, predicate: &Predicate) -> Result<usize, StorageError> {
        debug!(table = self.table, ?predicate, "count");
        txn.count(self.table, predicate)
    }

    /// Whether any record matches
    pub fn exists(&self, txn: &Txn<'_>, predicate: &Predicate) -> Result<bool, StorageError> {
        Ok(self.count(txn, predicate)? > 0)
    }

    /// Delete matching records; integrity rules may refuse
    pub fn delete(&self, txn: &mut Txn<'_>, predicate: &Predicate) -> Result<usize, StorageError> {
        debug!(table = self.table, ?predicate, "delete");
        txn.delete_where(self.table, predicate)
    }
}

#[cfg(test)]
#[path = "repository_tests.rs"]
mod tests;
