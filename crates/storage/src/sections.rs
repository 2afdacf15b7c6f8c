// SPDX-License-Identifier: MIT

//! Class capacity store
//!
//! Repository specialization for the `class` table, adding the
//! capacity-filtered listing.

use crate::db::{StorageError, Txn};
use crate::repository::Repository;
use rollcall_core::{fields, ClassSection, IdGen, Predicate, SectionSelector};

/// Typed access to class sections
#[derive(Clone)]
pub struct SectionStore<G: IdGen> {
    repo: Repository<G>,
}

impl<G: IdGen> SectionStore<G> {
    pub fn new(id_gen: G) -> Self {
        Self {
            repo: Repository::new(fields::TABLE_CLASS, id_gen),
        }
    }

    /// Locate a section by its (department, course code, section number) key
    pub fn find_by_selector(
        &self,
        txn: &Txn<'_>,
        selector: &SectionSelector,
    ) -> Result<Option<ClassSection>, StorageError> {
        match self.repo.find_one(txn, &selector.predicate(), None)? {
            Some(record) => Ok(Some(ClassSection::from_record(&record)?)),
            None => Ok(None),
        }
    }

    pub fn exists(&self, txn: &Txn<'_>, selector: &SectionSelector) -> Result<bool, StorageError> {
        self.repo.exists(txn, &selector.predicate())
    }

    /// Persist a section, returning it with its identity populated
    pub fn save(
        &self,
        txn: &mut Txn<'_>,
        section: &ClassSection,
    ) -> Result<ClassSection, StorageError> {
        let record = self.repo.save(txn, section.to_record())?;
        Ok(ClassSection::from_record(&record)?)
    }

    pub fn delete(
        &self,
        txn: &mut Txn<'_>,
        selector: &SectionSelector,
    ) -> Result<usize, StorageError> {
        self.repo.delete(txn, &selector.predicate())
    }

    /// Sections whose recorded total (active + waitlisted) has not passed
    /// capacity: `current_enrollment <= max_enrollment`.
    ///
    /// The comparison is inclusive on purpose — a section exactly at
    /// capacity still lists, because enrollment can queue onto its waiting
    /// list. This matches the deployed behavior; do not tighten it to
    /// "has a free seat".
    pub fn available_sections(&self, txn: &Txn<'_>) -> Result<Vec<ClassSection>, StorageError> {
        self.repo
            .find_all(txn, &Predicate::all())?
            .iter()
            .map(|record| ClassSection::from_record(record).map_err(StorageError::from))
            .filter(|section| match section {
                Ok(s) => s.current_enrollment <= s.max_enrollment,
                Err(_) => true,
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "sections_tests.rs"]
mod tests;
