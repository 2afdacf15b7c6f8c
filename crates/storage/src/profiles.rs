// SPDX-License-Identifier: MIT

//! Profile store
//!
//! Students and instructors share one record shape across two tables; a
//! store instance fronts one of them.

use crate::db::{StorageError, Txn};
use crate::repository::Repository;
use rollcall_core::{fields, IdGen, Predicate, Profile};

/// Typed access to one of the profile tables
#[derive(Clone)]
pub struct ProfileStore<G: IdGen> {
    repo: Repository<G>,
}

impl<G: IdGen> ProfileStore<G> {
    pub fn students(id_gen: G) -> Self {
        Self {
            repo: Repository::new(fields::TABLE_STUDENT, id_gen),
        }
    }

    pub fn instructors(id_gen: G) -> Self {
        Self {
            repo: Repository::new(fields::TABLE_INSTRUCTOR, id_gen),
        }
    }

    pub fn table(&self) -> &'static str {
        self.repo.table()
    }

    pub fn find(&self, txn: &Txn<'_>, id: &str) -> Result<Option<Profile>, StorageError> {
        match self.repo.find_one(txn, &Predicate::all().eq(fields::ID, id), None)? {
            Some(record) => Ok(Some(Profile::from_record(&record)?)),
            None => Ok(None),
        }
    }

    pub fn exists(&self, txn: &Txn<'_>, id: &str) -> Result<bool, StorageError> {
        self.repo.exists(txn, &Predicate::all().eq(fields::ID, id))
    }

    pub fn save(&self, txn: &mut Txn<'_>, profile: &Profile) -> Result<Profile, StorageError> {
        let record = self.repo.save(txn, profile.to_record())?;
        Ok(Profile::from_record(&record)?)
    }

    pub fn delete(&self, txn: &mut Txn<'_>, id: &str) -> Result<usize, StorageError> {
        self.repo.delete(txn, &Predicate::all().eq(fields::ID, id))
    }
}
