// SPDX-License-Identifier: MIT

//! Profile management for students and instructors

use crate::error::EngineError;
use rollcall_core::{IdGen, Profile};
use rollcall_storage::{Database, ProfileStore};
use tracing::debug;

/// CRUD over one of the two profile collections
pub struct Profiles<G: IdGen> {
    db: Database,
    store: ProfileStore<G>,
}

impl<G: IdGen> Profiles<G> {
    pub fn students(db: Database, id_gen: G) -> Self {
        Self {
            db,
            store: ProfileStore::students(id_gen),
        }
    }

    pub fn instructors(db: Database, id_gen: G) -> Self {
        Self {
            db,
            store: ProfileStore::instructors(id_gen),
        }
    }

    fn validate(profile: &Profile) -> Result<(), EngineError> {
        if profile.first_name.trim().is_empty() || profile.last_name.trim().is_empty() {
            return Err(EngineError::Validation("name is required".into()));
        }
        if profile.age <= 0 {
            return Err(EngineError::Validation("age must be positive".into()));
        }
        Ok(())
    }

    /// Create a profile, returning it with its identity populated
    pub fn add(&self, profile: &Profile) -> Result<Profile, EngineError> {
        Self::validate(profile)?;
        let mut txn = self.db.begin();
        debug!(table = self.store.table(), "adding profile");
        let saved = self.store.save(&mut txn, profile)?;
        txn.commit()?;
        Ok(saved)
    }

    /// Update an existing profile in full
    pub fn update(&self, profile: &Profile) -> Result<Profile, EngineError> {
        Self::validate(profile)?;
        let id = profile
            .id
            .clone()
            .ok_or_else(|| EngineError::Validation("profile id is required".into()))?;

        let mut txn = self.db.begin();
        if self.store.find(&txn, &id)?.is_none() {
            return Err(EngineError::ProfileNotFound(id));
        }
        let saved = self.store.save(&mut txn, profile)?;
        txn.commit()?;
        Ok(saved)
    }

    pub fn get(&self, id: &str) -> Result<Profile, EngineError> {
        let txn = self.db.begin();
        self.store
            .find(&txn, id)?
            .ok_or_else(|| EngineError::ProfileNotFound(id.to_string()))
    }

    /// Delete a profile. Blocked while classes or enrollments reference it.
    pub fn remove(&self, id: &str) -> Result<(), EngineError> {
        let mut txn = self.db.begin();
        if self.store.delete(&mut txn, id)? == 0 {
            return Err(EngineError::ProfileNotFound(id.to_string()));
        }
        txn.commit()?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "profiles_tests.rs"]
mod tests;
