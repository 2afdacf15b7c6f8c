// SPDX-License-Identifier: MIT

//! Class administration
//!
//! Section lifecycle: create, delete, reassign instructor. Plain CRUD —
//! the allocator owns every capacity decision. Deletion rides on the
//! store's referential constraint: a section with enrollment history
//! cannot be removed.

use crate::error::EngineError;
use rollcall_core::{ClassSection, IdGen, SectionSelector};
use rollcall_storage::{Database, ProfileStore, SectionStore, Txn};
use tracing::debug;

/// Attributes for a new section
#[derive(Debug, Clone)]
pub struct SectionDraft {
    pub instructor_id: String,
    pub department: String,
    pub course_code: String,
    pub section_number: i64,
    pub class_name: String,
    pub max_enrollment: i64,
    pub automatic_enrollment_frozen: bool,
}

impl SectionDraft {
    fn selector(&self) -> SectionSelector {
        SectionSelector {
            department: self.department.clone(),
            course_code: self.course_code.clone(),
            section_number: self.section_number,
        }
    }

    fn validate(&self) -> Result<(), EngineError> {
        if self.department.trim().is_empty() {
            return Err(EngineError::Validation("department is required".into()));
        }
        if self.course_code.trim().is_empty() {
            return Err(EngineError::Validation("course code is required".into()));
        }
        if self.class_name.trim().is_empty() {
            return Err(EngineError::Validation("class name is required".into()));
        }
        if self.max_enrollment <= 0 {
            return Err(EngineError::Validation(
                "max enrollment must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Section lifecycle service
pub struct Administration<G: IdGen> {
    db: Database,
    sections: SectionStore<G>,
    instructors: ProfileStore<G>,
}

impl<G: IdGen> Administration<G> {
    pub fn new(db: Database, id_gen: G) -> Self {
        Self {
            db,
            sections: SectionStore::new(id_gen.clone()),
            instructors: ProfileStore::instructors(id_gen),
        }
    }

    fn require_instructor(&self, txn: &Txn<'_>, id: &str) -> Result<(), EngineError> {
        if !self.instructors.exists(txn, id)? {
            return Err(EngineError::ProfileNotFound(id.to_string()));
        }
        Ok(())
    }

    /// Create a section with an empty roster
    pub fn add_section(&self, draft: &SectionDraft) -> Result<ClassSection, EngineError> {
        draft.validate()?;
        let mut txn = self.db.begin();
        self.require_instructor(&txn, &draft.instructor_id)?;
        if self.sections.exists(&txn, &draft.selector())? {
            return Err(EngineError::Validation("class already exists".into()));
        }

        debug!(class = %draft.selector(), "adding section");
        let section = ClassSection {
            id: None,
            instructor_id: draft.instructor_id.clone(),
            department: draft.department.clone(),
            course_code: draft.course_code.clone(),
            section_number: draft.section_number,
            class_name: draft.class_name.clone(),
            current_enrollment: 0,
            max_enrollment: draft.max_enrollment,
            automatic_enrollment_frozen: draft.automatic_enrollment_frozen,
        };
        let saved = self.sections.save(&mut txn, &section)?;
        txn.commit()?;
        Ok(saved)
    }

    /// Delete a section. Blocked while dependent enrollment records exist.
    pub fn remove_section(&self, selector: &SectionSelector) -> Result<(), EngineError> {
        let mut txn = self.db.begin();
        if !self.sections.exists(&txn, selector)? {
            return Err(EngineError::ClassNotFound);
        }
        debug!(class = %selector, "removing section");
        self.sections.delete(&mut txn, selector)?;
        txn.commit()?;
        Ok(())
    }

    /// Hand a section to a different instructor
    pub fn reassign_instructor(
        &self,
        selector: &SectionSelector,
        instructor_id: &str,
    ) -> Result<ClassSection, EngineError> {
        let mut txn = self.db.begin();
        let section = self
            .sections
            .find_by_selector(&txn, selector)?
            .ok_or(EngineError::ClassNotFound)?;
        self.require_instructor(&txn, instructor_id)?;

        debug!(class = %selector, instructor = instructor_id, "reassigning instructor");
        let updated = ClassSection {
            instructor_id: instructor_id.to_string(),
            ..section
        };
        let saved = self.sections.save(&mut txn, &updated)?;
        txn.commit()?;
        Ok(saved)
    }
}

#[cfg(test)]
#[path = "administration_tests.rs"]
mod tests;
