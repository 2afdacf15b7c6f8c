// SPDX-License-Identifier: MIT

//! Enrollment allocator
//!
//! The core state machine over shared seat capacity. Each operation opens
//! one unit of work, re-reads current section state inside it, decides,
//! writes, and commits; no section or enrollment state is cached between
//! operations. An integrity violation from the store aborts the whole
//! operation and surfaces as `Conflict` with nothing partially applied.

use crate::error::EngineError;
use rollcall_core::limits::MAX_STUDENT_WAITLISTS;
use rollcall_core::{
    AdmitDenied, ClassSection, Clock, EnrollmentRecord, IdGen, SectionSelector,
};
use rollcall_storage::{Database, LedgerStore, SectionStore, Txn};
use tracing::debug;

/// Orchestrates enroll/drop/query operations over one shared store
pub struct Allocator<C: Clock, G: IdGen> {
    db: Database,
    sections: SectionStore<G>,
    ledger: LedgerStore<G>,
    clock: C,
}

impl<C: Clock, G: IdGen> Allocator<C, G> {
    pub fn new(db: Database, clock: C, id_gen: G) -> Self {
        Self {
            db,
            sections: SectionStore::new(id_gen.clone()),
            ledger: LedgerStore::new(id_gen),
            clock,
        }
    }

    fn resolve(
        &self,
        txn: &Txn<'_>,
        selector: &SectionSelector,
    ) -> Result<ClassSection, EngineError> {
        self.sections
            .find_by_selector(txn, selector)?
            .ok_or(EngineError::ClassNotFound)
    }

    /// Register a student in a section.
    ///
    /// Guard order matters and is part of the contract: freeze, then the
    /// section's overflow bound, then the student's global waitlist cap —
    /// the cap rejects even when the seat would be Active. The seat
    /// decision reads the counter as admission cursor: the (N+1)-th
    /// registration is Active while N < capacity, Waitlisted after.
    pub fn enroll(
        &self,
        student_id: &str,
        selector: &SectionSelector,
    ) -> Result<EnrollmentRecord, EngineError> {
        let mut txn = self.db.begin();
        let section = self.resolve(&txn, selector)?;

        let seat = section.admission().map_err(|denied| match denied {
            AdmitDenied::Frozen => EngineError::EnrollmentFrozen,
            AdmitDenied::WaitlistFull => EngineError::WaitlistFull,
        })?;

        let queued = self.ledger.live_waitlist_count(&txn, student_id)?;
        if queued as i64 >= MAX_STUDENT_WAITLISTS {
            return Err(EngineError::TooManyWaitlists(MAX_STUDENT_WAITLISTS));
        }

        let class_id = section.id.clone().ok_or(EngineError::ClassNotFound)?;
        debug!(student = student_id, class = %selector, ?seat, "enrolling");

        let record =
            EnrollmentRecord::new(student_id, class_id, self.clock.now(), seat);
        let record = self.ledger.save(&mut txn, &record)?;
        self.sections.save(&mut txn, &section.with_enrollment_added())?;
        txn.commit()?;
        Ok(record)
    }

    /// Drop a student's live registration.
    ///
    /// Dropping a waitlisted record is inert: it held no seat, so nobody
    /// is promoted. Dropping an active record frees a seat; if the section
    /// still has a waitlisted record (counter above capacity before the
    /// decrement) and is not frozen, the earliest-enrolled waitlisted
    /// record is promoted in the same unit of work — a reclassification
    /// only, the counter change already accounts for the drop.
    pub fn drop_enrollment(
        &self,
        student_id: &str,
        selector: &SectionSelector,
    ) -> Result<(), EngineError> {
        let mut txn = self.db.begin();
        let section = self.resolve(&txn, selector)?;
        let class_id = section.id.clone().ok_or(EngineError::ClassNotFound)?;

        let record = self
            .ledger
            .find_live(&txn, &class_id, student_id)?
            .ok_or(EngineError::NotEnrolled)?;

        let mut promoted = None;
        if !record.waiting_list
            && section.has_waitlisted()
            && section.accepts_automatic_promotion()
        {
            promoted = self.ledger.head_of_waitlist(&txn, &class_id)?;
        }

        debug!(
            student = student_id,
            class = %selector,
            was_waitlisted = record.waiting_list,
            promoting = promoted.is_some(),
            "dropping enrollment"
        );

        self.ledger.save(&mut txn, &record.drop_enrollment())?;
        self.sections
            .save(&mut txn, &section.with_enrollment_removed())?;
        if let Some(next) = promoted {
            self.ledger.save(&mut txn, &next.promote())?;
        }
        txn.commit()?;
        Ok(())
    }

    /// 1-based FIFO rank of the student on the section's waiting list
    pub fn waitlist_position(
        &self,
        student_id: &str,
        selector: &SectionSelector,
    ) -> Result<usize, EngineError> {
        let txn = self.db.begin();
        let section = self.resolve(&txn, selector)?;
        let class_id = section.id.ok_or(EngineError::ClassNotFound)?;
        self.ledger
            .waitlist_position(&txn, &class_id, student_id)?
            .ok_or(EngineError::NotWaitlisted)
    }

    /// Live records for a section: seated (`false`) or queued (`true`)
    pub fn roster_by_status(
        &self,
        selector: &SectionSelector,
        on_waiting_list: bool,
    ) -> Result<Vec<EnrollmentRecord>, EngineError> {
        let txn = self.db.begin();
        let section = self.resolve(&txn, selector)?;
        let class_id = section.id.ok_or(EngineError::ClassNotFound)?;
        Ok(self.ledger.roster(&txn, &class_id, on_waiting_list)?)
    }

    /// Every dropped record for a section
    pub fn dropped_roster(
        &self,
        selector: &SectionSelector,
    ) -> Result<Vec<EnrollmentRecord>, EngineError> {
        let txn = self.db.begin();
        let section = self.resolve(&txn, selector)?;
        let class_id = section.id.ok_or(EngineError::ClassNotFound)?;
        Ok(self.ledger.dropped(&txn, &class_id)?)
    }

    /// Sections whose recorded total has not passed capacity
    pub fn available_sections(&self) -> Result<Vec<ClassSection>, EngineError> {
        let txn = self.db.begin();
        Ok(self.sections.available_sections(&txn)?)
    }
}

#[cfg(test)]
#[path = "allocator_tests.rs"]
mod tests;
