// SPDX-License-Identifier: MIT

//! Enrollment ledger store
//!
//! Repository specialization for the `enrollment` table, adding the FIFO
//! rank queries the allocator needs. "Live" always means `dropped = false`.

use crate::db::{StorageError, Txn};
use crate::repository::Repository;
use rollcall_core::{fields, EnrollmentRecord, IdGen, Modifier, Order, Predicate};

/// Typed access to enrollment records
#[derive(Clone)]
pub struct LedgerStore<G: IdGen> {
    repo: Repository<G>,
}

impl<G: IdGen> LedgerStore<G> {
    pub fn new(id_gen: G) -> Self {
        Self {
            repo: Repository::new(fields::TABLE_ENROLLMENT, id_gen),
        }
    }

    /// Persist a record, returning it with its identity populated
    pub fn save(
        &self,
        txn: &mut Txn<'_>,
        record: &EnrollmentRecord,
    ) -> Result<EnrollmentRecord, StorageError> {
        let saved = self.repo.save(txn, record.to_record())?;
        Ok(EnrollmentRecord::from_record(&saved)?)
    }

    /// The student's live record for a class, if any
    pub fn find_live(
        &self,
        txn: &Txn<'_>,
        class_id: &str,
        student_id: &str,
    ) -> Result<Option<EnrollmentRecord>, StorageError> {
        let predicate = Predicate::all()
            .eq(fields::STUDENT_ID, student_id)
            .eq(fields::CLASS_ID, class_id)
            .eq(fields::DROPPED, false);
        match self.repo.find_one(txn, &predicate, None)? {
            Some(record) => Ok(Some(EnrollmentRecord::from_record(&record)?)),
            None => Ok(None),
        }
    }

    fn waitlist_predicate(class_id: &str) -> Predicate {
        Predicate::all()
            .eq(fields::CLASS_ID, class_id)
            .eq(fields::DROPPED, false)
            .eq(fields::WAITING_LIST, true)
    }

    /// Next record to be promoted: earliest enrolled-on among the class's
    /// live waitlisted records
    pub fn head_of_waitlist(
        &self,
        txn: &Txn<'_>,
        class_id: &str,
    ) -> Result<Option<EnrollmentRecord>, StorageError> {
        let modifier = Modifier::order_by(fields::ENROLLED_ON, Order::Asc).limit(1);
        match self
            .repo
            .find_one(txn, &Self::waitlist_predicate(class_id), Some(&modifier))?
        {
            Some(record) => Ok(Some(EnrollmentRecord::from_record(&record)?)),
            None => Ok(None),
        }
    }

    /// 1-based FIFO rank of the student on the class's waiting list, or
    /// None if the student has no live waitlisted record there
    pub fn waitlist_position(
        &self,
        txn: &Txn<'_>,
        class_id: &str,
        student_id: &str,
    ) -> Result<Option<usize>, StorageError> {
        let modifier = Modifier::order_by(fields::ENROLLED_ON, Order::Asc);
        let queue = txn.select(
            self.repo.table(),
            &Self::waitlist_predicate(class_id),
            Some(&modifier),
        )?;
        for (index, record) in queue.iter().enumerate() {
            let record = EnrollmentRecord::from_record(record)?;
            if record.student_id == student_id {
                return Ok(Some(index + 1));
            }
        }
        Ok(None)
    }

    /// Live records for a class, filtered to seated or waitlisted
    pub fn roster(
        &self,
        txn: &Txn<'_>,
        class_id: &str,
        on_waiting_list: bool,
    ) -> Result<Vec<EnrollmentRecord>, StorageError> {
        let predicate = Predicate::all()
            .eq(fields::CLASS_ID, class_id)
            .eq(fields::DROPPED, false)
            .eq(fields::WAITING_LIST, on_waiting_list);
        self.decode_all(txn, &predicate)
    }

    /// Every dropped record for a class
    pub fn dropped(
        &self,
        txn: &Txn<'_>,
        class_id: &str,
    ) -> Result<Vec<EnrollmentRecord>, StorageError> {
        let predicate = Predicate::all()
            .eq(fields::CLASS_ID, class_id)
            .eq(fields::DROPPED, true);
        self.decode_all(txn, &predicate)
    }

    /// How many live waitlisted records the student holds, across every
    /// class. Dropping always clears the waiting flag, so no dropped
    /// filter is needed; the flag alone means live.
    pub fn live_waitlist_count(
        &self,
        txn: &Txn<'_>,
        student_id: &str,
    ) -> Result<usize, StorageError> {
        let predicate = Predicate::all()
            .eq(fields::STUDENT_ID, student_id)
            .eq(fields::WAITING_LIST, true);
        self.repo.count(txn, &predicate)
    }

    fn decode_all(
        &self,
        txn: &Txn<'_>,
        predicate: &Predicate,
    ) -> Result<Vec<EnrollmentRecord>, StorageError> {
        self.repo
            .find_all(txn, predicate)?
            .iter()
            .map(|record| EnrollmentRecord::from_record(record).map_err(StorageError::from))
            .collect()
    }
}

#[cfg(test)]
#[path = "ledger_tests.rs"]
mod tests;
