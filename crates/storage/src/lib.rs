// SPDX-License-Identifier: MIT

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! rollcall-storage: journal-backed transactional store
//!
//! This crate provides:
//! - A JSON-lines commit journal (one entry per committed unit of work)
//! - An in-process database materialized from journal replay, with
//!   integrity constraints and an explicit unit-of-work boundary
//! - The generic predicate repository and its class/ledger specializations

pub mod db;
pub mod journal;
pub mod ledger;
pub mod profiles;
pub mod repository;
pub mod schema;
pub mod sections;

pub use db::{Database, StorageError, Txn};
pub use journal::{Journal, JournalEntry, RowOp};
pub use ledger::LedgerStore;
pub use profiles::ProfileStore;
pub use repository::Repository;
pub use schema::{ForeignKey, TableSpec, UniqueRule};
pub use sections::SectionStore;
