// SPDX-License-Identifier: MIT

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! rollcall-engine: enrollment allocation services
//!
//! This crate provides:
//! - The enrollment allocator: the invariant-preserving state machine for
//!   enroll / drop / promotion over shared section capacity
//! - Class administration: section lifecycle and instructor reassignment
//! - Profile management for students and instructors
//!
//! Every operation is one atomic unit of work against the injected
//! [`Database`](rollcall_storage::Database) handle.

pub mod administration;
pub mod allocator;
pub mod error;
pub mod profiles;

pub use administration::{Administration, SectionDraft};
pub use allocator::Allocator;
pub use error::EngineError;
pub use profiles::Profiles;
