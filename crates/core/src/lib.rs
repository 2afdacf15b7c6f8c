// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! rollcall-core: Core library for the rollcall enrollment engine
//!
//! This crate provides:
//! - Pure state machines for class sections and enrollment records
//! - The flat record / scalar value model shared with storage
//! - The tagged predicate builder consumed by the repository layer
//! - Clock and id-generation abstractions for testable effects

pub mod clock;
pub mod id;

pub mod fields;
pub mod limits;
pub mod query;
pub mod value;

// Entities (order matters for dependencies)
pub mod enrollment;
pub mod profile;
pub mod section;

// Re-exports
pub use clock::{Clock, FakeClock, SystemClock};
pub use enrollment::{EnrollmentRecord, EnrollmentStatus};
pub use id::{IdGen, SequentialIdGen, UuidIdGen};
pub use profile::Profile;
pub use query::{Connective, Filter, Modifier, Order, Predicate};
pub use section::{AdmitDenied, ClassSection, SeatKind, SectionSelector};
pub use value::{Record, RecordError, Value};
