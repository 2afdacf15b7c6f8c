// SPDX-License-Identifier: MIT

//! Capacity bounds for enrollment.
//!
//! The two bounds are deliberately asymmetric: the overflow bound caps the
//! waiting list of a single section, while the student cap counts live
//! waitlisted registrations across every section.

/// Maximum registrations a section tolerates beyond its capacity.
///
/// A section with `current_enrollment - max_enrollment >= 15` rejects
/// further enrollment outright.
pub const WAITLIST_OVERFLOW_BOUND: i64 = 15;

/// Maximum live waitlisted registrations one student may hold, across all
/// sections. Checked before the seat decision, so a student at the cap
/// cannot enroll anywhere until one resolves.
pub const MAX_STUDENT_WAITLISTS: i64 = 3;
