// SPDX-License-Identifier: MIT

//! Storage field names.
//!
//! These are the stable column names shared with any existing data. Only
//! these trusted identifiers ever appear structurally in a query; values
//! are always bound as data.

pub const ID: &str = "id";

// class
pub const INSTRUCTOR_ID: &str = "instructor_id";
pub const DEPARTMENT: &str = "department";
pub const COURSE_CODE: &str = "course_code";
pub const SECTION_NUMBER: &str = "section_number";
pub const CLASS_NAME: &str = "class_name";
pub const CURRENT_ENROLLMENT: &str = "current_enrollment";
pub const MAX_ENROLLMENT: &str = "max_enrollment";
pub const AUTOMATIC_ENROLLMENT_FROZEN: &str = "automatic_enrollment_frozen";

// enrollment
pub const STUDENT_ID: &str = "student_id";
pub const CLASS_ID: &str = "class_id";
pub const ENROLLED_ON: &str = "enrolled_on";
pub const DROPPED: &str = "dropped";
pub const WAITING_LIST: &str = "waiting_list";

// student / instructor
pub const FIRST_NAME: &str = "first_name";
pub const LAST_NAME: &str = "last_name";
pub const AGE: &str = "age";

// table names
pub const TABLE_CLASS: &str = "class";
pub const TABLE_ENROLLMENT: &str = "enrollment";
pub const TABLE_STUDENT: &str = "student";
pub const TABLE_INSTRUCTOR: &str = "instructor";
