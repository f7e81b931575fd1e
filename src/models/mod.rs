//! Curriculum planning domain models.
//!
//! Provides the data types for representing a planning problem (courses,
//! the catalog snapshot, the requirement set) and its solution (a plan of
//! semester slots).
//!
//! # Domain Mappings
//!
//! | u-curriculum | Registry term | Student view |
//! |--------------|---------------|--------------|
//! | Course | Subject | Module |
//! | CourseCatalog | Subject master list | Handbook |
//! | SemesterSlot | Academic term | Semester |
//! | ProgrammePlan | Study plan | Timetable of study |

mod catalog;
mod course;
mod plan;

pub use catalog::{CourseCatalog, GraduationRequirementSet};
pub use course::{CategoryOverride, Course, CourseCategory, ProgrammeOverride, Semester};
pub use plan::{CourseRef, ProgrammePlan, SemesterSlot};
