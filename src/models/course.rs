//! Course model.
//!
//! A course is the unit being planned: it carries its credit load, its
//! category, the semesters in which it is offered, and its prerequisite
//! set (global, with optional per-programme replacements).

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Half of an academic year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Semester {
    /// First semester of the academic year.
    #[serde(rename = "semester1")]
    First,
    /// Second semester of the academic year.
    #[serde(rename = "semester2")]
    Second,
}

impl Semester {
    /// Semester parity of a 0-based slot index (even → first, odd → second).
    #[inline]
    pub fn for_slot(index: usize) -> Self {
        if index % 2 == 0 {
            Semester::First
        } else {
            Semester::Second
        }
    }
}

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Semester::First => write!(f, "Semester1"),
            Semester::Second => write!(f, "Semester2"),
        }
    }
}

/// Course classification within a programme's requirements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourseCategory {
    /// Core course shared across the faculty.
    FacultyCore,
    /// Core course specific to the programme.
    ProgrammeCore,
    /// Elective drawn from the programme's own list.
    ProgrammeElective,
    /// University-wide compulsory course.
    University,
    /// Shared-elective (SHE) cluster course.
    SheCluster,
    /// Free elective with no scheduling constraints.
    Elective,
}

impl CourseCategory {
    /// All categories, in declaration order.
    pub const ALL: [CourseCategory; 6] = [
        CourseCategory::FacultyCore,
        CourseCategory::ProgrammeCore,
        CourseCategory::ProgrammeElective,
        CourseCategory::University,
        CourseCategory::SheCluster,
        CourseCategory::Elective,
    ];
}

/// Programme-specific replacement of a course's prerequisite set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgrammeOverride {
    /// Programme the override applies to.
    pub programme_id: String,
    /// Prerequisite codes used instead of the global set.
    pub prerequisite_codes: Vec<String>,
}

/// Programme-specific replacement of a course's category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryOverride {
    /// Programme the override applies to.
    pub programme_id: String,
    /// Category used instead of the global one.
    pub category: CourseCategory,
}

/// A course record, immutable for the duration of a generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Unique course code.
    pub code: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Credit hours (positive).
    pub credit_hours: u32,
    /// Global category.
    pub category: CourseCategory,
    /// Study-level ordinal (1 = first-year material).
    #[serde(default)]
    pub study_level: u8,
    /// Semesters in which the course runs.
    pub offered_semesters: BTreeSet<Semester>,
    /// Globally declared prerequisite codes.
    #[serde(default)]
    pub prerequisites: Vec<String>,
    /// Per-programme prerequisite replacements.
    #[serde(default)]
    pub programme_overrides: Vec<ProgrammeOverride>,
    /// Per-programme category replacements.
    #[serde(default)]
    pub category_overrides: Vec<CategoryOverride>,
}

impl Course {
    /// Creates a course offered in both semesters with no prerequisites.
    pub fn new(code: impl Into<String>, credit_hours: u32, category: CourseCategory) -> Self {
        Self {
            code: code.into(),
            name: String::new(),
            credit_hours,
            category,
            study_level: 1,
            offered_semesters: [Semester::First, Semester::Second].into_iter().collect(),
            prerequisites: Vec::new(),
            programme_overrides: Vec::new(),
            category_overrides: Vec::new(),
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the study level.
    pub fn with_study_level(mut self, level: u8) -> Self {
        self.study_level = level;
        self
    }

    /// Restricts the offering window to the given semesters.
    pub fn offered_in(mut self, semesters: &[Semester]) -> Self {
        self.offered_semesters = semesters.iter().copied().collect();
        self
    }

    /// Adds a global prerequisite.
    pub fn with_prerequisite(mut self, code: impl Into<String>) -> Self {
        self.prerequisites.push(code.into());
        self
    }

    /// Adds a programme-specific prerequisite override.
    pub fn with_programme_override(
        mut self,
        programme_id: impl Into<String>,
        prerequisite_codes: Vec<String>,
    ) -> Self {
        self.programme_overrides.push(ProgrammeOverride {
            programme_id: programme_id.into(),
            prerequisite_codes,
        });
        self
    }

    /// Adds a programme-specific category override.
    pub fn with_category_override(
        mut self,
        programme_id: impl Into<String>,
        category: CourseCategory,
    ) -> Self {
        self.category_overrides.push(CategoryOverride {
            programme_id: programme_id.into(),
            category,
        });
        self
    }

    /// Whether the course runs in the given semester.
    #[inline]
    pub fn is_offered_in(&self, semester: Semester) -> bool {
        self.offered_semesters.contains(&semester)
    }

    /// Prerequisite override for a programme, if one exists.
    pub fn override_for(&self, programme_id: &str) -> Option<&ProgrammeOverride> {
        self.programme_overrides
            .iter()
            .find(|o| o.programme_id == programme_id)
    }

    /// Category override for a programme, if one exists.
    pub fn category_for(&self, programme_id: &str) -> Option<CourseCategory> {
        self.category_overrides
            .iter()
            .find(|o| o.programme_id == programme_id)
            .map(|o| o.category)
    }
}
