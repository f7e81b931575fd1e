//! Plan (solution) model.
//!
//! A programme plan is an ordered array of semester slots, each holding
//! the courses assigned to that semester. It is the only artifact handed
//! to the persistence collaborator.

use serde::{Deserialize, Serialize};

use super::{Course, CourseCategory, Semester};

/// Minimal identifying projection of a course, as shown to the UI layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRef {
    /// Course code.
    pub code: String,
    /// Display name (denormalized).
    #[serde(default)]
    pub name: String,
    /// Credit hours (denormalized).
    #[serde(default)]
    pub credit_hours: u32,
    /// Effective category for the planned programme (denormalized).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CourseCategory>,
}

impl CourseRef {
    /// A bare reference carrying only the code (e.g. from a manual edit).
    pub fn code(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: String::new(),
            credit_hours: 0,
            category: None,
        }
    }

    /// Projects a course with its effective category.
    pub fn from_course(course: &Course, category: CourseCategory) -> Self {
        Self {
            code: course.code.clone(),
            name: course.name.clone(),
            credit_hours: course.credit_hours,
            category: Some(category),
        }
    }
}

impl From<&Course> for CourseRef {
    fn from(course: &Course) -> Self {
        Self::from_course(course, course.category)
    }
}

/// One semester of a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemesterSlot {
    /// 0-based slot index; parity selects the semester.
    pub semester_index: usize,
    /// Courses assigned to this semester, in placement order.
    #[serde(default)]
    pub courses: Vec<CourseRef>,
    /// Set once the full-block course occupies the slot.
    #[serde(default)]
    pub locked: bool,
}

impl SemesterSlot {
    /// Creates an empty, unlocked slot.
    pub fn new(semester_index: usize) -> Self {
        Self {
            semester_index,
            courses: Vec::new(),
            locked: false,
        }
    }

    /// Adds a course reference.
    pub fn with_course(mut self, course: CourseRef) -> Self {
        self.courses.push(course);
        self
    }

    /// Marks the slot as locked.
    pub fn locked(mut self) -> Self {
        self.locked = true;
        self
    }

    /// Semester parity of this slot.
    #[inline]
    pub fn semester(&self) -> Semester {
        Semester::for_slot(self.semester_index)
    }

    /// Whether the slot holds the given course.
    pub fn contains(&self, code: &str) -> bool {
        self.courses.iter().any(|c| c.code == code)
    }

    /// Sum of credit hours in this slot.
    pub fn credit_hours(&self) -> u32 {
        self.courses.iter().map(|c| c.credit_hours).sum()
    }

    /// Number of courses in this slot.
    pub fn course_count(&self) -> usize {
        self.courses.len()
    }
}

/// A complete multi-semester plan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgrammePlan {
    /// Programme the plan was generated for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub programme_id: Option<String>,
    /// Exactly `semester_count` slots, in index order.
    pub slots: Vec<SemesterSlot>,
}

impl ProgrammePlan {
    /// Creates a plan of `semester_count` empty slots.
    pub fn empty(semester_count: usize) -> Self {
        Self {
            programme_id: None,
            slots: (0..semester_count).map(SemesterSlot::new).collect(),
        }
    }

    /// Sets the programme identifier.
    pub fn with_programme(mut self, programme_id: impl Into<String>) -> Self {
        self.programme_id = Some(programme_id.into());
        self
    }

    /// Number of slots.
    pub fn semester_count(&self) -> usize {
        self.slots.len()
    }

    /// Slot at `index`.
    pub fn slot(&self, index: usize) -> Option<&SemesterSlot> {
        self.slots.get(index)
    }

    /// Index of the slot holding `code`.
    pub fn slot_index_of(&self, code: &str) -> Option<usize> {
        self.slots
            .iter()
            .position(|s| s.contains(code))
    }

    /// Whether any slot holds `code`.
    pub fn contains(&self, code: &str) -> bool {
        self.slot_index_of(code).is_some()
    }

    /// Total number of placed courses.
    pub fn course_count(&self) -> usize {
        self.slots.iter().map(|s| s.course_count()).sum()
    }

    /// Total credit hours across all slots.
    pub fn total_credit_hours(&self) -> u32 {
        self.slots.iter().map(|s| s.credit_hours()).sum()
    }

    /// Iterates over every course reference, slot by slot.
    pub fn courses(&self) -> impl Iterator<Item = (usize, &CourseRef)> {
        self.slots
            .iter()
            .flat_map(|s| s.courses.iter().map(move |c| (s.semester_index, c)))
    }
}
