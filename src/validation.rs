//! Input validation for plan generation.
//!
//! Checks structural integrity of a plan request before any graph is
//! built. Detects:
//! - Empty requirement sets and non-positive semester counts
//! - Duplicate course codes
//! - Seed slots that overflow the plan, repeat an index, or reference
//!   unknown courses
//! - Capstone pairs with only one part required
//! - Special-case courses routed to the elective interleaver
//! - Distributed courses that depend on interleaved electives
//!
//! Missing prerequisites and cycles are not checked here; the graph
//! builder and the orderer report those with their own error kinds.

use std::collections::{HashMap, HashSet};

use crate::config::PlannerConfig;
use crate::scheduler::PlanRequest;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Offending course, when the error concerns one.
    pub course_code: Option<String>,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The requirement set has no courses.
    EmptyRequirements,
    /// `semester_count` is below one.
    InvalidSemesterCount,
    /// Two courses share the same code.
    DuplicateCode,
    /// A code is referenced that is not part of the input.
    UnknownCourse,
    /// More seed slots than the plan has semesters.
    TooManySeedSlots,
    /// A seed slot index is out of range or given twice.
    InvalidSeedSlot,
    /// A course appears in more than one seed slot.
    DuplicatePlacement,
    /// Only one part of the capstone pair is required.
    IncompleteCapstone,
    /// A full-block or capstone course belongs to an interleaved category.
    InterleavedSpecialCourse,
    /// A distributed course lists an interleaved elective as prerequisite.
    ElectivePrerequisite,
    /// The assembled plan breaks a plan invariant.
    PlanInvariant,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            course_code: None,
            message: message.into(),
        }
    }

    pub(crate) fn for_course(
        kind: ValidationErrorKind,
        course_code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            course_code: Some(course_code.into()),
            message: message.into(),
        }
    }
}

/// Validates a plan request against the planner configuration.
///
/// Checks:
/// 1. At least one semester and one course
/// 2. No duplicate course codes
/// 3. Seed slots fit in the plan, have distinct indices, and only hold
///    known courses, each once
/// 4. Capstone parts are required together
/// 5. Special-case courses are not interleaved electives
/// 6. Distributed courses do not depend on interleaved electives
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_request(request: &PlanRequest, config: &PlannerConfig) -> ValidationResult {
    let mut errors = Vec::new();

    if request.semester_count < 1 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidSemesterCount,
            format!("semester_count must be at least 1, got {}", request.semester_count),
        ));
    }

    if request.courses.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyRequirements,
            "Requirement set contains no courses",
        ));
    }

    // Collect course codes
    let mut codes: HashSet<&str> = HashSet::new();
    for course in &request.courses {
        if !codes.insert(course.code.as_str()) {
            errors.push(ValidationError::for_course(
                ValidationErrorKind::DuplicateCode,
                &course.code,
                format!("Duplicate course code: {}", course.code),
            ));
        }
    }

    // Check seed slots
    if request.existing_slots.len() > request.semester_count {
        errors.push(ValidationError::new(
            ValidationErrorKind::TooManySeedSlots,
            format!(
                "{} seed slots supplied for a {}-semester plan",
                request.existing_slots.len(),
                request.semester_count
            ),
        ));
    }

    let mut seed_indices: HashSet<usize> = HashSet::new();
    let mut seeded: HashSet<&str> = HashSet::new();
    for slot in &request.existing_slots {
        if slot.semester_index >= request.semester_count {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidSeedSlot,
                format!(
                    "Seed slot index {} is outside a {}-semester plan",
                    slot.semester_index, request.semester_count
                ),
            ));
        } else if !seed_indices.insert(slot.semester_index) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidSeedSlot,
                format!("Seed slot index {} given more than once", slot.semester_index),
            ));
        }
        for course in &slot.courses {
            if !codes.contains(course.code.as_str()) {
                errors.push(ValidationError::for_course(
                    ValidationErrorKind::UnknownCourse,
                    &course.code,
                    format!(
                        "Seed slot {} holds '{}', which is not in the requirement set",
                        slot.semester_index, course.code
                    ),
                ));
            } else if !seeded.insert(course.code.as_str()) {
                errors.push(ValidationError::for_course(
                    ValidationErrorKind::DuplicatePlacement,
                    &course.code,
                    format!("Course '{}' appears in more than one seed slot", course.code),
                ));
            }
        }
    }

    // Check special-case courses
    let source = request.prerequisite_source();
    let categories: HashMap<&str, _> = request
        .courses
        .iter()
        .map(|c| (c.code.as_str(), source.category(c)))
        .collect();
    let is_interleaved = |code: &str| {
        categories
            .get(code)
            .is_some_and(|cat| config.interleaved_categories.contains(cat))
    };

    if let Some(capstone) = &config.capstone {
        let has_one = codes.contains(capstone.part_one.as_str());
        let has_two = codes.contains(capstone.part_two.as_str());
        if has_one != has_two {
            let (present, absent) = if has_one {
                (&capstone.part_one, &capstone.part_two)
            } else {
                (&capstone.part_two, &capstone.part_one)
            };
            errors.push(ValidationError::for_course(
                ValidationErrorKind::IncompleteCapstone,
                present,
                format!("Capstone part '{present}' is required but its partner '{absent}' is not"),
            ));
        }
    }

    for special in config.special_codes() {
        if is_interleaved(special) {
            errors.push(ValidationError::for_course(
                ValidationErrorKind::InterleavedSpecialCourse,
                special,
                format!("Special-case course '{special}' belongs to an interleaved category"),
            ));
        }
    }

    // Check prerequisite routing
    for course in &request.courses {
        if is_interleaved(course.code.as_str()) {
            continue;
        }
        for prereq in source.prerequisites(course) {
            if is_interleaved(prereq.as_str()) {
                errors.push(ValidationError::for_course(
                    ValidationErrorKind::ElectivePrerequisite,
                    &course.code,
                    format!(
                        "Course '{}' requires interleaved elective '{}'",
                        course.code, prereq
                    ),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
