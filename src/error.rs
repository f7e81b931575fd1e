//! Error surface returned to callers of the plan generator.
//!
//! Every error aborts the whole generation run. No partial plan is ever
//! returned alongside an error.

use thiserror::Error;

use crate::validation::ValidationError;

/// Coarse classification of a [`PlanError`], for transport-level mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed or empty input.
    Validation,
    /// A prerequisite code is absent from the supplied courses.
    MissingPrerequisite,
    /// The prerequisite graph contains a cycle.
    Cycle,
    /// Courses could not be placed within the available slots.
    PlacementExhausted,
}

/// A failed generation run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    #[error("invalid input: {}", summarize(.errors))]
    Validation { errors: Vec<ValidationError> },

    #[error("course '{course_code}' requires '{missing_prereq_code}', which is not in the requirement set")]
    MissingPrerequisite {
        course_code: String,
        missing_prereq_code: String,
    },

    #[error("cyclic prerequisites among: {}", .remaining_codes.join(", "))]
    CyclicPrerequisite { remaining_codes: Vec<String> },

    #[error("could not place {} course(s) within the available semesters: {}", .unplaced_codes.len(), .unplaced_codes.join(", "))]
    PlacementExhausted { unplaced_codes: Vec<String> },
}

pub type Result<T> = std::result::Result<T, PlanError>;

impl PlanError {
    /// Error classification.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PlanError::Validation { .. } => ErrorKind::Validation,
            PlanError::MissingPrerequisite { .. } => ErrorKind::MissingPrerequisite,
            PlanError::CyclicPrerequisite { .. } => ErrorKind::Cycle,
            PlanError::PlacementExhausted { .. } => ErrorKind::PlacementExhausted,
        }
    }

    /// Course codes the error is about.
    pub fn course_codes(&self) -> Vec<&str> {
        match self {
            PlanError::Validation { errors } => errors
                .iter()
                .filter_map(|e| e.course_code.as_deref())
                .collect(),
            PlanError::MissingPrerequisite {
                course_code,
                missing_prereq_code,
            } => vec![course_code.as_str(), missing_prereq_code.as_str()],
            PlanError::CyclicPrerequisite { remaining_codes } => {
                remaining_codes.iter().map(String::as_str).collect()
            }
            PlanError::PlacementExhausted { unplaced_codes } => {
                unplaced_codes.iter().map(String::as_str).collect()
            }
        }
    }
}

fn summarize(errors: &[ValidationError]) -> String {
    match errors {
        [] => "no details".to_string(),
        [only] => only.message.clone(),
        [first, rest @ ..] => format!("{} (and {} more)", first.message, rest.len()),
    }
}
