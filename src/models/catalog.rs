//! Read-only catalog snapshot for one generation run.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::Course;
use crate::error::{PlanError, Result};
use crate::validation::{ValidationError, ValidationErrorKind};

/// The flat list of course codes a student must complete.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GraduationRequirementSet {
    codes: Vec<String>,
}

impl GraduationRequirementSet {
    /// Creates a requirement set from course codes.
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            codes: codes.into_iter().map(Into::into).collect(),
        }
    }

    /// Required course codes, in declaration order.
    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    /// Number of required courses.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

/// In-memory snapshot of course records, keyed by code.
///
/// Built once from the catalog collaborator before planning starts;
/// nothing is fetched lazily afterwards.
#[derive(Debug, Clone, Default)]
pub struct CourseCatalog {
    courses: Vec<Course>,
    index: HashMap<String, usize>,
}

impl CourseCatalog {
    /// Builds a catalog, rejecting duplicate course codes.
    pub fn new(courses: Vec<Course>) -> Result<Self> {
        let mut index = HashMap::with_capacity(courses.len());
        let mut errors = Vec::new();

        for (i, course) in courses.iter().enumerate() {
            if index.insert(course.code.clone(), i).is_some() {
                errors.push(ValidationError::for_course(
                    ValidationErrorKind::DuplicateCode,
                    &course.code,
                    format!("Duplicate course code in catalog: {}", course.code),
                ));
            }
        }

        if !errors.is_empty() {
            return Err(PlanError::Validation { errors });
        }
        Ok(Self { courses, index })
    }

    /// Looks up a course by code.
    pub fn get(&self, code: &str) -> Option<&Course> {
        self.index.get(code).map(|&i| &self.courses[i])
    }

    /// Number of courses in the catalog.
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Resolves a requirement set into course records, in requirement order.
    ///
    /// Unknown codes are reported together as a validation error.
    pub fn select(&self, requirements: &GraduationRequirementSet) -> Result<Vec<Course>> {
        let mut selected = Vec::with_capacity(requirements.len());
        let mut errors = Vec::new();

        for code in requirements.codes() {
            match self.get(code) {
                Some(course) => selected.push(course.clone()),
                None => errors.push(ValidationError::for_course(
                    ValidationErrorKind::UnknownCourse,
                    code,
                    format!("Required course '{code}' is not in the catalog"),
                )),
            }
        }

        if errors.is_empty() {
            Ok(selected)
        } else {
            Err(PlanError::Validation { errors })
        }
    }
}
