//! Prerequisite graph construction.
//!
//! Resolves each course's effective prerequisite set and builds the
//! dependency graph (prerequisite → dependents) with in-degree counts.
//! Nodes are stored in an arena indexed by the course's position in the
//! input slice, so every later stage refers to courses by stable index.
//!
//! Resolution is a strategy: [`GlobalPrerequisites`] always uses the
//! catalog-wide set, [`ProgrammePrerequisites`] prefers a matching
//! programme override and falls back to the global set.

use std::collections::HashMap;
use std::fmt::Debug;

use crate::error::{PlanError, Result};
use crate::models::{Course, CourseCategory};

/// Strategy for resolving a course's effective prerequisites and category.
pub trait PrerequisiteSource: Debug + Send + Sync {
    /// Effective prerequisite codes of `course`.
    fn prerequisites<'a>(&self, course: &'a Course) -> &'a [String];

    /// Effective category of `course`.
    fn category(&self, course: &Course) -> CourseCategory;
}

/// Uses every course's globally declared prerequisites and category.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalPrerequisites;

impl PrerequisiteSource for GlobalPrerequisites {
    fn prerequisites<'a>(&self, course: &'a Course) -> &'a [String] {
        &course.prerequisites
    }

    fn category(&self, course: &Course) -> CourseCategory {
        course.category
    }
}

/// Applies programme-specific overrides when present.
#[derive(Debug, Clone)]
pub struct ProgrammePrerequisites {
    programme_id: String,
}

impl ProgrammePrerequisites {
    /// Creates a resolver for the given programme.
    pub fn new(programme_id: impl Into<String>) -> Self {
        Self {
            programme_id: programme_id.into(),
        }
    }
}

impl PrerequisiteSource for ProgrammePrerequisites {
    fn prerequisites<'a>(&self, course: &'a Course) -> &'a [String] {
        match course.override_for(&self.programme_id) {
            Some(o) => &o.prerequisite_codes,
            None => &course.prerequisites,
        }
    }

    fn category(&self, course: &Course) -> CourseCategory {
        course
            .category_for(&self.programme_id)
            .unwrap_or(course.category)
    }
}

/// Dependency graph over a course slice.
#[derive(Debug, Clone)]
pub struct PrerequisiteGraph {
    codes: Vec<String>,
    index: HashMap<String, usize>,
    categories: Vec<CourseCategory>,
    prerequisites: Vec<Vec<usize>>,
    dependents: Vec<Vec<usize>>,
    in_degree: Vec<usize>,
}

impl PrerequisiteGraph {
    /// Builds the graph for `courses` using `source` for resolution.
    ///
    /// Duplicate prerequisite entries on one course count once.
    ///
    /// # Errors
    /// `MissingPrerequisite` if a resolved prerequisite code is not among
    /// `courses`.
    pub fn build(courses: &[Course], source: &dyn PrerequisiteSource) -> Result<Self> {
        let index: HashMap<String, usize> = courses
            .iter()
            .enumerate()
            .map(|(i, c)| (c.code.clone(), i))
            .collect();

        let n = courses.len();
        let mut prerequisites: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut in_degree = vec![0usize; n];

        for (i, course) in courses.iter().enumerate() {
            for code in source.prerequisites(course) {
                let Some(&p) = index.get(code.as_str()) else {
                    return Err(PlanError::MissingPrerequisite {
                        course_code: course.code.clone(),
                        missing_prereq_code: code.clone(),
                    });
                };
                if prerequisites[i].contains(&p) {
                    continue;
                }
                prerequisites[i].push(p);
                dependents[p].push(i);
                in_degree[i] += 1;
            }
        }

        Ok(Self {
            codes: courses.iter().map(|c| c.code.clone()).collect(),
            index,
            categories: courses.iter().map(|c| source.category(c)).collect(),
            prerequisites,
            dependents,
            in_degree,
        })
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Node index of a course code.
    pub fn index_of(&self, code: &str) -> Option<usize> {
        self.index.get(code).copied()
    }

    /// Course code of a node.
    pub fn code(&self, node: usize) -> &str {
        &self.codes[node]
    }

    /// Effective category of a node.
    pub fn category(&self, node: usize) -> CourseCategory {
        self.categories[node]
    }

    /// Resolved prerequisite nodes of `node`.
    pub fn prerequisites(&self, node: usize) -> &[usize] {
        &self.prerequisites[node]
    }

    /// Nodes that list `node` as a prerequisite.
    pub fn dependents(&self, node: usize) -> &[usize] {
        &self.dependents[node]
    }

    /// In-degree (resolved prerequisite count) of every node.
    pub fn in_degrees(&self) -> &[usize] {
        &self.in_degree
    }

    /// Dependent codes of the course `code`.
    pub fn dependents_of(&self, code: &str) -> Vec<&str> {
        self.index_of(code)
            .map(|i| self.dependents[i].iter().map(|&d| self.code(d)).collect())
            .unwrap_or_default()
    }

    /// In-degree of the course `code`.
    pub fn in_degree_of(&self, code: &str) -> Option<usize> {
        self.index_of(code).map(|i| self.in_degree[i])
    }
}
