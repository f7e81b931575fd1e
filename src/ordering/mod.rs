//! Deterministic topological ordering of courses.
//!
//! Kahn's algorithm with a declared tie-break: courses are pre-sorted
//! once by a [`TieBreakPolicy`] (by default `(category rank, study level)`),
//! the ready queue is seeded with in-degree-0 courses in that order, and
//! courses that become ready are appended FIFO. Courses released by the
//! same predecessor enter the queue in pre-sort order.
//!
//! # Reference
//! Kahn (1962), "Topological sorting of large networks"

mod policy;
pub mod rules;

pub use policy::{TieBreakPolicy, TieBreaker};
pub use rules::CategoryPriority;

use std::collections::VecDeque;
use std::fmt::Debug;

use crate::error::{PlanError, Result};
use crate::graph::PrerequisiteGraph;
use crate::models::{Course, CourseCategory};

/// Score returned by a tie-break rule. Lower = earlier.
pub type RuleScore = i64;

/// A course paired with its effective category for the active programme.
#[derive(Debug, Clone, Copy)]
pub struct CourseView<'a> {
    pub course: &'a Course,
    pub category: CourseCategory,
}

impl<'a> CourseView<'a> {
    pub fn new(course: &'a Course, category: CourseCategory) -> Self {
        Self { course, category }
    }
}

impl<'a> From<&'a Course> for CourseView<'a> {
    fn from(course: &'a Course) -> Self {
        Self::new(course, course.category)
    }
}

/// A rule that ranks courses for the pre-sort.
///
/// # Score Convention
/// **Lower score = earlier in the order.**
pub trait TieBreakRule: Send + Sync + Debug {
    /// Rule name (e.g., "CATEGORY").
    fn name(&self) -> &'static str;

    /// Scores a course; lower scores come first.
    fn evaluate(&self, course: &CourseView<'_>) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}

/// Produces one deterministic total order over a prerequisite graph.
#[derive(Debug, Clone)]
pub struct TopologicalOrderer {
    policy: TieBreakPolicy,
}

impl TopologicalOrderer {
    /// Creates an orderer with the given policy.
    pub fn new(policy: TieBreakPolicy) -> Self {
        Self { policy }
    }

    /// Orders `courses` (the slice `graph` was built from).
    ///
    /// Returns node indices such that every prerequisite precedes its
    /// dependents.
    ///
    /// # Errors
    /// `CyclicPrerequisite` carrying every code that never reached
    /// in-degree zero, in pre-sort order.
    pub fn order(&self, courses: &[Course], graph: &PrerequisiteGraph) -> Result<Vec<usize>> {
        let views: Vec<CourseView<'_>> = courses
            .iter()
            .enumerate()
            .map(|(i, c)| CourseView::new(c, graph.category(i)))
            .collect();
        let presorted = self.policy.sort_indices(&views);

        let mut rank = vec![0usize; presorted.len()];
        for (pos, &node) in presorted.iter().enumerate() {
            rank[node] = pos;
        }

        let mut in_degree = graph.in_degrees().to_vec();
        let mut queue: VecDeque<usize> = presorted
            .iter()
            .copied()
            .filter(|&node| in_degree[node] == 0)
            .collect();
        let mut order = Vec::with_capacity(presorted.len());

        while let Some(node) = queue.pop_front() {
            order.push(node);

            let mut ready = Vec::new();
            for &dependent in graph.dependents(node) {
                in_degree[dependent] -= 1;
                if in_degree[dependent] == 0 {
                    ready.push(dependent);
                }
            }
            ready.sort_by_key(|&d| rank[d]);
            queue.extend(ready);
        }

        if order.len() < presorted.len() {
            let remaining_codes: Vec<String> = presorted
                .iter()
                .filter(|&&node| in_degree[node] > 0)
                .map(|&node| graph.code(node).to_string())
                .collect();
            tracing::debug!(remaining = remaining_codes.len(), "prerequisite cycle detected");
            return Err(PlanError::CyclicPrerequisite { remaining_codes });
        }

        Ok(order)
    }
}

impl Default for TopologicalOrderer {
    fn default() -> Self {
        Self::new(TieBreakPolicy::standard(CategoryPriority::default()))
    }
}
