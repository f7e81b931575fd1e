//! Built-in tie-break rules.
//!
//! # Score Convention
//! All rules return lower scores for courses that should come first.

use serde::{Deserialize, Serialize};

use super::{CourseView, RuleScore, TieBreakRule};
use crate::models::CourseCategory;

/// Canonical category priority table.
///
/// Listed categories rank by position; every unlisted category shares
/// the rank after the last listed one ("others").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryPriority(Vec<CourseCategory>);

impl CategoryPriority {
    /// Creates a table from categories in priority order.
    pub fn new(categories: Vec<CourseCategory>) -> Self {
        Self(categories)
    }

    /// Rank of `category` (0 = scheduled first).
    pub fn rank(&self, category: CourseCategory) -> usize {
        self.0
            .iter()
            .position(|&c| c == category)
            .unwrap_or(self.0.len())
    }

    /// Listed categories, highest priority first.
    pub fn categories(&self) -> &[CourseCategory] {
        &self.0
    }
}

impl Default for CategoryPriority {
    /// faculty-core < programme-core < programme-elective < others.
    fn default() -> Self {
        Self(vec![
            CourseCategory::FacultyCore,
            CourseCategory::ProgrammeCore,
            CourseCategory::ProgrammeElective,
        ])
    }
}

/// Orders by the effective category's rank in a [`CategoryPriority`] table.
#[derive(Debug, Clone, Default)]
pub struct CategoryRank {
    table: CategoryPriority,
}

impl CategoryRank {
    /// Creates the rule from a priority table.
    pub fn new(table: CategoryPriority) -> Self {
        Self { table }
    }
}

impl TieBreakRule for CategoryRank {
    fn name(&self) -> &'static str {
        "CATEGORY"
    }

    fn evaluate(&self, course: &CourseView<'_>) -> RuleScore {
        self.table.rank(course.category) as RuleScore
    }

    fn description(&self) -> &'static str {
        "Category priority table"
    }
}

/// Lower study levels first.
#[derive(Debug, Clone, Copy)]
pub struct StudyLevel;

impl TieBreakRule for StudyLevel {
    fn name(&self) -> &'static str {
        "LEVEL"
    }

    fn evaluate(&self, course: &CourseView<'_>) -> RuleScore {
        course.course.study_level as RuleScore
    }

    fn description(&self) -> &'static str {
        "Lowest study level first"
    }
}

/// Heavier courses first.
#[derive(Debug, Clone, Copy)]
pub struct HeaviestFirst;

impl TieBreakRule for HeaviestFirst {
    fn name(&self) -> &'static str {
        "HEAVY"
    }

    fn evaluate(&self, course: &CourseView<'_>) -> RuleScore {
        -(course.course.credit_hours as RuleScore)
    }

    fn description(&self) -> &'static str {
        "Most credit hours first"
    }
}
