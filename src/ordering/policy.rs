//! Composable tie-break policy.
//!
//! Rules are applied in sequence: the next rule is consulted only when
//! every earlier rule ties. The sort is stable, so courses tied on every
//! rule keep their input order unless a final tie-breaker says otherwise.

use std::cmp::Ordering;
use std::sync::Arc;

use super::rules::{CategoryRank, StudyLevel};
use super::{CategoryPriority, CourseView, TieBreakRule};

/// How ties are broken after all rules are exhausted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TieBreaker {
    /// Keep input order (default).
    #[default]
    InputOrder,
    /// Deterministic by course code (lexicographic).
    ByCode,
}

/// Ordered list of tie-break rules.
///
/// # Example
/// ```
/// use u_curriculum::ordering::{rules, CategoryPriority, TieBreakPolicy};
///
/// let policy = TieBreakPolicy::new()
///     .with_rule(rules::CategoryRank::new(CategoryPriority::default()))
///     .with_rule(rules::StudyLevel);
/// assert_eq!(policy.rule_names(), vec!["CATEGORY", "LEVEL"]);
/// ```
#[derive(Clone, Default)]
pub struct TieBreakPolicy {
    rules: Vec<Arc<dyn TieBreakRule>>,
    tie_breaker: TieBreaker,
}

impl TieBreakPolicy {
    /// Creates an empty policy (input order only).
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard `(category rank, study level)` policy.
    pub fn standard(priority: CategoryPriority) -> Self {
        Self::new()
            .with_rule(CategoryRank::new(priority))
            .with_rule(StudyLevel)
    }

    /// Appends a rule.
    pub fn with_rule<R: TieBreakRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Sets the final tie-breaking strategy.
    pub fn with_final_tie_breaker(mut self, tie_breaker: TieBreaker) -> Self {
        self.tie_breaker = tie_breaker;
        self
    }

    /// Names of the configured rules, in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Returns indices into `courses`, first-to-schedule first.
    pub fn sort_indices(&self, courses: &[CourseView<'_>]) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..courses.len()).collect();
        indices.sort_by(|&a, &b| self.compare(&courses[a], &courses[b]));
        indices
    }

    fn compare(&self, a: &CourseView<'_>, b: &CourseView<'_>) -> Ordering {
        for rule in &self.rules {
            let ord = rule.evaluate(a).cmp(&rule.evaluate(b));
            if ord != Ordering::Equal {
                return ord;
            }
        }

        match self.tie_breaker {
            TieBreaker::InputOrder => Ordering::Equal,
            TieBreaker::ByCode => a.course.code.cmp(&b.course.code),
        }
    }
}

impl std::fmt::Debug for TieBreakPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TieBreakPolicy")
            .field("rules", &self.rule_names())
            .field("tie_breaker", &self.tie_breaker)
            .finish()
    }
}
