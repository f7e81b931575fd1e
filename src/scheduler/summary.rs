//! Plan quality metrics.
//!
//! Computes load indicators from a completed plan.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Course count | Courses placed across all slots |
//! | Total credits | Sum of credit hours |
//! | Max / min load | Largest and smallest credit load over unlocked slots |
//! | Imbalance | Max load - min load |
//! | Locked slots | Slots held by the full-block course |

use crate::models::ProgrammePlan;

/// Plan load indicators.
///
/// Locked slots are left out of max/min load and imbalance, since the
/// full-block course dictates their load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanSummary {
    /// Number of placed courses.
    pub course_count: usize,
    /// Sum of credit hours.
    pub total_credit_hours: u32,
    /// Credit hours per slot, in slot order.
    pub credits_by_slot: Vec<u32>,
    /// Heaviest unlocked slot load.
    pub max_credit_load: u32,
    /// Lightest unlocked slot load.
    pub min_credit_load: u32,
    /// Number of locked slots.
    pub locked_slots: usize,
}

impl PlanSummary {
    /// Computes the summary of a plan.
    pub fn calculate(plan: &ProgrammePlan) -> Self {
        let credits_by_slot: Vec<u32> = plan.slots.iter().map(|s| s.credit_hours()).collect();

        let unlocked = plan
            .slots
            .iter()
            .zip(&credits_by_slot)
            .filter(|(slot, _)| !slot.locked)
            .map(|(_, &credits)| credits);
        let max_credit_load = unlocked.clone().max().unwrap_or(0);
        let min_credit_load = unlocked.min().unwrap_or(0);

        Self {
            course_count: plan.course_count(),
            total_credit_hours: credits_by_slot.iter().sum(),
            credits_by_slot,
            max_credit_load,
            min_credit_load,
            locked_slots: plan.slots.iter().filter(|s| s.locked).count(),
        }
    }

    /// Spread between the heaviest and lightest unlocked slot.
    pub fn credit_imbalance(&self) -> u32 {
        self.max_credit_load - self.min_credit_load
    }

    /// Slot indices whose load exceeds `limit` credit hours.
    pub fn slots_over_credit_load(&self, limit: u32) -> Vec<usize> {
        self.credits_by_slot
            .iter()
            .enumerate()
            .filter(|(_, &credits)| credits > limit)
            .map(|(index, _)| index)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CourseRef, SemesterSlot};

    fn course(code: &str, credits: u32) -> CourseRef {
        CourseRef {
            credit_hours: credits,
            ..CourseRef::code(code)
        }
    }

    #[test]
    fn test_summary_basic() {
        let plan = ProgrammePlan {
            programme_id: None,
            slots: vec![
                SemesterSlot::new(0)
                    .with_course(course("A", 3))
                    .with_course(course("B", 4)),
                SemesterSlot::new(1).with_course(course("C", 3)),
                SemesterSlot::new(2).with_course(course("LI", 12)).locked(),
            ],
        };

        let summary = PlanSummary::calculate(&plan);
        assert_eq!(summary.course_count, 4);
        assert_eq!(summary.total_credit_hours, 22);
        assert_eq!(summary.credits_by_slot, vec![7, 3, 12]);
        // LI's slot is locked and ignored
        assert_eq!(summary.max_credit_load, 7);
        assert_eq!(summary.min_credit_load, 3);
        assert_eq!(summary.credit_imbalance(), 4);
        assert_eq!(summary.locked_slots, 1);
        assert_eq!(summary.slots_over_credit_load(6), vec![0, 2]);
    }

    #[test]
    fn test_summary_empty_plan() {
        let summary = PlanSummary::calculate(&ProgrammePlan::empty(0));
        assert_eq!(summary.course_count, 0);
        assert_eq!(summary.credit_imbalance(), 0);
        assert!(summary.credits_by_slot.is_empty());
    }
}
