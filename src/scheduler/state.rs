//! Mutable slot state shared by the distributor, the special-case
//! handlers and the elective interleaver during one run.

use crate::graph::PrerequisiteGraph;
use crate::models::SemesterSlot;

#[derive(Debug, Clone, Default)]
pub(crate) struct WorkingSlot {
    pub courses: Vec<usize>,
    pub locked: bool,
}

/// Slot contents plus a reverse index from course node to slot.
#[derive(Debug, Clone)]
pub(crate) struct PlanState {
    slots: Vec<WorkingSlot>,
    assigned: Vec<Option<usize>>,
}

impl PlanState {
    pub fn new(semester_count: usize, node_count: usize) -> Self {
        Self {
            slots: vec![WorkingSlot::default(); semester_count],
            assigned: vec![None; node_count],
        }
    }

    /// Builds the starting state from a prior manual edit.
    ///
    /// Only a seed slot holding the full-block course is locked; the
    /// `locked` flag carried by the seed itself is ignored.
    pub fn seeded(
        semester_count: usize,
        seeds: &[SemesterSlot],
        graph: &PrerequisiteGraph,
        full_block: Option<usize>,
    ) -> Self {
        let mut state = Self::new(semester_count, graph.len());
        for seed in seeds {
            let slot = seed.semester_index;
            if slot >= semester_count {
                continue;
            }
            for course in &seed.courses {
                if let Some(node) = graph.index_of(&course.code) {
                    state.place(node, slot);
                    if Some(node) == full_block {
                        state.slots[slot].locked = true;
                    }
                }
            }
        }
        state
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn courses(&self, slot: usize) -> &[usize] {
        &self.slots[slot].courses
    }

    pub fn is_locked(&self, slot: usize) -> bool {
        self.slots[slot].locked
    }

    pub fn lock(&mut self, slot: usize) {
        self.slots[slot].locked = true;
    }

    pub fn slot_of(&self, node: usize) -> Option<usize> {
        self.assigned[node]
    }

    pub fn is_placed(&self, node: usize) -> bool {
        self.assigned[node].is_some()
    }

    pub fn place(&mut self, node: usize, slot: usize) {
        self.slots[slot].courses.push(node);
        self.assigned[node] = Some(slot);
    }

    /// Removes `node` from its slot, returning the slot it occupied.
    pub fn unplace(&mut self, node: usize) -> Option<usize> {
        let slot = self.assigned[node].take()?;
        self.slots[slot].courses.retain(|&c| c != node);
        Some(slot)
    }

    /// Whether every prerequisite of `node` sits in a slot strictly before `slot`.
    pub fn prerequisites_before(&self, graph: &PrerequisiteGraph, node: usize, slot: usize) -> bool {
        graph
            .prerequisites(node)
            .iter()
            .all(|&p| self.assigned[p].is_some_and(|s| s < slot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GlobalPrerequisites;
    use crate::models::{Course, CourseCategory, CourseRef};

    fn graph() -> PrerequisiteGraph {
        let courses = vec![
            Course::new("A", 3, CourseCategory::ProgrammeCore),
            Course::new("B", 3, CourseCategory::ProgrammeCore).with_prerequisite("A"),
            Course::new("LI", 12, CourseCategory::ProgrammeCore),
        ];
        PrerequisiteGraph::build(&courses, &GlobalPrerequisites).unwrap()
    }

    #[test]
    fn test_place_and_unplace() {
        let g = graph();
        let mut state = PlanState::new(3, g.len());
        state.place(0, 0);
        state.place(1, 0);
        assert_eq!(state.courses(0), &[0, 1]);
        assert_eq!(state.unplace(0), Some(0));
        assert_eq!(state.courses(0), &[1]);
        assert!(!state.is_placed(0));
        assert_eq!(state.unplace(0), None);
    }

    #[test]
    fn test_prerequisites_before_is_strict() {
        let g = graph();
        let mut state = PlanState::new(3, g.len());
        assert!(!state.prerequisites_before(&g, 1, 2));
        state.place(0, 1);
        assert!(!state.prerequisites_before(&g, 1, 1));
        assert!(state.prerequisites_before(&g, 1, 2));
        assert!(state.prerequisites_before(&g, 0, 0));
    }

    #[test]
    fn test_seeded_locks_full_block_slot() {
        let g = graph();
        let seeds = vec![
            SemesterSlot::new(0).with_course(CourseRef::code("A")),
            SemesterSlot::new(2).with_course(CourseRef::code("LI")),
        ];
        let state = PlanState::seeded(3, &seeds, &g, g.index_of("LI"));
        assert_eq!(state.slot_of(0), Some(0));
        assert_eq!(state.slot_of(2), Some(2));
        assert!(!state.is_locked(0));
        assert!(state.is_locked(2));
    }

    #[test]
    fn test_seed_lock_flag_ignored_without_full_block() {
        let g = graph();
        let seeds = vec![SemesterSlot::new(1).with_course(CourseRef::code("A")).locked()];
        let state = PlanState::seeded(3, &seeds, &g, g.index_of("LI"));
        assert_eq!(state.slot_of(0), Some(1));
        assert!(!state.is_locked(1));
    }
}
