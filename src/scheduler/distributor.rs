//! Semester distributor.
//!
//! # Algorithm
//!
//! For each slot `i` in increasing order (locked slots are skipped):
//! 1. `target = ceil(unplaced / (N - i))`.
//! 2. Walk the work-queue from its front. A candidate is placed when every
//!    resolved prerequisite already sits in a slot before `i` and the
//!    slot's semester parity is in its offering window; otherwise it is
//!    skipped and stays queued for later slots. The full-block course and
//!    capstone Part 1 are routed through their handlers first.
//! 3. The pass ends when `target` placements were made, the full-block
//!    course locked the slot, or the queue was walked to its end.
//!
//! One greedy pass per slot, no backtracking. Courses still queued after
//! the last slot are reported as [`PlanError::PlacementExhausted`].

use super::special::{Capstone, FullBlock, SlotPass};
use super::state::PlanState;
use super::work_queue::WorkQueue;
use crate::error::{PlanError, Result};
use crate::graph::PrerequisiteGraph;
use crate::models::{Course, Semester};

/// Greedy slot-by-slot placement of the ordered work-queue.
#[derive(Debug)]
pub(crate) struct SemesterDistributor<'a> {
    courses: &'a [Course],
    graph: &'a PrerequisiteGraph,
    full_block: Option<FullBlock>,
    capstone: Option<Capstone>,
    stall_limit: usize,
}

impl<'a> SemesterDistributor<'a> {
    pub fn new(courses: &'a [Course], graph: &'a PrerequisiteGraph, stall_limit: usize) -> Self {
        Self {
            courses,
            graph,
            full_block: None,
            capstone: None,
            stall_limit: stall_limit.max(1),
        }
    }

    pub fn with_full_block(mut self, full_block: Option<FullBlock>) -> Self {
        self.full_block = full_block;
        self
    }

    pub fn with_capstone(mut self, capstone: Option<Capstone>) -> Self {
        self.capstone = capstone;
        self
    }

    /// Drains `queue` into `state`.
    ///
    /// # Errors
    /// `PlacementExhausted` if courses remain after the last slot, or after
    /// `stall_limit` consecutive slots in which nothing could be placed.
    pub fn distribute(&mut self, queue: &mut WorkQueue, state: &mut PlanState) -> Result<()> {
        if let Some(capstone) = self.capstone.as_mut() {
            capstone.settle_seeded(self.courses, self.graph, state);
        }

        let semester_count = state.slot_count();
        // Seeds in later slots can still unblock queued dependents.
        let last_seeded = (0..semester_count)
            .rev()
            .find(|&slot| !state.courses(slot).is_empty());
        let mut idle = 0usize;

        for slot in 0..semester_count {
            if self.unplaced(queue) == 0 {
                break;
            }
            if state.is_locked(slot) {
                continue;
            }

            let pass = self.fill_slot(slot, queue, state);
            tracing::debug!(
                slot,
                placed = pass.placed.len(),
                remaining = queue.len(),
                "slot filled"
            );

            if !pass.placed.is_empty() {
                idle = 0;
                continue;
            }

            // Only a slot that started empty, with an unlocked successor and
            // no seed ahead of it, leaves the planner in a state the next
            // slot cannot improve on.
            let next_locked = slot + 1 < semester_count && state.is_locked(slot + 1);
            let seed_ahead = last_seeded.is_some_and(|s| s > slot);
            if pass.pinned > 0 || next_locked || seed_ahead {
                idle = 0;
            } else {
                idle += 1;
            }
            if idle >= self.stall_limit {
                tracing::warn!(slot, idle, "no placement progress, giving up");
                break;
            }
        }

        if self.unplaced(queue) > 0 {
            let unplaced_codes = self.unplaced_codes(queue);
            tracing::warn!(unplaced = unplaced_codes.len(), "placement exhausted");
            return Err(PlanError::PlacementExhausted { unplaced_codes });
        }
        Ok(())
    }

    fn fill_slot(&mut self, slot: usize, queue: &mut WorkQueue, state: &mut PlanState) -> SlotPass {
        let remaining_semesters = state.slot_count() - slot;
        let target = self.unplaced(queue).div_ceil(remaining_semesters);
        let semester = Semester::for_slot(slot);
        let mut pass = SlotPass::start(slot, state);

        let mut cursor = queue.front();
        while let Some(node) = cursor {
            if pass.placed.len() >= target {
                break;
            }
            cursor = queue.next(node);

            if !state.prerequisites_before(self.graph, node, slot) {
                continue;
            }
            if !self.courses[node].is_offered_in(semester) {
                continue;
            }

            if let Some(block) = self.full_block.filter(|b| b.node() == node) {
                if block.try_place(state, queue, &mut pass, self.capstone.as_mut()) {
                    break;
                }
                continue;
            }

            if let Some(capstone) = self.capstone.as_mut() {
                if capstone.part_one() == node {
                    if capstone.try_place(self.courses, self.graph, state, slot) {
                        queue.remove(node);
                        pass.placed.push(node);
                    }
                    continue;
                }
            }

            queue.remove(node);
            state.place(node, slot);
            pass.placed.push(node);
            tracing::trace!(code = %self.courses[node].code, slot, "course placed");
        }

        pass
    }

    /// Courses still waiting, counting a pending capstone Part 2.
    fn unplaced(&self, queue: &WorkQueue) -> usize {
        let pending = self.capstone.as_ref().is_some_and(|c| c.is_pending());
        queue.len() + usize::from(pending)
    }

    fn unplaced_codes(&self, queue: &WorkQueue) -> Vec<String> {
        let mut codes: Vec<String> = queue
            .iter()
            .map(|node| self.courses[node].code.clone())
            .collect();
        if let Some(capstone) = self.capstone.as_ref().filter(|c| c.is_pending()) {
            codes.push(self.courses[capstone.part_two()].code.clone());
        }
        codes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::graph::GlobalPrerequisites;
    use crate::models::CourseCategory;

    fn core(code: &str) -> Course {
        Course::new(code, 3, CourseCategory::ProgrammeCore)
    }

    fn run(courses: &[Course], semester_count: usize) -> (Result<()>, PlanState) {
        let graph = PrerequisiteGraph::build(courses, &GlobalPrerequisites).unwrap();
        let mut state = PlanState::new(semester_count, courses.len());
        let mut queue = WorkQueue::from_order(courses.len(), 0..courses.len());
        let result = SemesterDistributor::new(courses, &graph, 2).distribute(&mut queue, &mut state);
        (result, state)
    }

    fn slot_codes(courses: &[Course], state: &PlanState, slot: usize) -> Vec<String> {
        state
            .courses(slot)
            .iter()
            .map(|&n| courses[n].code.clone())
            .collect()
    }

    #[test]
    fn test_even_distribution() {
        let courses: Vec<Course> = (0..6).map(|i| core(&format!("C{i}"))).collect();
        let (result, state) = run(&courses, 2);
        assert!(result.is_ok());
        assert_eq!(slot_codes(&courses, &state, 0), vec!["C0", "C1", "C2"]);
        assert_eq!(slot_codes(&courses, &state, 1), vec!["C3", "C4", "C5"]);
    }

    #[test]
    fn test_target_rounds_up() {
        let courses: Vec<Course> = (0..7).map(|i| core(&format!("C{i}"))).collect();
        let (result, state) = run(&courses, 3);
        assert!(result.is_ok());
        // ceil(7/3)=3, ceil(4/2)=2, ceil(2/1)=2
        assert_eq!(state.courses(0).len(), 3);
        assert_eq!(state.courses(1).len(), 2);
        assert_eq!(state.courses(2).len(), 2);
    }

    #[test]
    fn test_offering_window_deferral() {
        let courses = vec![
            core("A"),
            core("B")
                .with_prerequisite("A")
                .offered_in(&[Semester::Second]),
        ];
        let (result, state) = run(&courses, 2);
        assert!(result.is_ok());
        assert_eq!(slot_codes(&courses, &state, 0), vec!["A"]);
        assert_eq!(slot_codes(&courses, &state, 1), vec!["B"]);
    }

    #[test]
    fn test_same_slot_prerequisite_excluded() {
        // Target for slot 0 is 2, but B cannot join its prerequisite A.
        let courses = vec![core("A"), core("B").with_prerequisite("A"), core("C"), core("D")];
        let (result, state) = run(&courses, 2);
        assert!(result.is_ok());
        assert_eq!(slot_codes(&courses, &state, 0), vec!["A", "C"]);
        assert_eq!(slot_codes(&courses, &state, 1), vec!["B", "D"]);
    }

    #[test]
    fn test_unplaced_prerequisite_blocks_dependent() {
        // A only runs in Semester2; B must not jump ahead of it.
        let courses = vec![
            core("A").offered_in(&[Semester::Second]),
            core("B").with_prerequisite("A"),
        ];
        let (result, state) = run(&courses, 3);
        assert!(result.is_ok());
        assert_eq!(state.slot_of(0), Some(1));
        assert_eq!(state.slot_of(1), Some(2));
    }

    #[test]
    fn test_placement_exhausted() {
        let courses = vec![
            core("A"),
            core("B").with_prerequisite("A").offered_in(&[Semester::First]),
        ];
        let (result, _) = run(&courses, 2);
        let err = result.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PlacementExhausted);
        assert_eq!(err.course_codes(), vec!["B"]);
    }

    #[test]
    fn test_stall_stops_early() {
        // B is never offered; after two idle slots the run gives up.
        let courses = vec![core("A"), core("B").offered_in(&[])];
        let graph = PrerequisiteGraph::build(&courses, &GlobalPrerequisites).unwrap();
        let mut state = PlanState::new(10, 2);
        let mut queue = WorkQueue::from_order(2, [0, 1]);
        let err = SemesterDistributor::new(&courses, &graph, 2)
            .distribute(&mut queue, &mut state)
            .unwrap_err();
        assert_eq!(err.course_codes(), vec!["B"]);
    }

    #[test]
    fn test_later_seed_defers_stall() {
        let courses = vec![core("A"), core("B").with_prerequisite("A")];
        let graph = PrerequisiteGraph::build(&courses, &GlobalPrerequisites).unwrap();
        let mut state = PlanState::new(8, 2);
        state.place(0, 5);
        let mut queue = WorkQueue::from_order(2, [1]);
        SemesterDistributor::new(&courses, &graph, 2)
            .distribute(&mut queue, &mut state)
            .unwrap();
        assert_eq!(state.slot_of(1), Some(6));
    }

    #[test]
    fn test_full_block_evicts_and_locks() {
        let courses = vec![core("A"), core("B"), core("LI"), core("C")];
        let graph = PrerequisiteGraph::build(&courses, &GlobalPrerequisites).unwrap();
        let mut state = PlanState::new(3, 4);
        let mut queue = WorkQueue::from_order(4, [0, 2, 1, 3]);
        SemesterDistributor::new(&courses, &graph, 2)
            .with_full_block(Some(FullBlock::new(2)))
            .distribute(&mut queue, &mut state)
            .unwrap();

        // Slot 0: A placed, then LI evicts it and locks the slot.
        assert_eq!(slot_codes(&courses, &state, 0), vec!["LI"]);
        assert!(state.is_locked(0));
        // Evicted courses are reconsidered first.
        assert_eq!(slot_codes(&courses, &state, 1), vec!["A", "B"]);
        assert_eq!(slot_codes(&courses, &state, 2), vec!["C"]);
    }

    #[test]
    fn test_capstone_pair_in_consecutive_slots() {
        let courses = vec![
            core("A"),
            core("FYP1"),
            core("FYP2").with_prerequisite("FYP1"),
            core("B"),
        ];
        let graph = PrerequisiteGraph::build(&courses, &GlobalPrerequisites).unwrap();
        let mut state = PlanState::new(2, 4);
        let capstone = Capstone::new(1, 2, &state);
        let mut queue = WorkQueue::from_order(4, [0, 1, 3]);
        SemesterDistributor::new(&courses, &graph, 2)
            .with_capstone(Some(capstone))
            .distribute(&mut queue, &mut state)
            .unwrap();

        assert_eq!(state.slot_of(1), Some(0));
        assert_eq!(state.slot_of(2), Some(1));
        assert_eq!(state.courses(0).len() + state.courses(1).len(), 4);
    }

    #[test]
    fn test_capstone_in_last_slot_exhausts() {
        let courses = vec![core("FYP1"), core("FYP2")];
        let graph = PrerequisiteGraph::build(&courses, &GlobalPrerequisites).unwrap();
        let mut state = PlanState::new(1, 2);
        let capstone = Capstone::new(0, 1, &state);
        let mut queue = WorkQueue::from_order(2, [0]);
        let err = SemesterDistributor::new(&courses, &graph, 2)
            .with_capstone(Some(capstone))
            .distribute(&mut queue, &mut state)
            .unwrap_err();
        assert_eq!(err.course_codes(), vec!["FYP1", "FYP2"]);
    }
}
