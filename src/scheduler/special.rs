//! Special-case handlers: the full-block course and the capstone pair.
//!
//! Both intercept a candidate before ordinary placement. The caller has
//! already checked the candidate's own prerequisites and offering window
//! for the current slot.

use super::state::PlanState;
use super::work_queue::WorkQueue;
use crate::graph::PrerequisiteGraph;
use crate::models::{Course, Semester};

/// Placements made during one slot's pass.
#[derive(Debug, Clone)]
pub(crate) struct SlotPass {
    pub slot: usize,
    /// Courses already in the slot when the pass started (seeded or a
    /// capstone Part 2 reserved by the previous slot). Never evicted.
    pub pinned: usize,
    /// Nodes placed by this pass, in placement order.
    pub placed: Vec<usize>,
}

impl SlotPass {
    pub fn start(slot: usize, state: &PlanState) -> Self {
        Self {
            slot,
            pinned: state.courses(slot).len(),
            placed: Vec::new(),
        }
    }
}

/// The off-campus placement course that occupies a semester alone.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FullBlock {
    node: usize,
}

impl FullBlock {
    pub fn new(node: usize) -> Self {
        Self { node }
    }

    pub fn node(&self) -> usize {
        self.node
    }

    /// Evicts this pass's placements back to the front of the queue and
    /// takes the slot alone, locking it.
    ///
    /// Returns `false` (deferred) if the slot holds pinned courses.
    pub fn try_place(
        &self,
        state: &mut PlanState,
        queue: &mut WorkQueue,
        pass: &mut SlotPass,
        capstone: Option<&mut Capstone>,
    ) -> bool {
        if pass.pinned > 0 {
            tracing::debug!(slot = pass.slot, "full-block course deferred: slot holds pinned courses");
            return false;
        }

        let evicted = std::mem::take(&mut pass.placed);
        for &node in &evicted {
            state.unplace(node);
        }
        if let Some(capstone) = capstone {
            if evicted.contains(&capstone.part_one()) {
                capstone.withdraw(state);
            }
        }
        queue.push_front_all(&evicted);

        queue.remove(self.node);
        state.place(self.node, pass.slot);
        state.lock(pass.slot);
        pass.placed.push(self.node);

        tracing::debug!(
            slot = pass.slot,
            evicted = evicted.len(),
            "full-block course placed, slot locked"
        );
        true
    }
}

/// Two-part capstone taken in consecutive semesters.
#[derive(Debug, Clone)]
pub(crate) struct Capstone {
    part_one: usize,
    part_two: usize,
    pending: bool,
    /// Part 2 came from the seed and never moves.
    seeded_part_two: bool,
}

impl Capstone {
    /// `pending` is true while Part 2 still awaits placement.
    pub fn new(part_one: usize, part_two: usize, state: &PlanState) -> Self {
        let seeded_part_two = state.is_placed(part_two);
        Self {
            part_one,
            part_two,
            pending: !seeded_part_two,
            seeded_part_two,
        }
    }

    pub fn part_one(&self) -> usize {
        self.part_one
    }

    pub fn part_two(&self) -> usize {
        self.part_two
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Places a pending Part 2 after a seeded Part 1, if the slot after
    /// it can take Part 2.
    pub fn settle_seeded(&mut self, courses: &[Course], graph: &PrerequisiteGraph, state: &mut PlanState) {
        if !self.pending {
            return;
        }
        if let Some(slot) = state.slot_of(self.part_one) {
            if self.part_two_fits(courses, graph, state, slot + 1) {
                state.place(self.part_two, slot + 1);
                self.pending = false;
            }
        }
    }

    /// Places Part 1 in `slot` and Part 2 in `slot + 1` atomically.
    ///
    /// Returns `false` (Part 1 deferred) when Part 2 has no valid home in
    /// the next slot. If Part 2 was seeded, Part 1 only needs to precede it.
    pub fn try_place(
        &mut self,
        courses: &[Course],
        graph: &PrerequisiteGraph,
        state: &mut PlanState,
        slot: usize,
    ) -> bool {
        if !self.pending {
            return match state.slot_of(self.part_two) {
                Some(s) if slot < s => {
                    state.place(self.part_one, slot);
                    true
                }
                _ => false,
            };
        }

        if !self.part_two_fits(courses, graph, state, slot + 1) {
            tracing::debug!(slot, "capstone part one deferred: no valid slot for part two");
            return false;
        }

        state.place(self.part_one, slot);
        state.place(self.part_two, slot + 1);
        self.pending = false;
        tracing::debug!(
            part_one = %courses[self.part_one].code,
            part_two = %courses[self.part_two].code,
            slot,
            "capstone pair placed"
        );
        true
    }

    /// Pulls Part 2 back out after Part 1 was evicted. A seeded Part 2
    /// stays where it is.
    pub fn withdraw(&mut self, state: &mut PlanState) {
        if self.seeded_part_two {
            return;
        }
        if state.unplace(self.part_two).is_some() {
            self.pending = true;
        }
    }

    fn part_two_fits(
        &self,
        courses: &[Course],
        graph: &PrerequisiteGraph,
        state: &PlanState,
        slot: usize,
    ) -> bool {
        if slot >= state.slot_count() || state.is_locked(slot) {
            return false;
        }
        if !courses[self.part_two].is_offered_in(Semester::for_slot(slot)) {
            return false;
        }
        graph
            .prerequisites(self.part_two)
            .iter()
            .filter(|&&p| p != self.part_one)
            .all(|&p| state.slot_of(p).is_some_and(|s| s < slot))
    }
}
