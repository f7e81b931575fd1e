//! Elective interleaver.
//!
//! Appends interleaved-category courses round-robin over the unlocked
//! slots, one per slot visited, starting from slot 0. No prerequisite or
//! offering-window check applies to these courses.

use super::state::PlanState;
use crate::error::{PlanError, Result};
use crate::graph::PrerequisiteGraph;

/// Round-robin placement of elective nodes.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ElectiveInterleaver;

impl ElectiveInterleaver {
    /// Places `electives` in order.
    ///
    /// # Errors
    /// `PlacementExhausted` if electives remain but every slot is locked.
    pub fn interleave(
        &self,
        electives: &[usize],
        graph: &PrerequisiteGraph,
        state: &mut PlanState,
    ) -> Result<()> {
        if electives.is_empty() {
            return Ok(());
        }

        let open: Vec<usize> = (0..state.slot_count())
            .filter(|&slot| !state.is_locked(slot))
            .collect();
        if open.is_empty() {
            tracing::warn!(electives = electives.len(), "no unlocked slot for electives");
            return Err(PlanError::PlacementExhausted {
                unplaced_codes: electives.iter().map(|&n| graph.code(n).to_string()).collect(),
            });
        }

        for (&node, &slot) in electives.iter().zip(open.iter().cycle()) {
            state.place(node, slot);
            tracing::debug!(code = graph.code(node), slot, "elective placed");
        }
        Ok(())
    }
}
