//! Plan assembler.
//!
//! Turns the working slot state into a [`ProgrammePlan`] and verifies the
//! plan invariants before it is handed back:
//!
//! 1. every requirement-set course appears in exactly one slot
//! 2. every resolved prerequisite sits in a strictly earlier slot
//!    (interleaved electives are exempt)
//! 3. the full-block course is alone in its slot
//! 4. capstone Part 2 sits after Part 1
//!
//! A violation can only come from a contradictory seed, and aborts the
//! run with a `PlanInvariant` validation error.

use std::collections::HashMap;

use super::state::PlanState;
use crate::error::{PlanError, Result};
use crate::graph::PrerequisiteGraph;
use crate::models::{Course, CourseRef, ProgrammePlan, SemesterSlot};
use crate::validation::{ValidationError, ValidationErrorKind};

/// Builds and verifies the output plan.
#[derive(Debug)]
pub(crate) struct PlanAssembler<'a> {
    courses: &'a [Course],
    graph: &'a PrerequisiteGraph,
    interleaved: &'a [bool],
    full_block: Option<usize>,
    capstone: Option<(usize, usize)>,
}

impl<'a> PlanAssembler<'a> {
    pub fn new(courses: &'a [Course], graph: &'a PrerequisiteGraph, interleaved: &'a [bool]) -> Self {
        Self {
            courses,
            graph,
            interleaved,
            full_block: None,
            capstone: None,
        }
    }

    pub fn with_full_block(mut self, node: Option<usize>) -> Self {
        self.full_block = node;
        self
    }

    pub fn with_capstone(mut self, pair: Option<(usize, usize)>) -> Self {
        self.capstone = pair;
        self
    }

    /// Emits the plan, slot courses in placement order.
    pub fn assemble(&self, state: &PlanState, programme_id: Option<&str>) -> Result<ProgrammePlan> {
        let slots = (0..state.slot_count())
            .map(|index| SemesterSlot {
                semester_index: index,
                courses: state
                    .courses(index)
                    .iter()
                    .map(|&node| CourseRef::from_course(&self.courses[node], self.graph.category(node)))
                    .collect(),
                locked: state.is_locked(index),
            })
            .collect();
        let plan = ProgrammePlan {
            programme_id: programme_id.map(str::to_string),
            slots,
        };

        self.verify(&plan)?;
        Ok(plan)
    }

    /// Checks the plan invariants, collecting every violation.
    pub fn verify(&self, plan: &ProgrammePlan) -> Result<()> {
        let mut errors = Vec::new();

        let mut slot_of: HashMap<&str, usize> = HashMap::new();
        for (index, course) in plan.courses() {
            if slot_of.insert(course.code.as_str(), index).is_some() {
                errors.push(violation(&course.code, format!("'{}' is placed more than once", course.code)));
            }
        }

        for node in 0..self.graph.len() {
            let code = self.graph.code(node);
            let Some(&slot) = slot_of.get(code) else {
                errors.push(violation(code, format!("'{code}' is not placed")));
                continue;
            };
            if self.interleaved[node] {
                continue;
            }
            for &prereq in self.graph.prerequisites(node) {
                let prereq_code = self.graph.code(prereq);
                if slot_of.get(prereq_code).is_some_and(|&p| p >= slot) {
                    errors.push(violation(
                        code,
                        format!("'{code}' in slot {slot} does not follow prerequisite '{prereq_code}'"),
                    ));
                }
            }
        }

        if let Some(node) = self.full_block {
            let code = self.graph.code(node);
            if let Some(slot) = slot_of.get(code).and_then(|&s| plan.slot(s)) {
                if slot.course_count() != 1 {
                    errors.push(violation(
                        code,
                        format!("full-block course '{code}' shares slot {}", slot.semester_index),
                    ));
                }
            }
        }

        if let Some((one, two)) = self.capstone {
            let (one, two) = (self.graph.code(one), self.graph.code(two));
            if let (Some(&s1), Some(&s2)) = (slot_of.get(one), slot_of.get(two)) {
                if s2 <= s1 {
                    errors.push(violation(
                        two,
                        format!("capstone part '{two}' (slot {s2}) does not follow '{one}' (slot {s1})"),
                    ));
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            tracing::warn!(violations = errors.len(), "assembled plan breaks invariants");
            Err(PlanError::Validation { errors })
        }
    }
}

fn violation(code: &str, message: String) -> ValidationError {
    ValidationError::for_course(ValidationErrorKind::PlanInvariant, code, message)
}
