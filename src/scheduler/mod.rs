//! Plan generation.
//!
//! [`PlanGenerator`] runs one generation request end to end:
//!
//! 1. Validate the request against the [`PlannerConfig`].
//! 2. Build the prerequisite graph with the request's resolution strategy.
//! 3. Order the courses topologically.
//! 4. Seed the slots from any manual edit.
//! 5. Distribute the ordered courses slot by slot, routing the full-block
//!    course and the capstone pair through their handlers.
//! 6. Interleave electives round-robin over unlocked slots.
//! 7. Assemble the plan and verify its invariants.
//!
//! Each run owns its graph, queue and slot state. Nothing is shared between
//! runs and nothing is persisted.
//!
//! # Example
//!
//! ```
//! use u_curriculum::models::{Course, CourseCategory, Semester};
//! use u_curriculum::scheduler::{PlanGenerator, PlanRequest};
//!
//! let courses = vec![
//!     Course::new("CS101", 3, CourseCategory::FacultyCore),
//!     Course::new("CS201", 3, CourseCategory::ProgrammeCore)
//!         .with_prerequisite("CS101")
//!         .offered_in(&[Semester::Second]),
//! ];
//! let plan = PlanGenerator::default()
//!     .generate(&PlanRequest::new(courses, 2))
//!     .unwrap();
//! assert_eq!(plan.slot_index_of("CS101"), Some(0));
//! assert_eq!(plan.slot_index_of("CS201"), Some(1));
//! ```
//!
//! # Reference
//! Kahn (1962), "Topological sorting of large networks"

mod assembler;
mod distributor;
mod electives;
mod special;
mod state;
mod summary;
mod work_queue;

pub use summary::PlanSummary;
pub use work_queue::WorkQueue;

use serde::{Deserialize, Serialize};

use crate::config::PlannerConfig;
use crate::error::{PlanError, Result};
use crate::graph::{GlobalPrerequisites, PrerequisiteGraph, PrerequisiteSource, ProgrammePrerequisites};
use crate::models::{Course, CourseCatalog, GraduationRequirementSet, ProgrammePlan, SemesterSlot};
use crate::ordering::{TieBreakPolicy, TopologicalOrderer};
use crate::validation::validate_request;

use assembler::PlanAssembler;
use distributor::SemesterDistributor;
use electives::ElectiveInterleaver;
use special::{Capstone, FullBlock};
use state::PlanState;

/// Input of one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanRequest {
    /// Courses of the graduation requirement set.
    pub courses: Vec<Course>,
    /// Partially filled slots from a prior manual edit.
    #[serde(default)]
    pub existing_slots: Vec<SemesterSlot>,
    /// Programme used for override resolution.
    #[serde(default)]
    pub programme_id: Option<String>,
    /// Number of semester slots to fill.
    pub semester_count: usize,
}

impl PlanRequest {
    /// Creates a request with no seed and no programme overrides.
    pub fn new(courses: Vec<Course>, semester_count: usize) -> Self {
        Self {
            courses,
            existing_slots: Vec::new(),
            programme_id: None,
            semester_count,
        }
    }

    /// Builds a request from a catalog snapshot and a requirement set.
    ///
    /// # Errors
    /// `Validation` if a required code is not in the catalog.
    pub fn from_catalog(
        catalog: &CourseCatalog,
        requirements: &GraduationRequirementSet,
        semester_count: usize,
    ) -> Result<Self> {
        Ok(Self::new(catalog.select(requirements)?, semester_count))
    }

    /// Resolves prerequisites and categories for the given programme.
    pub fn with_programme(mut self, programme_id: impl Into<String>) -> Self {
        self.programme_id = Some(programme_id.into());
        self
    }

    /// Seeds the run with previously edited slots.
    pub fn with_existing_slots(mut self, slots: Vec<SemesterSlot>) -> Self {
        self.existing_slots = slots;
        self
    }

    /// Resolution strategy for this request.
    pub fn prerequisite_source(&self) -> Box<dyn PrerequisiteSource> {
        match &self.programme_id {
            Some(id) => Box::new(ProgrammePrerequisites::new(id.clone())),
            None => Box::new(GlobalPrerequisites),
        }
    }
}

/// Generates semester-by-semester programme plans.
#[derive(Debug, Clone, Default)]
pub struct PlanGenerator {
    config: PlannerConfig,
    policy: Option<TieBreakPolicy>,
}

impl PlanGenerator {
    /// Creates a generator with the given configuration.
    pub fn new(config: PlannerConfig) -> Self {
        Self {
            config,
            policy: None,
        }
    }

    /// Replaces the tie-break policy derived from the config's priority table.
    pub fn with_policy(mut self, policy: TieBreakPolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Runs one generation request.
    ///
    /// # Errors
    /// The first failing stage aborts the run; no partial plan is returned.
    pub fn generate(&self, request: &PlanRequest) -> Result<ProgrammePlan> {
        tracing::info!(
            programme = request.programme_id.as_deref().unwrap_or("-"),
            courses = request.courses.len(),
            semesters = request.semester_count,
            "generating plan"
        );

        validate_request(request, &self.config).map_err(|errors| PlanError::Validation { errors })?;

        let courses = &request.courses;
        let source = request.prerequisite_source();
        let graph = PrerequisiteGraph::build(courses, source.as_ref())?;
        let order = self.orderer().order(courses, &graph)?;

        let full_block = self
            .config
            .full_block_code
            .as_deref()
            .and_then(|code| graph.index_of(code));
        let capstone_nodes = self.config.capstone.as_ref().and_then(|pair| {
            Some((graph.index_of(&pair.part_one)?, graph.index_of(&pair.part_two)?))
        });

        let mut state = PlanState::seeded(
            request.semester_count,
            &request.existing_slots,
            &graph,
            full_block,
        );
        let capstone = capstone_nodes.map(|(one, two)| Capstone::new(one, two, &state));

        let interleaved: Vec<bool> = (0..graph.len())
            .map(|node| self.config.interleaved_categories.contains(&graph.category(node)))
            .collect();
        let part_two = capstone_nodes.map(|(_, two)| two);
        let (electives, distributed): (Vec<usize>, Vec<usize>) = order
            .iter()
            .copied()
            .filter(|&node| !state.is_placed(node) && Some(node) != part_two)
            .partition(|&node| interleaved[node]);

        tracing::debug!(
            distributed = distributed.len(),
            electives = electives.len(),
            "work-queue built"
        );

        let mut queue = WorkQueue::from_order(graph.len(), distributed);
        SemesterDistributor::new(courses, &graph, self.config.stall_limit)
            .with_full_block(full_block.map(FullBlock::new))
            .with_capstone(capstone)
            .distribute(&mut queue, &mut state)?;

        ElectiveInterleaver.interleave(&electives, &graph, &mut state)?;

        let plan = PlanAssembler::new(courses, &graph, &interleaved)
            .with_full_block(full_block)
            .with_capstone(capstone_nodes)
            .assemble(&state, request.programme_id.as_deref())?;

        tracing::info!(
            courses = plan.course_count(),
            credits = plan.total_credit_hours(),
            "plan generated"
        );
        Ok(plan)
    }

    fn orderer(&self) -> TopologicalOrderer {
        let policy = self
            .policy
            .clone()
            .unwrap_or_else(|| TieBreakPolicy::standard(self.config.category_priority.clone()));
        TopologicalOrderer::new(policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CapstonePair;
    use crate::error::ErrorKind;
    use crate::models::{CourseCategory, CourseRef, Semester};
    use crate::validation::ValidationErrorKind;
    use proptest::prelude::*;

    fn core(code: &str) -> Course {
        Course::new(code, 3, CourseCategory::ProgrammeCore)
    }

    fn codes(plan: &ProgrammePlan, slot: usize) -> Vec<&str> {
        plan.slots[slot].courses.iter().map(|c| c.code.as_str()).collect()
    }

    #[test]
    fn test_even_distribution_no_constraints() {
        let courses: Vec<Course> = (1..=6).map(|i| core(&format!("C{i}"))).collect();
        let plan = PlanGenerator::default()
            .generate(&PlanRequest::new(courses, 2))
            .unwrap();
        assert_eq!(plan.slots[0].course_count(), 3);
        assert_eq!(plan.slots[1].course_count(), 3);
        assert_eq!(plan.course_count(), 6);
    }

    #[test]
    fn test_offering_window_deferral() {
        let courses = vec![
            core("A"),
            core("B").with_prerequisite("A").offered_in(&[Semester::Second]),
        ];
        let plan = PlanGenerator::default()
            .generate(&PlanRequest::new(courses, 2))
            .unwrap();
        assert_eq!(codes(&plan, 0), vec!["A"]);
        assert_eq!(codes(&plan, 1), vec!["B"]);
    }

    #[test]
    fn test_cycle_rejected() {
        let courses = vec![core("A").with_prerequisite("B"), core("B").with_prerequisite("A")];
        let err = PlanGenerator::default()
            .generate(&PlanRequest::new(courses, 4))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Cycle);
        assert_eq!(err.course_codes(), vec!["A", "B"]);
    }

    #[test]
    fn test_missing_prerequisite() {
        let courses = vec![core("A").with_prerequisite("Z")];
        let err = PlanGenerator::default()
            .generate(&PlanRequest::new(courses, 2))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingPrerequisite);
        assert_eq!(err.course_codes(), vec!["A", "Z"]);
    }

    #[test]
    fn test_validation_errors_surface() {
        let err = PlanGenerator::default()
            .generate(&PlanRequest::new(Vec::new(), 0))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        match err {
            PlanError::Validation { errors } => assert_eq!(errors.len(), 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_full_block_exclusive() {
        let config = PlannerConfig::default().with_full_block("LI");
        let courses = vec![
            core("A"),
            core("B"),
            Course::new("LI", 12, CourseCategory::ProgrammeCore),
            core("C"),
            core("D"),
        ];
        let plan = PlanGenerator::new(config)
            .generate(&PlanRequest::new(courses, 3))
            .unwrap();

        let slot = plan.slot_index_of("LI").unwrap();
        assert_eq!(codes(&plan, slot), vec!["LI"]);
        assert!(plan.slots[slot].locked);
        assert_eq!(plan.course_count(), 5);
    }

    #[test]
    fn test_full_block_respects_prerequisites() {
        let config = PlannerConfig::default().with_full_block("LI");
        let courses = vec![
            core("A"),
            Course::new("LI", 12, CourseCategory::ProgrammeCore).with_prerequisite("A"),
            core("B"),
        ];
        let plan = PlanGenerator::new(config)
            .generate(&PlanRequest::new(courses, 3))
            .unwrap();
        assert!(plan.slot_index_of("A").unwrap() < plan.slot_index_of("LI").unwrap());
        assert_eq!(plan.slots[plan.slot_index_of("LI").unwrap()].course_count(), 1);
    }

    #[test]
    fn test_capstone_adjacent() {
        let config = PlannerConfig::default().with_capstone(CapstonePair::new("FYP1", "FYP2"));
        let courses = vec![
            core("A"),
            core("FYP1").with_prerequisite("A"),
            core("FYP2").with_prerequisite("FYP1"),
            core("B"),
        ];
        let plan = PlanGenerator::new(config)
            .generate(&PlanRequest::new(courses, 4))
            .unwrap();
        let one = plan.slot_index_of("FYP1").unwrap();
        assert_eq!(plan.slot_index_of("FYP2"), Some(one + 1));
    }

    #[test]
    fn test_capstone_waits_for_part_two_parity() {
        let config = PlannerConfig::default().with_capstone(CapstonePair::new("FYP1", "FYP2"));
        let courses = vec![
            core("FYP1"),
            core("FYP2").with_prerequisite("FYP1").offered_in(&[Semester::First]),
        ];
        let plan = PlanGenerator::new(config)
            .generate(&PlanRequest::new(courses, 3))
            .unwrap();
        assert_eq!(plan.slot_index_of("FYP1"), Some(1));
        assert_eq!(plan.slot_index_of("FYP2"), Some(2));
    }

    #[test]
    fn test_programme_override_relaxes_prerequisites() {
        let courses = vec![
            core("A"),
            core("B").with_prerequisite("A").with_programme_override("SE", Vec::new()),
        ];
        let global = PlanGenerator::default()
            .generate(&PlanRequest::new(courses.clone(), 2))
            .unwrap();
        assert_eq!(global.slot_index_of("B"), Some(1));

        let request = PlanRequest::new(courses, 1).with_programme("SE");
        let plan = PlanGenerator::default().generate(&request).unwrap();
        assert_eq!(plan.programme_id.as_deref(), Some("SE"));
        assert_eq!(codes(&plan, 0), vec!["A", "B"]);
    }

    #[test]
    fn test_category_override_in_output() {
        let courses = vec![
            Course::new("E1", 3, CourseCategory::Elective)
                .with_category_override("SE", CourseCategory::ProgrammeCore),
        ];
        let request = PlanRequest::new(courses, 1).with_programme("SE");
        let plan = PlanGenerator::default().generate(&request).unwrap();
        assert_eq!(plan.slots[0].courses[0].category, Some(CourseCategory::ProgrammeCore));
    }

    #[test]
    fn test_seeded_slots_kept() {
        let config = PlannerConfig::default().with_full_block("LI");
        let courses = vec![
            core("A"),
            core("B"),
            core("C"),
            Course::new("LI", 12, CourseCategory::ProgrammeCore),
        ];
        let request = PlanRequest::new(courses, 3).with_existing_slots(vec![
            SemesterSlot::new(0).with_course(CourseRef::code("C")),
            SemesterSlot::new(1).with_course(CourseRef::code("LI")),
        ]);
        let plan = PlanGenerator::new(config).generate(&request).unwrap();

        assert_eq!(codes(&plan, 1), vec!["LI"]);
        assert!(plan.slots[1].locked);
        assert_eq!(codes(&plan, 0)[0], "C");
        assert_eq!(plan.course_count(), 4);
    }

    #[test]
    fn test_late_seed_unblocks_dependent() {
        let courses = vec![core("A"), core("B").with_prerequisite("A")];
        let request = PlanRequest::new(courses, 8).with_existing_slots(vec![
            SemesterSlot::new(5).with_course(CourseRef::code("A")),
        ]);
        let plan = PlanGenerator::default().generate(&request).unwrap();
        assert_eq!(plan.slot_index_of("A"), Some(5));
        assert_eq!(plan.slot_index_of("B"), Some(6));
    }

    #[test]
    fn test_full_block_eviction_re_pairs_capstone() {
        let config = PlannerConfig::default()
            .with_full_block("LI")
            .with_capstone(CapstonePair::new("FYP1", "FYP2"));
        let courses = vec![
            core("FYP1"),
            Course::new("LI", 12, CourseCategory::ProgrammeCore),
            core("FYP2").with_prerequisite("FYP1"),
            core("A"),
            core("B"),
        ];
        let plan = PlanGenerator::new(config)
            .generate(&PlanRequest::new(courses, 4))
            .unwrap();

        // FYP1 was paired in slot 0, then evicted by LI
        assert_eq!(codes(&plan, 0), vec!["LI"]);
        let one = plan.slot_index_of("FYP1").unwrap();
        assert_eq!(one, 1);
        assert_eq!(plan.slot_index_of("FYP2"), Some(one + 1));
        assert_eq!(plan.course_count(), 5);
    }

    #[test]
    fn test_full_block_eviction_keeps_seeded_part_two() {
        let config = PlannerConfig::default()
            .with_full_block("LI")
            .with_capstone(CapstonePair::new("FYP1", "FYP2"));
        let mut courses = vec![
            core("FYP1"),
            Course::new("LI", 12, CourseCategory::ProgrammeCore),
            core("FYP2").with_prerequisite("FYP1"),
        ];
        courses.extend(["A", "B", "C", "D", "E"].map(core));
        let request = PlanRequest::new(courses, 4).with_existing_slots(vec![
            SemesterSlot::new(3).with_course(CourseRef::code("FYP2")),
        ]);
        let plan = PlanGenerator::new(config).generate(&request).unwrap();

        assert_eq!(codes(&plan, 0), vec!["LI"]);
        assert_eq!(plan.slot_index_of("FYP1"), Some(1));
        assert_eq!(plan.slot_index_of("FYP2"), Some(3));
        assert_eq!(plan.course_count(), 8);
    }

    #[test]
    fn test_contradictory_seed_rejected() {
        let courses = vec![core("A"), core("B").with_prerequisite("A")];
        let request = PlanRequest::new(courses, 2).with_existing_slots(vec![
            SemesterSlot::new(0).with_course(CourseRef::code("B")),
        ]);
        let err = PlanGenerator::default().generate(&request).unwrap_err();
        match err {
            PlanError::Validation { errors } => {
                assert_eq!(errors[0].kind, ValidationErrorKind::PlanInvariant);
                assert_eq!(errors[0].course_code.as_deref(), Some("B"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_electives_interleaved() {
        let config = PlannerConfig::default().with_full_block("LI");
        let courses = vec![
            core("A"),
            Course::new("LI", 12, CourseCategory::ProgrammeCore).with_prerequisite("A"),
            Course::new("E1", 3, CourseCategory::Elective),
            Course::new("E2", 3, CourseCategory::Elective),
            Course::new("E3", 3, CourseCategory::Elective),
        ];
        let plan = PlanGenerator::new(config)
            .generate(&PlanRequest::new(courses, 3))
            .unwrap();

        assert_eq!(codes(&plan, 1), vec!["LI"]);
        assert_eq!(codes(&plan, 0), vec!["A", "E1", "E3"]);
        assert_eq!(codes(&plan, 2), vec!["E2"]);
    }

    #[test]
    fn test_placement_exhausted() {
        let courses = vec![
            core("A"),
            core("B").with_prerequisite("A").offered_in(&[Semester::First]),
        ];
        let err = PlanGenerator::default()
            .generate(&PlanRequest::new(courses, 2))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PlacementExhausted);
        assert_eq!(err.course_codes(), vec!["B"]);
    }

    #[test]
    fn test_from_catalog() {
        let catalog = CourseCatalog::new(vec![core("A"), core("B"), core("X")]).unwrap();
        let requirements = GraduationRequirementSet::new(["A", "B"]);
        let request = PlanRequest::from_catalog(&catalog, &requirements, 2).unwrap();
        assert_eq!(request.courses.len(), 2);

        let missing = GraduationRequirementSet::new(["A", "Q"]);
        let err = PlanRequest::from_catalog(&catalog, &missing, 2).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_request_json() {
        let json = r#"{
            "courses": [
                {"code": "A", "credit_hours": 3, "category": "faculty_core",
                 "offered_semesters": ["semester1", "semester2"]},
                {"code": "B", "credit_hours": 3, "category": "programme_core",
                 "offered_semesters": ["semester2"], "prerequisites": ["A"]}
            ],
            "semester_count": 2
        }"#;
        let request: PlanRequest = serde_json::from_str(json).unwrap();
        let plan = PlanGenerator::default().generate(&request).unwrap();
        assert_eq!(plan.slot_index_of("B"), Some(1));
    }

    #[test]
    fn test_deterministic() {
        let courses: Vec<Course> = (0..12)
            .map(|i| {
                let c = Course::new(format!("C{i:02}"), 3, CourseCategory::ALL[i % 5]);
                if i >= 4 {
                    c.with_prerequisite(format!("C{:02}", i - 4))
                } else {
                    c
                }
            })
            .collect();
        let request = PlanRequest::new(courses, 6);
        let first = PlanGenerator::default().generate(&request).unwrap();
        for _ in 0..3 {
            assert_eq!(PlanGenerator::default().generate(&request).unwrap(), first);
        }
    }

    fn acyclic_courses() -> impl Strategy<Value = Vec<Course>> {
        (1usize..12).prop_flat_map(|n| {
            proptest::collection::vec(proptest::collection::vec(any::<bool>(), n), n).prop_map(
                move |edges| {
                    (0..n)
                        .map(|i| {
                            let mut course = Course::new(format!("C{i}"), 3, CourseCategory::ProgrammeCore);
                            for j in 0..i {
                                if edges[i][j] {
                                    course = course.with_prerequisite(format!("C{j}"));
                                }
                            }
                            course
                        })
                        .collect()
                },
            )
        })
    }

    proptest! {
        #[test]
        fn prop_complete_and_ordered(courses in acyclic_courses()) {
            let n = courses.len();
            let plan = PlanGenerator::default()
                .generate(&PlanRequest::new(courses.clone(), n))
                .unwrap();

            prop_assert_eq!(plan.semester_count(), n);
            prop_assert_eq!(plan.course_count(), n);
            for course in &courses {
                let slot = plan.slot_index_of(&course.code);
                prop_assert!(slot.is_some());
                for prereq in &course.prerequisites {
                    prop_assert!(plan.slot_index_of(prereq) < slot);
                }
            }
        }
    }
}
