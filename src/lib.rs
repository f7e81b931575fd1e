//! Course plan generation for degree programmes.
//!
//! Turns a graduation requirement set into a semester-by-semester plan that
//! respects prerequisite order, semester offering windows, a full-block
//! placement course and a two-part capstone.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Course`, `CourseCatalog`, `SemesterSlot`,
//!   `ProgrammePlan`
//! - **`validation`**: Input integrity checks (empty input, duplicate codes,
//!   seed slots, special-case routing)
//! - **`graph`**: Prerequisite graph with global or programme-specific
//!   resolution
//! - **`ordering`**: Topological ordering with composable tie-break rules
//! - **`scheduler`**: `PlanGenerator`: distribution, special cases,
//!   elective interleaving, plan assembly and summary metrics
//! - **`config`**: `PlannerConfig`, loadable from TOML
//!
//! # Architecture
//!
//! Generation is synchronous and single-threaded. Each call builds its own
//! graph, work-queue and slot state, so independent requests never share
//! mutable state. Catalog reads and plan persistence belong to the caller.
//!
//! # References
//!
//! - Kahn (1962), "Topological sorting of large networks"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4

pub mod config;
pub mod error;
pub mod graph;
#[cfg(feature = "cli")]
pub mod logging;
pub mod models;
pub mod ordering;
pub mod scheduler;
pub mod validation;

pub use config::PlannerConfig;
pub use error::{ErrorKind, PlanError, Result};
pub use scheduler::{PlanGenerator, PlanRequest};
