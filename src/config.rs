//! Planner configuration.
//!
//! Holds the domain constants of a generation run: which course is the
//! full-block placement, which pair forms the capstone, the canonical
//! category priority table, and which categories are interleaved as
//! electives. Loadable from TOML:
//!
//! ```toml
//! full_block_code = "LI3990"
//! category_priority = ["faculty_core", "programme_core", "programme_elective"]
//! interleaved_categories = ["elective"]
//! stall_limit = 2
//!
//! [capstone]
//! part_one = "FYP1"
//! part_two = "FYP2"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

use crate::models::CourseCategory;
use crate::ordering::CategoryPriority;

/// Errors raised while loading or checking a [`PlannerConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config field '{field}': {reason}")]
    Invalid { field: String, reason: String },
}

/// The two sequential capstone courses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapstonePair {
    /// Course that must be taken first.
    pub part_one: String,
    /// Course that must follow in the next semester.
    pub part_two: String,
}

impl CapstonePair {
    /// Creates a capstone pair.
    pub fn new(part_one: impl Into<String>, part_two: impl Into<String>) -> Self {
        Self {
            part_one: part_one.into(),
            part_two: part_two.into(),
        }
    }
}

/// Configuration of the plan generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Course that must occupy a semester alone.
    pub full_block_code: Option<String>,
    /// Sequential two-part capstone.
    pub capstone: Option<CapstonePair>,
    /// Canonical category priority table used for tie-breaking.
    pub category_priority: CategoryPriority,
    /// Categories placed round-robin instead of by the distributor.
    pub interleaved_categories: Vec<CourseCategory>,
    /// Consecutive idle slots after which the run stops with `PlacementExhausted`.
    pub stall_limit: usize,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            full_block_code: None,
            capstone: None,
            category_priority: CategoryPriority::default(),
            interleaved_categories: vec![CourseCategory::Elective],
            stall_limit: 2,
        }
    }
}

impl PlannerConfig {
    /// Loads a configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parses and validates a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the full-block course.
    pub fn with_full_block(mut self, code: impl Into<String>) -> Self {
        self.full_block_code = Some(code.into());
        self
    }

    /// Sets the capstone pair.
    pub fn with_capstone(mut self, capstone: CapstonePair) -> Self {
        self.capstone = Some(capstone);
        self
    }

    /// Replaces the category priority table.
    pub fn with_category_priority(mut self, priority: CategoryPriority) -> Self {
        self.category_priority = priority;
        self
    }

    /// Replaces the interleaved category list.
    pub fn with_interleaved_categories(mut self, categories: Vec<CourseCategory>) -> Self {
        self.interleaved_categories = categories;
        self
    }

    /// Sets the stall limit.
    pub fn with_stall_limit(mut self, limit: usize) -> Self {
        self.stall_limit = limit;
        self
    }

    /// Whether `code` is the full-block course.
    pub fn is_full_block(&self, code: &str) -> bool {
        self.full_block_code.as_deref() == Some(code)
    }

    /// Codes of all special-case courses.
    pub fn special_codes(&self) -> impl Iterator<Item = &str> {
        self.full_block_code.as_deref().into_iter().chain(
            self.capstone
                .iter()
                .flat_map(|c| [c.part_one.as_str(), c.part_two.as_str()]),
        )
    }

    /// Checks internal consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stall_limit == 0 {
            return Err(invalid("stall_limit", "must be at least 1"));
        }

        let mut seen = HashSet::new();
        for category in self.category_priority.categories() {
            if !seen.insert(*category) {
                return Err(invalid(
                    "category_priority",
                    format!("{category:?} is listed more than once"),
                ));
            }
        }

        if let Some(capstone) = &self.capstone {
            if capstone.part_one == capstone.part_two {
                return Err(invalid("capstone", "part_one and part_two must differ"));
            }
            if let Some(block) = &self.full_block_code {
                if block == &capstone.part_one || block == &capstone.part_two {
                    return Err(invalid(
                        "full_block_code",
                        "the full-block course cannot be a capstone part",
                    ));
                }
            }
        }

        Ok(())
    }
}

fn invalid(field: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field: field.to_string(),
        reason: reason.into(),
    }
}
