//! Pure roster and breeding logic for Meowdex.
//!
//! This crate contains all logic that is independent of storage or any
//! front-end. Functions take plain data and return results, making them
//! unit-testable and safe to call from any thread.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`cat`] | Cat profiles, stats, seven masks, sanitizing |
//! | [`compatibility`] | Gender/orientation attraction table and pairing |
//! | [`constants`] | Stat layout, clamp limits, plan defaults, import format |
//! | [`dashboard`] | Coverage summary, next action, adventuring team |
//! | [`import`] | Tab-separated bulk import and duplicate detection |
//! | [`partners`] | Greedy partner recommendation over coverage |
//! | [`plan`] | Breeding plan assembly and reason tags |
//! | [`ranking`] | Eligibility filter and top-cohort ranking |

pub mod cat;
pub mod compatibility;
pub mod constants;
pub mod dashboard;
pub mod import;
pub mod partners;
pub mod plan;
pub mod ranking;

pub use cat::{CatProfile, Gender, Orientation, Stat, Stats};
pub use plan::{build_plan, BreedingPlan, PlanOptions};
