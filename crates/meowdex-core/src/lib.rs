//! Meowdex Core - roster persistence
//!
//! Stores cat rosters as one JSON array per profile under an application
//! data directory, together with per-profile plan settings.
//!
//! # Architecture
//!
//! - **Roster store**: CRUD over the active profile's file, serialized by a
//!   single mutex so reads never observe a half-written roster
//! - **Settings store**: active profile and plan options (`profiles.json`)
//! - **Importer**: tab-separated bulk import with duplicate detection
//! - **Generation**: seeded random rosters for testing and benchmarks
//!
//! All ranking logic lives in `meowdex-logic`; this crate only feeds it.
//!
//! # Example
//!
//! ```rust,no_run
//! use meowdex_core::prelude::*;
//!
//! let store = RosterStore::open_default();
//! let settings = SettingsStore::open_default().load()?;
//! store.set_active_profile(settings.active_profile);
//!
//! let cats = store.list()?;
//! let plan = build_plan(&cats, settings.active_options());
//! println!("{} cats in breeding pool", plan.breeding_pool.len());
//! # Ok::<(), meowdex_core::error::StoreError>(())
//! ```

pub mod error;
pub mod generation;
pub mod importer;
pub mod paths;
pub mod roster;
pub mod settings;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::error::{StoreError, StoreResult};
    pub use crate::roster::RosterStore;
    pub use crate::settings::{ProfileSettings, SettingsStore};
    pub use meowdex_logic::{build_plan, BreedingPlan, CatProfile, PlanOptions};
}
