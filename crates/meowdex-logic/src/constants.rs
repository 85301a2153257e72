//! Roster constants — stat layout, clamp limits, plan defaults, import format.
//!
//! Plain values with no storage dependency. Both the store and the
//! headless harness use these.

/// Number of stats every cat carries (one base + one current value each).
pub const STAT_COUNT: usize = 7;

/// Mask with every stat bit set.
pub const FULL_MASK: u8 = (1 << STAT_COUNT) - 1;

pub mod limits {
    /// Base stats live in [0, 7]; 7 is a "natural seven".
    pub const BASE_MIN: i32 = 0;
    pub const BASE_MAX: i32 = 7;
    /// Current stats live in [0, 99].
    pub const CURRENT_MIN: i32 = 0;
    pub const CURRENT_MAX: i32 = 99;
}

pub mod plan_defaults {
    pub const TOP_COUNT: i32 = 3;
    pub const PARTNERS_PER_TOP: i32 = 1;
    pub const MIN_SEVEN_COUNT: i32 = 0;

    pub const MIN_TOP_COUNT: i32 = 1;
}

/// Weights of the partner scoring function.
pub mod partner_weights {
    /// Per bit the partner adds to the pool's coverage.
    pub const NOVEL_FOR_POOL: f64 = 4.0;
    /// Per bit the partner has that the breeder lacks.
    pub const NOVEL_FOR_BREEDER: f64 = 2.0;
    /// Per natural seven on the partner.
    pub const SEVEN_COUNT: f64 = 0.5;
    /// Applied to `base_average / 7`.
    pub const BASE_AVERAGE: f64 = 0.5;
    /// Subtracted per earlier selection of the same partner.
    pub const REUSE_PENALTY: f64 = 0.75;
}

pub mod import_format {
    /// name, retired flag, then 7 × (current, base).
    pub const COLUMN_COUNT: usize = 16;
    pub const NUMERIC_COLUMNS: usize = 14;
    /// Case-insensitive value of the retired column meaning "retired".
    pub const RETIRED_YES: &str = "yes";
}

/// Pool entries with this many compatible partners or fewer are flagged.
pub const LOW_PARTNER_THRESHOLD: usize = 1;

/// Rows in the adventuring team.
pub const ADVENTURING_ROWS: usize = 4;

/// Valid profile ids are `1..=PROFILE_COUNT`.
pub const PROFILE_COUNT: u8 = 3;
