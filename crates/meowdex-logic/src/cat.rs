//! Cat profiles — the roster record and its derived values.
//!
//! A cat carries seven stats, each with a base value (0–7, 7 being a
//! "natural seven") and a current value (0–99). The seven mask, seven count
//! and averages are always derived from the stats and never stored.

use serde::{Deserialize, Serialize};

use crate::constants::{limits, STAT_COUNT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Gender {
    Male,
    #[default]
    Female,
    /// Third gender; see [`crate::compatibility`] for how it pairs.
    Fluid,
}

impl Gender {
    pub fn all() -> &'static [Gender] {
        &[Gender::Male, Gender::Female, Gender::Fluid]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Orientation {
    /// Attracted to every gender.
    #[default]
    Omni,
    SameOnly,
    OppositeOnly,
}

impl Orientation {
    pub fn all() -> &'static [Orientation] {
        &[
            Orientation::Omni,
            Orientation::SameOnly,
            Orientation::OppositeOnly,
        ]
    }
}

/// The seven stats, in mask bit order (bit 0 = Strength).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stat {
    Strength,
    Dexterity,
    Stamina,
    Intellect,
    Speed,
    Charisma,
    Luck,
}

impl Stat {
    pub fn all() -> &'static [Stat; STAT_COUNT] {
        &[
            Stat::Strength,
            Stat::Dexterity,
            Stat::Stamina,
            Stat::Intellect,
            Stat::Speed,
            Stat::Charisma,
            Stat::Luck,
        ]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Mask bit for this stat.
    pub fn bit(self) -> u8 {
        1 << self.index()
    }

    pub fn short_name(self) -> &'static str {
        match self {
            Stat::Strength => "STR",
            Stat::Dexterity => "DEX",
            Stat::Stamina => "STA",
            Stat::Intellect => "INT",
            Stat::Speed => "SPD",
            Stat::Charisma => "CHA",
            Stat::Luck => "LCK",
        }
    }
}

/// One value per stat. Signed so that out-of-range input survives until
/// [`CatProfile::sanitize`] clamps it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Stats {
    pub strength: i32,
    pub dexterity: i32,
    pub stamina: i32,
    pub intellect: i32,
    pub speed: i32,
    pub charisma: i32,
    pub luck: i32,
}

impl Stats {
    pub fn from_array(values: [i32; STAT_COUNT]) -> Self {
        let [strength, dexterity, stamina, intellect, speed, charisma, luck] = values;
        Self {
            strength,
            dexterity,
            stamina,
            intellect,
            speed,
            charisma,
            luck,
        }
    }

    pub fn to_array(&self) -> [i32; STAT_COUNT] {
        [
            self.strength,
            self.dexterity,
            self.stamina,
            self.intellect,
            self.speed,
            self.charisma,
            self.luck,
        ]
    }

    pub fn get(&self, stat: Stat) -> i32 {
        self.to_array()[stat.index()]
    }

    pub fn set(&mut self, stat: Stat, value: i32) {
        let slot = match stat {
            Stat::Strength => &mut self.strength,
            Stat::Dexterity => &mut self.dexterity,
            Stat::Stamina => &mut self.stamina,
            Stat::Intellect => &mut self.intellect,
            Stat::Speed => &mut self.speed,
            Stat::Charisma => &mut self.charisma,
            Stat::Luck => &mut self.luck,
        };
        *slot = value;
    }

    pub fn average(&self) -> f64 {
        self.to_array().iter().map(|&v| v as f64).sum::<f64>() / STAT_COUNT as f64
    }

    fn clamped(&self, min: i32, max: i32) -> Self {
        Self::from_array(self.to_array().map(|v| v.clamp(min, max)))
    }
}

/// A roster entry.
///
/// `id` is assigned by the store; a profile built by a caller carries `0`
/// until it is added.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatProfile {
    pub id: u32,
    pub name: String,
    pub retired: bool,
    pub gender: Gender,
    pub orientation: Orientation,
    pub base: Stats,
    pub current: Stats,
    pub notes: String,
}

impl CatProfile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_gender(mut self, gender: Gender, orientation: Orientation) -> Self {
        self.gender = gender;
        self.orientation = orientation;
        self
    }

    pub fn with_base(mut self, base: [i32; STAT_COUNT]) -> Self {
        self.base = Stats::from_array(base);
        self
    }

    pub fn with_current(mut self, current: [i32; STAT_COUNT]) -> Self {
        self.current = Stats::from_array(current);
        self
    }

    pub fn with_retired(mut self, retired: bool) -> Self {
        self.retired = retired;
        self
    }

    /// Copy carrying a different id. The store uses this when assigning ids.
    pub fn with_id(&self, id: u32) -> Self {
        Self {
            id,
            ..self.clone()
        }
    }

    pub fn base_average(&self) -> f64 {
        self.base.average()
    }

    pub fn current_average(&self) -> f64 {
        self.current.average()
    }

    /// Bit `i` is set iff base stat `i` is at the maximum.
    pub fn seven_mask(&self) -> u8 {
        Stat::all()
            .iter()
            .filter(|&&stat| self.base.get(stat) == limits::BASE_MAX)
            .fold(0u8, |mask, stat| mask | stat.bit())
    }

    pub fn seven_count(&self) -> u32 {
        self.seven_mask().count_ones()
    }

    pub fn has_natural_seven(&self) -> bool {
        self.seven_count() > 0
    }

    /// Trimmed text and clamped stats. Idempotent.
    pub fn sanitize(&self) -> Self {
        Self {
            id: self.id,
            name: self.name.trim().to_string(),
            retired: self.retired,
            gender: self.gender,
            orientation: self.orientation,
            base: self.base.clamped(limits::BASE_MIN, limits::BASE_MAX),
            current: self
                .current
                .clamped(limits::CURRENT_MIN, limits::CURRENT_MAX),
            notes: self.notes.trim().to_string(),
        }
    }
}

/// Display label used in reports: `Name (#id)`.
pub fn name_with_id(cat: &CatProfile) -> String {
    format!("{} (#{})", cat.name, cat.id)
}
