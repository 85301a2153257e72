//! Dashboard summaries derived from a roster snapshot and its plan.
//!
//! Coverage, missing stats, low-partner risk and the suggested next action,
//! plus the adventuring team picked from cats outside the breeding pool.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cat::{CatProfile, Stat};
use crate::constants::{ADVENTURING_ROWS, LOW_PARTNER_THRESHOLD, STAT_COUNT};
use crate::plan::BreedingPlan;

/// Short names of stats whose bit is not set in `mask`, in stat order.
pub fn missing_stats(mask: u8) -> Vec<&'static str> {
    Stat::all()
        .iter()
        .filter(|stat| mask & stat.bit() == 0)
        .map(|stat| stat.short_name())
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NextAction {
    FindMissing(Vec<String>),
    ReviewLowPartnerBreeders,
    Stable,
}

impl fmt::Display for NextAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NextAction::FindMissing(names) => {
                write!(f, "Find candidates with natural 7 in: {}.", names.join(", "))
            }
            NextAction::ReviewLowPartnerBreeders => write!(
                f,
                "Review low-partner breeders and consider replacements from Full Roster."
            ),
            NextAction::Stable => write!(
                f,
                "Coverage is stable. Validate averages and tune partner settings if needed."
            ),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_cats: usize,
    pub retired: usize,
    pub natural_seven: usize,
    pub covered_stats: u32,
    pub coverage_percent: f64,
    pub missing: Vec<String>,
    /// Pool entries with at most one compatible partner inside the pool.
    pub low_partner_risk: usize,
    pub next_action: NextAction,
}

impl DashboardSummary {
    pub fn build(cats: &[CatProfile], plan: &BreedingPlan) -> Self {
        let covered_stats = plan.covered_mask.count_ones();
        let missing: Vec<String> = missing_stats(plan.covered_mask)
            .into_iter()
            .map(String::from)
            .collect();
        let low_partner_risk = plan
            .breeding_pool
            .iter()
            .filter(|e| e.compatible_partners <= LOW_PARTNER_THRESHOLD)
            .count();

        let next_action = if !missing.is_empty() {
            NextAction::FindMissing(missing.clone())
        } else if low_partner_risk > 0 {
            NextAction::ReviewLowPartnerBreeders
        } else {
            NextAction::Stable
        };

        Self {
            total_cats: cats.len(),
            retired: cats.iter().filter(|c| c.retired).count(),
            natural_seven: cats.iter().filter(|c| c.has_natural_seven()).count(),
            covered_stats,
            coverage_percent: covered_stats as f64 / STAT_COUNT as f64 * 100.0,
            missing,
            low_partner_risk,
            next_action,
        }
    }

    pub fn coverage_line(&self) -> String {
        format!("{}/{} stats covered", self.covered_stats, STAT_COUNT)
    }

    pub fn risk_line(&self) -> String {
        if self.low_partner_risk == 0 {
            "No low-partner breeders in pool.".to_string()
        } else {
            format!(
                "{} pool cats have <= {} compatible partner.",
                self.low_partner_risk, LOW_PARTNER_THRESHOLD
            )
        }
    }
}

/// What an adventuring row is scored on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StatChoice {
    /// Current average.
    #[default]
    None,
    Stat(Stat),
}

impl StatChoice {
    pub fn score(self, cat: &CatProfile) -> f64 {
        match self {
            StatChoice::None => cat.current_average(),
            StatChoice::Stat(stat) => cat.current.get(stat) as f64,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdventuringSlot {
    /// 1-based row.
    pub row: usize,
    pub choice: StatChoice,
    pub cat: Option<CatProfile>,
    pub score: f64,
}

/// Fill the adventuring rows from the plan's general population.
///
/// Retired cats are skipped and no cat is used twice. With `auto` set every
/// row scores on current average regardless of `choices`.
pub fn adventuring_team(
    plan: &BreedingPlan,
    choices: &[StatChoice; ADVENTURING_ROWS],
    auto: bool,
) -> Vec<AdventuringSlot> {
    let candidates: Vec<&CatProfile> = plan
        .general_population
        .iter()
        .map(|e| &e.cat)
        .filter(|c| !c.retired)
        .collect();

    let mut used: Vec<u32> = Vec::with_capacity(ADVENTURING_ROWS);
    let mut team = Vec::with_capacity(ADVENTURING_ROWS);

    for (i, &requested) in choices.iter().enumerate() {
        let choice = if auto { StatChoice::None } else { requested };
        let best = candidates
            .iter()
            .filter(|c| !used.contains(&c.id))
            .map(|&c| (c, choice.score(c)))
            .max_by(|(a, sa), (b, sb)| {
                sa.total_cmp(sb)
                    .then_with(|| a.current_average().total_cmp(&b.current_average()))
                    .then_with(|| a.id.cmp(&b.id))
            });

        let slot = match best {
            Some((cat, score)) => {
                used.push(cat.id);
                AdventuringSlot {
                    row: i + 1,
                    choice,
                    cat: Some(cat.clone()),
                    score,
                }
            }
            None => AdventuringSlot {
                row: i + 1,
                choice,
                cat: None,
                score: 0.0,
            },
        };
        team.push(slot);
    }
    team
}
