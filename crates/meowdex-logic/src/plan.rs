//! Breeding plan — ranks the roster and assembles the recommendation.
//!
//! Pipeline: active roster → [`rank_eligible`] → top cohort →
//! [`recommend_partners`] → breeding pool + general population.
//!
//! `build_plan` is a pure function of its inputs. It performs no I/O and
//! holds no locks; callers pass a snapshot of the roster.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cat::{CatProfile, Stat};
use crate::compatibility::compatible_count;
use crate::constants::{plan_defaults, STAT_COUNT};
use crate::partners::{recommend_partners, BreederPartners, CoverageState};
use crate::ranking::{rank_eligible, select_top_cohort};

/// Tunables for [`build_plan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanOptions {
    /// Size of the top cohort (at least 1).
    pub top_count: i32,
    /// Partners to recommend per top-cohort cat (0 disables recommendations).
    pub partners_per_top: i32,
    /// Minimum natural sevens for eligibility.
    pub min_seven_count: i32,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            top_count: plan_defaults::TOP_COUNT,
            partners_per_top: plan_defaults::PARTNERS_PER_TOP,
            min_seven_count: plan_defaults::MIN_SEVEN_COUNT,
        }
    }
}

impl PlanOptions {
    pub fn new(top_count: i32, partners_per_top: i32, min_seven_count: i32) -> Self {
        Self {
            top_count,
            partners_per_top,
            min_seven_count,
        }
    }

    /// Clamp every field to its minimum.
    pub fn normalized(self) -> Self {
        Self {
            top_count: self.top_count.max(plan_defaults::MIN_TOP_COUNT),
            partners_per_top: self.partners_per_top.max(0),
            min_seven_count: self.min_seven_count.max(0),
        }
    }
}

/// Why a cat is in the breeding pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PoolReason {
    TopPriority,
    /// Recommended as a partner for these breeder ids, in pick order.
    PartnerFor(Vec<u32>),
}

impl fmt::Display for PoolReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoolReason::TopPriority => write!(f, "Top-mask priority"),
            PoolReason::PartnerFor(ids) => {
                let list = ids
                    .iter()
                    .map(|id| format!("#{id}"))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "Partner recommendation for breeder {list}")
            }
        }
    }
}

/// Why a cat was left out of the breeding pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeneralReason {
    Retired,
    OutsideSelectedSet,
    NoNaturalSeven,
}

impl GeneralReason {
    pub fn for_cat(cat: &CatProfile) -> Self {
        if cat.retired {
            GeneralReason::Retired
        } else if cat.has_natural_seven() {
            GeneralReason::OutsideSelectedSet
        } else {
            GeneralReason::NoNaturalSeven
        }
    }
}

impl fmt::Display for GeneralReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            GeneralReason::Retired => "Retired",
            GeneralReason::OutsideSelectedSet => "Outside selected breeding set",
            GeneralReason::NoNaturalSeven => "No natural base 7",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolEntry {
    pub cat: CatProfile,
    /// Seven mask rendered by [`format_mask`].
    pub seven_mask: String,
    /// Compatible partners inside the pool.
    pub compatible_partners: usize,
    pub reason: PoolReason,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralEntry {
    pub cat: CatProfile,
    pub reason: GeneralReason,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartnerRecommendation {
    pub partner: CatProfile,
    pub score: f64,
    /// Bits this partner added to the pool when it was picked.
    pub novel_for_pool: u8,
    /// Bits this partner has that the breeder lacks.
    pub novel_for_breeder: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreederRecommendation {
    pub breeder: CatProfile,
    pub partners: Vec<PartnerRecommendation>,
}

impl From<&BreederPartners<'_>> for BreederRecommendation {
    fn from(rec: &BreederPartners<'_>) -> Self {
        Self {
            breeder: rec.breeder.clone(),
            partners: rec
                .partners
                .iter()
                .map(|p| PartnerRecommendation {
                    partner: p.partner.clone(),
                    score: p.score,
                    novel_for_pool: p.novel_for_pool,
                    novel_for_breeder: p.novel_for_breeder,
                })
                .collect(),
        }
    }
}

/// The assembled plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BreedingPlan {
    /// Options after normalization.
    pub options: PlanOptions,
    /// Top cohort first, then recommended partners in pick order.
    pub breeding_pool: Vec<PoolEntry>,
    pub top_cats: Vec<CatProfile>,
    /// Pool members that are not in the top cohort.
    pub additional_cats: Vec<CatProfile>,
    /// Everyone outside the pool, best current average first.
    pub general_population: Vec<GeneralEntry>,
    pub covered_mask: u8,
    /// One entry per top-cohort cat; empty when recommendations are disabled.
    pub partner_recommendations: Vec<BreederRecommendation>,
}

/// Render a seven mask as 7 binary digits, most significant bit first.
pub fn format_mask(mask: u8) -> String {
    format!("{:0width$b}", mask, width = STAT_COUNT)
}

/// Build a breeding plan for `cats` with `options`.
pub fn build_plan(cats: &[CatProfile], options: PlanOptions) -> BreedingPlan {
    let options = options.normalized();
    let active: Vec<CatProfile> = cats.iter().filter(|c| !c.retired).cloned().collect();

    let ranked = rank_eligible(&active, options.min_seven_count as u32);
    let (top, covered) = select_top_cohort(&ranked, options.top_count as usize);

    let mut state = CoverageState::new(covered);
    let recommendations = recommend_partners(
        &top,
        &active,
        options.partners_per_top as usize,
        &mut state,
    );

    // Pool order: cohort, then each partner the first time it was picked.
    let mut pool: Vec<&CatProfile> = top.clone();
    let mut partner_for: BTreeMap<u32, Vec<u32>> = BTreeMap::new();
    for rec in &recommendations {
        for pick in &rec.partners {
            let breeders = partner_for.entry(pick.partner.id).or_default();
            if !breeders.contains(&rec.breeder.id) {
                breeders.push(rec.breeder.id);
            }
            if !pool.iter().any(|c| c.id == pick.partner.id) {
                pool.push(pick.partner);
            }
        }
    }

    let pool_cats: Vec<CatProfile> = pool.iter().map(|&c| c.clone()).collect();
    let is_top = |id: u32| top.iter().any(|c| c.id == id);

    let breeding_pool = pool
        .iter()
        .map(|&cat| PoolEntry {
            cat: cat.clone(),
            seven_mask: format_mask(cat.seven_mask()),
            compatible_partners: compatible_count(cat, &pool_cats),
            reason: if is_top(cat.id) {
                PoolReason::TopPriority
            } else {
                PoolReason::PartnerFor(partner_for.get(&cat.id).cloned().unwrap_or_default())
            },
        })
        .collect();

    let additional_cats = pool
        .iter()
        .filter(|c| !is_top(c.id))
        .map(|&c| c.clone())
        .collect();

    let mut general: Vec<&CatProfile> = cats
        .iter()
        .filter(|c| !pool.iter().any(|p| p.id == c.id))
        .collect();
    general.sort_by(|a, b| {
        b.current_average()
            .total_cmp(&a.current_average())
            .then_with(|| b.id.cmp(&a.id))
    });
    let general_population = general
        .into_iter()
        .map(|cat| GeneralEntry {
            cat: cat.clone(),
            reason: GeneralReason::for_cat(cat),
        })
        .collect();

    BreedingPlan {
        options,
        breeding_pool,
        top_cats: top.iter().map(|&c| c.clone()).collect(),
        additional_cats,
        general_population,
        covered_mask: state.covered,
        partner_recommendations: recommendations.iter().map(BreederRecommendation::from).collect(),
    }
}

/// Column the breeding pool can be re-sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolSortKey {
    Name,
    BaseStat(Stat),
    SevenCount,
    CompatiblePartners,
    BaseAverage,
    CurrentAverage,
    Reason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl BreedingPlan {
    /// Stable re-sort of the breeding pool for display.
    pub fn sort_pool(&mut self, key: PoolSortKey, direction: SortDirection) {
        let compare = |a: &PoolEntry, b: &PoolEntry| -> Ordering {
            match key {
                PoolSortKey::Name => a.cat.name.cmp(&b.cat.name),
                PoolSortKey::BaseStat(stat) => a.cat.base.get(stat).cmp(&b.cat.base.get(stat)),
                PoolSortKey::SevenCount => a.cat.seven_count().cmp(&b.cat.seven_count()),
                PoolSortKey::CompatiblePartners => a.compatible_partners.cmp(&b.compatible_partners),
                PoolSortKey::BaseAverage => a.cat.base_average().total_cmp(&b.cat.base_average()),
                PoolSortKey::CurrentAverage => {
                    a.cat.current_average().total_cmp(&b.cat.current_average())
                }
                PoolSortKey::Reason => a.reason.to_string().cmp(&b.reason.to_string()),
            }
        };

        match direction {
            SortDirection::Ascending => self.breeding_pool.sort_by(compare),
            SortDirection::Descending => self.breeding_pool.sort_by(|a, b| compare(b, a)),
        }
    }

    pub fn pool_ids(&self) -> Vec<u32> {
        self.breeding_pool.iter().map(|e| e.cat.id).collect()
    }

    pub fn top_ids(&self) -> Vec<u32> {
        self.top_cats.iter().map(|c| c.id).collect()
    }
}
