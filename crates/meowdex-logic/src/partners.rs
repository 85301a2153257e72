//! Partner recommendation — greedy coverage maximization.
//!
//! For each top-cohort breeder, in cohort order, partners are picked one at a
//! time. Each candidate is scored by how many stat bits it would add to the
//! pool's coverage and to the breeder, plus small bonuses for its own sevens
//! and base average, minus a penalty for every earlier pick of the same cat.
//!
//! Coverage and reuse counts are carried in a [`CoverageState`] accumulator
//! that is threaded through the loop and shared by all breeders of one plan.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::cat::CatProfile;
use crate::compatibility::can_pair;
use crate::constants::{partner_weights, FULL_MASK};

/// Running coverage state for one plan.
#[derive(Debug, Clone, Default)]
pub struct CoverageState {
    /// Union of every seven mask selected so far.
    pub covered: u8,
    /// Times each cat id has been picked as anyone's partner.
    reuse: HashMap<u32, u32>,
}

impl CoverageState {
    pub fn new(covered: u8) -> Self {
        Self {
            covered,
            reuse: HashMap::new(),
        }
    }

    pub fn reuse_count(&self, id: u32) -> u32 {
        self.reuse.get(&id).copied().unwrap_or(0)
    }

    fn record(&mut self, partner: &CatProfile) {
        self.covered |= partner.seven_mask();
        *self.reuse.entry(partner.id).or_insert(0) += 1;
    }
}

/// One scored candidate.
#[derive(Debug, Clone, Copy)]
pub struct PartnerScore {
    pub score: f64,
    /// Partner bits not yet in the pool's coverage.
    pub novel_for_pool: u8,
    /// Partner bits the breeder lacks.
    pub novel_for_breeder: u8,
}

/// Score `candidate` as a partner for `breeder`. `None` when they cannot pair.
pub fn score_partner(
    breeder: &CatProfile,
    candidate: &CatProfile,
    state: &CoverageState,
) -> Option<PartnerScore> {
    if !can_pair(breeder, candidate) {
        return None;
    }

    let mask = candidate.seven_mask();
    let novel_for_pool = mask & !state.covered & FULL_MASK;
    let novel_for_breeder = mask & !breeder.seven_mask() & FULL_MASK;

    let score = partner_weights::NOVEL_FOR_POOL * novel_for_pool.count_ones() as f64
        + partner_weights::NOVEL_FOR_BREEDER * novel_for_breeder.count_ones() as f64
        + partner_weights::SEVEN_COUNT * candidate.seven_count() as f64
        + partner_weights::BASE_AVERAGE * (candidate.base_average() / 7.0)
        - partner_weights::REUSE_PENALTY * state.reuse_count(candidate.id) as f64;

    Some(PartnerScore {
        score,
        novel_for_pool,
        novel_for_breeder,
    })
}

/// A partner chosen for a breeder.
#[derive(Debug, Clone)]
pub struct PartnerPick<'a> {
    pub partner: &'a CatProfile,
    pub score: f64,
    pub novel_for_pool: u8,
    pub novel_for_breeder: u8,
}

/// All partners chosen for one breeder, best pick first.
#[derive(Debug, Clone)]
pub struct BreederPartners<'a> {
    pub breeder: &'a CatProfile,
    pub partners: Vec<PartnerPick<'a>>,
}

/// Descending order on (score, seven count, base average, id).
fn candidate_order(a: (&CatProfile, f64), b: (&CatProfile, f64)) -> Ordering {
    a.1.total_cmp(&b.1)
        .then_with(|| a.0.seven_count().cmp(&b.0.seven_count()))
        .then_with(|| a.0.base_average().total_cmp(&b.0.base_average()))
        .then_with(|| a.0.id.cmp(&b.0.id))
}

/// Best positive-scoring candidate for `breeder`, skipping `taken` ids.
fn best_candidate<'a>(
    breeder: &CatProfile,
    candidates: &'a [CatProfile],
    taken: &[u32],
    state: &CoverageState,
) -> Option<(&'a CatProfile, PartnerScore)> {
    candidates
        .iter()
        .filter(|c| c.id != breeder.id && !taken.contains(&c.id))
        .filter_map(|c| score_partner(breeder, c, state).map(|s| (c, s)))
        .filter(|(_, s)| s.score > 0.0)
        .max_by(|(ca, sa), (cb, sb)| candidate_order((*ca, sa.score), (*cb, sb.score)))
}

/// Greedily choose up to `per_breeder` partners for every breeder.
///
/// `state` starts with the top cohort's coverage and is updated after every
/// pick, so later breeders see the coverage earlier picks produced. A breeder
/// stops early when no candidate scores above zero.
pub fn recommend_partners<'a>(
    breeders: &[&'a CatProfile],
    candidates: &'a [CatProfile],
    per_breeder: usize,
    state: &mut CoverageState,
) -> Vec<BreederPartners<'a>> {
    if per_breeder == 0 || breeders.is_empty() {
        return Vec::new();
    }

    let mut out = Vec::with_capacity(breeders.len());
    for &breeder in breeders {
        let mut taken: Vec<u32> = Vec::new();
        let mut partners = Vec::new();

        while partners.len() < per_breeder {
            let Some((partner, scored)) = best_candidate(breeder, candidates, &taken, state) else {
                break;
            };

            state.record(partner);
            taken.push(partner.id);
            partners.push(PartnerPick {
                partner,
                score: scored.score,
                novel_for_pool: scored.novel_for_pool,
                novel_for_breeder: scored.novel_for_breeder,
            });
        }

        out.push(BreederPartners { breeder, partners });
    }
    out
}
