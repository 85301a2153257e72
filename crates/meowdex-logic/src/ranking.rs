//! Eligibility and ranking — picks the top cohort.
//!
//! Cats with at least one natural seven (and at least `min_seven_count` of
//! them) are ranked by seven count, then by how many partners they have in
//! the active population, then by base average, then by id. Every key sorts
//! descending, so the order is total.

use std::cmp::Ordering;

use crate::cat::CatProfile;
use crate::compatibility::compatible_count;

/// A cat that passed the eligibility filter, with its compatible count.
#[derive(Debug, Clone)]
pub struct RankedCat<'a> {
    pub cat: &'a CatProfile,
    pub compatible: usize,
}

/// Descending comparison on the ranking keys.
pub fn ranking_order(a: &RankedCat<'_>, b: &RankedCat<'_>) -> Ordering {
    b.cat
        .seven_count()
        .cmp(&a.cat.seven_count())
        .then_with(|| b.compatible.cmp(&a.compatible))
        .then_with(|| b.cat.base_average().total_cmp(&a.cat.base_average()))
        .then_with(|| b.cat.id.cmp(&a.cat.id))
}

/// Eligible cats from `active`, best first.
pub fn rank_eligible(active: &[CatProfile], min_seven_count: u32) -> Vec<RankedCat<'_>> {
    let mut ranked: Vec<RankedCat<'_>> = active
        .iter()
        .filter(|cat| cat.has_natural_seven() && cat.seven_count() >= min_seven_count)
        .map(|cat| RankedCat {
            cat,
            compatible: compatible_count(cat, active),
        })
        .collect();
    ranked.sort_by(ranking_order);
    ranked
}

/// First `top_count` ranked cats and the union of their seven masks.
pub fn select_top_cohort<'a>(ranked: &[RankedCat<'a>], top_count: usize) -> (Vec<&'a CatProfile>, u8) {
    let top: Vec<&CatProfile> = ranked.iter().take(top_count).map(|r| r.cat).collect();
    let covered = top.iter().fold(0u8, |mask, cat| mask | cat.seven_mask());
    (top, covered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cat::{Gender, Orientation};

    fn cat(id: u32, base: [i32; 7]) -> CatProfile {
        CatProfile::new(format!("cat{id}"))
            .with_gender(Gender::Fluid, Orientation::Omni)
            .with_base(base)
            .with_id(id)
    }

    #[test]
    fn test_ineligible_filtered() {
        let roster = vec![
            cat(1, [7, 0, 0, 0, 0, 0, 0]),
            cat(2, [6, 6, 6, 6, 6, 6, 6]),
            cat(3, [7, 7, 0, 0, 0, 0, 0]),
        ];
        let ranked = rank_eligible(&roster, 0);
        let ids: Vec<u32> = ranked.iter().map(|r| r.cat.id).collect();
        assert_eq!(ids, vec![3, 1]);

        let ranked = rank_eligible(&roster, 2);
        let ids: Vec<u32> = ranked.iter().map(|r| r.cat.id).collect();
        assert_eq!(ids, vec![3]);
    }

    #[test]
    fn test_compatible_count_breaks_seven_ties() {
        let mut lonely = cat(1, [7, 0, 0, 0, 0, 0, 0]);
        lonely.gender = Gender::Fluid;
        lonely.orientation = Orientation::SameOnly;
        let popular = cat(2, [0, 7, 0, 0, 0, 0, 0]);
        let others = vec![
            cat(3, [0, 0, 0, 0, 0, 0, 0]).with_gender(Gender::Male, Orientation::Omni),
            cat(4, [0, 0, 0, 0, 0, 0, 0]).with_gender(Gender::Female, Orientation::Omni),
        ];
        let mut roster = vec![lonely, popular];
        roster.extend(others);

        let ranked = rank_eligible(&roster, 0);
        assert_eq!(ranked[0].cat.id, 2);
        assert_eq!(ranked[0].compatible, 3);
        assert_eq!(ranked[1].cat.id, 1);
        assert_eq!(ranked[1].compatible, 1);
    }

    #[test]
    fn test_base_average_then_id() {
        let roster = vec![
            cat(1, [7, 5, 5, 5, 5, 5, 5]),
            cat(2, [7, 1, 1, 1, 1, 1, 1]),
            cat(3, [7, 1, 1, 1, 1, 1, 1]),
        ];
        let ids: Vec<u32> = rank_eligible(&roster, 0).iter().map(|r| r.cat.id).collect();
        assert_eq!(ids, vec![1, 3, 2]);
    }

    #[test]
    fn test_top_cohort_mask() {
        let roster = vec![
            cat(1, [7, 0, 0, 0, 0, 0, 0]),
            cat(2, [0, 0, 7, 0, 0, 0, 0]),
            cat(3, [0, 0, 0, 0, 0, 0, 7]),
        ];
        let ranked = rank_eligible(&roster, 0);
        let (top, covered) = select_top_cohort(&ranked, 2);
        assert_eq!(top.len(), 2);
        let expected = top.iter().fold(0, |m, c| m | c.seven_mask());
        assert_eq!(covered, expected);

        let (all, _) = select_top_cohort(&ranked, 10);
        assert_eq!(all.len(), 3);
    }
}
