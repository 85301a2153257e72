//! Integration tests for the breeding plan pipeline.
//!
//! Exercises: roster → ranking → top cohort → partner recommendation
//! → breeding pool → general population.
//!
//! All tests are pure logic — no storage, no rendering.

use meowdex_logic::cat::{CatProfile, Gender, Orientation};
use meowdex_logic::compatibility::can_pair;
use meowdex_logic::constants::FULL_MASK;
use meowdex_logic::plan::{build_plan, PlanOptions, PoolReason};

// ── Helpers ────────────────────────────────────────────────────────────

fn cat(id: u32, base: [i32; 7]) -> CatProfile {
    CatProfile::new(format!("cat{id}"))
        .with_gender(Gender::Fluid, Orientation::Omni)
        .with_base(base)
        .with_current([50; 7])
        .with_id(id)
}

/// Cats 1 and 3 carry stat 0, cats 2 and 4 carry stat 1, cat 5 has none.
/// Cats 1 and 3 have the stronger base averages.
fn five_cat_roster() -> Vec<CatProfile> {
    vec![
        cat(1, [7, 0, 5, 5, 5, 5, 5]),
        cat(2, [0, 7, 1, 1, 1, 1, 1]),
        cat(3, [7, 0, 5, 5, 5, 5, 5]),
        cat(4, [0, 7, 2, 2, 2, 2, 2]),
        cat(5, [3, 3, 3, 3, 3, 3, 3]),
    ]
}

/// Deterministic mixed roster with varied genders and orientations.
fn mixed_roster(n: u32) -> Vec<CatProfile> {
    let genders = Gender::all();
    let orientations = Orientation::all();
    (1..=n)
        .map(|id| {
            let mut base = [0i32; 7];
            for (i, slot) in base.iter_mut().enumerate() {
                let v = (id as usize * 31 + i * 17) % 11;
                *slot = if v >= 8 { 7 } else { v as i32 % 7 };
            }
            CatProfile::new(format!("mix{id}"))
                .with_gender(
                    genders[id as usize % genders.len()],
                    orientations[(id as usize / 3) % orientations.len()],
                )
                .with_base(base)
                .with_current([(id % 90) as i32; 7])
                .with_id(id)
        })
        .collect()
}

// ── Scenarios ──────────────────────────────────────────────────────────

#[test]
fn top_cohort_and_novel_partner() {
    let roster = five_cat_roster();
    let plan = build_plan(&roster, PlanOptions::new(2, 1, 1));

    assert_eq!(plan.top_ids(), vec![3, 1]);

    // Each breeder prefers a cat exposing stat 1 over an already-covered stat 0.
    for rec in &plan.partner_recommendations {
        let partner = &rec.partners[0].partner;
        assert!(
            partner.id == 2 || partner.id == 4,
            "breeder {} got partner {}",
            rec.breeder.id,
            partner.id
        );
    }
    let first = &plan.partner_recommendations[0].partners[0];
    assert_eq!(first.partner.id, 4, "higher base average wins the tie");
    assert_eq!(first.novel_for_pool, 0b10);
    assert_eq!(first.novel_for_breeder, 0b10);

    assert_eq!(plan.covered_mask, 0b11);
}

#[test]
fn second_breeder_avoids_reused_partner() {
    let roster = five_cat_roster();
    let plan = build_plan(&roster, PlanOptions::new(2, 1, 1));

    // After cat 4 is picked, stat 1 is covered; cat 2 now scores
    // 2 + 0.5 + avg vs cat 4's same minus the reuse penalty.
    let second = &plan.partner_recommendations[1].partners[0];
    assert_eq!(second.partner.id, 2);
    assert_eq!(second.novel_for_pool, 0);
    assert_eq!(plan.pool_ids(), vec![3, 1, 4, 2]);
    assert_eq!(
        plan.breeding_pool[2].reason,
        PoolReason::PartnerFor(vec![3])
    );
    assert_eq!(
        plan.breeding_pool[3].reason,
        PoolReason::PartnerFor(vec![1])
    );
    assert_eq!(plan.general_population.len(), 1);
    assert_eq!(plan.general_population[0].cat.id, 5);
}

#[test]
fn zero_partners_pool_is_cohort() {
    let roster = five_cat_roster();
    let plan = build_plan(&roster, PlanOptions::new(2, 0, 1));

    assert!(plan.partner_recommendations.is_empty());
    assert_eq!(plan.pool_ids(), plan.top_ids());
    assert!(plan.additional_cats.is_empty());
    assert_eq!(plan.covered_mask, 0b01);
}

#[test]
fn options_are_clamped() {
    let roster = five_cat_roster();
    let plan = build_plan(&roster, PlanOptions::new(-5, -1, -2));
    assert_eq!(plan.options, PlanOptions::new(1, 0, 0));
    assert_eq!(plan.top_cats.len(), 1);
}

#[test]
fn retired_cats_never_breed() {
    let mut roster = five_cat_roster();
    roster.push(cat(6, [7, 7, 7, 7, 7, 7, 7]).with_retired(true));
    let plan = build_plan(&roster, PlanOptions::new(3, 2, 0));

    assert!(!plan.pool_ids().contains(&6));
    for rec in &plan.partner_recommendations {
        assert!(rec.partners.iter().all(|p| p.partner.id != 6));
    }
    let retired = plan
        .general_population
        .iter()
        .find(|e| e.cat.id == 6)
        .expect("retired cat listed");
    assert_eq!(retired.reason.to_string(), "Retired");
}

#[test]
fn huge_options_are_bounded_by_the_roster() {
    let roster = five_cat_roster();
    let plan = build_plan(&roster, PlanOptions::new(i32::MAX, i32::MAX, 0));

    assert_eq!(plan.options, PlanOptions::new(i32::MAX, i32::MAX, 0));
    assert!(plan.top_cats.len() <= roster.len());
    for rec in &plan.partner_recommendations {
        assert!(rec.partners.len() < roster.len());
    }

    let mut ids = plan.pool_ids();
    ids.extend(plan.general_population.iter().map(|e| e.cat.id));
    ids.sort_unstable();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
}

#[test]
fn cohort_member_picked_as_partner_stays_top_priority() {
    let roster = vec![
        cat(1, [7, 0, 1, 1, 1, 1, 1]),
        cat(2, [0, 7, 1, 1, 1, 1, 1]),
        cat(3, [3, 3, 3, 3, 3, 3, 3]),
    ];
    let plan = build_plan(&roster, PlanOptions::new(2, 1, 1));

    let mut top = plan.top_ids();
    top.sort_unstable();
    assert_eq!(top, vec![1, 2]);

    // Each breeder's best partner is the other cohort member.
    for rec in &plan.partner_recommendations {
        let partner = rec.partners[0].partner.id;
        assert!(partner == 1 || partner == 2);
        assert_ne!(partner, rec.breeder.id);
    }

    assert_eq!(plan.pool_ids().len(), 2, "no duplicate pool entries");
    assert!(plan
        .breeding_pool
        .iter()
        .all(|e| e.reason == PoolReason::TopPriority));
    assert!(plan.additional_cats.is_empty());
    assert_eq!(plan.general_population.len(), 1);
    assert_eq!(plan.general_population[0].cat.id, 3);
}

// ── Invariants over a mixed roster ─────────────────────────────────────

#[test]
fn partners_always_compatible_and_distinct_per_breeder() {
    let roster = mixed_roster(40);
    let plan = build_plan(&roster, PlanOptions::new(5, 3, 1));

    for rec in &plan.partner_recommendations {
        let mut seen = Vec::new();
        for pick in &rec.partners {
            assert!(can_pair(&rec.breeder, &pick.partner));
            assert!(pick.score > 0.0);
            assert!(!seen.contains(&pick.partner.id), "duplicate partner");
            seen.push(pick.partner.id);
        }
        assert!(rec.partners.len() <= 3);
    }
}

#[test]
fn coverage_is_monotonic() {
    let roster = mixed_roster(40);
    let plan = build_plan(&roster, PlanOptions::new(4, 2, 0));

    let mut covered = plan.top_cats.iter().fold(0u8, |m, c| m | c.seven_mask());
    for rec in &plan.partner_recommendations {
        for pick in &rec.partners {
            let before = covered;
            covered |= pick.partner.seven_mask();
            assert_eq!(covered & before, before);
            assert_eq!(pick.novel_for_pool, pick.partner.seven_mask() & !before & FULL_MASK);
        }
    }
    assert_eq!(covered, plan.covered_mask);
}

#[test]
fn every_cat_lands_in_exactly_one_bucket() {
    let roster = mixed_roster(30);
    let plan = build_plan(&roster, PlanOptions::default());

    let mut ids: Vec<u32> = plan.pool_ids();
    ids.extend(plan.general_population.iter().map(|e| e.cat.id));
    ids.sort_unstable();
    let expected: Vec<u32> = (1..=30).collect();
    assert_eq!(ids, expected);

    let averages: Vec<f64> = plan
        .general_population
        .iter()
        .map(|e| e.cat.current_average())
        .collect();
    assert!(averages.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn deterministic_output() {
    let roster = mixed_roster(25);
    let a = build_plan(&roster, PlanOptions::new(3, 2, 0));
    let b = build_plan(&roster, PlanOptions::new(3, 2, 0));
    assert_eq!(a.pool_ids(), b.pool_ids());
    assert_eq!(a.covered_mask, b.covered_mask);
}
