//! Meowdex Headless Harness
//!
//! Validates roster logic and storage without any front-end.
//! Runs entirely in-process; the store writes to a scratch directory.
//!
//! Usage:
//!   cargo run -p meowdex-simtest
//!   cargo run -p meowdex-simtest -- --verbose
//!   cargo run -p meowdex-simtest -- --json

use meowdex_core::generation::generate_roster;
use meowdex_core::roster::RosterStore;
use meowdex_core::settings::SettingsStore;
use meowdex_logic::cat::{CatProfile, Gender, Orientation};
use meowdex_logic::compatibility::{attracted_to, can_pair};
use meowdex_logic::constants::FULL_MASK;
use meowdex_logic::dashboard::{adventuring_team, DashboardSummary, StatChoice};
use meowdex_logic::import::parse_import;
use meowdex_logic::plan::{build_plan, format_mask, BreedingPlan, PlanOptions};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

// ── Test harness ────────────────────────────────────────────────────────

#[derive(Serialize)]
struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn check(name: &str, passed: bool, detail: impl Into<String>) -> TestResult {
    TestResult {
        name: name.into(),
        passed,
        detail: detail.into(),
    }
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    let json = std::env::args().any(|a| a == "--json");
    if !json {
        println!("=== Meowdex Harness ===\n");
    }

    let mut results = Vec::new();

    // 1. Pairing table
    results.extend(validate_pairing(verbose && !json));

    // 2. Plan invariants over generated rosters
    results.extend(validate_plan_invariants(verbose && !json));

    // 3. Bulk import parsing
    results.extend(validate_import(verbose && !json));

    // 4. Store + settings round trip
    results.extend(validate_store(verbose && !json));

    if json {
        match serde_json::to_string_pretty(&results) {
            Ok(text) => println!("{text}"),
            Err(e) => eprintln!("failed to render results: {e}"),
        }
    }

    // ── Summary ──
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.len() - passed;

    if !json {
        println!();
        for r in &results {
            let icon = if r.passed { "✓" } else { "✗" };
            if !r.passed || verbose {
                println!("  {} {}: {}", icon, r.name, r.detail);
            }
        }
        println!(
            "\n=== RESULT: {}/{} passed, {} failed ===",
            passed,
            results.len(),
            failed
        );
    }

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Pairing ──────────────────────────────────────────────────────────

fn validate_pairing(verbose: bool) -> Vec<TestResult> {
    println_if(verbose, "--- Pairing ---");
    let mut results = Vec::new();

    let mut asymmetric = Vec::new();
    let mut pairs = 0;
    for &ga in Gender::all() {
        for &oa in Orientation::all() {
            for &gb in Gender::all() {
                for &ob in Orientation::all() {
                    let a = CatProfile::new("a").with_gender(ga, oa).with_id(1);
                    let b = CatProfile::new("b").with_gender(gb, ob).with_id(2);
                    if can_pair(&a, &b) != can_pair(&b, &a) {
                        asymmetric.push(format!("{ga:?}/{oa:?}-{gb:?}/{ob:?}"));
                    }
                    if can_pair(&a, &b) {
                        pairs += 1;
                    }
                }
            }
        }
    }
    results.push(check(
        "pairing_symmetric",
        asymmetric.is_empty(),
        if asymmetric.is_empty() {
            format!("81 combinations symmetric, {pairs} compatible")
        } else {
            format!("asymmetric: {}", asymmetric.join(", "))
        },
    ));

    results.push(check(
        "fluid_same_only_self_attracted",
        attracted_to(Gender::Fluid, Orientation::SameOnly, Gender::Fluid)
            && !attracted_to(Gender::Fluid, Orientation::SameOnly, Gender::Male),
        "fluid same-only likes fluid only",
    ));
    results.push(check(
        "fluid_opposite_only_excludes_fluid",
        !attracted_to(Gender::Fluid, Orientation::OppositeOnly, Gender::Fluid),
        "fluid opposite-only rejects fluid",
    ));

    let solo = CatProfile::new("solo").with_id(3);
    results.push(check(
        "pairing_self_rejected",
        !can_pair(&solo, &solo),
        "a cat never pairs with itself",
    ));

    results
}

// ── 2. Plan invariants ──────────────────────────────────────────────────

fn plan_violations(cats: &[CatProfile], plan: &BreedingPlan) -> Vec<String> {
    let mut problems = Vec::new();

    let mut covered = plan.top_cats.iter().fold(0u8, |m, c| m | c.seven_mask());
    for rec in &plan.partner_recommendations {
        let mut seen = Vec::new();
        for pick in &rec.partners {
            if !can_pair(&rec.breeder, &pick.partner) {
                problems.push(format!(
                    "#{} paired with incompatible #{}",
                    rec.breeder.id, pick.partner.id
                ));
            }
            if seen.contains(&pick.partner.id) {
                problems.push(format!("#{} got #{} twice", rec.breeder.id, pick.partner.id));
            }
            seen.push(pick.partner.id);
            let next = covered | pick.partner.seven_mask();
            if next & covered != covered {
                problems.push("coverage decreased".into());
            }
            covered = next;
        }
    }
    if covered != plan.covered_mask {
        problems.push(format!(
            "covered mask {} != replayed {}",
            format_mask(plan.covered_mask),
            format_mask(covered)
        ));
    }
    if plan.breeding_pool.len() + plan.general_population.len() != cats.len() {
        problems.push("pool + general != roster".into());
    }
    if plan.breeding_pool.iter().any(|e| e.cat.retired) {
        problems.push("retired cat in pool".into());
    }
    problems
}

fn validate_plan_invariants(verbose: bool) -> Vec<TestResult> {
    println_if(verbose, "--- Plan invariants ---");
    let mut results = Vec::new();

    let option_sweep = [
        PlanOptions::default(),
        PlanOptions::new(1, 0, 0),
        PlanOptions::new(5, 3, 1),
        PlanOptions::new(10, 2, 2),
        PlanOptions::new(0, -1, -1),
    ];

    let mut failures = Vec::new();
    let mut runs = 0;
    let mut best_coverage = 0;
    for seed in 0..25u64 {
        let cats = generate_roster(20 + seed as u32 * 4, &mut StdRng::seed_from_u64(seed));
        for &options in &option_sweep {
            let plan = build_plan(&cats, options);
            runs += 1;
            best_coverage = best_coverage.max(plan.covered_mask.count_ones());
            for p in plan_violations(&cats, &plan) {
                failures.push(format!("seed {seed} {options:?}: {p}"));
            }
            if options.normalized().partners_per_top == 0 && !plan.partner_recommendations.is_empty()
            {
                failures.push(format!("seed {seed}: recommendations with zero partners"));
            }
        }
    }
    results.push(check(
        "plan_invariants",
        failures.is_empty(),
        if failures.is_empty() {
            format!("{runs} plans clean, best coverage {best_coverage}/7")
        } else {
            format!("{} violations, first: {}", failures.len(), failures[0])
        },
    ));

    let cats = generate_roster(80, &mut StdRng::seed_from_u64(99));
    let plan = build_plan(&cats, PlanOptions::new(4, 2, 1));
    let summary = DashboardSummary::build(&cats, &plan);
    println_if(
        verbose,
        &format!(
            "  pool {} / general {} / {} / next: {}",
            plan.breeding_pool.len(),
            plan.general_population.len(),
            summary.coverage_line(),
            summary.next_action
        ),
    );
    results.push(check(
        "dashboard_coverage",
        summary.covered_stats == plan.covered_mask.count_ones()
            && (summary.missing.is_empty() == (plan.covered_mask == FULL_MASK)),
        summary.coverage_line(),
    ));

    let team = adventuring_team(&plan, &[StatChoice::None; 4], true);
    let filled: Vec<u32> = team.iter().filter_map(|s| s.cat.as_ref().map(|c| c.id)).collect();
    let mut unique = filled.clone();
    unique.sort_unstable();
    unique.dedup();
    results.push(check(
        "adventuring_team_unique",
        unique.len() == filled.len() && !plan.pool_ids().iter().any(|id| filled.contains(id)),
        format!("{} rows filled", filled.len()),
    ));

    results
}

// ── 3. Import ───────────────────────────────────────────────────────────

fn validate_import(verbose: bool) -> Vec<TestResult> {
    println_if(verbose, "--- Import ---");
    let mut results = Vec::new();

    let good = "Nibbles\tno\t30\t7\t25\t4\t40\t3\t12\t2\t18\t5\t22\t6\t9\t1";
    let short = "Broken\tno\t30\t7\t25\t4\t40\t3\t12\t2\t18\t5\t22\t6\t9";
    let bad_num = "Typo\tyes\t30\t7\t2x\t4\t40\t3\t12\t2\t18\t5\t22\t6\t9\t1";
    let text = format!("{good}\n\n{short}\n{bad_num}\n");

    let batch = parse_import(&text);
    let messages: Vec<String> = batch.errors.iter().map(ToString::to_string).collect();
    results.push(check(
        "import_line_errors",
        batch.rows.len() == 1
            && messages
                == vec![
                    "Line 2: expected 16 tab-separated columns, got 15.".to_string(),
                    "Line 3: invalid number '2x' at column 5.".to_string(),
                ],
        format!("{} parsed, errors: {}", batch.rows.len(), messages.join(" | ")),
    ));

    results
}

// ── 4. Store ────────────────────────────────────────────────────────────

fn validate_store(verbose: bool) -> Vec<TestResult> {
    println_if(verbose, "--- Store ---");
    let mut results = Vec::new();

    let scratch = match tempfile::Builder::new().prefix("meowdex-simtest-").tempdir() {
        Ok(dir) => dir,
        Err(e) => {
            results.push(check("store_scratch_dir", false, e.to_string()));
            return results;
        }
    };

    match run_store_checks(scratch.path()) {
        Ok(mut checks) => results.append(&mut checks),
        Err(e) => results.push(check("store_io", false, e.to_string())),
    }

    let root = scratch.path().to_path_buf();
    if let Err(e) = scratch.close() {
        eprintln!("warning: could not remove {}: {e}", root.display());
    }
    results
}

fn run_store_checks(
    root: &std::path::Path,
) -> Result<Vec<TestResult>, meowdex_core::error::StoreError> {
    let mut results = Vec::new();

    let settings = SettingsStore::new(root).apply(2, PlanOptions::new(3, 2, 0))?;
    let store = RosterStore::new(root);
    store.set_active_profile(settings.active_profile);

    let created = store.add_many(generate_roster(30, &mut StdRng::seed_from_u64(5)))?;
    let ids: Vec<u32> = created.iter().map(|c| c.id).collect();
    results.push(check(
        "store_sequential_ids",
        ids == (1..=30).collect::<Vec<_>>(),
        format!("{} cats added on profile {}", ids.len(), store.active_profile()),
    ));

    let listed = store.list()?;
    results.push(check(
        "store_list_newest_first",
        listed.windows(2).all(|w| w[0].id > w[1].id),
        format!("{} cats listed", listed.len()),
    ));

    let updated = store.update(CatProfile::new("ghost").with_id(999))?;
    results.push(check(
        "store_update_missing_false",
        !updated,
        "update of unknown id returns false",
    ));

    let line = "Dup\tno\t1\t7\t1\t1\t1\t1\t1\t1\t1\t1\t1\t1\t1\t1";
    let summary = store.import_text(&format!("{line}\n{line}\n"))?;
    results.push(check(
        "store_import_dedupe",
        summary.imported == 1 && summary.skipped_duplicates == 1,
        format!(
            "{} imported, {} duplicates",
            summary.imported, summary.skipped_duplicates
        ),
    ));

    let reloaded = SettingsStore::new(root).load()?;
    let plan = build_plan(&store.list()?, reloaded.active_options());
    results.push(check(
        "store_plan_from_settings",
        plan.options == PlanOptions::new(3, 2, 0),
        format!("{} in pool", plan.breeding_pool.len()),
    ));

    Ok(results)
}

fn println_if(verbose: bool, text: &str) {
    if verbose {
        println!("{text}");
    }
}
