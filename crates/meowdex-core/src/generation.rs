//! Random roster generation for the harness and benchmarks.

use meowdex_logic::cat::{CatProfile, Gender, Orientation, Stat};
use meowdex_logic::constants::limits;
use rand::Rng;

/// Generate a random name
pub fn generate_name(rng: &mut impl Rng) -> String {
    let first = FIRST_PARTS[rng.gen_range(0..FIRST_PARTS.len())];
    let second = SECOND_PARTS[rng.gen_range(0..SECOND_PARTS.len())];
    format!("{first}{second}")
}

/// One random cat. Roughly one base stat in five is a natural seven.
pub fn generate_cat(rng: &mut impl Rng) -> CatProfile {
    let gender = Gender::all()[rng.gen_range(0..Gender::all().len())];
    let orientation = match rng.gen_range(0..100) {
        0..=49 => Orientation::Omni,
        50..=79 => Orientation::OppositeOnly,
        _ => Orientation::SameOnly,
    };

    let mut cat = CatProfile::new(generate_name(rng)).with_gender(gender, orientation);
    for &stat in Stat::all() {
        let base = if rng.gen_bool(0.2) {
            limits::BASE_MAX
        } else {
            rng.gen_range(limits::BASE_MIN..limits::BASE_MAX)
        };
        cat.base.set(stat, base);
        cat.current
            .set(stat, rng.gen_range(limits::CURRENT_MIN..=limits::CURRENT_MAX));
    }
    cat.retired = rng.gen_bool(0.1);
    cat
}

/// `count` random cats with ids `1..=count`.
pub fn generate_roster(count: u32, rng: &mut impl Rng) -> Vec<CatProfile> {
    (1..=count).map(|id| generate_cat(rng).with_id(id)).collect()
}

static FIRST_PARTS: &[&str] = &[
    "Whisk", "Mitt", "Shad", "Pep", "Bis", "Sock", "Tig", "Mar", "Clo", "Gin", "Pud", "Noo",
];

static SECOND_PARTS: &[&str] = &[
    "ers", "ens", "ow", "per", "cuit", "ks", "ger", "mel", "ver", "gle", "ding", "dle",
];
