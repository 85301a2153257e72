//! Pairing compatibility — who may be paired with whom.
//!
//! Attraction is looked up per (own gender, orientation) and must hold in
//! both directions. The table is deliberately not a general symmetric
//! relation: a `Fluid` cat is attracted only to `Fluid` under `SameOnly`,
//! and to everything except `Fluid` under `OppositeOnly`.

use crate::cat::{CatProfile, Gender, Orientation};

/// Whether a cat of `gender` with `orientation` is attracted to `target`.
pub fn attracted_to(gender: Gender, orientation: Orientation, target: Gender) -> bool {
    use Gender::*;

    match orientation {
        Orientation::Omni => true,
        Orientation::OppositeOnly => match gender {
            Male => matches!(target, Female | Fluid),
            Female => matches!(target, Male | Fluid),
            Fluid => matches!(target, Male | Female),
        },
        Orientation::SameOnly => match gender {
            Male => matches!(target, Male | Fluid),
            Female => matches!(target, Female | Fluid),
            Fluid => target == Fluid,
        },
    }
}

/// Two distinct cats that are mutually attracted.
pub fn can_pair(a: &CatProfile, b: &CatProfile) -> bool {
    a.id != b.id
        && attracted_to(a.gender, a.orientation, b.gender)
        && attracted_to(b.gender, b.orientation, a.gender)
}

/// Number of other cats in `population` that `cat` can pair with.
pub fn compatible_count(cat: &CatProfile, population: &[CatProfile]) -> usize {
    population
        .iter()
        .filter(|other| other.id != cat.id && can_pair(cat, other))
        .count()
}
