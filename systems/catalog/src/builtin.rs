//! Rules shipped with Autoscope.

use autoscope_core::{Conditions, CountRange, Neighborhood, Rule, Seed};

use crate::{Catalog, CatalogEntry};

use self::Start::{Random, Square};

#[derive(Clone, Copy)]
enum Mask {
    Moore,
    Box { radius: usize, include_center: bool },
}

#[derive(Clone, Copy)]
enum Counts {
    Discrete(&'static [u32]),
    Range(u32, u32),
}

#[derive(Clone, Copy)]
enum Start {
    Random(f64),
    Square(usize),
}

struct Preset {
    name: &'static str,
    mask: Mask,
    survival: Counts,
    birth: Counts,
    seeds: &'static [Start],
}

const fn life(
    name: &'static str,
    survival: &'static [u32],
    birth: &'static [u32],
    seeds: &'static [Start],
) -> Preset {
    Preset {
        name,
        mask: Mask::Moore,
        survival: Counts::Discrete(survival),
        birth: Counts::Discrete(birth),
        seeds,
    }
}

const fn larger(
    name: &'static str,
    radius: usize,
    include_center: bool,
    survival: (u32, u32),
    birth: (u32, u32),
    seeds: &'static [Start],
) -> Preset {
    Preset {
        name,
        mask: Mask::Box {
            radius,
            include_center,
        },
        survival: Counts::Range(survival.0, survival.1),
        birth: Counts::Range(birth.0, birth.1),
        seeds,
    }
}

const PRESETS: &[Preset] = &[
    life("amoeba", &[1, 3, 5, 8], &[3, 5, 7], &[Random(0.15)]),
    life("anneal", &[3, 5, 6, 7, 8], &[4, 6, 7, 8], &[Random(0.50)]),
    life("assimilation", &[4, 5, 6, 7], &[3, 4, 5], &[Random(0.17)]),
    life("coagulations", &[2, 3, 5, 6, 7, 8], &[3, 7, 8], &[Random(0.06)]),
    life("conway", &[2, 3], &[3], &[Random(0.5)]),
    life("coral", &[4, 5, 6, 7, 8], &[3], &[Random(0.3)]),
    life("day_and_night", &[3, 4, 6, 7, 8], &[3, 6, 7, 8], &[Random(0.5)]),
    life("diamoeba", &[5, 6, 7, 8], &[3, 5, 6, 7, 8], &[Random(0.48)]),
    life("flakes", &[0, 1, 2, 3, 4, 5, 6, 7, 8], &[3], &[Square(30)]),
    life(
        "gnarl",
        &[1],
        &[1],
        &[Square(1), Square(2), Square(4), Square(5)],
    ),
    life("high_life", &[2, 3], &[3, 6], &[Random(0.5)]),
    life(
        "inverse_life",
        &[3, 4, 6, 7, 8],
        &[0, 1, 2, 3, 4, 7, 8],
        &[Random(0.5)],
    ),
    life("long_life", &[5], &[3, 4, 5], &[Random(0.2)]),
    life(
        "maze",
        &[1, 2, 3, 4, 5],
        &[3],
        &[
            Random(0.03),
            Square(7),
            Square(8),
            Square(9),
            Square(10),
            Square(64),
        ],
    ),
    life("move", &[2, 4, 5], &[3, 6, 8], &[Random(0.5)]),
    life("pseudo_life", &[2, 3, 8], &[3, 5, 7], &[Random(0.5)]),
    life("replicator", &[1, 3, 5, 7], &[1, 3, 5, 7], &[Square(1)]),
    life("seeds", &[], &[2], &[Square(2)]),
    life("serviettes", &[], &[2, 3, 4], &[Square(2)]),
    life(
        "stains",
        &[2, 3, 5, 6, 7, 8],
        &[3, 6, 7, 8],
        &[Random(0.05), Square(7)],
    ),
    life("two_by_two", &[1, 2, 5], &[3, 6], &[Random(0.5)]),
    life(
        "walled_cities",
        &[2, 3, 4, 5],
        &[4, 5, 6, 7, 8],
        &[Random(0.2), Square(62)],
    ),
    larger("bugs", 5, true, (34, 58), (34, 45), &[Random(0.5)]),
    larger("bugs_movie", 10, true, (123, 212), (123, 170), &[Random(0.5)]),
    larger(
        "globe",
        8,
        false,
        (163, 223),
        (74, 252),
        &[Square(35), Square(40), Square(45)],
    ),
    larger("majority", 4, true, (41, 81), (41, 81), &[Random(0.5)]),
    larger("majorly", 7, true, (113, 225), (113, 225), &[Random(0.5)]),
    larger("waffle", 7, true, (100, 200), (75, 170), &[Square(18)]),
    life("34_life", &[1, 2, 5], &[3, 6], &[Random(0.1)]),
    larger("ltl59999", 5, true, (9, 9), (9, 9), &[Random(0.05)]),
    larger("ltl534473460", 5, true, (34, 60), (34, 47), &[Random(0.5)]),
    larger("ltl534413458", 5, true, (34, 58), (34, 41), &[Random(0.5)]),
];

pub(crate) fn catalog() -> Catalog {
    let entries = PRESETS
        .iter()
        .map(|preset| {
            let rule = Rule::new(
                preset.name,
                preset.mask.neighborhood(),
                preset.survival.conditions(),
                preset.birth.conditions(),
            );
            let seeds = preset.seeds.iter().map(|start| start.seed()).collect();
            CatalogEntry::new(rule, seeds).expect("builtin presets list seeds")
        })
        .collect();
    Catalog::new(entries).expect("builtin preset names are unique")
}

impl Mask {
    fn neighborhood(self) -> Neighborhood {
        match self {
            Self::Moore => Neighborhood::moore(),
            Self::Box {
                radius,
                include_center,
            } => Neighborhood::square(radius, include_center),
        }
    }
}

impl Counts {
    fn conditions(self) -> Conditions {
        match self {
            Self::Discrete(counts) => Conditions::counts(counts),
            Self::Range(lo, hi) => Conditions::range(
                CountRange::new(lo, hi).expect("builtin ranges are ordered"),
            ),
        }
    }
}

impl Start {
    fn seed(self) -> Seed {
        match self {
            Self::Random(density) => {
                Seed::random(density).expect("builtin densities lie within [0, 1]")
            }
            Self::Square(side) => Seed::square(side),
        }
    }
}
