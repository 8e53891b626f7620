use autoscope_core::{
    Board, BoardShape, Command, Conditions, ConstructionError, CountRange, Event, Neighborhood,
    Rule, Seed,
};
use autoscope_system_convolution::direct_neighbor_counts;
use autoscope_world::{self as world, query, Config, Simulation};

fn shape(height: usize, width: usize) -> BoardShape {
    BoardShape::new(height, width).expect("valid shape")
}

fn board_with(shape: BoardShape, alive: &[(usize, usize)]) -> Board {
    Board::from_fn(shape, |row, column| alive.contains(&(row, column)))
}

fn simulation_with(rule: Rule, board: Board) -> Simulation {
    Simulation::from_board(rule, board, Config::default()).expect("valid simulation")
}

#[test]
fn conway_blinker_oscillates_with_period_two() {
    let shape = shape(6, 6);
    let horizontal = board_with(shape, &[(2, 1), (2, 2), (2, 3)]);
    let vertical = board_with(shape, &[(1, 2), (2, 2), (3, 2)]);
    let mut simulation = simulation_with(Rule::conway(), horizontal.clone());

    for generation in 1..=6 {
        simulation.advance();
        let expected = if generation % 2 == 1 {
            &vertical
        } else {
            &horizontal
        };
        assert_eq!(
            simulation.current_grid(),
            expected,
            "generation {generation} out of phase"
        );
    }
}

#[test]
fn conway_blinker_across_the_edge_wraps() {
    let shape = shape(6, 6);
    let horizontal = board_with(shape, &[(0, 5), (0, 0), (0, 1)]);
    let vertical = board_with(shape, &[(5, 0), (0, 0), (1, 0)]);
    let mut simulation = simulation_with(Rule::conway(), horizontal.clone());

    simulation.advance();
    assert_eq!(simulation.current_grid(), &vertical);
    simulation.advance();
    assert_eq!(simulation.current_grid(), &horizontal);
}

#[test]
fn conway_block_is_a_still_life() {
    let shape = shape(8, 10);
    let centered = board_with(shape, &[(3, 4), (3, 5), (4, 4), (4, 5)]);
    let cornered = board_with(shape, &[(7, 9), (7, 0), (0, 9), (0, 0)]);

    for block in [centered, cornered] {
        let mut simulation = simulation_with(Rule::conway(), block.clone());
        for _ in 0..25 {
            simulation.advance();
            assert_eq!(simulation.current_grid(), &block);
        }
    }
}

#[test]
fn conway_glider_circles_the_torus() {
    let shape = shape(8, 8);
    let glider = board_with(shape, &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)]);
    let mut simulation = simulation_with(Rule::conway(), glider.clone());

    for _ in 0..4 {
        simulation.advance();
    }
    let shifted = board_with(shape, &[(1, 2), (2, 3), (3, 1), (3, 2), (3, 3)]);
    assert_eq!(simulation.current_grid(), &shifted, "glider moves one cell diagonally");

    // Eight diagonal steps bring the glider back to where it started.
    for _ in 4..32 {
        simulation.advance();
    }
    assert_eq!(simulation.current_grid(), &glider);
    assert_eq!(simulation.generation(), 32);
}

#[test]
fn always_survive_never_birth_rule_freezes_the_board() {
    let neighborhood = Neighborhood::square(2, false);
    let everything = CountRange::new(0, neighborhood.total_weight()).expect("valid range");
    let rule = Rule::new(
        "freeze",
        neighborhood,
        Conditions::range(everything),
        Conditions::none(),
    );
    let mut simulation =
        Simulation::new(rule, shape(24, 24), Seed::random(0.4).expect("valid density"), Config::new(3))
            .expect("valid simulation");
    let initial = simulation.current_grid().clone();
    assert!(initial.population() > 0, "random seed should produce live cells");

    for _ in 0..5 {
        simulation.advance();
        assert_eq!(simulation.current_grid(), &initial);
    }
}

#[test]
fn discrete_and_range_conditions_combine_as_union() {
    // Survive on exactly 1, or anywhere within [3, 4]; never born.
    let rule = Rule::new(
        "union",
        Neighborhood::moore(),
        Conditions::new(vec![1], vec![CountRange::new(3, 4).expect("valid range")]),
        Conditions::none(),
    );
    let shape = shape(7, 7);
    // Centre cell (3, 3) surrounded by `n` live neighbours for each case.
    let ring = [(2, 2), (2, 3), (2, 4), (3, 2), (3, 4), (4, 2), (4, 3), (4, 4)];
    for neighbours in 0..=8 {
        let mut alive = vec![(3, 3)];
        alive.extend_from_slice(&ring[..neighbours]);
        let mut simulation = simulation_with(rule.clone(), board_with(shape, &alive));
        simulation.advance();

        let expected = matches!(neighbours, 1 | 3 | 4);
        assert_eq!(
            simulation.current_grid().is_alive(3, 3),
            expected,
            "centre with {neighbours} neighbours",
        );
    }
}

/// Board with exactly `count` live cells inside the radius-5 box around `center`,
/// the center itself included when `center_alive` is set.
fn board_with_box_count(shape: BoardShape, center: (usize, usize), count: usize, center_alive: bool) -> Board {
    let mut board = Board::dead(shape);
    let mut placed = 0;
    if center_alive {
        board.set(center.0, center.1, true);
        placed += 1;
    }
    for row in center.0 - 5..=center.0 + 5 {
        for column in center.1 - 5..=center.1 + 5 {
            if placed == count {
                return board;
            }
            if (row, column) != center {
                board.set(row, column, true);
                placed += 1;
            }
        }
    }
    assert_eq!(placed, count, "window too small for requested count");
    board
}

#[test]
fn range_rule_boundaries_are_inclusive() {
    let neighborhood = Neighborhood::square(5, true);
    let rule = Rule::new(
        "bugs",
        neighborhood.clone(),
        Conditions::range(CountRange::new(34, 58).expect("valid range")),
        Conditions::range(CountRange::new(34, 45).expect("valid range")),
    );
    let shape = shape(40, 40);
    let center = (20, 20);
    let cases = [
        // (count, alive before, alive after)
        (33, true, false),
        (34, true, true),
        (58, true, true),
        (59, true, false),
        (33, false, false),
        (34, false, true),
        (45, false, true),
        (46, false, false),
    ];

    for (count, alive_before, alive_after) in cases {
        let board = board_with_box_count(shape, center, count, alive_before);
        let counts = direct_neighbor_counts(&neighborhood, &board);
        assert_eq!(counts[center.0 * 40 + center.1], count as u32, "fixture count");

        let mut simulation = simulation_with(rule.clone(), board);
        simulation.advance();
        assert_eq!(
            simulation.current_grid().is_alive(center.0, center.1),
            alive_after,
            "count {count} with center alive={alive_before}",
        );
    }
}

#[test]
fn next_generation_matches_rule_applied_to_direct_counts() {
    let rule = Rule::new(
        "majority",
        Neighborhood::square(4, true),
        Conditions::range(CountRange::new(41, 81).expect("valid range")),
        Conditions::range(CountRange::new(41, 81).expect("valid range")),
    );
    let mut simulation = Simulation::new(
        rule.clone(),
        shape(32, 48),
        Seed::random(0.5).expect("valid density"),
        Config::new(17),
    )
    .expect("valid simulation");

    for _ in 0..3 {
        let before = simulation.current_grid().clone();
        let counts = direct_neighbor_counts(rule.neighborhood(), &before);
        let expected = Board::from_fn(before.shape(), |row, column| {
            let index = row * before.shape().width() + column;
            rule.next_state(before.cells()[index] == 1, counts[index])
        });

        simulation.advance();
        assert_eq!(simulation.current_grid(), &expected);
    }
}

#[test]
fn reseed_repeats_the_last_seed() {
    let mut simulation = Simulation::new(
        Rule::conway(),
        shape(64, 128),
        Seed::square(30),
        Config::default(),
    )
    .expect("valid simulation");
    let seeded = simulation.current_grid().clone();

    simulation.advance();
    assert_ne!(simulation.current_grid(), &seeded);

    simulation.reseed();
    assert_eq!(simulation.current_grid(), &seeded);
    assert_eq!(simulation.generation(), 0);
}

#[test]
fn reseed_without_seed_keeps_loaded_board() {
    let shape = shape(6, 6);
    let board = board_with(shape, &[(1, 1)]);
    let mut simulation = simulation_with(Rule::conway(), board.clone());

    simulation.reseed();
    assert_eq!(simulation.current_grid(), &board);
    assert_eq!(query::seed(&simulation), None);
}

#[test]
fn swap_rule_keeps_board_and_uses_new_kernel() {
    let shape = shape(16, 16);
    let mut simulation = Simulation::new(Rule::conway(), shape, Seed::square(4), Config::default())
        .expect("valid simulation");
    let board = simulation.current_grid().clone();

    let wide = Rule::new(
        "wide",
        Neighborhood::square(3, true),
        Conditions::range(CountRange::new(1, 49).expect("valid range")),
        Conditions::none(),
    );
    simulation.swap_rule(wide).expect("7x7 mask fits a 16x16 board");
    assert_eq!(simulation.current_grid(), &board);

    simulation.advance();
    assert_eq!(simulation.current_grid(), &board, "every live cell survives");
    assert_eq!(query::rule(&simulation).name(), "wide");
}

#[test]
fn apply_reports_every_command_outcome() {
    let mut simulation = Simulation::new(
        Rule::conway(),
        shape(8, 8),
        Seed::square(2),
        Config::default(),
    )
    .expect("valid simulation");
    let mut events = Vec::new();

    world::apply(&mut simulation, Command::Advance, &mut events);
    world::apply(
        &mut simulation,
        Command::Populate {
            seed: Seed::square(3),
        },
        &mut events,
    );
    world::apply(&mut simulation, Command::Reseed, &mut events);
    world::apply(
        &mut simulation,
        Command::SwapRule {
            rule: Rule::life_like("high_life", &[2, 3], &[3, 6]),
        },
        &mut events,
    );
    world::apply(
        &mut simulation,
        Command::SwapRule {
            rule: Rule::new(
                "too_wide",
                Neighborhood::square(5, true),
                Conditions::none(),
                Conditions::none(),
            ),
        },
        &mut events,
    );

    assert_eq!(
        events,
        vec![
            Event::GenerationAdvanced {
                generation: 1,
                population: 4,
            },
            Event::BoardPopulated {
                seed: Seed::square(3),
                population: 9,
            },
            Event::BoardPopulated {
                seed: Seed::square(3),
                population: 9,
            },
            Event::RuleSwapped {
                name: "high_life".to_owned(),
            },
            Event::RuleRejected {
                name: "too_wide".to_owned(),
                reason: ConstructionError::NeighborhoodExceedsBoard {
                    neighborhood_height: 11,
                    neighborhood_width: 11,
                    board_height: 8,
                    board_width: 8,
                },
            },
        ]
    );
    assert_eq!(query::rule(&simulation).name(), "high_life");
}

#[test]
fn replay_is_deterministic_for_a_fixed_config() {
    let first = replay(Config::new(0x5eed));
    let second = replay(Config::new(0x5eed));
    let other = replay(Config::new(0x5eee));

    assert_eq!(first, second, "replay diverged");
    assert_ne!(first, other, "different rng seeds should diverge");
}

fn replay(config: Config) -> Vec<Board> {
    let mut simulation = Simulation::new(
        Rule::life_like("day_and_night", &[3, 4, 6, 7, 8], &[3, 6, 7, 8]),
        shape(32, 32),
        Seed::random(0.5).expect("valid density"),
        config,
    )
    .expect("valid simulation");

    let mut history = vec![query::board(&simulation).clone()];
    for step in 0..20 {
        if step == 10 {
            simulation.reseed();
        }
        simulation.advance();
        history.push(query::board(&simulation).clone());
    }
    history
}
