#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative simulation state for Autoscope.
//!
//! A [`Simulation`] exclusively owns one [`Board`] and one [`Rule`]. It keeps
//! the rule's kernel spectrum cached for the board shape, so each generation
//! costs one forward and one inverse transform of the board. The engine knows
//! nothing about catalogs, rendering or input; hosts hand it values and read
//! the board back.
//!
//! Access is single-threaded. Hosts that step and render from different
//! threads must serialize access to the simulation themselves.

use autoscope_core::{Board, BoardShape, Command, ConstructionError, Event, Rule, Seed};
use autoscope_system_convolution::ToroidalConvolver;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace, warn};

const DEFAULT_RNG_SEED: u64 = 0x6175_746f_7363_6f70;

/// Configuration parameters required to construct a simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    rng_seed: u64,
}

impl Config {
    /// Creates a configuration whose random seeding is driven by `rng_seed`.
    #[must_use]
    pub const fn new(rng_seed: u64) -> Self {
        Self { rng_seed }
    }

    /// Seed of the generator used by random board seeds.
    #[must_use]
    pub const fn rng_seed(&self) -> u64 {
        self.rng_seed
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_RNG_SEED)
    }
}

/// Represents the authoritative state of a running cellular automaton.
#[derive(Debug)]
pub struct Simulation {
    rule: Rule,
    seed: Option<Seed>,
    board: Board,
    convolver: ToroidalConvolver,
    counts: Vec<u32>,
    rng: ChaCha8Rng,
    generation: u64,
}

impl Simulation {
    /// Creates a simulation and populates its board from `seed`.
    ///
    /// Fails when the rule's neighborhood does not fit on a board of `shape`.
    pub fn new(
        rule: Rule,
        shape: BoardShape,
        seed: Seed,
        config: Config,
    ) -> Result<Self, ConstructionError> {
        let mut simulation = Self::from_board(rule, Board::dead(shape), config)?;
        simulation.populate(seed);
        Ok(simulation)
    }

    /// Creates a simulation around an explicit board.
    ///
    /// The simulation has no seed until [`Simulation::populate`] is called, so
    /// [`Simulation::reseed`] leaves such a board untouched.
    pub fn from_board(rule: Rule, board: Board, config: Config) -> Result<Self, ConstructionError> {
        let shape = board.shape();
        let convolver = ToroidalConvolver::new(rule.neighborhood(), shape)?;
        debug!(
            rule = rule.name(),
            height = shape.height(),
            width = shape.width(),
            "simulation constructed"
        );

        Ok(Self {
            rule,
            seed: None,
            board,
            convolver,
            counts: Vec::with_capacity(shape.cell_count()),
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed()),
            generation: 0,
        })
    }

    /// Replaces the board with the next generation.
    pub fn advance(&mut self) {
        self.convolver
            .neighbor_counts(&self.board, &mut self.counts);

        let width = self.board.shape().width();
        let cells = self.board.cells();
        let counts = &self.counts;
        let rule = &self.rule;
        let next = Board::from_fn(self.board.shape(), |row, column| {
            let index = row * width + column;
            rule.next_state(cells[index] == 1, counts[index])
        });

        self.board = next;
        self.generation += 1;
        trace!(
            generation = self.generation,
            population = self.board.population(),
            "generation advanced"
        );
    }

    /// Read-only view of the current board, row-major.
    #[must_use]
    pub fn current_grid(&self) -> &Board {
        &self.board
    }

    /// Replaces the board with one produced by `seed` and restarts the generation count.
    pub fn populate(&mut self, seed: Seed) {
        self.board = seed.populate(self.board.shape(), &mut self.rng);
        self.seed = Some(seed);
        self.generation = 0;
        debug!(%seed, population = self.board.population(), "board populated");
    }

    /// Repopulates the board with the most recently used seed, if any.
    pub fn reseed(&mut self) {
        if let Some(seed) = self.seed {
            self.populate(seed);
        }
    }

    /// Replaces the active rule, recomputing the cached kernel.
    ///
    /// The board is kept. On error the previous rule stays active.
    pub fn swap_rule(&mut self, rule: Rule) -> Result<(), ConstructionError> {
        self.convolver = ToroidalConvolver::new(rule.neighborhood(), self.board.shape())?;
        debug!(from = self.rule.name(), to = rule.name(), "rule swapped");
        self.rule = rule;
        Ok(())
    }

    /// Rule driving the simulation.
    #[must_use]
    pub const fn rule(&self) -> &Rule {
        &self.rule
    }

    /// Seed most recently used to populate the board.
    #[must_use]
    pub const fn seed(&self) -> Option<Seed> {
        self.seed
    }

    /// Number of generations computed since the board was last populated.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

/// Applies the provided command to the simulation, emitting the resulting events.
pub fn apply(simulation: &mut Simulation, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Advance => {
            simulation.advance();
            out_events.push(Event::GenerationAdvanced {
                generation: simulation.generation(),
                population: simulation.current_grid().population(),
            });
        }
        Command::Populate { seed } => {
            simulation.populate(seed);
            out_events.push(Event::BoardPopulated {
                seed,
                population: simulation.current_grid().population(),
            });
        }
        Command::Reseed => {
            simulation.reseed();
            if let Some(seed) = simulation.seed() {
                out_events.push(Event::BoardPopulated {
                    seed,
                    population: simulation.current_grid().population(),
                });
            }
        }
        Command::SwapRule { rule } => {
            let name = rule.name().to_owned();
            match simulation.swap_rule(rule) {
                Ok(()) => out_events.push(Event::RuleSwapped { name }),
                Err(reason) => {
                    warn!(rule = %name, %reason, "rule rejected");
                    out_events.push(Event::RuleRejected { name, reason });
                }
            }
        }
    }
}

/// Read-only queries exposing simulation state to hosts and systems.
pub mod query {
    use autoscope_core::{Board, BoardShape, Rule, Seed};

    use super::Simulation;

    /// Current board.
    #[must_use]
    pub fn board(simulation: &Simulation) -> &Board {
        simulation.current_grid()
    }

    /// Shape of the board, fixed for the lifetime of the simulation.
    #[must_use]
    pub fn shape(simulation: &Simulation) -> BoardShape {
        simulation.current_grid().shape()
    }

    /// Active rule.
    #[must_use]
    pub fn rule(simulation: &Simulation) -> &Rule {
        simulation.rule()
    }

    /// Seed most recently used to populate the board.
    #[must_use]
    pub fn seed(simulation: &Simulation) -> Option<Seed> {
        simulation.seed()
    }

    /// Generations computed since the last populate.
    #[must_use]
    pub fn generation(simulation: &Simulation) -> u64 {
        simulation.generation()
    }

    /// Number of live cells on the current board.
    #[must_use]
    pub fn population(simulation: &Simulation) -> usize {
        simulation.current_grid().population()
    }
}
