#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Autoscope cellular automata engine.
//!
//! This crate defines the value types that every other crate speaks: the
//! [`Rule`] describing a neighborhood and its birth/survival [`Conditions`],
//! the [`Seed`] strategies that produce an initial [`Board`], and the message
//! surface connecting hosts to the simulation. Hosts submit [`Command`] values
//! describing desired mutations, the simulation executes them via its `apply`
//! entry point, and then broadcasts [`Event`] values for systems to react to.
//!
//! Every type validates its invariants once, at construction, and reports
//! violations through [`ConstructionError`]. Nothing in this crate fails after
//! construction succeeded.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Commands that express all permissible simulation mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation by a single generation.
    Advance,
    /// Replaces the board with one produced by the provided seed.
    Populate {
        /// Strategy used to produce the new board.
        seed: Seed,
    },
    /// Replaces the board using the most recently applied seed.
    Reseed,
    /// Replaces the active rule, recomputing any cached neighbor kernels.
    SwapRule {
        /// Rule that should drive subsequent generations.
        rule: Rule,
    },
}

/// Events broadcast by the simulation after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Confirms that the board advanced by one generation.
    GenerationAdvanced {
        /// Generation index reached after the transition.
        generation: u64,
        /// Number of live cells on the new board.
        population: usize,
    },
    /// Confirms that the board was replaced by a seed.
    BoardPopulated {
        /// Seed that produced the board.
        seed: Seed,
        /// Number of live cells on the new board.
        population: usize,
    },
    /// Confirms that a new rule is active.
    RuleSwapped {
        /// Name of the rule that became active.
        name: String,
    },
    /// Reports that a rule swap was rejected and the previous rule stays active.
    RuleRejected {
        /// Name of the rule that failed validation.
        name: String,
        /// Specific reason the rule could not be applied.
        reason: ConstructionError,
    },
    /// Publishes population statistics derived from earlier events.
    StatsPublished {
        /// Statistics describing the most recent board.
        report: StatsReport,
    },
}

/// Population statistics for one observed board.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StatsReport {
    generation: u64,
    population: usize,
    cell_count: usize,
    peak_population: usize,
}

impl StatsReport {
    /// Creates a report for a board of `cell_count` cells.
    #[must_use]
    pub const fn new(
        generation: u64,
        population: usize,
        cell_count: usize,
        peak_population: usize,
    ) -> Self {
        Self {
            generation,
            population,
            cell_count,
            peak_population,
        }
    }

    /// Generation the report describes.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of live cells.
    #[must_use]
    pub const fn population(&self) -> usize {
        self.population
    }

    /// Number of cells on the board.
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        self.cell_count
    }

    /// Largest population observed since the board was last populated.
    #[must_use]
    pub const fn peak_population(&self) -> usize {
        self.peak_population
    }

    /// Fraction of live cells, in `[0, 1]`.
    #[must_use]
    pub fn density(&self) -> f64 {
        if self.cell_count == 0 {
            0.0
        } else {
            self.population as f64 / self.cell_count as f64
        }
    }

    /// Whether every cell is dead.
    #[must_use]
    pub const fn is_extinct(&self) -> bool {
        self.population == 0
    }
}

/// Reasons a rule, seed, board or simulation cannot be constructed.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConstructionError {
    /// Neighborhood masks must have odd dimensions so they can be centered on a cell.
    #[error("neighborhood dimensions must be odd (received {height}x{width})")]
    EvenNeighborhood {
        /// Provided mask height.
        height: usize,
        /// Provided mask width.
        width: usize,
    },
    /// Neighborhood masks must contain at least one row and one column.
    #[error("neighborhood must contain at least one row and one column")]
    EmptyNeighborhood,
    /// The weight buffer does not match the declared mask dimensions.
    #[error("a {height}x{width} neighborhood expects {expected} weights (received {received})")]
    NeighborhoodWeights {
        /// Declared mask height.
        height: usize,
        /// Declared mask width.
        width: usize,
        /// Number of weights implied by the dimensions.
        expected: usize,
        /// Number of weights actually provided.
        received: usize,
    },
    /// Rows supplied to a row-based constructor differ in length.
    #[error("all rows must share the same length")]
    RaggedRows,
    /// The neighborhood does not fit on the board.
    #[error(
        "neighborhood {neighborhood_height}x{neighborhood_width} exceeds board {board_height}x{board_width}"
    )]
    NeighborhoodExceedsBoard {
        /// Mask height.
        neighborhood_height: usize,
        /// Mask width.
        neighborhood_width: usize,
        /// Board height.
        board_height: usize,
        /// Board width.
        board_width: usize,
    },
    /// Random seed density must be a probability.
    #[error("seed density must lie within [0, 1] (received {density})")]
    DensityOutOfRange {
        /// Provided density.
        density: f64,
    },
    /// Boards must contain at least one cell.
    #[error("board dimensions must be positive (received {height}x{width})")]
    EmptyBoard {
        /// Provided board height.
        height: usize,
        /// Provided board width.
        width: usize,
    },
    /// The cell buffer does not match the declared board shape.
    #[error("a {height}x{width} board expects {expected} cells (received {received})")]
    BoardCells {
        /// Declared board height.
        height: usize,
        /// Declared board width.
        width: usize,
        /// Number of cells implied by the shape.
        expected: usize,
        /// Number of cells actually provided.
        received: usize,
    },
    /// The mask has more cells than a neighbor count can represent.
    #[error("square neighborhood of radius {radius} is too large")]
    NeighborhoodTooLarge {
        /// Requested radius.
        radius: usize,
    },
    /// Inclusive count ranges must not be inverted.
    #[error("count range lower bound {lo} exceeds upper bound {hi}")]
    InvertedRange {
        /// Provided lower bound.
        lo: u32,
        /// Provided upper bound.
        hi: u32,
    },
}

/// Fixed dimensions of a board measured in cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawBoardShape")]
pub struct BoardShape {
    height: usize,
    width: usize,
}

#[derive(Deserialize)]
struct RawBoardShape {
    height: usize,
    width: usize,
}

impl TryFrom<RawBoardShape> for BoardShape {
    type Error = ConstructionError;

    fn try_from(raw: RawBoardShape) -> Result<Self, Self::Error> {
        Self::new(raw.height, raw.width)
    }
}

impl BoardShape {
    /// Creates a new board shape, rejecting zero-sized dimensions.
    pub const fn new(height: usize, width: usize) -> Result<Self, ConstructionError> {
        if height == 0 || width == 0 {
            return Err(ConstructionError::EmptyBoard { height, width });
        }
        Ok(Self { height, width })
    }

    /// Number of rows on the board.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Number of columns on the board.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Total number of cells on the board.
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        self.height * self.width
    }

    /// Maps signed coordinates onto the torus, returning in-bounds indices.
    #[must_use]
    pub fn wrap(&self, row: isize, column: isize) -> (usize, usize) {
        (wrap_axis(row, self.height), wrap_axis(column, self.width))
    }

    /// Reports whether the neighborhood can be centered on this board.
    pub fn fits(&self, neighborhood: &Neighborhood) -> Result<(), ConstructionError> {
        if neighborhood.height() > self.height || neighborhood.width() > self.width {
            return Err(ConstructionError::NeighborhoodExceedsBoard {
                neighborhood_height: neighborhood.height(),
                neighborhood_width: neighborhood.width(),
                board_height: self.height,
                board_width: self.width,
            });
        }
        Ok(())
    }
}

fn wrap_axis(value: isize, length: usize) -> usize {
    // Board dimensions originate from allocated buffers, so they fit in isize.
    value.rem_euclid(length as isize) as usize
}

/// Two dimensional grid of binary cells with toroidal topology.
///
/// Cells are stored row-major and always hold `0` (dead) or `1` (alive).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawBoard")]
pub struct Board {
    shape: BoardShape,
    cells: Vec<u8>,
}

#[derive(Deserialize)]
struct RawBoard {
    shape: BoardShape,
    cells: Vec<u8>,
}

impl TryFrom<RawBoard> for Board {
    type Error = ConstructionError;

    fn try_from(raw: RawBoard) -> Result<Self, Self::Error> {
        Self::from_cells(raw.shape, raw.cells)
    }
}

impl Board {
    /// Creates a board where every cell is dead.
    #[must_use]
    pub fn dead(shape: BoardShape) -> Self {
        Self {
            shape,
            cells: vec![0; shape.cell_count()],
        }
    }

    /// Creates a board by evaluating `alive` for every cell in row-major order.
    #[must_use]
    pub fn from_fn<F>(shape: BoardShape, mut alive: F) -> Self
    where
        F: FnMut(usize, usize) -> bool,
    {
        let mut cells = Vec::with_capacity(shape.cell_count());
        for row in 0..shape.height() {
            for column in 0..shape.width() {
                cells.push(u8::from(alive(row, column)));
            }
        }
        Self { shape, cells }
    }

    /// Creates a board from a row-major cell buffer. Non-zero values count as alive.
    pub fn from_cells(shape: BoardShape, cells: Vec<u8>) -> Result<Self, ConstructionError> {
        if cells.len() != shape.cell_count() {
            return Err(ConstructionError::BoardCells {
                height: shape.height(),
                width: shape.width(),
                expected: shape.cell_count(),
                received: cells.len(),
            });
        }
        let cells = cells.into_iter().map(|cell| u8::from(cell != 0)).collect();
        Ok(Self { shape, cells })
    }

    /// Creates a board from equally sized rows. Non-zero values count as alive.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, ConstructionError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.as_ref().len());
        let shape = BoardShape::new(height, width)?;
        if rows.iter().any(|row| row.as_ref().len() != width) {
            return Err(ConstructionError::RaggedRows);
        }
        let cells = rows
            .iter()
            .flat_map(|row| row.as_ref().iter().copied())
            .collect();
        Self::from_cells(shape, cells)
    }

    /// Dimensions of the board.
    #[must_use]
    pub const fn shape(&self) -> BoardShape {
        self.shape
    }

    /// Row-major view over every cell.
    #[must_use]
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Iterator over the rows of the board.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.cells.chunks_exact(self.shape.width())
    }

    /// Reports whether the cell is alive. Out-of-bounds cells are dead.
    #[must_use]
    pub fn is_alive(&self, row: usize, column: usize) -> bool {
        self.index(row, column)
            .is_some_and(|index| self.cells[index] == 1)
    }

    /// Returns the cell at signed coordinates, wrapping at every edge.
    #[must_use]
    pub fn get_wrapped(&self, row: isize, column: isize) -> u8 {
        let (row, column) = self.shape.wrap(row, column);
        self.cells[row * self.shape.width() + column]
    }

    /// Sets the state of a cell. Out-of-bounds writes are ignored.
    pub fn set(&mut self, row: usize, column: usize, alive: bool) {
        if let Some(index) = self.index(row, column) {
            self.cells[index] = u8::from(alive);
        }
    }

    /// Number of live cells.
    #[must_use]
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|cell| **cell == 1).count()
    }

    /// Renders the board as text, one line per row, `#` for live and `.` for dead cells.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut text = String::with_capacity(self.cells.len() + self.shape.height());
        for row in self.rows() {
            text.extend(row.iter().map(|cell| if *cell == 1 { '#' } else { '.' }));
            text.push('\n');
        }
        text
    }

    fn index(&self, row: usize, column: usize) -> Option<usize> {
        (row < self.shape.height() && column < self.shape.width())
            .then(|| row * self.shape.width() + column)
    }
}

/// Weighted mask describing which relative offsets contribute to a cell's neighbor count.
///
/// Dimensions are always odd so the mask has a well-defined center cell.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawNeighborhood")]
pub struct Neighborhood {
    height: usize,
    width: usize,
    weights: Vec<u32>,
}

#[derive(Deserialize)]
struct RawNeighborhood {
    height: usize,
    width: usize,
    weights: Vec<u32>,
}

impl TryFrom<RawNeighborhood> for Neighborhood {
    type Error = ConstructionError;

    fn try_from(raw: RawNeighborhood) -> Result<Self, Self::Error> {
        Self::new(raw.height, raw.width, raw.weights)
    }
}

impl Neighborhood {
    /// Creates a neighborhood from row-major weights.
    pub fn new(height: usize, width: usize, weights: Vec<u32>) -> Result<Self, ConstructionError> {
        if height == 0 || width == 0 {
            return Err(ConstructionError::EmptyNeighborhood);
        }
        if height % 2 == 0 || width % 2 == 0 {
            return Err(ConstructionError::EvenNeighborhood { height, width });
        }
        if weights.len() != height * width {
            return Err(ConstructionError::NeighborhoodWeights {
                height,
                width,
                expected: height * width,
                received: weights.len(),
            });
        }
        Ok(Self {
            height,
            width,
            weights,
        })
    }

    /// Creates a neighborhood from equally sized rows of weights.
    pub fn from_rows<R: AsRef<[u32]>>(rows: &[R]) -> Result<Self, ConstructionError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.as_ref().len());
        if rows.iter().any(|row| row.as_ref().len() != width) {
            return Err(ConstructionError::RaggedRows);
        }
        let weights = rows
            .iter()
            .flat_map(|row| row.as_ref().iter().copied())
            .collect();
        Self::new(height, width, weights)
    }

    /// The 3x3 Moore neighborhood: all eight surrounding cells, center excluded.
    #[must_use]
    pub fn moore() -> Self {
        Self::square(1, false)
    }

    /// Square neighborhood of side `2 * radius + 1` with unit weights.
    ///
    /// # Panics
    ///
    /// Panics when [`Neighborhood::try_square`] rejects the radius.
    #[must_use]
    pub fn square(radius: usize, include_center: bool) -> Self {
        Self::try_square(radius, include_center).expect("square neighborhood radius is too large")
    }

    /// Square neighborhood of side `2 * radius + 1` with unit weights.
    ///
    /// Rejects radii whose mask holds more cells than fit in a `u32` count.
    pub fn try_square(radius: usize, include_center: bool) -> Result<Self, ConstructionError> {
        let cells = radius
            .checked_mul(2)
            .and_then(|doubled| doubled.checked_add(1))
            .and_then(|side| side.checked_mul(side))
            .filter(|cells| u32::try_from(*cells).is_ok());
        let Some(cells) = cells else {
            return Err(ConstructionError::NeighborhoodTooLarge { radius });
        };
        let side = 2 * radius + 1;
        let mut weights = vec![1; cells];
        if !include_center {
            weights[radius * side + radius] = 0;
        }
        Ok(Self {
            height: side,
            width: side,
            weights,
        })
    }

    /// Number of mask rows.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Number of mask columns.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Row-major weights of the mask.
    #[must_use]
    pub fn weights(&self) -> &[u32] {
        &self.weights
    }

    /// Weight at the provided mask position, or zero outside the mask.
    #[must_use]
    pub fn weight(&self, row: usize, column: usize) -> u32 {
        if row < self.height && column < self.width {
            self.weights[row * self.width + column]
        } else {
            0
        }
    }

    /// Largest neighbor count the mask can produce.
    #[must_use]
    pub fn total_weight(&self) -> u32 {
        self.weights.iter().sum()
    }

    /// Iterator over `(row_offset, column_offset, weight)` for every non-zero weight,
    /// with offsets measured from the mask center.
    pub fn offsets(&self) -> impl Iterator<Item = (isize, isize, u32)> + '_ {
        let center_row = (self.height / 2) as isize;
        let center_column = (self.width / 2) as isize;
        let width = self.width;
        self.weights
            .iter()
            .enumerate()
            .filter(|(_, weight)| **weight != 0)
            .map(move |(index, weight)| {
                let row = (index / width) as isize;
                let column = (index % width) as isize;
                (row - center_row, column - center_column, *weight)
            })
    }
}

/// Inclusive range of neighbor counts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "(u32, u32)", into = "(u32, u32)")]
pub struct CountRange {
    lo: u32,
    hi: u32,
}

impl TryFrom<(u32, u32)> for CountRange {
    type Error = ConstructionError;

    fn try_from((lo, hi): (u32, u32)) -> Result<Self, Self::Error> {
        Self::new(lo, hi)
    }
}

impl From<CountRange> for (u32, u32) {
    fn from(range: CountRange) -> Self {
        (range.lo, range.hi)
    }
}

impl CountRange {
    /// Creates an inclusive range, rejecting `lo > hi`.
    pub const fn new(lo: u32, hi: u32) -> Result<Self, ConstructionError> {
        if lo > hi {
            return Err(ConstructionError::InvertedRange { lo, hi });
        }
        Ok(Self { lo, hi })
    }

    /// Inclusive lower bound.
    #[must_use]
    pub const fn lo(&self) -> u32 {
        self.lo
    }

    /// Inclusive upper bound.
    #[must_use]
    pub const fn hi(&self) -> u32 {
        self.hi
    }

    /// Reports whether the count lies within the range, both ends inclusive.
    #[must_use]
    pub const fn contains(&self, count: u32) -> bool {
        self.lo <= count && count <= self.hi
    }
}

/// Neighbor-count criteria for a single transition: discrete counts and inclusive ranges.
///
/// A count satisfies the conditions when it matches any discrete count or falls
/// within any range. Empty conditions are never satisfied.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Conditions {
    #[serde(default)]
    counts: Vec<u32>,
    #[serde(default)]
    ranges: Vec<CountRange>,
}

impl Conditions {
    /// Conditions that no count satisfies.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Creates conditions from discrete counts and ranges.
    #[must_use]
    pub fn new(counts: Vec<u32>, ranges: Vec<CountRange>) -> Self {
        Self { counts, ranges }
    }

    /// Conditions satisfied by exactly the provided counts.
    #[must_use]
    pub fn counts(counts: &[u32]) -> Self {
        Self::new(counts.to_vec(), Vec::new())
    }

    /// Conditions satisfied by a single inclusive range.
    #[must_use]
    pub fn range(range: CountRange) -> Self {
        Self::new(Vec::new(), vec![range])
    }

    /// Discrete counts that satisfy the conditions.
    #[must_use]
    pub fn discrete(&self) -> &[u32] {
        &self.counts
    }

    /// Inclusive ranges that satisfy the conditions.
    #[must_use]
    pub fn ranges(&self) -> &[CountRange] {
        &self.ranges
    }

    /// Reports whether no count can satisfy the conditions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty() && self.ranges.is_empty()
    }

    /// Reports whether the count matches a discrete count or lies within a range.
    #[must_use]
    pub fn matches(&self, count: u32) -> bool {
        self.counts.contains(&count) || self.ranges.iter().any(|range| range.contains(count))
    }
}

/// Immutable description of a cellular automaton: neighborhood plus transition conditions.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rule {
    name: String,
    neighborhood: Neighborhood,
    survival: Conditions,
    birth: Conditions,
}

impl Rule {
    /// Creates a rule from already validated parts.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        neighborhood: Neighborhood,
        survival: Conditions,
        birth: Conditions,
    ) -> Self {
        Self {
            name: name.into(),
            neighborhood,
            survival,
            birth,
        }
    }

    /// Creates a Moore-neighborhood rule from discrete survival and birth counts.
    #[must_use]
    pub fn life_like(name: impl Into<String>, survival: &[u32], birth: &[u32]) -> Self {
        Self::new(
            name,
            Neighborhood::moore(),
            Conditions::counts(survival),
            Conditions::counts(birth),
        )
    }

    /// Conway's Game of Life, survival on 2 or 3 neighbors and birth on 3.
    #[must_use]
    pub fn conway() -> Self {
        Self::life_like("conway", &[2, 3], &[3])
    }

    /// Label identifying the rule to hosts.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Neighborhood mask used to count neighbors.
    #[must_use]
    pub const fn neighborhood(&self) -> &Neighborhood {
        &self.neighborhood
    }

    /// Conditions under which a live cell stays alive.
    #[must_use]
    pub const fn survival(&self) -> &Conditions {
        &self.survival
    }

    /// Conditions under which a dead cell becomes alive.
    #[must_use]
    pub const fn birth(&self) -> &Conditions {
        &self.birth
    }

    /// Decides whether a cell is alive in the next generation.
    #[must_use]
    pub fn next_state(&self, alive: bool, count: u32) -> bool {
        if alive {
            self.survival.matches(count)
        } else {
            self.birth.matches(count)
        }
    }
}

/// Strategy that produces the initial board of a simulation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Seed {
    /// Every cell independently alive with a fixed probability.
    Random(RandomSeed),
    /// A centered square block of live cells.
    Square(SquareSeed),
}

impl Seed {
    /// Random seed with the provided density, rejecting values outside `[0, 1]`.
    pub fn random(density: f64) -> Result<Self, ConstructionError> {
        RandomSeed::new(density).map(Self::Random)
    }

    /// Centered square seed with the provided side length.
    #[must_use]
    pub const fn square(side: usize) -> Self {
        Self::Square(SquareSeed::new(side))
    }

    /// Produces a board of the provided shape.
    pub fn populate<R: Rng + ?Sized>(&self, shape: BoardShape, rng: &mut R) -> Board {
        match self {
            Self::Random(seed) => seed.populate(shape, rng),
            Self::Square(seed) => seed.populate(shape),
        }
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Random(seed) => write!(f, "random d={}", seed.density()),
            Self::Square(seed) => write!(f, "square s={}", seed.side()),
        }
    }
}

/// Seed that marks each cell alive independently with probability `density`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRandomSeed")]
pub struct RandomSeed {
    density: f64,
}

#[derive(Deserialize)]
struct RawRandomSeed {
    density: f64,
}

impl TryFrom<RawRandomSeed> for RandomSeed {
    type Error = ConstructionError;

    fn try_from(raw: RawRandomSeed) -> Result<Self, Self::Error> {
        Self::new(raw.density)
    }
}

impl RandomSeed {
    /// Creates a random seed, rejecting densities outside `[0, 1]` (including NaN).
    pub fn new(density: f64) -> Result<Self, ConstructionError> {
        if !(0.0..=1.0).contains(&density) {
            return Err(ConstructionError::DensityOutOfRange { density });
        }
        Ok(Self { density })
    }

    /// Probability that any given cell starts alive.
    #[must_use]
    pub const fn density(&self) -> f64 {
        self.density
    }

    /// Samples every cell from a uniform `[0, 1)` source in row-major order.
    pub fn populate<R: Rng + ?Sized>(&self, shape: BoardShape, rng: &mut R) -> Board {
        Board::from_fn(shape, |_, _| rng.gen::<f64>() < self.density)
    }
}

/// Seed that places a `side x side` block of live cells centered on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SquareSeed {
    side: usize,
}

impl SquareSeed {
    /// Creates a square seed with the provided side length.
    #[must_use]
    pub const fn new(side: usize) -> Self {
        Self { side }
    }

    /// Side length of the block.
    #[must_use]
    pub const fn side(&self) -> usize {
        self.side
    }

    /// Upper-left corner of the block, `floor((dim - side) / 2)` per axis.
    ///
    /// Negative when the block is larger than the board.
    #[must_use]
    pub fn origin(&self, shape: BoardShape) -> (isize, isize) {
        let side = self.side as isize;
        let offset = |dim: usize| (dim as isize - side).div_euclid(2);
        (offset(shape.height()), offset(shape.width()))
    }

    /// Writes the intersection of the block with the board; the rest stays dead.
    #[must_use]
    pub fn populate(&self, shape: BoardShape) -> Board {
        let (origin_row, origin_column) = self.origin(shape);
        let side = self.side as isize;
        let covers = |index: usize, origin: isize| {
            let index = index as isize;
            index >= origin && index < origin + side
        };
        Board::from_fn(shape, |row, column| {
            covers(row, origin_row) && covers(column, origin_column)
        })
    }
}
