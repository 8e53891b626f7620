#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Toroidal neighbor counting through frequency-domain convolution.
//!
//! [`ToroidalConvolver`] places a neighborhood mask into a board-sized kernel,
//! transforms it once, and then derives every cell's weighted neighbor count
//! per generation with a forward transform of the board, an elementwise
//! product and an inverse transform. The product of two discrete Fourier
//! transforms is a circular convolution, so wraparound at every edge is exact.
//!
//! [`direct_neighbor_counts`] computes the same counts by direct summation and
//! serves as the reference implementation.

use std::{fmt, sync::Arc};

use autoscope_core::{Board, BoardShape, ConstructionError, Neighborhood};
use rustfft::{num_complex::Complex, Fft, FftDirection, FftPlanner};

/// Largest tolerated distance between a transformed count and its nearest integer.
///
/// Counts are rounded half away from zero; residue above this bound indicates
/// a misconfigured transform and trips a debug assertion.
pub const ROUNDING_TOLERANCE: f64 = 1e-6;

/// Row and column transforms of a single direction over a fixed board shape.
struct Transform2d {
    rows: Arc<dyn Fft<f64>>,
    columns: Arc<dyn Fft<f64>>,
}

impl Transform2d {
    fn plan(planner: &mut FftPlanner<f64>, shape: BoardShape, direction: FftDirection) -> Self {
        Self {
            rows: planner.plan_fft(shape.width(), direction),
            columns: planner.plan_fft(shape.height(), direction),
        }
    }

    fn scratch_len(&self) -> usize {
        self.rows
            .get_inplace_scratch_len()
            .max(self.columns.get_inplace_scratch_len())
    }

    /// Transforms `buffer` in place. `transposed` is resized to match.
    fn apply(
        &self,
        buffer: &mut [Complex<f64>],
        transposed: &mut Vec<Complex<f64>>,
        scratch: &mut [Complex<f64>],
        shape: BoardShape,
    ) {
        let (height, width) = (shape.height(), shape.width());
        self.rows.process_with_scratch(buffer, scratch);
        transpose(buffer, transposed, height, width);
        self.columns.process_with_scratch(transposed, scratch);
        for row in 0..height {
            for column in 0..width {
                buffer[row * width + column] = transposed[column * height + row];
            }
        }
    }
}

fn transpose(source: &[Complex<f64>], target: &mut Vec<Complex<f64>>, height: usize, width: usize) {
    target.clear();
    target.reserve(source.len());
    for column in 0..width {
        target.extend((0..height).map(|row| source[row * width + column]));
    }
}

/// Cached frequency-domain neighbor counter for one neighborhood and board shape.
pub struct ToroidalConvolver {
    shape: BoardShape,
    anchor: (usize, usize),
    forward: Transform2d,
    inverse: Transform2d,
    kernel_spectrum: Vec<Complex<f64>>,
    workspace: Vec<Complex<f64>>,
    transposed: Vec<Complex<f64>>,
    scratch: Vec<Complex<f64>>,
}

impl fmt::Debug for ToroidalConvolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToroidalConvolver")
            .field("shape", &self.shape)
            .field("anchor", &self.anchor)
            .finish_non_exhaustive()
    }
}

impl ToroidalConvolver {
    /// Plans the transforms and computes the kernel spectrum.
    ///
    /// Returns an error when the neighborhood is larger than the board in
    /// either dimension.
    pub fn new(neighborhood: &Neighborhood, shape: BoardShape) -> Result<Self, ConstructionError> {
        shape.fits(neighborhood)?;

        let mut planner = FftPlanner::new();
        let forward = Transform2d::plan(&mut planner, shape, FftDirection::Forward);
        let inverse = Transform2d::plan(&mut planner, shape, FftDirection::Inverse);
        let scratch_len = forward.scratch_len().max(inverse.scratch_len());

        let mut convolver = Self {
            shape,
            anchor: kernel_anchor(shape),
            forward,
            inverse,
            kernel_spectrum: Vec::new(),
            workspace: Vec::with_capacity(shape.cell_count()),
            transposed: Vec::with_capacity(shape.cell_count()),
            scratch: vec![Complex::new(0.0, 0.0); scratch_len],
        };
        convolver.kernel_spectrum = convolver.transform_kernel(neighborhood);
        Ok(convolver)
    }

    /// Board shape the convolver was planned for.
    #[must_use]
    pub const fn shape(&self) -> BoardShape {
        self.shape
    }

    /// Computes every cell's weighted neighbor count, row-major, into `counts`.
    pub fn neighbor_counts(&mut self, board: &Board, counts: &mut Vec<u32>) {
        debug_assert_eq!(board.shape(), self.shape, "board shape changed under the convolver");

        self.workspace.clear();
        self.workspace.extend(
            board
                .cells()
                .iter()
                .map(|cell| Complex::new(f64::from(*cell), 0.0)),
        );
        self.forward.apply(
            &mut self.workspace,
            &mut self.transposed,
            &mut self.scratch,
            self.shape,
        );

        for (value, kernel) in self.workspace.iter_mut().zip(&self.kernel_spectrum) {
            *value *= *kernel;
        }

        self.inverse.apply(
            &mut self.workspace,
            &mut self.transposed,
            &mut self.scratch,
            self.shape,
        );

        // Undo the anchor offset: roll by (-(H/2) + 1, -(W/2) + 1).
        let (height, width) = (self.shape.height(), self.shape.width());
        let (anchor_row, anchor_column) = self.anchor;
        let normalization = self.shape.cell_count() as f64;
        counts.clear();
        counts.reserve(self.shape.cell_count());
        for row in 0..height {
            let source_row = (row + anchor_row) % height;
            for column in 0..width {
                let source_column = (column + anchor_column) % width;
                let value = self.workspace[source_row * width + source_column].re / normalization;
                counts.push(round_count(value));
            }
        }
    }

    fn transform_kernel(&mut self, neighborhood: &Neighborhood) -> Vec<Complex<f64>> {
        let width = self.shape.width();
        let (anchor_row, anchor_column) = self.anchor;
        let mut kernel = vec![Complex::new(0.0, 0.0); self.shape.cell_count()];

        // Mirrored around the anchor so the convolution reads each weight at its own offset.
        for (row_offset, column_offset, weight) in neighborhood.offsets() {
            let (row, column) = self.shape.wrap(
                anchor_row as isize - row_offset,
                anchor_column as isize - column_offset,
            );
            kernel[row * width + column] = Complex::new(f64::from(weight), 0.0);
        }

        self.forward
            .apply(&mut kernel, &mut self.transposed, &mut self.scratch, self.shape);
        kernel
    }
}

/// Kernel position of the mask center: `(H/2 - 1, W/2 - 1)` on the torus.
fn kernel_anchor(shape: BoardShape) -> (usize, usize) {
    let (height, width) = (shape.height(), shape.width());
    ((height / 2 + height - 1) % height, (width / 2 + width - 1) % width)
}

fn round_count(value: f64) -> u32 {
    let rounded = value.round();
    debug_assert!(
        (value - rounded).abs() <= ROUNDING_TOLERANCE,
        "neighbor count {value} drifted beyond rounding tolerance",
    );
    if rounded <= 0.0 {
        0
    } else {
        rounded as u32
    }
}

/// Computes weighted neighbor counts by direct toroidal summation.
///
/// Runs in `O(cells * mask_cells)`.
#[must_use]
pub fn direct_neighbor_counts(neighborhood: &Neighborhood, board: &Board) -> Vec<u32> {
    let shape = board.shape();
    let offsets: Vec<(isize, isize, u32)> = neighborhood.offsets().collect();
    let mut counts = Vec::with_capacity(shape.cell_count());
    for row in 0..shape.height() {
        for column in 0..shape.width() {
            let count = offsets
                .iter()
                .map(|(row_offset, column_offset, weight)| {
                    weight
                        * u32::from(board.get_wrapped(
                            row as isize + row_offset,
                            column as isize + column_offset,
                        ))
                })
                .sum();
            counts.push(count);
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchor_sits_one_before_the_board_midpoint() {
        let anchor = |height, width| {
            kernel_anchor(BoardShape::new(height, width).expect("valid shape"))
        };
        assert_eq!(anchor(64, 128), (31, 63));
        assert_eq!(anchor(5, 5), (1, 1));
        assert_eq!(anchor(1, 2), (0, 0));
        assert_eq!(anchor(3, 1), (0, 0));
    }

    #[test]
    fn rounding_snaps_residue_to_the_nearest_count() {
        assert_eq!(round_count(2.999_999_9), 3);
        assert_eq!(round_count(3.000_000_1), 3);
        assert_eq!(round_count(-0.000_000_1), 0);
        assert_eq!(round_count(0.0), 0);
    }

    #[test]
    fn oversized_neighborhood_is_rejected() {
        let shape = BoardShape::new(4, 12).expect("valid shape");
        let error = ToroidalConvolver::new(&Neighborhood::square(2, true), shape)
            .expect_err("5x5 mask must not fit a 4-row board");
        assert_eq!(
            error,
            ConstructionError::NeighborhoodExceedsBoard {
                neighborhood_height: 5,
                neighborhood_width: 5,
                board_height: 4,
                board_width: 12,
            }
        );
    }
}
