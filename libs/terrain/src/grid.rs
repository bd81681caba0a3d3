use bevy::prelude::*;

use crate::error::{Result, TerrainError};

/// Largest accepted displacement bound. Keeps every average and every
/// accumulated height comfortably inside `i32`.
pub const MAX_AMPLITUDE: u32 = 1 << 24;

/// Square height field, `dimension x dimension` cells stored row-major.
///
/// Rows are the first index everywhere: `x` inside the generator, `i` inside
/// the projector. Once generated the grid is shared read-only by both views.
#[derive(Resource, Clone, Debug, PartialEq, Eq)]
pub struct HeightGrid {
    dimension: usize,
    amplitude: u32,
    cells: Vec<i32>,
}

impl HeightGrid {
    /// Allocates a zero-filled grid after validating the configuration.
    pub fn new(dimension: usize, amplitude: u32) -> Result<Self> {
        validate_dimension(dimension)?;
        validate_amplitude(amplitude)?;
        Ok(Self {
            dimension,
            amplitude,
            cells: vec![0; dimension * dimension],
        })
    }

    /// Wraps existing heights, e.g. a hand-built fixture.
    pub fn from_cells(dimension: usize, amplitude: u32, cells: Vec<i32>) -> Result<Self> {
        validate_dimension(dimension)?;
        validate_amplitude(amplitude)?;
        let expected = dimension * dimension;
        if cells.len() != expected {
            return Err(TerrainError::CellCountMismatch {
                dimension,
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self {
            dimension,
            amplitude,
            cells,
        })
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn amplitude(&self) -> u32 {
        self.amplitude
    }

    /// Height at `(row, col)`.
    ///
    /// # Panics
    /// When either index is `>= dimension`.
    pub fn get(&self, row: usize, col: usize) -> i32 {
        self.cells[self.index(row, col)]
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, height: i32) {
        let index = self.index(row, col);
        self.cells[index] = height;
    }

    pub fn cells(&self) -> &[i32] {
        &self.cells
    }

    pub fn rows(&self) -> impl Iterator<Item = &[i32]> + '_ {
        self.cells.chunks_exact(self.dimension)
    }

    /// Lowest and highest height currently stored.
    pub fn min_max(&self) -> (i32, i32) {
        self.cells
            .iter()
            .fold((i32::MAX, i32::MIN), |(lo, hi), &h| (lo.min(h), hi.max(h)))
    }

    fn index(&self, row: usize, col: usize) -> usize {
        let n = self.dimension;
        assert!(
            row < n && col < n,
            "cell ({row}, {col}) is outside the {n}x{n} grid"
        );
        row * n + col
    }
}

/// Only `2^k + 1` sizes (k >= 1) subdivide down to integer midpoints without
/// running past the last row or column.
pub fn validate_dimension(dimension: usize) -> Result<()> {
    if dimension % 2 == 0 {
        return Err(TerrainError::EvenDimension { dimension });
    }
    if dimension < 3 {
        return Err(TerrainError::DimensionTooSmall { dimension });
    }
    if !(dimension - 1).is_power_of_two() {
        return Err(TerrainError::DimensionNotPowerOfTwoPlusOne { dimension });
    }
    Ok(())
}

fn validate_amplitude(amplitude: u32) -> Result<()> {
    if amplitude > MAX_AMPLITUDE {
        return Err(TerrainError::AmplitudeTooLarge {
            amplitude,
            max: MAX_AMPLITUDE,
        });
    }
    Ok(())
}
