use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::Result;
use crate::grid::HeightGrid;
use crate::types::TerrainConfig;

/// Midpoint-displacement height map builder.
///
/// Every displacement, at every subdivision level, is drawn from the same
/// `[-amplitude, amplitude]` range. There is no per-level decay.
pub struct HeightMapGenerator<R: Rng = StdRng> {
    grid: HeightGrid,
    rng: R,
    draws: u64,
}

impl HeightMapGenerator<StdRng> {
    /// Builds a generator from config. Without a seed the RNG is seeded from
    /// the operating system.
    pub fn from_config(config: &TerrainConfig) -> Result<Self> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::new(config.dimension, config.amplitude, rng)
    }
}

impl<R: Rng> HeightMapGenerator<R> {
    pub fn new(dimension: usize, amplitude: u32, rng: R) -> Result<Self> {
        Ok(Self {
            grid: HeightGrid::new(dimension, amplitude)?,
            rng,
            draws: 0,
        })
    }

    pub fn grid(&self) -> &HeightGrid {
        &self.grid
    }

    pub fn into_grid(self) -> HeightGrid {
        self.grid
    }

    /// Number of displacement values drawn so far.
    pub fn draw_count(&self) -> u64 {
        self.draws
    }

    /// Populates the whole grid. A second call re-seeds the corners and
    /// overwrites every subdivided cell with fresh draws.
    pub fn generate(&mut self) {
        let dimension = self.grid.dimension();
        let last = dimension - 1;

        self.seed_corners();

        for step in subdivision_steps(dimension) {
            for x in (0..last).step_by(step) {
                for y in (0..last).step_by(step) {
                    self.diamond_step(x, y, step);
                }
            }

            for x in (0..last).step_by(step) {
                for y in (0..last).step_by(step) {
                    self.square_step(x, y, step);
                }
            }

            debug!("subdivided height map at step {step}");
        }

        let (lo, hi) = self.grid.min_max();
        info!(
            "generated {dimension}x{dimension} height map (amplitude {}, {} draws, heights {lo}..={hi})",
            self.grid.amplitude(),
            self.draws
        );
    }

    /// One draw, shared by all four corners.
    fn seed_corners(&mut self) {
        let last = self.grid.dimension() - 1;
        let h = self.displacement();
        self.grid.set(0, 0, h);
        self.grid.set(0, last, h);
        self.grid.set(last, 0, h);
        self.grid.set(last, last, h);
    }

    /// The top-right sample is taken from column `x + step`, not `y + step`.
    fn diamond_step(&mut self, x: usize, y: usize, step: usize) {
        let tl = self.grid.get(x, y);
        let tr = self.grid.get(x, x + step);
        let bl = self.grid.get(x + step, y);
        let br = self.grid.get(x + step, y + step);
        let avg = average(&[tl, tr, bl, br]);

        let half = step / 2;
        let h = avg + self.displacement();
        self.grid.set(x + half, y + half, h);
    }

    /// Each edge midpoint averages its two corners with the square's centre.
    fn square_step(&mut self, x: usize, y: usize, step: usize) {
        let half = step / 2;
        let center = self.grid.get(x + half, y + half);

        let top_left = self.grid.get(x, y);
        let top_right = self.grid.get(x, y + step);
        let bottom_left = self.grid.get(x + step, y);
        let bottom_right = self.grid.get(x + step, y + step);

        let top = average(&[top_left, top_right, center]) + self.displacement();
        self.grid.set(x, y + half, top);

        let left = average(&[top_left, bottom_left, center]) + self.displacement();
        self.grid.set(x + half, y, left);

        let right = average(&[top_right, bottom_right, center]) + self.displacement();
        self.grid.set(x + half, y + step, right);

        let bottom = average(&[bottom_left, bottom_right, center]) + self.displacement();
        self.grid.set(x + step, y + half, bottom);
    }

    fn displacement(&mut self) -> i32 {
        // Bounded by MAX_AMPLITUDE, so the cast cannot wrap.
        let h = self.grid.amplitude() as i32;
        self.draws += 1;
        self.rng.random_range(-h..=h)
    }
}

/// Step sizes visited by the subdivision: `N - 1, (N - 1) / 2, ...` down to 2.
pub fn subdivision_steps(dimension: usize) -> impl Iterator<Item = usize> {
    std::iter::successors(Some(dimension.saturating_sub(1)), |&step| Some(step / 2))
        .take_while(|&step| step > 1)
}

/// Truncating integer mean.
fn average(values: &[i32]) -> i32 {
    let sum: i64 = values.iter().map(|&v| i64::from(v)).sum();
    (sum / values.len() as i64) as i32
}

/// Convenience for the common path: validate, seed and generate in one go.
pub fn generate_height_grid(config: &TerrainConfig) -> Result<HeightGrid> {
    let mut generator = HeightMapGenerator::from_config(config)?;
    generator.generate();
    Ok(generator.into_grid())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TerrainError;

    fn seeded(dimension: usize, amplitude: u32, seed: u64) -> HeightMapGenerator<StdRng> {
        HeightMapGenerator::new(dimension, amplitude, StdRng::seed_from_u64(seed)).unwrap()
    }

    fn corners(grid: &HeightGrid) -> [i32; 4] {
        let last = grid.dimension() - 1;
        [
            grid.get(0, 0),
            grid.get(0, last),
            grid.get(last, 0),
            grid.get(last, last),
        ]
    }

    #[test]
    fn even_dimension_fails_construction() {
        let err = HeightMapGenerator::new(64, 1, StdRng::seed_from_u64(0))
            .err()
            .unwrap();
        assert!(matches!(err, TerrainError::EvenDimension { dimension: 64 }));
    }

    #[test]
    fn zero_amplitude_three_by_three_is_flat() {
        let mut generator = seeded(3, 0, 7);
        generator.generate();
        assert!(generator.grid().cells().iter().all(|&h| h == 0));
    }

    #[test]
    fn zero_amplitude_stays_flat_at_any_size() {
        let mut generator = seeded(33, 0, 99);
        generator.generate();
        assert!(generator.grid().cells().iter().all(|&h| h == 0));
    }

    #[test]
    fn corners_share_one_draw() {
        for seed in 0..20 {
            let mut generator = seeded(9, 5, seed);
            generator.generate();
            let [a, b, c, d] = corners(generator.grid());
            assert!(a == b && b == c && c == d, "seed {seed}: {a} {b} {c} {d}");
            assert!((-5..=5).contains(&a));
        }
    }

    #[test]
    fn step_sequence_halves_to_one() {
        let steps: Vec<usize> = subdivision_steps(65).collect();
        assert_eq!(steps, vec![64, 32, 16, 8, 4, 2]);
        assert_eq!(subdivision_steps(3).collect::<Vec<_>>(), vec![2]);

        for k in 1..12u32 {
            let dimension = (1usize << k) + 1;
            assert_eq!(subdivision_steps(dimension).count(), k as usize);
        }
    }

    #[test]
    fn draw_count_is_one_plus_five_per_lattice_cell() {
        let mut generator = seeded(3, 1, 1);
        generator.generate();
        assert_eq!(generator.draw_count(), 1 + 5);

        // Levels visit 1 and then 4 lattice cells.
        let mut generator = seeded(5, 1, 1);
        generator.generate();
        assert_eq!(generator.draw_count(), 1 + 5 * (1 + 4));

        let mut generator = seeded(65, 1, 1);
        generator.generate();
        let cells: u64 = (0..6).map(|level| 1u64 << (2 * level)).sum();
        assert_eq!(generator.draw_count(), 1 + 5 * cells);
    }

    #[test]
    fn second_generate_reseeds_and_overwrites() {
        let mut generator = seeded(17, 4, 3);
        generator.generate();
        let first_draws = generator.draw_count();

        generator.generate();
        assert_eq!(generator.draw_count(), 2 * first_draws);

        let [a, b, c, d] = corners(generator.grid());
        assert!(a == b && b == c && c == d);
        assert!((-4..=4).contains(&a));
    }

    #[test]
    fn same_seed_same_terrain() {
        let mut a = seeded(33, 3, 42);
        let mut b = seeded(33, 3, 42);
        a.generate();
        b.generate();
        assert_eq!(a.grid(), b.grid());
    }

    #[test]
    fn diamond_reads_top_right_from_row_indexed_column() {
        let mut grid = HeightGrid::new(5, 0).unwrap();
        grid.set(2, 4, 40);
        let mut generator = HeightMapGenerator {
            grid,
            rng: StdRng::seed_from_u64(0),
            draws: 0,
        };

        generator.diamond_step(2, 0, 2);

        // tl (2,0)=0, tr (2,4)=40, bl (4,0)=0, br (4,2)=0
        assert_eq!(generator.grid().get(3, 1), 10);
    }

    #[test]
    fn square_step_uses_three_point_truncating_average() {
        let mut grid = HeightGrid::new(3, 0).unwrap();
        grid.set(0, 0, 3);
        grid.set(0, 2, 6);
        grid.set(2, 0, -4);
        grid.set(2, 2, 12);
        grid.set(1, 1, 0);
        let mut generator = HeightMapGenerator {
            grid,
            rng: StdRng::seed_from_u64(0),
            draws: 0,
        };

        generator.square_step(0, 0, 2);

        let grid = generator.grid();
        assert_eq!(grid.get(0, 1), 3); // (3 + 6 + 0) / 3
        assert_eq!(grid.get(1, 0), 0); // (3 - 4 + 0) / 3 truncates toward zero
        assert_eq!(grid.get(1, 2), 6); // (6 + 12 + 0) / 3
        assert_eq!(grid.get(2, 1), 2); // (-4 + 12 + 0) / 3
        assert_eq!(generator.draw_count(), 4);
    }

    #[test]
    fn average_truncates_toward_zero() {
        assert_eq!(average(&[-1, -1, -1, 0]), 0);
        assert_eq!(average(&[-4, 0, 0]), -1);
        assert_eq!(average(&[7, 0, 0, 0]), 1);
    }

    #[test]
    fn generate_height_grid_uses_config_seed() {
        let config = TerrainConfig {
            dimension: 17,
            amplitude: 2,
            seed: Some(11),
            ..TerrainConfig::default()
        };
        let a = generate_height_grid(&config).unwrap();
        let b = generate_height_grid(&config).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.dimension(), 17);
    }
}
