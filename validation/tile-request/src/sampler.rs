//! Random tile candidate generation.

use rand::prelude::*;
use wms_common::{BoundingBox, Level0Shape, LevelGrid};

/// Source of the uniform draws behind each candidate.
pub trait RandomSource {
    /// Uniform integer in `min..=max`.
    fn level_in(&mut self, min: u32, max: u32) -> u32;

    /// Uniform float in `[0, 1)`.
    fn unit(&mut self) -> f64;
}

/// [`RandomSource`] backed by a `rand` generator.
pub struct RngSource<R: Rng> {
    rng: R,
}

impl RngSource<StdRng> {
    /// Use seed if provided for reproducible runs, otherwise use entropy.
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn level_in(&mut self, min: u32, max: u32) -> u32 {
        self.rng.gen_range(min..=max)
    }

    fn unit(&mut self) -> f64 {
        self.rng.gen()
    }
}

/// A sampled tile before filtering and reprojection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileCandidate {
    pub level: u32,
    pub bbox: BoundingBox,
}

/// Infinite stream of random tiles over a region.
///
/// Each draw picks a level uniformly, then a uniform point in the region,
/// and returns the cell containing that point. Larger cells are more likely
/// to be hit than smaller ones at the same level.
pub struct TileSampler {
    region: BoundingBox,
    min_level: u32,
    max_level: u32,
    shape: Level0Shape,
    source: Box<dyn RandomSource>,
}

impl TileSampler {
    pub fn new(
        region: BoundingBox,
        min_level: u32,
        max_level: u32,
        shape: Level0Shape,
        source: Box<dyn RandomSource>,
    ) -> Self {
        debug_assert!(min_level <= max_level);
        Self {
            region,
            min_level,
            max_level,
            shape,
            source,
        }
    }

    /// Draw the next candidate. Draw order is level, then x, then y.
    pub fn draw(&mut self) -> TileCandidate {
        let level = self.source.level_in(self.min_level, self.max_level);
        let x = self.region.min_x + self.source.unit() * self.region.width();
        let y = self.region.min_y + self.source.unit() * self.region.height();

        TileCandidate {
            level,
            bbox: LevelGrid::new(level, self.shape).cell_bbox(x, y),
        }
    }
}

impl Iterator for TileSampler {
    type Item = TileCandidate;

    fn next(&mut self) -> Option<TileCandidate> {
        Some(self.draw())
    }
}
