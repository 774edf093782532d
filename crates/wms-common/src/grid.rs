//! Pyramid grid addressing over the geographic world extent.
//!
//! Level `L` splits a level-0 grid of `columns x rows` cells into
//! `columns * 2^L` by `rows * 2^L` cells spanning -180..180 by -90..90.
//! Cells are addressed by flooring a world point against the cell size, so
//! every cell edge is a whole multiple of the cell size from the origin.

use crate::BoundingBox;
use serde::{Deserialize, Serialize};

/// Longitude span of the world extent, in degrees.
pub const WORLD_WIDTH_DEG: f64 = 360.0;

/// Latitude span of the world extent, in degrees.
pub const WORLD_HEIGHT_DEG: f64 = 180.0;

/// Deepest supported level. `columns * 2^level` must fit in a u64.
pub const MAX_LEVEL: u32 = 30;

/// Grid shape at level 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level0Shape {
    pub columns: u32,
    pub rows: u32,
}

impl Level0Shape {
    pub fn new(columns: u32, rows: u32) -> Self {
        Self { columns, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.columns == 0 || self.rows == 0
    }
}

impl Default for Level0Shape {
    /// Two square 180° cells side by side.
    fn default() -> Self {
        Self::new(2, 1)
    }
}

/// Cell layout of a single pyramid level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelGrid {
    pub level: u32,
    pub num_cols: u64,
    pub num_rows: u64,
    /// Cell width in degrees
    pub cell_width: f64,
    /// Cell height in degrees
    pub cell_height: f64,
}

impl LevelGrid {
    /// Compute the grid at `level` for a level-0 shape.
    ///
    /// `level` must not exceed [`MAX_LEVEL`].
    pub fn new(level: u32, shape: Level0Shape) -> Self {
        debug_assert!(level <= MAX_LEVEL, "level {} exceeds {}", level, MAX_LEVEL);
        let scale = 1u64 << level;
        let num_cols = shape.columns as u64 * scale;
        let num_rows = shape.rows as u64 * scale;

        Self {
            level,
            num_cols,
            num_rows,
            cell_width: WORLD_WIDTH_DEG / num_cols as f64,
            cell_height: WORLD_HEIGHT_DEG / num_rows as f64,
        }
    }

    /// Bounding box of the cell that contains the world point `(x, y)`.
    ///
    /// No clamping is applied. Points on a grid line belong to the cell
    /// whose lower edge is that line, and negative coordinates floor toward
    /// negative infinity. The floored y value is used as the cell's top edge.
    pub fn cell_bbox(&self, x: f64, y: f64) -> BoundingBox {
        let left = (x / self.cell_width).floor() * self.cell_width;
        let top = (y / self.cell_height).floor() * self.cell_height;

        BoundingBox {
            min_x: left,
            min_y: top - self.cell_height,
            max_x: left + self.cell_width,
            max_y: top,
        }
    }

    /// Total number of cells at this level.
    pub fn len(&self) -> u64 {
        self.num_cols.saturating_mul(self.num_rows)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Bounding box of the cell containing `(x, y)` at `level`.
pub fn cell_bbox(x: f64, y: f64, level: u32, shape: Level0Shape) -> BoundingBox {
    LevelGrid::new(level, shape).cell_bbox(x, y)
}
