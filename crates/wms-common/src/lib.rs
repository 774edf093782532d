//! Common types shared by the tile request generator crates.

pub mod bbox;
pub mod crs;
pub mod grid;
pub mod tile;

pub use bbox::BoundingBox;
pub use crs::{CrsCode, CrsParseError};
pub use grid::{cell_bbox, Level0Shape, LevelGrid, MAX_LEVEL};
pub use tile::TileSize;
