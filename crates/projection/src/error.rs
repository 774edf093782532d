//! Projection error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProjError {
    #[error("Unable to find projection: EPSG:{0}")]
    UnknownEpsg(u32),

    #[error("Transform failed: {0}")]
    TransformFailed(String),

    #[error("Point outside projection domain: ({x}, {y})")]
    OutOfDomain { x: f64, y: f64 },
}
