//! Geographic (unprojected) coordinate handling.

use crate::error::ProjError;

/// Convert geographic degrees to radians, rejecting non-finite input.
pub fn to_radians(lon: f64, lat: f64) -> Result<(f64, f64), ProjError> {
    if !lon.is_finite() || !lat.is_finite() {
        return Err(ProjError::OutOfDomain { x: lon, y: lat });
    }
    Ok((lon.to_radians(), lat.to_radians()))
}

/// Convert geographic radians back to degrees.
pub fn to_degrees(lon: f64, lat: f64) -> (f64, f64) {
    (lon.to_degrees(), lat.to_degrees())
}
