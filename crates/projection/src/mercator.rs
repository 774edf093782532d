//! Mercator projections.
//!
//! - Web Mercator (EPSG:3857): spherical formulas on the WGS84 semi-major axis.
//! - World Mercator (EPSG:3395): ellipsoidal, true scale at the equator.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use crate::ellipsoid::{phi_from_ts, tsfn, Ellipsoid, WGS84};
use crate::error::ProjError;
use crate::Projection;

/// Web Mercator projection (EPSG:3857).
#[derive(Debug, Clone)]
pub struct WebMercator {
    a: f64,
}

impl WebMercator {
    pub fn new() -> Self {
        Self { a: WGS84.a }
    }
}

impl Default for WebMercator {
    fn default() -> Self {
        Self::new()
    }
}

impl Projection for WebMercator {
    fn forward(&self, lon: f64, lat: f64) -> Result<(f64, f64), ProjError> {
        if lat.abs() >= FRAC_PI_2 {
            return Err(ProjError::OutOfDomain {
                x: lon.to_degrees(),
                y: lat.to_degrees(),
            });
        }
        let x = self.a * lon;
        let y = self.a * (FRAC_PI_4 + lat / 2.0).tan().ln();
        Ok((x, y))
    }

    fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64), ProjError> {
        let lon = x / self.a;
        let lat = 2.0 * (y / self.a).exp().atan() - FRAC_PI_2;
        Ok((lon, lat))
    }
}

/// Ellipsoidal Mercator with true scale at the equator (EPSG:3395).
#[derive(Debug, Clone)]
pub struct WorldMercator {
    ellipsoid: Ellipsoid,
}

impl WorldMercator {
    pub fn new() -> Self {
        Self { ellipsoid: WGS84 }
    }
}

impl Default for WorldMercator {
    fn default() -> Self {
        Self::new()
    }
}

impl Projection for WorldMercator {
    fn forward(&self, lon: f64, lat: f64) -> Result<(f64, f64), ProjError> {
        if lat.abs() >= FRAC_PI_2 {
            return Err(ProjError::OutOfDomain {
                x: lon.to_degrees(),
                y: lat.to_degrees(),
            });
        }
        let x = self.ellipsoid.a * lon;
        let y = -self.ellipsoid.a * tsfn(lat, self.ellipsoid.e()).ln();
        Ok((x, y))
    }

    fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64), ProjError> {
        let lon = x / self.ellipsoid.a;
        let lat = phi_from_ts((-y / self.ellipsoid.a).exp(), self.ellipsoid.e());
        Ok((lon, lat))
    }
}
