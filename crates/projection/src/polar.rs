//! Polar stereographic projection (variant B, latitude of true scale).
//!
//! Used by EPSG:3413 (NSIDC Sea Ice North) and EPSG:3031 (Antarctic).

use std::f64::consts::FRAC_PI_2;

use crate::ellipsoid::{msfn, phi_from_ts, tsfn, Ellipsoid, WGS84};
use crate::error::ProjError;
use crate::Projection;

#[derive(Debug, Clone)]
pub struct PolarStereographic {
    ellipsoid: Ellipsoid,
    /// Longitude of the straight vertical meridian, radians
    lon0: f64,
    is_north: bool,
    /// a * m_c / t_c
    akm: f64,
}

impl PolarStereographic {
    /// `lat_ts` is the latitude of true scale; its sign picks the pole.
    pub fn new(ellipsoid: Ellipsoid, lon0: f64, lat_ts: f64) -> Self {
        let e = ellipsoid.e();
        let lat_c = lat_ts.abs();
        let akm = ellipsoid.a * msfn(lat_c, ellipsoid.e2) / tsfn(lat_c, e);

        Self {
            ellipsoid,
            lon0,
            is_north: lat_ts >= 0.0,
            akm,
        }
    }

    /// EPSG:3413, lon0 = -45°, true scale at 70°N.
    pub fn arctic() -> Self {
        Self::new(WGS84, (-45.0_f64).to_radians(), 70.0_f64.to_radians())
    }

    /// EPSG:3031, lon0 = 0°, true scale at 71°S.
    pub fn antarctic() -> Self {
        Self::new(WGS84, 0.0, (-71.0_f64).to_radians())
    }
}

impl Projection for PolarStereographic {
    fn forward(&self, lon: f64, lat: f64) -> Result<(f64, f64), ProjError> {
        let lat_adj = if self.is_north { lat } else { -lat };
        if lat_adj <= -FRAC_PI_2 {
            // opposite pole maps to infinity
            return Err(ProjError::OutOfDomain {
                x: lon.to_degrees(),
                y: lat.to_degrees(),
            });
        }

        let rho = self.akm * tsfn(lat_adj, self.ellipsoid.e());
        let dlam = lon - self.lon0;

        let x = rho * dlam.sin();
        let y = if self.is_north {
            -rho * dlam.cos()
        } else {
            rho * dlam.cos()
        };
        Ok((x, y))
    }

    fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64), ProjError> {
        let rho = (x * x + y * y).sqrt();
        let lat_adj = phi_from_ts(rho / self.akm, self.ellipsoid.e());

        if self.is_north {
            Ok((self.lon0 + x.atan2(-y), lat_adj))
        } else {
            Ok((self.lon0 + x.atan2(y), -lat_adj))
        }
    }
}
