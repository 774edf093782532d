//! Albers Equal Area Conic projection.
//!
//! EPSG:5070 (NAD83 / Conus Albers) is the only preset.

use crate::ellipsoid::{msfn, qsfn, Ellipsoid, GRS80};
use crate::error::ProjError;
use crate::Projection;

#[derive(Debug, Clone)]
pub struct AlbersEqualArea {
    ellipsoid: Ellipsoid,
    lon0: f64,
    n: f64,
    c: f64,
    rho0: f64,
}

impl AlbersEqualArea {
    /// All angles in radians: origin (`lat0`, `lon0`), standard parallels
    /// `lat1` and `lat2`.
    pub fn new(ellipsoid: Ellipsoid, lon0: f64, lat0: f64, lat1: f64, lat2: f64) -> Self {
        let e = ellipsoid.e();
        let m1 = msfn(lat1, ellipsoid.e2);
        let m2 = msfn(lat2, ellipsoid.e2);
        let q0 = qsfn(lat0, e);
        let q1 = qsfn(lat1, e);
        let q2 = qsfn(lat2, e);

        let n = if (lat1 - lat2).abs() > 1e-10 {
            (m1 * m1 - m2 * m2) / (q2 - q1)
        } else {
            lat1.sin()
        };
        let c = m1 * m1 + n * q1;
        let rho0 = ellipsoid.a * (c - n * q0).abs().sqrt() / n;

        Self {
            ellipsoid,
            lon0,
            n,
            c,
            rho0,
        }
    }

    /// EPSG:5070
    pub fn conus() -> Self {
        Self::new(
            GRS80,
            (-96.0_f64).to_radians(),
            23.0_f64.to_radians(),
            29.5_f64.to_radians(),
            45.5_f64.to_radians(),
        )
    }
}

impl Projection for AlbersEqualArea {
    fn forward(&self, lon: f64, lat: f64) -> Result<(f64, f64), ProjError> {
        let q = qsfn(lat, self.ellipsoid.e());
        let theta = self.n * (lon - self.lon0);
        let rho = self.ellipsoid.a * (self.c - self.n * q).abs().sqrt() / self.n;

        Ok((rho * theta.sin(), self.rho0 - rho * theta.cos()))
    }

    fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64), ProjError> {
        let dy = self.rho0 - y;
        let (xn, yn) = if self.n < 0.0 { (-x, -dy) } else { (x, dy) };

        let rho = (xn * xn + yn * yn).sqrt();
        let theta = xn.atan2(yn);
        let q = (self.c - (rho * self.n / self.ellipsoid.a).powi(2)) / self.n;

        // Newton iteration on q(φ)
        let e = self.ellipsoid.e();
        let e2 = self.ellipsoid.e2;
        let mut lat = (q / 2.0).clamp(-1.0, 1.0).asin();
        for _ in 0..15 {
            let esin = e * lat.sin();
            let one_minus = 1.0 - esin * esin;
            let dq = (1.0 - e2) * 2.0 * lat.cos() / (one_minus * one_minus);
            let delta = (q - qsfn(lat, e)) / dq;
            lat += delta;
            if delta.abs() < 1e-12 {
                break;
            }
        }

        Ok((self.lon0 + theta / self.n, lat))
    }
}
