//! Reference ellipsoids and the auxiliary latitude functions shared by the
//! conformal and equal-area projections.

use std::f64::consts::FRAC_PI_2;

/// Reference ellipsoid parameters.
#[derive(Clone, Copy, Debug)]
pub struct Ellipsoid {
    /// Semi-major axis (meters)
    pub a: f64,
    /// Flattening
    pub f: f64,
    /// First eccentricity squared: 2f - f^2
    pub e2: f64,
    /// Third flattening: f / (2 - f)
    pub n: f64,
}

impl Ellipsoid {
    pub const fn new(a: f64, f: f64) -> Self {
        Self {
            a,
            f,
            e2: 2.0 * f - f * f,
            n: f / (2.0 - f),
        }
    }

    /// First eccentricity.
    pub fn e(&self) -> f64 {
        self.e2.sqrt()
    }
}

pub const WGS84: Ellipsoid = Ellipsoid::new(6_378_137.0, 1.0 / 298.257_223_563);
pub const GRS80: Ellipsoid = Ellipsoid::new(6_378_137.0, 1.0 / 298.257_222_101);

/// Isometric latitude helper t(φ) used by Mercator and stereographic.
pub fn tsfn(phi: f64, e: f64) -> f64 {
    let esin = e * phi.sin();
    (std::f64::consts::FRAC_PI_4 - phi / 2.0).tan() / ((1.0 - esin) / (1.0 + esin)).powf(e / 2.0)
}

/// Invert [`tsfn`] by fixed-point iteration.
pub fn phi_from_ts(ts: f64, e: f64) -> f64 {
    let mut phi = FRAC_PI_2 - 2.0 * ts.atan();
    for _ in 0..15 {
        let esin = e * phi.sin();
        let next = FRAC_PI_2 - 2.0 * (ts * ((1.0 - esin) / (1.0 + esin)).powf(e / 2.0)).atan();
        let delta = (next - phi).abs();
        phi = next;
        if delta < 1e-12 {
            break;
        }
    }
    phi
}

/// Radius of the parallel at φ, divided by `a`.
pub fn msfn(phi: f64, e2: f64) -> f64 {
    let sin = phi.sin();
    phi.cos() / (1.0 - e2 * sin * sin).sqrt()
}

/// Authalic q(φ) used by the equal-area projections.
pub fn qsfn(phi: f64, e: f64) -> f64 {
    let sin = phi.sin();
    if e < 1e-10 {
        return 2.0 * sin;
    }
    let esin = e * sin;
    (1.0 - e * e) * (sin / (1.0 - esin * esin) - (0.5 / e) * ((1.0 - esin) / (1.0 + esin)).ln())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wgs84_constants() {
        assert!((WGS84.e() - 0.081_819_190_842_622).abs() < 1e-12);
        assert!((WGS84.n - 0.001_679_220_386_383_705).abs() < 1e-12);
        assert!((WGS84.f - GRS80.f).abs() < 1e-8);
    }

    #[test]
    fn test_tsfn_roundtrip() {
        let e = WGS84.e();
        for deg in [-80.0_f64, -45.0, 0.0, 12.5, 60.0, 85.0] {
            let phi = deg.to_radians();
            assert!((phi_from_ts(tsfn(phi, e), e) - phi).abs() < 1e-11);
        }
    }

    #[test]
    fn test_qsfn_pole_bound() {
        let e = WGS84.e();
        let q_pole = qsfn(FRAC_PI_2, e);
        assert!(q_pole > 1.99 && q_pole < 2.0);
        assert!(qsfn(0.0, e).abs() < 1e-15);
    }
}
