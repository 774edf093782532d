//! Transverse Mercator projection, Krüger n-series to 6th order.
//!
//! Follows Karney (2011). Accurate to well under a millimeter within the
//! ±3° UTM zones and usable out to roughly ±40° from the central meridian.

use crate::ellipsoid::{Ellipsoid, WGS84};
use crate::error::ProjError;
use crate::Projection;

#[derive(Debug, Clone)]
pub struct TransverseMercator {
    ellipsoid: Ellipsoid,
    lon0: f64,
    k0: f64,
    false_easting: f64,
    false_northing: f64,
    /// Rectifying radius A
    a_hat: f64,
    alpha: [f64; 6],
    beta: [f64; 6],
    /// Rectifying latitude of the origin
    m0: f64,
}

impl TransverseMercator {
    pub fn new(
        ellipsoid: Ellipsoid,
        lon0: f64,
        lat0: f64,
        k0: f64,
        false_easting: f64,
        false_northing: f64,
    ) -> Self {
        let n = ellipsoid.n;
        let n2 = n * n;
        let n3 = n2 * n;
        let n4 = n3 * n;
        let n5 = n4 * n;
        let n6 = n5 * n;

        let alpha = [
            n / 2.0 - 2.0 / 3.0 * n2 + 5.0 / 16.0 * n3 + 41.0 / 180.0 * n4 - 127.0 / 288.0 * n5
                + 7891.0 / 37800.0 * n6,
            13.0 / 48.0 * n2 - 3.0 / 5.0 * n3 + 557.0 / 1440.0 * n4 + 281.0 / 630.0 * n5
                - 1983433.0 / 1935360.0 * n6,
            61.0 / 240.0 * n3 - 103.0 / 140.0 * n4
                + 15061.0 / 26880.0 * n5
                + 167603.0 / 181440.0 * n6,
            49561.0 / 161280.0 * n4 - 179.0 / 168.0 * n5 + 6601661.0 / 7257600.0 * n6,
            34729.0 / 80640.0 * n5 - 3418889.0 / 1995840.0 * n6,
            212378941.0 / 319334400.0 * n6,
        ];
        let beta = [
            n / 2.0 - 2.0 / 3.0 * n2 + 37.0 / 96.0 * n3 - 1.0 / 360.0 * n4 - 81.0 / 512.0 * n5
                + 96199.0 / 604800.0 * n6,
            1.0 / 48.0 * n2 + 1.0 / 15.0 * n3 - 437.0 / 1440.0 * n4 + 46.0 / 105.0 * n5
                - 1118711.0 / 3870720.0 * n6,
            17.0 / 480.0 * n3 - 37.0 / 840.0 * n4 - 209.0 / 4480.0 * n5 + 5569.0 / 90720.0 * n6,
            4397.0 / 161280.0 * n4 - 11.0 / 504.0 * n5 - 830251.0 / 7257600.0 * n6,
            4583.0 / 161280.0 * n5 - 108847.0 / 3991680.0 * n6,
            20648693.0 / 638668800.0 * n6,
        ];

        Self {
            ellipsoid,
            lon0,
            k0,
            false_easting,
            false_northing,
            a_hat: ellipsoid.a / (1.0 + n) * (1.0 + n2 / 4.0 + n4 / 64.0),
            alpha,
            beta,
            m0: rectifying_latitude(lat0, n),
        }
    }

    /// WGS84 / UTM zone `zone` (1-60), northern or southern hemisphere.
    pub fn utm_zone(zone: u8, north: bool) -> Self {
        let lon0 = (zone as f64 * 6.0 - 183.0).to_radians();
        let false_northing = if north { 0.0 } else { 10_000_000.0 };
        Self::new(WGS84, lon0, 0.0, 0.9996, 500_000.0, false_northing)
    }

    /// tan(conformal latitude) from tan(geodetic latitude).
    fn conformal_tau(&self, tau: f64) -> f64 {
        let e = self.ellipsoid.e();
        let sigma = (e * (e * tau / (1.0 + tau * tau).sqrt()).atanh()).sinh();
        tau * (1.0 + sigma * sigma).sqrt() - sigma * (1.0 + tau * tau).sqrt()
    }
}

/// Rectifying latitude μ(φ), i.e. meridian arc length divided by A.
fn rectifying_latitude(phi: f64, n: f64) -> f64 {
    let n2 = n * n;
    let n3 = n2 * n;
    let n4 = n3 * n;

    let a2 = -3.0 / 2.0 * n + 9.0 / 16.0 * n3;
    let a4 = 15.0 / 16.0 * n2 - 15.0 / 32.0 * n4;
    let a6 = -35.0 / 48.0 * n3;
    let a8 = 315.0 / 512.0 * n4;

    phi + a2 * (2.0 * phi).sin()
        + a4 * (4.0 * phi).sin()
        + a6 * (6.0 * phi).sin()
        + a8 * (8.0 * phi).sin()
}

impl Projection for TransverseMercator {
    fn forward(&self, lon: f64, lat: f64) -> Result<(f64, f64), ProjError> {
        let dlam = lon - self.lon0;
        let tau_p = self.conformal_tau(lat.tan());

        let xi_p = tau_p.atan2(dlam.cos());
        let eta_p = (dlam.sin() / (tau_p * tau_p + dlam.cos() * dlam.cos()).sqrt()).asinh();

        let mut xi = xi_p;
        let mut eta = eta_p;
        for (j, a) in self.alpha.iter().enumerate() {
            let k = 2.0 * (j + 1) as f64;
            xi += a * (k * xi_p).sin() * (k * eta_p).cosh();
            eta += a * (k * xi_p).cos() * (k * eta_p).sinh();
        }

        let x = self.false_easting + self.k0 * self.a_hat * eta;
        let y = self.false_northing + self.k0 * self.a_hat * (xi - self.m0);
        if !x.is_finite() || !y.is_finite() {
            return Err(ProjError::OutOfDomain {
                x: lon.to_degrees(),
                y: lat.to_degrees(),
            });
        }
        Ok((x, y))
    }

    fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64), ProjError> {
        let xi = (y - self.false_northing) / (self.k0 * self.a_hat) + self.m0;
        let eta = (x - self.false_easting) / (self.k0 * self.a_hat);

        let mut xi_p = xi;
        let mut eta_p = eta;
        for (j, b) in self.beta.iter().enumerate() {
            let k = 2.0 * (j + 1) as f64;
            xi_p -= b * (k * xi).sin() * (k * eta).cosh();
            eta_p -= b * (k * xi).cos() * (k * eta).sinh();
        }

        let tau_p = xi_p.sin() / (eta_p.sinh().powi(2) + xi_p.cos().powi(2)).sqrt();
        let dlam = eta_p.sinh().atan2(xi_p.cos());

        // Newton iteration for tan(φ) from tan(χ)
        let e2 = self.ellipsoid.e2;
        let mut tau = tau_p;
        for _ in 0..10 {
            let tau_i = self.conformal_tau(tau);
            let dtau = (tau_p - tau_i) / (1.0 + tau_i * tau_i).sqrt()
                * (1.0 + (1.0 - e2) * tau * tau)
                / ((1.0 - e2) * (1.0 + tau * tau).sqrt());
            tau += dtau;
            if dtau.abs() < 1e-14 * tau.abs().max(1.0) {
                break;
            }
        }

        Ok((self.lon0 + dlam, tau.atan()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_central_meridian_easting() {
        let proj = TransverseMercator::utm_zone(33, true);
        let (e, n) = proj
            .forward(15.0_f64.to_radians(), 52.0_f64.to_radians())
            .unwrap();
        assert!((e - 500_000.0).abs() < 1e-6);
        assert!(n > 5_760_000.0 && n < 5_762_000.0, "northing = {n}");
    }

    #[test]
    fn test_equator_northing() {
        let north = TransverseMercator::utm_zone(31, true);
        let south = TransverseMercator::utm_zone(31, false);
        let (_, n) = north.forward(3.0_f64.to_radians(), 0.0).unwrap();
        assert!(n.abs() < 1e-6);
        let (_, s) = south.forward(3.0_f64.to_radians(), 0.0).unwrap();
        assert!((s - 10_000_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_roundtrip() {
        let proj = TransverseMercator::utm_zone(33, true);
        for (lon_deg, lat_deg) in [(10.75_f64, 59.91_f64), (15.0, 0.5), (17.9, 70.0)] {
            let (e, n) = proj.forward(lon_deg.to_radians(), lat_deg.to_radians()).unwrap();
            let (lon, lat) = proj.inverse(e, n).unwrap();
            assert!((lon.to_degrees() - lon_deg).abs() < 1e-9);
            assert!((lat.to_degrees() - lat_deg).abs() < 1e-9);
        }
    }
}
