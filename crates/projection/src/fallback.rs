//! `proj4rs` bridge for EPSG codes without a native implementation.

use proj4rs::Proj;
use tracing::debug;

use crate::error::ProjError;

/// Forward transform between two EPSG codes resolved by `proj4rs`.
///
/// `proj4rs` works in radians for geographic CRSs; this wrapper takes and
/// returns degrees there, and meters for projected CRSs.
pub struct Proj4Transform {
    src: Proj,
    dst: Proj,
    src_is_geo: bool,
    dst_is_geo: bool,
}

impl Proj4Transform {
    pub fn new(src_epsg: u32, dst_epsg: u32) -> Result<Self, ProjError> {
        let src = resolve(src_epsg)?;
        let dst = resolve(dst_epsg)?;
        let src_is_geo = src.is_latlong();
        let dst_is_geo = dst.is_latlong();
        debug!(src_epsg, dst_epsg, "Using proj4rs transform");
        Ok(Self {
            src,
            dst,
            src_is_geo,
            dst_is_geo,
        })
    }

    /// Transform one point from the source CRS into the destination CRS.
    pub fn transform(&self, x: f64, y: f64) -> Result<(f64, f64), ProjError> {
        let mut point = if self.src_is_geo {
            (x.to_radians(), y.to_radians(), 0.0)
        } else {
            (x, y, 0.0)
        };

        proj4rs::transform::transform(&self.src, &self.dst, &mut point)
            .map_err(|e| ProjError::TransformFailed(e.to_string()))?;

        if self.dst_is_geo {
            Ok((point.0.to_degrees(), point.1.to_degrees()))
        } else {
            Ok((point.0, point.1))
        }
    }
}

fn resolve(epsg: u32) -> Result<Proj, ProjError> {
    Proj::from_user_string(&format!("EPSG:{epsg}")).map_err(|_| ProjError::UnknownEpsg(epsg))
}
