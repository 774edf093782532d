//! CRS-to-CRS point transforms.

use wms_common::CrsCode;

use crate::albers::AlbersEqualArea;
use crate::error::ProjError;
use crate::fallback::Proj4Transform;
use crate::geographic;
use crate::mercator::{WebMercator, WorldMercator};
use crate::polar::PolarStereographic;
use crate::transverse_mercator::TransverseMercator;
use crate::Projection;

/// One side of a native pipeline.
pub enum Endpoint {
    /// Degrees externally, radians internally.
    Geographic,
    /// Meters, through a native projection.
    Projected(Box<dyn Projection>),
}

impl Endpoint {
    fn native(code: CrsCode) -> Option<Self> {
        let endpoint = match code {
            CrsCode::Epsg4326 | CrsCode::Epsg4269 => Endpoint::Geographic,
            CrsCode::Epsg3857 => Endpoint::Projected(Box::new(WebMercator::new())),
            CrsCode::Epsg3395 => Endpoint::Projected(Box::new(WorldMercator::new())),
            CrsCode::Epsg5070 => Endpoint::Projected(Box::new(AlbersEqualArea::conus())),
            CrsCode::Epsg3413 => Endpoint::Projected(Box::new(PolarStereographic::arctic())),
            CrsCode::Epsg3031 => Endpoint::Projected(Box::new(PolarStereographic::antarctic())),
            CrsCode::Utm { zone, north } => {
                Endpoint::Projected(Box::new(TransverseMercator::utm_zone(zone, north)))
            }
            CrsCode::Other(_) => return None,
        };
        Some(endpoint)
    }
}

/// Transform from a source CRS into a destination CRS.
///
/// Identical codes short-circuit to an exact identity. Codes with a native
/// implementation on both sides go through [`Projection`]; anything else is
/// resolved by `proj4rs`.
pub enum Pipeline {
    Identity,
    Native { src: Endpoint, dst: Endpoint },
    Fallback(Box<Proj4Transform>),
}

impl Pipeline {
    pub fn new(src: CrsCode, dst: CrsCode) -> Result<Self, ProjError> {
        if src == dst {
            return Ok(Pipeline::Identity);
        }
        match (Endpoint::native(src), Endpoint::native(dst)) {
            (Some(src), Some(dst)) => Ok(Pipeline::Native { src, dst }),
            _ => Ok(Pipeline::Fallback(Box::new(Proj4Transform::new(
                src.epsg(),
                dst.epsg(),
            )?))),
        }
    }

    pub fn is_identity(&self) -> bool {
        matches!(self, Pipeline::Identity)
    }

    /// Transform a single point. Units are degrees for geographic CRSs and
    /// meters for projected ones.
    pub fn transform(&self, x: f64, y: f64) -> Result<(f64, f64), ProjError> {
        match self {
            Pipeline::Identity => Ok((x, y)),
            Pipeline::Native { src, dst } => {
                let (lon, lat) = match src {
                    Endpoint::Geographic => geographic::to_radians(x, y)?,
                    Endpoint::Projected(proj) => proj.inverse(x, y)?,
                };
                match dst {
                    Endpoint::Geographic => Ok(geographic::to_degrees(lon, lat)),
                    Endpoint::Projected(proj) => proj.forward(lon, lat),
                }
            }
            Pipeline::Fallback(ct) => ct.transform(x, y),
        }
    }

    /// Transform a batch of points, failing on the first bad one.
    pub fn transform_points(&self, points: &[(f64, f64)]) -> Result<Vec<(f64, f64)>, ProjError> {
        points.iter().map(|&(x, y)| self.transform(x, y)).collect()
    }
}
