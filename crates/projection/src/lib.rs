//! Coordinate reference system transformations.
//!
//! The CRSs in [`wms_common::CrsCode`] with a dedicated variant are
//! implemented from scratch on the WGS84/GRS80 ellipsoids. Any other EPSG
//! code is handed to `proj4rs`.

pub mod albers;
pub mod ellipsoid;
pub mod error;
pub mod fallback;
pub mod geographic;
pub mod mercator;
pub mod polar;
pub mod transform;
pub mod transverse_mercator;

pub use error::ProjError;
pub use transform::Pipeline;

/// A map projection between geodetic coordinates and plane coordinates.
///
/// Angles are in radians; plane coordinates are in meters.
pub trait Projection: Send + Sync {
    /// (lon, lat) -> (easting, northing)
    fn forward(&self, lon: f64, lat: f64) -> Result<(f64, f64), ProjError>;

    /// (easting, northing) -> (lon, lat)
    fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64), ProjError>;
}
