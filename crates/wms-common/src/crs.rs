//! Coordinate Reference System identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An EPSG coordinate reference system code.
///
/// The CRSs the native projection pipeline knows about get their own
/// variant; everything else is carried as `Other` and resolved by the
/// fallback transform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub enum CrsCode {
    /// WGS84 Geographic (lon/lat in degrees)
    #[default]
    Epsg4326,
    /// Web Mercator (meters)
    Epsg3857,
    /// World Mercator on the WGS84 ellipsoid (meters)
    Epsg3395,
    /// NAD83 Geographic
    Epsg4269,
    /// Albers Equal Area (CONUS)
    Epsg5070,
    /// Polar Stereographic North
    Epsg3413,
    /// Polar Stereographic South
    Epsg3031,
    /// WGS84 / UTM zone, EPSG:32601-32660 (north) and 32701-32760 (south)
    Utm { zone: u8, north: bool },
    /// Any other EPSG code
    Other(u32),
}

impl CrsCode {
    /// Map a numeric EPSG code to a CRS.
    pub fn from_epsg(code: u32) -> Self {
        match code {
            4326 => CrsCode::Epsg4326,
            3857 | 900913 => CrsCode::Epsg3857,
            3395 => CrsCode::Epsg3395,
            4269 => CrsCode::Epsg4269,
            5070 => CrsCode::Epsg5070,
            3413 => CrsCode::Epsg3413,
            3031 => CrsCode::Epsg3031,
            32601..=32660 => CrsCode::Utm {
                zone: (code - 32600) as u8,
                north: true,
            },
            32701..=32760 => CrsCode::Utm {
                zone: (code - 32700) as u8,
                north: false,
            },
            other => CrsCode::Other(other),
        }
    }

    /// Parse a CRS string.
    ///
    /// Accepts formats like:
    /// - "4326"
    /// - "EPSG:4326" / "epsg:4326"
    /// - "CRS:84" (equivalent to EPSG:4326)
    pub fn from_wms_string(s: &str) -> Result<Self, CrsParseError> {
        let normalized = s.trim().to_uppercase();
        if normalized == "CRS:84" {
            return Ok(CrsCode::Epsg4326);
        }

        let digits = normalized.strip_prefix("EPSG:").unwrap_or(&normalized);
        digits
            .parse::<u32>()
            .map(CrsCode::from_epsg)
            .map_err(|_| CrsParseError::UnsupportedCrs(s.to_string()))
    }

    /// The numeric EPSG code.
    pub fn epsg(&self) -> u32 {
        match self {
            CrsCode::Epsg4326 => 4326,
            CrsCode::Epsg3857 => 3857,
            CrsCode::Epsg3395 => 3395,
            CrsCode::Epsg4269 => 4269,
            CrsCode::Epsg5070 => 5070,
            CrsCode::Epsg3413 => 3413,
            CrsCode::Epsg3031 => 3031,
            CrsCode::Utm { zone, north: true } => 32600 + *zone as u32,
            CrsCode::Utm { zone, north: false } => 32700 + *zone as u32,
            CrsCode::Other(code) => *code,
        }
    }
}

impl From<u32> for CrsCode {
    fn from(code: u32) -> Self {
        CrsCode::from_epsg(code)
    }
}

impl From<CrsCode> for u32 {
    fn from(crs: CrsCode) -> Self {
        crs.epsg()
    }
}

impl fmt::Display for CrsCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EPSG:{}", self.epsg())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CrsParseError {
    #[error("Unsupported CRS: {0}")]
    UnsupportedCrs(String),
}
