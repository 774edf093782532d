//! Request plan loading and validation.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use wms_common::{BoundingBox, CrsCode, Level0Shape, TileSize, MAX_LEVEL};

use crate::error::{RequestError, RequestResult};
use crate::format::format_g;

/// Program name recorded in the provenance annotation.
pub const PROGRAM_NAME: &str = "wms-tile-request";

/// Generation parameters, as loaded from YAML and/or the command line.
///
/// Every field may be left out of a plan file. Required values are checked
/// by [`RequestPlan::validate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestPlan {
    #[serde(default = "default_count")]
    pub count: u64,
    #[serde(default)]
    pub region: Option<BoundingBox>,
    #[serde(default)]
    pub min_level: Option<u32>,
    #[serde(default)]
    pub max_level: Option<u32>,
    #[serde(default)]
    pub tile_size: TileSize,
    #[serde(default)]
    pub level0: Level0Shape,
    #[serde(default)]
    pub srs: CrsCode,
    #[serde(default)]
    pub srs2: Option<CrsCode>,
    #[serde(default)]
    pub filter_within: Option<PathBuf>,
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub output2: Option<PathBuf>,
    #[serde(default)]
    pub seed: Option<u64>, // Optional RNG seed for reproducible runs
    #[serde(default)]
    pub max_attempts: Option<u64>,
}

fn default_count() -> u64 {
    100
}

impl Default for RequestPlan {
    fn default() -> Self {
        Self {
            count: default_count(),
            region: None,
            min_level: None,
            max_level: None,
            tile_size: TileSize::default(),
            level0: Level0Shape::default(),
            srs: CrsCode::default(),
            srs2: None,
            filter_within: None,
            output: None,
            output2: None,
            seed: None,
            max_attempts: None,
        }
    }
}

/// A validated plan with every default resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestConfig {
    pub count: u64,
    pub region: BoundingBox,
    pub min_level: u32,
    pub max_level: u32,
    pub tile_size: TileSize,
    pub level0: Level0Shape,
    pub srs: CrsCode,
    pub srs2: Option<CrsCode>,
    pub filter_within: Option<PathBuf>,
    pub output: PathBuf,
    /// Set exactly when `srs2` is
    pub output2: Option<PathBuf>,
    pub seed: Option<u64>,
    pub max_attempts: Option<u64>,
}

impl RequestPlan {
    /// Load a plan from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> RequestResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| RequestError::PlanFile {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        serde_yaml::from_str(&content).map_err(|e| RequestError::PlanFile {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Check required values and ranges, and fill in default output paths.
    pub fn validate(&self) -> RequestResult<RequestConfig> {
        let region = self.region.ok_or(RequestError::MissingArgument("-region"))?;
        let min_level = self
            .min_level
            .ok_or(RequestError::MissingArgument("-minlevel"))?;
        let max_level = self
            .max_level
            .ok_or(RequestError::MissingArgument("-maxlevel"))?;

        if min_level > max_level {
            return Err(RequestError::InvalidLevelRange {
                min: min_level,
                max: max_level,
            });
        }
        check_axis('x', region.min_x, region.max_x)?;
        check_axis('y', region.min_y, region.max_y)?;

        if max_level > MAX_LEVEL {
            return Err(RequestError::LevelTooDeep {
                level: max_level,
                max: MAX_LEVEL,
            });
        }
        if self.tile_size.is_empty() {
            return Err(RequestError::InvalidParameter {
                param: "-tilesize",
                message: format!("{} must be positive on both axes", self.tile_size),
            });
        }
        if self.level0.is_empty() {
            return Err(RequestError::InvalidParameter {
                param: "-level0",
                message: format!(
                    "{} columns by {} rows must be positive",
                    self.level0.columns, self.level0.rows
                ),
            });
        }
        if self.max_attempts == Some(0) {
            return Err(RequestError::InvalidParameter {
                param: "-max_attempts",
                message: "must be at least 1".to_string(),
            });
        }

        let output = self
            .output
            .clone()
            .unwrap_or_else(|| default_output(self.srs));
        let output2 = self
            .srs2
            .map(|srs2| self.output2.clone().unwrap_or_else(|| default_output(srs2)));

        Ok(RequestConfig {
            count: self.count,
            region,
            min_level,
            max_level,
            tile_size: self.tile_size,
            level0: self.level0,
            srs: self.srs,
            srs2: self.srs2,
            filter_within: self.filter_within.clone(),
            output,
            output2,
            seed: self.seed,
            max_attempts: self.max_attempts,
        })
    }
}

fn check_axis(axis: char, min: f64, max: f64) -> RequestResult<()> {
    match min.partial_cmp(&max) {
        Some(Ordering::Less) => Ok(()),
        _ => Err(RequestError::InvalidRegion { axis, min, max }),
    }
}

/// `<epsg code>.csv` in the working directory.
fn default_output(srs: CrsCode) -> PathBuf {
    PathBuf::from(format!("{}.csv", srs.epsg()))
}

impl RequestConfig {
    /// Command line that reproduces this run's tile stream.
    pub fn provenance(&self) -> String {
        let mut line = format!(
            "{} -count {} -region {} {} {} {} -minlevel {} -maxlevel {} -tilesize {} {} -level0 {} {}",
            PROGRAM_NAME,
            self.count,
            format_g(self.region.min_x, 8),
            format_g(self.region.min_y, 8),
            format_g(self.region.max_x, 8),
            format_g(self.region.max_y, 8),
            self.min_level,
            self.max_level,
            self.tile_size.width,
            self.tile_size.height,
            self.level0.columns,
            self.level0.rows,
        );
        if let Some(seed) = self.seed {
            line.push_str(&format!(" -seed {}", seed));
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world_plan() -> RequestPlan {
        RequestPlan {
            region: Some(BoundingBox::new(-180.0, -90.0, 180.0, 90.0)),
            min_level: Some(0),
            max_level: Some(0),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults() {
        let config = world_plan().validate().unwrap();
        assert_eq!(config.count, 100);
        assert_eq!(config.tile_size, TileSize::new(256, 256));
        assert_eq!(config.level0, Level0Shape::new(2, 1));
        assert_eq!(config.srs, CrsCode::Epsg4326);
        assert_eq!(config.output, PathBuf::from("4326.csv"));
        assert_eq!(config.output2, None);
    }

    #[test]
    fn test_secondary_output_default() {
        let plan = RequestPlan {
            srs2: Some(CrsCode::Epsg3857),
            ..world_plan()
        };
        let config = plan.validate().unwrap();
        assert_eq!(config.output2, Some(PathBuf::from("3857.csv")));
    }

    #[test]
    fn test_required_values() {
        let err = RequestPlan::default().validate().unwrap_err();
        assert_eq!(err.to_string(), "-region is required.");

        let plan = RequestPlan {
            min_level: None,
            ..world_plan()
        };
        assert_eq!(plan.validate().unwrap_err().to_string(), "-minlevel is required.");
    }

    #[test]
    fn test_level_order() {
        let plan = RequestPlan {
            min_level: Some(5),
            max_level: Some(1),
            ..world_plan()
        };
        assert!(matches!(
            plan.validate(),
            Err(RequestError::InvalidLevelRange { min: 5, max: 1 })
        ));
    }

    #[test]
    fn test_region_order() {
        let plan = RequestPlan {
            region: Some(BoundingBox::new(10.0, 10.0, 5.0, 20.0)),
            ..world_plan()
        };
        let err = plan.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "-region <min_x> (10) must be less than <max_x> (5)."
        );

        let plan = RequestPlan {
            region: Some(BoundingBox::new(0.0, 20.0, 5.0, 20.0)),
            ..world_plan()
        };
        assert!(matches!(
            plan.validate(),
            Err(RequestError::InvalidRegion { axis: 'y', .. })
        ));
    }

    #[test]
    fn test_nan_region_is_rejected() {
        let plan = RequestPlan {
            region: Some(BoundingBox::new(f64::NAN, 0.0, 1.0, 1.0)),
            ..world_plan()
        };
        assert!(plan.validate().is_err());
    }

    #[test]
    fn test_level_too_deep() {
        let plan = RequestPlan {
            max_level: Some(31),
            ..world_plan()
        };
        assert!(matches!(
            plan.validate(),
            Err(RequestError::LevelTooDeep { level: 31, .. })
        ));
    }

    #[test]
    fn test_zero_tile_size() {
        let plan = RequestPlan {
            tile_size: TileSize::new(0, 256),
            ..world_plan()
        };
        assert!(matches!(
            plan.validate(),
            Err(RequestError::InvalidParameter { param: "-tilesize", .. })
        ));
    }

    #[test]
    fn test_provenance() {
        let mut config = world_plan().validate().unwrap();
        config.count = 1;
        assert_eq!(
            config.provenance(),
            "wms-tile-request -count 1 -region -180 -90 180 90 -minlevel 0 -maxlevel 0 \
             -tilesize 256 256 -level0 2 1"
        );

        config.seed = Some(7);
        assert!(config.provenance().ends_with(" -level0 2 1 -seed 7"));
    }

    #[test]
    fn test_plan_from_yaml() {
        let yaml = r#"
count: 25
region:
  min_x: -10.0
  min_y: 35.0
  max_x: 30.0
  max_y: 60.0
min_level: 2
max_level: 8
srs2: 3857
seed: 42
"#;
        let plan: RequestPlan = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(plan.count, 25);
        assert_eq!(plan.srs2, Some(CrsCode::Epsg3857));
        assert_eq!(plan.tile_size, TileSize::new(256, 256));

        let config = plan.validate().unwrap();
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.output2, Some(PathBuf::from("3857.csv")));
    }
}
