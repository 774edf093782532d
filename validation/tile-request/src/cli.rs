//! Command line parsing.
//!
//! Flags are spelled with a single dash (`-count 10`); the double-dash form
//! is accepted as well.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;
use wms_common::{BoundingBox, CrsCode, Level0Shape, TileSize};

use crate::config::RequestPlan;
use crate::error::{RequestError, RequestResult};
use crate::report::SummaryFormat;

/// Long flags that may be written with a single dash.
const LONG_FLAGS: &[&str] = &[
    "count",
    "region",
    "minlevel",
    "maxlevel",
    "tilesize",
    "level0",
    "srs",
    "srs2",
    "filter_within",
    "output",
    "output2",
    "seed",
    "max_attempts",
    "config",
    "summary",
    "log_level",
];

#[derive(Parser, Debug)]
#[command(name = "wms-tile-request", disable_help_flag = true)]
#[command(
    about = "Generate random WMS tile requests (BBOX and size) as CSV",
    long_about = None
)]
pub struct Args {
    /// Number of tiles to emit [default: 100]
    #[arg(long, value_name = "N")]
    pub count: Option<u64>,

    /// Sampling region in input SRS units
    #[arg(
        long,
        num_args = 4,
        value_names = ["MIN_X", "MIN_Y", "MAX_X", "MAX_Y"],
        allow_negative_numbers = true
    )]
    pub region: Option<Vec<f64>>,

    /// Lowest pyramid level
    #[arg(long, value_name = "LEVEL")]
    pub minlevel: Option<u32>,

    /// Highest pyramid level
    #[arg(long, value_name = "LEVEL")]
    pub maxlevel: Option<u32>,

    /// Tile size in pixels [default: 256 256]
    #[arg(long, num_args = 2, value_names = ["WIDTH", "HEIGHT"])]
    pub tilesize: Option<Vec<u32>>,

    /// Grid shape at level 0 [default: 2 1]
    #[arg(long, num_args = 2, value_names = ["COLUMNS", "ROWS"])]
    pub level0: Option<Vec<u32>>,

    /// Input EPSG code, e.g. 4326 or EPSG:4326 [default: 4326]
    #[arg(long, value_name = "EPSG", value_parser = CrsCode::from_wms_string)]
    pub srs: Option<CrsCode>,

    /// Output EPSG code; also writes every tile reprojected
    #[arg(long, value_name = "EPSG", value_parser = CrsCode::from_wms_string)]
    pub srs2: Option<CrsCode>,

    /// Keep only tiles fully inside this GeoJSON dataset
    #[arg(long = "filter_within", value_name = "PATH")]
    pub filter_within: Option<PathBuf>,

    /// Output file [default: <srs>.csv]
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Reprojected output file [default: <srs2>.csv]
    #[arg(long, value_name = "PATH")]
    pub output2: Option<PathBuf>,

    /// RNG seed for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,

    /// Abort after this many consecutive filter rejections
    #[arg(long = "max_attempts", value_name = "N")]
    pub max_attempts: Option<u64>,

    /// YAML request plan; flags override its values
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// End-of-run summary on stderr
    #[arg(long, value_enum, default_value_t = SummaryFormat::Table)]
    pub summary: SummaryFormat,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long = "log_level", default_value = "info")]
    pub log_level: String,
}

/// Whether the legacy `-?` usage flag is present.
pub fn wants_usage<I, T>(args: I) -> bool
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    args.into_iter().skip(1).any(|a| {
        let a: OsString = a.into();
        a == "-?"
    })
}

/// Rewrite single-dash long flags to their `--` form.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    args.into_iter()
        .enumerate()
        .map(|(i, arg)| {
            let arg: OsString = arg.into();
            if i == 0 {
                return arg;
            }
            match arg.to_str().and_then(|s| s.strip_prefix('-')) {
                Some(name) if LONG_FLAGS.contains(&name) => OsString::from(format!("--{}", name)),
                _ => arg,
            }
        })
        .collect()
}

impl Args {
    /// Parse from raw process arguments, accepting single-dash long flags.
    pub fn parse_legacy<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::try_parse_from(normalize_args(args))
    }

    /// Build the request plan: load `-config` if given, then apply flags.
    pub fn into_plan(self) -> RequestResult<RequestPlan> {
        let mut plan = match &self.config {
            Some(path) => RequestPlan::from_file(path)?,
            None => RequestPlan::default(),
        };

        if let Some(count) = self.count {
            plan.count = count;
        }
        if let Some(region) = self.region {
            let [min_x, min_y, max_x, max_y] = fixed_values::<4, f64>("-region", region)?;
            plan.region = Some(BoundingBox::new(min_x, min_y, max_x, max_y));
        }
        if let Some(level) = self.minlevel {
            plan.min_level = Some(level);
        }
        if let Some(level) = self.maxlevel {
            plan.max_level = Some(level);
        }
        if let Some(size) = self.tilesize {
            let [width, height] = fixed_values::<2, u32>("-tilesize", size)?;
            plan.tile_size = TileSize::new(width, height);
        }
        if let Some(shape) = self.level0 {
            let [columns, rows] = fixed_values::<2, u32>("-level0", shape)?;
            plan.level0 = Level0Shape::new(columns, rows);
        }
        if let Some(srs) = self.srs {
            plan.srs = srs;
        }
        if self.srs2.is_some() {
            plan.srs2 = self.srs2;
        }
        if self.filter_within.is_some() {
            plan.filter_within = self.filter_within;
        }
        if self.output.is_some() {
            plan.output = self.output;
        }
        if self.output2.is_some() {
            plan.output2 = self.output2;
        }
        if self.seed.is_some() {
            plan.seed = self.seed;
        }
        if self.max_attempts.is_some() {
            plan.max_attempts = self.max_attempts;
        }

        Ok(plan)
    }
}

fn fixed_values<const N: usize, T>(
    param: &'static str,
    values: Vec<T>,
) -> RequestResult<[T; N]> {
    let got = values.len();
    values
        .try_into()
        .map_err(|_| RequestError::InvalidParameter {
            param,
            message: format!("expected {} values, got {}", N, got),
        })
}
