//! End-to-end generation run against files.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::time::Instant;

use tracing::info;

use crate::config::RequestConfig;
use crate::emitter::{RequestEmitter, RequestSink};
use crate::error::RequestResult;
use crate::filter::ContainmentFilter;
use crate::report::RunSummary;
use crate::reproject::ReprojectionAdapter;
use crate::sampler::{RngSource, TileSampler};

/// Runs a validated configuration, writing CSV files.
pub struct RequestRunner {
    config: RequestConfig,
}

impl RequestRunner {
    pub fn new(config: RequestConfig) -> Self {
        Self { config }
    }

    /// Generate every tile. The filter and transform are built before any
    /// output file is created.
    pub fn run(&self) -> RequestResult<RunSummary> {
        let config = &self.config;
        let start = Instant::now();

        info!(
            count = config.count,
            region = ?config.region,
            min_level = config.min_level,
            max_level = config.max_level,
            srs = %config.srs,
            srs2 = ?config.srs2.map(|c| c.epsg()),
            seed = ?config.seed,
            output = %config.output.display(),
            "Starting tile request generation"
        );

        let filter = config
            .filter_within
            .as_deref()
            .map(ContainmentFilter::load)
            .transpose()?;
        let adapter = config
            .srs2
            .map(|dst| ReprojectionAdapter::between(config.srs, dst))
            .transpose()?;

        let provenance = config.provenance();
        let primary = RequestSink::new(create_output(&config.output)?, provenance.clone());
        let reprojection = match (adapter, &config.output2) {
            (Some(adapter), Some(path)) => Some((
                adapter,
                RequestSink::new(create_output(path)?, provenance),
            )),
            _ => None,
        };

        let sampler = TileSampler::new(
            config.region,
            config.min_level,
            config.max_level,
            config.level0,
            Box::new(RngSource::new(config.seed)),
        );
        let mut emitter = RequestEmitter::new(sampler, config.tile_size, primary)
            .with_filter(filter)
            .with_reprojection(reprojection)
            .with_max_attempts(config.max_attempts);

        let mut summary = emitter.run(config.count)?;
        emitter.finish()?;

        summary.outputs = std::iter::once(&config.output)
            .chain(config.output2.as_ref())
            .map(|p| p.display().to_string())
            .collect();
        summary.duration_secs = start.elapsed().as_secs_f64();

        info!(
            emitted = summary.emitted,
            rejected = summary.rejected,
            duration_secs = summary.duration_secs,
            "Tile request generation complete"
        );
        Ok(summary)
    }
}

fn create_output(path: &Path) -> RequestResult<BufWriter<File>> {
    Ok(BufWriter::new(File::create(path)?))
}
