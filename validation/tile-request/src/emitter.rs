//! CSV tile request output.
//!
//! Each line is `width,height,left,bottom,right,top`. The first line of
//! every sink also carries `;<provenance>` so the file records the command
//! that produced it without breaking CSV consumers.

use std::io::Write;

use tracing::debug;
use wms_common::{BoundingBox, TileSize};

use crate::error::{RequestError, RequestResult};
use crate::filter::ContainmentFilter;
use crate::format::format_g;
use crate::report::RunSummary;
use crate::reproject::ReprojectionAdapter;
use crate::sampler::TileSampler;

/// Significant digits for bbox coordinates.
const COORD_PRECISION: usize = 10;

/// One tile request line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutputRecord {
    pub size: TileSize,
    pub bbox: BoundingBox,
}

impl OutputRecord {
    pub fn new(size: TileSize, bbox: BoundingBox) -> Self {
        Self { size, bbox }
    }

    pub fn to_csv(&self) -> String {
        format!(
            "{},{},{},{},{},{}",
            self.size.width,
            self.size.height,
            format_g(self.bbox.min_x, COORD_PRECISION),
            format_g(self.bbox.min_y, COORD_PRECISION),
            format_g(self.bbox.max_x, COORD_PRECISION),
            format_g(self.bbox.max_y, COORD_PRECISION),
        )
    }
}

/// Output destination that annotates its first line.
pub struct RequestSink<W: Write> {
    writer: W,
    provenance: Option<String>,
}

impl<W: Write> RequestSink<W> {
    pub fn new(writer: W, provenance: impl Into<String>) -> Self {
        Self {
            writer,
            provenance: Some(provenance.into()),
        }
    }

    pub fn write_record(&mut self, record: &OutputRecord) -> std::io::Result<()> {
        let line = record.to_csv();
        match self.provenance.take() {
            Some(provenance) => writeln!(self.writer, "{};{}", line, provenance)?,
            None => writeln!(self.writer, "{}", line)?,
        }
        Ok(())
    }

    /// Flush and hand back the writer.
    pub fn finish(mut self) -> std::io::Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

/// Drives the sampler and writes accepted tiles.
pub struct RequestEmitter<W: Write> {
    sampler: TileSampler,
    tile_size: TileSize,
    primary: RequestSink<W>,
    reprojection: Option<(ReprojectionAdapter, RequestSink<W>)>,
    filter: Option<ContainmentFilter>,
    max_attempts: Option<u64>,
}

impl<W: Write> RequestEmitter<W> {
    pub fn new(sampler: TileSampler, tile_size: TileSize, primary: RequestSink<W>) -> Self {
        Self {
            sampler,
            tile_size,
            primary,
            reprojection: None,
            filter: None,
            max_attempts: None,
        }
    }

    /// Also write each tile, reprojected, to a second sink.
    pub fn with_reprojection(
        mut self,
        reprojection: Option<(ReprojectionAdapter, RequestSink<W>)>,
    ) -> Self {
        self.reprojection = reprojection;
        self
    }

    pub fn with_filter(mut self, filter: Option<ContainmentFilter>) -> Self {
        self.filter = filter;
        self
    }

    /// Give up after this many consecutive rejections.
    pub fn with_max_attempts(mut self, max_attempts: Option<u64>) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Emit `count` accepted tiles. Rejected candidates do not count.
    ///
    /// Without a rejection cap this never returns if the filter rejects
    /// every candidate.
    pub fn run(&mut self, count: u64) -> RequestResult<RunSummary> {
        let mut summary = RunSummary::default();
        let mut remaining = count;
        let mut consecutive_rejections = 0u64;

        while remaining > 0 {
            let candidate = self.sampler.draw();

            if let Some(filter) = &self.filter {
                if !filter.accepts(&candidate.bbox) {
                    summary.record_rejected();
                    consecutive_rejections += 1;
                    if let Some(max) = self.max_attempts {
                        if consecutive_rejections >= max {
                            return Err(RequestError::FilterTooRestrictive {
                                attempts: consecutive_rejections,
                            });
                        }
                    }
                    continue;
                }
            }
            consecutive_rejections = 0;

            let primary = OutputRecord::new(self.tile_size, candidate.bbox);
            let secondary = match &self.reprojection {
                Some((adapter, _)) => {
                    let (bbox, size) = adapter.reproject(&candidate.bbox, self.tile_size)?;
                    Some(OutputRecord::new(size, bbox))
                }
                None => None,
            };

            self.primary.write_record(&primary)?;
            if let (Some((_, sink)), Some(record)) = (&mut self.reprojection, &secondary) {
                sink.write_record(record)?;
            }

            debug!(
                level = candidate.level,
                bbox = ?candidate.bbox,
                reprojected = ?secondary.map(|r| r.bbox),
                "Emitted tile"
            );
            summary.record_emitted(candidate.level);
            remaining -= 1;
        }

        Ok(summary)
    }

    /// Release the filter, then flush both sinks and return their writers.
    pub fn finish(self) -> RequestResult<(W, Option<W>)> {
        let Self {
            primary,
            reprojection,
            filter,
            ..
        } = self;
        drop(filter);

        let primary = primary.finish()?;
        let secondary = match reprojection {
            Some((_, sink)) => Some(sink.finish()?),
            None => None,
        };
        Ok((primary, secondary))
    }
}
