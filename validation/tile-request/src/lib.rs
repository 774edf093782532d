//! Random WMS tile request generation.
//!
//! This crate provides tools to:
//! - Sample random pyramid tiles inside a region
//! - Keep only tiles inside a reference geometry
//! - Reproject tile requests into a second CRS with square pixels
//! - Write the requests as CSV for load-testing tools

pub mod cli;
pub mod config;
#[cfg(feature = "filter")]
pub mod dataset;
pub mod emitter;
pub mod error;
pub mod filter;
pub mod format;
pub mod report;
pub mod reproject;
pub mod runner;
pub mod sampler;

pub use config::{RequestConfig, RequestPlan};
pub use emitter::{OutputRecord, RequestEmitter, RequestSink};
pub use error::{RequestError, RequestResult};
pub use filter::{Containment, ContainmentFilter};
pub use report::{RunSummary, SummaryFormat, SummaryReport};
pub use reproject::{make_transform, PointTransform, ReprojectionAdapter};
pub use runner::RequestRunner;
pub use sampler::{RandomSource, RngSource, TileCandidate, TileSampler};
