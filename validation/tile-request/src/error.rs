//! Error types for tile request generation.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using RequestError.
pub type RequestResult<T> = Result<T, RequestError>;

/// Primary error type for a generation run.
#[derive(Debug, Error)]
pub enum RequestError {
    // === Usage Errors ===
    #[error("{0} is required.")]
    MissingArgument(&'static str),

    #[error("-minlevel ({min}) cannot be greater than -maxlevel ({max}).")]
    InvalidLevelRange { min: u32, max: u32 },

    #[error("-region <min_{axis}> ({min}) must be less than <max_{axis}> ({max}).")]
    InvalidRegion { axis: char, min: f64, max: f64 },

    #[error("Invalid parameter value for '{param}': {message}")]
    InvalidParameter { param: &'static str, message: String },

    #[error("-maxlevel ({level}) cannot be greater than {max}.")]
    LevelTooDeep { level: u32, max: u32 },

    // === Collaborator Errors ===
    #[error("{option}: {library} is required to use this option.")]
    CollaboratorUnavailable {
        option: &'static str,
        library: &'static str,
    },

    #[error("Unable to open dataset \"{}\": {reason}", path.display())]
    DatasetOpen { path: PathBuf, reason: String },

    #[error("Unable to get the first layer of the dataset \"{}\"", path.display())]
    LayerFetch { path: PathBuf },

    #[error("Unable to find projection: EPSG:{code}")]
    UnknownProjection { code: u32 },

    #[error("Request plan {}: {reason}", path.display())]
    PlanFile { path: PathBuf, reason: String },

    // === Runtime Errors ===
    #[error(
        "Degenerate transform: ({x0}, {y0}) - ({x1}, {y1}) has no usable aspect ratio"
    )]
    DegenerateTransform { x0: f64, y0: f64, x1: f64, y1: f64 },

    #[error("Transform failed: {0}")]
    TransformFailed(String),

    #[error("-filter_within: {attempts} consecutive candidates rejected, giving up")]
    FilterTooRestrictive { attempts: u64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RequestError {
    /// Whether the usage text should follow this error.
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            RequestError::MissingArgument(_)
                | RequestError::InvalidLevelRange { .. }
                | RequestError::InvalidRegion { .. }
                | RequestError::InvalidParameter { .. }
                | RequestError::LevelTooDeep { .. }
                | RequestError::CollaboratorUnavailable { .. }
                | RequestError::DatasetOpen { .. }
                | RequestError::LayerFetch { .. }
                | RequestError::UnknownProjection { .. }
                | RequestError::PlanFile { .. }
        )
    }
}

impl From<projection::ProjError> for RequestError {
    fn from(err: projection::ProjError) -> Self {
        match err {
            projection::ProjError::UnknownEpsg(code) => RequestError::UnknownProjection { code },
            other => RequestError::TransformFailed(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_cite_values() {
        let err = RequestError::InvalidLevelRange { min: 5, max: 1 };
        assert_eq!(
            err.to_string(),
            "-minlevel (5) cannot be greater than -maxlevel (1)."
        );

        let err = RequestError::InvalidRegion {
            axis: 'x',
            min: 10.0,
            max: 5.0,
        };
        assert_eq!(
            err.to_string(),
            "-region <min_x> (10) must be less than <max_x> (5)."
        );
    }

    #[test]
    fn test_usage_classification() {
        assert!(RequestError::MissingArgument("-region").is_usage());
        assert!(RequestError::UnknownProjection { code: 1 }.is_usage());
        assert!(!RequestError::FilterTooRestrictive { attempts: 3 }.is_usage());
        assert!(!RequestError::DegenerateTransform {
            x0: 0.0,
            y0: 0.0,
            x1: 1.0,
            y1: 0.0
        }
        .is_usage());
    }

    #[test]
    fn test_unknown_epsg_maps_to_projection_error() {
        let err: RequestError = projection::ProjError::UnknownEpsg(99999).into();
        assert_eq!(err.to_string(), "Unable to find projection: EPSG:99999");
    }
}
