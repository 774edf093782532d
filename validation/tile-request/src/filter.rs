//! Containment filtering of tile candidates.

use std::path::Path;

use tracing::trace;
use wms_common::BoundingBox;

use crate::error::RequestResult;

/// Predicate answering whether a closed ring lies fully inside a reference
/// geometry.
pub trait Containment {
    fn contains(&self, ring: &[(f64, f64)]) -> bool;
}

/// Rejects tiles that are not fully inside a reference geometry.
pub struct ContainmentFilter {
    reference: Box<dyn Containment>,
}

impl ContainmentFilter {
    pub fn new(reference: Box<dyn Containment>) -> Self {
        Self { reference }
    }

    /// Build the filter from the first layer of a vector dataset.
    #[cfg(feature = "filter")]
    pub fn load(path: &Path) -> RequestResult<Self> {
        let reference = crate::dataset::GeometryReference::load(path)?;
        if reference.is_empty() {
            tracing::warn!(
                path = %path.display(),
                "Filter dataset has no geometry, every tile will be rejected"
            );
        }
        Ok(Self::new(Box::new(reference)))
    }

    #[cfg(not(feature = "filter"))]
    pub fn load(_path: &Path) -> RequestResult<Self> {
        Err(crate::error::RequestError::CollaboratorUnavailable {
            option: "-filter_within",
            library: "vector geometry support",
        })
    }

    pub fn accepts(&self, bbox: &BoundingBox) -> bool {
        let accepted = self.reference.contains(&bbox.ring());
        if !accepted {
            trace!(?bbox, "Tile rejected by filter");
        }
        accepted
    }
}
