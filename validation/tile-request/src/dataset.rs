//! GeoJSON vector datasets and the geometry used for containment tests.

use std::path::{Path, PathBuf};

use geo::{Contains, Geometry, GeometryCollection, LineString, Polygon};
use geojson::GeoJson;
use tracing::{info, warn};

use crate::error::{RequestError, RequestResult};
use crate::filter::Containment;

/// An opened vector dataset.
#[derive(Debug)]
pub struct VectorDataset {
    path: PathBuf,
    content: serde_json::Value,
}

impl VectorDataset {
    /// Read and parse the dataset file.
    pub fn open(path: impl AsRef<Path>) -> RequestResult<Self> {
        let path = path.as_ref().to_path_buf();
        let text = std::fs::read_to_string(&path).map_err(|e| RequestError::DatasetOpen {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        let content = serde_json::from_str(&text).map_err(|e| RequestError::DatasetOpen {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        Ok(Self { path, content })
    }

    /// The dataset's first (and only) layer.
    ///
    /// A FeatureCollection is one layer; a lone Feature or Geometry is a
    /// layer with a single feature.
    pub fn first_layer(self) -> RequestResult<Layer> {
        let geojson = GeoJson::from_json_value(self.content).map_err(|_| {
            RequestError::LayerFetch {
                path: self.path.clone(),
            }
        })?;

        let features = match geojson {
            GeoJson::FeatureCollection(fc) => fc
                .features
                .into_iter()
                .map(|f| Feature { geometry: f.geometry })
                .collect(),
            GeoJson::Feature(f) => vec![Feature { geometry: f.geometry }],
            GeoJson::Geometry(g) => vec![Feature { geometry: Some(g) }],
        };

        Ok(Layer {
            features: features.into_iter(),
        })
    }
}

/// Sequential reader over a layer's features.
#[derive(Debug)]
pub struct Layer {
    features: std::vec::IntoIter<Feature>,
}

impl Layer {
    pub fn next_feature(&mut self) -> Option<Feature> {
        self.features.next()
    }
}

impl Iterator for Layer {
    type Item = Feature;

    fn next(&mut self) -> Option<Feature> {
        self.next_feature()
    }
}

#[derive(Debug, Clone)]
pub struct Feature {
    geometry: Option<geojson::Geometry>,
}

impl Feature {
    pub fn geometry(&self) -> Option<&geojson::Geometry> {
        self.geometry.as_ref()
    }
}

/// All feature geometries of a layer, tested as one collection.
#[derive(Debug, Clone)]
pub struct GeometryReference {
    collection: GeometryCollection<f64>,
}

impl GeometryReference {
    /// Collect every feature geometry of the layer. Features without a
    /// usable geometry are skipped.
    pub fn from_layer(layer: Layer) -> Self {
        let mut geometries = Vec::new();
        for (index, feature) in layer.enumerate() {
            let Some(geometry) = feature.geometry() else {
                warn!(feature = index, "Skipping feature without geometry");
                continue;
            };
            match Geometry::<f64>::try_from(geometry.clone()) {
                Ok(g) => geometries.push(g),
                Err(e) => warn!(feature = index, error = %e, "Skipping unconvertible geometry"),
            }
        }

        Self {
            collection: GeometryCollection::new_from(geometries),
        }
    }

    /// Open `path` and collect its first layer.
    pub fn load(path: &Path) -> RequestResult<Self> {
        let dataset = VectorDataset::open(path)?;
        let reference = Self::from_layer(dataset.first_layer()?);
        info!(
            path = %path.display(),
            geometries = reference.len(),
            "Loaded filter geometry"
        );
        Ok(reference)
    }

    pub fn len(&self) -> usize {
        self.collection.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collection.is_empty()
    }
}

impl Containment for GeometryReference {
    fn contains(&self, ring: &[(f64, f64)]) -> bool {
        self.collection.contains(&polygon_from_ring(ring))
    }
}

/// Polygon with `ring` as its exterior and no holes.
pub fn polygon_from_ring(ring: &[(f64, f64)]) -> Polygon<f64> {
    Polygon::new(LineString::from(ring.to_vec()), vec![])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_dataset(text: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(text.as_bytes()).unwrap();
        file
    }

    const SQUARE: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature", "properties": {}, "geometry": {
                "type": "Polygon",
                "coordinates": [[[0, 0], [10, 0], [10, 10], [0, 10], [0, 0]]]
            }},
            {"type": "Feature", "properties": {}, "geometry": null}
        ]
    }"#;

    #[test]
    fn test_feature_collection_layer() {
        let file = write_dataset(SQUARE);
        let layer = VectorDataset::open(file.path()).unwrap().first_layer().unwrap();
        let features: Vec<_> = layer.collect();
        assert_eq!(features.len(), 2);
        assert!(features[0].geometry().is_some());
        assert!(features[1].geometry().is_none());
    }

    #[test]
    fn test_reference_skips_missing_geometry() {
        let file = write_dataset(SQUARE);
        let reference = GeometryReference::load(file.path()).unwrap();
        assert_eq!(reference.len(), 1);
    }

    #[test]
    fn test_containment() {
        let file = write_dataset(SQUARE);
        let reference = GeometryReference::load(file.path()).unwrap();

        let inside = [(1.0, 1.0), (2.0, 1.0), (2.0, 2.0), (1.0, 2.0), (1.0, 1.0)];
        let straddling = [(8.0, 8.0), (12.0, 8.0), (12.0, 12.0), (8.0, 12.0), (8.0, 8.0)];
        let outside = [(20.0, 20.0), (21.0, 20.0), (21.0, 21.0), (20.0, 21.0), (20.0, 20.0)];

        assert!(reference.contains(&inside));
        assert!(!reference.contains(&straddling));
        assert!(!reference.contains(&outside));
    }

    #[test]
    fn test_bare_geometry_is_a_layer() {
        let file = write_dataset(
            r#"{"type": "Polygon", "coordinates": [[[0, 0], [1, 0], [1, 1], [0, 0]]]}"#,
        );
        let layer = VectorDataset::open(file.path()).unwrap().first_layer().unwrap();
        assert_eq!(layer.count(), 1);
    }

    #[test]
    fn test_missing_file() {
        let err = VectorDataset::open("/nonexistent/filter.geojson").unwrap_err();
        assert!(matches!(err, RequestError::DatasetOpen { .. }));
    }

    #[test]
    fn test_invalid_json() {
        let file = write_dataset("not json at all");
        let err = VectorDataset::open(file.path()).unwrap_err();
        assert!(matches!(err, RequestError::DatasetOpen { .. }));
    }

    #[test]
    fn test_json_that_is_not_geojson() {
        let file = write_dataset(r#"{"hello": "world"}"#);
        let err = VectorDataset::open(file.path())
            .unwrap()
            .first_layer()
            .unwrap_err();
        assert!(matches!(err, RequestError::LayerFetch { .. }));
    }
}
