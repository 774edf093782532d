//! Reprojection of tile requests into a second CRS.

use projection::Pipeline;
use tracing::debug;
use wms_common::{BoundingBox, CrsCode, TileSize};

use crate::error::{RequestError, RequestResult};

/// Batch point transform into an output CRS.
pub trait PointTransform {
    fn transform_points(&self, points: &[(f64, f64)]) -> RequestResult<Vec<(f64, f64)>>;
}

impl PointTransform for Pipeline {
    fn transform_points(&self, points: &[(f64, f64)]) -> RequestResult<Vec<(f64, f64)>> {
        Ok(Pipeline::transform_points(self, points)?)
    }
}

/// Build the transform from `src` to `dst`.
pub fn make_transform(src: CrsCode, dst: CrsCode) -> RequestResult<Pipeline> {
    let pipeline = Pipeline::new(src, dst)?;
    debug!(%src, %dst, identity = pipeline.is_identity(), "Built coordinate transform");
    Ok(pipeline)
}

/// Output image size with `pixels` total and an aspect ratio of `delta`
/// (width / height), rounded down on both axes.
pub fn square_pixel_size(delta: f64, pixels: u64) -> TileSize {
    let height = (pixels as f64 / delta).sqrt().floor();
    let width = (delta * height).floor();
    TileSize::new(width as u32, height as u32)
}

/// Turns a tile request in the input CRS into the matching request in the
/// output CRS, keeping pixels square.
pub struct ReprojectionAdapter {
    transform: Box<dyn PointTransform>,
}

impl ReprojectionAdapter {
    pub fn new(transform: Box<dyn PointTransform>) -> Self {
        Self { transform }
    }

    pub fn between(src: CrsCode, dst: CrsCode) -> RequestResult<Self> {
        Ok(Self::new(Box::new(make_transform(src, dst)?)))
    }

    /// Transform the lower-left and upper-right corners and derive the
    /// output size. The output bbox keeps the transformed corner order.
    pub fn reproject(
        &self,
        bbox: &BoundingBox,
        size: TileSize,
    ) -> RequestResult<(BoundingBox, TileSize)> {
        let corners = self
            .transform
            .transform_points(&[bbox.lower_left(), bbox.upper_right()])?;
        let [(x0, y0), (x1, y1)] = corners[..] else {
            return Err(RequestError::TransformFailed(format!(
                "expected 2 points, got {}",
                corners.len()
            )));
        };

        let delta_out = (x1 - x0) / (y1 - y0);
        if !delta_out.is_finite() || delta_out <= 0.0 {
            return Err(RequestError::DegenerateTransform { x0, y0, x1, y1 });
        }

        Ok((
            BoundingBox::new(x0, y0, x1, y1),
            square_pixel_size(delta_out, size.pixels()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Scale(f64, f64);

    impl PointTransform for Scale {
        fn transform_points(&self, points: &[(f64, f64)]) -> RequestResult<Vec<(f64, f64)>> {
            Ok(points.iter().map(|&(x, y)| (x * self.0, y * self.1)).collect())
        }
    }

    #[test]
    fn test_square_pixel_size() {
        assert_eq!(square_pixel_size(1.0, 256 * 256), TileSize::new(256, 256));
        assert_eq!(square_pixel_size(2.0, 256 * 256), TileSize::new(362, 181));
        assert_eq!(square_pixel_size(0.5, 256 * 256), TileSize::new(181, 362));
    }

    #[test]
    fn test_stretched_transform() {
        let adapter = ReprojectionAdapter::new(Box::new(Scale(4.0, 1.0)));
        let bbox = BoundingBox::new(0.0, 0.0, 1.0, 1.0);
        let (out, size) = adapter.reproject(&bbox, TileSize::new(256, 256)).unwrap();

        assert_eq!(out, BoundingBox::new(0.0, 0.0, 4.0, 1.0));
        assert_eq!(size, TileSize::new(512, 128));
    }

    #[test]
    fn test_flat_output_is_degenerate() {
        let adapter = ReprojectionAdapter::new(Box::new(Scale(1.0, 0.0)));
        let bbox = BoundingBox::new(0.0, 0.0, 1.0, 1.0);
        let err = adapter.reproject(&bbox, TileSize::new(256, 256)).unwrap_err();
        assert!(matches!(err, RequestError::DegenerateTransform { .. }));
    }

    #[test]
    fn test_flipped_axis_is_degenerate() {
        let adapter = ReprojectionAdapter::new(Box::new(Scale(1.0, -1.0)));
        let bbox = BoundingBox::new(0.0, 0.0, 1.0, 1.0);
        assert!(adapter.reproject(&bbox, TileSize::new(256, 256)).is_err());
    }

    #[test]
    fn test_identity_pipeline() {
        let adapter = ReprojectionAdapter::between(CrsCode::Epsg4326, CrsCode::Epsg4326).unwrap();
        let bbox = BoundingBox::new(-180.0, -180.0, 0.0, 0.0);
        let (out, size) = adapter.reproject(&bbox, TileSize::new(256, 256)).unwrap();
        assert_eq!(out, bbox);
        assert_eq!(size, TileSize::new(256, 256));
    }

    #[test]
    fn test_web_mercator_above_square_limit() {
        let adapter = ReprojectionAdapter::between(CrsCode::Epsg4326, CrsCode::Epsg3857).unwrap();
        let bbox = wms_common::cell_bbox(10.0, 88.5, 7, wms_common::Level0Shape::default());
        assert_eq!(bbox, BoundingBox::new(9.84375, 85.78125, 11.25, 87.1875));

        let (out, size) = adapter.reproject(&bbox, TileSize::new(256, 256)).unwrap();
        assert!((out.min_y - 21_056_675.18).abs() < 0.1);
        assert!((out.max_y - 23_644_388.82).abs() < 0.1);
        assert_eq!(size, TileSize::new(62, 1040));
    }
}
