//! Tests for BoundingBox operations and pyramid cell addressing.

use wms_common::bbox::BoundingBox;
use wms_common::grid::{cell_bbox, Level0Shape, LevelGrid};

// ============================================================================
// BoundingBox
// ============================================================================

#[test]
fn test_bbox_new() {
    let bbox = BoundingBox::new(-180.0, -90.0, 180.0, 90.0);
    assert_eq!(bbox.min_x, -180.0);
    assert_eq!(bbox.min_y, -90.0);
    assert_eq!(bbox.max_x, 180.0);
    assert_eq!(bbox.max_y, 90.0);
    assert_eq!(bbox, BoundingBox::world());
}

#[test]
fn test_bbox_dimensions() {
    let bbox = BoundingBox::new(-125.0, 24.0, -66.0, 50.0);
    assert!((bbox.width() - 59.0).abs() < 1e-12);
    assert!((bbox.height() - 26.0).abs() < 1e-12);
}

#[test]
fn test_bbox_contains_point_edges() {
    let bbox = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
    assert!(bbox.contains_point(0.0, 0.0));
    assert!(bbox.contains_point(10.0, 10.0));
    assert!(bbox.contains_point(5.0, 5.0));
    assert!(!bbox.contains_point(10.1, 5.0));
    assert!(!bbox.contains_point(5.0, -0.1));
}

#[test]
fn test_bbox_corners() {
    let bbox = BoundingBox::new(1.0, 2.0, 3.0, 4.0);
    assert_eq!(bbox.lower_left(), (1.0, 2.0));
    assert_eq!(bbox.upper_right(), (3.0, 4.0));
}

#[test]
fn test_bbox_yaml_roundtrip() {
    let yaml = "min_x: -10.5\nmin_y: 20.0\nmax_x: 30.0\nmax_y: 40.25\n";
    let bbox: BoundingBox = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(bbox, BoundingBox::new(-10.5, 20.0, 30.0, 40.25));
}

// ============================================================================
// Cell addressing
// ============================================================================

fn is_multiple(value: f64, step: f64) -> bool {
    let ratio = value / step;
    (ratio - ratio.round()).abs() < 1e-9
}

#[test]
fn test_cells_are_grid_aligned_at_every_level() {
    let shapes = [
        Level0Shape::new(2, 1),
        Level0Shape::new(1, 1),
        Level0Shape::new(3, 5),
    ];
    let points = [
        (0.0, 0.0),
        (-179.999, -89.999),
        (179.999, 89.999),
        (12.345, -67.891),
        (-73.9857, 40.7484),
        (139.6917, 35.6895),
    ];

    for shape in shapes {
        for level in 0..=12 {
            let grid = LevelGrid::new(level, shape);
            for &(x, y) in &points {
                let bbox = grid.cell_bbox(x, y);
                assert!(bbox.min_x < bbox.max_x, "level {level} point ({x}, {y})");
                assert!(bbox.min_y < bbox.max_y, "level {level} point ({x}, {y})");
                assert!(is_multiple(bbox.min_x, grid.cell_width));
                assert!(is_multiple(bbox.max_y, grid.cell_height));
                assert!((bbox.width() - grid.cell_width).abs() < 1e-9);
                assert!((bbox.height() - grid.cell_height).abs() < 1e-9);
            }
        }
    }
}

#[test]
fn test_cell_contains_its_x_coordinate() {
    let grid = LevelGrid::new(5, Level0Shape::default());
    let x = 42.4242;
    let bbox = grid.cell_bbox(x, 10.0);
    assert!(bbox.min_x <= x && x < bbox.max_x);
}

#[test]
fn test_cell_bbox_is_pure() {
    let shape = Level0Shape::new(2, 1);
    let a = cell_bbox(-12.75, 33.125, 7, shape);
    let b = cell_bbox(-12.75, 33.125, 7, shape);
    assert_eq!(a.min_x.to_bits(), b.min_x.to_bits());
    assert_eq!(a.min_y.to_bits(), b.min_y.to_bits());
    assert_eq!(a.max_x.to_bits(), b.max_x.to_bits());
    assert_eq!(a.max_y.to_bits(), b.max_y.to_bits());
}

#[test]
fn test_level0_quarter_point() {
    // x = 0.25 and y = 0.5 of the world extent
    let bbox = cell_bbox(-90.0, 0.0, 0, Level0Shape::new(2, 1));
    assert_eq!(bbox, BoundingBox::new(-180.0, -180.0, 0.0, 0.0));
}
