//! Tests for BoundingBox formatting and the corners it is built from.

use osgrid_common::bbox::{format_number, BoundingBox};
use osgrid_common::CrsDescriptor;
use test_utils::assert_approx_eq;

// ============================================================================
// Constructor tests
// ============================================================================

#[test]
fn test_bbox_new() {
    let bbox = BoundingBox::new(0.0, 0.0, 700000.0, 1300000.0);
    assert_eq!(bbox.min_x, 0.0);
    assert_eq!(bbox.min_y, 0.0);
    assert_eq!(bbox.max_x, 700000.0);
    assert_eq!(bbox.max_y, 1300000.0);
}

#[test]
fn test_bbox_lower_left() {
    let bbox = BoundingBox::lower_left(40000.0, -80000.0);
    assert_eq!(bbox, BoundingBox::new(40000.0, -80000.0, 0.0, 0.0));
}

// ============================================================================
// Formatting tests
// ============================================================================

#[test]
fn test_format_lower_left_tiles() {
    // zoom 0, column 1, row -1 of the OpenSpace pyramid
    assert_eq!(
        BoundingBox::lower_left(500000.0, 0.0).to_wms_string(),
        "500000,0,0,0"
    );
    // zoom 9 (2.5 m/px), column 3, row 4
    assert_eq!(
        BoundingBox::lower_left(1500.0, -2500.0).to_wms_string(),
        "1500,-2500,0,0"
    );
}

#[test]
fn test_format_negative_zero() {
    assert_eq!(
        BoundingBox::lower_left(-0.0, -0.0).to_wms_string(),
        "0,0,0,0"
    );
}

#[test]
fn test_format_fractional_values() {
    assert_eq!(format_number(437.5), "437.5");
    assert_eq!(format_number(1.75), "1.75");
    assert_eq!(
        BoundingBox::lower_left(1234567.5, -89.25).to_string(),
        "1234567.5,-89.25,0,0"
    );
}

// ============================================================================
// Corners from the pyramid tables
// ============================================================================

#[test]
fn test_corner_spans_per_zoom() {
    let crs = CrsDescriptor::legacy_bbox();
    let expected = [
        500000.0, 200000.0, 100000.0, 40000.0, 20000.0, 10000.0, 5000.0, 2000.0, 1000.0, 500.0,
    ];
    for (zoom, span) in expected.iter().enumerate() {
        assert_approx_eq!(crs.tile_span(zoom as u32).unwrap(), *span, 1e-9);
    }
}

#[test]
fn test_fine_zoom_corner_formatting() {
    let crs = CrsDescriptor::matrix();
    let span = crs.tile_span(9).unwrap();
    assert_approx_eq!(span, 448.0, 1e-9);

    let bbox = BoundingBox::lower_left(span * 3.0, span * -2.5);
    assert_eq!(bbox.to_wms_string(), "1344,-1120,0,0");
}
