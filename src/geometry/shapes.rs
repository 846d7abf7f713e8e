//! Marker and frame shapes
//!
//! Fixed shapes placed into generated layers: the square used for on-curve
//! points, the circle used for handles and the rectangle framing a glyph's
//! advance box.

use super::vector::round_point;
use crate::font_source::{ContourData, PointData, PointTypeData};
use kurbo::Point;

/// Handle markers are drawn with this much of the control-point tension of a
/// true circle, which reads slightly rounder at small sizes.
pub const HANDLE_TENSION: f64 = 0.66;

fn point(x: f64, y: f64, point_type: PointTypeData) -> PointData {
    PointData::from_point(round_point(Point::new(x, y)), point_type)
}

/// Axis-aligned square of side `size` centered on `center`
pub fn square(center: Point, size: f64) -> ContourData {
    let Point { x, y } = center;
    let half = size / 2.0;
    ContourData::new(vec![
        point(x - half, y - half, PointTypeData::Line),
        point(x + half, y - half, PointTypeData::Line),
        point(x + half, y + half, PointTypeData::Line),
        point(x - half, y + half, PointTypeData::Line),
    ])
}

/// Circle of `diameter` centered on `center`, as four cubic segments.
///
/// `tension` scales the handle length; 1.0 puts the handles on the corners of
/// the bounding square.
pub fn circle(center: Point, diameter: f64, tension: f64) -> ContourData {
    use PointTypeData::{Curve, OffCurve};

    let Point { x, y } = center;
    let r = diameter / 2.0;
    let t = r * tension;
    ContourData::new(vec![
        point(x - t, y + r, OffCurve),
        point(x - r, y + t, OffCurve),
        point(x - r, y, Curve),
        point(x - r, y - t, OffCurve),
        point(x - t, y - r, OffCurve),
        point(x, y - r, Curve),
        point(x + t, y - r, OffCurve),
        point(x + r, y - t, OffCurve),
        point(x + r, y, Curve),
        point(x + r, y + t, OffCurve),
        point(x + t, y + r, OffCurve),
        point(x, y + r, Curve),
    ])
}

/// The advance box of a glyph from descender to ascender
pub fn bounds_rectangle(width: f64, descender: f64, ascender: f64) -> ContourData {
    ContourData::new(vec![
        point(0.0, descender, PointTypeData::Line),
        point(width, descender, PointTypeData::Line),
        point(width, ascender, PointTypeData::Line),
        point(0.0, ascender, PointTypeData::Line),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_is_centered() {
        let contour = square(Point::new(100.0, 50.0), 20.0);
        let corners: Vec<_> = contour.points.iter().map(|p| (p.x, p.y)).collect();
        assert_eq!(
            corners,
            vec![(90.0, 40.0), (110.0, 40.0), (110.0, 60.0), (90.0, 60.0)]
        );
    }

    #[test]
    fn circle_has_four_on_curve_points() {
        let contour = circle(Point::ZERO, 100.0, HANDLE_TENSION);
        assert_eq!(contour.points.len(), 12);
        let on_curve: Vec<_> = contour
            .points
            .iter()
            .filter(|p| p.point_type.is_on_curve())
            .map(|p| (p.x, p.y))
            .collect();
        assert_eq!(
            on_curve,
            vec![(-50.0, 0.0), (0.0, -50.0), (50.0, 0.0), (0.0, 50.0)]
        );
    }

    #[test]
    fn bounds_rectangle_runs_counter_clockwise() {
        let contour = bounds_rectangle(500.0, -200.0, 800.0);
        let corners: Vec<_> = contour.points.iter().map(|p| (p.x, p.y)).collect();
        assert_eq!(
            corners,
            vec![(0.0, -200.0), (500.0, -200.0), (500.0, 800.0), (0.0, 800.0)]
        );
    }
}
