//! Contour offsetting
//!
//! Every point of a normalized contour is treated as a polygon vertex and
//! moved along its miter bisector. The output always has the same number of
//! points, in the same order and with the same types, as the input.

use crate::font_source::{ContourData, PointData};
use crate::geometry::{round_point, vertex_offset};
use crate::pen::reverse_contour;
use tracing::debug;

/// Offset a closed contour by `distance`: outward for positive values on a
/// counter-clockwise contour, inward for negative ones.
///
/// Vertices whose neighbors all coincide with them keep their original
/// coordinate. Results are rounded to integers.
pub fn offset_contour(contour: &ContourData, distance: f64) -> ContourData {
    let positions = contour.positions();
    let closed = !contour.is_open();
    let mut substituted = 0;

    let points = contour
        .points
        .iter()
        .enumerate()
        .map(|(index, point)| {
            let position = match vertex_offset(&positions, index, distance, closed) {
                Ok(offset) => point.position() + offset,
                Err(_) => {
                    substituted += 1;
                    point.position()
                }
            };
            PointData::from_point(round_point(position), point.point_type)
        })
        .collect::<Vec<_>>();

    if substituted > 0 {
        debug!(
            "Kept {} of {} vertices in place: no distinct neighbor to offset against",
            substituted,
            points.len()
        );
    }
    ContourData::new(points)
}

/// Stroke `contours` with a band `width` wide, centered on the outline.
///
/// Each contour contributes two: its offset by `+width / 2`, and its offset
/// by `-width / 2` reversed so the pair fills as a ring. All outer contours
/// come first, then all reversed inner ones.
pub fn outline_contours(contours: &[ContourData], width: f64) -> Vec<ContourData> {
    let half = width / 2.0;
    let outer = contours.iter().map(|contour| offset_contour(contour, half));
    let inner = contours
        .iter()
        .map(|contour| reverse_contour(&offset_contour(contour, -half)));
    outer.chain(inner).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font_source::PointTypeData;

    fn polygon(points: &[(f64, f64)]) -> ContourData {
        ContourData::new(
            points
                .iter()
                .map(|&(x, y)| PointData::new(x, y, PointTypeData::Line))
                .collect(),
        )
    }

    fn positions(contour: &ContourData) -> Vec<(f64, f64)> {
        contour.points.iter().map(|p| (p.x, p.y)).collect()
    }

    // Counter-clockwise in a y-up coordinate system
    fn square() -> ContourData {
        polygon(&[(-50.0, -50.0), (50.0, -50.0), (50.0, 50.0), (-50.0, 50.0)])
    }

    #[test]
    fn positive_distance_grows_a_square() {
        let grown = offset_contour(&square(), 10.0);
        assert_eq!(
            positions(&grown),
            vec![(-60.0, -60.0), (60.0, -60.0), (60.0, 60.0), (-60.0, 60.0)]
        );
    }

    #[test]
    fn offset_out_and_back_in_round_trips() {
        let original = square();
        for distance in [1.0, 7.0, 25.0] {
            let restored = offset_contour(&offset_contour(&original, distance), -distance);
            assert_eq!(restored.points.len(), original.points.len());
            for (a, b) in restored.points.iter().zip(&original.points) {
                assert!((a.x - b.x).abs() <= 1.0 && (a.y - b.y).abs() <= 1.0);
                assert_eq!(a.point_type, b.point_type);
            }
        }
    }

    #[test]
    fn collinear_vertices_offset_perpendicular() {
        let contour = polygon(&[(0.0, 0.0), (10.0, 0.0), (20.0, 0.0), (10.0, 10.0)]);
        let offset = offset_contour(&contour, 2.0);
        assert_eq!(offset.points.len(), 4);
        assert!(offset.points.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
        assert_eq!((offset.points[1].x, offset.points[1].y), (10.0, -2.0));
    }

    #[test]
    fn collapsed_contour_keeps_its_points() {
        let contour = polygon(&[(5.0, 5.0), (5.0, 5.0), (5.0, 5.0)]);
        assert_eq!(offset_contour(&contour, 10.0), contour);
    }

    #[test]
    fn duplicate_points_are_offset_like_their_twin() {
        let contour = polygon(&[
            (-50.0, -50.0),
            (50.0, -50.0),
            (50.0, 50.0),
            (50.0, 50.0),
            (-50.0, 50.0),
        ]);
        let offset = offset_contour(&contour, 10.0);
        assert_eq!(offset.points.len(), 5);
        assert_eq!((offset.points[2].x, offset.points[2].y), (60.0, 60.0));
        assert_eq!((offset.points[3].x, offset.points[3].y), (60.0, 60.0));
    }

    #[test]
    fn triangle_outline_has_outer_and_reversed_inner_ring() {
        let triangle = polygon(&[(0.0, 0.0), (500.0, 0.0), (250.0, 400.0)]);
        let outline = outline_contours(std::slice::from_ref(&triangle), 10.0);
        assert_eq!(outline.len(), 2);
        assert_eq!(outline.iter().map(|c| c.points.len()).sum::<usize>(), 6);

        let outer = &outline[0];
        let inner = &outline[1];
        let shrunk = offset_contour(&triangle, -5.0);
        assert_eq!(inner.points[0], shrunk.points[0]);
        // The inner ring runs the other way: its second point is near the apex
        assert!(inner.points[1].y > 300.0);
        assert!(outer.points[1].y < 100.0);
    }
}
