//! Variable-width ribbons around open polylines
//!
//! Used to draw the lines connecting on-curve points to their handles. A two
//! point polyline gives a plain quad; longer quadratic runs get a mitered
//! polygon that follows every off-curve point.

use super::vector::{end_offset, round_point, vertex_offset};
use crate::font_source::{ContourData, PointData, PointTypeData};
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// How the two open ends of a ribbon are finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RibbonCap {
    /// Ends stop exactly at the first and last point
    #[default]
    Butt,
    /// Ends are pushed out by half the ribbon width
    Square,
}

/// Build a closed ribbon polygon of total `width` around `points`.
///
/// The polygon is the right-hand offsets in order followed by the left-hand
/// offsets reversed. The point count is always `2 * points.len()`, whatever
/// the geometry: a vertex that cannot be offset keeps its coordinate.
pub fn ribbon(points: &[Point], width: f64, cap: RibbonCap) -> ContourData {
    let half = width / 2.0;
    let spine = capped_spine(points, half, cap);

    let mut inner = Vec::with_capacity(spine.len());
    let mut outer = Vec::with_capacity(spine.len());
    for (index, &point) in spine.iter().enumerate() {
        let offset = vertex_offset(&spine, index, half, false).unwrap_or(Vec2::ZERO);
        inner.push(point + offset);
        outer.push(point - offset);
    }

    let polygon = inner
        .into_iter()
        .chain(outer.into_iter().rev())
        .map(|point| PointData::from_point(round_point(point), PointTypeData::Line))
        .collect();
    ContourData::new(polygon)
}

fn capped_spine(points: &[Point], half: f64, cap: RibbonCap) -> Vec<Point> {
    let mut spine = points.to_vec();
    if cap == RibbonCap::Square && spine.len() >= 2 {
        let last = spine.len() - 1;
        if let Ok(start) = end_offset(spine[1], spine[0], half) {
            spine[0] = start;
        }
        if let Ok(end) = end_offset(spine[last - 1], spine[last], half) {
            spine[last] = end;
        }
    }
    spine
}
