//! Contour to command conversion
//!
//! Splits a stored contour into segments (runs of off-curve points closed by
//! an on-curve point) and emits one drawing command per segment. A closed
//! contour is rotated so it starts at its first on-curve point, and the
//! implied closing line back to that point is not emitted.

use super::PathCommand;
use crate::core::errors::PathError;
use crate::font_source::{ContourData, GlyphData, PointData, PointTypeData};
use kurbo::Point;
use tracing::warn;

/// Commands drawing one closed contour
pub fn contour_commands(contour: &ContourData) -> Result<Vec<PathCommand>, PathError> {
    let points = &contour.points;
    if points.is_empty() {
        return Ok(Vec::new());
    }
    if contour.is_open() {
        return Err(PathError::UnsupportedSegment(
            "open contour where a closed one was expected".to_string(),
        ));
    }

    let Some(first_on_curve) = points.iter().position(|p| p.point_type.is_on_curve()) else {
        let off_curve = points.iter().map(PointData::position).collect();
        return Ok(vec![
            PathCommand::QCurveTo(off_curve, None),
            PathCommand::ClosePath,
        ]);
    };

    // Start after the first on-curve point so the contour ends on it
    let rotated: Vec<&PointData> = points[first_on_curve + 1..]
        .iter()
        .chain(&points[..=first_on_curve])
        .collect();
    let start = points[first_on_curve].position();
    let segment_count = points.iter().filter(|p| p.point_type.is_on_curve()).count();

    let mut commands = vec![PathCommand::MoveTo(start)];
    let mut pending: Vec<Point> = Vec::new();
    let mut segment_index = 0;
    for point in rotated {
        if !point.point_type.is_on_curve() {
            pending.push(point.position());
            continue;
        }
        segment_index += 1;
        let closing = segment_index == segment_count;
        let to = point.position();

        let command = match (point.point_type, pending.len()) {
            (PointTypeData::Move, _) => {
                return Err(PathError::UnsupportedSegment(
                    "move point inside a closed contour".to_string(),
                ))
            }
            (PointTypeData::Line, 0) => PathCommand::LineTo(to),
            (PointTypeData::Line, n) => {
                return Err(PathError::UnsupportedSegment(format!(
                    "line segment preceded by {n} off-curve points"
                )))
            }
            (PointTypeData::Curve | PointTypeData::QCurve, 0) => PathCommand::LineTo(to),
            (PointTypeData::Curve, 2) => PathCommand::CurveTo(pending[0], pending[1], to),
            (PointTypeData::Curve, 1) | (PointTypeData::QCurve, _) => {
                PathCommand::QCurveTo(pending.clone(), Some(to))
            }
            (PointTypeData::Curve, n) => {
                return Err(PathError::UnsupportedSegment(format!(
                    "cubic segment with {n} off-curve points"
                )))
            }
            (PointTypeData::OffCurve, _) => unreachable!("off-curve points are collected above"),
        };
        pending.clear();

        // The closing line back to the start is implied by close_path
        if closing && matches!(command, PathCommand::LineTo(_)) {
            continue;
        }
        commands.push(command);
    }
    commands.push(PathCommand::ClosePath);
    Ok(commands)
}

/// Commands drawing a whole glyph: closed contours, then component references.
///
/// Open contours cannot be outlined or filled and are left out with a
/// warning; the decision depends only on the source, so every master skips
/// the same contours.
pub fn glyph_commands(glyph: &GlyphData) -> Result<Vec<PathCommand>, PathError> {
    let mut commands = Vec::new();
    for (index, contour) in glyph.contours.iter().enumerate() {
        if contour.is_open() {
            warn!(
                "Skipping open contour {} in glyph '{}'",
                index, glyph.name
            );
            continue;
        }
        commands.extend(contour_commands(contour)?);
    }
    commands.extend(
        glyph
            .components
            .iter()
            .cloned()
            .map(PathCommand::AddComponent),
    );
    Ok(commands)
}
