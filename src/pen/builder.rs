//! Command to contour conversion
//!
//! [`LayerBuilder`] is the inverse of `segments`: it collects drawing
//! commands back into stored contours and component references.

use super::{draw, PathCommand, Pen};
use crate::core::errors::PathError;
use crate::font_source::{ComponentData, ContourData, PointData, PointTypeData};
use kurbo::Point;

/// Contours and component references making up one generated layer
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Layer {
    pub contours: Vec<ContourData>,
    pub components: Vec<ComponentData>,
}

impl Layer {
    pub fn point_count(&self) -> usize {
        self.contours.iter().map(|c| c.points.len()).sum()
    }

    /// Layer with every component pointing at `base + suffix`, except the
    /// shared marker glyphs listed in `keep`.
    pub fn with_component_suffix(mut self, suffix: &str, keep: &[&str]) -> Self {
        for component in &mut self.components {
            if !keep.contains(&component.base_glyph.as_str()) {
                component.base_glyph.push_str(suffix);
            }
        }
        self
    }
}

#[derive(Debug, Default)]
pub struct LayerBuilder {
    layer: Layer,
    current: Option<Vec<PointData>>,
}

impl LayerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// The finished layer; fails if a contour was left open
    pub fn finish(self) -> Result<Layer, PathError> {
        if self.current.is_some() {
            return Err(PathError::UnclosedContour);
        }
        Ok(self.layer)
    }

    fn current(&mut self, command: &'static str) -> Result<&mut Vec<PointData>, PathError> {
        self.current
            .as_mut()
            .ok_or(PathError::NoCurrentPoint { command })
    }
}

impl Pen for LayerBuilder {
    fn move_to(&mut self, to: Point) -> Result<(), PathError> {
        if self.current.is_some() {
            return Err(PathError::ContourInProgress { command: "move_to" });
        }
        self.current = Some(vec![PointData::from_point(to, PointTypeData::Move)]);
        Ok(())
    }

    fn line_to(&mut self, to: Point) -> Result<(), PathError> {
        self.current("line_to")?
            .push(PointData::from_point(to, PointTypeData::Line));
        Ok(())
    }

    fn curve_to(&mut self, c1: Point, c2: Point, to: Point) -> Result<(), PathError> {
        self.current("curve_to")?.extend([
            PointData::from_point(c1, PointTypeData::OffCurve),
            PointData::from_point(c2, PointTypeData::OffCurve),
            PointData::from_point(to, PointTypeData::Curve),
        ]);
        Ok(())
    }

    fn qcurve_to(&mut self, off_curve: &[Point], to: Option<Point>) -> Result<(), PathError> {
        let off_curve = off_curve
            .iter()
            .map(|p| PointData::from_point(*p, PointTypeData::OffCurve));
        match to {
            Some(to) => {
                let points = self.current("qcurve_to")?;
                points.extend(off_curve);
                points.push(PointData::from_point(to, PointTypeData::QCurve));
            }
            None => {
                if self.current.is_some() {
                    return Err(PathError::ContourInProgress { command: "qcurve_to" });
                }
                self.current = Some(off_curve.collect());
            }
        }
        Ok(())
    }

    fn close_path(&mut self) -> Result<(), PathError> {
        let mut points = self
            .current
            .take()
            .ok_or(PathError::NoCurrentPoint { command: "close_path" })?;

        if points.first().is_some_and(|p| p.point_type == PointTypeData::Move) {
            // A final segment that lands back on the start replaces the move
            let last = points.len() - 1;
            let returns_to_start = last > 0
                && points[last].point_type.is_on_curve()
                && points[last].position() == points[0].position();
            let start_type = if returns_to_start {
                points.remove(last).point_type
            } else {
                PointTypeData::Line
            };
            points[0].point_type = start_type;
        }

        self.layer.contours.push(ContourData::new(points));
        Ok(())
    }

    fn add_component(&mut self, component: &ComponentData) -> Result<(), PathError> {
        self.layer.components.push(component.clone());
        Ok(())
    }
}

/// Collect a command list into a layer
pub fn build_layer(commands: &[PathCommand]) -> Result<Layer, PathError> {
    let mut builder = LayerBuilder::new();
    draw(commands, &mut builder)?;
    builder.finish()
}

/// Reverse the direction of a closed contour, keeping its first point.
///
/// An on-curve point's type describes the segment arriving at it, so after
/// reversal each on-curve point takes the type of the next on-curve point in
/// the original order.
pub fn reverse_contour(contour: &ContourData) -> ContourData {
    let points = &contour.points;
    let len = points.len();
    if len < 2 {
        return contour.clone();
    }

    let next_on_curve_type = |index: usize| {
        (1..=len)
            .map(|step| &points[(index + step) % len])
            .find(|p| p.point_type.is_on_curve())
            .map_or(points[index].point_type, |p| p.point_type)
    };

    let order = std::iter::once(0).chain((1..len).rev());
    let reversed = order
        .map(|index| {
            let point = &points[index];
            let point_type = if point.point_type.is_on_curve() {
                next_on_curve_type(index)
            } else {
                PointTypeData::OffCurve
            };
            PointData::new(point.x, point.y, point_type)
        })
        .collect();
    ContourData::new(reversed)
}
