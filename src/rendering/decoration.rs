//! Decoration layers
//!
//! [`DecorationPen`] consumes a glyph's drawing commands and emits only the
//! structure around the outline: markers on on-curve points, markers on
//! handles, or ribbons joining handles to their on-curve points. One pass
//! per [`DecorationMode`] gives three independent layers.

use crate::core::errors::PathError;
use crate::font_source::ComponentData;
use crate::geometry::shapes::{circle, square, HANDLE_TENSION};
use crate::geometry::{ribbon, RibbonCap};
use crate::pen::{draw, Layer, PathCommand, Pen};
use kurbo::Point;

/// Marker glyph placed on on-curve points
pub const POINT_GLYPH: &str = "point";
/// Marker glyph placed on off-curve points
pub const HANDLE_GLYPH: &str = "handle";
/// Glyphs shared by every layer; references to them are never renamed
pub const MARKER_GLYPHS: [&str; 2] = [POINT_GLYPH, HANDLE_GLYPH];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecorationMode {
    /// A square on every on-curve point
    Points,
    /// A circle on every off-curve point
    Handles,
    /// Ribbons from on-curve points to their handles
    Ribbon,
}

impl DecorationMode {
    pub const ALL: [DecorationMode; 3] = [
        DecorationMode::Points,
        DecorationMode::Handles,
        DecorationMode::Ribbon,
    ];

    /// Suffix of the layer glyph this mode produces
    pub fn layer_suffix(&self) -> &'static str {
        match self {
            DecorationMode::Points => "_points",
            DecorationMode::Handles => "_handles",
            DecorationMode::Ribbon => "_lines",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecorationStyle {
    /// Marker size, or total ribbon width
    pub size: f64,
    /// Place markers as references to the marker glyphs instead of drawing them
    pub use_components: bool,
    pub cap: RibbonCap,
}

impl DecorationStyle {
    pub fn new(size: f64) -> Self {
        Self {
            size,
            use_components: true,
            cap: RibbonCap::default(),
        }
    }
}

pub struct DecorationPen {
    mode: DecorationMode,
    style: DecorationStyle,
    last_point: Option<Point>,
    contour_start: Option<Point>,
    segments: usize,
    layer: Layer,
}

impl DecorationPen {
    pub fn new(mode: DecorationMode, style: DecorationStyle) -> Self {
        Self {
            mode,
            style,
            last_point: None,
            contour_start: None,
            segments: 0,
            layer: Layer::default(),
        }
    }

    pub fn into_layer(self) -> Layer {
        self.layer
    }

    fn mark_point(&mut self, at: Point) {
        if self.style.use_components {
            self.layer
                .components
                .push(ComponentData::placed_at(POINT_GLYPH, at));
        } else {
            self.layer.contours.push(square(at, self.style.size));
        }
    }

    fn mark_handle(&mut self, at: Point) {
        if self.style.use_components {
            self.layer
                .components
                .push(ComponentData::placed_at(HANDLE_GLYPH, at));
        } else {
            self.layer
                .contours
                .push(circle(at, self.style.size, HANDLE_TENSION));
        }
    }

    fn add_ribbon(&mut self, points: &[Point]) {
        self.layer
            .contours
            .push(ribbon(points, self.style.size, self.style.cap));
    }

    fn start(&self, command: &'static str) -> Result<Point, PathError> {
        self.last_point.ok_or(PathError::NoCurrentPoint { command })
    }

    fn end_segment(&mut self, to: Point) {
        self.last_point = Some(to);
        self.segments += 1;
    }

    /// Drop the marker of a final segment that landed back on the start
    fn unmark_closing_point(&mut self) {
        let closes_on_start = self.contour_start.is_some() && self.last_point == self.contour_start;
        if self.segments == 0 || !closes_on_start {
            return;
        }
        if self.style.use_components {
            self.layer.components.pop();
        } else {
            self.layer.contours.pop();
        }
    }
}

impl Pen for DecorationPen {
    fn move_to(&mut self, to: Point) -> Result<(), PathError> {
        if self.mode == DecorationMode::Points {
            self.mark_point(to);
        }
        self.last_point = Some(to);
        self.contour_start = Some(to);
        self.segments = 0;
        Ok(())
    }

    fn line_to(&mut self, to: Point) -> Result<(), PathError> {
        if self.mode == DecorationMode::Points {
            self.mark_point(to);
        }
        self.end_segment(to);
        Ok(())
    }

    fn curve_to(&mut self, c1: Point, c2: Point, to: Point) -> Result<(), PathError> {
        match self.mode {
            DecorationMode::Points => self.mark_point(to),
            DecorationMode::Handles => {
                self.mark_handle(c1);
                self.mark_handle(c2);
            }
            DecorationMode::Ribbon => {
                let start = self.start("curve_to")?;
                self.add_ribbon(&[start, c1]);
                self.add_ribbon(&[c2, to]);
            }
        }
        self.end_segment(to);
        Ok(())
    }

    fn qcurve_to(&mut self, off_curve: &[Point], to: Option<Point>) -> Result<(), PathError> {
        match (self.mode, to) {
            (DecorationMode::Points, Some(to)) => self.mark_point(to),
            // A closed run of off-curve points has no on-curve point to mark
            (DecorationMode::Points, None) => {}
            (DecorationMode::Handles, _) => {
                for &point in off_curve {
                    self.mark_handle(point);
                }
            }
            (DecorationMode::Ribbon, Some(to)) => {
                let start = self.start("qcurve_to")?;
                let polyline: Vec<Point> = std::iter::once(start)
                    .chain(off_curve.iter().copied())
                    .chain(std::iter::once(to))
                    .collect();
                self.add_ribbon(&polyline);
            }
            (DecorationMode::Ribbon, None) => {
                if let Some(&first) = off_curve.first() {
                    let polyline: Vec<Point> = off_curve
                        .iter()
                        .copied()
                        .chain(std::iter::once(first))
                        .collect();
                    self.add_ribbon(&polyline);
                }
            }
        }
        match to {
            Some(to) => self.end_segment(to),
            None => {
                self.contour_start = None;
                self.segments = 0;
            }
        }
        Ok(())
    }

    fn close_path(&mut self) -> Result<(), PathError> {
        if self.mode == DecorationMode::Points {
            self.unmark_closing_point();
        }
        self.contour_start = None;
        self.segments = 0;
        Ok(())
    }

    fn add_component(&mut self, component: &ComponentData) -> Result<(), PathError> {
        self.layer.components.push(component.clone());
        Ok(())
    }
}

/// Run one decoration pass over a command list
pub fn decorate(
    commands: &[PathCommand],
    mode: DecorationMode,
    style: DecorationStyle,
) -> Result<Layer, PathError> {
    let mut pen = DecorationPen::new(mode, style);
    draw(commands, &mut pen)?;
    Ok(pen.into_layer())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn triangle() -> Vec<PathCommand> {
        vec![
            PathCommand::MoveTo(p(0.0, 0.0)),
            PathCommand::LineTo(p(100.0, 0.0)),
            PathCommand::LineTo(p(50.0, 100.0)),
            PathCommand::ClosePath,
        ]
    }

    fn cubic_loop() -> Vec<PathCommand> {
        vec![
            PathCommand::MoveTo(p(0.0, 0.0)),
            PathCommand::LineTo(p(100.0, 0.0)),
            PathCommand::CurveTo(p(100.0, 50.0), p(50.0, 100.0), p(0.0, 100.0)),
            PathCommand::ClosePath,
        ]
    }

    #[test]
    fn points_mode_places_one_marker_per_on_curve_point() {
        let layer = decorate(&triangle(), DecorationMode::Points, DecorationStyle::new(20.0)).unwrap();
        assert!(layer.contours.is_empty());
        let placed: Vec<_> = layer
            .components
            .iter()
            .map(|c| (c.base_glyph.as_str(), c.transform[4], c.transform[5]))
            .collect();
        assert_eq!(
            placed,
            vec![("point", 0.0, 0.0), ("point", 100.0, 0.0), ("point", 50.0, 100.0)]
        );
    }

    #[test]
    fn closing_curve_does_not_mark_the_start_twice() {
        let commands = vec![
            PathCommand::MoveTo(p(0.0, 0.0)),
            PathCommand::LineTo(p(100.0, 0.0)),
            PathCommand::CurveTo(p(100.0, 100.0), p(0.0, 100.0), p(0.0, 0.0)),
            PathCommand::ClosePath,
        ];
        let layer = decorate(&commands, DecorationMode::Points, DecorationStyle::new(10.0)).unwrap();
        assert_eq!(layer.components.len(), 2);
    }

    #[test]
    fn points_mode_can_draw_squares_directly() {
        let style = DecorationStyle {
            use_components: false,
            ..DecorationStyle::new(20.0)
        };
        let layer = decorate(&triangle(), DecorationMode::Points, style).unwrap();
        assert!(layer.components.is_empty());
        assert_eq!(layer.contours.len(), 3);
        assert_eq!(layer.contours[1], square(p(100.0, 0.0), 20.0));
    }

    #[test]
    fn handles_mode_marks_both_cubic_handles() {
        let layer = decorate(&cubic_loop(), DecorationMode::Handles, DecorationStyle::new(10.0)).unwrap();
        let positions: Vec<_> = layer
            .components
            .iter()
            .map(|c| (c.base_glyph.as_str(), c.transform[4], c.transform[5]))
            .collect();
        assert_eq!(positions, vec![("handle", 100.0, 50.0), ("handle", 50.0, 100.0)]);

        let direct = DecorationStyle {
            use_components: false,
            ..DecorationStyle::new(10.0)
        };
        let layer = decorate(&cubic_loop(), DecorationMode::Handles, direct).unwrap();
        assert_eq!(layer.contours.len(), 2);
        assert!(layer.contours.iter().all(|c| c.points.len() == 12));
    }

    #[test]
    fn ribbon_mode_joins_each_cubic_handle_to_its_anchor() {
        let layer = decorate(&cubic_loop(), DecorationMode::Ribbon, DecorationStyle::new(4.0)).unwrap();
        assert_eq!(layer.contours.len(), 2);
        assert_eq!(layer.contours[0], ribbon(&[p(100.0, 0.0), p(100.0, 50.0)], 4.0, RibbonCap::Butt));
        assert_eq!(layer.contours[1], ribbon(&[p(50.0, 100.0), p(0.0, 100.0)], 4.0, RibbonCap::Butt));
    }

    #[test]
    fn quadratic_runs_become_one_ribbon_through_every_handle() {
        let commands = vec![
            PathCommand::MoveTo(p(0.0, 0.0)),
            PathCommand::QCurveTo(vec![p(50.0, 0.0), p(100.0, 50.0)], Some(p(100.0, 100.0))),
            PathCommand::ClosePath,
        ];
        let layer = decorate(&commands, DecorationMode::Ribbon, DecorationStyle::new(4.0)).unwrap();
        assert_eq!(layer.contours.len(), 1);
        assert_eq!(layer.contours[0].points.len(), 8);

        let handles = decorate(&commands, DecorationMode::Handles, DecorationStyle::new(4.0)).unwrap();
        assert_eq!(handles.components.len(), 2);

        let points = decorate(&commands, DecorationMode::Points, DecorationStyle::new(4.0)).unwrap();
        assert_eq!(points.components.len(), 2);
    }

    #[test]
    fn components_are_forwarded_in_every_mode() {
        let mut commands = triangle();
        commands.push(PathCommand::AddComponent(ComponentData::placed_at("acute", p(10.0, 0.0))));
        for mode in DecorationMode::ALL {
            let layer = decorate(&commands, mode, DecorationStyle::new(10.0)).unwrap();
            assert!(layer.components.iter().any(|c| c.base_glyph == "acute"));
        }
    }

    #[test]
    fn ribbon_needs_a_current_point() {
        let commands = [PathCommand::CurveTo(p(1.0, 1.0), p(2.0, 2.0), p(3.0, 3.0))];
        let error = decorate(&commands, DecorationMode::Ribbon, DecorationStyle::new(4.0)).unwrap_err();
        assert_eq!(error, PathError::NoCurrentPoint { command: "curve_to" });
    }
}
