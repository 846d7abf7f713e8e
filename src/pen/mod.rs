//! Drawing commands and the pen protocol
//!
//! Outlines move between pipeline stages as explicit lists of
//! [`PathCommand`]s. Stages are consumers implementing [`Pen`]; the
//! [`draw`] helper replays a command list into any of them.

pub mod builder;
pub mod segments;

use crate::core::errors::PathError;
use crate::font_source::ComponentData;
use kurbo::Point;

pub use builder::{build_layer, reverse_contour, Layer, LayerBuilder};
pub use segments::{contour_commands, glyph_commands};

#[derive(Debug, Clone, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    /// Cubic segment: two handles and the end point
    CurveTo(Point, Point, Point),
    /// Quadratic run: any number of off-curve points, then the end point.
    /// A run with no end point is a closed contour made only of off-curve
    /// points.
    QCurveTo(Vec<Point>, Option<Point>),
    ClosePath,
    AddComponent(ComponentData),
}

/// A consumer of drawing commands
pub trait Pen {
    fn move_to(&mut self, to: Point) -> Result<(), PathError>;
    fn line_to(&mut self, to: Point) -> Result<(), PathError>;
    fn curve_to(&mut self, c1: Point, c2: Point, to: Point) -> Result<(), PathError>;
    fn qcurve_to(&mut self, off_curve: &[Point], to: Option<Point>) -> Result<(), PathError>;
    fn close_path(&mut self) -> Result<(), PathError>;
    fn add_component(&mut self, component: &ComponentData) -> Result<(), PathError>;

    fn draw_command(&mut self, command: &PathCommand) -> Result<(), PathError> {
        match command {
            PathCommand::MoveTo(p) => self.move_to(*p),
            PathCommand::LineTo(p) => self.line_to(*p),
            PathCommand::CurveTo(c1, c2, p) => self.curve_to(*c1, *c2, *p),
            PathCommand::QCurveTo(off_curve, end) => self.qcurve_to(off_curve, *end),
            PathCommand::ClosePath => self.close_path(),
            PathCommand::AddComponent(component) => self.add_component(component),
        }
    }
}

/// Replay `commands` into `pen`, stopping at the first contract violation
pub fn draw<P: Pen + ?Sized>(commands: &[PathCommand], pen: &mut P) -> Result<(), PathError> {
    commands
        .iter()
        .try_for_each(|command| pen.draw_command(command))
}

/// Recording pen: appends every command it receives
impl Pen for Vec<PathCommand> {
    fn move_to(&mut self, to: Point) -> Result<(), PathError> {
        self.push(PathCommand::MoveTo(to));
        Ok(())
    }

    fn line_to(&mut self, to: Point) -> Result<(), PathError> {
        self.push(PathCommand::LineTo(to));
        Ok(())
    }

    fn curve_to(&mut self, c1: Point, c2: Point, to: Point) -> Result<(), PathError> {
        self.push(PathCommand::CurveTo(c1, c2, to));
        Ok(())
    }

    fn qcurve_to(&mut self, off_curve: &[Point], to: Option<Point>) -> Result<(), PathError> {
        self.push(PathCommand::QCurveTo(off_curve.to_vec(), to));
        Ok(())
    }

    fn close_path(&mut self) -> Result<(), PathError> {
        self.push(PathCommand::ClosePath);
        Ok(())
    }

    fn add_component(&mut self, component: &ComponentData) -> Result<(), PathError> {
        self.push(PathCommand::AddComponent(component.clone()));
        Ok(())
    }
}
