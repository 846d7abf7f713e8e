//! Axis definitions and the master grid
//!
//! Every axis is realized only at its minimum and maximum; the compiler
//! interpolates everything in between. Axis values are in 1000-unit em
//! design space.

use crate::core::errors::XRayError;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisParameter {
    pub name: String,
    /// Four-character OpenType axis tag
    pub tag: String,
    pub minimum: f64,
    pub maximum: f64,
    pub default: f64,
}

impl AxisParameter {
    /// An axis whose default is its minimum
    pub fn new(name: &str, tag: &str, minimum: f64, maximum: f64) -> Self {
        Self {
            name: name.to_string(),
            tag: tag.to_string(),
            minimum,
            maximum,
            default: minimum,
        }
    }

    pub fn validate(&self) -> Result<(), XRayError> {
        let invalid = |reason: String| XRayError::InvalidAxis {
            name: self.name.clone(),
            reason,
        };
        if self.tag.len() != 4 || !self.tag.is_ascii() {
            return Err(invalid(format!("tag '{}' is not four ASCII characters", self.tag)));
        }
        if !(self.minimum.is_finite() && self.maximum.is_finite() && self.default.is_finite()) {
            return Err(invalid("values must be finite".to_string()));
        }
        if self.minimum > self.maximum {
            return Err(invalid(format!(
                "minimum {} is above maximum {}",
                self.minimum, self.maximum
            )));
        }
        if !(self.minimum..=self.maximum).contains(&self.default) {
            return Err(invalid(format!(
                "default {} is outside {}..={}",
                self.default, self.minimum, self.maximum
            )));
        }
        Ok(())
    }

    /// The values masters are built at: both ends, or one if they coincide
    pub fn extremes(&self) -> Vec<f64> {
        if self.minimum == self.maximum {
            vec![self.minimum]
        } else {
            vec![self.minimum, self.maximum]
        }
    }
}

/// The four axes of an x-ray font, in grid order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisSet {
    pub outline_width: AxisParameter,
    pub line_width: AxisParameter,
    pub point_size: AxisParameter,
    pub handle_size: AxisParameter,
}

impl Default for AxisSet {
    fn default() -> Self {
        Self {
            outline_width: AxisParameter::new("outline_width", "OTLN", 1.0, 20.0),
            line_width: AxisParameter::new("line_width", "LINE", 1.0, 20.0),
            point_size: AxisParameter::new("point_size", "POIN", 10.0, 40.0),
            handle_size: AxisParameter::new("handle_size", "HAND", 10.0, 40.0),
        }
    }
}

impl AxisSet {
    pub fn axes(&self) -> [&AxisParameter; 4] {
        [
            &self.outline_width,
            &self.line_width,
            &self.point_size,
            &self.handle_size,
        ]
    }

    pub fn validate(&self) -> Result<(), XRayError> {
        self.axes().into_iter().try_for_each(AxisParameter::validate)
    }

    /// Location where every axis sits at its default
    pub fn default_location(&self) -> MasterLocation {
        MasterLocation {
            outline_width: self.outline_width.default,
            line_width: self.line_width.default,
            point_size: self.point_size.default,
            handle_size: self.handle_size.default,
        }
    }

    /// Every combination of axis extremes, outline width varying slowest.
    ///
    /// Four axes with distinct ends give 16 locations.
    pub fn master_grid(&self) -> Result<Vec<MasterLocation>, XRayError> {
        self.validate()?;
        let lines = self.line_width.extremes();
        let points = self.point_size.extremes();
        let handles = self.handle_size.extremes();
        let (lines, points, handles) = (&lines, &points, &handles);

        let grid = self
            .outline_width
            .extremes()
            .into_iter()
            .flat_map(|outline_width| {
                lines.iter().flat_map(move |&line_width| {
                    points.iter().flat_map(move |&point_size| {
                        handles.iter().map(move |&handle_size| MasterLocation {
                            outline_width,
                            line_width,
                            point_size,
                            handle_size,
                        })
                    })
                })
            })
            .collect();
        Ok(grid)
    }
}

/// One corner of the axis grid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MasterLocation {
    pub outline_width: f64,
    pub line_width: f64,
    pub point_size: f64,
    pub handle_size: f64,
}

impl MasterLocation {
    /// Values in axis order, paired with their axes
    pub fn coordinates<'a>(&self, axes: &'a AxisSet) -> [(&'a AxisParameter, f64); 4] {
        let [outline, line, point, handle] = axes.axes();
        [
            (outline, self.outline_width),
            (line, self.line_width),
            (point, self.point_size),
            (handle, self.handle_size),
        ]
    }

    /// The same location in font units, for a font `scale` times larger than
    /// the design em
    pub fn scaled(&self, scale: f64) -> MasterLocation {
        MasterLocation {
            outline_width: self.outline_width * scale,
            line_width: self.line_width * scale,
            point_size: self.point_size * scale,
            handle_size: self.handle_size * scale,
        }
    }

    /// File-name friendly identifier, e.g. `OTLN1-LINE20-POIN10-HAND40`
    pub fn file_stem(&self, axes: &AxisSet) -> String {
        self.coordinates(axes)
            .iter()
            .map(|(axis, value)| format!("{}{}", axis.tag, value))
            .collect::<Vec<_>>()
            .join("-")
    }
}

impl fmt::Display for MasterLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "outline_width={}, line_width={}, point_size={}, handle_size={}",
            self.outline_width, self.line_width, self.point_size, self.handle_size
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn default_grid_has_sixteen_distinct_corners() {
        let axes = AxisSet::default();
        let grid = axes.master_grid().unwrap();
        assert_eq!(grid.len(), 16);

        let stems: HashSet<_> = grid.iter().map(|l| l.file_stem(&axes)).collect();
        assert_eq!(stems.len(), 16);
        assert_eq!(grid[0], axes.default_location());
        assert_eq!(grid[0].file_stem(&axes), "OTLN1-LINE1-POIN10-HAND10");
        assert_eq!(grid[1].handle_size, 40.0);
        assert_eq!(
            grid[15].to_string(),
            "outline_width=20, line_width=20, point_size=40, handle_size=40"
        );
    }

    #[test]
    fn fixed_axis_contributes_one_value() {
        let mut axes = AxisSet::default();
        axes.line_width.maximum = axes.line_width.minimum;
        assert_eq!(axes.master_grid().unwrap().len(), 8);
    }

    #[test]
    fn inverted_or_malformed_axes_are_rejected() {
        let mut axes = AxisSet::default();
        axes.point_size.minimum = 50.0;
        assert!(matches!(
            axes.master_grid(),
            Err(XRayError::InvalidAxis { name, .. }) if name == "point_size"
        ));

        let mut axes = AxisSet::default();
        axes.handle_size.tag = "HANDLE".to_string();
        assert!(axes.validate().is_err());
    }

    #[test]
    fn scaling_multiplies_every_value() {
        let location = AxisSet::default().default_location().scaled(2.0);
        assert_eq!(location.outline_width, 2.0);
        assert_eq!(location.point_size, 20.0);
    }
}
