//! Glyph, contour and font data
//!
//! Coordinates are stored as `f64` font units. Point types follow the UFO
//! convention: an on-curve point's type describes the segment that ends at
//! it, off-curve points have no segment type of their own.

use super::metrics::FontInfo;
use crate::core::errors::XRayError;
use kurbo::Point;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

/// Segment type of a contour point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointTypeData {
    /// Start of an open contour
    Move,
    Line,
    OffCurve,
    Curve,
    QCurve,
}

impl PointTypeData {
    pub fn is_on_curve(&self) -> bool {
        !matches!(self, PointTypeData::OffCurve)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PointData {
    pub x: f64,
    pub y: f64,
    pub point_type: PointTypeData,
}

impl PointData {
    pub fn new(x: f64, y: f64, point_type: PointTypeData) -> Self {
        Self { x, y, point_type }
    }

    pub fn from_point(point: Point, point_type: PointTypeData) -> Self {
        Self::new(point.x, point.y, point_type)
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContourData {
    pub points: Vec<PointData>,
}

impl ContourData {
    pub fn new(points: Vec<PointData>) -> Self {
        Self { points }
    }

    /// An open contour starts with a move point
    pub fn is_open(&self) -> bool {
        self.points
            .first()
            .is_some_and(|point| point.point_type == PointTypeData::Move)
    }

    pub fn positions(&self) -> Vec<Point> {
        self.points.iter().map(PointData::position).collect()
    }

    pub fn point_types(&self) -> Vec<PointTypeData> {
        self.points.iter().map(|point| point.point_type).collect()
    }
}

/// A named reference to another glyph with an affine placement
/// `[xx, xy, yx, yy, dx, dy]`
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentData {
    pub base_glyph: String,
    pub transform: [f64; 6],
}

impl ComponentData {
    pub const IDENTITY: [f64; 6] = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];

    pub fn new(base_glyph: impl Into<String>, transform: [f64; 6]) -> Self {
        Self {
            base_glyph: base_glyph.into(),
            transform,
        }
    }

    /// Unscaled reference placed at `position`
    pub fn placed_at(base_glyph: impl Into<String>, position: Point) -> Self {
        Self::new(base_glyph, [1.0, 0.0, 0.0, 1.0, position.x, position.y])
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GlyphData {
    pub name: String,
    pub advance_width: f64,
    pub unicode_values: Vec<char>,
    pub contours: Vec<ContourData>,
    pub components: Vec<ComponentData>,
}

impl GlyphData {
    pub fn new(name: impl Into<String>, advance_width: f64) -> Self {
        Self {
            name: name.into(),
            advance_width,
            ..Default::default()
        }
    }
}

/// A whole font source: metrics, glyphs by name, kerning and groups.
///
/// Glyphs are kept in a `BTreeMap` so every pass over the font visits them in
/// the same order.
#[derive(Debug, Clone, Default)]
pub struct FontData {
    pub info: FontInfo,
    pub glyphs: BTreeMap<String, GlyphData>,
    /// Kerning value for each (first, second) pair; either side may be a group
    pub kerning: BTreeMap<(String, String), f64>,
    pub groups: BTreeMap<String, Vec<String>>,
    /// OpenType feature code carried alongside the glyphs
    pub features: String,
    pub path: Option<PathBuf>,
}

impl FontData {
    pub fn glyph(&self, name: &str) -> Option<&GlyphData> {
        self.glyphs.get(name)
    }

    pub fn insert_glyph(&mut self, glyph: GlyphData) {
        self.glyphs.insert(glyph.name.clone(), glyph);
    }

    pub fn glyph_names(&self) -> Vec<String> {
        self.glyphs.keys().cloned().collect()
    }

    /// Restrict the font to `names` plus every glyph they reach through
    /// component references.
    ///
    /// Kerning pairs survive when each side is a kept glyph or a group;
    /// group members are filtered to kept glyphs.
    pub fn subset(&self, names: &[String]) -> Result<FontData, XRayError> {
        let mut keep = BTreeSet::new();
        let mut pending: Vec<&str> = names.iter().map(String::as_str).collect();
        while let Some(name) = pending.pop() {
            if keep.contains(name) {
                continue;
            }
            let glyph = self
                .glyph(name)
                .ok_or_else(|| XRayError::MissingGlyph(name.to_string()))?;
            keep.insert(name.to_string());
            pending.extend(glyph.components.iter().map(|c| c.base_glyph.as_str()));
        }

        let kept_side = |side: &String| keep.contains(side) || self.groups.contains_key(side);
        Ok(FontData {
            info: self.info.clone(),
            glyphs: self
                .glyphs
                .iter()
                .filter(|(name, _)| keep.contains(*name))
                .map(|(name, glyph)| (name.clone(), glyph.clone()))
                .collect(),
            kerning: self
                .kerning
                .iter()
                .filter(|((first, second), _)| kept_side(first) && kept_side(second))
                .map(|(pair, value)| (pair.clone(), *value))
                .collect(),
            groups: self
                .groups
                .iter()
                .map(|(group, members)| {
                    let members = members
                        .iter()
                        .filter(|member| keep.contains(*member))
                        .cloned()
                        .collect();
                    (group.clone(), members)
                })
                .collect(),
            features: self.features.clone(),
            path: self.path.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn font_with(glyphs: Vec<GlyphData>) -> FontData {
        let mut font = FontData::default();
        for glyph in glyphs {
            font.insert_glyph(glyph);
        }
        font
    }

    #[test]
    fn subset_follows_component_references() {
        let mut aacute = GlyphData::new("aacute", 500.0);
        aacute.components = vec![
            ComponentData::new("a", ComponentData::IDENTITY),
            ComponentData::placed_at("acutecomb", Point::new(250.0, 0.0)),
        ];
        let mut font = font_with(vec![
            aacute,
            GlyphData::new("a", 500.0),
            GlyphData::new("acutecomb", 0.0),
            GlyphData::new("b", 520.0),
        ]);
        font.kerning.insert(("a".into(), "b".into()), -10.0);
        font.kerning.insert(("aacute".into(), "a".into()), -5.0);

        let subset = font.subset(&["aacute".to_string()]).unwrap();
        assert_eq!(subset.glyph_names(), vec!["a", "aacute", "acutecomb"]);
        assert_eq!(subset.kerning.len(), 1);
        assert!(subset.kerning.contains_key(&("aacute".into(), "a".into())));
    }

    #[test]
    fn subset_reports_unknown_glyphs() {
        let font = font_with(vec![GlyphData::new("a", 500.0)]);
        let error = font.subset(&["zz".to_string()]).unwrap_err();
        assert!(matches!(error, XRayError::MissingGlyph(name) if name == "zz"));
    }

    #[test]
    fn open_contour_detection() {
        let open = ContourData::new(vec![
            PointData::new(0.0, 0.0, PointTypeData::Move),
            PointData::new(10.0, 0.0, PointTypeData::Line),
        ]);
        let closed = ContourData::new(vec![
            PointData::new(0.0, 0.0, PointTypeData::Line),
            PointData::new(10.0, 0.0, PointTypeData::Line),
        ]);
        assert!(open.is_open());
        assert!(!closed.is_open());
    }
}
