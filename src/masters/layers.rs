//! Per-glyph layers and the glyph family built from them
//!
//! A source glyph is normalized once. Each master then offsets and decorates
//! that shared shape at its own sizes and assembles the results into a fixed
//! family of glyphs.

use super::axes::MasterLocation;
use super::features::{BOUNDS_FILLED_SUFFIX, BOUNDS_SUFFIX, FILLED_SUFFIX};
use crate::core::errors::{Stage, XRayError};
use crate::editing::{normalize_commands, outline_contours};
use crate::font_source::{ComponentData, ContourData, FontInfo, GlyphData};
use crate::geometry::shapes::{bounds_rectangle, circle, square, HANDLE_TENSION};
use crate::geometry::RibbonCap;
use crate::pen::{build_layer, glyph_commands, Layer, PathCommand};
use crate::rendering::{
    decorate, DecorationMode, DecorationStyle, HANDLE_GLYPH, MARKER_GLYPHS, POINT_GLYPH,
};
use kurbo::Point;

pub const OUTLINED_LAYER: &str = "_outlined";
pub const FILLED_LAYER: &str = "_filled";
pub const BOUNDS_LAYER: &str = "_bounds";

/// Reported as the axis context of failures that happen before any master
/// is involved
const SHARED_PASS: &str = "shared by all masters";

/// A source glyph after curve normalization, ready to be drawn at any size
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedGlyph {
    pub name: String,
    pub advance_width: f64,
    pub unicode_values: Vec<char>,
    /// Closed contours and components as drawing commands
    pub commands: Vec<PathCommand>,
    /// The same contours, stored
    pub contours: Vec<ContourData>,
    pub components: Vec<ComponentData>,
}

pub fn normalize_glyph(glyph: &GlyphData, handle_fix: f64) -> Result<NormalizedGlyph, XRayError> {
    let fail = |stage, source| XRayError::stage(&glyph.name, stage, SHARED_PASS, source);

    let commands = glyph_commands(glyph).map_err(|e| fail(Stage::Segmenting, e))?;
    let commands =
        normalize_commands(&commands, handle_fix).map_err(|e| fail(Stage::Normalizing, e))?;
    let layer = build_layer(&commands).map_err(|e| fail(Stage::Normalizing, e))?;

    Ok(NormalizedGlyph {
        name: glyph.name.clone(),
        advance_width: glyph.advance_width,
        unicode_values: glyph.unicode_values.clone(),
        commands,
        contours: layer.contours,
        components: layer.components,
    })
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerOptions {
    pub use_components: bool,
    pub ribbon_cap: RibbonCap,
}

impl Default for LayerOptions {
    fn default() -> Self {
        Self {
            use_components: true,
            ribbon_cap: RibbonCap::Butt,
        }
    }
}

/// The four generated layers of one glyph at one location.
///
/// Forwarded component references already point at the matching layer of
/// the referenced glyph.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphLayers {
    pub outlined: Layer,
    pub lines: Layer,
    pub handles: Layer,
    pub points: Layer,
}

/// Build every layer of `glyph` with `sizes` given in font units
pub fn build_layers(
    glyph: &NormalizedGlyph,
    sizes: &MasterLocation,
    options: LayerOptions,
) -> Result<GlyphLayers, XRayError> {
    let outlined = Layer {
        contours: outline_contours(&glyph.contours, sizes.outline_width),
        components: glyph.components.clone(),
    }
    .with_component_suffix(OUTLINED_LAYER, &MARKER_GLYPHS);

    let pass = |mode: DecorationMode, size: f64| {
        let style = DecorationStyle {
            size,
            use_components: options.use_components,
            cap: options.ribbon_cap,
        };
        decorate(&glyph.commands, mode, style)
            .map(|layer| layer.with_component_suffix(mode.layer_suffix(), &MARKER_GLYPHS))
            .map_err(|source| {
                XRayError::stage(&glyph.name, Stage::Decorating, sizes.to_string(), source)
            })
    };

    Ok(GlyphLayers {
        outlined,
        lines: pass(DecorationMode::Ribbon, sizes.line_width)?,
        handles: pass(DecorationMode::Handles, sizes.handle_size)?,
        points: pass(DecorationMode::Points, sizes.point_size)?,
    })
}

/// The shared `point` and `handle` marker glyphs, centered on the origin
pub fn marker_glyphs(sizes: &MasterLocation) -> [GlyphData; 2] {
    let mut point = GlyphData::new(POINT_GLYPH, 0.0);
    point.contours.push(square(Point::ORIGIN, sizes.point_size));
    let mut handle = GlyphData::new(HANDLE_GLYPH, 0.0);
    handle
        .contours
        .push(circle(Point::ORIGIN, sizes.handle_size, HANDLE_TENSION));
    [point, handle]
}

/// Every glyph generated for one source glyph.
///
/// Only the base glyph keeps the source code points; the rest are reached
/// through stylistic sets or color layers.
pub fn glyph_family(
    glyph: &NormalizedGlyph,
    layers: GlyphLayers,
    info: &FontInfo,
) -> Vec<GlyphData> {
    let name = glyph.name.as_str();
    let width = glyph.advance_width;
    let layer_glyph = |suffix: &str, layer: &Layer| GlyphData {
        name: format!("{name}{suffix}"),
        advance_width: width,
        unicode_values: Vec::new(),
        contours: layer.contours.clone(),
        components: layer.components.clone(),
    };
    let reference =
        |suffix: &str| ComponentData::new(format!("{name}{suffix}"), ComponentData::IDENTITY);

    let filled = Layer {
        contours: glyph.contours.clone(),
        components: glyph.components.clone(),
    }
    .with_component_suffix(FILLED_LAYER, &MARKER_GLYPHS);
    let bounds = Layer {
        contours: vec![bounds_rectangle(
            width,
            info.descender_or_default(),
            info.ascender_or_default(),
        )],
        components: Vec::new(),
    };

    let stacked = [&layers.lines, &layers.outlined, &layers.handles, &layers.points];
    let mut base = GlyphData::new(name, width);
    base.unicode_values = glyph.unicode_values.clone();
    base.contours = stacked.iter().flat_map(|l| l.contours.iter().cloned()).collect();
    base.components = stacked.iter().flat_map(|l| l.components.iter().cloned()).collect();

    let mut filled_alternate = GlyphData::new(format!("{name}{FILLED_SUFFIX}"), width);
    filled_alternate.components = [
        FILLED_LAYER,
        DecorationMode::Ribbon.layer_suffix(),
        DecorationMode::Points.layer_suffix(),
        DecorationMode::Handles.layer_suffix(),
    ]
    .into_iter()
    .map(reference)
    .collect();

    vec![
        layer_glyph(OUTLINED_LAYER, &layers.outlined),
        layer_glyph(DecorationMode::Ribbon.layer_suffix(), &layers.lines),
        layer_glyph(DecorationMode::Handles.layer_suffix(), &layers.handles),
        layer_glyph(DecorationMode::Points.layer_suffix(), &layers.points),
        layer_glyph(FILLED_LAYER, &filled),
        layer_glyph(BOUNDS_LAYER, &bounds),
        base,
        filled_alternate,
        GlyphData::new(format!("{name}{BOUNDS_SUFFIX}"), width),
        GlyphData::new(format!("{name}{BOUNDS_FILLED_SUFFIX}"), width),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font_source::{PointData, PointTypeData};

    fn triangle_glyph() -> GlyphData {
        let mut glyph = GlyphData::new("A", 500.0);
        glyph.unicode_values.push('A');
        glyph.contours.push(ContourData::new(vec![
            PointData::new(0.0, 0.0, PointTypeData::Line),
            PointData::new(500.0, 0.0, PointTypeData::Line),
            PointData::new(250.0, 700.0, PointTypeData::Line),
        ]));
        glyph
    }

    fn sizes() -> MasterLocation {
        MasterLocation {
            outline_width: 10.0,
            line_width: 4.0,
            point_size: 20.0,
            handle_size: 16.0,
        }
    }

    #[test]
    fn normalizing_keeps_a_straight_glyph_intact() {
        let normalized = normalize_glyph(&triangle_glyph(), 10.0).unwrap();
        assert_eq!(normalized.contours, triangle_glyph().contours);
        assert_eq!(normalized.commands.len(), 4);
    }

    #[test]
    fn triangle_layers() {
        let normalized = normalize_glyph(&triangle_glyph(), 10.0).unwrap();
        let layers = build_layers(&normalized, &sizes(), LayerOptions::default()).unwrap();

        assert_eq!(layers.outlined.point_count(), 6);
        assert_eq!(layers.points.components.len(), 3);
        assert!(layers.handles.components.is_empty());
        assert!(layers.lines.contours.is_empty());
    }

    #[test]
    fn family_names_and_bounds() {
        let normalized = normalize_glyph(&triangle_glyph(), 10.0).unwrap();
        let layers = build_layers(&normalized, &sizes(), LayerOptions::default()).unwrap();
        let info = FontInfo {
            ascender: Some(750.0),
            descender: Some(-250.0),
            ..FontInfo::default()
        };
        let family = glyph_family(&normalized, layers, &info);

        let names: Vec<_> = family.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "A_outlined",
                "A_lines",
                "A_handles",
                "A_points",
                "A_filled",
                "A_bounds",
                "A",
                "A.filled",
                "A.bounds",
                "A.bounds.filled",
            ]
        );

        let bounds = &family[5].contours[0];
        let corners: Vec<_> = bounds.points.iter().map(|p| (p.x, p.y)).collect();
        assert_eq!(
            corners,
            vec![(0.0, -250.0), (500.0, -250.0), (500.0, 750.0), (0.0, 750.0)]
        );

        let base = &family[6];
        assert_eq!(base.unicode_values, vec!['A']);
        assert_eq!(base.contours.len(), 2);
        assert_eq!(base.components.len(), 3);
        assert!(family.iter().filter(|g| g.name != "A").all(|g| g.unicode_values.is_empty()));
    }

    #[test]
    fn composite_references_follow_each_layer() {
        let mut aacute = GlyphData::new("Aacute", 500.0);
        aacute.components = vec![
            ComponentData::new("A", ComponentData::IDENTITY),
            ComponentData::placed_at("acutecomb", Point::new(250.0, 0.0)),
        ];
        let normalized = normalize_glyph(&aacute, 10.0).unwrap();
        let layers = build_layers(&normalized, &sizes(), LayerOptions::default()).unwrap();
        let family = glyph_family(&normalized, layers, &FontInfo::default());

        let targets = |name: &str| -> Vec<String> {
            family
                .iter()
                .find(|g| g.name == name)
                .map(|g| g.components.iter().map(|c| c.base_glyph.clone()).collect())
                .unwrap_or_default()
        };
        assert_eq!(targets("Aacute_points"), vec!["A_points", "acutecomb_points"]);
        assert_eq!(targets("Aacute_filled"), vec!["A_filled", "acutecomb_filled"]);
        assert_eq!(
            targets("Aacute.filled"),
            vec!["Aacute_filled", "Aacute_lines", "Aacute_points", "Aacute_handles"]
        );
        assert_eq!(targets("Aacute").len(), 8);
    }

    #[test]
    fn marker_glyphs_are_sized_per_master() {
        let [point, handle] = marker_glyphs(&sizes());
        assert_eq!(point.name, "point");
        assert_eq!(point.contours[0].points[0].position(), Point::new(-10.0, -10.0));
        assert_eq!(handle.name, "handle");
        assert_eq!(handle.contours[0].points.len(), 12);
    }
}
