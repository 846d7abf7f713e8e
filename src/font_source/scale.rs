//! Units-per-em scaling
//!
//! Sources are rescaled to a large, fixed units-per-em before processing so
//! thin outlines and small markers survive integer rounding. Axis values are
//! authored against a 1000-unit em and scaled the same way.

use super::data::FontData;

/// The em size axis values are expressed in
pub const DESIGN_UNITS_PER_EM: f64 = 1000.0;

/// Factor turning a 1000-unit design value into font units at `units_per_em`
pub fn drawing_scale(units_per_em: f64) -> f64 {
    units_per_em / DESIGN_UNITS_PER_EM
}

/// Rescale every coordinate, width, metric and kerning value to
/// `target_units_per_em`, rounding to integers. Returns the factor used.
///
/// Component offsets scale; their 2x2 matrices are dimensionless and stay.
pub fn scale_font(font: &mut FontData, target_units_per_em: f64) -> f64 {
    let factor = target_units_per_em / font.info.units_per_em;
    let scale = |value: f64| (value * factor).round();

    for glyph in font.glyphs.values_mut() {
        for point in glyph.contours.iter_mut().flat_map(|c| c.points.iter_mut()) {
            point.x = scale(point.x);
            point.y = scale(point.y);
        }
        for component in &mut glyph.components {
            component.transform[4] = scale(component.transform[4]);
            component.transform[5] = scale(component.transform[5]);
        }
        glyph.advance_width = scale(glyph.advance_width);
    }

    let info = &mut font.info;
    info.units_per_em = target_units_per_em;
    info.ascender = info.ascender.map(scale);
    info.descender = info.descender.map(scale);
    info.x_height = info.x_height.map(scale);
    info.cap_height = info.cap_height.map(scale);

    for value in font.kerning.values_mut() {
        *value = scale(*value);
    }

    factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font_source::{ComponentData, ContourData, GlyphData, PointData, PointTypeData};

    #[test]
    fn scaling_rounds_everything_to_the_new_grid() {
        let mut font = FontData::default();
        font.info.units_per_em = 1000.0;
        font.info.ascender = Some(750.0);
        font.info.descender = Some(-250.0);

        let mut glyph = GlyphData::new("a", 501.0);
        glyph.contours.push(ContourData::new(vec![
            PointData::new(10.0, 0.0, PointTypeData::Line),
            PointData::new(10.3, 33.3, PointTypeData::Line),
        ]));
        glyph.components.push(ComponentData::new(
            "b",
            [0.5, 0.0, 0.0, 0.5, 10.0, -3.0],
        ));
        font.insert_glyph(glyph);
        font.kerning.insert(("a".into(), "a".into()), -15.0);

        let factor = scale_font(&mut font, 2048.0);
        assert_eq!(factor, 2.048);

        let glyph = font.glyph("a").unwrap();
        assert_eq!(glyph.advance_width, 1026.0);
        assert_eq!(glyph.contours[0].points[1].x, 21.0);
        assert_eq!(glyph.contours[0].points[1].y, 68.0);
        assert_eq!(glyph.components[0].transform, [0.5, 0.0, 0.0, 0.5, 20.0, -6.0]);
        assert_eq!(font.info.units_per_em, 2048.0);
        assert_eq!(font.info.ascender, Some(1536.0));
        assert_eq!(font.info.descender, Some(-512.0));
        assert_eq!(font.kerning[&("a".to_string(), "a".to_string())], -31.0);
    }

    #[test]
    fn drawing_scale_is_relative_to_a_thousand_unit_em() {
        assert_eq!(drawing_scale(8192.0), 8.192);
    }
}
