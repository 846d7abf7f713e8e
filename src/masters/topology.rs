//! Cross-master structural checks
//!
//! Masters interpolate only if they agree on everything but coordinates:
//! glyph names, contour counts, point type sequences and component names.
//! The check runs once over the finished set, before anything is written.

use super::generator::Master;
use crate::core::errors::XRayError;
use crate::font_source::{GlyphData, PointTypeData};

/// Everything about a glyph that must not differ between masters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphSignature {
    pub contours: Vec<Vec<PointTypeData>>,
    pub components: Vec<String>,
}

impl GlyphSignature {
    pub fn of(glyph: &GlyphData) -> Self {
        Self {
            contours: glyph.contours.iter().map(|c| c.point_types()).collect(),
            components: glyph
                .components
                .iter()
                .map(|c| c.base_glyph.clone())
                .collect(),
        }
    }

    /// First difference from `reference`, if any
    pub fn difference(&self, reference: &GlyphSignature) -> Option<String> {
        if self.contours.len() != reference.contours.len() {
            return Some(format!(
                "{} contours instead of {}",
                self.contours.len(),
                reference.contours.len()
            ));
        }
        for (index, (types, expected)) in self.contours.iter().zip(&reference.contours).enumerate() {
            if types.len() != expected.len() {
                return Some(format!(
                    "contour {} has {} points instead of {}",
                    index,
                    types.len(),
                    expected.len()
                ));
            }
            if let Some(point) = types.iter().zip(expected).position(|(a, b)| a != b) {
                return Some(format!(
                    "contour {} point {} is {:?} instead of {:?}",
                    index, point, types[point], expected[point]
                ));
            }
        }
        if self.components != reference.components {
            return Some(format!(
                "components [{}] instead of [{}]",
                self.components.join(", "),
                reference.components.join(", ")
            ));
        }
        None
    }
}

/// Fail with the first structural difference between any master and the
/// first one.
pub fn verify_masters(masters: &[Master]) -> Result<(), XRayError> {
    let Some((reference, others)) = masters.split_first() else {
        return Err(XRayError::NoMasters);
    };
    let reference_signatures: Vec<(&String, GlyphSignature)> = reference
        .font
        .glyphs
        .iter()
        .map(|(name, glyph)| (name, GlyphSignature::of(glyph)))
        .collect();

    for master in others {
        let mismatch = |glyph: &str, detail: String| XRayError::TopologyMismatch {
            glyph: glyph.to_string(),
            master: master.location.to_string(),
            reference: reference.location.to_string(),
            detail,
        };

        if let Some(extra) = master
            .font
            .glyphs
            .keys()
            .find(|name| !reference.font.glyphs.contains_key(*name))
        {
            return Err(mismatch(extra, "glyph is not in the reference master".to_string()));
        }

        for (name, expected) in &reference_signatures {
            let glyph = master
                .font
                .glyph(name)
                .ok_or_else(|| mismatch(name, "glyph is missing".to_string()))?;
            if let Some(detail) = GlyphSignature::of(glyph).difference(expected) {
                return Err(mismatch(name, detail));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font_source::{ComponentData, ContourData, FontData, PointData};
    use crate::masters::axes::AxisSet;
    use kurbo::Point;

    fn master(outline_width: f64, glyph: GlyphData) -> Master {
        let mut location = AxisSet::default().default_location();
        location.outline_width = outline_width;
        let mut font = FontData::default();
        font.insert_glyph(glyph);
        Master { location, font }
    }

    fn glyph(x: f64, last: PointTypeData) -> GlyphData {
        let mut glyph = GlyphData::new("A", 500.0);
        glyph.contours.push(ContourData::new(vec![
            PointData::new(0.0, 0.0, PointTypeData::Line),
            PointData::new(x, 0.0, PointTypeData::Line),
            PointData::new(x, x, last),
        ]));
        glyph
            .components
            .push(ComponentData::placed_at("point", Point::new(x, 0.0)));
        glyph
    }

    #[test]
    fn coordinate_differences_are_allowed() {
        let masters = [
            master(1.0, glyph(100.0, PointTypeData::Line)),
            master(20.0, glyph(140.0, PointTypeData::Line)),
        ];
        assert!(verify_masters(&masters).is_ok());
    }

    #[test]
    fn point_type_differences_are_reported() {
        let masters = [
            master(1.0, glyph(100.0, PointTypeData::Line)),
            master(20.0, glyph(100.0, PointTypeData::Curve)),
        ];
        let error = verify_masters(&masters).unwrap_err();
        let XRayError::TopologyMismatch { glyph, master, detail, .. } = &error else {
            panic!("expected a topology mismatch, got {error:?}");
        };
        assert_eq!(glyph, "A");
        assert!(master.starts_with("outline_width=20"));
        assert_eq!(detail, "contour 0 point 2 is Curve instead of Line");
    }

    #[test]
    fn component_and_glyph_set_differences_are_reported() {
        let mut renamed = glyph(100.0, PointTypeData::Line);
        renamed.components[0].base_glyph = "handle".to_string();
        let masters = [master(1.0, glyph(100.0, PointTypeData::Line)), master(20.0, renamed)];
        assert!(matches!(
            verify_masters(&masters),
            Err(XRayError::TopologyMismatch { detail, .. }) if detail.starts_with("components")
        ));

        let mut extra = master(20.0, glyph(100.0, PointTypeData::Line));
        extra.font.insert_glyph(GlyphData::new("B", 500.0));
        let masters = [master(1.0, glyph(100.0, PointTypeData::Line)), extra];
        assert!(matches!(
            verify_masters(&masters),
            Err(XRayError::TopologyMismatch { glyph, .. }) if glyph == "B"
        ));
    }

    #[test]
    fn an_empty_master_set_is_an_error() {
        assert!(matches!(verify_masters(&[]), Err(XRayError::NoMasters)));
    }
}
