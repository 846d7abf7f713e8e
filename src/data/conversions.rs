//! UFO format conversion utilities
//!
//! Conversion between the in-memory font model and norad's UFO types. Only
//! the default layer is read; kerning is flattened into ordered pairs.

use crate::font_source::{
    ComponentData, ContourData, FontData, FontInfo, GlyphData, PointData, PointTypeData,
};
use anyhow::{Context, Result};
use norad::{Font, Name};
use std::path::PathBuf;

fn glyph_name(name: &str) -> Result<Name> {
    Name::new(name).with_context(|| format!("'{name}' is not a valid glyph name"))
}

impl GlyphData {
    pub fn from_norad_glyph(norad_glyph: &norad::Glyph) -> Self {
        Self {
            name: norad_glyph.name().to_string(),
            advance_width: norad_glyph.width,
            unicode_values: norad_glyph.codepoints.iter().collect(),
            contours: norad_glyph
                .contours
                .iter()
                .map(ContourData::from_norad_contour)
                .collect(),
            components: norad_glyph
                .components
                .iter()
                .map(ComponentData::from_norad_component)
                .collect(),
        }
    }

    pub fn to_norad_glyph(&self) -> Result<norad::Glyph> {
        let mut glyph = norad::Glyph::new(glyph_name(&self.name)?.as_str());
        glyph.width = self.advance_width;
        for &codepoint in &self.unicode_values {
            glyph.codepoints.insert(codepoint);
        }
        glyph.contours = self
            .contours
            .iter()
            .map(ContourData::to_norad_contour)
            .collect();
        glyph.components = self
            .components
            .iter()
            .map(ComponentData::to_norad_component)
            .collect::<Result<_>>()
            .with_context(|| format!("glyph '{}' has an invalid component", self.name))?;
        Ok(glyph)
    }
}

impl ComponentData {
    pub fn from_norad_component(norad_component: &norad::Component) -> Self {
        let transform = &norad_component.transform;
        Self {
            base_glyph: norad_component.base.to_string(),
            transform: [
                transform.x_scale,
                transform.xy_scale,
                transform.yx_scale,
                transform.y_scale,
                transform.x_offset,
                transform.y_offset,
            ],
        }
    }

    pub fn to_norad_component(&self) -> Result<norad::Component> {
        let transform = norad::AffineTransform {
            x_scale: self.transform[0],
            xy_scale: self.transform[1],
            yx_scale: self.transform[2],
            y_scale: self.transform[3],
            x_offset: self.transform[4],
            y_offset: self.transform[5],
        };
        Ok(norad::Component::new(
            glyph_name(&self.base_glyph)?,
            transform,
            None,
        ))
    }
}

impl ContourData {
    pub fn from_norad_contour(norad_contour: &norad::Contour) -> Self {
        Self::new(
            norad_contour
                .points
                .iter()
                .map(PointData::from_norad_point)
                .collect(),
        )
    }

    pub fn to_norad_contour(&self) -> norad::Contour {
        let points = self.points.iter().map(PointData::to_norad_point).collect();
        norad::Contour::new(points, None)
    }
}

impl PointData {
    pub fn from_norad_point(norad_point: &norad::ContourPoint) -> Self {
        Self::new(
            norad_point.x,
            norad_point.y,
            PointTypeData::from_norad_point_type(&norad_point.typ),
        )
    }

    pub fn to_norad_point(&self) -> norad::ContourPoint {
        norad::ContourPoint::new(
            self.x,
            self.y,
            self.point_type.to_norad_point_type(),
            false, // smooth
            None,  // name
            None,  // identifier
        )
    }
}

impl PointTypeData {
    pub fn from_norad_point_type(norad_type: &norad::PointType) -> Self {
        match norad_type {
            norad::PointType::Move => PointTypeData::Move,
            norad::PointType::Line => PointTypeData::Line,
            norad::PointType::OffCurve => PointTypeData::OffCurve,
            norad::PointType::Curve => PointTypeData::Curve,
            norad::PointType::QCurve => PointTypeData::QCurve,
        }
    }

    pub fn to_norad_point_type(&self) -> norad::PointType {
        match self {
            PointTypeData::Move => norad::PointType::Move,
            PointTypeData::Line => norad::PointType::Line,
            PointTypeData::OffCurve => norad::PointType::OffCurve,
            PointTypeData::Curve => norad::PointType::Curve,
            PointTypeData::QCurve => norad::PointType::QCurve,
        }
    }
}

impl FontData {
    pub fn from_norad_font(font: &Font, path: Option<PathBuf>) -> Self {
        let glyphs = font
            .default_layer()
            .iter()
            .map(|glyph| (glyph.name().to_string(), GlyphData::from_norad_glyph(glyph)))
            .collect();

        let kerning = font
            .kerning
            .iter()
            .flat_map(|(first, seconds)| {
                seconds.iter().map(move |(second, value)| {
                    ((first.to_string(), second.to_string()), *value)
                })
            })
            .collect();

        let groups = font
            .groups
            .iter()
            .map(|(group, members)| {
                let members = members.iter().map(|m| m.to_string()).collect();
                (group.to_string(), members)
            })
            .collect();

        Self {
            info: FontInfo::from_norad_font(font),
            glyphs,
            kerning,
            groups,
            features: font.features.clone(),
            path,
        }
    }

    pub fn to_norad_font(&self) -> Result<Font> {
        let mut font = Font::new();
        font.font_info = self.info.to_norad_font_info();

        let layer = font.default_layer_mut();
        for glyph_data in self.glyphs.values() {
            layer.insert_glyph(glyph_data.to_norad_glyph()?);
        }

        for ((first, second), value) in &self.kerning {
            font.kerning
                .entry(glyph_name(first)?)
                .or_default()
                .insert(glyph_name(second)?, *value);
        }
        for (group, members) in &self.groups {
            let members = members
                .iter()
                .map(|member| glyph_name(member))
                .collect::<Result<Vec<_>>>()?;
            font.groups.insert(glyph_name(group)?, members);
        }
        font.features = self.features.clone();

        Ok(font)
    }
}
