//! Font metrics and naming information
//!
//! This module contains the vertical metrics the x-ray layers are framed by
//! (ascender, descender, x-height, cap-height) along with the units-per-em
//! and family/style names copied into every generated master.

use norad::Font;

/// Font information
#[derive(Debug, Clone, PartialEq)]
pub struct FontInfo {
    pub family_name: String,
    pub style_name: String,
    pub units_per_em: f64,
    pub ascender: Option<f64>,
    pub descender: Option<f64>,
    pub x_height: Option<f64>,
    pub cap_height: Option<f64>,
}

impl Default for FontInfo {
    fn default() -> Self {
        Self {
            family_name: "Untitled".to_string(),
            style_name: "Regular".to_string(),
            units_per_em: 1000.0,
            ascender: None,
            descender: None,
            x_height: None,
            cap_height: None,
        }
    }
}

impl FontInfo {
    /// Extract font info from norad Font
    pub fn from_norad_font(font: &Font) -> Self {
        let units_per_em = font
            .font_info
            .units_per_em
            .map(|v| v.to_string().parse().unwrap_or(1000.0))
            .unwrap_or(1000.0);

        Self {
            family_name: Self::extract_string_field(
                &font.font_info,
                |info| &info.family_name,
                "Untitled",
            ),
            style_name: Self::extract_string_field(
                &font.font_info,
                |info| &info.style_name,
                "Regular",
            ),
            units_per_em,
            ascender: font.font_info.ascender,
            descender: font.font_info.descender,
            x_height: font.font_info.x_height,
            cap_height: font.font_info.cap_height,
        }
    }

    /// Helper to extract string fields with defaults
    fn extract_string_field<F>(font_info: &norad::FontInfo, getter: F, default: &str) -> String
    where
        F: Fn(&norad::FontInfo) -> &Option<String>,
    {
        getter(font_info)
            .as_ref()
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }

    /// Convert back to norad FontInfo
    pub fn to_norad_font_info(&self) -> norad::FontInfo {
        let mut info = norad::FontInfo::default();

        if !self.family_name.is_empty() {
            info.family_name = Some(self.family_name.clone());
        }
        if !self.style_name.is_empty() {
            info.style_name = Some(self.style_name.clone());
        }

        if let Some(units_per_em) =
            norad::fontinfo::NonNegativeIntegerOrFloat::new(self.units_per_em)
        {
            info.units_per_em = Some(units_per_em);
        }
        info.ascender = self.ascender;
        info.descender = self.descender;
        info.x_height = self.x_height;
        info.cap_height = self.cap_height;
        info
    }

    /// Get ascender value with sensible default based on UPM
    pub fn ascender_or_default(&self) -> f64 {
        self.ascender.unwrap_or(self.units_per_em * 0.8)
    }

    /// Get descender value with sensible default based on UPM
    pub fn descender_or_default(&self) -> f64 {
        self.descender.unwrap_or(-(self.units_per_em * 0.2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_units_per_em() {
        let info = FontInfo {
            units_per_em: 2000.0,
            ..Default::default()
        };
        assert_eq!(info.ascender_or_default(), 1600.0);
        assert_eq!(info.descender_or_default(), -400.0);
    }

    #[test]
    fn norad_round_trip_keeps_metrics() {
        let info = FontInfo {
            units_per_em: 1000.0,
            ascender: Some(750.0),
            descender: Some(-250.0),
            cap_height: Some(700.0),
            x_height: Some(500.0),
            ..Default::default()
        };
        let mut font = Font::new();
        font.font_info = info.to_norad_font_info();
        assert_eq!(FontInfo::from_norad_font(&font), info);
    }
}
