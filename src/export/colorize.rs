//! Color palette and color-layer plan
//!
//! The color tables themselves are built downstream. This module decides
//! which layer glyphs make up each color glyph and which palette entry
//! paints them, and writes that plan as JSON next to the compiled font.

use crate::masters::layers::{BOUNDS_LAYER, FILLED_LAYER, OUTLINED_LAYER};
use crate::masters::features::{BOUNDS_FILLED_SUFFIX, BOUNDS_SUFFIX, FILLED_SUFFIX};
use crate::rendering::DecorationMode;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::info;

pub const BACKGROUND_INDEX: u16 = 0;
pub const OUTLINE_INDEX: u16 = 1;
pub const RIBBON_INDEX: u16 = 2;
pub const POINT_INDEX: u16 = 3;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{0}' is not a #RRGGBB or #RRGGBBAA color")]
pub struct ColorParseError(String);

/// An sRGB color with alpha
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Color {
    pub const fn rgba(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || ColorParseError(value.to_string());
        let hex = value.trim().strip_prefix('#').unwrap_or(value.trim());
        if !(hex.len() == 6 || hex.len() == 8) || !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |index: usize| {
            hex.get(index..index + 2)
                .and_then(|digits| u8::from_str_radix(digits, 16).ok())
                .ok_or_else(invalid)
        };
        Ok(Color {
            red: channel(0)?,
            green: channel(2)?,
            blue: channel(4)?,
            alpha: if hex.len() == 8 { channel(6)? } else { 255 },
        })
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:02X}{:02X}{:02X}{:02X}",
            self.red, self.green, self.blue, self.alpha
        )
    }
}

/// The four colors of an x-ray font
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub background: Color,
    pub outline: Color,
    pub ribbon: Color,
    pub point: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color::rgba(0x00, 0x00, 0x00, 0x0F),
            outline: Color::rgba(0x00, 0x00, 0xFF, 0xFF),
            ribbon: Color::rgba(0x00, 0xFF, 0x00, 0xFF),
            point: Color::rgba(0xFF, 0x00, 0x00, 0xFF),
        }
    }
}

impl Palette {
    /// Colors in palette-index order
    pub fn entries(&self) -> [Color; 4] {
        [self.background, self.outline, self.ribbon, self.point]
    }
}

/// One layer of a color glyph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerEntry {
    pub glyph: String,
    pub palette_index: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerPlan {
    /// The font the plan applies to
    pub font: PathBuf,
    pub palette: Vec<Color>,
    /// Color glyph name to its layers, bottom first
    pub glyphs: BTreeMap<String, Vec<LayerEntry>>,
}

impl LayerPlan {
    /// Layers for every base glyph and its three alternates
    pub fn new(font: &Path, glyph_names: &[String], palette: &Palette) -> Self {
        let mut glyphs = BTreeMap::new();
        for name in glyph_names {
            let entry = |suffix: &str, palette_index| LayerEntry {
                glyph: format!("{name}{suffix}"),
                palette_index,
            };
            let decorations = [
                entry(DecorationMode::Ribbon.layer_suffix(), RIBBON_INDEX),
                entry(DecorationMode::Handles.layer_suffix(), POINT_INDEX),
                entry(DecorationMode::Points.layer_suffix(), POINT_INDEX),
            ];

            let outlined: Vec<_> = std::iter::once(entry(OUTLINED_LAYER, OUTLINE_INDEX))
                .chain(decorations.iter().cloned())
                .collect();
            let filled: Vec<_> = std::iter::once(entry(FILLED_LAYER, OUTLINE_INDEX))
                .chain(decorations.iter().cloned())
                .collect();
            let with_bounds = |layers: &[LayerEntry]| -> Vec<LayerEntry> {
                std::iter::once(entry(BOUNDS_LAYER, BACKGROUND_INDEX))
                    .chain(layers.iter().cloned())
                    .collect()
            };

            glyphs.insert(format!("{name}{BOUNDS_SUFFIX}"), with_bounds(&outlined));
            glyphs.insert(format!("{name}{BOUNDS_FILLED_SUFFIX}"), with_bounds(&filled));
            glyphs.insert(format!("{name}{FILLED_SUFFIX}"), filled);
            glyphs.insert(name.clone(), outlined);
        }

        Self {
            font: font.to_path_buf(),
            palette: palette.entries().to_vec(),
            glyphs,
        }
    }
}

/// Wires color layers into a compiled font
pub trait Colorizer {
    /// Returns the path of whatever was written
    fn colorize(&self, font: &Path, glyph_names: &[String], palette: &Palette) -> Result<PathBuf>;
}

/// Writes the layer plan as `<font stem>.colr.json` beside the font
#[derive(Debug, Default)]
pub struct LayerPlanWriter;

impl LayerPlanWriter {
    pub fn plan_path(font: &Path) -> PathBuf {
        let stem = font
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "font".to_string());
        font.with_file_name(format!("{stem}.colr.json"))
    }
}

impl Colorizer for LayerPlanWriter {
    fn colorize(&self, font: &Path, glyph_names: &[String], palette: &Palette) -> Result<PathBuf> {
        let plan = LayerPlan::new(font, glyph_names, palette);
        let path = Self::plan_path(font);
        let json = serde_json::to_string_pretty(&plan).context("Failed to serialize layer plan")?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write layer plan {}", path.display()))?;
        info!(
            "Wrote color layers for {} glyphs to {}",
            plan.glyphs.len(),
            path.display()
        );
        Ok(path)
    }
}
