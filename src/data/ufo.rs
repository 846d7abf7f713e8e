//! UFO file I/O operations

use crate::font_source::FontData;
use anyhow::{Context, Result};
use norad::Font;
use std::path::Path;
use tracing::{debug, info};

/// Load a UFO font file from disk
pub fn load_ufo_from_path(path: impl AsRef<Path>) -> Result<FontData> {
    let path = path.as_ref();
    let font = Font::load(path).with_context(|| format!("Failed to load UFO {}", path.display()))?;
    let font = FontData::from_norad_font(&font, Some(path.to_path_buf()));
    info!(
        "Loaded {} with {} glyphs at {} units per em",
        path.display(),
        font.glyphs.len(),
        font.info.units_per_em
    );
    Ok(font)
}

/// Write `font` as a UFO directory, replacing anything already at `path`
pub fn save_ufo_to_path(font: &FontData, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    font.to_norad_font()
        .with_context(|| format!("Failed to convert font for {}", path.display()))?
        .save(path)
        .with_context(|| format!("Failed to save UFO {}", path.display()))?;
    debug!("Saved {} glyphs to {}", font.glyphs.len(), path.display());
    Ok(())
}
