//! Master grid generation
//!
//! Normalizes every source glyph once, then builds one complete glyph set
//! per corner of the axis grid. Glyphs are normalized in parallel and masters
//! are built in parallel; both results are collected in input order, so the
//! output never depends on scheduling.

use super::axes::{AxisSet, MasterLocation};
use super::features::{duplicate_kerning, master_features};
use super::layers::{
    build_layers, glyph_family, marker_glyphs, normalize_glyph, LayerOptions, NormalizedGlyph,
};
use super::topology::verify_masters;
use crate::core::errors::XRayError;
use crate::font_source::scale::drawing_scale;
use crate::font_source::FontData;
use crate::rendering::MARKER_GLYPHS;
use rayon::prelude::*;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Zero-length handles are pulled out this far, in 1000-unit em design space
pub const ZERO_HANDLE_FIX: f64 = 10.0;

/// One corner of the design space: a complete font at one location
#[derive(Debug, Clone)]
pub struct Master {
    pub location: MasterLocation,
    pub font: FontData,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GeneratorOptions {
    pub axes: AxisSet,
    pub layers: LayerOptions,
}

pub struct MasterGridGenerator {
    options: GeneratorOptions,
}

impl MasterGridGenerator {
    pub fn new(options: GeneratorOptions) -> Self {
        Self { options }
    }

    pub fn axes(&self) -> &AxisSet {
        &self.options.axes
    }

    /// Build and verify every master for `source`.
    ///
    /// Fails on the first glyph that breaks the drawing contract, and if the
    /// finished masters are not structurally identical.
    pub fn generate(&self, source: &FontData) -> Result<Vec<Master>, XRayError> {
        let locations = self.options.axes.master_grid()?;
        let scale = drawing_scale(source.info.units_per_em);

        let glyphs: Vec<_> = source
            .glyphs
            .values()
            .filter(|glyph| {
                let reserved = MARKER_GLYPHS.contains(&glyph.name.as_str());
                if reserved {
                    warn!(
                        "Skipping source glyph '{}': the name is reserved for markers",
                        glyph.name
                    );
                }
                !reserved
            })
            .collect();

        info!("Normalizing {} glyphs", glyphs.len());
        let normalized = glyphs
            .par_iter()
            .map(|glyph| normalize_glyph(glyph, ZERO_HANDLE_FIX * scale))
            .collect::<Result<Vec<_>, _>>()?;

        let names: Vec<&str> = normalized.iter().map(|g| g.name.as_str()).collect();
        let kerning = duplicate_kerning(&source.kerning, |side| names.contains(&side));
        let features = master_features(&source.features, &names);

        info!("Building {} masters", locations.len());
        let masters = locations
            .par_iter()
            .map(|location| -> Result<Master, XRayError> {
                let mut font = self.build_master(source, &normalized, location, scale)?;
                font.kerning = kerning.clone();
                font.features = features.clone();
                Ok(Master {
                    location: *location,
                    font,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        verify_masters(&masters)?;
        Ok(masters)
    }

    fn build_master(
        &self,
        source: &FontData,
        normalized: &[NormalizedGlyph],
        location: &MasterLocation,
        scale: f64,
    ) -> Result<FontData, XRayError> {
        let sizes = location.scaled(scale);
        let mut info = source.info.clone();
        info.style_name = location.file_stem(&self.options.axes);

        let mut glyphs = BTreeMap::new();
        for marker in marker_glyphs(&sizes) {
            glyphs.insert(marker.name.clone(), marker);
        }
        for glyph in normalized {
            let layers = build_layers(glyph, &sizes, self.options.layers)?;
            for member in glyph_family(glyph, layers, &source.info) {
                glyphs.insert(member.name.clone(), member);
            }
        }
        debug!("Master {} has {} glyphs", location, glyphs.len());

        Ok(FontData {
            info,
            glyphs,
            kerning: BTreeMap::new(),
            groups: source.groups.clone(),
            features: String::new(),
            path: None,
        })
    }
}
