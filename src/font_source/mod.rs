//! Font source data structures
//!
//! This module contains the in-memory model of the font being x-rayed:
//! glyphs, contours, components, metrics and kerning. These are plain owned
//! structs; `crate::data` converts them to and from UFO sources.

pub mod data;
pub mod metrics;
pub mod scale;

// Explicit re-exports for public API
// Data structures
pub use data::{ComponentData, ContourData, FontData, GlyphData, PointData, PointTypeData};
// Metrics
pub use metrics::FontInfo;
// Scaling
pub use scale::{scale_font, DESIGN_UNITS_PER_EM};
