//! glyph-xray
//!
//! Builds multi-master x-ray fonts from a UFO source: every glyph is shown
//! as its outline, its on-curve points, its handles and the lines joining
//! them, with axes for each size.
pub mod core;
pub mod data;
pub mod editing;
pub mod export;
pub mod font_source;
pub mod geometry;
pub mod logging;
pub mod masters;
pub mod pen;
pub mod rendering;
