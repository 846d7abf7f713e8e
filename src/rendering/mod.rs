//! Decoration rendering
//!
//! Layers drawn around an outline to expose its construction.

pub mod decoration;

pub use decoration::{
    decorate, DecorationMode, DecorationPen, DecorationStyle, HANDLE_GLYPH, MARKER_GLYPHS,
    POINT_GLYPH,
};
