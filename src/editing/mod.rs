//! Outline editing passes
//!
//! - `normalize`: cubic cleanup ahead of offsetting
//! - `offset`: miter offsetting of closed contours

pub mod normalize;
pub mod offset;

pub use normalize::{normalize_commands, normalize_cubic, CurveNormalizer};
pub use offset::{offset_contour, outline_contours};
