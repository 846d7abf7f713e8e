//! Geometric Primitives and Operations
//!
//! Vector math shared by the offset engine and the decoration pen, plus the
//! small fixed shapes (markers, bounds) placed into generated layers.

pub mod ribbon;
pub mod shapes;
pub mod vector;

// Re-export commonly used items
pub use ribbon::{ribbon, RibbonCap};
pub use vector::{
    bisector_offset, end_offset, normalize, perpendicular_offset, round_point, vertex_offset,
    GeometryError,
};
