//! Output collaborators
//!
//! - `designspace`: master sources and variable font compilation
//! - `colorize`: palette and color-layer plan

pub mod colorize;
pub mod designspace;

pub use colorize::{Color, Colorizer, LayerPlan, LayerPlanWriter, Palette};
pub use designspace::{DesignspaceWriter, FontcCompiler, MasterCompiler};
