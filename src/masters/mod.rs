//! Multi-master generation
//!
//! Turns one source font into a set of structurally identical masters, one
//! per corner of the four-axis design space.

pub mod axes;
pub mod features;
pub mod generator;
pub mod layers;
pub mod topology;

pub use axes::{AxisParameter, AxisSet, MasterLocation};
pub use generator::{GeneratorOptions, Master, MasterGridGenerator};
pub use layers::LayerOptions;
pub use topology::verify_masters;
