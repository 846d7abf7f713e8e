//! UFO sources on disk
//!
//! - `conversions`: norad types to and from the in-memory font model
//! - `ufo`: loading and saving UFO directories

pub mod conversions;
pub mod ufo;

pub use ufo::{load_ufo_from_path, save_ufo_to_path};
