//! Core application functionality
//!
//! This module contains the application shell around the library:
//! - CLI parsing and validation
//! - The user settings file and option resolution
//! - Error types
//! - The pipeline runner

pub mod cli;
pub mod config_file;
pub mod errors;
pub mod platform;
pub mod runner;

// Re-export commonly used items
pub use cli::CliArgs;
pub use config_file::{ConfigFile, XRayOptions};
pub use errors::{PathError, Stage, XRayError};
pub use runner::run_app;
