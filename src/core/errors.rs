//! Error types for the x-ray pipeline
//!
//! Degenerate geometry is handled where it happens (see
//! `crate::geometry::GeometryError`) and never shows up here. Everything in
//! this module is fatal for a generation run and carries enough context to
//! reproduce it: the glyph, the stage and the axis values involved.

use std::fmt;
use thiserror::Error;

/// A drawing command stream that breaks the pen contract
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("unsupported segment: {0}")]
    UnsupportedSegment(String),
    #[error("{command} received with no contour in progress")]
    NoCurrentPoint { command: &'static str },
    #[error("{command} received while a contour is still open")]
    ContourInProgress { command: &'static str },
    #[error("command stream ended inside an unclosed contour")]
    UnclosedContour,
}

/// Pipeline stage a glyph failed in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Segmenting,
    Normalizing,
    Decorating,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Segmenting => "segmenting contours",
            Stage::Normalizing => "normalizing curves",
            Stage::Decorating => "drawing decorations",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum XRayError {
    #[error("glyph '{glyph}' failed while {stage} ({axes}): {source}")]
    Stage {
        glyph: String,
        stage: Stage,
        /// Axis values the failing pass ran with
        axes: String,
        #[source]
        source: PathError,
    },
    #[error("master {master} does not match master {reference} in glyph '{glyph}': {detail}")]
    TopologyMismatch {
        glyph: String,
        master: String,
        reference: String,
        detail: String,
    },
    #[error("glyph '{0}' is not in the font")]
    MissingGlyph(String),
    #[error("axis '{name}' is invalid: {reason}")]
    InvalidAxis { name: String, reason: String },
    #[error("no masters were generated")]
    NoMasters,
}

impl XRayError {
    pub fn stage(
        glyph: impl Into<String>,
        stage: Stage,
        axes: impl Into<String>,
        source: PathError,
    ) -> Self {
        XRayError::Stage {
            glyph: glyph.into(),
            stage,
            axes: axes.into(),
            source,
        }
    }
}
