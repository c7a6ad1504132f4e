// File: crates/chart-core/src/error.rs
// Summary: Error type returned by the render entry points.

use thiserror::Error;

/// Failures surfaced by [`crate::Chart::render`] and the renderer backends.
///
/// Layout helpers (ranges, ticks, boxes) never fail; they degrade to empty or zero results.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("please provide at least one series")]
    NoSeries,

    #[error("must have at least one visible series")]
    NoVisibleSeries,

    #[error("series {name:?} has no values")]
    EmptySeries { name: String },

    #[error("series {name:?}: {reason}")]
    InvalidSeries { name: String, reason: String },

    #[error("{axis} range: {reason}")]
    InvalidRange { axis: &'static str, reason: &'static str },

    #[error("font unavailable: {0}")]
    Font(String),

    #[error("renderer: {0}")]
    Renderer(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ChartError>;
