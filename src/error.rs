//! Error types for drag configuration and usage.
//!
//! Caller-facing setters normalize bad input and log instead of returning
//! these; the strict constructors and `try_` entry points surface them.

use crate::types::Axis;
use thiserror::Error;

/// Errors that can occur while configuring or driving a drag.
#[derive(Error, Debug)]
pub enum DragError {
    /// Unit scale must be finite and strictly positive on both axes
    #[error("Invalid unit scale: ({x}, {y}) (must be finite and > 0)")]
    InvalidScale { x: f64, y: f64 },

    /// Limit bounds are non-finite or inverted
    #[error("Invalid {axis} limits: [{min}, {max}]")]
    InvalidLimits { axis: Axis, min: f64, max: f64 },

    /// Coordinate is NaN or infinite
    #[error("Non-finite coordinate: ({x}, {y})")]
    NonFiniteCoordinate { x: f64, y: f64 },

    /// The draggable was detached and no longer accepts input
    #[error("Draggable is detached")]
    Detached,

    /// Options could not be parsed
    #[error("Config parse error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type alias for drag operations
pub type DragResult<T> = Result<T, DragError>;
