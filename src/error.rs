//! Error types for configuration loading.
//!
//! The simulation itself never fails; bad runtime values are clamped.

use std::fmt;

/// Errors that can occur while loading or validating a `Tuning`.
#[derive(Debug, Clone, PartialEq)]
pub enum TuningError {
    /// The configuration file could not be read.
    Io(String),
    /// The JSON document could not be parsed.
    Parse(String),
    /// World dimensions must be positive and leave room above the ground.
    InvalidWorld,
    /// A value that must be strictly positive was not.
    NonPositive { name: &'static str },
    /// A value that must not be negative was.
    Negative { name: &'static str, value: f32 },
    /// The sling anchor must sit inside the world above the ground band.
    AnchorOutsideWorld,
    /// A retention coefficient must lie in [0, 1].
    InvalidCoefficient { name: &'static str, value: f32 },
    /// A block in the layout is degenerate or outside the playable area.
    InvalidBlock { index: usize },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Io(msg) => write!(f, "failed to read tuning: {}", msg),
            TuningError::Parse(msg) => write!(f, "failed to parse tuning: {}", msg),
            TuningError::InvalidWorld => {
                write!(f, "world must be positive and taller than the ground band")
            }
            TuningError::NonPositive { name } => write!(f, "{} must be positive", name),
            TuningError::Negative { name, value } => {
                write!(f, "{} must not be negative (got {})", name, value)
            }
            TuningError::AnchorOutsideWorld => write!(f, "anchor lies outside the world"),
            TuningError::InvalidCoefficient { name, value } => {
                write!(f, "{} must be in [0, 1] (got {})", name, value)
            }
            TuningError::InvalidBlock { index } => {
                write!(f, "block {} is degenerate or outside the world", index)
            }
        }
    }
}

impl std::error::Error for TuningError {}

impl From<serde_json::Error> for TuningError {
    fn from(err: serde_json::Error) -> Self {
        TuningError::Parse(err.to_string())
    }
}

impl From<std::io::Error> for TuningError {
    fn from(err: std::io::Error) -> Self {
        TuningError::Io(err.to_string())
    }
}
