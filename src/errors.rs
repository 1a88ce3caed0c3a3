//! Errors raised while configuring or building a wheel

use crate::float_types::Real;

/// All the ways a wheel build can be misconfigured. None of them are transient.
#[derive(Debug, thiserror::Error)]
pub enum WheelError {
    /// (DegenerateCurve) A spine was built from fewer than two points or has ~zero arc length
    #[error("(DegenerateCurve) a spine needs at least 2 distinct points, got {points} point(s) spanning {length}")]
    DegenerateCurve { points: usize, length: Real },

    /// (InvalidLayerBounds) Layer ratios must satisfy `0 <= start < end <= 1`
    #[error("(InvalidLayerBounds) layer [{start}, {end}] is not a valid sub-range of [0, 1]")]
    InvalidLayerBounds { start: Real, end: Real },

    /// (InsufficientClearance) The wall thickness leaves no material gap between copies
    #[error(
        "(InsufficientClearance) symmetry {symmetry} with wall thickness {wall_thickness} leaves a core gap of {gap}"
    )]
    InsufficientClearance {
        symmetry: u32,
        wall_thickness: Real,
        gap: Real,
    },

    /// (InvalidParameters) Wheel dimensions or generator settings out of range
    #[error("(InvalidParameters) {0}")]
    InvalidParameters(String),

    /// A recipe file could not be parsed
    #[error("(Config) {0}")]
    Config(#[from] toml::de::Error),

    /// A recipe could not be written out
    #[error("(Serialize) {0}")]
    Serialize(#[from] toml::ser::Error),
}
