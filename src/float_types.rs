//! Scalar type of the active precision feature and the constants that go with it.

#[cfg(feature = "f64")]
pub use parry3d_f64 as parry3d;

#[cfg(feature = "f32")]
pub use parry3d;

#[cfg(feature = "f32")]
pub type Real = f32;
#[cfg(feature = "f64")]
pub type Real = f64;

#[cfg(feature = "f32")]
pub use core::f32::consts::{FRAC_PI_2, PI, TAU};
#[cfg(feature = "f64")]
pub use core::f64::consts::{FRAC_PI_2, PI, TAU};

/// Lengths at or below this count as zero.
#[cfg(feature = "f32")]
pub const TOLERANCE: Real = 1e-4;
/// Lengths at or below this count as zero.
#[cfg(feature = "f64")]
pub const TOLERANCE: Real = 1e-9;
