//! Test support library
//! Provides various helper functions & utilities for tests.
#![allow(dead_code)]

use nalgebra::Point3;
use roverwheel::{
    float_types::Real,
    resolution::Resolution,
    traits::SolidOps,
    voxels::Voxels,
    wheel::{ContourProfile, ContourSettings, WheelParams, WheelSpace},
};

/// Returns the bounding box `[min_x, min_y, min_z, max_x, max_y, max_z]` of a
/// solid, or all zeros for an empty one.
pub fn bounding_box(solid: &Voxels) -> [Real; 6] {
    match solid.bounding_box() {
        Some(bb) => [
            bb.mins.x, bb.mins.y, bb.mins.z, bb.maxs.x, bb.maxs.y, bb.maxs.z,
        ],
        None => [0.0; 6],
    }
}

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// Distance between two points.
pub fn distance(a: &Point3<Real>, b: &Point3<Real>) -> Real {
    (a - b).norm()
}

/// The wheel most tests run against: hub 30, outer 120, width 60.
pub fn reference_params() -> WheelParams {
    WheelParams::new(30.0, 120.0, 60.0).unwrap()
}

pub fn reference_space() -> WheelSpace {
    WheelSpace::from_profile(
        reference_params(),
        &ContourProfile::default(),
        &ContourSettings::default(),
    )
    .unwrap()
}

/// Coarse enough for whole-wheel builds to finish in a test run.
pub fn coarse() -> Resolution {
    Resolution::preview()
}
