//! Cylindrical-coordinate helpers around the wheel axis (world Z).

use crate::float_types::{Real, TAU};
use nalgebra::{Point3, Rotation3, Vector3};

/// Distance of `p` from the Z axis.
#[inline]
pub fn radius(p: &Point3<Real>) -> Real {
    p.x.hypot(p.y)
}

/// Polar angle of `p` around the Z axis in `(-π, π]`.
#[inline]
pub fn phi(p: &Point3<Real>) -> Real {
    p.y.atan2(p.x)
}

/// Point at `radius`, polar angle `phi` and axial position `z`.
#[inline]
pub fn cyl_point(radius: Real, phi: Real, z: Real) -> Point3<Real> {
    let (sin, cos) = phi.sin_cos();
    Point3::new(radius * cos, radius * sin, z)
}

/// Rigid rotation of `p` by `angle` about the Z axis.
#[inline]
pub fn rotate_z(p: &Point3<Real>, angle: Real) -> Point3<Real> {
    Rotation3::from_axis_angle(&Vector3::z_axis(), angle) * p
}

/// Unit vector pointing radially away from the Z axis through `p`,
/// or +X when `p` lies on the axis.
#[inline]
pub fn planar_dir(p: &Point3<Real>) -> Vector3<Real> {
    let r = radius(p);
    if r <= Real::EPSILON {
        Vector3::x()
    } else {
        Vector3::new(p.x / r, p.y / r, 0.0)
    }
}

/// Moves `p` radially by `delta`, keeping its angle and axial position.
#[inline]
pub fn offset_radius(p: &Point3<Real>, delta: Real) -> Point3<Real> {
    cyl_point(radius(p) + delta, phi(p), p.z)
}

/// Angle of copy `index` when `count` copies are spread evenly around the axis.
#[inline]
pub fn copy_angle(index: u32, count: u32) -> Real {
    TAU / count.max(1) as Real * index as Real
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn cyl_point_round_trips_through_radius_and_phi() {
        let p = cyl_point(12.5, 1.2, -3.0);
        assert_relative_eq!(radius(&p), 12.5, epsilon = 1e-9);
        assert_relative_eq!(phi(&p), 1.2, epsilon = 1e-9);
        assert_relative_eq!(p.z, -3.0);
    }

    #[test]
    fn rotate_z_keeps_radius_and_height() {
        let p = Point3::new(3.0, 4.0, 7.0);
        let q = rotate_z(&p, 0.75);
        assert_relative_eq!(radius(&q), 5.0, epsilon = 1e-9);
        assert_relative_eq!(q.z, 7.0);
        assert_relative_eq!(phi(&q), phi(&p) + 0.75, epsilon = 1e-9);
    }

    #[test]
    fn offset_radius_on_axis_points_along_x() {
        let q = offset_radius(&Point3::new(0.0, 0.0, 2.0), 3.0);
        assert_relative_eq!(q, Point3::new(3.0, 0.0, 2.0), epsilon = 1e-9);
    }
}
