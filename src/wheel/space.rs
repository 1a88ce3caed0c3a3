//! The coordinate mapper: carries design-space points into the curved wheel.

use super::WheelParams;
use super::contour::{self, ContourProfile, ContourSettings};
use crate::errors::WheelError;
use crate::float_types::Real;
use crate::frames::Frames;
use crate::polar;
use crate::traits::CoordinateTransform;
use nalgebra::{Point3, Vector3};

/// The four spines bounding the wheel's cross-section in the XZ half plane.
///
/// `upper_height` and `lower_height` run from the hub outward, `inner_radius` and
/// `outer_radius` from the lower face to the upper face.
#[derive(Debug, Clone)]
pub struct BoundarySpines {
    pub upper_height: Frames,
    pub lower_height: Frames,
    pub inner_radius: Frames,
    pub outer_radius: Frames,
}

/// A wheel's design space together with its boundary spines.
#[derive(Debug, Clone)]
pub struct WheelSpace {
    params: WheelParams,
    spines: BoundarySpines,
}

impl WheelSpace {
    pub fn new(params: WheelParams, spines: BoundarySpines) -> Self {
        Self { params, spines }
    }

    /// Builds the spines from a contour profile.
    pub fn from_profile(
        params: WheelParams,
        profile: &ContourProfile,
        settings: &ContourSettings,
    ) -> Result<Self, WheelError> {
        let spines = contour::build_boundary_spines(&params, profile, settings)?;
        Ok(Self::new(params, spines))
    }

    pub fn params(&self) -> &WheelParams {
        &self.params
    }

    pub fn spines(&self) -> &BoundarySpines {
        &self.spines
    }

    /// Cross-section point (in the XZ half plane) at height ratio `h` and length
    /// ratio `l`.
    ///
    /// The upper and lower spines are blended by `h`; the inner and outer spines
    /// contribute their deviation from a straight chord, blended by `l`. On the four
    /// edges of the unit square the corresponding spine is reproduced exactly.
    pub fn inner_point(&self, height_ratio: Real, length_ratio: Real) -> Point3<Real> {
        let s = &self.spines;
        let (h, l) = (height_ratio, length_ratio);

        let upper = s.upper_height.point_at(l);
        let lower = s.lower_height.point_at(l);

        let chord_deviation = |spine: &Frames| -> Vector3<Real> {
            let chord = spine.first() + (spine.last() - spine.first()) * h;
            spine.point_at(h) - chord
        };
        let d_inner = chord_deviation(&s.inner_radius);
        let d_outer = chord_deviation(&s.outer_radius);

        let reference = lower + (upper - lower) * h;
        reference + d_inner + (d_outer - d_inner) * l
    }
}

impl CoordinateTransform for WheelSpace {
    fn transform(&self, point: Point3<Real>) -> Point3<Real> {
        let r = polar::radius(&point);
        let phi = polar::phi(&point);
        let h = point.z / self.params.width;
        let l = (r - self.params.hub_radius) / self.params.span();
        polar::rotate_z(&self.inner_point(h, l), phi)
    }
}

/// The undistorted design space, centred on the mid plane.
///
/// Building a generator through this transform instead of a [`WheelSpace`] shows
/// it before deformation.
#[derive(Debug, Clone, Copy)]
pub struct DesignSpace {
    width: Real,
}

impl DesignSpace {
    pub fn new(params: &WheelParams) -> Self {
        Self {
            width: params.width,
        }
    }
}

impl CoordinateTransform for DesignSpace {
    fn transform(&self, point: Point3<Real>) -> Point3<Real> {
        point - Vector3::z() * (0.5 * self.width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frames::FrameType;
    use approx::assert_relative_eq;

    // rectangle: radius 10..20, axial -5..5
    fn box_space() -> WheelSpace {
        let line = |a: Point3<Real>, b: Point3<Real>| {
            Frames::new(vec![a, b], FrameType::MinRotation).unwrap()
        };
        let spines = BoundarySpines {
            upper_height: line(Point3::new(10.0, 0.0, 5.0), Point3::new(20.0, 0.0, 5.0)),
            lower_height: line(Point3::new(10.0, 0.0, -5.0), Point3::new(20.0, 0.0, -5.0)),
            inner_radius: line(Point3::new(10.0, 0.0, -5.0), Point3::new(10.0, 0.0, 5.0)),
            outer_radius: line(Point3::new(20.0, 0.0, -5.0), Point3::new(20.0, 0.0, 5.0)),
        };
        WheelSpace::new(WheelParams::new(10.0, 20.0, 10.0).unwrap(), spines)
    }

    #[test]
    fn straight_spines_give_a_shifted_cylinder() {
        let space = box_space();
        let p = space.transform(polar::cyl_point(15.0, 0.7, 2.5));
        assert_relative_eq!(polar::radius(&p), 15.0, epsilon = 1e-9);
        assert_relative_eq!(polar::phi(&p), 0.7, epsilon = 1e-9);
        assert_relative_eq!(p.z, -2.5, epsilon = 1e-9);
    }

    #[test]
    fn design_space_only_centres_the_axis() {
        let params = WheelParams::new(10.0, 20.0, 10.0).unwrap();
        let p = DesignSpace::new(&params).transform(Point3::new(3.0, 4.0, 5.0));
        assert_relative_eq!(p, Point3::new(3.0, 4.0, 0.0));
    }
}
