//! Tread: a pattern designed on a straight strip around a reference cylinder and
//! wrapped onto the wheel's outer-radius spine.

mod patterns;

pub use patterns::{CosineRibs, LatticeRibs, Studs};

use crate::errors::WheelError;
use crate::float_types::Real;
use crate::frames::Frames;
use crate::polar;
use crate::resolution::Resolution;
use crate::shapes::{Primitive, Revolve};
use crate::traits::{CoordinateTransform, Identity, SolidOps};
use crate::voxels::Voxels;
use log::debug;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Radius of the cylinder tread patterns are designed on.
pub const TREAD_REFERENCE_RADIUS: Real = 140.0;

pub trait TreadPattern {
    /// Builds the pattern on the strip `ref_radius` × `[0, contour_height]` and
    /// sends every sample through `transform`.
    fn construct(
        &self,
        ref_radius: Real,
        contour_height: Real,
        transform: &dyn CoordinateTransform,
        res: &Resolution,
    ) -> Voxels;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TreadPatternKind {
    CosineRibs,
    LatticeRibs,
    Studs,
}

impl TreadPatternKind {
    pub const ALL: [TreadPatternKind; 3] = [
        TreadPatternKind::CosineRibs,
        TreadPatternKind::LatticeRibs,
        TreadPatternKind::Studs,
    ];
}

impl TreadPattern for TreadPatternKind {
    fn construct(
        &self,
        ref_radius: Real,
        contour_height: Real,
        transform: &dyn CoordinateTransform,
        res: &Resolution,
    ) -> Voxels {
        match self {
            TreadPatternKind::CosineRibs => {
                CosineRibs.construct(ref_radius, contour_height, transform, res)
            },
            TreadPatternKind::LatticeRibs => {
                LatticeRibs.construct(ref_radius, contour_height, transform, res)
            },
            TreadPatternKind::Studs => Studs.construct(ref_radius, contour_height, transform, res),
        }
    }
}

/// Wraps the design strip onto a spine in the XZ half plane.
///
/// A strip point at radius `r`, angle `phi` and height `z` lands on the spine at
/// arc-length fraction `z / contour_height`, is pushed along the spine's outward
/// normal by `r - ref_radius` and turned by `phi` about the axis.
#[derive(Debug, Clone, Copy)]
pub struct TreadTransform<'a> {
    spine: &'a Frames,
    ref_radius: Real,
    contour_height: Real,
}

impl<'a> TreadTransform<'a> {
    pub fn new(spine: &'a Frames, ref_radius: Real, contour_height: Real) -> Self {
        Self {
            spine,
            ref_radius,
            contour_height,
        }
    }
}

impl CoordinateTransform for TreadTransform<'_> {
    fn transform(&self, point: Point3<Real>) -> Point3<Real> {
        let r = polar::radius(&point);
        let phi = polar::phi(&point);
        let frame = self.spine.frame_at(point.z / self.contour_height);
        let base = Point3::new(polar::radius(&frame.position), 0.0, frame.position.z);
        let lifted = base + frame.outward_normal() * (r - self.ref_radius);
        polar::rotate_z(&lifted, phi)
    }
}

/// Tread of one wheel.
#[derive(Debug, Clone)]
pub struct WheelTread {
    spine: Frames,
    pattern: TreadPatternKind,
}

impl WheelTread {
    /// `spine` is the outer-radius spine, running lower → upper face.
    pub fn new(spine: Frames, pattern: TreadPatternKind) -> Self {
        Self { spine, pattern }
    }

    pub fn pattern(&self) -> TreadPatternKind {
        self.pattern
    }

    pub fn contour_height(&self) -> Real {
        self.spine.total_length()
    }

    pub fn transform(&self) -> TreadTransform<'_> {
        TreadTransform::new(&self.spine, TREAD_REFERENCE_RADIUS, self.contour_height())
    }

    /// The pattern itself, standing proud of the outer spine.
    pub fn exposed_profile(&self, res: &Resolution) -> Voxels {
        debug!(
            "tread {:?} over a contour of {:.1} mm",
            self.pattern,
            self.contour_height()
        );
        self.pattern.construct(
            TREAD_REFERENCE_RADIUS,
            self.contour_height(),
            &self.transform(),
            res,
        )
    }

    /// A shell around the outer spine with the pattern cut into it.
    pub fn solid_layer(
        &self,
        outward_thickness: Real,
        inward_thickness: Real,
        res: &Resolution,
    ) -> Result<Voxels, WheelError> {
        if !(outward_thickness >= 0.0 && inward_thickness >= 0.0)
            || outward_thickness + inward_thickness <= 0.0
        {
            return Err(WheelError::InvalidParameters(format!(
                "tread shell needs a positive thickness, got {outward_thickness} out / {inward_thickness} in"
            )));
        }
        let shell = Revolve::new(&self.spine, inward_thickness, outward_thickness)
            .voxelize(&Identity, res);
        Ok(shell.difference(&self.exposed_profile(res)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frames::FrameType;
    use approx::assert_relative_eq;

    fn straight_spine() -> Frames {
        Frames::new(
            vec![Point3::new(100.0, 0.0, -20.0), Point3::new(100.0, 0.0, 20.0)],
            FrameType::MinRotation,
        )
        .unwrap()
    }

    #[test]
    fn reference_cylinder_lands_on_the_spine() {
        let spine = straight_spine();
        let t = TreadTransform::new(&spine, TREAD_REFERENCE_RADIUS, 40.0);
        let p = t.transform(polar::cyl_point(TREAD_REFERENCE_RADIUS, 0.0, 10.0));
        assert_relative_eq!(p, Point3::new(100.0, 0.0, -10.0), epsilon = 1e-9);

        // 5 mm proud of the reference radius, a quarter turn round
        let q = t.transform(polar::cyl_point(TREAD_REFERENCE_RADIUS + 5.0, 1.0, 40.0));
        assert_relative_eq!(polar::radius(&q), 105.0, epsilon = 1e-9);
        assert_relative_eq!(polar::phi(&q), 1.0, epsilon = 1e-9);
        assert_relative_eq!(q.z, 20.0, epsilon = 1e-9);
    }

    #[test]
    fn solid_layer_rejects_zero_thickness() {
        let tread = WheelTread::new(straight_spine(), TreadPatternKind::Studs);
        assert!(matches!(
            tread.solid_layer(0.0, 0.0, &Resolution::preview()),
            Err(WheelError::InvalidParameters(_))
        ));
    }
}
