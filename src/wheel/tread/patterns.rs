use super::TreadPattern;
use crate::float_types::{Real, TAU};
use crate::polar;
use crate::resolution::Resolution;
use crate::shapes::{ModulatedPipe, Primitive};
use crate::spline::{resample_by_spacing, smooth_transition};
use crate::traits::CoordinateTransform;
use crate::voxels::{Lattice, Voxels};

/// Crossing cosine ribs along and around the strip, up to 16 mm high.
#[derive(Debug, Clone, Copy, Default)]
pub struct CosineRibs;

impl CosineRibs {
    fn height(phi: Real, length_ratio: Real) -> Real {
        (10.0 * (50.0 * length_ratio).cos()).clamp(0.0, 8.0)
            + (10.0 * (50.0 * phi).cos()).clamp(0.0, 8.0)
    }
}

impl TreadPattern for CosineRibs {
    fn construct(
        &self,
        ref_radius: Real,
        contour_height: Real,
        transform: &dyn CoordinateTransform,
        res: &Resolution,
    ) -> Voxels {
        ModulatedPipe::new(
            ref_radius,
            |phi, l| ref_radius + Self::height(phi, l),
            contour_height,
        )
        .voxelize(transform, res)
    }
}

/// Fifty zig-zag ribs running across the tread, low at both edges and tall in the
/// middle.
#[derive(Debug, Clone, Copy, Default)]
pub struct LatticeRibs;

impl LatticeRibs {
    const RIBS: usize = 50;
    const ZIGS: usize = 7;
    const SWING: Real = 0.2;
    const BEAM_RADIUS: Real = 2.0;

    fn rib_height(z: Real, contour_height: Real) -> Real {
        let rising = smooth_transition(2.0, 8.0, z, 15.0, 3.0);
        smooth_transition(rising, 2.0, z, contour_height - 15.0, 3.0)
    }
}

impl TreadPattern for LatticeRibs {
    fn construct(
        &self,
        ref_radius: Real,
        contour_height: Real,
        transform: &dyn CoordinateTransform,
        res: &Resolution,
    ) -> Voxels {
        let dz = contour_height / Self::ZIGS as Real;
        let mut lattice = Lattice::new();
        for i in 0..Self::RIBS {
            let phi = TAU / Self::RIBS as Real * i as Real;
            let zig: Vec<_> = (0..=Self::ZIGS)
                .map(|k| {
                    let swing = if k % 2 == 1 { Self::SWING } else { 0.0 };
                    polar::cyl_point(ref_radius, phi + swing, dz * k as Real)
                })
                .collect();
            for p in resample_by_spacing(&zig, 1.0) {
                let height = Self::rib_height(p.z, contour_height);
                lattice.add_beam(
                    transform.transform(p),
                    Self::BEAM_RADIUS,
                    transform.transform(polar::offset_radius(&p, height)),
                    Self::BEAM_RADIUS,
                );
            }
        }
        lattice.voxelize(res.voxel_size)
    }
}

/// Staggered rows of round lugs.
#[derive(Debug, Clone, Copy, Default)]
pub struct Studs;

impl Studs {
    const ROW_PITCH: Real = 12.0;
    const PER_ROW: usize = 36;
    const HEIGHT: Real = 4.0;
    const RADIUS: Real = 3.0;
}

impl TreadPattern for Studs {
    fn construct(
        &self,
        ref_radius: Real,
        contour_height: Real,
        transform: &dyn CoordinateTransform,
        res: &Resolution,
    ) -> Voxels {
        let rows = ((contour_height / Self::ROW_PITCH).floor() as usize).max(1);
        let row_pitch = contour_height / rows as Real;
        let step = TAU / Self::PER_ROW as Real;
        let mut lattice = Lattice::new();
        for row in 0..rows {
            let z = (row as Real + 0.5) * row_pitch;
            let stagger = if row % 2 == 1 { 0.5 * step } else { 0.0 };
            for n in 0..Self::PER_ROW {
                let foot = polar::cyl_point(ref_radius, stagger + step * n as Real, z);
                lattice.add_beam(
                    transform.transform(foot),
                    Self::RADIUS,
                    transform.transform(polar::offset_radius(&foot, Self::HEIGHT)),
                    Self::RADIUS,
                );
            }
        }
        lattice.voxelize(res.voxel_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{Identity, SolidOps};

    #[test]
    fn cosine_ribs_peak_at_sixteen() {
        assert_eq!(CosineRibs::height(0.0, 0.0), 16.0);
        assert_eq!(CosineRibs::height(crate::float_types::PI / 50.0, 0.0), 8.0);
    }

    #[test]
    fn lattice_ribs_rise_in_the_middle() {
        let h = 100.0;
        assert!(LatticeRibs::rib_height(0.0, h) < 2.2);
        assert!(LatticeRibs::rib_height(h, h) < 2.2);
        assert!(LatticeRibs::rib_height(0.5 * h, h) > 7.9);
    }

    #[test]
    fn studs_stand_on_the_reference_cylinder() {
        let res = Resolution::preview().with_voxel_size(1.0);
        let studs = Studs.construct(50.0, 30.0, &Identity, &res);
        let bb = studs.bounding_box().unwrap();
        // lugs reach 4 mm out plus their 3 mm rounded tips
        assert!(bb.maxs.x <= 50.0 + 4.0 + 3.0 + 1.0);
        assert!(bb.mins.z >= 0.0 && bb.maxs.z <= 30.0);
        assert!(!studs.is_empty());
    }
}
