use super::Voxels;
use crate::float_types::Real;
use hashbrown::HashSet;
use nalgebra::Point3;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Rounded cone between two points; radii are interpolated along the axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Beam {
    pub start: Point3<Real>,
    pub end: Point3<Real>,
    pub start_radius: Real,
    pub end_radius: Real,
}

impl Beam {
    fn bounds(&self) -> (Point3<Real>, Point3<Real>) {
        let r = self.start_radius.max(self.end_radius);
        let min = self.start.inf(&self.end).map(|c| c - r);
        let max = self.start.sup(&self.end).map(|c| c + r);
        (min, max)
    }

    fn contains(&self, p: &Point3<Real>) -> bool {
        let axis = self.end - self.start;
        let len2 = axis.norm_squared();
        let t = if len2 <= Real::EPSILON {
            0.0
        } else {
            ((p - self.start).dot(&axis) / len2).clamp(0.0, 1.0)
        };
        let radius = self.start_radius + (self.end_radius - self.start_radius) * t;
        (p - (self.start + axis * t)).norm_squared() <= radius * radius
    }
}

/// A set of beams and spheres, turned into voxels in one pass.
#[derive(Debug, Clone, Default)]
pub struct Lattice {
    beams: Vec<Beam>,
}

impl Lattice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_beam(
        &mut self,
        start: Point3<Real>,
        start_radius: Real,
        end: Point3<Real>,
        end_radius: Real,
    ) {
        self.beams.push(Beam {
            start,
            end,
            start_radius,
            end_radius,
        });
    }

    /// A sphere is a beam of zero length.
    pub fn add_sphere(&mut self, centre: Point3<Real>, radius: Real) {
        self.add_beam(centre, radius, centre, radius);
    }

    /// Consecutive points joined by beams of constant radius.
    pub fn add_polyline(&mut self, points: &[Point3<Real>], radius: Real) {
        for w in points.windows(2) {
            self.add_beam(w[0], radius, w[1], radius);
        }
    }

    pub fn beams(&self) -> &[Beam] {
        &self.beams
    }

    pub fn is_empty(&self) -> bool {
        self.beams.is_empty()
    }

    pub fn voxelize(&self, voxel_size: Real) -> Voxels {
        #[cfg(feature = "parallel")]
        let cells: HashSet<[i32; 3]> = self
            .beams
            .par_iter()
            .flat_map_iter(|beam| beam_voxels(beam, voxel_size))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let cells: HashSet<[i32; 3]> = self
            .beams
            .iter()
            .flat_map(|beam| beam_voxels(beam, voxel_size))
            .collect();

        Voxels::from_set(voxel_size, cells)
    }
}

fn beam_voxels(beam: &Beam, voxel_size: Real) -> Vec<[i32; 3]> {
    let (min, max) = beam.bounds();
    let lo = min.map(|c| (c / voxel_size - 0.5).ceil() as i32);
    let hi = max.map(|c| (c / voxel_size - 0.5).floor() as i32);
    let mut out = Vec::new();
    for z in lo.z..=hi.z {
        for y in lo.y..=hi.y {
            for x in lo.x..=hi.x {
                let idx = [x, y, z];
                if beam.contains(&Voxels::centre(voxel_size, idx)) {
                    out.push(idx);
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::float_types::PI;
    use crate::traits::SolidOps;

    #[test]
    fn sphere_volume_is_close_to_analytic() {
        let mut lattice = Lattice::new();
        lattice.add_sphere(Point3::new(0.3, -0.2, 0.1), 6.0);
        let vox = lattice.voxelize(0.5);
        let exact = 4.0 / 3.0 * PI * 216.0;
        assert!((vox.volume() - exact).abs() / exact < 0.05);
    }

    #[test]
    fn beam_stays_within_its_rounded_bounds() {
        let mut lattice = Lattice::new();
        lattice.add_beam(Point3::new(0.0, 0.0, 0.0), 1.0, Point3::new(10.0, 0.0, 0.0), 1.0);
        let bb = lattice.voxelize(0.25).bounding_box().unwrap();
        assert!(bb.mins.x >= -1.25 && bb.maxs.x <= 11.25);
        assert!(bb.mins.y >= -1.25 && bb.maxs.y <= 1.25);
    }
}
