//! Boundary meshes extracted from voxels with Surface Nets

use super::Voxels;
use crate::float_types::Real;
use crate::float_types::parry3d::bounding_volume::Aabb;
use crate::traits::CoordinateTransform;
use fast_surface_nets::{SurfaceNetsBuffer, surface_nets};
use nalgebra::{Point3, Vector3};

/// The shape describing our discrete grid for Surface Nets:
#[derive(Clone, Copy)]
pub struct GridShape {
    pub nx: u32,
    pub ny: u32,
    pub nz: u32,
}

impl fast_surface_nets::ndshape::Shape<3> for GridShape {
    type Coord = u32;

    #[inline]
    fn as_array(&self) -> [Self::Coord; 3] {
        [self.nx, self.ny, self.nz]
    }

    fn size(&self) -> Self::Coord {
        self.nx * self.ny * self.nz
    }

    fn usize(&self) -> usize {
        (self.nx * self.ny * self.nz) as usize
    }

    fn linearize(&self, coords: [Self::Coord; 3]) -> u32 {
        let [x, y, z] = coords;
        (z * self.ny + y) * self.nx + x
    }

    fn delinearize(&self, i: u32) -> [Self::Coord; 3] {
        let x = i % self.nx;
        let yz = i / self.nx;
        let y = yz % self.ny;
        let z = yz / self.ny;
        [x, y, z]
    }
}

/// Indexed triangle mesh.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub positions: Vec<Point3<Real>>,
    pub normals: Vec<Vector3<Real>>,
    pub indices: Vec<[u32; 3]>,
}

impl Mesh {
    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn bounding_box(&self) -> Option<Aabb> {
        let first = self.positions.first()?;
        let (mins, maxs) = self
            .positions
            .iter()
            .fold((*first, *first), |(lo, hi), p| (lo.inf(p), hi.sup(p)));
        Some(Aabb::new(mins, maxs))
    }

    pub fn surface_area(&self) -> Real {
        self.indices
            .iter()
            .map(|&[a, b, c]| {
                let (a, b, c) = (
                    self.positions[a as usize],
                    self.positions[b as usize],
                    self.positions[c as usize],
                );
                (b - a).cross(&(c - a)).norm() * 0.5
            })
            .sum()
    }

    /// Moves every vertex through `transform`; normals are rebuilt from the new faces.
    pub fn transformed<T: CoordinateTransform + ?Sized>(&self, transform: &T) -> Mesh {
        let positions: Vec<_> = self
            .positions
            .iter()
            .map(|p| transform.transform(*p))
            .collect();
        let mut normals = vec![Vector3::zeros(); positions.len()];
        for &[a, b, c] in &self.indices {
            let (pa, pb, pc) = (
                positions[a as usize],
                positions[b as usize],
                positions[c as usize],
            );
            // area-weighted
            let n = (pb - pa).cross(&(pc - pa));
            for i in [a, b, c] {
                normals[i as usize] += n;
            }
        }
        for n in normals.iter_mut() {
            *n = n.try_normalize(Real::EPSILON).unwrap_or_else(Vector3::zeros);
        }
        Mesh {
            positions,
            normals,
            indices: self.indices.clone(),
        }
    }
}

impl Voxels {
    /// Boundary mesh of the voxel set. Vertices sit on the voxel-centre lattice
    /// relaxed by Surface Nets, so the surface lies within one voxel of the cells.
    pub fn to_mesh(&self) -> Mesh {
        let Some((lo, hi)) = self.index_bounds() else {
            return Mesh::default();
        };
        // one empty layer of padding around the occupied block
        let origin = [lo[0] - 1, lo[1] - 1, lo[2] - 1];
        let nx = (hi[0] - lo[0] + 3) as u32;
        let ny = (hi[1] - lo[1] + 3) as u32;
        let nz = (hi[2] - lo[2] + 3) as u32;

        let shape = GridShape { nx, ny, nz };
        let mut field_values = vec![1.0_f32; (nx * ny * nz) as usize];
        for idx in self.cells() {
            let x = (idx[0] - origin[0]) as u32;
            let y = (idx[1] - origin[1]) as u32;
            let z = (idx[2] - origin[2]) as u32;
            field_values[((z * ny + y) * nx + x) as usize] = -1.0;
        }

        let mut sn_buffer = SurfaceNetsBuffer::default();
        surface_nets(
            &field_values,
            &shape,
            [0, 0, 0],
            [nx - 1, ny - 1, nz - 1],
            &mut sn_buffer,
        );

        let vs = self.voxel_size();
        let positions = sn_buffer
            .positions
            .iter()
            .map(|p| {
                Point3::new(
                    (origin[0] as Real + p[0] as Real + 0.5) * vs,
                    (origin[1] as Real + p[1] as Real + 0.5) * vs,
                    (origin[2] as Real + p[2] as Real + 0.5) * vs,
                )
            })
            .collect();
        let normals = sn_buffer
            .normals
            .iter()
            .map(|n| {
                Vector3::new(n[0] as Real, n[1] as Real, n[2] as Real)
                    .try_normalize(Real::EPSILON)
                    .unwrap_or_else(Vector3::zeros)
            })
            .collect();
        let indices = sn_buffer
            .indices
            .chunks_exact(3)
            .map(|tri| [tri[0], tri[1], tri[2]])
            .collect();

        Mesh {
            positions,
            normals,
            indices,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::SolidOps;

    fn block(n: i32) -> Voxels {
        let cells = (0..n).flat_map(|x| (0..n).flat_map(move |y| (0..n).map(move |z| [x, y, z])));
        Voxels::from_cells(1.0, cells)
    }

    #[test]
    fn block_mesh_wraps_the_cells() {
        let vox = block(4);
        let mesh = vox.to_mesh();
        assert!(!mesh.is_empty());
        let bb = mesh.bounding_box().unwrap();
        let vb = vox.bounding_box().unwrap();
        assert!((bb.mins - vb.mins).amax() <= 1.0);
        assert!((bb.maxs - vb.maxs).amax() <= 1.0);
    }

    #[test]
    fn transformed_mesh_follows_the_map() {
        let mesh = block(3).to_mesh();
        let shifted = mesh.transformed(&|p: Point3<Real>| p + Vector3::new(0.0, 0.0, 10.0));
        let (a, b) = (mesh.bounding_box().unwrap(), shifted.bounding_box().unwrap());
        assert!((b.mins.z - a.mins.z - 10.0).abs() < 1e-6);
        assert_eq!(mesh.triangle_count(), shifted.triangle_count());
        assert!((mesh.surface_area() - shifted.surface_area()).abs() < 1e-6);
    }

    #[test]
    fn empty_voxels_give_empty_mesh() {
        assert!(Voxels::new(1.0).to_mesh().is_empty());
    }
}
