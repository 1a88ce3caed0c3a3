//! Scan conversion of deformed hexahedral cells into voxel indices.
//!
//! A cell is given by its eight corners in the order
//! `(0,0,0) (1,0,0) (1,1,0) (0,1,0) (0,0,1) (1,0,1) (1,1,1) (0,1,1)` and split into six
//! tetrahedra around the `0-6` diagonal. A voxel belongs to the cell when its centre
//! lies inside one of those tetrahedra.

use crate::float_types::Real;
use hashbrown::HashSet;
use nalgebra::{Matrix3, Point3};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

pub type Hex = [Point3<Real>; 8];

const TETS: [[usize; 4]; 6] = [
    [0, 1, 2, 6],
    [0, 2, 3, 6],
    [0, 3, 7, 6],
    [0, 7, 4, 6],
    [0, 4, 5, 6],
    [0, 5, 1, 6],
];

// barycentric slack so faces shared by neighbouring tets are claimed by both
const INSIDE_EPSILON: Real = 1e-9;

/// Regular `(u, v, w)` lattice of already-transformed sample points.
#[derive(Debug, Clone)]
pub struct SampleGrid {
    dims: [usize; 3],
    points: Vec<Point3<Real>>,
}

impl SampleGrid {
    /// Evaluates `f(u, v, w)` on `steps[axis] + 1` evenly spaced values of each
    /// parameter in `[0, 1]`.
    pub fn sample<F>(steps: [usize; 3], mut f: F) -> Self
    where
        F: FnMut(Real, Real, Real) -> Point3<Real>,
    {
        let dims = steps.map(|s| s.max(1) + 1);
        let mut points = Vec::with_capacity(dims[0] * dims[1] * dims[2]);
        for k in 0..dims[2] {
            let w = k as Real / (dims[2] - 1) as Real;
            for j in 0..dims[1] {
                let v = j as Real / (dims[1] - 1) as Real;
                for i in 0..dims[0] {
                    let u = i as Real / (dims[0] - 1) as Real;
                    points.push(f(u, v, w));
                }
            }
        }
        Self { dims, points }
    }

    pub fn dims(&self) -> [usize; 3] {
        self.dims
    }

    #[inline]
    fn at(&self, i: usize, j: usize, k: usize) -> Point3<Real> {
        self.points[(k * self.dims[1] + j) * self.dims[0] + i]
    }

    fn cell(&self, i: usize, j: usize, k: usize) -> Hex {
        [
            self.at(i, j, k),
            self.at(i + 1, j, k),
            self.at(i + 1, j + 1, k),
            self.at(i, j + 1, k),
            self.at(i, j, k + 1),
            self.at(i + 1, j, k + 1),
            self.at(i + 1, j + 1, k + 1),
            self.at(i, j + 1, k + 1),
        ]
    }

    /// Every cell of the grid as a hexahedron.
    pub fn cells(&self) -> Vec<Hex> {
        let [nu, nv, nw] = self.dims;
        let mut out = Vec::with_capacity((nu - 1) * (nv - 1) * (nw - 1));
        for k in 0..nw - 1 {
            for j in 0..nv - 1 {
                for i in 0..nu - 1 {
                    out.push(self.cell(i, j, k));
                }
            }
        }
        out
    }
}

/// Voxel indices whose centres fall inside any of `cells`.
pub fn rasterize_cells(cells: &[Hex], voxel_size: Real) -> HashSet<[i32; 3]> {
    #[cfg(feature = "parallel")]
    {
        cells
            .par_iter()
            .flat_map_iter(|hex| {
                let mut out = Vec::new();
                rasterize_hex(hex, voxel_size, &mut out);
                out
            })
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        let mut set = HashSet::new();
        let mut out = Vec::new();
        for hex in cells {
            out.clear();
            rasterize_hex(hex, voxel_size, &mut out);
            set.extend(out.iter().copied());
        }
        set
    }
}

pub fn rasterize_hex(hex: &Hex, voxel_size: Real, out: &mut Vec<[i32; 3]>) {
    for tet in TETS {
        rasterize_tet(
            [hex[tet[0]], hex[tet[1]], hex[tet[2]], hex[tet[3]]],
            voxel_size,
            out,
        );
    }
}

fn rasterize_tet(v: [Point3<Real>; 4], voxel_size: Real, out: &mut Vec<[i32; 3]>) {
    if v.iter().any(|p| !p.coords.iter().all(|c| c.is_finite())) {
        return;
    }
    let m = Matrix3::from_columns(&[v[1] - v[0], v[2] - v[0], v[3] - v[0]]);
    let longest = m.column_iter().map(|c| c.norm()).fold(0.0, Real::max);
    if m.determinant().abs() <= Real::EPSILON * longest.powi(3) {
        return;
    }
    let Some(inverse) = m.try_inverse() else {
        return;
    };

    let mut lo = [i32::MAX; 3];
    let mut hi = [i32::MIN; 3];
    for axis in 0..3 {
        let min = v.iter().map(|p| p[axis]).fold(Real::MAX, Real::min);
        let max = v.iter().map(|p| p[axis]).fold(Real::MIN, Real::max);
        // centres sit at (k + 0.5) * voxel_size
        lo[axis] = (min / voxel_size - 0.5).ceil() as i32;
        hi[axis] = (max / voxel_size - 0.5).floor() as i32;
        if lo[axis] > hi[axis] {
            return;
        }
    }

    for z in lo[2]..=hi[2] {
        for y in lo[1]..=hi[1] {
            for x in lo[0]..=hi[0] {
                let centre = Point3::new(
                    (x as Real + 0.5) * voxel_size,
                    (y as Real + 0.5) * voxel_size,
                    (z as Real + 0.5) * voxel_size,
                );
                let b = inverse * (centre - v[0]);
                if b.x >= -INSIDE_EPSILON
                    && b.y >= -INSIDE_EPSILON
                    && b.z >= -INSIDE_EPSILON
                    && b.x + b.y + b.z <= 1.0 + INSIDE_EPSILON
                {
                    out.push([x, y, z]);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box(size: Real) -> Hex {
        [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(size, 0.0, 0.0),
            Point3::new(size, size, 0.0),
            Point3::new(0.0, size, 0.0),
            Point3::new(0.0, 0.0, size),
            Point3::new(size, 0.0, size),
            Point3::new(size, size, size),
            Point3::new(0.0, size, size),
        ]
    }

    #[test]
    fn axis_aligned_box_fills_exactly() {
        let mut out = Vec::new();
        rasterize_hex(&unit_box(4.0), 1.0, &mut out);
        let set: HashSet<_> = out.into_iter().collect();
        assert_eq!(set.len(), 64);
        assert!(set.contains(&[0, 0, 0]) && set.contains(&[3, 3, 3]));
        assert!(!set.contains(&[4, 0, 0]));
    }

    #[test]
    fn flat_cells_produce_nothing() {
        let mut hex = unit_box(4.0);
        for p in hex.iter_mut() {
            p.z = 0.0;
        }
        let mut out = Vec::new();
        rasterize_hex(&hex, 1.0, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn sample_grid_cells_tile_the_parameter_box() {
        let grid = SampleGrid::sample([2, 2, 2], |u, v, w| Point3::new(6.0 * u, 6.0 * v, 6.0 * w));
        assert_eq!(grid.dims(), [3, 3, 3]);
        let cells = grid.cells();
        assert_eq!(cells.len(), 8);
        assert_eq!(rasterize_cells(&cells, 1.0).len(), 216);
    }
}
