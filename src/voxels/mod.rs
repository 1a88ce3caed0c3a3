//! Sparse voxel solids: the small geometry kernel every generator builds on.
//!
//! A solid is the set of integer cells `[i, j, k]` whose cubes
//! `[i, i+1) × [j, j+1) × [k, k+1)` (scaled by the voxel size) are filled.

pub mod lattice;
pub mod mesh;
pub mod raster;

pub use lattice::{Beam, Lattice};
pub use mesh::Mesh;
pub use raster::SampleGrid;

use crate::float_types::Real;
use crate::float_types::parry3d::bounding_volume::Aabb;
use crate::traits::{CoordinateTransform, SolidOps};
use hashbrown::{HashMap, HashSet};
use nalgebra::Point3;
use raster::Hex;

// corner offsets of one voxel cube, in the cell-corner order `raster` expects
const CORNERS: [[i32; 3]; 8] = [
    [0, 0, 0],
    [1, 0, 0],
    [1, 1, 0],
    [0, 1, 0],
    [0, 0, 1],
    [1, 0, 1],
    [1, 1, 1],
    [0, 1, 1],
];

#[derive(Debug, Clone)]
pub struct Voxels {
    voxel_size: Real,
    cells: HashSet<[i32; 3]>,
}

impl Voxels {
    /// Empty solid.
    pub fn new(voxel_size: Real) -> Self {
        Self {
            voxel_size,
            cells: HashSet::new(),
        }
    }

    pub fn from_cells<I>(voxel_size: Real, cells: I) -> Self
    where
        I: IntoIterator<Item = [i32; 3]>,
    {
        Self {
            voxel_size,
            cells: cells.into_iter().collect(),
        }
    }

    pub(crate) fn from_set(voxel_size: Real, cells: HashSet<[i32; 3]>) -> Self {
        Self { voxel_size, cells }
    }

    /// Solid covered by the cells of a transformed sample grid.
    pub fn from_grid(grid: &SampleGrid, voxel_size: Real) -> Self {
        Self::from_set(voxel_size, raster::rasterize_cells(&grid.cells(), voxel_size))
    }

    pub fn voxel_size(&self) -> Real {
        self.voxel_size
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn cells(&self) -> impl Iterator<Item = &[i32; 3]> + '_ {
        self.cells.iter()
    }

    pub fn contains(&self, index: [i32; 3]) -> bool {
        self.cells.contains(&index)
    }

    /// Centre of voxel `index` for a given voxel size.
    #[inline]
    pub fn centre(voxel_size: Real, index: [i32; 3]) -> Point3<Real> {
        Point3::new(
            (index[0] as Real + 0.5) * voxel_size,
            (index[1] as Real + 0.5) * voxel_size,
            (index[2] as Real + 0.5) * voxel_size,
        )
    }

    /// Inclusive min/max cell indices, `None` when empty.
    pub fn index_bounds(&self) -> Option<([i32; 3], [i32; 3])> {
        let mut iter = self.cells.iter();
        let first = *iter.next()?;
        Some(iter.fold((first, first), |(mut lo, mut hi), c| {
            for axis in 0..3 {
                lo[axis] = lo[axis].min(c[axis]);
                hi[axis] = hi[axis].max(c[axis]);
            }
            (lo, hi)
        }))
    }

    /// Extrudes the slice at `start_z` along the axis up to `end_z` (either direction).
    ///
    /// Every column that has a filled voxel at the height of `start_z` is filled
    /// through to the height of `end_z`; everything else is kept as is.
    pub fn project_z_slice(&mut self, start_z: Real, end_z: Real) {
        let k_start = (start_z / self.voxel_size).floor() as i32;
        let k_end = (end_z / self.voxel_size).floor() as i32;
        let (k_lo, k_hi) = (k_start.min(k_end), k_start.max(k_end));

        let columns: Vec<[i32; 2]> = self
            .cells
            .iter()
            .filter(|c| c[2] == k_start)
            .map(|c| [c[0], c[1]])
            .collect();
        for [i, j] in columns {
            self.cells.extend((k_lo..=k_hi).map(|k| [i, j, k]));
        }
    }

    /// Same solid sampled on a grid of a different voxel size.
    pub fn resampled(&self, voxel_size: Real) -> Self {
        if voxel_size == self.voxel_size {
            return self.clone();
        }
        self.map_into(&crate::traits::Identity, voxel_size)
    }

    // the other solid on this solid's grid
    fn aligned<'a>(&self, other: &'a Self) -> std::borrow::Cow<'a, Self> {
        if other.voxel_size == self.voxel_size {
            std::borrow::Cow::Borrowed(other)
        } else {
            std::borrow::Cow::Owned(other.resampled(self.voxel_size))
        }
    }

    // Every voxel cube is carried through the transform corner by corner and the
    // resulting hexahedron is rasterized again on a grid of `voxel_size`.
    fn map_into<T: CoordinateTransform + ?Sized>(&self, transform: &T, voxel_size: Real) -> Self {
        let mut corners: HashMap<[i32; 3], Point3<Real>> = HashMap::new();
        let mut corner = |c: [i32; 3]| {
            *corners.entry(c).or_insert_with(|| {
                transform.transform(Point3::new(
                    c[0] as Real * self.voxel_size,
                    c[1] as Real * self.voxel_size,
                    c[2] as Real * self.voxel_size,
                ))
            })
        };
        let hexes: Vec<Hex> = self
            .cells
            .iter()
            .map(|c| CORNERS.map(|o| corner([c[0] + o[0], c[1] + o[1], c[2] + o[2]])))
            .collect();
        Self::from_set(voxel_size, raster::rasterize_cells(&hexes, voxel_size))
    }
}

impl SolidOps for Voxels {
    fn union(&self, other: &Self) -> Self {
        let other = self.aligned(other);
        let mut cells = self.cells.clone();
        cells.extend(other.cells.iter().copied());
        Self::from_set(self.voxel_size, cells)
    }

    fn difference(&self, other: &Self) -> Self {
        let other = self.aligned(other);
        let cells = self
            .cells
            .iter()
            .filter(|c| !other.cells.contains(*c))
            .copied()
            .collect();
        Self::from_set(self.voxel_size, cells)
    }

    fn intersection(&self, other: &Self) -> Self {
        let other = self.aligned(other);
        let cells = self
            .cells
            .iter()
            .filter(|c| other.cells.contains(*c))
            .copied()
            .collect();
        Self::from_set(self.voxel_size, cells)
    }

    fn mapped<T: CoordinateTransform + ?Sized>(&self, transform: &T) -> Self {
        self.map_into(transform, self.voxel_size)
    }

    fn bounding_box(&self) -> Option<Aabb> {
        let (lo, hi) = self.index_bounds()?;
        let vs = self.voxel_size;
        Some(Aabb::new(
            Point3::new(lo[0] as Real, lo[1] as Real, lo[2] as Real) * vs,
            Point3::new(
                (hi[0] + 1) as Real,
                (hi[1] + 1) as Real,
                (hi[2] + 1) as Real,
            ) * vs,
        ))
    }

    fn volume(&self) -> Real {
        self.cells.len() as Real * self.voxel_size.powi(3)
    }

    fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    // cheaper than the provided fold: one set grows in place
    fn union_all<I>(self, others: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        let mut acc = self;
        for other in others {
            if other.voxel_size == acc.voxel_size {
                acc.cells.extend(other.cells);
            } else {
                let other = other.resampled(acc.voxel_size);
                acc.cells.extend(other.cells);
            }
        }
        acc
    }
}
