//! Structural elements: patterns repeated around the axis inside one layer.

mod egyptian_struts;
mod rect_holes;
mod rosetta_struts;
mod spiral_struts;
mod tube_struts;

pub use egyptian_struts::EgyptianStruts;
pub use rect_holes::RectHoles;
pub use rosetta_struts::RosettaStruts;
pub use spiral_struts::SpiralStruts;
pub use tube_struts::TubeStruts;

use super::WheelLayer;
use super::layer::layer_solid;
use super::space::WheelSpace;
use crate::errors::WheelError;
use crate::float_types::{PI, Real, TAU};
use crate::polar;
use crate::resolution::Resolution;
use crate::traits::SolidOps;
use crate::voxels::{Lattice, Voxels};
use log::debug;
use nalgebra::Point3;

/// How the copies of an element combine with their layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combine {
    /// The copies are the layer's material.
    Additive,
    /// The copies are cut out of the solid layer band.
    Subtractive,
}

pub trait WheelElements {
    fn layer(&self) -> &WheelLayer;

    /// Number of copies around the axis, after any automatic raise.
    fn symmetry(&self) -> u32;

    fn combine(&self) -> Combine;

    /// Copy `index` of the element, already in wheel space.
    fn copy(&self, index: u32, space: &WheelSpace, res: &Resolution) -> Voxels;

    /// One solid per symmetric copy; copy `i` is copy `0` turned by `2π·i/n`.
    fn copies(&self, space: &WheelSpace, res: &Resolution) -> Vec<Voxels> {
        (0..self.symmetry())
            .map(|i| self.copy(i, space, res))
            .collect()
    }

    /// The finished layer.
    fn construct(&self, space: &WheelSpace, res: &Resolution) -> Voxels {
        let layer = self.layer();
        debug!(
            "constructing {} copies in layer [{}, {}]",
            self.symmetry(),
            layer.start(),
            layer.end()
        );
        let joined = Voxels::new(res.voxel_size).union_all(self.copies(space, res));
        match self.combine() {
            Combine::Additive => joined,
            Combine::Subtractive => layer_solid(space, layer, res).difference(&joined),
        }
    }
}

/// Symmetry high enough that neighbouring cells are roughly as wide as the layer is
/// thick: `max(requested, ⌈2π·mid / range⌉)`.
pub fn dense_symmetry(layer: &WheelLayer, requested: u32) -> u32 {
    let raised = (TAU * layer.mid_radius() / layer.range()).ceil();
    if raised.is_finite() && raised > requested as Real {
        raised as u32
    } else {
        requested
    }
}

/// Validates the parameters every element shares.
pub(crate) fn check_common(symmetry: u32, wall_thickness: Real) -> Result<(), WheelError> {
    if symmetry == 0 {
        return Err(WheelError::InvalidParameters(
            "symmetry must be at least 1".into(),
        ));
    }
    if !(wall_thickness.is_finite() && wall_thickness > 0.0) {
        return Err(WheelError::InvalidParameters(format!(
            "wall thickness must be positive, got {wall_thickness}"
        )));
    }
    Ok(())
}

/// Arc left for one cell at `radius` once the core gap is taken off:
/// `π/n · radius − wall/2`.
pub(crate) fn core_gap(symmetry: u32, radius: Real, wall_thickness: Real) -> Real {
    PI / symmetry as Real * radius - 0.5 * wall_thickness
}

pub(crate) fn check_core_gap(
    symmetry: u32,
    radius: Real,
    wall_thickness: Real,
) -> Result<(), WheelError> {
    let gap = core_gap(symmetry, radius, wall_thickness);
    if gap > 0.0 {
        Ok(())
    } else {
        Err(WheelError::InsufficientClearance {
            symmetry,
            wall_thickness,
            gap,
        })
    }
}

/// One angular cell of a layer in design space.
///
/// Maps a unit square `(x, y) ∈ [-1, 1]²` onto the annular sector around the cell's
/// centre angle: `y` runs from the inner to the outer radius (inset by `inset`),
/// `x` spans the cell's width less a gap of `wall/2` on either side.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SymmetryCell {
    phi_mid: Real,
    inner: Real,
    outer: Real,
    symmetry: u32,
    gap: Real,
}

impl SymmetryCell {
    pub fn new(layer: &WheelLayer, symmetry: u32, index: u32, inset: Real, wall: Real) -> Self {
        Self {
            phi_mid: polar::copy_angle(index, symmetry),
            inner: layer.inner_radius() + inset,
            outer: layer.outer_radius() - inset,
            symmetry,
            gap: 0.5 * wall,
        }
    }

    pub fn phi_mid(&self) -> Real {
        self.phi_mid
    }

    pub fn point(&self, width_ratio: Real, radius_ratio: Real, z: Real) -> Point3<Real> {
        let radius = self.inner + radius_ratio * (self.outer - self.inner);
        let max_arc = PI / self.symmetry as Real * radius;
        let d_phi = (max_arc - self.gap) / radius;
        polar::cyl_point(radius, self.phi_mid + d_phi * width_ratio, z)
    }
}

/// Struts drawn as a lattice on both faces of the design space, extruded through
/// the width and bent into wheel space.
pub(crate) fn extruded_struts(
    lattice: &Lattice,
    space: &WheelSpace,
    wall: Real,
    res: &Resolution,
) -> Voxels {
    let [top, bottom] = strut_faces(space.params().width, wall);
    let mut struts = lattice.voxelize(res.voxel_size);
    struts.project_z_slice(top, bottom);
    struts.mapped(space)
}

/// The two axial positions struts are drawn at.
pub(crate) fn strut_faces(width: Real, wall: Real) -> [Real; 2] {
    [width - 0.5 * wall, 0.5 * wall]
}
