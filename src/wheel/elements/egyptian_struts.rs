use super::{
    Combine, WheelElements, check_common, check_core_gap, extruded_struts, strut_faces,
};
use crate::errors::WheelError;
use crate::float_types::{PI, Real};
use crate::polar;
use crate::resolution::Resolution;
use crate::voxels::{Lattice, Voxels};
use crate::wheel::WheelLayer;
use crate::wheel::space::WheelSpace;

/// Triangulated truss: each cell holds one zig-zag from the inner radius out to the
/// outer radius and back, so neighbouring cells meet at the inner radius.
#[derive(Debug, Clone)]
pub struct EgyptianStruts {
    layer: WheelLayer,
    symmetry: u32,
    wall_thickness: Real,
}

impl EgyptianStruts {
    pub fn new(layer: WheelLayer, symmetry: u32, wall_thickness: Real) -> Result<Self, WheelError> {
        check_common(symmetry, wall_thickness)?;
        check_core_gap(symmetry, layer.inner_radius(), wall_thickness)?;
        Ok(Self {
            layer,
            symmetry,
            wall_thickness,
        })
    }
}

impl WheelElements for EgyptianStruts {
    fn layer(&self) -> &WheelLayer {
        &self.layer
    }

    fn symmetry(&self) -> u32 {
        self.symmetry
    }

    fn combine(&self) -> Combine {
        Combine::Additive
    }

    fn copy(&self, index: u32, space: &WheelSpace, res: &Resolution) -> Voxels {
        let phi = polar::copy_angle(index, self.symmetry);
        let half_cell = PI / self.symmetry as Real;
        let (inner, outer) = (self.layer.inner_radius(), self.layer.outer_radius());
        let mut lattice = Lattice::new();
        for z in strut_faces(space.params().width, self.wall_thickness) {
            let zig = [
                polar::cyl_point(inner, phi - half_cell, z),
                polar::cyl_point(outer, phi, z),
                polar::cyl_point(inner, phi + half_cell, z),
            ];
            lattice.add_polyline(&zig, 0.5 * self.wall_thickness);
        }
        extruded_struts(&lattice, space, self.wall_thickness, res)
    }
}
