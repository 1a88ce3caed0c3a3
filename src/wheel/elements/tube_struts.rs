use super::{
    Combine, SymmetryCell, WheelElements, check_common, check_core_gap, dense_symmetry,
    extruded_struts, strut_faces,
};
use crate::errors::WheelError;
use crate::float_types::{Real, TAU};
use crate::polar;
use crate::resolution::Resolution;
use crate::voxels::{Lattice, Voxels};
use crate::wheel::WheelLayer;
use crate::wheel::space::WheelSpace;

const LOOP_SAMPLES: usize = 100;

/// Closed tubes, one per cell, following the cell's outline.
#[derive(Debug, Clone)]
pub struct TubeStruts {
    layer: WheelLayer,
    symmetry: u32,
    wall_thickness: Real,
}

impl TubeStruts {
    /// The symmetry is raised to [`dense_symmetry`] when the layer is thin.
    pub fn new(layer: WheelLayer, symmetry: u32, wall_thickness: Real) -> Result<Self, WheelError> {
        check_common(symmetry, wall_thickness)?;
        let symmetry = dense_symmetry(&layer, symmetry);
        check_core_gap(symmetry, layer.inner_radius(), wall_thickness)?;
        Ok(Self {
            layer,
            symmetry,
            wall_thickness,
        })
    }
}

impl WheelElements for TubeStruts {
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
        let cell = SymmetryCell::new(
            &self.layer,
            self.symmetry,
            index,
            0.0,
            self.wall_thickness,
        );
        let radius = 0.5 * self.wall_thickness;
        let mut lattice = Lattice::new();
        for z in strut_faces(space.params().width, self.wall_thickness) {
            let outline: Vec<_> = (0..=LOOP_SAMPLES)
                .map(|n| {
                    let unit = polar::cyl_point(1.0, TAU * n as Real / LOOP_SAMPLES as Real, z);
                    cell.point(unit.x, 0.5 * (unit.y + 1.0), z)
                })
                .collect();
            lattice.add_polyline(&outline, radius);
        }
        extruded_struts(&lattice, space, self.wall_thickness, res)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wheel::WheelParams;

    #[test]
    fn symmetry_is_raised_for_thin_layers() {
        let layer =
            WheelLayer::new(WheelParams::new(30.0, 120.0, 60.0).unwrap(), 0.6, 0.8).unwrap();
        // mid 93, range 18 → ⌈32.5⌉
        let tubes = TubeStruts::new(layer, 8, 2.0).unwrap();
        assert_eq!(tubes.symmetry(), 33);
        let tubes = TubeStruts::new(layer, 36, 2.0).unwrap();
        assert_eq!(tubes.symmetry(), 36);
    }
}
