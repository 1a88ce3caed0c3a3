use super::{
    Combine, WheelElements, check_common, check_core_gap, dense_symmetry, extruded_struts,
    strut_faces,
};
use crate::errors::WheelError;
use crate::float_types::{Real, TAU};
use crate::polar;
use crate::resolution::Resolution;
use crate::voxels::{Lattice, Voxels};
use crate::wheel::WheelLayer;
use crate::wheel::space::WheelSpace;
use nalgebra::Vector3;

const LOOP_SAMPLES: usize = 100;

/// Rosette of overlapping rings, each touching the inner and outer radius.
///
/// Ring `i` is centred on the mid radius at angle `2π·i/n` with a diameter of the
/// layer's thickness; with the raised symmetry neighbouring rings always overlap.
#[derive(Debug, Clone)]
pub struct RosettaStruts {
    layer: WheelLayer,
    symmetry: u32,
    wall_thickness: Real,
}

impl RosettaStruts {
    /// The symmetry is raised to [`dense_symmetry`] when the layer is thin.
    pub fn new(layer: WheelLayer, symmetry: u32, wall_thickness: Real) -> Result<Self, WheelError> {
        check_common(symmetry, wall_thickness)?;
        if wall_thickness >= layer.range() {
            return Err(WheelError::InsufficientClearance {
                symmetry,
                wall_thickness,
                gap: layer.range() - wall_thickness,
            });
        }
        let symmetry = dense_symmetry(&layer, symmetry);
        check_core_gap(symmetry, layer.inner_radius(), wall_thickness)?;
        Ok(Self {
            layer,
            symmetry,
            wall_thickness,
        })
    }
}

impl WheelElements for RosettaStruts {
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
        // centreline of the ring stays half a wall inside the band
        let ring_radius = 0.5 * (self.layer.range() - self.wall_thickness);
        let mut lattice = Lattice::new();
        for z in strut_faces(space.params().width, self.wall_thickness) {
            let centre = polar::cyl_point(self.layer.mid_radius(), phi, z);
            let ring: Vec<_> = (0..=LOOP_SAMPLES)
                .map(|n| {
                    let a = TAU * n as Real / LOOP_SAMPLES as Real;
                    centre + Vector3::new(a.cos(), a.sin(), 0.0) * ring_radius
                })
                .collect();
            lattice.add_polyline(&ring, 0.5 * self.wall_thickness);
        }
        extruded_struts(&lattice, space, self.wall_thickness, res)
    }
}
