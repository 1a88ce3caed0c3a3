use super::{
    Combine, WheelElements, check_common, check_core_gap, dense_symmetry, extruded_struts,
    strut_faces,
};
use crate::errors::WheelError;
use crate::float_types::{Real, TAU};
use crate::polar;
use crate::resolution::Resolution;
use crate::spline::ControlPointSpline;
use crate::voxels::{Lattice, Voxels};
use crate::wheel::WheelLayer;
use crate::wheel::space::WheelSpace;

/// Curved spokes from the inner to the outer radius, each sweeping across two cells.
#[derive(Debug, Clone)]
pub struct SpiralStruts {
    layer: WheelLayer,
    symmetry: u32,
    wall_thickness: Real,
    /// Spoke centred on `phi = 0` in the plane `z = 0`.
    template: ControlPointSpline,
}

impl SpiralStruts {
    /// The symmetry is raised to [`dense_symmetry`] when the layer is thin.
    pub fn new(layer: WheelLayer, symmetry: u32, wall_thickness: Real) -> Result<Self, WheelError> {
        check_common(symmetry, wall_thickness)?;
        let symmetry = dense_symmetry(&layer, symmetry);
        check_core_gap(symmetry, layer.inner_radius(), wall_thickness)?;
        let inner = layer.inner_radius();
        let d_r = layer.range();
        let half = TAU / symmetry as Real;
        let control = vec![
            polar::cyl_point(inner, -half, 0.0),
            polar::cyl_point(inner + 0.3 * d_r, -half, 0.0),
            polar::cyl_point(inner + 0.4 * d_r, 0.0, 0.0),
            polar::cyl_point(inner + 0.7 * d_r, half, 0.0),
            polar::cyl_point(inner + d_r, half, 0.0),
        ];
        Ok(Self {
            layer,
            symmetry,
            wall_thickness,
            template: ControlPointSpline::with_degree(control, 3)?,
        })
    }

    fn spoke(&self, phi: Real, z: Real, samples: usize) -> Vec<nalgebra::Point3<Real>> {
        self.template
            .points(samples)
            .iter()
            .map(|p| polar::rotate_z(p, phi) + nalgebra::Vector3::z() * z)
            .collect()
    }
}

impl WheelElements for SpiralStruts {
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
        let mut lattice = Lattice::new();
        for z in strut_faces(space.params().width, self.wall_thickness) {
            let spoke = self.spoke(phi, z, res.spline_samples);
            lattice.add_polyline(&spoke, 0.5 * self.wall_thickness);
        }
        extruded_struts(&lattice, space, self.wall_thickness, res)
    }
}
