use super::{Combine, SymmetryCell, WheelElements, check_common, check_core_gap};
use crate::errors::WheelError;
use crate::float_types::{Real, TAU};
use crate::resolution::Resolution;
use crate::shapes::Primitive;
use crate::spline::supershape_radius;
use crate::voxels::Voxels;
use crate::wheel::WheelLayer;
use crate::wheel::space::WheelSpace;
use nalgebra::Point3;

/// Rounded rectangular windows cut through the layer, one per cell.
#[derive(Debug, Clone)]
pub struct RectHoles {
    layer: WheelLayer,
    symmetry: u32,
    wall_thickness: Real,
}

impl RectHoles {
    pub fn new(layer: WheelLayer, symmetry: u32, wall_thickness: Real) -> Result<Self, WheelError> {
        check_common(symmetry, wall_thickness)?;
        let radial_gap = layer.range() - 2.0 * wall_thickness;
        if radial_gap <= 0.0 {
            return Err(WheelError::InsufficientClearance {
                symmetry,
                wall_thickness,
                gap: radial_gap,
            });
        }
        check_core_gap(symmetry, layer.inner_radius() + wall_thickness, wall_thickness)?;
        Ok(Self {
            layer,
            symmetry,
            wall_thickness,
        })
    }

    pub fn wall_thickness(&self) -> Real {
        self.wall_thickness
    }
}

impl WheelElements for RectHoles {
    fn layer(&self) -> &WheelLayer {
        &self.layer
    }

    fn symmetry(&self) -> u32 {
        self.symmetry
    }

    fn combine(&self) -> Combine {
        Combine::Subtractive
    }

    fn copy(&self, index: u32, space: &WheelSpace, res: &Resolution) -> Voxels {
        let hole = Hole {
            cell: SymmetryCell::new(
                &self.layer,
                self.symmetry,
                index,
                self.wall_thickness,
                self.wall_thickness,
            ),
            width: space.params().width,
            // reach a voxel past both faces so the cut goes all the way through
            overshoot: res.voxel_size,
        };
        hole.voxelize(space, res)
    }
}

// Unit cylinder squared off by a superformula, then spread over the cell.
struct Hole {
    cell: SymmetryCell,
    width: Real,
    overshoot: Real,
}

impl Primitive for Hole {
    fn point(&self, u: Real, v: Real, w: Real) -> Point3<Real> {
        let phi = TAU * w;
        let r = v * supershape_radius(phi, 4.0, 20.0, 15.0, 15.0);
        let x = (r * phi.cos()).clamp(-1.0, 1.0);
        let y = (r * phi.sin()).clamp(-1.0, 1.0);
        let z = -self.overshoot + u * (self.width + 2.0 * self.overshoot);
        self.cell.point(x, 0.5 * (y + 1.0), z)
    }
}
