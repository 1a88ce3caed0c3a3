use super::WheelLayer;
use super::space::WheelSpace;
use crate::resolution::Resolution;
use crate::shapes::{Pipe, Primitive};
use crate::voxels::Voxels;
use log::trace;

/// Solid band of the wheel between the layer's inner and outer radius, across the
/// full width, bent into wheel space.
pub fn layer_solid(space: &WheelSpace, layer: &WheelLayer, res: &Resolution) -> Voxels {
    trace!("layer solid [{}, {}]", layer.start(), layer.end());
    Pipe::new(layer.inner_radius(), layer.outer_radius(), space.params().width)
        .voxelize(space, res)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::SolidOps;
    use crate::wheel::contour::{ContourProfile, ContourSettings};
    use crate::wheel::WheelParams;

    #[test]
    fn bands_of_a_partition_add_up() {
        let params = WheelParams::new(30.0, 80.0, 40.0).unwrap();
        let space =
            WheelSpace::from_profile(params, &ContourProfile::default(), &ContourSettings::default())
                .unwrap();
        let res = Resolution::preview();
        let whole = layer_solid(&space, &WheelLayer::new(params, 0.0, 1.0).unwrap(), &res);
        let inner = layer_solid(&space, &WheelLayer::new(params, 0.0, 0.4).unwrap(), &res);
        let outer = layer_solid(&space, &WheelLayer::new(params, 0.4, 1.0).unwrap(), &res);

        assert!(!inner.is_empty() && !outer.is_empty());
        let joined = inner.union(&outer);
        let missing = whole.difference(&joined).volume();
        assert!(missing / whole.volume() < 0.03, "bands leave {missing} mm³ uncovered");
    }
}
