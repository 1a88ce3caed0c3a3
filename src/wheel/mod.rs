//! Rover wheels: an undistorted cylindrical design space, the mapper that bends it
//! into the wheel's curved shape, and the generators that fill it.
//!
//! Design-space convention: a point at radius `r`, polar angle `phi` and axial
//! position `z` has length ratio `(r - hub) / (outer - hub)` and height ratio
//! `z / width`. Both ratios run over `[0, 1]` inside the wheel.

pub mod assembly;
pub mod contour;
pub mod elements;
pub mod layer;
pub mod random;
pub mod recipe;
pub mod space;
pub mod tread;

pub use assembly::{BuildStage, Wheel, WheelAssembler, assemble};
pub use contour::{ContourProfile, ContourSettings, ContourSplit, Lens};
pub use elements::{Combine, WheelElements};
pub use random::{RandomWheel, RandomWheelConfig};
pub use recipe::{ElementSpec, LayerSpec, Preset, TreadMode, TreadSpec, WheelRecipe};
pub use space::{BoundarySpines, DesignSpace, WheelSpace};
pub use tread::{TREAD_REFERENCE_RADIUS, TreadPattern, TreadPatternKind, WheelTread};

use crate::errors::WheelError;
use crate::float_types::Real;
use serde::{Deserialize, Serialize};

/// Overall wheel dimensions in mm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WheelParams {
    pub hub_radius: Real,
    pub outer_radius: Real,
    /// Reference width of the design space along the axis.
    pub width: Real,
}

impl WheelParams {
    pub fn new(hub_radius: Real, outer_radius: Real, width: Real) -> Result<Self, WheelError> {
        let params = Self {
            hub_radius,
            outer_radius,
            width,
        };
        params.validate()?;
        Ok(params)
    }

    /// Checks `0 < hub < outer` and `width > 0`.
    pub fn validate(&self) -> Result<(), WheelError> {
        let finite = [self.hub_radius, self.outer_radius, self.width]
            .iter()
            .all(|v| v.is_finite());
        if !finite || self.hub_radius <= 0.0 || self.hub_radius >= self.outer_radius {
            return Err(WheelError::InvalidParameters(format!(
                "need 0 < hub radius < outer radius, got hub {} and outer {}",
                self.hub_radius, self.outer_radius
            )));
        }
        if self.width <= 0.0 {
            return Err(WheelError::InvalidParameters(format!(
                "width must be positive, got {}",
                self.width
            )));
        }
        Ok(())
    }

    /// Radial extent `outer - hub`.
    pub fn span(&self) -> Real {
        self.outer_radius - self.hub_radius
    }

    /// Design-space radius at `length_ratio`.
    pub fn radius_at(&self, length_ratio: Real) -> Real {
        self.hub_radius + length_ratio * self.span()
    }
}

/// Radial band `[start, end]` of the wheel, in length ratios.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelLayer {
    params: WheelParams,
    start: Real,
    end: Real,
}

impl WheelLayer {
    pub fn new(params: WheelParams, start: Real, end: Real) -> Result<Self, WheelError> {
        if !(0.0..=1.0).contains(&start) || !(0.0..=1.0).contains(&end) || start >= end {
            return Err(WheelError::InvalidLayerBounds { start, end });
        }
        Ok(Self { params, start, end })
    }

    pub fn params(&self) -> &WheelParams {
        &self.params
    }

    pub fn start(&self) -> Real {
        self.start
    }

    pub fn end(&self) -> Real {
        self.end
    }

    pub fn inner_radius(&self) -> Real {
        self.params.radius_at(self.start)
    }

    pub fn outer_radius(&self) -> Real {
        self.params.radius_at(self.end)
    }

    pub fn mid_radius(&self) -> Real {
        0.5 * (self.inner_radius() + self.outer_radius())
    }

    /// Radial thickness of the band.
    pub fn range(&self) -> Real {
        self.outer_radius() - self.inner_radius()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn params_reject_inverted_radii() {
        assert!(WheelParams::new(30.0, 120.0, 60.0).is_ok());
        assert!(matches!(
            WheelParams::new(120.0, 30.0, 60.0),
            Err(WheelError::InvalidParameters(_))
        ));
        assert!(WheelParams::new(0.0, 30.0, 60.0).is_err());
        assert!(WheelParams::new(10.0, 30.0, 0.0).is_err());
    }

    #[test]
    fn layer_bounds_are_checked() {
        let p = WheelParams::new(30.0, 120.0, 60.0).unwrap();
        assert!(matches!(
            WheelLayer::new(p, 0.5, 0.5),
            Err(WheelError::InvalidLayerBounds { .. })
        ));
        assert!(WheelLayer::new(p, -0.1, 0.5).is_err());
        assert!(WheelLayer::new(p, 0.2, 1.1).is_err());

        let layer = WheelLayer::new(p, 0.2, 0.6).unwrap();
        assert_relative_eq!(layer.inner_radius(), 48.0);
        assert_relative_eq!(layer.outer_radius(), 84.0);
        assert_relative_eq!(layer.mid_radius(), 66.0);
        assert_relative_eq!(layer.range(), 36.0);
    }
}
