//! Sampling density shared by every generator of a build.

use crate::float_types::Real;
use serde::{Deserialize, Serialize};

/// How finely primitives are sampled and voxelized.
///
/// The step counts describe how many cells a swept primitive is split into along its
/// length, radial and polar directions before every sample is pushed through the
/// coordinate mapper.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Resolution {
    /// Edge length of one voxel in mm.
    pub voxel_size: Real,
    pub length_steps: usize,
    pub radial_steps: usize,
    pub polar_steps: usize,
    /// Number of points a smooth spline is evaluated at.
    pub spline_samples: usize,
}

impl Default for Resolution {
    fn default() -> Self {
        Self {
            voxel_size: 0.5,
            length_steps: 100,
            radial_steps: 100,
            polar_steps: 100,
            spline_samples: 500,
        }
    }
}

impl Resolution {
    /// Coarse setting for quick previews and tests.
    pub fn preview() -> Self {
        Self {
            voxel_size: 2.0,
            length_steps: 24,
            radial_steps: 6,
            polar_steps: 48,
            spline_samples: 60,
        }
    }

    /// Same step counts with a different voxel size.
    pub fn with_voxel_size(self, voxel_size: Real) -> Self {
        Self { voxel_size, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let res: Resolution = toml::from_str("voxel_size = 1.5").unwrap();
        assert_eq!(res.voxel_size, 1.5);
        assert_eq!(res.length_steps, Resolution::default().length_steps);
        assert_eq!(res.spline_samples, 500);
    }

    #[test]
    fn preview_is_coarser() {
        let fine = Resolution::default();
        let coarse = Resolution::preview();
        assert!(coarse.voxel_size > fine.voxel_size);
        assert!(coarse.polar_steps < fine.polar_steps);
    }
}
