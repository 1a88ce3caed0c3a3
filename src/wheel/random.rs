//! Randomized wheel planning.
//!
//! The planner only draws numbers and returns a [`WheelRecipe`]; the same random
//! stream always yields the same recipe. Building the geometry is left to the
//! assembler.

use super::WheelParams;
use super::contour::{ContourProfile, ContourSettings, build_boundary_spines};
use super::recipe::{ElementSpec, LayerSpec, TreadMode, TreadSpec, WheelRecipe};
use super::tread::TreadPatternKind;
use crate::errors::WheelError;
use crate::float_types::Real;
use log::{debug, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Ranges every random draw is taken from. Pairs are `[low, high)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomWheelConfig {
    pub outer_radius: [Real; 2],
    pub hub_radius: [Real; 2],
    pub width: [Real; 2],
    pub hub_ratio: [Real; 2],
    pub round_ratio: [Real; 2],
    pub tread_outward: [Real; 2],
    pub tread_inward: [Real; 2],
    /// Length ratio where the structured layers start; below it the wheel is solid.
    pub inner_margin: Real,
    /// Length ratio where the structured layers stop; above it the wheel is solid.
    pub outer_margin: Real,
    pub band_width: [Real; 2],
    pub symmetry: [u32; 2],
    pub wall_thickness: [Real; 2],
}

impl Default for RandomWheelConfig {
    fn default() -> Self {
        Self {
            outer_radius: [80.0, 200.0],
            hub_radius: [30.0, 50.0],
            width: [40.0, 90.0],
            hub_ratio: [0.4, 0.9],
            round_ratio: [0.5, 0.9],
            tread_outward: [1.0, 4.0],
            tread_inward: [1.0, 2.0],
            inner_margin: 0.05,
            outer_margin: 0.97,
            band_width: [0.05, 0.55],
            symmetry: [8, 30],
            wall_thickness: [1.0, 3.0],
        }
    }
}

impl RandomWheelConfig {
    pub fn validate(&self) -> Result<(), WheelError> {
        let ranges = [
            ("outer radius", self.outer_radius),
            ("hub radius", self.hub_radius),
            ("width", self.width),
            ("hub ratio", self.hub_ratio),
            ("round ratio", self.round_ratio),
            ("tread outward thickness", self.tread_outward),
            ("tread inward thickness", self.tread_inward),
            ("band width", self.band_width),
            ("wall thickness", self.wall_thickness),
        ];
        for (name, [low, high]) in ranges {
            if !(low.is_finite() && high.is_finite() && low > 0.0 && low <= high) {
                return Err(WheelError::InvalidParameters(format!(
                    "{name} range [{low}, {high}) is empty or not positive"
                )));
            }
        }
        if self.hub_radius[1] >= self.outer_radius[0] {
            return Err(WheelError::InvalidParameters(format!(
                "hub radius may reach {} but the outer radius may be as small as {}",
                self.hub_radius[1], self.outer_radius[0]
            )));
        }
        if !(0.0 < self.inner_margin && self.inner_margin < self.outer_margin && self.outer_margin < 1.0) {
            return Err(WheelError::InvalidParameters(format!(
                "need 0 < inner margin < outer margin < 1, got {} and {}",
                self.inner_margin, self.outer_margin
            )));
        }
        if self.hub_ratio[1] >= 1.0 || self.round_ratio[1] >= 1.0 {
            return Err(WheelError::InvalidParameters(
                "contour ratios must stay below 1".into(),
            ));
        }
        let [low, high] = self.symmetry;
        if low == 0 || low > high {
            return Err(WheelError::InvalidParameters(format!(
                "symmetry range [{low}, {high}) is empty or starts at 0"
            )));
        }
        Ok(())
    }
}

const ELEMENT_CHOICES: usize = 5;
/// Contour shapes drawn before a wheel whose spines cannot be built is given up on.
const CONTOUR_ATTEMPTS: usize = 8;

/// Plans random wheels from a [`RandomWheelConfig`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RandomWheel {
    config: RandomWheelConfig,
}

impl RandomWheel {
    pub fn new(config: RandomWheelConfig) -> Result<Self, WheelError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RandomWheelConfig {
        &self.config
    }

    /// Draws a complete recipe.
    ///
    /// Draw order: dimensions, contour shape, tread pattern and mode, the layer
    /// partition, then symmetry, wall thickness and element type for each layer.
    /// A contour whose boundary spines cannot be built is redrawn; layers whose
    /// element fails validation are planned as solid bands.
    pub fn plan<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<WheelRecipe, WheelError> {
        let c = &self.config;
        let outer_radius = draw(rng, c.outer_radius);
        let hub_radius = draw(rng, c.hub_radius);
        let width = draw(rng, c.width);
        let params = WheelParams::new(hub_radius, outer_radius, width)?;

        let contour_settings = ContourSettings::default();
        let contour = self.draw_contour(rng, &params, &contour_settings)?;

        let pattern = TreadPatternKind::ALL[rng.gen_range(0..TreadPatternKind::ALL.len())];
        let mode = if rng.gen_bool(0.5) {
            TreadMode::Profile
        } else {
            TreadMode::SolidLayer {
                outward_thickness: draw(rng, c.tread_outward),
                inward_thickness: draw(rng, c.tread_inward),
            }
        };

        let mut bands = Vec::new();
        let mut start = c.inner_margin;
        loop {
            let end = (start + draw(rng, c.band_width)).min(c.outer_margin);
            bands.push((start, end));
            if end >= c.outer_margin {
                break;
            }
            start = end;
        }

        let mut layers = Vec::with_capacity(bands.len() + 2);
        layers.push(LayerSpec::solid(0.0, c.inner_margin));
        for (start, end) in bands {
            let element = self.draw_element(rng);
            let layer = LayerSpec::new(start, end, element);
            match element.build(layer.layer(params)?) {
                Ok(_) => layers.push(layer),
                Err(e) => {
                    warn!("planning [{start:.3}, {end:.3}] as a solid band: {e}");
                    layers.push(LayerSpec::solid(start, end));
                },
            }
        }
        layers.push(LayerSpec::solid(c.outer_margin, 1.0));

        debug!(
            "planned a {:.1} x {:.1} mm wheel with {} layers and {:?} tread",
            outer_radius,
            width,
            layers.len(),
            pattern
        );
        Ok(WheelRecipe {
            params,
            contour,
            contour_settings,
            layers,
            tread: TreadSpec { pattern, mode },
        })
    }

    fn draw_contour<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        params: &WheelParams,
        settings: &ContourSettings,
    ) -> Result<ContourProfile, WheelError> {
        let mut attempt = 1;
        loop {
            let contour = ContourProfile {
                hub_ratio: draw(rng, self.config.hub_ratio),
                round_ratio: draw(rng, self.config.round_ratio),
            };
            match build_boundary_spines(params, &contour, settings) {
                Ok(_) => return Ok(contour),
                Err(e) if attempt < CONTOUR_ATTEMPTS => {
                    warn!("redrawing contour {contour:?} (attempt {attempt}): {e}");
                    attempt += 1;
                },
                Err(e) => return Err(e),
            }
        }
    }

    fn draw_element<R: Rng + ?Sized>(&self, rng: &mut R) -> ElementSpec {
        let [low, high] = self.config.symmetry;
        let symmetry = if low < high { rng.gen_range(low..high) } else { low };
        let wall_thickness = draw(rng, self.config.wall_thickness);
        match rng.gen_range(0..ELEMENT_CHOICES) {
            0 => ElementSpec::EgyptianStruts {
                symmetry,
                wall_thickness,
            },
            1 => ElementSpec::RectHoles {
                symmetry,
                wall_thickness,
            },
            2 => ElementSpec::RosettaStruts {
                symmetry,
                wall_thickness,
            },
            3 => ElementSpec::SpiralStruts {
                symmetry,
                wall_thickness,
            },
            _ => ElementSpec::TubeStruts {
                symmetry,
                wall_thickness,
            },
        }
    }
}

/// Uniform draw from `[low, high)`; a collapsed range yields `low`.
fn draw<R: Rng + ?Sized>(rng: &mut R, [low, high]: [Real; 2]) -> Real {
    if low < high {
        rng.gen_range(low..high)
    } else {
        low
    }
}
