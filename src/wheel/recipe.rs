//! Complete, serializable description of one wheel.
//!
//! A [`WheelRecipe`] is what the assembler consumes. Presets and the random planner
//! both produce recipes, and recipes round-trip through TOML:
//!
//! ```toml
//! [params]
//! hub_radius = 30.0
//! outer_radius = 120.0
//! width = 60.0
//!
//! [[layers]]
//! start = 0.0
//! end = 1.0
//! element = { type = "RectHoles", symmetry = 20, wall_thickness = 4.0 }
//!
//! [tread]
//! pattern = "Studs"
//! mode = { type = "Profile" }
//! ```

use super::WheelLayer;
use super::WheelParams;
use super::contour::{ContourProfile, ContourSettings};
use super::elements::{
    EgyptianStruts, RectHoles, RosettaStruts, SpiralStruts, TubeStruts, WheelElements,
};
use super::tread::TreadPatternKind;
use crate::errors::WheelError;
use crate::float_types::Real;
use serde::{Deserialize, Serialize};

/// What fills one layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ElementSpec {
    /// The whole band is material.
    Solid,
    RectHoles { symmetry: u32, wall_thickness: Real },
    SpiralStruts { symmetry: u32, wall_thickness: Real },
    TubeStruts { symmetry: u32, wall_thickness: Real },
    RosettaStruts { symmetry: u32, wall_thickness: Real },
    EgyptianStruts { symmetry: u32, wall_thickness: Real },
}

impl ElementSpec {
    /// The generator for this element in `layer`, or `None` for a solid band.
    ///
    /// Fails with the generator's validation error, e.g. when the walls leave no
    /// clearance between neighbouring copies.
    pub fn build(&self, layer: WheelLayer) -> Result<Option<Box<dyn WheelElements>>, WheelError> {
        let elements: Box<dyn WheelElements> = match *self {
            ElementSpec::Solid => return Ok(None),
            ElementSpec::RectHoles {
                symmetry,
                wall_thickness,
            } => Box::new(RectHoles::new(layer, symmetry, wall_thickness)?),
            ElementSpec::SpiralStruts {
                symmetry,
                wall_thickness,
            } => Box::new(SpiralStruts::new(layer, symmetry, wall_thickness)?),
            ElementSpec::TubeStruts {
                symmetry,
                wall_thickness,
            } => Box::new(TubeStruts::new(layer, symmetry, wall_thickness)?),
            ElementSpec::RosettaStruts {
                symmetry,
                wall_thickness,
            } => Box::new(RosettaStruts::new(layer, symmetry, wall_thickness)?),
            ElementSpec::EgyptianStruts {
                symmetry,
                wall_thickness,
            } => Box::new(EgyptianStruts::new(layer, symmetry, wall_thickness)?),
        };
        Ok(Some(elements))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerSpec {
    pub start: Real,
    pub end: Real,
    pub element: ElementSpec,
}

impl LayerSpec {
    pub fn new(start: Real, end: Real, element: ElementSpec) -> Self {
        Self {
            start,
            end,
            element,
        }
    }

    pub fn solid(start: Real, end: Real) -> Self {
        Self::new(start, end, ElementSpec::Solid)
    }

    pub fn layer(&self, params: WheelParams) -> Result<WheelLayer, WheelError> {
        WheelLayer::new(params, self.start, self.end)
    }
}

/// How the tread pattern is attached to the outer contour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TreadMode {
    /// The pattern stands proud of the outer contour.
    Profile,
    /// A shell around the outer contour with the pattern cut into it.
    SolidLayer {
        outward_thickness: Real,
        inward_thickness: Real,
    },
}

impl TreadMode {
    /// Shell of 3 mm outward and 2 mm inward.
    pub fn default_solid_layer() -> Self {
        TreadMode::SolidLayer {
            outward_thickness: 3.0,
            inward_thickness: 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TreadSpec {
    pub pattern: TreadPatternKind,
    pub mode: TreadMode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WheelRecipe {
    pub params: WheelParams,
    #[serde(default)]
    pub contour: ContourProfile,
    #[serde(default)]
    pub contour_settings: ContourSettings,
    /// Radial bands from the hub outward.
    pub layers: Vec<LayerSpec>,
    pub tread: TreadSpec,
}

impl WheelRecipe {
    pub fn from_toml_str(source: &str) -> Result<Self, WheelError> {
        let recipe: WheelRecipe = toml::from_str(source)?;
        recipe.validate()?;
        Ok(recipe)
    }

    pub fn to_toml_string(&self) -> Result<String, WheelError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Checks the dimensions, the contour and every layer without building any
    /// geometry. Layers must be listed hub outward without overlapping.
    pub fn validate(&self) -> Result<(), WheelError> {
        self.params.validate()?;
        self.contour.validate()?;
        let mut previous_end: Real = 0.0;
        for spec in &self.layers {
            let layer = spec.layer(self.params)?;
            if layer.start() < previous_end {
                return Err(WheelError::InvalidParameters(format!(
                    "layer [{}, {}] overlaps the band ending at {previous_end}",
                    layer.start(),
                    layer.end()
                )));
            }
            previous_end = layer.end();
            spec.element.build(layer)?;
        }
        if let TreadMode::SolidLayer {
            outward_thickness,
            inward_thickness,
        } = self.tread.mode
        {
            if !(outward_thickness >= 0.0 && inward_thickness >= 0.0)
                || outward_thickness + inward_thickness <= 0.0
            {
                return Err(WheelError::InvalidParameters(format!(
                    "tread shell needs a positive thickness, got {outward_thickness} out / {inward_thickness} in"
                )));
            }
        }
        Ok(())
    }
}

/// The hand-designed wheels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Preset {
    /// Spiral spokes at the hub, rectangular holes, two rings of tubes and a rosette
    /// under a lattice-rib tread shell.
    Spiral,
    /// Alternating rectangular holes and rosettes under a studded tread.
    Rosetta,
    /// Holes and an Egyptian truss under exposed lattice ribs.
    Egyptian,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::Spiral, Preset::Rosetta, Preset::Egyptian];

    pub fn recipe(self) -> WheelRecipe {
        use ElementSpec::*;

        let params = WheelParams {
            hub_radius: 30.0,
            outer_radius: 120.0,
            width: 60.0,
        };
        let (layers, tread) = match self {
            Preset::Spiral => (
                vec![
                    LayerSpec::solid(0.0, 0.05),
                    LayerSpec::new(0.05, 0.2, SpiralStruts { symmetry: 16, wall_thickness: 2.5 }),
                    LayerSpec::new(0.2, 0.6, RectHoles { symmetry: 20, wall_thickness: 4.0 }),
                    LayerSpec::new(0.6, 0.8, TubeStruts { symmetry: 36, wall_thickness: 2.0 }),
                    LayerSpec::new(0.8, 0.9, TubeStruts { symmetry: 72, wall_thickness: 1.0 }),
                    LayerSpec::new(0.9, 1.0, RosettaStruts { symmetry: 60, wall_thickness: 2.0 }),
                ],
                TreadSpec {
                    pattern: TreadPatternKind::LatticeRibs,
                    mode: TreadMode::default_solid_layer(),
                },
            ),
            Preset::Rosetta => (
                vec![
                    LayerSpec::solid(0.0, 0.02),
                    LayerSpec::new(0.02, 0.2, RectHoles { symmetry: 20, wall_thickness: 4.0 }),
                    LayerSpec::new(0.2, 0.6, RosettaStruts { symmetry: 10, wall_thickness: 4.0 }),
                    LayerSpec::new(0.6, 0.8, RectHoles { symmetry: 10, wall_thickness: 2.0 }),
                    LayerSpec::new(0.8, 0.9, RosettaStruts { symmetry: 50, wall_thickness: 2.0 }),
                    LayerSpec::new(0.9, 1.0, RectHoles { symmetry: 20, wall_thickness: 2.0 }),
                ],
                TreadSpec {
                    pattern: TreadPatternKind::Studs,
                    mode: TreadMode::Profile,
                },
            ),
            Preset::Egyptian => (
                vec![
                    LayerSpec::solid(0.0, 0.1),
                    LayerSpec::new(0.1, 0.5, RectHoles { symmetry: 40, wall_thickness: 2.0 }),
                    LayerSpec::new(0.5, 0.85, EgyptianStruts { symmetry: 20, wall_thickness: 4.0 }),
                    LayerSpec::new(0.85, 1.0, RectHoles { symmetry: 30, wall_thickness: 3.0 }),
                ],
                TreadSpec {
                    pattern: TreadPatternKind::LatticeRibs,
                    mode: TreadMode::Profile,
                },
            ),
        };
        WheelRecipe {
            params,
            contour: ContourProfile::default(),
            contour_settings: ContourSettings::default(),
            layers,
            tread,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid() {
        for preset in Preset::ALL {
            preset
                .recipe()
                .validate()
                .unwrap_or_else(|e| panic!("{preset:?}: {e}"));
        }
    }

    #[test]
    fn solid_layers_have_no_generator() {
        let layer = WheelLayer::new(WheelParams::new(30.0, 120.0, 60.0).unwrap(), 0.0, 0.1)
            .unwrap();
        assert!(ElementSpec::Solid.build(layer).unwrap().is_none());
        let tubes = ElementSpec::TubeStruts {
            symmetry: 8,
            wall_thickness: 1.0,
        }
        .build(layer)
        .unwrap()
        .unwrap();
        assert!(tubes.symmetry() >= 8);
    }

    #[test]
    fn overlapping_layers_are_rejected() {
        let mut recipe = Preset::Egyptian.recipe();
        recipe.layers[2].start = 0.4;
        assert!(matches!(
            recipe.validate(),
            Err(WheelError::InvalidParameters(_))
        ));
    }

    #[test]
    fn parses_a_hand_written_recipe() {
        let source = r#"
            [params]
            hub_radius = 30.0
            outer_radius = 120.0
            width = 60.0

            [[layers]]
            start = 0.0
            end = 1.0
            element = { type = "RectHoles", symmetry = 20, wall_thickness = 4.0 }

            [tread]
            pattern = "Studs"
            mode = { type = "SolidLayer", outward_thickness = 3.0, inward_thickness = 2.0 }
        "#;
        let recipe = WheelRecipe::from_toml_str(source).unwrap();
        assert_eq!(recipe.contour, ContourProfile::default());
        assert_eq!(
            recipe.layers[0].element,
            ElementSpec::RectHoles {
                symmetry: 20,
                wall_thickness: 4.0
            }
        );
        assert_eq!(recipe.tread.mode, TreadMode::default_solid_layer());
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        assert!(matches!(
            WheelRecipe::from_toml_str("params = 3"),
            Err(WheelError::Config(_))
        ));
    }
}
