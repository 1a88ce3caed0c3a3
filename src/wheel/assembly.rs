//! Turns a [`WheelRecipe`] into a finished solid.

use super::WheelLayer;
use super::layer::layer_solid;
use super::recipe::{ElementSpec, TreadMode, WheelRecipe};
use super::space::WheelSpace;
use super::tread::WheelTread;
use crate::errors::WheelError;
use crate::resolution::Resolution;
use crate::traits::SolidOps;
use crate::voxels::{Mesh, Voxels};
use log::{debug, info};

/// Stages of a build, in order. [`WheelAssembler::stage`] reports the last stage
/// that has completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BuildStage {
    Init,
    BuildBoundaryContours,
    BuildLayersAndElements,
    BuildTread,
    Union,
    Done,
}

impl BuildStage {
    pub fn next(self) -> BuildStage {
        match self {
            BuildStage::Init => BuildStage::BuildBoundaryContours,
            BuildStage::BuildBoundaryContours => BuildStage::BuildLayersAndElements,
            BuildStage::BuildLayersAndElements => BuildStage::BuildTread,
            BuildStage::BuildTread => BuildStage::Union,
            BuildStage::Union | BuildStage::Done => BuildStage::Done,
        }
    }
}

/// A built wheel.
#[derive(Debug, Clone)]
pub struct Wheel {
    recipe: WheelRecipe,
    space: WheelSpace,
    layers: Vec<(WheelLayer, ElementSpec)>,
    solid: Voxels,
}

impl Wheel {
    pub fn recipe(&self) -> &WheelRecipe {
        &self.recipe
    }

    pub fn space(&self) -> &WheelSpace {
        &self.space
    }

    pub fn layers(&self) -> &[(WheelLayer, ElementSpec)] {
        &self.layers
    }

    pub fn solid(&self) -> &Voxels {
        &self.solid
    }

    pub fn to_mesh(&self) -> Mesh {
        self.solid.to_mesh()
    }
}

/// Step-by-step build of one recipe.
///
/// Every stage consumes what the previous one produced, so the stages can only run
/// in order; a failed stage leaves the assembler where it was.
#[derive(Debug, Clone)]
pub struct WheelAssembler {
    recipe: WheelRecipe,
    res: Resolution,
    stage: BuildStage,
    space: Option<WheelSpace>,
    layers: Vec<(WheelLayer, ElementSpec)>,
    parts: Vec<Voxels>,
    solid: Option<Voxels>,
}

impl WheelAssembler {
    pub fn new(recipe: WheelRecipe, res: Resolution) -> Self {
        Self {
            recipe,
            res,
            stage: BuildStage::Init,
            space: None,
            layers: Vec::new(),
            parts: Vec::new(),
            solid: None,
        }
    }

    pub fn stage(&self) -> BuildStage {
        self.stage
    }

    pub fn recipe(&self) -> &WheelRecipe {
        &self.recipe
    }

    /// The wheel space, once the boundary contours are built.
    pub fn space(&self) -> Option<&WheelSpace> {
        self.space.as_ref()
    }

    /// Runs the next stage and returns the stage now completed.
    pub fn advance(&mut self) -> Result<BuildStage, WheelError> {
        let next = self.stage.next();
        match next {
            BuildStage::BuildBoundaryContours => self.build_boundary_contours()?,
            BuildStage::BuildLayersAndElements => self.build_layers()?,
            BuildStage::BuildTread => self.build_tread()?,
            BuildStage::Union => self.union(),
            BuildStage::Init | BuildStage::Done => {},
        }
        if next != self.stage {
            debug!("wheel build: {:?} -> {:?}", self.stage, next);
        }
        self.stage = next;
        Ok(next)
    }

    /// Runs every remaining stage.
    pub fn finish(mut self) -> Result<Wheel, WheelError> {
        while self.stage != BuildStage::Done {
            self.advance()?;
        }
        match (self.space, self.solid) {
            (Some(space), Some(solid)) => Ok(Wheel {
                recipe: self.recipe,
                space,
                layers: self.layers,
                solid,
            }),
            _ => Err(WheelError::InvalidParameters(
                "wheel build finished without a solid".into(),
            )),
        }
    }

    fn built_space(&self) -> Result<&WheelSpace, WheelError> {
        self.space.as_ref().ok_or_else(|| {
            WheelError::InvalidParameters("boundary contours have not been built".into())
        })
    }

    fn build_boundary_contours(&mut self) -> Result<(), WheelError> {
        self.recipe.validate()?;
        self.space = Some(WheelSpace::from_profile(
            self.recipe.params,
            &self.recipe.contour,
            &self.recipe.contour_settings,
        )?);
        Ok(())
    }

    fn build_layers(&mut self) -> Result<(), WheelError> {
        let space = self.built_space()?;
        let params = self.recipe.params;
        let mut layers = Vec::with_capacity(self.recipe.layers.len());
        let mut parts = Vec::with_capacity(self.recipe.layers.len());
        for spec in &self.recipe.layers {
            let layer = spec.layer(params)?;
            let part = match spec.element.build(layer)? {
                Some(elements) => elements.construct(space, &self.res),
                None => layer_solid(space, &layer, &self.res),
            };
            debug!(
                "layer [{}, {}] {:?}: {} voxels",
                layer.start(),
                layer.end(),
                spec.element,
                part.len()
            );
            layers.push((layer, spec.element));
            parts.push(part);
        }
        self.layers = layers;
        self.parts = parts;
        Ok(())
    }

    fn build_tread(&mut self) -> Result<(), WheelError> {
        let space = self.built_space()?;
        let tread = WheelTread::new(space.spines().outer_radius.clone(), self.recipe.tread.pattern);
        let solid = match self.recipe.tread.mode {
            TreadMode::Profile => tread.exposed_profile(&self.res),
            TreadMode::SolidLayer {
                outward_thickness,
                inward_thickness,
            } => tread.solid_layer(outward_thickness, inward_thickness, &self.res)?,
        };
        self.parts.push(solid);
        Ok(())
    }

    fn union(&mut self) {
        let parts = std::mem::take(&mut self.parts);
        let solid = Voxels::new(self.res.voxel_size).union_all(parts);
        info!(
            "wheel built: {} voxels, {:.0} mm³",
            solid.len(),
            solid.volume()
        );
        self.solid = Some(solid);
    }
}

/// Builds `recipe` in one go.
pub fn assemble(recipe: &WheelRecipe, res: &Resolution) -> Result<Wheel, WheelError> {
    WheelAssembler::new(recipe.clone(), *res).finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wheel::recipe::{LayerSpec, TreadSpec};
    use crate::wheel::tread::TreadPatternKind;
    use crate::wheel::{ContourProfile, ContourSettings, WheelParams};

    fn small_recipe() -> WheelRecipe {
        WheelRecipe {
            params: WheelParams::new(20.0, 50.0, 30.0).unwrap(),
            contour: ContourProfile::default(),
            contour_settings: ContourSettings::default(),
            layers: vec![LayerSpec::solid(0.0, 0.3), LayerSpec::solid(0.3, 1.0)],
            tread: TreadSpec {
                pattern: TreadPatternKind::Studs,
                mode: TreadMode::Profile,
            },
        }
    }

    #[test]
    fn stages_run_in_order() {
        let mut assembler = WheelAssembler::new(small_recipe(), Resolution::preview());
        assert_eq!(assembler.stage(), BuildStage::Init);
        let mut seen = vec![];
        while assembler.stage() != BuildStage::Done {
            seen.push(assembler.advance().unwrap());
        }
        assert_eq!(
            seen,
            [
                BuildStage::BuildBoundaryContours,
                BuildStage::BuildLayersAndElements,
                BuildStage::BuildTread,
                BuildStage::Union,
                BuildStage::Done,
            ]
        );
        assert_eq!(assembler.advance().unwrap(), BuildStage::Done);
        let wheel = assembler.finish().unwrap();
        assert_eq!(wheel.layers().len(), 2);
        assert!(!wheel.solid().is_empty());
    }

    #[test]
    fn invalid_recipe_stops_at_init() {
        let mut recipe = small_recipe();
        recipe.layers.push(LayerSpec::solid(0.9, 0.8));
        let mut assembler = WheelAssembler::new(recipe, Resolution::preview());
        assert!(matches!(
            assembler.advance(),
            Err(WheelError::InvalidLayerBounds { .. })
        ));
        assert_eq!(assembler.stage(), BuildStage::Init);
    }
}
