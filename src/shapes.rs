//! Swept parametric primitives.
//!
//! Each primitive maps a parameter box `(u, v, w) ∈ [0, 1]³` onto space:
//! `u` runs along its length, `v` across its radial extent and `w` once around.
//! [`Primitive::voxelize`] pushes every sample through a [`CoordinateTransform`]
//! before the cells are filled, which is how undistorted shapes end up deformed.

use crate::float_types::{Real, TAU};
use crate::frames::Frames;
use crate::polar;
use crate::resolution::Resolution;
use crate::traits::CoordinateTransform;
use crate::voxels::{SampleGrid, Voxels};
use nalgebra::Point3;

pub trait Primitive {
    fn point(&self, u: Real, v: Real, w: Real) -> Point3<Real>;

    /// Sample counts along `(u, v, w)`.
    fn steps(&self, res: &Resolution) -> [usize; 3] {
        [res.length_steps, res.radial_steps, res.polar_steps]
    }

    fn voxelize<T: CoordinateTransform + ?Sized>(&self, transform: &T, res: &Resolution) -> Voxels
    where
        Self: Sized,
    {
        let grid = SampleGrid::sample(self.steps(res), |u, v, w| {
            transform.transform(self.point(u, v, w))
        });
        Voxels::from_grid(&grid, res.voxel_size)
    }
}

/// Hollow cylinder around the Z axis from `z = 0` to `z = length`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pipe {
    pub inner_radius: Real,
    pub outer_radius: Real,
    pub length: Real,
}

impl Pipe {
    pub fn new(inner_radius: Real, outer_radius: Real, length: Real) -> Self {
        Self {
            inner_radius,
            outer_radius,
            length,
        }
    }

    /// Full cylinder.
    pub fn solid(radius: Real, length: Real) -> Self {
        Self::new(0.0, radius, length)
    }
}

impl Primitive for Pipe {
    fn point(&self, u: Real, v: Real, w: Real) -> Point3<Real> {
        let r = self.inner_radius + v * (self.outer_radius - self.inner_radius);
        polar::cyl_point(r, TAU * w, u * self.length)
    }
}

/// Pipe whose outer radius is a function of `(phi, length_ratio)`.
pub struct ModulatedPipe<F>
where
    F: Fn(Real, Real) -> Real,
{
    pub inner_radius: Real,
    pub outer_radius: F,
    pub length: Real,
}

impl<F> ModulatedPipe<F>
where
    F: Fn(Real, Real) -> Real,
{
    pub fn new(inner_radius: Real, outer_radius: F, length: Real) -> Self {
        Self {
            inner_radius,
            outer_radius,
            length,
        }
    }
}

impl<F> Primitive for ModulatedPipe<F>
where
    F: Fn(Real, Real) -> Real,
{
    fn point(&self, u: Real, v: Real, w: Real) -> Point3<Real> {
        let phi = TAU * w;
        let outer = (self.outer_radius)(phi, u);
        let r = self.inner_radius + v * (outer - self.inner_radius);
        polar::cyl_point(r, phi, u * self.length)
    }
}

/// Band of material around a spine in the XZ half plane (`x ≥ 0`), revolved
/// once around the Z axis. The band reaches `inward` towards the axis and
/// `outward` away from it, measured along the spine's outward normal.
pub struct Revolve<'a> {
    pub spine: &'a Frames,
    pub inward: Real,
    pub outward: Real,
}

impl<'a> Revolve<'a> {
    pub fn new(spine: &'a Frames, inward: Real, outward: Real) -> Self {
        Self {
            spine,
            inward,
            outward,
        }
    }
}

impl Primitive for Revolve<'_> {
    fn point(&self, u: Real, v: Real, w: Real) -> Point3<Real> {
        let frame = self.spine.frame_at(u);
        let offset = -self.inward + v * (self.inward + self.outward);
        let p = frame.position + frame.outward_normal() * offset;
        polar::rotate_z(&p, TAU * w)
    }
}
