//! Procedural **rover wheels** for 3D printing, designed in an undistorted cylinder
//! and bent into an arbitrarily curved wheel shape.
//!
//! A wheel is described by a [`WheelRecipe`](wheel::WheelRecipe): its dimensions,
//! the shape of its side faces, an ordered list of radial layers each filled with a
//! structural pattern (holes, spiral spokes, tubes, rosettes, trusses) and a tread.
//! The [`wheel::assemble`] pipeline builds the four boundary spines of the wheel's
//! cross-section, generates every layer and the tread in the design space, maps each
//! sample into wheel space and unions the parts.
//!
//! ```no_run
//! use roverwheel::resolution::Resolution;
//! use roverwheel::wheel::{Preset, assemble};
//!
//! let wheel = assemble(&Preset::Spiral.recipe(), &Resolution::default())?;
//! let mesh = wheel.to_mesh();
//! println!("{} triangles", mesh.triangle_count());
//! # Ok::<(), roverwheel::errors::WheelError>(())
//! ```
//!
//! # Features
//! #### Default
//! - **f64**: use f64 as Real
//!
//! #### Optional
//! - **f32**: use f32 as Real, this conflicts with f64
//! - **parallel**: use rayon to rasterize sample cells on several threads

#![forbid(unsafe_code)]
#![warn(clippy::approx_constant, clippy::all)]

pub mod errors;
pub mod float_types;
pub mod frames;
pub mod polar;
pub mod resolution;
pub mod shapes;
pub mod spline;
pub mod traits;
pub mod voxels;
pub mod wheel;

#[cfg(any(all(feature = "f64", feature = "f32"), not(any(feature = "f64", feature = "f32"))))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use errors::WheelError;
pub use resolution::Resolution;
pub use traits::{CoordinateTransform, SolidOps};
pub use voxels::{Mesh, Voxels};
pub use wheel::{Preset, RandomWheel, Wheel, WheelParams, WheelRecipe, assemble};
