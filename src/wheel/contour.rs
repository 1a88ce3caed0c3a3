//! The wheel's bounding contour and its split into rim and tread parts.
//!
//! Contours live in the XZ half plane: `x` is the radius, `z` the axial position.
//! Rim-aligned parts run mostly radially (along X), tread-aligned parts mostly
//! axially (along Z).

use super::WheelParams;
use super::space::BoundarySpines;
use crate::errors::WheelError;
use crate::float_types::Real;
use crate::frames::{FrameType, Frames};
use crate::spline::{self, ControlPointSpline};
use log::debug;
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Sampling and hysteresis constants of the contour split.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContourSettings {
    /// Points per contour after reparametrization.
    pub samples: usize,
    /// Rim-aligned samples the upper walk has to see before it may latch into the
    /// tread. Wide wheels leave the hub axially, so the walk waits until it has
    /// turned outward at least once.
    pub min_rim_run: usize,
    /// Tread-aligned samples the lower walk has to see before it may fall back
    /// to rim alignment.
    pub min_tread_run: usize,
}

impl Default for ContourSettings {
    fn default() -> Self {
        Self {
            samples: 100,
            min_rim_run: 1,
            min_tread_run: 20,
        }
    }
}

impl ContourSettings {
    pub fn validate(&self) -> Result<(), WheelError> {
        if self.samples < 8 || 2 * self.min_rim_run >= self.samples {
            return Err(WheelError::InvalidParameters(format!(
                "{} contour samples leave no room for a rim run of {}",
                self.samples, self.min_rim_run
            )));
        }
        Ok(())
    }
}

/// Shape of the wheel's side faces.
///
/// The upper face is the curve through `(hub_ratio·W, 0)`, `(W, round_ratio)`,
/// `(W, 1)` and `(0, 1)` in (axial offset, length ratio); the lower face mirrors it.
/// `hub_ratio` sets how wide the wheel is at the hub, `round_ratio` where the
/// side face starts rounding over into the tread.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContourProfile {
    pub hub_ratio: Real,
    pub round_ratio: Real,
}

impl Default for ContourProfile {
    fn default() -> Self {
        Self {
            hub_ratio: 0.6,
            round_ratio: 0.6,
        }
    }
}

impl ContourProfile {
    pub fn validate(&self) -> Result<(), WheelError> {
        let ok = |v: Real| v.is_finite() && v > 0.0 && v < 1.0;
        if !ok(self.hub_ratio) || !ok(self.round_ratio) {
            return Err(WheelError::InvalidParameters(format!(
                "contour ratios must lie in (0, 1), got hub {} and round {}",
                self.hub_ratio, self.round_ratio
            )));
        }
        Ok(())
    }

    /// Control points of the upper face as `(axial offset, 0, length ratio)`.
    pub fn control_points(&self, width: Real) -> Vec<Point3<Real>> {
        vec![
            Point3::new(self.hub_ratio * width, 0.0, 0.0),
            Point3::new(width, 0.0, self.round_ratio),
            Point3::new(width, 0.0, 1.0),
            Point3::new(0.0, 0.0, 1.0),
        ]
    }

    /// Upper face curve, `samples` points from the hub to the mid plane.
    pub fn upper_curve(&self, width: Real, samples: usize) -> Result<HeightModulation, WheelError> {
        let spline = ControlPointSpline::new(self.control_points(width))?;
        Ok(HeightModulation::new(spline.points(samples)))
    }

    pub fn lower_curve(&self, width: Real, samples: usize) -> Result<HeightModulation, WheelError> {
        Ok(self.upper_curve(width, samples)?.mirrored())
    }
}

/// Axial offset of one side face as a function of length ratio, stored as the
/// curve `(offset, 0, length ratio)`.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightModulation {
    points: Vec<Point3<Real>>,
}

impl HeightModulation {
    pub fn new(points: Vec<Point3<Real>>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Point3<Real>] {
        &self.points
    }

    /// The same face on the other side of the mid plane.
    pub fn mirrored(&self) -> Self {
        Self::new(
            self.points
                .iter()
                .map(|p| Point3::new(-p.x, p.y, p.z))
                .collect(),
        )
    }

    /// Offset where the curve first reaches `length_ratio`.
    pub fn offset_at(&self, length_ratio: Real) -> Real {
        let Some(first) = self.points.first() else {
            return 0.0;
        };
        if length_ratio <= first.z {
            return first.x;
        }
        for w in self.points.windows(2) {
            let (a, b) = (w[0], w[1]);
            let (lo, hi) = (a.z.min(b.z), a.z.max(b.z));
            if length_ratio >= lo && length_ratio <= hi {
                let span = b.z - a.z;
                if span.abs() <= Real::EPSILON {
                    return a.x;
                }
                return a.x + (b.x - a.x) * (length_ratio - a.z) / span;
            }
        }
        self.points[self.points.len() - 1].x
    }

    /// The face as a contour in the radius/axial plane.
    pub fn to_contour(&self, params: &WheelParams) -> Vec<Point3<Real>> {
        self.points
            .iter()
            .map(|p| Point3::new(params.radius_at(p.z), 0.0, p.x))
            .collect()
    }
}

/// Parametrized bounding body of the wheel: a solid of revolution between a
/// lower and an upper side face.
#[derive(Debug, Clone)]
pub struct Lens {
    params: WheelParams,
    lower: HeightModulation,
    upper: HeightModulation,
}

impl Lens {
    pub fn new(params: WheelParams, lower: HeightModulation, upper: HeightModulation) -> Self {
        Self {
            params,
            lower,
            upper,
        }
    }

    pub fn from_profile(
        params: WheelParams,
        profile: &ContourProfile,
        samples: usize,
    ) -> Result<Self, WheelError> {
        Ok(Self::new(
            params,
            profile.lower_curve(params.width, samples)?,
            profile.upper_curve(params.width, samples)?,
        ))
    }

    pub fn lower(&self) -> &HeightModulation {
        &self.lower
    }

    pub fn upper(&self) -> &HeightModulation {
        &self.upper
    }

    /// Point at height ratio `h` between the faces, length ratio `l` from the hub and
    /// polar angle `phi`.
    pub fn surface_point(&self, height_ratio: Real, length_ratio: Real, phi: Real) -> Point3<Real> {
        let lower = self.lower.offset_at(length_ratio);
        let upper = self.upper.offset_at(length_ratio);
        crate::polar::cyl_point(
            self.params.radius_at(length_ratio),
            phi,
            lower + height_ratio * (upper - lower),
        )
    }
}

/// Disjoint parts of the upper and lower contours.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContourSplit {
    /// Rim-aligned part of the upper contour, hub → outward.
    pub upper_height: Vec<Point3<Real>>,
    /// Tread-aligned points, upper contour first, then the lower contour walked back.
    pub outer_radius: Vec<Point3<Real>>,
    /// Rim-aligned part of the lower contour, hub → outward.
    pub lower_height: Vec<Point3<Real>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Alignment {
    Rim,
    Tread,
}

fn alignment(points: &[Point3<Real>], i: usize) -> Alignment {
    let prev = points[i.saturating_sub(1)];
    let next = points[(i + 1).min(points.len() - 1)];
    let t = next - prev;
    let tread = t.dot(&Vector3::z()).abs();
    let rim = t.dot(&Vector3::x()).abs();
    if tread > rim {
        Alignment::Tread
    } else {
        Alignment::Rim
    }
}

/// Splits the upper and lower contours into upper-height, outer-radius and
/// lower-height parts. Every input point ends up in exactly one part.
///
/// The upper contour is walked from the hub; once `min_rim_run` rim-aligned samples
/// have gone by, the next tread-aligned sample latches the walk into the outer part.
/// The lower contour is then walked backwards from its
/// tread end in the state the upper walk finished in, and may only fall back to the
/// rim once more than `min_tread_run` tread samples have been seen.
pub fn split_contour(
    upper: &[Point3<Real>],
    lower: &[Point3<Real>],
    settings: &ContourSettings,
) -> ContourSplit {
    let mut split = ContourSplit::default();

    let mut state = Alignment::Rim;
    let mut rim_run = 0;
    for (i, p) in upper.iter().enumerate() {
        if state == Alignment::Rim {
            match alignment(upper, i) {
                Alignment::Rim => rim_run += 1,
                Alignment::Tread if rim_run >= settings.min_rim_run => state = Alignment::Tread,
                Alignment::Tread => {},
            }
        }
        match state {
            Alignment::Tread => split.outer_radius.push(*p),
            Alignment::Rim => split.upper_height.push(*p),
        }
    }

    let mut tread_run = 0;
    let mut lower_rev = Vec::new();
    for i in (0..lower.len()).rev() {
        let local = alignment(lower, i);
        match state {
            Alignment::Tread if tread_run > settings.min_tread_run && local == Alignment::Rim => {
                state = Alignment::Rim;
            },
            // an upper walk that never latched may still pick up the tread here
            Alignment::Rim if lower_rev.is_empty() && local == Alignment::Tread => {
                state = Alignment::Tread;
            },
            _ => {},
        }
        match state {
            Alignment::Tread => {
                tread_run += 1;
                split.outer_radius.push(lower[i]);
            },
            Alignment::Rim => lower_rev.push(lower[i]),
        }
    }
    lower_rev.reverse();
    split.lower_height = lower_rev;

    debug!(
        "contour split: {} upper, {} outer, {} lower points",
        split.upper_height.len(),
        split.outer_radius.len(),
        split.lower_height.len()
    );
    split
}

fn spine(points: Vec<Point3<Real>>, samples: usize) -> Result<Frames, WheelError> {
    if points.len() < 2 {
        return Err(WheelError::DegenerateCurve {
            points: points.len(),
            length: 0.0,
        });
    }
    Frames::new(spline::reparametrize(&points, samples), FrameType::MinRotation)
}

/// Builds the four boundary spines of a wheel from its contour profile.
///
/// Upper and lower spines run hub → outward, inner and outer spines lower → upper,
/// and the spines share their corner points.
pub fn build_boundary_spines(
    params: &WheelParams,
    profile: &ContourProfile,
    settings: &ContourSettings,
) -> Result<BoundarySpines, WheelError> {
    params.validate()?;
    profile.validate()?;
    settings.validate()?;
    let samples = settings.samples;
    let lens = Lens::from_profile(*params, profile, samples)?;

    let upper = spline::reparametrize(&lens.upper().to_contour(params), samples);
    let lower = spline::reparametrize(&lens.lower().to_contour(params), samples);
    let split = split_contour(&upper, &lower, settings);

    let (Some(&upper_hub), Some(&upper_end)) =
        (split.upper_height.first(), split.upper_height.last())
    else {
        return Err(WheelError::DegenerateCurve {
            points: 0,
            length: 0.0,
        });
    };
    let (Some(&lower_hub), Some(&lower_end)) =
        (split.lower_height.first(), split.lower_height.last())
    else {
        return Err(WheelError::DegenerateCurve {
            points: 0,
            length: 0.0,
        });
    };

    // outer spine: lower corner → upper corner
    let mut outer = Vec::with_capacity(split.outer_radius.len() + 2);
    outer.push(lower_end);
    outer.extend(split.outer_radius.iter().rev().copied());
    outer.push(upper_end);

    let mut inner: Vec<Point3<Real>> = (0..samples)
        .map(|i| lens.surface_point(i as Real / (samples - 1) as Real, 0.0, 0.0))
        .collect();
    inner[0] = lower_hub;
    inner[samples - 1] = upper_hub;

    Ok(BoundarySpines {
        upper_height: spine(split.upper_height, samples)?,
        lower_height: spine(split.lower_height, samples)?,
        inner_radius: spine(inner, samples)?,
        outer_radius: spine(outer, samples)?,
    })
}
