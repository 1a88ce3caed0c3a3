//! Poly-line helpers: smooth control-point splines, arc-length resampling and
//! the scalar shaping functions used by the generators.

use crate::errors::WheelError;
use crate::float_types::Real;
use nalgebra::Point3;
use truck_geometry::prelude::{BSplineCurve, KnotVec, ParametricCurve, Point3 as CurvePoint};

/// Clamped uniform B-spline over a control polygon.
///
/// The curve starts at the first control point and ends at the last one; interior
/// control points only pull on it. Quadratic by default.
#[derive(Debug, Clone)]
pub struct ControlPointSpline {
    curve: BSplineCurve<CurvePoint>,
    first: Point3<Real>,
    last: Point3<Real>,
}

impl ControlPointSpline {
    pub fn new(control: Vec<Point3<Real>>) -> Result<Self, WheelError> {
        Self::with_degree(control, 2)
    }

    /// The degree is clamped to `1..=control.len() - 1`.
    pub fn with_degree(control: Vec<Point3<Real>>, degree: usize) -> Result<Self, WheelError> {
        if control.len() < 2 {
            return Err(WheelError::DegenerateCurve {
                points: control.len(),
                length: 0.0,
            });
        }
        let (first, last) = (control[0], control[control.len() - 1]);
        let degree = degree.clamp(1, control.len() - 1);
        let knots = KnotVec::uniform_knot(degree, control.len() - degree);
        let curve = BSplineCurve::try_new(knots, control.iter().map(to_curve).collect())
            .map_err(|e| WheelError::InvalidParameters(format!("control polygon rejected: {e}")))?;
        Ok(Self { curve, first, last })
    }

    /// Evaluates the curve at `samples` (≥ 2) evenly spaced parameter values.
    /// First and last samples are exactly the first and last control points.
    pub fn points(&self, samples: usize) -> Vec<Point3<Real>> {
        let samples = samples.max(2);
        let mut pts: Vec<_> = (0..samples)
            .map(|s| from_curve(self.curve.subs(s as f64 / (samples - 1) as f64)))
            .collect();
        pts[0] = self.first;
        pts[samples - 1] = self.last;
        pts
    }
}

fn to_curve(p: &Point3<Real>) -> CurvePoint {
    CurvePoint::new(f64::from(p.x), f64::from(p.y), f64::from(p.z))
}

fn from_curve(p: CurvePoint) -> Point3<Real> {
    Point3::new(p.x as Real, p.y as Real, p.z as Real)
}

/// Sum of segment lengths of a poly-line.
pub fn total_length(points: &[Point3<Real>]) -> Real {
    points.windows(2).map(|w| (w[1] - w[0]).norm()).sum()
}

/// Cumulative arc length at every point, starting at `0`.
pub fn cumulative_lengths(points: &[Point3<Real>]) -> Vec<Real> {
    let mut acc = 0.0;
    let mut out = Vec::with_capacity(points.len());
    if let Some(first) = points.first() {
        out.push(0.0);
        let mut prev = *first;
        for p in &points[1..] {
            acc += (p - prev).norm();
            out.push(acc);
            prev = *p;
        }
    }
    out
}

/// Point at arc-length `target` along a poly-line with precomputed cumulative lengths.
pub(crate) fn point_at_length(
    points: &[Point3<Real>],
    lengths: &[Real],
    target: Real,
) -> Point3<Real> {
    let last = points.len() - 1;
    if target <= 0.0 {
        return points[0];
    }
    if target >= lengths[last] {
        return points[last];
    }
    // first index whose cumulative length exceeds target
    let upper = lengths.partition_point(|&l| l <= target).clamp(1, last);
    let lower = upper - 1;
    let span = lengths[upper] - lengths[lower];
    if span <= Real::EPSILON {
        return points[upper];
    }
    let t = (target - lengths[lower]) / span;
    points[lower] + (points[upper] - points[lower]) * t
}

/// Resamples a poly-line into `samples` points at equal arc-length intervals.
/// The first and last points are kept exactly.
pub fn reparametrize(points: &[Point3<Real>], samples: usize) -> Vec<Point3<Real>> {
    if points.len() < 2 || samples < 2 {
        return points.to_vec();
    }
    let lengths = cumulative_lengths(points);
    let total = lengths[lengths.len() - 1];
    let mut out: Vec<_> = (0..samples)
        .map(|i| point_at_length(points, &lengths, total * i as Real / (samples - 1) as Real))
        .collect();
    out[0] = points[0];
    out[samples - 1] = points[points.len() - 1];
    out
}

/// Resamples a poly-line so that consecutive points are about `spacing` apart.
pub fn resample_by_spacing(points: &[Point3<Real>], spacing: Real) -> Vec<Point3<Real>> {
    let total = total_length(points);
    if spacing <= 0.0 || total <= 0.0 {
        return points.to_vec();
    }
    let samples = ((total / spacing).ceil() as usize + 1).max(2);
    reparametrize(points, samples)
}

/// Superformula radius with `a = b = 1`:
/// `r(φ) = (|cos(mφ/4)|^n2 + |sin(mφ/4)|^n3)^(-1/n1)`.
pub fn supershape_radius(phi: Real, m: Real, n1: Real, n2: Real, n3: Real) -> Real {
    let t = m * phi * 0.25;
    let term1 = t.cos().abs().powf(n2);
    let term2 = t.sin().abs().powf(n3);
    (term1 + term2).powf(-1.0 / n1)
}

/// Logistic blend from `from` to `to` centred on `mid`; `width` sets how many units
/// the transition takes.
pub fn smooth_transition(from: Real, to: Real, x: Real, mid: Real, width: Real) -> Real {
    let width = width.abs().max(Real::EPSILON);
    let s = 1.0 / (1.0 + (-(x - mid) / width).exp());
    from + (to - from) * s
}
