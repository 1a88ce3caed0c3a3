//! Spines: poly-lines with arc-length parametrization and an orthonormal frame per point.

use crate::errors::WheelError;
use crate::float_types::{Real, TOLERANCE};
use crate::spline;
use nalgebra::{Point3, Vector3};

const FRAME_EPSILON: Real = 1e-12;

/// How the normal of each frame is chosen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameType {
    /// Rotation-minimizing frames (double reflection); the normal does not twist
    /// around the tangent from one sample to the next.
    MinRotation,
    /// The normal is the component of a fixed up vector orthogonal to the tangent.
    Up(Vector3<Real>),
}

/// Orthonormal frame attached to one point of a spine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalFrame {
    pub position: Point3<Real>,
    pub tangent: Vector3<Real>,
    pub normal: Vector3<Real>,
    pub binormal: Vector3<Real>,
}

impl LocalFrame {
    /// Unit vector orthogonal to the tangent that points away from the Z axis,
    /// taken in the plane spanned by the tangent and the radial direction.
    ///
    /// For spines lying in a half plane through the axis this is the in-plane
    /// normal flipped to the outside. A tangent that is itself radial falls back
    /// to the frame normal.
    pub fn outward_normal(&self) -> Vector3<Real> {
        let radial = crate::polar::planar_dir(&self.position);
        orthogonalize(radial, &self.tangent).unwrap_or(self.normal)
    }
}

/// An immutable spine.
///
/// `t` in [`point_at`](Frames::point_at) and [`frame_at`](Frames::frame_at) is the
/// fraction of total arc length, clamped to `[0, 1]`.
#[derive(Debug, Clone)]
pub struct Frames {
    points: Vec<Point3<Real>>,
    lengths: Vec<Real>,
    frames: Vec<LocalFrame>,
}

impl Frames {
    pub fn new(points: Vec<Point3<Real>>, frame_type: FrameType) -> Result<Self, WheelError> {
        let lengths = spline::cumulative_lengths(&points);
        let total = lengths.last().copied().unwrap_or(0.0);
        if points.len() < 2 || total <= TOLERANCE {
            return Err(WheelError::DegenerateCurve {
                points: points.len(),
                length: total,
            });
        }
        if let FrameType::Up(up) = frame_type {
            if up.norm_squared() < FRAME_EPSILON {
                return Err(WheelError::InvalidParameters(
                    "frame up vector must be non-zero".into(),
                ));
            }
        }

        let tangents = tangents(&points);
        let frames = match frame_type {
            FrameType::MinRotation => rotation_minimizing(&points, &tangents),
            FrameType::Up(up) => up_frames(&points, &tangents, up),
        };

        Ok(Self {
            points,
            lengths,
            frames,
        })
    }

    pub fn points(&self) -> &[Point3<Real>] {
        &self.points
    }

    /// Cumulative arc length at every point; non-decreasing, starting at `0`.
    pub fn arc_lengths(&self) -> &[Real] {
        &self.lengths
    }

    pub fn total_length(&self) -> Real {
        self.lengths[self.lengths.len() - 1]
    }

    pub fn frames(&self) -> &[LocalFrame] {
        &self.frames
    }

    pub fn first(&self) -> Point3<Real> {
        self.points[0]
    }

    pub fn last(&self) -> Point3<Real> {
        self.points[self.points.len() - 1]
    }

    /// Point at arc-length fraction `t`.
    pub fn point_at(&self, t: Real) -> Point3<Real> {
        let t = t.clamp(0.0, 1.0);
        if t == 0.0 {
            return self.first();
        }
        if t == 1.0 {
            return self.last();
        }
        spline::point_at_length(&self.points, &self.lengths, t * self.total_length())
    }

    /// Frame at arc-length fraction `t`, interpolated between the bracketing frames
    /// and re-orthonormalized.
    pub fn frame_at(&self, t: Real) -> LocalFrame {
        let t = t.clamp(0.0, 1.0);
        let last = self.points.len() - 1;
        let target = t * self.total_length();
        let upper = self
            .lengths
            .partition_point(|&l| l <= target)
            .clamp(1, last);
        let lower = upper - 1;
        let span = self.lengths[upper] - self.lengths[lower];
        let s = if span <= Real::EPSILON {
            1.0
        } else {
            ((target - self.lengths[lower]) / span).clamp(0.0, 1.0)
        };
        let (a, b) = (&self.frames[lower], &self.frames[upper]);

        let tangent = a.tangent.lerp(&b.tangent, s);
        let tangent = if tangent.norm_squared() < FRAME_EPSILON {
            b.tangent
        } else {
            tangent.normalize()
        };
        let normal = orthogonalize(a.normal.lerp(&b.normal, s), &tangent)
            .unwrap_or_else(|| any_perpendicular(&tangent));

        LocalFrame {
            position: self.point_at(t),
            tangent,
            normal,
            binormal: tangent.cross(&normal),
        }
    }
}

// Unit tangents; central differences inside, one-sided at the ends. Repeated points
// borrow the direction of the closest distinct neighbour.
fn tangents(points: &[Point3<Real>]) -> Vec<Vector3<Real>> {
    let n = points.len();
    let mut out: Vec<Option<Vector3<Real>>> = (0..n)
        .map(|i| {
            let prev = points[i.saturating_sub(1)];
            let next = points[(i + 1).min(n - 1)];
            let dir = next - prev;
            (dir.norm_squared() > FRAME_EPSILON).then(|| dir.normalize())
        })
        .collect();

    // forward then backward fill for stalled samples
    let mut carry = None;
    for t in out.iter_mut() {
        match t {
            Some(v) => carry = Some(*v),
            None => *t = carry,
        }
    }
    carry = None;
    for t in out.iter_mut().rev() {
        match t {
            Some(v) => carry = Some(*v),
            None => *t = carry,
        }
    }
    out.into_iter()
        .map(|t| t.unwrap_or_else(Vector3::x))
        .collect()
}

fn orthogonalize(v: Vector3<Real>, tangent: &Vector3<Real>) -> Option<Vector3<Real>> {
    let proj = v - tangent * tangent.dot(&v);
    (proj.norm_squared() > FRAME_EPSILON).then(|| proj.normalize())
}

fn any_perpendicular(tangent: &Vector3<Real>) -> Vector3<Real> {
    let reference = if tangent.x.abs() > 0.9 {
        Vector3::z()
    } else {
        Vector3::x()
    };
    orthogonalize(reference, tangent).unwrap_or_else(Vector3::y)
}

fn rotation_minimizing(points: &[Point3<Real>], tangents: &[Vector3<Real>]) -> Vec<LocalFrame> {
    let mut frames = Vec::with_capacity(points.len());
    let mut normal = any_perpendicular(&tangents[0]);
    frames.push(LocalFrame {
        position: points[0],
        tangent: tangents[0],
        normal,
        binormal: tangents[0].cross(&normal),
    });

    for i in 1..points.len() {
        let (t0, t1) = (tangents[i - 1], tangents[i]);

        // reflect across the bisector plane of the segment
        let v1 = points[i] - points[i - 1];
        let c1 = v1.norm_squared();
        let (r_l, t_l) = if c1 > FRAME_EPSILON {
            (
                normal - v1 * (2.0 / c1 * v1.dot(&normal)),
                t0 - v1 * (2.0 / c1 * v1.dot(&t0)),
            )
        } else {
            (normal, t0)
        };

        // second reflection lines the reflected tangent up with the next one
        let v2 = t1 - t_l;
        let c2 = v2.norm_squared();
        let r = if c2 > FRAME_EPSILON {
            r_l - v2 * (2.0 / c2 * v2.dot(&r_l))
        } else {
            r_l
        };

        normal = orthogonalize(r, &t1).unwrap_or_else(|| any_perpendicular(&t1));
        frames.push(LocalFrame {
            position: points[i],
            tangent: t1,
            normal,
            binormal: t1.cross(&normal),
        });
    }
    frames
}

fn up_frames(
    points: &[Point3<Real>],
    tangents: &[Vector3<Real>],
    up: Vector3<Real>,
) -> Vec<LocalFrame> {
    let mut prev: Option<Vector3<Real>> = None;
    points
        .iter()
        .zip(tangents)
        .map(|(p, t)| {
            let normal = orthogonalize(up, t)
                .or_else(|| prev.and_then(|n| orthogonalize(n, t)))
                .unwrap_or_else(|| any_perpendicular(t));
            prev = Some(normal);
            LocalFrame {
                position: *p,
                tangent: *t,
                normal,
                binormal: t.cross(&normal),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn quarter_arc(n: usize) -> Vec<Point3<Real>> {
        (0..n)
            .map(|i| {
                let a = crate::float_types::FRAC_PI_2 * i as Real / (n - 1) as Real;
                Point3::new(10.0 * a.cos(), 0.0, 10.0 * a.sin())
            })
            .collect()
    }

    #[test]
    fn rejects_single_point_and_zero_length() {
        assert!(matches!(
            Frames::new(vec![Point3::origin()], FrameType::MinRotation),
            Err(WheelError::DegenerateCurve { points: 1, .. })
        ));
        assert!(matches!(
            Frames::new(vec![Point3::origin(); 4], FrameType::MinRotation),
            Err(WheelError::DegenerateCurve { points: 4, .. })
        ));
    }

    #[test]
    fn endpoints_are_exact() {
        let pts = quarter_arc(33);
        let frames = Frames::new(pts.clone(), FrameType::MinRotation).unwrap();
        assert_eq!(frames.point_at(0.0), pts[0]);
        assert_eq!(frames.point_at(1.0), pts[32]);
        assert_eq!(frames.point_at(-3.0), pts[0]);
        assert_eq!(frames.point_at(7.0), pts[32]);
    }

    #[test]
    fn planar_curve_keeps_normal_in_plane() {
        let frames = Frames::new(quarter_arc(50), FrameType::MinRotation).unwrap();
        for f in frames.frames() {
            assert!(f.normal.y.abs() < 1e-9, "normal left the XZ plane: {:?}", f.normal);
            assert_relative_eq!(f.binormal.y.abs(), 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn up_frames_follow_the_up_vector() {
        let pts = vec![Point3::origin(), Point3::new(5.0, 0.0, 0.0), Point3::new(9.0, 3.0, 0.0)];
        let frames = Frames::new(pts, FrameType::Up(Vector3::z())).unwrap();
        for f in frames.frames() {
            assert_relative_eq!(f.normal, Vector3::z(), epsilon = 1e-9);
        }
    }

    #[test]
    fn repeated_points_do_not_break_frames() {
        let pts = vec![
            Point3::origin(),
            Point3::origin(),
            Point3::new(0.0, 0.0, 4.0),
            Point3::new(0.0, 0.0, 4.0),
        ];
        let frames = Frames::new(pts, FrameType::MinRotation).unwrap();
        for f in frames.frames() {
            assert_relative_eq!(f.tangent, Vector3::z(), epsilon = 1e-9);
        }
        assert_relative_eq!(frames.point_at(0.5), Point3::new(0.0, 0.0, 2.0), epsilon = 1e-9);
    }
}
