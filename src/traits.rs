use crate::float_types::Real;
use crate::float_types::parry3d::bounding_volume::Aabb;
use nalgebra::Point3;

/// Anything that carries a point of one space into another.
///
/// Closures of the form `|p: Point3<Real>| -> Point3<Real>` implement it
/// through the blanket impl below.
pub trait CoordinateTransform {
    fn transform(&self, point: Point3<Real>) -> Point3<Real>;
}

impl<F> CoordinateTransform for F
where
    F: Fn(Point3<Real>) -> Point3<Real>,
{
    #[inline]
    fn transform(&self, point: Point3<Real>) -> Point3<Real> {
        self(point)
    }
}

/// Leaves every point where it is.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl CoordinateTransform for Identity {
    #[inline]
    fn transform(&self, point: Point3<Real>) -> Point3<Real> {
        point
    }
}

/// Boolean operations + transformations on solids
pub trait SolidOps: Sized + Clone {
    fn union(&self, other: &Self) -> Self;
    fn difference(&self, other: &Self) -> Self;
    fn intersection(&self, other: &Self) -> Self;

    /// Carries the whole solid through an arbitrary (possibly non-linear) transform.
    fn mapped<T: CoordinateTransform + ?Sized>(&self, transform: &T) -> Self;

    /// `None` for an empty solid.
    fn bounding_box(&self) -> Option<Aabb>;
    fn volume(&self) -> Real;
    fn is_empty(&self) -> bool;

    /// Unions every solid of `others` into `self`.
    fn union_all<I>(self, others: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        others
            .into_iter()
            .fold(self, |acc, solid| acc.union(&solid))
    }
}
