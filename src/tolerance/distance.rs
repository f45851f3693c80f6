//! Euclidean distances between primitives and region boundaries.
//!
//! Distances to an empty segment or polygon are `+∞`, the infimum over an
//! empty set, so tolerance tests against them always fail.

use super::intersect_proper;
use crate::polygon::{Environment, Polygon, Region};
use crate::primitives::{LineSegment, Point2, Polyline, Ray2};
use num_traits::Float;

/// Euclidean distance between two geometric objects.
pub trait Distance<F, Rhs: ?Sized = Self> {
    /// Returns the smallest distance between a point of `self` and a point
    /// of `other`.
    fn distance_to(&self, other: &Rhs) -> F;
}

/// Distance between the boundaries of two objects.
pub trait BoundaryDistance<F, Rhs: ?Sized> {
    /// Returns the smallest distance between the boundary of `self` and the
    /// boundary of `other`.
    fn boundary_distance_to(&self, other: &Rhs) -> F;
}

/// Euclidean distance between `a` and `b`.
///
/// # Example
///
/// ```
/// use visum::primitives::{LineSegment, Point2};
/// use visum::tolerance::distance;
///
/// let s = LineSegment::new(Point2::new(0.0, 0.0), Point2::new(4.0, 0.0), 0.0);
/// assert_eq!(distance(&Point2::new(2.0, 3.0), &s), 3.0);
/// ```
#[inline]
pub fn distance<F, A, B>(a: &A, b: &B) -> F
where
    A: Distance<F, B> + ?Sized,
    B: ?Sized,
{
    a.distance_to(b)
}

/// Distance between the boundaries of `a` and `b`.
#[inline]
pub fn boundary_distance<F, A, B>(a: &A, b: &B) -> F
where
    A: BoundaryDistance<F, B> + ?Sized,
    B: ?Sized,
{
    a.boundary_distance_to(b)
}

impl<F: Float> Distance<F> for Point2<F> {
    #[inline]
    fn distance_to(&self, other: &Point2<F>) -> F {
        self.distance(*other)
    }
}

impl<F: Float> Distance<F, LineSegment<F>> for Point2<F> {
    #[inline]
    fn distance_to(&self, segment: &LineSegment<F>) -> F {
        self.projection_onto_segment(segment)
            .map_or(F::infinity(), |p| self.distance(p))
    }
}

impl<F: Float> Distance<F, Point2<F>> for LineSegment<F> {
    #[inline]
    fn distance_to(&self, point: &Point2<F>) -> F {
        point.distance_to(self)
    }
}

impl<F: Float> Distance<F, Ray2<F>> for Point2<F> {
    #[inline]
    fn distance_to(&self, ray: &Ray2<F>) -> F {
        ray.distance_to_point(*self)
    }
}

impl<F: Float> Distance<F, Point2<F>> for Ray2<F> {
    #[inline]
    fn distance_to(&self, point: &Point2<F>) -> F {
        self.distance_to_point(*point)
    }
}

impl<F: Float> Distance<F, Polyline<F>> for Point2<F> {
    #[inline]
    fn distance_to(&self, polyline: &Polyline<F>) -> F {
        self.projection_onto_polyline(polyline)
            .map_or(F::infinity(), |p| self.distance(p))
    }
}

impl<F: Float> Distance<F, Point2<F>> for Polyline<F> {
    #[inline]
    fn distance_to(&self, point: &Point2<F>) -> F {
        point.distance_to(self)
    }
}

impl<F: Float> Distance<F> for LineSegment<F> {
    /// Zero for a proper crossing, otherwise the smallest distance from an
    /// endpoint of one segment to the other segment.
    fn distance_to(&self, other: &LineSegment<F>) -> F {
        let (Some((a, b)), Some((c, d))) = (self.endpoints(), other.endpoints()) else {
            return F::infinity();
        };
        if intersect_proper(self, other, F::zero()) {
            return F::zero();
        }
        a.distance_to(other)
            .min(b.distance_to(other))
            .min(c.distance_to(self))
            .min(d.distance_to(self))
    }
}

impl<F: Float, R: Region<F>> BoundaryDistance<F, R> for Point2<F> {
    fn boundary_distance_to(&self, region: &R) -> F {
        region
            .rings()
            .iter()
            .flat_map(|ring| ring.edges())
            .fold(F::infinity(), |min, edge| min.min(self.distance_to(&edge)))
    }
}

impl<F: Float> BoundaryDistance<F, Point2<F>> for Polygon<F> {
    #[inline]
    fn boundary_distance_to(&self, point: &Point2<F>) -> F {
        point.boundary_distance_to(self)
    }
}

impl<F: Float> BoundaryDistance<F, Point2<F>> for Environment<F> {
    #[inline]
    fn boundary_distance_to(&self, point: &Point2<F>) -> F {
        point.boundary_distance_to(self)
    }
}

impl<F: Float> BoundaryDistance<F, Polygon<F>> for LineSegment<F> {
    fn boundary_distance_to(&self, polygon: &Polygon<F>) -> F {
        polygon
            .edges()
            .fold(F::infinity(), |min, edge| min.min(self.distance_to(&edge)))
    }
}

impl<F: Float> BoundaryDistance<F, LineSegment<F>> for Polygon<F> {
    #[inline]
    fn boundary_distance_to(&self, segment: &LineSegment<F>) -> F {
        segment.boundary_distance_to(self)
    }
}

impl<F: Float> BoundaryDistance<F, Polygon<F>> for Polygon<F> {
    /// Minimum over all pairs of edges.
    fn boundary_distance_to(&self, other: &Polygon<F>) -> F {
        self.edges()
            .fold(F::infinity(), |min, edge| min.min(edge.boundary_distance_to(other)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::Angle;
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64) -> Point2<f64> {
        Point2::new(x, y)
    }

    fn square(x0: f64, y0: f64, side: f64) -> Polygon<f64> {
        Polygon::new(vec![
            p(x0, y0),
            p(x0 + side, y0),
            p(x0 + side, y0 + side),
            p(x0, y0 + side),
        ])
    }

    #[test]
    fn test_point_segment_distance() {
        let s = LineSegment::new(p(0.0, 0.0), p(4.0, 0.0), 0.0);
        assert_relative_eq!(distance(&p(2.0, 3.0), &s), 3.0);
        assert_relative_eq!(distance(&s, &p(7.0, 4.0)), 5.0);
        assert_eq!(distance(&p(0.0, 0.0), &LineSegment::empty()), f64::INFINITY);
    }

    #[test]
    fn test_degenerate_segment_distance() {
        let a = LineSegment::from_point(p(1.0, 1.0));
        let b = LineSegment::new(p(0.0, 0.0), p(3.0, 0.0), 0.0);
        assert_relative_eq!(distance(&a, &b), 1.0);
        assert_relative_eq!(distance(&b, &a), 1.0);
    }

    #[test]
    fn test_segment_segment_distance() {
        let a = LineSegment::new(p(0.0, 0.0), p(2.0, 2.0), 0.0);
        let b = LineSegment::new(p(0.0, 2.0), p(2.0, 0.0), 0.0);
        assert_eq!(distance(&a, &b), 0.0);

        let c = LineSegment::new(p(0.0, 3.0), p(2.0, 3.0), 0.0);
        assert_relative_eq!(distance(&a, &c), 1.0);
    }

    #[test]
    fn test_point_ray_distance() {
        let ray = Ray2::new(p(0.0, 0.0), Angle::zero());
        assert_relative_eq!(distance(&p(3.0, -2.0), &ray), 2.0, epsilon = 1e-12);
        assert_relative_eq!(distance(&ray, &p(-3.0, 4.0)), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_point_polyline_distance() {
        let line = Polyline::new(vec![p(0.0, 0.0), p(2.0, 0.0), p(2.0, 2.0)]);
        assert_relative_eq!(distance(&p(3.0, 1.0), &line), 1.0);
        assert_eq!(distance(&p(3.0, 1.0), &Polyline::default()), f64::INFINITY);
    }

    #[test]
    fn test_point_boundary_distance() {
        let sq = square(0.0, 0.0, 10.0);
        assert_relative_eq!(boundary_distance(&p(5.0, 4.0), &sq), 4.0);
        assert_relative_eq!(boundary_distance(&sq, &p(-1.0, 5.0)), 1.0);
    }

    #[test]
    fn test_polygon_boundary_distance() {
        let outer = square(0.0, 0.0, 10.0);
        let inner = square(4.0, 4.0, 2.0);
        assert_relative_eq!(boundary_distance(&outer, &inner), 4.0);
        assert_relative_eq!(boundary_distance(&inner, &outer), 4.0);

        let edge = LineSegment::new(p(5.0, 7.0), p(5.0, 9.0), 0.0);
        assert_relative_eq!(boundary_distance(&edge, &inner), 1.0);
    }

    #[test]
    fn test_environment_boundary_distance() {
        let env = Environment::with_holes(
            square(0.0, 0.0, 10.0),
            vec![square(4.0, 4.0, 2.0).reversed()],
        );
        assert_relative_eq!(boundary_distance(&p(3.0, 5.0), &env), 1.0);
        assert_relative_eq!(boundary_distance(&env, &p(1.0, 5.0)), 1.0);
    }
}
