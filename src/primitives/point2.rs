//! 2D point type.
//!
//! A point whose coordinates are NaN is "unset". Unset points compare
//! unequal to everything, including themselves, and are unordered.

use super::{LineSegment, Polyline, Ray2, Vec2};
use num_traits::Float;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::ops::{Add, Sub};

/// A 2D point in Cartesian coordinates.
///
/// Generic over floating-point types (`f32` or `f64`). Equality is exact
/// coordinate equality; use [`Point2::distance`] with an epsilon for
/// tolerant comparisons.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point2<F> {
    pub x: F,
    pub y: F,
}

impl<F: Float> Point2<F> {
    /// Creates a new point.
    #[inline]
    pub fn new(x: F, y: F) -> Self {
        Self { x, y }
    }

    /// Creates a point at the origin (0, 0).
    #[inline]
    pub fn origin() -> Self {
        Self {
            x: F::zero(),
            y: F::zero(),
        }
    }

    /// Creates an unset point (both coordinates NaN).
    #[inline]
    pub fn unset() -> Self {
        Self {
            x: F::nan(),
            y: F::nan(),
        }
    }

    /// Returns `true` if neither coordinate is NaN.
    #[inline]
    pub fn is_set(self) -> bool {
        !self.x.is_nan() && !self.y.is_nan()
    }

    /// Returns the squared Euclidean distance to another point.
    #[inline]
    pub fn distance_squared(self, other: Self) -> F {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Returns the Euclidean distance to another point.
    #[inline]
    pub fn distance(self, other: Self) -> F {
        self.distance_squared(other).sqrt()
    }

    /// Linearly interpolates between `self` and `other`.
    #[inline]
    pub fn lerp(self, other: Self, t: F) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }

    /// Returns the midpoint between `self` and `other`.
    #[inline]
    pub fn midpoint(self, other: Self) -> Self {
        let half = F::from(0.5).unwrap();
        self.lerp(other, half)
    }

    /// Returns the position vector of this point.
    #[inline]
    pub fn to_vec(self) -> Vec2<F> {
        Vec2::new(self.x, self.y)
    }

    /// Cross product of the position vectors of `self` and `other`.
    #[inline]
    pub fn cross(self, other: Self) -> F {
        self.x * other.y - self.y * other.x
    }

    /// Lexicographic comparison: x first, then y.
    ///
    /// Returns `None` if either point is unset.
    pub fn lex_cmp(self, other: Self) -> Option<Ordering> {
        if !self.is_set() || !other.is_set() {
            return None;
        }
        match self.x.partial_cmp(&other.x)? {
            Ordering::Equal => self.y.partial_cmp(&other.y),
            ord => Some(ord),
        }
    }

    /// Returns the point of `segment` closest to `self`.
    ///
    /// Returns `None` for an empty segment.
    pub fn projection_onto_segment(self, segment: &LineSegment<F>) -> Option<Self> {
        let (first, second) = segment.endpoints()?;
        if first == second {
            return Some(first);
        }
        // Parametrized from the second endpoint towards the first.
        let theta = ((second.x - self.x) * (second.x - first.x)
            + (second.y - self.y) * (second.y - first.y))
            / first.distance_squared(second);
        if theta >= F::zero() && theta <= F::one() {
            return Some(Self::new(
                theta * first.x + (F::one() - theta) * second.x,
                theta * first.y + (F::one() - theta) * second.y,
            ));
        }
        if self.distance(first) < self.distance(second) {
            Some(first)
        } else {
            Some(second)
        }
    }

    /// Returns the point of `ray` closest to `self`.
    #[inline]
    pub fn projection_onto_ray(self, ray: &Ray2<F>) -> Self {
        ray.closest_point(self)
    }

    /// Returns the point of `polyline` closest to `self`.
    ///
    /// Returns `None` for an empty polyline.
    pub fn projection_onto_polyline(self, polyline: &Polyline<F>) -> Option<Self> {
        match polyline.vertices.len() {
            0 => None,
            1 => Some(polyline.vertices[0]),
            _ => polyline
                .segments()
                .filter_map(|segment| self.projection_onto_segment(&segment))
                .min_by(|a, b| {
                    self.distance(*a)
                        .partial_cmp(&self.distance(*b))
                        .unwrap_or(Ordering::Equal)
                }),
        }
    }

    /// Returns `true` if `self` is within `epsilon` of `segment`.
    #[inline]
    pub fn in_segment(self, segment: &LineSegment<F>, epsilon: F) -> bool {
        match self.projection_onto_segment(segment) {
            Some(p) => self.distance(p) <= epsilon,
            None => false,
        }
    }

    /// Returns `true` if `self` lies on `segment` but farther than
    /// `epsilon` from both endpoints.
    pub fn in_relative_interior_of(self, segment: &LineSegment<F>, epsilon: F) -> bool {
        match segment.endpoints() {
            Some((first, second)) => {
                self.in_segment(segment, epsilon)
                    && self.distance(first) > epsilon
                    && self.distance(second) > epsilon
            }
            None => false,
        }
    }

    /// Returns `true` if `self` is within `epsilon` of either endpoint of
    /// `segment`.
    pub fn is_endpoint_of(self, segment: &LineSegment<F>, epsilon: F) -> bool {
        match segment.endpoints() {
            Some((first, second)) => {
                self.distance(first) <= epsilon || self.distance(second) <= epsilon
            }
            None => false,
        }
    }
}

impl<F: Float> PartialOrd for Point2<F> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.lex_cmp(*other)
    }
}

impl<F: Float> Sub for Point2<F> {
    type Output = Vec2<F>;

    #[inline]
    fn sub(self, other: Self) -> Vec2<F> {
        Vec2::new(self.x - other.x, self.y - other.y)
    }
}

impl<F: Float> Add<Vec2<F>> for Point2<F> {
    type Output = Self;

    #[inline]
    fn add(self, v: Vec2<F>) -> Self {
        Self::new(self.x + v.x, self.y + v.y)
    }
}

impl<F: Float> Sub<Vec2<F>> for Point2<F> {
    type Output = Self;

    #[inline]
    fn sub(self, v: Vec2<F>) -> Self {
        Self::new(self.x - v.x, self.y - v.y)
    }
}

impl<F: Float> From<(F, F)> for Point2<F> {
    #[inline]
    fn from((x, y): (F, F)) -> Self {
        Self::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_new() {
        let p: Point2<f64> = Point2::new(1.0, 2.0);
        assert_eq!(p.x, 1.0);
        assert_eq!(p.y, 2.0);
        assert!(p.is_set());
    }

    #[test]
    fn test_unset_is_never_equal() {
        let p: Point2<f64> = Point2::unset();
        assert!(!p.is_set());
        assert_ne!(p, p);
        assert_eq!(p.partial_cmp(&Point2::origin()), None);
        assert!(!(p < Point2::origin()));
    }

    #[test]
    fn test_lexicographic_order() {
        let a: Point2<f64> = Point2::new(0.0, 5.0);
        let b = Point2::new(1.0, 0.0);
        let c = Point2::new(1.0, 1.0);
        assert!(a < b);
        assert!(b < c);
        assert_eq!(c.lex_cmp(c), Some(Ordering::Equal));
    }

    #[test]
    fn test_distance() {
        let a: Point2<f64> = Point2::new(0.0, 0.0);
        let b = Point2::new(3.0, 4.0);
        assert_eq!(a.distance_squared(b), 25.0);
        assert_eq!(a.distance(b), 5.0);
    }

    #[test]
    fn test_vector_arithmetic() {
        let a: Point2<f64> = Point2::new(1.0, 2.0);
        let b = Point2::new(4.0, 6.0);
        let v = b - a;
        assert_eq!(v, Vec2::new(3.0, 4.0));
        assert_eq!(a + v, b);
        assert_eq!(b - v, a);
        assert_eq!(a.cross(b), 1.0 * 6.0 - 2.0 * 4.0);
    }

    #[test]
    fn test_projection_onto_segment_interior() {
        let s = LineSegment::new(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0), 0.0);
        let p: Point2<f64> = Point2::new(3.0, 4.0);
        let q = p.projection_onto_segment(&s).unwrap();
        assert_relative_eq!(q.x, 3.0, epsilon = 1e-12);
        assert_relative_eq!(q.y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_projection_onto_segment_clamps() {
        let s = LineSegment::new(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0), 0.0);
        let p: Point2<f64> = Point2::new(-3.0, 1.0);
        assert_eq!(p.projection_onto_segment(&s), Some(Point2::new(0.0, 0.0)));
        let p = Point2::new(12.0, -1.0);
        assert_eq!(p.projection_onto_segment(&s), Some(Point2::new(10.0, 0.0)));
        assert_eq!(p.projection_onto_segment(&LineSegment::empty()), None);
    }

    #[test]
    fn test_projection_onto_polyline() {
        let polyline = Polyline::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(4.0, 4.0),
        ]);
        let p: Point2<f64> = Point2::new(5.0, 2.0);
        let q = p.projection_onto_polyline(&polyline).unwrap();
        assert_relative_eq!(q.x, 4.0, epsilon = 1e-12);
        assert_relative_eq!(q.y, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_in_relative_interior() {
        let s = LineSegment::new(Point2::new(0.0, 0.0), Point2::new(2.0, 0.0), 0.0);
        let eps = 1e-9;
        assert!(Point2::new(1.0, 0.0).in_relative_interior_of(&s, eps));
        assert!(!Point2::new(0.0, 0.0).in_relative_interior_of(&s, eps));
        assert!(Point2::new(0.0, 0.0).in_segment(&s, eps));
        assert!(Point2::new(2.0, 1e-10).is_endpoint_of(&s, eps));
        assert!(!Point2::new(1.0, 0.1).in_segment(&s, eps));
    }
}
