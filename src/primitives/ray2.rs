//! 2D ray type.

use super::{Angle, Point2, Vec2};
use num_traits::Float;

/// A 2D ray: a base point and a bearing.
///
/// # Example
///
/// ```
/// use visum::primitives::{Angle, Point2, Ray2};
///
/// let ray: Ray2<f64> = Ray2::new(Point2::origin(), Angle::zero());
/// assert_eq!(ray.distance_to_point(Point2::new(5.0, 2.0)), 2.0);
/// assert_eq!(ray.distance_to_point(Point2::new(-3.0, 4.0)), 5.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray2<F> {
    /// Base point of the ray.
    pub origin: Point2<F>,
    /// Direction of travel.
    pub bearing: Angle<F>,
}

impl<F: Float> Ray2<F> {
    /// Creates a new ray from a base point and a bearing.
    #[inline]
    pub fn new(origin: Point2<F>, bearing: Angle<F>) -> Self {
        Self { origin, bearing }
    }

    /// Creates a ray from a base point through a target point.
    #[inline]
    pub fn from_points(origin: Point2<F>, through: Point2<F>) -> Self {
        Self {
            origin,
            bearing: (through - origin).bearing(),
        }
    }

    /// Unit direction vector.
    #[inline]
    pub fn direction(&self) -> Vec2<F> {
        Vec2::from_bearing(self.bearing)
    }

    /// Returns the point at distance `t` from the base along the ray.
    #[inline]
    pub fn point_at(&self, t: F) -> Point2<F> {
        self.origin + self.direction() * t
    }

    /// Returns the point of the ray closest to `point`.
    pub fn closest_point(&self, point: Point2<F>) -> Point2<F> {
        let t = (point - self.origin).dot(self.direction());
        // The ray only extends forward from its base.
        self.point_at(t.max(F::zero()))
    }

    /// Returns the distance from the ray to `point`.
    #[inline]
    pub fn distance_to_point(&self, point: Point2<F>) -> F {
        point.distance(self.closest_point(point))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_4;

    #[test]
    fn test_from_points() {
        let ray: Ray2<f64> = Ray2::from_points(Point2::new(1.0, 1.0), Point2::new(3.0, 3.0));
        assert_relative_eq!(ray.bearing.radians(), FRAC_PI_4, epsilon = 1e-12);
        let p = ray.point_at(2.0_f64.sqrt());
        assert_relative_eq!(p.x, 2.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_closest_point_behind_base() {
        let ray: Ray2<f64> = Ray2::new(Point2::new(1.0, 0.0), Angle::zero());
        assert_eq!(ray.closest_point(Point2::new(-4.0, 3.0)), Point2::new(1.0, 0.0));
        assert_relative_eq!(ray.distance_to_point(Point2::new(5.0, -2.0)), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_point_on_ray_has_zero_distance() {
        let ray: Ray2<f64> = Ray2::from_points(Point2::origin(), Point2::new(3.0, 4.0));
        assert_relative_eq!(ray.distance_to_point(Point2::new(6.0, 8.0)), 0.0, epsilon = 1e-12);
    }
}
