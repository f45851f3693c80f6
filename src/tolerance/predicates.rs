//! Geometric predicates and segment intersection with explicit tolerance.
//!
//! Every epsilon-tolerant intersection decision in the crate goes through
//! [`intersect`], [`intersect_proper`] and [`intersection`].

use super::Distance;
use crate::primitives::{LineSegment, Point2, Ray2};
use num_traits::Float;

/// Result of an orientation test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Points are counter-clockwise (positive area).
    CounterClockwise,
    /// Points are clockwise (negative area).
    Clockwise,
    /// Points are collinear (within tolerance).
    Collinear,
}

/// Computes the orientation of three points with tolerance.
///
/// `eps` is compared against the absolute value of the cross product of
/// `b - a` and `c - a` (twice the signed triangle area).
#[inline]
pub fn orient2d<F: Float>(a: Point2<F>, b: Point2<F>, c: Point2<F>, eps: F) -> Orientation {
    let cross = (b - a).cross(c - a);
    if cross > eps {
        Orientation::CounterClockwise
    } else if cross < -eps {
        Orientation::Clockwise
    } else {
        Orientation::Collinear
    }
}

/// Returns `true` if two nonempty segments come within `epsilon` of each
/// other.
pub fn intersect<F: Float>(s1: &LineSegment<F>, s2: &LineSegment<F>, epsilon: F) -> bool {
    if s1.is_empty() || s2.is_empty() {
        return false;
    }
    s1.distance_to(s2) <= epsilon
}

/// Returns `true` if the segments cross at a single point that is farther
/// than `epsilon` from all four endpoints.
///
/// Touching, overlapping and near-miss configurations are not proper.
pub fn intersect_proper<F: Float>(s1: &LineSegment<F>, s2: &LineSegment<F>, epsilon: F) -> bool {
    let (Some((a, b)), Some((c, d))) = (s1.endpoints(), s2.endpoints()) else {
        return false;
    };

    let nearest_endpoint = a
        .distance_to(s2)
        .min(b.distance_to(s2))
        .min(c.distance_to(s1))
        .min(d.distance_to(s1));
    if nearest_endpoint <= epsilon {
        return false;
    }

    // Both pairs of endpoints straddle the other segment's line.
    (b - a).cross(c - b) * (b - a).cross(d - b) < F::zero()
        && (d - c).cross(b - d) * (d - c).cross(a - d) < F::zero()
}

/// Computes the intersection of two segments under `epsilon` tolerance.
///
/// The result is empty if the segments are farther apart than `epsilon`,
/// a single point for a crossing or a touch, and a proper segment when they
/// overlap along a stretch longer than `epsilon`.
///
/// # Example
///
/// ```
/// use visum::primitives::{LineSegment, Point2};
/// use visum::tolerance::intersection;
///
/// let a = LineSegment::new(Point2::new(0.0, 0.0), Point2::new(2.0, 2.0), 0.0);
/// let b = LineSegment::new(Point2::new(0.0, 2.0), Point2::new(2.0, 0.0), 0.0);
/// let x: LineSegment<f64> = intersection(&a, &b, 1e-9);
/// assert_eq!(x.len(), 1);
/// let p = x.first().unwrap();
/// assert!((p.x - 1.0).abs() < 1e-12 && (p.y - 1.0).abs() < 1e-12);
/// ```
pub fn intersection<F: Float>(
    s1: &LineSegment<F>,
    s2: &LineSegment<F>,
    epsilon: F,
) -> LineSegment<F> {
    let mut result = LineSegment::empty();
    if !intersect(s1, s2, epsilon) {
        return result;
    }
    let (Some((a, b)), Some((c, d))) = (s1.endpoints(), s2.endpoints()) else {
        return result;
    };

    if intersect_proper(s1, s2, epsilon) {
        let denom = a.x * (d.y - c.y) + b.x * (c.y - d.y) + d.x * (b.y - a.y) + c.x * (a.y - b.y);
        let s = (a.x * (d.y - c.y) + c.x * (a.y - d.y) + d.x * (c.y - a.y)) / denom;
        result.set_first(a + (b - a) * s, F::zero());
        return result;
    }

    let near_a = a.distance_to(s2) <= epsilon;
    let near_b = b.distance_to(s2) <= epsilon;
    let near_c = c.distance_to(s1) <= epsilon;
    let near_d = d.distance_to(s1) <= epsilon;

    // Overlaps, in priority order.
    let pair = if near_a && near_b {
        Some((a, b))
    } else if near_c && near_d {
        Some((c, d))
    } else if near_a && near_c {
        Some((a, c))
    } else if near_a && near_d {
        Some((a, d))
    } else if near_b && near_c {
        Some((b, c))
    } else if near_b && near_d {
        Some((b, d))
    } else {
        None
    };
    if let Some((first, second)) = pair {
        result.set_first(first, epsilon);
        result.set_second(second, epsilon);
        return result;
    }

    // Single touching endpoint.
    let touching = [(near_a, a), (near_b, b), (near_c, c), (near_d, d)]
        .into_iter()
        .find_map(|(near, p)| near.then_some(p));
    if let Some(p) = touching {
        result.set_first(p, epsilon);
    }
    result
}

/// Computes the intersection of a ray with a segment under `epsilon`
/// tolerance.
///
/// When the result is a proper segment its first endpoint is the one
/// nearer the ray's base.
pub fn ray_intersection<F: Float>(
    ray: &Ray2<F>,
    segment: &LineSegment<F>,
    epsilon: F,
) -> LineSegment<F> {
    if segment.is_empty() {
        return LineSegment::empty();
    }
    // A finite stand-in for the ray that reaches past the whole segment.
    let reach = ray.origin.distance_to(segment) + segment.length();
    let stand_in = LineSegment::new(ray.origin, ray.point_at(reach), F::zero());
    let mut result = intersection(segment, &stand_in, epsilon);
    if let LineSegment::Proper(first, second) = result {
        if first.distance(ray.origin) > second.distance(ray.origin) {
            result.reverse();
        }
    }
    result
}
