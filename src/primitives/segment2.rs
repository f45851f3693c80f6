//! Tri-state 2D line segment.

use super::Point2;
use crate::tolerance;
use num_traits::Float;

/// A line segment that may be empty, a single point, or a proper segment.
///
/// Intersections of segments produce all three states, so the type carries
/// them directly instead of an endpoint count.
///
/// # Example
///
/// ```
/// use visum::primitives::{LineSegment, Point2};
///
/// let s: LineSegment<f64> = LineSegment::new(Point2::new(0.0, 0.0), Point2::new(1e-12, 0.0), 1e-9);
/// assert_eq!(s.len(), 1);
/// assert_eq!(s.first(), Some(Point2::new(0.0, 0.0)));
/// ```
#[derive(Debug, Clone, Copy)]
pub enum LineSegment<F> {
    /// No points.
    Empty,
    /// A single point, both endpoints coincide.
    Degenerate(Point2<F>),
    /// Two distinct endpoints.
    Proper(Point2<F>, Point2<F>),
}

impl<F: Float> LineSegment<F> {
    /// Creates the segment from `first` to `second`, collapsing to a single
    /// point (at `first`) when they are within `epsilon`.
    #[inline]
    pub fn new(first: Point2<F>, second: Point2<F>, epsilon: F) -> Self {
        if first.distance(second) <= epsilon {
            Self::Degenerate(first)
        } else {
            Self::Proper(first, second)
        }
    }

    /// Creates the empty segment.
    #[inline]
    pub fn empty() -> Self {
        Self::Empty
    }

    /// Creates a single-point segment.
    #[inline]
    pub fn from_point(point: Point2<F>) -> Self {
        Self::Degenerate(point)
    }

    /// Number of distinct endpoints: 0, 1 or 2.
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Degenerate(_) => 1,
            Self::Proper(..) => 2,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// First endpoint, or `None` if empty.
    #[inline]
    pub fn first(&self) -> Option<Point2<F>> {
        self.endpoints().map(|(first, _)| first)
    }

    /// Second endpoint (equal to the first for a single point).
    #[inline]
    pub fn second(&self) -> Option<Point2<F>> {
        self.endpoints().map(|(_, second)| second)
    }

    /// Both endpoints; a single point is returned twice.
    #[inline]
    pub fn endpoints(&self) -> Option<(Point2<F>, Point2<F>)> {
        match *self {
            Self::Empty => None,
            Self::Degenerate(p) => Some((p, p)),
            Self::Proper(a, b) => Some((a, b)),
        }
    }

    /// Midpoint, or `None` if empty.
    #[inline]
    pub fn midpoint(&self) -> Option<Point2<F>> {
        self.endpoints().map(|(a, b)| a.midpoint(b))
    }

    /// Length; zero for empty and single-point segments.
    #[inline]
    pub fn length(&self) -> F {
        self.endpoints()
            .map_or(F::zero(), |(a, b)| a.distance(b))
    }

    /// Replaces the first endpoint. If it lands within `epsilon` of the
    /// second endpoint the segment collapses to the new point.
    pub fn set_first(&mut self, point: Point2<F>, epsilon: F) {
        *self = match *self {
            Self::Empty => Self::Degenerate(point),
            Self::Degenerate(q) | Self::Proper(_, q) => {
                if point.distance(q) <= epsilon {
                    Self::Degenerate(point)
                } else {
                    Self::Proper(point, q)
                }
            }
        };
    }

    /// Replaces the second endpoint. If it lands within `epsilon` of the
    /// first endpoint the segment collapses to the new point.
    pub fn set_second(&mut self, point: Point2<F>, epsilon: F) {
        *self = match *self {
            Self::Empty => Self::Degenerate(point),
            Self::Degenerate(q) | Self::Proper(q, _) => {
                if point.distance(q) <= epsilon {
                    Self::Degenerate(point)
                } else {
                    Self::Proper(q, point)
                }
            }
        };
    }

    /// Swaps the endpoints in place.
    #[inline]
    pub fn reverse(&mut self) {
        if let Self::Proper(a, b) = *self {
            *self = Self::Proper(b, a);
        }
    }

    /// Returns the segment with endpoints swapped.
    #[inline]
    pub fn reversed(mut self) -> Self {
        self.reverse();
        self
    }

    /// Returns `true` if the first endpoint is lexicographically no greater
    /// than the second.
    pub fn is_in_standard_form(&self) -> bool {
        match *self {
            Self::Proper(a, b) => a <= b,
            _ => true,
        }
    }

    /// Orders the endpoints lexicographically.
    pub fn enforce_standard_form(&mut self) {
        if let Self::Proper(a, b) = *self {
            if a > b {
                self.reverse();
            }
        }
    }

    /// Empties the segment.
    #[inline]
    pub fn clear(&mut self) {
        *self = Self::Empty;
    }

    /// Returns `true` if the segments come within `epsilon` of each other.
    #[inline]
    pub fn intersect(&self, other: &Self, epsilon: F) -> bool {
        tolerance::intersect(self, other, epsilon)
    }

    /// Returns `true` if the segments cross at a single interior point.
    #[inline]
    pub fn intersect_proper(&self, other: &Self, epsilon: F) -> bool {
        tolerance::intersect_proper(self, other, epsilon)
    }

    /// Returns the (tolerant) intersection of two segments.
    #[inline]
    pub fn intersection(&self, other: &Self, epsilon: F) -> Self {
        tolerance::intersection(self, other, epsilon)
    }
}

/// Returns `true` if the segments have the same state and endpoints within
/// `epsilon`, in either order.
pub fn equivalent<F: Float>(a: &LineSegment<F>, b: &LineSegment<F>, epsilon: F) -> bool {
    if a.len() != b.len() {
        return false;
    }
    match (a.endpoints(), b.endpoints()) {
        (Some((a1, a2)), Some((b1, b2))) => {
            (a1.distance(b1) <= epsilon && a2.distance(b2) <= epsilon)
                || (a1.distance(b2) <= epsilon && a2.distance(b1) <= epsilon)
        }
        _ => false,
    }
}

/// Exact endpoint equality. Empty segments never compare equal.
impl<F: Float> PartialEq for LineSegment<F> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Degenerate(a), Self::Degenerate(b)) => a == b,
            (Self::Proper(a1, a2), Self::Proper(b1, b2)) => a1 == b1 && a2 == b2,
            _ => false,
        }
    }
}

impl<F: Float> From<(Point2<F>, Point2<F>)> for LineSegment<F> {
    fn from((first, second): (Point2<F>, Point2<F>)) -> Self {
        Self::new(first, second, F::zero())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64) -> Point2<f64> {
        Point2::new(x, y)
    }

    #[test]
    fn test_collapse_within_epsilon() {
        let s = LineSegment::new(p(0.0, 0.0), p(0.0, 1e-10), 1e-9);
        assert_eq!(s, LineSegment::Degenerate(p(0.0, 0.0)));
        assert_eq!(s.second(), Some(p(0.0, 0.0)));

        let s = LineSegment::new(p(0.0, 0.0), p(0.0, 1.0), 1e-9);
        assert_eq!(s.len(), 2);
        assert_relative_eq!(s.length(), 1.0);
    }

    #[test]
    fn test_empty() {
        let s: LineSegment<f64> = LineSegment::empty();
        assert!(s.is_empty());
        assert_eq!(s.first(), None);
        assert_eq!(s.length(), 0.0);
        assert_ne!(s, s);
    }

    #[test]
    fn test_set_first_merges() {
        let mut s = LineSegment::new(p(0.0, 0.0), p(1.0, 0.0), 0.0);
        s.set_first(p(1.0, 1e-12), 1e-9);
        assert_eq!(s, LineSegment::Degenerate(p(1.0, 1e-12)));

        s.set_first(p(-1.0, 0.0), 1e-9);
        assert_eq!(s, LineSegment::Proper(p(-1.0, 0.0), p(1.0, 1e-12)));

        let mut e = LineSegment::empty();
        e.set_first(p(2.0, 2.0), 1e-9);
        assert_eq!(e, LineSegment::Degenerate(p(2.0, 2.0)));
    }

    #[test]
    fn test_set_second_merges() {
        let mut s = LineSegment::from_point(p(0.0, 0.0));
        s.set_second(p(3.0, 0.0), 1e-9);
        assert_eq!(s, LineSegment::Proper(p(0.0, 0.0), p(3.0, 0.0)));
        s.set_second(p(1e-12, 0.0), 1e-9);
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn test_standard_form() {
        let mut s = LineSegment::new(p(2.0, 0.0), p(1.0, 5.0), 0.0);
        assert!(!s.is_in_standard_form());
        s.enforce_standard_form();
        assert_eq!(s.first(), Some(p(1.0, 5.0)));
        assert!(s.is_in_standard_form());
    }

    #[test]
    fn test_equivalent() {
        let a = LineSegment::new(p(0.0, 0.0), p(1.0, 1.0), 0.0);
        let b = LineSegment::new(p(1.0, 1.0 + 1e-12), p(0.0, 0.0), 0.0);
        assert!(equivalent(&a, &b, 1e-9));
        assert!(!equivalent(&a, &b, 0.0));
        assert!(!equivalent(&a, &LineSegment::from_point(p(0.0, 0.0)), 1.0));
    }
}
