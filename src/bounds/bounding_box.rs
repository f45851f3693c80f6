//! Axis-aligned bounding box.

use crate::primitives::Point2;
use num_traits::Float;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The smallest axis-aligned rectangle containing a set of points.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoundingBox<F> {
    pub x_min: F,
    pub x_max: F,
    pub y_min: F,
    pub y_max: F,
}

impl<F: Float> BoundingBox<F> {
    /// Creates a box containing a single point.
    #[inline]
    pub fn from_point(p: Point2<F>) -> Self {
        Self {
            x_min: p.x,
            x_max: p.x,
            y_min: p.y,
            y_max: p.y,
        }
    }

    /// Creates the box bounding an iterator of points.
    ///
    /// Returns `None` if the iterator is empty.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point2<F>>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        Some(iter.fold(Self::from_point(first), Self::expand_to_include))
    }

    /// Returns the box grown to include `p`.
    #[inline]
    pub fn expand_to_include(self, p: Point2<F>) -> Self {
        Self {
            x_min: self.x_min.min(p.x),
            x_max: self.x_max.max(p.x),
            y_min: self.y_min.min(p.y),
            y_max: self.y_max.max(p.y),
        }
    }

    /// Returns the smallest box containing both boxes.
    #[inline]
    pub fn union(self, other: Self) -> Self {
        Self {
            x_min: self.x_min.min(other.x_min),
            x_max: self.x_max.max(other.x_max),
            y_min: self.y_min.min(other.y_min),
            y_max: self.y_max.max(other.y_max),
        }
    }

    #[inline]
    pub fn width(self) -> F {
        self.x_max - self.x_min
    }

    #[inline]
    pub fn height(self) -> F {
        self.y_max - self.y_min
    }

    /// Returns `true` if `p` lies inside or on the box.
    #[inline]
    pub fn contains_point(self, p: Point2<F>) -> bool {
        p.x >= self.x_min && p.x <= self.x_max && p.y >= self.y_min && p.y <= self.y_max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points() {
        let bbox = BoundingBox::from_points(vec![
            Point2::new(1.0, 5.0),
            Point2::new(-2.0, 3.0),
            Point2::new(4.0, -1.0),
        ])
        .unwrap();
        assert_eq!(bbox.x_min, -2.0);
        assert_eq!(bbox.x_max, 4.0);
        assert_eq!(bbox.y_min, -1.0);
        assert_eq!(bbox.y_max, 5.0);
        assert_eq!(bbox.width(), 6.0);
        assert_eq!(bbox.height(), 6.0);
    }

    #[test]
    fn test_from_points_empty() {
        let bbox: Option<BoundingBox<f64>> = BoundingBox::from_points(Vec::new());
        assert!(bbox.is_none());
    }

    #[test]
    fn test_union_and_contains() {
        let a: BoundingBox<f64> = BoundingBox::from_point(Point2::new(0.0, 0.0));
        let b = BoundingBox::from_point(Point2::new(2.0, 3.0));
        let u = a.union(b);
        assert!(u.contains_point(Point2::new(1.0, 1.5)));
        assert!(u.contains_point(Point2::new(2.0, 3.0)));
        assert!(!u.contains_point(Point2::new(2.1, 1.0)));
    }
}
