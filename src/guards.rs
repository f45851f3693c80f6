//! Named point sets for batch visibility queries.

use crate::bounds::BoundingBox;
use crate::polygon::{Environment, Polygon, Region};
use crate::primitives::{diameter, Point2};
use num_traits::Float;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::ops::Index;

/// An ordered set of observer positions.
///
/// # Example
///
/// ```
/// use visum::{Guards, Point2};
///
/// let mut guards = Guards::new(vec![Point2::new(3.0, 1.0), Point2::new(1.0, 2.0)]);
/// assert!(!guards.are_lex_ordered());
/// guards.enforce_lex_order();
/// assert_eq!(guards[0], Point2::new(1.0, 2.0));
/// assert!(guards.noncolocated(1e-9));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Guards<F> {
    /// Guard positions in order.
    pub positions: Vec<Point2<F>>,
}

impl<F: Float> Guards<F> {
    #[inline]
    pub fn new(positions: Vec<Point2<F>>) -> Self {
        Self { positions }
    }

    /// Number of guards.
    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Returns guard `i`, or `None` if out of range.
    #[inline]
    pub fn get(&self, i: usize) -> Option<Point2<F>> {
        self.positions.get(i).copied()
    }

    #[inline]
    pub fn push(&mut self, position: Point2<F>) {
        self.positions.push(position);
    }

    /// Iterates over the guard positions.
    pub fn iter(&self) -> impl Iterator<Item = Point2<F>> + '_ {
        self.positions.iter().copied()
    }

    /// Returns `true` if the positions are in nondecreasing lexicographic
    /// order. Unset positions break the order.
    pub fn are_lex_ordered(&self) -> bool {
        self.positions
            .windows(2)
            .all(|w| matches!(w[0].lex_cmp(w[1]), Some(Ordering::Less | Ordering::Equal)))
    }

    /// Returns `true` if no two guards are within `epsilon` of each other.
    pub fn noncolocated(&self, epsilon: F) -> bool {
        self.positions.iter().enumerate().all(|(i, a)| {
            self.positions[i + 1..]
                .iter()
                .all(|b| a.distance(*b) > epsilon)
        })
    }

    /// Returns `true` if every guard lies in `region`.
    pub fn all_in<R: Region<F> + ?Sized>(&self, region: &R, epsilon: F) -> bool {
        self.positions
            .iter()
            .all(|p| p.in_region(region, epsilon))
    }

    /// Returns `true` if every guard lies in `polygon`.
    #[inline]
    pub fn all_in_polygon(&self, polygon: &Polygon<F>, epsilon: F) -> bool {
        self.all_in(polygon, epsilon)
    }

    /// Returns `true` if every guard lies in `environment`.
    #[inline]
    pub fn all_in_environment(&self, environment: &Environment<F>, epsilon: F) -> bool {
        self.all_in(environment, epsilon)
    }

    /// Largest distance between two guards, `None` if there are none.
    pub fn diameter(&self) -> Option<F> {
        diameter(&self.positions)
    }

    pub fn bounding_box(&self) -> Option<BoundingBox<F>> {
        BoundingBox::from_points(self.iter())
    }

    /// Sorts the positions lexicographically. Unset positions keep their
    /// relative order.
    pub fn enforce_lex_order(&mut self) {
        self.positions
            .sort_by(|a, b| a.lex_cmp(*b).unwrap_or(Ordering::Equal));
    }

    pub fn reverse(&mut self) {
        self.positions.reverse();
    }

    /// Snaps every guard onto the nearest vertex of `region` within
    /// `epsilon`.
    pub fn snap_to_vertices_of<R: Region<F> + ?Sized>(&mut self, region: &R, epsilon: F) {
        for p in &mut self.positions {
            p.snap_to_vertices_of(region, epsilon);
        }
    }

    /// Snaps every guard onto the nearest boundary point of `region` within
    /// `epsilon`.
    pub fn snap_to_boundary_of<R: Region<F> + ?Sized>(&mut self, region: &R, epsilon: F) {
        for p in &mut self.positions {
            p.snap_to_boundary_of(region, epsilon);
        }
    }
}

impl<F> Index<usize> for Guards<F> {
    type Output = Point2<F>;

    #[inline]
    fn index(&self, i: usize) -> &Point2<F> {
        &self.positions[i]
    }
}

impl<F> FromIterator<Point2<F>> for Guards<F> {
    fn from_iter<I: IntoIterator<Item = Point2<F>>>(iter: I) -> Self {
        Self {
            positions: iter.into_iter().collect(),
        }
    }
}
