//! Open polygonal chains.

use super::{LineSegment, Point2};
use crate::bounds::BoundingBox;
use crate::tolerance::Distance;
use num_traits::Float;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// An ordered sequence of vertices joined by straight segments.
///
/// Unlike a [`Polygon`](crate::polygon::Polygon) the chain is not closed.
/// Shortest paths are returned as polylines.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Polyline<F> {
    /// The vertices in path order.
    pub vertices: Vec<Point2<F>>,
}

impl<F: Float> Polyline<F> {
    /// Creates a polyline from vertices.
    #[inline]
    pub fn new(vertices: Vec<Point2<F>>) -> Self {
        Self { vertices }
    }

    /// Number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Appends a vertex.
    #[inline]
    pub fn push(&mut self, point: Point2<F>) {
        self.vertices.push(point);
    }

    /// Iterates over consecutive segments.
    pub fn segments(&self) -> impl Iterator<Item = LineSegment<F>> + '_ {
        self.vertices
            .windows(2)
            .map(|w| LineSegment::new(w[0], w[1], F::zero()))
    }

    /// Sum of segment lengths.
    pub fn length(&self) -> F {
        self.vertices
            .windows(2)
            .fold(F::zero(), |acc, w| acc + w[0].distance(w[1]))
    }

    /// Largest distance between any two vertices.
    ///
    /// Returns `None` for an empty polyline.
    pub fn diameter(&self) -> Option<F> {
        diameter(&self.vertices)
    }

    /// Axis-aligned bounds of the vertices.
    pub fn bounding_box(&self) -> Option<BoundingBox<F>> {
        BoundingBox::from_points(self.vertices.iter().copied())
    }

    /// Drops interior vertices lying within `epsilon` of the segment joining
    /// their kept neighbours. The first and last vertices are always kept.
    pub fn eliminate_redundant_vertices(&mut self, epsilon: F) {
        let n = self.vertices.len();
        if n < 3 {
            return;
        }
        let v = &self.vertices;
        let mut kept = Vec::with_capacity(n);
        kept.push(v[0]);

        let (mut first, mut second) = (0, 1);
        for third in 2..n {
            let chord = LineSegment::new(v[first], v[third], F::zero());
            if v[second].distance_to(&chord) > epsilon {
                kept.push(v[second]);
                first = second;
            }
            second = third;
        }
        kept.push(v[n - 1]);
        self.vertices = kept;
    }

    /// Reverses the vertex order.
    #[inline]
    pub fn reverse(&mut self) {
        self.vertices.reverse();
    }

    /// Appends all vertices of `other`.
    pub fn append(&mut self, other: &Self) {
        self.vertices.extend_from_slice(&other.vertices);
    }
}

/// Largest pairwise distance among `points`, `None` if there are none.
pub(crate) fn diameter<F: Float>(points: &[Point2<F>]) -> Option<F> {
    if points.is_empty() {
        return None;
    }
    let mut max = F::zero();
    for (i, a) in points.iter().enumerate() {
        for b in &points[i + 1..] {
            max = max.max(a.distance(*b));
        }
    }
    Some(max)
}

impl<F> Index<usize> for Polyline<F> {
    type Output = Point2<F>;

    #[inline]
    fn index(&self, i: usize) -> &Point2<F> {
        &self.vertices[i]
    }
}

impl<F: Float> FromIterator<Point2<F>> for Polyline<F> {
    fn from_iter<I: IntoIterator<Item = Point2<F>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
