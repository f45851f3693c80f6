//! Core polygon type and basic operations.

use super::Region;
use crate::bounds::BoundingBox;
use crate::primitives::{diameter, LineSegment, Point2};
use crate::tolerance::{orient2d, BoundaryDistance, Distance, Orientation};
use num_traits::Float;
use rand::Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// A simple polygon represented as a sequence of vertices.
///
/// The polygon is implicitly closed. Indexing wraps around, so `poly[n]`
/// is `poly[0]`. Outer boundaries are counter-clockwise (positive area),
/// holes clockwise.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Polygon<F> {
    /// The vertices of the polygon.
    pub vertices: Vec<Point2<F>>,
}

impl<F: Float> Polygon<F> {
    /// Creates a new polygon from vertices.
    #[inline]
    pub fn new(vertices: Vec<Point2<F>>) -> Self {
        Self { vertices }
    }

    /// Creates an empty polygon.
    #[inline]
    pub fn empty() -> Self {
        Self {
            vertices: Vec::new(),
        }
    }

    /// Returns true if the polygon has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns vertex `i` modulo the vertex count.
    ///
    /// # Panics
    ///
    /// Panics if the polygon is empty.
    #[inline]
    pub fn vertex(&self, i: usize) -> Point2<F> {
        self.vertices[i % self.vertices.len()]
    }

    /// Returns the edge from vertex `i` to vertex `i + 1` (wrapping).
    #[inline]
    pub fn edge(&self, i: usize) -> LineSegment<F> {
        LineSegment::new(self.vertex(i), self.vertex(i + 1), F::zero())
    }

    /// Iterates over the `n` boundary edges, closing edge last.
    ///
    /// A single-vertex polygon has one degenerate edge.
    pub fn edges(&self) -> impl Iterator<Item = LineSegment<F>> + '_ {
        (0..self.vertices.len()).map(move |i| self.edge(i))
    }

    /// Number of reflex vertices.
    ///
    /// Counts right turns, or left turns for a clockwise polygon, so a
    /// hole's count refers to angles measured inside the hole.
    pub fn r(&self) -> usize {
        let n = self.vertices.len();
        if n < 2 {
            return 0;
        }
        let right_turns = (0..n)
            .filter(|&i| {
                orient2d(self.vertex(i), self.vertex(i + 1), self.vertex(i + 2), F::zero())
                    == Orientation::Clockwise
            })
            .count();
        if self.signed_area() < F::zero() {
            n - right_turns
        } else {
            right_turns
        }
    }

    /// Returns `true` if the polygon is `epsilon`-simple.
    ///
    /// See [`is_simple`](super::is_simple).
    #[inline]
    pub fn is_simple(&self, epsilon: F) -> bool {
        super::is_simple(self, epsilon)
    }

    /// Returns `true` if no vertex is lexicographically smaller than the
    /// first one.
    pub fn is_in_standard_form(&self) -> bool {
        match self.vertices.split_first() {
            Some((first, rest)) => rest.iter().all(|v| !(first > v)),
            None => true,
        }
    }

    /// Rotates the vertex list so the lexicographically smallest vertex
    /// comes first.
    pub fn enforce_standard_form(&mut self) {
        let mut smallest = 0;
        for (i, v) in self.vertices.iter().enumerate().skip(1) {
            if *v < self.vertices[smallest] {
                smallest = i;
            }
        }
        self.vertices.rotate_left(smallest);
    }

    /// Returns the perimeter of the polygon.
    pub fn boundary_length(&self) -> F {
        if self.vertices.len() < 2 {
            return F::zero();
        }
        self.edges().fold(F::zero(), |acc, e| acc + e.length())
    }

    /// Returns the signed area using the shoelace formula.
    ///
    /// Positive for CCW winding, negative for CW winding.
    pub fn signed_area(&self) -> F {
        polygon_signed_area(&self.vertices)
    }

    /// Returns the absolute area of the polygon.
    #[inline]
    pub fn area(&self) -> F {
        self.signed_area().abs()
    }

    /// Returns the centroid, or `None` if the area is zero.
    pub fn centroid(&self) -> Option<Point2<F>> {
        polygon_centroid(&self.vertices)
    }

    /// Largest distance between two vertices, `None` if empty.
    #[inline]
    pub fn diameter(&self) -> Option<F> {
        diameter(&self.vertices)
    }

    /// Axis-aligned bounds, `None` if empty.
    #[inline]
    pub fn bounding_box(&self) -> Option<BoundingBox<F>> {
        BoundingBox::from_points(self.vertices.iter().copied())
    }

    /// Tests if a point is strictly inside by even-odd ray casting.
    ///
    /// Points on the boundary may return either true or false; use
    /// [`Point2::in_polygon`] for a tolerant test.
    #[inline]
    pub fn contains(&self, point: Point2<F>) -> bool {
        polygon_contains(&self.vertices, point)
    }

    /// Samples `count` points uniformly from the polygon (boundary within
    /// `epsilon` included) by rejection from the bounding box.
    ///
    /// Returns an empty vector for a polygon with zero area.
    pub fn random_points<R: Rng + ?Sized>(&self, count: usize, epsilon: F, rng: &mut R) -> Vec<Point2<F>> {
        match self.bounding_box() {
            Some(bbox) if self.area() > F::zero() => {
                sample_in(bbox, count, rng, |p| p.in_polygon(self, epsilon))
            }
            _ => Vec::new(),
        }
    }

    /// Removes vertices lying within `epsilon` of the segment joining their
    /// kept neighbours, including across the closing edge.
    ///
    /// Polygons with fewer than four vertices are left untouched.
    pub fn eliminate_redundant_vertices(&mut self, epsilon: F) {
        let n = self.vertices.len();
        if n < 4 {
            return;
        }
        let mut kept = Vec::with_capacity(n);
        let (mut first, mut second) = (0, 1);
        for third in 2..=n {
            let chord = LineSegment::new(self.vertex(first), self.vertex(third), F::zero());
            if self.vertex(second).distance_to(&chord) > epsilon {
                kept.push(self.vertex(second));
                first = second;
            }
            second = third;
        }
        // The walk above never decides about vertex 0 itself.
        let v0 = self.vertices[0];
        if let (Some(&front), Some(&back)) = (kept.first(), kept.last()) {
            let chord = LineSegment::new(front, back, F::zero());
            if v0.distance_to(&chord) > epsilon {
                kept.push(v0);
            }
        }
        if !kept.is_empty() {
            self.vertices = kept;
        }
    }

    /// Reverses the winding while keeping the first vertex in place.
    pub fn reverse(&mut self) {
        if self.vertices.len() > 2 {
            self.vertices[1..].reverse();
        }
    }

    /// Returns a copy with reversed winding (first vertex kept in place).
    pub fn reversed(&self) -> Self {
        let mut copy = self.clone();
        copy.reverse();
        copy
    }
}

impl<F: Float> Region<F> for Polygon<F> {
    #[inline]
    fn rings(&self) -> &[Polygon<F>] {
        std::slice::from_ref(self)
    }

    #[inline]
    fn contains_point(&self, point: Point2<F>, epsilon: F) -> bool {
        point.in_polygon(self, epsilon)
    }
}

impl<F: Float> Point2<F> {
    /// Returns `true` if `self` is within `epsilon` of the boundary of
    /// `polygon` or strictly inside it.
    pub fn in_polygon(self, polygon: &Polygon<F>, epsilon: F) -> bool {
        if polygon.is_empty() {
            return false;
        }
        self.boundary_distance_to(polygon) <= epsilon || polygon.contains(self)
    }
}

impl<F: Float> Index<usize> for Polygon<F> {
    type Output = Point2<F>;

    /// Wrapping index.
    #[inline]
    fn index(&self, i: usize) -> &Point2<F> {
        &self.vertices[i % self.vertices.len()]
    }
}

/// Returns `true` if the polygons have equally many vertices and some cyclic
/// shift matches them vertex by vertex within `epsilon`.
pub fn equivalent<F: Float>(a: &Polygon<F>, b: &Polygon<F>, epsilon: F) -> bool {
    let n = a.len();
    if n == 0 || n != b.len() {
        return false;
    }
    (0..n).any(|offset| (0..n).all(|i| a[i].distance(b[i + offset]) <= epsilon))
}

/// Rejection-samples `count` points from `bbox` accepted by `accept`.
pub(crate) fn sample_in<F, R, P>(bbox: BoundingBox<F>, count: usize, rng: &mut R, accept: P) -> Vec<Point2<F>>
where
    F: Float,
    R: Rng + ?Sized,
    P: Fn(Point2<F>) -> bool,
{
    let mut points = Vec::with_capacity(count);
    while points.len() < count {
        let u = F::from(rng.gen::<f64>()).unwrap_or_else(F::zero);
        let v = F::from(rng.gen::<f64>()).unwrap_or_else(F::zero);
        let candidate = Point2::new(
            bbox.x_min + bbox.width() * u,
            bbox.y_min + bbox.height() * v,
        );
        if accept(candidate) {
            points.push(candidate);
        }
    }
    points
}

/// Computes the signed area of a polygon using the shoelace formula.
///
/// Positive for CCW winding, negative for CW winding.
pub fn polygon_signed_area<F: Float>(vertices: &[Point2<F>]) -> F {
    if vertices.len() < 3 {
        return F::zero();
    }

    let n = vertices.len();
    let twice = (0..n).fold(F::zero(), |acc, i| {
        let j = (i + 1) % n;
        acc + vertices[i].cross(vertices[j])
    });

    twice / F::from(2.0).unwrap()
}

/// Computes the centroid of a polygon.
///
/// Returns None for fewer than 3 vertices or zero area.
pub fn polygon_centroid<F: Float>(vertices: &[Point2<F>]) -> Option<Point2<F>> {
    if vertices.len() < 3 {
        return None;
    }

    let area = polygon_signed_area(vertices);
    if area == F::zero() {
        return None;
    }

    let mut cx = F::zero();
    let mut cy = F::zero();
    let n = vertices.len();

    for i in 0..n {
        let j = (i + 1) % n;
        let cross = vertices[i].cross(vertices[j]);
        cx = cx + (vertices[i].x + vertices[j].x) * cross;
        cy = cy + (vertices[i].y + vertices[j].y) * cross;
    }

    let six = F::from(6.0).unwrap();
    Some(Point2::new(cx / (six * area), cy / (six * area)))
}

/// Tests if a point is inside a polygon using the ray casting algorithm.
///
/// Points on the boundary may return either true or false.
pub fn polygon_contains<F: Float>(vertices: &[Point2<F>], point: Point2<F>) -> bool {
    if vertices.len() < 3 {
        return false;
    }

    let mut inside = false;
    let n = vertices.len();

    let mut j = n - 1;
    for i in 0..n {
        let vi = vertices[i];
        let vj = vertices[j];

        if ((vi.y > point.y) != (vj.y > point.y))
            && (point.x < (vj.x - vi.x) * (point.y - vi.y) / (vj.y - vi.y) + vi.x)
        {
            inside = !inside;
        }
        j = i;
    }

    inside
}
