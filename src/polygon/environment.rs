//! Polygonal environments: an outer boundary with polygonal holes.

use super::core::sample_in;
use super::{validate_environment, Polygon, Region};
use crate::bounds::BoundingBox;
use crate::error::{Result, VisumError};
use crate::primitives::Point2;
use num_traits::Float;
use rand::Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// A planar region bounded by a counter-clockwise outer boundary and
/// containing zero or more clockwise holes.
///
/// Vertices are addressable either by a `(polygon, vertex)` pair, where
/// polygon 0 is the outer boundary and polygon `i` is hole `i - 1`, or by a
/// single flattened index counting through the outer boundary first and
/// then each hole in order.
///
/// # Example
///
/// ```
/// use visum::polygon::{Environment, Polygon};
/// use visum::Point2;
///
/// let outer = Polygon::new(vec![
///     Point2::new(0.0, 0.0),
///     Point2::new(10.0, 0.0),
///     Point2::new(10.0, 10.0),
///     Point2::new(0.0, 10.0),
/// ]);
/// let hole = Polygon::new(vec![
///     Point2::new(4.0, 4.0),
///     Point2::new(4.0, 6.0),
///     Point2::new(6.0, 6.0),
///     Point2::new(6.0, 4.0),
/// ]);
/// let env = Environment::with_holes(outer, vec![hole]);
///
/// assert_eq!(env.n(), 8);
/// assert_eq!(env.one_to_two(5), (1, 1));
/// assert_eq!(env.vertex(5), Point2::new(4.0, 6.0));
/// assert!(env.is_valid(1e-9));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Environment<F> {
    polygons: Vec<Polygon<F>>,
    index_key: Vec<(usize, usize)>,
}

impl<F: Float> Environment<F> {
    /// Creates an environment without holes.
    pub fn new(outer_boundary: Polygon<F>) -> Self {
        Self::with_holes(outer_boundary, Vec::new())
    }

    /// Creates an environment from an outer boundary and holes.
    pub fn with_holes(outer_boundary: Polygon<F>, holes: Vec<Polygon<F>>) -> Self {
        let mut polygons = Vec::with_capacity(holes.len() + 1);
        polygons.push(outer_boundary);
        polygons.extend(holes);
        let mut env = Self {
            polygons,
            index_key: Vec::new(),
        };
        env.update_index_key();
        env
    }

    /// Creates an environment and checks that it is `epsilon`-valid.
    ///
    /// # Errors
    ///
    /// [`VisumError::InvalidEnvironment`] naming the first defect found.
    pub fn try_new(outer_boundary: Polygon<F>, holes: Vec<Polygon<F>>, epsilon: F) -> Result<Self> {
        let env = Self::with_holes(outer_boundary, holes);
        env.validate(epsilon)?;
        Ok(env)
    }

    /// Creates an environment from a list whose first polygon is the outer
    /// boundary and whose remaining polygons are holes.
    pub fn from_polygons(polygons: Vec<Polygon<F>>) -> Result<Self> {
        let mut iter = polygons.into_iter();
        let outer = iter.next().ok_or(VisumError::EmptyGeometry {
            what: "environment polygon list",
        })?;
        Ok(Self::with_holes(outer, iter.collect()))
    }

    /// The outer boundary.
    #[inline]
    pub fn outer_boundary(&self) -> &Polygon<F> {
        &self.polygons[0]
    }

    /// The holes.
    #[inline]
    pub fn holes(&self) -> &[Polygon<F>] {
        &self.polygons[1..]
    }

    /// All polygons, outer boundary first.
    #[inline]
    pub fn polygons(&self) -> &[Polygon<F>] {
        &self.polygons
    }

    /// Number of holes.
    #[inline]
    pub fn h(&self) -> usize {
        self.polygons.len() - 1
    }

    /// Total number of vertices.
    #[inline]
    pub fn n(&self) -> usize {
        self.index_key.len()
    }

    /// Returns `true` if the environment has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index_key.is_empty()
    }

    /// Total number of reflex vertices, counting hole vertices convex as
    /// seen from inside the hole.
    pub fn r(&self) -> usize {
        self.holes()
            .iter()
            .fold(self.outer_boundary().r(), |acc, hole| acc + hole.len() - hole.r())
    }

    /// Returns the vertex with flattened index `k`.
    ///
    /// # Panics
    ///
    /// Panics if `k >= self.n()`.
    #[inline]
    pub fn vertex(&self, k: usize) -> Point2<F> {
        let (i, j) = self.index_key[k];
        self.polygons[i].vertices[j]
    }

    /// Converts a flattened vertex index to a `(polygon, vertex)` pair.
    ///
    /// # Panics
    ///
    /// Panics if `k >= self.n()`.
    #[inline]
    pub fn one_to_two(&self, k: usize) -> (usize, usize) {
        self.index_key[k]
    }

    /// Converts a `(polygon, vertex)` pair to a flattened vertex index.
    pub fn two_to_one(&self, polygon: usize, vertex: usize) -> usize {
        self.polygons[..polygon]
            .iter()
            .map(Polygon::len)
            .sum::<usize>()
            + vertex
    }

    /// Iterates over all vertices in flattened order.
    pub fn vertices(&self) -> impl Iterator<Item = Point2<F>> + '_ {
        self.polygons
            .iter()
            .flat_map(|polygon| polygon.vertices.iter().copied())
    }

    /// Returns `true` if every polygon is in standard form, the outer
    /// boundary is counter-clockwise and every hole is clockwise.
    pub fn is_in_standard_form(&self) -> bool {
        let outer = self.outer_boundary();
        outer.is_in_standard_form()
            && outer.signed_area() >= F::zero()
            && self
                .holes()
                .iter()
                .all(|hole| hole.is_in_standard_form() && hole.signed_area() <= F::zero())
    }

    /// Checks that the environment is `epsilon`-valid.
    ///
    /// Returns the first defect found as
    /// [`VisumError::InvalidEnvironment`].
    pub fn validate(&self, epsilon: F) -> Result<()> {
        validate_environment(self, epsilon).map_err(VisumError::from)
    }

    /// Returns `true` if the environment is `epsilon`-valid.
    #[inline]
    pub fn is_valid(&self, epsilon: F) -> bool {
        self.validate(epsilon).is_ok()
    }

    /// Total length of all boundaries.
    pub fn boundary_length(&self) -> F {
        self.polygons
            .iter()
            .fold(F::zero(), |acc, polygon| acc + polygon.boundary_length())
    }

    /// Free area: outer area minus hole areas, for correctly oriented
    /// polygons.
    pub fn area(&self) -> F {
        self.polygons
            .iter()
            .fold(F::zero(), |acc, polygon| acc + polygon.signed_area())
    }

    /// Diameter of the outer boundary, `None` if empty.
    #[inline]
    pub fn diameter(&self) -> Option<F> {
        self.outer_boundary().diameter()
    }

    /// Bounds of the outer boundary, `None` if empty.
    #[inline]
    pub fn bounding_box(&self) -> Option<BoundingBox<F>> {
        self.outer_boundary().bounding_box()
    }

    /// Samples `count` points uniformly from the free space.
    ///
    /// Returns an empty vector if the free area is not positive.
    pub fn random_points<R: Rng + ?Sized>(&self, count: usize, epsilon: F, rng: &mut R) -> Vec<Point2<F>> {
        match self.bounding_box() {
            Some(bbox) if self.area() > F::zero() => {
                sample_in(bbox, count, rng, |p| p.in_environment(self, epsilon))
            }
            _ => Vec::new(),
        }
    }

    /// Replaces the outer boundary.
    pub fn set_outer_boundary(&mut self, outer_boundary: Polygon<F>) {
        self.polygons[0] = outer_boundary;
        self.update_index_key();
    }

    /// Appends a hole.
    pub fn add_hole(&mut self, hole: Polygon<F>) {
        self.polygons.push(hole);
        self.update_index_key();
    }

    /// Orients the outer boundary counter-clockwise and the holes clockwise,
    /// then rotates each polygon into standard form.
    pub fn enforce_standard_form(&mut self) {
        for (i, polygon) in self.polygons.iter_mut().enumerate() {
            let area = polygon.signed_area();
            if (i == 0 && area < F::zero()) || (i > 0 && area > F::zero()) {
                polygon.reverse();
            }
            polygon.enforce_standard_form();
        }
    }

    /// Removes redundant collinear vertices from every polygon.
    pub fn eliminate_redundant_vertices(&mut self, epsilon: F) {
        for polygon in &mut self.polygons {
            polygon.eliminate_redundant_vertices(epsilon);
        }
        self.update_index_key();
    }

    /// Reverses the winding of every hole.
    pub fn reverse_holes(&mut self) {
        for hole in &mut self.polygons[1..] {
            hole.reverse();
        }
    }

    fn update_index_key(&mut self) {
        self.index_key = self
            .polygons
            .iter()
            .enumerate()
            .flat_map(|(i, polygon)| (0..polygon.len()).map(move |j| (i, j)))
            .collect();
    }
}

impl<F: Float> Region<F> for Environment<F> {
    #[inline]
    fn rings(&self) -> &[Polygon<F>] {
        &self.polygons
    }

    #[inline]
    fn contains_point(&self, point: Point2<F>, epsilon: F) -> bool {
        point.in_environment(self, epsilon)
    }
}

impl<F: Float> Point2<F> {
    /// Returns `true` if `self` is in the free space of `environment`:
    /// within `epsilon` of any boundary, or inside the outer boundary and
    /// outside every hole.
    pub fn in_environment(self, environment: &Environment<F>, epsilon: F) -> bool {
        if environment.is_empty() {
            return false;
        }
        if self.on_boundary_of(environment, epsilon) {
            return true;
        }
        if !self.in_polygon(environment.outer_boundary(), epsilon) {
            return false;
        }
        !environment
            .holes()
            .iter()
            .any(|hole| self.in_polygon(hole, F::zero()))
    }
}

impl<F> Index<usize> for Environment<F> {
    type Output = Polygon<F>;

    /// Polygon `i`: 0 is the outer boundary, `i > 0` is hole `i - 1`.
    #[inline]
    fn index(&self, i: usize) -> &Polygon<F> {
        &self.polygons[i]
    }
}
