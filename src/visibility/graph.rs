//! Visibility graphs over environment vertices or arbitrary point sets.

use super::visibility_polygons;
use crate::error::Result;
use crate::guards::Guards;
use crate::polygon::Environment;
use crate::primitives::Point2;
use num_traits::Float;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;

/// Symmetric adjacency matrix of mutual visibility.
///
/// Entry `(k1, k2)` is `true` when points `k1` and `k2` see each other.
/// Points are addressed by flattened index, or by `(polygon, vertex)` pairs
/// when the graph was built over an environment's vertices.
///
/// # Example
///
/// ```
/// use visum::polygon::{Environment, Polygon};
/// use visum::{Point2, VisibilityGraph};
///
/// let square = Polygon::new(vec![
///     Point2::new(0.0, 0.0),
///     Point2::new(1.0, 0.0),
///     Point2::new(1.0, 1.0),
///     Point2::new(0.0, 1.0),
/// ]);
/// let env = Environment::new(square);
/// let graph = VisibilityGraph::from_environment(&env, 1e-9).unwrap();
///
/// assert_eq!(graph.n(), 4);
/// assert!(graph.get(0, 2));
/// assert!(graph.get_pair((0, 1), (0, 3)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VisibilityGraph {
    n: usize,
    vertex_counts: Vec<usize>,
    adjacency: Vec<bool>,
}

impl VisibilityGraph {
    /// Builds the graph over every vertex of `environment`, in flattened
    /// index order.
    ///
    /// # Errors
    ///
    /// [`VisumError::InvalidEnvironment`](crate::VisumError::InvalidEnvironment)
    /// if `environment` is not `epsilon`-valid. The same holds for
    /// [`from_points`](Self::from_points) and [`from_guards`](Self::from_guards).
    pub fn from_environment<F>(environment: &Environment<F>, epsilon: F) -> Result<Self>
    where
        F: Float + Send + Sync,
    {
        let points: Vec<Point2<F>> = environment.vertices().collect();
        let vertex_counts = environment.polygons().iter().map(|p| p.len()).collect();
        Self::build(&points, vertex_counts, environment, epsilon)
    }

    /// Builds the graph over an arbitrary point list.
    pub fn from_points<F>(points: &[Point2<F>], environment: &Environment<F>, epsilon: F) -> Result<Self>
    where
        F: Float + Send + Sync,
    {
        Self::build(points, vec![points.len()], environment, epsilon)
    }

    /// Builds the graph over guard positions.
    #[inline]
    pub fn from_guards<F>(guards: &Guards<F>, environment: &Environment<F>, epsilon: F) -> Result<Self>
    where
        F: Float + Send + Sync,
    {
        Self::from_points(&guards.positions, environment, epsilon)
    }

    fn build<F>(
        points: &[Point2<F>],
        vertex_counts: Vec<usize>,
        environment: &Environment<F>,
        epsilon: F,
    ) -> Result<Self>
    where
        F: Float + Send + Sync,
    {
        environment.validate(epsilon)?;
        let n = points.len();
        let mut graph = Self {
            n,
            vertex_counts,
            adjacency: vec![false; n * n],
        };

        let polygons = visibility_polygons(environment, points, epsilon);

        // Each pair is decided by a single evaluation, written to both
        // entries. Later rows overwrite earlier ones.
        for (k1, polygon) in polygons.iter().enumerate() {
            for (k2, &point) in points.iter().enumerate() {
                if k1 == k2 {
                    graph.set(k1, k1, true);
                } else {
                    let visible = point.in_polygon(polygon, epsilon);
                    graph.set(k1, k2, visible);
                    graph.set(k2, k1, visible);
                }
            }
        }

        let edges = graph.adjacency.iter().filter(|&&a| a).count().saturating_sub(n) / 2;
        tracing::debug!(points = n, edges, "built visibility graph");
        Ok(graph)
    }

    /// Number of points.
    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    /// Vertex count of each polygon, or the point count for a point list.
    #[inline]
    pub fn vertex_counts(&self) -> &[usize] {
        &self.vertex_counts
    }

    /// Converts a `(polygon, vertex)` pair to a flattened index.
    pub fn two_to_one(&self, polygon: usize, vertex: usize) -> usize {
        self.vertex_counts[..polygon].iter().sum::<usize>() + vertex
    }

    /// Returns `true` if points `k1` and `k2` see each other.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    #[inline]
    pub fn get(&self, k1: usize, k2: usize) -> bool {
        assert!(k1 < self.n && k2 < self.n, "vertex index out of range");
        self.adjacency[k1 * self.n + k2]
    }

    /// Like [`get`](Self::get), addressed by `(polygon, vertex)` pairs.
    #[inline]
    pub fn get_pair(&self, a: (usize, usize), b: (usize, usize)) -> bool {
        self.get(self.two_to_one(a.0, a.1), self.two_to_one(b.0, b.1))
    }

    /// Overwrites a single entry. Symmetry is up to the caller.
    #[inline]
    pub fn set(&mut self, k1: usize, k2: usize, visible: bool) {
        assert!(k1 < self.n && k2 < self.n, "vertex index out of range");
        self.adjacency[k1 * self.n + k2] = visible;
    }

    /// Indices visible from `k`, excluding `k` itself.
    pub fn neighbors(&self, k: usize) -> impl Iterator<Item = usize> + '_ {
        let row = &self.adjacency[k * self.n..(k + 1) * self.n];
        row.iter()
            .enumerate()
            .filter(move |&(j, &visible)| visible && j != k)
            .map(|(j, _)| j)
    }
}

impl fmt::Display for VisibilityGraph {
    /// One row per line, entries `0`/`1` separated by two spaces.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for k1 in 0..self.n {
            for k2 in 0..self.n {
                if k2 > 0 {
                    f.write_str("  ")?;
                }
                write!(f, "{}", u8::from(self.get(k1, k2)))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{EnvironmentDefect, VisumError};
    use crate::polygon::Polygon;

    const EPS: f64 = 1e-9;

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

    fn l_shape() -> Environment<f64> {
        Environment::new(Polygon::new(vec![
            p(0.0, 0.0),
            p(4.0, 0.0),
            p(4.0, 2.0),
            p(2.0, 2.0),
            p(2.0, 4.0),
            p(0.0, 4.0),
        ]))
    }

    #[test]
    fn test_convex_room_fully_connected() {
        let env = Environment::new(square(0.0, 0.0, 2.0));
        let graph = VisibilityGraph::from_environment(&env, EPS).unwrap();
        for k1 in 0..4 {
            for k2 in 0..4 {
                assert!(graph.get(k1, k2));
            }
        }
        assert_eq!(graph.neighbors(0).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_l_shape_blocks_far_corners() {
        let graph = VisibilityGraph::from_environment(&l_shape(), EPS).unwrap();
        // The line from (4,2) to (0,4) leaves the room
        assert!(graph.get(1, 3));
        assert!(!graph.get(2, 5));
        assert!(!graph.get(5, 2));
        assert!(graph.get(3, 0));
        for k1 in 0..graph.n() {
            for k2 in 0..graph.n() {
                assert_eq!(graph.get(k1, k2), graph.get(k2, k1));
            }
        }
    }

    #[test]
    fn test_pair_addressing() {
        let env = Environment::with_holes(square(0.0, 0.0, 10.0), vec![square(4.0, 4.0, 2.0).reversed()]);
        let graph = VisibilityGraph::from_environment(&env, EPS).unwrap();
        assert_eq!(graph.n(), 8);
        assert_eq!(graph.vertex_counts(), &[4, 4]);
        assert_eq!(graph.two_to_one(1, 2), 6);
        // Opposite outer corners are hidden from each other by the hole
        assert!(!graph.get_pair((0, 0), (0, 2)));
        assert!(graph.get_pair((0, 0), (1, 0)));
    }

    #[test]
    fn test_from_points() {
        let env = Environment::with_holes(square(0.0, 0.0, 10.0), vec![square(4.0, 4.0, 2.0).reversed()]);
        let guards = Guards::new(vec![p(1.0, 5.0), p(9.0, 5.0), p(5.0, 1.0)]);
        let graph = VisibilityGraph::from_guards(&guards, &env, EPS).unwrap();
        assert_eq!(graph.vertex_counts(), &[3]);
        assert!(!graph.get(0, 1));
        assert!(graph.get(0, 2));
        assert!(graph.get(1, 2));
    }

    #[test]
    fn test_invalid_environment() {
        let clockwise = Environment::new(square(0.0, 0.0, 2.0).reversed());
        assert!(matches!(
            VisibilityGraph::from_environment(&clockwise, EPS),
            Err(VisumError::InvalidEnvironment(EnvironmentDefect::OuterNotCounterClockwise))
        ));
        let guards = Guards::new(vec![p(0.5, 0.5)]);
        assert!(VisibilityGraph::from_guards(&guards, &clockwise, EPS).is_err());
    }

    #[test]
    fn test_display() {
        let env = Environment::new(Polygon::new(vec![p(0.0, 0.0), p(1.0, 0.0), p(0.0, 1.0)]));
        let graph = VisibilityGraph::from_environment(&env, EPS).unwrap();
        assert_eq!(graph.to_string(), "1  1  1\n1  1  1\n1  1  1\n");
    }
}
