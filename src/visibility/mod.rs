//! Visibility polygons and visibility graphs.
//!
//! The visibility polygon of an observer is the part of an environment the
//! observer can see along unobstructed straight lines. It is computed by an
//! angular plane sweep: `O(n log n)` to sort the `n` edge endpoints, plus a
//! scan of the edges crossing the sweep ray each time the nearest edge ends.
//! The scan makes the worst case `O(n^2)` when most edges cross one ray.
//!
//! # Example
//!
//! ```
//! use visum::polygon::{Environment, Polygon};
//! use visum::{Point2, VisibilityPolygon};
//!
//! let square = |x: f64, y: f64, s: f64| {
//!     Polygon::new(vec![
//!         Point2::new(x, y),
//!         Point2::new(x + s, y),
//!         Point2::new(x + s, y + s),
//!         Point2::new(x, y + s),
//!     ])
//! };
//! let env = Environment::with_holes(square(0.0, 0.0, 10.0), vec![square(4.0, 4.0, 2.0).reversed()]);
//!
//! let visible = VisibilityPolygon::compute(Point2::new(1.0, 5.0), &env, 1e-9).unwrap();
//! assert!(Point2::new(9.0, 1.0).in_region(&visible, 1e-9));
//! assert!(!Point2::new(9.0, 5.0).in_region(&visible, 1e-9));
//! ```

mod graph;
mod polar_edge;
mod spikes;
mod sweep;

pub use graph::VisibilityGraph;

use crate::error::{Result, VisumError};
use crate::polygon::{Environment, Polygon, Region};
use crate::primitives::Point2;
use num_traits::Float;
use std::ops::Deref;

/// The region of an environment visible from an observer.
///
/// Dereferences to the underlying counter-clockwise [`Polygon`], which is in
/// standard form.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibilityPolygon<F> {
    polygon: Polygon<F>,
    observer: Point2<F>,
}

impl<F: Float> VisibilityPolygon<F> {
    /// Sweeps `environment` from `observer` without checking preconditions.
    ///
    /// The environment should be `epsilon`-valid and the observer should
    /// lie in it, snapped to the boundary and then to the vertices within
    /// `epsilon`. If not, the result is unspecified. Use
    /// [`compute`](Self::compute) for a checked version.
    pub fn new(observer: Point2<F>, environment: &Environment<F>, epsilon: F) -> Self {
        Self {
            polygon: sweep::visibility_polygon(observer, environment, epsilon),
            observer,
        }
    }

    /// Visibility polygon inside a single polygon without holes.
    pub fn from_polygon(observer: Point2<F>, polygon: &Polygon<F>, epsilon: F) -> Self {
        Self::new(observer, &Environment::new(polygon.clone()), epsilon)
    }

    /// Checked visibility polygon.
    ///
    /// Validates `environment`, then snaps the observer to its boundary and
    /// then to its vertices within `epsilon` before sweeping. The snapped
    /// position is available from [`observer`](Self::observer).
    ///
    /// # Errors
    ///
    /// - [`VisumError::EmptyGeometry`] if the environment has no vertices
    /// - [`VisumError::UnsetPoint`] if the observer is unset
    /// - [`VisumError::InvalidEnvironment`] if the environment is not
    ///   `epsilon`-valid
    /// - [`VisumError::ObserverOutside`] if the snapped observer is not in
    ///   the environment
    pub fn compute(observer: Point2<F>, environment: &Environment<F>, epsilon: F) -> Result<Self> {
        if environment.outer_boundary().is_empty() {
            return Err(VisumError::EmptyGeometry {
                what: "environment",
            });
        }
        if !observer.is_set() {
            return Err(VisumError::UnsetPoint);
        }
        environment.validate(epsilon)?;
        Self::compute_in_valid(observer, environment, epsilon)
    }

    /// [`compute`](Self::compute) for an environment already known to be
    /// valid.
    pub(crate) fn compute_in_valid(
        observer: Point2<F>,
        environment: &Environment<F>,
        epsilon: F,
    ) -> Result<Self> {
        if !observer.is_set() {
            return Err(VisumError::UnsetPoint);
        }
        let mut snapped = observer;
        snapped.snap_to_boundary_of(environment, epsilon);
        snapped.snap_to_vertices_of(environment, epsilon);
        if !snapped.in_environment(environment, epsilon) {
            return Err(VisumError::ObserverOutside);
        }
        Ok(Self::new(snapped, environment, epsilon))
    }

    /// The observer the polygon was computed for.
    #[inline]
    pub fn observer(&self) -> Point2<F> {
        self.observer
    }

    #[inline]
    pub fn polygon(&self) -> &Polygon<F> {
        &self.polygon
    }

    #[inline]
    pub fn into_polygon(self) -> Polygon<F> {
        self.polygon
    }

    /// Reapplies the post-sweep cleanup: spike removal at the closing seam,
    /// redundant vertex elimination, fold removal and standard form.
    ///
    /// A freshly computed polygon is already clean, so this is a no-op on
    /// it.
    pub fn cleanup(&mut self, epsilon: F) {
        spikes::chop_spikes_at_wrap_around(&mut self.polygon.vertices, self.observer, epsilon);
        self.polygon.eliminate_redundant_vertices(epsilon);
        spikes::chop_spikes(&mut self.polygon.vertices, epsilon);
        self.polygon.enforce_standard_form();
    }
}

impl<F> Deref for VisibilityPolygon<F> {
    type Target = Polygon<F>;

    fn deref(&self) -> &Polygon<F> {
        &self.polygon
    }
}

impl<F: Float> Region<F> for VisibilityPolygon<F> {
    #[inline]
    fn rings(&self) -> &[Polygon<F>] {
        std::slice::from_ref(&self.polygon)
    }

    #[inline]
    fn contains_point(&self, point: Point2<F>, epsilon: F) -> bool {
        point.in_polygon(&self.polygon, epsilon)
    }
}

/// Computes the unchecked visibility polygon of every observer.
///
/// With the `parallel` feature the sweeps run on the rayon thread pool.
#[cfg(not(feature = "parallel"))]
pub fn visibility_polygons<F>(
    environment: &Environment<F>,
    observers: &[Point2<F>],
    epsilon: F,
) -> Vec<VisibilityPolygon<F>>
where
    F: Float + Send + Sync,
{
    observers
        .iter()
        .map(|&observer| VisibilityPolygon::new(observer, environment, epsilon))
        .collect()
}

/// Computes the unchecked visibility polygon of every observer.
///
/// With the `parallel` feature the sweeps run on the rayon thread pool.
#[cfg(feature = "parallel")]
pub fn visibility_polygons<F>(
    environment: &Environment<F>,
    observers: &[Point2<F>],
    epsilon: F,
) -> Vec<VisibilityPolygon<F>>
where
    F: Float + Send + Sync,
{
    use rayon::prelude::*;

    observers
        .par_iter()
        .map(|&observer| VisibilityPolygon::new(observer, environment, epsilon))
        .collect()
}
