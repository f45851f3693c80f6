//! Regions bounded by polygonal rings, and point queries against them.

use super::Polygon;
use crate::primitives::Point2;
use crate::tolerance::Distance;
use num_traits::Float;
use std::cmp::Ordering;

/// A closed planar region whose boundary is a set of polygonal rings.
///
/// Implemented by [`Polygon`], [`Environment`](super::Environment) and
/// [`VisibilityPolygon`](crate::visibility::VisibilityPolygon), so point
/// projections, snapping and containment work uniformly across them.
pub trait Region<F: Float> {
    /// The boundary rings. For an environment the outer boundary comes
    /// first, followed by the holes.
    fn rings(&self) -> &[Polygon<F>];

    /// Returns `true` if `point` lies in the closed region, counting points
    /// within `epsilon` of the boundary as inside.
    fn contains_point(&self, point: Point2<F>, epsilon: F) -> bool;
}

fn nearest<F: Float>(
    point: Point2<F>,
    candidates: impl Iterator<Item = Point2<F>>,
) -> Option<Point2<F>> {
    candidates.min_by(|a, b| {
        point
            .distance(*a)
            .partial_cmp(&point.distance(*b))
            .unwrap_or(Ordering::Equal)
    })
}

impl<F: Float> Point2<F> {
    /// Returns the vertex of `region` closest to `self`.
    ///
    /// Returns `None` if the region has no vertices.
    pub fn projection_onto_vertices_of<R: Region<F> + ?Sized>(self, region: &R) -> Option<Self> {
        nearest(
            self,
            region
                .rings()
                .iter()
                .flat_map(|ring| ring.vertices.iter().copied()),
        )
    }

    /// Returns the point on the boundary of `region` closest to `self`.
    ///
    /// Returns `None` if the region has no vertices.
    pub fn projection_onto_boundary_of<R: Region<F> + ?Sized>(self, region: &R) -> Option<Self> {
        nearest(
            self,
            region
                .rings()
                .iter()
                .flat_map(|ring| ring.edges())
                .filter_map(|edge| self.projection_onto_segment(&edge)),
        )
    }

    /// Returns `true` if `self` is within `epsilon` of the boundary of
    /// `region`.
    pub fn on_boundary_of<R: Region<F> + ?Sized>(self, region: &R, epsilon: F) -> bool {
        region
            .rings()
            .iter()
            .flat_map(|ring| ring.edges())
            .any(|edge| self.distance_to(&edge) <= epsilon)
    }

    /// Returns `true` if `self` lies in the closed region within `epsilon`.
    #[inline]
    pub fn in_region<R: Region<F> + ?Sized>(self, region: &R, epsilon: F) -> bool {
        region.contains_point(self, epsilon)
    }

    /// Moves `self` onto the nearest vertex of `region` if one is within
    /// `epsilon`.
    pub fn snap_to_vertices_of<R: Region<F> + ?Sized>(&mut self, region: &R, epsilon: F) {
        if let Some(vertex) = self.projection_onto_vertices_of(region) {
            if self.distance(vertex) <= epsilon {
                *self = vertex;
            }
        }
    }

    /// Moves `self` onto the nearest boundary point of `region` if it is
    /// within `epsilon`.
    pub fn snap_to_boundary_of<R: Region<F> + ?Sized>(&mut self, region: &R, epsilon: F) {
        if let Some(target) = self.projection_onto_boundary_of(region) {
            if self.distance(target) <= epsilon {
                *self = target;
            }
        }
    }
}
