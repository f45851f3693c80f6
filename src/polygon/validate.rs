//! Simplicity and environment validity checks.
//!
//! # Example
//!
//! ```
//! use visum::{Point2, polygon::{Polygon, is_simple}};
//!
//! let figure8 = Polygon::new(vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(2.0, 2.0),
//!     Point2::new(2.0, 0.0),
//!     Point2::new(0.0, 2.0),
//! ]);
//! assert!(!is_simple(&figure8, 1e-9));
//! ```

use super::{Environment, Polygon};
use crate::error::EnvironmentDefect;
use crate::tolerance::{intersection, BoundaryDistance, Distance};
use num_traits::Float;
use tracing::warn;

/// Checks if a polygon is `epsilon`-simple.
///
/// A polygon is `epsilon`-simple when it has at least 3 vertices, adjacent
/// edges share no more than a single point, and nonadjacent edges stay more
/// than `epsilon` apart.
pub fn is_simple<F: Float>(polygon: &Polygon<F>, epsilon: F) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }

    for i in 0..n {
        let overlap = intersection(&polygon.edge(i), &polygon.edge(i + 1), epsilon);
        if overlap.len() > 1 {
            return false;
        }
    }

    for i in 0..n.saturating_sub(2) {
        let ei = polygon.edge(i);
        for j in (i + 2)..n {
            // Edge n-1 wraps around to edge 0
            if i == 0 && j == n - 1 {
                continue;
            }
            if ei.distance_to(&polygon.edge(j)) <= epsilon {
                return false;
            }
        }
    }

    true
}

/// Checks an environment for `epsilon`-validity.
///
/// Checks run in a fixed order and the first failing one is reported:
/// vertex count, simplicity of every ring, separation between rings,
/// hole containment, then orientation.
pub fn validate_environment<F: Float>(
    environment: &Environment<F>,
    epsilon: F,
) -> Result<(), EnvironmentDefect> {
    let outer = environment.outer_boundary();
    let holes = environment.holes();

    if environment.n() <= 2 {
        warn!(n = environment.n(), "environment has too few vertices");
        return Err(EnvironmentDefect::TooFewVertices);
    }

    if !outer.is_simple(epsilon) {
        warn!(vertices = outer.len(), "outer boundary is not simple");
        return Err(EnvironmentDefect::OuterNotSimple);
    }
    for (hole, polygon) in holes.iter().enumerate() {
        if !polygon.is_simple(epsilon) {
            warn!(hole, vertices = polygon.len(), "hole is not simple");
            return Err(EnvironmentDefect::HoleNotSimple { hole });
        }
    }

    for (hole, polygon) in holes.iter().enumerate() {
        if outer.boundary_distance_to(polygon) <= epsilon {
            warn!(hole, "hole touches the outer boundary");
            return Err(EnvironmentDefect::HoleTouchesOuter { hole });
        }
    }
    for (first, a) in holes.iter().enumerate() {
        for (second, b) in holes.iter().enumerate().skip(first + 1) {
            if a.boundary_distance_to(b) <= epsilon {
                warn!(first, second, "holes touch");
                return Err(EnvironmentDefect::HolesTouch { first, second });
            }
        }
    }

    for (hole, polygon) in holes.iter().enumerate() {
        for (vertex, &point) in polygon.vertices.iter().enumerate() {
            if !point.in_polygon(outer, epsilon) {
                warn!(hole, vertex, "hole vertex outside the outer boundary");
                return Err(EnvironmentDefect::HoleOutsideOuter { hole, vertex });
            }
            let inside = holes
                .iter()
                .enumerate()
                .find(|&(other, h)| other != hole && point.in_polygon(h, epsilon));
            if let Some((other, _)) = inside {
                warn!(hole, vertex, other, "hole vertex inside another hole");
                return Err(EnvironmentDefect::HoleInsideHole { hole, vertex, other });
            }
        }
    }

    if outer.signed_area() <= F::zero() {
        warn!("outer boundary is not counter-clockwise");
        return Err(EnvironmentDefect::OuterNotCounterClockwise);
    }
    for (hole, polygon) in holes.iter().enumerate() {
        if polygon.signed_area() >= F::zero() {
            warn!(hole, "hole is not clockwise");
            return Err(EnvironmentDefect::HoleNotClockwise { hole });
        }
    }

    Ok(())
}
