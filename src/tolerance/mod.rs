//! Epsilon-aware predicates, intersections and distances.
//!
//! All functions in this module take explicit tolerance parameters.
//! No hidden epsilons are used.

mod distance;
mod predicates;

pub use distance::{boundary_distance, distance, BoundaryDistance, Distance};
pub use predicates::{
    intersect, intersect_proper, intersection, orient2d, ray_intersection, Orientation,
};
