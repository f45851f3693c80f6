//! visum - Visibility in planar polygonal environments
//!
//! Computes visibility polygons, visibility graphs and Euclidean shortest
//! paths inside an environment (an outer boundary with polygonal holes).
//! Every geometric predicate takes an explicit tolerance `eps`, so inputs that
//! are nearly degenerate behave the way they would if they were exact.
//!
//! ```
//! use visum::{Environment, Point2, Polygon, VisibilityGraph};
//!
//! let square = |x0: f64, y0: f64, x1: f64, y1: f64| {
//!     Polygon::new(vec![
//!         Point2::new(x0, y0),
//!         Point2::new(x1, y0),
//!         Point2::new(x1, y1),
//!         Point2::new(x0, y1),
//!     ])
//! };
//! let mut hole = square(4.0, 4.0, 6.0, 6.0);
//! hole.reverse();
//! let env = Environment::with_holes(square(0.0, 0.0, 10.0, 10.0), vec![hole]);
//!
//! let graph = VisibilityGraph::from_environment(&env, 1e-9).unwrap();
//! let path = env
//!     .shortest_path(Point2::new(1.0, 1.0), Point2::new(9.0, 9.0), &graph, 1e-9)
//!     .unwrap();
//! assert_eq!(path.len(), 3);
//! ```

pub mod bounds;
pub mod error;
pub mod guards;
pub mod io;
pub mod path;
pub mod polygon;
pub mod primitives;
pub mod tolerance;
pub mod visibility;

pub use bounds::BoundingBox;
pub use error::{EnvironmentDefect, Result, VisumError};
pub use guards::Guards;
pub use polygon::{Environment, Polygon, Region};
pub use primitives::{Angle, LineSegment, PolarPoint, Point2, Polyline, Ray2, Vec2};
pub use tolerance::{BoundaryDistance, Distance, Orientation};
pub use visibility::{visibility_polygons, VisibilityGraph, VisibilityPolygon};
