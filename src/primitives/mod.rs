//! Floating-point geometric primitives.

mod angle;
mod point2;
mod polar_point;
mod polyline;
mod ray2;
mod segment2;
mod vec2;

pub use angle::{geodesic_direction, geodesic_distance, Angle};
pub(crate) use angle::tau;
pub use point2::Point2;
pub use polar_point::PolarPoint;
pub(crate) use polyline::diameter;
pub use polyline::Polyline;
pub use ray2::Ray2;
pub use segment2::{equivalent, LineSegment};
pub use vec2::Vec2;
