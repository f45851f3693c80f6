//! Axis-aligned bounds of point sets.

mod bounding_box;

pub use bounding_box::BoundingBox;
