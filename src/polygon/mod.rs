//! Polygons and polygonal environments.
//!
//! This module provides:
//! - [`Polygon`]: a closed vertex ring with area, orientation and containment
//! - [`Environment`]: an outer boundary with holes and flattened vertex indexing
//! - [`Region`]: shared boundary queries for anything made of rings
//! - Simplicity and environment validity checks
//!
//! # Example
//!
//! ```
//! use visum::polygon::{Environment, Polygon};
//! use visum::Point2;
//!
//! let outer = Polygon::new(vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(4.0, 0.0),
//!     Point2::new(4.0, 4.0),
//!     Point2::new(0.0, 4.0),
//! ]);
//! let env = Environment::new(outer);
//!
//! assert!(env.is_valid(1e-9));
//! assert!(Point2::new(2.0, 2.0).in_environment(&env, 1e-9));
//! assert_eq!(env.area(), 16.0);
//! ```

mod core;
mod environment;
mod region;
mod validate;

pub use core::{equivalent, polygon_centroid, polygon_contains, polygon_signed_area, Polygon};
pub use environment::Environment;
pub use region::Region;
pub use validate::{is_simple, validate_environment};
