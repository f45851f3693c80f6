//! Error types for visum operations.

use thiserror::Error;

/// Errors that can occur while building or querying visibility structures.
#[derive(Debug, Error)]
pub enum VisumError {
    /// An empty segment, polygon or environment was passed where a nonempty
    /// one is required.
    #[error("empty geometry: {what}")]
    EmptyGeometry {
        /// Which input was empty.
        what: &'static str,
    },

    /// A point with unset (NaN) coordinates was passed to a query.
    #[error("point coordinates are unset")]
    UnsetPoint,

    /// The environment failed validation.
    #[error("invalid environment: {0}")]
    InvalidEnvironment(#[from] EnvironmentDefect),

    /// An observer, start or finish point lies outside the environment.
    #[error("point lies outside the environment")]
    ObserverOutside,

    /// A visibility graph was built for a different environment.
    #[error("visibility graph has {found} vertices, environment has {expected}")]
    GraphMismatch {
        /// Vertex count of the environment.
        expected: usize,
        /// Vertex count of the graph.
        found: usize,
    },

    /// The search frontier was exhausted before reaching the finish point.
    #[error("no path between start and finish")]
    NoPath,

    /// A line of a plain-text geometry file could not be parsed.
    #[error("line {line}: {message}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// What went wrong.
        message: String,
    },

    /// Reading or writing a geometry file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// The specific reason an environment is not valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EnvironmentDefect {
    /// Fewer than three vertices in total.
    #[error("environment has fewer than 3 vertices")]
    TooFewVertices,

    /// The outer boundary self-intersects or has fewer than 3 vertices.
    #[error("outer boundary is not simple")]
    OuterNotSimple,

    /// A hole self-intersects or has fewer than 3 vertices.
    #[error("hole {hole} is not simple")]
    HoleNotSimple {
        /// Index of the hole (0-based among holes).
        hole: usize,
    },

    /// A hole comes within epsilon of the outer boundary.
    #[error("hole {hole} touches the outer boundary")]
    HoleTouchesOuter {
        /// Index of the hole.
        hole: usize,
    },

    /// Two holes come within epsilon of each other.
    #[error("holes {first} and {second} touch")]
    HolesTouch {
        /// Index of the first hole.
        first: usize,
        /// Index of the second hole.
        second: usize,
    },

    /// A hole vertex lies outside the outer boundary.
    #[error("vertex {vertex} of hole {hole} is outside the outer boundary")]
    HoleOutsideOuter {
        /// Index of the hole.
        hole: usize,
        /// Index of the offending vertex within the hole.
        vertex: usize,
    },

    /// A hole vertex lies inside another hole.
    #[error("vertex {vertex} of hole {hole} is inside hole {other}")]
    HoleInsideHole {
        /// Index of the hole owning the vertex.
        hole: usize,
        /// Index of the offending vertex.
        vertex: usize,
        /// Index of the hole containing it.
        other: usize,
    },

    /// The outer boundary is not counter-clockwise.
    #[error("outer boundary is not counter-clockwise")]
    OuterNotCounterClockwise,

    /// A hole is not clockwise.
    #[error("hole {hole} is not clockwise")]
    HoleNotClockwise {
        /// Index of the hole.
        hole: usize,
    },
}

/// Result alias for visum operations.
pub type Result<T> = std::result::Result<T, VisumError>;
