//! Boundary edges expressed in polar coordinates about the observer.

use crate::polygon::Environment;
use crate::primitives::{Angle, LineSegment, PolarPoint, Point2};
use num_traits::Float;

/// An environment edge with both endpoints in polar form.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PolarEdge<F> {
    pub first: PolarPoint<F>,
    pub second: PolarPoint<F>,
}

impl<F: Float> PolarEdge<F> {
    #[inline]
    pub fn new(first: PolarPoint<F>, second: PolarPoint<F>) -> Self {
        Self { first, second }
    }

    #[inline]
    pub fn segment(&self) -> LineSegment<F> {
        LineSegment::new(self.first.point(), self.second.point(), F::zero())
    }

    /// Returns `true` if either endpoint is within `epsilon` of `observer`.
    #[inline]
    pub fn touches(&self, observer: Point2<F>, epsilon: F) -> bool {
        observer.distance(self.first.point()) <= epsilon
            || observer.distance(self.second.point()) <= epsilon
    }
}

/// How one boundary edge enters the sweep.
#[derive(Debug, Clone, Copy)]
pub(crate) enum EdgeClass<F> {
    /// The observer lies in the edge's relative interior. The edge is split
    /// in two at the observer.
    SplitAtObserver {
        lower: PolarEdge<F>,
        upper: PolarEdge<F>,
        left_wall: Angle<F>,
        right_wall: Angle<F>,
    },
    /// The observer sits on the first endpoint.
    ObserverAtFirst {
        edge: PolarEdge<F>,
        right_wall: Angle<F>,
    },
    /// The observer sits on the second endpoint.
    ObserverAtSecond {
        edge: PolarEdge<F>,
        left_wall: Angle<F>,
    },
    /// The edge crosses the bearing-0 ray and is split there.
    CrossesSeam {
        below: PolarEdge<F>,
        above: PolarEdge<F>,
    },
    /// The edge is swept clockwise and cannot bound the visible region.
    AgainstGrain,
    Normal(PolarEdge<F>),
}

/// Classifies the boundary edge from `a` to `b` about `observer`.
pub(crate) fn classify<F: Float>(
    observer: Point2<F>,
    a: Point2<F>,
    b: Point2<F>,
    epsilon: F,
) -> EdgeClass<F> {
    let first = PolarPoint::new(observer, a, F::zero());
    let mut second = PolarPoint::new(observer, b, F::zero());
    let at_observer = PolarPoint::new(observer, observer, F::zero());

    if observer.in_relative_interior_of(&LineSegment::new(a, b, F::zero()), epsilon) {
        if second.bearing().is_zero() {
            second.set_bearing_to_two_pi();
        }
        return EdgeClass::SplitAtObserver {
            lower: PolarEdge::new(first, at_observer),
            upper: PolarEdge::new(at_observer, second),
            left_wall: first.bearing(),
            right_wall: second.bearing(),
        };
    }

    if observer.distance(a) <= epsilon {
        if second.bearing().is_zero() {
            second.set_bearing_to_two_pi();
        }
        return EdgeClass::ObserverAtFirst {
            edge: PolarEdge::new(at_observer, second),
            right_wall: second.bearing(),
        };
    }
    if observer.distance(b) <= epsilon {
        return EdgeClass::ObserverAtSecond {
            edge: PolarEdge::new(first, at_observer),
            left_wall: first.bearing(),
        };
    }

    // Horizontal edges never cross the seam
    if (a.y - b.y).abs() <= epsilon {
        if first.bearing() >= second.bearing() {
            return EdgeClass::AgainstGrain;
        }
        return EdgeClass::Normal(PolarEdge::new(first, second));
    }

    let t = (observer.y - b.y) / (a.y - b.y);
    let crossing_x = t * a.x + (F::one() - t) * b.x;
    if t > F::zero() && t < F::one() && observer.x < crossing_x {
        if a.y > observer.y {
            return EdgeClass::AgainstGrain;
        }
        let crossing = PolarPoint::new(observer, Point2::new(crossing_x, observer.y), F::zero());
        let mut below = crossing;
        below.set_bearing_to_two_pi();
        let mut above = crossing;
        above.set_bearing(Angle::zero());
        return EdgeClass::CrossesSeam {
            below: PolarEdge::new(first, below),
            above: PolarEdge::new(above, second),
        };
    }

    let half_turn = Angle::new(F::from(std::f64::consts::PI).unwrap());
    if first.bearing() >= second.bearing()
        && second.bearing().is_zero()
        && first.bearing() > half_turn
    {
        second.set_bearing_to_two_pi();
    } else if (first.bearing().is_zero() && second.bearing() > half_turn)
        || first.bearing() >= second.bearing()
    {
        return EdgeClass::AgainstGrain;
    }
    EdgeClass::Normal(PolarEdge::new(first, second))
}

/// Bearings of the walls on either side of an observer standing on the
/// boundary.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Walls<F> {
    pub left: Angle<F>,
    pub right: Angle<F>,
}

/// Builds the polar edge list for `environment` about `observer`.
pub(crate) fn polar_edges<F: Float>(
    observer: Point2<F>,
    environment: &Environment<F>,
    epsilon: F,
) -> (Vec<PolarEdge<F>>, Walls<F>) {
    let mut edges = Vec::with_capacity(environment.n() + 2);
    let mut walls = Walls {
        left: Angle::zero(),
        right: Angle::zero(),
    };
    let mut discarded = 0usize;

    for polygon in environment.polygons() {
        for j in 0..polygon.len() {
            match classify(observer, polygon[j], polygon[j + 1], epsilon) {
                EdgeClass::SplitAtObserver {
                    lower,
                    upper,
                    left_wall,
                    right_wall,
                } => {
                    walls.left = left_wall;
                    walls.right = right_wall;
                    edges.push(lower);
                    edges.push(upper);
                }
                EdgeClass::ObserverAtFirst { edge, right_wall } => {
                    walls.right = right_wall;
                    edges.push(edge);
                }
                EdgeClass::ObserverAtSecond { edge, left_wall } => {
                    walls.left = left_wall;
                    edges.push(edge);
                }
                EdgeClass::CrossesSeam { below, above } => {
                    edges.push(below);
                    edges.push(above);
                }
                EdgeClass::AgainstGrain => discarded += 1,
                EdgeClass::Normal(edge) => edges.push(edge),
            }
        }
    }

    tracing::trace!(kept = edges.len(), discarded, "built polar edge list");
    (edges, walls)
}
