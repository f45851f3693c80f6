//! Angular plane sweep about a fixed observer.
//!
//! Every boundary edge is turned into a pair of polar events. Sweeping a ray
//! counter-clockwise from bearing 0 to 2π, the sweep keeps track of the
//! active edge, the boundary edge nearest the observer along the current
//! ray, and emits a vertex whenever the visibility limit changes. Where an
//! occluding corner hands the limit over to a farther edge, the sweep emits
//! a k-point: the spot where the current ray meets that farther edge.

use super::polar_edge::{polar_edges, PolarEdge, Walls};
use super::spikes::{chop_spikes, chop_spikes_at_back, chop_spikes_at_wrap_around};
use crate::polygon::{Environment, Polygon};
use crate::primitives::{Angle, PolarPoint, Point2, Ray2};
use crate::tolerance::{ray_intersection, Distance};
use num_traits::Float;
use std::cmp::Ordering;
use tracing::{debug, trace};

/// One endpoint of a polar edge, queued for the sweep.
#[derive(Debug, Clone, Copy)]
struct Event<F> {
    point: PolarPoint<F>,
    edge: usize,
    is_first: bool,
}

/// Orders events by bearing, then range. At equal polar coordinates an edge
/// closes before another opens.
fn event_order<F: Float>(a: &Event<F>, b: &Event<F>) -> Ordering {
    match a.point.polar_cmp(&b.point) {
        Some(Ordering::Equal) | None => a.is_first.cmp(&b.is_first),
        Some(ord) => ord,
    }
}

/// Builds the sorted event queue, first turning the zero-range endpoints of
/// edges that touch the observer toward the walls it stands against.
fn event_queue<F: Float>(
    observer: Point2<F>,
    edges: &mut [PolarEdge<F>],
    walls: Walls<F>,
    epsilon: F,
) -> Vec<Event<F>> {
    let facing_right = walls.right > walls.left;
    let mut events = Vec::with_capacity(2 * edges.len());
    for (i, edge) in edges.iter_mut().enumerate() {
        if observer.distance(edge.first.point()) <= epsilon {
            edge.first
                .set_bearing(if facing_right { walls.right } else { Angle::zero() });
        } else if observer.distance(edge.second.point()) <= epsilon {
            if facing_right {
                edge.second.set_bearing(walls.right);
            } else {
                edge.second.set_bearing_to_two_pi();
            }
        }
        events.push(Event {
            point: edge.first,
            edge: i,
            is_first: true,
        });
        events.push(Event {
            point: edge.second,
            edge: i,
            is_first: false,
        });
    }
    // Stable, so coincident events keep edge order
    events.sort_by(event_order);
    events
}

struct Sweep<'a, F> {
    observer: Point2<F>,
    epsilon: F,
    edges: &'a [PolarEdge<F>],
    /// Edges that may become active, in insertion order. Entries whose
    /// `pending` flag is cleared are skipped and compacted away.
    candidates: Vec<usize>,
    pending: Vec<bool>,
    retired: usize,
    active: usize,
    vertices: Vec<Point2<F>>,
    k_points: usize,
}

impl<'a, F: Float> Sweep<'a, F> {
    fn emit(&mut self, point: Point2<F>) {
        self.vertices.push(point);
        chop_spikes_at_back(&mut self.vertices, self.observer, self.epsilon);
    }

    fn enqueue(&mut self, edge: usize) {
        if !self.edges[edge].touches(self.observer, self.epsilon) {
            self.candidates.push(edge);
            self.pending[edge] = true;
        }
    }

    /// Drops `edge` from the candidates. Past its closing event an edge
    /// never crosses the sweep ray again.
    fn retire(&mut self, edge: usize) {
        if !self.pending[edge] {
            return;
        }
        self.pending[edge] = false;
        self.retired += 1;
        if 2 * self.retired > self.candidates.len() {
            let pending = &self.pending;
            self.candidates.retain(|&e| pending[e]);
            self.retired = 0;
        }
    }

    /// Range along `ray` to its first contact with `edge`.
    fn crossing_range(&self, ray: &Ray2<F>, edge: usize) -> Option<F> {
        ray_intersection(ray, &self.edges[edge].segment(), self.epsilon)
            .first()
            .map(|p| self.observer.distance(p))
    }

    /// Picks the candidate to examine next: one the ray misses if any,
    /// otherwise the one the ray meets first. Ties go to the earliest
    /// inserted.
    ///
    /// Linear in the number of pending candidates. Ranges are re-measured
    /// along the current ray because an edge's range at insertion is not
    /// comparable with another edge's range taken at a different bearing.
    fn next_candidate(&self, ray: &Ray2<F>) -> Option<usize> {
        let mut best: Option<(usize, Option<F>)> = None;
        for &edge in self.candidates.iter().filter(|&&e| self.pending[e]) {
            let range = self.crossing_range(ray, edge);
            let better = match (best, range) {
                (None, _) => true,
                (Some((_, Some(_))), None) => true,
                (Some((_, Some(best_range))), Some(range)) => range < best_range,
                (Some((_, None)), _) => false,
            };
            if better {
                best = Some((edge, range));
            }
        }
        best.map(|(edge, _)| edge)
    }

    /// The active edge just ended: hand the limit to the nearest candidate
    /// that still extends past the current bearing.
    fn close_active(&mut self, current: &Event<F>) {
        let bearing = current.point.bearing();
        let ray = Ray2::new(self.observer, bearing);
        while let Some(edge) = self.next_candidate(&ray) {
            let far = self.edges[edge].second;
            if bearing <= far.bearing() && ray.distance_to(&far.point()) >= self.epsilon {
                let (k, next) =
                    match ray_intersection(&ray, &self.edges[edge].segment(), self.epsilon).first() {
                        Some(k) => (k, edge),
                        None => (current.point.point(), current.edge),
                    };
                trace!(x = ?k.x.to_f64(), y = ?k.y.to_f64(), edge = next, "k-point at closing edge");
                self.k_points += 1;
                self.emit(k);
                self.active = next;
                return;
            }
            self.retire(edge);
        }
    }

    /// An edge starts at `current`: it takes over if it is in front of the
    /// active edge along the current bearing.
    fn open_edge(&mut self, current: &Event<F>) {
        let observer = self.observer;
        let ray = Ray2::new(observer, current.point.bearing());
        let active = self.edges[self.active];
        let k = ray_intersection(&ray, &active.segment(), self.epsilon).first();
        let active_ended = (observer.distance(active.first.point()) <= self.epsilon
            && active.second.bearing() <= current.point.bearing())
            || active.second.polar_cmp(&current.point) == Some(Ordering::Less);
        let k_range = match k {
            Some(k) if !active_ended => observer.distance(k),
            _ => F::infinity(),
        };

        self.enqueue(current.edge);

        if k_range < current.point.range() {
            return;
        }
        if let Some(k) = k {
            if k_range.is_finite()
                && k.distance(current.point.point()) > self.epsilon
                && observer.distance(active.first.point()) > self.epsilon
            {
                trace!(x = ?k.x.to_f64(), y = ?k.y.to_f64(), "k-point at opening edge");
                self.k_points += 1;
                self.emit(k);
            }
        }
        self.emit(current.point.point());
        trace!(from = self.active, to = current.edge, "active edge switched");
        self.active = current.edge;
    }
}

/// Sweeps `environment` about `observer` and returns the cleaned-up
/// visibility polygon.
///
/// The observer is expected to be snapped and inside the environment.
/// Otherwise the output is unspecified.
pub(crate) fn visibility_polygon<F: Float>(
    observer: Point2<F>,
    environment: &Environment<F>,
    epsilon: F,
) -> Polygon<F> {
    if !observer.is_set() || environment.is_empty() {
        return Polygon::empty();
    }

    let (mut edges, walls) = polar_edges(observer, environment, epsilon);
    let mut events = event_queue(observer, &mut edges, walls, epsilon).into_iter().peekable();
    let Some(first) = events.next() else {
        debug!("no boundary edge faces the observer");
        return Polygon::empty();
    };

    let mut sweep = Sweep {
        observer,
        epsilon,
        edges: &edges,
        candidates: Vec::new(),
        pending: vec![false; edges.len()],
        retired: 0,
        active: first.edge,
        vertices: Vec::with_capacity(environment.n()),
        k_points: 0,
    };
    sweep.enqueue(first.edge);
    sweep.vertices.push(first.point.point());

    while let Some(current) = events.next() {
        if current.edge == sweep.active && !current.is_first {
            let contiguous = events
                .peek()
                .is_some_and(|next| current.point.point().distance(next.point.point()) <= epsilon);
            if !contiguous {
                sweep.emit(current.point.point());
                sweep.close_active(&current);
            }
        } else if current.is_first {
            sweep.open_edge(&current);
        }
        if !current.is_first {
            sweep.retire(current.edge);
        }
    }

    let swept = sweep.vertices.len();
    let k_points = sweep.k_points;
    let mut vertices = sweep.vertices;
    chop_spikes_at_wrap_around(&mut vertices, observer, epsilon);
    let mut polygon = Polygon::new(vertices);
    polygon.eliminate_redundant_vertices(epsilon);
    chop_spikes(&mut polygon.vertices, epsilon);
    polygon.enforce_standard_form();

    debug!(
        edges = edges.len(),
        swept,
        k_points,
        vertices = polygon.len(),
        "swept visibility polygon"
    );
    polygon
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPS: f64 = 1e-9;

    fn p(x: f64, y: f64) -> Point2<f64> {
        Point2::new(x, y)
    }

    fn square(x0: f64, y0: f64, side: f64) -> Polygon<f64> {
        Polygon::new(vec![
            p(x0, y0),
            p(x0 + side, y0),
            p(x0 + side, y0 + side),
            p(x0, y0 + side),
        ])
    }

    #[test]
    fn test_event_order_closes_before_opening() {
        let o = p(0.0, 0.0);
        let at = PolarPoint::new(o, p(1.0, 1.0), 0.0);
        let opening = Event { point: at, edge: 0, is_first: true };
        let closing = Event { point: at, edge: 1, is_first: false };
        assert_eq!(event_order(&closing, &opening), Ordering::Less);
        let farther = Event {
            point: PolarPoint::new(o, p(2.0, 2.0), 0.0),
            edge: 2,
            is_first: false,
        };
        assert_eq!(event_order(&opening, &farther), Ordering::Less);
    }

    #[test]
    fn test_convex_room_sees_everything() {
        let room = square(0.0, 0.0, 4.0);
        let env = Environment::new(room.clone());
        let visible = visibility_polygon(p(1.0, 3.0), &env, EPS);
        assert!(crate::polygon::equivalent(&visible, &room, 1e-9));
        assert_relative_eq!(visible.area(), 16.0, epsilon = 1e-9);
    }

    #[test]
    fn test_observer_on_corner() {
        let room = square(0.0, 0.0, 4.0);
        let env = Environment::new(room.clone());
        let visible = visibility_polygon(p(0.0, 0.0), &env, EPS);
        assert!(crate::polygon::equivalent(&visible, &room, 1e-9));
    }

    #[test]
    fn test_observer_on_edge() {
        let room = square(0.0, 0.0, 4.0);
        let env = Environment::new(room);
        let visible = visibility_polygon(p(2.0, 0.0), &env, EPS);
        assert_relative_eq!(visible.area(), 16.0, epsilon = 1e-9);
        assert!(p(2.0, 0.0).in_polygon(&visible, EPS));
    }

    #[test]
    fn test_hole_casts_shadow() {
        let env = Environment::with_holes(
            square(0.0, 0.0, 10.0),
            vec![square(4.0, 4.0, 2.0).reversed()],
        );
        let visible = visibility_polygon(p(1.0, 5.0), &env, EPS);
        assert!(visible.signed_area() > 0.0);
        assert!(visible.area() < 96.0);
        assert!(!p(9.0, 5.0).in_polygon(&visible, EPS));
        assert!(p(9.0, 1.0).in_polygon(&visible, EPS));
        assert!(p(4.0, 5.0).in_polygon(&visible, EPS));
    }

    #[test]
    fn test_unset_observer() {
        let env = Environment::new(square(0.0, 0.0, 1.0));
        assert!(visibility_polygon(Point2::unset(), &env, EPS).is_empty());
    }

    #[test]
    fn test_pillar_grid_matches_segment_tests() {
        use crate::primitives::LineSegment;
        use crate::tolerance::{intersect, BoundaryDistance};

        let holes = (0..4)
            .flat_map(|i| (0..4).map(move |j| (i, j)))
            .map(|(i, j)| square(1.5 + 3.0 * i as f64, 1.5 + 3.0 * j as f64, 1.0).reversed())
            .collect();
        let env = Environment::with_holes(square(0.0, 0.0, 13.0), holes);
        let observer = p(0.5123, 0.7311);
        let visible = visibility_polygon(observer, &env, EPS);

        let (mut seen, mut hidden) = (0, 0);
        for a in 0..16 {
            for b in 0..16 {
                let q = p(0.37 + 0.8 * a as f64, 0.29 + 0.8 * b as f64);
                if !q.in_environment(&env, EPS) || env.boundary_distance_to(&q) < 0.05 {
                    continue;
                }
                let sight = LineSegment::new(observer, q, EPS);
                let grazing = env.holes().iter().flat_map(|h| h.vertices.iter()).any(|v| v.distance_to(&sight) < 1e-6);
                if grazing {
                    continue;
                }
                let blocked = env.holes().iter().flat_map(|h| h.edges()).any(|edge| intersect(&sight, &edge, EPS));
                assert_eq!(q.in_polygon(&visible, EPS), !blocked, "sample {q:?}");
                if blocked {
                    hidden += 1;
                } else {
                    seen += 1;
                }
            }
        }
        assert!(seen > 10 && hidden > 10, "seen {seen}, hidden {hidden}");
    }
}
