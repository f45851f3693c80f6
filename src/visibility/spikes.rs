//! Removal of degenerate spikes from swept visibility output.

use crate::primitives::{LineSegment, Point2, Ray2};
use crate::tolerance::Distance;
use num_traits::Float;

/// Returns `true` if `tip` is the tip of a needle-thin spike between `before`
/// and `after`, as seen from `observer`.
///
/// None of the points may sit on the observer. The tip must be farther than
/// both neighbours or nearer than both, and lie within `epsilon` of the rays
/// from the observer through each neighbour.
pub(crate) fn is_spike<F: Float>(
    observer: Point2<F>,
    before: Point2<F>,
    tip: Point2<F>,
    after: Point2<F>,
    epsilon: F,
) -> bool {
    let d_before = observer.distance(before);
    let d_tip = observer.distance(tip);
    let d_after = observer.distance(after);
    if d_before <= epsilon || d_tip <= epsilon || d_after <= epsilon {
        return false;
    }
    let extreme = (d_tip >= d_before && d_tip >= d_after) || (d_tip <= d_before && d_tip <= d_after);
    extreme
        && Ray2::from_points(observer, before)
            .distance_to(&tip)
            .max(Ray2::from_points(observer, after).distance_to(&tip))
            <= epsilon
}

/// Pops spike tips off the end of `vertices` while the last three vertices
/// form a spike.
pub(crate) fn chop_spikes_at_back<F: Float>(vertices: &mut Vec<Point2<F>>, observer: Point2<F>, epsilon: F) {
    while vertices.len() >= 3 {
        let n = vertices.len();
        if !is_spike(observer, vertices[n - 3], vertices[n - 2], vertices[n - 1], epsilon) {
            break;
        }
        vertices[n - 2] = vertices[n - 1];
        vertices.pop();
    }
}

/// Pops spike tips formed across the closing seam of the ring.
pub(crate) fn chop_spikes_at_wrap_around<F: Float>(
    vertices: &mut Vec<Point2<F>>,
    observer: Point2<F>,
    epsilon: F,
) {
    while vertices.len() >= 3 {
        let n = vertices.len();
        if !is_spike(observer, vertices[n - 2], vertices[n - 1], vertices[0], epsilon) {
            break;
        }
        vertices.pop();
    }
}

/// Removes every vertex where the ring folds back on itself: the vertex
/// after it lies within `epsilon` of the preceding edge, or the vertex before
/// it lies within `epsilon` of the following edge.
pub(crate) fn chop_spikes<F: Float>(vertices: &mut Vec<Point2<F>>, epsilon: F) {
    let n = vertices.len();
    if n == 0 {
        return;
    }
    let at = |i: usize| vertices[i % n];
    let tips: Vec<Point2<F>> = (0..n)
        .filter(|&i| {
            at(i + 2).distance_to(&LineSegment::new(at(i), at(i + 1), F::zero())) <= epsilon
                || at(i).distance_to(&LineSegment::new(at(i + 1), at(i + 2), F::zero())) <= epsilon
        })
        .map(|i| at(i + 1))
        .collect();
    if tips.is_empty() {
        return;
    }
    vertices.retain(|v| !tips.contains(v));
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn p(x: f64, y: f64) -> Point2<f64> {
        Point2::new(x, y)
    }

    #[test]
    fn test_is_spike() {
        let o = p(0.0, 0.0);
        // Out and back along the same ray
        assert!(is_spike(o, p(1.0, 0.0), p(3.0, 0.0), p(1.0, 0.0), EPS));
        assert!(!is_spike(o, p(1.0, 0.0), p(3.0, 1.0), p(1.0, 0.0), EPS));
        // Monotone range along the ray is not a spike
        assert!(!is_spike(o, p(1.0, 0.0), p(2.0, 0.0), p(3.0, 0.0), EPS));
        // Touching the observer never counts
        assert!(!is_spike(o, o, p(2.0, 0.0), p(1.0, 0.0), EPS));
    }

    #[test]
    fn test_chop_spikes_at_back() {
        let o = p(0.0, 0.0);
        let mut vertices = vec![p(0.0, 1.0), p(1.0, 0.0), p(3.0, 0.0), p(1.0, 0.0)];
        chop_spikes_at_back(&mut vertices, o, EPS);
        assert_eq!(vertices, vec![p(0.0, 1.0), p(1.0, 0.0), p(1.0, 0.0)]);
    }

    #[test]
    fn test_chop_spikes_at_wrap_around() {
        let o = p(0.0, 0.0);
        let mut vertices = vec![p(1.0, 0.0), p(0.0, 1.0), p(2.0, 0.0), p(4.0, 0.0)];
        chop_spikes_at_wrap_around(&mut vertices, o, EPS);
        assert_eq!(vertices, vec![p(1.0, 0.0), p(0.0, 1.0), p(2.0, 0.0)]);
    }

    #[test]
    fn test_chop_spikes_removes_fold() {
        let mut vertices = vec![p(0.0, 0.0), p(4.0, 0.0), p(6.0, 0.0), p(5.0, 0.0), p(4.0, 4.0)];
        chop_spikes(&mut vertices, EPS);
        assert!(!vertices.contains(&p(6.0, 0.0)));
        assert!(vertices.contains(&p(4.0, 4.0)));
    }

    #[test]
    fn test_chop_spikes_keeps_square() {
        let square = vec![p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)];
        let mut vertices = square.clone();
        chop_spikes(&mut vertices, EPS);
        assert_eq!(vertices, square);
    }
}
