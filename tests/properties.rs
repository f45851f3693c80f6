//! Geometric properties of visibility polygons, graphs and shortest paths.

use approx::assert_relative_eq;
use proptest::prelude::*;
use visum::io::{load_environment, load_guards, save_environment, save_guards, WriteOptions};
use visum::{
    BoundaryDistance, Distance, Environment, Guards, LineSegment, Point2, Polygon, VisibilityGraph,
    VisibilityPolygon, VisumError,
};

const EPS: f64 = 1e-9;

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn p(x: f64, y: f64) -> Point2<f64> {
    Point2::new(x, y)
}

fn square(x: f64, y: f64, side: f64) -> Polygon<f64> {
    Polygon::new(vec![p(x, y), p(x + side, y), p(x + side, y + side), p(x, y + side)])
}

/// 10x10 room with a 2x2 pillar in the middle.
fn pillar_room() -> Environment<f64> {
    Environment::with_holes(square(0.0, 0.0, 10.0), vec![square(4.0, 4.0, 2.0).reversed()])
}

/// Comb-shaped room: three teeth hanging down from a corridor.
fn comb() -> Environment<f64> {
    Environment::new(Polygon::new(vec![
        p(0.0, 0.0),
        p(1.0, 0.0),
        p(1.0, 3.0),
        p(2.0, 3.0),
        p(2.0, 0.0),
        p(3.0, 0.0),
        p(3.0, 3.0),
        p(4.0, 3.0),
        p(4.0, 0.0),
        p(5.0, 0.0),
        p(5.0, 4.0),
        p(0.0, 4.0),
    ]))
}

fn interior_point(env: Environment<f64>) -> impl Strategy<Value = Point2<f64>> {
    let bounds = env.bounding_box().expect("non-empty environment");
    (bounds.x_min..bounds.x_max, bounds.y_min..bounds.y_max)
        .prop_map(|(x, y)| p(x, y))
        .prop_filter("strictly inside the environment", move |&q| {
            q.in_environment(&env, EPS) && env.boundary_distance_to(&q) > 1e-3
        })
}

fn check_visibility_polygon(env: &Environment<f64>, observer: Point2<f64>) {
    let vp = VisibilityPolygon::compute(observer, env, EPS).unwrap();
    assert!(vp.len() >= 3);

    // The observer sees itself.
    assert!(observer.in_polygon(&vp, EPS));

    // Every ray from the observer to a vertex stays inside.
    for &v in &vp.vertices {
        assert!(v.in_environment(env, 1e-6), "{v:?} escapes the environment");
        assert!(observer.midpoint(v).in_polygon(&vp, 1e-6));
    }

    assert!(vp.area() <= env.area() + 1e-6);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn test_pillar_room_visibility_is_star_shaped(observer in interior_point(pillar_room())) {
        check_visibility_polygon(&pillar_room(), observer);
    }

    #[test]
    fn test_comb_visibility_is_star_shaped(observer in interior_point(comb())) {
        check_visibility_polygon(&comb(), observer);
    }

    #[test]
    fn test_cleanup_is_idempotent(observer in interior_point(pillar_room())) {
        let env = pillar_room();
        let mut vp = VisibilityPolygon::compute(observer, &env, EPS).unwrap();
        vp.cleanup(EPS);
        let once = vp.polygon().clone();
        vp.cleanup(EPS);
        prop_assert_eq!(vp.polygon(), &once);
    }

    #[test]
    fn test_mutual_visibility_is_symmetric(
        a in interior_point(pillar_room()),
        b in interior_point(pillar_room()),
    ) {
        let env = pillar_room();
        let from_a = VisibilityPolygon::compute(a, &env, EPS).unwrap();
        let from_b = VisibilityPolygon::compute(b, &env, EPS).unwrap();
        prop_assert_eq!(b.in_polygon(&from_a, EPS), a.in_polygon(&from_b, EPS));
    }

    #[test]
    fn test_convex_room_paths_are_straight(
        s in interior_point(Environment::new(square(0.0, 0.0, 10.0))),
        f in interior_point(Environment::new(square(0.0, 0.0, 10.0))),
    ) {
        let env = Environment::new(square(0.0, 0.0, 10.0));
        let graph = VisibilityGraph::from_environment(&env, EPS).unwrap();
        let path = env.shortest_path(s, f, &graph, EPS).unwrap();
        prop_assert_eq!(path.vertices, vec![s, f]);
    }
}

#[test]
fn test_vertex_observer_is_a_vertex() {
    init_tracing();
    let env = pillar_room();
    for observer in env.vertices() {
        let vp = VisibilityPolygon::compute(observer, &env, EPS).unwrap();
        assert!(
            vp.vertices.iter().any(|&v| v.distance(observer) <= EPS),
            "{observer:?} is not a vertex of {:?}",
            vp.vertices
        );
    }

    // On a straight stretch of wall the observer is on the boundary but
    // not a corner of the visible region.
    let on_wall = p(0.0, 3.0);
    let vp = VisibilityPolygon::compute(on_wall, &env, EPS).unwrap();
    assert!(on_wall.on_boundary_of(&vp, EPS));
}

#[test]
fn test_invalid_environment_is_rejected_everywhere() {
    init_tracing();
    let crossing = Environment::with_holes(square(0.0, 0.0, 4.0), vec![square(3.0, 1.0, 2.0).reversed()]);
    let clockwise = Environment::new(square(0.0, 0.0, 4.0).reversed());

    for env in [&crossing, &clockwise] {
        assert!(matches!(
            VisibilityPolygon::compute(p(1.0, 2.0), env, EPS),
            Err(VisumError::InvalidEnvironment(_))
        ));
        assert!(matches!(
            VisibilityGraph::from_environment(env, EPS),
            Err(VisumError::InvalidEnvironment(_))
        ));
        assert!(matches!(
            env.shortest_path_uncached(p(1.0, 2.0), p(2.0, 2.0), EPS),
            Err(VisumError::InvalidEnvironment(_))
        ));
    }
}

#[test]
fn test_graph_agrees_with_visibility_polygons() {
    init_tracing();
    let env = pillar_room();
    let points = vec![p(1.0, 1.0), p(9.0, 9.0), p(9.0, 1.0), p(5.0, 8.0), p(5.0, 2.0), p(1.0, 9.0)];
    let graph = VisibilityGraph::from_points(&points, &env, EPS).unwrap();

    for i in 0..points.len() {
        assert!(graph.get(i, i));
        for j in i + 1..points.len() {
            assert_eq!(graph.get(i, j), graph.get(j, i));
            let from_j = VisibilityPolygon::compute(points[j], &env, EPS).unwrap();
            assert_eq!(graph.get(i, j), points[i].in_polygon(&from_j, EPS));
        }
    }

    // Opposite corners are hidden by the pillar, the two sides of it are not.
    assert!(!graph.get(0, 1));
    assert!(!graph.get(3, 4));
    assert!(graph.get(0, 2));
    assert!(graph.get(1, 3));
}

#[test]
fn test_environment_graph_sees_around_pillar() {
    init_tracing();
    let env = pillar_room();
    let graph = VisibilityGraph::from_environment(&env, EPS).unwrap();
    assert_eq!(graph.n(), 8);
    assert_eq!(graph.vertex_counts(), &[4, 4]);

    // Outer corners (0,0) and (10,10) are hidden by the pillar.
    assert!(!graph.get_pair((0, 0), (0, 2)));
    // Every outer corner sees three of the four pillar corners.
    for outer in 0..4 {
        let seen = (0..4).filter(|&h| graph.get_pair((0, outer), (1, h))).count();
        assert_eq!(seen, 3, "outer corner {outer}");
    }
}

#[test]
fn test_path_wraps_one_pillar_corner() {
    init_tracing();
    let env = pillar_room();
    let graph = VisibilityGraph::from_environment(&env, EPS).unwrap();
    let path = env.shortest_path(p(1.0, 1.0), p(9.0, 9.0), &graph, EPS).unwrap();

    assert_eq!(path.len(), 3);
    let corner = path.vertices[1];
    assert!(corner == p(4.0, 6.0) || corner == p(6.0, 4.0));

    let length = path.length();
    assert!(length > 8.0 * 2f64.sqrt());
    assert_relative_eq!(length, 2.0 * 34f64.sqrt(), epsilon = 1e-9);
    assert!(length < 18.1);

    // Planning from scratch gives the same length.
    let uncached = env.shortest_path_uncached(p(1.0, 1.0), p(9.0, 9.0), EPS).unwrap();
    assert_relative_eq!(uncached.length(), length, epsilon = 1e-9);
}

#[test]
fn test_path_through_comb_visits_tooth_corners() {
    init_tracing();
    let env = comb();
    let graph = VisibilityGraph::from_environment(&env, EPS).unwrap();
    let path = env.shortest_path(p(0.5, 0.5), p(4.5, 0.5), &graph, EPS).unwrap();

    let n = path.len();
    assert!(n >= 4);
    assert_eq!(path.vertices[1], p(1.0, 3.0));
    assert_eq!(path.vertices[n - 2], p(4.0, 3.0));
    assert_relative_eq!(path.length(), 2.0 * 6.5f64.sqrt() + 3.0, epsilon = 1e-9);
}

#[test]
fn test_degenerate_segment_distance() {
    let point_like = LineSegment::from_point(p(1.0, 1.0));
    assert_eq!(point_like.len(), 1);
    assert_relative_eq!(point_like.distance_to(&p(4.0, 5.0)), 5.0);
    assert_relative_eq!(p(4.0, 5.0).distance_to(&point_like), 5.0);

    let collapsed = LineSegment::new(p(2.0, 2.0), p(2.0, 2.0 + 1e-12), EPS);
    assert_eq!(collapsed.len(), 1);
    assert!(LineSegment::<f64>::empty().distance_to(&p(0.0, 0.0)).is_infinite());
}

#[test]
fn test_environment_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pillar.environment");
    let env = pillar_room();

    save_environment(&path, &env, WriteOptions::default()).unwrap();
    let loaded: Environment<f64> = load_environment(&path, EPS).unwrap();
    assert_eq!(loaded, env);
    assert!(loaded.is_valid(EPS));
}

#[test]
fn test_files_round_trip_within_precision() {
    let dir = tempfile::tempdir().unwrap();
    let options = WriteOptions { precision: 6 };
    let tolerance = 1e-6;

    let third = 1.0 / 3.0;
    let guards = Guards::new(vec![p(third, 7.0 * third), p(9.0 - third, 0.1), p(5.0, 8.0 + third)]);
    let guards_path = dir.path().join("room.guards");
    save_guards(&guards_path, &guards, options).unwrap();
    let loaded: Guards<f64> = load_guards(&guards_path).unwrap();
    assert_eq!(loaded.len(), guards.len());
    for (a, b) in loaded.iter().zip(guards.iter()) {
        assert_relative_eq!(a.x, b.x, epsilon = tolerance);
        assert_relative_eq!(a.y, b.y, epsilon = tolerance);
    }

    let env = Environment::with_holes(
        square(0.0, 0.0, 10.0 * third),
        vec![square(third, third, third).reversed()],
    );
    let env_path = dir.path().join("thirds.environment");
    save_environment(&env_path, &env, options).unwrap();
    let loaded: Environment<f64> = load_environment(&env_path, EPS).unwrap();
    assert_eq!(loaded.n(), env.n());
    for (a, b) in loaded.vertices().zip(env.vertices()) {
        assert_relative_eq!(a.x, b.x, epsilon = tolerance);
        assert_relative_eq!(a.y, b.y, epsilon = tolerance);
    }
    assert_relative_eq!(loaded.area(), env.area(), epsilon = 1e-5);
}
