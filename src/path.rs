//! Euclidean shortest paths through an environment.
//!
//! A* search over the environment's vertices plus the start and finish
//! points, with edges between mutually visible states and the straight-line
//! distance to the finish as heuristic.

use crate::error::{Result, VisumError};
use crate::polygon::Environment;
use crate::primitives::{Point2, Polyline};
use crate::visibility::{VisibilityGraph, VisibilityPolygon};
use num_traits::Float;
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

/// Search state: an environment vertex by flattened index, or one of the
/// two endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum State {
    Vertex(usize),
    Start,
    Finish,
}

impl State {
    /// Orders start and finish after every vertex.
    fn id(self, n: usize) -> usize {
        match self {
            State::Vertex(k) => k,
            State::Start => n,
            State::Finish => n + 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeState {
    /// Waiting in the open set.
    Frontier,
    /// Popped, children being generated.
    Expanded,
    Closed,
}

#[derive(Debug, Clone, Copy)]
struct Node<F> {
    state: State,
    parent: usize,
    cost_to_come: F,
    cost_to_go: F,
    status: NodeState,
}

impl<F: Float> Node<F> {
    #[inline]
    fn estimate(&self) -> F {
        self.cost_to_come + self.cost_to_go
    }
}

/// Open-set entry ordered by estimated total cost, then state id, then
/// parent node.
#[derive(Debug, Clone, Copy)]
struct OpenEntry<F> {
    estimate: F,
    id: usize,
    parent: usize,
    node: usize,
}

impl<F: Float> PartialEq for OpenEntry<F> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<F: Float> Eq for OpenEntry<F> {}

impl<F: Float> PartialOrd for OpenEntry<F> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<F: Float> Ord for OpenEntry<F> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.estimate
            .partial_cmp(&other.estimate)
            .unwrap_or(Ordering::Equal)
            .then(self.id.cmp(&other.id))
            .then(self.parent.cmp(&other.parent))
    }
}

/// Arena-backed A* search tree.
struct Search<F> {
    nodes: Vec<Node<F>>,
    by_state: HashMap<State, usize>,
    open: BTreeSet<OpenEntry<F>>,
    n: usize,
}

impl<F: Float> Search<F> {
    fn new(n: usize, heuristic: F) -> Self {
        let root = Node {
            state: State::Start,
            parent: 0,
            cost_to_come: F::zero(),
            cost_to_go: heuristic,
            status: NodeState::Frontier,
        };
        let mut search = Self {
            nodes: vec![root],
            by_state: HashMap::from([(State::Start, 0)]),
            open: BTreeSet::new(),
            n,
        };
        search.open.insert(search.entry(0));
        search
    }

    fn entry(&self, node: usize) -> OpenEntry<F> {
        let n = &self.nodes[node];
        OpenEntry {
            estimate: n.estimate(),
            id: n.state.id(self.n),
            parent: n.parent,
            node,
        }
    }

    fn pop(&mut self) -> Option<usize> {
        let entry = self.open.pop_first()?;
        self.nodes[entry.node].status = NodeState::Expanded;
        Some(entry.node)
    }

    /// Offers `state` as a child of `parent`. A state already in the tree
    /// is re-parented, and returns to the frontier, when the new route is
    /// cheaper.
    fn relax(&mut self, parent: usize, state: State, cost_to_come: F, cost_to_go: F) {
        match self.by_state.get(&state) {
            None => {
                let node = self.nodes.len();
                self.nodes.push(Node {
                    state,
                    parent,
                    cost_to_come,
                    cost_to_go,
                    status: NodeState::Frontier,
                });
                self.by_state.insert(state, node);
                self.open.insert(self.entry(node));
            }
            Some(&node) if self.nodes[node].cost_to_come > cost_to_come => {
                if self.nodes[node].status == NodeState::Frontier {
                    let stale = self.entry(node);
                    self.open.remove(&stale);
                }
                let updated = &mut self.nodes[node];
                updated.parent = parent;
                updated.cost_to_come = cost_to_come;
                updated.status = NodeState::Frontier;
                self.open.insert(self.entry(node));
            }
            Some(_) => {}
        }
    }
}

impl<F> Environment<F>
where
    F: Float + Send + Sync,
{
    /// Finds a Euclidean shortest path from `start` to `finish`, using a
    /// precomputed visibility graph of this environment's vertices.
    ///
    /// Returns `[start]` if the points coincide within `epsilon` and
    /// `[start, finish]` if they see each other. Consecutive waypoints
    /// closer than `epsilon` are merged.
    ///
    /// # Errors
    ///
    /// - [`VisumError::GraphMismatch`] if `graph` was built for a different
    ///   number of vertices
    /// - [`VisumError::UnsetPoint`] or [`VisumError::ObserverOutside`] if
    ///   `start` or `finish` is unusable
    /// - [`VisumError::InvalidEnvironment`] if the environment is not
    ///   `epsilon`-valid
    /// - [`VisumError::NoPath`] if `finish` is unreachable
    ///
    /// # Example
    ///
    /// ```
    /// use visum::polygon::{Environment, Polygon};
    /// use visum::{Point2, VisibilityGraph};
    ///
    /// let square = |x: f64, y: f64, s: f64| {
    ///     Polygon::new(vec![
    ///         Point2::new(x, y),
    ///         Point2::new(x + s, y),
    ///         Point2::new(x + s, y + s),
    ///         Point2::new(x, y + s),
    ///     ])
    /// };
    /// let env = Environment::with_holes(square(0.0, 0.0, 10.0), vec![square(4.0, 4.0, 2.0).reversed()]);
    /// let graph = VisibilityGraph::from_environment(&env, 1e-9).unwrap();
    ///
    /// let path = env
    ///     .shortest_path(Point2::new(1.0, 1.0), Point2::new(9.0, 9.0), &graph, 1e-9)
    ///     .unwrap();
    /// assert_eq!(path.len(), 3);
    /// ```
    pub fn shortest_path(
        &self,
        start: Point2<F>,
        finish: Point2<F>,
        graph: &VisibilityGraph,
        epsilon: F,
    ) -> Result<Polyline<F>> {
        let n = self.n();
        if graph.n() != n {
            return Err(VisumError::GraphMismatch {
                expected: n,
                found: graph.n(),
            });
        }
        if !start.is_set() || !finish.is_set() {
            return Err(VisumError::UnsetPoint);
        }
        self.validate(epsilon)?;
        let from_start = VisibilityPolygon::compute_in_valid(start, self, epsilon)?;
        if !finish.in_environment(self, epsilon) {
            return Err(VisumError::ObserverOutside);
        }

        if start.distance(finish) <= epsilon {
            return Ok(Polyline::new(vec![start]));
        }
        if finish.in_polygon(&from_start, epsilon) {
            return Ok(Polyline::new(vec![start, finish]));
        }

        let from_finish = VisibilityPolygon::compute_in_valid(finish, self, epsilon)?;
        let start_sees: Vec<bool> = self.vertices().map(|v| v.in_polygon(&from_start, epsilon)).collect();
        let finish_sees: Vec<bool> = self.vertices().map(|v| v.in_polygon(&from_finish, epsilon)).collect();

        let mut search = Search::new(n, start.distance(finish));
        let mut expanded = 0usize;
        let goal = loop {
            let Some(current) = search.pop() else {
                debug!(expanded, "search frontier exhausted");
                return Err(VisumError::NoPath);
            };
            let node = search.nodes[current];

            match node.state {
                State::Finish => break current,
                State::Start => {
                    for k in (0..n).filter(|&k| start_sees[k]) {
                        let v = self.vertex(k);
                        search.relax(current, State::Vertex(k), start.distance(v), v.distance(finish));
                    }
                }
                State::Vertex(k1) => {
                    let here = self.vertex(k1);
                    for k2 in graph.neighbors(k1) {
                        let v = self.vertex(k2);
                        search.relax(
                            current,
                            State::Vertex(k2),
                            node.cost_to_come + here.distance(v),
                            v.distance(finish),
                        );
                    }
                    if finish_sees[k1] {
                        search.relax(
                            current,
                            State::Finish,
                            node.cost_to_come + here.distance(finish),
                            F::zero(),
                        );
                    }
                }
            }
            expanded += 1;
            search.nodes[current].status = NodeState::Closed;
        };

        debug!(
            expanded,
            tree = search.nodes.len(),
            cost = ?search.nodes[goal].cost_to_come.to_f64(),
            "shortest path found"
        );

        let mut waypoints = vec![finish];
        let mut node = search.nodes[goal].parent;
        loop {
            let waypoint = match search.nodes[node].state {
                State::Vertex(k) => self.vertex(k),
                State::Start | State::Finish => start,
            };
            if waypoints
                .last()
                .is_some_and(|last| last.distance(waypoint) > epsilon)
            {
                waypoints.push(waypoint);
            }
            if node == 0 {
                break;
            }
            node = search.nodes[node].parent;
        }
        waypoints.reverse();
        Ok(Polyline::new(waypoints))
    }

    /// Like [`shortest_path`](Self::shortest_path), building the visibility
    /// graph first.
    ///
    /// # Errors
    ///
    /// As [`shortest_path`](Self::shortest_path), with
    /// [`VisumError::InvalidEnvironment`] reported before the graph is
    /// built.
    pub fn shortest_path_uncached(
        &self,
        start: Point2<F>,
        finish: Point2<F>,
        epsilon: F,
    ) -> Result<Polyline<F>> {
        let graph = VisibilityGraph::from_environment(self, epsilon)?;
        self.shortest_path(start, finish, &graph, epsilon)
    }
}
