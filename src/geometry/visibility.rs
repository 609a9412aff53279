//! Line-of-sight and shortest paths among convex obstacles.
//!
//! # Algorithm
//!
//! Each segment is clipped against each obstacle with Cyrus-Beck. A segment
//! is blocked only when the clipped chord has positive length and its
//! midpoint lies strictly inside the obstacle. Touching a vertex, ending on
//! the boundary, or running along an edge therefore stays visible.
//!
//! Shortest paths run Dijkstra over the obstacle vertices (plus any added
//! points) with the two query endpoints attached on the fly. Vertex-to-vertex
//! visibility is computed once at construction.

use log::debug;

use super::polygon::Polygon;
use crate::core::Point2D;
use crate::pathfinding::{dijkstra, dijkstra_distances};

/// Parametric tolerance for clipped chord length.
const CHORD_EPS: f64 = 1e-9;

/// Polyline result of a visibility shortest-path query.
#[derive(Clone, Debug, PartialEq)]
pub struct VisibilityPath {
    /// Points from source to target, inclusive.
    pub points: Vec<Point2D>,
    /// Euclidean length of the polyline.
    pub length: f64,
}

/// Visibility queries over a fixed set of convex obstacles.
#[derive(Clone, Debug)]
pub struct VisibilityOracle {
    obstacles: Vec<Polygon>,
    /// Graph nodes: obstacle vertices, then added points.
    nodes: Vec<Point2D>,
    /// Visibility adjacency among `nodes` with Euclidean weights.
    edges: Vec<Vec<(usize, f64)>>,
}

impl VisibilityOracle {
    /// Build the oracle and precompute vertex-to-vertex visibility.
    pub fn new(obstacles: Vec<Polygon>) -> Self {
        let mut oracle = Self {
            obstacles,
            nodes: Vec::new(),
            edges: Vec::new(),
        };

        let vertices: Vec<Point2D> = oracle
            .obstacles
            .iter()
            .flat_map(|poly| poly.vertices().iter().copied())
            .collect();
        for v in vertices {
            oracle.add_point(v);
        }

        debug!(
            "[Visibility] {} obstacles, {} nodes, {} visibility edges",
            oracle.obstacles.len(),
            oracle.nodes.len(),
            oracle.edges.iter().map(Vec::len).sum::<usize>() / 2
        );
        oracle
    }

    /// Obstacles this oracle was built from.
    pub fn obstacles(&self) -> &[Polygon] {
        &self.obstacles
    }

    /// Number of nodes in the static visibility graph.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Add a permanent node to the static visibility graph.
    ///
    /// Returns the index of the node, reusing an existing one at the same
    /// position.
    pub fn add_point(&mut self, p: Point2D) -> usize {
        if let Some(idx) = self.nodes.iter().position(|n| n.key() == p.key()) {
            return idx;
        }

        let idx = self.nodes.len();
        let adjacency = self.links_to_nodes(p);
        for &(j, d) in &adjacency {
            self.edges[j].push((idx, d));
        }
        self.nodes.push(p);
        self.edges.push(adjacency);
        idx
    }

    /// True iff `p` lies outside every obstacle. Boundary points are not free.
    pub fn is_free(&self, p: Point2D) -> bool {
        !self.obstacles.iter().any(|poly| poly.contains(p))
    }

    /// True iff the open segment `pq` passes through no obstacle interior.
    pub fn visible(&self, p: Point2D, q: Point2D) -> bool {
        !self
            .obstacles
            .iter()
            .any(|poly| crosses_interior(poly, p, q))
    }

    /// Length of the shortest obstacle-avoiding path, or `None` if unreachable.
    pub fn shortest_path_length(&self, p: Point2D, q: Point2D) -> Option<f64> {
        self.shortest_path(p, q).map(|path| path.length)
    }

    /// Shortest obstacle-avoiding polyline from `p` to `q`.
    pub fn shortest_path(&self, p: Point2D, q: Point2D) -> Option<VisibilityPath> {
        if p.key() == q.key() {
            return Some(VisibilityPath {
                points: vec![p],
                length: 0.0,
            });
        }

        let mut points = self.nodes.clone();
        let mut edges = self.edges.clone();
        let src = self.attach(&mut points, &mut edges, p);
        let dst = self.attach(&mut points, &mut edges, q);

        let result = dijkstra(&edges, src, dst)?;
        Some(VisibilityPath {
            points: result.path.iter().map(|&i| points[i]).collect(),
            length: result.cost,
        })
    }

    /// Shortest path lengths from `p` to each of `targets`.
    ///
    /// Equivalent to calling [`shortest_path_length`](Self::shortest_path_length)
    /// per target, with a single search from `p`.
    pub fn shortest_path_lengths_from(&self, p: Point2D, targets: &[Point2D]) -> Vec<Option<f64>> {
        let dist = self.distances_from(&self.links_to_nodes(p));
        targets
            .iter()
            .map(|&q| self.finish_length(p, &dist, q, &self.links_to_nodes(q)))
            .collect()
    }

    /// All-pairs shortest path lengths among `points`.
    ///
    /// Entry `[i][j]` is `None` when `points[j]` is unreachable from `points[i]`.
    pub fn pairwise_path_lengths(&self, points: &[Point2D]) -> Vec<Vec<Option<f64>>> {
        let links: Vec<Vec<(usize, f64)>> =
            points.iter().map(|&q| self.links_to_nodes(q)).collect();

        points
            .iter()
            .zip(&links)
            .map(|(&p, p_links)| {
                let dist = self.distances_from(p_links);
                points
                    .iter()
                    .zip(&links)
                    .map(|(&q, q_links)| self.finish_length(p, &dist, q, q_links))
                    .collect()
            })
            .collect()
    }

    /// Visible static nodes from `q`, with distances.
    fn links_to_nodes(&self, q: Point2D) -> Vec<(usize, f64)> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|&(_, &n)| self.visible(q, n))
            .map(|(j, n)| (j, q.distance(n)))
            .collect()
    }

    /// Distances over the static graph from a source attached via `links`.
    fn distances_from(&self, links: &[(usize, f64)]) -> Vec<f64> {
        let mut edges = self.edges.clone();
        let src = edges.len();
        for &(j, d) in links {
            edges[j].push((src, d));
        }
        edges.push(links.to_vec());
        dijkstra_distances(&edges, src)
    }

    /// Close a search from `p` into `q` through the direct segment or any
    /// static node that sees `q`.
    fn finish_length(
        &self,
        p: Point2D,
        dist: &[f64],
        q: Point2D,
        q_links: &[(usize, f64)],
    ) -> Option<f64> {
        if p.key() == q.key() {
            return Some(0.0);
        }
        let direct = if self.visible(p, q) {
            p.distance(&q)
        } else {
            f64::INFINITY
        };
        let best = q_links
            .iter()
            .map(|&(j, d)| dist[j] + d)
            .fold(direct, f64::min);
        best.is_finite().then_some(best)
    }

    /// Attach `p` to a scratch copy of the graph, returning its index.
    fn attach(
        &self,
        points: &mut Vec<Point2D>,
        edges: &mut Vec<Vec<(usize, f64)>>,
        p: Point2D,
    ) -> usize {
        let idx = points.len();
        let mut adjacency = Vec::new();
        for (j, &q) in points.iter().enumerate() {
            if self.visible(p, q) {
                let d = p.distance(&q);
                adjacency.push((j, d));
                edges[j].push((idx, d));
            }
        }
        points.push(p);
        edges.push(adjacency);
        idx
    }
}

/// Cyrus-Beck clip of `pq` against a counter-clockwise convex polygon.
fn crosses_interior(poly: &Polygon, p: Point2D, q: Point2D) -> bool {
    let d = q - p;
    let mut t_enter = 0.0_f64;
    let mut t_exit = 1.0_f64;

    for (a, b) in poly.edges() {
        let e = b - a;
        // Inside half-plane: cross(e, x - a) >= 0
        let num = e.cross(&(p - a));
        let den = e.cross(&d);

        if den.abs() < f64::EPSILON {
            if num < 0.0 {
                // Parallel and outside this edge.
                return false;
            }
            continue;
        }

        let t = -num / den;
        if den > 0.0 {
            t_enter = t_enter.max(t);
        } else {
            t_exit = t_exit.min(t);
        }
        if t_enter > t_exit {
            return false;
        }
    }

    if t_exit - t_enter <= CHORD_EPS {
        return false;
    }

    let mid = p.lerp(&q, 0.5 * (t_enter + t_exit));
    poly.contains_strict(mid)
}
