//! Dijkstra's shortest path algorithm.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::{GraphView, PathResult, ShortestPath};
use crate::core::DistanceMetric;

/// State for Dijkstra's algorithm priority queue.
#[derive(Clone, Copy, Debug)]
pub struct DijkstraState {
    /// Current path cost (distance).
    pub cost: f64,
    /// Current node index.
    pub node: usize,
}

impl PartialEq for DijkstraState {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost && self.node == other.node
    }
}

impl Eq for DijkstraState {}

impl Ord for DijkstraState {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap (BinaryHeap is max-heap by default)
        other
            .cost
            .partial_cmp(&self.cost)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for DijkstraState {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Find shortest path using Dijkstra's algorithm.
///
/// # Arguments
/// * `edges` - Adjacency list: edges[i] = [(neighbor_idx, distance), ...]
/// * `start` - Start node index
/// * `goal` - Goal node index
///
/// # Returns
/// PathResult with node indices and total cost, or None if no path exists.
pub fn dijkstra(edges: &[Vec<(usize, f64)>], start: usize, goal: usize) -> Option<PathResult> {
    let n = edges.len();

    if n == 0 || start >= n || goal >= n {
        return None;
    }

    if start == goal {
        return Some(PathResult {
            path: vec![start],
            cost: 0.0,
        });
    }

    let (dist, prev) = search(edges, start, Some(goal));

    if !dist[goal].is_finite() {
        return None;
    }

    // Reconstruct path
    let mut path = vec![goal];
    let mut current = goal;
    while current != start {
        current = prev[current]?;
        path.push(current);
    }
    path.reverse();

    Some(PathResult {
        path,
        cost: dist[goal],
    })
}

/// Single-source distances to every node.
///
/// Unreachable nodes get `f64::INFINITY`.
pub fn dijkstra_distances(edges: &[Vec<(usize, f64)>], start: usize) -> Vec<f64> {
    if start >= edges.len() {
        return vec![f64::INFINITY; edges.len()];
    }
    search(edges, start, None).0
}

fn search(
    edges: &[Vec<(usize, f64)>],
    start: usize,
    goal: Option<usize>,
) -> (Vec<f64>, Vec<Option<usize>>) {
    let n = edges.len();
    let mut dist: Vec<f64> = vec![f64::INFINITY; n];
    let mut prev: Vec<Option<usize>> = vec![None; n];
    dist[start] = 0.0;

    let mut heap = BinaryHeap::new();
    heap.push(DijkstraState {
        cost: 0.0,
        node: start,
    });

    while let Some(DijkstraState { cost, node }) = heap.pop() {
        // Skip if we've found a better path
        if cost > dist[node] {
            continue;
        }

        if Some(node) == goal {
            break;
        }

        for &(neighbor, edge_dist) in &edges[node] {
            let new_dist = cost + edge_dist;
            if new_dist < dist[neighbor] {
                dist[neighbor] = new_dist;
                prev[neighbor] = Some(node);
                heap.push(DijkstraState {
                    cost: new_dist,
                    node: neighbor,
                });
            }
        }
    }

    (dist, prev)
}

/// Dijkstra search over a waypoint graph, weighting edges by the metric.
#[derive(Clone, Copy, Debug, Default)]
pub struct Dijkstra;

impl ShortestPath for Dijkstra {
    fn find_path(
        &self,
        graph: &GraphView<'_>,
        start: usize,
        goal: usize,
        metric: &dyn DistanceMetric,
    ) -> Option<PathResult> {
        dijkstra(&graph.weighted(metric), start, goal)
    }

    fn name(&self) -> &'static str {
        "dijkstra"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn line_graph() -> Vec<Vec<(usize, f64)>> {
        // 0 - 1 - 2 - 3, plus a long shortcut 0 - 3
        vec![
            vec![(1, 1.0), (3, 5.0)],
            vec![(0, 1.0), (2, 1.0)],
            vec![(1, 1.0), (3, 1.0)],
            vec![(2, 1.0), (0, 5.0)],
        ]
    }

    #[test]
    fn test_dijkstra_prefers_cheaper_path() {
        let result = dijkstra(&line_graph(), 0, 3).unwrap();
        assert_eq!(result.path, vec![0, 1, 2, 3]);
        assert_relative_eq!(result.cost, 3.0);
    }

    #[test]
    fn test_dijkstra_same_node() {
        let result = dijkstra(&line_graph(), 2, 2).unwrap();
        assert_eq!(result.path, vec![2]);
        assert_relative_eq!(result.cost, 0.0);
    }

    #[test]
    fn test_dijkstra_unreachable() {
        let edges = vec![vec![(1, 1.0)], vec![(0, 1.0)], vec![]];
        assert!(dijkstra(&edges, 0, 2).is_none());
        assert!(dijkstra(&edges, 0, 7).is_none());
    }

    #[test]
    fn test_dijkstra_distances() {
        let dist = dijkstra_distances(&line_graph(), 0);
        assert_eq!(dist, vec![0.0, 1.0, 2.0, 3.0]);

        let edges = vec![vec![], vec![]];
        let dist = dijkstra_distances(&edges, 0);
        assert!(dist[1].is_infinite());
    }
}
