//! A* search over a waypoint graph.
//!
//! The distance metric doubles as the heuristic. Edge weights are the same
//! metric, so the heuristic is consistent and the first expansion of the
//! goal is optimal.

use log::trace;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::{GraphView, PathResult, ShortestPath};
use crate::core::DistanceMetric;

/// A node in the A* open set
#[derive(Clone, Copy, Debug)]
struct AStarNode {
    node: usize,
    g_cost: f64, // Cost from start
    f_cost: f64, // g_cost + heuristic
}

impl Eq for AStarNode {}

impl PartialEq for AStarNode {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
    }
}

impl Ord for AStarNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior
        other
            .f_cost
            .partial_cmp(&self.f_cost)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for AStarNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A* search with the edge metric as heuristic.
#[derive(Clone, Copy, Debug, Default)]
pub struct AStar;

impl ShortestPath for AStar {
    fn find_path(
        &self,
        graph: &GraphView<'_>,
        start: usize,
        goal: usize,
        metric: &dyn DistanceMetric,
    ) -> Option<PathResult> {
        let n = graph.len();
        if start >= n || goal >= n {
            return None;
        }

        let goal_pos = graph.positions[goal];
        let heuristic = |i: usize| metric.distance(graph.positions[i], goal_pos);

        let mut g_score = vec![f64::INFINITY; n];
        let mut came_from: Vec<Option<usize>> = vec![None; n];
        let mut closed = vec![false; n];
        g_score[start] = 0.0;

        let mut open = BinaryHeap::new();
        open.push(AStarNode {
            node: start,
            g_cost: 0.0,
            f_cost: heuristic(start),
        });

        let mut expanded = 0usize;
        while let Some(AStarNode { node, g_cost, .. }) = open.pop() {
            if closed[node] {
                continue;
            }
            closed[node] = true;
            expanded += 1;

            if node == goal {
                let mut path = vec![goal];
                let mut current = goal;
                while let Some(p) = came_from[current] {
                    path.push(p);
                    current = p;
                }
                path.reverse();
                trace!(
                    "[AStar] {} -> {}: cost {:.2}, {} nodes expanded",
                    start, goal, g_cost, expanded
                );
                return Some(PathResult {
                    path,
                    cost: g_cost,
                });
            }

            for &neighbor in &graph.neighbors[node] {
                if closed[neighbor] {
                    continue;
                }
                let tentative =
                    g_cost + metric.distance(graph.positions[node], graph.positions[neighbor]);
                if tentative < g_score[neighbor] {
                    g_score[neighbor] = tentative;
                    came_from[neighbor] = Some(node);
                    open.push(AStarNode {
                        node: neighbor,
                        g_cost: tentative,
                        f_cost: tentative + heuristic(neighbor),
                    });
                }
            }
        }

        trace!("[AStar] {} -> {}: no path", start, goal);
        None
    }

    fn name(&self) -> &'static str {
        "astar"
    }
}
