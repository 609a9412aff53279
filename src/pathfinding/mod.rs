//! Shortest-path search over waypoint graphs.
//!
//! - **Dijkstra**: exhaustive uniform-cost search (default)
//! - **A\***: metric-guided search, same optimal cost
//!
//! Both implement [`ShortestPath`] and operate on a borrowed [`GraphView`],
//! so the graph model can swap algorithms at construction.
//!
//! ```rust,ignore
//! use marga::pathfinding::{Dijkstra, GraphView, ShortestPath};
//! use marga::core::Manhattan;
//!
//! let view = GraphView::new(&positions, &neighbors);
//! if let Some(result) = Dijkstra.find_path(&view, 0, 3, &Manhattan) {
//!     println!("cost {} via {:?}", result.cost, result.path);
//! }
//! ```

pub mod astar;
pub mod dijkstra;

pub use astar::AStar;
pub use dijkstra::{Dijkstra, DijkstraState, dijkstra, dijkstra_distances};

use serde::{Deserialize, Serialize};

use crate::core::{DistanceMetric, GridPoint};

/// Result of a shortest-path search.
#[derive(Clone, Debug, PartialEq)]
pub struct PathResult {
    /// Node indices from start to goal, inclusive.
    pub path: Vec<usize>,
    /// Total path cost.
    pub cost: f64,
}

/// Borrowed adjacency view of an undirected graph.
#[derive(Clone, Copy, Debug)]
pub struct GraphView<'a> {
    /// Node positions, indexed by node id.
    pub positions: &'a [GridPoint],
    /// Neighbour ids per node.
    pub neighbors: &'a [Vec<usize>],
}

impl<'a> GraphView<'a> {
    pub fn new(positions: &'a [GridPoint], neighbors: &'a [Vec<usize>]) -> Self {
        Self {
            positions,
            neighbors,
        }
    }

    /// Number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Adjacency list with edge weights from `metric`.
    pub fn weighted(&self, metric: &dyn DistanceMetric) -> Vec<Vec<(usize, f64)>> {
        self.neighbors
            .iter()
            .enumerate()
            .map(|(i, ns)| {
                ns.iter()
                    .map(|&j| (j, metric.distance(self.positions[i], self.positions[j])))
                    .collect()
            })
            .collect()
    }
}

/// Pluggable shortest-path algorithm.
pub trait ShortestPath {
    /// Node sequence and cost from `start` to `goal`, or `None` if unreachable.
    fn find_path(
        &self,
        graph: &GraphView<'_>,
        start: usize,
        goal: usize,
        metric: &dyn DistanceMetric,
    ) -> Option<PathResult>;

    /// Total cost from `start` to `goal`.
    fn path_length(
        &self,
        graph: &GraphView<'_>,
        start: usize,
        goal: usize,
        metric: &dyn DistanceMetric,
    ) -> Option<f64> {
        self.find_path(graph, start, goal, metric).map(|r| r.cost)
    }

    /// Name used in logs.
    fn name(&self) -> &'static str;
}

/// Algorithm selection as it appears in configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShortestPathKind {
    #[default]
    Dijkstra,
    Astar,
}

impl ShortestPathKind {
    /// Build the algorithm this kind names.
    pub fn build(self) -> Box<dyn ShortestPath> {
        match self {
            ShortestPathKind::Dijkstra => Box::new(Dijkstra),
            ShortestPathKind::Astar => Box::new(AStar),
        }
    }
}
