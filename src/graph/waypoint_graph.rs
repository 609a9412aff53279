//! Labelled undirected graph over integer waypoints.
//!
//! Nodes keep insertion order, which is the iteration order exposed to
//! callers. Edges are unordered: `(a, b)` and `(b, a)` are the same edge.

use std::collections::HashMap;

use super::category::{EdgeCategory, NodeCategory, Origin};
use crate::core::GridPoint;
use crate::error::{MargaError, Result};
use crate::pathfinding::GraphView;

/// Per-node state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeState {
    /// Current tag.
    pub category: NodeCategory,
    /// Operator asked for this node to be visited.
    pub to_visit: bool,
    /// Skeleton or inserted at runtime.
    pub origin: Origin,
}

impl NodeState {
    /// Tag this node carries when no route is shown.
    pub fn resting_category(&self) -> NodeCategory {
        if self.to_visit {
            NodeCategory::UserNode
        } else {
            NodeCategory::BaseNode
        }
    }
}

/// Per-edge state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EdgeState {
    /// Endpoint in the order the edge was added.
    pub a: GridPoint,
    /// Other endpoint.
    pub b: GridPoint,
    /// Current tag.
    pub category: EdgeCategory,
    /// Skeleton or attachment of an inserted node.
    pub origin: Origin,
}

impl EdgeState {
    /// Tag this edge carries when no route is shown.
    pub fn resting_category(&self) -> EdgeCategory {
        match self.origin {
            Origin::Skeleton => EdgeCategory::BaseEdge,
            Origin::Inserted => EdgeCategory::SolutionEdge,
        }
    }
}

#[inline]
fn edge_key(a: GridPoint, b: GridPoint) -> (GridPoint, GridPoint) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Undirected waypoint graph with category tags.
#[derive(Clone, Debug, Default)]
pub struct WaypointGraph {
    positions: Vec<GridPoint>,
    states: Vec<NodeState>,
    index: HashMap<GridPoint, usize>,
    edges: Vec<EdgeState>,
    edge_index: HashMap<(GridPoint, GridPoint), usize>,
    adjacency: Vec<Vec<usize>>,
}

impl WaypointGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn contains(&self, p: GridPoint) -> bool {
        self.index.contains_key(&p)
    }

    pub fn has_edge(&self, a: GridPoint, b: GridPoint) -> bool {
        self.edge_index.contains_key(&edge_key(a, b))
    }

    /// Node id of `p`.
    pub fn index_of(&self, p: GridPoint) -> Option<usize> {
        self.index.get(&p).copied()
    }

    /// Position of node id `i`.
    pub fn position(&self, i: usize) -> Option<GridPoint> {
        self.positions.get(i).copied()
    }

    pub fn node(&self, p: GridPoint) -> Option<&NodeState> {
        self.index.get(&p).map(|&i| &self.states[i])
    }

    pub fn node_mut(&mut self, p: GridPoint) -> Option<&mut NodeState> {
        self.index.get(&p).map(|&i| &mut self.states[i])
    }

    pub fn edge(&self, a: GridPoint, b: GridPoint) -> Option<&EdgeState> {
        self.edge_index.get(&edge_key(a, b)).map(|&i| &self.edges[i])
    }

    pub fn edge_mut(&mut self, a: GridPoint, b: GridPoint) -> Option<&mut EdgeState> {
        self.edge_index
            .get(&edge_key(a, b))
            .map(|&i| &mut self.edges[i])
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = (GridPoint, &NodeState)> + '_ {
        self.positions.iter().copied().zip(self.states.iter())
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &EdgeState> + '_ {
        self.edges.iter()
    }

    /// Neighbours of `p` in edge insertion order.
    pub fn neighbors(&self, p: GridPoint) -> Vec<GridPoint> {
        self.index_of(p)
            .map(|i| self.adjacency[i].iter().map(|&j| self.positions[j]).collect())
            .unwrap_or_default()
    }

    /// Add a node. Fails with [`MargaError::NodeExists`] on a duplicate.
    pub fn add_node(&mut self, p: GridPoint, state: NodeState) -> Result<usize> {
        if self.index.contains_key(&p) {
            return Err(MargaError::NodeExists(p));
        }
        let i = self.positions.len();
        self.positions.push(p);
        self.states.push(state);
        self.adjacency.push(Vec::new());
        self.index.insert(p, i);
        Ok(i)
    }

    /// Add an undirected edge between existing nodes.
    ///
    /// Returns `Ok(false)` if the edge (in either orientation) already exists.
    pub fn add_edge(
        &mut self,
        a: GridPoint,
        b: GridPoint,
        category: EdgeCategory,
        origin: Origin,
    ) -> Result<bool> {
        let ia = self.index_of(a).ok_or(MargaError::UnknownNode(a))?;
        let ib = self.index_of(b).ok_or(MargaError::UnknownNode(b))?;
        let key = edge_key(a, b);
        if self.edge_index.contains_key(&key) {
            return Ok(false);
        }
        self.edge_index.insert(key, self.edges.len());
        self.edges.push(EdgeState {
            a,
            b,
            category,
            origin,
        });
        self.adjacency[ia].push(ib);
        if ia != ib {
            self.adjacency[ib].push(ia);
        }
        Ok(true)
    }

    /// Keep only nodes matching `keep`, dropping their incident edges.
    ///
    /// Survivors keep their relative order. Returns the number removed.
    pub fn retain_nodes<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(GridPoint, &NodeState) -> bool,
    {
        let before = self.positions.len();
        let old_positions = std::mem::take(&mut self.positions);
        let old_states = std::mem::take(&mut self.states);
        let old_edges = std::mem::take(&mut self.edges);
        self.index.clear();
        self.edge_index.clear();
        self.adjacency.clear();

        for (p, state) in old_positions.into_iter().zip(old_states) {
            if keep(p, &state) {
                // Positions were unique before, so this cannot fail.
                let _ = self.add_node(p, state);
            }
        }
        for edge in old_edges {
            if self.contains(edge.a) && self.contains(edge.b) {
                let _ = self.add_edge(edge.a, edge.b, edge.category, edge.origin);
            }
        }
        before - self.positions.len()
    }

    /// Borrowed adjacency view for shortest-path search.
    pub fn view(&self) -> GraphView<'_> {
        GraphView::new(&self.positions, &self.adjacency)
    }
}
