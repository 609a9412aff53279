//! Runtime route planning over a loaded waypoint graph.
//!
//! # Lifecycle
//!
//! ```text
//! Loaded -> (insert_node | mark_node)* -> (solve_route)? -> reset -> Loaded
//! ```
//!
//! The shortest-path algorithm, TSP solver and distance metric are injected
//! at construction. `solve_route` computes every path before touching any
//! tag, so a failed solve leaves the graph exactly as it was.

use log::{debug, info, warn};

use super::category::{EdgeCategory, NodeCategory, Origin};
use super::definition::GraphDefinition;
use super::waypoint_graph::{NodeState, WaypointGraph};
use crate::config::PlannerConfig;
use crate::core::{DistanceMetric, GridPoint, Manhattan};
use crate::error::{MargaError, Result};
use crate::pathfinding::{Dijkstra, ShortestPath};
use crate::tsp::{GreedyTwoOpt, TspSolver, path_cost, validate_tour};

/// Result of [`GraphModel::solve_route`].
#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    /// Every node to traverse, first waypoint included.
    pub nodes: Vec<GridPoint>,
    /// To-visit waypoints in visiting order.
    pub waypoints: Vec<GridPoint>,
    /// Sum of distance-matrix entries along the visiting order.
    pub cost: i64,
}

impl Route {
    /// Consecutive node pairs along the route.
    pub fn edges(&self) -> impl Iterator<Item = (GridPoint, GridPoint)> + '_ {
        self.nodes.windows(2).map(|w| (w[0], w[1]))
    }
}

/// Mutable labelled waypoint graph with route solving.
pub struct GraphModel {
    graph: WaypointGraph,
    metric: Box<dyn DistanceMetric>,
    shortest_path: Box<dyn ShortestPath>,
    tsp: Box<dyn TspSolver>,
}

impl std::fmt::Debug for GraphModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphModel")
            .field("nodes", &self.graph.node_count())
            .field("edges", &self.graph.edge_count())
            .field("metric", &self.metric.name())
            .field("shortest_path", &self.shortest_path.name())
            .field("tsp", &self.tsp.name())
            .finish()
    }
}

impl GraphModel {
    /// Load `definition` with Manhattan metric, Dijkstra and the greedy solver.
    pub fn new(definition: &GraphDefinition) -> Result<Self> {
        Self::with_components(
            definition,
            Box::new(Manhattan),
            Box::new(Dijkstra),
            Box::new(GreedyTwoOpt::default()),
        )
    }

    /// Load `definition` with the components named in `config`.
    pub fn from_config(definition: &GraphDefinition, config: &PlannerConfig) -> Result<Self> {
        Self::with_components(
            definition,
            config.metric.build(),
            config.shortest_path.build(),
            config.tsp.build(),
        )
    }

    /// Load `definition` with explicit components.
    pub fn with_components(
        definition: &GraphDefinition,
        metric: Box<dyn DistanceMetric>,
        shortest_path: Box<dyn ShortestPath>,
        tsp: Box<dyn TspSolver>,
    ) -> Result<Self> {
        let mut model = Self {
            graph: WaypointGraph::new(),
            metric,
            shortest_path,
            tsp,
        };
        model.load(definition)?;
        Ok(model)
    }

    /// Replace the graph with `definition`, everything tagged `Base*`.
    ///
    /// Duplicate nodes and edges are ignored. Self-loops are skipped. An edge
    /// naming an unlisted node is an [`MargaError::InvalidDefinition`].
    pub fn load(&mut self, definition: &GraphDefinition) -> Result<()> {
        definition.validate()?;

        let mut graph = WaypointGraph::new();
        for &p in &definition.nodes {
            let state = NodeState {
                category: NodeCategory::BaseNode,
                to_visit: false,
                origin: Origin::Skeleton,
            };
            if graph.add_node(p, state).is_err() {
                debug!("[GraphModel] duplicate node {} ignored", p);
            }
        }

        for &(a, b) in &definition.edges {
            if a == b {
                warn!("[GraphModel] self-loop at {} skipped", a);
                continue;
            }
            graph.add_edge(a, b, EdgeCategory::BaseEdge, Origin::Skeleton)?;
        }

        info!(
            "[GraphModel] loaded {} nodes, {} edges",
            graph.node_count(),
            graph.edge_count()
        );
        self.graph = graph;
        Ok(())
    }

    /// Underlying graph (read-only).
    pub fn graph(&self) -> &WaypointGraph {
        &self.graph
    }

    /// Metric in use.
    pub fn metric(&self) -> &dyn DistanceMetric {
        self.metric.as_ref()
    }

    /// Current tag of node `p`.
    pub fn node_category(&self, p: GridPoint) -> Option<NodeCategory> {
        self.graph.node(p).map(|s| s.category)
    }

    /// Current tag of edge `a - b`.
    pub fn edge_category(&self, a: GridPoint, b: GridPoint) -> Option<EdgeCategory> {
        self.graph.edge(a, b).map(|e| e.category)
    }

    /// Add `point` as a to-visit user node attached to its nearest node.
    ///
    /// The nearest node is chosen among nodes not marked to-visit by the
    /// configured metric; the first one found wins ties. Returns that node.
    pub fn insert_node(&mut self, point: GridPoint) -> Result<GridPoint> {
        if self.graph.contains(point) {
            return Err(MargaError::NodeExists(point));
        }

        let mut nearest: Option<(GridPoint, f64)> = None;
        for (candidate, state) in self.graph.nodes() {
            if state.to_visit {
                continue;
            }
            let d = self.metric.distance(point, candidate);
            match nearest {
                Some((_, best)) if !(best > d) => {}
                _ => nearest = Some((candidate, d)),
            }
        }
        let (nearest, distance) = nearest.ok_or(MargaError::EmptySkeleton)?;

        self.graph.add_node(
            point,
            NodeState {
                category: NodeCategory::UserNode,
                to_visit: true,
                origin: Origin::Inserted,
            },
        )?;
        self.graph
            .add_edge(point, nearest, EdgeCategory::SolutionEdge, Origin::Inserted)?;

        debug!(
            "[GraphModel] inserted {} -> {} ({} {:.1})",
            point,
            nearest,
            self.metric.name(),
            distance
        );
        Ok(nearest)
    }

    /// Mark an existing node as to-visit.
    pub fn mark_node(&mut self, point: GridPoint) -> Result<()> {
        let state = self
            .graph
            .node_mut(point)
            .ok_or(MargaError::UnknownNode(point))?;
        state.to_visit = true;
        if !state.category.is_solution() {
            state.category = NodeCategory::UserNode;
        }
        Ok(())
    }

    /// Nodes currently tagged `category`, in iteration order.
    pub fn list_nodes_by_category(&self, category: NodeCategory) -> Vec<GridPoint> {
        self.graph
            .nodes()
            .filter(|(_, s)| s.category == category)
            .map(|(p, _)| p)
            .collect()
    }

    /// Edges currently tagged `category`, in insertion order.
    pub fn list_edges_by_category(&self, category: EdgeCategory) -> Vec<(GridPoint, GridPoint)> {
        self.graph
            .edges()
            .filter(|e| e.category == category)
            .map(|e| (e.a, e.b))
            .collect()
    }

    /// To-visit nodes, in iteration order.
    pub fn waypoints(&self) -> Vec<GridPoint> {
        self.graph
            .nodes()
            .filter(|(_, s)| s.to_visit)
            .map(|(p, _)| p)
            .collect()
    }

    /// Remove inserted nodes, clear marks and restore `Base*` tags.
    pub fn reset(&mut self) {
        let removed = self
            .graph
            .retain_nodes(|_, state| state.origin == Origin::Skeleton);

        let positions: Vec<GridPoint> = self.graph.nodes().map(|(p, _)| p).collect();
        for p in positions {
            if let Some(state) = self.graph.node_mut(p) {
                state.category = NodeCategory::BaseNode;
                state.to_visit = false;
            }
        }
        let edges: Vec<(GridPoint, GridPoint)> =
            self.graph.edges().map(|e| (e.a, e.b)).collect();
        for (a, b) in edges {
            if let Some(edge) = self.graph.edge_mut(a, b) {
                edge.category = EdgeCategory::BaseEdge;
            }
        }
        debug!("[GraphModel] reset, removed {} inserted nodes", removed);
    }

    /// Pairwise shortest-path lengths over the to-visit nodes.
    ///
    /// Lengths are rounded to the nearest integer. The matrix is symmetric
    /// with a zero diagonal, indexed in [`waypoints`](Self::waypoints) order.
    pub fn distance_matrix(&self) -> Result<Vec<Vec<i64>>> {
        let waypoints = self.waypoints();
        if waypoints.is_empty() {
            return Err(MargaError::NotEnoughWaypoints {
                required: 1,
                found: 0,
            });
        }
        self.matrix_for(&waypoints)
    }

    fn matrix_for(&self, waypoints: &[GridPoint]) -> Result<Vec<Vec<i64>>> {
        let view = self.graph.view();
        let ids: Vec<usize> = waypoints
            .iter()
            .map(|&p| self.graph.index_of(p).ok_or(MargaError::UnknownNode(p)))
            .collect::<Result<_>>()?;

        let n = ids.len();
        let mut matrix = vec![vec![0i64; n]; n];
        for i in 0..n {
            for j in (i + 1)..n {
                let length = self
                    .shortest_path
                    .path_length(&view, ids[i], ids[j], self.metric.as_ref())
                    .ok_or(MargaError::NoPath {
                        from: waypoints[i],
                        to: waypoints[j],
                    })?;
                let rounded = length.round() as i64;
                matrix[i][j] = rounded;
                matrix[j][i] = rounded;
            }
        }
        Ok(matrix)
    }

    /// Order the to-visit nodes and stitch shortest paths between them.
    ///
    /// Tags route edges `SolutionEdge`, the first node `SolutionStartNode`
    /// and the last `SolutionEndNode`. Tags from a previous route are
    /// cleared first.
    pub fn solve_route(&mut self) -> Result<Route> {
        let waypoints = self.waypoints();
        if waypoints.len() < 2 {
            return Err(MargaError::NotEnoughWaypoints {
                required: 2,
                found: waypoints.len(),
            });
        }

        let matrix = self.matrix_for(&waypoints)?;
        let order = self.tsp.solve(&matrix)?;
        validate_tour(&order, waypoints.len())?;
        let cost = path_cost(&matrix, &order);
        let ordered: Vec<GridPoint> = order.iter().map(|&i| waypoints[i]).collect();

        let view = self.graph.view();
        let mut nodes = vec![ordered[0]];
        for pair in ordered.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            let start = self.graph.index_of(from).ok_or(MargaError::UnknownNode(from))?;
            let goal = self.graph.index_of(to).ok_or(MargaError::UnknownNode(to))?;
            let result = self
                .shortest_path
                .find_path(&view, start, goal, self.metric.as_ref())
                .ok_or(MargaError::NoPath { from, to })?;
            nodes.extend(
                result
                    .path
                    .iter()
                    .skip(1)
                    .filter_map(|&i| self.graph.position(i)),
            );
        }

        let route = Route {
            nodes,
            waypoints: ordered,
            cost,
        };
        self.apply_route_tags(&route);

        info!(
            "[GraphModel] route over {} waypoints: {} nodes, cost {} ({} / {} / {})",
            route.waypoints.len(),
            route.nodes.len(),
            route.cost,
            self.tsp.name(),
            self.shortest_path.name(),
            self.metric.name()
        );
        Ok(route)
    }

    fn apply_route_tags(&mut self, route: &Route) {
        self.clear_route_tags();

        for (a, b) in route.edges() {
            if let Some(edge) = self.graph.edge_mut(a, b) {
                edge.category = EdgeCategory::SolutionEdge;
            }
        }
        if let Some(state) = route.nodes.first().and_then(|&p| self.graph.node_mut(p)) {
            state.category = NodeCategory::SolutionStartNode;
        }
        if let Some(state) = route.nodes.last().and_then(|&p| self.graph.node_mut(p)) {
            state.category = NodeCategory::SolutionEndNode;
        }
    }

    fn clear_route_tags(&mut self) {
        let positions: Vec<GridPoint> = self.graph.nodes().map(|(p, _)| p).collect();
        for p in positions {
            if let Some(state) = self.graph.node_mut(p) {
                state.category = state.resting_category();
            }
        }
        let edges: Vec<(GridPoint, GridPoint)> =
            self.graph.edges().map(|e| (e.a, e.b)).collect();
        for (a, b) in edges {
            if let Some(edge) = self.graph.edge_mut(a, b) {
                edge.category = edge.resting_category();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Euclidean;
    use crate::pathfinding::AStar;
    use crate::tsp::HeldKarp;

    fn p(x: i64, y: i64) -> GridPoint {
        GridPoint::new(x, y)
    }

    fn fixture() -> GraphDefinition {
        let nodes = vec![p(2, 1), p(2, 5), p(6, 5), p(6, 1), p(5, -2)];
        let edges = vec![
            (p(2, 1), p(2, 5)),
            (p(2, 5), p(6, 5)),
            (p(6, 5), p(6, 1)),
            (p(6, 1), p(5, -2)),
            (p(5, -2), p(2, 1)),
        ];
        GraphDefinition::new(nodes, edges)
    }

    #[test]
    fn test_load_tags_base() {
        let model = GraphModel::new(&fixture()).unwrap();
        assert_eq!(model.list_nodes_by_category(NodeCategory::BaseNode).len(), 5);
        assert_eq!(model.list_edges_by_category(EdgeCategory::BaseEdge).len(), 5);
        assert!(model.list_nodes_by_category(NodeCategory::UserNode).is_empty());
    }

    #[test]
    fn test_load_rejects_unknown_endpoint() {
        let mut def = fixture();
        def.edges.push((p(2, 1), p(100, 100)));
        assert!(matches!(
            GraphModel::new(&def),
            Err(MargaError::InvalidDefinition(_))
        ));
    }

    #[test]
    fn test_load_skips_duplicates_and_self_loops() {
        let mut def = fixture();
        def.nodes.push(p(2, 1));
        def.edges.push((p(2, 5), p(2, 1)));
        def.edges.push((p(6, 5), p(6, 5)));
        let model = GraphModel::new(&def).unwrap();
        assert_eq!(model.graph().node_count(), 5);
        assert_eq!(model.graph().edge_count(), 5);
    }

    #[test]
    fn test_insert_node_attaches_to_nearest() {
        let mut model = GraphModel::new(&fixture()).unwrap();
        assert_eq!(model.insert_node(p(5, 4)).unwrap(), p(6, 5));
        assert_eq!(
            model.edge_category(p(5, 4), p(6, 5)),
            Some(EdgeCategory::SolutionEdge)
        );

        // (2, 1) and (2, 5) tie; the first in iteration order wins.
        assert_eq!(model.insert_node(p(2, 3)).unwrap(), p(2, 1));
        assert_eq!(model.graph().node_count(), 7);
        assert_eq!(model.graph().edge_count(), 7);
    }

    #[test]
    fn test_insert_node_errors() {
        let mut model = GraphModel::new(&fixture()).unwrap();
        assert!(matches!(
            model.insert_node(p(2, 1)),
            Err(MargaError::NodeExists(_))
        ));

        let mut empty = GraphModel::new(&GraphDefinition::default()).unwrap();
        assert!(matches!(
            empty.insert_node(p(0, 0)),
            Err(MargaError::EmptySkeleton)
        ));
    }

    #[test]
    fn test_list_after_insert_and_reset() {
        let mut model = GraphModel::new(&fixture()).unwrap();
        model.insert_node(p(3, 3)).unwrap();
        assert_eq!(model.list_nodes_by_category(NodeCategory::BaseNode).len(), 5);
        assert_eq!(model.list_nodes_by_category(NodeCategory::UserNode), vec![p(3, 3)]);

        model.reset();
        assert_eq!(model.list_nodes_by_category(NodeCategory::BaseNode).len(), 5);
        assert!(model.list_nodes_by_category(NodeCategory::UserNode).is_empty());
        assert_eq!(model.graph().edge_count(), 5);
    }

    #[test]
    fn test_distance_matrix_fixture() {
        let mut model = GraphModel::new(&fixture()).unwrap();
        for node in fixture().nodes {
            model.mark_node(node).unwrap();
        }
        let expected = vec![
            vec![0, 4, 8, 10, 6],
            vec![4, 0, 4, 8, 10],
            vec![8, 4, 0, 4, 8],
            vec![10, 8, 4, 0, 4],
            vec![6, 10, 8, 4, 0],
        ];
        assert_eq!(model.distance_matrix().unwrap(), expected);
    }

    #[test]
    fn test_distance_matrix_requires_waypoints() {
        let model = GraphModel::new(&fixture()).unwrap();
        assert!(matches!(
            model.distance_matrix(),
            Err(MargaError::NotEnoughWaypoints { required: 1, found: 0 })
        ));
    }

    #[test]
    fn test_solve_route_requires_two_waypoints() {
        let mut model = GraphModel::new(&fixture()).unwrap();
        model.insert_node(p(5, 4)).unwrap();
        assert!(matches!(
            model.solve_route(),
            Err(MargaError::NotEnoughWaypoints { required: 2, found: 1 })
        ));
        // Nothing was tagged.
        assert!(model.list_nodes_by_category(NodeCategory::SolutionStartNode).is_empty());
    }

    #[test]
    fn test_solve_route_tags_and_stitches() {
        let mut model = GraphModel::new(&fixture()).unwrap();
        model.insert_node(p(5, 4)).unwrap();
        model.insert_node(p(1, 0)).unwrap();
        let route = model.solve_route().unwrap();

        // (5,4) -> (6,5) -> (2,5) -> (2,1) -> (1,0), first node kept.
        assert_eq!(route.nodes.first(), Some(&p(5, 4)));
        assert_eq!(route.nodes.last(), Some(&p(1, 0)));
        assert_eq!(route.nodes.len(), 5);
        assert_eq!(route.cost, 2 + 4 + 4 + 2);

        for (a, b) in route.edges() {
            assert_eq!(model.edge_category(a, b), Some(EdgeCategory::SolutionEdge));
        }
        assert_eq!(
            model.list_nodes_by_category(NodeCategory::SolutionStartNode),
            vec![p(5, 4)]
        );
        assert_eq!(
            model.list_nodes_by_category(NodeCategory::SolutionEndNode),
            vec![p(1, 0)]
        );
    }

    #[test]
    fn test_resolve_clears_previous_route() {
        let mut model = GraphModel::new(&fixture()).unwrap();
        model.insert_node(p(5, 4)).unwrap();
        model.insert_node(p(1, 0)).unwrap();
        model.solve_route().unwrap();
        model.insert_node(p(7, 1)).unwrap();
        let route = model.solve_route().unwrap();

        assert_eq!(model.list_nodes_by_category(NodeCategory::SolutionStartNode).len(), 1);
        assert_eq!(model.list_nodes_by_category(NodeCategory::SolutionEndNode).len(), 1);
        let tagged = model.list_edges_by_category(EdgeCategory::SolutionEdge);
        for edge in &tagged {
            let on_route = route.edges().any(|(a, b)| {
                (a, b) == *edge || (b, a) == *edge
            });
            let attachment = model
                .graph()
                .edge(edge.0, edge.1)
                .is_some_and(|e| e.origin == Origin::Inserted);
            assert!(on_route || attachment);
        }
    }

    #[test]
    fn test_reset_after_solve_restores_base() {
        let mut model = GraphModel::new(&fixture()).unwrap();
        model.insert_node(p(5, 4)).unwrap();
        model.mark_node(p(2, 1)).unwrap();
        model.solve_route().unwrap();
        model.reset();

        assert_eq!(model.list_nodes_by_category(NodeCategory::BaseNode).len(), 5);
        assert_eq!(model.list_edges_by_category(EdgeCategory::BaseEdge).len(), 5);
        assert!(model.waypoints().is_empty());
    }

    #[test]
    fn test_alternative_components() {
        let mut model = GraphModel::with_components(
            &fixture(),
            Box::new(Euclidean),
            Box::new(AStar),
            Box::new(HeldKarp::default()),
        )
        .unwrap();
        for node in fixture().nodes {
            model.mark_node(node).unwrap();
        }
        let matrix = model.distance_matrix().unwrap();
        for i in 0..5 {
            assert_eq!(matrix[i][i], 0);
            for j in 0..5 {
                assert_eq!(matrix[i][j], matrix[j][i]);
            }
        }
        let route = model.solve_route().unwrap();
        assert_eq!(route.waypoints.len(), 5);
    }
}
