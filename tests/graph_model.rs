//! Graph model integration tests against the JSON fixture.
//!
//! The fixture is a 5-node ring:
//!
//! ```text
//!   (2,5) ──── (6,5)
//!     │          │
//!   (2,1)      (6,1)
//!       \      /
//!       (5,-2)
//! ```

use marga::core::{Euclidean, GridPoint, Manhattan};
use marga::graph::{EdgeCategory, GraphDefinition, GraphModel, NodeCategory};
use marga::io::{load_graph, save_graph};
use marga::motion::RobotController;
use marga::pathfinding::{AStar, Dijkstra};
use marga::tsp::{GreedyTwoOpt, HeldKarp, cycle_cost, path_cost};
use marga::{MargaError, PlannerConfig, ShortestPathKind, TspKind};
use proptest::prelude::*;
use std::path::PathBuf;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/graph.json")
}

fn fixture() -> GraphDefinition {
    load_graph(&fixture_path()).unwrap()
}

fn p(x: i64, y: i64) -> GridPoint {
    GridPoint::new(x, y)
}

/// Minimum Hamiltonian cycle cost through node 0, by enumeration.
fn brute_force_cycle(matrix: &[Vec<i64>]) -> i64 {
    fn permute(rest: &mut Vec<usize>, k: usize, matrix: &[Vec<i64>], best: &mut i64) {
        if k == rest.len() {
            let mut order = vec![0];
            order.extend(rest.iter().copied());
            *best = (*best).min(cycle_cost(matrix, &order));
            return;
        }
        for i in k..rest.len() {
            rest.swap(k, i);
            permute(rest, k + 1, matrix, best);
            rest.swap(k, i);
        }
    }

    let mut rest: Vec<usize> = (1..matrix.len()).collect();
    let mut best = i64::MAX;
    permute(&mut rest, 0, matrix, &mut best);
    best
}

#[test]
fn test_fixture_distance_matrix() {
    let mut model = GraphModel::new(&fixture()).unwrap();
    for node in fixture().nodes {
        model.mark_node(node).unwrap();
    }
    assert_eq!(
        model.distance_matrix().unwrap(),
        vec![
            vec![0, 4, 8, 10, 6],
            vec![4, 0, 4, 8, 10],
            vec![8, 4, 0, 4, 8],
            vec![10, 8, 4, 0, 4],
            vec![6, 10, 8, 4, 0],
        ]
    );
}

#[test]
fn test_insert_creates_solution_edge() {
    let mut model = GraphModel::new(&fixture()).unwrap();
    model.insert_node(p(5, 4)).unwrap();
    assert_eq!(
        model.list_edges_by_category(EdgeCategory::SolutionEdge),
        vec![(p(5, 4), p(6, 5))]
    );
    assert_eq!(model.node_category(p(5, 4)), Some(NodeCategory::UserNode));
}

#[test]
fn test_load_insert_reset_restores_base() {
    let mut model = GraphModel::new(&fixture()).unwrap();
    let base_nodes = model.list_nodes_by_category(NodeCategory::BaseNode);
    let base_edges = model.list_edges_by_category(EdgeCategory::BaseEdge);

    model.insert_node(p(5, 4)).unwrap();
    model.insert_node(p(0, 0)).unwrap();
    model.mark_node(p(6, 1)).unwrap();
    model.solve_route().unwrap();
    model.reset();

    assert_eq!(model.list_nodes_by_category(NodeCategory::BaseNode), base_nodes);
    assert_eq!(model.list_edges_by_category(EdgeCategory::BaseEdge), base_edges);
    for category in [
        NodeCategory::UserNode,
        NodeCategory::SolutionStartNode,
        NodeCategory::SolutionEndNode,
    ] {
        assert!(model.list_nodes_by_category(category).is_empty());
    }
    assert!(model.list_edges_by_category(EdgeCategory::SolutionEdge).is_empty());
}

#[test]
fn test_route_cost_matches_matrix_along_order() {
    let mut model = GraphModel::new(&fixture()).unwrap();
    model.insert_node(p(5, 4)).unwrap();
    model.insert_node(p(1, 0)).unwrap();
    model.insert_node(p(7, 1)).unwrap();

    let waypoints = model.waypoints();
    let matrix = model.distance_matrix().unwrap();
    let route = model.solve_route().unwrap();

    let order: Vec<usize> = route
        .waypoints
        .iter()
        .map(|w| waypoints.iter().position(|x| x == w).unwrap())
        .collect();
    assert_eq!(order[0], 0);
    assert_eq!(route.cost, path_cost(&matrix, &order));

    // Stitched route walks graph edges only.
    for (a, b) in route.edges() {
        assert!(model.graph().has_edge(a, b), "{} - {} is not an edge", a, b);
    }
}

#[test]
fn test_exact_solver_matches_brute_force() {
    let mut model = GraphModel::with_components(
        &fixture(),
        Box::new(Manhattan),
        Box::new(Dijkstra),
        Box::new(HeldKarp::default()),
    )
    .unwrap();
    model.insert_node(p(4, 6)).unwrap();
    for node in fixture().nodes {
        model.mark_node(node).unwrap();
    }

    let matrix = model.distance_matrix().unwrap();
    assert_eq!(matrix.len(), 6);
    let route = model.solve_route().unwrap();
    let waypoints = model.waypoints();
    let order: Vec<usize> = route
        .waypoints
        .iter()
        .map(|w| waypoints.iter().position(|x| x == w).unwrap())
        .collect();

    assert_eq!(cycle_cost(&matrix, &order), brute_force_cycle(&matrix));
}

#[test]
fn test_components_from_config() {
    let config = PlannerConfig {
        shortest_path: ShortestPathKind::Astar,
        tsp: TspKind::Exact,
        ..Default::default()
    };
    let mut model = GraphModel::from_config(&fixture(), &config).unwrap();
    model.insert_node(p(5, 4)).unwrap();
    model.insert_node(p(1, 0)).unwrap();
    assert_eq!(model.solve_route().unwrap().cost, 12);

    let mut euclid = GraphModel::with_components(
        &fixture(),
        Box::new(Euclidean),
        Box::new(AStar),
        Box::new(GreedyTwoOpt::default()),
    )
    .unwrap();
    euclid.insert_node(p(5, 4)).unwrap();
    euclid.insert_node(p(1, 0)).unwrap();
    assert!(euclid.solve_route().is_ok());
}

#[test]
fn test_disconnected_waypoints_are_no_path() {
    let mut def = fixture();
    def.nodes.push(p(40, 40));
    let mut model = GraphModel::new(&def).unwrap();
    model.mark_node(p(40, 40)).unwrap();
    model.mark_node(p(2, 1)).unwrap();

    assert!(matches!(model.solve_route(), Err(MargaError::NoPath { .. })));
    assert!(model.list_nodes_by_category(NodeCategory::SolutionStartNode).is_empty());
}

#[test]
fn test_failed_solve_keeps_previous_route_tags() {
    let mut def = fixture();
    def.nodes.push(p(40, 40));
    let mut model = GraphModel::new(&def).unwrap();
    model.insert_node(p(5, 4)).unwrap();
    model.insert_node(p(1, 0)).unwrap();
    model.solve_route().unwrap();

    let starts = model.list_nodes_by_category(NodeCategory::SolutionStartNode);
    let ends = model.list_nodes_by_category(NodeCategory::SolutionEndNode);
    let edges = model.list_edges_by_category(EdgeCategory::SolutionEdge);
    assert_eq!(starts.len(), 1);
    assert_eq!(ends.len(), 1);

    model.mark_node(p(40, 40)).unwrap();
    assert!(matches!(model.solve_route(), Err(MargaError::NoPath { .. })));

    assert_eq!(model.list_nodes_by_category(NodeCategory::SolutionStartNode), starts);
    assert_eq!(model.list_nodes_by_category(NodeCategory::SolutionEndNode), ends);
    assert_eq!(model.list_edges_by_category(EdgeCategory::SolutionEdge), edges);
}

#[test]
fn test_save_load_graph() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("visibility_graph-0-0.json");
    save_graph(&fixture(), &path).unwrap();
    assert_eq!(load_graph(&path).unwrap(), fixture());
}

#[test]
fn test_robot_follows_route() {
    let mut model = GraphModel::new(&fixture()).unwrap();
    model.insert_node(p(5, 4)).unwrap();
    model.insert_node(p(1, 0)).unwrap();
    let route = model.solve_route().unwrap();

    let mut robot = RobotController::new(route.nodes[0], 3).unwrap();
    robot.push_route(&route.nodes[1..]);
    let mut ticks = 0;
    while robot.tick().is_some() {
        ticks += 1;
    }
    assert!(ticks >= route.nodes.len() - 1);
    assert_eq!(robot.position(), p(1, 0));
}

proptest! {
    #[test]
    fn prop_insert_adds_one_node_and_edge(
        points in prop::collection::vec((-10i64..15, -10i64..15), 1..5)
    ) {
        let mut model = GraphModel::new(&fixture()).unwrap();
        let mut inserted = Vec::new();
        for (x, y) in points {
            let point = p(x, y);
            if model.graph().contains(point) {
                continue;
            }
            let nodes = model.graph().node_count();
            let edges = model.graph().edge_count();
            model.insert_node(point).unwrap();
            prop_assert_eq!(model.graph().node_count(), nodes + 1);
            prop_assert_eq!(model.graph().edge_count(), edges + 1);
            inserted.push(point);
        }

        for node in fixture().nodes {
            model.mark_node(node).unwrap();
        }
        let matrix = model.distance_matrix().unwrap();
        let n = matrix.len();
        prop_assert_eq!(n, 5 + inserted.len());
        for i in 0..n {
            prop_assert_eq!(matrix[i][i], 0);
            for j in 0..n {
                prop_assert_eq!(matrix[i][j], matrix[j][i]);
                if i != j {
                    prop_assert!(matrix[i][j] > 0);
                }
            }
        }

        model.reset();
        prop_assert_eq!(model.graph().node_count(), 5);
        prop_assert_eq!(model.graph().edge_count(), 5);
    }
}
