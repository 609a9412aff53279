//! # Marga: Visibility-Graph Route Planning for a Point Robot
//!
//! Builds sparse graphs of mutually visible free-space waypoints among convex
//! obstacles, then plans routes that visit an operator-chosen subset of
//! waypoints.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use marga::core::GridPoint;
//! use marga::graph::GraphModel;
//! use marga::io::load_graph;
//! use std::path::Path;
//!
//! let definition = load_graph(Path::new("visibility_graph-0-0.json")).unwrap();
//! let mut model = GraphModel::new(&definition).unwrap();
//! model.insert_node(GridPoint::new(120, 340)).unwrap();
//! model.insert_node(GridPoint::new(400, 90)).unwrap();
//!
//! let route = model.solve_route().unwrap();
//! println!("{} nodes, cost {}", route.nodes.len(), route.cost);
//! ```
//!
//! ## Coordinate Frames
//!
//! - **Generation**: real-valued [`core::Point2D`] in workspace units (cm),
//!   origin at a corner of the obstacle grid
//! - **Runtime**: integer [`core::GridPoint`], produced by
//!   [`io::WorkspaceTransform`] (`trunc(|v - map_size| * scale)` per axis)
//!
//! ## Architecture
//!
//! - [`core`]: points and distance metrics
//! - [`geometry`]: orientation, convex hull, polygons, visibility oracle
//! - [`generation`]: obstacle layouts, waypoint sampling, graph generation
//! - [`pathfinding`]: Dijkstra and A* behind [`pathfinding::ShortestPath`]
//! - [`tsp`]: greedy + 2-opt and Held-Karp behind [`tsp::TspSolver`]
//! - [`graph`]: tagged waypoint graph and route solving
//! - [`motion`]: displacement commands for the robot
//! - [`io`]: JSON exchange files and TSPLIB export
//! - [`render`]: category palette and SVG output
//! - [`config`]: TOML configuration
//!
//! ## Data Flow
//!
//! ```text
//!   Layout ──► VisibilityOracle ──► GraphGenerator ──► visibility_graph.json
//!                                                             │
//!                                                             ▼
//!   insert_node / mark_node ──────────────────────────► GraphModel
//!                                                             │ solve_route
//!                                       distance matrix ◄─────┤
//!                                       TspSolver order ◄─────┤
//!                                   ShortestPath stitch ◄─────┘
//!                                                             │
//!                                                             ▼
//!                                                Route ──► RobotController
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod generation;
pub mod geometry;
pub mod graph;
pub mod io;
pub mod motion;
pub mod pathfinding;
pub mod render;
pub mod tsp;

pub use config::{GenerationConfig, MargaConfig, PlannerConfig, WorkspaceConfig};
pub use core::{DistanceMetric, GridPoint, MetricKind, Point2D};
pub use error::{GenerationStage, MargaError, Result};
pub use generation::{GeneratedGraph, GraphGenerator, run_batch};
pub use geometry::{Polygon, VisibilityOracle};
pub use graph::{EdgeCategory, GraphDefinition, GraphModel, NodeCategory, Route};
pub use motion::RobotController;
pub use pathfinding::{ShortestPath, ShortestPathKind};
pub use tsp::{TspKind, TspSolver};
