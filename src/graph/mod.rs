//! Waypoint graph model: tags, persistence shape and route solving.

mod category;
mod definition;
mod model;
mod waypoint_graph;

pub use category::{EdgeCategory, NodeCategory, Origin};
pub use definition::GraphDefinition;
pub use model::{GraphModel, Route};
pub use waypoint_graph::{EdgeState, NodeState, WaypointGraph};
