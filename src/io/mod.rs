//! Persistence: JSON exchange files, coordinate transform and TSPLIB export.

mod files;
mod transform;
mod tsplib;

pub use files::{
    Dimensions, Extent, LayoutFile, WaypointsOfInterest, load_dimensions, load_graph,
    load_layout, load_waypoints, read_graph, read_layout, save_dimensions, save_graph,
    save_layout, save_waypoints, write_graph, write_layout,
};
pub use transform::WorkspaceTransform;
pub use tsplib::{distance_matrix_to_string, render_tsplib, save_tsplib};
