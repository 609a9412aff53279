//! Planar geometry for obstacle generation and line-of-sight.
//!
//! - [`turn`] / [`sort_lexicographically`]: orientation primitives
//! - [`convex_hull`]: monotone-chain hull, counter-clockwise output
//! - [`Polygon`]: immutable convex obstacle
//! - [`VisibilityOracle`]: free-space, visibility and shortest-path queries

mod hull;
mod orientation;
mod polygon;
mod visibility;

pub use hull::convex_hull;
pub use orientation::{Turn, lexicographic, signed_area, sort_lexicographically, turn};
pub use polygon::{Polygon, create_polygon, regular_polygon_vertices};
pub use visibility::{VisibilityOracle, VisibilityPath};
