//! Core types: points and distance metrics.

mod metric;
mod point;

pub use metric::{DistanceMetric, Euclidean, Manhattan, MetricKind};
pub use point::{GridPoint, Point2D};
