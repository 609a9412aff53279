//! Distance metrics used as edge weights and search heuristics.

use serde::{Deserialize, Serialize};

use super::point::GridPoint;

/// Edge-cost function between two waypoints.
pub trait DistanceMetric {
    /// Cost of travelling directly from `a` to `b`.
    fn distance(&self, a: GridPoint, b: GridPoint) -> f64;

    /// Name used in logs.
    fn name(&self) -> &'static str;
}

/// Sum of absolute axis differences. Default at runtime.
#[derive(Clone, Copy, Debug, Default)]
pub struct Manhattan;

impl DistanceMetric for Manhattan {
    #[inline]
    fn distance(&self, a: GridPoint, b: GridPoint) -> f64 {
        a.manhattan_distance(&b) as f64
    }

    fn name(&self) -> &'static str {
        "manhattan"
    }
}

/// Straight-line distance.
#[derive(Clone, Copy, Debug, Default)]
pub struct Euclidean;

impl DistanceMetric for Euclidean {
    #[inline]
    fn distance(&self, a: GridPoint, b: GridPoint) -> f64 {
        a.distance(&b)
    }

    fn name(&self) -> &'static str {
        "euclidean"
    }
}

/// Metric selection as it appears in configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    #[default]
    Manhattan,
    Euclidean,
}

impl MetricKind {
    /// Build the metric this kind names.
    pub fn build(self) -> Box<dyn DistanceMetric> {
        match self {
            MetricKind::Manhattan => Box::new(Manhattan),
            MetricKind::Euclidean => Box::new(Euclidean),
        }
    }
}
