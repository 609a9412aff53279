//! Generation-to-runtime coordinate transform.

use crate::config::WorkspaceConfig;
use crate::core::{GridPoint, Point2D};

/// Maps generation coordinates to persisted integers.
///
/// Each axis becomes `trunc(|v - map_size| * scale)`, which flips the axis
/// about the workspace edge and rescales (cm to mm by default).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorkspaceTransform {
    pub map_size: f64,
    pub scale: f64,
}

impl WorkspaceTransform {
    pub fn new(map_size: f64, scale: f64) -> Self {
        Self { map_size, scale }
    }

    pub fn from_config(config: &WorkspaceConfig) -> Self {
        Self::new(config.map_size, config.scale)
    }

    #[inline]
    fn axis(&self, v: f64) -> i64 {
        ((v - self.map_size).abs() * self.scale).trunc() as i64
    }

    /// Transform a generation point.
    pub fn to_grid(&self, p: Point2D) -> GridPoint {
        GridPoint::new(self.axis(p.x), self.axis(p.y))
    }

    /// Transform a polygon ring.
    pub fn ring_to_grid(&self, ring: &[Point2D]) -> Vec<GridPoint> {
        ring.iter().map(|&p| self.to_grid(p)).collect()
    }

    /// Workspace side length in runtime units.
    pub fn extent(&self) -> i64 {
        (self.map_size * self.scale).trunc() as i64
    }
}

impl Default for WorkspaceTransform {
    fn default() -> Self {
        Self::from_config(&WorkspaceConfig::default())
    }
}
