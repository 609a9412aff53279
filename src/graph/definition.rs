//! Persisted graph definition.
//!
//! ```json
//! {"nodes": [[x, y], ...], "edges": [[[x, y], [x, y]], ...]}
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::core::GridPoint;
use crate::error::{MargaError, Result};

/// Static skeleton graph produced by generation and loaded by the model.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphDefinition {
    /// Waypoints in runtime coordinates.
    pub nodes: Vec<GridPoint>,
    /// Undirected edges between listed waypoints.
    pub edges: Vec<(GridPoint, GridPoint)>,
}

impl GraphDefinition {
    pub fn new(nodes: Vec<GridPoint>, edges: Vec<(GridPoint, GridPoint)>) -> Self {
        Self { nodes, edges }
    }

    /// Check that every edge endpoint is a listed node.
    pub fn validate(&self) -> Result<()> {
        let known: HashSet<GridPoint> = self.nodes.iter().copied().collect();
        for (a, b) in &self.edges {
            for p in [a, b] {
                if !known.contains(p) {
                    return Err(MargaError::InvalidDefinition(format!(
                        "edge {} - {} references unknown node {}",
                        a, b, p
                    )));
                }
            }
        }
        Ok(())
    }
}
