//! Node and edge tags for the waypoint graph.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tag carried by every node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeCategory {
    /// Skeleton waypoint from the graph definition.
    BaseNode,
    /// Operator-requested waypoint.
    UserNode,
    /// First node of the most recent route.
    SolutionStartNode,
    /// Last node of the most recent route.
    SolutionEndNode,
}

/// Tag carried by every edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeCategory {
    /// Skeleton edge from the graph definition.
    BaseEdge,
    /// Edge on the most recent route, or attaching an inserted node.
    SolutionEdge,
}

/// Where a node or edge came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Origin {
    /// Loaded from the graph definition.
    Skeleton,
    /// Added at runtime by `insert_node`.
    Inserted,
}

impl NodeCategory {
    /// All node categories, in palette order.
    pub const ALL: [NodeCategory; 4] = [
        NodeCategory::BaseNode,
        NodeCategory::UserNode,
        NodeCategory::SolutionStartNode,
        NodeCategory::SolutionEndNode,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BaseNode => "base_node",
            Self::UserNode => "user_node",
            Self::SolutionStartNode => "solution_start_node",
            Self::SolutionEndNode => "solution_end_node",
        }
    }

    /// True for route endpoint tags.
    pub fn is_solution(&self) -> bool {
        matches!(self, Self::SolutionStartNode | Self::SolutionEndNode)
    }
}

impl EdgeCategory {
    pub const ALL: [EdgeCategory; 2] = [EdgeCategory::BaseEdge, EdgeCategory::SolutionEdge];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BaseEdge => "base_edge",
            Self::SolutionEdge => "solution_edge",
        }
    }
}

impl fmt::Display for NodeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for EdgeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_names() {
        assert_eq!(NodeCategory::SolutionStartNode.to_string(), "solution_start_node");
        assert_eq!(EdgeCategory::BaseEdge.to_string(), "base_edge");
        let json = serde_json::to_string(&NodeCategory::UserNode).unwrap();
        assert_eq!(json, "\"user_node\"");
    }

    #[test]
    fn test_is_solution() {
        assert!(NodeCategory::SolutionEndNode.is_solution());
        assert!(!NodeCategory::UserNode.is_solution());
    }
}
