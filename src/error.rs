//! Error types for marga

use thiserror::Error;

use crate::core::{GridPoint, Point2D};

/// Stage of offline graph generation in which a failure occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GenerationStage {
    /// Building convex obstacle boundaries.
    HullBuilding,
    /// Rejection-sampling free-space waypoints.
    Sampling,
    /// Connecting waypoints into a visibility graph.
    Connecting,
}

impl GenerationStage {
    /// Name used in diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HullBuilding => "hull-building",
            Self::Sampling => "sampling",
            Self::Connecting => "connecting",
        }
    }
}

impl std::fmt::Display for GenerationStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// marga error type
#[derive(Error, Debug)]
pub enum MargaError {
    #[error("Degenerate hull input: {distinct} distinct non-colinear points (need at least 3)")]
    DegenerateHull { distinct: usize },

    #[error("Sampling exhausted: accepted {accepted}/{requested} free points after {draws} draws")]
    SamplingExhausted {
        accepted: usize,
        requested: usize,
        draws: usize,
    },

    #[error("Visibility graph is disconnected: no path between {from} and {to}")]
    Disconnected { from: Point2D, to: Point2D },

    #[error("Graph generation failed during {stage} after {attempts} attempts")]
    GenerationFailed {
        stage: GenerationStage,
        attempts: usize,
    },

    #[error("Graph has no skeleton nodes to attach to")]
    EmptySkeleton,

    #[error("Not enough waypoints to visit: {found} marked (need at least {required})")]
    NotEnoughWaypoints { required: usize, found: usize },

    #[error("Node {0} already exists in the graph")]
    NodeExists(GridPoint),

    #[error("Node {0} is not in the graph")]
    UnknownNode(GridPoint),

    #[error("No path between {from} and {to}")]
    NoPath { from: GridPoint, to: GridPoint },

    #[error("Invalid graph definition: {0}")]
    InvalidDefinition(String),

    #[error("Invalid tour: {0}")]
    InvalidTour(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<toml::de::Error> for MargaError {
    fn from(e: toml::de::Error) -> Self {
        MargaError::Config(e.to_string())
    }
}

impl MargaError {
    /// Short error code for logging.
    pub fn code(&self) -> &'static str {
        match self {
            Self::DegenerateHull { .. } => "DEGENERATE_HULL",
            Self::SamplingExhausted { .. } => "SAMPLING_EXHAUSTED",
            Self::Disconnected { .. } => "DISCONNECTED",
            Self::GenerationFailed { .. } => "GENERATION_FAILED",
            Self::EmptySkeleton => "EMPTY_SKELETON",
            Self::NotEnoughWaypoints { .. } => "NOT_ENOUGH_WAYPOINTS",
            Self::NodeExists(_) => "NODE_EXISTS",
            Self::UnknownNode(_) => "UNKNOWN_NODE",
            Self::NoPath { .. } => "NO_PATH",
            Self::InvalidDefinition(_) => "INVALID_DEFINITION",
            Self::InvalidTour(_) => "INVALID_TOUR",
            Self::Config(_) => "CONFIG",
            Self::Io(_) => "IO",
            Self::Json(_) => "JSON",
        }
    }

    /// Generation stage this error belongs to, if it is a generation error.
    pub fn stage(&self) -> Option<GenerationStage> {
        match self {
            Self::DegenerateHull { .. } => Some(GenerationStage::HullBuilding),
            Self::SamplingExhausted { .. } => Some(GenerationStage::Sampling),
            Self::Disconnected { .. } => Some(GenerationStage::Connecting),
            Self::GenerationFailed { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    /// Whether the sampler may recover from this error by resampling.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Disconnected { .. })
    }
}

pub type Result<T> = std::result::Result<T, MargaError>;
