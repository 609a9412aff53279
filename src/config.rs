//! Configuration loading for marga

use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::{GridPoint, MetricKind};
use crate::error::{MargaError, Result};
use crate::pathfinding::ShortestPathKind;
use crate::tsp::TspKind;

/// Main configuration structure
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MargaConfig {
    #[serde(default)]
    pub workspace: WorkspaceConfig,
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub planner: PlannerConfig,
}

/// Workspace and robot dimensions
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    /// Workspace side length in generation units (cm) (default: 50)
    #[serde(default = "default_map_size")]
    pub map_size: f64,

    /// Generation-to-runtime coordinate scale (default: 10, cm -> mm)
    #[serde(default = "default_scale")]
    pub scale: f64,

    /// Robot length in runtime units (default: 10)
    #[serde(default = "default_robot_size")]
    pub robot_length: i64,

    /// Robot width in runtime units (default: 10)
    #[serde(default = "default_robot_size")]
    pub robot_width: i64,

    /// Robot start in runtime coordinates (default: [50, 50])
    #[serde(default = "default_robot_start")]
    pub robot_start: [i64; 2],
}

/// Offline graph generation parameters
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Standard deviation of the waypoint sampler, also the proximity band width (default: 5)
    #[serde(default = "default_sigma")]
    pub sigma: f64,

    /// Free points to accept before merging (default: 1000)
    #[serde(default = "default_sample_size")]
    pub sample_size: usize,

    /// Whole-graph attempts before giving up on a disconnected result (default: 10)
    #[serde(default = "default_retries")]
    pub retries: usize,

    /// Obstacle grid width in cells (default: 3)
    #[serde(default = "default_grid_size")]
    pub grid_width: usize,

    /// Obstacle grid height in cells (default: 3)
    #[serde(default = "default_grid_size")]
    pub grid_height: usize,

    /// Spacing between obstacle centers (default: 8)
    #[serde(default = "default_base_length")]
    pub base_length: f64,

    /// Minimum obstacle vertex count before hulling (default: 4)
    #[serde(default = "default_min_vertices")]
    pub min_vertices: usize,

    /// Maximum obstacle vertex count before hulling (default: 8)
    #[serde(default = "default_max_vertices")]
    pub max_vertices: usize,

    /// Allowed gap between path length and straight-line distance
    /// for two waypoints to count as mutually visible (default: 0.1)
    #[serde(default = "default_visibility_tolerance")]
    pub visibility_tolerance: f64,

    /// Merge radius; `None` means `ceil(sqrt(sigma))`
    #[serde(default)]
    pub merge_radius: Option<f64>,

    /// Draw cap per sampling run (default: 5_000_000)
    #[serde(default = "default_max_sample_attempts")]
    pub max_sample_attempts: usize,

    /// RNG seed; `None` seeds from the OS
    #[serde(default)]
    pub seed: Option<u64>,

    /// Obstacle layouts per batch (default: 5)
    #[serde(default = "default_layouts")]
    pub layouts: usize,

    /// Graphs generated per layout (default: 10)
    #[serde(default = "default_graphs_per_layout")]
    pub graphs_per_layout: usize,
}

/// Runtime route planning settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Edge metric (default: manhattan)
    #[serde(default)]
    pub metric: MetricKind,

    /// Shortest-path algorithm (default: dijkstra)
    #[serde(default)]
    pub shortest_path: ShortestPathKind,

    /// TSP solver (default: greedy)
    #[serde(default)]
    pub tsp: TspKind,

    /// Robot displacement per motion step in runtime units (default: 10)
    #[serde(default = "default_step_size")]
    pub step_size: i64,
}

// Default value functions
fn default_map_size() -> f64 {
    50.0
}
fn default_scale() -> f64 {
    10.0
}
fn default_robot_size() -> i64 {
    10
}
fn default_robot_start() -> [i64; 2] {
    [50, 50]
}
fn default_sigma() -> f64 {
    5.0
}
fn default_sample_size() -> usize {
    1000
}
fn default_retries() -> usize {
    10
}
fn default_grid_size() -> usize {
    3
}
fn default_base_length() -> f64 {
    8.0
}
fn default_min_vertices() -> usize {
    4
}
fn default_max_vertices() -> usize {
    8
}
fn default_visibility_tolerance() -> f64 {
    0.1
}
fn default_max_sample_attempts() -> usize {
    5_000_000
}
fn default_layouts() -> usize {
    5
}
fn default_graphs_per_layout() -> usize {
    10
}
fn default_step_size() -> i64 {
    10
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            map_size: default_map_size(),
            scale: default_scale(),
            robot_length: default_robot_size(),
            robot_width: default_robot_size(),
            robot_start: default_robot_start(),
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            sigma: default_sigma(),
            sample_size: default_sample_size(),
            retries: default_retries(),
            grid_width: default_grid_size(),
            grid_height: default_grid_size(),
            base_length: default_base_length(),
            min_vertices: default_min_vertices(),
            max_vertices: default_max_vertices(),
            visibility_tolerance: default_visibility_tolerance(),
            merge_radius: None,
            max_sample_attempts: default_max_sample_attempts(),
            seed: None,
            layouts: default_layouts(),
            graphs_per_layout: default_graphs_per_layout(),
        }
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            metric: MetricKind::default(),
            shortest_path: ShortestPathKind::default(),
            tsp: TspKind::default(),
            step_size: default_step_size(),
        }
    }
}

impl WorkspaceConfig {
    /// Robot start as a runtime grid point.
    pub fn robot_start_point(&self) -> GridPoint {
        GridPoint::new(self.robot_start[0], self.robot_start[1])
    }
}

impl GenerationConfig {
    /// Set sampler sigma.
    pub fn with_sigma(mut self, sigma: f64) -> Self {
        self.sigma = sigma;
        self
    }

    /// Set number of accepted samples.
    pub fn with_sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = sample_size;
        self
    }

    /// Set retry budget.
    pub fn with_retries(mut self, retries: usize) -> Self {
        self.retries = retries;
        self
    }

    /// Set obstacle grid dimensions.
    pub fn with_grid(mut self, width: usize, height: usize) -> Self {
        self.grid_width = width;
        self.grid_height = height;
        self
    }

    /// Set obstacle center spacing.
    pub fn with_base_length(mut self, base_length: f64) -> Self {
        self.base_length = base_length;
        self
    }

    /// Set obstacle vertex count range (inclusive).
    pub fn with_vertex_range(mut self, min: usize, max: usize) -> Self {
        self.min_vertices = min;
        self.max_vertices = max;
        self
    }

    /// Override the merge radius.
    pub fn with_merge_radius(mut self, radius: f64) -> Self {
        self.merge_radius = Some(radius);
        self
    }

    /// Set the per-run draw cap.
    pub fn with_max_sample_attempts(mut self, attempts: usize) -> Self {
        self.max_sample_attempts = attempts;
        self
    }

    /// Fix the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set batch size.
    pub fn with_batch(mut self, layouts: usize, graphs_per_layout: usize) -> Self {
        self.layouts = layouts;
        self.graphs_per_layout = graphs_per_layout;
        self
    }

    /// Merge radius in effect.
    pub fn effective_merge_radius(&self) -> f64 {
        self.merge_radius.unwrap_or_else(|| self.sigma.sqrt().ceil())
    }

    /// Check parameter ranges.
    pub fn validate(&self) -> Result<()> {
        if !(self.sigma > 0.0) {
            return Err(MargaError::Config(format!(
                "generation.sigma must be positive, got {}",
                self.sigma
            )));
        }
        if self.sample_size == 0 {
            return Err(MargaError::Config(
                "generation.sample_size must be at least 1".into(),
            ));
        }
        if self.retries == 0 {
            return Err(MargaError::Config(
                "generation.retries must be at least 1".into(),
            ));
        }
        if self.min_vertices < 3 || self.min_vertices > self.max_vertices {
            return Err(MargaError::Config(format!(
                "generation vertex range {}..={} is invalid",
                self.min_vertices, self.max_vertices
            )));
        }
        if self.visibility_tolerance < 0.0 {
            return Err(MargaError::Config(
                "generation.visibility_tolerance must not be negative".into(),
            ));
        }
        Ok(())
    }
}

impl MargaConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| MargaError::Config(format!("Failed to read config file: {}", e)))?;
        let config: MargaConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if given and present, otherwise defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) if p.exists() => {
                info!("Loading configuration from {:?}", p);
                Self::load(p)
            }
            Some(p) => {
                info!("Config {:?} not found, using defaults", p);
                Self::validated_default()
            }
            None => Self::validated_default(),
        }
    }

    fn validated_default() -> Result<Self> {
        let config = Self::default();
        config.validate()?;
        Ok(config)
    }

    /// Check all sections.
    pub fn validate(&self) -> Result<()> {
        self.generation.validate()?;
        if !(self.workspace.scale > 0.0) {
            return Err(MargaError::Config(
                "workspace.scale must be positive".into(),
            ));
        }
        if self.planner.step_size <= 0 {
            return Err(MargaError::Config(
                "planner.step_size must be positive".into(),
            ));
        }
        Ok(())
    }
}
