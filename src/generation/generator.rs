//! Sample → merge → connect, with bounded retry on disconnection.

use std::collections::HashSet;

use log::{debug, info, warn};

use super::connect::connect_points;
use super::sampler::{
    BandedProximity, GaussianSampler, PointMerger, PointSampler, ProximityEstimator, RadiusMerger,
};
use crate::config::GenerationConfig;
use crate::core::Point2D;
use crate::error::{GenerationStage, MargaError, Result};
use crate::geometry::{Polygon, VisibilityOracle};
use crate::graph::GraphDefinition;
use crate::io::WorkspaceTransform;

/// Waypoint graph in generation coordinates.
#[derive(Clone, Debug)]
pub struct GeneratedGraph {
    /// Merged waypoints, in acceptance order.
    pub nodes: Vec<Point2D>,
    /// Visibility edges between waypoints.
    pub edges: Vec<(Point2D, Point2D)>,
    /// Attempt that produced this graph (1-based).
    pub attempts: usize,
}

impl GeneratedGraph {
    /// Persistable definition in runtime coordinates.
    pub fn to_definition(&self, transform: &WorkspaceTransform) -> GraphDefinition {
        GraphDefinition::new(
            self.nodes.iter().map(|&p| transform.to_grid(p)).collect(),
            self.edges
                .iter()
                .map(|&(a, b)| (transform.to_grid(a), transform.to_grid(b)))
                .collect(),
        )
    }
}

/// Generator with the Gaussian sampler and banded proximity.
pub type DefaultGenerator = GraphGenerator<GaussianSampler, BandedProximity, RadiusMerger>;

/// Visibility-graph generator over a fixed obstacle set.
pub struct GraphGenerator<S, P, M> {
    oracle: VisibilityOracle,
    sampler: S,
    proximity: P,
    merger: M,
    config: GenerationConfig,
}

impl DefaultGenerator {
    /// Gaussian sampling around `center`, seeded.
    pub fn with_defaults(
        obstacles: Vec<Polygon>,
        center: Point2D,
        config: GenerationConfig,
        seed: u64,
    ) -> Result<Self> {
        let sampler = GaussianSampler::seeded(center, config.sigma, seed)?;
        let proximity = BandedProximity::new(center, config.sigma);
        let merger = RadiusMerger::new(config.effective_merge_radius());
        Ok(Self::new(
            VisibilityOracle::new(obstacles),
            sampler,
            proximity,
            merger,
            config,
        ))
    }
}

impl<S, P, M> GraphGenerator<S, P, M>
where
    S: PointSampler,
    P: ProximityEstimator,
    M: PointMerger,
{
    pub fn new(oracle: VisibilityOracle, sampler: S, proximity: P, merger: M, config: GenerationConfig) -> Self {
        Self {
            oracle,
            sampler,
            proximity,
            merger,
            config,
        }
    }

    pub fn oracle(&self) -> &VisibilityOracle {
        &self.oracle
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Build a connected graph, retrying from scratch on disconnection.
    ///
    /// Sampling exhaustion is not retried. Running out of attempts yields
    /// [`MargaError::GenerationFailed`] at the connecting stage.
    pub fn create_graph(&mut self) -> Result<GeneratedGraph> {
        let retries = self.config.retries;
        for attempt in 1..=retries {
            let samples = self.sample_points()?;
            let nodes = self.merger.merge(&samples);
            debug!(
                "[Generator] attempt {}: {} samples merged to {}",
                attempt,
                samples.len(),
                nodes.len()
            );

            match connect_points(
                &nodes,
                &self.oracle,
                &self.proximity,
                self.config.visibility_tolerance,
            ) {
                Ok(edges) => {
                    info!(
                        "[Generator] graph with {} nodes, {} edges after {} attempt(s)",
                        nodes.len(),
                        edges.len(),
                        attempt
                    );
                    return Ok(GeneratedGraph {
                        nodes,
                        edges,
                        attempts: attempt,
                    });
                }
                Err(e) if e.is_retryable() => {
                    warn!("[Generator] attempt {}/{} failed: {}", attempt, retries, e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(MargaError::GenerationFailed {
            stage: GenerationStage::Connecting,
            attempts: retries,
        })
    }

    /// Draw until `sample_size` distinct free points are accepted.
    fn sample_points(&mut self) -> Result<Vec<Point2D>> {
        let requested = self.config.sample_size;
        let mut accepted = Vec::with_capacity(requested);
        let mut keys = HashSet::with_capacity(requested);
        let mut draws = 0;

        while accepted.len() < requested {
            if draws >= self.config.max_sample_attempts {
                return Err(MargaError::SamplingExhausted {
                    accepted: accepted.len(),
                    requested,
                    draws,
                });
            }
            draws += 1;

            let p = self.sampler.sample();
            if !keys.contains(&p.key()) && self.oracle.is_free(p) {
                keys.insert(p.key());
                accepted.push(p);
            }
        }
        Ok(accepted)
    }
}
