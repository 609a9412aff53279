//! Offline visibility-graph generation.
//!
//! # Pipeline
//!
//! ```text
//! create_vectors ─► Layout (convex obstacles) ─► VisibilityOracle
//!                                                      │
//!        ┌──────────── GraphGenerator ◄────────────────┘
//!        │  sample (free, distinct) ─► merge ─► connect
//!        │        ▲                               │
//!        │        └──── retry on disconnection ◄──┘
//!        ▼
//! GeneratedGraph ─► GraphDefinition (runtime coordinates)
//! ```
//!
//! Sampling, proximity and merging are traits so alternative strategies can
//! be injected into [`GraphGenerator`].

mod batch;
mod connect;
mod generator;
mod layout;
mod sampler;

pub use batch::{BatchSummary, run_batch};
pub use connect::connect_points;
pub use generator::{DefaultGenerator, GeneratedGraph, GraphGenerator};
pub use layout::{Layout, calculate_centroid, create_vectors};
pub use sampler::{
    BandedProximity, GaussianSampler, PointMerger, PointSampler, ProximityEstimator, RadiusMerger,
};
