//! Batch generation of layouts and graphs to disk.

use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::generator::GraphGenerator;
use super::layout::{Layout, calculate_centroid, create_vectors};
use super::sampler::{BandedProximity, GaussianSampler, RadiusMerger};
use crate::config::MargaConfig;
use crate::core::Point2D;
use crate::error::Result;
use crate::geometry::VisibilityOracle;
use crate::io::{
    Dimensions, LayoutFile, WaypointsOfInterest, WorkspaceTransform, save_dimensions, save_graph,
    save_layout, save_waypoints,
};
use crate::render::{Palette, render_generation};

/// Outcome of [`run_batch`].
#[derive(Clone, Debug, Default)]
pub struct BatchSummary {
    /// Graphs written.
    pub generated: usize,
    /// Graph runs that failed and were skipped.
    pub failed: usize,
    /// Every file written, in order.
    pub files: Vec<PathBuf>,
}

/// Generate `layouts × graphs_per_layout` graphs into `out_dir`.
///
/// Per successful run `(n, m)` this writes `polygon-n-m.json`,
/// `visibility_graph-n-m.json`, `packages-n-m.json` and `fig-n-m.svg`.
/// `dimensions.json` is written once. Failed runs are logged and skipped;
/// only I/O errors and invalid configuration abort the batch.
pub fn run_batch(config: &MargaConfig, out_dir: &Path) -> Result<BatchSummary> {
    config.validate()?;
    let generation = &config.generation;
    fs::create_dir_all(out_dir)?;

    let mut summary = BatchSummary::default();
    let dimensions_path = out_dir.join("dimensions.json");
    save_dimensions(&Dimensions::from_config(&config.workspace), &dimensions_path)?;
    summary.files.push(dimensions_path);

    let mut rng = match generation.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let transform = WorkspaceTransform::from_config(&config.workspace);
    let palette = Palette::default();

    let vectors = create_vectors(
        generation.grid_width,
        generation.grid_height,
        generation.base_length,
    );
    let center = calculate_centroid(&vectors).unwrap_or(Point2D::ZERO);
    let proximity = BandedProximity::new(center, generation.sigma);
    let packages = WaypointsOfInterest {
        nodes: vectors.iter().map(|&v| transform.to_grid(v)).collect(),
    };

    for n in 0..generation.layouts {
        let layout = Layout::generate(
            &vectors,
            &proximity,
            generation.min_vertices,
            generation.max_vertices,
            &mut rng,
        )?;
        let rings: Vec<Vec<Point2D>> = layout
            .polygons
            .iter()
            .map(|p| p.vertices().to_vec())
            .collect();
        let layout_file: LayoutFile = rings.iter().map(|r| transform.ring_to_grid(r)).collect();
        let oracle = VisibilityOracle::new(layout.polygons);

        for m in 0..generation.graphs_per_layout {
            let sampler = GaussianSampler::seeded(center, generation.sigma, rng.random())?;
            let mut generator = GraphGenerator::new(
                oracle.clone(),
                sampler,
                proximity,
                RadiusMerger::new(generation.effective_merge_radius()),
                generation.clone(),
            );

            let graph = match generator.create_graph() {
                Ok(graph) => graph,
                Err(e) => {
                    warn!("[Batch] graph {}-{} skipped [{}]: {}", n, m, e.code(), e);
                    summary.failed += 1;
                    continue;
                }
            };

            let path = out_dir.join(format!("polygon-{}-{}.json", n, m));
            save_layout(&layout_file, &path)?;
            summary.files.push(path);

            let path = out_dir.join(format!("visibility_graph-{}-{}.json", n, m));
            save_graph(&graph.to_definition(&transform), &path)?;
            summary.files.push(path);

            let path = out_dir.join(format!("packages-{}-{}.json", n, m));
            save_waypoints(&packages, &path)?;
            summary.files.push(path);

            let path = out_dir.join(format!("fig-{}-{}.svg", n, m));
            fs::write(&path, render_generation(&rings, &graph, &palette))?;
            summary.files.push(path);

            summary.generated += 1;
        }
    }

    info!(
        "[Batch] {} graphs written to {:?}, {} skipped",
        summary.generated, out_dir, summary.failed
    );
    Ok(summary)
}
