//! Obstacle layouts on a checkerboard of centers.

use log::{debug, warn};
use rand::Rng;

use super::sampler::ProximityEstimator;
use crate::core::Point2D;
use crate::geometry::{Polygon, create_polygon};
use crate::error::{MargaError, Result};

/// Obstacle centers on the "black squares" of a grid.
///
/// Cells span `0..=height` by `0..=width`; cell `(i, j)` yields the point
/// `(i * base_length, j * base_length)` when `i + j` is even. A grid with
/// both sides at most 1 yields only the origin.
pub fn create_vectors(width: usize, height: usize, base_length: f64) -> Vec<Point2D> {
    let (w, h) = (width + 1, height + 1);
    if w <= 2 && h <= 2 {
        return vec![Point2D::ZERO];
    }

    let mut vectors = Vec::with_capacity(w * h / 2 + 1);
    for i in 0..h {
        for j in 0..w {
            if (i + j) % 2 == 0 {
                vectors.push(Point2D::new(i as f64 * base_length, j as f64 * base_length));
            }
        }
    }
    vectors
}

/// Integer mean of `points` (truncated toward zero).
pub fn calculate_centroid(points: &[Point2D]) -> Option<Point2D> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let sum = points.iter().fold(Point2D::ZERO, |acc, &p| acc + p);
    Some(Point2D::new((sum.x / n).trunc(), (sum.y / n).trunc()))
}

/// A set of convex obstacles, one per center.
#[derive(Clone, Debug)]
pub struct Layout {
    /// Obstacle centers.
    pub vectors: Vec<Point2D>,
    /// Obstacles. A center whose hull degenerated has no polygon.
    pub polygons: Vec<Polygon>,
}

impl Layout {
    /// Build one jittered convex obstacle per center.
    ///
    /// Vertex counts are drawn uniformly from `min_vertices..=max_vertices`;
    /// radii come from `radius`. A degenerate hull drops that obstacle only.
    pub fn generate<R: Rng, P: ProximityEstimator>(
        vectors: &[Point2D],
        radius: &P,
        min_vertices: usize,
        max_vertices: usize,
        rng: &mut R,
    ) -> Result<Self> {
        if min_vertices < 3 || min_vertices > max_vertices {
            return Err(MargaError::Config(format!(
                "vertex range {}..={} is invalid",
                min_vertices, max_vertices
            )));
        }

        let mut polygons = Vec::with_capacity(vectors.len());
        for &center in vectors {
            let n = rng.random_range(min_vertices..=max_vertices);
            let r = radius.estimate(center) as f64;
            match create_polygon(n, center, r, rng) {
                Ok(polygon) => polygons.push(polygon),
                Err(e) => warn!(
                    "[Layout] obstacle at {} dropped [{}]: {}",
                    center,
                    e.code(),
                    e
                ),
            }
        }

        debug!(
            "[Layout] {} obstacles from {} centers",
            polygons.len(),
            vectors.len()
        );
        Ok(Self {
            vectors: vectors.to_vec(),
            polygons,
        })
    }
}
