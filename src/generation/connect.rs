//! k-nearest mutual-visibility connection.

use std::collections::{HashSet, VecDeque};

use log::{debug, trace};

use super::sampler::ProximityEstimator;
use crate::core::Point2D;
use crate::error::{MargaError, Result};
use crate::geometry::VisibilityOracle;

/// Connect each point to its `k` nearest mutually visible neighbours.
///
/// Two points count as mutually visible when their obstacle-avoiding path is
/// within `tolerance` of their straight-line distance. `k` comes from
/// `proximity`. Candidates are ranked by Euclidean distance, ties by index.
/// An edge already present in either orientation is skipped; new edges are
/// recorded as `(neighbour, point)`.
///
/// Any pair without a shortest path, or an edge set that leaves the points in
/// more than one component, is a [`MargaError::Disconnected`] failure.
pub fn connect_points<P: ProximityEstimator>(
    points: &[Point2D],
    oracle: &VisibilityOracle,
    proximity: &P,
    tolerance: f64,
) -> Result<Vec<(Point2D, Point2D)>> {
    let lengths = oracle.pairwise_path_lengths(points);

    let mut pairs: Vec<(usize, usize)> = Vec::new();
    let mut seen: HashSet<(usize, usize)> = HashSet::new();

    for (i, &p) in points.iter().enumerate() {
        let mut candidates: Vec<(usize, f64)> = Vec::new();
        for (j, &q) in points.iter().enumerate() {
            if i == j {
                continue;
            }
            let spl = lengths[i][j].ok_or(MargaError::Disconnected { from: p, to: q })?;
            let euclid = p.distance(&q);
            if (spl - euclid).abs() <= tolerance {
                candidates.push((j, euclid));
            }
        }
        candidates.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));

        let k = proximity.estimate(p);
        for &(j, _) in candidates.iter().take(k) {
            if seen.insert((i.min(j), i.max(j))) {
                pairs.push((j, i));
            }
        }
        trace!(
            "[Connect] {} has {} visible candidates, k={}",
            p,
            candidates.len(),
            k
        );
    }

    if let Some((a, b)) = first_unreached(points.len(), &pairs) {
        return Err(MargaError::Disconnected {
            from: points[a],
            to: points[b],
        });
    }

    debug!(
        "[Connect] {} points, {} edges",
        points.len(),
        pairs.len()
    );
    Ok(pairs
        .into_iter()
        .map(|(a, b)| (points[a], points[b]))
        .collect())
}

/// BFS from node 0; returns `(0, u)` for the first node `u` not reached.
fn first_unreached(n: usize, pairs: &[(usize, usize)]) -> Option<(usize, usize)> {
    if n == 0 {
        return None;
    }
    let mut adjacency = vec![Vec::new(); n];
    for &(a, b) in pairs {
        adjacency[a].push(b);
        adjacency[b].push(a);
    }

    let mut reached = vec![false; n];
    let mut queue = VecDeque::from([0]);
    reached[0] = true;
    while let Some(u) = queue.pop_front() {
        for &v in &adjacency[u] {
            if !reached[v] {
                reached[v] = true;
                queue.push_back(v);
            }
        }
    }
    reached.iter().position(|&r| !r).map(|u| (0, u))
}
