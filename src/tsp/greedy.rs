//! Nearest-neighbour construction with 2-opt refinement.

use log::trace;

use super::{TspSolver, check_matrix, cycle_cost};
use crate::error::Result;

/// Greedy TSP heuristic (default solver).
#[derive(Clone, Debug)]
pub struct GreedyTwoOpt {
    /// Upper bound on full 2-opt sweeps.
    pub max_passes: usize,
}

impl Default for GreedyTwoOpt {
    fn default() -> Self {
        Self { max_passes: 100 }
    }
}

impl GreedyTwoOpt {
    /// Limit the number of 2-opt sweeps.
    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = max_passes;
        self
    }
}

impl TspSolver for GreedyTwoOpt {
    fn solve(&self, matrix: &[Vec<i64>]) -> Result<Vec<usize>> {
        check_matrix(matrix)?;
        let mut tour = nearest_neighbour(matrix);
        let initial = cycle_cost(matrix, &tour);
        let passes = two_opt(matrix, &mut tour, self.max_passes);
        trace!(
            "[TSP] greedy cycle cost {} -> {} after {} 2-opt passes",
            initial,
            cycle_cost(matrix, &tour),
            passes
        );
        Ok(tour)
    }

    fn name(&self) -> &'static str {
        "greedy"
    }
}

/// Nearest-neighbour tour from node 0. Ties go to the lower index.
pub fn nearest_neighbour(matrix: &[Vec<i64>]) -> Vec<usize> {
    let n = matrix.len();
    if n == 0 {
        return Vec::new();
    }

    let mut visited = vec![false; n];
    let mut tour = Vec::with_capacity(n);
    let mut current = 0;
    visited[0] = true;
    tour.push(0);

    while tour.len() < n {
        let next = (0..n)
            .filter(|&j| !visited[j])
            .min_by_key(|&j| (matrix[current][j], j));
        let Some(next) = next else { break };
        visited[next] = true;
        tour.push(next);
        current = next;
    }
    tour
}

/// Improve a closed tour in place with 2-opt moves, keeping position 0 fixed.
///
/// Returns the number of sweeps performed.
pub fn two_opt(matrix: &[Vec<i64>], tour: &mut [usize], max_passes: usize) -> usize {
    let n = tour.len();
    if n < 4 {
        return 0;
    }

    let mut passes = 0;
    let mut improved = true;
    while improved && passes < max_passes {
        improved = false;
        passes += 1;
        for i in 1..n - 1 {
            for j in i + 1..n {
                let a = tour[i - 1];
                let b = tour[i];
                let c = tour[j];
                let e = tour[(j + 1) % n];
                let delta = matrix[a][c] + matrix[b][e] - matrix[a][b] - matrix[c][e];
                if delta < 0 {
                    tour[i..=j].reverse();
                    improved = true;
                }
            }
        }
    }
    passes
}
