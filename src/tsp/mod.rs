//! Tour ordering over a symmetric integer cost matrix.
//!
//! A solver returns a permutation of `0..n` that starts at `0` and
//! approximates a minimal Hamiltonian cycle. The route itself is open: the
//! robot stops at the last waypoint of the order.

pub mod exact;
pub mod greedy;

pub use exact::HeldKarp;
pub use greedy::GreedyTwoOpt;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{MargaError, Result};

/// Pluggable TSP solver.
pub trait TspSolver {
    /// Visit order for `matrix`, a permutation of `0..n` starting at `0`.
    fn solve(&self, matrix: &[Vec<i64>]) -> Result<Vec<usize>>;

    /// Name used in logs.
    fn name(&self) -> &'static str;
}

/// Solver selection as it appears in configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TspKind {
    /// Nearest neighbour from node 0 refined by 2-opt.
    #[default]
    Greedy,
    /// Held-Karp dynamic programming.
    Exact,
}

impl TspKind {
    /// Build the solver this kind names.
    pub fn build(self) -> Box<dyn TspSolver> {
        match self {
            TspKind::Greedy => Box::new(GreedyTwoOpt::default()),
            TspKind::Exact => Box::new(HeldKarp::default()),
        }
    }
}

/// Check that `matrix` is square.
pub fn check_matrix(matrix: &[Vec<i64>]) -> Result<()> {
    let n = matrix.len();
    if let Some((i, row)) = matrix.iter().enumerate().find(|(_, row)| row.len() != n) {
        return Err(MargaError::InvalidTour(format!(
            "cost matrix row {} has {} entries, expected {}",
            i,
            row.len(),
            n
        )));
    }
    Ok(())
}

/// Check that `order` is a permutation of `0..n` starting at `0`.
pub fn validate_tour(order: &[usize], n: usize) -> Result<()> {
    if order.len() != n {
        return Err(MargaError::InvalidTour(format!(
            "tour visits {} nodes, expected {}",
            order.len(),
            n
        )));
    }
    if n > 0 && order[0] != 0 {
        return Err(MargaError::InvalidTour(format!(
            "tour starts at {}, expected 0",
            order[0]
        )));
    }
    let mut seen = HashSet::with_capacity(n);
    for &i in order {
        if i >= n || !seen.insert(i) {
            return Err(MargaError::InvalidTour(format!(
                "tour is not a permutation of 0..{}: {:?}",
                n, order
            )));
        }
    }
    Ok(())
}

/// Sum of consecutive costs along `order`, without returning to the start.
pub fn path_cost(matrix: &[Vec<i64>], order: &[usize]) -> i64 {
    order.windows(2).map(|w| matrix[w[0]][w[1]]).sum()
}

/// Cost of the closed cycle through `order`.
pub fn cycle_cost(matrix: &[Vec<i64>], order: &[usize]) -> i64 {
    match (order.first(), order.last()) {
        (Some(&first), Some(&last)) if order.len() > 1 => {
            path_cost(matrix, order) + matrix[last][first]
        }
        _ => 0,
    }
}
