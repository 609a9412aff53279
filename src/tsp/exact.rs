//! Held-Karp exact TSP.
//!
//! `O(n² 2ⁿ)` time and `O(n 2ⁿ)` memory, so instances above
//! [`HeldKarp::max_nodes`] fall back to the greedy solver.

use log::warn;

use super::greedy::GreedyTwoOpt;
use super::{TspSolver, check_matrix};
use crate::error::Result;

/// Exact solver by dynamic programming over subsets.
#[derive(Clone, Debug)]
pub struct HeldKarp {
    /// Largest instance solved exactly.
    pub max_nodes: usize,
}

impl Default for HeldKarp {
    fn default() -> Self {
        Self { max_nodes: 16 }
    }
}

impl TspSolver for HeldKarp {
    fn solve(&self, matrix: &[Vec<i64>]) -> Result<Vec<usize>> {
        check_matrix(matrix)?;
        let n = matrix.len();
        if n > self.max_nodes {
            warn!(
                "[TSP] {} waypoints exceed the exact limit of {}, using greedy",
                n, self.max_nodes
            );
            return GreedyTwoOpt::default().solve(matrix);
        }
        Ok(held_karp(matrix))
    }

    fn name(&self) -> &'static str {
        "exact"
    }
}

/// Minimal-cycle order starting at 0.
fn held_karp(matrix: &[Vec<i64>]) -> Vec<usize> {
    let n = matrix.len();
    if n <= 2 {
        return (0..n).collect();
    }

    // Subsets over nodes 1..n; bit k stands for node k + 1.
    let m = n - 1;
    let full = (1usize << m) - 1;
    let mut cost = vec![vec![i64::MAX; m]; 1 << m];
    let mut parent = vec![vec![usize::MAX; m]; 1 << m];

    for k in 0..m {
        cost[1 << k][k] = matrix[0][k + 1];
    }

    for mask in 1..=full {
        for last in 0..m {
            if mask & (1 << last) == 0 || cost[mask][last] == i64::MAX {
                continue;
            }
            let base = cost[mask][last];
            for next in 0..m {
                if mask & (1 << next) != 0 {
                    continue;
                }
                let next_mask = mask | (1 << next);
                let candidate = base + matrix[last + 1][next + 1];
                if candidate < cost[next_mask][next] {
                    cost[next_mask][next] = candidate;
                    parent[next_mask][next] = last;
                }
            }
        }
    }

    // Close the cycle back to node 0.
    let mut best_last = 0;
    let mut best_cost = i64::MAX;
    for last in 0..m {
        if cost[full][last] == i64::MAX {
            continue;
        }
        let total = cost[full][last] + matrix[last + 1][0];
        if total < best_cost {
            best_cost = total;
            best_last = last;
        }
    }

    let mut order = Vec::with_capacity(n);
    let mut mask = full;
    let mut current = best_last;
    loop {
        order.push(current + 1);
        let prev = parent[mask][current];
        mask &= !(1 << current);
        if prev == usize::MAX {
            break;
        }
        current = prev;
    }
    order.push(0);
    order.reverse();
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tsp::{cycle_cost, validate_tour};

    fn brute_force(matrix: &[Vec<i64>]) -> i64 {
        fn permute(rest: &mut Vec<usize>, k: usize, matrix: &[Vec<i64>], best: &mut i64) {
            if k == rest.len() {
                let mut order = vec![0];
                order.extend(rest.iter().copied());
                *best = (*best).min(cycle_cost(matrix, &order));
                return;
            }
            for i in k..rest.len() {
                rest.swap(k, i);
                permute(rest, k + 1, matrix, best);
                rest.swap(k, i);
            }
        }
        let mut rest: Vec<usize> = (1..matrix.len()).collect();
        let mut best = i64::MAX;
        permute(&mut rest, 0, matrix, &mut best);
        best
    }

    #[test]
    fn test_matches_brute_force() {
        let m = vec![
            vec![0, 29, 20, 21, 16, 31],
            vec![29, 0, 15, 29, 28, 40],
            vec![20, 15, 0, 15, 14, 25],
            vec![21, 29, 15, 0, 4, 12],
            vec![16, 28, 14, 4, 0, 16],
            vec![31, 40, 25, 12, 16, 0],
        ];
        let order = HeldKarp::default().solve(&m).unwrap();
        validate_tour(&order, 6).unwrap();
        assert_eq!(cycle_cost(&m, &order), brute_force(&m));
    }

    #[test]
    fn test_small_instances() {
        let solver = HeldKarp::default();
        assert_eq!(solver.solve(&[vec![0]]).unwrap(), vec![0]);
        assert_eq!(solver.solve(&[vec![0, 5], vec![5, 0]]).unwrap(), vec![0, 1]);

        let m = vec![vec![0, 1, 2], vec![1, 0, 3], vec![2, 3, 0]];
        let order = solver.solve(&m).unwrap();
        validate_tour(&order, 3).unwrap();
    }

    #[test]
    fn test_falls_back_above_limit() {
        let m = vec![vec![0, 1, 1], vec![1, 0, 1], vec![1, 1, 0]];
        let solver = HeldKarp { max_nodes: 2 };
        let order = solver.solve(&m).unwrap();
        assert_eq!(order, vec![0, 1, 2]);
    }
}
