//! Monotone-chain convex hull.
//!
//! Points are sorted lexicographically, then two half-chains are built:
//! the upper chain left to right and the lower chain right to left. Each
//! chain pops its middle point while the last three points do not make a
//! right turn, so colinear and duplicate points are dropped. The chains
//! concatenate into a clockwise ring, which is reversed to counter-clockwise.

use log::trace;

use super::orientation::{Turn, sort_lexicographically, turn};
use crate::core::Point2D;
use crate::error::{MargaError, Result};

/// Compute the minimal convex hull of `points`, counter-clockwise, starting
/// at the lexicographically smallest vertex.
///
/// Returns [`MargaError::DegenerateHull`] when fewer than three points
/// survive (too few distinct points, or all colinear).
pub fn convex_hull(points: &[Point2D]) -> Result<Vec<Point2D>> {
    let mut sorted = points.to_vec();
    sort_lexicographically(&mut sorted);

    let mut upper = half_chain(sorted.iter().copied());
    let mut lower = half_chain(sorted.iter().rev().copied());

    // Each chain ends where the other begins.
    upper.pop();
    lower.pop();
    upper.extend(lower);

    if upper.len() < 3 {
        return Err(MargaError::DegenerateHull {
            distinct: upper.len(),
        });
    }

    // Clockwise -> counter-clockwise, keeping the leftmost vertex first.
    upper.reverse();
    upper.rotate_right(1);

    trace!(
        "Convex hull: {} input points -> {} vertices",
        points.len(),
        upper.len()
    );
    Ok(upper)
}

fn half_chain(points: impl Iterator<Item = Point2D>) -> Vec<Point2D> {
    let mut chain: Vec<Point2D> = Vec::new();
    for p in points {
        while chain.len() >= 2 {
            let n = chain.len();
            if turn(chain[n - 2], chain[n - 1], p, 0.0) == Turn::Right {
                break;
            }
            chain.pop();
        }
        chain.push(p);
    }
    chain
}
