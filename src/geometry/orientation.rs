//! Orientation predicate and point ordering.

use std::cmp::Ordering;

use crate::core::Point2D;

/// Direction of the turn made by travelling `p -> q -> r`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Turn {
    /// Counter-clockwise (positive signed area).
    Left,
    /// Clockwise (negative signed area).
    Right,
    /// Signed area within tolerance of zero.
    Colinear,
}

/// Twice the signed area of triangle `(p, q, r)`.
///
/// Positive when `r` lies to the left of the directed line `p -> q`.
#[inline]
pub fn signed_area(p: Point2D, q: Point2D, r: Point2D) -> f64 {
    (q - p).cross(&(r - p))
}

/// Classify the turn `p -> q -> r` against an absolute area tolerance.
#[inline]
pub fn turn(p: Point2D, q: Point2D, r: Point2D, epsilon: f64) -> Turn {
    let area = signed_area(p, q, r);
    if area > epsilon {
        Turn::Left
    } else if area < -epsilon {
        Turn::Right
    } else {
        Turn::Colinear
    }
}

/// Lexicographic comparison: by `x`, ties broken by `y`.
#[inline]
pub fn lexicographic(a: &Point2D, b: &Point2D) -> Ordering {
    a.x.total_cmp(&b.x).then_with(|| a.y.total_cmp(&b.y))
}

/// Sort points by `x`, then `y`. Stable.
pub fn sort_lexicographically(points: &mut [Point2D]) {
    points.sort_by(lexicographic);
}
