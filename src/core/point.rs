//! Point types for generation (real-valued) and runtime routing (integer).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Sub};

/// Integer waypoint coordinates used by the runtime graph.
///
/// Serialized as a `[x, y]` pair to match the graph definition files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(from = "(i64, i64)", into = "(i64, i64)")]
pub struct GridPoint {
    /// X coordinate
    pub x: i64,
    /// Y coordinate
    pub y: i64,
}

impl GridPoint {
    /// Create a new grid point
    #[inline]
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another point
    #[inline]
    pub fn manhattan_distance(&self, other: &GridPoint) -> i64 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// Euclidean distance to another point
    #[inline]
    pub fn distance(&self, other: &GridPoint) -> f64 {
        self.to_point2d().distance(&other.to_point2d())
    }

    /// Convert to a real-valued point
    #[inline]
    pub fn to_point2d(self) -> Point2D {
        Point2D::new(self.x as f64, self.y as f64)
    }
}

impl From<(i64, i64)> for GridPoint {
    fn from((x, y): (i64, i64)) -> Self {
        GridPoint::new(x, y)
    }
}

impl From<GridPoint> for (i64, i64) {
    fn from(p: GridPoint) -> Self {
        (p.x, p.y)
    }
}

impl fmt::Display for GridPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Add for GridPoint {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        GridPoint::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for GridPoint {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        GridPoint::new(self.x - other.x, self.y - other.y)
    }
}

/// Real-valued point in workspace units (cm during generation).
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
}

impl Point2D {
    /// Create a new point
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Origin
    pub const ZERO: Point2D = Point2D { x: 0.0, y: 0.0 };

    /// Euclidean distance to another point
    #[inline]
    pub fn distance(&self, other: &Point2D) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// Squared distance (avoids sqrt)
    #[inline]
    pub fn distance_squared(&self, other: &Point2D) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Cross product (z-component of the 3D cross product)
    #[inline]
    pub fn cross(&self, other: &Point2D) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Linear interpolation towards `other`
    #[inline]
    pub fn lerp(&self, other: &Point2D, t: f64) -> Point2D {
        Point2D::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    /// Bit-exact key for hashing by coordinate value.
    ///
    /// `-0.0` and `0.0` map to the same key.
    #[inline]
    pub fn key(&self) -> (u64, u64) {
        ((self.x + 0.0).to_bits(), (self.y + 0.0).to_bits())
    }

    /// Round to the nearest integer point.
    #[inline]
    pub fn round(&self) -> GridPoint {
        GridPoint::new(self.x.round() as i64, self.y.round() as i64)
    }
}

impl From<GridPoint> for Point2D {
    fn from(p: GridPoint) -> Self {
        p.to_point2d()
    }
}

impl fmt::Display for Point2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

impl Add for Point2D {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Point2D::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Point2D {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Point2D::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f64> for Point2D {
    type Output = Self;

    #[inline]
    fn mul(self, scalar: f64) -> Self {
        Point2D::new(self.x * scalar, self.y * scalar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manhattan_distance() {
        let cases = [
            ((20, 20), (30, 40), 30),
            ((-20, 20), (30, -40), 110),
            ((-20, -20), (-30, -40), 30),
        ];
        for ((ax, ay), (bx, by), expected) in cases {
            let a = GridPoint::new(ax, ay);
            let b = GridPoint::new(bx, by);
            assert_eq!(a.manhattan_distance(&b), expected);
            assert_eq!(b.manhattan_distance(&a), expected);
        }
    }

    #[test]
    fn test_point_distance() {
        let a = Point2D::ZERO;
        let b = Point2D::new(3.0, 4.0);
        assert!((a.distance(&b) - 5.0).abs() < 1e-12);
        assert!((a.distance_squared(&b) - 25.0).abs() < 1e-12);
    }

    #[test]
    fn test_grid_point_serde_as_pair() {
        let p = GridPoint::new(120, -40);
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, "[120,-40]");
        let back: GridPoint = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }

    #[test]
    fn test_key_ignores_sign_of_zero() {
        assert_eq!(Point2D::new(0.0, 1.0).key(), Point2D::new(-0.0, 1.0).key());
        assert_ne!(Point2D::new(0.0, 1.0).key(), Point2D::new(1.0, 0.0).key());
    }

    #[test]
    fn test_ordering_is_lexicographic() {
        let mut points = vec![
            GridPoint::new(2, 1),
            GridPoint::new(1, 5),
            GridPoint::new(1, 2),
        ];
        points.sort();
        assert_eq!(
            points,
            vec![GridPoint::new(1, 2), GridPoint::new(1, 5), GridPoint::new(2, 1)]
        );
    }
}
