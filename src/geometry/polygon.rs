//! Convex obstacle polygons.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use super::hull::convex_hull;
use super::orientation::signed_area;
use crate::core::Point2D;
use crate::error::{MargaError, Result};

/// Area tolerance for containment tests.
const CONTAINMENT_EPS: f64 = 1e-9;

/// Convex polygon with counter-clockwise vertices.
///
/// Only constructible through the hull, so the vertex ring is always convex,
/// minimal, and has at least three vertices. Immutable once built.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Point2D>", into = "Vec<Point2D>")]
pub struct Polygon {
    vertices: Vec<Point2D>,
}

impl Polygon {
    /// Build the convex hull of `points`.
    pub fn from_points(points: &[Point2D]) -> Result<Self> {
        Ok(Self {
            vertices: convex_hull(points)?,
        })
    }

    /// Vertices in counter-clockwise order.
    #[inline]
    pub fn vertices(&self) -> &[Point2D] {
        &self.vertices
    }

    /// Number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Always false: a polygon has at least three vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Iterate over directed boundary edges `(v[i], v[i+1])`.
    pub fn edges(&self) -> impl Iterator<Item = (Point2D, Point2D)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// True if `p` is inside or on the boundary.
    pub fn contains(&self, p: Point2D) -> bool {
        self.edges()
            .all(|(a, b)| signed_area(a, b, p) >= -CONTAINMENT_EPS)
    }

    /// True if `p` is strictly inside (boundary excluded).
    pub fn contains_strict(&self, p: Point2D) -> bool {
        self.edges()
            .all(|(a, b)| signed_area(a, b, p) > CONTAINMENT_EPS)
    }

    /// Vertex centroid.
    pub fn centroid(&self) -> Point2D {
        let n = self.vertices.len() as f64;
        let sum = self
            .vertices
            .iter()
            .fold(Point2D::ZERO, |acc, &v| acc + v);
        Point2D::new(sum.x / n, sum.y / n)
    }

    /// Enclosed area (positive for counter-clockwise order).
    pub fn area(&self) -> f64 {
        self.edges().map(|(a, b)| a.cross(&b)).sum::<f64>() * 0.5
    }
}

impl TryFrom<Vec<Point2D>> for Polygon {
    type Error = MargaError;

    fn try_from(points: Vec<Point2D>) -> Result<Self> {
        Polygon::from_points(&points)
    }
}

impl From<Polygon> for Vec<Point2D> {
    fn from(polygon: Polygon) -> Self {
        polygon.vertices
    }
}

/// Vertices of a jittered regular `n`-gon around `center`.
///
/// Vertex `i` sits at angle `2πi/n` on a circle of `radius`, then each axis
/// is nudged by an integer drawn from `[-1, 1]`.
pub fn regular_polygon_vertices<R: Rng>(
    n: usize,
    center: Point2D,
    radius: f64,
    rng: &mut R,
) -> Vec<Point2D> {
    (0..n)
        .map(|i| {
            let angle = 2.0 * PI * i as f64 / n as f64;
            let jx = f64::from(rng.random_range(-1i32..=1));
            let jy = f64::from(rng.random_range(-1i32..=1));
            Point2D::new(
                center.x + radius * angle.cos() + jx,
                center.y + radius * angle.sin() + jy,
            )
        })
        .collect()
}

/// Build a convex obstacle from a jittered regular `n`-gon.
pub fn create_polygon<R: Rng>(
    n: usize,
    center: Point2D,
    radius: f64,
    rng: &mut R,
) -> Result<Polygon> {
    Polygon::from_points(&regular_polygon_vertices(n, center, radius, rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn square() -> Polygon {
        Polygon::from_points(&[
            Point2D::new(0.0, 0.0),
            Point2D::new(4.0, 0.0),
            Point2D::new(4.0, 4.0),
            Point2D::new(0.0, 4.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_contains() {
        let sq = square();
        assert!(sq.contains(Point2D::new(2.0, 2.0)));
        assert!(sq.contains(Point2D::new(0.0, 2.0)));
        assert!(sq.contains(Point2D::new(4.0, 4.0)));
        assert!(!sq.contains(Point2D::new(5.0, 2.0)));

        assert!(sq.contains_strict(Point2D::new(2.0, 2.0)));
        assert!(!sq.contains_strict(Point2D::new(0.0, 2.0)));
    }

    #[test]
    fn test_area_and_centroid() {
        let sq = square();
        assert_relative_eq!(sq.area(), 16.0);
        assert_eq!(sq.centroid(), Point2D::new(2.0, 2.0));
    }

    #[test]
    fn test_create_polygon_contains_center() {
        let mut rng = StdRng::seed_from_u64(7);
        for n in 4..=8 {
            let center = Point2D::new(16.0, 24.0);
            let polygon = create_polygon(n, center, 5.0, &mut rng).unwrap();
            assert!(polygon.len() >= 3 && polygon.len() <= n);
            assert!(polygon.contains_strict(center));
        }
    }

    #[test]
    fn test_serde_rebuilds_hull() {
        let json = "[[0.0,0.0],[4.0,4.0],[4.0,0.0],[2.0,1.0],[0.0,4.0]]";
        let polygon: Polygon = serde_json::from_str(json).unwrap();
        assert_eq!(polygon, square());

        assert!(serde_json::from_str::<Polygon>("[[0.0,0.0],[1.0,1.0]]").is_err());
    }
}
