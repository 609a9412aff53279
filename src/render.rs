//! Category palette and an owned SVG render target.
//!
//! Colours are applied only here; the graph model stores category tags.

use std::fmt;

use crate::core::{GridPoint, Point2D};
use crate::generation::GeneratedGraph;
use crate::graph::{EdgeCategory, GraphModel, NodeCategory};

/// 8-bit RGB colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// `#rrggbb`.
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex())
    }
}

/// Category → colour lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub base_node: Rgb,
    pub user_node: Rgb,
    pub solution_start_node: Rgb,
    pub solution_end_node: Rgb,
    pub base_edge: Rgb,
    pub solution_edge: Rgb,
    pub obstacle: Rgb,
    pub robot: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            base_node: Rgb(219, 36, 20),
            user_node: Rgb(38, 188, 222),
            solution_start_node: Rgb(30, 140, 18),
            solution_end_node: Rgb(143, 14, 194),
            base_edge: Rgb(17, 136, 120),
            solution_edge: Rgb(235, 195, 52),
            obstacle: Rgb(60, 60, 60),
            robot: Rgb(255, 10, 10),
        }
    }
}

impl Palette {
    pub fn node(&self, category: NodeCategory) -> Rgb {
        match category {
            NodeCategory::BaseNode => self.base_node,
            NodeCategory::UserNode => self.user_node,
            NodeCategory::SolutionStartNode => self.solution_start_node,
            NodeCategory::SolutionEndNode => self.solution_end_node,
        }
    }

    pub fn edge(&self, category: EdgeCategory) -> Rgb {
        match category {
            EdgeCategory::BaseEdge => self.base_edge,
            EdgeCategory::SolutionEdge => self.solution_edge,
        }
    }
}

/// SVG document built up element by element.
///
/// The view box grows to cover everything drawn; the y axis points up.
#[derive(Clone, Debug)]
pub struct SvgCanvas {
    body: String,
    min: Point2D,
    max: Point2D,
    stroke: f64,
}

impl SvgCanvas {
    /// Empty canvas. `stroke` is the base line width in drawing units.
    pub fn new(stroke: f64) -> Self {
        Self {
            body: String::new(),
            min: Point2D::new(f64::INFINITY, f64::INFINITY),
            max: Point2D::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
            stroke,
        }
    }

    fn extend(&mut self, p: Point2D, pad: f64) {
        self.min = Point2D::new(self.min.x.min(p.x - pad), self.min.y.min(p.y - pad));
        self.max = Point2D::new(self.max.x.max(p.x + pad), self.max.y.max(p.y + pad));
    }

    /// Insert an SVG comment, used to group elements.
    pub fn comment(&mut self, text: &str) {
        self.body.push_str(&format!("    <!-- {} -->\n", text));
    }

    /// Filled closed polygon.
    pub fn polygon(&mut self, ring: &[Point2D], fill: Rgb) {
        if ring.is_empty() {
            return;
        }
        for &p in ring {
            self.extend(p, 0.0);
        }
        let points: Vec<String> = ring
            .iter()
            .map(|p| format!("{:.3},{:.3}", p.x, p.y))
            .collect();
        self.body.push_str(&format!(
            "    <polygon points=\"{}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"{}\"/>\n",
            points.join(" "),
            fill,
            fill,
            self.stroke
        ));
    }

    /// Straight segment; `weight` multiplies the base stroke.
    pub fn line(&mut self, a: Point2D, b: Point2D, color: Rgb, weight: f64) {
        self.extend(a, 0.0);
        self.extend(b, 0.0);
        self.body.push_str(&format!(
            "    <line x1=\"{:.3}\" y1=\"{:.3}\" x2=\"{:.3}\" y2=\"{:.3}\" stroke=\"{}\" stroke-width=\"{}\"/>\n",
            a.x,
            a.y,
            b.x,
            b.y,
            color,
            self.stroke * weight
        ));
    }

    /// Filled circle.
    pub fn circle(&mut self, center: Point2D, radius: f64, fill: Rgb) {
        self.extend(center, radius);
        self.body.push_str(&format!(
            "    <circle cx=\"{:.3}\" cy=\"{:.3}\" r=\"{}\" fill=\"{}\"/>\n",
            center.x, center.y, radius, fill
        ));
    }

    /// Axis-aligned filled square centered at `center`.
    pub fn square(&mut self, center: Point2D, side: f64, fill: Rgb) {
        let half = side / 2.0;
        self.extend(center, half);
        self.body.push_str(&format!(
            "    <rect x=\"{:.3}\" y=\"{:.3}\" width=\"{}\" height=\"{}\" fill=\"{}\"/>\n",
            center.x - half,
            center.y - half,
            side,
            side,
            fill
        ));
    }

    /// Complete SVG document.
    pub fn finish(&self) -> String {
        let (min, max) = if self.min.x.is_finite() {
            (self.min, self.max)
        } else {
            (Point2D::ZERO, Point2D::new(1.0, 1.0))
        };
        let margin = self.stroke * 10.0;
        let view_min_x = min.x - margin;
        let view_min_y = min.y - margin;
        let view_width = max.x - min.x + 2.0 * margin;
        let view_height = max.y - min.y + 2.0 * margin;

        let mut svg = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}" width="800" height="800">
  <rect x="{}" y="{}" width="{}" height="{}" fill="white"/>
  <g transform="scale(1, -1) translate(0, -{})">
"#,
            view_min_x,
            -view_min_y - view_height,
            view_width,
            view_height,
            view_min_x,
            -view_min_y - view_height,
            view_width,
            view_height,
            2.0 * view_min_y + view_height
        );
        svg.push_str(&self.body);
        svg.push_str("  </g>\n</svg>\n");
        svg
    }
}

/// Figure of one generation run: obstacles, visibility edges, waypoints.
pub fn render_generation(obstacles: &[Vec<Point2D>], graph: &GeneratedGraph, palette: &Palette) -> String {
    let mut canvas = SvgCanvas::new(0.05);

    canvas.comment("Obstacles");
    for ring in obstacles {
        canvas.polygon(ring, palette.obstacle);
    }

    canvas.comment("Visibility Edges");
    for &(a, b) in &graph.edges {
        canvas.line(a, b, palette.base_edge, 1.0);
    }

    canvas.comment("Waypoints");
    for &p in &graph.nodes {
        canvas.circle(p, 0.2, palette.base_node);
    }
    canvas.finish()
}

/// Runtime view of a model: obstacles, tagged edges and nodes, robot.
pub fn render_model(
    model: &GraphModel,
    obstacles: &[Vec<GridPoint>],
    robot: Option<(GridPoint, i64)>,
    palette: &Palette,
) -> String {
    let mut canvas = SvgCanvas::new(1.0);

    canvas.comment("Obstacles");
    for ring in obstacles {
        let ring: Vec<Point2D> = ring.iter().map(|&p| p.to_point2d()).collect();
        canvas.polygon(&ring, palette.obstacle);
    }

    for category in EdgeCategory::ALL {
        canvas.comment(category.as_str());
        let weight = if category == EdgeCategory::SolutionEdge { 3.0 } else { 1.0 };
        for (a, b) in model.list_edges_by_category(category) {
            canvas.line(a.to_point2d(), b.to_point2d(), palette.edge(category), weight);
        }
    }

    for category in NodeCategory::ALL {
        canvas.comment(category.as_str());
        let radius = if category == NodeCategory::BaseNode { 3.0 } else { 5.0 };
        for p in model.list_nodes_by_category(category) {
            canvas.circle(p.to_point2d(), radius, palette.node(category));
        }
    }

    if let Some((position, size)) = robot {
        canvas.comment("Robot");
        canvas.square(position.to_point2d(), size as f64, palette.robot);
    }
    canvas.finish()
}
