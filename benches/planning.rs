//! Benchmark route planning and visibility queries.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use marga::core::{GridPoint, Point2D};
use marga::geometry::{Polygon, VisibilityOracle};
use marga::graph::{GraphDefinition, GraphModel};
use marga::pathfinding::ShortestPathKind;
use marga::tsp::TspKind;
use marga::PlannerConfig;

/// Square lattice with 4-neighbour edges and `spacing` between nodes.
fn lattice(side: i64, spacing: i64) -> GraphDefinition {
    let mut nodes = Vec::new();
    let mut edges = Vec::new();
    for i in 0..side {
        for j in 0..side {
            let p = GridPoint::new(i * spacing, j * spacing);
            nodes.push(p);
            if i + 1 < side {
                edges.push((p, GridPoint::new((i + 1) * spacing, j * spacing)));
            }
            if j + 1 < side {
                edges.push((p, GridPoint::new(i * spacing, (j + 1) * spacing)));
            }
        }
    }
    GraphDefinition::new(nodes, edges)
}

/// Model over a 20x20 lattice with `waypoints` inserted off-lattice points.
fn model_with_waypoints(config: &PlannerConfig, waypoints: i64) -> GraphModel {
    let mut model = GraphModel::from_config(&lattice(20, 10), config).unwrap();
    for k in 0..waypoints {
        let x = (k * 37) % 190 + 3;
        let y = (k * 53) % 190 + 4;
        model.insert_node(GridPoint::new(x, y)).unwrap();
    }
    model
}

fn bench_distance_matrix(c: &mut Criterion) {
    let mut group = c.benchmark_group("distance_matrix");

    for kind in [ShortestPathKind::Dijkstra, ShortestPathKind::Astar] {
        let config = PlannerConfig {
            shortest_path: kind,
            ..Default::default()
        };
        let model = model_with_waypoints(&config, 10);
        group.bench_with_input(BenchmarkId::from_parameter(format!("{:?}", kind)), &kind, |b, _| {
            b.iter(|| black_box(model.distance_matrix().unwrap()))
        });
    }

    group.finish();
}

fn bench_solve_route(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve_route");

    for (kind, waypoints) in [(TspKind::Greedy, 12), (TspKind::Exact, 8)] {
        let config = PlannerConfig {
            tsp: kind,
            ..Default::default()
        };
        let mut model = model_with_waypoints(&config, waypoints);
        group.bench_with_input(
            BenchmarkId::new(format!("{:?}", kind), waypoints),
            &waypoints,
            |b, _| b.iter(|| black_box(model.solve_route().unwrap())),
        );
    }

    group.finish();
}

fn bench_visibility(c: &mut Criterion) {
    let obstacles: Vec<Polygon> = (0..3)
        .flat_map(|i| (0..3).map(move |j| (i, j)))
        .map(|(i, j)| {
            let (x, y) = (f64::from(i) * 10.0, f64::from(j) * 10.0);
            Polygon::from_points(&[
                Point2D::new(x, y),
                Point2D::new(x + 4.0, y),
                Point2D::new(x + 4.0, y + 4.0),
                Point2D::new(x, y + 4.0),
            ])
            .unwrap()
        })
        .collect();
    let oracle = VisibilityOracle::new(obstacles);
    let points: Vec<Point2D> = (0..30)
        .map(|k| Point2D::new(f64::from(k % 6) * 5.0 + 7.0, f64::from(k / 6) * 5.0 + 7.0))
        .filter(|&p| oracle.is_free(p))
        .collect();

    c.bench_function("visibility_pairwise_30pts", |b| {
        b.iter(|| black_box(oracle.pairwise_path_lengths(black_box(&points))))
    });
}

criterion_group!(
    benches,
    bench_distance_matrix,
    bench_solve_route,
    bench_visibility
);
criterion_main!(benches);
