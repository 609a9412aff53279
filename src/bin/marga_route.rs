//! marga-route: plan a route over a generated visibility graph
//!
//! # Usage
//!
//! ```bash
//! # Visit two points starting from the robot
//! cargo run --bin marga-route -- generated/visibility_graph-0-0.json \
//!     --robot 250,250 --insert 120,340 --insert 400,90 --moves
//!
//! # Export the distance matrix and a figure
//! cargo run --bin marga-route -- graph.json --insert 5,4 --insert 1,0 \
//!     --tsplib out --svg route.svg --layout generated/polygon-0-0.json
//! ```

use clap::Parser;
use marga::core::GridPoint;
use marga::graph::GraphModel;
use marga::io::{load_graph, load_layout, save_tsplib};
use marga::motion::RobotController;
use marga::render::{Palette, render_model};
use marga::MargaConfig;
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "marga-route")]
#[command(about = "Insert waypoints into a visibility graph and solve a route")]
struct Args {
    /// Graph definition (visibility_graph-n-m.json)
    graph: PathBuf,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Robot position, inserted before the other waypoints
    #[arg(long, value_parser = parse_point)]
    robot: Option<GridPoint>,

    /// Start the robot at workspace.robot_start when --robot is not given
    #[arg(long)]
    from_start: bool,

    /// Waypoint to insert as "x,y" (repeatable)
    #[arg(short, long, value_parser = parse_point)]
    insert: Vec<GridPoint>,

    /// Existing graph node to mark as "x,y" (repeatable)
    #[arg(short, long, value_parser = parse_point)]
    mark: Vec<GridPoint>,

    /// Print robot displacement commands for the route
    #[arg(long)]
    moves: bool,

    /// Write the waypoint distance matrix as TSPLIB into this directory
    #[arg(long)]
    tsplib: Option<PathBuf>,

    /// Write an SVG figure of the solved graph
    #[arg(long)]
    svg: Option<PathBuf>,

    /// Obstacle layout (polygon-n-m.json) drawn in the figure
    #[arg(long)]
    layout: Option<PathBuf>,
}

fn parse_point(s: &str) -> Result<GridPoint, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected \"x,y\", got {:?}", s))?;
    let x = x.trim().parse::<i64>().map_err(|e| format!("bad x in {:?}: {}", s, e))?;
    let y = y.trim().parse::<i64>().map_err(|e| format!("bad y in {:?}: {}", s, e))?;
    Ok(GridPoint::new(x, y))
}

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {} - {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        log::error!("marga-route failed [{}]: {}", e.code(), e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> marga::Result<()> {
    let config = MargaConfig::load_or_default(args.config.as_deref())?;
    let definition = load_graph(&args.graph)?;
    let mut model = GraphModel::from_config(&definition, &config.planner)?;
    log::info!(
        "Loaded {:?}: {} nodes, {} edges",
        args.graph,
        model.graph().node_count(),
        model.graph().edge_count()
    );

    for &p in &args.mark {
        model.mark_node(p)?;
    }
    let robot = args
        .robot
        .or_else(|| args.from_start.then(|| config.workspace.robot_start_point()));
    if let Some(robot) = robot {
        if model.graph().contains(robot) {
            model.mark_node(robot)?;
        } else {
            model.insert_node(robot)?;
        }
    }
    for &p in &args.insert {
        let nearest = model.insert_node(p)?;
        log::info!("Inserted {} next to {}", p, nearest);
    }

    if let Some(dir) = &args.tsplib {
        std::fs::create_dir_all(dir)?;
        let matrix = model.distance_matrix()?;
        let path = save_tsplib("marga-route", &matrix, dir)?;
        log::info!("TSPLIB written to {:?}", path);
    }

    let route = model.solve_route()?;
    println!("cost: {}", route.cost);
    println!(
        "waypoints: {}",
        route
            .waypoints
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    );
    println!(
        "route: {}",
        route
            .nodes
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" -> ")
    );

    if args.moves {
        let start = robot.unwrap_or(route.nodes[0]);
        let mut controller = RobotController::new(start, config.planner.step_size)?;
        controller.push_route(&route.nodes);
        while let Some(position) = controller.tick() {
            println!("move -> {}", position);
        }
    }

    if let Some(svg) = &args.svg {
        let obstacles = match &args.layout {
            Some(path) => load_layout(path)?,
            None => Vec::new(),
        };
        let robot_size = config.workspace.robot_length.max(config.workspace.robot_width);
        let figure = render_model(
            &model,
            &obstacles,
            robot.map(|p| (p, robot_size)),
            &Palette::default(),
        );
        std::fs::write(svg, figure)?;
        log::info!("Figure written to {:?}", svg);
    }
    Ok(())
}
