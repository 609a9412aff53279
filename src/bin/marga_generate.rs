//! marga-generate: batch visibility-graph generation
//!
//! # Usage
//!
//! ```bash
//! # Defaults (5 layouts x 10 graphs) into ./generated
//! cargo run --bin marga-generate
//!
//! # Custom config, reproducible run
//! cargo run --bin marga-generate -- --config configs/marga.toml --seed 42 --out data
//! ```

use clap::Parser;
use marga::{MargaConfig, run_batch};
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "marga-generate")]
#[command(about = "Generate obstacle layouts and visibility graphs")]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output directory
    #[arg(short, long, default_value = "generated")]
    out: PathBuf,

    /// RNG seed (overrides config)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of obstacle layouts (overrides config)
    #[arg(long)]
    layouts: Option<usize>,

    /// Graphs per layout (overrides config)
    #[arg(long)]
    graphs: Option<usize>,

    /// Accepted samples per graph (overrides config)
    #[arg(long)]
    sample_size: Option<usize>,
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
        log::error!("marga-generate failed: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> marga::Result<()> {
    let mut config = MargaConfig::load_or_default(args.config.as_deref())?;
    let generation = &mut config.generation;
    if let Some(seed) = args.seed {
        generation.seed = Some(seed);
    }
    if let Some(layouts) = args.layouts {
        generation.layouts = layouts;
    }
    if let Some(graphs) = args.graphs {
        generation.graphs_per_layout = graphs;
    }
    if let Some(sample_size) = args.sample_size {
        generation.sample_size = sample_size;
    }

    log::info!("marga-generate starting...");
    log::info!(
        "  Batch: {} layouts x {} graphs",
        generation.layouts,
        generation.graphs_per_layout
    );
    log::info!(
        "  Sampler: sigma {}, {} samples, merge radius {}",
        generation.sigma,
        generation.sample_size,
        generation.effective_merge_radius()
    );
    log::info!("  Output: {:?}", args.out);

    let summary = run_batch(&config, &args.out)?;
    log::info!(
        "Done: {} graphs, {} skipped, {} files",
        summary.generated,
        summary.failed,
        summary.files.len()
    );
    Ok(())
}
