//! linksim CLI: sample a link graph around fixed pages, then answer recommendation queries.
//!
//! Queries come from `--seeds/--weights/-k`, or, when `--seeds` is absent, from stdin, one per
//! line as `SEEDS / WEIGHTS / K` (ids and weights space separated, weights may be blank).

use clap::Parser;
use linksim::{
    EdgeListFile, Error, LogProgress, NameListFile, RawNodeId, RecommendationSession,
    SamplerConfig,
};
use log::{error, info};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::io::{BufRead, Write};
use std::path::PathBuf;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync + 'static>>;

#[derive(Parser, Debug)]
#[clap(name = "linksim", version, about = "Neighborhood-similarity recommendations over a sampled link graph")]
struct Args {
    /// Edge list: one `src dst` pair per line.
    #[clap(long, value_name = "FILE")]
    edges: PathBuf,

    /// Page names: one `id name` pair per line.
    #[clap(long, value_name = "FILE")]
    names: PathBuf,

    /// Raw ids to fix into the subgraph (their neighbors are fixed too).
    #[clap(long, value_name = "ID", num_args = 1.., value_delimiter = ' ')]
    fix: Vec<RawNodeId>,

    /// Fraction of the id space to sample.
    #[clap(long, default_value_t = 0.05)]
    fraction: f64,

    /// Size of the raw id space.
    #[clap(long, default_value_t = 1_791_489)]
    id_space: u64,

    /// Expected edge count, for progress output only.
    #[clap(long)]
    edge_count: Option<usize>,

    /// Keep link direction instead of symmetrizing.
    #[clap(long)]
    directed: bool,

    #[clap(long, default_value_t = 42)]
    seed: u64,

    /// Seed raw ids for a single query; read queries from stdin when omitted.
    #[clap(long, value_name = "ID", num_args = 1.., value_delimiter = ' ')]
    seeds: Vec<RawNodeId>,

    #[clap(long, value_name = "W", num_args = 1.., value_delimiter = ' ')]
    weights: Vec<f64>,

    #[clap(short, default_value_t = 10)]
    k: usize,
}

fn init_logger() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();
}

/// Parse `SEEDS / WEIGHTS / K`.
fn parse_query(line: &str) -> std::result::Result<(Vec<RawNodeId>, Option<Vec<f64>>, usize), String> {
    let parts: Vec<&str> = line.split('/').map(str::trim).collect();
    let (seeds, weights, k) = match parts.as_slice() {
        [seeds, k] => (*seeds, "", *k),
        [seeds, weights, k] => (*seeds, *weights, *k),
        _ => return Err("expected `SEEDS / WEIGHTS / K`".to_string()),
    };
    let seeds = seeds
        .split_whitespace()
        .map(|s| s.parse::<RawNodeId>().map_err(|e| format!("bad id {s:?}: {e}")))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    let weights = if weights.is_empty() {
        None
    } else {
        Some(
            weights
                .split_whitespace()
                .map(|w| w.parse::<f64>().map_err(|e| format!("bad weight {w:?}: {e}")))
                .collect::<std::result::Result<Vec<_>, _>>()?,
        )
    };
    let k = k.parse::<usize>().map_err(|e| format!("bad k {k:?}: {e}"))?;
    Ok((seeds, weights, k))
}

fn run_query(
    session: &RecommendationSession,
    seeds: &[RawNodeId],
    weights: Option<Vec<f64>>,
    k: usize,
) -> linksim::Result<()> {
    let recs = session.recommend_with_progress(seeds, weights, k, &mut LogProgress::new())?;
    print!("{recs}");
    Ok(())
}

fn main() -> Result<()> {
    init_logger();
    let args = Args::parse();

    let mut edges = EdgeListFile::new(&args.edges);
    if let Some(count) = args.edge_count {
        edges = edges.with_expected_len(count);
    }
    let names = NameListFile::new(&args.names);
    let config = SamplerConfig {
        subgraph_fraction: args.fraction,
        id_space: args.id_space,
        fixed: args.fix.iter().copied().collect(),
        undirected: !args.directed,
        seed: args.seed,
    };

    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let subgraph = linksim::sample_subgraph_with_rng(
        &edges,
        &names,
        &config,
        &mut rng,
        &mut LogProgress::new(),
    )?;
    println!("Graph contains {} vertices.", subgraph.len());
    let session = RecommendationSession::new(subgraph);

    if !args.seeds.is_empty() {
        let weights = (!args.weights.is_empty()).then(|| args.weights.clone());
        run_query(&session, &args.seeds, weights, args.k)?;
        return Ok(());
    }

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match parse_query(&line) {
            Ok((seeds, weights, k)) => match run_query(&session, &seeds, weights, k) {
                Ok(()) => {}
                Err(Error::Lookup(raw)) => {
                    error!("{raw} was not sampled; fix it into the subgraph with --fix")
                }
                Err(e) => error!("{e}"),
            },
            Err(e) => error!("{e}"),
        }
        info!("Next set of inputs (ctrl-d to stop)");
    }
    Ok(())
}
