//! Contagion CLI - seed selection for competitive diffusion from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Pick seeds by degree and write 2.10.31.txt next to the graph
//! contagion select graphs/2.10.31.json degree
//!
//! # Weighted combination of degree, closeness, betweenness
//! contagion select graphs/2.10.31.json weighted 1.0 0.5 2.0
//!
//! # Ensemble over chosen measures, after shrinking to the largest community
//! contagion select graphs/2.10.31.json ensemble --measures degree,katz,triangles --reduce community
//!
//! # Inspect a measure or the graph
//! contagion rank graphs/2.10.31.json betweenness --top 20
//! contagion stats graphs/2.10.31.json
//! ```
//!
//! Logs go to stderr (`RUST_LOG` overrides the default `contagion=info`).

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use contagion_core::{
    emit, load_graph, rank_all, select_seeds, Graph, Measure, Reducer, RunConfig, RunMeta,
    ScoringConfig, Strategy,
};
use indicatif::ProgressBar;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "contagion", version)]
#[command(about = "Seed selection for competitive graph diffusion", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Select seeds and write the submission file
    Select {
        /// Graph file (JSON adjacency, named players.seeds.id.json)
        input: PathBuf,

        /// Strategy: a measure name, `weighted`, or `ensemble`
        strategy: String,

        /// Weights for the `weighted` strategy, one per measure
        #[arg(allow_negative_numbers = true)]
        weights: Vec<f64>,

        /// Measures combined by `weighted` / `ensemble`
        #[arg(long, value_delimiter = ',')]
        measures: Option<Vec<Measure>>,

        /// Shrink the graph before scoring
        #[arg(long, value_enum, default_value = "none")]
        reduce: ReduceKind,

        /// Louvain resolution for `--reduce community`
        #[arg(long, default_value = "1.0")]
        resolution: f64,

        /// Louvain seed for `--reduce community`
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Measure to use when eigenvector/katz cannot be computed
        #[arg(long)]
        fallback: Option<Measure>,

        /// Seed blocks per submission file
        #[arg(long, default_value_t = emit::DEFAULT_ROUNDS)]
        rounds: usize,

        /// Output file (default: input with a .txt extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Seed count, overriding the file name
        #[arg(long)]
        num_seeds: Option<usize>,
    },

    /// Rank nodes by one measure
    Rank {
        /// Graph file
        input: PathBuf,

        /// Measure name
        measure: Measure,

        /// Number of top nodes to show
        #[arg(short, long, default_value = "20")]
        top: usize,
    },

    /// Show statistics about a graph
    Stats {
        /// Graph file
        input: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ReduceKind {
    /// Score the whole graph
    None,
    /// Largest Louvain community
    Community,
    /// Approximate minimum vertex cover
    Cover,
}

fn main() -> ExitCode {
    init_tracing();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version are not failures
            let code = if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
            let _ = err.print();
            return code;
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("contagion=info,contagion_core=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Select {
            input,
            strategy,
            weights,
            measures,
            reduce,
            resolution,
            seed,
            fallback,
            rounds,
            output,
            num_seeds,
        } => {
            let reducer = match reduce {
                ReduceKind::None => None,
                ReduceKind::Community => Some(Reducer::Community { resolution, seed }),
                ReduceKind::Cover => Some(Reducer::VertexCover),
            };
            let strategy = Strategy::from_id(&strategy, measures, weights)?;
            let meta = run_meta(&input, num_seeds)?;

            let mut config = RunConfig::new(meta, strategy).with_rounds(rounds);
            if let Some(reducer) = reducer {
                config = config.with_reducer(reducer);
            }
            if let Some(fallback) = fallback {
                config = config.with_fallback(fallback);
            }
            config.validate()?;

            let output = output.unwrap_or_else(|| emit::submission_path(&input));
            cmd_select(&input, &output, &config)
        }
        Commands::Rank {
            input,
            measure,
            top,
        } => cmd_rank(&input, measure, top),
        Commands::Stats { input } => cmd_stats(&input),
    }
}

/// Run metadata from the file name, with `--num-seeds` taking precedence.
fn run_meta(input: &Path, num_seeds: Option<usize>) -> Result<RunMeta> {
    match (RunMeta::from_path(input), num_seeds) {
        (Ok(meta), Some(n)) => Ok(RunMeta {
            num_seeds: n,
            ..meta
        }),
        (Ok(meta), None) => Ok(meta),
        (Err(_), Some(n)) => Ok(RunMeta {
            num_players: 1,
            num_seeds: n,
            unique_id: 0,
        }),
        (Err(err), None) => {
            Err(err).context("cannot infer the seed count; pass --num-seeds or rename the file")
        }
    }
}

fn load(path: &Path) -> Result<Graph> {
    let start = Instant::now();
    let pb = ProgressBar::new_spinner();
    pb.set_message(format!("Loading {}...", path.display()));

    let graph = load_graph(path)
        .with_context(|| format!("Failed to load JSON adjacency graph {}", path.display()))?;

    pb.finish_with_message(format!("Loaded in {:.2?}", start.elapsed()));
    Ok(graph)
}

fn cmd_select(input: &Path, output: &Path, config: &RunConfig) -> Result<()> {
    let graph = load(input)?;

    let start = Instant::now();
    let seeds = select_seeds(&graph, config)
        .with_context(|| format!("Seed selection with {} failed", config.strategy))?;
    tracing::info!(elapsed = ?start.elapsed(), seeds = seeds.len(), "selection done");

    emit::write_submission(output, &seeds, config.rounds)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    for seed in &seeds {
        println!("{seed}");
    }
    Ok(())
}

fn cmd_rank(input: &Path, measure: Measure, top: usize) -> Result<()> {
    let graph = load(input)?;

    let start = Instant::now();
    let scores = measure
        .score(&graph, &ScoringConfig::default())
        .with_context(|| format!("Computing {measure} centrality failed"))?;
    let ranked = rank_all(&scores);
    eprintln!("Computed in {:.2?}", start.elapsed());

    println!("Top {} nodes by {}:", top.min(ranked.len()), measure);
    for (i, id) in ranked.iter().take(top).enumerate() {
        println!("{}. {} ({:.6})", i + 1, id, scores[id]);
    }
    Ok(())
}

fn cmd_stats(input: &Path) -> Result<()> {
    let graph = load(input)?;
    let stats = graph.stats();

    println!("Graph Statistics");
    println!("================");
    println!("Nodes:          {}", stats.node_count);
    println!("Edges:          {}", stats.edge_count);
    println!("Avg degree:     {:.2}", stats.avg_degree);
    println!("Density:        {:.4}", stats.density);
    println!("Components:     {}", stats.component_count);

    if let Ok(meta) = RunMeta::from_path(input) {
        println!("Players:        {}", meta.num_players);
        println!("Seeds:          {}", meta.num_seeds);
        println!("Run id:         {}", meta.unique_id);
    }
    Ok(())
}
