mod cli;
mod io;

use louvain_core::cluster_store::ClusterStore;
use louvain_core::driver::{self, LouvainConfig};
use louvain_core::graph::Graph;
use louvain_core::local_moving::LocalMovingConfig;
use log::info;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    let args = match cli::parse() {
        Ok(args) => args,
        Err(reason) => {
            eprintln!("error: {reason}");
            return ExitCode::FAILURE;
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: cli::Args) -> Result<(), louvain_core::error::LouvainError> {
    let (edges, node_count) = io::read_graph_txt(&args.input)?;
    info!("loaded {node_count} nodes from {}", args.input.display());

    let graph = Graph::from_half_edges(edges, node_count)?;
    graph.verify_degree_invariant()?;

    let seed_clustering = match &args.input_clustering {
        Some(path) => Some(ClusterStore::from_assignments(io::read_clustering(
            path, node_count,
        )?)),
        None => None,
    };

    let config = LouvainConfig {
        local_moving: LocalMovingConfig {
            max_iterations: args.max_iterations,
            progress_threshold: args.progress_threshold,
            seed: args.seed,
        },
        objective: args.objective,
        max_levels: args.max_levels,
    };

    let result = driver::run(&graph, seed_clustering, &config);
    info!("final clustering: {} clusters", result.distinct_count());

    match &args.output {
        Some(path) => io::write_clustering(path, result.as_slice())?,
        None => {
            for &cluster in result.as_slice() {
                println!("{cluster}");
            }
        }
    }

    Ok(())
}
