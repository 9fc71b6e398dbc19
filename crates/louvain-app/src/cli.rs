//! Command-line surface, pico-args based (the teacher's binaries all
//! parse their own flat `Args` struct this way rather than pulling in
//! `clap`).

use louvain_core::objective::ObjectiveKind;
use std::path::PathBuf;
use std::str::FromStr;

const HELP: &str = "\
louvain - distributed-style Louvain community detection

USAGE:
    louvain <INPUT> [OPTIONS]

ARGS:
    <INPUT>                        Edge-list input path

OPTIONS:
    --input-clustering <FILE>      Seed clustering, one cluster id per line
    --output <FILE>                Write the final clustering here (default: stdout)
    --objective <NAME>             modularity (default) | map-equation
    --max-iterations <N>           Per-level local-moving iteration cap (default: 32)
    --progress-threshold <F>       Minimum per-iteration cluster-count reduction fraction (default: 0.01)
    --max-levels <N>               Hierarchy depth cap (default: unbounded)
    --seed <N>                     Reserved for reproducible tie-break modes (default: 0)
    -h, --help                     Print this message
";

/// Sentinel for \"no cap\"; preserves the distilled spec's literal
/// unbounded-recursion-until-fixed-point behavior unless overridden.
pub const UNBOUNDED_LEVELS: u32 = u32::MAX;

#[derive(Debug)]
pub struct Args {
    pub input: PathBuf,
    pub input_clustering: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub objective: ObjectiveKind,
    pub max_iterations: u32,
    pub progress_threshold: f64,
    pub max_levels: u32,
    pub seed: u64,
}

pub fn parse() -> Result<Args, String> {
    let mut raw = pico_args::Arguments::from_env();

    if raw.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let objective: String = raw
        .opt_value_from_str("--objective")
        .map_err(|e| e.to_string())?
        .unwrap_or_else(|| "modularity".to_string());

    let args = Args {
        input_clustering: raw
            .opt_value_from_str("--input-clustering")
            .map_err(|e| e.to_string())?,
        output: raw.opt_value_from_str("--output").map_err(|e| e.to_string())?,
        objective: ObjectiveKind::from_str(&objective).map_err(|e| e.to_string())?,
        max_iterations: raw
            .opt_value_from_str("--max-iterations")
            .map_err(|e| e.to_string())?
            .unwrap_or(32),
        progress_threshold: raw
            .opt_value_from_str("--progress-threshold")
            .map_err(|e| e.to_string())?
            .unwrap_or(0.01),
        max_levels: raw
            .opt_value_from_str("--max-levels")
            .map_err(|e| e.to_string())?
            .unwrap_or(UNBOUNDED_LEVELS),
        seed: raw.opt_value_from_str("--seed").map_err(|e| e.to_string())?.unwrap_or(0),
        // Positional argument parsed last: pico-args resolves named
        // flags out of the argument stream first, leaving only free
        // arguments behind.
        input: raw.free_from_str().map_err(|e| e.to_string())?,
    };

    let remaining = raw.finish();
    if !remaining.is_empty() {
        return Err(format!("unrecognized arguments: {remaining:?}"));
    }

    Ok(args)
}
