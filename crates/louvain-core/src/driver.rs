//! C6: the hierarchical driver.
//!
//! Loops local-moving → contract → recurse until a level reaches a
//! fixed point (`K == N`, no further moves possible), then composes
//! every level's mapping back onto the original nodes. Mirrors the
//! teacher binaries' `mod cli` + "build graph, run algorithm, print
//! result" shape (`graph_app`'s `wcc.rs`), generalized into a loop.

use crate::cluster_store::ClusterStore;
use crate::graph::Graph;
use crate::local_moving::{local_moving, LocalMovingConfig};
use crate::meta_graph::{contract, project, Contraction};
use crate::objective::ObjectiveKind;
use log::info;

/// Tunables for a full [`run`].
#[derive(Debug, Clone, Copy)]
pub struct LouvainConfig {
    pub local_moving: LocalMovingConfig,
    pub objective: ObjectiveKind,
    /// Hard cap on the number of hierarchy levels, independent of
    /// [`LocalMovingConfig::max_iterations`] (which bounds iterations
    /// *within* one level). Defaults to `u32::MAX` (effectively
    /// unbounded), preserving the plain recurse-until-fixed-point
    /// behavior unless a caller opts into a lower ceiling to bound
    /// worst-case runtime on pathological inputs.
    pub max_levels: u32,
}

impl Default for LouvainConfig {
    fn default() -> Self {
        Self {
            local_moving: LocalMovingConfig::default(),
            objective: ObjectiveKind::Modularity,
            max_levels: u32::MAX,
        }
    }
}

/// Runs Louvain end to end: local moving and contraction, repeated
/// until a level's local moving produces no change (`K == N`), then
/// projects every level's clustering back onto the original node ids.
///
/// `seed_clustering`, if given, seeds level 0's local moving (§6's
/// `--input-clustering`); otherwise level 0 starts from the singleton
/// clustering.
pub fn run(graph: &Graph, seed_clustering: Option<ClusterStore>, config: &LouvainConfig) -> ClusterStore {
    let objective = config.objective.build();
    info!(
        "louvain run start: nodes={} objective={} max_levels={}",
        graph.node_count(),
        objective.name(),
        config.max_levels
    );

    let mut level_graph = graph.clone();
    let mut mappings: Vec<Vec<_>> = Vec::new();
    let mut initial = seed_clustering;
    let mut level = 0u32;

    let final_clustering = loop {
        let n = level_graph.node_count();
        let start = initial
            .take()
            .unwrap_or_else(|| ClusterStore::singleton(n));

        let moved = local_moving(&level_graph, start, objective.as_ref(), &config.local_moving);
        let k = moved.distinct_count();

        info!("louvain level {level}: N={n} -> K={k}");

        if k as u32 == n || level + 1 >= config.max_levels {
            break moved;
        }

        let Contraction {
            graph: next_graph,
            mapping,
        } = contract(&level_graph, &moved);
        mappings.push(mapping);
        level_graph = next_graph;
        level += 1;
    };

    let mut composed = final_clustering;
    while let Some(mapping) = mappings.pop() {
        composed = project(&mapping, &composed);
    }

    composed.compact();
    info!(
        "louvain run done: {level} levels, final K={}",
        composed.distinct_count()
    );
    composed
}
