//! C5: meta-graph contraction.
//!
//! Collapses a level's graph according to a clustering into the next
//! level's graph, one node per cluster. Grounded on §4.5's group-by/
//! reduce dataflow: half-edges are re-keyed by `(C(tail), C(head))` and
//! summed, the same join-then-reduce-by-key shape `local_moving`'s
//! `cluster_total_weights` uses for its own aggregate.

use crate::cluster_store::ClusterStore;
use crate::graph::Graph;
use crate::{ClusterId, NodeId};
use ahash::AHashMap;
use log::info;

/// The result of one contraction: the next level's graph, plus the
/// dense mapping from this level's node ids to that graph's node ids
/// (i.e. the compacted clustering). The driver composes these across
/// levels to project a final clustering back onto the original nodes.
pub struct Contraction {
    pub graph: Graph,
    pub mapping: Vec<ClusterId>,
}

/// Builds the next level's graph from `graph` and `clustering`.
///
/// `clustering` need not be dense; contraction densifies it as a side
/// effect (`§9`'s resolution: compaction is structurally required here
/// to get a contiguous node-id space for the next level's CSR graph,
/// even though the only *externally observed* compaction happens once
/// at the very end of the driver).
pub fn contract(graph: &Graph, clustering: &ClusterStore) -> Contraction {
    let mut dense = clustering.clone();
    let meta_node_count = dense.compact();

    let mut half_edges: AHashMap<(ClusterId, ClusterId), i64> = AHashMap::default();
    for tail in 0..graph.node_count() {
        let c_tail = dense.get(tail);
        for &(head, weight) in graph.half_edges(tail) {
            let c_head = dense.get(head);
            // Undirected half-edges across a cluster boundary arrive
            // twice (once from each side); summing both into the same
            // unordered key naturally reproduces a symmetric pair.
            *half_edges.entry((c_tail, c_head)).or_insert(0) += weight;
        }
    }

    let meta_edges: Vec<(NodeId, NodeId, i64)> = half_edges
        .into_iter()
        .map(|((a, b), weight)| (a, b, weight))
        .collect();

    info!(
        "contract: {} nodes / {} clusters -> {meta_node_count} meta-nodes, {} meta-half-edges",
        graph.node_count(),
        meta_node_count,
        meta_edges.len()
    );

    let meta_graph = Graph::from_half_edges(meta_edges, meta_node_count)
        .expect("contraction always yields a structurally valid graph");

    Contraction {
        graph: meta_graph,
        mapping: dense.into_vec(),
    }
}

/// Composes a coarser level's clustering back onto the finer level's
/// node ids through `mapping` (`mapping[v]` is v's node id at the
/// coarser level). `coarser[c]` must be defined for every `c` produced
/// by `mapping`.
pub fn project(mapping: &[ClusterId], coarser: &ClusterStore) -> ClusterStore {
    let projected: Vec<ClusterId> = mapping.iter().map(|&meta_node| coarser.get(meta_node)).collect();
    ClusterStore::from_assignments(projected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_triangles_contract_to_two_isolated_meta_nodes() {
        // 0-1-2 triangle, 3-4-5 triangle, clustering groups each triangle.
        let mut edges = Vec::new();
        for &(u, v) in &[(0u32, 1u32), (1, 2), (0, 2), (3, 4), (4, 5), (3, 5)] {
            edges.push((u, v, 1));
            edges.push((v, u, 1));
        }
        let graph = Graph::from_half_edges(edges, 6).unwrap();
        let clustering = ClusterStore::from_assignments(vec![0, 0, 0, 1, 1, 1]);

        let Contraction { graph: meta, mapping } = contract(&graph, &clustering);
        assert_eq!(meta.node_count(), 2);
        assert_eq!(mapping, vec![0, 0, 0, 1, 1, 1]);
        // Each meta-node has a self-loop summing its triangle's 3 internal
        // undirected edges (6 half-edges), no edge between the two.
        assert_eq!(meta.half_edges(0).len(), 1);
        assert_eq!(meta.half_edges(1).len(), 1);
        meta.verify_degree_invariant().unwrap();
    }

    #[test]
    fn cross_cluster_edges_survive_contraction() {
        // Path 0-1-2-3, cluster {0,1} and {2,3}: one meta-edge between
        // the two meta-nodes, weight 1 (the 1-2 edge).
        let edges = vec![(0, 1, 1), (1, 0, 1), (1, 2, 1), (2, 1, 1), (2, 3, 1), (3, 2, 1)];
        let graph = Graph::from_half_edges(edges, 4).unwrap();
        let clustering = ClusterStore::from_assignments(vec![0, 0, 1, 1]);

        let Contraction { graph: meta, .. } = contract(&graph, &clustering);
        assert_eq!(meta.node_count(), 2);
        assert_eq!(meta.half_edges(0).len(), 2); // self-loop + cross edge
    }

    #[test]
    fn projection_composes_through_a_mapping() {
        let mapping = vec![0, 0, 1, 1]; // level-0 nodes -> level-1 meta-nodes
        let coarser = ClusterStore::from_assignments(vec![5, 5]); // both meta-nodes end in cluster 5
        let projected = project(&mapping, &coarser);
        assert_eq!(projected.as_slice(), &[5, 5, 5, 5]);
    }

    #[test]
    fn singleton_clustering_contraction_is_isomorphic() {
        let edges = vec![(0, 1, 2), (1, 0, 2)];
        let graph = Graph::from_half_edges(edges, 2).unwrap();
        let clustering = ClusterStore::singleton(2);
        let Contraction { graph: meta, mapping } = contract(&graph, &clustering);
        assert_eq!(meta.node_count(), 2);
        assert_eq!(mapping, vec![0, 1]);
        assert_eq!(meta.degree(0), graph.degree(0));
    }
}
