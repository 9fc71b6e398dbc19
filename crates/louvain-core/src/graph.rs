//! C1: the canonical in-memory representation of a level's graph.
//!
//! A [`Graph`] is immutable once built, the same discipline
//! `graph_builder`'s CSR types follow: all state is computed once in
//! [`Graph::from_half_edges`] and exposed only through read-only
//! methods afterwards. Half-edges are grouped by tail into a
//! CSR-style `offsets`/`targets` pair so that [`Graph::half_edges`] is
//! an O(1)-lookup, O(degree) slice iteration.

use crate::error::LouvainError;
use crate::{NodeId, Weight};
use ahash::AHashMap;

/// A level's graph: an undirected, weighted multigraph represented as
/// half-edges grouped by tail node.
///
/// Self-loops are canonicalized on construction to a single stored
/// half-edge whose weight is counted twice when computing incident
/// weight (§4.1), regardless of whether the input presented the loop
/// as one entry (text ingestion) or several entries destined to the
/// same node (meta-graph contraction, §4.5) — all such entries are
/// summed into one before the doubling rule is applied.
#[derive(Debug, Clone)]
pub struct Graph {
    node_count: NodeId,
    total_weight: Weight,
    offsets: Box<[u32]>,
    targets: Box<[(NodeId, Weight)]>,
    degrees: Box<[Weight]>,
}

impl Graph {
    /// Builds a graph from a half-edge list.
    ///
    /// `edges` must contain, for every undirected edge `{u, v}` with
    /// `u != v`, both directed half-edges `(u, v, w)` and `(v, u, w)`;
    /// for a self-loop at `v`, one or more entries `(v, v, w)` (they are
    /// summed). `node_count` bounds the node id space; every tail/head
    /// in `edges` must be `< node_count`.
    pub fn from_half_edges(
        mut edges: Vec<(NodeId, NodeId, Weight)>,
        node_count: NodeId,
    ) -> Result<Self, LouvainError> {
        for &(tail, head, _) in &edges {
            if tail >= node_count || head >= node_count {
                return Err(LouvainError::InvariantViolation(format!(
                    "edge ({tail}, {head}) references a node outside [0, {node_count})"
                )));
            }
        }

        // Canonicalize self-loops: merge every (v, v, w) entry for the
        // same v into a single summed entry before grouping by tail.
        let mut self_loop_weight: AHashMap<NodeId, Weight> = AHashMap::default();
        edges.retain(|&(tail, head, weight)| {
            if tail == head {
                *self_loop_weight.entry(tail).or_insert(0) += weight;
                false
            } else {
                true
            }
        });
        edges.extend(self_loop_weight.into_iter().map(|(v, w)| (v, v, w)));

        edges.sort_unstable_by_key(|&(tail, _, _)| tail);

        let mut offsets = vec![0u32; node_count as usize + 1];
        for &(tail, _, _) in &edges {
            offsets[tail as usize + 1] += 1;
        }
        for i in 0..node_count as usize {
            offsets[i + 1] += offsets[i];
        }

        let targets: Box<[(NodeId, Weight)]> = edges
            .into_iter()
            .map(|(_, head, weight)| (head, weight))
            .collect();

        let mut degrees = vec![0i64; node_count as usize];
        for tail in 0..node_count {
            let start = offsets[tail as usize] as usize;
            let end = offsets[tail as usize + 1] as usize;
            for &(head, weight) in &targets[start..end] {
                degrees[tail as usize] += weight;
                if head == tail {
                    degrees[tail as usize] += weight;
                }
            }
        }

        let degree_sum: Weight = degrees.iter().sum();
        if degree_sum % 2 != 0 {
            return Err(LouvainError::InvariantViolation(format!(
                "sum of degrees ({degree_sum}) is odd, expected Σ degrees = 2W"
            )));
        }
        let total_weight = degree_sum / 2;

        Ok(Self {
            node_count,
            total_weight,
            offsets: offsets.into_boxed_slice(),
            targets,
            degrees: degrees.into_boxed_slice(),
        })
    }

    /// Builds the graph of a single isolated node with no edges
    /// (used for the singleton-stability scenario and as a base case).
    pub fn singleton() -> Self {
        Self {
            node_count: 1,
            total_weight: 0,
            offsets: vec![0, 0].into_boxed_slice(),
            targets: Box::new([]),
            degrees: vec![0].into_boxed_slice(),
        }
    }

    pub fn node_count(&self) -> NodeId {
        self.node_count
    }

    /// Total undirected edge weight `W`. Half of Σ degrees.
    pub fn total_weight(&self) -> Weight {
        self.total_weight
    }

    /// Weighted degree of `v` (self-loop counted twice).
    pub fn degree(&self, v: NodeId) -> Weight {
        self.degrees[v as usize]
    }

    /// Half-edges with tail `v`: `(head, weight)` pairs. Self-loops
    /// appear once, with their canonical (undoubled) weight.
    pub fn half_edges(&self, v: NodeId) -> &[(NodeId, Weight)] {
        let start = self.offsets[v as usize] as usize;
        let end = self.offsets[v as usize + 1] as usize;
        &self.targets[start..end]
    }

    /// Asserts Σ degrees = 2W, the core invariant of §3/§4.1. Used by
    /// tests and by the driver after contraction to cross-check that
    /// `meta-W` equals the level it was built from.
    pub fn verify_degree_invariant(&self) -> Result<(), LouvainError> {
        let degree_sum: Weight = self.degrees.iter().sum();
        if degree_sum != 2 * self.total_weight {
            return Err(LouvainError::InvariantViolation(format!(
                "Σ degrees ({degree_sum}) != 2W ({})",
                2 * self.total_weight
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degree_conservation_triangle() {
        let edges = vec![
            (0, 1, 1),
            (1, 0, 1),
            (1, 2, 1),
            (2, 1, 1),
            (0, 2, 1),
            (2, 0, 1),
        ];
        let graph = Graph::from_half_edges(edges, 3).unwrap();
        assert_eq!(graph.total_weight(), 3);
        assert_eq!(graph.degree(0), 2);
        assert_eq!(graph.degree(1), 2);
        assert_eq!(graph.degree(2), 2);
        graph.verify_degree_invariant().unwrap();
    }

    #[test]
    fn self_loop_is_stored_once_and_doubled() {
        let edges = vec![(0, 0, 5), (0, 1, 1), (1, 0, 1)];
        let graph = Graph::from_half_edges(edges, 2).unwrap();
        // degree(0) = 2*5 (self-loop) + 1 (edge to 1) = 11
        assert_eq!(graph.degree(0), 11);
        assert_eq!(graph.degree(1), 1);
        assert_eq!(graph.half_edges(0).len(), 2);
        assert_eq!(graph.total_weight(), 6);
    }

    #[test]
    fn multiple_self_loop_entries_are_merged() {
        // As meta-graph contraction may hand two half-weight entries
        // for the same collapsed self-loop, both must fold into one.
        let edges = vec![(0, 0, 3), (0, 0, 3)];
        let graph = Graph::from_half_edges(edges, 1).unwrap();
        assert_eq!(graph.half_edges(0).len(), 1);
        assert_eq!(graph.half_edges(0)[0], (0, 6));
        assert_eq!(graph.degree(0), 12);
        assert_eq!(graph.total_weight(), 6);
    }

    #[test]
    fn singleton_has_no_edges() {
        let graph = Graph::singleton();
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.total_weight(), 0);
        assert!(graph.half_edges(0).is_empty());
    }

    #[test]
    fn out_of_range_node_id_is_rejected() {
        let err = Graph::from_half_edges(vec![(0, 5, 1)], 2).unwrap_err();
        assert!(matches!(err, LouvainError::InvariantViolation(_)));
    }
}
