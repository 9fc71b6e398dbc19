//! A building block for distributed-style Louvain community detection.
//!
//! The crate renders the synchronous local-moving Louvain method as a
//! sequence of maps, grouped reductions and sub-round barriers over
//! in-memory partitions (`rayon` chunked iterators stand in for a
//! dataflow engine's partitioned collections). See `graph` (C1),
//! `cluster_store` (C2), `objective` (C3), `local_moving` (C4),
//! `meta_graph` (C5) and `driver` (C6).

pub mod cluster_store;
pub mod driver;
pub mod error;
pub mod graph;
pub mod local_moving;
pub mod meta_graph;
pub mod objective;
pub mod prelude;

/// Dense node identifier, `[0, N)` at every level.
pub type NodeId = u32;

/// Cluster identifier. Not required to be dense except right after
/// [`cluster_store::ClusterStore::compact`].
pub type ClusterId = u32;

/// Edge/degree/objective weight. Signed so that modularity-delta
/// arithmetic (which involves subtraction of unsigned quantities) never
/// has to special-case underflow.
pub type Weight = i64;
