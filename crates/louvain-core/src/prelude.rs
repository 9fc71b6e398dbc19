//! Convenience re-export of the crate's public surface.

pub use crate::cluster_store::ClusterStore;
pub use crate::driver::{run, LouvainConfig};
pub use crate::error::LouvainError;
pub use crate::graph::Graph;
pub use crate::local_moving::{local_moving, LocalMovingConfig};
pub use crate::objective::{DeltaContext, MapEquation, Modularity, Objective, ObjectiveKind};
pub use crate::{ClusterId, NodeId, Weight};
