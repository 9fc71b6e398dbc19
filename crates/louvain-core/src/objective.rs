//! C3: the objective-delta capability the local-moving kernel is
//! polymorphic over (§9's "objective as a capability"). The kernel
//! never hard-codes modularity; it calls [`Objective::delta`] through
//! a `&dyn Objective`.

use crate::Weight;

/// The inputs needed to score a single candidate move, gathered by
/// the local-moving kernel's §4.4 grouping steps.
#[derive(Debug, Clone, Copy)]
pub struct DeltaContext {
    /// `k_v`: v's weighted degree (self-loop counted twice).
    pub k_v: Weight,
    /// `k_{v -> a}`: incident weight from v into its current cluster.
    pub k_v_to_a: Weight,
    /// `k_{v -> b}`: incident weight from v into the candidate cluster.
    pub k_v_to_b: Weight,
    /// `sigma_tot(a \ {v})`.
    pub sigma_tot_a_excl: Weight,
    /// `sigma_tot(b \ {v})`, equal to `sigma_tot(b)` unless `b` already
    /// contains `v` (only possible for the trivial `b == a` case, which
    /// the kernel never scores).
    pub sigma_tot_b_excl: Weight,
    /// `W`, the level's total edge weight.
    pub total_weight: Weight,
}

/// An objective capability: given the aggregates for a candidate move,
/// compute a signed delta. Positive means the move strictly improves
/// the objective; `0` or negative means it does not.
pub trait Objective: Send + Sync {
    fn delta(&self, ctx: &DeltaContext) -> i64;

    /// A short name used in log lines (`--objective` echoes this).
    fn name(&self) -> &'static str;
}

/// Modularity delta, scaled by `2W` so all arithmetic stays integral:
///
/// Δ = 2·(k_{v→b} − k_{v→a\{v}})·W − (σ_tot(b) − σ_tot(a\{v}))·k_v
///
/// Transcribed from the original source's `deltaModularity`
/// (`thrill_local_moving/src/main.cpp`), term order preserved.
#[derive(Debug, Default, Clone, Copy)]
pub struct Modularity;

impl Objective for Modularity {
    fn delta(&self, ctx: &DeltaContext) -> i64 {
        let e = (ctx.k_v_to_b - ctx.k_v_to_a) * ctx.total_weight * 2;
        let a = (ctx.sigma_tot_b_excl - ctx.sigma_tot_a_excl) * ctx.k_v;
        e - a
    }

    fn name(&self) -> &'static str {
        "modularity"
    }
}

/// Fixed-point scale applied to [`MapEquation`]'s intermediate terms so
/// that, like [`Modularity`], all arithmetic stays integral.
pub const FIXED_POINT_SCALE: i64 = 1 << 16;

/// An approximation of the map-equation delta, pluggable behind the
/// same [`Objective`] capability as [`Modularity`].
///
/// Grounded on the original source's `dlslm_map_eq.cpp`, which wires an
/// alternate `main` that swaps the delta computation used by the same
/// `louvain`/local-moving driver for a map-equation-based one — the
/// snippet retained in this pack's reference material shows only that
/// wiring, not the map-equation kernel itself, so the exact
/// description-length formula here is this crate's own fixed-point
/// approximation rather than a transcription (see DESIGN.md).
///
/// It rewards moves that shrink a node's *exit weight* — the weight
/// flowing out of its chosen cluster relative to that cluster's total
/// incident weight — which is the same directional signal the real map
/// equation optimizes (fewer bits to encode which module the random
/// walker exits), kept in fixed point by scaling before dividing.
#[derive(Debug, Clone, Copy)]
pub struct MapEquation {
    scale: i64,
}

impl Default for MapEquation {
    fn default() -> Self {
        Self {
            scale: FIXED_POINT_SCALE,
        }
    }
}

impl Objective for MapEquation {
    fn delta(&self, ctx: &DeltaContext) -> i64 {
        if ctx.total_weight == 0 {
            return 0;
        }
        let exit_a = (ctx.k_v - ctx.k_v_to_a).max(0);
        let exit_b = (ctx.k_v - ctx.k_v_to_b).max(0);

        let cost_a = scaled_ratio(exit_a, ctx.sigma_tot_a_excl + ctx.k_v, self.scale);
        let cost_b = scaled_ratio(exit_b, ctx.sigma_tot_b_excl + ctx.k_v, self.scale);

        cost_a - cost_b
    }

    fn name(&self) -> &'static str {
        "map-equation"
    }
}

fn scaled_ratio(numerator: Weight, denominator: Weight, scale: i64) -> i64 {
    if denominator <= 0 {
        return 0;
    }
    (numerator * scale) / denominator
}

/// Which [`Objective`] to use, selected by `--objective` on the CLI
/// (§6) or [`crate::driver::LouvainConfig`] directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectiveKind {
    Modularity,
    MapEquation,
}

impl ObjectiveKind {
    pub fn build(self) -> Box<dyn Objective> {
        match self {
            ObjectiveKind::Modularity => Box::new(Modularity),
            ObjectiveKind::MapEquation => Box::new(MapEquation::default()),
        }
    }
}

impl std::str::FromStr for ObjectiveKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "modularity" => Ok(Self::Modularity),
            "map-equation" => Ok(Self::MapEquation),
            other => Err(format!("unsupported objective {other:?}")),
        }
    }
}
