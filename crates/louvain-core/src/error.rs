use thiserror::Error;

/// Error kinds surfaced by ingestion, the core algorithm and its driver.
///
/// Mirrors the shape of `graph_builder::Error`: one variant per failure
/// class, each carrying enough context to print a descriptive message.
/// None of these are recoverable in-algorithm (see §7 of the spec) — they
/// all propagate via `?` up to the CLI, which maps any `Err` to a
/// non-zero exit code.
#[derive(Error, Debug)]
pub enum LouvainError {
    /// A malformed input line, an inconsistent self-loop weight, or a
    /// node id outside the declared range.
    #[error("ingestion error at line {line}: {reason}")]
    Ingestion { line: usize, reason: String },

    /// An internal invariant (Σ degrees = 2W, meta-W = original W, a
    /// required dense id space) was violated. Indicates an
    /// implementation bug, not bad input.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    /// A lower-level I/O failure while reading input or writing output.
    #[error("i/o error")]
    Io(#[from] std::io::Error),
}
