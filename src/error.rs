//! Error types for graph construction, schedules and annealing runs.

use thiserror::Error;

/// Errors raised at the boundary of the annealing engine.
///
/// The engine itself never fails once its inputs are accepted; every
/// variant here describes input that was rejected before a run started.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnnealError {
    /// Two graph arrays that must agree in length do not.
    #[error("{what}: expected length {expected}, got {actual}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// An adjacency entry points outside `0..num_variables`.
    #[error("node {node} lists neighbor {neighbor}, but the graph has {num_variables} variables")]
    NeighborOutOfRange {
        node: usize,
        neighbor: usize,
        num_variables: usize,
    },

    /// A bias or coupling is NaN or infinite.
    #[error("non-finite {what} at index {index}")]
    NonFinite { what: &'static str, index: usize },

    /// `temperatures` and `updates_per_temperature` differ in length.
    #[error("schedule has {temperatures} temperatures but {updates} update counts")]
    ScheduleLengthMismatch { temperatures: usize, updates: usize },

    /// The initial state does not cover every variable exactly once.
    #[error("initial state has {actual} spins, graph has {expected} variables")]
    StateLengthMismatch { expected: usize, actual: usize },

    /// A spin value other than -1 or +1.
    #[error("spin {index} has value {value}, expected -1 or 1")]
    InvalidSpin { index: usize, value: i8 },

    /// Annealing configuration rejected by [`crate::sa::AnnealConfig::validate`].
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, AnnealError>;
