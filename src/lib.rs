//! Simulated annealing for Quadratic Unconstrained Spin Optimization (QUSO).
//!
//! A QUSO model assigns each spin `z_i ∈ {-1, +1}` a linear bias and each
//! coupled pair a weight; the annealer searches for low-energy
//! assignments with a Metropolis single-spin-flip sampler.
//!
//! - **[`graph`]**: immutable sparse [`SpinGraph`] with per-node coupling
//!   lists, energy and flip-delta evaluation.
//! - **[`sa`]**: the annealing engine, explicit temperature schedules and
//!   cooling laws, and [`AnnealConfig`](sa::AnnealConfig) for multi-anneal runs.
//! - **[`random`]**: the seeded ChaCha8 stream every run draws from.
//!
//! # Example
//!
//! ```
//! use u_quso::sa::{AnnealRunner, Schedule};
//! use u_quso::SpinGraph;
//!
//! // Two spins that prefer to align.
//! let graph = SpinGraph::from_flat_parts(vec![0.0, 0.0], &[1, 1], &[1, 0], &[-1.0, -1.0])?;
//! let schedule = Schedule::from_parts(&[1.0, 0.1, 0.0], &[50, 50, 50])?;
//! let state = AnnealRunner::anneal(&graph, &[1, -1], &schedule, 42)?;
//! assert_eq!(state[0], state[1]);
//! # Ok::<(), u_quso::AnnealError>(())
//! ```

pub mod error;
pub mod graph;
pub mod random;
pub mod sa;

pub use error::{AnnealError, Result};
pub use graph::{Coupling, SpinGraph};
