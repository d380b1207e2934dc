//! Simulated Annealing (SA) over spin graphs.
//!
//! Single-spin-flip Metropolis sampling driven by a temperature schedule.
//! At each stage the engine proposes flips, always keeps those that do
//! not raise the energy, and keeps uphill flips with probability
//! `exp(-ΔE / T)`, so the state settles toward low-energy configurations
//! as `T` falls.
//!
//! # References
//!
//! - Metropolis, Rosenbluth, Rosenbluth, Teller & Teller (1953),
//!   "Equation of State Calculations by Fast Computing Machines"
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Lundy & Mees (1986), "Convergence of an Annealing Algorithm"

mod config;
mod runner;
mod schedule;
mod types;

pub use config::{temperature_range, AnnealConfig, CoolingSchedule};
pub use runner::AnnealRunner;
pub use schedule::{Schedule, Stage};
pub use types::{AnnealResult, Spin, UpdateOrder};
