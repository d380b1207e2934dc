//! Metropolis single-spin-flip execution loop.

use rand::Rng;
use tracing::{debug, instrument};

use super::config::AnnealConfig;
use super::schedule::Schedule;
use super::types::{check_state, AnnealResult, Spin, UpdateOrder};
use crate::error::Result;
use crate::graph::SpinGraph;
use crate::random::{create_rng, random_state};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Executes simulated annealing on a [`SpinGraph`].
pub struct AnnealRunner;

impl AnnealRunner {
    /// Anneals `initial_state` through `schedule` and returns the final state.
    ///
    /// Variables are picked uniformly at random. The same graph, state,
    /// schedule and seed always produce the same output.
    ///
    /// # Errors
    ///
    /// Fails before any update if `initial_state` does not hold one ±1
    /// value per variable.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_quso::sa::{AnnealRunner, Schedule};
    /// use u_quso::SpinGraph;
    ///
    /// let graph = SpinGraph::from_flat_parts(vec![5.0], &[0], &[], &[]).unwrap();
    /// let schedule = Schedule::from_parts(&[0.0], &[10]).unwrap();
    /// let state = AnnealRunner::anneal(&graph, &[1], &schedule, 7).unwrap();
    /// assert_eq!(state, vec![-1]);
    /// ```
    pub fn anneal(
        graph: &SpinGraph,
        initial_state: &[Spin],
        schedule: &Schedule,
        seed: u64,
    ) -> Result<Vec<Spin>> {
        Self::anneal_with_order(graph, initial_state, schedule, seed, UpdateOrder::Random)
    }

    /// [`AnnealRunner::anneal`] with an explicit variable selection order.
    #[instrument(
        skip(graph, initial_state, schedule),
        fields(num_variables = graph.num_variables(), stages = schedule.len())
    )]
    pub fn anneal_with_order(
        graph: &SpinGraph,
        initial_state: &[Spin],
        schedule: &Schedule,
        seed: u64,
        order: UpdateOrder,
    ) -> Result<Vec<Spin>> {
        check_state(initial_state, graph.num_variables())?;

        let mut rng = create_rng(seed);
        let mut state = initial_state.to_vec();
        let accepted = execute(graph, &mut state, schedule, order, &mut rng);
        debug!(
            proposals = schedule.total_updates(),
            accepted, "anneal complete"
        );
        Ok(state)
    }

    /// Runs `num_anneals` independent anneals from the same start state.
    ///
    /// Anneal `k` is seeded with `seed + k` (wrapping), so result `k` equals
    /// `anneal_with_order(.., seed + k, order)`. With the `parallel` feature
    /// the anneals share the graph across rayon's pool; results stay in
    /// anneal order either way.
    pub fn anneal_many(
        graph: &SpinGraph,
        initial_state: &[Spin],
        schedule: &Schedule,
        seed: u64,
        num_anneals: usize,
        order: UpdateOrder,
    ) -> Result<Vec<AnnealResult>> {
        check_state(initial_state, graph.num_variables())?;
        Ok(fan_out(num_anneals, |k| {
            let mut rng = create_rng(seed.wrapping_add(k as u64));
            let mut state = initial_state.to_vec();
            execute(graph, &mut state, schedule, order, &mut rng);
            finish(graph, state)
        }))
    }

    /// Runs the anneals described by `config`.
    ///
    /// Without an explicit initial state, each anneal starts from a random
    /// state drawn from its own seeded stream.
    ///
    /// # Errors
    ///
    /// Invalid configuration, or an initial state that does not match the
    /// graph.
    #[instrument(skip_all, fields(num_variables = graph.num_variables(), num_anneals = config.num_anneals))]
    pub fn run(graph: &SpinGraph, config: &AnnealConfig) -> Result<Vec<AnnealResult>> {
        config.validate()?;
        if let Some(ref initial) = config.initial_state {
            check_state(initial, graph.num_variables())?;
        }

        let schedule = config.schedule_for(graph)?;
        let seed = config.seed.unwrap_or_else(rand::random);
        debug!(
            seed,
            stages = schedule.len(),
            updates = schedule.total_updates(),
            "resolved schedule"
        );

        Ok(fan_out(config.num_anneals, |k| {
            let mut rng = create_rng(seed.wrapping_add(k as u64));
            let mut state = match config.initial_state {
                Some(ref initial) => initial.clone(),
                None => random_state(graph.num_variables(), &mut rng),
            };
            execute(graph, &mut state, &schedule, config.order, &mut rng);
            finish(graph, state)
        }))
    }
}

fn finish(graph: &SpinGraph, state: Vec<Spin>) -> AnnealResult {
    let energy = graph.energy(&state);
    AnnealResult { state, energy }
}

#[cfg(feature = "parallel")]
fn fan_out<F>(n: usize, f: F) -> Vec<AnnealResult>
where
    F: Fn(usize) -> AnnealResult + Send + Sync,
{
    (0..n).into_par_iter().map(f).collect()
}

#[cfg(not(feature = "parallel"))]
fn fan_out<F>(n: usize, f: F) -> Vec<AnnealResult>
where
    F: Fn(usize) -> AnnealResult,
{
    (0..n).map(f).collect()
}

/// Runs every stage of `schedule` against `state`, returning the number
/// of accepted flips.
fn execute<R: Rng>(
    graph: &SpinGraph,
    state: &mut [Spin],
    schedule: &Schedule,
    order: UpdateOrder,
    rng: &mut R,
) -> usize {
    let n = graph.num_variables();
    if n == 0 {
        return 0;
    }

    let mut cursor = 0usize;
    let mut total_accepted = 0usize;

    for (index, stage) in schedule.stages().iter().enumerate() {
        let mut accepted = 0usize;

        for _ in 0..stage.updates {
            let v = match order {
                UpdateOrder::Random => rng.random_range(0..n),
                UpdateOrder::Sequential => {
                    let v = cursor;
                    cursor = if cursor + 1 == n { 0 } else { cursor + 1 };
                    v
                }
            };

            let delta = graph.flip_delta(v, state);
            if metropolis_accept(delta, stage.temperature, rng) {
                state[v] = -state[v];
                accepted += 1;
            }
        }

        debug!(
            stage = index,
            temperature = stage.temperature,
            updates = stage.updates,
            accepted,
            "stage complete"
        );
        total_accepted += accepted;
    }

    total_accepted
}

/// Metropolis criterion.
///
/// Non-increasing moves are always taken. Uphill moves are taken with
/// probability `exp(-delta / T)` when `T > 0`, and never otherwise; the
/// uniform draw is only made in the `T > 0` uphill case.
#[inline]
fn metropolis_accept<R: Rng>(delta: f64, temperature: f64, rng: &mut R) -> bool {
    if delta <= 0.0 {
        true
    } else if temperature > 0.0 {
        let probability = (-delta / temperature).exp();
        rng.random_range(0.0..1.0) < probability
    } else {
        false
    }
}
