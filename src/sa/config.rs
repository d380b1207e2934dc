//! Annealing configuration and cooling schedules.

use crate::error::{AnnealError, Result};
use crate::graph::SpinGraph;

use super::schedule::{Schedule, Stage};
use super::types::{Spin, UpdateOrder};

/// Cooling law used to spread stages between a start and end temperature.
///
/// # References
///
/// - Geometric: standard textbook approach
/// - Linear: fixed-step cooling
/// - LundyMees: Lundy & Mees (1986), with convergence proof
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CoolingSchedule {
    /// Geometric (exponential) cooling: `T_k = T_0 (T_f / T_0)^(k / (N-1))`.
    ///
    /// Most widely used. Equal ratio between consecutive stages.
    #[default]
    Geometric,

    /// Linear cooling: `T_k = T_0 + k (T_f - T_0) / (N-1)`.
    Linear,

    /// Lundy-Mees cooling: `T_{k+1} = T_k / (1 + beta * T_k)`.
    ///
    /// Cools fast at high T, slow at low T. `beta` is chosen so the last
    /// stage lands on `T_f`.
    LundyMees,
}

impl CoolingSchedule {
    /// Produces `stages` temperatures from `start` to `end`, inclusive.
    ///
    /// One stage yields `[start]`; zero stages yield nothing.
    pub fn temperatures(&self, start: f64, end: f64, stages: usize) -> Vec<f64> {
        match stages {
            0 => return Vec::new(),
            1 => return vec![start],
            _ => {}
        }
        let steps = (stages - 1) as f64;

        match self {
            CoolingSchedule::Geometric => {
                let ratio = end / start;
                (0..stages)
                    .map(|k| start * ratio.powf(k as f64 / steps))
                    .collect()
            }

            CoolingSchedule::Linear => (0..stages)
                .map(|k| start + k as f64 * (end - start) / steps)
                .collect(),

            CoolingSchedule::LundyMees => {
                let beta = (1.0 / end - 1.0 / start) / steps;
                let mut t = start;
                let mut out = Vec::with_capacity(stages);
                for _ in 0..stages {
                    out.push(t);
                    t /= 1.0 + beta * t;
                }
                out
            }
        }
    }

    /// Builds a schedule with `updates` proposals at each temperature.
    pub fn schedule(&self, start: f64, end: f64, stages: usize, updates: usize) -> Schedule {
        self.temperatures(start, end, stages)
            .into_iter()
            .map(|t| Stage::new(t, updates))
            .collect()
    }
}

/// Configuration for [`AnnealRunner::run`](super::AnnealRunner::run).
///
/// # Examples
///
/// ```
/// use u_quso::sa::{AnnealConfig, CoolingSchedule, UpdateOrder};
///
/// let config = AnnealConfig::default()
///     .with_num_anneals(10)
///     .with_anneal_duration(500)
///     .with_temperature_range(5.0, 0.05)
///     .with_cooling(CoolingSchedule::Linear)
///     .with_order(UpdateOrder::Sequential)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnnealConfig {
    /// Number of independent anneals.
    pub num_anneals: usize,

    /// Number of temperature stages per anneal.
    pub anneal_duration: usize,

    /// Flip proposals per stage. `None` = one sweep (`num_variables`).
    pub updates_per_temperature: Option<usize>,

    /// `(T_0, T_f)`. `None` = derived from the graph by [`temperature_range`].
    pub temperature_range: Option<(f64, f64)>,

    /// Cooling law between `T_0` and `T_f`.
    pub cooling: CoolingSchedule,

    /// Variable selection order.
    pub order: UpdateOrder,

    /// Starting state shared by every anneal. `None` = uniformly random,
    /// drawn per anneal.
    pub initial_state: Option<Vec<Spin>>,

    /// Base seed; anneal `k` uses `seed + k`. `None` = from entropy.
    pub seed: Option<u64>,
}

impl Default for AnnealConfig {
    fn default() -> Self {
        Self {
            num_anneals: 1,
            anneal_duration: 1000,
            updates_per_temperature: None,
            temperature_range: None,
            cooling: CoolingSchedule::default(),
            order: UpdateOrder::default(),
            initial_state: None,
            seed: None,
        }
    }
}

impl AnnealConfig {
    pub fn with_num_anneals(mut self, n: usize) -> Self {
        self.num_anneals = n;
        self
    }

    pub fn with_anneal_duration(mut self, stages: usize) -> Self {
        self.anneal_duration = stages;
        self
    }

    pub fn with_updates_per_temperature(mut self, n: usize) -> Self {
        self.updates_per_temperature = Some(n);
        self
    }

    pub fn with_temperature_range(mut self, start: f64, end: f64) -> Self {
        self.temperature_range = Some((start, end));
        self
    }

    pub fn with_cooling(mut self, cooling: CoolingSchedule) -> Self {
        self.cooling = cooling;
        self
    }

    pub fn with_order(mut self, order: UpdateOrder) -> Self {
        self.order = order;
        self
    }

    pub fn with_initial_state(mut self, state: Vec<Spin>) -> Self {
        self.initial_state = Some(state);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// The initial state is checked against the graph at run time.
    pub fn validate(&self) -> Result<()> {
        if self.num_anneals == 0 {
            return Err(AnnealError::InvalidConfig(
                "num_anneals must be positive".into(),
            ));
        }
        if self.updates_per_temperature == Some(0) {
            return Err(AnnealError::InvalidConfig(
                "updates_per_temperature must be positive".into(),
            ));
        }
        if let Some((start, end)) = self.temperature_range {
            if !(start.is_finite() && start > 0.0) || !(end.is_finite() && end > 0.0) {
                return Err(AnnealError::InvalidConfig(format!(
                    "temperature range must be finite and positive, got ({start}, {end})"
                )));
            }
            if start < end {
                return Err(AnnealError::InvalidConfig(format!(
                    "start temperature {start} is below end temperature {end}"
                )));
            }
        }
        Ok(())
    }

    /// Resolves the explicit schedule this config runs on `graph`.
    pub fn schedule_for(&self, graph: &SpinGraph) -> Result<Schedule> {
        let (start, end) = match self.temperature_range {
            Some(range) => range,
            None => temperature_range(graph, 0.5, 0.01)?,
        };
        let updates = self
            .updates_per_temperature
            .unwrap_or(graph.num_variables());
        Ok(self
            .cooling
            .schedule(start, end, self.anneal_duration, updates))
    }
}

/// Picks `(T_0, T_f)` from the scale of the model's coefficients.
///
/// `T_0` makes the largest possible uphill flip succeed with probability
/// `start_flip_prob`; `T_f` makes the smallest one succeed with
/// `end_flip_prob`. The largest flip cost for spin `i` is
/// `2 (|h_i| + Σ_j |J_ij|)` and the smallest nonzero one is twice the
/// smallest nonzero coefficient magnitude.
///
/// A graph without nonzero coefficients gets `(1.0, 0.01)`.
///
/// # Errors
///
/// [`AnnealError::InvalidConfig`] if either probability is outside `(0, 1)`.
pub fn temperature_range(
    graph: &SpinGraph,
    start_flip_prob: f64,
    end_flip_prob: f64,
) -> Result<(f64, f64)> {
    for p in [start_flip_prob, end_flip_prob] {
        if !(p > 0.0 && p < 1.0) {
            return Err(AnnealError::InvalidConfig(format!(
                "flip probability must be in (0, 1), got {p}"
            )));
        }
    }

    let mut max_delta = 0.0f64;
    let mut min_delta = f64::INFINITY;
    for (i, h) in graph.biases().iter().enumerate() {
        let mut total = h.abs();
        if total > 0.0 {
            min_delta = min_delta.min(total);
        }
        for c in graph.neighbors(i) {
            let w = c.weight.abs();
            total += w;
            if w > 0.0 {
                min_delta = min_delta.min(w);
            }
        }
        max_delta = max_delta.max(total);
    }

    if max_delta == 0.0 {
        return Ok((1.0, 0.01));
    }

    let start = -2.0 * max_delta / start_flip_prob.ln();
    let end = -2.0 * min_delta / end_flip_prob.ln();
    Ok((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Coupling;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
    }

    #[test]
    fn test_default_config() {
        let config = AnnealConfig::default();
        assert_eq!(config.num_anneals, 1);
        assert_eq!(config.anneal_duration, 1000);
        assert_eq!(config.cooling, CoolingSchedule::Geometric);
        assert_eq!(config.order, UpdateOrder::Random);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_anneals() {
        let config = AnnealConfig::default().with_num_anneals(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_updates() {
        let config = AnnealConfig::default().with_updates_per_temperature(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bad_temperature() {
        let config = AnnealConfig::default().with_temperature_range(-1.0, 0.1);
        assert!(config.validate().is_err());
        let config = AnnealConfig::default().with_temperature_range(1.0, f64::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_start_below_end() {
        let config = AnnealConfig::default().with_temperature_range(1.0, 10.0);
        assert!(matches!(
            config.validate(),
            Err(AnnealError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_cooling_endpoints() {
        for cooling in [
            CoolingSchedule::Geometric,
            CoolingSchedule::Linear,
            CoolingSchedule::LundyMees,
        ] {
            let ts = cooling.temperatures(10.0, 0.1, 50);
            assert_eq!(ts.len(), 50);
            assert!(close(ts[0], 10.0), "{cooling:?} start {}", ts[0]);
            assert!(close(ts[49], 0.1), "{cooling:?} end {}", ts[49]);
            for w in ts.windows(2) {
                assert!(w[1] < w[0], "{cooling:?} not descending");
            }
        }
    }

    #[test]
    fn test_geometric_constant_ratio() {
        let ts = CoolingSchedule::Geometric.temperatures(8.0, 1.0, 4);
        assert!(close(ts[1], 4.0));
        assert!(close(ts[2], 2.0));
    }

    #[test]
    fn test_cooling_degenerate_lengths() {
        assert!(CoolingSchedule::Linear.temperatures(5.0, 1.0, 0).is_empty());
        assert_eq!(CoolingSchedule::LundyMees.temperatures(5.0, 1.0, 1), vec![5.0]);
    }

    #[test]
    fn test_schedule_for_defaults_to_one_sweep() {
        let graph = SpinGraph::from_flat_parts(vec![1.0, 0.0, -1.0], &[0, 0, 0], &[], &[]).unwrap();
        let config = AnnealConfig::default()
            .with_anneal_duration(20)
            .with_temperature_range(2.0, 0.5);
        let schedule = config.schedule_for(&graph).unwrap();
        assert_eq!(schedule.len(), 20);
        assert!(schedule.stages().iter().all(|s| s.updates == 3));
        assert!(close(schedule.stages()[0].temperature, 2.0));
    }

    #[test]
    fn test_temperature_range_from_coefficients() {
        let graph = SpinGraph::from_adjacency(
            vec![3.0, 0.0],
            vec![vec![Coupling::new(1, -0.5)], vec![Coupling::new(0, -0.5)]],
        )
        .unwrap();
        let (start, end) = temperature_range(&graph, 0.5, 0.01).unwrap();
        assert!(close(start, -2.0 * 3.5 / 0.5f64.ln()));
        assert!(close(end, -2.0 * 0.5 / 0.01f64.ln()));
        assert!(start > end);
    }

    #[test]
    fn test_temperature_range_zero_model() {
        let graph = SpinGraph::from_flat_parts(vec![0.0, 0.0], &[0, 0], &[], &[]).unwrap();
        assert_eq!(temperature_range(&graph, 0.5, 0.01).unwrap(), (1.0, 0.01));
    }

    #[test]
    fn test_temperature_range_bad_probability() {
        let graph = SpinGraph::from_flat_parts(vec![1.0], &[0], &[], &[]).unwrap();
        assert!(temperature_range(&graph, 1.0, 0.01).is_err());
        assert!(temperature_range(&graph, 0.5, 0.0).is_err());
    }
}
