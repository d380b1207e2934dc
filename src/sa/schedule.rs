//! Explicit temperature schedules.

use crate::error::{AnnealError, Result};

/// One temperature stage: `updates` flip proposals at `temperature`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stage {
    pub temperature: f64,
    pub updates: usize,
}

impl Stage {
    pub fn new(temperature: f64, updates: usize) -> Self {
        Self {
            temperature,
            updates,
        }
    }
}

/// Ordered list of stages, executed as given.
///
/// Temperatures need not be monotonic and are never reordered. A stage
/// at zero or negative temperature only accepts non-increasing moves.
///
/// # Examples
///
/// ```
/// use u_quso::sa::Schedule;
///
/// let schedule = Schedule::from_parts(&[2.0, 1.0, 0.5], &[100, 100, 200]).unwrap();
/// assert_eq!(schedule.len(), 3);
/// assert_eq!(schedule.total_updates(), 400);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Schedule {
    stages: Vec<Stage>,
}

impl Schedule {
    pub fn new(stages: Vec<Stage>) -> Self {
        Self { stages }
    }

    /// A schedule with no stages; annealing with it is a no-op.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Pairs parallel `temperatures` and `updates` arrays.
    ///
    /// # Errors
    ///
    /// [`AnnealError::ScheduleLengthMismatch`] if the lengths differ.
    pub fn from_parts(temperatures: &[f64], updates: &[usize]) -> Result<Self> {
        if temperatures.len() != updates.len() {
            return Err(AnnealError::ScheduleLengthMismatch {
                temperatures: temperatures.len(),
                updates: updates.len(),
            });
        }
        Ok(temperatures
            .iter()
            .zip(updates)
            .map(|(&t, &u)| Stage::new(t, u))
            .collect())
    }

    /// Same number of updates at every temperature.
    pub fn uniform<I: IntoIterator<Item = f64>>(temperatures: I, updates: usize) -> Self {
        temperatures
            .into_iter()
            .map(|t| Stage::new(t, updates))
            .collect()
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Total flip proposals across all stages.
    pub fn total_updates(&self) -> usize {
        self.stages.iter().map(|s| s.updates).sum()
    }
}

impl FromIterator<Stage> for Schedule {
    fn from_iter<I: IntoIterator<Item = Stage>>(iter: I) -> Self {
        Self {
            stages: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<Stage>> for Schedule {
    fn from(stages: Vec<Stage>) -> Self {
        Self::new(stages)
    }
}
