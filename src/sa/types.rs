//! Spin values, update order and per-anneal results.

/// A spin value: `-1` or `+1`.
pub type Spin = i8;

/// How the engine picks the variable for each proposed flip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UpdateOrder {
    /// Uniformly random variable per proposal.
    #[default]
    Random,

    /// Variables `0, 1, …, n-1, 0, …` in turn. The position carries over
    /// from one temperature stage to the next, so `n` proposals always
    /// make one full sweep.
    Sequential,
}

/// Outcome of a single anneal.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnnealResult {
    /// Final spin configuration.
    pub state: Vec<Spin>,

    /// Model energy of `state`.
    pub energy: f64,
}

/// Checks that `state` has one ±1 entry per variable.
pub(crate) fn check_state(state: &[Spin], num_variables: usize) -> crate::Result<()> {
    if state.len() != num_variables {
        return Err(crate::AnnealError::StateLengthMismatch {
            expected: num_variables,
            actual: state.len(),
        });
    }
    if let Some(index) = state.iter().position(|&s| s != 1 && s != -1) {
        return Err(crate::AnnealError::InvalidSpin {
            index,
            value: state[index],
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AnnealError;

    #[test]
    fn test_check_state_ok() {
        assert!(check_state(&[1, -1, 1], 3).is_ok());
        assert!(check_state(&[], 0).is_ok());
    }

    #[test]
    fn test_check_state_length() {
        assert_eq!(
            check_state(&[1, 1], 3),
            Err(AnnealError::StateLengthMismatch {
                expected: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn test_check_state_value() {
        assert_eq!(
            check_state(&[1, 0, -1], 3),
            Err(AnnealError::InvalidSpin { index: 1, value: 0 })
        );
    }
}
