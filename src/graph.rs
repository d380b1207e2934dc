//! Sparse spin graph.
//!
//! A QUSO model over `n` spins `z_i ∈ {-1, +1}`:
//!
//! ```text
//! E(z) = Σ_i h_i z_i + ½ Σ_i Σ_{j ∈ N(i)} J_ij z_i z_j
//! ```
//!
//! Couplings are stored once per directed edge. An undirected coupling
//! `J` between `i` and `j` is expected as two entries, `(i, j, J)` and
//! `(j, i, J)`; the graph never symmetrizes, and the `½` above assumes
//! both entries are present.
//!
//! Adjacency is held in compressed form: one contiguous [`Coupling`]
//! array plus per-node offsets, so `neighbors(i)` is a slice lookup.

use crate::error::{AnnealError, Result};
use crate::sa::Spin;

/// One directed coupling: the neighbor's index and the interaction weight.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coupling {
    pub neighbor: usize,
    pub weight: f64,
}

impl Coupling {
    pub fn new(neighbor: usize, weight: f64) -> Self {
        Self { neighbor, weight }
    }
}

/// Immutable QUSO model: linear biases plus per-node coupling lists.
///
/// With the `serde` feature the graph is (de)serialized as `bias` plus a
/// per-node `adjacency` list, and deserialization runs the same checks as
/// [`SpinGraph::from_adjacency`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawSpinGraph", into = "RawSpinGraph")
)]
pub struct SpinGraph {
    bias: Vec<f64>,
    /// `offsets[i]..offsets[i + 1]` indexes node `i`'s couplings.
    offsets: Vec<usize>,
    couplings: Vec<Coupling>,
}

impl SpinGraph {
    /// Builds a graph from flattened parallel arrays.
    ///
    /// Node `i` owns the next `neighbor_count[i]` entries of `neighbors`
    /// and `coupling`, in order.
    ///
    /// # Errors
    ///
    /// Fails if the arrays disagree in length, a neighbor index is out of
    /// range, or a value is not finite.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_quso::SpinGraph;
    ///
    /// // z0 and z1 coupled with J = -1, listed in both directions.
    /// let graph = SpinGraph::from_flat_parts(
    ///     vec![0.0, 0.0],
    ///     &[1, 1],
    ///     &[1, 0],
    ///     &[-1.0, -1.0],
    /// )
    /// .unwrap();
    /// assert_eq!(graph.num_variables(), 2);
    /// assert_eq!(graph.neighbors(0)[0].neighbor, 1);
    /// ```
    pub fn from_flat_parts(
        bias: Vec<f64>,
        neighbor_count: &[usize],
        neighbors: &[usize],
        coupling: &[f64],
    ) -> Result<Self> {
        let n = bias.len();
        if neighbor_count.len() != n {
            return Err(AnnealError::LengthMismatch {
                what: "neighbor_count",
                expected: n,
                actual: neighbor_count.len(),
            });
        }
        let mut offsets = Vec::with_capacity(n + 1);
        offsets.push(0usize);
        let mut total = 0usize;
        for &count in neighbor_count {
            total = total
                .checked_add(count)
                .ok_or(AnnealError::LengthMismatch {
                    what: "neighbors",
                    expected: usize::MAX,
                    actual: neighbors.len(),
                })?;
            offsets.push(total);
        }
        if neighbors.len() != total {
            return Err(AnnealError::LengthMismatch {
                what: "neighbors",
                expected: total,
                actual: neighbors.len(),
            });
        }
        if coupling.len() != total {
            return Err(AnnealError::LengthMismatch {
                what: "coupling",
                expected: total,
                actual: coupling.len(),
            });
        }

        let couplings = neighbors
            .iter()
            .zip(coupling)
            .map(|(&neighbor, &weight)| Coupling { neighbor, weight })
            .collect();

        let graph = Self {
            bias,
            offsets,
            couplings,
        };
        graph.check()?;
        Ok(graph)
    }

    /// Builds a graph from one coupling list per node.
    ///
    /// # Errors
    ///
    /// Same conditions as [`SpinGraph::from_flat_parts`].
    pub fn from_adjacency(bias: Vec<f64>, adjacency: Vec<Vec<Coupling>>) -> Result<Self> {
        if adjacency.len() != bias.len() {
            return Err(AnnealError::LengthMismatch {
                what: "adjacency",
                expected: bias.len(),
                actual: adjacency.len(),
            });
        }

        let mut offsets = Vec::with_capacity(bias.len() + 1);
        offsets.push(0);
        let mut couplings = Vec::with_capacity(adjacency.iter().map(Vec::len).sum());
        for list in adjacency {
            couplings.extend(list);
            offsets.push(couplings.len());
        }

        let graph = Self {
            bias,
            offsets,
            couplings,
        };
        graph.check()?;
        Ok(graph)
    }

    fn check(&self) -> Result<()> {
        let n = self.num_variables();
        if let Some(index) = self.bias.iter().position(|b| !b.is_finite()) {
            return Err(AnnealError::NonFinite {
                what: "bias",
                index,
            });
        }
        for node in 0..n {
            for (k, c) in self.neighbors(node).iter().enumerate() {
                if c.neighbor >= n {
                    return Err(AnnealError::NeighborOutOfRange {
                        node,
                        neighbor: c.neighbor,
                        num_variables: n,
                    });
                }
                if !c.weight.is_finite() {
                    return Err(AnnealError::NonFinite {
                        what: "coupling",
                        index: self.offsets[node] + k,
                    });
                }
            }
        }
        Ok(())
    }

    /// Number of spin variables.
    pub fn num_variables(&self) -> usize {
        self.bias.len()
    }

    /// Number of directed coupling entries.
    pub fn num_couplings(&self) -> usize {
        self.couplings.len()
    }

    pub fn bias(&self, i: usize) -> f64 {
        self.bias[i]
    }

    pub fn biases(&self) -> &[f64] {
        &self.bias
    }

    /// Couplings of node `i`, in the order they were supplied.
    #[inline]
    pub fn neighbors(&self, i: usize) -> &[Coupling] {
        &self.couplings[self.offsets[i]..self.offsets[i + 1]]
    }

    pub fn degree(&self, i: usize) -> usize {
        self.offsets[i + 1] - self.offsets[i]
    }

    /// Bias plus the weighted sum of neighbor spins.
    #[inline]
    pub fn local_field(&self, i: usize, state: &[Spin]) -> f64 {
        self.neighbors(i)
            .iter()
            .fold(self.bias[i], |acc, c| {
                acc + c.weight * f64::from(state[c.neighbor])
            })
    }

    /// Energy change caused by flipping spin `i`.
    ///
    /// Flipping `z_i` to `-z_i` changes `E` by `-2 z_i (h_i + Σ_j J_ij z_j)`.
    #[inline]
    pub fn flip_delta(&self, i: usize, state: &[Spin]) -> f64 {
        -2.0 * f64::from(state[i]) * self.local_field(i, state)
    }

    /// Total model energy of `state`.
    ///
    /// # Panics
    ///
    /// Panics if `state` is shorter than [`SpinGraph::num_variables`].
    pub fn energy(&self, state: &[Spin]) -> f64 {
        let mut linear = 0.0;
        let mut quadratic = 0.0;
        for i in 0..self.num_variables() {
            let zi = f64::from(state[i]);
            linear += self.bias[i] * zi;
            for c in self.neighbors(i) {
                quadratic += c.weight * zi * f64::from(state[c.neighbor]);
            }
        }
        linear + 0.5 * quadratic
    }
}

/// Wire form of [`SpinGraph`].
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct RawSpinGraph {
    bias: Vec<f64>,
    adjacency: Vec<Vec<Coupling>>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawSpinGraph> for SpinGraph {
    type Error = AnnealError;

    fn try_from(raw: RawSpinGraph) -> Result<Self> {
        SpinGraph::from_adjacency(raw.bias, raw.adjacency)
    }
}

#[cfg(feature = "serde")]
impl From<SpinGraph> for RawSpinGraph {
    fn from(graph: SpinGraph) -> Self {
        let adjacency = (0..graph.num_variables())
            .map(|i| graph.neighbors(i).to_vec())
            .collect();
        RawSpinGraph {
            bias: graph.bias,
            adjacency,
        }
    }
}
