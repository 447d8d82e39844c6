//! Born-rule readout: probabilities, sampling, collapse, basis labels.
//!
//! Randomness always comes from the caller's `rng`; nothing here touches a
//! thread-local or global generator.
use std::collections::BTreeMap;

use nalgebra::DVector;
use rand::Rng;
use tracing::debug;

use super::state::{bit_of, c, debug_check, dimension, StateVector};
use crate::core::error::{QuantumError, Result};

/// Squared magnitude of every amplitude, indexed by basis index.
pub fn probabilities(state: &StateVector) -> Vec<f64> {
    state.amplitudes().iter().map(|z| z.norm_sqr()).collect()
}

/// Draws one basis index distributed according to [`probabilities`].
pub fn measure<R: Rng + ?Sized>(state: &StateVector, rng: &mut R) -> usize {
    let outcome = sample_index(&probabilities(state), rng.gen::<f64>());
    debug!(outcome, dim = state.len(), "measure");
    outcome
}

/// Maps a uniform draw `r ∈ [0, 1)` through the cumulative distribution.
fn sample_index(probs: &[f64], r: f64) -> usize {
    let mut cumulative = 0.0;
    for (index, &p) in probs.iter().enumerate() {
        cumulative += p;
        if r < cumulative {
            return index;
        }
    }
    // Rounding left the total just under r; fall back to the last reachable outcome.
    probs.iter().rposition(|&p| p > 0.0).unwrap_or(0)
}

/// Histogram of `shots` independent draws of [`measure`], keyed by basis index.
pub fn sample_counts<R: Rng + ?Sized>(
    state: &StateVector,
    shots: usize,
    rng: &mut R,
) -> BTreeMap<usize, usize> {
    let probs = probabilities(state);
    let mut counts = BTreeMap::new();
    for _ in 0..shots {
        *counts.entry(sample_index(&probs, rng.gen::<f64>())).or_insert(0) += 1;
    }
    debug!(shots, distinct = counts.len(), "sampled counts");
    counts
}

/// Marginal probability that `qubit` reads 1.
pub fn qubit_probability(state: &StateVector, qubit: usize, n_qubits: usize) -> Result<f64> {
    state.check_dimension(n_qubits)?;
    if qubit >= n_qubits {
        return Err(QuantumError::qubit_index(qubit, n_qubits));
    }
    Ok(state
        .amplitudes()
        .iter()
        .enumerate()
        .filter(|(i, _)| bit_of(*i, qubit) == 1)
        .map(|(_, z)| z.norm_sqr())
        .sum())
}

/// Measures one qubit. Returns the bit and the collapsed, renormalized state;
/// `state` itself is unchanged.
pub fn measure_qubit<R: Rng + ?Sized>(
    state: &StateVector,
    qubit: usize,
    n_qubits: usize,
    rng: &mut R,
) -> Result<(usize, StateVector)> {
    let p1 = qubit_probability(state, qubit, n_qubits)?;
    let bit = usize::from(rng.gen::<f64>() < p1);
    let p = if bit == 1 { p1 } else { 1.0 - p1 };
    let scale = c(p.sqrt(), 0.0);
    let collapsed = DVector::from_iterator(
        state.len(),
        state.amplitudes().iter().enumerate().map(|(i, z)| {
            if bit_of(i, qubit) == bit {
                z / scale
            } else {
                c(0.0, 0.0)
            }
        }),
    );
    debug!(qubit, bit, p1, "measure qubit");
    Ok((bit, debug_check(StateVector::from_raw(collapsed))?))
}

/// Fixed-width bit string for `index`, most-significant qubit first, so qubit
/// 0 is the rightmost character.
pub fn basis_label(index: usize, n_qubits: usize) -> Result<String> {
    let dim = dimension(n_qubits)?;
    if index >= dim {
        return Err(QuantumError::InvalidBasisIndex { index, dim });
    }
    Ok(format!("{:0width$b}", index, width = n_qubits))
}

/// Ket form of [`basis_label`], e.g. `|01⟩`.
pub fn ket_label(index: usize, n_qubits: usize) -> Result<String> {
    Ok(format!("|{}⟩", basis_label(index, n_qubits)?))
}
