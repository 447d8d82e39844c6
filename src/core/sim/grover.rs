//! Grover search primitives.
//!
//! The oracle and diffusion operator act directly on the amplitude vector:
//! O(1) for the phase flip, O(2^n) for inversion about the mean. No 2^n × 2^n
//! matrix is ever built.
use std::f64::consts::FRAC_PI_4;

use nalgebra::DVector;
use num_complex::Complex64 as C64;
use serde::Serialize;
use tracing::debug;

use super::apply::apply_single_qubit_gate;
use super::gates::h;
use super::state::{c, debug_check, dimension, zero_state, StateVector};
use crate::core::error::{QuantumError, Result};

/// Upper bound on an explicit iteration count.
pub const MAX_GROVER_ITERATIONS: usize = 1 << 20;

/// Rejects explicit iteration counts above [`MAX_GROVER_ITERATIONS`].
pub fn check_iterations(requested: usize) -> Result<usize> {
    if requested > MAX_GROVER_ITERATIONS {
        return Err(QuantumError::TooManyIterations { requested, max: MAX_GROVER_ITERATIONS });
    }
    Ok(requested)
}

/// `H^⊗n |0…0⟩`: amplitude `1/√(2^n)` everywhere.
pub fn uniform_superposition(n: usize) -> Result<StateVector> {
    let hadamard = h();
    (0..n).try_fold(zero_state(n)?, |psi, q| apply_single_qubit_gate(&hadamard, q, &psi, n))
}

/// Phase-flip oracle: negates the amplitude at `target`.
pub fn grover_oracle(state: &StateVector, target: usize) -> Result<StateVector> {
    if target >= state.len() {
        return Err(QuantumError::InvalidBasisIndex { index: target, dim: state.len() });
    }
    let mut out = state.raw().clone();
    out[target] = -out[target];
    Ok(StateVector::from_raw(out))
}

/// Inversion about the mean: `new[i] = 2·mean − state[i]`.
pub fn grover_diffusion(state: &StateVector) -> Result<StateVector> {
    let amps = state.amplitudes();
    let mean = amps.iter().sum::<C64>() / c(amps.len() as f64, 0.0);
    let two_mean = mean * 2.0;
    let out = DVector::from_iterator(amps.len(), amps.iter().map(|a| two_mean - a));
    debug_check(StateVector::from_raw(out))
}

/// `round(π/4 · √(2^n))`, optimal for a single marked item.
pub fn optimal_grover_iterations(n: usize) -> Result<usize> {
    let dim = dimension(n)?;
    Ok((FRAC_PI_4 * (dim as f64).sqrt()).round() as usize)
}

/// Outcome of a full Grover loop.
#[derive(Clone, Debug, Serialize)]
pub struct GroverRun {
    pub n_qubits: usize,
    pub target: usize,
    pub iterations: usize,
    /// Marked-state probability before the first iteration and after each one.
    pub history: Vec<f64>,
    #[serde(skip)]
    pub state: StateVector,
}

impl GroverRun {
    pub fn success_probability(&self) -> f64 {
        self.history.last().copied().unwrap_or(0.0)
    }
}

/// Oracle + diffusion, `iterations` times (default: optimal), from the uniform
/// superposition.
pub fn run_grover(n: usize, target: usize, iterations: Option<usize>) -> Result<GroverRun> {
    let mut state = uniform_superposition(n)?;
    if target >= state.len() {
        return Err(QuantumError::InvalidBasisIndex { index: target, dim: state.len() });
    }
    let iterations = match iterations {
        Some(k) => check_iterations(k)?,
        None => optimal_grover_iterations(n)?,
    };
    let marked = |psi: &StateVector| psi.amplitudes()[target].norm_sqr();

    let mut history = Vec::with_capacity(iterations.saturating_add(1));
    history.push(marked(&state));
    for step in 1..=iterations {
        state = grover_diffusion(&grover_oracle(&state, target)?)?;
        let p = marked(&state);
        debug!(step, p_marked = p, "grover iteration");
        history.push(p);
    }
    Ok(GroverRun { n_qubits: n, target, iterations, history, state })
}
