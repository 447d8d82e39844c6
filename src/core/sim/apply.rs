//! Gate application on full state vectors.
//!
//! Both entry points validate their indices eagerly and return a fresh vector;
//! the input state is never touched.
use tracing::trace;

use super::gates::Gate;
use super::state::{bit_of, debug_check, qubit_mask, StateVector};
use crate::core::error::{QuantumError, Result};

fn check_qubit(qubit: usize, n_qubits: usize) -> Result<()> {
    if qubit >= n_qubits {
        return Err(QuantumError::qubit_index(qubit, n_qubits));
    }
    Ok(())
}

/// Applies `gate` to `target`.
///
/// Basis indices are paired by bit `target`; each pair `(i0, i1)` is multiplied
/// by the 2×2 matrix. O(2^n) time and space.
pub fn apply_single_qubit_gate(
    gate: &Gate,
    target: usize,
    state: &StateVector,
    n_qubits: usize,
) -> Result<StateVector> {
    state.check_dimension(n_qubits)?;
    check_qubit(target, n_qubits)?;
    trace!(target_qubit = target, dim = state.len(), "apply 1q gate");

    let src = state.raw();
    let mut out = src.clone();
    let mask = qubit_mask(target);
    let (m00, m01, m10, m11) = (
        gate.entry(0, 0),
        gate.entry(0, 1),
        gate.entry(1, 0),
        gate.entry(1, 1),
    );
    for i0 in (0..src.len()).filter(|i| i & mask == 0) {
        let i1 = i0 | mask;
        let (a0, a1) = (src[i0], src[i1]);
        out[i0] = m00 * a0 + m01 * a1;
        out[i1] = m10 * a0 + m11 * a1;
    }
    debug_check(StateVector::from_raw(out))
}

/// Flips `target` on every basis index whose `control` bit is 1.
pub fn apply_cnot(
    control: usize,
    target: usize,
    state: &StateVector,
    n_qubits: usize,
) -> Result<StateVector> {
    state.check_dimension(n_qubits)?;
    check_qubit(control, n_qubits)?;
    check_qubit(target, n_qubits)?;
    if control == target {
        return Err(QuantumError::SameControlTarget { qubit: control });
    }
    trace!(control, target_qubit = target, dim = state.len(), "apply cnot");

    let src = state.raw();
    let mut out = src.clone();
    let flip = qubit_mask(target);
    for i in (0..src.len()).filter(|&i| bit_of(i, control) == 1) {
        out[i] = src[i ^ flip];
    }
    debug_check(StateVector::from_raw(out))
}

/// Applies a sequence of single-qubit gates in order.
pub fn apply_sequence<'a, I>(gates: I, state: &StateVector, n_qubits: usize) -> Result<StateVector>
where
    I: IntoIterator<Item = (&'a Gate, usize)>,
{
    gates
        .into_iter()
        .try_fold(state.clone(), |psi, (g, q)| apply_single_qubit_gate(g, q, &psi, n_qubits))
}
